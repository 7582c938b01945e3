//! Endpoint configuration for one release view of the notes admin API.
//!
//! All network-facing URLs used by the sync flows derive from two inputs:
//! the API base URL and the release this view belongs to. Edit-page and
//! bug-tracker link bases are overridable for non-default hosts.

use crate::error::{Error, Result};
use crate::models::NoteId;
use crate::util::is_http_url;

/// Default admin change-page base for a note.
pub const DEFAULT_EDIT_URL_BASE: &str = "/admin/rna/note/";

/// Default bug-tracker link base.
pub const DEFAULT_BUG_URL_BASE: &str = "https://bugzilla.mozilla.org/show_bug.cgi?id=";

/// Resolved URL set for one release view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    base_url: String,
    release_url: String,
    edit_url_base: String,
    bug_url_base: String,
}

impl Endpoints {
    /// Build the endpoint set from an API base URL and a release reference.
    ///
    /// `release` is either a bare release id (`"7"`), resolved against the
    /// base URL, or an explicit release resource URL. The release URL is the
    /// association value written into each note's `releases` list.
    pub fn new(base_url: &str, release: &str) -> Result<Self> {
        let base_url = normalize_base_url(base_url)?;

        let release = release.trim();
        let release_url = if release.is_empty() {
            return Err(Error::Config("release must not be empty".to_string()));
        } else if release.chars().all(|c| c.is_ascii_digit()) {
            format!("{base_url}/releases/{release}/")
        } else if is_http_url(release) || release.starts_with('/') {
            ensure_trailing_slash(release)
        } else {
            return Err(Error::Config(format!(
                "release must be an id or a resource URL, got '{release}'"
            )));
        };

        Ok(Self {
            base_url,
            release_url,
            edit_url_base: DEFAULT_EDIT_URL_BASE.to_string(),
            bug_url_base: DEFAULT_BUG_URL_BASE.to_string(),
        })
    }

    /// Override the admin change-page base (must end with `/`).
    #[must_use]
    pub fn with_edit_url_base(mut self, base: &str) -> Self {
        self.edit_url_base = ensure_trailing_slash(base.trim());
        self
    }

    /// Override the bug-tracker link base (the reference is appended verbatim).
    #[must_use]
    pub fn with_bug_url_base(mut self, base: &str) -> Self {
        self.bug_url_base = base.trim().to_string();
        self
    }

    /// This view's resource URL, the value stored in note associations.
    #[must_use]
    pub fn release_url(&self) -> &str {
        &self.release_url
    }

    /// Collection endpoint listing the notes shown in this view.
    #[must_use]
    pub fn notes_collection_url(&self) -> String {
        format!("{}notes/", self.release_url)
    }

    /// Resource URL of a single note.
    #[must_use]
    pub fn note_url(&self, id: NoteId) -> String {
        format!("{}/notes/{id}/", self.base_url)
    }

    /// One-time token issuance endpoint.
    #[must_use]
    pub fn auth_token_url(&self) -> String {
        format!("{}/auth_token/", self.base_url)
    }

    /// Admin change page for a note.
    #[must_use]
    pub fn edit_url(&self, id: NoteId) -> String {
        format!("{}{id}/", self.edit_url_base)
    }

    /// Bug-tracker link for a bug reference.
    #[must_use]
    pub fn bug_url(&self, bug: i64) -> String {
        format!("{}{bug}", self.bug_url_base)
    }
}

fn normalize_base_url(raw: &str) -> Result<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Err(Error::Config("base URL must not be empty".to_string()));
    }
    if !is_http_url(trimmed) {
        return Err(Error::Config(
            "base URL must include http:// or https://".to_string(),
        ));
    }
    Ok(trimmed.to_string())
}

fn ensure_trailing_slash(url: &str) -> String {
    if url.ends_with('/') {
        url.to_string()
    } else {
        format!("{url}/")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn release_id_derives_view_urls() {
        let endpoints = Endpoints::new("https://example.com/rna/", "7").unwrap();
        assert_eq!(endpoints.release_url(), "https://example.com/rna/releases/7/");
        assert_eq!(
            endpoints.notes_collection_url(),
            "https://example.com/rna/releases/7/notes/"
        );
    }

    #[test]
    fn explicit_release_url_gains_trailing_slash() {
        let endpoints =
            Endpoints::new("https://example.com/rna", "https://example.com/rna/releases/7")
                .unwrap();
        assert_eq!(endpoints.release_url(), "https://example.com/rna/releases/7/");
    }

    #[test]
    fn note_and_token_urls_derive_from_base() {
        let endpoints = Endpoints::new("https://example.com/rna", "7").unwrap();
        assert_eq!(
            endpoints.note_url(NoteId::new(5)),
            "https://example.com/rna/notes/5/"
        );
        assert_eq!(
            endpoints.auth_token_url(),
            "https://example.com/rna/auth_token/"
        );
    }

    #[test]
    fn default_link_bases_apply() {
        let endpoints = Endpoints::new("https://example.com/rna", "7").unwrap();
        assert_eq!(endpoints.edit_url(NoteId::new(5)), "/admin/rna/note/5/");
        assert_eq!(
            endpoints.bug_url(123),
            "https://bugzilla.mozilla.org/show_bug.cgi?id=123"
        );
    }

    #[test]
    fn link_base_overrides_apply() {
        let endpoints = Endpoints::new("https://example.com/rna", "7")
            .unwrap()
            .with_edit_url_base("/admin/notes")
            .with_bug_url_base("https://bugs.example.com/");
        assert_eq!(endpoints.edit_url(NoteId::new(5)), "/admin/notes/5/");
        assert_eq!(endpoints.bug_url(9), "https://bugs.example.com/9");
    }

    #[test]
    fn rejects_invalid_inputs() {
        assert!(Endpoints::new("", "7").is_err());
        assert!(Endpoints::new("example.com/rna", "7").is_err());
        assert!(Endpoints::new("https://example.com/rna", "").is_err());
        assert!(Endpoints::new("https://example.com/rna", "not a url").is_err());
    }
}
