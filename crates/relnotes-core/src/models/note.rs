//! Release note model

use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Well-known tags offered by the admin UI, in display-priority order.
pub const TAGS: [&str; 5] = ["New", "Changed", "HTML5", "Developer", "Fixed"];

/// Server-assigned identifier for a note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteId(i64);

impl NoteId {
    #[must_use]
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn as_i64(self) -> i64 {
        self.0
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for NoteId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.trim().parse()?))
    }
}

/// A release note as served by the notes API.
///
/// `releases` holds the association URLs linking the note to release views;
/// a note belongs to this view's table exactly when the view's resource URL
/// appears in that list. Unknown response fields are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Server-assigned identifier
    pub id: NoteId,
    /// Short category tag, usually one of [`TAGS`]
    #[serde(default)]
    pub tag: String,
    /// Whether the note describes a known issue
    #[serde(default)]
    pub is_known_issue: bool,
    /// Note body, markdown source text
    #[serde(default)]
    pub note: String,
    /// Optional bug-tracker reference
    #[serde(default)]
    pub bug: Option<i64>,
    /// Editorial sort number; display order still follows response order
    #[serde(default)]
    pub sort_num: Option<i64>,
    /// Association URLs of the release views this note appears in
    #[serde(default)]
    pub releases: Vec<String>,
    /// Canonical URL of this note resource
    #[serde(default)]
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified: Option<DateTime<Utc>>,
}

impl Note {
    /// Whether this note is currently associated with the given view.
    #[must_use]
    pub fn is_associated_with(&self, view_url: &str) -> bool {
        self.releases.iter().any(|url| url == view_url)
    }

    /// Association list with the view's URL appended.
    ///
    /// The URL is appended even when already present; repeated adds
    /// accumulate duplicate entries, matching the server-side quirk.
    #[must_use]
    pub fn releases_with(&self, view_url: &str) -> Vec<String> {
        let mut releases = self.releases.clone();
        releases.push(view_url.to_string());
        releases
    }

    /// Association list with every entry equal to the view's URL removed,
    /// preserving the order of the remaining entries.
    #[must_use]
    pub fn releases_without(&self, view_url: &str) -> Vec<String> {
        self.releases
            .iter()
            .filter(|url| url.as_str() != view_url)
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn note_with_releases(releases: &[&str]) -> Note {
        Note {
            id: NoteId::new(5),
            tag: "Fixed".to_string(),
            is_known_issue: false,
            note: "Fixed a crash".to_string(),
            bug: Some(123),
            sort_num: Some(1),
            releases: releases.iter().map(ToString::to_string).collect(),
            url: "/rna/notes/5/".to_string(),
            created: None,
            modified: None,
        }
    }

    #[test]
    fn note_id_parses_and_displays() {
        let id: NoteId = " 42 ".parse().unwrap();
        assert_eq!(id, NoteId::new(42));
        assert_eq!(id.to_string(), "42");
    }

    #[test]
    fn note_id_rejects_non_numeric() {
        assert!("abc".parse::<NoteId>().is_err());
    }

    #[test]
    fn releases_with_appends_without_dedup() {
        let note = note_with_releases(&["/api/rel/7/notes/"]);
        assert_eq!(
            note.releases_with("/api/rel/7/notes/"),
            vec!["/api/rel/7/notes/", "/api/rel/7/notes/"]
        );
    }

    #[test]
    fn releases_without_preserves_remaining_order() {
        let note = note_with_releases(&["/api/rel/7/notes/", "/api/rel/9/notes/"]);
        assert_eq!(
            note.releases_without("/api/rel/7/notes/"),
            vec!["/api/rel/9/notes/"]
        );
    }

    #[test]
    fn releases_without_is_noop_when_absent() {
        let note = note_with_releases(&["/api/rel/9/notes/"]);
        assert_eq!(
            note.releases_without("/api/rel/7/notes/"),
            vec!["/api/rel/9/notes/"]
        );
    }

    #[test]
    fn is_associated_with_matches_exact_url() {
        let note = note_with_releases(&["/api/rel/7/notes/"]);
        assert!(note.is_associated_with("/api/rel/7/notes/"));
        assert!(!note.is_associated_with("/api/rel/7/notes"));
    }

    #[test]
    fn note_deserializes_wire_shape() {
        let raw = r#"{
            "id": 5,
            "tag": "New",
            "is_known_issue": false,
            "note": "Added things",
            "bug": null,
            "sort_num": 3,
            "releases": ["/rna/releases/7/"],
            "url": "/rna/notes/5/",
            "created": "2014-03-01T12:00:00Z",
            "unknown_field": "ignored"
        }"#;

        let note: Note = serde_json::from_str(raw).unwrap();
        assert_eq!(note.id, NoteId::new(5));
        assert_eq!(note.bug, None);
        assert_eq!(note.sort_num, Some(3));
        assert_eq!(note.releases, vec!["/rna/releases/7/"]);
        assert!(note.created.is_some());
        assert!(note.modified.is_none());
    }
}
