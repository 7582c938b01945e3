//! Authenticated HTTP access to the notes collection.
//!
//! The admin API accepts partial updates only as `POST` requests carrying an
//! explicit method-override header, so every patch goes out as a generic
//! `POST` that the server observes as a `PATCH`. Fetches are plain `GET`s.
//! Nothing here retries: a failed call surfaces as an error and stops.

use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Client;
use serde::Serialize;

use crate::auth::AuthSession;
use crate::error::{parse_api_error, Error, Result};
use crate::models::Note;

/// Header observed by the server to treat the POST as a PATCH.
pub const METHOD_OVERRIDE_HEADER: &str = "X-HTTP-Method-Override";

/// Partial-update payload: the full replacement association list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReleasesPatch {
    pub releases: Vec<String>,
}

impl ReleasesPatch {
    /// Payload associating `note` with the given view.
    #[must_use]
    pub fn adding(note: &Note, view_url: &str) -> Self {
        Self {
            releases: note.releases_with(view_url),
        }
    }

    /// Payload dissociating `note` from the given view.
    #[must_use]
    pub fn removing(note: &Note, view_url: &str) -> Self {
        Self {
            releases: note.releases_without(view_url),
        }
    }
}

/// Client for the remote notes collection, layering the session token and
/// the method-override header onto partial updates.
#[derive(Debug, Clone)]
pub struct RemoteNoteStore {
    client: Client,
    session: AuthSession,
}

impl RemoteNoteStore {
    pub fn new(session: AuthSession) -> Result<Self> {
        Ok(Self {
            client: Client::builder().build()?,
            session,
        })
    }

    #[must_use]
    pub fn session(&self) -> &AuthSession {
        &self.session
    }

    /// Fetch the full note collection at `collection_url`.
    pub async fn fetch_notes(&self, collection_url: &str) -> Result<Vec<Note>> {
        let response = self
            .client
            .get(collection_url)
            .header(ACCEPT, "application/json")
            .send()
            .await?;
        let response = expect_success(response).await?;
        Ok(response.json().await?)
    }

    /// Fetch a single note resource.
    pub async fn fetch_note(&self, note_url: &str) -> Result<Note> {
        let response = self
            .client
            .get(note_url)
            .header(ACCEPT, "application/json")
            .send()
            .await?;
        let response = expect_success(response).await?;
        Ok(response.json().await?)
    }

    /// Partially update the note at `note_url` with a new association list.
    ///
    /// Acquires a session token first (one lazy exchange, then reuse), and
    /// returns the server's response body. If token acquisition fails the
    /// patch is never sent.
    pub async fn patch(&self, note_url: &str, payload: &ReleasesPatch) -> Result<serde_json::Value> {
        let token = self.session.acquire().await?;
        let body = serde_json::to_string(payload)?;

        let response = self
            .client
            .post(note_url)
            .header(AUTHORIZATION, token.header_value())
            .header(METHOD_OVERRIDE_HEADER, "PATCH")
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await?;
        let response = expect_success(response).await?;

        tracing::debug!(url = note_url, "patched note associations");
        Ok(response.json().await?)
    }
}

async fn expect_success(response: reqwest::Response) -> Result<reqwest::Response> {
    if response.status().is_success() {
        Ok(response)
    } else {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        Err(Error::Api(parse_api_error(status, &body)))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::models::NoteId;

    fn note(url: &str, releases: &[&str]) -> Note {
        Note {
            id: NoteId::new(5),
            tag: String::new(),
            is_known_issue: false,
            note: String::new(),
            bug: None,
            sort_num: None,
            releases: releases.iter().map(ToString::to_string).collect(),
            url: url.to_string(),
            created: None,
            modified: None,
        }
    }

    #[test]
    fn add_payload_appends_view_url_exactly() {
        let note = note("/rna/notes/5/", &[]);
        let payload = ReleasesPatch::adding(&note, "/api/rel/7/notes/");

        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({"releases": ["/api/rel/7/notes/"]})
        );
    }

    #[test]
    fn remove_payload_filters_view_url_preserving_order() {
        let note = note("/rna/notes/5/", &["/api/rel/7/notes/", "/api/rel/9/notes/"]);
        let payload = ReleasesPatch::removing(&note, "/api/rel/7/notes/");

        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({"releases": ["/api/rel/9/notes/"]})
        );
    }

    #[test]
    fn repeated_add_accumulates_duplicate_associations() {
        let note = note("/rna/notes/5/", &["/api/rel/7/notes/"]);
        let payload = ReleasesPatch::adding(&note, "/api/rel/7/notes/");

        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({"releases": ["/api/rel/7/notes/", "/api/rel/7/notes/"]})
        );
    }

    #[test]
    fn patch_body_serializes_releases_field_only() {
        let payload = ReleasesPatch {
            releases: vec!["/api/rel/9/notes/".to_string()],
        };
        assert_eq!(
            serde_json::to_string(&payload).unwrap(),
            r#"{"releases":["/api/rel/9/notes/"]}"#
        );
    }
}
