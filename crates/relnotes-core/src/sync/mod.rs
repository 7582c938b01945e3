//! Orchestrates fetches, patches, and table renders for one release view.
//!
//! Each flow is a request/response pair with no persisted state machine:
//! bootstrap loads and renders the collection, add associates a chosen note
//! with this view, remove dissociates one. All mutation happens through
//! `&mut self` on one logical event thread; once a flow starts it runs to
//! completion, there is no cancellation of an in-flight operation.

use crate::config::Endpoints;
use crate::error::{Error, Result};
use crate::list::NoteListModel;
use crate::markup::MarkupPipeline;
use crate::models::NoteId;
use crate::remote::{ReleasesPatch, RemoteNoteStore};
use crate::table::NoteTable;

/// Host-supplied popup-dismissal callbacks.
///
/// The admin shell installs its own dismissal handlers before this
/// controller loads. The controller's wrappers run the add flow and then
/// always delegate back to the host, whether or not the flow succeeded.
pub struct DismissHooks {
    pub related_lookup: Box<dyn FnMut(NoteId) + Send>,
    pub add_another: Box<dyn FnMut(NoteId, &str) + Send>,
}

impl Default for DismissHooks {
    fn default() -> Self {
        Self {
            related_lookup: Box::new(|_| {}),
            add_another: Box::new(|_, _| {}),
        }
    }
}

impl std::fmt::Debug for DismissHooks {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.debug_struct("DismissHooks").finish_non_exhaustive()
    }
}

/// Keeps the on-screen note table synchronized with the remote collection.
pub struct SyncController {
    store: RemoteNoteStore,
    endpoints: Endpoints,
    pipeline: MarkupPipeline,
    list: NoteListModel,
    table: NoteTable,
    hooks: DismissHooks,
}

impl SyncController {
    #[must_use]
    pub fn new(store: RemoteNoteStore, endpoints: Endpoints, pipeline: MarkupPipeline) -> Self {
        let table = NoteTable::new(endpoints.clone());
        Self {
            store,
            endpoints,
            pipeline,
            list: NoteListModel::new(),
            table,
            hooks: DismissHooks::default(),
        }
    }

    /// Install the host's popup-dismissal callbacks.
    #[must_use]
    pub fn with_dismiss_hooks(mut self, hooks: DismissHooks) -> Self {
        self.hooks = hooks;
        self
    }

    #[must_use]
    pub fn table(&self) -> &NoteTable {
        &self.table
    }

    #[must_use]
    pub fn notes(&self) -> &NoteListModel {
        &self.list
    }

    /// Initial load: fetch this view's full collection and render it.
    ///
    /// On failure the table is left untouched (empty or stale) and the error
    /// is returned; nothing retries.
    pub async fn bootstrap(&mut self) -> Result<()> {
        let notes = self
            .store
            .fetch_notes(&self.endpoints.notes_collection_url())
            .await?;
        self.list.replace_all(notes);
        self.table.render(self.list.as_slice(), &self.pipeline);
        tracing::debug!(count = self.list.len(), "bootstrapped note table");
        Ok(())
    }

    /// Add flow: associate the chosen note with this view.
    ///
    /// Fetches the note, patches its association list with this view's URL
    /// appended (duplicates and all), then runs both update paths: the
    /// optimistic local append renders first and the authoritative refresh
    /// renders last. The original issues the two concurrently and lets them
    /// race; this order is the one it exhibits when the refresh response
    /// arrives after the local concat, and makes the server's list final.
    pub async fn add_note(&mut self, id: NoteId) -> Result<()> {
        let note = self.store.fetch_note(&self.endpoints.note_url(id)).await?;
        let payload = ReleasesPatch::adding(&note, self.endpoints.release_url());
        self.store.patch(&note.url, &payload).await?;

        self.list.append(note);
        self.table.render(self.list.as_slice(), &self.pipeline);

        let notes = self
            .store
            .fetch_notes(&self.endpoints.notes_collection_url())
            .await?;
        self.list.replace_all(notes);
        self.table.render(self.list.as_slice(), &self.pipeline);
        tracing::debug!(%id, "added note to view");
        Ok(())
    }

    /// Remove flow: dissociate the note behind a rendered remove control.
    ///
    /// The control is resolved against the table's current row index at
    /// invocation time, so it follows whatever note the row is bound to now.
    pub async fn remove_note(&mut self, control_name: &str) -> Result<()> {
        let id = self
            .table
            .note_for_control(control_name)
            .ok_or_else(|| Error::UnknownControl(control_name.to_string()))?;
        let note = self
            .list
            .get(id)
            .cloned()
            .ok_or_else(|| Error::NoteNotFound(id.to_string()))?;

        let payload = ReleasesPatch::removing(&note, self.endpoints.release_url());
        self.store.patch(&note.url, &payload).await?;

        self.list.remove_by_id(id);
        self.table.render(self.list.as_slice(), &self.pipeline);
        tracing::debug!(%id, "removed note from view");
        Ok(())
    }

    /// Related-lookup popup dismissed with an existing note id.
    ///
    /// Runs the add flow, then delegates to the host hook unconditionally.
    pub async fn dismiss_related_lookup(&mut self, chosen_id: NoteId) -> Result<()> {
        let outcome = self.add_note(chosen_id).await;
        (self.hooks.related_lookup)(chosen_id);
        outcome
    }

    /// Add-another popup dismissed with a newly created note.
    ///
    /// Runs the add flow, then delegates to the host hook unconditionally.
    pub async fn dismiss_add_another(&mut self, new_id: NoteId, new_repr: &str) -> Result<()> {
        let outcome = self.add_note(new_id).await;
        (self.hooks.add_another)(new_id, new_repr);
        outcome
    }
}
