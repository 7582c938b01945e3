//! In-memory model of the notes currently shown in this view.
//!
//! The sequence is replaced wholesale on every full refresh, appended to on
//! optimistic add, and filtered on remove. Order is server-response order;
//! nothing here sorts by `sort_num`. `&mut self` everywhere keeps all
//! mutation on one logical event thread, interleaved never concurrent.

use crate::models::{Note, NoteId};

/// Ordered sequence of the notes believed to be associated with this view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteListModel {
    notes: Vec<Note>,
}

impl NoteListModel {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Discard current contents and adopt the given sequence verbatim.
    pub fn replace_all(&mut self, notes: Vec<Note>) {
        self.notes = notes;
    }

    /// Add a note to the end of the sequence (optimistic add).
    pub fn append(&mut self, note: Note) {
        self.notes.push(note);
    }

    /// Drop every note whose identifier equals `id`.
    ///
    /// Equality is on identifier only; an absent id leaves the sequence
    /// unchanged.
    pub fn remove_by_id(&mut self, id: NoteId) {
        self.notes.retain(|note| note.id != id);
    }

    /// First note with the given identifier, if present.
    #[must_use]
    pub fn get(&self, id: NoteId) -> Option<&Note> {
        self.notes.iter().find(|note| note.id == id)
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Note] {
        &self.notes
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.notes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }
}
