//! Data models for relnotes-core

mod note;

pub use note::{Note, NoteId, TAGS};
