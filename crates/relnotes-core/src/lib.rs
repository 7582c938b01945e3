//! relnotes-core - Core library for relnotes
//!
//! Keeps an admin view's release-notes table synchronized with the remote
//! notes collection: a lazily-acquired token session, a partial-update
//! client, the in-memory note list, a keyed table renderer, and the
//! controller tying them together.

pub mod auth;
pub mod config;
pub mod error;
pub mod list;
pub mod markup;
pub mod models;
pub mod remote;
pub mod sync;
pub mod table;
pub mod util;

pub use error::{Error, Result};
pub use models::{Note, NoteId};
