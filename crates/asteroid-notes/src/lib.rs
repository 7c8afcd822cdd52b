//! # asteroid-notes
//!
//! Text notes. Each note records its owner, and the owner's identity keeps
//! the list of note ids it owns.

#![warn(clippy::all)]

pub mod errors;
pub mod service;
pub mod traits;
pub mod types;

pub use errors::{NoteError, Result};
pub use service::NoteService;
pub use traits::NoteStore;
pub use types::Note;
