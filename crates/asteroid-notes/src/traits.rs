//! Note service trait definitions.

use crate::{errors::Result, types::Note};
use asteroid_storage::OpContext;
use async_trait::async_trait;
use uuid::Uuid;

/// Note persistence and ownership checks
#[async_trait]
pub trait NoteStore: Send + Sync {
    /// Persist a note and record it on the owner
    ///
    /// The two writes are not atomic: readers of the owner may briefly miss
    /// the new id. If the owner update fails the note is tombstoned.
    async fn create_note(&self, ctx: &OpContext, owner_id: Uuid, text: &str) -> Result<Note>;

    /// Read a note by id
    async fn get_note(&self, ctx: &OpContext, id: Uuid) -> Result<Note>;

    /// Read a note on behalf of `caller_id`, who must own it
    async fn get_note_for(&self, ctx: &OpContext, caller_id: Uuid, id: Uuid) -> Result<Note>;
}
