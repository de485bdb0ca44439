use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;

use super::error::DatabaseError;
use super::models::{Note, NotePatch, NotesDocument};
use super::store::DocumentStore;

/// Per-user note access over a whole-document store.
///
/// Mutations hold `write_lock` for the full load-mutate-save cycle so two
/// writers in this process cannot drop each other's changes.
pub struct NoteRepository {
    store: Arc<dyn DocumentStore<NotesDocument>>,
    write_lock: Mutex<()>,
}

impl NoteRepository {
    pub fn new(store: Arc<dyn DocumentStore<NotesDocument>>) -> Self {
        Self {
            store,
            write_lock: Mutex::new(()),
        }
    }

    /// Load the document without touching it
    pub async fn ping(&self) -> Result<(), DatabaseError> {
        self.store.load().await?;
        Ok(())
    }

    pub async fn append(&self, note: Note) -> Result<(), DatabaseError> {
        let _guard = self.write_lock.lock().await;

        let mut doc = self.store.load().await?;
        let (id, user_id) = (note.id.clone(), note.user_id.clone());
        doc.notes.push(note);
        self.store.save(&doc).await?;

        info!("Note {} added for user {}", id, user_id);
        Ok(())
    }

    /// Notes owned by `user_id`, in insertion order
    pub async fn list_by_owner(&self, user_id: &str) -> Result<Vec<Note>, DatabaseError> {
        let doc = self.store.load().await?;
        Ok(doc
            .notes
            .into_iter()
            .filter(|note| note.is_owned_by(user_id))
            .collect())
    }

    pub async fn find_by_id(&self, note_id: &str, user_id: &str) -> Result<Note, DatabaseError> {
        let doc = self.store.load().await?;
        let index = owned_index(&doc, note_id, user_id)?;
        Ok(doc.notes[index].clone())
    }

    /// Remove a note and return it
    pub async fn delete_by_id(&self, note_id: &str, user_id: &str) -> Result<Note, DatabaseError> {
        let _guard = self.write_lock.lock().await;

        let mut doc = self.store.load().await?;
        let index = owned_index(&doc, note_id, user_id)?;
        let removed = doc.notes.remove(index);
        self.store.save(&doc).await?;

        info!("Note {} deleted by user {}", note_id, user_id);
        Ok(removed)
    }

    /// Apply the present fields of `patch` and return the updated note
    pub async fn patch(
        &self,
        note_id: &str,
        user_id: &str,
        patch: NotePatch,
    ) -> Result<Note, DatabaseError> {
        let _guard = self.write_lock.lock().await;

        let mut doc = self.store.load().await?;
        let index = owned_index(&doc, note_id, user_id)?;
        doc.notes[index].apply(patch);
        let updated = doc.notes[index].clone();
        self.store.save(&doc).await?;

        info!("Note {} updated by user {}", note_id, user_id);
        Ok(updated)
    }
}

/// Position of `note_id` in the document, provided `user_id` owns it
fn owned_index(doc: &NotesDocument, note_id: &str, user_id: &str) -> Result<usize, DatabaseError> {
    let index = doc
        .notes
        .iter()
        .position(|note| note.id == note_id)
        .ok_or_else(|| DatabaseError::NotFound(format!("Note with id {} doesn't exist!", note_id)))?;

    if !doc.notes[index].is_owned_by(user_id) {
        return Err(DatabaseError::Forbidden(format!(
            "Note with id {} belongs to another user",
            note_id
        )));
    }

    Ok(index)
}
