use anyhow::Context;
use std::sync::Arc;

use crate::auth::JwtKeys;
use crate::config::AppConfig;
use crate::database::models::{NotesDocument, UsersDocument};
use crate::database::{DocumentStore, JsonFileStore, MemoryStore, NoteRepository, UserRepository};

/// Shared handles passed to every handler and middleware
#[derive(Clone)]
pub struct AppState {
    pub notes: Arc<NoteRepository>,
    pub users: Arc<UserRepository>,
    pub jwt: JwtKeys,
}

impl AppState {
    pub fn new(
        notes: Arc<dyn DocumentStore<NotesDocument>>,
        users: Arc<dyn DocumentStore<UsersDocument>>,
        jwt: JwtKeys,
    ) -> Self {
        Self {
            notes: Arc::new(NoteRepository::new(notes)),
            users: Arc::new(UserRepository::new(users)),
            jwt,
        }
    }

    /// File-backed state as configured, creating missing store files
    pub async fn from_config(config: &AppConfig) -> anyhow::Result<Self> {
        let jwt = JwtKeys::from_config(&config.security)
            .context("check ACCESS_TOKEN_SECRET and JWT_EXPIRY_HOURS")?;

        let notes = JsonFileStore::<NotesDocument>::open(&config.storage.notes_path)
            .await
            .with_context(|| format!("failed to open notes store {}", config.storage.notes_path.display()))?;
        let users = JsonFileStore::<UsersDocument>::open(&config.storage.users_path)
            .await
            .with_context(|| format!("failed to open users store {}", config.storage.users_path.display()))?;

        Ok(Self::new(Arc::new(notes), Arc::new(users), jwt))
    }

    /// Memory-backed state that forgets everything on drop
    pub fn in_memory(jwt: JwtKeys) -> Self {
        Self::new(
            Arc::new(MemoryStore::<NotesDocument>::default()),
            Arc::new(MemoryStore::<UsersDocument>::default()),
            jwt,
        )
    }
}
