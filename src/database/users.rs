use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, warn};

use super::error::DatabaseError;
use super::models::{User, UsersDocument};
use super::store::DocumentStore;

pub struct UserRepository {
    store: Arc<dyn DocumentStore<UsersDocument>>,
    write_lock: Mutex<()>,
}

impl UserRepository {
    pub fn new(store: Arc<dyn DocumentStore<UsersDocument>>) -> Self {
        Self {
            store,
            write_lock: Mutex::new(()),
        }
    }

    pub async fn ping(&self) -> Result<(), DatabaseError> {
        self.store.load().await?;
        Ok(())
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, DatabaseError> {
        let doc = self.store.load().await?;
        Ok(doc.users.into_iter().find(|user| user.email == email))
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<User>, DatabaseError> {
        let doc = self.store.load().await?;
        Ok(doc.users.into_iter().find(|user| user.id == id))
    }

    /// Store a new user. Returns `false` without writing when the email is
    /// already registered.
    pub async fn append(&self, user: User) -> Result<bool, DatabaseError> {
        let _guard = self.write_lock.lock().await;

        let mut doc = self.store.load().await?;
        if doc.users.iter().any(|existing| existing.email == user.email) {
            warn!("User with email {} already exists, skipping", user.email);
            return Ok(false);
        }

        let id = user.id.clone();
        doc.users.push(user);
        self.store.save(&doc).await?;

        info!("User {} added", id);
        Ok(true)
    }
}
