pub mod error;
pub mod models;
pub mod notes;
pub mod store;
pub mod users;

pub use error::DatabaseError;
pub use notes::NoteRepository;
pub use store::{DocumentStore, JsonFileStore, MemoryStore, StoreError};
pub use users::UserRepository;
