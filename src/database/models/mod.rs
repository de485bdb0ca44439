pub mod note;
pub mod user;

pub use note::{NewNote, Note, NotePatch, NotesDocument};
pub use user::{User, UserProfile, UsersDocument};
