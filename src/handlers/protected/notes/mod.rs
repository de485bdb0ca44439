pub mod collection;
pub mod record;

pub use collection::create as note_create;
pub use collection::list as notes_list;

pub use record::delete as note_delete;
pub use record::get as note_get;
pub use record::update as note_update;

use crate::error::ApiError;

pub(crate) fn forbidden(id: &str) -> ApiError {
    ApiError::forbidden(format!("Note with id {} belongs to another user", id))
}
