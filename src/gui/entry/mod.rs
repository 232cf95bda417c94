pub mod model;
pub mod view;

pub use model::{Entry, EntryContext, PersistError};
