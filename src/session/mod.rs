//! Conversational sessions with bounded history, and their on-disk store.

mod model;
mod store;

pub use model::{DEFAULT_MESSAGE_LIMIT, DEFAULT_ROLE, DEFAULT_SESSION_ID, Session};
pub use store::{RECORD_FORMAT, RECORD_VERSION, SessionStore, StoreError};
