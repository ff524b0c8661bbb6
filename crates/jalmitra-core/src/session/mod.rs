//! Session domain module.
//!
//! - `model`: the authenticated/unauthenticated state of the current user

mod model;

pub use model::{SESSION_STORAGE_KEY, Session};
