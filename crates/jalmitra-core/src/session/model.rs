//! Session domain model.

use serde::{Deserialize, Serialize};

/// Durable storage key holding the signed-in user id.
pub const SESSION_STORAGE_KEY: &str = "farmerId";

/// Authentication state of the current user.
///
/// The user id is present exactly when the session is active. Fields are
/// private so the two can never disagree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    user_id: Option<String>,
}

impl Session {
    /// An empty, unauthenticated session.
    pub fn inactive() -> Self {
        Self::default()
    }

    /// An active session bound to `user_id`.
    pub fn active(user_id: impl Into<String>) -> Self {
        Self {
            user_id: Some(user_id.into()),
        }
    }

    pub fn is_active(&self) -> bool {
        self.user_id.is_some()
    }

    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inactive_has_no_user() {
        let session = Session::inactive();
        assert!(!session.is_active());
        assert!(session.user_id().is_none());
    }

    #[test]
    fn test_active_carries_user() {
        let session = Session::active("F123");
        assert!(session.is_active());
        assert_eq!(session.user_id(), Some("F123"));
    }
}
