//! Sign-in port.
//!
//! The state containers only record the outcome of authentication; checking
//! credentials is delegated to an `Authenticator`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::Result;

#[derive(Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub phone: String,
    pub password: String,
}

impl Credentials {
    pub fn new(phone: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            phone: phone.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("phone", &self.phone)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[async_trait]
pub trait Authenticator: Send + Sync {
    /// Checks `credentials` and returns the farmer id to sign in as.
    async fn authenticate(&self, credentials: &Credentials) -> Result<String>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_password() {
        let creds = Credentials::new("+91 9876543210", "hunter2");
        let rendered = format!("{creds:?}");
        assert!(rendered.contains("+91 9876543210"));
        assert!(!rendered.contains("hunter2"));
    }
}
