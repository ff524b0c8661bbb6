//! Sign-in checker used until a real identity backend exists.

use async_trait::async_trait;
use jalmitra_core::auth::{Authenticator, Credentials};
use jalmitra_core::error::{JalmitraError, Result};
use regex::Regex;

/// Farmer id every successful mock sign-in resolves to.
pub const MOCK_FARMER_ID: &str = "F123";

/// Accepts any Indian mobile number in `+91 XXXXXXXXXX` form with a
/// non-empty password.
#[derive(Debug, Clone)]
pub struct MockAuthenticator {
    phone_pattern: Regex,
}

impl MockAuthenticator {
    pub fn new() -> Self {
        Self {
            phone_pattern: Regex::new(r"^\+91 \d{10}$").expect("phone pattern is a valid regex"),
        }
    }
}

impl Default for MockAuthenticator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Authenticator for MockAuthenticator {
    async fn authenticate(&self, credentials: &Credentials) -> Result<String> {
        if !self.phone_pattern.is_match(&credentials.phone) {
            return Err(JalmitraError::InvalidCredentials(
                "phone must be +91 followed by 10 digits".to_string(),
            ));
        }
        if credentials.password.is_empty() {
            return Err(JalmitraError::InvalidCredentials("password is required".to_string()));
        }
        tracing::debug!(phone = %credentials.phone, "mock sign-in accepted");
        Ok(MOCK_FARMER_ID.to_string())
    }
}
