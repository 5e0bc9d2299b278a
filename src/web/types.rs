//! Request and response bodies of the `web` module, their parsing implementations and tests for those.

use serde::{Deserialize, Serialize};

// ###################################
// ->   STRUCTS
// ###################################
/// Deserializable subscribe request.
/// A missing or `null` email ends up as `None`, validation happens in `WaitlistEmail::parse`.
#[derive(Debug, Deserialize)]
pub struct SubscribeBody {
    #[serde(default)]
    pub email: Option<String>,
}

/// An email that is about to be forwarded to the waitlist.
/// The only guarantee is that it is not empty, Mailjet decides the rest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WaitlistEmail(String);

impl AsRef<str> for WaitlistEmail {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl WaitlistEmail {
    pub fn parse<S>(value: S) -> Result<Self, DataParsingError>
    where
        S: AsRef<str>,
    {
        let value = value.as_ref().trim();

        if value.is_empty() {
            return Err(DataParsingError::EmailMissing);
        }

        Ok(WaitlistEmail(value.to_owned()))
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SubscribeResponse {
    pub success: bool,
}

impl SubscribeResponse {
    pub fn succeeded() -> Self {
        SubscribeResponse { success: true }
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct CountResponse {
    pub count: u64,
}

// ###################################
// ->   ERROR
// ###################################
#[derive(Debug, thiserror::Error)]
pub enum DataParsingError {
    #[error("Email is required")]
    EmailMissing,
}
