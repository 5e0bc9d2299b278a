//! The configuration structs used to build the AppConfig, and their impls.
use secrecy::SecretString;
use serde::{Deserialize, Deserializer};
use serde_aux::field_attributes::deserialize_string_from_number;
use strum_macros::AsRefStr;

use crate::config::{ConfigError, API_KEY_VAR, LIST_ID_VAR, SECRET_KEY_VAR};

// ###################################
// ->   STRUCTS
// ###################################
#[derive(AsRefStr, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Local,
    Production,
}

#[derive(Deserialize, Clone, Debug)]
pub struct AppConfig {
    pub net_config: NetConfig,
    pub mailjet_config: MailjetConfig,
}

#[derive(Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct NetConfig {
    pub host: [u8; 4],
    pub app_port: u16,
}

/// How a new email gets onto the waitlist.
#[derive(Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SubscribeMode {
    /// Create the contact, then add it to the list.
    #[default]
    TwoStep,
    /// A single call to the batch contact+list endpoint.
    Batch,
}

/// Settings for the Mailjet REST API.
/// The secrets are optional here: the server starts without them and the API handlers
/// report a configuration error until they are provided.
#[derive(Deserialize, Clone, Debug)]
pub struct MailjetConfig {
    pub base_url: String,
    pub timeout_millis: u64,
    #[serde(default)]
    pub subscribe_mode: SubscribeMode,
    #[serde(default, deserialize_with = "optional_secret")]
    pub api_key: Option<SecretString>,
    #[serde(default, deserialize_with = "optional_secret")]
    pub secret_key: Option<SecretString>,
    #[serde(default, deserialize_with = "optional_string")]
    pub list_id: Option<String>,
}

// ###################################
// ->   IMPLs
// ###################################
impl MailjetConfig {
    pub fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.timeout_millis)
    }

    /// Names of the environment variables whose values are missing.
    pub fn missing_secrets(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.api_key.is_none() {
            missing.push(API_KEY_VAR);
        }
        if self.secret_key.is_none() {
            missing.push(SECRET_KEY_VAR);
        }
        if self.list_id.is_none() {
            missing.push(LIST_ID_VAR);
        }
        missing
    }
}

/// Env values that look like numbers reach us as numbers, and an empty value counts as unset.
fn optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = deserialize_string_from_number(deserializer)?;
    let value = value.trim();
    Ok((!value.is_empty()).then(|| value.to_string()))
}

fn optional_secret<'de, D>(deserializer: D) -> Result<Option<SecretString>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(optional_string(deserializer)?.map(SecretString::from))
}

// ###################################
// ->   TRY FROMs
// ###################################

impl TryFrom<String> for Environment {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.to_ascii_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "production" => Ok(Self::Production),
            _ => Err(Self::Error::StringToEnvironmentFail(value)),
        }
    }
}

// ###################################
// ->   TESTS
// ###################################
