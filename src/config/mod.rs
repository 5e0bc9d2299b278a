//! Tries to create an `AppConfig` from config files and the environment.
//! Layers (later ones win): `config/base.toml`, `config/{environment}.toml`,
//! `APP_`-prefixed env variables and the Mailjet secrets.
//! Gets initialized with `OnceLock` so it only needs to get initialized once.

mod error;
mod types;

use std::{path::Path, sync::OnceLock};

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use tracing::info;

// Re-export config structs
pub use error::{ConfigError, ConfigResult};
pub use types::{AppConfig, Environment, MailjetConfig, NetConfig, SubscribeMode};

pub const API_KEY_VAR: &str = "MAILJET_API_KEY";
pub const SECRET_KEY_VAR: &str = "MAILJET_SECRET_KEY";
pub const LIST_ID_VAR: &str = "MAILJET_LIST_ID";

/// Env variables holding Mailjet secrets and the `mailjet_config` field each one fills.
const SECRET_VARS: [(&str, &str); 3] = [
    (API_KEY_VAR, "mailjet_config.api_key"),
    (SECRET_KEY_VAR, "mailjet_config.secret_key"),
    (LIST_ID_VAR, "mailjet_config.list_id"),
];

/// Allocates a static `OnceLock` containing `AppConfig`.
/// This ensures configuration only gets initialized the first time we call this function.
/// Every other caller gets a &'static ref to AppConfig.
/// Panics if anything goes wrong.
pub fn get_or_init_config() -> &'static AppConfig {
    static CONFIG_INIT: OnceLock<AppConfig> = OnceLock::new();
    CONFIG_INIT.get_or_init(|| {
        info!("{:<20} - Initializing the configuration", "get_or_init_config");
        let base_path = std::env::current_dir().expect("Failed to determine the current DIR.");
        let config_dir = base_path.join("config");

        let environment: Environment = std::env::var("APP_ENVIRONMENT")
            .unwrap_or_else(|_| "local".into())
            .try_into()
            .expect("Failed to parse APP_ENVIRONMENT.");

        AppConfig::load_from(&config_dir, environment)
            .unwrap_or_else(|er| panic!("Fatal Error: Building config: {er}"))
    })
}

impl AppConfig {
    /// Builds the layered `Figment` for the given config directory and environment.
    /// Mailjet secrets are merged as raw strings, so `007` stays `007`.
    pub fn figment(config_dir: &Path, environment: Environment) -> Figment {
        let environment_filename = format!("{}.toml", environment.as_ref().to_lowercase());

        let figment = Figment::new()
            .merge(Toml::file(config_dir.join("base.toml")))
            .merge(Toml::file(config_dir.join(environment_filename)))
            .merge(Env::prefixed("APP_").split("__"));

        SECRET_VARS
            .into_iter()
            .filter_map(|(var, key)| std::env::var(var).ok().map(|value| (key, value)))
            .fold(figment, |figment, (key, value)| {
                figment.merge(Serialized::default(key, value))
            })
    }

    pub fn load_from(config_dir: &Path, environment: Environment) -> ConfigResult<AppConfig> {
        let config: AppConfig = Self::figment(config_dir, environment).extract()?;
        Ok(config)
    }
}

// ###################################
// ->   TESTS
// ###################################
