//! Shared primitives for the Mealo client: the cookie codec that carries all
//! session state between workflow steps, the platform's bespoke location
//! encoding, and application configuration.

mod app_config;
mod config;
pub mod cookies;
pub mod location;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use cookies::{rewrite_domain, CookieError, CookieJar};
pub use location::{encode_location_value, LocationSelection};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
