//! Settings for locating the deployment info file.

mod builder;
mod env;
mod error;
mod settings;

pub use builder::SettingsBuilder;
pub use error::ConfigError;
pub use settings::{Settings, DEFAULT_JSON_FILE_PATH, DEFAULT_VERSION_KEY, ENV_PREFIX};
