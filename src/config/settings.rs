use std::path::PathBuf;

use serde::Deserialize;

use super::SettingsBuilder;

/// File name looked up in the project root when nothing else is configured.
pub const DEFAULT_JSON_FILE_PATH: &str = "deployment-info.json";

/// Key holding the application version in a GitLab CI dump.
pub const DEFAULT_VERSION_KEY: &str = "CI_COMMIT_TAG";

/// Prefix of the environment variables read by [`SettingsBuilder::with_env`]
/// in a standard host setup (`DEPLOYMENT_INFO_JSON_FILE_PATH`,
/// `DEPLOYMENT_INFO_VERSION_KEY`).
pub const ENV_PREFIX: &str = "DEPLOYMENT_INFO";

/// Where the deployment info file lives and which key holds the version.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub json_file_path: PathBuf,
    pub version_key: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            json_file_path: PathBuf::from(DEFAULT_JSON_FILE_PATH),
            version_key: DEFAULT_VERSION_KEY.to_string(),
        }
    }
}

impl Settings {
    /// Creates a new settings builder.
    pub fn builder() -> SettingsBuilder {
        SettingsBuilder::default()
    }

    pub fn new(json_file_path: impl Into<PathBuf>, version_key: impl Into<String>) -> Self {
        Self {
            json_file_path: json_file_path.into(),
            version_key: version_key.into(),
        }
    }
}
