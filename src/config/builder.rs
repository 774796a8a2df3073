use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::env::load_env_vars;
use super::{ConfigError, Settings};

/// A settings source in the loading pipeline.
#[derive(Debug)]
enum SettingsSource {
    File { path: PathBuf, required: bool },
    Env { prefix: String },
}

/// Builder for [`Settings`] layered from TOML files and environment variables.
///
/// Sources are applied in registration order, with later sources overriding
/// earlier ones. Fields no source sets keep their defaults.
///
/// ## Example
///
/// ```no_run
/// use deployment_info::{Settings, config::ENV_PREFIX};
///
/// let settings = Settings::builder()
///     .with_file("config/deployment-info.toml", false)
///     .with_env(ENV_PREFIX)
///     .with_base_dir("/srv/app")
///     .build()?;
/// # Ok::<(), deployment_info::ConfigError>(())
/// ```
#[derive(Debug, Default)]
#[must_use = "builders do nothing until .build() is called"]
pub struct SettingsBuilder {
    sources: Vec<SettingsSource>,
    base_dir: Option<PathBuf>,
}

impl SettingsBuilder {
    /// Adds a TOML file to be loaded.
    ///
    /// If `required` is `true`, the build will fail if the file doesn't exist.
    /// Optional files that are missing are silently skipped.
    pub fn with_file(mut self, path: impl AsRef<Path>, required: bool) -> Self {
        self.sources.push(SettingsSource::File {
            path: path.as_ref().to_path_buf(),
            required,
        });
        self
    }

    /// Reads `{prefix}_JSON_FILE_PATH` and `{prefix}_VERSION_KEY`.
    ///
    /// Empty or whitespace-only variables are treated as unset.
    pub fn with_env(mut self, prefix: impl Into<String>) -> Self {
        self.sources.push(SettingsSource::Env {
            prefix: prefix.into(),
        });
        self
    }

    /// Resolves a relative `json_file_path` against `dir`, usually the
    /// project root.
    pub fn with_base_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.base_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    /// Loads every source, merges them, and deserializes the result.
    pub fn build(self) -> Result<Settings, ConfigError> {
        let mut merged = toml::Table::new();

        for source in self.sources {
            match source {
                SettingsSource::File { path, required } => {
                    if let Some(table) = load_settings_file(&path, required)? {
                        merged.extend(table);
                    }
                }
                SettingsSource::Env { prefix } => {
                    load_env_vars(&mut merged, &prefix);
                }
            }
        }

        let mut settings: Settings = toml::Value::Table(merged).try_into()?;

        if let Some(base) = self.base_dir {
            if settings.json_file_path.is_relative() {
                settings.json_file_path = base.join(&settings.json_file_path);
            }
        }

        Ok(settings)
    }
}

/// Keys a settings file may set.
const SETTINGS_KEYS: [&str; 2] = ["json_file_path", "version_key"];

/// Reads a TOML settings file, keeping only the keys [`Settings`] knows.
///
/// Returns `Ok(None)` if the file doesn't exist and `required` is false.
/// Unknown keys are dropped with a warning so a host can share the file.
fn load_settings_file(path: &Path, required: bool) -> Result<Option<toml::Table>, ConfigError> {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound && !required => {
            debug!(path = %path.display(), "optional settings file not found, skipping");
            return Ok(None);
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(ConfigError::FileNotFound(path.to_path_buf()));
        }
        Err(e) => {
            return Err(ConfigError::ReadError {
                path: path.to_path_buf(),
                source: e,
            });
        }
    };

    let mut table: toml::Table = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })?;

    let unknown: Vec<String> = table
        .keys()
        .filter(|key| !SETTINGS_KEYS.contains(&key.as_str()))
        .cloned()
        .collect();
    for key in unknown {
        warn!(path = %path.display(), key = %key, "ignoring unknown settings key");
        table.remove(&key);
    }

    debug!(path = %path.display(), keys = table.len(), "applying settings file");
    Ok(Some(table))
}
