//! Application context owning the deployment info loader.

use crate::config::Settings;
use crate::loader::DeploymentInfoLoader;
use crate::Error;

/// Holds the settings and the single [`DeploymentInfoLoader`] of an application.
///
/// Build it once at startup and pass it (or a reference to it) to whatever
/// needs deployment info.
///
/// ## Example
///
/// ```no_run
/// use deployment_info::{AppContext, Settings, config::ENV_PREFIX};
///
/// let ctx = AppContext::builder()
///     .with_settings(Settings::builder().with_env(ENV_PREFIX).build()?)
///     .build()?;
///
/// println!("version: {:?}", ctx.loader().version());
/// # Ok::<(), deployment_info::Error>(())
/// ```
#[derive(Debug)]
pub struct AppContext {
    settings: Settings,
    loader: DeploymentInfoLoader,
}

impl AppContext {
    /// Creates a new builder for constructing an `AppContext`.
    pub fn builder() -> AppContextBuilder {
        AppContextBuilder { settings: None }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn loader(&self) -> &DeploymentInfoLoader {
        &self.loader
    }

    /// Mutable access for an explicit [`reset`](DeploymentInfoLoader::reset).
    pub fn loader_mut(&mut self) -> &mut DeploymentInfoLoader {
        &mut self.loader
    }
}

/// Builder for constructing an [`AppContext`].
#[derive(Debug)]
#[must_use = "builders do nothing until .build() is called"]
pub struct AppContextBuilder {
    settings: Option<Settings>,
}

impl AppContextBuilder {
    /// Attaches the settings used to construct the loader.
    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.settings = Some(settings);
        self
    }

    /// Builds the `AppContext`, loading the deployment info file.
    ///
    /// Returns an error if no settings were provided. A file that fails to
    /// load is not an error here; check [`DeploymentInfoLoader::status`].
    pub fn build(self) -> Result<AppContext, Error> {
        let settings = self.settings.ok_or(Error::MissingSettings)?;
        let loader =
            DeploymentInfoLoader::new(&settings.json_file_path, settings.version_key.as_str());
        Ok(AppContext { settings, loader })
    }
}
