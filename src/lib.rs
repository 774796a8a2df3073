pub mod config;
pub mod context;
mod error;
pub mod loader;
pub mod tree;

pub use config::{ConfigError, Settings};
pub use context::AppContext;
pub use error::Error;
pub use loader::{DeploymentInfoLoader, LoadError, LoadStatus};
pub use tree::DeploymentTree;
