//! Loading deployment info from a JSON file.
//!
//! A deployment pipeline writes a JSON document (typically CI variables such
//! as `CI_COMMIT_SHA`) next to the application. [`DeploymentInfoLoader`]
//! reads it once, records whether the load worked, and answers dotted-key
//! queries against it.
//!
//! Loading never fails loudly: every outcome is reported through
//! [`status`](DeploymentInfoLoader::status) and
//! [`error`](DeploymentInfoLoader::error).

mod error;

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::tree::DeploymentTree;

pub use error::LoadError;

/// Deepest container nesting accepted in a deployment info file.
pub const MAX_NESTING_DEPTH: usize = 512;

/// Outcome of the last load attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStatus {
    Success,
    Error,
}

impl LoadStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for LoadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything a load attempt produces. Swapped in whole on every reset.
#[derive(Debug, Clone)]
struct LoadState {
    tree: DeploymentTree,
    total: usize,
    error: Option<LoadError>,
    message: String,
}

impl LoadState {
    fn loaded(tree: DeploymentTree) -> Self {
        Self {
            total: tree.leaf_count(),
            tree,
            error: None,
            message: String::new(),
        }
    }

    fn failed(error: LoadError) -> Self {
        Self {
            tree: DeploymentTree::default(),
            total: 0,
            message: error.to_string(),
            error: Some(error),
        }
    }
}

/// Loads a deployment info JSON file and answers queries against it.
///
/// ## Example
///
/// ```no_run
/// use deployment_info::{DeploymentInfoLoader, LoadStatus};
///
/// let loader = DeploymentInfoLoader::new("deployment-info.json", "CI_COMMIT_TAG");
/// if loader.status() == LoadStatus::Success {
///     println!("{} values loaded", loader.total());
///     println!("sha: {:?}", loader.value_by_key("CI_COMMIT_SHA"));
///     println!("version: {:?}", loader.version());
/// } else {
///     eprintln!("{}", loader.error());
/// }
/// ```
#[derive(Debug, Clone)]
pub struct DeploymentInfoLoader {
    json_path: PathBuf,
    version_key: String,
    state: LoadState,
}

impl DeploymentInfoLoader {
    /// Creates a loader and immediately loads `json_path`.
    ///
    /// `version_key` is the dotted path of the value returned by
    /// [`version`](Self::version).
    pub fn new(json_path: impl AsRef<Path>, version_key: impl Into<String>) -> Self {
        let mut loader = Self {
            json_path: PathBuf::new(),
            version_key: version_key.into(),
            state: LoadState::failed(LoadError::InvalidPath(PathBuf::new())),
        };
        loader.reset(json_path);
        loader
    }

    /// Loads `json_path`, replacing the tree, status, error, and total.
    ///
    /// A failed attempt clears the previously loaded tree.
    pub fn reset(&mut self, json_path: impl AsRef<Path>) {
        let path = json_path.as_ref().to_path_buf();
        debug!(path = %path.display(), "loading deployment info");

        let state = match load_tree(&path) {
            Ok(tree) => {
                let state = LoadState::loaded(tree);
                debug!(path = %path.display(), total = state.total, "deployment info loaded");
                state
            }
            Err(e) => {
                warn!(
                    path = %path.display(),
                    reason = e.reason().unwrap_or_default(),
                    "{e}"
                );
                LoadState::failed(e)
            }
        };

        self.json_path = path;
        self.state = state;
    }

    /// Returns true if `json_path` exists and has a `json` extension.
    ///
    /// The extension is whatever follows the last `.` of the file name, so a
    /// file named `.json` qualifies. The comparison is case-sensitive.
    pub fn is_json_path_valid(json_path: impl AsRef<Path>) -> bool {
        let path = json_path.as_ref();
        let extension = path
            .file_name()
            .and_then(|name| name.to_str())
            .and_then(|name| name.rsplit_once('.'))
            .map(|(_, extension)| extension);

        path.exists() && extension == Some("json")
    }

    pub fn status(&self) -> LoadStatus {
        if self.state.error.is_some() {
            LoadStatus::Error
        } else {
            LoadStatus::Success
        }
    }

    /// Human-readable failure message, empty after a successful load.
    pub fn error(&self) -> &str {
        &self.state.message
    }

    /// The typed failure of the last attempt, if it failed.
    pub fn load_error(&self) -> Option<&LoadError> {
        self.state.error.as_ref()
    }

    /// Number of leaf values in the loaded tree; zero after a failure.
    pub fn total(&self) -> usize {
        self.state.total
    }

    pub fn deployment_info(&self) -> &DeploymentTree {
        &self.state.tree
    }

    /// Looks up a dotted key, e.g. `MULTI.CI_COMMIT_SHA_2ND`.
    ///
    /// See [`DeploymentTree::lookup`].
    pub fn value_by_key(&self, key: &str) -> Option<&Value> {
        self.state.tree.lookup(key)
    }

    /// The value at the configured version key, whatever its type.
    pub fn version(&self) -> Option<&Value> {
        self.value_by_key(&self.version_key)
    }

    pub fn version_key(&self) -> &str {
        &self.version_key
    }

    pub fn set_version_key(&mut self, version_key: impl Into<String>) {
        self.version_key = version_key.into();
    }

    /// Path used by the last load attempt.
    pub fn json_path(&self) -> &Path {
        &self.json_path
    }
}

fn load_tree(path: &Path) -> Result<DeploymentTree, LoadError> {
    if !DeploymentInfoLoader::is_json_path_valid(path) {
        return Err(LoadError::InvalidPath(path.to_path_buf()));
    }

    let contents = std::fs::read_to_string(path).map_err(|e| LoadError::invalid_json(path, e))?;
    let value =
        parse_document(trim_document(&contents)).map_err(|e| LoadError::invalid_json(path, e))?;

    DeploymentTree::from_value(value)
        .ok_or_else(|| LoadError::invalid_json(path, "document root is not an object or array"))
}

/// Strips spaces, tabs, line breaks, vertical tabs, and NUL bytes from both ends.
fn trim_document(contents: &str) -> &str {
    contents.trim_matches(|c: char| matches!(c, ' ' | '\t' | '\n' | '\r' | '\x0B' | '\0'))
}

/// Parses without serde_json's 128-level limit, after checking the nesting
/// against [`MAX_NESTING_DEPTH`].
fn parse_document(text: &str) -> Result<Value, String> {
    let depth = nesting_depth(text);
    if depth > MAX_NESTING_DEPTH {
        return Err(format!(
            "nesting depth {depth} exceeds the maximum of {MAX_NESTING_DEPTH}"
        ));
    }

    let mut de = serde_json::Deserializer::from_str(text);
    de.disable_recursion_limit();
    let value = Value::deserialize(&mut de).map_err(|e| e.to_string())?;
    de.end().map_err(|e| e.to_string())?;
    Ok(value)
}

/// Deepest `{`/`[` nesting outside string literals.
fn nesting_depth(text: &str) -> usize {
    let mut depth = 0usize;
    let mut deepest = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for byte in text.bytes() {
        if in_string {
            match byte {
                _ if escaped => escaped = false,
                b'\\' => escaped = true,
                b'"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match byte {
            b'"' => in_string = true,
            b'{' | b'[' => {
                depth += 1;
                deepest = deepest.max(depth);
            }
            b'}' | b']' => depth = depth.saturating_sub(1),
            _ => {}
        }
    }

    deepest
}
