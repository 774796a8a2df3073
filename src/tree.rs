//! The parsed deployment data tree.

use serde_json::{Map, Value};

/// Deployment data loaded from a JSON file.
///
/// The root is always a mapping or a sequence. Leaves are JSON scalars
/// (string, number, bool, null). An empty tree is an empty mapping.
#[derive(Debug, Clone, PartialEq)]
pub struct DeploymentTree {
    root: Value,
}

impl Default for DeploymentTree {
    fn default() -> Self {
        Self {
            root: Value::Object(Map::new()),
        }
    }
}

impl DeploymentTree {
    /// Wraps a parsed JSON document.
    ///
    /// Returns `None` for a scalar root, which is not a deployment tree.
    pub fn from_value(root: Value) -> Option<Self> {
        match root {
            Value::Object(_) | Value::Array(_) => Some(Self { root }),
            Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => None,
        }
    }

    pub fn root(&self) -> &Value {
        &self.root
    }

    /// Number of top-level entries.
    pub fn len(&self) -> usize {
        match &self.root {
            Value::Object(map) => map.len(),
            Value::Array(items) => items.len(),
            _ => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Counts the terminal values reachable from the root.
    ///
    /// Containers are never counted themselves, so an empty mapping or
    /// sequence contributes nothing.
    pub fn leaf_count(&self) -> usize {
        count_leaves(&self.root)
    }

    /// Looks up a dotted path such as `MULTI.MULTI_2ND.CI_COMMIT_SHA_3RD`.
    ///
    /// Every segment must name a key of a mapping; sequences and scalars are
    /// not traversed. Returns `None` when the path does not resolve and
    /// `Some(&Value::Null)` when it resolves to a JSON `null`.
    pub fn lookup(&self, key: &str) -> Option<&Value> {
        key.split('.')
            .try_fold(&self.root, |current, segment| current.as_object()?.get(segment))
    }
}

fn count_leaves(root: &Value) -> usize {
    let mut pending = vec![root];
    let mut count = 0;

    while let Some(value) = pending.pop() {
        match value {
            Value::Object(map) => pending.extend(map.values()),
            Value::Array(items) => pending.extend(items),
            Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => count += 1,
        }
    }

    count
}
