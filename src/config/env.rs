use toml::{Table, Value};
use tracing::debug;

/// Environment variable suffixes and the settings fields they override.
const ENV_FIELDS: [(&str, &str); 2] = [
    ("JSON_FILE_PATH", "json_file_path"),
    ("VERSION_KEY", "version_key"),
];

/// Read an environment variable, returning None if unset, empty, or whitespace-only.
/// Returns the trimmed value if present.
pub fn env_var_or_none(key: &str) -> Option<String> {
    std::env::var(key).ok().and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// Writes `{prefix}_JSON_FILE_PATH` and `{prefix}_VERSION_KEY` into `table`
/// when they are set.
pub fn load_env_vars(table: &mut Table, prefix: &str) {
    for (suffix, field) in ENV_FIELDS {
        let var = format!("{prefix}_{suffix}");
        if let Some(value) = env_var_or_none(&var) {
            debug!(var = %var, field, "applying environment override");
            table.insert(field.to_string(), Value::String(value));
        }
    }
}
