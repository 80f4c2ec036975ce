//! Configuration loading and environment variable interpolation

use crate::error::{Error, Result};
use regex::Regex;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use super::Config;

pub const CONFIG_FILENAME: &str = "qrdash.toml";

/// Load configuration from qrdash.toml
pub fn load_config() -> Result<Config> {
    let config_path = find_config_file()?;
    load_config_from_path(&config_path)
}

/// Load the config file if one can be found, otherwise built-in defaults.
/// An explicit path must exist.
pub fn load_config_or_default(explicit: Option<&Path>) -> Result<Config> {
    if let Some(path) = explicit {
        return load_config_from_path(path);
    }
    match load_config() {
        Ok(config) => Ok(config),
        Err(Error::ConfigNotFound) => {
            tracing::debug!("No {} found, using defaults", CONFIG_FILENAME);
            Ok(Config::default())
        }
        Err(e) => Err(e),
    }
}

/// Load configuration from a specific path
pub fn load_config_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path).map_err(|_| Error::ConfigNotFound)?;
    let content = interpolate_env_vars(&content);
    let config: Config = toml::from_str(&content)?;
    Ok(config)
}

/// Find the configuration file, searching upward from current directory
fn find_config_file() -> Result<PathBuf> {
    let mut current = env::current_dir().map_err(|e| Error::Config(e.to_string()))?;

    loop {
        let config_path = current.join(CONFIG_FILENAME);
        if config_path.exists() {
            return Ok(config_path);
        }

        if !current.pop() {
            return Err(Error::ConfigNotFound);
        }
    }
}

/// Replace `${VAR}` and `${VAR:-default}` with environment values.
/// Unset variables without a default become empty.
pub fn interpolate_env_vars(content: &str) -> String {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)(?::-([^}]*))?\}")
        .expect("static pattern is valid");

    re.replace_all(content, |caps: &regex::Captures| {
        let var_name = &caps[1];
        let default = caps.get(2).map(|m| m.as_str()).unwrap_or("");

        env::var(var_name).unwrap_or_else(|_| default.to_string())
    })
    .to_string()
}

/// Generate a default configuration file content
pub fn default_config_content() -> &'static str {
    r##"# qrdash configuration

[client]
api_base = "${QRDASH_API_BASE:-http://localhost:8000/api}"
# session_file = "./.qrdash-session.json"
# timeout_secs = 30

# Reference backend started by 'qrdash serve'
[server]
host = "127.0.0.1"
port = 8000
# jwt_secret = "${QRDASH_JWT_SECRET}"
token_ttl_minutes = 60
password_cost = 12
# data_file = "./qrdash-data.json"

# Defaults for 'qrdash qr create' and 'qrdash qr save'
[qr]
dot_style = "square"   # square | rounded | circle | gapped
eye_style = "square"
fill_color = "#000000"
back_color = "#ffffff"

[qr.render]
module_size = 10
border = 4
"##
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::qr::QrStyle;

    #[test]
    fn test_env_interpolation() {
        env::set_var("QRDASH_TEST_VAR", "hello");
        let content = "value = \"${QRDASH_TEST_VAR}\"";
        let result = interpolate_env_vars(content);
        assert_eq!(result, "value = \"hello\"");
        env::remove_var("QRDASH_TEST_VAR");
    }

    #[test]
    fn test_env_interpolation_with_default() {
        let content = "value = \"${NONEXISTENT_VAR:-default_value}\"";
        let result = interpolate_env_vars(content);
        assert_eq!(result, "value = \"default_value\"");
    }

    #[test]
    fn test_default_content_parses() {
        let content = interpolate_env_vars(default_config_content());
        let config: Config = toml::from_str(&content).unwrap();
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.qr.dot_style, QrStyle::Square);
        assert_eq!(config.qr.fill_color, "#000000");
        assert_eq!(config.qr.back_color, "#ffffff");
        assert_eq!(config.qr.render.module_size, 10);
        assert!(config.client.api_base.ends_with("/api"));
    }

    #[test]
    fn test_serialized_config_loads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        let mut config = Config::default();
        config.qr.eye_style = QrStyle::Circle;
        config.server.port = 9123;

        fs::write(&path, toml::to_string_pretty(&config).unwrap()).unwrap();
        let loaded = load_config_from_path(&path).unwrap();
        assert_eq!(loaded.qr.eye_style, QrStyle::Circle);
        assert_eq!(loaded.server.port, 9123);
    }

    #[test]
    fn test_explicit_missing_path_errors() {
        let result = load_config_or_default(Some(Path::new("/nonexistent/qrdash.toml")));
        assert!(matches!(result, Err(Error::ConfigNotFound)));
    }
}
