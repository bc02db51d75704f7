//! Configuration loading and root folder resolution
//!
//! All tunables live in the root folder (database, optional question
//! catalogue). Resolution follows the priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. TOML config file
//! 4. OS-dependent compiled default (fallback)

use crate::Result;
use std::path::{Path, PathBuf};

/// Environment variable naming the root folder
pub const ROOT_FOLDER_ENV: &str = "OPROS_ROOT_FOLDER";

/// Environment variable naming the storage-service endpoint for clients
pub const ENDPOINT_ENV: &str = "OPROS_ENDPOINT";

/// Default storage-service endpoint (local development)
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:5780";

/// Default listen port for the storage service
pub const DEFAULT_PORT: u16 = 5780;

/// Resolve the root folder holding the database and catalogue
pub fn resolve_root_folder(cli_arg: Option<&str>) -> PathBuf {
    // Priority 1: Command-line argument
    if let Some(path) = cli_arg {
        return PathBuf::from(path);
    }

    // Priority 2: Environment variable
    if let Ok(path) = std::env::var(ROOT_FOLDER_ENV) {
        if !path.is_empty() {
            return PathBuf::from(path);
        }
    }

    // Priority 3: TOML config file
    if let Some(path) = config_file_value("root_folder") {
        return PathBuf::from(path);
    }

    // Priority 4: OS-dependent compiled default
    default_root_folder()
}

/// Resolve the storage-service endpoint URL for client tools
pub fn resolve_endpoint(cli_arg: Option<&str>) -> String {
    if let Some(endpoint) = cli_arg {
        return endpoint.to_string();
    }

    if let Ok(endpoint) = std::env::var(ENDPOINT_ENV) {
        if !endpoint.is_empty() {
            return endpoint;
        }
    }

    if let Some(endpoint) = config_file_value("endpoint") {
        return endpoint;
    }

    DEFAULT_ENDPOINT.to_string()
}

/// Database file inside the root folder
pub fn database_path(root_folder: &Path) -> PathBuf {
    root_folder.join("opros.db")
}

/// Create the root folder if it does not exist yet
pub fn ensure_root_folder(root_folder: &Path) -> Result<()> {
    std::fs::create_dir_all(root_folder)?;
    Ok(())
}

/// Read a string key from the first config file that exists
fn config_file_value(key: &str) -> Option<String> {
    let path = config_file_path()?;
    let text = std::fs::read_to_string(path).ok()?;
    let value: toml::Value = toml::from_str(&text).ok()?;
    value.get(key).and_then(|v| v.as_str()).map(String::from)
}

/// `~/.config/opros/config.toml`, with `/etc/opros/config.toml` as the
/// system-wide fallback on Linux
fn config_file_path() -> Option<PathBuf> {
    if let Some(path) = dirs::config_dir().map(|d| d.join("opros").join("config.toml")) {
        if path.exists() {
            return Some(path);
        }
    }

    if cfg!(target_os = "linux") {
        let system = PathBuf::from("/etc/opros/config.toml");
        if system.exists() {
            return Some(system);
        }
    }

    None
}

/// OS-dependent default root folder path
fn default_root_folder() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("opros"))
        .unwrap_or_else(|| PathBuf::from("./opros_data"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_argument_takes_priority() {
        let root = resolve_root_folder(Some("/tmp/opros-test-root"));
        assert_eq!(root, PathBuf::from("/tmp/opros-test-root"));

        let endpoint = resolve_endpoint(Some("http://example.org:1234"));
        assert_eq!(endpoint, "http://example.org:1234");
    }

    #[test]
    fn test_default_root_folder_is_not_empty() {
        let root = resolve_root_folder(None);
        assert!(!root.as_os_str().is_empty());
    }

    #[test]
    fn test_database_path_joins_root() {
        let db = database_path(Path::new("/data/opros"));
        assert_eq!(db, PathBuf::from("/data/opros/opros.db"));
    }

    #[test]
    fn test_ensure_root_folder_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        ensure_root_folder(&nested).unwrap();
        assert!(nested.is_dir());
    }
}
