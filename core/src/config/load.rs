use std::path::{Path, PathBuf};

use super::types::AppConfig;
use crate::error::ConfigError;

pub const ENV_MODEL: &str = "MCP_AI_MODEL";
pub const ENV_BACKEND: &str = "MCP_AI_BACKEND";
pub const ENV_BASE_URL: &str = "MCP_AI_BASE_URL";
pub const ENV_DEVICE: &str = "MCP_AI_DEVICE";

/// Get the default stepify data directory: ~/.stepify
pub fn get_stepify_data_dir() -> Result<PathBuf, ConfigError> {
    dirs::home_dir()
        .map(|home| home.join(".stepify"))
        .ok_or(ConfigError::HomeDir)
}

pub fn load_default() -> Result<AppConfig, ConfigError> {
    load_with_path(None)
}

/// Resolve the config file and apply environment overrides.
///
/// Lookup order: explicit path, `~/.stepify/config.toml`, `./config.toml`,
/// built-in defaults. An explicit path that does not exist is an error.
pub fn load_with_path(explicit: Option<&Path>) -> Result<AppConfig, ConfigError> {
    load_with_lookup(explicit, |key| std::env::var(key).ok())
}

fn load_with_lookup<F>(explicit: Option<&Path>, lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut cfg = match explicit {
        Some(path) => {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.display().to_string()));
            }
            read_file(path)?
        }
        None => {
            let home_config = get_stepify_data_dir().ok().map(|d| d.join("config.toml"));
            let local_config = Path::new("config.toml");

            match home_config {
                Some(p) if p.exists() => read_file(&p)?,
                _ if local_config.exists() => read_file(local_config)?,
                _ => AppConfig::default(),
            }
        }
    };

    apply_env_overrides(&mut cfg, lookup);
    Ok(cfg)
}

fn read_file(path: &Path) -> Result<AppConfig, ConfigError> {
    let s = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.display().to_string(),
        source,
    })?;
    toml::from_str::<AppConfig>(&s).map_err(|source| ConfigError::Parse {
        path: path.display().to_string(),
        source,
    })
}

/// Environment variable overrides. Blank values are ignored.
pub fn apply_env_overrides<F>(cfg: &mut AppConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    let non_blank = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    if let Some(v) = non_blank(ENV_MODEL) {
        cfg.model.name = v.trim().to_string();
    }
    if let Some(v) = non_blank(ENV_BACKEND) {
        cfg.model.backend = v.trim().to_lowercase();
    }
    if let Some(v) = non_blank(ENV_BASE_URL) {
        cfg.model.base_url = v.trim().to_string();
    }
    if let Some(v) = non_blank(ENV_DEVICE) {
        cfg.model.device = v.trim().to_lowercase();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.model.name, "google/flan-t5-small");
        assert_eq!(cfg.model.backend, "local");
        assert_eq!(cfg.model.max_length, 512);
        assert_eq!(cfg.server.port, 8000);
    }

    #[test]
    fn test_env_overrides_model() {
        let mut cfg = AppConfig::default();
        apply_env_overrides(
            &mut cfg,
            lookup_from(&[(ENV_MODEL, "google/flan-t5-base"), (ENV_BACKEND, "TGI")]),
        );
        assert_eq!(cfg.model.name, "google/flan-t5-base");
        assert_eq!(cfg.model.backend, "tgi");
    }

    #[test]
    fn test_blank_env_is_ignored() {
        let mut cfg = AppConfig::default();
        apply_env_overrides(&mut cfg, lookup_from(&[(ENV_MODEL, "   ")]));
        assert_eq!(cfg.model.name, "google/flan-t5-small");
    }

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{contents}").unwrap();
        file
    }

    #[test]
    fn test_explicit_file_partial_sections() {
        let file = write_config(
            "[server]\nport = 9001\n\n[model]\nbackend = \"ollama\"\nbase_url = \"http://localhost:11434\"\n",
        );

        let cfg = load_with_lookup(Some(file.path()), lookup_from(&[])).unwrap();
        assert_eq!(cfg.server.port, 9001);
        assert_eq!(cfg.server.host, "0.0.0.0");
        assert_eq!(cfg.model.backend, "ollama");
        assert_eq!(cfg.model.base_url, "http://localhost:11434");
        assert_eq!(cfg.model.name, "google/flan-t5-small");
        assert!(cfg.logging.console);
    }

    #[test]
    fn test_env_overrides_file_values() {
        let file = write_config(
            "[model]\nname = \"google/flan-t5-base\"\nbackend = \"tgi\"\nbase_url = \"http://gpu-box:8080\"\n",
        );

        let cfg = load_with_lookup(
            Some(file.path()),
            lookup_from(&[(ENV_BACKEND, "ollama"), (ENV_BASE_URL, "http://localhost:11434")]),
        )
        .unwrap();
        assert_eq!(cfg.model.backend, "ollama");
        assert_eq!(cfg.model.base_url, "http://localhost:11434");
        // Not set in the environment, so the file wins.
        assert_eq!(cfg.model.name, "google/flan-t5-base");
    }

    #[test]
    fn test_load_with_path_reads_file() {
        // Server settings have no environment override.
        let file = write_config("[server]\nhost = \"127.0.0.1\"\nport = 8123\n");
        let cfg = load_with_path(Some(file.path())).unwrap();
        assert_eq!(cfg.server.host, "127.0.0.1");
        assert_eq!(cfg.server.port, 8123);
    }

    #[test]
    fn test_explicit_missing_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        let err = load_with_path(Some(&missing)).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_explicit_invalid_file_is_parse_error() {
        let file = write_config("[server\nport = ");
        let err = load_with_path(Some(file.path())).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
