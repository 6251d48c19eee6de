use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const DEFAULT_CONFIG_TOML_NAME: &str = "dockhand.toml";
pub const DEFAULT_RUNTIME_BINARY: &str = "docker";

pub fn default_config_dir() -> PathBuf {
    std::env::var("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("/root"))
        .join(".config/dockhand")
}

/// Expands a leading `~` in a user supplied directory.
pub fn expand_config_dir(config_dir: &Path) -> PathBuf {
    PathBuf::from(shellexpand::tilde(config_dir.to_string_lossy().as_ref()).into_owned())
}

#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Program used as the base invocation, e.g. `docker` or `podman`
    pub binary: Option<String>,
    /// Include stopped containers by default
    pub all: Option<bool>,
}

#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq, Eq)]
pub struct AppConfig {
    #[serde(default)]
    pub runtime: RuntimeConfig,
}

impl AppConfig {
    /// Merges another AppConfig into self.
    /// Values from `other` overwrite values in `self` if present.
    pub fn merge(&mut self, other: AppConfig) {
        if let Some(binary) = other.runtime.binary {
            self.runtime.binary = Some(binary);
        }
        if let Some(all) = other.runtime.all {
            self.runtime.all = Some(all);
        }
    }

    pub fn binary(&self) -> &str {
        self.runtime
            .binary
            .as_deref()
            .unwrap_or(DEFAULT_RUNTIME_BINARY)
    }

    pub fn all(&self) -> bool {
        self.runtime.all.unwrap_or(false)
    }
}

/// Loads `dockhand.toml` from the config dir, then merges the one in the
/// current working directory over it.
pub fn load_app_config(config_dir: &Path) -> Result<AppConfig> {
    load_app_config_from(config_dir, Path::new("./"))
}

pub fn load_app_config_from(config_dir: &Path, local_dir: &Path) -> Result<AppConfig> {
    let global_config_path = config_dir.join(DEFAULT_CONFIG_TOML_NAME);
    let mut app_config = read_config_file(&global_config_path)
        .with_context(|| format!("carregando config global em {:?}", global_config_path))?
        .unwrap_or_default();

    let local_config_path = local_dir.join(DEFAULT_CONFIG_TOML_NAME);
    if let Some(local_app_config) = read_config_file(&local_config_path)
        .with_context(|| format!("carregando config local em {:?}", local_config_path))?
    {
        app_config.merge(local_app_config);
    }

    Ok(app_config)
}

fn read_config_file(path: &Path) -> Result<Option<AppConfig>> {
    if !path.exists() {
        debug!("Config não encontrada em {:?}", path);
        return Ok(None);
    }

    let content = fs::read_to_string(path).with_context(|| format!("lendo {:?}", path))?;
    let config: AppConfig =
        toml::from_str(&content).with_context(|| format!("parse de {:?}", path))?;

    Ok(Some(config))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_runtime_section() {
        let toml = r#"
[runtime]
binary = "podman"
all = true
"#;

        let config: AppConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.binary(), "podman");
        assert!(config.all());
    }

    #[test]
    fn empty_config_uses_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.binary(), DEFAULT_RUNTIME_BINARY);
        assert!(!config.all());
    }

    #[test]
    fn merge_overrides_only_present_values() {
        let mut base: AppConfig = toml::from_str("[runtime]\nbinary = \"podman\"\n").unwrap();
        let local: AppConfig = toml::from_str("[runtime]\nall = true\n").unwrap();

        base.merge(local);

        assert_eq!(base.binary(), "podman");
        assert!(base.all());
    }

    #[test]
    fn local_config_wins_over_global() {
        let global = tempfile::tempdir().unwrap();
        let local = tempfile::tempdir().unwrap();
        fs::write(
            global.path().join(DEFAULT_CONFIG_TOML_NAME),
            "[runtime]\nbinary = \"podman\"\nall = true\n",
        )
        .unwrap();
        fs::write(
            local.path().join(DEFAULT_CONFIG_TOML_NAME),
            "[runtime]\nall = false\n",
        )
        .unwrap();

        let config = load_app_config_from(global.path(), local.path()).unwrap();
        assert_eq!(config.binary(), "podman");
        assert!(!config.all());
    }

    #[test]
    fn missing_files_yield_default() {
        let global = tempfile::tempdir().unwrap();
        let local = tempfile::tempdir().unwrap();

        let config = load_app_config_from(global.path(), local.path()).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn malformed_toml_is_an_error() {
        let global = tempfile::tempdir().unwrap();
        let local = tempfile::tempdir().unwrap();
        fs::write(
            global.path().join(DEFAULT_CONFIG_TOML_NAME),
            "[runtime\nbinary = ",
        )
        .unwrap();

        assert!(load_app_config_from(global.path(), local.path()).is_err());
    }

    #[test]
    fn leaves_absolute_dir_untouched() {
        assert_eq!(
            expand_config_dir(Path::new("/etc/dockhand")),
            PathBuf::from("/etc/dockhand")
        );
    }
}
