pub mod types;

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;

const CONFIG_FILE_NAME: &str = ".stackscope.toml";

/// Get the global config file path (~/.stackscope.toml)
pub fn global_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(CONFIG_FILE_NAME))
}

/// Get the local config file path (project/.stackscope.toml)
pub fn local_config_path(project_path: &Path) -> PathBuf {
    project_path.join(CONFIG_FILE_NAME)
}

/// Load configuration from file or use defaults.
///
/// An explicitly named file must parse; otherwise the local config in the
/// working directory is tried first, then the global config, falling back
/// to defaults when neither is usable.
pub fn load_config(explicit: Option<&Path>) -> Result<types::Config> {
    if let Some(path) = explicit {
        let content = fs::read_to_string(path)?;
        return toml::from_str(&content)
            .map_err(|e| crate::error::ConfigError::ParsingFailed(e.to_string()).into());
    }

    // Try local config first
    let local = local_config_path(Path::new("."));
    if local.exists() {
        if let Ok(content) = fs::read_to_string(&local) {
            if let Ok(config) = toml::from_str(&content) {
                return Ok(config);
            }
        }
    }

    // Try global config
    if let Some(global) = global_config_path() {
        if global.exists() {
            if let Ok(content) = fs::read_to_string(&global) {
                if let Ok(config) = toml::from_str(&content) {
                    return Ok(config);
                }
            }
        }
    }

    Ok(types::Config::default())
}

/// Save configuration to global config file
pub fn save_global_config(config: &types::Config) -> Result<()> {
    if let Some(path) = global_config_path() {
        let content = toml::to_string_pretty(config)
            .map_err(|e| crate::error::ConfigError::ParsingFailed(e.to_string()))?;
        fs::write(&path, content)?;
    }
    Ok(())
}
