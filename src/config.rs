//! User configuration loaded from TOML.

use cellgrid_core::document::{DEFAULT_COLUMNS, DEFAULT_ROWS};
use directories::ProjectDirs;
use serde::Deserialize;
use std::path::{Path, PathBuf};

const MAX_CONFIG_FILE_BYTES: u64 = 1_048_576; // 1 MiB

/// Settings read from `config.toml`. Missing keys keep their defaults.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct Config {
    pub rows: usize,
    pub columns: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            rows: DEFAULT_ROWS,
            columns: DEFAULT_COLUMNS,
        }
    }
}

/// Load the configuration from `config_file`, or from the user config
/// directory when none is given.
///
/// Never fails: problems are returned as warnings and the defaults are used.
pub fn load_config(config_file: Option<&PathBuf>) -> (Config, Vec<String>) {
    let mut warnings = Vec::new();
    let Some(path) = config_file.cloned().or_else(user_config_path) else {
        return (Config::default(), warnings);
    };

    if !path.exists() {
        if config_file.is_some() {
            warnings.push(format!("Config file not found: {}", path.display()));
        }
        return (Config::default(), warnings);
    }

    match read_config(&path) {
        Ok(config) => (config, warnings),
        Err(warning) => {
            warnings.push(warning);
            (Config::default(), warnings)
        }
    }
}

fn read_config(path: &Path) -> Result<Config, String> {
    let meta = std::fs::metadata(path)
        .map_err(|err| format!("Failed to read metadata for {}: {}", path.display(), err))?;
    if meta.len() > MAX_CONFIG_FILE_BYTES {
        return Err(format!(
            "Refusing to read {}: file too large ({} bytes, max {})",
            path.display(),
            meta.len(),
            MAX_CONFIG_FILE_BYTES
        ));
    }
    let content = std::fs::read_to_string(path)
        .map_err(|err| format!("Failed to read {}: {}", path.display(), err))?;
    toml::from_str::<Config>(&content).map_err(|err| format!("Failed to parse {}: {}", path.display(), err))
}

fn user_config_path() -> Option<PathBuf> {
    let proj = ProjectDirs::from("", "", "cellgrid")?;
    let mut path = proj.config_dir().to_path_buf();
    path.push("config.toml");
    Some(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn write_temp(content: &str) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("config.toml");
        std::fs::write(&path, content).expect("write temp config");
        (dir, path)
    }

    #[test]
    fn load_config_reads_values() {
        let (_dir, path) = write_temp("rows = 10\ncolumns = 5\n");
        let (config, warnings) = load_config(Some(&path));
        assert_eq!(config, Config { rows: 10, columns: 5 });
        assert!(warnings.is_empty());
    }

    #[test]
    fn load_config_keeps_defaults_for_missing_keys() {
        let (_dir, path) = write_temp("rows = 7\n");
        let (config, _) = load_config(Some(&path));
        assert_eq!(config, Config { rows: 7, columns: 26 });
    }

    #[test]
    fn load_config_rejects_unknown_keys() {
        let (_dir, path) = write_temp("rows = 7\ntheme = \"dark\"\n");
        let (config, warnings) = load_config(Some(&path));
        assert_eq!(config, Config::default());
        assert!(warnings.iter().any(|w| w.contains("Failed to parse")));
    }

    #[test]
    fn load_config_warns_for_missing_explicit_file() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("absent.toml");
        let (config, warnings) = load_config(Some(&path));
        assert_eq!(config, Config::default());
        assert!(warnings[0].contains("Config file not found"));
    }

    #[test]
    fn load_config_rejects_oversized_file() {
        let (_dir, path) = write_temp(&"#".repeat(MAX_CONFIG_FILE_BYTES as usize + 1));
        let (config, warnings) = load_config(Some(&path));
        assert_eq!(config, Config::default());
        assert!(
            warnings
                .iter()
                .any(|w| w.contains("file too large") && w.contains("Refusing to read"))
        );
    }
}
