//! Command implementations for the ordersync CLI

pub mod check;
pub mod pull;
pub mod run;
pub mod serve;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use ordersync_config::Config;

/// Searched in order when `--config` is not given
pub const DEFAULT_CONFIG_PATHS: &[&str] = &["configs/ordersync.toml", "ordersync.toml"];

/// A parsed config and the file it came from
#[derive(Debug)]
pub struct LoadedConfig {
    pub config: Config,
    /// None when no file was found and defaults are in use
    pub path: Option<PathBuf>,
}

impl LoadedConfig {
    /// Where the config came from, for display
    pub fn source(&self) -> String {
        self.path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(defaults)".to_string())
    }
}

/// Load the config from `explicit`, or search the default paths
///
/// An explicit path must exist. With no file anywhere the defaults are used,
/// which define no reports.
pub fn load_config(explicit: Option<&Path>) -> Result<LoadedConfig> {
    if let Some(path) = explicit {
        if !path.exists() {
            anyhow::bail!("config file not found: {}", path.display());
        }
        let config = Config::from_file(path).context("failed to load configuration")?;
        return Ok(LoadedConfig {
            config,
            path: Some(path.to_path_buf()),
        });
    }

    load_from_candidates(DEFAULT_CONFIG_PATHS.iter().map(PathBuf::from))
}

fn load_from_candidates(candidates: impl IntoIterator<Item = PathBuf>) -> Result<LoadedConfig> {
    for path in candidates {
        if path.exists() {
            let config = Config::from_file(&path).context("failed to load configuration")?;
            return Ok(LoadedConfig {
                config,
                path: Some(path),
            });
        }
    }

    Ok(LoadedConfig {
        config: Config::default(),
        path: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const VALID: &str = r#"
[shopware]
base_url = "https://shop.example.com"

[reports.daily]
spreadsheet = "abc"
sheet = "Orders"
"#;

    fn temp_config(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_explicit_path() {
        let file = temp_config(VALID);
        let loaded = load_config(Some(file.path())).unwrap();
        assert_eq!(loaded.path.as_deref(), Some(file.path()));
        assert!(loaded.config.reports.contains("daily"));
    }

    #[test]
    fn test_explicit_path_missing() {
        let err = load_config(Some(Path::new("/nonexistent/ordersync.toml"))).unwrap_err();
        assert!(err.to_string().contains("config file not found"));
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let file = temp_config("[reports.daily]\nspreadsheet = \"abc\"\n");
        let err = load_config(Some(file.path())).unwrap_err();
        assert!(err.to_string().contains("failed to load configuration"));
    }

    #[test]
    fn test_first_existing_candidate_wins() {
        let file = temp_config(VALID);
        let loaded = load_from_candidates([
            PathBuf::from("/nonexistent/a.toml"),
            file.path().to_path_buf(),
        ])
        .unwrap();
        assert_eq!(loaded.path.as_deref(), Some(file.path()));
    }

    #[test]
    fn test_no_candidates_uses_defaults() {
        let loaded = load_from_candidates([PathBuf::from("/nonexistent/a.toml")]).unwrap();
        assert!(loaded.path.is_none());
        assert_eq!(loaded.source(), "(defaults)");
        assert!(loaded.config.reports.is_empty());
    }
}
