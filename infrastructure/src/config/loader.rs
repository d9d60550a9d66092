//! Configuration file loader with multi-source merging

use super::file_config::{ConfigIssue, FileConfig, Severity};
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};
use thiserror::Error;

const PROJECT_CONFIG_FILES: [&str; 2] = ["huddle.toml", ".huddle.toml"];
const ENV_PREFIX: &str = "HUDDLE_";

/// Errors from loading a usable configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] Box<figment::Error>),

    #[error("Invalid configuration: {}", .0.iter().map(ToString::to_string).collect::<Vec<_>>().join("; "))]
    Invalid(Vec<ConfigIssue>),
}

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load and validate.
    ///
    /// Fails on any error-level issue; warnings are returned alongside the
    /// configuration for the caller to report.
    pub fn load_validated(
        config_path: Option<&PathBuf>,
    ) -> Result<(FileConfig, Vec<ConfigIssue>), ConfigError> {
        let config = Self::load(config_path)?;
        Self::check(config)
    }

    /// Split validation issues into a hard failure or warnings
    pub fn check(config: FileConfig) -> Result<(FileConfig, Vec<ConfigIssue>), ConfigError> {
        let issues = config.validate();
        if FileConfig::has_errors(&issues) {
            return Err(ConfigError::Invalid(
                issues
                    .into_iter()
                    .filter(|i| i.severity == Severity::Error)
                    .collect(),
            ));
        }
        Ok((config, issues))
    }

    /// Load configuration from all sources with proper priority
    pub fn load(config_path: Option<&PathBuf>) -> Result<FileConfig, Box<figment::Error>> {
        let global = Self::global_config_path().filter(|p| p.exists());
        let project = Self::project_config_path();
        Self::load_from(
            global.as_deref(),
            project.as_deref(),
            config_path.map(PathBuf::as_path),
        )
    }

    /// Merge defaults, the given files (lowest priority first) and the environment
    pub fn load_from(
        global: Option<&Path>,
        project: Option<&Path>,
        explicit: Option<&Path>,
    ) -> Result<FileConfig, Box<figment::Error>> {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        for path in [global, project, explicit].into_iter().flatten() {
            figment = figment.merge(Toml::file(path));
        }

        figment
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .map_err(Box::new)
    }

    /// Load only default configuration (for --no-config)
    pub fn load_defaults() -> FileConfig {
        FileConfig::default()
    }

    /// Get the global config file path
    ///
    /// Returns `$XDG_CONFIG_HOME/huddle/config.toml` (or the platform
    /// equivalent), whether or not it exists.
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("huddle").join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        PROJECT_CONFIG_FILES
            .iter()
            .map(|name| PathBuf::from(*name))
            .find(|path| path.exists())
    }

    /// Print the config file locations being used (for debugging)
    pub fn print_config_sources(explicit: Option<&PathBuf>) {
        println!("Configuration sources (in priority order):");

        println!("  [ENV  ] Environment: {}*", ENV_PREFIX);

        if let Some(path) = explicit {
            let mark = if path.exists() { "FOUND" } else { "MISS " };
            println!("  [{}] Explicit: {}", mark, path.display());
        }

        if let Some(path) = Self::project_config_path() {
            println!("  [FOUND] Project: {}", path.display());
        } else {
            println!("  [     ] Project: ./huddle.toml or ./.huddle.toml");
        }

        if let Some(path) = Self::global_config_path() {
            if path.exists() {
                println!("  [FOUND] Global:  {}", path.display());
            } else {
                println!("  [     ] Global:  {}", path.display());
            }
        }

        println!("  [     ] Default: built-in defaults");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_load_defaults() {
        let config = ConfigLoader::load_defaults();
        assert_eq!(config, FileConfig::default());
    }

    #[test]
    fn test_global_config_path_returns_some() {
        let path = ConfigLoader::global_config_path();
        assert!(path.is_some());
        let path = path.unwrap();
        assert!(path.ends_with("huddle/config.toml"));
    }

    #[test]
    fn test_later_files_override_earlier_ones() {
        let dir = tempfile::tempdir().unwrap();
        let global = dir.path().join("global.toml");
        let project = dir.path().join("huddle.toml");
        fs::write(
            &global,
            "[collection]\nmax_time = 90\nmax_responses = 5\n\n[output]\ncolor = false\n",
        )
        .unwrap();
        fs::write(&project, "[collection]\nmax_time = 30\n").unwrap();

        let config = ConfigLoader::load_from(Some(&global), Some(&project), None).unwrap();

        assert_eq!(config.collection.max_time, 30);
        assert_eq!(config.collection.max_responses, Some(5));
        assert!(!config.output.color);
    }

    #[test]
    fn test_explicit_file_wins() {
        let dir = tempfile::tempdir().unwrap();
        let project = dir.path().join("huddle.toml");
        let explicit = dir.path().join("custom.toml");
        fs::write(&project, "[texts]\ntimeout_text = \"project\"\n").unwrap();
        fs::write(&explicit, "[texts]\ntimeout_text = \"explicit\"\n").unwrap();

        let config = ConfigLoader::load_from(None, Some(&project), Some(&explicit)).unwrap();

        assert_eq!(config.texts.timeout_text.as_deref(), Some("explicit"));
    }

    #[test]
    fn test_check_separates_errors_from_warnings() {
        let mut config = FileConfig::default();
        config.texts.timeout_text = Some(String::new());
        let (_, warnings) = ConfigLoader::check(config.clone()).unwrap();
        assert_eq!(warnings.len(), 1);

        config.collection.max_time = 0;
        let err = ConfigLoader::check(config).unwrap_err();
        assert!(matches!(&err, ConfigError::Invalid(issues) if issues.len() == 1));
        assert!(err.to_string().contains("collection.max_time"));
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.toml");
        fs::write(&path, "[collection]\nmax_time = \"soon\"\n").unwrap();

        assert!(ConfigLoader::load_from(None, None, Some(&path)).is_err());
    }
}
