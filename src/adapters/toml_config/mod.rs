// TOML config adapter - Configuration management using TOML files
//
// Precedence, lowest to highest: defaults, config file, environment,
// command line. Command line overrides are applied by the CLI layer.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{ProbeError, ProbeResult};
use crate::utils::logging::{LogFormat, LogLevel, LoggingConfig};

/// Config file picked up from the working directory when none is given
pub const DEFAULT_CONFIG_FILE: &str = "probeshape.toml";

/// Environment variable prefix for overrides
pub const ENV_PREFIX: &str = "PROBESHAPE_";

/// Complete application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub ffprobe: FfprobeConfig,
    pub logging: LoggingConfig,
}

/// How the external probing tool is invoked
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FfprobeConfig {
    /// Executable name or path
    pub program: String,
    /// Seconds before a running probe is killed
    pub timeout_secs: u64,
    /// Extra arguments placed before the standard ones
    pub extra_args: Vec<String>,
}

impl Default for FfprobeConfig {
    fn default() -> Self {
        Self {
            program: "ffprobe".to_string(),
            timeout_secs: 30,
            extra_args: Vec::new(),
        }
    }
}

/// TOML configuration adapter
pub struct TomlConfigAdapter;

impl TomlConfigAdapter {
    /// Load configuration from `path`, or from [`DEFAULT_CONFIG_FILE`] if
    /// it exists, then apply environment overrides. The result is not
    /// validated yet; see [`TomlConfigAdapter::validate`].
    pub fn load(path: Option<&Path>) -> ProbeResult<AppConfig> {
        let mut config = match Self::config_path(path) {
            Some(path) => {
                info!("Loading configuration from: {}", path.display());
                Self::from_file(&path)?
            }
            None => AppConfig::default(),
        };
        Self::apply_env(&mut config, |key| std::env::var(key).ok())?;
        Ok(config)
    }

    fn config_path(explicit: Option<&Path>) -> Option<PathBuf> {
        match explicit {
            Some(path) => Some(path.to_path_buf()),
            None => {
                let fallback = PathBuf::from(DEFAULT_CONFIG_FILE);
                fallback.exists().then_some(fallback)
            }
        }
    }

    /// Read and parse a TOML config file
    pub fn from_file(path: &Path) -> ProbeResult<AppConfig> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ProbeError::config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> ProbeResult<AppConfig> {
        toml::from_str(content)
            .map_err(|e| ProbeError::config(format!("Failed to parse TOML config: {}", e)))
    }

    /// Apply `PROBESHAPE_*` overrides read through `lookup`
    pub fn apply_env<F>(config: &mut AppConfig, lookup: F) -> ProbeResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(&format!("{}{}", ENV_PREFIX, name));
        let mut overrides = 0;

        if let Some(program) = var("FFPROBE") {
            config.ffprobe.program = program;
            overrides += 1;
        }
        if let Some(timeout) = var("TIMEOUT_SECS") {
            config.ffprobe.timeout_secs = timeout.parse().map_err(|e| {
                ProbeError::config(format!("Invalid {}TIMEOUT_SECS: {}", ENV_PREFIX, e))
            })?;
            overrides += 1;
        }
        if let Some(level) = var("LOG_LEVEL") {
            config.logging.level = LogLevel::parse(&level)?;
            overrides += 1;
        }
        if let Some(format) = var("LOG_FORMAT") {
            config.logging.format = LogFormat::parse(&format)?;
            overrides += 1;
        }

        if overrides > 0 {
            debug!("Applied {} environment variable overrides", overrides);
        }
        Ok(())
    }

    pub fn validate(config: &AppConfig) -> ProbeResult<()> {
        if config.ffprobe.program.trim().is_empty() {
            return Err(ProbeError::config("ffprobe.program cannot be empty"));
        }
        if config.ffprobe.timeout_secs == 0 {
            return Err(ProbeError::config(
                "ffprobe.timeout_secs must be greater than zero",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.ffprobe.program, "ffprobe");
        assert_eq!(config.ffprobe.timeout_secs, 30);
        assert_eq!(config.logging.level, LogLevel::Info);
        assert!(TomlConfigAdapter::validate(&config).is_ok());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = TomlConfigAdapter::from_toml_str(
            r#"
            [ffprobe]
            program = "/opt/ffmpeg/bin/ffprobe"

            [logging]
            format = "json"
            "#,
        )
        .unwrap();
        assert_eq!(config.ffprobe.program, "/opt/ffmpeg/bin/ffprobe");
        assert_eq!(config.ffprobe.timeout_secs, 30);
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.logging.level, LogLevel::Info);
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = TomlConfigAdapter::from_toml_str("[ffprobe]\ntimeout = 3\n").unwrap_err();
        assert!(err.to_string().contains("Invalid configuration"));
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            ("PROBESHAPE_FFPROBE", "ffprobe7"),
            ("PROBESHAPE_TIMEOUT_SECS", "5"),
            ("PROBESHAPE_LOG_LEVEL", "debug"),
        ]
        .into_iter()
        .collect();

        let mut config = AppConfig::default();
        TomlConfigAdapter::apply_env(&mut config, |key| env.get(key).map(|v| v.to_string()))
            .unwrap();
        assert_eq!(config.ffprobe.program, "ffprobe7");
        assert_eq!(config.ffprobe.timeout_secs, 5);
        assert_eq!(config.logging.level, LogLevel::Debug);
        assert_eq!(config.logging.format, LogFormat::Pretty);
    }

    #[test]
    fn test_invalid_env_timeout() {
        let mut config = AppConfig::default();
        let result = TomlConfigAdapter::apply_env(&mut config, |key| {
            (key == "PROBESHAPE_TIMEOUT_SECS").then(|| "soon".to_string())
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let mut config = AppConfig::default();
        config.ffprobe.timeout_secs = 0;
        assert!(TomlConfigAdapter::validate(&config).is_err());
    }

    #[test]
    fn test_load_explicit_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(&path, "[ffprobe]\ntimeout_secs = 12\n").unwrap();
        let config = TomlConfigAdapter::from_file(&path).unwrap();
        assert_eq!(config.ffprobe.timeout_secs, 12);

        let missing = TomlConfigAdapter::from_file(&dir.path().join("missing.toml"));
        assert!(missing.is_err());
    }
}
