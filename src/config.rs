//! Configuration management for the Stackelberg solver
//!
//! Provides TOML-based configuration with defaults and validation.
//! Location: ~/.stackelberg/config.toml

use crate::errors::{Result, StackelbergError};
use crate::fixed::{DEFAULT_DECIMALS, MAX_DECIMALS};
use crate::solver::SolverConfig;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Complete configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub solver: SolverConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

/// How results are written to stdout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Two JSON arrays: prices, then allocations
    #[default]
    Plain,
    /// Full allocation report as JSON
    Json,
    /// Two arrays of fixed-point integers
    Fixed,
}

/// Result output configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub fixed_decimals: u32,
}

/// Terminal display configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TelemetryConfig {
    pub color_output: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Plain,
            fixed_decimals: DEFAULT_DECIMALS,
        }
    }
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self { color_output: true }
    }
}

impl Config {
    /// Load configuration from file or use defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(config_path) = path {
            Self::load_from_file(config_path)
        } else {
            Self::load_default()
        }
    }

    /// Load configuration from specific file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| StackelbergError::ConfigError(format!("Failed to read config: {}", e)))?;

        let config: Config = toml::from_str(&contents)
            .map_err(|e| StackelbergError::ConfigError(format!("Failed to parse config: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Load from the standard location, falling back to built-in defaults
    pub fn load_default() -> Result<Self> {
        if let Some(config_path) = Self::default_path() {
            if config_path.exists() {
                return Self::load_from_file(&config_path);
            }
        }

        Ok(Config::default())
    }

    /// Standard configuration path, if a home directory exists
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".stackelberg").join("config.toml"))
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        let tolerance = self.solver.identity_tolerance;
        if !tolerance.is_finite() || tolerance < 0.0 {
            return Err(StackelbergError::ConfigError(
                "identity_tolerance must be finite and non-negative".to_string(),
            ));
        }

        if self.output.fixed_decimals > MAX_DECIMALS {
            return Err(StackelbergError::ConfigError(format!(
                "fixed_decimals must be at most {}",
                MAX_DECIMALS
            )));
        }

        Ok(())
    }

    /// Write configuration as pretty TOML, creating parent directories
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| StackelbergError::ConfigError(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, toml_string)?;
        Ok(())
    }
}
