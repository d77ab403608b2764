//! Configuration management for camcert
//!
//! Provides configuration loading, saving, and validation for the EV
//! compensation validator thresholds and the plan generator output.

use crate::errors::SuiteError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CamcertConfig {
    pub validator: ValidatorConfig,
    pub planner: PlannerConfig,
}

/// EV compensation validator configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidatorConfig {
    /// Maximum tolerated |expected - measured| luma delta
    pub max_luma_delta: f64,
    /// Normalized x origin of the sampled patch
    pub patch_x: f64,
    /// Normalized y origin of the sampled patch
    pub patch_y: f64,
    /// Normalized width of the sampled patch
    pub patch_w: f64,
    /// Normalized height of the sampled patch
    pub patch_h: f64,
    /// Write the diagnostic means plot
    pub plot_enabled: bool,
    /// Directory for diagnostic artifacts
    pub plot_directory: String,
}

/// Test plan generator configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlannerConfig {
    /// Version attribute stamped on generated plan files
    pub plan_version: String,
}

impl Default for CamcertConfig {
    fn default() -> Self {
        Self {
            validator: ValidatorConfig {
                max_luma_delta: 0.02,
                patch_x: 0.45,
                patch_y: 0.45,
                patch_w: 0.1,
                patch_h: 0.1,
                plot_enabled: true,
                plot_directory: ".".to_string(),
            },
            planner: PlannerConfig {
                plan_version: "1.0".to_string(),
            },
        }
    }
}

impl CamcertConfig {
    /// Load configuration from TOML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, SuiteError> {
        let path = path.as_ref();

        if !path.exists() {
            log::info!("Config file not found at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .map_err(|e| SuiteError::ConfigError(format!("Failed to read config file: {}", e)))?;

        let config: CamcertConfig = toml::from_str(&contents)
            .map_err(|e| SuiteError::ConfigError(format!("Failed to parse config file: {}", e)))?;

        log::info!("Loaded configuration from {:?}", path);
        Ok(config)
    }

    /// Save configuration to TOML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), SuiteError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                SuiteError::DiagnosticError(format!("Failed to create config directory: {}", e))
            })?;
        }

        let toml_string = toml::to_string_pretty(self).map_err(|e| {
            SuiteError::DiagnosticError(format!("Failed to serialize config: {}", e))
        })?;

        fs::write(path, toml_string).map_err(|e| {
            SuiteError::DiagnosticError(format!("Failed to write config file: {}", e))
        })?;

        log::info!("Saved configuration to {:?}", path);
        Ok(())
    }

    /// Get default config file path
    pub fn default_path() -> PathBuf {
        PathBuf::from("camcert.toml")
    }

    /// Load from default location or create with defaults
    pub fn load_or_default() -> Self {
        Self::load_from_file(Self::default_path()).unwrap_or_else(|e| {
            log::warn!("Failed to load config, using defaults: {}", e);
            Self::default()
        })
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), String> {
        let v = &self.validator;
        if !(v.max_luma_delta > 0.0 && v.max_luma_delta < 1.0) {
            return Err("max_luma_delta must be between 0.0 and 1.0 exclusive".to_string());
        }
        for (name, value) in [
            ("patch_x", v.patch_x),
            ("patch_y", v.patch_y),
            ("patch_w", v.patch_w),
            ("patch_h", v.patch_h),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(format!("{name} must be between 0.0 and 1.0"));
            }
        }
        if v.patch_x + v.patch_w > 1.0 || v.patch_y + v.patch_h > 1.0 {
            return Err("sampled patch must stay inside the frame".to_string());
        }

        if self.planner.plan_version.is_empty() {
            return Err("plan_version must not be empty".to_string());
        }

        Ok(())
    }
}
