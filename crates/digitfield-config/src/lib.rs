//! Configuration file handling for digitfield.
//!
//! The config file is optional TOML:
//!
//! ```toml
//! preset = "dense"
//! target_fps = 30
//!
//! [cell]
//! width_px = 8
//! height_px = 16
//!
//! [field]
//! grid_columns = 60
//! cycling_mode = "sequence"
//! ```
//!
//! Keys in `[field]` override the matching parameter of the chosen preset.

use std::fs;
use std::path::{Path, PathBuf};

use color_eyre::eyre::{Result, WrapErr};
use digitfield_core::{
    CellMetrics, ConfigError, CyclingMode, FieldConfig, OpacityFormula, Preset, RenderMode,
    SizeFormula, validate_frame_rate,
};
use directories::ProjectDirs;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

/// Frame rate used when none is configured.
pub const DEFAULT_TARGET_FPS: u32 = 60;

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base field parameters.
    pub preset: Preset,
    /// Frames drawn per second.
    pub target_fps: u32,
    /// Virtual pixels per terminal cell.
    pub cell: CellMetrics,
    /// Per-parameter overrides on top of the preset.
    pub field: FieldOverrides,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            preset: Preset::default(),
            target_fps: DEFAULT_TARGET_FPS,
            cell: CellMetrics::default(),
            field: FieldOverrides::default(),
        }
    }
}

/// Optional replacements for individual [`FieldConfig`] parameters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grid_columns: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grid_rows: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill_probability: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cycling_interval_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cycling_mode: Option<CyclingMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size_formula: Option<SizeFormula>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity_formula: Option<OpacityFormula>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub render_mode: Option<RenderMode>,
}

impl FieldOverrides {
    /// Apply the overrides to a base configuration.
    pub fn apply(&self, base: FieldConfig) -> FieldConfig {
        FieldConfig {
            grid_columns: self.grid_columns.unwrap_or(base.grid_columns),
            grid_rows: self.grid_rows.unwrap_or(base.grid_rows),
            fill_probability: self.fill_probability.unwrap_or(base.fill_probability),
            cycling_interval_ms: self.cycling_interval_ms.unwrap_or(base.cycling_interval_ms),
            cycling_mode: self.cycling_mode.unwrap_or(base.cycling_mode),
            size_formula: self.size_formula.unwrap_or(base.size_formula),
            opacity_formula: self.opacity_formula.unwrap_or(base.opacity_formula),
            render_mode: self.render_mode.unwrap_or(base.render_mode),
        }
    }
}

impl Config {
    /// Location of the default config file, if the platform has one.
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "digitfield").map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Load the config from the default location.
    ///
    /// A missing file yields the defaults. An unreadable or invalid file is
    /// logged and also yields the defaults.
    pub fn load() -> Self {
        let Some(path) = Self::default_path() else {
            return Self::default();
        };
        if !path.exists() {
            debug!("no config file at {}", path.display());
            return Self::default();
        }
        match Self::load_from(&path) {
            Ok(config) => config,
            Err(e) => {
                warn!("ignoring config file {}: {e:#}", path.display());
                Self::default()
            }
        }
    }

    /// Load and validate the config file at `path`.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .wrap_err_with(|| format!("failed to read config file {}", path.display()))?;
        let config = Self::parse(&contents)
            .wrap_err_with(|| format!("invalid config file {}", path.display()))?;
        debug!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Parse and validate TOML config text.
    pub fn parse(contents: &str) -> Result<Self> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Render the config as TOML.
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Check every value, including the resolved field parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_frame_rate(self.target_fps)?;
        self.cell.validate()?;
        self.field_config().validate()
    }

    /// Field parameters of the preset with the overrides applied.
    pub fn field_config(&self) -> FieldConfig {
        self.field.apply(self.preset.field_config())
    }
}
