//! Core types for the digitfield background.
//!
//! Everything here is plain data: the knobs that shape a particle field,
//! the named presets built from them, and the validation rules shared by
//! the config loader and the CLI.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// How particle digits change on each cycling tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CyclingMode {
    /// Step through one of the fixed digit sequences.
    #[default]
    Sequence,
    /// Draw a new random digit that differs from the current one.
    RandomDistinct,
}

/// Mapping from depth to the base glyph size multiplier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SizeFormula {
    /// `0.4 + (1 - z) * 0.6`: low depth values are drawn larger.
    #[default]
    ShrinkWithDepth,
    /// `0.3 + z * 0.7`: high depth values are drawn larger.
    GrowWithDepth,
}

impl SizeFormula {
    /// Size multiplier for the given depth.
    pub fn factor(self, z: f32) -> f32 {
        match self {
            SizeFormula::ShrinkWithDepth => 0.4 + (1.0 - z) * 0.6,
            SizeFormula::GrowWithDepth => 0.3 + z * 0.7,
        }
    }

    /// Whether a low depth value reads as "near" under this formula.
    pub fn low_z_is_near(self) -> bool {
        matches!(self, SizeFormula::ShrinkWithDepth)
    }
}

/// Mapping from depth to glyph opacity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OpacityFormula {
    /// `0.8 - z * 0.5`
    #[default]
    FadeWithDepth,
    /// `0.2 + z * 0.3`
    BrightenWithDepth,
}

impl OpacityFormula {
    /// Opacity in [0, 1] for the given depth.
    pub fn opacity(self, z: f32) -> f32 {
        match self {
            OpacityFormula::FadeWithDepth => 0.8 - z * 0.5,
            OpacityFormula::BrightenWithDepth => 0.2 + z * 0.3,
        }
    }

    /// Whether a low depth value reads as "near" under this formula.
    pub fn low_z_is_near(self) -> bool {
        matches!(self, OpacityFormula::FadeWithDepth)
    }
}

/// How glyph fonts are assigned while drawing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RenderMode {
    /// Every glyph gets its own continuous font size.
    #[default]
    PerParticle,
    /// Glyphs are grouped into five fixed font sizes.
    Bucketed,
}

/// Largest number of grid cells a field may have.
pub const MAX_GRID_CELLS: u32 = 10_000;
/// Highest supported frame rate.
pub const MAX_TARGET_FPS: u32 = 240;

/// Parameters of a particle field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FieldConfig {
    pub grid_columns: u16,
    pub grid_rows: u16,
    /// Chance that a grid cell receives a particle.
    pub fill_probability: f32,
    /// Minimum time between two cycling ticks.
    pub cycling_interval_ms: u64,
    pub cycling_mode: CyclingMode,
    pub size_formula: SizeFormula,
    pub opacity_formula: OpacityFormula,
    pub render_mode: RenderMode,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Preset::default().field_config()
    }
}

impl FieldConfig {
    /// Check that the parameters describe a drawable field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_columns == 0 || self.grid_rows == 0 {
            return Err(ConfigError::EmptyGrid {
                columns: self.grid_columns,
                rows: self.grid_rows,
            });
        }
        if u32::from(self.grid_columns) * u32::from(self.grid_rows) > MAX_GRID_CELLS {
            return Err(ConfigError::GridTooLarge {
                columns: self.grid_columns,
                rows: self.grid_rows,
            });
        }
        if !(0.0..=1.0).contains(&self.fill_probability) {
            return Err(ConfigError::FillProbability(self.fill_probability));
        }
        if self.cycling_interval_ms == 0 {
            return Err(ConfigError::ZeroInterval);
        }
        Ok(())
    }

    /// True when size and opacity disagree about which depth is near.
    pub fn has_mixed_depth_convention(&self) -> bool {
        self.size_formula.low_z_is_near() != self.opacity_formula.low_z_is_near()
    }
}

/// Named field configurations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Preset {
    /// Sparse grid with slow sequence cycling.
    #[default]
    Classic,
    /// Dense grid with fast random cycling.
    Dense,
    /// Dense grid drawn in five fixed font sizes.
    Batched,
}

impl Preset {
    /// All presets in cycling order.
    pub const ALL: [Preset; 3] = [Preset::Classic, Preset::Dense, Preset::Batched];

    /// Cycle to the next preset.
    pub fn next(self) -> Self {
        match self {
            Preset::Classic => Preset::Dense,
            Preset::Dense => Preset::Batched,
            Preset::Batched => Preset::Classic,
        }
    }

    /// Display name of the preset.
    pub fn name(self) -> &'static str {
        match self {
            Preset::Classic => "classic",
            Preset::Dense => "dense",
            Preset::Batched => "batched",
        }
    }

    /// Field parameters for this preset.
    pub fn field_config(self) -> FieldConfig {
        match self {
            Preset::Classic => FieldConfig {
                grid_columns: 35,
                grid_rows: 35,
                fill_probability: 0.85,
                cycling_interval_ms: 67,
                cycling_mode: CyclingMode::Sequence,
                size_formula: SizeFormula::ShrinkWithDepth,
                opacity_formula: OpacityFormula::FadeWithDepth,
                render_mode: RenderMode::PerParticle,
            },
            Preset::Dense => FieldConfig {
                grid_columns: 45,
                grid_rows: 45,
                fill_probability: 0.85,
                cycling_interval_ms: 35,
                cycling_mode: CyclingMode::RandomDistinct,
                size_formula: SizeFormula::GrowWithDepth,
                opacity_formula: OpacityFormula::BrightenWithDepth,
                render_mode: RenderMode::PerParticle,
            },
            Preset::Batched => FieldConfig {
                grid_columns: 45,
                grid_rows: 45,
                fill_probability: 0.85,
                cycling_interval_ms: 35,
                cycling_mode: CyclingMode::Sequence,
                size_formula: SizeFormula::ShrinkWithDepth,
                opacity_formula: OpacityFormula::FadeWithDepth,
                render_mode: RenderMode::Bucketed,
            },
        }
    }
}

/// Size of one terminal cell in virtual pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CellMetrics {
    pub width_px: u16,
    pub height_px: u16,
}

impl Default for CellMetrics {
    fn default() -> Self {
        Self {
            width_px: 8,
            height_px: 16,
        }
    }
}

impl CellMetrics {
    /// Check that both dimensions are nonzero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width_px == 0 || self.height_px == 0 {
            return Err(ConfigError::EmptyCell {
                width: self.width_px,
                height: self.height_px,
            });
        }
        Ok(())
    }
}

/// Invalid configuration values.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("grid must have at least one column and one row, got {columns}x{rows}")]
    EmptyGrid { columns: u16, rows: u16 },
    #[error("grid of {columns}x{rows} exceeds {} cells", MAX_GRID_CELLS)]
    GridTooLarge { columns: u16, rows: u16 },
    #[error("fill probability must be within 0..=1, got {0}")]
    FillProbability(f32),
    #[error("cycling interval must be greater than zero")]
    ZeroInterval,
    #[error("cell metrics must be nonzero, got {width}x{height} px")]
    EmptyCell { width: u16, height: u16 },
    #[error("target frame rate must be greater than zero")]
    ZeroFrameRate,
    #[error("target frame rate must be at most {max}, got {0}", max = MAX_TARGET_FPS)]
    FrameRateTooHigh(u32),
}

/// Check that a frame rate is within `1..=MAX_TARGET_FPS`.
pub fn validate_frame_rate(fps: u32) -> Result<(), ConfigError> {
    match fps {
        0 => Err(ConfigError::ZeroFrameRate),
        fps if fps > MAX_TARGET_FPS => Err(ConfigError::FrameRateTooHigh(fps)),
        _ => Ok(()),
    }
}
