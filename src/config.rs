//! Configuration with YAML schema and validation.
//!
//! Mistake-proofing through type-safe structs, serde schema checks, and
//! runtime semantic validation. Geometry constants are supplied by the
//! caller here rather than hard-coded in the engine, keeping the core
//! reusable and independently testable.

use serde::{Deserialize, Serialize};
use std::path::Path;
use validator::Validate;

use crate::error::{SimError, SimResult};

/// Smallest allowed batch size per tick.
pub const MIN_BATCH_SIZE: u32 = 1;
/// Largest allowed batch size per tick.
pub const MAX_BATCH_SIZE: u32 = 50;

/// Top-level simulation configuration.
///
/// Loaded from YAML files with full schema validation, or built
/// programmatically via [`SimConfig::builder`].
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct SimConfig {
    /// Samples generated per tick, clamped to `[1, 50]` by validation.
    #[validate(range(min = 1, max = 50))]
    #[serde(default = "default_batch_size")]
    pub batch_size: u32,

    /// Wall-clock cadence between ticks, in milliseconds.
    ///
    /// Independent of `batch_size`: batch size sets throughput, the
    /// interval sets latency.
    #[validate(range(min = 1))]
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,

    /// RNG seed. `None` seeds from OS entropy.
    #[serde(default)]
    pub seed: Option<u64>,

    /// Needle-drop geometry.
    #[validate(nested)]
    #[serde(default)]
    pub needle: NeedleGeometry,
}

fn default_batch_size() -> u32 {
    10
}

fn default_tick_interval_ms() -> u64 {
    50
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            batch_size: default_batch_size(),
            tick_interval_ms: default_tick_interval_ms(),
            seed: None,
            needle: NeedleGeometry::default(),
        }
    }
}

impl SimConfig {
    /// Load configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read, YAML parsing fails, or
    /// validation fails.
    pub fn load<P: AsRef<Path>>(path: P) -> SimResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns error if parsing or validation fails.
    pub fn from_yaml(yaml: &str) -> SimResult<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        config.validate_semantic()?;
        Ok(config)
    }

    /// Create a builder for configuration.
    #[must_use]
    pub fn builder() -> SimConfigBuilder {
        SimConfigBuilder::default()
    }

    /// Validate semantic constraints beyond the schema.
    fn validate_semantic(&self) -> SimResult<()> {
        // The Buffon estimator assumes the short-needle case.
        if self.needle.length > self.needle.spacing {
            return Err(SimError::config(format!(
                "Needle length {} exceeds line spacing {}",
                self.needle.length, self.needle.spacing
            )));
        }
        Ok(())
    }
}

/// Geometry for the Buffon's needle experiment.
///
/// Defaults match the source visualization: 50px needles dropped on a
/// 600x400 canvas ruled with lines every 60px.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct NeedleGeometry {
    /// Needle length.
    #[validate(range(min = 0.000_001))]
    #[serde(default = "default_needle_length")]
    pub length: f64,

    /// Distance between parallel grid lines.
    #[validate(range(min = 0.000_001))]
    #[serde(default = "default_line_spacing")]
    pub spacing: f64,

    /// Drop-area width. Visual placement only; never enters crossing logic.
    #[validate(range(min = 1.0))]
    #[serde(default = "default_canvas_width")]
    pub width: f64,

    /// Drop-area height. The drop position `y` is drawn from `[0, height)`.
    #[validate(range(min = 1.0))]
    #[serde(default = "default_canvas_height")]
    pub height: f64,
}

fn default_needle_length() -> f64 {
    50.0
}

fn default_line_spacing() -> f64 {
    60.0
}

fn default_canvas_width() -> f64 {
    600.0
}

fn default_canvas_height() -> f64 {
    400.0
}

impl Default for NeedleGeometry {
    fn default() -> Self {
        Self {
            length: default_needle_length(),
            spacing: default_line_spacing(),
            width: default_canvas_width(),
            height: default_canvas_height(),
        }
    }
}

/// Configuration builder for programmatic construction.
#[derive(Debug, Default)]
pub struct SimConfigBuilder {
    config: SimConfig,
}

impl SimConfigBuilder {
    /// Set the RNG seed.
    #[must_use]
    pub const fn seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    /// Set the per-tick batch size.
    #[must_use]
    pub const fn batch_size(mut self, batch_size: u32) -> Self {
        self.config.batch_size = batch_size;
        self
    }

    /// Set the tick cadence in milliseconds.
    #[must_use]
    pub const fn tick_interval_ms(mut self, interval: u64) -> Self {
        self.config.tick_interval_ms = interval;
        self
    }

    /// Set the needle geometry.
    #[must_use]
    pub const fn needle(mut self, geometry: NeedleGeometry) -> Self {
        self.config.needle = geometry;
        self
    }

    /// Build the configuration.
    ///
    /// Out-of-range batch sizes are clamped rather than rejected, matching
    /// the engine's total control API.
    #[must_use]
    pub fn build(mut self) -> SimConfig {
        self.config.batch_size = self
            .config
            .batch_size
            .clamp(MIN_BATCH_SIZE, MAX_BATCH_SIZE);
        self.config
    }
}
