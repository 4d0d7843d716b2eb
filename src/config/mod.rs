//! Configuration management
//!
//! Handles loading, validation, and merging of configuration from:
//! - TOML files
//! - CLI arguments
//! - Named presets (see [`presets`])

use anyhow::{Context, Result};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;

pub mod presets;

pub use presets::PresetStore;

/// Shared handle to the live scroll tuning.
///
/// Written by the configuration surface (CLI, presets, a future settings
/// UI) at arbitrary times; the engine takes a [`ScrollTuning`] snapshot
/// once per tick and never holds the lock across a tick.
pub type TuningHandle = Arc<RwLock<ScrollTuning>>;

/// Tunable parameters of the drag-to-scroll transform.
///
/// All fields are plain numeric values; the engine tolerates out-of-range
/// values without faulting (a dead zone larger than any real displacement
/// simply emits nothing), so validation happens only at load time.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ScrollTuning {
    /// Radius around the gesture origin producing zero output, in pointer
    /// units. Absorbs hand tremor. Range [0, 100].
    pub dead_zone: f64,
    /// Exponent applied to the dead-zone-adjusted distance. Controls
    /// curve steepness. Range [1, 5].
    pub sensitivity: f64,
    /// Multiplier on the final output magnitude. Range (0, 10].
    pub speed_factor: f64,
    /// When false, horizontal displacement is zeroed before the distance
    /// computation and `scroll_x` is always 0.
    pub enable_horizontal: bool,
    /// Overlay sizing hint in pixels, forwarded to the feedback sink.
    /// Not used by the transform itself. Range [30, 150].
    pub overlay_size: f64,
}

impl Default for ScrollTuning {
    fn default() -> Self {
        Self {
            dead_zone: 20.0,
            sensitivity: 2.0,
            speed_factor: 2.0,
            enable_horizontal: true,
            overlay_size: 60.0,
        }
    }
}

impl ScrollTuning {
    /// Wrap the tuning in a shared read/write handle.
    pub fn into_handle(self) -> TuningHandle {
        Arc::new(RwLock::new(self))
    }
}

/// Scroll-unit calibration.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CalibrationConfig {
    /// Baseline constant mapping pixel-distance curves into host
    /// scroll units. Empirical: 0.0001 matches macOS wheel steps,
    /// 0.00005 matches Windows/Linux. Tunable, not derived.
    pub unit_scale: f64,
}

impl Default for CalibrationConfig {
    fn default() -> Self {
        let unit_scale = if cfg!(target_os = "macos") {
            0.0001
        } else {
            0.00005
        };
        Self { unit_scale }
    }
}

/// Tick cadence configuration.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PollingConfig {
    /// Tick interval while a gesture is active, in milliseconds.
    pub active_interval_ms: u64,
    /// Tick interval while idle, in milliseconds. Slower to reduce
    /// CPU use when nothing can be emitted.
    pub idle_interval_ms: u64,
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            active_interval_ms: 10,
            idle_interval_ms: 50,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default log level when RUST_LOG is not set
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Scroll transform tuning
    #[serde(default)]
    pub tuning: ScrollTuning,
    /// Scroll-unit calibration
    #[serde(default)]
    pub calibration: CalibrationConfig,
    /// Tick cadence
    #[serde(default)]
    pub polling: PollingConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content).context("Failed to parse config file")?;

        config.validate()?;
        Ok(config)
    }

    /// Default configuration file location (`~/.config/glidescroll/config.toml`)
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("glidescroll")
            .join("config.toml")
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        let t = &self.tuning;

        if !t.dead_zone.is_finite() || !(0.0..=100.0).contains(&t.dead_zone) {
            anyhow::bail!("dead_zone must be within [0, 100], got {}", t.dead_zone);
        }
        if !t.sensitivity.is_finite() || !(1.0..=5.0).contains(&t.sensitivity) {
            anyhow::bail!("sensitivity must be within [1, 5], got {}", t.sensitivity);
        }
        if !t.speed_factor.is_finite() || t.speed_factor <= 0.0 || t.speed_factor > 10.0 {
            anyhow::bail!("speed_factor must be within (0, 10], got {}", t.speed_factor);
        }
        if !t.overlay_size.is_finite() || !(30.0..=150.0).contains(&t.overlay_size) {
            anyhow::bail!("overlay_size must be within [30, 150], got {}", t.overlay_size);
        }

        if !self.calibration.unit_scale.is_finite() || self.calibration.unit_scale <= 0.0 {
            anyhow::bail!(
                "calibration.unit_scale must be positive, got {}",
                self.calibration.unit_scale
            );
        }

        if self.polling.active_interval_ms == 0 || self.polling.idle_interval_ms == 0 {
            anyhow::bail!("polling intervals must be non-zero");
        }

        Ok(())
    }

    /// Override the tuning block, e.g. from a named preset
    pub fn with_tuning(mut self, tuning: ScrollTuning) -> Self {
        self.tuning = tuning;
        self
    }
}
