//! # Configuration System
//!
//! Provides YAML-based configuration for tank table generation, including:
//!
//! - Filter synthesis parameters (order, ripple, impedance, correction)
//! - Tank hardware (load resistance, switched bank, fixed cap strategy)
//! - The band plan with per-band inductor assignments
//!
//! ## Configuration Search Path
//!
//! Configuration is loaded from the first file found:
//! 1. Path specified via `TANKSMITH_CONFIG` environment variable
//! 2. `./tanksmith.yaml` (current directory)
//! 3. `~/.config/tanksmith/config.yaml` (user config)
//! 4. `/etc/tanksmith/config.yaml` (system config)
//!
//! ## Example Configuration
//!
//! ```yaml
//! filter:
//!   order: 3
//!   ripple_db: 0.1
//!   correction:
//!     kind: tapered
//!     factor: 0.85
//!
//! tank:
//!   load_ohms: 6.0
//!   steps_per_band: 5
//!
//! bands:
//!   - name: "40m"
//!     f_low_mhz: 6.9
//!     f_high_mhz: 7.5
//!     inductor_nh: 180.0
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::band_plan::{Band, BandPlan};
use crate::cap_bank::{CapacitorBank, BANK_SIZE};
use crate::synthesis::{FilterSpec, WidebandCorrection};
use crate::tuning_table::{FixedCapStrategy, StepZeroPolicy, TuningTableBuilder};

/// Error type for configuration operations.
#[derive(Debug, Clone)]
pub enum ConfigError {
    /// Configuration file not found
    NotFound(String),
    /// Failed to read configuration file
    ReadError(String),
    /// Failed to parse configuration
    ParseError(String),
    /// Invalid configuration value
    ValidationError(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::NotFound(msg) => write!(f, "config not found: {}", msg),
            ConfigError::ReadError(msg) => write!(f, "failed to read config: {}", msg),
            ConfigError::ParseError(msg) => write!(f, "failed to parse config: {}", msg),
            ConfigError::ValidationError(msg) => write!(f, "invalid config: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Filter synthesis parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterParams {
    /// Number of resonators
    pub order: usize,
    /// Passband ripple in dB
    pub ripple_db: f64,
    /// Source and load impedance in ohms
    pub impedance_ohms: f64,
    /// Wideband inductance correction
    pub correction: WidebandCorrection,
}

impl Default for FilterParams {
    fn default() -> Self {
        Self {
            order: 3,
            ripple_db: 0.1,
            impedance_ohms: 50.0,
            correction: WidebandCorrection::tapered(),
        }
    }
}

/// Tank hardware parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TankParams {
    /// Tank load resistance in ohms
    pub load_ohms: f64,
    /// Tuning steps per band
    pub steps_per_band: usize,
    /// Switched bank element values in pF, MSB first
    pub bank_pf: Vec<f64>,
    /// Dedicated fixed capacitor strategy
    pub fixed_cap: FixedCapStrategy,
    /// Step zero handling
    pub step_zero: StepZeroPolicy,
}

impl Default for TankParams {
    fn default() -> Self {
        Self {
            load_ohms: 6.0,
            steps_per_band: 5,
            bank_pf: vec![1800.0, 620.0, 330.0, 160.0, 82.0, 39.0, 20.0, 10.0],
            fixed_cap: FixedCapStrategy::Threshold { threshold_pf: 3100.0 },
            step_zero: StepZeroPolicy::SelectResidual,
        }
    }
}

/// One band plan entry with its inductor assignment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BandEntry {
    /// Band name (e.g. "40m")
    pub name: String,
    /// Lower band edge in MHz
    pub f_low_mhz: f64,
    /// Upper band edge in MHz
    pub f_high_mhz: f64,
    /// Tank inductor in nH
    pub inductor_nh: f64,
}

impl BandEntry {
    pub fn new(name: impl Into<String>, f_low_mhz: f64, f_high_mhz: f64, inductor_nh: f64) -> Self {
        Self {
            name: name.into(),
            f_low_mhz,
            f_high_mhz,
            inductor_nh,
        }
    }
}

/// Complete design configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DesignConfig {
    /// Configuration version
    pub version: String,
    /// Filter synthesis parameters
    pub filter: FilterParams,
    /// Tank hardware parameters
    pub tank: TankParams,
    /// Band plan with inductor assignments
    pub bands: Vec<BandEntry>,
}

impl Default for DesignConfig {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            filter: FilterParams::default(),
            tank: TankParams::default(),
            bands: vec![
                BandEntry::new("160m", 1.8, 2.0, 500.0),
                BandEntry::new("80m", 3.5, 4.0, 500.0),
                BandEntry::new("60m", 5.0, 5.5, 500.0),
                BandEntry::new("40m", 6.9, 7.5, 180.0),
                BandEntry::new("30m", 9.9, 10.5, 180.0),
                BandEntry::new("20m", 13.9, 15.1, 180.0),
                BandEntry::new("17m", 17.85, 18.35, 68.0),
                BandEntry::new("15m", 20.0, 21.5, 68.0),
                BandEntry::new("12m", 24.5, 25.1, 68.0),
                BandEntry::new("10m", 28.0, 29.7, 68.0),
            ],
        }
    }
}

impl DesignConfig {
    /// Load configuration from the default search path.
    ///
    /// Search order:
    /// 1. `TANKSMITH_CONFIG` environment variable
    /// 2. `./tanksmith.yaml`
    /// 3. `~/.config/tanksmith/config.yaml`
    /// 4. `/etc/tanksmith/config.yaml`
    ///
    /// Returns default config if no file is found.
    pub fn load() -> Result<Self, ConfigError> {
        // Check environment variable first
        if let Ok(path) = std::env::var("TANKSMITH_CONFIG") {
            if Path::new(&path).exists() {
                return Self::load_from(Path::new(&path));
            }
        }

        // Check standard paths
        let paths = Self::config_search_paths();
        for path in &paths {
            if path.exists() {
                return Self::load_from(path);
            }
        }

        // No config found, return defaults
        Ok(Self::default())
    }

    /// Load configuration from a specific file.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::ReadError(format!("{}: {}", path.display(), e)))?;

        Self::parse(&content)
    }

    /// Parse configuration from a YAML string.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(yaml).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Save configuration to a file.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content =
            serde_yaml::to_string(self).map_err(|e| ConfigError::ParseError(e.to_string()))?;

        std::fs::write(path, content)
            .map_err(|e| ConfigError::ReadError(format!("{}: {}", path.display(), e)))
    }

    /// Get configuration search paths.
    pub fn config_search_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from("./tanksmith.yaml")];

        // User config directory
        if let Some(config_dir) = directories::ProjectDirs::from("", "", "tanksmith") {
            paths.push(config_dir.config_dir().join("config.yaml"));
        }

        // System config
        paths.push(PathBuf::from("/etc/tanksmith/config.yaml"));

        paths
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.filter.order == 0 {
            return Err(ConfigError::ValidationError(
                "filter order must be >= 1".to_string(),
            ));
        }

        if self.filter.ripple_db <= 0.0 {
            return Err(ConfigError::ValidationError(
                "ripple_db must be positive".to_string(),
            ));
        }

        if self.filter.impedance_ohms <= 0.0 {
            return Err(ConfigError::ValidationError(
                "impedance_ohms must be positive".to_string(),
            ));
        }

        if self.tank.load_ohms <= 0.0 {
            return Err(ConfigError::ValidationError(
                "load_ohms must be positive".to_string(),
            ));
        }

        if self.tank.steps_per_band == 0 {
            return Err(ConfigError::ValidationError(
                "steps_per_band must be >= 1".to_string(),
            ));
        }

        if self.tank.bank_pf.len() != BANK_SIZE {
            return Err(ConfigError::ValidationError(format!(
                "bank_pf must have {} elements, got {}",
                BANK_SIZE,
                self.tank.bank_pf.len()
            )));
        }

        if self.bands.is_empty() {
            return Err(ConfigError::ValidationError(
                "band plan must not be empty".to_string(),
            ));
        }

        for entry in &self.bands {
            if entry.inductor_nh <= 0.0 {
                return Err(ConfigError::ValidationError(format!(
                    "band '{}': inductor_nh must be positive",
                    entry.name
                )));
            }
        }

        // Band edge and name checks are shared with the plan constructor.
        self.band_plan()?;
        self.capacitor_bank()?;

        Ok(())
    }

    // ------------------------------------------------------------------
    // Engine input conversions
    // ------------------------------------------------------------------

    /// Build the validated band plan.
    pub fn band_plan(&self) -> Result<BandPlan, ConfigError> {
        let bands = self
            .bands
            .iter()
            .map(|e| Band::new(e.name.clone(), e.f_low_mhz, e.f_high_mhz))
            .collect();
        BandPlan::new(bands).map_err(|e| ConfigError::ValidationError(e.to_string()))
    }

    /// Per-band inductor values in nH, in band plan order.
    pub fn inductors_nh(&self) -> Vec<f64> {
        self.bands.iter().map(|e| e.inductor_nh).collect()
    }

    /// Build the switched capacitor bank.
    pub fn capacitor_bank(&self) -> Result<CapacitorBank, ConfigError> {
        CapacitorBank::from_slice(&self.tank.bank_pf)
            .map_err(|e| ConfigError::ValidationError(e.to_string()))
    }

    /// Filter spec for one band, using the configured synthesis parameters.
    pub fn filter_spec(&self, band: &Band) -> FilterSpec {
        FilterSpec::for_band(
            band,
            self.filter.order,
            self.filter.ripple_db,
            self.filter.impedance_ohms,
        )
    }

    /// Build a tuning table builder from the tank parameters.
    pub fn table_builder(&self) -> Result<TuningTableBuilder, ConfigError> {
        let bank = self.capacitor_bank()?;
        let builder = TuningTableBuilder::new(bank, self.tank.steps_per_band, self.tank.load_ohms)
            .map_err(|e| ConfigError::ValidationError(e.to_string()))?;
        Ok(builder
            .with_fixed_cap_strategy(self.tank.fixed_cap)
            .with_step_zero_policy(self.tank.step_zero))
    }

    /// Generate example configuration YAML.
    pub fn example_yaml() -> String {
        serde_yaml::to_string(&Self::default()).unwrap_or_default()
    }
}
