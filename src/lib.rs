//! # Tanksmith
//!
//! Component synthesis for capacitively coupled Chebyshev LC bandpass
//! filters and switched-capacitor tank tuning tables for HF transceivers.
//!
//! ## Overview
//!
//! A class-E power amplifier presents its output tank with a low load
//! resistance and needs that tank retuned as the operator moves across a
//! band. This library covers both halves of the design problem:
//!
//! - **Prototype**: Chebyshev lowpass prototype g-values for any order
//!   and passband ripple
//! - **Synthesis**: capacitively coupled resonator bandpass filters
//!   (inductors, tank capacitors, coupling capacitors, external Q)
//! - **Cap bank**: best 8-bit switch code for a binary-weighted
//!   capacitor bank against a target capacitance
//! - **Tuning table**: per-band switch schedules with exact frequency
//!   partitions, ready to burn into firmware
//!
//! ## Design Flow
//!
//! ```text
//! band plan → Chebyshev g-values → coupled-resonator synthesis → network
//! band plan + inductors + cap bank → step targets → switch codes → table
//! ```
//!
//! ## Example
//!
//! ```rust
//! use tanksmith::band_plan::{Band, BandPlan};
//! use tanksmith::cap_bank::CapacitorBank;
//! use tanksmith::tuning_table::TuningTableBuilder;
//!
//! let plan = BandPlan::new(vec![Band::new("40m", 6.9, 7.5)]).unwrap();
//! let bank = CapacitorBank::new([1800.0, 620.0, 330.0, 160.0, 82.0, 39.0, 20.0, 10.0]);
//!
//! let builder = TuningTableBuilder::new(bank, 5, 6.0).unwrap();
//! let table = builder.build_plan(&plan, &[300.0]).unwrap();
//! for row in &table.rows {
//!     println!(
//!         "{} code {:#04x} covers {:.3}..{:.3} MHz",
//!         row.point.band, row.point.code, row.switch_low_mhz, row.switch_high_mhz
//!     );
//! }
//! ```

pub mod band_plan;
pub mod cap_bank;
pub mod config;
pub mod observe;
pub mod prototype;
pub mod synthesis;
pub mod tuning_table;

// Parallel processing (requires `parallel` feature)
#[cfg(feature = "parallel")]
pub mod parallel;

// Re-export main types
pub use band_plan::{Band, BandPlan};
pub use cap_bank::{BankSelection, CapacitorBank};
pub use config::DesignConfig;
pub use prototype::PrototypeValues;
pub use synthesis::{
    BandpassSynthesizer, FilterBankReport, FilterSpec, ResonatorNetwork, WidebandCorrection,
};
pub use tuning_table::{
    FixedCapStrategy, StepZeroPolicy, TuningTable, TuningTableBuilder, TuningTableRow,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::band_plan::{Band, BandPlan};
    pub use crate::cap_bank::{BankSelection, CapacitorBank};
    pub use crate::config::DesignConfig;
    pub use crate::prototype::PrototypeValues;
    pub use crate::synthesis::{BandpassSynthesizer, FilterSpec, WidebandCorrection};
    pub use crate::tuning_table::{TuningTable, TuningTableBuilder};
}
