//! # Bandpass Synthesis
//!
//! Transforms a Chebyshev lowpass prototype into a capacitively-coupled LC
//! bandpass resonator network: a shared tank inductance, per-tank
//! capacitances, and inter-tank coupling capacitances, from band edges,
//! ripple, and system impedance.
//!
//! All tanks are tuned to the same geometric center frequency. Frequency
//! staggering of the resonators is the wrong model for this topology and is
//! deliberately not offered. Wideband loading effects that first-order
//! synthesis does not capture are absorbed by an injectable
//! [`WidebandCorrection`] calibration parameter instead.
//!
//! # Example
//!
//! ```
//! use tanksmith::synthesis::{BandpassSynthesizer, FilterSpec, WidebandCorrection};
//!
//! let spec = FilterSpec {
//!     order: 3,
//!     ripple_db: 0.1,
//!     f_low_hz: 6.9e6,
//!     f_high_hz: 7.5e6,
//!     z0_ohms: 50.0,
//! };
//! let synth = BandpassSynthesizer::new(WidebandCorrection::tapered());
//! let network = synth.synthesize(&spec).unwrap();
//!
//! assert_eq!(network.tank_caps_f.len(), 3);
//! assert_eq!(network.coupling_caps_f.len(), 2);
//! assert!(network.inductance_h > 0.0);
//! assert!(network.external_q > 1.0);
//! ```

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::band_plan::{Band, BandPlan};
use crate::prototype::{PrototypeError, PrototypeValues};

// ---------------------------------------------------------------------------
// Wideband correction calibration
// ---------------------------------------------------------------------------

/// Multiplier applied to the tank inductance to compensate higher-order
/// coupling-loading effects at large fractional bandwidths.
///
/// The right factor is an unresolved calibration problem: the historical
/// design scripts disagree between a flat 0.65, a flat 0.85, and
/// bandwidth-dependent tapers, and none has been validated against a
/// reference simulator across the full band plan. The variants are therefore
/// kept as named, versioned calibrations rather than a single canonical
/// constant. Every [`ResonatorNetwork`] records which calibration produced
/// it via [`WidebandCorrection::calibration_id`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "kind")]
pub enum WidebandCorrection {
    /// No correction; first-order synthesis as-is.
    Unity,
    /// Constant multiplier regardless of bandwidth.
    Fixed { factor: f64 },
    /// `factor` up to `knee_fbw`, then decreasing by `slope` per unit of
    /// fractional bandwidth beyond the knee.
    Tapered {
        factor: f64,
        knee_fbw: f64,
        slope: f64,
    },
}

impl WidebandCorrection {
    /// The historical flat 0.65 factor from the first working build.
    pub fn legacy() -> Self {
        Self::Fixed { factor: 0.65 }
    }

    /// The nominal calibration: 0.85 below 25% fractional bandwidth,
    /// tapering off at 0.5 per unit FBW above it.
    pub fn tapered() -> Self {
        Self::Tapered {
            factor: 0.85,
            knee_fbw: 0.25,
            slope: 0.5,
        }
    }

    /// Correction multiplier for the given fractional bandwidth.
    pub fn factor(&self, fbw: f64) -> f64 {
        match *self {
            Self::Unity => 1.0,
            Self::Fixed { factor } => factor,
            Self::Tapered {
                factor,
                knee_fbw,
                slope,
            } => {
                if fbw > knee_fbw {
                    factor - slope * (fbw - knee_fbw)
                } else {
                    factor
                }
            }
        }
    }

    /// Stable identifier of the calibration variant and its parameters.
    pub fn calibration_id(&self) -> String {
        match *self {
            Self::Unity => "unity".to_string(),
            Self::Fixed { factor } => format!("fixed-{:.3}", factor),
            Self::Tapered {
                factor,
                knee_fbw,
                slope,
            } => format!("tapered-{:.3}-k{:.3}-s{:.3}", factor, knee_fbw, slope),
        }
    }
}

impl Default for WidebandCorrection {
    fn default() -> Self {
        Self::tapered()
    }
}

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// High-level bandpass filter specification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterSpec {
    /// Filter order (number of resonator tanks).
    pub order: usize,
    /// Passband ripple in dB (positive, e.g. 0.1).
    pub ripple_db: f64,
    /// Lower band edge in Hz.
    pub f_low_hz: f64,
    /// Upper band edge in Hz.
    pub f_high_hz: f64,
    /// System impedance in ohms.
    pub z0_ohms: f64,
}

impl FilterSpec {
    /// Spec for the given band of a plan, with order/ripple/impedance from
    /// the caller.
    pub fn for_band(band: &Band, order: usize, ripple_db: f64, z0_ohms: f64) -> Self {
        Self {
            order,
            ripple_db,
            f_low_hz: band.f_low_hz(),
            f_high_hz: band.f_high_hz(),
            z0_ohms,
        }
    }
}

/// A synthesized capacitively-coupled resonator network.
///
/// Immutable output: every tank shares `inductance_h` and resonates at
/// `f0_hz` once its coupling loading is accounted for.
#[derive(Debug, Clone, PartialEq)]
pub struct ResonatorNetwork {
    /// Shared tank inductance in henries.
    pub inductance_h: f64,
    /// Adjusted per-tank capacitance in farads (coupling loading already
    /// subtracted), one entry per tank.
    pub tank_caps_f: Vec<f64>,
    /// Inter-tank coupling capacitance in farads; entry `i` couples tank
    /// `i` to tank `i + 1`.
    pub coupling_caps_f: Vec<f64>,
    /// Geometric center frequency in Hz.
    pub f0_hz: f64,
    /// Fractional bandwidth (f_high - f_low) / f0.
    pub fractional_bandwidth: f64,
    /// External Q presented to source and load.
    pub external_q: f64,
    /// Identifier of the wideband calibration used.
    pub calibration: String,
}

impl ResonatorNetwork {
    /// Number of resonator tanks.
    pub fn order(&self) -> usize {
        self.tank_caps_f.len()
    }

    /// The total capacitance resonating in tank `i`: its adjusted
    /// capacitance plus the coupling capacitance(s) loading that node.
    /// Equal to the base resonator capacitance for every tank.
    pub fn resonating_capacitance_f(&self, tank: usize) -> f64 {
        let n = self.order();
        let mut c = self.tank_caps_f[tank];
        if tank > 0 {
            c += self.coupling_caps_f[tank - 1];
        }
        if tank + 1 < n {
            c += self.coupling_caps_f[tank];
        }
        c
    }
}

/// Error type for bandpass synthesis.
#[derive(Debug, Clone, PartialEq)]
pub enum SynthesisError {
    /// Prototype computation rejected the order or ripple.
    Prototype(PrototypeError),
    /// Band edges must satisfy `0 < f_low < f_high`.
    InvalidBandEdges { f_low_hz: f64, f_high_hz: f64 },
    /// System impedance must be positive.
    InvalidImpedance(f64),
    /// The coupling loading exceeds the base resonator capacitance; the
    /// requested bandwidth/impedance combination is infeasible.
    NegativeTankCapacitance { tank: usize, capacitance_f: f64 },
}

impl std::fmt::Display for SynthesisError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Prototype(e) => write!(f, "prototype: {}", e),
            Self::InvalidBandEdges { f_low_hz, f_high_hz } => write!(
                f,
                "band edges must satisfy 0 < f_low < f_high, got {} .. {} Hz",
                f_low_hz, f_high_hz
            ),
            Self::InvalidImpedance(z) => write!(f, "system impedance must be > 0, got {}", z),
            Self::NegativeTankCapacitance { tank, capacitance_f } => write!(
                f,
                "tank {} capacitance {:.3e} F is negative: bandwidth/impedance combination infeasible",
                tank, capacitance_f
            ),
        }
    }
}

impl std::error::Error for SynthesisError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Prototype(e) => Some(e),
            _ => None,
        }
    }
}

impl From<PrototypeError> for SynthesisError {
    fn from(e: PrototypeError) -> Self {
        Self::Prototype(e)
    }
}

// ---------------------------------------------------------------------------
// BandpassSynthesizer
// ---------------------------------------------------------------------------

/// Engine that synthesizes coupled-resonator bandpass networks from
/// high-level specifications.
#[derive(Debug, Clone, Default)]
pub struct BandpassSynthesizer {
    correction: WidebandCorrection,
}

impl BandpassSynthesizer {
    /// Create a synthesizer with the given wideband calibration.
    pub fn new(correction: WidebandCorrection) -> Self {
        Self { correction }
    }

    /// The active wideband calibration.
    pub fn correction(&self) -> WidebandCorrection {
        self.correction
    }

    /// Synthesize the resonator network for the given spec.
    ///
    /// Reports an error, rather than clamping, when an adjusted tank
    /// capacitance would come out negative.
    pub fn synthesize(&self, spec: &FilterSpec) -> Result<ResonatorNetwork, SynthesisError> {
        if !(spec.f_low_hz > 0.0 && spec.f_high_hz > spec.f_low_hz) {
            return Err(SynthesisError::InvalidBandEdges {
                f_low_hz: spec.f_low_hz,
                f_high_hz: spec.f_high_hz,
            });
        }
        if !(spec.z0_ohms > 0.0) {
            return Err(SynthesisError::InvalidImpedance(spec.z0_ohms));
        }

        let proto = PrototypeValues::chebyshev(spec.order, spec.ripple_db)?;
        let n = spec.order;

        // Geometric center, not arithmetic: the bandpass transform maps the
        // prototype symmetrically about sqrt(f_low * f_high).
        let f0 = (spec.f_low_hz * spec.f_high_hz).sqrt();
        let bw = spec.f_high_hz - spec.f_low_hz;
        let fbw = bw / f0;
        let omega0 = 2.0 * PI * f0;

        let external_q = proto.g(1) / fbw;

        // Target tank reactance of Z0/2 trades practical inductor size
        // against achievable Q.
        let x_tank = spec.z0_ohms / 2.0;
        let inductance = self.correction.factor(fbw) * x_tank / omega0;
        let c_resonator = 1.0 / (omega0 * omega0 * inductance);

        // Coupling capacitance between adjacent tanks.
        let coupling_caps_f: Vec<f64> = (1..n)
            .map(|i| {
                let k = fbw / (proto.g(i) * proto.g(i + 1)).sqrt();
                k * c_resonator
            })
            .collect();

        // Adjusted tank capacitance: end tanks carry one neighbour's
        // coupling cap, interior tanks carry two.
        let mut tank_caps_f = Vec::with_capacity(n);
        for tank in 0..n {
            let mut c = c_resonator;
            if tank > 0 {
                c -= coupling_caps_f[tank - 1];
            }
            if tank + 1 < n {
                c -= coupling_caps_f[tank];
            }
            if c < 0.0 {
                return Err(SynthesisError::NegativeTankCapacitance {
                    tank,
                    capacitance_f: c,
                });
            }
            tank_caps_f.push(c);
        }

        tracing::debug!(
            f0_hz = f0,
            fbw,
            inductance_h = inductance,
            external_q,
            calibration = %self.correction.calibration_id(),
            "synthesized {}-pole bandpass network",
            n
        );

        Ok(ResonatorNetwork {
            inductance_h: inductance,
            tank_caps_f,
            coupling_caps_f,
            f0_hz: f0,
            fractional_bandwidth: fbw,
            external_q,
            calibration: self.correction.calibration_id(),
        })
    }
}

// ---------------------------------------------------------------------------
// Plan-level filter bank sweep
// ---------------------------------------------------------------------------

/// Synthesis outcome for one band of a plan.
#[derive(Debug, Clone)]
pub struct BandSynthesis {
    pub band: Band,
    pub result: Result<ResonatorNetwork, SynthesisError>,
}

/// Per-band results of a filter-bank sweep over a band plan.
///
/// An infeasible band is flagged in place; it never aborts the remaining
/// bands.
#[derive(Debug, Clone)]
pub struct FilterBankReport {
    pub entries: Vec<BandSynthesis>,
}

impl FilterBankReport {
    /// Number of bands that synthesized successfully.
    pub fn feasible(&self) -> usize {
        self.entries.iter().filter(|e| e.result.is_ok()).count()
    }

    /// Number of bands that failed.
    pub fn infeasible(&self) -> usize {
        self.entries.len() - self.feasible()
    }
}

/// Run the synthesizer once per band of a plan, collecting every per-band
/// outcome.
pub fn synthesize_filter_bank(
    plan: &BandPlan,
    order: usize,
    ripple_db: f64,
    z0_ohms: f64,
    correction: WidebandCorrection,
) -> FilterBankReport {
    let synth = BandpassSynthesizer::new(correction);
    let entries = plan
        .iter()
        .map(|band| {
            let spec = FilterSpec::for_band(band, order, ripple_db, z0_ohms);
            let result = synth.synthesize(&spec);
            if let Err(ref e) = result {
                tracing::warn!(band = %band.name, error = %e, "band skipped: synthesis infeasible");
            }
            BandSynthesis {
                band: band.clone(),
                result,
            }
        })
        .collect();
    FilterBankReport { entries }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
