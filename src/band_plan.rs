//! # Band Plan
//!
//! A band plan is an ordered list of named frequency bands, each with a low
//! and high edge in MHz. It is the shared input of the filter-bank
//! synthesizer ([`crate::synthesis`]) and the tuning-table builder
//! ([`crate::tuning_table`]): both walk the plan band by band, pairing each
//! band with its assigned tank inductor.
//!
//! Band edges are carried in MHz because that is how amateur band plans are
//! written and how downstream tooling consumes them; conversions to Hz happen
//! at the point of use.

use serde::{Deserialize, Serialize};

/// Error type for band-plan construction.
#[derive(Debug, Clone, PartialEq)]
pub enum BandPlanError {
    /// A band has `f_low >= f_high` or a non-positive edge.
    InvalidEdges {
        band: String,
        f_low_mhz: f64,
        f_high_mhz: f64,
    },
    /// A band has an empty name.
    EmptyName(usize),
}

impl std::fmt::Display for BandPlanError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidEdges {
                band,
                f_low_mhz,
                f_high_mhz,
            } => write!(
                f,
                "band '{}' has invalid edges {} .. {} MHz",
                band, f_low_mhz, f_high_mhz
            ),
            Self::EmptyName(idx) => write!(f, "band at index {} has an empty name", idx),
        }
    }
}

impl std::error::Error for BandPlanError {}

/// One named frequency band.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Band {
    /// Band name, e.g. "40m".
    pub name: String,
    /// Lower band edge in MHz.
    pub f_low_mhz: f64,
    /// Upper band edge in MHz.
    pub f_high_mhz: f64,
}

impl Band {
    /// Construct a band from name and edges in MHz.
    pub fn new(name: impl Into<String>, f_low_mhz: f64, f_high_mhz: f64) -> Self {
        Self {
            name: name.into(),
            f_low_mhz,
            f_high_mhz,
        }
    }

    /// Lower edge in Hz.
    pub fn f_low_hz(&self) -> f64 {
        self.f_low_mhz * 1e6
    }

    /// Upper edge in Hz.
    pub fn f_high_hz(&self) -> f64 {
        self.f_high_mhz * 1e6
    }

    /// Arithmetic band center in MHz.
    pub fn center_mhz(&self) -> f64 {
        (self.f_low_mhz + self.f_high_mhz) / 2.0
    }
}

/// An ordered, validated collection of bands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BandPlan {
    bands: Vec<Band>,
}

impl BandPlan {
    /// Build a plan, validating every band's name and edge ordering.
    pub fn new(bands: Vec<Band>) -> Result<Self, BandPlanError> {
        for (idx, band) in bands.iter().enumerate() {
            if band.name.is_empty() {
                return Err(BandPlanError::EmptyName(idx));
            }
            if !(band.f_low_mhz > 0.0 && band.f_high_mhz > band.f_low_mhz) {
                return Err(BandPlanError::InvalidEdges {
                    band: band.name.clone(),
                    f_low_mhz: band.f_low_mhz,
                    f_high_mhz: band.f_high_mhz,
                });
            }
        }
        Ok(Self { bands })
    }

    /// Number of bands in the plan.
    pub fn len(&self) -> usize {
        self.bands.len()
    }

    /// True when the plan has no bands.
    pub fn is_empty(&self) -> bool {
        self.bands.is_empty()
    }

    /// Iterate over the bands in plan order.
    pub fn iter(&self) -> std::slice::Iter<'_, Band> {
        self.bands.iter()
    }

    /// The bands as a slice.
    pub fn bands(&self) -> &[Band] {
        &self.bands
    }
}
