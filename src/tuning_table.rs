//! # Switched-Capacitor Tuning Tables
//!
//! Maps a continuously-tunable PA tank onto the fixed switched capacitor
//! bank: for each band of a plan, with its assigned inductor, a set of
//! discrete tuning points is computed across the band, sorted by achieved
//! frequency, and turned into rows carrying the switchover boundaries at
//! which control logic should move to the adjacent bank code.
//!
//! Every band tiles its `[f_low, f_high]` range exactly: the first row's
//! upper boundary is the band edge, the last row's lower boundary is the
//! band edge, and each interior boundary is the midpoint between adjacent
//! achieved frequencies, shared bitwise between the two rows it separates.
//! Adjacent steps whose residuals snap to the same bank code collapse to a
//! single point, keeping the achieved frequencies strictly monotonic; a
//! band may therefore yield fewer rows than it has steps.
//!
//! Frequencies are in MHz, inductance in nH, capacitance in pF, matching
//! the band plan and the downstream PCB tooling.
//!
//! # Example
//!
//! ```
//! use tanksmith::band_plan::Band;
//! use tanksmith::cap_bank::CapacitorBank;
//! use tanksmith::tuning_table::{FixedCapStrategy, TuningTableBuilder};
//!
//! let bank = CapacitorBank::new([1800.0, 620.0, 330.0, 160.0, 82.0, 39.0, 20.0, 10.0]);
//! let builder = TuningTableBuilder::new(bank, 5, 6.0)
//!     .unwrap()
//!     .with_fixed_cap_strategy(FixedCapStrategy::Threshold { threshold_pf: 1000.0 });
//!
//! let rows = builder.build_band(&Band::new("40m", 6.9, 7.5), 300.0).unwrap();
//! assert_eq!(rows.len(), 5);
//! assert_eq!(rows[0].switch_high_mhz, 7.5);
//! assert_eq!(rows[4].switch_low_mhz, 6.9);
//! ```

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::band_plan::{Band, BandPlan};
use crate::cap_bank::{BankSelection, CapacitorBank};

// ---------------------------------------------------------------------------
// Resonance helpers
// ---------------------------------------------------------------------------

/// Capacitance in pF that resonates with `l_nh` at `f_mhz`.
pub fn resonant_capacitance_pf(f_mhz: f64, l_nh: f64) -> f64 {
    let omega = 2.0 * PI * f_mhz * 1e6;
    let l_h = l_nh * 1e-9;
    1e12 / (l_h * omega * omega)
}

/// Resonant frequency in MHz of `c_pf` with `l_nh`; 0 for a degenerate LC
/// product.
pub fn resonant_frequency_mhz(c_pf: f64, l_nh: f64) -> f64 {
    let c_f = c_pf * 1e-12;
    let l_h = l_nh * 1e-9;
    if l_h * c_f <= 0.0 {
        return 0.0;
    }
    1.0 / (2.0 * PI * (l_h * c_f).sqrt()) / 1e6
}

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

/// Whether a band gets a dedicated fixed capacitor alongside the bank.
///
/// Low bands need more capacitance than the bank can supply; above the
/// threshold, the capacitance required to resonate at the band's high edge
/// is allocated as a fixed part and the bank covers only the residual at
/// each step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "kind")]
pub enum FixedCapStrategy {
    /// Bank covers the full required capacitance on every band.
    None,
    /// Allocate a dedicated fixed capacitor when the capacitance required
    /// at `f_high` exceeds the threshold.
    Threshold { threshold_pf: f64 },
}

/// Step-0 handling under the hybrid fixed + switched strategy.
///
/// The two historical table generators disagree here and the intent is
/// ambiguous, so both behaviors are kept as explicitly named policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StepZeroPolicy {
    /// Step 0 runs the selector against the residual like every other step.
    SelectResidual,
    /// Step 0 forces code 0x00 / zero switched capacitance unconditionally.
    PinZeroSwitched,
}

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

/// One discrete tuning point of a band. Immutable once computed.
#[derive(Debug, Clone, PartialEq)]
pub struct TuningPoint {
    /// Band name this point belongs to.
    pub band: String,
    /// Assigned tank inductor in nH.
    pub inductance_nh: f64,
    /// Tank Q at band center into the load.
    pub tank_q: f64,
    /// Dedicated fixed capacitance for this band in pF (0 when the bank
    /// covers everything).
    pub dedicated_c_pf: f64,
    /// Frequency this step aimed for in MHz.
    pub target_f_mhz: f64,
    /// Total capacitance required at the target frequency in pF.
    pub ideal_c_pf: f64,
    /// Selected 8-bit bank code.
    pub code: u8,
    /// Capacitance contributed by the bank in pF.
    pub switched_c_pf: f64,
    /// Achieved total capacitance (dedicated + switched) in pF.
    pub total_c_pf: f64,
    /// Center frequency the tank actually resonates at, in MHz.
    pub achieved_f_mhz: f64,
}

impl TuningPoint {
    /// Capacitance error of this point against its ideal in pF.
    pub fn delta_c_pf(&self) -> f64 {
        self.total_c_pf - self.ideal_c_pf
    }
}

/// A tuning point plus the switchover boundaries of its segment.
#[derive(Debug, Clone, PartialEq)]
pub struct TuningTableRow {
    pub point: TuningPoint,
    /// Upper switchover frequency in MHz; the band edge for the first row.
    pub switch_high_mhz: f64,
    /// Lower switchover frequency in MHz; the band edge for the last row.
    pub switch_low_mhz: f64,
}

/// Full tuning table over a band plan, plus the bands that had to be
/// skipped. Write-once output.
#[derive(Debug, Clone)]
pub struct TuningTable {
    pub rows: Vec<TuningTableRow>,
    /// Names of bands skipped as infeasible, with the reason.
    pub skipped: Vec<(String, TableError)>,
}

impl TuningTable {
    /// Rows belonging to one band, in descending frequency order.
    pub fn band_rows<'a>(&'a self, band: &'a str) -> impl Iterator<Item = &'a TuningTableRow> {
        self.rows.iter().filter(move |r| r.point.band == band)
    }
}

/// Error type for tuning-table construction.
#[derive(Debug, Clone, PartialEq)]
pub enum TableError {
    /// Band plan and inductor assignment differ in length.
    LengthMismatch { bands: usize, inductors: usize },
    /// Steps per band must be at least 1.
    InvalidSteps(usize),
    /// Load resistance must be positive.
    InvalidLoad(f64),
    /// Inductor assignment must be positive.
    InvalidInductor { band: String, l_nh: f64 },
    /// A step produced a non-positive total capacitance; the band cannot be
    /// tuned with this bank/strategy combination.
    DegenerateStep { band: String, step: usize },
}

impl std::fmt::Display for TableError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::LengthMismatch { bands, inductors } => write!(
                f,
                "band plan has {} bands but {} inductor assignments",
                bands, inductors
            ),
            Self::InvalidSteps(s) => write!(f, "steps per band must be >= 1, got {}", s),
            Self::InvalidLoad(r) => write!(f, "load resistance must be > 0, got {}", r),
            Self::InvalidInductor { band, l_nh } => {
                write!(f, "band '{}' has non-positive inductor {} nH", band, l_nh)
            }
            Self::DegenerateStep { band, step } => write!(
                f,
                "band '{}' step {} has non-positive total capacitance",
                band, step
            ),
        }
    }
}

impl std::error::Error for TableError {}

// ---------------------------------------------------------------------------
// TuningTableBuilder
// ---------------------------------------------------------------------------

/// Builds tuning tables from a band plan, an inductor assignment, and a
/// capacitor bank.
#[derive(Debug, Clone)]
pub struct TuningTableBuilder {
    bank: CapacitorBank,
    steps_per_band: usize,
    r_load_ohms: f64,
    fixed_cap: FixedCapStrategy,
    step_zero: StepZeroPolicy,
}

impl TuningTableBuilder {
    /// Create a builder; fails fast on a non-positive load or `steps < 1`.
    pub fn new(
        bank: CapacitorBank,
        steps_per_band: usize,
        r_load_ohms: f64,
    ) -> Result<Self, TableError> {
        if steps_per_band < 1 {
            return Err(TableError::InvalidSteps(steps_per_band));
        }
        if !(r_load_ohms > 0.0) {
            return Err(TableError::InvalidLoad(r_load_ohms));
        }
        Ok(Self {
            bank,
            steps_per_band,
            r_load_ohms,
            fixed_cap: FixedCapStrategy::None,
            step_zero: StepZeroPolicy::SelectResidual,
        })
    }

    /// Select the dedicated-fixed-capacitor strategy.
    pub fn with_fixed_cap_strategy(mut self, strategy: FixedCapStrategy) -> Self {
        self.fixed_cap = strategy;
        self
    }

    /// Select the step-0 policy.
    pub fn with_step_zero_policy(mut self, policy: StepZeroPolicy) -> Self {
        self.step_zero = policy;
        self
    }

    /// Compute the tuning rows for a single band.
    pub fn build_band(&self, band: &Band, l_nh: f64) -> Result<Vec<TuningTableRow>, TableError> {
        if !(l_nh > 0.0) {
            return Err(TableError::InvalidInductor {
                band: band.name.clone(),
                l_nh,
            });
        }

        let s = self.steps_per_band;
        let omega_center = 2.0 * PI * band.center_mhz() * 1e6;
        let tank_q = omega_center * (l_nh * 1e-9) / self.r_load_ohms;

        let c_at_f_high = resonant_capacitance_pf(band.f_high_mhz, l_nh);
        let dedicated_c_pf = match self.fixed_cap {
            FixedCapStrategy::Threshold { threshold_pf } if c_at_f_high > threshold_pf => {
                c_at_f_high
            }
            _ => 0.0,
        };

        let mut points = Vec::with_capacity(s);
        for step in 0..s {
            // S = 1 degenerates to a single point at the low edge.
            let target_f_mhz = if s > 1 {
                band.f_high_mhz - step as f64 * (band.f_high_mhz - band.f_low_mhz) / (s - 1) as f64
            } else {
                band.f_low_mhz
            };

            let ideal_c_pf = resonant_capacitance_pf(target_f_mhz, l_nh);
            let residual_pf = ideal_c_pf - dedicated_c_pf;

            let selection = if step == 0 && self.step_zero == StepZeroPolicy::PinZeroSwitched {
                BankSelection {
                    code: 0,
                    capacitance_pf: 0.0,
                }
            } else {
                self.bank.select(residual_pf)
            };

            let total_c_pf = dedicated_c_pf + selection.capacitance_pf;
            if total_c_pf <= 0.0 {
                return Err(TableError::DegenerateStep {
                    band: band.name.clone(),
                    step,
                });
            }
            let achieved_f_mhz = resonant_frequency_mhz(total_c_pf, l_nh);

            points.push(TuningPoint {
                band: band.name.clone(),
                inductance_nh: l_nh,
                tank_q,
                dedicated_c_pf,
                target_f_mhz,
                ideal_c_pf,
                code: selection.code,
                switched_c_pf: selection.capacitance_pf,
                total_c_pf,
                achieved_f_mhz,
            });
        }

        points.sort_by(|a, b| b.achieved_f_mhz.total_cmp(&a.achieved_f_mhz));

        // Coarse banks can snap neighbouring steps to the same code. Keep a
        // single point per achieved frequency so the rows stay strictly
        // ordered and every switchover segment has nonzero width.
        points.dedup_by(|a, b| a.achieved_f_mhz == b.achieved_f_mhz);

        // Each interior boundary is computed exactly once and shared by the
        // rows on either side, so switch_low(i) == switch_high(i+1) holds
        // bitwise and the band is partitioned with no gaps or overlaps.
        let midpoints: Vec<f64> = points
            .windows(2)
            .map(|w| (w[0].achieved_f_mhz + w[1].achieved_f_mhz) / 2.0)
            .collect();

        let last = points.len() - 1;
        let rows = points
            .into_iter()
            .enumerate()
            .map(|(i, point)| TuningTableRow {
                switch_high_mhz: if i == 0 {
                    band.f_high_mhz
                } else {
                    midpoints[i - 1]
                },
                switch_low_mhz: if i == last {
                    band.f_low_mhz
                } else {
                    midpoints[i]
                },
                point,
            })
            .collect();

        Ok(rows)
    }

    /// Build the full table for a plan and its inductor assignment.
    ///
    /// Fails fast on a plan/inductor length mismatch; a band whose tuning
    /// degenerates is flagged and skipped while the rest of the plan still
    /// builds.
    pub fn build_plan(
        &self,
        plan: &BandPlan,
        inductors_nh: &[f64],
    ) -> Result<TuningTable, TableError> {
        if plan.len() != inductors_nh.len() {
            return Err(TableError::LengthMismatch {
                bands: plan.len(),
                inductors: inductors_nh.len(),
            });
        }

        let mut rows = Vec::new();
        let mut skipped = Vec::new();
        for (band, &l_nh) in plan.iter().zip(inductors_nh) {
            match self.build_band(band, l_nh) {
                Ok(mut band_rows) => {
                    tracing::debug!(band = %band.name, rows = band_rows.len(), "band tuned");
                    rows.append(&mut band_rows);
                }
                Err(e) => {
                    tracing::warn!(band = %band.name, error = %e, "band skipped");
                    skipped.push((band.name.clone(), e));
                }
            }
        }
        Ok(TuningTable { rows, skipped })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn e24_bank() -> CapacitorBank {
        CapacitorBank::new([1800.0, 620.0, 330.0, 160.0, 82.0, 39.0, 20.0, 10.0])
    }

    fn band_40m() -> Band {
        Band::new("40m", 6.9, 7.5)
    }

    #[test]
    fn test_resonance_helpers_round_trip() {
        let c = resonant_capacitance_pf(7.5, 300.0);
        assert!((c - 1501.0).abs() < 0.5, "c = {}", c);
        let f = resonant_frequency_mhz(c, 300.0);
        assert!((f - 7.5).abs() < 1e-9);
        assert_eq!(resonant_frequency_mhz(0.0, 300.0), 0.0);
    }

    #[test]
    fn test_40m_scenario_five_steps() {
        // 40m, 300 nH, 5 steps, threshold low enough to allocate the
        // dedicated capacitor at the high edge.
        let builder = TuningTableBuilder::new(e24_bank(), 5, 6.0)
            .unwrap()
            .with_fixed_cap_strategy(FixedCapStrategy::Threshold { threshold_pf: 1000.0 });
        let rows = builder.build_band(&band_40m(), 300.0).unwrap();

        assert_eq!(rows.len(), 5);

        // step 0 is pinned to f_high: the dedicated capacitor covers the
        // whole requirement and the bank contributes nothing
        assert_eq!(rows[0].point.code, 0x00);
        assert_eq!(rows[0].point.switched_c_pf, 0.0);
        assert!((rows[0].point.achieved_f_mhz - 7.5).abs() < 1e-9);

        // last step targets f_low and lands close to it
        assert!((rows[4].point.target_f_mhz - 6.9).abs() < 1e-12);
        assert!((rows[4].point.achieved_f_mhz - 6.9).abs() < 0.01);

        // best-match codes for the residuals at each step
        let codes: Vec<u8> = rows.iter().map(|r| r.point.code).collect();
        assert_eq!(codes, vec![0x00, 0x06, 0x0D, 0x14, 0x1B]);

        // strictly descending achieved frequencies
        for w in rows.windows(2) {
            assert!(w[0].point.achieved_f_mhz > w[1].point.achieved_f_mhz);
        }
    }

    #[test]
    fn test_boundaries_tile_band_exactly() {
        let builder = TuningTableBuilder::new(e24_bank(), 5, 6.0)
            .unwrap()
            .with_fixed_cap_strategy(FixedCapStrategy::Threshold { threshold_pf: 1000.0 });
        let rows = builder.build_band(&band_40m(), 300.0).unwrap();

        assert_eq!(rows[0].switch_high_mhz, 7.5);
        assert_eq!(rows.last().unwrap().switch_low_mhz, 6.9);
        for w in rows.windows(2) {
            // shared boundary, bitwise equal
            assert_eq!(w[0].switch_low_mhz, w[1].switch_high_mhz);
            // and it lies between the two achieved frequencies
            assert!(w[0].switch_low_mhz < w[0].point.achieved_f_mhz);
            assert!(w[0].switch_low_mhz > w[1].point.achieved_f_mhz);
        }
    }

    #[test]
    fn test_no_dedicated_cap_below_threshold() {
        // Default 3100 pF threshold: 40m at 300 nH needs ~1501 pF at the
        // high edge, so the bank covers everything.
        let builder = TuningTableBuilder::new(e24_bank(), 5, 6.0)
            .unwrap()
            .with_fixed_cap_strategy(FixedCapStrategy::Threshold { threshold_pf: 3100.0 });
        let rows = builder.build_band(&band_40m(), 300.0).unwrap();
        assert!(rows.iter().all(|r| r.point.dedicated_c_pf == 0.0));
        assert!(rows.iter().all(|r| r.point.code != 0));
    }

    #[test]
    fn test_tank_q_reported() {
        let builder = TuningTableBuilder::new(e24_bank(), 5, 6.0).unwrap();
        let rows = builder.build_band(&band_40m(), 300.0).unwrap();
        // Q = omega_center * L / R_L at the arithmetic band center
        let expected = 2.0 * PI * 7.2e6 * 300.0e-9 / 6.0;
        for r in &rows {
            assert!((r.point.tank_q - expected).abs() < 1e-9);
        }
    }

    #[test]
    fn test_single_step_band() {
        // S = 1: one point, targeted at the low edge, boundaries pinned to
        // the band edges.
        let builder = TuningTableBuilder::new(e24_bank(), 1, 6.0).unwrap();
        let rows = builder.build_band(&band_40m(), 300.0).unwrap();
        assert_eq!(rows.len(), 1);
        assert!((rows[0].point.target_f_mhz - 6.9).abs() < 1e-12);
        assert_eq!(rows[0].switch_high_mhz, 7.5);
        assert_eq!(rows[0].switch_low_mhz, 6.9);
    }

    #[test]
    fn test_step_zero_policies_diverge() {
        // With one step and a dedicated capacitor sized for f_high, pinning
        // step 0 keeps the tank at the high edge while selecting against
        // the residual pulls it toward the low edge.
        let strategy = FixedCapStrategy::Threshold { threshold_pf: 1000.0 };
        let pin = TuningTableBuilder::new(e24_bank(), 1, 6.0)
            .unwrap()
            .with_fixed_cap_strategy(strategy)
            .with_step_zero_policy(StepZeroPolicy::PinZeroSwitched);
        let select = TuningTableBuilder::new(e24_bank(), 1, 6.0)
            .unwrap()
            .with_fixed_cap_strategy(strategy)
            .with_step_zero_policy(StepZeroPolicy::SelectResidual);

        let pinned = pin.build_band(&band_40m(), 300.0).unwrap();
        let selected = select.build_band(&band_40m(), 300.0).unwrap();

        assert_eq!(pinned[0].point.code, 0);
        assert!((pinned[0].point.achieved_f_mhz - 7.5).abs() < 1e-9);
        assert_ne!(selected[0].point.code, 0);
        assert!(selected[0].point.achieved_f_mhz < pinned[0].point.achieved_f_mhz);
    }

    #[test]
    fn test_pin_zero_without_fixed_cap_degenerates() {
        let builder = TuningTableBuilder::new(e24_bank(), 5, 6.0)
            .unwrap()
            .with_step_zero_policy(StepZeroPolicy::PinZeroSwitched);
        let err = builder.build_band(&band_40m(), 300.0).unwrap_err();
        assert_eq!(
            err,
            TableError::DegenerateStep {
                band: "40m".into(),
                step: 0
            }
        );
    }

    #[test]
    fn test_plan_length_mismatch_fails_fast() {
        let plan = BandPlan::new(vec![band_40m(), Band::new("20m", 13.9, 15.1)]).unwrap();
        let builder = TuningTableBuilder::new(e24_bank(), 5, 6.0).unwrap();
        let err = builder.build_plan(&plan, &[300.0]).unwrap_err();
        assert_eq!(
            err,
            TableError::LengthMismatch {
                bands: 2,
                inductors: 1
            }
        );
    }

    #[test]
    fn test_plan_skips_infeasible_band_and_continues() {
        let plan = BandPlan::new(vec![band_40m(), Band::new("20m", 13.9, 15.1)]).unwrap();
        // Pinning step 0 with no fixed capacitor degenerates every band;
        // give only 40m a strategy conflict by using a per-plan builder
        // where both bands share the policy, then check skip accounting.
        let builder = TuningTableBuilder::new(e24_bank(), 5, 6.0)
            .unwrap()
            .with_step_zero_policy(StepZeroPolicy::PinZeroSwitched)
            .with_fixed_cap_strategy(FixedCapStrategy::Threshold { threshold_pf: 1000.0 });
        // 40m at 300 nH exceeds 1000 pF at f_high -> dedicated cap, fine;
        // 20m at 300 nH needs only ~370 pF -> no dedicated cap, step 0
        // pins to zero total capacitance and the band is skipped.
        let table = builder.build_plan(&plan, &[300.0, 300.0]).unwrap();
        assert_eq!(table.skipped.len(), 1);
        assert_eq!(table.skipped[0].0, "20m");
        assert_eq!(table.band_rows("40m").count(), 5);
        assert_eq!(table.band_rows("20m").count(), 0);
    }

    #[test]
    fn test_full_default_plan_builds() {
        // The historical 10-band plan with the 3-inductor assignment.
        let plan = BandPlan::new(vec![
            Band::new("160m", 1.8, 2.0),
            Band::new("80m", 3.5, 4.0),
            Band::new("60m", 5.0, 5.5),
            Band::new("40m", 6.9, 7.5),
            Band::new("30m", 9.9, 10.5),
            Band::new("20m", 13.9, 15.1),
            Band::new("17m", 17.85, 18.35),
            Band::new("15m", 20.0, 21.5),
            Band::new("12m", 24.5, 25.1),
            Band::new("10m", 28.0, 29.7),
        ])
        .unwrap();
        let inductors = [500.0, 500.0, 500.0, 180.0, 180.0, 180.0, 68.0, 68.0, 68.0, 68.0];
        let builder = TuningTableBuilder::new(e24_bank(), 5, 6.0)
            .unwrap()
            .with_fixed_cap_strategy(FixedCapStrategy::Threshold { threshold_pf: 3100.0 });
        let table = builder.build_plan(&plan, &inductors).unwrap();
        assert!(table.skipped.is_empty());

        // every band tiles its range; bands where the bank is too coarse to
        // resolve every step collapse to fewer than five rows
        for band in plan.iter() {
            let rows: Vec<_> = table.band_rows(&band.name).collect();
            assert!(!rows.is_empty(), "band {}", band.name);
            assert!(rows.len() <= 5, "band {}", band.name);
            assert_eq!(rows[0].switch_high_mhz, band.f_high_mhz);
            assert_eq!(rows.last().unwrap().switch_low_mhz, band.f_low_mhz);
            for w in rows.windows(2) {
                assert_eq!(w[0].switch_low_mhz, w[1].switch_high_mhz);
                assert!(w[0].point.achieved_f_mhz > w[1].point.achieved_f_mhz);
            }
        }
    }

    #[test]
    fn test_coarse_bank_collapses_duplicate_steps() {
        // 12m at 68 nH spans only ~591..621 pF, narrower than the bank can
        // resolve at five steps: the middle two steps both snap to 602 pF
        // and collapse into one row.
        let band = Band::new("12m", 24.5, 25.1);
        let builder = TuningTableBuilder::new(e24_bank(), 5, 6.0).unwrap();
        let rows = builder.build_band(&band, 68.0).unwrap();

        assert_eq!(rows.len(), 4);
        let codes: Vec<u8> = rows.iter().map(|r| r.point.code).collect();
        assert_eq!(codes, vec![0x3A, 0x3B, 0x3C, 0x3D]);

        assert_eq!(rows[0].switch_high_mhz, 25.1);
        assert_eq!(rows.last().unwrap().switch_low_mhz, 24.5);
        for w in rows.windows(2) {
            assert!(w[0].point.achieved_f_mhz > w[1].point.achieved_f_mhz);
            assert_eq!(w[0].switch_low_mhz, w[1].switch_high_mhz);
        }
    }

    #[test]
    fn test_delta_c() {
        let builder = TuningTableBuilder::new(e24_bank(), 5, 6.0).unwrap();
        let rows = builder.build_band(&band_40m(), 300.0).unwrap();
        for r in &rows {
            assert!(
                (r.point.delta_c_pf() - (r.point.total_c_pf - r.point.ideal_c_pf)).abs() < 1e-12
            );
        }
    }

    #[test]
    fn test_builder_rejects_bad_parameters() {
        assert_eq!(
            TuningTableBuilder::new(e24_bank(), 0, 6.0).unwrap_err(),
            TableError::InvalidSteps(0)
        );
        assert_eq!(
            TuningTableBuilder::new(e24_bank(), 5, 0.0).unwrap_err(),
            TableError::InvalidLoad(0.0)
        );
        let builder = TuningTableBuilder::new(e24_bank(), 5, 6.0).unwrap();
        assert!(matches!(
            builder.build_band(&band_40m(), 0.0),
            Err(TableError::InvalidInductor { .. })
        ));
    }
}
