//! Parallel Processing Module
//!
//! This module provides parallel implementations of batch operations using
//! Rayon. Enable with the `parallel` feature flag.
//!
//! ## Usage
//!
//! ```toml
//! [dependencies]
//! tanksmith = { version = "0.1", features = ["parallel"] }
//! ```
//!
//! ## Performance Considerations
//!
//! Bands are designed independently, so both filter-bank synthesis and
//! tuning-table generation parallelize across bands with no shared state.
//! For a ten-band HF plan the sequential path is already fast; the parallel
//! path pays off when sweeping large parameter grids (bank variants,
//! correction factors, step counts) over many candidate plans.

use rayon::prelude::*;

use crate::band_plan::BandPlan;
use crate::synthesis::{
    BandSynthesis, BandpassSynthesizer, FilterBankReport, FilterSpec, WidebandCorrection,
};
use crate::tuning_table::{TableError, TuningTable, TuningTableBuilder};

/// Run the synthesizer once per band of a plan, one band per thread.
///
/// Produces the same report as [`crate::synthesis::synthesize_filter_bank`],
/// entries in plan order.
pub fn synthesize_filter_bank_parallel(
    plan: &BandPlan,
    order: usize,
    ripple_db: f64,
    z0_ohms: f64,
    correction: WidebandCorrection,
) -> FilterBankReport {
    let synth = BandpassSynthesizer::new(correction);
    let entries = plan
        .bands()
        .par_iter()
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

/// Build a tuning table for a whole plan, one band per thread.
///
/// Produces the same table as [`TuningTableBuilder::build_plan`]: rows in
/// plan order, infeasible bands collected in `skipped`.
pub fn build_plan_parallel(
    builder: &TuningTableBuilder,
    plan: &BandPlan,
    inductors_nh: &[f64],
) -> Result<TuningTable, TableError> {
    if plan.len() != inductors_nh.len() {
        return Err(TableError::LengthMismatch {
            bands: plan.len(),
            inductors: inductors_nh.len(),
        });
    }

    let outcomes: Vec<_> = plan
        .bands()
        .par_iter()
        .zip(inductors_nh.par_iter())
        .map(|(band, &l_nh)| (band.name.clone(), builder.build_band(band, l_nh)))
        .collect();

    let mut rows = Vec::new();
    let mut skipped = Vec::new();
    for (name, outcome) in outcomes {
        match outcome {
            Ok(mut band_rows) => {
                tracing::debug!(band = %name, rows = band_rows.len(), "band tuned");
                rows.append(&mut band_rows);
            }
            Err(e) => {
                tracing::warn!(band = %name, error = %e, "band skipped");
                skipped.push((name, e));
            }
        }
    }

    Ok(TuningTable { rows, skipped })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::band_plan::Band;
    use crate::cap_bank::CapacitorBank;
    use crate::synthesis::synthesize_filter_bank;

    fn test_plan() -> BandPlan {
        BandPlan::new(vec![
            Band::new("80m", 3.5, 4.0),
            Band::new("40m", 6.9, 7.5),
            Band::new("20m", 13.9, 15.1),
            Band::new("10m", 28.0, 29.7),
        ])
        .unwrap()
    }

    fn test_bank() -> CapacitorBank {
        CapacitorBank::new([1800.0, 620.0, 330.0, 160.0, 82.0, 39.0, 20.0, 10.0])
    }

    #[test]
    fn test_parallel_synthesis_matches_sequential() {
        let plan = test_plan();
        let correction = WidebandCorrection::tapered();

        let seq = synthesize_filter_bank(&plan, 3, 0.1, 50.0, correction);
        let par = synthesize_filter_bank_parallel(&plan, 3, 0.1, 50.0, correction);

        assert_eq!(seq.entries.len(), par.entries.len());
        for (s, p) in seq.entries.iter().zip(par.entries.iter()) {
            assert_eq!(s.band.name, p.band.name);
            match (&s.result, &p.result) {
                (Ok(a), Ok(b)) => {
                    assert_eq!(a.inductance_h, b.inductance_h);
                    assert_eq!(a.tank_caps_f, b.tank_caps_f);
                    assert_eq!(a.coupling_caps_f, b.coupling_caps_f);
                }
                (Err(_), Err(_)) => {}
                _ => panic!("sequential and parallel feasibility disagree"),
            }
        }
    }

    #[test]
    fn test_parallel_table_matches_sequential() {
        let plan = test_plan();
        let inductors = [500.0, 180.0, 180.0, 68.0];
        let builder = TuningTableBuilder::new(test_bank(), 5, 6.0).unwrap();

        let seq = builder.build_plan(&plan, &inductors).unwrap();
        let par = build_plan_parallel(&builder, &plan, &inductors).unwrap();

        assert_eq!(seq.rows.len(), par.rows.len());
        for (s, p) in seq.rows.iter().zip(par.rows.iter()) {
            assert_eq!(s.point.band, p.point.band);
            assert_eq!(s.point.code, p.point.code);
            assert_eq!(s.point.achieved_f_mhz, p.point.achieved_f_mhz);
            assert_eq!(s.switch_low_mhz, p.switch_low_mhz);
            assert_eq!(s.switch_high_mhz, p.switch_high_mhz);
        }
    }

    #[test]
    fn test_parallel_length_mismatch() {
        let plan = test_plan();
        let builder = TuningTableBuilder::new(test_bank(), 5, 6.0).unwrap();
        let result = build_plan_parallel(&builder, &plan, &[500.0, 180.0]);
        assert!(matches!(result, Err(TableError::LengthMismatch { .. })));
    }
}
