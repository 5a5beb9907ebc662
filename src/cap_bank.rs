//! Binary-weighted switched capacitor bank and exhaustive code selection.
//!
//! The PA tank is tuned by an 8-element capacitor bank whose elements are
//! switched in and out by an 8-bit code: bit 7 selects the first (largest)
//! element, bit 0 the last (smallest). Selecting the best code for a target
//! capacitance is a fixed-cost exhaustive search over all 256 subset sums --
//! an enumeration folded to the minimum absolute error, with a strict
//! less-than update so that ties resolve to the lowest code.
//!
//! # Example
//!
//! ```
//! use tanksmith::cap_bank::CapacitorBank;
//!
//! let bank = CapacitorBank::new([1800.0, 620.0, 330.0, 160.0, 82.0, 39.0, 20.0, 10.0]);
//! let sel = bank.select(2450.0);
//!
//! // 1800 + 620 + 20 + 10 == 2450 exactly
//! assert_eq!(sel.code, 0b1100_0011);
//! assert_eq!(sel.capacitance_pf, 2450.0);
//! ```

use serde::{Deserialize, Serialize};

/// Number of elements in the bank, one per code bit.
pub const BANK_SIZE: usize = 8;

/// Number of addressable codes.
pub const CODE_COUNT: usize = 256;

/// Error type for bank construction.
#[derive(Debug, Clone, PartialEq)]
pub enum BankError {
    /// The bank must contain exactly [`BANK_SIZE`] elements.
    WrongLength(usize),
    /// Every element must be a positive capacitance.
    NonPositiveElement { index: usize, value_pf: f64 },
}

impl std::fmt::Display for BankError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::WrongLength(n) => {
                write!(f, "capacitor bank must have exactly {} elements, got {}", BANK_SIZE, n)
            }
            Self::NonPositiveElement { index, value_pf } => write!(
                f,
                "capacitor bank element {} must be positive, got {} pF",
                index, value_pf
            ),
        }
    }
}

impl std::error::Error for BankError {}

/// The best bank code found for a target capacitance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BankSelection {
    /// 8-bit switch code; bit 7 = first bank element, bit 0 = last.
    pub code: u8,
    /// Subset-sum capacitance of the selected code in pF.
    pub capacitance_pf: f64,
}

impl BankSelection {
    /// Absolute selection error against a target in pF.
    pub fn error_pf(&self, target_pf: f64) -> f64 {
        (self.capacitance_pf - target_pf).abs()
    }
}

/// An 8-element binary-weighted switched capacitor bank, MSB to LSB, in pF.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct CapacitorBank {
    elements_pf: [f64; BANK_SIZE],
}

impl CapacitorBank {
    /// Build a bank from exactly eight ordered positive element values.
    pub fn new(elements_pf: [f64; BANK_SIZE]) -> Self {
        Self { elements_pf }
    }

    /// Build a bank from a slice, validating length and positivity.
    pub fn from_slice(elements_pf: &[f64]) -> Result<Self, BankError> {
        if elements_pf.len() != BANK_SIZE {
            return Err(BankError::WrongLength(elements_pf.len()));
        }
        for (index, &value_pf) in elements_pf.iter().enumerate() {
            if !(value_pf > 0.0) {
                return Err(BankError::NonPositiveElement { index, value_pf });
            }
        }
        let mut elements = [0.0; BANK_SIZE];
        elements.copy_from_slice(elements_pf);
        Ok(Self {
            elements_pf: elements,
        })
    }

    /// The element values, MSB to LSB, in pF.
    pub fn elements_pf(&self) -> &[f64; BANK_SIZE] {
        &self.elements_pf
    }

    /// Sum of all elements: the largest capacitance the bank can present.
    pub fn total_pf(&self) -> f64 {
        self.elements_pf.iter().sum()
    }

    /// Subset sum for a code: bit `j` of `code` switches in element
    /// `BANK_SIZE - 1 - j`.
    pub fn subset_sum_pf(&self, code: u8) -> f64 {
        let mut sum = 0.0;
        for j in 0..BANK_SIZE {
            if (code >> j) & 1 == 1 {
                sum += self.elements_pf[BANK_SIZE - 1 - j];
            }
        }
        sum
    }

    /// Find the code whose subset sum is closest to `target_pf`.
    ///
    /// Pure function over (target, bank): enumerates all 256 codes in
    /// ascending order and keeps a candidate only when it is strictly
    /// better, so ties resolve to the lowest code. Cost is fixed at
    /// 256 x 8 operations.
    pub fn select(&self, target_pf: f64) -> BankSelection {
        (0..CODE_COUNT as u16)
            .map(|code| {
                let code = code as u8;
                BankSelection {
                    code,
                    capacitance_pf: self.subset_sum_pf(code),
                }
            })
            .fold(
                BankSelection {
                    code: 0,
                    capacitance_pf: f64::INFINITY,
                },
                |best, candidate| {
                    if candidate.error_pf(target_pf) < best.error_pf(target_pf) {
                        candidate
                    } else {
                        best
                    }
                },
            )
    }
}

impl TryFrom<Vec<f64>> for CapacitorBank {
    type Error = BankError;

    fn try_from(v: Vec<f64>) -> Result<Self, Self::Error> {
        Self::from_slice(&v)
    }
}

impl From<CapacitorBank> for Vec<f64> {
    fn from(bank: CapacitorBank) -> Self {
        bank.elements_pf.to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn e24_bank() -> CapacitorBank {
        CapacitorBank::new([1800.0, 620.0, 330.0, 160.0, 82.0, 39.0, 20.0, 10.0])
    }

    #[test]
    fn test_exact_subset_sum_2450() {
        // 1800 + 620 + 20 + 10 = 2450; bits for elements 0, 1, 6, 7.
        let sel = e24_bank().select(2450.0);
        assert_eq!(sel.code, 0b1100_0011);
        assert_eq!(sel.capacitance_pf, 2450.0);
        assert_eq!(sel.error_pf(2450.0), 0.0);
    }

    #[test]
    fn test_bit_mapping_msb() {
        let bank = e24_bank();
        assert_eq!(bank.subset_sum_pf(0b1000_0000), 1800.0);
        assert_eq!(bank.subset_sum_pf(0b0000_0001), 10.0);
        assert_eq!(bank.subset_sum_pf(0x00), 0.0);
        assert_eq!(bank.subset_sum_pf(0xFF), bank.total_pf());
    }

    #[test]
    fn test_zero_target_selects_code_zero() {
        let sel = e24_bank().select(0.0);
        assert_eq!(sel.code, 0);
        assert_eq!(sel.capacitance_pf, 0.0);
    }

    #[test]
    fn test_negative_target_selects_code_zero() {
        // Residual targets can go negative when a dedicated fixed capacitor
        // over-covers a step; the bank contributes nothing.
        let sel = e24_bank().select(-75.0);
        assert_eq!(sel.code, 0);
    }

    #[test]
    fn test_target_above_total_selects_all() {
        let bank = e24_bank();
        let sel = bank.select(1e6);
        assert_eq!(sel.code, 0xFF);
        assert_eq!(sel.capacitance_pf, bank.total_pf());
    }

    #[test]
    fn test_matches_brute_force_across_targets() {
        let bank = e24_bank();
        let total = bank.total_pf();
        let mut target = 0.0;
        while target <= total {
            let sel = bank.select(target);
            // brute-force reference with the same tie-break
            let mut best_code = 0u8;
            let mut best_err = f64::INFINITY;
            for code in 0..=255u8 {
                let err = (bank.subset_sum_pf(code) - target).abs();
                if err < best_err {
                    best_err = err;
                    best_code = code;
                }
            }
            assert_eq!(sel.code, best_code, "target = {}", target);
            assert_eq!(sel.error_pf(target), best_err, "target = {}", target);
            target += 7.3;
        }
    }

    #[test]
    fn test_tie_breaks_to_lowest_code() {
        // Two elements of equal value: codes 0b010 and 0b100 produce the
        // same sum, so the lower code must win.
        let bank = CapacitorBank::new([800.0, 400.0, 200.0, 100.0, 50.0, 25.0, 25.0, 10.0]);
        let sel = bank.select(25.0);
        assert_eq!(sel.capacitance_pf, 25.0);
        assert_eq!(sel.code, 0b0000_0010, "lowest of the tied codes wins");
    }

    #[test]
    fn test_deterministic() {
        let bank = e24_bank();
        let a = bank.select(1234.5);
        let b = bank.select(1234.5);
        assert_eq!(a, b);
    }

    #[test]
    fn test_from_slice_rejects_wrong_length() {
        assert_eq!(
            CapacitorBank::from_slice(&[1.0, 2.0, 3.0]),
            Err(BankError::WrongLength(3))
        );
    }

    #[test]
    fn test_from_slice_rejects_nonpositive() {
        let err =
            CapacitorBank::from_slice(&[1800.0, 620.0, 330.0, 160.0, 82.0, 39.0, 0.0, 10.0])
                .unwrap_err();
        assert!(matches!(err, BankError::NonPositiveElement { index: 6, .. }));
    }

    #[test]
    fn test_serde_round_trip() {
        let bank = e24_bank();
        let yaml = serde_yaml::to_string(&bank).unwrap();
        let back: CapacitorBank = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(bank, back);
    }

    #[test]
    fn test_serde_rejects_short_bank() {
        let err = serde_yaml::from_str::<CapacitorBank>("[10.0, 20.0]");
        assert!(err.is_err());
    }
}
