//! # Chebyshev Lowpass Prototype
//!
//! Computes the normalized element values (g-values) of an equal-ripple
//! Chebyshev lowpass prototype for a given filter order and passband ripple.
//! The g-values are the starting point for every bandpass synthesis in this
//! crate: the [`crate::synthesis`] module transforms them into physical
//! inductances and capacitances.
//!
//! The prototype is symmetrized: `g_k == g_{n+1-k}` for all k in `1..=n`.
//! Capacitively-coupled resonator synthesis assumes equal source and load
//! coupling, so the upper half of the ladder mirrors the lower half. For odd
//! orders the recursion produces this on its own; for even orders the mirror
//! is imposed.
//!
//! # Example
//!
//! ```
//! use tanksmith::prototype::PrototypeValues;
//!
//! // 3rd-order, 0.1 dB ripple -- the workhorse prototype for HF band filters
//! let proto = PrototypeValues::chebyshev(3, 0.1).unwrap();
//! assert_eq!(proto.order(), 3);
//! assert!((proto.g(1) - 1.0316).abs() < 1e-3);
//! assert!((proto.g(2) - 1.1474).abs() < 1e-3);
//! assert!((proto.g(1) - proto.g(3)).abs() < 1e-12);
//! ```

use std::f64::consts::PI;

/// Error type for prototype computation.
#[derive(Debug, Clone, PartialEq)]
pub enum PrototypeError {
    /// Filter order must be at least 1.
    InvalidOrder(usize),
    /// Passband ripple must be strictly positive.
    InvalidRipple(f64),
}

impl std::fmt::Display for PrototypeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidOrder(n) => write!(f, "filter order must be >= 1, got {}", n),
            Self::InvalidRipple(r) => {
                write!(f, "passband ripple must be > 0 dB, got {}", r)
            }
        }
    }
}

impl std::error::Error for PrototypeError {}

/// Normalized Chebyshev lowpass prototype element values.
///
/// Holds the ordered sequence `g0..=g_{n+1}` where `g0` is the normalized
/// source termination, `g1..=gn` are the ladder elements, and `g_{n+1}` is
/// the load termination. Immutable once computed.
#[derive(Debug, Clone, PartialEq)]
pub struct PrototypeValues {
    order: usize,
    ripple_db: f64,
    g: Vec<f64>,
}

impl PrototypeValues {
    /// Compute the equal-ripple prototype for the given order and passband
    /// ripple in dB.
    ///
    /// Fails with a domain error if `order < 1` or `ripple_db <= 0`.
    pub fn chebyshev(order: usize, ripple_db: f64) -> Result<Self, PrototypeError> {
        if order < 1 {
            return Err(PrototypeError::InvalidOrder(order));
        }
        if !(ripple_db > 0.0) {
            return Err(PrototypeError::InvalidRipple(ripple_db));
        }

        let n = order;
        let nf = n as f64;
        let beta = (1.0 / (ripple_db / 17.37).tanh()).ln();
        let gamma = (beta / (2.0 * nf)).sinh();

        // Standard recursion: a_k = sin((2k-1)pi/2n), b_k = gamma^2 + sin(k pi/n)^2
        let a = |k: usize| ((2.0 * k as f64 - 1.0) * PI / (2.0 * nf)).sin();
        let b = |k: usize| gamma * gamma + (k as f64 * PI / nf).sin().powi(2);

        let mut g = vec![0.0; n + 2];
        g[0] = 1.0;
        g[1] = 2.0 * a(1) / gamma;
        for k in 2..=n {
            g[k] = 4.0 * a(k - 1) * a(k) / (b(k - 1) * g[k - 1]);
        }
        g[n + 1] = if n % 2 == 1 {
            1.0
        } else {
            1.0 / (beta / 4.0).tanh().powi(2)
        };

        // Mirror the lower half onto the upper half. For odd orders the
        // recursion already satisfies g_k == g_{n+1-k} up to rounding and
        // the mirror makes the identity exact; for even orders this pins
        // the antimetric textbook ladder to the symmetric form the
        // coupled-resonator synthesis requires.
        for k in (n / 2 + 1)..=n {
            g[k] = g[n + 1 - k];
        }

        Ok(Self {
            order: n,
            ripple_db,
            g,
        })
    }

    /// Filter order n.
    pub fn order(&self) -> usize {
        self.order
    }

    /// Passband ripple in dB the prototype was computed for.
    pub fn ripple_db(&self) -> f64 {
        self.ripple_db
    }

    /// Element value `g_k` for `k` in `0..=n+1`.
    ///
    /// # Panics
    ///
    /// Panics if `k > n + 1`.
    pub fn g(&self, k: usize) -> f64 {
        self.g[k]
    }

    /// All values `g0..=g_{n+1}` in order.
    pub fn values(&self) -> &[f64] {
        &self.g
    }

    /// The interior ladder elements `g1..=gn`.
    pub fn elements(&self) -> &[f64] {
        &self.g[1..=self.order]
    }

    /// Normalized load termination `g_{n+1}`.
    pub fn load_termination(&self) -> f64 {
        self.g[self.order + 1]
    }
}
