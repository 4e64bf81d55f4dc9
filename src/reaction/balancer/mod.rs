//! The reaction-balancing core: four cooperating strategies over the
//! element-composition matrix, shared positivity/integrality
//! post-processing, and the rationalization stage that maps real-valued
//! solutions to smallest integer vectors.

pub mod algos;
pub mod search;

use std::fmt;
use std::time::Duration;

use nalgebra::DMatrix;
use thiserror::Error;
use tracing::{debug, info, instrument};

use self::search::CancelToken;
use crate::core::rational::{gcd_slice, lcm_slice, limit_denominator};
use crate::core::utils::round_slice;

/// Denominator cap of the rationalization stage.
const MAX_DENOMINATOR: i64 = 1_000_000;

/// The strategy that produced a coefficient vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// Caller-supplied coefficients (Force/Check modes or an override).
    User,
    /// Matrix inverse over the augmented composition matrix.
    Inverse,
    /// Moore–Penrose pseudoinverse of the signed matrix.
    GeneralPseudoinverse,
    /// Blockwise pseudoinverses of the reactant and product matrices.
    PartialPseudoinverse,
    /// Parallel brute-force search over integer vectors.
    Combinatorial,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Method::User => "User",
            Method::Inverse => "inverse",
            Method::GeneralPseudoinverse => "general pseudoinverse",
            Method::PartialPseudoinverse => "partial pseudoinverse",
            Method::Combinatorial => "combinatorial",
        })
    }
}

/// A balancing outcome: the coefficients and the method that found them.
#[derive(Debug, Clone, PartialEq)]
pub struct MethodResult {
    pub method: Method,
    pub coefficients: Vec<f64>,
}

/// Errors of the balancing stage.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum BalanceError {
    #[error("cannot balance by {method}")]
    MethodFailed { method: Method },

    #[error("cannot balance this reaction by any method")]
    Exhausted,
}

/// Balances a composition matrix split at the reactant/product boundary.
///
/// One tolerance drives every numeric decision here: SVD rank thresholds,
/// non-zero-row detection and the balance predicate. The presentation
/// `precision` only affects the rounding of results.
#[derive(Debug, Clone)]
pub struct Balancer {
    matrix: DMatrix<f64>,
    reactant_matrix: DMatrix<f64>,
    product_matrix: DMatrix<f64>,
    precision: u32,
    intify: bool,
    tolerance: f64,
}

impl Balancer {
    pub fn new(
        matrix: DMatrix<f64>,
        separator_pos: usize,
        precision: u32,
        intify: bool,
        tolerance: f64,
    ) -> Self {
        let reactant_matrix = matrix.columns(0, separator_pos).into_owned();
        let product_matrix = matrix
            .columns(separator_pos, matrix.ncols() - separator_pos)
            .into_owned();
        Self {
            matrix,
            reactant_matrix,
            product_matrix,
            precision,
            intify,
            tolerance,
        }
    }

    pub fn matrix(&self) -> &DMatrix<f64> {
        &self.matrix
    }

    /// Balances via the augmented-inverse algorithm.
    pub fn inv(&self) -> Result<Vec<f64>, BalanceError> {
        let raw = algos::inverse(&self.matrix, self.tolerance)
            .map_err(|reason| self.failure(Method::Inverse, reason))?;
        self.finish(raw, Method::Inverse)
    }

    /// Balances via the general pseudoinverse of the signed matrix.
    pub fn gpinv(&self) -> Result<Vec<f64>, BalanceError> {
        let raw = algos::general_pseudoinverse(
            &self.matrix,
            self.reactant_matrix.ncols(),
            self.tolerance,
        )
        .map_err(|reason| self.failure(Method::GeneralPseudoinverse, reason))?;
        self.finish(raw, Method::GeneralPseudoinverse)
    }

    /// Balances via blockwise partial pseudoinverses.
    pub fn ppinv(&self) -> Result<Vec<f64>, BalanceError> {
        let raw = algos::partial_pseudoinverse(
            &self.reactant_matrix,
            &self.product_matrix,
            self.tolerance,
        )
        .map_err(|reason| self.failure(Method::PartialPseudoinverse, reason))?;
        self.finish(raw, Method::PartialPseudoinverse)
    }

    /// Balances by combinatorial search over integer vectors up to
    /// `max_coef`.
    ///
    /// Unlike [`auto`](Self::auto) this can run unbounded in time, so it is
    /// never tried implicitly; the caller bounds it by `max_coef`, the
    /// cancellation token, or the optional timeout.
    #[instrument(skip_all)]
    pub fn comb(
        &self,
        max_coef: usize,
        cancel: &CancelToken,
        timeout: Option<Duration>,
    ) -> Result<Vec<f64>, BalanceError> {
        let raw = search::search(
            &self.reactant_matrix,
            &self.product_matrix,
            max_coef,
            self.tolerance,
            cancel,
            timeout,
        )
        .ok_or_else(|| self.failure(Method::Combinatorial, "search exhausted".to_string()))?;
        self.finish(raw, Method::Combinatorial)
    }

    /// Tries `inv`, `gpinv` and `ppinv` in order; the first success wins.
    #[instrument(skip_all)]
    pub fn auto(&self) -> Result<MethodResult, BalanceError> {
        for method in [
            Method::Inverse,
            Method::GeneralPseudoinverse,
            Method::PartialPseudoinverse,
        ] {
            let attempt = match method {
                Method::Inverse => self.inv(),
                Method::GeneralPseudoinverse => self.gpinv(),
                _ => self.ppinv(),
            };
            if let Ok(coefficients) = attempt {
                info!(%method, "reaction balanced");
                return Ok(MethodResult {
                    method,
                    coefficients,
                });
            }
        }
        Err(BalanceError::Exhausted)
    }

    /// The balance predicate: `‖A_r·c_r − A_p·c_p‖_∞ <= tolerance`.
    pub fn is_balanced(&self, coefficients: &[f64]) -> bool {
        let split = self.reactant_matrix.ncols();
        if coefficients.len() != split + self.product_matrix.ncols() {
            return false;
        }
        for row in 0..self.matrix.nrows() {
            let reactant_sum: f64 = coefficients[..split]
                .iter()
                .enumerate()
                .map(|(col, c)| self.reactant_matrix[(row, col)] * c)
                .sum();
            let product_sum: f64 = coefficients[split..]
                .iter()
                .enumerate()
                .map(|(col, c)| self.product_matrix[(row, col)] * c)
                .sum();
            if (reactant_sum - product_sum).abs() > self.tolerance {
                return false;
            }
        }
        true
    }

    /// Common post-processing: round, require full-length strict positivity
    /// and a verified balance, then rationalize when enabled.
    fn finish(&self, raw: Vec<f64>, method: Method) -> Result<Vec<f64>, BalanceError> {
        let rounded = round_slice(&raw, self.precision + 2);
        if rounded.len() != self.matrix.ncols()
            || rounded.iter().any(|c| *c <= 0.0)
            || !self.is_balanced(&rounded)
        {
            return Err(self.failure(method, "solution failed verification".to_string()));
        }
        if self.intify {
            Ok(intify(&rounded).unwrap_or(rounded))
        } else {
            Ok(rounded)
        }
    }

    fn failure(&self, method: Method, reason: String) -> BalanceError {
        debug!(%method, %reason, "balancing method failed");
        BalanceError::MethodFailed { method }
    }
}

/// Maps a real coefficient vector to the smallest equivalent integer vector.
///
/// Each entry becomes a reduced fraction with denominator at most
/// [`MAX_DENOMINATOR`]; the vector is scaled by the LCM of the denominators
/// and divided by the GCD of the results. Returns `None` when anything
/// overflows or an integer exceeds the cap; the float vector then stays
/// authoritative.
pub(crate) fn intify(coefficients: &[f64]) -> Option<Vec<f64>> {
    let fractions: Vec<_> = coefficients
        .iter()
        .map(|c| limit_denominator(*c, MAX_DENOMINATOR))
        .collect();

    let denominators: Vec<i64> = fractions.iter().map(|f| *f.denom()).collect();
    let lcm = lcm_slice(&denominators)?;

    let scaled: Vec<i64> = fractions
        .iter()
        .map(|f| f.numer().checked_mul(lcm / f.denom()))
        .collect::<Option<_>>()?;

    let gcd = gcd_slice(&scaled);
    let integers: Vec<i64> = scaled.iter().map(|v| v / gcd).collect();
    if integers.iter().any(|v| v.abs() > MAX_DENOMINATOR) {
        return None;
    }
    Some(integers.into_iter().map(|v| v as f64).collect())
}
