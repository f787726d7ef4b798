//! Error kinds shared across the crate.
//!
//! Preconditions surface as `InvalidInput` at entry; routing failures during
//! path partitioning as `NotFound`; broken internal invariants as
//! `Degenerate`. `OutOfRange` is the exponential-grid annulus guard.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// A caller-visible precondition was violated (curve too short, ε out of
    /// (0, 1], δ ≤ 0, zero-length edge, duplicate consecutive points, ...).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// `approximate_point` was called for a point outside the grid annulus.
    #[error("point at distance {dist} lies outside the grid annulus [{alpha}, {beta}]")]
    OutOfRange { dist: f64, alpha: f64, beta: f64 },

    /// An edge could not be located in the decomposed curve.
    #[error("edge is not part of the decomposed curve")]
    NotFound,

    /// An internal structural invariant did not hold.
    #[error("degenerate state: {0}")]
    Degenerate(String),
}

pub type Result<T> = std::result::Result<T, Error>;
