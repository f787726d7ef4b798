//! Fréchet-distance machinery.
//!
//! Purpose
//! - `discrete_frechet`: the Eiter–Mannila coupling measure between two
//!   polygonal curves, O(mn).
//! - `ExponentialGrid2`: multi-scale nested grids around a centre with an
//!   O(1) (ε/2)-approximate nearest-grid-point lookup over the annulus
//!   α ≤ ‖p − u‖ ≤ β.
//! - `FrechetGrid2`: a per-curve precomputed table answering
//!   (1+ε)-approximate Fréchet queries for arbitrary segments in O(1).
//!
//! References
//! - Eiter, Mannila: *Computing the Discrete Fréchet Distance*, Table 1.
//! - Driemel: *Realistic Analysis for Algorithmic Problems on Geographical
//!   Data*, Lemma 4.2.4.

mod discrete;
mod expgrid;
mod grid;

pub use discrete::discrete_frechet;
pub use expgrid::{ExponentialGrid2, Grid2, GridCell2, HyperCube2};
pub use grid::FrechetGrid2;

#[cfg(test)]
mod tests;
