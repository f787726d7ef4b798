//! Approximate Fréchet-matching range queries over polygonal curves.
//!
//! Purpose
//! - Preprocess a polygonal curve P so that, for a query segment Q and two
//!   points x, y on P, "is the Fréchet distance between Q and P[x, y] at most
//!   (1 + ε)·δ?" is answered in O((log n)/ε²) time.
//! - The centrepiece is [`range_tree::CurveRangeTree`] (Lemma 2 of Smid &
//!   Gudmundsson, *Fast Algorithms for Approximate Fréchet Matching Queries
//!   in Geometric Trees*), standing on per-node Fréchet grids (Driemel,
//!   *Realistic Analysis for Algorithmic Problems on Geographical Data*,
//!   Lemma 4.2.4), multi-scale exponential grids, the Eiter–Mannila discrete
//!   Fréchet distance, and a bottleneck-path DAG.
//!
//! The building blocks are public: see [`frechet::discrete_frechet`],
//! [`frechet::FrechetGrid2`], [`frechet::ExponentialGrid2`], [`dag::Dag`] and
//! the decomposition/LCA machinery in [`tree`].

pub mod dag;
pub mod error;
pub mod frechet;
pub mod geom;
pub mod range_tree;
pub mod tree;

pub use error::{Error, Result};

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default arclength spacing for Steiner subdivision during Fréchet-grid
/// construction. Every consumer also takes the spacing as an explicit
/// `with_spacing` parameter.
pub const STEINER_SPACING: f64 = 1.0;

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::dag::Dag;
    pub use crate::error::{Error, Result};
    pub use crate::frechet::{discrete_frechet, ExponentialGrid2, FrechetGrid2};
    pub use crate::geom::{Edge2, Point2, PolygonalCurve2};
    pub use crate::range_tree::{CurveRangeTree, Subpath};
    pub use crate::tree::{NodeId, Tree};
    pub use crate::STEINER_SPACING;
}
