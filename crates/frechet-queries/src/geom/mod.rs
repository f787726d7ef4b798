//! 2D geometric primitives: points, edges, polygonal curves.
//!
//! Purpose
//! - `Point2`: a hashable 2D point, usable as a DAG vertex and grid key.
//! - `Edge2`: a non-degenerate segment with derived line properties and the
//!   subdivision/partition helpers the query assembly needs.
//! - `PolygonalCurve2`: ordered point sequence with the median split and
//!   Steiner subdivision the range tree is built from.

mod cfg;
mod curve;
mod point;

pub use curve::PolygonalCurve2;
pub use point::{Edge2, Point2};
