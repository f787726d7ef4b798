//! Tolerance defaults for geometric predicates (internal).
//!
//! Policy
//! - Fixed constants; the query pipeline generates points parametrically, so
//!   exact float equality is too brittle for collinearity while anything
//!   coarser than ~1e-9 would merge genuinely distinct partition points.

/// Slack for the point-on-edge collinearity test, and the threshold below
/// which an edge's x-extent counts as vertical.
pub(crate) const COLLINEAR_EPS: f64 = 1e-9;
