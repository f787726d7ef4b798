use std::collections::HashMap;

use itertools::iproduct;

use super::discrete::discrete_frechet;
use super::expgrid::ExponentialGrid2;
use crate::error::{Error, Result};
use crate::geom::{Edge2, Point2, PolygonalCurve2};
use crate::STEINER_SPACING;

/// Precomputed (1+ε)-approximate Fréchet distances from a fixed curve to
/// arbitrary query segments, answered in O(1).
///
/// For a curve C with spine (u, v): L is the discrete Fréchet distance from
/// the segment uv to C (floored to 1), two exponential grids cover the
/// annuli α = εL/2 ≤ r ≤ β = L/ε around u and v, and a table D maps every
/// grid-point pair (p′, q′) to the discrete Fréchet distance between the
/// Steiner-subdivided segment p′q′ and the Steiner-subdivided C.
///
/// Construction is O(X² · n) with X = ε⁻²·log(1/ε); the table dominates the
/// memory footprint of the curve range tree.
#[derive(Clone, Debug)]
pub struct FrechetGrid2 {
    error: f64,
    spacing: f64,
    u: Point2,
    v: Point2,
    l: f64,
    grid_u: ExponentialGrid2,
    grid_v: ExponentialGrid2,
    distances: HashMap<(Point2, Point2), f64>,
}

impl FrechetGrid2 {
    /// Build with the crate-default Steiner spacing.
    pub fn new(curve: &PolygonalCurve2, error: f64) -> Result<Self> {
        Self::with_spacing(curve, error, STEINER_SPACING)
    }

    pub fn with_spacing(curve: &PolygonalCurve2, error: f64, spacing: f64) -> Result<Self> {
        if !(0.0 < error && error <= 1.0) {
            return Err(Error::InvalidInput(format!(
                "error rate must be in (0, 1], got {error}"
            )));
        }
        if spacing <= 0.0 {
            return Err(Error::InvalidInput(format!(
                "steiner spacing must be positive, got {spacing}"
            )));
        }

        let (u, v) = curve.spine();
        // A closed sub-curve has no usable spine segment.
        let spine = Edge2::new(u, v)?;
        let steiner_curve = curve.steiner_curve(spacing);

        let computed = discrete_frechet(&spine.to_curve().steiner_curve(spacing), &steiner_curve);
        let l = if computed == 0.0 { 1.0 } else { computed };

        let grid_u = ExponentialGrid2::new(u, error, error * l / 2.0, l / error)?;
        let grid_v = ExponentialGrid2::new(v, error, error * l / 2.0, l / error)?;

        let points_u = grid_u.points();
        let points_v = grid_v.points();
        let mut distances = HashMap::with_capacity(points_u.len() * points_v.len());
        for (p, q) in iproduct!(points_u.iter(), points_v.iter()) {
            let Ok(segment) = Edge2::new(*p, *q) else {
                // Coincident grid points span no segment; such a pair can
                // never be the result of snapping a valid query edge.
                continue;
            };
            distances.insert(
                (*p, *q),
                discrete_frechet(&segment.to_curve().steiner_curve(spacing), &steiner_curve),
            );
        }
        log::trace!(
            "frechet grid: L = {l:.4}, |G_u| = {}, |G_v| = {}, table = {} entries",
            points_u.len(),
            points_v.len(),
            distances.len()
        );

        Ok(Self {
            error,
            spacing,
            u,
            v,
            l,
            grid_u,
            grid_v,
            distances,
        })
    }

    #[inline]
    pub fn error(&self) -> f64 {
        self.error
    }

    #[inline]
    pub fn spacing(&self) -> f64 {
        self.spacing
    }

    /// The reference distance L from the spine segment to the curve.
    #[inline]
    pub fn reference_distance(&self) -> f64 {
        self.l
    }

    /// Approximate Fréchet distance between the segment `edge` and the
    /// curve, within a (1+ε) multiplicative band of the discrete Fréchet
    /// distance of their Steiner subdivisions.
    pub fn approximate_frechet(&self, edge: &Edge2) -> Result<f64> {
        let r_p = edge.p1.distance(&self.u);
        let r_q = edge.p2.distance(&self.v);
        let r = r_p.max(r_q);

        if r <= self.error * self.l / 2.0 {
            // Short range: the segment is close to the spine everywhere.
            return Ok(self.l - r);
        }
        if r >= self.l / self.error {
            // Far field: the endpoint displacement dominates.
            return Ok(r);
        }

        let p = self
            .grid_u
            .snap(&edge.p1)
            .ok_or_else(|| Error::Degenerate("empty exponential grid at spine start".into()))?;
        let q = self
            .grid_v
            .snap(&edge.p2)
            .ok_or_else(|| Error::Degenerate("empty exponential grid at spine end".into()))?;
        let table = self.distances.get(&(p, q)).ok_or_else(|| {
            Error::Degenerate(format!("missing distance-table entry for ({p}, {q})"))
        })?;
        let snap = edge.p1.distance(&p).max(edge.p2.distance(&q));
        Ok(*table - snap)
    }
}
