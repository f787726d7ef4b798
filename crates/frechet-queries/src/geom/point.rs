use std::fmt;

use nalgebra::Vector2;
use noisy_float::prelude::*;

use super::cfg::COLLINEAR_EPS;
use super::curve::PolygonalCurve2;
use crate::error::{Error, Result};

/// A 2D point with finite coordinates.
///
/// Coordinates are stored as finite-checked floats so that equality, ordering
/// and hashing agree coordinate-wise; points double as DAG vertices and
/// distance-table keys, which requires hashes that are stable for the
/// lifetime of the value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Point2 {
    pub x: R64,
    pub y: R64,
}

impl Point2 {
    /// Build a point from raw coordinates. Coordinates must be finite.
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x: r64(x), y: r64(y) }
    }

    /// Coordinate vector for numeric work.
    #[inline]
    pub fn vec(&self) -> Vector2<f64> {
        Vector2::new(self.x.raw(), self.y.raw())
    }

    /// Euclidean distance to another point.
    #[inline]
    pub fn distance(&self, other: &Point2) -> f64 {
        (self.vec() - other.vec()).norm()
    }

    /// Whether the point lies on the closed segment `edge`.
    ///
    /// Collinearity uses the edge's slope and y-intercept with a fixed
    /// tolerance; vertical edges take the x-pin plus y-range branch.
    pub fn is_on_edge(&self, edge: &Edge2) -> bool {
        let (x, y) = (self.x.raw(), self.y.raw());
        if edge.is_vertical() {
            if (x - edge.p1.x.raw()).abs() > COLLINEAR_EPS {
                return false;
            }
            let (lo, hi) = ordered(edge.p1.y.raw(), edge.p2.y.raw());
            lo - COLLINEAR_EPS <= y && y <= hi + COLLINEAR_EPS
        } else {
            if (y - (edge.slope() * x + edge.y_intercept())).abs() > COLLINEAR_EPS {
                return false;
            }
            let (lo, hi) = ordered(edge.p1.x.raw(), edge.p2.x.raw());
            lo - COLLINEAR_EPS <= x && x <= hi + COLLINEAR_EPS
        }
    }
}

impl fmt::Display for Point2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[inline]
fn ordered(a: f64, b: f64) -> (f64, f64) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// An ordered, non-degenerate line segment.
///
/// Carries derived line properties: Euclidean length, slope (the 0.0 sentinel
/// for vertical edges; callers rely only on [`Point2::is_on_edge`]) and
/// y-intercept. An edge is also a polygonal curve of size 2, see
/// [`Edge2::to_curve`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Edge2 {
    pub p1: Point2,
    pub p2: Point2,
    d: f64,
    slope: f64,
    y_int: f64,
}

impl Edge2 {
    /// Build an edge; zero-length edges are not constructible.
    pub fn new(p1: Point2, p2: Point2) -> Result<Self> {
        if p1 == p2 {
            return Err(Error::InvalidInput(format!(
                "edge endpoints must be distinct, got {p1} twice"
            )));
        }
        let dx = p1.x.raw() - p2.x.raw();
        let slope = if dx.abs() <= COLLINEAR_EPS {
            0.0
        } else {
            (p1.y.raw() - p2.y.raw()) / dx
        };
        Ok(Self {
            p1,
            p2,
            d: p1.distance(&p2),
            slope,
            y_int: p1.y.raw() - slope * p1.x.raw(),
        })
    }

    #[inline]
    pub fn length(&self) -> f64 {
        self.d
    }

    #[inline]
    pub fn slope(&self) -> f64 {
        self.slope
    }

    #[inline]
    pub fn y_intercept(&self) -> f64 {
        self.y_int
    }

    #[inline]
    pub fn is_vertical(&self) -> bool {
        (self.p1.x.raw() - self.p2.x.raw()).abs() <= COLLINEAR_EPS
    }

    /// The edge as a polygonal curve of size 2.
    pub fn to_curve(&self) -> PolygonalCurve2 {
        PolygonalCurve2::from_points(vec![self.p1, self.p2])
    }

    /// Dense point set π along the edge: the first endpoint, then samples at
    /// a constant parametric step of `d_t / length` strictly before the far
    /// end, then the last endpoint.
    pub fn sub_divide(&self, d_t: f64) -> Vec<Point2> {
        debug_assert!(d_t > 0.0, "subdivision spacing must be positive");
        let mut pi = vec![self.p1];
        let t = d_t / self.d;
        let mut curr = t;
        while curr < 1.0 {
            pi.push(Point2::new(
                (1.0 - curr) * self.p1.x.raw() + curr * self.p2.x.raw(),
                (1.0 - curr) * self.p1.y.raw() + curr * self.p2.y.raw(),
            ));
            curr += t;
        }
        pi.push(self.p2);
        pi
    }

    /// The ordered sub-list of `pi` within `radius` of the centre `x_i`.
    /// Feeds the partition point sets of the query DAG.
    pub fn partition(pi: &[Point2], x_i: &Point2, radius: f64) -> Vec<Point2> {
        pi.iter()
            .copied()
            .filter(|p| p.distance(x_i) <= radius)
            .collect()
    }
}
