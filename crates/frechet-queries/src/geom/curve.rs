use itertools::Itertools;

use super::point::{Edge2, Point2};
use crate::error::{Error, Result};

/// An ordered sequence of at least two points.
///
/// Invariants:
/// - size ≥ 2,
/// - no two consecutive points are equal (every implied segment is a valid
///   [`Edge2`]).
#[derive(Clone, Debug, PartialEq)]
pub struct PolygonalCurve2 {
    points: Vec<Point2>,
}

impl PolygonalCurve2 {
    pub fn new(points: Vec<Point2>) -> Result<Self> {
        if points.len() < 2 {
            return Err(Error::InvalidInput(
                "need at least 2 points to define a polygonal curve".into(),
            ));
        }
        if let Some((a, _)) = points.iter().tuple_windows().find(|(a, b)| a == b) {
            return Err(Error::InvalidInput(format!(
                "curve repeats the consecutive point {a}"
            )));
        }
        Ok(Self { points })
    }

    /// Internal constructor for generated point sets (Steiner subdivisions),
    /// where rounding may produce harmless near-duplicate joins.
    pub(crate) fn from_points(points: Vec<Point2>) -> Self {
        debug_assert!(points.len() >= 2);
        Self { points }
    }

    pub fn push(&mut self, point: Point2) {
        self.points.push(point);
    }

    #[inline]
    pub fn point(&self, i: usize) -> Option<&Point2> {
        self.points.get(i)
    }

    #[inline]
    pub fn first(&self) -> Point2 {
        self.points[0]
    }

    #[inline]
    pub fn last(&self) -> Point2 {
        self.points[self.points.len() - 1]
    }

    /// First and last point.
    #[inline]
    pub fn spine(&self) -> (Point2, Point2) {
        (self.first(), self.last())
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn points(&self) -> &[Point2] {
        &self.points
    }

    /// Points `[0, ⌊n/2⌋]` inclusive; size-2 curves split to themselves.
    /// The two halves share exactly the median vertex.
    pub fn left_curve(&self) -> PolygonalCurve2 {
        if self.size() <= 2 {
            return self.clone();
        }
        let median = self.size() / 2;
        Self::from_points(self.points[..=median].to_vec())
    }

    /// Points `[⌊n/2⌋, n)`; size-2 curves split to themselves.
    pub fn right_curve(&self) -> PolygonalCurve2 {
        if self.size() <= 2 {
            return self.clone();
        }
        let median = self.size() / 2;
        Self::from_points(self.points[median..].to_vec())
    }

    /// Whether `edge` equals some consecutive point pair of the curve. Used
    /// to route query edges down the range tree.
    pub fn contains(&self, edge: &Edge2) -> bool {
        self.points
            .iter()
            .tuple_windows()
            .any(|(a, b)| *a == edge.p1 && *b == edge.p2)
    }

    /// Per-segment Steiner subdivision, concatenated; the shared join point
    /// of adjacent segments appears once.
    pub fn sub_divide(&self, d_t: f64) -> Vec<Point2> {
        let mut pi: Vec<Point2> = Vec::new();
        for (a, b) in self.points.iter().tuple_windows() {
            let Ok(segment) = Edge2::new(*a, *b) else {
                continue;
            };
            let mut dense = segment.sub_divide(d_t);
            if !pi.is_empty() {
                dense.remove(0);
            }
            pi.append(&mut dense);
        }
        pi
    }

    /// The subdivided point set as a curve.
    pub fn steiner_curve(&self, d_t: f64) -> PolygonalCurve2 {
        Self::from_points(self.sub_divide(d_t))
    }
}

impl From<&Edge2> for PolygonalCurve2 {
    fn from(edge: &Edge2) -> Self {
        edge.to_curve()
    }
}
