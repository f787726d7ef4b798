use std::collections::HashSet;

use crate::error::{Error, Result};
use crate::geom::Point2;

/// An axis-aligned square, stored as centre plus side length.
#[derive(Clone, Copy, Debug)]
pub struct HyperCube2 {
    pub center: Point2,
    pub side: f64,
}

impl HyperCube2 {
    #[inline]
    pub fn new(side: f64, center: Point2) -> Self {
        Self { center, side }
    }

    /// Corner with the smallest coordinates.
    #[inline]
    pub fn top_left(&self) -> Point2 {
        let h = self.side / 2.0;
        Point2::new(self.center.x.raw() - h, self.center.y.raw() - h)
    }

    pub fn corners(&self) -> [Point2; 4] {
        let h = self.side / 2.0;
        let (cx, cy) = (self.center.x.raw(), self.center.y.raw());
        [
            Point2::new(cx - h, cy - h),
            Point2::new(cx + h, cy - h),
            Point2::new(cx - h, cy + h),
            Point2::new(cx + h, cy + h),
        ]
    }

    /// Closed containment of an axis-aligned box given by its minimal corner
    /// and side length.
    fn contains_box(&self, tl: Point2, side: f64) -> bool {
        let h = self.side / 2.0;
        let (cx, cy) = (self.center.x.raw(), self.center.y.raw());
        tl.x.raw() >= cx - h
            && tl.y.raw() >= cy - h
            && tl.x.raw() + side <= cx + h
            && tl.y.raw() + side <= cy + h
    }
}

/// One cell of a [`Grid2`]; knows its four corners.
#[derive(Clone, Copy, Debug)]
pub struct GridCell2 {
    corners: [Point2; 4],
}

impl GridCell2 {
    #[inline]
    pub fn corners(&self) -> &[Point2; 4] {
        &self.corners
    }

    /// The corner nearest to `p`.
    pub fn find_closest(&self, p: &Point2) -> Point2 {
        let mut closest = self.corners[0];
        let mut min_dist = p.distance(&closest);
        for corner in &self.corners[1..] {
            let dist = p.distance(corner);
            if dist < min_dist {
                closest = *corner;
                min_dist = dist;
            }
        }
        closest
    }
}

/// A tiling of a hypercube into equal square cells of fixed width.
///
/// Cells are addressed by (row, col) and computed on demand; an optional
/// "hole" punches out every cell wholly contained in a smaller nested
/// hypercube, whose coverage exists at higher resolution. All corner
/// coordinates derive from one formula so that a snapped corner is
/// bit-identical to the corresponding entry of [`Grid2::points`].
#[derive(Clone, Debug)]
pub struct Grid2 {
    cube: HyperCube2,
    cell_width: f64,
    cells_per_side: usize,
    hole: Option<HyperCube2>,
}

impl Grid2 {
    pub fn new(cube: HyperCube2, cell_width: f64, hole: Option<HyperCube2>) -> Result<Self> {
        let cells_per_side = (cube.side / cell_width).ceil() as isize;
        if cells_per_side <= 0 || !cell_width.is_finite() {
            return Err(Error::InvalidInput(
                "invalid hypercube side length and grid cell width".into(),
            ));
        }
        Ok(Self {
            cube,
            cell_width,
            cells_per_side: cells_per_side as usize,
            hole,
        })
    }

    #[inline]
    pub fn cells_per_side(&self) -> usize {
        self.cells_per_side
    }

    /// Corner point of the lattice at (row, col), both in `0..=cells_per_side`.
    #[inline]
    fn corner_point(&self, row: usize, col: usize) -> Point2 {
        let tl = self.cube.top_left();
        Point2::new(
            tl.x.raw() + col as f64 * self.cell_width,
            tl.y.raw() + row as f64 * self.cell_width,
        )
    }

    pub fn cell(&self, row: usize, col: usize) -> GridCell2 {
        GridCell2 {
            corners: [
                self.corner_point(row, col),
                self.corner_point(row, col + 1),
                self.corner_point(row + 1, col),
                self.corner_point(row + 1, col + 1),
            ],
        }
    }

    /// Whether the cell survives the punch-out against the nested hole.
    pub fn is_active(&self, row: usize, col: usize) -> bool {
        match &self.hole {
            None => true,
            Some(hole) => !hole.contains_box(self.corner_point(row, col), self.cell_width),
        }
    }

    /// (row, col) of the cell containing `p`, clamped into the tiling.
    pub fn locate(&self, p: &Point2) -> (usize, usize) {
        let tl = self.cube.top_left();
        let max = (self.cells_per_side - 1) as isize;
        let col = (((p.x.raw() - tl.x.raw()) / self.cell_width).floor() as isize).clamp(0, max);
        let row = (((p.y.raw() - tl.y.raw()) / self.cell_width).floor() as isize).clamp(0, max);
        (row as usize, col as usize)
    }

    /// Corner points of all active cells (with duplicates across neighbours).
    fn push_points(&self, out: &mut HashSet<Point2>) {
        for row in 0..self.cells_per_side {
            for col in 0..self.cells_per_side {
                if self.is_active(row, col) {
                    out.extend(self.cell(row, col).corners());
                }
            }
        }
    }
}

/// Multi-scale family of grids centred at `u`, covering the annulus
/// α ≤ ‖p − u‖ ≤ β.
///
/// Level i covers a hypercube of side `4α·2^i` with cells of width
/// `ε·side/(4√2)`, cropped by level i−1; every annulus point falls into
/// exactly one active cell, and the nearest corner of that cell is within
/// `(ε/2)·‖p − u‖` of p.
#[derive(Clone, Debug)]
pub struct ExponentialGrid2 {
    pub center: Point2,
    alpha: f64,
    beta: f64,
    grids: Vec<Grid2>,
}

impl ExponentialGrid2 {
    pub fn new(center: Point2, error: f64, alpha: f64, beta: f64) -> Result<Self> {
        if !(0.0 < error && error <= 1.0) {
            return Err(Error::InvalidInput(format!(
                "error rate must be in (0, 1], got {error}"
            )));
        }
        let (alpha, beta) = if alpha <= beta { (alpha, beta) } else { (beta, alpha) };
        if alpha <= 0.0 || !beta.is_finite() {
            return Err(Error::InvalidInput(format!(
                "grid annulus must satisfy 0 < alpha <= beta < inf, got [{alpha}, {beta}]"
            )));
        }

        let levels = (beta / alpha).log2().ceil() as usize;
        let mut grids = Vec::with_capacity(levels);
        let mut previous: Option<HyperCube2> = None;
        for i in 0..levels {
            let side = 2f64.powi(i as i32 + 2) * alpha;
            let cube = HyperCube2::new(side, center);
            let cell_width = error * side / (4.0 * 2f64.sqrt());
            grids.push(Grid2::new(cube, cell_width, previous)?);
            previous = Some(cube);
        }
        Ok(Self { center, alpha, beta, grids })
    }

    #[inline]
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    #[inline]
    pub fn beta(&self) -> f64 {
        self.beta
    }

    /// Grid point within `(ε/2)·‖p − u‖` of `p`, in O(1).
    ///
    /// Requires α ≤ ‖p − u‖ ≤ β; outside the annulus the lookup answers
    /// [`Error::OutOfRange`].
    pub fn approximate_point(&self, p: &Point2) -> Result<Point2> {
        let dist = p.distance(&self.center);
        if dist < self.alpha || dist > self.beta {
            return Err(Error::OutOfRange {
                dist,
                alpha: self.alpha,
                beta: self.beta,
            });
        }
        self.snap(p).ok_or_else(|| {
            Error::Degenerate("exponential grid has no levels to snap into".into())
        })
    }

    /// Unguarded snap: level selection per axis, O(1) cell location, nearest
    /// corner. Points nearer than α resolve in level 0; the Fréchet grid
    /// relies on this because its branch bounds only the larger of two
    /// endpoint displacements.
    pub(crate) fn snap(&self, p: &Point2) -> Option<Point2> {
        if self.grids.is_empty() {
            return None;
        }
        let dx = (p.x.raw() - self.center.x.raw()).abs();
        let dy = (p.y.raw() - self.center.y.raw()).abs();
        // log2 of a zero offset is -inf; such an axis simply does not vote.
        // A point sitting exactly on the centre resolves in level 0.
        let level = match (self.axis_level(dx), self.axis_level(dy)) {
            (None, None) => 0,
            (Some(i), None) | (None, Some(i)) => i,
            (Some(i), Some(j)) => i.max(j),
        };
        let level = level.clamp(0, self.grids.len() as i64 - 1) as usize;
        let grid = &self.grids[level];
        let (row, col) = grid.locate(p);
        Some(grid.cell(row, col).find_closest(p))
    }

    #[inline]
    fn axis_level(&self, offset: f64) -> Option<i64> {
        if offset <= 0.0 {
            None
        } else {
            Some(((offset / self.alpha).log2() - 1.0).ceil() as i64)
        }
    }

    /// All distinct grid points over the active cells of every level; the key
    /// set of the Fréchet grid's distance table.
    pub fn points(&self) -> Vec<Point2> {
        let mut set = HashSet::new();
        for grid in &self.grids {
            grid.push_points(&mut set);
        }
        set.into_iter().collect()
    }
}
