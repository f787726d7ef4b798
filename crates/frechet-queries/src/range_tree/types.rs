//! Data types for the curve range tree and its query-time path pieces.

use crate::frechet::FrechetGrid2;
use crate::geom::{Edge2, Point2, PolygonalCurve2};
use crate::tree::{Decomposition, NodeId, Topology};

/// One node of the range tree: a sub-curve of P with its Fréchet grid.
/// Leaves hold size-2 curves (single edges of P).
#[derive(Clone, Debug)]
pub struct RangeNode {
    pub parent: Option<NodeId>,
    pub left: Option<NodeId>,
    pub right: Option<NodeId>,
    pub curve: PolygonalCurve2,
    pub grid: FrechetGrid2,
}

impl RangeNode {
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}

/// Binary tree over sub-curves of an immutable curve P.
///
/// Nodes live in an arena in pre-order (the root is id 0); the generic tree
/// decomposition runs over this arena at construction so that queries can use
/// the O(log n) LCA.
#[derive(Clone, Debug)]
pub struct CurveRangeTree {
    pub(super) nodes: Vec<RangeNode>,
    pub(super) error: f64,
    pub(super) delta: f64,
    pub(super) spacing: f64,
    pub(super) decomp: Decomposition,
}

impl CurveRangeTree {
    #[inline]
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    #[inline]
    pub fn node(&self, id: NodeId) -> &RangeNode {
        &self.nodes[id.index()]
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        false // construction guarantees at least the root
    }

    #[inline]
    pub fn error(&self) -> f64 {
        self.error
    }

    #[inline]
    pub fn delta(&self) -> f64 {
        self.delta
    }

    #[inline]
    pub fn decomposition(&self) -> &Decomposition {
        &self.decomp
    }

    /// The whole input curve P.
    #[inline]
    pub fn curve(&self) -> &PolygonalCurve2 {
        &self.nodes[0].curve
    }
}

impl Topology for CurveRangeTree {
    fn node_count(&self) -> usize {
        self.nodes.len()
    }

    fn root(&self) -> NodeId {
        CurveRangeTree::root(self)
    }

    fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.index()].parent
    }

    fn children(&self, id: NodeId) -> Vec<NodeId> {
        let node = &self.nodes[id.index()];
        node.left.into_iter().chain(node.right).collect()
    }
}

/// A synthetic path piece produced only during path walks: the clipped
/// leftmost/rightmost sub-edge, with a Fréchet grid built at query time.
#[derive(Clone, Debug)]
pub struct ClippedNode {
    pub edge: Edge2,
    pub grid: FrechetGrid2,
}

impl ClippedNode {
    pub(super) fn new(edge: Edge2, error: f64, spacing: f64) -> crate::error::Result<Self> {
        let grid = FrechetGrid2::with_spacing(&edge.to_curve(), error, spacing)?;
        Ok(Self { edge, grid })
    }
}

/// One element of a path partition: either a full node sub-curve of the tree
/// or a clipped sub-edge at the ends of the queried range.
#[derive(Clone, Debug)]
pub enum Subpath<'a> {
    Full(&'a RangeNode),
    Clipped(Box<ClippedNode>),
}

impl Subpath<'_> {
    /// First point of the piece's curve; the centre of its partition set.
    #[inline]
    pub fn first_point(&self) -> Point2 {
        match self {
            Subpath::Full(node) => node.curve.first(),
            Subpath::Clipped(clip) => clip.edge.p1,
        }
    }

    /// Last point of the piece's curve.
    #[inline]
    pub fn last_point(&self) -> Point2 {
        match self {
            Subpath::Full(node) => node.curve.last(),
            Subpath::Clipped(clip) => clip.edge.p2,
        }
    }

    /// The Fréchet grid weighting DAG edges for this piece.
    #[inline]
    pub fn grid(&self) -> &FrechetGrid2 {
        match self {
            Subpath::Full(node) => &node.grid,
            Subpath::Clipped(clip) => &clip.grid,
        }
    }
}
