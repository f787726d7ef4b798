//! General rooted trees over points, with the decomposition and LCA the
//! curve range tree also builds on.
//!
//! Nodes live in an arena indexed by [`NodeId`]; parent, children and
//! decomposition heads are ids, which removes the ownership cycles of the
//! upward references. The decomposition state is computed once and kept next
//! to the arena, so LCA queries take `&self`.

mod decomp;

pub use decomp::{
    decompose, lowest_common_ancestor, Decomposition, DepthFirst, NodeId, PostOrder, Topology,
};

use crate::error::Result;
use crate::geom::{Point2, PolygonalCurve2};

/// A node of a general rooted tree; carries a point.
#[derive(Clone, Debug)]
pub struct TreeNode {
    pub point: Point2,
    pub parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl TreeNode {
    #[inline]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// Rooted tree with ordered children.
#[derive(Clone, Debug)]
pub struct Tree {
    nodes: Vec<TreeNode>,
    decomp: Decomposition,
}

impl Tree {
    /// A tree consisting of a single root node.
    pub fn new(root: Point2) -> Self {
        Self {
            nodes: vec![TreeNode {
                point: root,
                parent: None,
                children: Vec::new(),
            }],
            decomp: Decomposition::default(),
        }
    }

    #[inline]
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Append a child under `parent`. Any existing decomposition is stale
    /// after a mutation and is dropped.
    pub fn add_child(&mut self, parent: NodeId, point: Point2) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(TreeNode {
            point,
            parent: Some(parent),
            children: Vec::new(),
        });
        self.nodes[parent.index()].children.push(id);
        self.decomp = Decomposition::default();
        id
    }

    #[inline]
    pub fn node(&self, id: NodeId) -> &TreeNode {
        &self.nodes[id.index()]
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        false // a tree always has its root
    }

    /// Run the decomposition if it has not run yet; repeated calls reuse the
    /// stored state.
    pub fn decompose(&mut self) -> &Decomposition {
        if !self.decomp.is_decomposed() {
            let d = decomp::decompose(self);
            self.decomp = d;
        }
        &self.decomp
    }

    /// The decomposition state, if [`Tree::decompose`] has run.
    pub fn decomposition(&self) -> Option<&Decomposition> {
        self.decomp.is_decomposed().then_some(&self.decomp)
    }

    pub fn lowest_common_ancestor(&self, u: NodeId, v: NodeId) -> Result<NodeId> {
        decomp::lowest_common_ancestor(self, &self.decomp, u, v)
    }

    pub fn depth_first(&self) -> DepthFirst<'_, Self> {
        DepthFirst::new(self)
    }

    pub fn post_order(&self) -> PostOrder<'_, Self> {
        PostOrder::new(self)
    }

    pub fn leaves(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.post_order().filter(|id| self.node(*id).is_leaf())
    }

    /// The decomposition curves as point curves (head first).
    pub fn embedded_curves(&self) -> Result<Vec<PolygonalCurve2>> {
        self.decomp
            .curves
            .iter()
            .map(|curve| {
                PolygonalCurve2::new(curve.iter().map(|id| self.node(*id).point).collect())
            })
            .collect()
    }
}

impl Topology for Tree {
    fn node_count(&self) -> usize {
        self.nodes.len()
    }

    fn root(&self) -> NodeId {
        Tree::root(self)
    }

    fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.index()].parent
    }

    fn children(&self, id: NodeId) -> Vec<NodeId> {
        self.nodes[id.index()].children.clone()
    }
}
