//! Heavy-path-style tree decomposition and LCA, shared between the general
//! point tree and the curve range tree through a minimal topology trait.
//!
//! The decomposition walks the tree depth-first, maintaining a stack of nodes
//! belonging to one downward curve. The stack is closed (a curve emitted)
//! when the next node's ℓ = ⌊log₂ size⌋ differs from the top of the stack, or
//! when the walk jumped siblings. On close the stack head's parent is
//! prepended and becomes the `gpar` of every node in the curve. Any
//! root-to-node walk then crosses O(log n) curve boundaries, which is what
//! makes the parent-sequence LCA O(log n).

use std::collections::HashSet;

use crate::error::{Error, Result};

/// Arena index of a tree node. All parent/child/gpar references are ids into
/// the owning tree's node vector, which keeps the upward references of the
/// decomposition free of ownership cycles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

impl NodeId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// The tree shape the decomposition needs: a root, upward parent links and
/// ordered child lists.
pub trait Topology {
    fn node_count(&self) -> usize;
    fn root(&self) -> NodeId;
    fn parent(&self, id: NodeId) -> Option<NodeId>;
    fn children(&self, id: NodeId) -> Vec<NodeId>;
}

/// Per-node decomposition state plus the emitted curves (as node-id lists,
/// each starting with its head).
///
/// Invariant after [`decompose`]: every non-root node has a `gpar`, and every
/// non-root node appears in exactly one curve as a non-head member.
#[derive(Clone, Debug, Default)]
pub struct Decomposition {
    pub size: Vec<usize>,
    pub ell: Vec<u32>,
    pub gpar: Vec<Option<NodeId>>,
    pub curves: Vec<Vec<NodeId>>,
}

impl Decomposition {
    #[inline]
    pub fn is_decomposed(&self) -> bool {
        !self.gpar.is_empty()
    }

    #[inline]
    pub fn gpar(&self, id: NodeId) -> Option<NodeId> {
        self.gpar.get(id.index()).copied().flatten()
    }

    #[inline]
    pub fn size(&self, id: NodeId) -> usize {
        self.size[id.index()]
    }

    #[inline]
    pub fn ell(&self, id: NodeId) -> u32 {
        self.ell[id.index()]
    }
}

/// Depth-first traversal with an explicit stack and visited set; adjacent
/// nodes (parent, then children in order) are pushed together, so children
/// are explored last-first.
pub struct DepthFirst<'a, T: Topology> {
    topo: &'a T,
    stack: Vec<NodeId>,
    visited: HashSet<NodeId>,
}

impl<'a, T: Topology> DepthFirst<'a, T> {
    pub fn new(topo: &'a T) -> Self {
        Self {
            topo,
            stack: vec![topo.root()],
            visited: HashSet::new(),
        }
    }
}

impl<T: Topology> Iterator for DepthFirst<'_, T> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        while let Some(next) = self.stack.pop() {
            if self.visited.insert(next) {
                if let Some(parent) = self.topo.parent(next) {
                    self.stack.push(parent);
                }
                self.stack.extend(self.topo.children(next));
                return Some(next);
            }
        }
        None
    }
}

/// Post-order traversal with an explicit (node, next-child) stack.
pub struct PostOrder<'a, T: Topology> {
    topo: &'a T,
    stack: Vec<(NodeId, usize)>,
}

impl<'a, T: Topology> PostOrder<'a, T> {
    pub fn new(topo: &'a T) -> Self {
        Self {
            topo,
            stack: vec![(topo.root(), 0)],
        }
    }
}

impl<T: Topology> Iterator for PostOrder<'_, T> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        loop {
            let (id, cursor) = *self.stack.last()?;
            let children = self.topo.children(id);
            if cursor < children.len() {
                self.stack.last_mut()?.1 += 1;
                self.stack.push((children[cursor], 0));
            } else {
                self.stack.pop();
                return Some(id);
            }
        }
    }
}

fn close_curve<T: Topology>(
    topo: &T,
    stack: &mut Vec<NodeId>,
    gpar: &mut [Option<NodeId>],
    curves: &mut Vec<Vec<NodeId>>,
) {
    // The stack never holds the root, so the head's parent exists.
    let Some(head) = topo.parent(stack[0]) else {
        stack.clear();
        return;
    };
    let mut curve = Vec::with_capacity(stack.len() + 1);
    curve.push(head);
    curve.append(stack);
    for &node in &curve {
        gpar[node.index()] = Some(head);
    }
    curves.push(curve);
}

/// Decompose a rooted tree into downward curves.
pub fn decompose<T: Topology>(topo: &T) -> Decomposition {
    let n = topo.node_count();
    let mut size = vec![0usize; n];
    let mut ell = vec![0u32; n];

    // Pass 1: subtree sizes and their magnitudes, bottom-up.
    for id in PostOrder::new(topo) {
        let children = topo.children(id);
        size[id.index()] = if children.is_empty() {
            1
        } else {
            children.iter().map(|c| size[c.index()]).sum()
        };
        ell[id.index()] = size[id.index()].ilog2();
    }

    // Pass 2: emit curves along the depth-first walk.
    let mut gpar: Vec<Option<NodeId>> = vec![None; n];
    let mut curves: Vec<Vec<NodeId>> = Vec::new();
    let root = topo.root();
    let mut stack: Vec<NodeId> = Vec::new();
    let mut last = root;

    for node in DepthFirst::new(topo) {
        if node == root {
            last = node;
            continue;
        }
        if let Some(&top) = stack.last() {
            if ell[node.index()] != ell[top.index()] || topo.parent(node) != Some(last) {
                close_curve(topo, &mut stack, &mut gpar, &mut curves);
            }
        }
        last = node;
        stack.push(node);
    }
    if !stack.is_empty() {
        close_curve(topo, &mut stack, &mut gpar, &mut curves);
    }

    log::debug!("decomposed {} nodes into {} curves", n, curves.len());
    Decomposition {
        size,
        ell,
        gpar,
        curves,
    }
}

/// Sequence [node, gpar(node), gpar(parent(·)), …] climbing to the root, with
/// the topmost element repeated.
fn parent_sequence<T: Topology>(
    topo: &T,
    decomp: &Decomposition,
    node: NodeId,
) -> Result<Vec<NodeId>> {
    let gpar_of = |id: NodeId| {
        decomp.gpar(id).ok_or_else(|| {
            Error::InvalidInput("tree must be decomposed prior to computing the LCA".into())
        })
    };

    let mut seq = vec![node, gpar_of(node)?];
    // The gpar chain strictly decreases depth; the cap guards against a
    // corrupted decomposition turning this into an endless climb.
    for _ in 0..=topo.node_count() {
        match topo.parent(seq[seq.len() - 1]) {
            Some(parent) => seq.push(gpar_of(parent)?),
            None => {
                let top = seq[seq.len() - 1];
                seq.push(top);
                return Ok(seq);
            }
        }
    }
    Err(Error::Degenerate(
        "gpar chain does not terminate at the root".into(),
    ))
}

/// Lowest common ancestor on a decomposed tree, O(log n).
///
/// Neither input may be the root, the inputs must be distinct, and the tree
/// must be decomposed. The parent sequences of both nodes are compared from
/// the top; the first differing position selects one of four cases resolved
/// by a subtree-size tie-break between the branch-off points.
pub fn lowest_common_ancestor<T: Topology>(
    topo: &T,
    decomp: &Decomposition,
    u: NodeId,
    v: NodeId,
) -> Result<NodeId> {
    let root = topo.root();
    if u == root || v == root {
        return Err(Error::InvalidInput(
            "input nodes cannot be the root node".into(),
        ));
    }
    if u == v {
        return Err(Error::InvalidInput("input nodes must be distinct".into()));
    }

    let u_seq = parent_sequence(topo, decomp, u)?;
    let v_seq = parent_sequence(topo, decomp, v)?;
    let (i, j) = (u_seq.len(), v_seq.len());

    let mut k = 0;
    while k < i && k < j && u_seq[i - 1 - k] == v_seq[j - 1 - k] {
        k += 1;
    }

    let size = |id: NodeId| decomp.size(id);
    // Size of a node's parent; only the root lacks one, and the root's side
    // then dominates the tie-break.
    let parent_size = |id: NodeId| topo.parent(id).map_or(usize::MAX, size);

    if k == i && k == j {
        Ok(if size(u) >= size(v) { u } else { v })
    } else if k == i {
        Ok(if size(u) >= parent_size(v_seq[j - 1 - k]) { u } else { v })
    } else if k == j {
        Ok(if size(v) >= parent_size(u_seq[i - 1 - k]) { v } else { u })
    } else {
        match (topo.parent(u_seq[i - 1 - k]), topo.parent(v_seq[j - 1 - k])) {
            (Some(pu), Some(pv)) => Ok(if size(pu) >= size(pv) { pu } else { pv }),
            (Some(pu), None) => Ok(pu),
            (None, Some(pv)) => Ok(pv),
            (None, None) => Err(Error::Degenerate(
                "both branch-off points lack a parent".into(),
            )),
        }
    }
}
