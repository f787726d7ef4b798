//! Query path: edge routing, path partitioning and the bottleneck-DAG
//! assembly behind `is_approximate`.

use super::types::{ClippedNode, CurveRangeTree, Subpath};
use crate::dag::Dag;
use crate::error::{Error, Result};
use crate::geom::{Edge2, Point2};
use crate::tree::{lowest_common_ancestor, NodeId};

impl CurveRangeTree {
    /// Whether the Fréchet distance between the segment `q_edge` and the
    /// sub-path of P from `x` to `y` is at most (1 + ε)·δ.
    ///
    /// `x` is assumed to lie on the left side of the path w.r.t. `y`;
    /// `x_edge` / `y_edge` are the edges of P carrying the two points.
    /// Fails with [`Error::NotFound`] when either edge is not part of P.
    pub fn is_approximate(
        &self,
        q_edge: &Edge2,
        x: Point2,
        y: Point2,
        x_edge: &Edge2,
        y_edge: &Edge2,
    ) -> Result<bool> {
        let subpaths = self.partition_path(x, y, x_edge, y_edge)?;
        self.frechet_bottleneck(q_edge, &subpaths)
    }

    /// Split P[x, y] into O(log n) pieces: the clipped sub-edge at x, full
    /// node sub-curves from the walks down both sides of the LCA, and the
    /// clipped sub-edge at y, ordered along P from x to y.
    ///
    /// When x and y lie on the same edge of P the partition is the single
    /// clipped edge from x to y.
    pub fn partition_path(
        &self,
        x: Point2,
        y: Point2,
        x_edge: &Edge2,
        y_edge: &Edge2,
    ) -> Result<Vec<Subpath<'_>>> {
        let x_node = self.find_node(self.root(), x_edge).ok_or(Error::NotFound)?;
        let y_node = self.find_node(self.root(), y_edge).ok_or(Error::NotFound)?;

        if x_node == y_node {
            let clipped = Edge2::new(x, y)?;
            return Ok(vec![Subpath::Clipped(Box::new(ClippedNode::new(
                clipped,
                self.error,
                self.spacing,
            )?))]);
        }

        let lca = lowest_common_ancestor(self, &self.decomp, x_node, y_node)?;

        let mut subpaths = Vec::new();
        if let Some(left) = self.node(lca).left {
            self.walk_left(left, x_edge, x_node, x, &mut subpaths)?;
        }
        if let Some(right) = self.node(lca).right {
            let mut right_subpaths = Vec::new();
            self.walk_right(right, y_edge, y_node, y, &mut right_subpaths)?;
            right_subpaths.reverse();
            subpaths.append(&mut right_subpaths);
        }
        log::debug!("partitioned queried range into {} subpaths", subpaths.len());
        Ok(subpaths)
    }

    /// Assemble the bottleneck DAG over a Steiner subdivision of `q_edge`
    /// and compare the bottleneck weight against (1 + ε)·δ.
    pub fn frechet_bottleneck(&self, q_edge: &Edge2, subpaths: &[Subpath<'_>]) -> Result<bool> {
        let Some(first) = subpaths.first() else {
            return Err(Error::Degenerate("path partition is empty".into()));
        };
        let pi = q_edge.sub_divide(self.error * self.delta / 3.0);

        // Partition point sets around the first point of every tail piece;
        // empty sets drop out.
        let mut partitions: Vec<Vec<Point2>> = Vec::new();
        for subpath in &subpaths[1..] {
            let points = Edge2::partition(&pi, &subpath.first_point(), 2.0 * self.delta);
            if !points.is_empty() {
                partitions.push(points);
            }
        }

        let mut dag = Dag::new();
        for i in 0..partitions.len().saturating_sub(1) {
            let j = i + 1;
            for u in &partitions[i] {
                if *u == q_edge.p2 {
                    continue;
                }
                let towards_end = Edge2::new(*u, q_edge.p2)?;
                for v in &partitions[j] {
                    if u == v || !v.is_on_edge(&towards_end) {
                        continue;
                    }
                    let weight = subpaths[j]
                        .grid()
                        .approximate_frechet(&Edge2::new(*u, *v)?)?;
                    dag.add_edge(*u, *v, weight);
                }
            }
        }

        if let Some(last) = partitions.len().checked_sub(1) {
            for v in &partitions[0] {
                if *v == q_edge.p1 {
                    continue;
                }
                let weight = first
                    .grid()
                    .approximate_frechet(&Edge2::new(q_edge.p1, *v)?)?;
                dag.add_edge(q_edge.p1, *v, weight);
            }
            for u in &partitions[last] {
                if *u == q_edge.p2 {
                    continue;
                }
                let weight = subpaths[last]
                    .grid()
                    .approximate_frechet(&Edge2::new(*u, q_edge.p2)?)?;
                dag.add_edge(*u, q_edge.p2, weight);
            }
        } else {
            // No partition set survived: Q connects to the range through its
            // endpoints alone. Two candidate edges, the first weight wins.
            let w_first = first.grid().approximate_frechet(q_edge)?;
            dag.add_edge(q_edge.p1, q_edge.p2, w_first);
            let w_last = subpaths[subpaths.len() - 1]
                .grid()
                .approximate_frechet(q_edge)?;
            dag.add_edge(q_edge.p1, q_edge.p2, w_last);
        }

        let bottleneck = dag.bottleneck_path_weight(&q_edge.p1, &q_edge.p2);
        log::debug!(
            "query: {} subpaths, {} partition sets, bottleneck {:?}",
            subpaths.len(),
            partitions.len(),
            bottleneck
        );
        Ok(bottleneck.is_some_and(|d| d <= (1.0 + self.error) * self.delta))
    }

    /// Route an edge of P to the leaf holding it; `None` when neither half
    /// contains the edge.
    fn find_node(&self, id: NodeId, edge: &Edge2) -> Option<NodeId> {
        let node = self.node(id);
        if node.is_leaf() {
            return Some(id);
        }
        let left = node.left?;
        let right = node.right?;
        if self.node(left).curve.contains(edge) {
            self.find_node(left, edge)
        } else if self.node(right).curve.contains(edge) {
            self.find_node(right, edge)
        } else {
            None
        }
    }

    /// Descend towards `x_node`; every right sibling passed on the way down
    /// is a fully covered piece. The leaf itself is replaced by the clipped
    /// edge from `x` to the leaf edge's far endpoint.
    fn walk_left<'a>(
        &'a self,
        id: NodeId,
        edge: &Edge2,
        x_node: NodeId,
        x: Point2,
        out: &mut Vec<Subpath<'a>>,
    ) -> Result<()> {
        let node = self.node(id);
        if node.is_leaf() {
            if id == x_node {
                let end = *node
                    .curve
                    .point(1)
                    .ok_or_else(|| Error::Degenerate("leaf curve shorter than an edge".into()))?;
                let clipped = Edge2::new(x, end)?;
                out.push(Subpath::Clipped(Box::new(ClippedNode::new(
                    clipped,
                    self.error,
                    self.spacing,
                )?)));
            } else {
                out.push(Subpath::Full(node));
            }
            return Ok(());
        }

        let (Some(left), Some(right)) = (node.left, node.right) else {
            return Err(Error::Degenerate("internal node is missing a child".into()));
        };
        if self.node(left).curve.contains(edge) {
            self.walk_left(left, edge, x_node, x, out)?;
            out.push(Subpath::Full(self.node(right)));
            Ok(())
        } else if self.node(right).curve.contains(edge) {
            self.walk_left(right, edge, x_node, x, out)
        } else {
            Err(Error::NotFound)
        }
    }

    /// Mirror of `walk_left` towards `y_node`, collecting in reverse order;
    /// the caller flips the list so it runs along P.
    fn walk_right<'a>(
        &'a self,
        id: NodeId,
        edge: &Edge2,
        y_node: NodeId,
        y: Point2,
        out: &mut Vec<Subpath<'a>>,
    ) -> Result<()> {
        let node = self.node(id);
        if node.is_leaf() {
            if id == y_node {
                let start = node.curve.first();
                let clipped = Edge2::new(start, y)?;
                out.push(Subpath::Clipped(Box::new(ClippedNode::new(
                    clipped,
                    self.error,
                    self.spacing,
                )?)));
            } else {
                out.push(Subpath::Full(node));
            }
            return Ok(());
        }

        let (Some(left), Some(right)) = (node.left, node.right) else {
            return Err(Error::Degenerate("internal node is missing a child".into()));
        };
        if self.node(left).curve.contains(edge) {
            self.walk_right(left, edge, y_node, y, out)
        } else if self.node(right).curve.contains(edge) {
            self.walk_right(right, edge, y_node, y, out)?;
            out.push(Subpath::Full(self.node(left)));
            Ok(())
        } else {
            Err(Error::NotFound)
        }
    }
}
