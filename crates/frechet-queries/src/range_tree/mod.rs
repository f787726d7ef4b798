//! Curve Range Tree: binary recursive decomposition of a polygonal curve
//! with a Fréchet grid per node, answering approximate Fréchet-matching
//! range queries.
//!
//! Purpose
//! - Decompose the input curve P into a binary tree of sub-curves, each node
//!   carrying a precomputed [`crate::frechet::FrechetGrid2`].
//! - Answer, for a query segment Q and points x, y on P, whether the Fréchet
//!   distance between Q and the sub-path P[x, y] is at most (1 + ε)·δ, in
//!   O((log n)/ε²) time: LCA on the tree of curves turns x..y into O(log n)
//!   node sub-curves, whose grids weight a bottleneck-path DAG over a Steiner
//!   subdivision of Q.
//!
//! References
//! - Smid, Gudmundsson: *Fast Algorithms for Approximate Fréchet Matching
//!   Queries in Geometric Trees*, Lemma 2.
//! - Code cross-refs: `frechet::{FrechetGrid2, discrete_frechet}`,
//!   `tree::{decompose, lowest_common_ancestor}`, `dag::Dag`.

mod build;
mod query;
mod types;

pub use types::{ClippedNode, CurveRangeTree, RangeNode, Subpath};

#[cfg(test)]
mod tests;
