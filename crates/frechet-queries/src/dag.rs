//! Weighted DAG over points with a bottleneck-path query.
//!
//! `add_edge` keeps the graph acyclic relative to what is already present:
//! an edge a → b is refused while b → a exists, and the first weight wins for
//! a repeated (a, b). `bottleneck_path_weight` answers the minimum over s → t
//! paths of the maximum edge weight on the path, via a monotone Dijkstra with
//! max-plus relaxation: `d[v] = min over incoming (u, v, w) of max(d[u], w)`.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};

use noisy_float::prelude::*;

use crate::geom::Point2;

#[derive(Clone, Debug, Default)]
pub struct Dag {
    adj: HashMap<Point2, Vec<(Point2, f64)>>,
}

impl Dag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a vertex; returns whether it was new.
    pub fn add_vertex(&mut self, p: Point2) -> bool {
        match self.adj.entry(p) {
            std::collections::hash_map::Entry::Occupied(_) => false,
            std::collections::hash_map::Entry::Vacant(e) => {
                e.insert(Vec::new());
                true
            }
        }
    }

    /// Add a → b with weight `w`. Returns false (and leaves the graph
    /// unchanged) when b → a already exists or when a → b was added before.
    pub fn add_edge(&mut self, a: Point2, b: Point2, w: f64) -> bool {
        if self
            .adj
            .get(&b)
            .is_some_and(|out| out.iter().any(|(to, _)| *to == a))
        {
            return false;
        }
        let out = self.adj.entry(a).or_default();
        if out.iter().any(|(to, _)| *to == b) {
            return false;
        }
        out.push((b, w));
        true
    }

    #[inline]
    pub fn contains_vertex(&self, p: &Point2) -> bool {
        self.adj.contains_key(p)
    }

    /// Outgoing edges of `p`, in insertion order.
    pub fn edges_from(&self, p: &Point2) -> &[(Point2, f64)] {
        self.adj.get(p).map_or(&[], Vec::as_slice)
    }

    /// Minimum over s → t paths of the maximum edge weight on the path;
    /// `None` when t is unreachable from s.
    pub fn bottleneck_path_weight(&self, s: &Point2, t: &Point2) -> Option<f64> {
        if s == t {
            return Some(0.0);
        }

        let mut best: HashMap<Point2, f64> = HashMap::new();
        let mut heap: BinaryHeap<Reverse<(N64, Point2)>> = BinaryHeap::new();
        best.insert(*s, f64::NEG_INFINITY);
        heap.push(Reverse((n64(f64::NEG_INFINITY), *s)));

        while let Some(Reverse((d, p))) = heap.pop() {
            let d = d.raw();
            if p == *t {
                return Some(d);
            }
            if best.get(&p).is_some_and(|b| d > *b) {
                continue; // stale heap entry
            }
            for (next, w) in self.edges_from(&p) {
                let candidate = d.max(*w);
                if best.get(next).map_or(true, |b| candidate < *b) {
                    best.insert(*next, candidate);
                    heap.push(Reverse((n64(candidate), *next)));
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    #[test]
    fn bottleneck_weight_easy_dag() {
        let mut dag = Dag::new();
        let (p1, p2, p3) = (p(0.0, 0.0), p(1.0, 0.0), p(2.0, 0.0));
        assert!(dag.add_edge(p1, p2, 1.0));
        assert!(dag.add_edge(p2, p3, 2.0));
        assert_eq!(dag.bottleneck_path_weight(&p1, &p3), Some(2.0));
    }

    #[test]
    fn bottleneck_weight_hard_dag() {
        let mut dag = Dag::new();
        let p1 = p(0.0, 0.0);
        let p2 = p(1.0, 0.0);
        let p3 = p(2.0, 0.0);
        let p4 = p(3.0, 0.0);
        let p5 = p(1.0, -1.0);
        let p6 = p(2.0, -1.0);

        dag.add_edge(p1, p2, 1.0);
        dag.add_edge(p2, p3, 2.0);
        dag.add_edge(p3, p4, 1.0);
        dag.add_edge(p2, p6, 3.0);
        dag.add_edge(p1, p5, 2.0);
        dag.add_edge(p5, p6, 5.0);
        dag.add_edge(p6, p4, 6.0);

        assert_eq!(dag.bottleneck_path_weight(&p1, &p4), Some(2.0));
    }

    #[test]
    fn reverse_edge_is_refused() {
        let mut dag = Dag::new();
        let (a, b) = (p(0.0, 0.0), p(1.0, 1.0));
        assert!(dag.add_edge(a, b, 1.0));
        assert!(!dag.add_edge(b, a, 9.0));
        assert!(dag.edges_from(&b).is_empty());
    }

    #[test]
    fn first_weight_wins() {
        let mut dag = Dag::new();
        let (a, b) = (p(0.0, 0.0), p(1.0, 1.0));
        assert!(dag.add_edge(a, b, 1.0));
        assert!(!dag.add_edge(a, b, 5.0));
        assert_eq!(dag.bottleneck_path_weight(&a, &b), Some(1.0));
    }

    #[test]
    fn unreachable_target_is_none() {
        let mut dag = Dag::new();
        let (a, b, c) = (p(0.0, 0.0), p(1.0, 0.0), p(2.0, 0.0));
        dag.add_edge(a, b, 1.0);
        dag.add_vertex(c);
        assert_eq!(dag.bottleneck_path_weight(&a, &c), None);
    }

    #[test]
    fn source_equals_target() {
        let mut dag = Dag::new();
        let a = p(0.0, 0.0);
        dag.add_vertex(a);
        assert_eq!(dag.bottleneck_path_weight(&a, &a), Some(0.0));
    }
}
