use super::*;
use crate::error::Error;
use crate::geom::{Edge2, Point2, PolygonalCurve2};

fn p(x: f64, y: f64) -> Point2 {
    Point2::new(x, y)
}

fn edge(x1: f64, y1: f64, x2: f64, y2: f64) -> Edge2 {
    Edge2::new(p(x1, y1), p(x2, y2)).unwrap()
}

fn curve(points: &[(f64, f64)]) -> PolygonalCurve2 {
    PolygonalCurve2::new(points.iter().map(|&(x, y)| p(x, y)).collect()).unwrap()
}

fn init_logs() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn trivial_tree() -> CurveRangeTree {
    CurveRangeTree::new(curve(&[(0.0, 0.0), (3.0, 0.0), (3.0, 3.0)]), 1.0, 1.0).unwrap()
}

fn square_spiral_tree() -> CurveRangeTree {
    CurveRangeTree::new(
        curve(&[
            (0.0, 0.0),
            (5.0, 0.0),
            (5.0, 5.0),
            (1.0, 5.0),
            (1.0, 1.0),
            (4.0, 1.0),
            (4.0, 4.0),
            (2.0, 4.0),
            (2.0, 2.0),
            (3.0, 2.0),
            (3.0, 3.0),
        ]),
        1.0,
        1.0,
    )
    .unwrap()
}

#[test]
fn construction_succeeds_on_a_small_curve() {
    let tree =
        CurveRangeTree::new(curve(&[(-5.0, 1.0), (-4.0, 4.0), (-2.0, -1.0)]), 1.0, 15.0).unwrap();
    assert_eq!(tree.len(), 3);
    assert_eq!(tree.curve().size(), 3);
    assert!(tree.decomposition().is_decomposed());
}

#[test]
fn construction_validates_parameters() {
    let c = curve(&[(0.0, 0.0), (1.0, 0.0)]);
    assert!(matches!(
        CurveRangeTree::new(c.clone(), 0.0, 1.0),
        Err(Error::InvalidInput(_))
    ));
    assert!(matches!(
        CurveRangeTree::new(c.clone(), 1.5, 1.0),
        Err(Error::InvalidInput(_))
    ));
    assert!(matches!(
        CurveRangeTree::new(c.clone(), 1.0, 0.0),
        Err(Error::InvalidInput(_))
    ));
    assert!(matches!(
        CurveRangeTree::with_spacing(c, 1.0, 1.0, -1.0),
        Err(Error::InvalidInput(_))
    ));
}

#[test]
fn leaves_hold_single_edges() {
    let tree = square_spiral_tree();
    let mut leaves = 0;
    for id in (0..tree.len() as u32).map(crate::tree::NodeId) {
        let node = tree.node(id);
        if node.is_leaf() {
            leaves += 1;
            assert_eq!(node.curve.size(), 2);
        } else {
            assert!(node.left.is_some() && node.right.is_some());
        }
    }
    // One leaf per edge of the 11-point input curve.
    assert_eq!(leaves, 10);
}

#[test]
fn query_trivial_curve() {
    init_logs();
    let tree = trivial_tree();

    let q = edge(0.0, -1.0, 3.0, -1.0);
    let x = p(0.25, 0.0);
    let x_edge = edge(0.0, 0.0, 3.0, 0.0);
    let y = p(3.0, 2.5);
    let y_edge = edge(3.0, 0.0, 3.0, 3.0);

    assert!(tree.is_approximate(&q, x, y, &x_edge, &y_edge).unwrap());
}

#[test]
fn query_square_spiral_curve() {
    init_logs();
    let tree = square_spiral_tree();

    let x = p(2.5, 0.0);
    let x_edge = edge(0.0, 0.0, 5.0, 0.0);
    let y = p(3.0, 2.5);
    let y_edge = edge(3.0, 2.0, 3.0, 3.0);

    let q = edge(2.5, -2.0, 5.5, -0.5);
    assert!(tree.is_approximate(&q, x, y, &x_edge, &y_edge).unwrap());

    let q = edge(-1.1, 5.0, -1.1, 1.0);
    assert!(!tree.is_approximate(&q, x, y, &x_edge, &y_edge).unwrap());

    let q = edge(1.0, 2.5, 5.0, 2.5);
    assert!(!tree.is_approximate(&q, x, y, &x_edge, &y_edge).unwrap());

    let q = edge(0.0, 0.0, 5.0, 5.0);
    assert!(!tree.is_approximate(&q, x, y, &x_edge, &y_edge).unwrap());
}

#[test]
fn repeated_queries_are_identical() {
    let tree = trivial_tree();
    let q = edge(0.0, -1.0, 3.0, -1.0);
    let x = p(0.25, 0.0);
    let x_edge = edge(0.0, 0.0, 3.0, 0.0);
    let y = p(3.0, 2.5);
    let y_edge = edge(3.0, 0.0, 3.0, 3.0);

    let first = tree.is_approximate(&q, x, y, &x_edge, &y_edge).unwrap();
    for _ in 0..3 {
        assert_eq!(
            tree.is_approximate(&q, x, y, &x_edge, &y_edge).unwrap(),
            first
        );
    }
}

#[test]
fn partition_path_splits_around_the_lca() {
    let tree = trivial_tree();
    let x = p(0.25, 0.0);
    let y = p(3.0, 2.5);
    let subpaths = tree
        .partition_path(
            x,
            y,
            &edge(0.0, 0.0, 3.0, 0.0),
            &edge(3.0, 0.0, 3.0, 3.0),
        )
        .unwrap();

    // Both leaves are clipped: [x..(3,0)] and [(3,0)..y].
    assert_eq!(subpaths.len(), 2);
    assert_eq!(subpaths[0].first_point(), x);
    assert_eq!(subpaths[0].last_point(), p(3.0, 0.0));
    assert_eq!(subpaths[1].first_point(), p(3.0, 0.0));
    assert_eq!(subpaths[1].last_point(), y);
    assert!(matches!(subpaths[0], Subpath::Clipped(_)));
    assert!(matches!(subpaths[1], Subpath::Clipped(_)));
}

#[test]
fn partition_path_on_a_shared_edge_clips_once() {
    // x and y on the same edge of P: the partition is a single clipped edge.
    let tree = trivial_tree();
    let x = p(0.5, 0.0);
    let y = p(2.5, 0.0);
    let shared = edge(0.0, 0.0, 3.0, 0.0);

    let subpaths = tree.partition_path(x, y, &shared, &shared).unwrap();
    assert_eq!(subpaths.len(), 1);
    assert_eq!(subpaths[0].first_point(), x);
    assert_eq!(subpaths[0].last_point(), y);

    // The query still runs end to end over the single clipped piece.
    let q = edge(0.5, -0.1, 2.5, -0.1);
    assert!(tree.is_approximate(&q, x, y, &shared, &shared).unwrap());
}

#[test]
fn foreign_edge_is_not_found() {
    let tree = trivial_tree();
    let q = edge(0.0, -1.0, 3.0, -1.0);
    let bogus = edge(9.0, 9.0, 10.0, 10.0);
    let result = tree.is_approximate(&q, p(9.5, 9.5), p(3.0, 2.5), &bogus, &edge(3.0, 0.0, 3.0, 3.0));
    assert!(matches!(result, Err(Error::NotFound)));
}

#[test]
fn spiral_partition_is_ordered_along_the_curve() {
    let tree = square_spiral_tree();
    let subpaths = tree
        .partition_path(
            p(2.5, 0.0),
            p(3.0, 2.5),
            &edge(0.0, 0.0, 5.0, 0.0),
            &edge(3.0, 2.0, 3.0, 3.0),
        )
        .unwrap();

    // O(log n) pieces, chained end to end from x to y.
    assert_eq!(subpaths.len(), 7);
    assert_eq!(subpaths[0].first_point(), p(2.5, 0.0));
    assert_eq!(subpaths[subpaths.len() - 1].last_point(), p(3.0, 2.5));
    for pair in subpaths.windows(2) {
        assert_eq!(pair[0].last_point(), pair[1].first_point());
    }
    assert!(matches!(subpaths[0], Subpath::Clipped(_)));
    assert!(matches!(subpaths[subpaths.len() - 1], Subpath::Clipped(_)));
}

#[test]
fn range_tree_decomposition_is_exhaustive() {
    let tree = square_spiral_tree();
    let decomp = tree.decomposition();
    for id in (1..tree.len() as u32).map(crate::tree::NodeId) {
        assert!(decomp.gpar(id).is_some(), "node {id:?} has no gpar");
    }
}
