use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::*;
use crate::error::Error;
use crate::geom::{Edge2, Point2, PolygonalCurve2};

fn p(x: f64, y: f64) -> Point2 {
    Point2::new(x, y)
}

fn curve(points: &[(f64, f64)]) -> PolygonalCurve2 {
    PolygonalCurve2::new(points.iter().map(|&(x, y)| p(x, y)).collect()).unwrap()
}

#[test]
fn discrete_frechet_symmetric_curves() {
    let c1 = curve(&[(0.0, 1.0), (3.0, 2.0), (5.0, 2.0), (7.0, 1.0)]);
    let c2 = curve(&[(0.0, 0.0), (3.0, 1.0), (5.0, 1.0), (7.0, 0.0)]);
    assert!((discrete_frechet(&c1, &c2) - 1.0).abs() < 1e-12);
}

#[test]
fn discrete_frechet_asymmetric_curves() {
    let c1 = curve(&[(-5.0, 1.0), (-4.0, 4.0), (-2.0, -1.0)]);
    let c2 = curve(&[(-6.0, 0.0), (-3.0, -2.0), (-2.0, 1.0)]);
    let d = discrete_frechet(&c1, &c2);
    // max(|(-4,4)-(-3,-2)|) = sqrt(37), 6.08 to two decimals
    assert!((d - 37f64.sqrt()).abs() < 1e-9);
}

#[test]
fn discrete_frechet_reflexive() {
    let c = curve(&[(-5.0, 1.0), (-4.0, 4.0), (-2.0, -1.0)]);
    assert_eq!(discrete_frechet(&c, &c), 0.0);
}

proptest! {
    #[test]
    fn discrete_frechet_symmetric(
        a in prop::collection::vec((-50.0f64..50.0, -50.0f64..50.0), 2..8),
        b in prop::collection::vec((-50.0f64..50.0, -50.0f64..50.0), 2..8),
    ) {
        let mut pa: Vec<Point2> = a.iter().map(|&(x, y)| p(x, y)).collect();
        let mut pb: Vec<Point2> = b.iter().map(|&(x, y)| p(x, y)).collect();
        pa.dedup();
        pb.dedup();
        prop_assume!(pa.len() >= 2 && pb.len() >= 2);
        let ca = PolygonalCurve2::new(pa).unwrap();
        let cb = PolygonalCurve2::new(pb).unwrap();
        prop_assert_eq!(discrete_frechet(&ca, &cb), discrete_frechet(&cb, &ca));
    }
}

/// The Fréchet distance between two subdivided edges stays within ±1 (at a
/// spacing of 0.5 and integer inputs) of the smaller of the two max
/// endpoint-pairing distances.
#[test]
fn discrete_frechet_edge_endpoint_bound() {
    let spacing = 0.5;
    let fixed = Edge2::new(p(0.0, 0.0), p(0.0, 1.0))
        .unwrap()
        .to_curve()
        .steiner_curve(spacing);
    let (u, v) = fixed.spine();

    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..10_000 {
        let p1 = p(rng.gen_range(-20..=20) as f64, rng.gen_range(-20..=20) as f64);
        let mut p2 = p(rng.gen_range(-20..=20) as f64, rng.gen_range(-20..=20) as f64);
        if p1 == p2 {
            p2 = p(p2.x.raw() + 0.1, p2.y.raw());
        }

        let rand_edge = Edge2::new(p1, p2).unwrap().to_curve().steiner_curve(spacing);
        let (x, y) = rand_edge.spine();
        let r = (x.distance(&u).max(y.distance(&v))).min(y.distance(&u).max(x.distance(&v)));
        let estimate = discrete_frechet(&fixed, &rand_edge);
        assert!(
            estimate >= r - 1.0 - 1e-9 && estimate <= r + 1.0 + 1e-9,
            "estimate {estimate} strays from endpoint bound {r} for {p1}..{p2}"
        );
    }
}

#[test]
fn exponential_grid_approximation() {
    let u = p(0.0, 0.0);
    let grid = ExponentialGrid2::new(u, 0.05, 1.0, 20.0).unwrap();
    let q = p(1.0, 18.0);
    let snapped = grid.approximate_point(&q).unwrap();
    assert!(q.distance(&snapped) <= (0.05 / 2.0) * q.distance(&u));
}

#[test]
fn exponential_grid_zero_axis_offset() {
    // A zero Δx must not poison the level selection (log2 of 0).
    let u = p(0.0, 0.0);
    let grid = ExponentialGrid2::new(u, 0.05, 1.0, 20.0).unwrap();
    let q = p(0.0, 18.0);
    let snapped = grid.approximate_point(&q).unwrap();
    assert!(q.distance(&snapped) <= (0.05 / 2.0) * q.distance(&u));
}

#[test]
fn exponential_grid_guards_the_annulus() {
    let grid = ExponentialGrid2::new(p(0.0, 0.0), 0.05, 1.0, 20.0).unwrap();
    assert!(matches!(
        grid.approximate_point(&p(25.0, 0.0)),
        Err(Error::OutOfRange { .. })
    ));
    assert!(matches!(
        grid.approximate_point(&p(0.5, 0.0)),
        Err(Error::OutOfRange { .. })
    ));
}

#[test]
fn exponential_grid_rejects_bad_error_rate() {
    assert!(ExponentialGrid2::new(p(0.0, 0.0), 0.0, 1.0, 20.0).is_err());
    assert!(ExponentialGrid2::new(p(0.0, 0.0), 1.5, 1.0, 20.0).is_err());
}

proptest! {
    #[test]
    fn exponential_grid_halves_the_error_everywhere(
        radius in 1.05f64..19.5,
        angle in 0.0f64..std::f64::consts::TAU,
    ) {
        let error = 0.25;
        let u = p(0.0, 0.0);
        let grid = ExponentialGrid2::new(u, error, 1.0, 20.0).unwrap();
        let q = p(radius * angle.cos(), radius * angle.sin());
        let snapped = grid.approximate_point(&q).unwrap();
        prop_assert!(q.distance(&snapped) <= (error / 2.0) * q.distance(&u));
    }
}

#[test]
fn frechet_grid_band_on_a_far_segment() {
    let error = 1.0;
    let c = curve(&[(-5.0, 1.0), (-4.0, 4.0), (-2.0, -1.0)]);
    let e = Edge2::new(p(-20.0, -22.0), p(5.0, 5.0)).unwrap();
    let grid = FrechetGrid2::new(&c, error).unwrap();

    let real = discrete_frechet(
        &e.to_curve().steiner_curve(grid.spacing()),
        &c.steiner_curve(grid.spacing()),
    );
    let estimate = grid.approximate_frechet(&e).unwrap();
    assert!(estimate <= real || real <= (1.0 + error) * estimate);
}

#[test]
fn frechet_grid_band_on_a_single_edge_curve() {
    let error = 1.0;
    let c = curve(&[(-5.0, 1.0), (-4.0, 4.0)]);
    let e = Edge2::new(p(-3.0, 1.0), p(-3.0, 3.0)).unwrap();
    let grid = FrechetGrid2::new(&c, error).unwrap();

    let real = discrete_frechet(
        &e.to_curve().steiner_curve(grid.spacing()),
        &c.steiner_curve(grid.spacing()),
    );
    let estimate = grid.approximate_frechet(&e).unwrap();
    assert!(estimate <= real || real <= (1.0 + error) * estimate);
}

#[test]
fn frechet_grid_short_range_branch() {
    // Spine equals the curve, so L floors to 1 and r stays below εL/2.
    let c = curve(&[(0.0, 0.0), (10.0, 0.0)]);
    let grid = FrechetGrid2::new(&c, 1.0).unwrap();
    assert!((grid.reference_distance() - 1.0).abs() < 1e-12);

    let e = Edge2::new(p(0.2, 0.0), p(10.2, 0.0)).unwrap();
    let estimate = grid.approximate_frechet(&e).unwrap();
    assert!((estimate - 0.8).abs() < 1e-12);
}

#[test]
fn frechet_grid_far_field_branch() {
    let c = curve(&[(0.0, 0.0), (10.0, 0.0)]);
    let grid = FrechetGrid2::new(&c, 1.0).unwrap();
    let e = Edge2::new(p(5.0, 0.0), p(15.0, 0.0)).unwrap();
    // r = 5 is beyond β = 1, the displacement itself is the answer.
    assert!((grid.approximate_frechet(&e).unwrap() - 5.0).abs() < 1e-12);
}

#[test]
fn frechet_grid_table_branch() {
    let error = 1.0;
    let c = curve(&[(0.0, 0.0), (10.0, 0.0)]);
    let grid = FrechetGrid2::new(&c, error).unwrap();

    // r = 0.7 falls strictly between α = 0.5 and β = 1: the precomputed
    // table answers.
    let e = Edge2::new(p(0.7, 0.0), p(10.7, 0.0)).unwrap();
    let estimate = grid.approximate_frechet(&e).unwrap();
    let real = discrete_frechet(
        &e.to_curve().steiner_curve(grid.spacing()),
        &c.steiner_curve(grid.spacing()),
    );
    assert!(estimate > 0.0);
    assert!(estimate <= real || real <= (1.0 + error) * estimate);
}

#[test]
fn frechet_grid_rejects_bad_parameters() {
    let c = curve(&[(0.0, 0.0), (10.0, 0.0)]);
    assert!(FrechetGrid2::new(&c, 0.0).is_err());
    assert!(FrechetGrid2::new(&c, 1.5).is_err());
    assert!(FrechetGrid2::with_spacing(&c, 1.0, 0.0).is_err());
}

#[test]
fn frechet_grid_rejects_closed_curves() {
    // A closed sub-curve has no spine segment to anchor the grids.
    let closed = PolygonalCurve2::new(vec![p(0.0, 0.0), p(1.0, 0.0), p(0.0, 0.0)]).unwrap();
    assert!(matches!(
        FrechetGrid2::new(&closed, 1.0),
        Err(Error::InvalidInput(_))
    ));
}
