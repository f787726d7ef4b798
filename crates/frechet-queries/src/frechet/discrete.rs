use crate::geom::PolygonalCurve2;

/// Discrete Fréchet distance between two polygonal curves, O(|p|·|q|).
///
/// Implements the recurrence of Eiter and Mannila, *Computing the Discrete
/// Fréchet Distance*, Table 1, which is stated from index 1:
///
/// ```text
/// ca[1][1] = dist(p1, q1)
/// ca[i][1] = max(ca[i-1][1], dist(pi, q1))      i > 1
/// ca[1][j] = max(ca[1][j-1], dist(p1, qj))      j > 1
/// ca[i][j] = max(min(ca[i-1][j], ca[i-1][j-1], ca[i][j-1]), dist(pi, qj))
/// ```
///
/// The answer is `ca[m-1][n-1]`. The memo table is filled iteratively; its
/// zeroth row and column are never read by the 1-based recurrence and keep
/// the negative "unfilled" sentinel.
pub fn discrete_frechet(p: &PolygonalCurve2, q: &PolygonalCurve2) -> f64 {
    let ps = p.points();
    let qs = q.points();
    let (m, n) = (ps.len(), qs.len());
    let mut ca = vec![-1.0f64; m * n];

    ca[n + 1] = ps[1].distance(&qs[1]);
    for j in 2..n {
        ca[n + j] = ca[n + j - 1].max(ps[1].distance(&qs[j]));
    }
    for i in 2..m {
        ca[i * n + 1] = ca[(i - 1) * n + 1].max(ps[i].distance(&qs[1]));
    }
    for i in 2..m {
        for j in 2..n {
            let reach = ca[(i - 1) * n + j]
                .min(ca[(i - 1) * n + j - 1])
                .min(ca[i * n + j - 1]);
            ca[i * n + j] = reach.max(ps[i].distance(&qs[j]));
        }
    }
    ca[m * n - 1]
}
