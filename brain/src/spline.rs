use derive_new::new;
use itertools::Itertools;
use log::debug;
use nalgebra::{Vector2, Vector3};
use std::{error, fmt};

/// The height at which smoothed path points are placed.
pub const SPLINE_Z: f32 = 70.0;

/// Anything that can serve as a waypoint. Only `x` and `y` are used.
pub trait Waypoint {
    fn xy(&self) -> Vector2<f32>;
}

impl Waypoint for Vector2<f32> {
    fn xy(&self) -> Vector2<f32> {
        *self
    }
}

impl Waypoint for Vector3<f32> {
    fn xy(&self) -> Vector2<f32> {
        Vector2::new(self.x, self.y)
    }
}

impl Waypoint for [f32; 2] {
    fn xy(&self) -> Vector2<f32> {
        Vector2::new(self[0], self[1])
    }
}

impl Waypoint for [f32; 3] {
    fn xy(&self) -> Vector2<f32> {
        Vector2::new(self[0], self[1])
    }
}

/// What to do with sample positions past the last waypoint.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Extrapolation {
    /// Hold the value at the last waypoint.
    Clamp,
    /// Keep following the cubic of the last segment.
    Extend,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SplineError {
    TooFewWaypoints(usize),
    ThresholdCountMismatch { waypoints: usize, thresholds: usize },
    TooFewPoints(usize),
    /// The curve distance must be positive and finite.
    InvalidCurveDistance(f32),
    /// Waypoint `i` has a NaN or infinite coordinate.
    NonFiniteWaypoint(usize),
    /// Threshold `i` is NaN or infinite.
    NonFiniteThreshold(usize),
    /// Every waypoint is in the same place.
    DegenerateGeometry,
    /// Waypoint `i` is in the same place as waypoint `i - 1`.
    CoincidentWaypoints(usize),
}

impl error::Error for SplineError {}

impl fmt::Display for SplineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SplineError::TooFewWaypoints(n) => write!(f, "need at least 2 waypoints, got {}", n),
            SplineError::ThresholdCountMismatch {
                waypoints,
                thresholds,
            } => write!(
                f,
                "{} waypoints but {} thresholds",
                waypoints, thresholds,
            ),
            SplineError::TooFewPoints(n) => write!(f, "need at least 2 points, got {}", n),
            SplineError::InvalidCurveDistance(d) => {
                write!(f, "curve distance must be positive and finite, got {}", d)
            }
            SplineError::NonFiniteWaypoint(i) => write!(f, "waypoint {} is not finite", i),
            SplineError::NonFiniteThreshold(i) => write!(f, "threshold {} is not finite", i),
            SplineError::DegenerateGeometry => write!(f, "all waypoints coincide"),
            SplineError::CoincidentWaypoints(i) => {
                write!(f, "waypoint {} coincides with the one before it", i)
            }
        }
    }
}

impl From<SplineError> for common::Error {
    fn from(err: SplineError) -> Self {
        match err {
            SplineError::TooFewWaypoints(_) => common::Error::InvalidInput("too few waypoints"),
            SplineError::ThresholdCountMismatch { .. } => {
                common::Error::InvalidInput("one threshold per waypoint")
            }
            SplineError::TooFewPoints(_) => common::Error::InvalidInput("too few points"),
            SplineError::InvalidCurveDistance(_) => {
                common::Error::InvalidInput("curve distance must be positive and finite")
            }
            SplineError::NonFiniteWaypoint(_) | SplineError::NonFiniteThreshold(_) => {
                common::Error::InvalidInput("non-finite input")
            }
            SplineError::DegenerateGeometry | SplineError::CoincidentWaypoints(_) => {
                common::Error::DegenerateGeometry
            }
        }
    }
}

#[derive(new, Debug, Clone, PartialEq)]
pub struct SplinePath {
    pub locations: Vec<Vector3<f32>>,
    pub thresholds: Vec<f32>,
}

/// Smooths a list of waypoints into an evenly sampled path.
pub struct SplinePathFinding {
    curve_distance: f32,
    extrapolation: Extrapolation,
}

impl Default for SplinePathFinding {
    fn default() -> Self {
        Self::new()
    }
}

impl SplinePathFinding {
    pub fn new() -> Self {
        Self {
            curve_distance: 20.0,
            extrapolation: Extrapolation::Clamp,
        }
    }

    /// The length the waypoint distances are scaled to before fitting.
    pub fn curve_distance(mut self, curve_distance: f32) -> Self {
        self.curve_distance = curve_distance;
        self
    }

    pub fn extrapolation(mut self, extrapolation: Extrapolation) -> Self {
        self.extrapolation = extrapolation;
        self
    }

    /// Fits curves through `locations` (and the parallel `thresholds`) and
    /// samples them at `num_points` evenly spaced parameter values.
    ///
    /// The sampled span is `(locations.len() - 1) * curve_distance`, which
    /// runs past the last waypoint whenever there are more than two of them.
    /// The extrapolation setting decides what happens out there.
    pub fn calculate(
        &self,
        num_points: usize,
        locations: &[impl Waypoint],
        thresholds: &[f32],
    ) -> Result<SplinePath, SplineError> {
        if locations.len() < 2 {
            return Err(SplineError::TooFewWaypoints(locations.len()));
        }
        if thresholds.len() != locations.len() {
            return Err(SplineError::ThresholdCountMismatch {
                waypoints: locations.len(),
                thresholds: thresholds.len(),
            });
        }
        if num_points < 2 {
            return Err(SplineError::TooFewPoints(num_points));
        }
        if self.curve_distance.is_nan()
            || self.curve_distance <= 0.0
            || self.curve_distance.is_infinite()
        {
            return Err(SplineError::InvalidCurveDistance(self.curve_distance));
        }

        let xys: Vec<_> = locations.iter().map(Waypoint::xy).collect();
        if let Some(i) = xys.iter().position(|p| !p.iter().all(|c| c.is_finite())) {
            return Err(SplineError::NonFiniteWaypoint(i));
        }
        if let Some(i) = thresholds.iter().position(|t| !t.is_finite()) {
            return Err(SplineError::NonFiniteThreshold(i));
        }

        // Knots and evaluation run in f64; only the output is narrowed.
        let distances = rescaled_distances(&xys, f64::from(self.curve_distance))?;

        let max_dist = (xys.len() - 1) as f64 * distances[distances.len() - 1];
        let increment = max_dist / (num_points - 1) as f64;
        let points: Vec<_> = (0..num_points).map(|i| i as f64 * increment).collect();

        debug!(
            "smoothing {} waypoints into {} points over {:.1}",
            xys.len(),
            num_points,
            max_dist,
        );

        let xs: Vec<_> = xys.iter().map(|p| f64::from(p.x)).collect();
        let ys: Vec<_> = xys.iter().map(|p| f64::from(p.y)).collect();
        let ts: Vec<_> = thresholds.iter().map(|&t| f64::from(t)).collect();
        let spline_x = CubicSpline::fit(&distances, &xs)?;
        let spline_y = CubicSpline::fit(&distances, &ys)?;
        let spline_t = CubicSpline::fit(&distances, &ts)?;

        let locations = points
            .iter()
            .map(|&p| {
                Vector3::new(
                    spline_x.eval(p, self.extrapolation),
                    spline_y.eval(p, self.extrapolation),
                    SPLINE_Z,
                )
            })
            .collect();
        let thresholds = points
            .iter()
            .map(|&p| spline_t.eval(p, self.extrapolation))
            .collect();
        Ok(SplinePath::new(locations, thresholds))
    }
}

/// Cumulative L1 distances along the waypoints, scaled so the last one equals
/// `curve_distance`.
fn rescaled_distances(
    xys: &[Vector2<f32>],
    curve_distance: f64,
) -> Result<Vec<f64>, SplineError> {
    let mut distances = Vec::with_capacity(xys.len());
    distances.push(0.0);
    for (i, (a, b)) in xys.iter().tuple_windows().enumerate() {
        let step =
            (f64::from(a.x) - f64::from(b.x)).abs() + (f64::from(a.y) - f64::from(b.y)).abs();
        distances.push(distances[i] + step);
    }

    let total = distances[distances.len() - 1];
    if total == 0.0 {
        return Err(SplineError::DegenerateGeometry);
    }
    // Knots must strictly increase.
    if let Some(i) = distances.iter().tuple_windows().position(|(a, b)| b <= a) {
        return Err(SplineError::CoincidentWaypoints(i + 1));
    }

    let scale = total / curve_distance;
    if !scale.is_normal() {
        return Err(SplineError::DegenerateGeometry);
    }
    Ok(distances.iter().map(|d| d / scale).collect())
}

/// A natural cubic spline through `(xs[i], ys[i])`.
struct CubicSpline {
    xs: Vec<f64>,
    ys: Vec<f64>,
    /// Second derivatives at each knot.
    ms: Vec<f64>,
}

impl CubicSpline {
    /// `xs` must be strictly increasing.
    ///
    /// The second derivatives solve a tridiagonal system, swept once forward
    /// and once back. Both ends have zero curvature.
    fn fit(xs: &[f64], ys: &[f64]) -> Result<Self, SplineError> {
        let n = xs.len();
        let mut c = vec![0.0; n];
        let mut d = vec![0.0; n];
        for i in 1..n - 1 {
            let h0 = xs[i] - xs[i - 1];
            let h1 = xs[i + 1] - xs[i];
            let rhs = 6.0 * ((ys[i + 1] - ys[i]) / h1 - (ys[i] - ys[i - 1]) / h0);
            let pivot = 2.0 * (h0 + h1) - h0 * c[i - 1];
            if pivot == 0.0 || !pivot.is_finite() {
                return Err(SplineError::DegenerateGeometry);
            }
            c[i] = h1 / pivot;
            d[i] = (rhs - h0 * d[i - 1]) / pivot;
        }

        let mut ms = vec![0.0; n];
        for i in (1..n - 1).rev() {
            ms[i] = d[i] - c[i] * ms[i + 1];
        }
        Ok(Self {
            xs: xs.to_vec(),
            ys: ys.to_vec(),
            ms,
        })
    }

    fn eval(&self, x: f64, extrapolation: Extrapolation) -> f32 {
        let last = self.xs.len() - 1;
        if extrapolation == Extrapolation::Clamp {
            if x <= self.xs[0] {
                return self.ys[0] as f32;
            }
            if x >= self.xs[last] {
                return self.ys[last] as f32;
            }
        }

        // Index of the segment containing `x`, or the nearest end segment.
        let i = self
            .xs
            .partition_point(|&k| k <= x)
            .saturating_sub(1)
            .min(last - 1);

        let h = self.xs[i + 1] - self.xs[i];
        let t0 = (self.xs[i + 1] - x) / h;
        let t1 = (x - self.xs[i]) / h;
        let y = t0 * self.ys[i]
            + t1 * self.ys[i + 1]
            + ((t0.powi(3) - t0) * self.ms[i] + (t1.powi(3) - t1) * self.ms[i + 1]) * h * h / 6.0;
        y as f32
    }
}

#[cfg(test)]
mod tests {
    use crate::spline::*;
    use nalgebra::{Vector2, Vector3};

    const EPS: f32 = 1e-3;

    fn non_decreasing(xs: &[f32]) -> bool {
        xs.windows(2).all(|w| w[1] >= w[0] - EPS)
    }

    #[test]
    fn colinear_waypoints() {
        let path = SplinePathFinding::new()
            .curve_distance(20.0)
            .calculate(5, &[[0.0_f32, 0.0], [10.0, 0.0], [20.0, 0.0]], &[0.0, 1.0, 2.0])
            .unwrap();
        println!("{:?}", path);

        let xs: Vec<_> = path.locations.iter().map(|p| p.x).collect();
        assert_eq!(xs.len(), 5);
        assert_eq!(path.thresholds.len(), 5);
        assert!(non_decreasing(&xs));
        assert!(xs[0].abs() < EPS);
        assert!((xs[4] - 20.0).abs() < EPS);
        assert!(path.locations.iter().all(|p| p.y.abs() < EPS));
        assert!(path.locations.iter().all(|p| p.z == SPLINE_Z));
        assert!(non_decreasing(&path.thresholds));
        assert!(path.thresholds[0].abs() < EPS);
        assert!((path.thresholds[4] - 2.0).abs() < EPS);
    }

    #[test]
    fn colinear_waypoints_extended() {
        let path = SplinePathFinding::new()
            .extrapolation(Extrapolation::Extend)
            .calculate(5, &[[0.0_f32, 0.0], [10.0, 0.0], [20.0, 0.0]], &[0.0, 1.0, 2.0])
            .unwrap();
        // Linear data gives a linear spline, which extends in a straight line.
        let expected = [0.0, 10.0, 20.0, 30.0, 40.0];
        for (p, &x) in path.locations.iter().zip(&expected) {
            assert!((p.x - x).abs() < EPS, "{:?}", path.locations);
        }
    }

    #[test]
    fn passes_through_waypoints() {
        // With two waypoints the sampled span matches the curve length, so
        // the first and last samples land on the waypoints.
        let waypoints: [Vector3<f32>; 2] = [Vector3::new(-500.0, 300.0, 17.0), Vector3::new(1000.0, -200.0, 17.0)];
        let path = SplinePathFinding::new()
            .calculate(11, &waypoints, &[100.0, 300.0])
            .unwrap();
        assert!((path.locations[0] - Vector3::new(-500.0, 300.0, SPLINE_Z)).norm() < EPS);
        assert!((path.locations[10] - Vector3::new(1000.0, -200.0, SPLINE_Z)).norm() < EPS);
        assert!((path.thresholds[5] - 200.0).abs() < EPS);
    }

    #[test]
    fn curved_path_hits_interior_waypoint() {
        let waypoints: [Vector2<f32>; 3] = [
            Vector2::new(0.0, 0.0),
            Vector2::new(1000.0, 1000.0),
            Vector2::new(2000.0, 0.0),
        ];
        // Knots land at 0, 10, 20; span is 40, so a step of 5 hits each knot.
        let path = SplinePathFinding::new()
            .calculate(9, &waypoints, &[1.0, 2.0, 3.0])
            .unwrap();
        assert!((path.locations[2] - Vector3::new(1000.0, 1000.0, SPLINE_Z)).norm() < 0.1);
        assert!((path.locations[4] - Vector3::new(2000.0, 0.0, SPLINE_Z)).norm() < 0.1);
        // Beyond the last waypoint everything is held.
        assert_eq!(path.locations[8], path.locations[4]);
        // The middle of the first segment bulges outward.
        assert!(path.locations[1].y > 500.0, "{:?}", path.locations[1]);
    }

    #[test]
    fn validation() {
        let finder = SplinePathFinding::new();
        assert_eq!(
            finder.calculate(5, &[[0.0_f32, 0.0]], &[0.0]),
            Err(SplineError::TooFewWaypoints(1)),
        );
        assert_eq!(
            finder.calculate(5, &[[0.0_f32, 0.0], [1.0, 1.0]], &[0.0]),
            Err(SplineError::ThresholdCountMismatch {
                waypoints: 2,
                thresholds: 1,
            }),
        );
        assert_eq!(
            finder.calculate(1, &[[0.0_f32, 0.0], [1.0, 1.0]], &[0.0, 1.0]),
            Err(SplineError::TooFewPoints(1)),
        );
        assert_eq!(
            SplinePathFinding::new()
                .curve_distance(0.0)
                .calculate(5, &[[0.0_f32, 0.0], [1.0, 1.0]], &[0.0, 1.0]),
            Err(SplineError::InvalidCurveDistance(0.0)),
        );
        assert!(SplinePathFinding::new()
            .curve_distance(std::f32::NAN)
            .calculate(5, &[[0.0_f32, 0.0], [1.0, 1.0]], &[0.0, 1.0])
            .is_err());
    }

    #[test]
    fn non_finite_inputs() {
        let waypoints = [[0.0_f32, 0.0], [10.0, 0.0], [20.0, 0.0]];
        assert_eq!(
            SplinePathFinding::new()
                .curve_distance(std::f32::INFINITY)
                .calculate(5, &waypoints, &[0.0, 1.0, 2.0]),
            Err(SplineError::InvalidCurveDistance(std::f32::INFINITY)),
        );
        let finder = SplinePathFinding::new();
        assert_eq!(
            finder.calculate(5, &[[0.0_f32, 0.0], [std::f32::NAN, 0.0], [20.0, 0.0]], &[0.0, 1.0, 2.0]),
            Err(SplineError::NonFiniteWaypoint(1)),
        );
        assert_eq!(
            finder.calculate(5, &[[0.0_f32, 0.0], [10.0, std::f32::NEG_INFINITY]], &[0.0, 1.0]),
            Err(SplineError::NonFiniteWaypoint(1)),
        );
        assert_eq!(
            finder.calculate(5, &waypoints, &[0.0, 1.0, std::f32::INFINITY]),
            Err(SplineError::NonFiniteThreshold(2)),
        );
    }

    #[test]
    fn tiny_curve_distance_stays_finite() {
        let path = SplinePathFinding::new()
            .curve_distance(1e-40)
            .calculate(5, &[[0.0_f32, 0.0], [10.0, 0.0], [20.0, 0.0]], &[0.0, 1.0, 2.0])
            .unwrap();
        assert!(path.locations.iter().all(|p| p.x.is_finite() && p.y.is_finite()));
        assert!(path.thresholds.iter().all(|t| t.is_finite()));
        assert_eq!(path.locations[4].x, 20.0);
    }

    #[test]
    fn far_apart_waypoints_keep_distinct_knots() {
        // 1e8 + 2 rounds back to 1e8 in f32, but the waypoints are distinct.
        let waypoints = [[0.0_f32, 0.0], [1e8, 0.0], [1e8, 2.0]];
        let path = SplinePathFinding::new()
            .calculate(5, &waypoints, &[0.0, 1.0, 2.0])
            .unwrap();
        println!("{:?}", path);
        assert_eq!(path.locations[0], Vector3::new(0.0, 0.0, SPLINE_Z));
        assert_eq!(path.locations[4], Vector3::new(1e8, 2.0, SPLINE_Z));
        assert!(path.locations.iter().all(|p| p.x.is_finite() && p.y.is_finite()));
    }

    #[test]
    fn many_waypoints() {
        let waypoints: Vec<Vector2<f32>> = (0..5000)
            .map(|i| Vector2::new(i as f32 * 10.0, (i as f32 * 0.1).sin() * 100.0))
            .collect();
        let thresholds: Vec<f32> = (0..5000).map(|i| i as f32).collect();
        let path = SplinePathFinding::new()
            .calculate(200, &waypoints, &thresholds)
            .unwrap();
        assert_eq!(path.locations.len(), 200);
        assert_eq!(path.locations[0], Vector3::new(0.0, 0.0, SPLINE_Z));
        let last = waypoints[4999];
        assert_eq!(path.locations[199], Vector3::new(last.x, last.y, SPLINE_Z));
        assert!(path.locations.iter().all(|p| p.x.is_finite() && p.y.is_finite()));
        assert!(path.thresholds.iter().all(|t| t.is_finite()));
    }

    #[test]
    fn degenerate_waypoints() {
        let finder = SplinePathFinding::new();
        assert_eq!(
            finder.calculate(5, &[[3.0_f32, 4.0], [3.0, 4.0], [3.0, 4.0]], &[0.0, 1.0, 2.0]),
            Err(SplineError::DegenerateGeometry),
        );
        assert_eq!(
            finder.calculate(5, &[[0.0_f32, 0.0], [5.0, 0.0], [5.0, 0.0]], &[0.0, 1.0, 2.0]),
            Err(SplineError::CoincidentWaypoints(2)),
        );
    }

    #[test]
    fn converts_to_common_error() {
        assert_eq!(
            common::Error::from(SplineError::TooFewPoints(0)),
            common::Error::InvalidInput("too few points"),
        );
        assert_eq!(
            common::Error::from(SplineError::CoincidentWaypoints(3)),
            common::Error::DegenerateGeometry,
        );
    }

    #[test]
    fn rescaled_distances_are_l1() {
        let xys = [Vector2::new(0.0, 0.0), Vector2::new(3.0, 4.0), Vector2::new(3.0, 14.0)];
        let distances = rescaled_distances(&xys, 34.0).unwrap();
        assert_eq!(distances, vec![0.0, 14.0, 34.0]);
    }
}
