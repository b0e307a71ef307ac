use std::error::Error;
use std::fmt::Display;

use nalgebra::{DMatrix, DVector};

use crate::realiterator::FloatIterator;

/// Natural cubic spline through strictly increasing knots.
///
/// Construction solves the tridiagonal system for the second derivative
/// at each knot, with zero curvature at both ends; evaluation uses the
/// two-point form on the bracketing interval.
pub struct CubicSpline {
    x: Vec<f64>,
    y: Vec<f64>,
    y2: Vec<f64>,
}

impl CubicSpline {
    pub fn new(x: Vec<f64>, y: Vec<f64>) -> Result<CubicSpline, Box<dyn Error>> {
        if x.len() != y.len() {
            return Err(Box::new(SplineError(format!(
                "x and y lengths differ: {} vs {}",
                x.len(),
                y.len()
            ))));
        }
        if x.len() < 2 {
            return Err(Box::new(SplineError(
                "spline must have at least 2 knots".to_string(),
            )));
        }
        if x.windows(2).any(|w| w[1] - w[0] < 1e-16) {
            return Err(Box::new(SplineError(
                "knot x values must be strictly increasing".to_string(),
            )));
        }

        let n = x.len();
        let mut matrix = DMatrix::<f64>::zeros(n, n);
        let mut rhs = DVector::<f64>::zeros(n);
        matrix[(0, 0)] = 1.0;
        matrix[(n - 1, n - 1)] = 1.0;
        for i in 1..n - 1 {
            let h0 = x[i] - x[i - 1];
            let h1 = x[i + 1] - x[i];
            matrix[(i, i - 1)] = h0;
            matrix[(i, i)] = 2.0 * (h0 + h1);
            matrix[(i, i + 1)] = h1;
            rhs[i] = 6.0 * ((y[i + 1] - y[i]) / h1 - (y[i] - y[i - 1]) / h0);
        }

        let y2: Vec<f64> = match matrix.lu().solve(&rhs) {
            Some(solution) => solution.iter().cloned().collect(),
            None => {
                return Err(Box::new(SplineError(
                    "error while solving set of equations".to_string(),
                )))
            }
        };
        Ok(CubicSpline { x, y, y2 })
    }

    /// Evaluates the spline at `x`; outside the knot range the boundary
    /// interval polynomial extends the curve.
    pub fn evaluate(&self, x: f64) -> f64 {
        let n = self.x.len();
        let hi = match self.x.partition_point(|&v| v < x) {
            0 => 1,
            i if i >= n => n - 1,
            i => i,
        };
        let lo = hi - 1;
        let h = self.x[hi] - self.x[lo];
        let a = (self.x[hi] - x) / h;
        let b = (x - self.x[lo]) / h;
        a * self.y[lo]
            + b * self.y[hi]
            + ((a * a * a - a) * self.y2[lo] + (b * b * b - b) * self.y2[hi]) * h * h / 6.0
    }

    /// Samples the spline at the given step over [first knot, last knot),
    /// upper bound excluded.
    pub fn dense_sample(&self, step: f64) -> Vec<(f64, f64)> {
        FloatIterator::new_with_step(self.x[0], self.x[self.x.len() - 1], step)
            .map(|x| (x, self.evaluate(x)))
            .collect()
    }
}

#[derive(Debug)]
pub struct SplineError(String);

impl Error for SplineError {}

impl Display for SplineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn passes_through_knots() {
        let x = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let y = vec![2.0, 3.0, 5.0, 4.0, 1.0];
        let spline = CubicSpline::new(x.clone(), y.clone()).unwrap();
        for (xi, yi) in x.iter().zip(y.iter()) {
            assert_approx_eq!(spline.evaluate(*xi), *yi, 1e-10);
        }
    }

    #[test]
    fn reproduces_linear_data() {
        let x = vec![0.0, 1.0, 2.0, 3.0];
        let y: Vec<f64> = x.iter().map(|v| 2.0 * v + 0.5).collect();
        let spline = CubicSpline::new(x, y).unwrap();
        assert_approx_eq!(spline.evaluate(0.5), 1.5, 1e-10);
        assert_approx_eq!(spline.evaluate(2.75), 6.0, 1e-10);
        // boundary polynomial extends the line outside the knots
        assert_approx_eq!(spline.evaluate(3.5), 7.5, 1e-10);
    }

    #[test]
    fn two_knots_degenerate_to_a_segment() {
        let spline = CubicSpline::new(vec![1.5, 2.5], vec![3.1, 3.3]).unwrap();
        assert_approx_eq!(spline.evaluate(2.0), 3.2, 1e-10);
    }

    #[test]
    fn dense_sample_is_half_open() {
        let x = vec![1.0, 2.0, 3.0];
        let y = vec![2.0, 3.0, 2.5];
        let spline = CubicSpline::new(x, y).unwrap();
        let curve = spline.dense_sample(0.01);
        assert_eq!(curve.len(), ((3.0_f64 - 1.0) / 0.01).floor() as usize);
        assert_approx_eq!(curve[0].0, 1.0);
        assert_approx_eq!(curve[0].1, 2.0, 1e-10);
        for (x, _) in &curve {
            assert!(*x >= 1.0 && *x < 3.0);
        }
    }

    #[test]
    fn rejects_length_mismatch() {
        assert!(CubicSpline::new(vec![1.0, 2.0], vec![1.0]).is_err());
    }

    #[test]
    fn rejects_single_knot() {
        assert!(CubicSpline::new(vec![1.0], vec![1.0]).is_err());
    }

    #[test]
    fn rejects_duplicate_knots() {
        assert!(CubicSpline::new(vec![1.0, 1.0, 2.0], vec![1.0, 2.0, 3.0]).is_err());
    }

    #[test]
    fn rejects_decreasing_knots() {
        assert!(CubicSpline::new(vec![2.0, 1.0], vec![1.0, 2.0]).is_err());
    }
}
