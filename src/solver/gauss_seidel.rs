//! Gauss-Seidel fixed-point iteration.

use tracing::{trace, warn};

use crate::error::{Result, SeidelError};
use crate::matrix::Matrix;

use super::{DEFAULT_MAX_ITERATIONS, DEFAULT_TOLERANCE};

/// Outcome of a Gauss-Seidel run.
#[derive(Debug, Clone, PartialEq)]
pub struct Iterate {
    /// Last computed estimate
    pub x: Vec<f64>,
    /// Sweeps performed (at least 1)
    pub iterations: usize,
    /// `|x_i^(k) - x_i^(k-1)|` from the last sweep
    pub errors: Vec<f64>,
    /// Whether the largest error fell below the tolerance
    pub converged: bool,
}

impl Iterate {
    /// Largest entry of the error vector, NaN if any entry is NaN.
    pub fn max_error(&self) -> f64 {
        largest_error(&self.errors)
    }
}

/// Largest per-variable change. A NaN change wins, so an overflowed run can
/// never pass the `< tolerance` test.
pub(crate) fn largest_error(errors: &[f64]) -> f64 {
    errors
        .iter()
        .copied()
        .fold(0.0, |max, e| if e.is_nan() || e > max { e } else { max })
}

/// Gauss-Seidel solver settings.
#[derive(Debug, Clone)]
pub struct GaussSeidel {
    /// Maximum number of sweeps
    pub max_iterations: usize,
    /// Convergence threshold on the largest per-variable change
    pub tolerance: f64,
}

impl Default for GaussSeidel {
    fn default() -> Self {
        Self::new()
    }
}

impl GaussSeidel {
    /// Create a solver with default settings.
    pub fn new() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
            tolerance: DEFAULT_TOLERANCE,
        }
    }

    /// Set the convergence tolerance.
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Set the iteration cap.
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Check that the settings describe a finite, meaningful run.
    pub fn validate(&self) -> Result<()> {
        if !(self.tolerance.is_finite() && self.tolerance > 0.0) {
            return Err(SeidelError::invalid_input(format!(
                "tolerance must be a positive number, got {}",
                self.tolerance
            )));
        }
        if self.max_iterations == 0 {
            return Err(SeidelError::invalid_input("max_iterations must be at least 1"));
        }
        Ok(())
    }

    /// Iterate from the zero vector until the largest change drops below the
    /// tolerance or the cap is reached.
    ///
    /// Reaching the cap is not an error: the last estimate is returned with
    /// `converged == false`. A zero pivot fails with [`SeidelError::PivotZero`].
    pub fn solve(&self, matrix: &Matrix, rhs: &[f64]) -> Result<Iterate> {
        self.validate()?;
        let n = matrix.size();
        if rhs.len() != n {
            return Err(SeidelError::dimension_mismatch("right-hand side", n, rhs.len()));
        }

        let mut x = vec![0.0; n];
        let mut prev = vec![0.0; n];
        let mut errors = vec![0.0; n];

        for k in 1..=self.max_iterations {
            sweep(matrix, rhs, &prev, &mut x)?;

            for ((e, new), old) in errors.iter_mut().zip(&x).zip(&prev) {
                *e = (new - old).abs();
            }
            let max_error = largest_error(&errors);
            trace!(iteration = k, max_error, "gauss-seidel sweep");

            if max_error < self.tolerance {
                return Ok(Iterate {
                    x,
                    iterations: k,
                    errors,
                    converged: true,
                });
            }

            prev.copy_from_slice(&x);
        }

        warn!(
            max_iterations = self.max_iterations,
            tolerance = self.tolerance,
            "gauss-seidel stopped at the iteration cap without converging"
        );
        Ok(Iterate {
            x,
            iterations: self.max_iterations,
            errors,
            converged: false,
        })
    }
}

/// One in-place sweep: rows in order, fresh values below the diagonal and
/// values from `prev` above it.
fn sweep(matrix: &Matrix, rhs: &[f64], prev: &[f64], x: &mut [f64]) -> Result<()> {
    let n = matrix.size();
    for i in 0..n {
        let row = matrix.row(i);
        let pivot = row[i];
        if pivot == 0.0 {
            return Err(SeidelError::PivotZero { row: i + 1 });
        }

        let lower: f64 = (0..i).map(|j| row[j] * x[j]).sum();
        let upper: f64 = ((i + 1)..n).map(|j| row[j] * prev[j]).sum();
        x[i] = (rhs[i] - lower - upper) / pivot;
    }
    Ok(())
}

/// Run Gauss-Seidel with an explicit tolerance and iteration cap.
pub fn gauss_seidel(
    matrix: &Matrix,
    rhs: &[f64],
    eps: f64,
    max_iterations: usize,
) -> Result<Iterate> {
    GaussSeidel::new()
        .with_tolerance(eps)
        .with_max_iterations(max_iterations)
        .solve(matrix, rhs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn m(rows: Vec<Vec<f64>>) -> Matrix {
        Matrix::from_rows(rows).unwrap()
    }

    #[test]
    fn test_two_by_two_matches_analytic_solution() {
        let a = m(vec![vec![4.0, 1.0], vec![1.0, 3.0]]);
        let out = gauss_seidel(&a, &[1.0, 2.0], 1e-9, DEFAULT_MAX_ITERATIONS)
            .unwrap();

        assert!(out.converged);
        assert!(out.max_error() < 1e-9);
        assert_abs_diff_eq!(out.x[0], 1.0 / 11.0, epsilon = 1e-9);
        assert_abs_diff_eq!(out.x[1], 7.0 / 11.0, epsilon = 1e-9);
    }

    #[test]
    fn test_dominant_system_converges() {
        let a = m(vec![
            vec![10.0, -1.0, 2.0, 0.0],
            vec![-1.0, 11.0, -1.0, 3.0],
            vec![2.0, -1.0, 10.0, -1.0],
            vec![0.0, 3.0, -1.0, 8.0],
        ]);
        let b = [6.0, 25.0, -11.0, 15.0];
        let out = gauss_seidel(&a, &b, 1e-6, DEFAULT_MAX_ITERATIONS)
            .unwrap();

        assert!(out.converged);
        assert!(out.iterations < DEFAULT_MAX_ITERATIONS);
        assert!(out.max_error() < 1e-6);
        let expected = [1.0, 2.0, -1.0, 1.0];
        for (got, want) in out.x.iter().zip(expected) {
            assert_abs_diff_eq!(*got, want, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_first_sweep_uses_fresh_values() {
        let a = m(vec![vec![2.0, 1.0], vec![1.0, 2.0]]);
        let out = gauss_seidel(&a, &[2.0, 3.0], 1e-12, 1).unwrap();
        // x0 = 2/2 = 1, then x1 = (3 - 1*1)/2 = 1 using the new x0.
        assert_eq!(out.x, vec![1.0, 1.0]);
        assert_eq!(out.errors, vec![1.0, 1.0]);
        assert_eq!(out.iterations, 1);
        assert!(!out.converged);
    }

    #[test]
    fn test_cap_reports_last_sweep() {
        // Not dominant: the iteration diverges.
        let a = m(vec![vec![1.0, 3.0], vec![2.0, 1.0]]);
        let out = gauss_seidel(&a, &[1.0, 1.0], 1e-6, 25).unwrap();
        assert_eq!(out.iterations, 25);
        assert!(!out.converged);
        assert!(out.errors.iter().all(|e| *e > 0.0));
    }

    #[test]
    fn test_overflowed_run_runs_to_the_cap() {
        // Diverges to ±inf after a few hundred sweeps; |inf - inf| is NaN.
        let a = m(vec![vec![1.0, 3.0], vec![2.0, 1.0]]);
        let out = gauss_seidel(&a, &[1.0, 1.0], 1e-6, DEFAULT_MAX_ITERATIONS)
            .unwrap();
        assert_eq!(out.iterations, DEFAULT_MAX_ITERATIONS);
        assert!(!out.converged);
        assert!(out.max_error().is_nan());
    }

    #[test]
    fn test_nan_error_dominates_max() {
        assert_eq!(largest_error(&[]), 0.0);
        assert_eq!(largest_error(&[0.5, 2.0, 1.0]), 2.0);
        assert!(largest_error(&[f64::NAN, 1.0]).is_nan());
        assert!(largest_error(&[1.0, f64::NAN]).is_nan());
        assert!(largest_error(&[f64::INFINITY, f64::NAN]).is_nan());
    }

    #[test]
    fn test_zero_pivot_names_row() {
        let a = m(vec![vec![1.0, 0.0], vec![1.0, 0.0]]);
        let err = gauss_seidel(&a, &[1.0, 1.0], 1e-6, 10).unwrap_err();
        assert!(matches!(err, SeidelError::PivotZero { row: 2 }));
    }

    #[test]
    fn test_rejects_bad_settings() {
        let a = Matrix::identity(2);
        assert!(gauss_seidel(&a, &[1.0, 1.0], 0.0, 10).is_err());
        assert!(gauss_seidel(&a, &[1.0, 1.0], -1.0, 10).is_err());
        assert!(gauss_seidel(&a, &[1.0, 1.0], f64::NAN, 10).is_err());
        assert!(gauss_seidel(&a, &[1.0, 1.0], 1e-6, 0).is_err());
        assert!(gauss_seidel(&a, &[1.0], 1e-6, 10).is_err());
    }
}
