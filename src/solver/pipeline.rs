//! End-to-end solving: reorder, repair, iterate, unpermute.

use tracing::{debug, info};

use crate::error::{Result, SeidelError};
use crate::matrix::LinearSystem;
use crate::permutation::{ColumnPermutation, RowPermutation};

use super::dominance::{make_dominant, DominanceRoute};
use super::gauss_seidel::{largest_error, GaussSeidel};
use super::repair::ensure_nonzero_diagonal;
use super::{DEFAULT_MAX_ITERATIONS, DEFAULT_TOLERANCE};

/// Configuration for a solve.
#[derive(Debug, Clone)]
pub struct SolverConfig {
    /// Maximum Gauss-Seidel sweeps.
    pub max_iterations: usize,
    /// Convergence tolerance on the largest per-variable change.
    pub tolerance: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}

impl SolverConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum number of sweeps.
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Set the convergence tolerance.
    ///
    /// The test is strict: a run converges once every change is `< tolerance`.
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Check the configuration without running anything.
    pub fn validate(&self) -> Result<()> {
        self.iteration().validate()
    }

    fn iteration(&self) -> GaussSeidel {
        GaussSeidel::new()
            .with_tolerance(self.tolerance)
            .with_max_iterations(self.max_iterations)
    }
}

/// A solved system, reported in the caller's variable order.
#[derive(Debug, Clone)]
pub struct Solution {
    /// Solution vector, original variable order
    pub x: Vec<f64>,
    /// Sweeps performed
    pub iterations: usize,
    /// Last-sweep change per variable, original variable order
    pub errors: Vec<f64>,
    /// Whether the tolerance was met before the cap
    pub converged: bool,
    /// How diagonal dominance was obtained
    pub dominance: DominanceRoute,
    /// Total row reordering (dominance, then zero-diagonal repair)
    pub row_permutation: RowPermutation,
    /// Total column reordering (dominance, then zero-diagonal repair)
    pub column_permutation: ColumnPermutation,
    /// Infinity norm of the matrix that was iterated
    pub norm_inf: f64,
}

impl Solution {
    /// Largest entry of the error vector, NaN if any entry is NaN.
    pub fn max_error(&self) -> f64 {
        largest_error(&self.errors)
    }
}

/// Solve `A·x = b` by Gauss-Seidel after reordering for convergence.
///
/// Steps:
/// 1. Reorder rows or columns for diagonal dominance; fail with
///    [`SeidelError::DominanceUnattainable`] if no reordering works.
/// 2. Swap away zero diagonal entries; fail with
///    [`SeidelError::DiagonalRepairImpossible`] if that is not possible.
/// 3. Iterate on the reordered system.
/// 4. Map the solution back through the combined column permutation.
pub fn solve_system(system: &LinearSystem, config: &SolverConfig) -> Result<Solution> {
    config.validate()?;
    validate_system(system)?;
    let n = system.size();

    let dominant = make_dominant(&system.matrix, &system.rhs)?;
    let (row_first, col_first) = match &dominant.route {
        DominanceRoute::AlreadyDominant => {
            (RowPermutation::identity(n), ColumnPermutation::identity(n))
        }
        DominanceRoute::Rows(p) => (p.clone(), ColumnPermutation::identity(n)),
        DominanceRoute::Columns(p) => (RowPermutation::identity(n), p.clone()),
        DominanceRoute::Unattained => return Err(SeidelError::DominanceUnattainable),
    };

    let repaired = ensure_nonzero_diagonal(&dominant.matrix, &dominant.rhs)?;
    let row_permutation = row_first.then(&repaired.row_permutation)?;
    let column_permutation = col_first.then(&repaired.column_permutation)?;
    debug!(
        rows = %row_permutation,
        columns = %column_permutation,
        "system reordered"
    );

    let norm_inf = repaired.matrix.norm_inf();
    let iterate = config.iteration().solve(&repaired.matrix, &repaired.rhs)?;
    info!(
        iterations = iterate.iterations,
        converged = iterate.converged,
        "gauss-seidel finished"
    );

    Ok(Solution {
        x: column_permutation.invert_and_apply(&iterate.x)?,
        errors: column_permutation.invert_and_apply(&iterate.errors)?,
        iterations: iterate.iterations,
        converged: iterate.converged,
        dominance: dominant.route,
        row_permutation,
        column_permutation,
        norm_inf,
    })
}

fn validate_system(system: &LinearSystem) -> Result<()> {
    let n = system.size();
    if n == 0 {
        return Err(SeidelError::invalid_input("system must have at least one equation"));
    }
    if system.rhs.len() != n {
        return Err(SeidelError::dimension_mismatch("right-hand side", n, system.rhs.len()));
    }
    let finite = system.matrix.as_slice().iter().all(|v| v.is_finite())
        && system.rhs.iter().all(|v| v.is_finite());
    if !finite {
        return Err(SeidelError::invalid_input("system contains a non-finite value"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::Matrix;
    use approx::assert_abs_diff_eq;

    fn system(rows: Vec<Vec<f64>>, rhs: Vec<f64>) -> LinearSystem {
        LinearSystem::new(Matrix::from_rows(rows).unwrap(), rhs).unwrap()
    }

    /// Residual `A·x - b` in the original ordering.
    fn residual(system: &LinearSystem, x: &[f64]) -> f64 {
        system
            .matrix
            .rows()
            .zip(&system.rhs)
            .map(|(row, b)| {
                let ax: f64 = row.iter().zip(x).map(|(a, x)| a * x).sum();
                (ax - b).abs()
            })
            .fold(0.0, f64::max)
    }

    #[test]
    fn test_dominant_system_needs_no_reordering() {
        let sys = system(vec![vec![4.0, 1.0], vec![1.0, 3.0]], vec![1.0, 2.0]);
        let config = SolverConfig::new().with_tolerance(1e-9);
        let sol = solve_system(&sys, &config).unwrap();

        assert_eq!(sol.dominance, DominanceRoute::AlreadyDominant);
        assert!(sol.row_permutation.is_identity());
        assert!(sol.column_permutation.is_identity());
        assert!(sol.converged);
        assert_abs_diff_eq!(sol.x[0], 1.0 / 11.0, epsilon = 1e-9);
        assert_abs_diff_eq!(sol.x[1], 7.0 / 11.0, epsilon = 1e-9);
        assert!((sol.norm_inf - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_row_reordered_system_solves_original() {
        // Rows of a dominant system, shuffled.
        let sys = system(
            vec![
                vec![1.0, 1.0, 5.0],
                vec![6.0, 1.0, 2.0],
                vec![1.0, 7.0, -2.0],
            ],
            vec![10.0, 3.0, 4.0],
        );
        let config = SolverConfig::new().with_tolerance(1e-10);
        let sol = solve_system(&sys, &config).unwrap();

        assert!(matches!(sol.dominance, DominanceRoute::Rows(_)));
        assert_eq!(sol.row_permutation.as_slice(), &[1, 2, 0]);
        assert!(sol.converged);
        assert!(residual(&sys, &sol.x) < 1e-8);
    }

    #[test]
    fn test_unattainable_dominance_is_reported() {
        // Both rows need column 2 on the diagonal.
        let sys = system(vec![vec![1.0, 3.0], vec![1.0, 4.0]], vec![1.0, 1.0]);
        let err = solve_system(&sys, &SolverConfig::new()).unwrap_err();
        assert!(matches!(err, SeidelError::DominanceUnattainable));
        assert!(err.is_method_limitation());
    }

    #[test]
    fn test_zero_row_stops_at_repair() {
        // All-zero rows are trivially dominant, so the repair pass catches them.
        let sys = system(vec![vec![0.0, 0.0], vec![0.0, 0.0]], vec![1.0, 2.0]);
        let err = solve_system(&sys, &SolverConfig::new()).unwrap_err();
        assert!(matches!(err, SeidelError::DiagonalRepairImpossible { index: 1 }));
    }

    #[test]
    fn test_cap_is_a_result_not_an_error() {
        let sys = system(vec![vec![10.0, 1.0], vec![1.0, 10.0]], vec![11.0, 11.0]);
        let config = SolverConfig::new()
            .with_tolerance(1e-15)
            .with_max_iterations(2);
        let sol = solve_system(&sys, &config).unwrap();
        assert_eq!(sol.iterations, 2);
        assert!(!sol.converged);
        assert!(sol.max_error() > 0.0);
    }

    #[test]
    fn test_max_error_keeps_nan() {
        let sol = Solution {
            x: vec![f64::INFINITY, f64::NEG_INFINITY],
            iterations: DEFAULT_MAX_ITERATIONS,
            errors: vec![f64::NAN, 1.0],
            converged: false,
            dominance: DominanceRoute::AlreadyDominant,
            row_permutation: RowPermutation::identity(2),
            column_permutation: ColumnPermutation::identity(2),
            norm_inf: 4.0,
        };
        assert!(sol.max_error().is_nan());
    }

    #[test]
    fn test_rejects_bad_input() {
        let sys = system(vec![vec![1.0]], vec![f64::NAN]);
        assert!(solve_system(&sys, &SolverConfig::new()).is_err());

        let sys = system(vec![vec![1.0]], vec![1.0]);
        let config = SolverConfig::new().with_tolerance(0.0);
        assert!(matches!(
            solve_system(&sys, &config),
            Err(SeidelError::InvalidInput { .. })
        ));
    }
}
