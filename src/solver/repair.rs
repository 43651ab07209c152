//! Zero-diagonal rescue by row and column swaps.

use tracing::debug;

use crate::error::{Result, SeidelError};
use crate::matrix::Matrix;
use crate::permutation::{ColumnPermutation, RowPermutation};

/// A system whose diagonal holds no zeros, with the swaps that produced it.
#[derive(Debug, Clone)]
pub struct Repaired {
    /// Matrix with a nonzero diagonal
    pub matrix: Matrix,
    /// Right-hand side, reordered alongside the rows
    pub rhs: Vec<f64>,
    /// Accumulated row transpositions
    pub row_permutation: RowPermutation,
    /// Accumulated column transpositions
    pub column_permutation: ColumnPermutation,
}

/// Swap rows or columns until no diagonal entry is exactly zero.
///
/// Indices are visited in order. A zero at `(i, i)` is fixed by the first
/// lower row with a nonzero in column `i`, or failing that by the first later
/// column with a nonzero in row `i`. If neither exists the system cannot be
/// iterated and [`SeidelError::DiagonalRepairImpossible`] names the 1-based index.
pub fn ensure_nonzero_diagonal(matrix: &Matrix, rhs: &[f64]) -> Result<Repaired> {
    let n = matrix.size();
    if rhs.len() != n {
        return Err(SeidelError::dimension_mismatch("right-hand side", n, rhs.len()));
    }

    let mut a = matrix.clone();
    let mut b = rhs.to_vec();
    let mut row_permutation = RowPermutation::identity(n);
    let mut column_permutation = ColumnPermutation::identity(n);

    for i in 0..n {
        if a.diagonal(i) != 0.0 {
            continue;
        }

        if let Some(r) = ((i + 1)..n).find(|&r| a.get(r, i) != 0.0) {
            debug!(
                index = i,
                row = r,
                "swapping rows to clear zero diagonal"
            );
            a.swap_rows(i, r);
            b.swap(i, r);
            row_permutation.swap(i, r);
            continue;
        }

        if let Some(c) = ((i + 1)..n).find(|&c| a.get(i, c) != 0.0) {
            debug!(
                index = i,
                column = c,
                "swapping columns to clear zero diagonal"
            );
            a.swap_columns(i, c);
            column_permutation.swap(i, c);
            continue;
        }

        return Err(SeidelError::DiagonalRepairImpossible { index: i + 1 });
    }

    Ok(Repaired {
        matrix: a,
        rhs: b,
        row_permutation,
        column_permutation,
    })
}
