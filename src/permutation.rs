//! Row and column permutations.
//!
//! A permutation is stored in gather form: `perm[new] = old`. For a row
//! permutation, new row `i` is old row `perm[i]`; for a column permutation,
//! new column `j` is old column `perm[j]`.
//!
//! The axis is part of the type, so a [`RowPermutation`] can never be used
//! where a [`ColumnPermutation`] is expected.

use std::fmt;
use std::marker::PhantomData;

use crate::error::{Result, SeidelError};
use crate::matrix::Matrix;

/// Marker for permutations that reorder equations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rows {}

/// Marker for permutations that reorder variables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Columns {}

/// A bijection on `0..n` acting on one matrix axis.
pub struct Permutation<Axis> {
    indices: Vec<usize>,
    axis: PhantomData<Axis>,
}

/// Permutation of matrix rows (and right-hand side entries).
pub type RowPermutation = Permutation<Rows>;

/// Permutation of matrix columns (and solution entries).
pub type ColumnPermutation = Permutation<Columns>;

impl<Axis> Permutation<Axis> {
    /// The identity permutation of length `n`.
    pub fn identity(n: usize) -> Self {
        Self {
            indices: (0..n).collect(),
            axis: PhantomData,
        }
    }

    /// Wrap an index sequence, checking that it is a bijection on `0..len`.
    pub fn from_indices(indices: Vec<usize>) -> Result<Self> {
        let n = indices.len();
        let mut seen = vec![false; n];
        for &idx in &indices {
            if idx >= n {
                return Err(SeidelError::InvalidPermutation {
                    message: format!("index {} out of range for length {}", idx, n),
                });
            }
            if seen[idx] {
                return Err(SeidelError::InvalidPermutation {
                    message: format!("index {} appears more than once", idx),
                });
            }
            seen[idx] = true;
        }
        Ok(Self {
            indices,
            axis: PhantomData,
        })
    }

    /// Length of the permutation.
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Whether the permutation is empty.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// The underlying `new -> old` index map.
    pub fn as_slice(&self) -> &[usize] {
        &self.indices
    }

    /// Whether every index maps to itself.
    pub fn is_identity(&self) -> bool {
        self.indices.iter().enumerate().all(|(i, &p)| i == p)
    }

    /// Exchange two positions (record a transposition).
    pub fn swap(&mut self, a: usize, b: usize) {
        self.indices.swap(a, b);
    }

    /// Compose with a permutation applied afterwards on the same axis.
    ///
    /// The result maps `i` to `self[after[i]]`, so applying it once is the same
    /// as applying `self` and then `after`.
    pub fn then(&self, after: &Self) -> Result<Self> {
        if after.len() != self.len() {
            return Err(SeidelError::dimension_mismatch(
                "permutation",
                self.len(),
                after.len(),
            ));
        }
        Ok(Self {
            indices: after.indices.iter().map(|&i| self.indices[i]).collect(),
            axis: PhantomData,
        })
    }

    /// The inverse permutation.
    pub fn inverse(&self) -> Self {
        let mut inv = vec![0; self.len()];
        for (new, &old) in self.indices.iter().enumerate() {
            inv[old] = new;
        }
        Self {
            indices: inv,
            axis: PhantomData,
        }
    }

    /// Gather: `out[i] = values[perm[i]]`.
    pub fn apply<T: Clone>(&self, values: &[T]) -> Result<Vec<T>> {
        self.check_len(values.len())?;
        Ok(self.indices.iter().map(|&old| values[old].clone()).collect())
    }

    /// Scatter back: `out[perm[i]] = values[i]`, undoing [`apply`](Self::apply).
    pub fn invert_and_apply<T: Clone>(&self, values: &[T]) -> Result<Vec<T>> {
        self.check_len(values.len())?;
        let mut out = values.to_vec();
        for (new, &old) in self.indices.iter().enumerate() {
            out[old] = values[new].clone();
        }
        Ok(out)
    }

    fn check_len(&self, len: usize) -> Result<()> {
        if len != self.len() {
            return Err(SeidelError::dimension_mismatch("permuted vector", self.len(), len));
        }
        Ok(())
    }
}

impl RowPermutation {
    /// Reorder the rows of a matrix into a new matrix.
    pub fn permute_rows(&self, matrix: &Matrix) -> Result<Matrix> {
        self.check_len(matrix.size())?;
        let n = matrix.size();
        let mut data = Vec::with_capacity(n * n);
        for &old in &self.indices {
            data.extend_from_slice(matrix.row(old));
        }
        Matrix::from_row_major(n, data)
    }
}

impl ColumnPermutation {
    /// Reorder the columns of a matrix into a new matrix.
    pub fn permute_columns(&self, matrix: &Matrix) -> Result<Matrix> {
        self.check_len(matrix.size())?;
        let n = matrix.size();
        let mut out = Matrix::zeros(n);
        for i in 0..n {
            for (new, &old) in self.indices.iter().enumerate() {
                out.set(i, new, matrix.get(i, old));
            }
        }
        Ok(out)
    }
}

/// Map a solution computed in permuted-column space back to the original
/// variable numbering: `x_original[perm[i]] = x_permuted[i]`.
pub fn invert_and_apply(x_permuted: &[f64], perm: &ColumnPermutation) -> Result<Vec<f64>> {
    perm.invert_and_apply(x_permuted)
}

// Manual impls so the marker types need no bounds.
impl<Axis> Clone for Permutation<Axis> {
    fn clone(&self) -> Self {
        Self {
            indices: self.indices.clone(),
            axis: PhantomData,
        }
    }
}

impl<Axis> PartialEq for Permutation<Axis> {
    fn eq(&self, other: &Self) -> bool {
        self.indices == other.indices
    }
}

impl<Axis> Eq for Permutation<Axis> {}

impl<Axis> fmt::Debug for Permutation<Axis> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Permutation").field(&self.indices).finish()
    }
}

impl<Axis> fmt::Display for Permutation<Axis> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.indices.iter().map(|i| (i + 1).to_string()).collect();
        write!(f, "[{}]", parts.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_indices_rejects_non_bijection() {
        assert!(RowPermutation::from_indices(vec![0, 0, 1]).is_err());
        assert!(RowPermutation::from_indices(vec![0, 3, 1]).is_err());
        assert!(RowPermutation::from_indices(vec![2, 0, 1]).is_ok());
    }

    #[test]
    fn test_unpermute_restores_vector_exactly() {
        let x = vec![1.5, -2.25, 3.0, 4.125, 0.1];
        for indices in [
            vec![0, 1, 2, 3, 4],
            vec![4, 3, 2, 1, 0],
            vec![1, 2, 3, 4, 0],
            vec![2, 0, 4, 1, 3],
        ] {
            let p = ColumnPermutation::from_indices(indices).unwrap();
            let permuted = p.apply(&x).unwrap();
            let restored = invert_and_apply(&permuted, &p).unwrap();
            assert_eq!(restored, x);
        }
    }

    #[test]
    fn test_compose_matches_sequential_application() {
        let m = Matrix::from_rows(vec![
            vec![1.0, 2.0, 3.0],
            vec![4.0, 5.0, 6.0],
            vec![7.0, 8.0, 9.0],
        ])
        .unwrap();
        let first = RowPermutation::from_indices(vec![2, 0, 1]).unwrap();
        let second = RowPermutation::from_indices(vec![1, 0, 2]).unwrap();

        let sequential = second
            .permute_rows(&first.permute_rows(&m).unwrap())
            .unwrap();
        let composed = first.then(&second).unwrap();

        assert_eq!(composed.permute_rows(&m).unwrap(), sequential);
        assert_eq!(composed.as_slice(), &[0, 2, 1]);
    }

    #[test]
    fn test_inverse() {
        let p = ColumnPermutation::from_indices(vec![2, 0, 3, 1]).unwrap();
        let inv = p.inverse();
        assert!(p.then(&inv).unwrap().is_identity());
        assert!(inv.then(&p).unwrap().is_identity());
    }

    #[test]
    fn test_permute_columns() {
        let m = Matrix::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
        let p = ColumnPermutation::from_indices(vec![1, 0]).unwrap();
        let out = p.permute_columns(&m).unwrap();
        assert_eq!(out.to_rows(), vec![vec![2.0, 1.0], vec![4.0, 3.0]]);
    }

    #[test]
    fn test_length_mismatch() {
        let p = RowPermutation::identity(3);
        assert!(p.apply(&[1.0, 2.0]).is_err());
    }
}
