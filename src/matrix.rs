//! Dense square matrices and linear systems.

use std::fmt;
use std::ops::{Index, IndexMut};

use crate::error::{Result, SeidelError};

/// Dense square matrix stored row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    /// Elements, row after row
    data: Vec<f64>,
    /// Side length
    size: usize,
}

impl Matrix {
    /// Create a zero matrix of the given size.
    pub fn zeros(size: usize) -> Self {
        Self {
            data: vec![0.0; size * size],
            size,
        }
    }

    /// Create an identity matrix of the given size.
    pub fn identity(size: usize) -> Self {
        let mut m = Self::zeros(size);
        for i in 0..size {
            m.set(i, i, 1.0);
        }
        m
    }

    /// Build a matrix from a sequence of rows, checking that it is square.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self> {
        let size = rows.len();
        let mut data = Vec::with_capacity(size * size);
        for row in rows {
            if row.len() != size {
                return Err(SeidelError::dimension_mismatch("matrix row", size, row.len()));
            }
            data.extend(row);
        }
        Ok(Self { data, size })
    }

    /// Build a matrix from row-major data of length `size * size`.
    pub fn from_row_major(size: usize, data: Vec<f64>) -> Result<Self> {
        if data.len() != size * size {
            return Err(SeidelError::dimension_mismatch(
                "matrix data",
                size * size,
                data.len(),
            ));
        }
        Ok(Self { data, size })
    }

    /// Side length of the matrix.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Get element at (row, col).
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[row * self.size + col]
    }

    /// Set element at (row, col).
    pub fn set(&mut self, row: usize, col: usize, value: f64) {
        self.data[row * self.size + col] = value;
    }

    /// Borrow one row.
    pub fn row(&self, row: usize) -> &[f64] {
        let start = row * self.size;
        &self.data[start..start + self.size]
    }

    /// Iterate over rows.
    pub fn rows(&self) -> impl Iterator<Item = &[f64]> + '_ {
        // chunks_exact(0) panics, and an empty matrix has no rows anyway
        self.data.chunks_exact(self.size.max(1))
    }

    /// Diagonal element of a row.
    pub fn diagonal(&self, i: usize) -> f64 {
        self.get(i, i)
    }

    /// Sum of absolute values in a row, diagonal included.
    pub fn row_abs_sum(&self, row: usize) -> f64 {
        self.row(row).iter().map(|v| v.abs()).sum()
    }

    /// Infinity norm: the largest row absolute sum.
    pub fn norm_inf(&self) -> f64 {
        (0..self.size)
            .map(|i| self.row_abs_sum(i))
            .fold(0.0, f64::max)
    }

    /// Swap two whole rows.
    pub fn swap_rows(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        let n = self.size;
        for j in 0..n {
            self.data.swap(a * n + j, b * n + j);
        }
    }

    /// Swap two whole columns.
    pub fn swap_columns(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        let n = self.size;
        for i in 0..n {
            self.data.swap(i * n + a, i * n + b);
        }
    }

    /// Copy the matrix out as nested rows.
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.rows().take(self.size).map(<[f64]>::to_vec).collect()
    }

    /// Row-major element slice.
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }
}

impl Index<(usize, usize)> for Matrix {
    type Output = f64;

    fn index(&self, (row, col): (usize, usize)) -> &f64 {
        &self.data[row * self.size + col]
    }
}

impl IndexMut<(usize, usize)> for Matrix {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut f64 {
        &mut self.data[row * self.size + col]
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows().take(self.size) {
            let line: Vec<String> = row.iter().map(|v| v.to_string()).collect();
            writeln!(f, "{}", line.join(" "))?;
        }
        Ok(())
    }
}

/// A square system A·x = b.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearSystem {
    /// Coefficient matrix A
    pub matrix: Matrix,
    /// Right-hand side b
    pub rhs: Vec<f64>,
}

impl LinearSystem {
    /// Create a system, checking that `rhs` matches the matrix size.
    pub fn new(matrix: Matrix, rhs: Vec<f64>) -> Result<Self> {
        if rhs.len() != matrix.size() {
            return Err(SeidelError::dimension_mismatch(
                "right-hand side",
                matrix.size(),
                rhs.len(),
            ));
        }
        Ok(Self { matrix, rhs })
    }

    /// Number of unknowns.
    pub fn size(&self) -> usize {
        self.matrix.size()
    }
}
