//! Diagonal dominance detection and repair by reordering.
//!
//! Row `i` can be made dominant with column `j` on its diagonal when
//! `|a_ij| >= sum_k |a_ik| - |a_ij|`. These candidate pairs form a bipartite
//! graph between rows and columns; a perfect matching in it is exactly a
//! reordering with a dominant diagonal. Matchings are found with Kuhn's
//! augmenting-path search.

use tracing::debug;

use crate::error::Result;
use crate::matrix::Matrix;
use crate::permutation::{ColumnPermutation, RowPermutation};

/// How the dominance pass left the system.
#[derive(Debug, Clone, PartialEq)]
pub enum DominanceRoute {
    /// The matrix was dominant on input
    AlreadyDominant,
    /// Rows (and right-hand side) were reordered
    Rows(RowPermutation),
    /// Columns (variables) were reordered
    Columns(ColumnPermutation),
    /// No reordering achieves dominance; the system is returned unchanged
    Unattained,
}

/// Output of [`make_dominant`].
#[derive(Debug, Clone)]
pub struct Dominance {
    /// Possibly reordered matrix
    pub matrix: Matrix,
    /// Possibly reordered right-hand side
    pub rhs: Vec<f64>,
    /// Which reordering was applied
    pub route: DominanceRoute,
}

impl Dominance {
    /// Row permutation applied, if any.
    pub fn row_permutation(&self) -> Option<&RowPermutation> {
        match &self.route {
            DominanceRoute::Rows(p) => Some(p),
            _ => None,
        }
    }

    /// Column permutation applied, if any.
    pub fn column_permutation(&self) -> Option<&ColumnPermutation> {
        match &self.route {
            DominanceRoute::Columns(p) => Some(p),
            _ => None,
        }
    }
}

/// Check weak diagonal dominance: `|a_ii| >= sum_{j != i} |a_ij|` for every row.
pub fn is_dominant(matrix: &Matrix) -> bool {
    (0..matrix.size()).all(|i| {
        let diag = matrix.diagonal(i).abs();
        let off = matrix.row_abs_sum(i) - diag;
        diag >= off
    })
}

/// Whether `a_ij` alone can dominate row `i` when placed on the diagonal.
fn can_dominate(matrix: &Matrix, row_sum: f64, i: usize, j: usize) -> bool {
    let diag = matrix.get(i, j).abs();
    diag >= row_sum - diag
}

/// Adjacency from each row to the columns that may sit on its diagonal.
fn row_graph(matrix: &Matrix) -> Vec<Vec<usize>> {
    let n = matrix.size();
    (0..n)
        .map(|i| {
            let row_sum = matrix.row_abs_sum(i);
            (0..n)
                .filter(|&j| can_dominate(matrix, row_sum, i, j))
                .collect()
        })
        .collect()
}

/// Adjacency from each column to the rows it may dominate.
fn column_graph(matrix: &Matrix) -> Vec<Vec<usize>> {
    let n = matrix.size();
    let row_sums: Vec<f64> = (0..n).map(|i| matrix.row_abs_sum(i)).collect();
    (0..n)
        .map(|j| {
            (0..n)
                .filter(|&i| can_dominate(matrix, row_sums[i], i, j))
                .collect()
        })
        .collect()
}

/// Kuhn's algorithm over a square bipartite graph.
///
/// `graph[left]` lists the right vertices adjacent to `left`. Returns
/// `matched[right] = left` when every left vertex is matched, else `None`.
fn perfect_matching(graph: &[Vec<usize>]) -> Option<Vec<usize>> {
    let n = graph.len();
    let mut matched: Vec<Option<usize>> = vec![None; n];

    for left in 0..n {
        let mut seen = vec![false; n];
        if !augment(graph, left, &mut seen, &mut matched) {
            return None;
        }
    }

    matched.into_iter().collect()
}

/// Try to match `left`, re-routing earlier matches along an alternating path.
fn augment(
    graph: &[Vec<usize>],
    left: usize,
    seen: &mut [bool],
    matched: &mut [Option<usize>],
) -> bool {
    for &right in &graph[left] {
        if seen[right] {
            continue;
        }
        seen[right] = true;
        let free = match matched[right] {
            None => true,
            Some(other) => augment(graph, other, seen, matched),
        };
        if free {
            matched[right] = Some(left);
            return true;
        }
    }
    false
}

/// Find a row order that puts a dominating entry on every diagonal position.
///
/// New row `j` is the old row matched to column `j`.
pub fn find_row_permutation(matrix: &Matrix) -> Option<RowPermutation> {
    let row_for_col = perfect_matching(&row_graph(matrix))?;
    RowPermutation::from_indices(row_for_col).ok()
}

/// Find a column order that puts a dominating entry on every diagonal position.
///
/// New column `i` is the old column matched to row `i`.
pub fn find_column_permutation(matrix: &Matrix) -> Option<ColumnPermutation> {
    let col_for_row = perfect_matching(&column_graph(matrix))?;
    ColumnPermutation::from_indices(col_for_row).ok()
}

/// Reorder the system so the matrix is diagonally dominant, if possible.
///
/// Tries, in order: no change, a row reordering (applied to `rhs` too), a
/// column reordering. When nothing works the system comes back unchanged with
/// [`DominanceRoute::Unattained`]; the caller decides what that means.
pub fn make_dominant(matrix: &Matrix, rhs: &[f64]) -> Result<Dominance> {
    if is_dominant(matrix) {
        return Ok(Dominance {
            matrix: matrix.clone(),
            rhs: rhs.to_vec(),
            route: DominanceRoute::AlreadyDominant,
        });
    }

    if let Some(perm) = find_row_permutation(matrix) {
        debug!(permutation = %perm, "dominance reached by row permutation");
        return Ok(Dominance {
            matrix: perm.permute_rows(matrix)?,
            rhs: perm.apply(rhs)?,
            route: DominanceRoute::Rows(perm),
        });
    }

    if let Some(perm) = find_column_permutation(matrix) {
        debug!(permutation = %perm, "dominance reached by column permutation");
        return Ok(Dominance {
            matrix: perm.permute_columns(matrix)?,
            rhs: rhs.to_vec(),
            route: DominanceRoute::Columns(perm),
        });
    }

    debug!("no permutation yields diagonal dominance");
    Ok(Dominance {
        matrix: matrix.clone(),
        rhs: rhs.to_vec(),
        route: DominanceRoute::Unattained,
    })
}
