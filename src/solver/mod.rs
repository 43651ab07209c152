//! Reordering and Gauss-Seidel solving.
//!
//! This module provides the numerical engine.
//!
//! ## Pipeline
//!
//! Gauss-Seidel is guaranteed to converge when A is diagonally dominant, and
//! it divides by every diagonal entry on every sweep. The solver therefore
//! prepares the system before iterating:
//!
//! ```text
//! (A, b) --make_dominant--> (A1, b1, P1) --ensure_nonzero_diagonal--> (A2, b2, P2)
//!        --gauss_seidel--> y --unpermute(P1 ∘ P2)--> x
//! ```
//!
//! Row permutations reorder equations and never touch the solution. Column
//! permutations reorder variables, so the combined column permutation is
//! undone on the iterate before it is returned.

mod dominance;
mod gauss_seidel;
mod pipeline;
mod repair;

pub use dominance::{
    find_column_permutation, find_row_permutation, is_dominant, make_dominant, Dominance,
    DominanceRoute,
};
pub use gauss_seidel::{gauss_seidel, GaussSeidel, Iterate};
pub use pipeline::{solve_system, Solution, SolverConfig};
pub use repair::{ensure_nonzero_diagonal, Repaired};

/// Default convergence tolerance for Gauss-Seidel.
pub const DEFAULT_TOLERANCE: f64 = 1e-6;

/// Default maximum number of Gauss-Seidel sweeps.
pub const DEFAULT_MAX_ITERATIONS: usize = 10_000;
