//! # Seidel Core
//!
//! Iterative solving of square linear systems A·x = b by the Gauss-Seidel
//! method, with automatic reordering so that the iteration converges.
//!
//! This library provides:
//! - Diagonal dominance detection and repair via bipartite matching
//! - Zero-diagonal rescue via row and column swaps
//! - Gauss-Seidel iteration with a configurable tolerance and iteration cap
//! - Permutation bookkeeping, so results come back in the caller's variable order
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`matrix`] - Dense square matrices and linear systems
//! - [`permutation`] - Row and column permutations
//! - [`solver`] - Reordering passes, Gauss-Seidel, and the end-to-end pipeline
//! - [`input`] - Number parsing, system files, random systems, keyboard input
//! - [`report`] - Number formatting and solution output
//!
//! ## Usage
//!
//! ### Library
//!
//! ```
//! use seidel_core::{matrix::{LinearSystem, Matrix}, solve_system, SolverConfig};
//!
//! let a = Matrix::from_rows(vec![vec![1.0, 5.0], vec![4.0, 1.0]])?;
//! let system = LinearSystem::new(a, vec![6.0, 5.0])?;
//! let solution = solve_system(&system, &SolverConfig::new().with_tolerance(1e-10))?;
//!
//! assert!(solution.converged);
//! assert!((solution.x[0] - 1.0).abs() < 1e-8);
//! # Ok::<(), seidel_core::SeidelError>(())
//! ```
//!
//! ### Native CLI
//!
//! ```bash
//! seidel --file system.txt
//! ```
//!
//! ## Failure model
//!
//! A system that cannot be made diagonally dominant, or whose zero diagonal
//! cannot be swapped away, is reported as an error the caller is expected to
//! show to the user. Hitting the iteration cap is not an error: the returned
//! [`Solution`] carries the last estimate with `converged == false`.

pub mod error;
pub mod input;
pub mod matrix;
pub mod permutation;
pub mod report;
pub mod solver;

// Re-export main types for convenience
pub use error::{Result, SeidelError};
pub use matrix::{LinearSystem, Matrix};
pub use solver::{solve_system, Solution, SolverConfig, DEFAULT_MAX_ITERATIONS};

// WASM bindings
#[cfg(feature = "wasm")]
mod wasm;

#[cfg(feature = "wasm")]
pub use wasm::WasmSeidel;

/// Largest system size accepted from files and the keyboard.
pub const MAX_DIMENSION: usize = 20;
