//! WASM bindings for Seidel Core.
//!
//! ## Usage (JavaScript)
//!
//! ```javascript
//! import init, { WasmSeidel } from 'seidel_core';
//!
//! await init();
//!
//! const solver = new WasmSeidel(1e-8);
//! const x = solver.solve(new Float64Array([4, 1, 1, 3]), new Float64Array([1, 2]));
//! console.log(x, solver.last_iterations, solver.last_converged);
//! ```

use wasm_bindgen::prelude::*;

use crate::error::SeidelError;
use crate::matrix::{LinearSystem, Matrix};
use crate::solver::{solve_system, SolverConfig};

/// Initialize panic hook for better error messages in browser console.
#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

fn to_js(e: SeidelError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// WASM-compatible Gauss-Seidel solver.
///
/// Wraps [`solve_system`] and remembers the statistics of the last run.
#[wasm_bindgen]
pub struct WasmSeidel {
    config: SolverConfig,
    last_iterations: usize,
    last_converged: bool,
    last_errors: Vec<f64>,
}

#[wasm_bindgen]
impl WasmSeidel {
    /// Create a solver with the given tolerance and the default iteration cap.
    #[wasm_bindgen(constructor)]
    pub fn new(tolerance: f64) -> Result<WasmSeidel, JsValue> {
        Self::with_config(tolerance, crate::DEFAULT_MAX_ITERATIONS)
    }

    /// Create a solver with a custom iteration cap.
    #[wasm_bindgen]
    pub fn with_config(tolerance: f64, max_iterations: usize) -> Result<WasmSeidel, JsValue> {
        let config = SolverConfig::new()
            .with_tolerance(tolerance)
            .with_max_iterations(max_iterations);
        config.validate().map_err(to_js)?;
        Ok(WasmSeidel {
            config,
            last_iterations: 0,
            last_converged: false,
            last_errors: Vec::new(),
        })
    }

    /// Solve a system given as a row-major matrix and a right-hand side.
    ///
    /// Returns the solution in the original variable order.
    #[wasm_bindgen]
    pub fn solve(&mut self, matrix: &[f64], rhs: &[f64]) -> Result<Vec<f64>, JsValue> {
        let n = rhs.len();
        let matrix = Matrix::from_row_major(n, matrix.to_vec()).map_err(to_js)?;
        let system = LinearSystem::new(matrix, rhs.to_vec()).map_err(to_js)?;
        let solution = solve_system(&system, &self.config).map_err(to_js)?;

        self.last_iterations = solution.iterations;
        self.last_converged = solution.converged;
        self.last_errors = solution.errors;
        Ok(solution.x)
    }

    /// Sweeps performed by the last solve.
    #[wasm_bindgen(getter)]
    pub fn last_iterations(&self) -> usize {
        self.last_iterations
    }

    /// Whether the last solve met the tolerance.
    #[wasm_bindgen(getter)]
    pub fn last_converged(&self) -> bool {
        self.last_converged
    }

    /// Per-variable change from the final sweep of the last solve.
    #[wasm_bindgen(getter)]
    pub fn last_errors(&self) -> Vec<f64> {
        self.last_errors.clone()
    }
}

/// Get the library version.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
