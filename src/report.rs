//! Human-readable output of solutions.

use std::io::{self, Write};

use crate::solver::{DominanceRoute, Solution};

/// Default number of significant decimals in printed values.
pub const DEFAULT_PRECISION: usize = 6;

/// Most decimals an `f64` can meaningfully show; larger requests are clamped.
pub const MAX_PRECISION: usize = 17;

fn trim_fraction(text: String) -> String {
    if !text.contains('.') {
        return text;
    }
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}

fn round_to(value: f64, precision: usize) -> f64 {
    let scale = 10f64.powi(precision as i32);
    (value * scale).round() / scale
}

/// Format a number for display, switching to `m*10^e` outside `[1e-2, 1e3)`.
///
/// Values with decimal exponent in `-2..=2` print in fixed notation with
/// trailing zeros removed. Larger and smaller magnitudes print as a mantissa
/// times a power of ten, and a mantissa of exactly ±1 is dropped.
/// `precision` is clamped to [`MAX_PRECISION`].
///
/// ```
/// use seidel_core::report::format_power10;
///
/// assert_eq!(format_power10(0.5, 6), "0.5");
/// assert_eq!(format_power10(12345.0, 6), "1.2345*10^4");
/// assert_eq!(format_power10(-0.001, 6), "-10^-3");
/// ```
pub fn format_power10(value: f64, precision: usize) -> String {
    let precision = precision.min(MAX_PRECISION);
    if value == 0.0 {
        return "0".to_string();
    }
    if !value.is_finite() {
        return value.to_string();
    }

    let mut exponent = value.abs().log10().floor() as i32;
    // log10 can land just under an exact power of ten
    if value.abs() >= 10f64.powi(exponent + 1) {
        exponent += 1;
    }
    if (-2..=2).contains(&exponent) {
        return trim_fraction(format!("{:.*}", precision, value));
    }

    let mut mantissa = round_to(value / 10f64.powi(exponent), precision);
    if mantissa.abs() >= 10.0 {
        mantissa /= 10.0;
        exponent += 1;
    }

    match trim_fraction(format!("{:.*}", precision, mantissa)).as_str() {
        "1" => format!("10^{}", exponent),
        "-1" => format!("-10^{}", exponent),
        m => format!("{}*10^{}", m, exponent),
    }
}

/// Describe how dominance was obtained, if the system was reordered.
pub fn describe_route(route: &DominanceRoute) -> Option<&'static str> {
    match route {
        DominanceRoute::Rows(_) => Some("Diagonal dominance achieved by permuting rows."),
        DominanceRoute::Columns(_) => Some("Diagonal dominance achieved by permuting columns."),
        DominanceRoute::AlreadyDominant | DominanceRoute::Unattained => None,
    }
}

/// Write a solution in the CLI's report format.
pub fn write_solution<W: Write>(
    out: &mut W,
    solution: &Solution,
    precision: usize,
) -> io::Result<()> {
    if let Some(line) = describe_route(&solution.dominance) {
        writeln!(out, "{}", line)?;
    }
    writeln!(
        out,
        "Matrix norm (inf): {}",
        format_power10(solution.norm_inf, precision)
    )?;

    writeln!(out, "Solution vector:")?;
    for (i, x) in solution.x.iter().enumerate() {
        writeln!(out, "x{} = {}", i + 1, format_power10(*x, precision))?;
    }

    writeln!(out, "Iterations: {}", solution.iterations)?;
    writeln!(out, "Error vector:")?;
    for (i, e) in solution.errors.iter().enumerate() {
        writeln!(
            out,
            "|x{0}^k - x{0}^(k-1)| = {1}",
            i + 1,
            format_power10(*e, precision)
        )?;
    }

    if !solution.converged {
        writeln!(out, "Warning: iteration limit reached before the tolerance was met.")?;
    }
    Ok(())
}
