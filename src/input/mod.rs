//! Reading linear systems.
//!
//! A system file is a whitespace-separated token stream:
//!
//! ```text
//! system = n  a_11 .. a_1n  ..  a_n1 .. a_nn  b_1 .. b_n  eps
//! ```
//!
//! Either `.` or `,` may be used as the decimal separator, so `0,5` and `0.5`
//! read the same. Line breaks carry no meaning beyond separating tokens.
//!
//! # Example
//!
//! ```text
//! 2
//! 4 1
//! 1 3
//! 1 2
//! 0,000001
//! ```

mod random;

#[cfg(feature = "cli")]
mod prompt;

pub use random::generate_random_system;

#[cfg(feature = "cli")]
pub use prompt::Prompter;

use crate::error::{Result, SeidelError};
use crate::matrix::{LinearSystem, Matrix};
use crate::report::MAX_PRECISION;
use crate::MAX_DIMENSION;

/// Parse one number, accepting `,` as the decimal separator.
pub fn parse_float(token: &str) -> Result<f64> {
    let token = token.trim();
    if token.is_empty() {
        return Err(SeidelError::invalid_number(token));
    }
    let value: f64 = token
        .replace(',', ".")
        .parse()
        .map_err(|_| SeidelError::invalid_number(token))?;
    if !value.is_finite() {
        return Err(SeidelError::invalid_number(token));
    }
    Ok(value)
}

/// Parse a system size, which must be a whole number in `1..=MAX_DIMENSION`.
pub fn parse_dimension(token: &str) -> Result<usize> {
    let value = parse_float(token)?;
    if value.fract() != 0.0 || value < 1.0 || value > MAX_DIMENSION as f64 {
        return Err(SeidelError::invalid_input(format!(
            "n must be an integer in 1..={}, got {}",
            MAX_DIMENSION, token
        )));
    }
    Ok(value as usize)
}

/// Parse a convergence tolerance, which must be positive.
pub fn parse_tolerance(token: &str) -> Result<f64> {
    let eps = parse_float(token)?;
    if eps <= 0.0 {
        return Err(SeidelError::invalid_input(format!("eps must be > 0, got {}", token)));
    }
    Ok(eps)
}

/// Parse a count of printed decimals, in `0..=MAX_PRECISION`.
pub fn parse_precision(token: &str) -> Result<usize> {
    let digits: usize = token
        .trim()
        .parse()
        .map_err(|_| SeidelError::invalid_number(token))?;
    if digits > MAX_PRECISION {
        return Err(SeidelError::invalid_input(format!(
            "precision must be at most {}, got {}",
            MAX_PRECISION, digits
        )));
    }
    Ok(digits)
}

/// A system read from a file, together with its tolerance.
#[derive(Debug, Clone, PartialEq)]
pub struct SystemFile {
    /// The linear system
    pub system: LinearSystem,
    /// Convergence tolerance given in the file
    pub eps: f64,
}

/// Parse a system description.
pub fn parse(input: &str) -> Result<SystemFile> {
    // Keep line numbers for error messages.
    let tokens: Vec<(usize, &str)> = input
        .lines()
        .enumerate()
        .flat_map(|(line, text)| text.split_whitespace().map(move |t| (line + 1, t)))
        .collect();

    let &(first_line, first) = tokens
        .first()
        .ok_or_else(|| SeidelError::parse(1, "empty input"))?;
    let n = parse_dimension(first)
        .map_err(|e| SeidelError::parse(first_line, e.to_string()))?;

    let expected = 1 + n * n + n + 1;
    if tokens.len() != expected {
        let line = tokens.last().map_or(1, |&(line, _)| line);
        return Err(SeidelError::parse(
            line,
            format!(
                "expected {} numbers (n, matrix, b, eps), found {}",
                expected,
                tokens.len()
            ),
        ));
    }

    let mut values = Vec::with_capacity(expected - 1);
    for &(line, token) in &tokens[1..] {
        let value =
            parse_float(token).map_err(|e| SeidelError::parse(line, e.to_string()))?;
        values.push(value);
    }

    let eps = values[n * n + n];
    if eps <= 0.0 {
        let line = tokens[expected - 1].0;
        return Err(SeidelError::parse(line, "eps must be > 0"));
    }

    let matrix = Matrix::from_row_major(n, values[..n * n].to_vec())?;
    let rhs = values[n * n..n * n + n].to_vec();
    Ok(SystemFile {
        system: LinearSystem::new(matrix, rhs)?,
        eps,
    })
}

/// Parse a system file.
pub fn parse_file(path: &std::path::Path) -> Result<SystemFile> {
    let content = std::fs::read_to_string(path).map_err(|e| SeidelError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;
    parse(&content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_float_accepts_comma() {
        assert_eq!(parse_float("0,25").unwrap(), 0.25);
        assert_eq!(parse_float(" -1.5 ").unwrap(), -1.5);
        assert_eq!(parse_float("1e-3").unwrap(), 1e-3);
    }

    #[test]
    fn test_parse_float_rejects_garbage() {
        assert!(matches!(
            parse_float("abc"),
            Err(SeidelError::InvalidNumber { .. })
        ));
        assert!(parse_float("").is_err());
        assert!(parse_float("1,2,3").is_err());
        assert!(parse_float("inf").is_err());
        assert!(parse_float("NaN").is_err());
    }

    #[test]
    fn test_parse_dimension() {
        assert_eq!(parse_dimension("3").unwrap(), 3);
        assert_eq!(parse_dimension("20").unwrap(), 20);
        assert!(parse_dimension("0").is_err());
        assert!(parse_dimension("21").is_err());
        assert!(parse_dimension("2.5").is_err());
    }

    #[test]
    fn test_parse_precision() {
        assert_eq!(parse_precision("0").unwrap(), 0);
        assert_eq!(parse_precision("17").unwrap(), MAX_PRECISION);
        assert!(matches!(
            parse_precision("400"),
            Err(SeidelError::InvalidInput { .. })
        ));
        assert!(parse_precision("-1").is_err());
        assert!(parse_precision("2.5").is_err());
    }

    #[test]
    fn test_parse_system() {
        let input = "2\n4 1\n1 3\n1 2\n0,000001\n";
        let file = parse(input).unwrap();
        assert_eq!(file.system.size(), 2);
        assert_eq!(
            file.system.matrix.to_rows(),
            vec![vec![4.0, 1.0], vec![1.0, 3.0]]
        );
        assert_eq!(file.system.rhs, vec![1.0, 2.0]);
        assert_eq!(file.eps, 1e-6);
    }

    #[test]
    fn test_parse_layout_free() {
        let file = parse("1 5 10 0.1").unwrap();
        assert_eq!(file.system.matrix.to_rows(), vec![vec![5.0]]);
        assert_eq!(file.system.rhs, vec![10.0]);
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(parse("   \n"), Err(SeidelError::ParseError { .. })));
        assert!(matches!(
            parse("2\n1 2\n3 4\n5 6\n"),
            Err(SeidelError::ParseError { line: 4, .. })
        ));
        assert!(matches!(
            parse("2\n1 2\n3 x\n5 6\n0.1"),
            Err(SeidelError::ParseError { line: 3, .. })
        ));
        assert!(parse("1 5 10 0").is_err());
        assert!(parse("30 1").is_err());
    }

    #[test]
    fn test_parse_file_missing() {
        let path = std::path::Path::new("/nonexistent/system.txt");
        let err = parse_file(path).unwrap_err();
        assert!(matches!(err, SeidelError::FileReadError { .. }));
    }
}
