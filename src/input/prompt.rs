//! Interactive keyboard input for the CLI frontend.
//!
//! Every reader re-prompts on bad input instead of failing; only I/O errors
//! and end of input abort.

use std::io::{BufRead, Write};

use crate::error::{Result, SeidelError};
use crate::matrix::{LinearSystem, Matrix};

use super::{parse_dimension, parse_float, parse_tolerance};

/// Line-oriented prompter over any reader/writer pair.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

fn io_error(e: std::io::Error) -> SeidelError {
    SeidelError::InputError {
        message: e.to_string(),
    }
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    /// Create a prompter.
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    fn say(&mut self, message: &str) -> Result<()> {
        writeln!(self.output, "{}", message).map_err(io_error)
    }

    fn ask(&mut self, prompt: &str) -> Result<String> {
        write!(self.output, "{}", prompt).map_err(io_error)?;
        self.output.flush().map_err(io_error)?;

        let mut line = String::new();
        let read = self.input.read_line(&mut line).map_err(io_error)?;
        if read == 0 {
            return Err(SeidelError::InputError {
                message: "unexpected end of input".to_string(),
            });
        }
        Ok(line.trim().to_string())
    }

    /// Read exactly `count` numbers from one line.
    pub fn read_numbers(&mut self, prompt: &str, count: usize) -> Result<Vec<f64>> {
        loop {
            let line = self.ask(prompt)?;
            if line.is_empty() {
                self.say("error: empty line, try again")?;
                continue;
            }
            let tokens: Vec<&str> = line.split_whitespace().collect();
            if tokens.len() != count {
                self.say(&format!(
                    "error: expected {} numbers, got {}",
                    count,
                    tokens.len()
                ))?;
                continue;
            }
            let parsed: Result<Vec<f64>> = tokens.iter().map(|t| parse_float(t)).collect();
            match parsed {
                Ok(values) => return Ok(values),
                Err(e) => self.say(&format!("error: {}, try again", e))?,
            }
        }
    }

    /// Read the system size.
    pub fn read_dimension(&mut self) -> Result<usize> {
        loop {
            let line = self.ask(&format!("Enter n (1..={}): ", crate::MAX_DIMENSION))?;
            if line.split_whitespace().count() != 1 {
                self.say("error: enter exactly one number for n")?;
                continue;
            }
            match parse_dimension(&line) {
                Ok(n) => return Ok(n),
                Err(e) => self.say(&format!("error: {}", e))?,
            }
        }
    }

    /// Read a whole system: size, rows, then right-hand side.
    pub fn read_system(&mut self) -> Result<LinearSystem> {
        let n = self.read_dimension()?;
        let mut data = Vec::with_capacity(n * n);
        for i in 0..n {
            let row = self.read_numbers(&format!("Row {} of {} ({} numbers): ", i + 1, n, n), n)?;
            data.extend(row);
        }
        let rhs = self.read_numbers(&format!("Vector b ({} numbers): ", n), n)?;
        LinearSystem::new(Matrix::from_row_major(n, data)?, rhs)
    }

    /// Read a positive tolerance.
    pub fn read_tolerance(&mut self) -> Result<f64> {
        loop {
            let line = self.ask("Enter tolerance eps: ")?;
            match parse_tolerance(&line) {
                Ok(eps) => return Ok(eps),
                Err(e) => self.say(&format!("error: {}", e))?,
            }
        }
    }

    /// Read `low <= high` bounds for random generation.
    pub fn read_bounds(&mut self) -> Result<(f64, f64)> {
        loop {
            let low = self.ask("Lower bound for elements: ")?;
            let high = self.ask("Upper bound for elements: ")?;
            match (parse_float(&low), parse_float(&high)) {
                (Ok(low), Ok(high)) if low <= high => return Ok((low, high)),
                (Ok(_), Ok(_)) => self.say("error: lower bound is greater than upper bound")?,
                (Err(e), _) | (_, Err(e)) => self.say(&format!("error: {}, try again", e))?,
            }
        }
    }

    /// Ask which input source to use; returns `1`, `2` or `3`.
    pub fn read_source_choice(&mut self) -> Result<u8> {
        self.say("Choose input method:")?;
        self.say("1) keyboard")?;
        self.say("2) file")?;
        self.say("3) random matrix")?;
        loop {
            match self.ask("Your choice: ")?.as_str() {
                "1" => return Ok(1),
                "2" => return Ok(2),
                "3" => return Ok(3),
                _ => self.say("error: unknown option")?,
            }
        }
    }

    /// Ask for a file path.
    pub fn read_path(&mut self) -> Result<std::path::PathBuf> {
        loop {
            let line = self.ask("Path to system file: ")?;
            if !line.is_empty() {
                return Ok(line.into());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prompter(input: &str) -> Prompter<&[u8], Vec<u8>> {
        Prompter::new(input.as_bytes(), Vec::new())
    }

    #[test]
    fn test_read_system_with_retries() {
        let input = "abc\n0\n2\n4 1\n\n1\n1 3\n1 x\n1,5 2\n";
        let mut p = prompter(input);
        let sys = p.read_system().unwrap();
        assert_eq!(sys.matrix.to_rows(), vec![vec![4.0, 1.0], vec![1.0, 3.0]]);
        assert_eq!(sys.rhs, vec![1.5, 2.0]);

        let out = String::from_utf8(p.output).unwrap();
        assert!(out.contains("error: empty line"));
        assert!(out.contains("expected 2 numbers, got 1"));
    }

    #[test]
    fn test_read_tolerance_rejects_non_positive() {
        let mut p = prompter("-1\n0\n1e-4\n");
        assert_eq!(p.read_tolerance().unwrap(), 1e-4);
    }

    #[test]
    fn test_read_bounds_order() {
        let mut p = prompter("5\n1\n-2\n3,5\n");
        assert_eq!(p.read_bounds().unwrap(), (-2.0, 3.5));
    }

    #[test]
    fn test_end_of_input() {
        let mut p = prompter("2\n1 2\n");
        assert!(matches!(
            p.read_system(),
            Err(SeidelError::InputError { .. })
        ));
    }

    #[test]
    fn test_source_choice() {
        let mut p = prompter("9\n3\n");
        assert_eq!(p.read_source_choice().unwrap(), 3);
    }
}
