//! Random diagonally dominant systems for demos and tests.

use rand::Rng;

use crate::error::{Result, SeidelError};
use crate::matrix::{LinearSystem, Matrix};

/// Most decimal places a generated value keeps.
const MAX_DIGITS: i32 = 10;

/// Round to a random number of decimal places.
fn rough(rng: &mut impl Rng, value: f64) -> f64 {
    let scale = 10f64.powi(rng.gen_range(0..=MAX_DIGITS));
    (value * scale).round() / scale
}

fn sample(rng: &mut impl Rng, low: f64, high: f64) -> f64 {
    let value = if low == high {
        low
    } else {
        rng.gen_range(low..=high)
    };
    rough(rng, value)
}

/// Generate a strictly diagonally dominant `n`×`n` system.
///
/// Off-diagonal entries and `b` are drawn from `[low, high]`; each diagonal
/// entry is drawn from `[s + 1, s + 5]` where `s` is the absolute sum of the
/// rest of its row. All values are rounded to a random number of decimals.
pub fn generate_random_system(
    rng: &mut impl Rng,
    n: usize,
    low: f64,
    high: f64,
) -> Result<LinearSystem> {
    if n == 0 {
        return Err(SeidelError::invalid_input("n must be at least 1"));
    }
    if !(low.is_finite() && high.is_finite()) {
        return Err(SeidelError::invalid_input("bounds must be finite"));
    }
    if low > high {
        return Err(SeidelError::invalid_input(format!(
            "lower bound {} is greater than upper bound {}",
            low, high
        )));
    }

    let mut matrix = Matrix::zeros(n);
    for i in 0..n {
        let mut off = 0.0;
        for j in (0..n).filter(|&j| j != i) {
            let value = sample(rng, low, high);
            matrix.set(i, j, value);
            off += value.abs();
        }
        // Rounding may pull the value down, but never below s + 0.5.
        matrix.set(i, i, sample(rng, off + 1.0, off + 5.0));
    }

    let rhs = (0..n).map(|_| sample(rng, low, high)).collect();
    LinearSystem::new(matrix, rhs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::is_dominant;
    use rand::SeedableRng;
    use rand_pcg::Pcg64;

    #[test]
    fn test_generated_system_is_dominant() {
        let mut rng = Pcg64::seed_from_u64(42);
        for n in 1..=20 {
            let sys = generate_random_system(&mut rng, n, -10.0, 10.0).unwrap();
            assert_eq!(sys.size(), n);
            assert_eq!(sys.rhs.len(), n);
            assert!(is_dominant(&sys.matrix));
            for i in 0..n {
                let off = sys.matrix.row_abs_sum(i) - sys.matrix.diagonal(i).abs();
                assert!(sys.matrix.diagonal(i) > off);
            }
        }
    }

    #[test]
    fn test_values_within_bounds() {
        let mut rng = Pcg64::seed_from_u64(1);
        let sys = generate_random_system(&mut rng, 6, 2.0, 3.0).unwrap();
        for i in 0..6 {
            for j in (0..6).filter(|&j| j != i) {
                let v = sys.matrix.get(i, j);
                assert!((2.0..=3.0).contains(&v), "{} out of range", v);
            }
        }
    }

    #[test]
    fn test_same_seed_same_system() {
        let mut first = Pcg64::seed_from_u64(9);
        let mut second = Pcg64::seed_from_u64(9);
        let a = generate_random_system(&mut first, 4, -1.0, 1.0).unwrap();
        let b = generate_random_system(&mut second, 4, -1.0, 1.0).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_rejects_bad_bounds() {
        let mut rng = Pcg64::seed_from_u64(0);
        assert!(generate_random_system(&mut rng, 3, 5.0, 1.0).is_err());
        assert!(generate_random_system(&mut rng, 0, 0.0, 1.0).is_err());
        assert!(generate_random_system(&mut rng, 2, 1.0, 1.0).is_ok());
    }
}
