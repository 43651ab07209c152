//! Seidel - Gauss-Seidel linear system solver
//!
//! Reads a square system A·x = b, reorders it for diagonal dominance, and
//! solves it iteratively.
//!
//! # Usage
//!
//! ```bash
//! seidel --file system.txt
//! seidel --random 5 --low -10 --high 10 --seed 42 --eps 1e-8
//! seidel            # interactive
//! ```

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;
use tracing_subscriber::EnvFilter;

use seidel_core::{
    error::{Result, SeidelError},
    input::{self, generate_random_system, Prompter},
    matrix::LinearSystem,
    report::{format_power10, write_solution, DEFAULT_PRECISION},
    solve_system, SolverConfig, DEFAULT_MAX_ITERATIONS,
};

/// Gauss-Seidel solver with diagonal-dominance reordering
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Read the system (n, A, b, eps) from a file
    #[arg(short, long, value_name = "SYSTEM_FILE", conflicts_with = "random")]
    file: Option<PathBuf>,

    /// Generate a random diagonally dominant system of size N
    #[arg(short, long, value_name = "N", value_parser = input::parse_dimension)]
    random: Option<usize>,

    /// Lower bound for random elements
    #[arg(long, default_value_t = -10.0, allow_negative_numbers = true)]
    low: f64,

    /// Upper bound for random elements
    #[arg(long, default_value_t = 10.0, allow_negative_numbers = true)]
    high: f64,

    /// Seed for the random generator
    #[arg(long)]
    seed: Option<u64>,

    /// Convergence tolerance (overrides the file's value)
    #[arg(short, long, value_parser = input::parse_tolerance)]
    eps: Option<f64>,

    /// Maximum Gauss-Seidel iterations
    #[arg(short, long, default_value_t = DEFAULT_MAX_ITERATIONS)]
    max_iterations: usize,

    /// Decimals shown in printed values (at most 17)
    #[arg(short, long, default_value_t = DEFAULT_PRECISION, value_parser = input::parse_precision)]
    precision: usize,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Where the system comes from.
enum Source {
    File(PathBuf),
    Random { n: usize },
    Keyboard,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn print_system(system: &LinearSystem, precision: usize) {
    println!("Generated matrix A:");
    for row in system.matrix.rows() {
        let line: Vec<String> = row.iter().map(|v| format_power10(*v, precision)).collect();
        println!("{}", line.join(" "));
    }
    println!("Generated vector b:");
    let line: Vec<String> = system
        .rhs
        .iter()
        .map(|v| format_power10(*v, precision))
        .collect();
    println!("{}", line.join(" "));
}

fn run(args: &Args) -> Result<()> {
    let stdin = io::stdin();
    let mut prompter = Prompter::new(stdin.lock(), io::stdout());

    let source = match (&args.file, args.random) {
        (Some(path), _) => Source::File(path.clone()),
        (None, Some(n)) => Source::Random { n },
        (None, None) => match prompter.read_source_choice()? {
            1 => Source::Keyboard,
            2 => Source::File(prompter.read_path()?),
            _ => Source::Random {
                n: prompter.read_dimension()?,
            },
        },
    };

    // Bounds are only asked for interactively when no flag selected the source.
    let interactive = args.file.is_none() && args.random.is_none();

    let (system, file_eps) = match source {
        Source::File(path) => {
            let file = input::parse_file(&path)?;
            (file.system, Some(file.eps))
        }
        Source::Random { n } => {
            let (low, high) = if interactive {
                prompter.read_bounds()?
            } else {
                (args.low, args.high)
            };
            let seed = args.seed.unwrap_or_else(|| rand::thread_rng().gen());
            tracing::debug!(seed, "generating random system");
            let mut rng = Pcg64::seed_from_u64(seed);
            let system = generate_random_system(&mut rng, n, low, high)?;
            print_system(&system, args.precision);
            (system, None)
        }
        Source::Keyboard => (prompter.read_system()?, None),
    };

    let eps = match args.eps.or(file_eps) {
        Some(eps) => eps,
        None => prompter.read_tolerance()?,
    };

    let config = SolverConfig::new()
        .with_tolerance(eps)
        .with_max_iterations(args.max_iterations);
    let solution = solve_system(&system, &config)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_solution(&mut out, &solution, args.precision)
        .and_then(|()| out.flush())
        .map_err(|e| SeidelError::InputError {
            message: e.to_string(),
        })?;

    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        // The method does not apply to this system; that is an answer, not a failure.
        Err(e) if e.is_method_limitation() => {
            println!("{}", e);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
