use std::process;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cyclemax::{resolve_input, run, CycleError, RunOptions, BUCKET_COUNT, MAX_EXPANSIONS};

/// Longest simple directed routing cycle over a hop log.
///
/// Reads `source|destination|claim|status` lines, groups edges by
/// (claim, status), and prints `claim,status,length` for one maximum-length
/// simple cycle.  Prints nothing when the input contains no cycle.
#[derive(Parser)]
#[command(version, about = "Longest simple routing cycle per (claim, status) group")]
struct Cli {
    /// Input hop log: a local path or an http(s):// URL
    input: String,

    /// Partition fan-out (number of on-disk buckets)
    #[arg(long, default_value_t = BUCKET_COUNT,
          value_parser = |s: &str| s.parse::<usize>()
              .map_err(|e| e.to_string())
              .and_then(|n| if n >= 1 { Ok(n) }
                        else { Err("--buckets must be >= 1".to_string()) }))]
    buckets: usize,

    /// Per-SCC DFS node-expansion ceiling (0 = unlimited)
    #[arg(long, default_value_t = MAX_EXPANSIONS)]
    max_expansions: u64,

    /// Print progress and diagnostic detail to stderr
    #[arg(long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "cyclemax=debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let source = resolve_input(&cli.input).unwrap_or_else(|e| {
        eprintln!("error: {}", e);
        process::exit(1);
    });

    let opts = RunOptions {
        buckets: cli.buckets,
        max_expansions: cli.max_expansions,
    };
    let report = run(source.path(), &opts).unwrap_or_else(|e| {
        eprintln!("error: {}", e);
        let code = match e {
            CycleError::InvalidBuckets => 2,
            _ => 1,
        };
        process::exit(code);
    });

    if let Some(best) = report.best {
        println!("{},{},{}", best.claim, best.status, best.length);
    }
}
