use anyhow::Result;
use clap::Parser;
use semeval::cases::{self, TEST_CASES_FILE};
use semeval::metrics::calculate_metrics;
use semeval::report::{ResultsWriter, print_summary};
use semeval::review::{ClaudeBackend, DEFAULT_REVIEW_CMD, DEFAULT_REVIEW_TIMEOUT_SECS};
use semeval::runner::Harness;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;

/// Aggregate accuracy below this fails the run.
const ACCURACY_THRESHOLD: f64 = 0.8;

#[derive(Parser)]
#[command(name = "semeval")]
#[command(
    version,
    about = "Semantic preservation evaluator for documentation-review agents"
)]
struct Cli {
    /// Verbose diagnostics (equivalent to RUST_LOG=semeval=debug)
    #[arg(short, long)]
    verbose: bool,

    /// Directory for persisted results
    #[arg(long, default_value = "results")]
    results_dir: PathBuf,

    /// Review CLI command
    #[arg(long, default_value = DEFAULT_REVIEW_CMD)]
    review_cmd: String,

    /// Per-case review timeout in seconds
    #[arg(long, default_value_t = DEFAULT_REVIEW_TIMEOUT_SECS)]
    timeout: u64,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::from(1)
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode> {
    let cases = cases::load_test_cases(Path::new(TEST_CASES_FILE))?;

    let backend = ClaudeBackend::new()
        .with_cmd(&cli.review_cmd)
        .with_timeout(Duration::from_secs(cli.timeout));
    let harness = Harness::new(backend);

    let results = harness.run(&cases).await;
    let metrics = calculate_metrics(&results);

    let writer = ResultsWriter::new(&cli.results_dir);
    let (results_file, summary_file) = writer.save(&results, &metrics)?;
    println!();
    println!("Results saved to {}", results_file.display());
    println!("Summary saved to {}", summary_file.display());

    print_summary(&metrics);

    if metrics.accuracy < ACCURACY_THRESHOLD {
        Ok(ExitCode::from(1))
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

fn init_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let default = if verbose { "semeval=debug" } else { "semeval=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
