//! CLI entry point for the scatter data pipeline.

use anyhow::Result;
use book_scatter::config::{
    DEFAULT_INPUT_PATH, DEFAULT_LOWER_PERCENTILE, DEFAULT_MAX_ROWS, DEFAULT_OUTPUT_PATH,
    DEFAULT_SAMPLE_SEED, DEFAULT_SIZE_LIMIT_BYTES, DEFAULT_UPPER_PERCENTILE,
};
use book_scatter::{RunSummary, ScatterConfig, ScatterError, ScatterPipeline};
use clap::Parser;
use tracing::{debug, info};

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Build scatter plot data from the GoodReads books dataset",
    long_about = "Reads an xz-compressed GoodReads CSV, keeps the page count, blurb length,\n\
                  review count and rating of every complete row, clips each field to its\n\
                  0.5th-99.5th percentile range, samples at most 5000 rows and writes them\n\
                  as a JSON array.\n\n\
                  EXAMPLES:\n  \
                  # Default paths\n  \
                  book-scatter\n\n  \
                  # Custom input and output\n  \
                  book-scatter -i books.csv.xz -o points.json\n\n  \
                  # Machine-readable run summary\n  \
                  book-scatter --json | jq .rows_written"
)]
struct Args {
    /// Path to the dataset (`.xz` is decompressed, anything else read as plain CSV)
    #[arg(short, long, default_value = DEFAULT_INPUT_PATH)]
    input: String,

    /// Path of the JSON array to write
    #[arg(short, long, default_value = DEFAULT_OUTPUT_PATH)]
    output: String,

    /// Maximum number of points written
    #[arg(long, default_value_t = DEFAULT_MAX_ROWS)]
    max_rows: usize,

    /// Seed for the row sampler
    #[arg(long, default_value_t = DEFAULT_SAMPLE_SEED)]
    seed: u64,

    /// Lower clipping percentile (0.0 - 100.0)
    #[arg(long, default_value_t = DEFAULT_LOWER_PERCENTILE)]
    lower_percentile: f64,

    /// Upper clipping percentile (0.0 - 100.0)
    #[arg(long, default_value_t = DEFAULT_UPPER_PERCENTILE)]
    upper_percentile: f64,

    /// Output size in bytes above which a warning is printed
    #[arg(long, default_value_t = DEFAULT_SIZE_LIMIT_BYTES)]
    size_limit: u64,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Suppress progress output (only show warnings and the final result)
    #[arg(short, long)]
    quiet: bool,

    /// Print the run summary as JSON instead of the human-readable lines
    ///
    /// Disables all logs so stdout holds only JSON.
    #[arg(long)]
    json: bool,
}

/// Initialize the tracing subscriber for logging.
///
/// When `json_output` is true, logging is completely disabled to ensure
/// only JSON is written to stdout.
fn init_logging(level: &str, quiet: bool, json_output: bool) {
    if json_output {
        return;
    }

    use tracing_subscriber::EnvFilter;

    let effective_level = if quiet { "warn" } else { level };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(effective_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(&args.log_level, args.quiet, args.json);

    let config = ScatterConfig::builder()
        .input_path(&args.input)
        .output_path(&args.output)
        .max_rows(args.max_rows)
        .sample_seed(args.seed)
        .percentiles(args.lower_percentile, args.upper_percentile)
        .size_limit_bytes(args.size_limit)
        .build()?;
    debug!("Configuration: {:?}", config);

    let pipeline = ScatterPipeline::builder()
        .config(config)
        .on_progress(|update| debug!("[{}] {}", update.stage.display_name(), update.message))
        .build()?;

    match pipeline.run() {
        Ok(summary) => print_summary(&summary, args.json),
        Err(e) => {
            report_failure(&e, args.json)?;
            std::process::exit(1);
        }
    }
}

/// Print the outcome of a successful run.
///
/// Uses `println!` intentionally: these lines are the tool's output and must
/// be visible regardless of log level.
fn print_summary(summary: &RunSummary, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(summary)?);
        return Ok(());
    }

    info!(
        "Kept {} of {} rows ({} dropped during cleaning)",
        summary.rows_written,
        summary.rows_loaded,
        summary.rows_dropped()
    );

    println!("Successfully created {}", summary.output.path);
    println!("Final file size: {} bytes", summary.output.file_size_bytes);
    if summary.output.exceeds_limit() {
        println!(
            "Warning: {}",
            book_scatter::reporting::size_warning(&summary.output)
        );
    }
    Ok(())
}

fn report_failure(error: &ScatterError, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(error)?);
    } else {
        println!("{}", error.diagnostic());
    }
    Ok(())
}
