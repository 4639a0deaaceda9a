use std::io::stderr;
use std::path::{Path, PathBuf};
use std::process::exit;
use std::time::Instant;

use anyhow::Result;
use tracing::info;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, Layer};

use recordstream_parser::config::PipelineConfig;
use recordstream_parser::engine::AsyncEngine;
use recordstream_parser::sink::JsonLinesSink;

#[tokio::main]
async fn main() -> Result<()> {
    //NOTE: Scanning buckets and directories for new files belongs to the caller, so the CLI only
    //      takes an explicit list of record files.
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 3 {
        eprintln!("Usage: recordstream-parser [config].json [record file]...");
        eprintln!("Record files may be legacy .rcd (v5), .rcd (v6) or .rcd.gz (v6)");
        exit(1);
    }

    let config = PipelineConfig::load(Path::new(&args[1]))?;

    setup_logging(parse_log_level(&config.log_level));

    let files: Vec<PathBuf> = args[2..].iter().map(PathBuf::from).collect();
    let sink = JsonLinesSink::open(&config.output_path)?;
    let engine = AsyncEngine::new(config);

    let timer = Instant::now();
    let report = engine.run(files, sink).await?;
    let duration = timer.elapsed();

    info!("Processed record files in: {duration:?}");
    info!(
        "Files read [{}], files failed [{}], records written [{}], transactions skipped [{}], chunks aborted [{}]",
        report.files_read, report.files_failed, report.records_written, report.transactions_skipped, report.chunks_aborted
    );

    Ok(())
}

fn parse_log_level(level: &str) -> LevelFilter {
    match level.to_lowercase().as_str() {
        "trace" => LevelFilter::TRACE,
        "debug" => LevelFilter::DEBUG,
        "info" => LevelFilter::INFO,
        "warn" => LevelFilter::WARN,
        "error" => LevelFilter::ERROR,
        _ => {
            eprintln!("Invalid log level '{}', defaulting to 'error'", level);
            LevelFilter::ERROR
        }
    }
}

fn setup_logging(level: LevelFilter) {
    let terminal_log = fmt::layer()
        .with_target(false)
        .with_writer(stderr)
        .with_filter(level);

    tracing_subscriber::registry()
        .with(terminal_log)
        .init();
}
