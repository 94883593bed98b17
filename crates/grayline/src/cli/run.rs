//! Runs the configured sources through the pipeline and prints the report.

use grayline_core::{Config, ExecutionMode, Pipeline};

/// Pick the execution mode: the CLI flag wins over `pipeline.concurrent`.
pub fn resolve_mode(flag: Option<bool>, config: &Config) -> ExecutionMode {
    ExecutionMode::from_concurrent(flag.unwrap_or(config.pipeline.concurrent))
}

/// Execute a run.
///
/// Prints one line per saved image as it completes, then the total time.
pub async fn execute(config: Config, concurrent: Option<bool>) -> anyhow::Result<()> {
    let mode = resolve_mode(concurrent, &config);
    let sources = config.sources();
    if sources.is_empty() {
        tracing::warn!("No sources configured; set paths.sources in the config file");
    }

    println!("With concurrency: {}", mode.is_concurrent());

    let pipeline = Pipeline::new(&config);
    let report = pipeline
        .run(sources, mode, |outcome| println!("{outcome}"))
        .await;

    if report.skipped() > 0 {
        tracing::warn!("{} image(s) could not be loaded", report.skipped());
    }

    println!("\nPipeline completed in {:?}", report.elapsed);
    Ok(())
}
