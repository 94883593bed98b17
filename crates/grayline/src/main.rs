//! Grayline CLI - resize and grayscale a list of images through a staged pipeline.
//!
//! The sources, target size and output encoding come from the config file
//! (`$GRAYLINE_CONFIG` or the platform config directory). The only flag
//! selects between overlapping stages and one-image-at-a-time processing.
//!
//! # Usage
//!
//! ```bash
//! # Stages run concurrently (default)
//! grayline
//!
//! # Process each image fully before starting the next
//! grayline --concurrent=false
//! ```

use clap::{ArgAction, Parser};

mod cli;
mod logging;

/// Grayline - resize and grayscale images through a staged concurrent pipeline.
#[derive(Parser, Debug)]
#[command(name = "grayline")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Run pipeline stages concurrently (true) or sequentially (false)
    #[arg(
        long,
        action = ArgAction::Set,
        num_args = 0..=1,
        default_missing_value = "true",
        value_name = "BOOL"
    )]
    concurrent: Option<bool>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logging isn't initialized yet, so use eprintln for config warnings.
    let config = match grayline_core::Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!(
                "Warning: Failed to load config from {}: {e}\n  Using default configuration.",
                grayline_core::Config::default_path().display()
            );
            grayline_core::Config::default()
        }
    };
    logging::init_from_config(&config);

    tracing::debug!("Grayline v{}", grayline_core::VERSION);

    cli::run::execute(config, cli.concurrent).await
}
