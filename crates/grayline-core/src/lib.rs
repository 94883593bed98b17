//! Grayline Core - a staged, concurrent image pipeline.
//!
//! Grayline takes an ordered list of image files, resizes each to a fixed
//! resolution, converts it to grayscale and writes the result next to a
//! derived output path.
//!
//! # Architecture
//!
//! Four stages connected by FIFO handoff queues, each running as its own task
//! so that work on different images overlaps:
//!
//! ```text
//! sources → Load → Resize → Grayscale → Save → outcomes
//! ```
//!
//! Closing a queue is the end-of-stream signal; it flows down the chain once
//! the source list is exhausted. A sequential mode runs the same stages one
//! image at a time for comparison.
//!
//! # Usage
//!
//! ```rust,ignore
//! use grayline_core::{Config, ExecutionMode, Pipeline};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), grayline_core::ConfigError> {
//!     let config = Config::load()?;
//!     let pipeline = Pipeline::new(&config);
//!
//!     let report = pipeline
//!         .run(config.sources(), ExecutionMode::Concurrent, |o| println!("{o}"))
//!         .await;
//!     println!("Done in {:?}", report.elapsed);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod pipeline;
pub mod types;

pub use config::Config;
pub use error::{ConfigError, PipelineError, PipelineResult};
pub use pipeline::{DestinationRule, ImageCodec, Job, Pipeline, StageObserver};
pub use types::{ExecutionMode, Outcome, RunReport, StageEvent, StageKind, StagePhase};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
