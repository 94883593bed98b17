//! Error types for the Grayline image pipeline.
//!
//! Pipeline errors are organized by the stage that detects them. Load-side
//! errors cause the item to be skipped; save-side errors cause it to be
//! reported as failed. Neither kind ever aborts a run.

use thiserror::Error;

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the config file from disk
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// Failed to parse TOML configuration
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Configuration values are invalid
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Per-item pipeline errors, organized by stage.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Source file could not be opened or read
    #[error("Can't open image file {path}: {message}")]
    SourceOpen { path: String, message: String },

    /// Source bytes could not be decoded
    #[error("Can't decode image file {path}: {message}")]
    Decode { path: String, message: String },

    /// Neither content sniffing nor the extension identified a format
    #[error("Unsupported format for {path}: {format}")]
    UnsupportedFormat { path: String, format: String },

    /// File exceeds size limit
    #[error("File too large: {path} ({size_mb}MB > {max_mb}MB)")]
    FileTooLarge {
        path: String,
        size_mb: u64,
        max_mb: u64,
    },

    /// Image dimensions exceed limit
    #[error("Image too large: {path} ({width}x{height} > {max_dim})")]
    ImageTooLarge {
        path: String,
        width: u32,
        height: u32,
        max_dim: u32,
    },

    /// The destination rule does not apply to this source
    #[error("No destination for {path}: path does not contain {segment:?}")]
    UnmappedSource { path: String, segment: String },

    /// Output file could not be created
    #[error("Can't create output image file {path}: {message}")]
    DestinationCreate { path: String, message: String },

    /// Image could not be encoded or written
    #[error("Can't encode image to file {path}: {message}")]
    Encode { path: String, message: String },

    /// A stage's blocking task panicked or was cancelled
    #[error("{stage} stage failed for {path}: {message}")]
    Stage {
        stage: &'static str,
        path: String,
        message: String,
    },
}

impl PipelineError {
    /// Whether this error is detected by the load stage (item skipped).
    pub fn is_load_error(&self) -> bool {
        matches!(
            self,
            Self::SourceOpen { .. }
                | Self::Decode { .. }
                | Self::UnsupportedFormat { .. }
                | Self::FileTooLarge { .. }
                | Self::ImageTooLarge { .. }
                | Self::UnmappedSource { .. }
        )
    }
}

/// Convenience type alias for pipeline-specific results.
pub type PipelineResult<T> = std::result::Result<T, PipelineError>;
