//! Sub-configuration structs with their defaults.

use image::imageops::FilterType;
use serde::{Deserialize, Serialize};

/// Pipeline execution settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Run stages concurrently (true) or one item at a time (false)
    pub concurrent: bool,

    /// Max jobs buffered between stages; 0 means unbounded
    pub buffer_size: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            concurrent: true,
            buffer_size: 0,
        }
    }
}

/// Input list and destination rule.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Ordered list of source images
    pub sources: Vec<String>,

    /// Segment of a source path that is replaced to form the destination
    pub source_segment: String,

    /// Replacement segment
    pub dest_segment: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            sources: vec![
                "images/image1.jpeg".to_string(),
                "images/image2.jpeg".to_string(),
                "images/image3.jpeg".to_string(),
                "images/image4.jpeg".to_string(),
            ],
            source_segment: "images/".to_string(),
            dest_segment: "images/output/".to_string(),
        }
    }
}

/// Resampling filter used by the resize stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResizeFilter {
    Nearest,
    Triangle,
    CatmullRom,
    Gaussian,
    #[default]
    Lanczos3,
}

impl From<ResizeFilter> for FilterType {
    fn from(filter: ResizeFilter) -> Self {
        match filter {
            ResizeFilter::Nearest => FilterType::Nearest,
            ResizeFilter::Triangle => FilterType::Triangle,
            ResizeFilter::CatmullRom => FilterType::CatmullRom,
            ResizeFilter::Gaussian => FilterType::Gaussian,
            ResizeFilter::Lanczos3 => FilterType::Lanczos3,
        }
    }
}

/// Resize stage settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TransformConfig {
    /// Target width in pixels
    pub width: u32,

    /// Target height in pixels
    pub height: u32,

    /// Resampling filter
    pub filter: ResizeFilter,
}

impl Default for TransformConfig {
    fn default() -> Self {
        Self {
            width: 500,
            height: 500,
            filter: ResizeFilter::Lanczos3,
        }
    }
}

/// Encoding used by the save stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EncodeFormat {
    #[default]
    Jpeg,
    Png,
}

/// Save stage settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Output encoding, independent of the destination file extension
    pub format: EncodeFormat,

    /// JPEG quality (1-100)
    pub jpeg_quality: u8,

    /// Create missing destination directories before writing
    pub create_dirs: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: EncodeFormat::Jpeg,
            jpeg_quality: 75,
            create_dirs: false,
        }
    }
}

/// Resource limits applied when loading sources.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Maximum file size in megabytes
    pub max_file_size_mb: u64,

    /// Maximum image dimension (width or height)
    pub max_image_dimension: u32,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_file_size_mb: 100,
            max_image_dimension: 10000,
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: error, warn, info, debug, trace
    pub level: String,

    /// Log format: "pretty" or "json"
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}
