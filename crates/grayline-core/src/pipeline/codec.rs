//! Reading and writing image files.
//!
//! Decoding sniffs the format from the file contents and falls back to the
//! extension. Encoding uses the configured output format regardless of the
//! destination extension.

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{DynamicImage, GenericImageView, ImageFormat};
use std::fs::File;
use std::io::{BufWriter, Cursor, Write};
use std::path::Path;

use crate::config::{EncodeFormat, LimitsConfig, OutputConfig};
use crate::error::{PipelineError, PipelineResult};

/// Decodes source files and encodes results, with configurable limits.
#[derive(Debug, Clone)]
pub struct ImageCodec {
    limits: LimitsConfig,
    output: OutputConfig,
}

impl ImageCodec {
    /// Create a new codec.
    pub fn new(limits: LimitsConfig, output: OutputConfig) -> Self {
        Self { limits, output }
    }

    /// Read and decode the image at `path`.
    pub fn read(&self, path: &str) -> PipelineResult<DynamicImage> {
        let size = std::fs::metadata(path)
            .map_err(|e| PipelineError::SourceOpen {
                path: path.to_string(),
                message: e.to_string(),
            })?
            .len();

        let max_bytes = self.limits.max_file_size_mb.saturating_mul(1024 * 1024);
        if size > max_bytes {
            return Err(PipelineError::FileTooLarge {
                path: path.to_string(),
                size_mb: size / (1024 * 1024),
                max_mb: self.limits.max_file_size_mb,
            });
        }

        let bytes = std::fs::read(path).map_err(|e| PipelineError::SourceOpen {
            path: path.to_string(),
            message: e.to_string(),
        })?;
        self.decode(bytes, path)
    }

    /// Decode an in-memory buffer. `path` is used for format fallback and errors.
    pub fn decode(&self, bytes: Vec<u8>, path: &str) -> PipelineResult<DynamicImage> {
        let mut reader = image::ImageReader::new(Cursor::new(bytes))
            .with_guessed_format()
            .map_err(|e| PipelineError::Decode {
                path: path.to_string(),
                message: format!("Cannot detect image format: {}", e),
            })?;

        if reader.format().is_none() {
            let format =
                ImageFormat::from_path(path).map_err(|_| PipelineError::UnsupportedFormat {
                    path: path.to_string(),
                    format: Path::new(path)
                        .extension()
                        .and_then(|e| e.to_str())
                        .unwrap_or("unknown")
                        .to_string(),
                })?;
            reader.set_format(format);
        }

        let image = reader.decode().map_err(|e| PipelineError::Decode {
            path: path.to_string(),
            message: e.to_string(),
        })?;

        let (width, height) = image.dimensions();
        let max_dim = self.limits.max_image_dimension;
        if width > max_dim || height > max_dim {
            return Err(PipelineError::ImageTooLarge {
                path: path.to_string(),
                width,
                height,
                max_dim,
            });
        }

        Ok(image)
    }

    /// Encode `image` in the configured output format.
    pub fn encode(&self, image: &DynamicImage, path: &str) -> PipelineResult<Vec<u8>> {
        let mut buffer = Vec::new();
        self.encode_into(image, &mut buffer, path)?;
        Ok(buffer)
    }

    /// Encode `image` and write it to `path`.
    pub fn write(&self, image: &DynamicImage, path: &str) -> PipelineResult<()> {
        if self.output.create_dirs {
            if let Some(parent) = Path::new(path).parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent).map_err(|e| PipelineError::DestinationCreate {
                    path: path.to_string(),
                    message: e.to_string(),
                })?;
            }
        }

        let file = File::create(path).map_err(|e| PipelineError::DestinationCreate {
            path: path.to_string(),
            message: e.to_string(),
        })?;
        let mut writer = BufWriter::new(file);
        self.encode_into(image, &mut writer, path)?;
        writer.flush().map_err(|e| PipelineError::Encode {
            path: path.to_string(),
            message: e.to_string(),
        })
    }

    fn encode_into<W: Write>(
        &self,
        image: &DynamicImage,
        writer: &mut W,
        path: &str,
    ) -> PipelineResult<()> {
        let result = match self.output.format {
            EncodeFormat::Jpeg => image.write_with_encoder(JpegEncoder::new_with_quality(
                writer,
                self.output.jpeg_quality,
            )),
            EncodeFormat::Png => image.write_with_encoder(PngEncoder::new(writer)),
        };
        result.map_err(|e| PipelineError::Encode {
            path: path.to_string(),
            message: e.to_string(),
        })
    }
}

impl Default for ImageCodec {
    fn default() -> Self {
        Self::new(LimitsConfig::default(), OutputConfig::default())
    }
}
