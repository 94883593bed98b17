//! The unit of work flowing through the pipeline.

use image::DynamicImage;

use crate::config::PathsConfig;
use crate::error::{PipelineError, PipelineResult};

/// Derives a destination path from a source path by segment substitution.
///
/// Only the first occurrence of the source segment is replaced, so
/// `images/a/images/b.jpeg` maps to `images/output/a/images/b.jpeg`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DestinationRule {
    source_segment: String,
    dest_segment: String,
}

impl DestinationRule {
    /// Create a rule replacing `source_segment` with `dest_segment`.
    pub fn new(source_segment: impl Into<String>, dest_segment: impl Into<String>) -> Self {
        Self {
            source_segment: source_segment.into(),
            dest_segment: dest_segment.into(),
        }
    }

    /// Build the rule from the paths section of the configuration.
    pub fn from_config(paths: &PathsConfig) -> Self {
        Self::new(paths.source_segment.clone(), paths.dest_segment.clone())
    }

    /// Map a source path to its destination.
    ///
    /// Sources that don't contain the segment are rejected rather than
    /// mapped onto themselves, which would overwrite the input.
    pub fn dest_for(&self, source: &str) -> PipelineResult<String> {
        if self.source_segment.is_empty() || !source.contains(&self.source_segment) {
            return Err(PipelineError::UnmappedSource {
                path: source.to_string(),
                segment: self.source_segment.clone(),
            });
        }
        Ok(source.replacen(&self.source_segment, &self.dest_segment, 1))
    }
}

/// One image moving through the stages.
///
/// A job is owned by exactly one stage at a time. The destination is fixed
/// when the job is created; only the image payload changes along the way.
#[derive(Debug)]
pub struct Job {
    source_path: String,
    image: DynamicImage,
    dest_path: String,
}

impl Job {
    /// Create a job for a freshly decoded source.
    pub fn new(source_path: String, image: DynamicImage, dest_path: String) -> Self {
        Self {
            source_path,
            image,
            dest_path,
        }
    }

    pub fn source_path(&self) -> &str {
        &self.source_path
    }

    pub fn dest_path(&self) -> &str {
        &self.dest_path
    }

    pub fn image(&self) -> &DynamicImage {
        &self.image
    }

    /// Replace the payload with `f(payload)`.
    pub fn map_image(self, f: impl FnOnce(DynamicImage) -> DynamicImage) -> Self {
        Self {
            image: f(self.image),
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::GenericImageView;

    #[test]
    fn test_default_rule_maps_into_output_dir() {
        let rule = DestinationRule::from_config(&PathsConfig::default());
        assert_eq!(
            rule.dest_for("images/image1.jpeg").unwrap(),
            "images/output/image1.jpeg"
        );
    }

    #[test]
    fn test_rule_replaces_first_occurrence_only() {
        let rule = DestinationRule::new("images/", "images/output/");
        assert_eq!(
            rule.dest_for("images/a/images/b.jpeg").unwrap(),
            "images/output/a/images/b.jpeg"
        );
    }

    #[test]
    fn test_rule_matches_mid_path() {
        let rule = DestinationRule::new("/in/", "/out/");
        assert_eq!(rule.dest_for("/data/in/x.png").unwrap(), "/data/out/x.png");
    }

    #[test]
    fn test_unmapped_source_rejected() {
        let rule = DestinationRule::new("images/", "images/output/");
        let err = rule.dest_for("photos/image1.jpeg").unwrap_err();
        assert!(matches!(err, PipelineError::UnmappedSource { .. }));
    }

    #[test]
    fn test_map_image_keeps_paths() {
        let job = Job::new(
            "images/a.jpeg".into(),
            DynamicImage::new_rgb8(4, 4),
            "images/output/a.jpeg".into(),
        );
        let job = job.map_image(|img| img.resize_exact(2, 2, image::imageops::FilterType::Nearest));
        assert_eq!(job.image().dimensions(), (2, 2));
        assert_eq!(job.source_path(), "images/a.jpeg");
        assert_eq!(job.dest_path(), "images/output/a.jpeg");
    }
}
