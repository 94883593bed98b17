//! Configuration validation with range checks.

use crate::error::ConfigError;

use super::Config;

impl Config {
    /// Validate configuration values are within acceptable ranges.
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.transform.width == 0 || self.transform.height == 0 {
            return Err(ConfigError::ValidationError(
                "transform.width and transform.height must be > 0".into(),
            ));
        }
        if !(1..=100).contains(&self.output.jpeg_quality) {
            return Err(ConfigError::ValidationError(
                "output.jpeg_quality must be between 1 and 100".into(),
            ));
        }
        if self.paths.source_segment.is_empty() {
            return Err(ConfigError::ValidationError(
                "paths.source_segment must not be empty".into(),
            ));
        }
        if self.paths.source_segment == self.paths.dest_segment {
            return Err(ConfigError::ValidationError(format!(
                "paths.dest_segment must differ from paths.source_segment ({:?}), \
                 outputs would overwrite their sources",
                self.paths.source_segment
            )));
        }
        if self.limits.max_file_size_mb == 0 {
            return Err(ConfigError::ValidationError(
                "limits.max_file_size_mb must be > 0".into(),
            ));
        }
        if self.limits.max_image_dimension == 0 {
            return Err(ConfigError::ValidationError(
                "limits.max_image_dimension must be > 0".into(),
            ));
        }
        if !matches!(self.logging.format.as_str(), "pretty" | "json") {
            return Err(ConfigError::ValidationError(format!(
                "logging.format must be \"pretty\" or \"json\", got {:?}",
                self.logging.format
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_passes_validation() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_dimensions() {
        let mut config = Config::default();
        config.transform.height = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("transform.width"));
    }

    #[test]
    fn test_validate_rejects_out_of_range_quality() {
        let mut config = Config::default();
        config.output.jpeg_quality = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("jpeg_quality"));

        config.output.jpeg_quality = 101;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_empty_source_segment() {
        let mut config = Config::default();
        config.paths.source_segment.clear();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("source_segment"));
    }

    #[test]
    fn test_validate_rejects_dest_equal_to_source_segment() {
        let mut config = Config::default();
        config.paths.dest_segment = config.paths.source_segment.clone();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("dest_segment"));

        let err = Config::from_toml(
            "[paths]\nsource_segment = \"photos/\"\ndest_segment = \"photos/\"\n",
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn test_validate_rejects_zero_limits() {
        let mut config = Config::default();
        config.limits.max_image_dimension = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("max_image_dimension"));
    }

    #[test]
    fn test_validate_rejects_unknown_log_format() {
        let mut config = Config::default();
        config.logging.format = "xml".into();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("logging.format"));
    }
}
