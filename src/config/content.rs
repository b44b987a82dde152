//! Content seeding configuration

use serde::Deserialize;
use std::path::{Path, PathBuf};

use super::error::ValidationError;

/// Content configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContentConfig {
    /// YAML manifest loaded into the content store at startup
    pub seed_path: Option<PathBuf>,
}

impl ContentConfig {
    pub fn seed_path(&self) -> Option<&Path> {
        self.seed_path.as_deref()
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        match &self.seed_path {
            Some(path) if !path.is_file() => Err(ValidationError::SeedFileNotFound(
                path.display().to_string(),
            )),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn no_seed_path_is_valid() {
        assert!(ContentConfig::default().validate().is_ok());
    }

    #[test]
    fn existing_seed_file_is_valid() {
        let file = NamedTempFile::new().unwrap();
        let config = ContentConfig {
            seed_path: Some(file.path().to_path_buf()),
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn missing_seed_file_is_reported() {
        let config = ContentConfig {
            seed_path: Some(PathBuf::from("/nonexistent/seed.yaml")),
        };
        assert_eq!(
            config.validate(),
            Err(ValidationError::SeedFileNotFound("/nonexistent/seed.yaml".into()))
        );
    }
}
