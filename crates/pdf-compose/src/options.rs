use crate::types::*;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Image-to-PDF configuration
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ComposeOptions {
    /// JPEG quality used when placing each image on its page
    pub jpeg_quality: u8,
    /// JPEG quality of cropped replacements
    pub crop_quality: u8,
    /// Resolution assumed when turning pixels into page size
    pub assumed_dpi: f32,
    pub output_file_name: String,
    pub title: String,
}

impl Default for ComposeOptions {
    fn default() -> Self {
        Self {
            jpeg_quality: 80,
            crop_quality: 100,
            assumed_dpi: 72.0,
            output_file_name: "converted.pdf".to_string(),
            title: "Converted Images".to_string(),
        }
    }
}

impl ComposeOptions {
    /// Load options from JSON file
    #[cfg(feature = "serde")]
    pub async fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let options: Self = serde_json::from_slice(&bytes)
            .map_err(|e| ComposeError::Config(format!("Failed to parse config: {}", e)))?;
        options.validate()?;
        Ok(options)
    }

    /// Save options to JSON file
    #[cfg(feature = "serde")]
    pub async fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| ComposeError::Config(format!("Failed to serialize config: {}", e)))?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        for (name, quality) in [
            ("JPEG quality", self.jpeg_quality),
            ("Crop quality", self.crop_quality),
        ] {
            if !(1..=100).contains(&quality) {
                return Err(ComposeError::Config(format!(
                    "{} must be between 1 and 100 (got {})",
                    name, quality
                )));
            }
        }

        if !self.assumed_dpi.is_finite() || self.assumed_dpi <= 0.0 {
            return Err(ComposeError::Config(format!(
                "Resolution must be positive (got {})",
                self.assumed_dpi
            )));
        }

        if self.output_file_name.trim().is_empty() {
            return Err(ComposeError::Config(
                "Output file name must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}
