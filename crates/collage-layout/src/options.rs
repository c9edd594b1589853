use crate::constants::{DEFAULT_LAYOUT_ID, DEFAULT_MARKER_COLOR, DEFAULT_PAGE_ID};
use crate::types::*;
use crate::units::Unit;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Preferences injected into the collage controller at construction
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct ControllerConfig {
    // Display
    pub unit: Unit,

    // Cutting markers
    pub show_cutting_markers: bool,
    pub cutting_marker_color: String,

    // Grid
    pub mode: SpaceMode,

    // Initial selection
    pub page_id: String,
    pub layout_id: String,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            unit: Unit::Millimeters,
            show_cutting_markers: true,
            cutting_marker_color: DEFAULT_MARKER_COLOR.to_string(),
            mode: SpaceMode::Loose,
            page_id: DEFAULT_PAGE_ID.to_string(),
            layout_id: DEFAULT_LAYOUT_ID.to_string(),
        }
    }
}

impl ControllerConfig {
    /// Load config from JSON file
    #[cfg(feature = "serde")]
    pub async fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let config: Self = serde_json::from_slice(&bytes)
            .map_err(|e| CollageError::Config(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Save config to JSON file
    #[cfg(feature = "serde")]
    pub async fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| CollageError::Config(format!("Failed to serialize config: {}", e)))?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }

    /// Validate the config
    pub fn validate(&self) -> Result<()> {
        if self.cutting_marker_color.trim().is_empty() {
            return Err(CollageError::Config(
                "Cutting marker color must not be empty".to_string(),
            ));
        }

        if self.page_id.trim().is_empty() || self.layout_id.trim().is_empty() {
            return Err(CollageError::Config(
                "Initial page and layout ids must not be empty".to_string(),
            ));
        }

        Ok(())
    }

    pub fn cutting_markers(&self) -> CuttingMarkers {
        CuttingMarkers {
            visible: self.show_cutting_markers,
            color: self.cutting_marker_color.clone(),
        }
    }
}
