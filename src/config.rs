use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::WindowError;

/// Smallest logical size the native surface may be resized to
pub const MIN_WINDOW_SIZE: (u32, u32) = (300, 200);

/// Window creation parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    /// Logical width
    pub width: u32,
    /// Logical height
    pub height: u32,
    /// Scale the frame buffer by the surface content scale
    pub hidpi: bool,
    /// Color the graphics context is cleared to on reflow
    pub background: [u8; 4],
    /// Keep the previous texture when nothing changed since the last upload
    pub reuse_clean_texture: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Mustard".to_string(),
            width: 800,
            height: 600,
            hidpi: false,
            background: [255, 255, 255, 255],
            reuse_clean_texture: false,
        }
    }
}

impl WindowConfig {
    pub fn new(title: impl Into<String>, width: u32, height: u32, hidpi: bool) -> Self {
        Self {
            title: title.into(),
            width,
            height,
            hidpi,
            ..Self::default()
        }
    }

    /// Load from a JSON file; missing keys fall back to defaults
    pub fn load(path: impl AsRef<Path>) -> Result<Self, WindowError> {
        let path = path.as_ref();
        let display = path.display().to_string();
        let text = std::fs::read_to_string(path).map_err(|source| WindowError::ConfigIo {
            path: display.clone(),
            source,
        })?;
        Self::from_json(&text).map_err(|source| WindowError::ConfigParse { path: display, source })
    }

    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Logical size clamped to the minimum surface size
    pub fn clamped_size(&self) -> (u32, u32) {
        (self.width.max(MIN_WINDOW_SIZE.0), self.height.max(MIN_WINDOW_SIZE.1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = WindowConfig::default();
        assert_eq!(config.width, 800);
        assert_eq!(config.height, 600);
        assert!(!config.hidpi);
        assert!(!config.reuse_clean_texture);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = WindowConfig::from_json(r#"{ "title": "Browser", "hidpi": true }"#).unwrap();
        assert_eq!(config.title, "Browser");
        assert!(config.hidpi);
        assert_eq!(config.width, 800);
        assert_eq!(config.background, [255, 255, 255, 255]);
    }

    #[test]
    fn test_invalid_json_is_error() {
        assert!(WindowConfig::from_json("{ width: }").is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let err = WindowConfig::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, WindowError::ConfigIo { .. }));
    }

    #[test]
    fn test_clamped_size() {
        let config = WindowConfig::new("tiny", 100, 50, false);
        assert_eq!(config.clamped_size(), (300, 200));

        let config = WindowConfig::new("big", 1024, 768, false);
        assert_eq!(config.clamped_size(), (1024, 768));
    }
}
