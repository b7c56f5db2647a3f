// cli.rs - Command-line interface configuration
use std::path::PathBuf;

use clap::Parser;

use crate::config::WindowConfig;
use crate::error::WindowError;

#[derive(Parser, Debug, Clone, Default)]
#[command(name = "mustard")]
#[command(about = "Window compositing demo", long_about = None)]
pub struct Cli {
    /// JSON file with window settings; flags below override it
    #[arg(long)]
    pub config: Option<PathBuf>,

    #[arg(long)]
    pub title: Option<String>,

    /// Logical width
    #[arg(long)]
    pub width: Option<u32>,

    /// Logical height
    #[arg(long)]
    pub height: Option<u32>,

    /// Render at the display's content scale
    #[arg(long)]
    pub hidpi: bool,

    /// Skip texture regeneration on frames where nothing changed
    #[arg(long = "reuse-texture")]
    pub reuse_texture: bool,
}

impl Cli {
    /// Resolve the window config: file (or defaults), then flags
    pub fn window_config(&self) -> Result<WindowConfig, WindowError> {
        let mut config = match &self.config {
            Some(path) => WindowConfig::load(path)?,
            None => WindowConfig::default(),
        };
        self.apply(&mut config);
        Ok(config)
    }

    pub fn apply(&self, config: &mut WindowConfig) {
        if let Some(title) = &self.title {
            config.title = title.clone();
        }
        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if self.hidpi {
            config.hidpi = true;
        }
        if self.reuse_texture {
            config.reuse_clean_texture = true;
        }
    }
}
