use std::sync::Arc;

use winit::dpi::LogicalSize;
use winit::event_loop::ActiveEventLoop;
use winit::window::{CursorIcon, Window as WinitWindow};

use crate::config::{WindowConfig, MIN_WINDOW_SIZE};
use crate::error::WindowError;
use crate::traits::{CursorShape, NativeSurface};

/// Native window backed by winit, with the system clipboard attached
pub struct WinitSurface {
    window: Arc<WinitWindow>,
    clipboard: Option<arboard::Clipboard>,
}

impl WinitSurface {
    /// Create a hidden window with the configured title and size limits
    pub fn create(event_loop: &ActiveEventLoop, config: &WindowConfig) -> Result<Self, WindowError> {
        let (width, height) = config.clamped_size();
        let attributes = WinitWindow::default_attributes()
            .with_title(config.title.clone())
            .with_inner_size(LogicalSize::new(width, height))
            .with_min_inner_size(LogicalSize::new(MIN_WINDOW_SIZE.0, MIN_WINDOW_SIZE.1))
            .with_visible(false);

        let window = event_loop
            .create_window(attributes)
            .map_err(|e| WindowError::SurfaceCreation(e.to_string()))?;

        let clipboard = match arboard::Clipboard::new() {
            Ok(clipboard) => Some(clipboard),
            Err(e) => {
                log::warn!("clipboard unavailable, paste disabled: {}", e);
                None
            }
        };

        Ok(Self {
            window: Arc::new(window),
            clipboard,
        })
    }

    pub fn window(&self) -> &Arc<WinitWindow> {
        &self.window
    }
}

impl NativeSurface for WinitSurface {
    fn content_scale(&self) -> f64 {
        self.window.scale_factor()
    }

    fn show(&mut self) {
        self.window.set_visible(true);
    }

    fn set_title(&mut self, title: &str) {
        self.window.set_title(title);
    }

    fn set_cursor(&mut self, shape: CursorShape) {
        let icon = match shape {
            CursorShape::Default => CursorIcon::Default,
            CursorShape::Pointer => CursorIcon::Pointer,
        };
        self.window.set_cursor(icon);
    }

    fn clipboard_text(&mut self) -> Option<String> {
        let clipboard = self.clipboard.as_mut()?;
        match clipboard.get_text() {
            Ok(text) => Some(text),
            Err(e) => {
                log::debug!("clipboard read failed: {}", e);
                None
            }
        }
    }

    fn request_redraw(&self) {
        self.window.request_redraw();
    }
}
