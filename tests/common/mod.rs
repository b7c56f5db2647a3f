#![allow(dead_code)]

use image::RgbaImage;
use mustard::config::WindowConfig;
use mustard::core::Window;
use mustard::error::WindowError;
use mustard::traits::{CursorShape, FrameRenderer, NativeSurface, TextureHandle};

/// Native surface that records what the window asked of it
#[derive(Debug, Default)]
pub struct MockSurface {
    pub scale: f64,
    pub visible: bool,
    pub title: String,
    pub cursors: Vec<CursorShape>,
    pub clipboard: Option<String>,
}

impl MockSurface {
    pub fn new(scale: f64) -> Self {
        Self {
            scale,
            ..Self::default()
        }
    }
}

impl NativeSurface for MockSurface {
    fn content_scale(&self) -> f64 {
        self.scale
    }

    fn show(&mut self) {
        self.visible = true;
    }

    fn set_title(&mut self, title: &str) {
        self.title = title.to_string();
    }

    fn set_cursor(&mut self, shape: CursorShape) {
        self.cursors.push(shape);
    }

    fn clipboard_text(&mut self) -> Option<String> {
        self.clipboard.clone()
    }

    fn request_redraw(&self) {}
}

/// Renderer that hands out fresh handles and remembers upload sizes
#[derive(Debug, Default)]
pub struct MockRenderer {
    pub frames: usize,
    pub uploads: Vec<(u32, u32)>,
    pub draws: usize,
    next_handle: u64,
}

impl FrameRenderer for MockRenderer {
    fn begin_frame(&mut self) -> Result<(), WindowError> {
        self.frames += 1;
        Ok(())
    }

    fn upload(&mut self, frame: &RgbaImage) -> Result<TextureHandle, WindowError> {
        self.uploads.push(frame.dimensions());
        self.next_handle += 1;
        Ok(TextureHandle(self.next_handle))
    }

    fn draw(&mut self) -> Result<(), WindowError> {
        self.draws += 1;
        Ok(())
    }
}

pub type TestWindow = Window<MockSurface, MockRenderer>;

pub fn window_with(config: WindowConfig, scale: f64) -> TestWindow {
    Window::create(MockSurface::new(scale), MockRenderer::default(), &config).unwrap()
}

/// 800×600, hiDPI off, content scale 1
pub fn window() -> TestWindow {
    window_with(WindowConfig::new("test", 800, 600, false), 1.0)
}
