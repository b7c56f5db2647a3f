use image::RgbaImage;

use crate::error::WindowError;

/// Handle of the frame texture currently bound for drawing.
///
/// Zero means "no texture"; every regeneration yields a new, non-zero handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TextureHandle(pub u64);

impl TextureHandle {
    pub const NONE: TextureHandle = TextureHandle(0);

    pub fn is_valid(&self) -> bool {
        self.0 != 0
    }
}

/// GPU upload path for the composited frame buffer
pub trait FrameRenderer {
    /// Make the context current and present the previously drawn frame
    fn begin_frame(&mut self) -> Result<(), WindowError>;

    /// Delete the previous frame texture and upload `frame` as a new one
    fn upload(&mut self, frame: &RgbaImage) -> Result<TextureHandle, WindowError>;

    /// Draw the bound texture as a full-surface quad (6 vertices)
    fn draw(&mut self) -> Result<(), WindowError>;
}
