//! Reference widgets: enough of a toolkit to drive the window core.
//!
//! Text is drawn as one block per character; there is no font rasterizer.

pub mod button;
pub mod frame;
pub mod input;
pub mod tree;

pub use button::ButtonWidget;
pub use frame::FrameWidget;
pub use input::InputWidget;
pub use tree::TreeWidget;

use image::Rgba;

use crate::core::graphics_context::{DrawOp, GraphicsContext};

pub const GLYPH_WIDTH: u32 = 6;
pub const GLYPH_HEIGHT: u32 = 9;
pub const GLYPH_ADVANCE: u32 = 8;

pub const TEXT: Rgba<u8> = Rgba([40, 40, 40, 255]);
pub const BORDER: Rgba<u8> = Rgba([170, 170, 170, 255]);
pub const ACCENT: Rgba<u8> = Rgba([30, 110, 220, 255]);
pub const FIELD: Rgba<u8> = Rgba([255, 255, 255, 255]);
pub const BUTTON: Rgba<u8> = Rgba([225, 225, 225, 255]);
pub const BUTTON_HOVER: Rgba<u8> = Rgba([200, 210, 230, 255]);
pub const SELECTION: Rgba<u8> = Rgba([210, 225, 250, 255]);

/// Width in pixels of `chars` glyph cells
pub fn text_width(chars: usize) -> u32 {
    chars as u32 * GLYPH_ADVANCE
}

/// Draw one block per visible character starting at (x, y)
pub fn draw_text(ctx: &mut GraphicsContext, text: &str, x: i32, y: i32, color: Rgba<u8>) {
    for (i, ch) in text.chars().enumerate() {
        if ch.is_whitespace() {
            continue;
        }
        ctx.draw(DrawOp::Rect {
            x: x + (i as u32 * GLYPH_ADVANCE) as i32,
            y,
            width: GLYPH_WIDTH,
            height: GLYPH_HEIGHT,
            color,
        });
    }
}

/// Top offset that centers a line of text in `height`
pub fn text_baseline(height: u32) -> i32 {
    (height.saturating_sub(GLYPH_HEIGHT) / 2) as i32
}
