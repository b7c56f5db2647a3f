use std::cell::RefCell;
use std::rc::Rc;

use image::RgbaImage;

use crate::core::elements::ButtonState;
use crate::core::geometry::BoxRect;
use crate::core::graphics_context::{DrawOp, GraphicsContext};
use crate::traits::{Widget, WidgetNode};

use super::{draw_text, text_baseline, text_width, BORDER, BUTTON, BUTTON_HOVER, TEXT};

/// Clickable label; register its state with the window to receive clicks
pub struct ButtonWidget {
    state: Rc<RefCell<ButtonState>>,
    buffer: RgbaImage,
    dirty: bool,
}

impl ButtonWidget {
    pub fn new(label: impl Into<String>) -> Self {
        Self::with_state(Rc::new(RefCell::new(ButtonState::new(label))))
    }

    pub fn with_state(state: Rc<RefCell<ButtonState>>) -> Self {
        Self {
            state,
            buffer: RgbaImage::new(0, 0),
            dirty: true,
        }
    }

    /// Shared state handle, for registration and callbacks
    pub fn state(&self) -> Rc<RefCell<ButtonState>> {
        self.state.clone()
    }
}

impl Widget for ButtonWidget {
    fn needs_repaint(&self) -> bool {
        self.dirty || self.state.borrow().needs_repaint
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    fn clear_dirty(&mut self) {
        self.dirty = false;
        self.state.borrow_mut().needs_repaint = false;
    }

    fn computed_box(&self) -> BoxRect {
        self.state.borrow().bounds
    }

    fn layout(&mut self, available: BoxRect) {
        self.state.borrow_mut().bounds = available;
    }

    fn render(&mut self) {
        let state = self.state.borrow();
        let (width, height) = (state.bounds.width, state.bounds.height);
        let fill = if state.hovered { BUTTON_HOVER } else { BUTTON };

        let mut ctx = GraphicsContext::filled(width, height, fill);
        ctx.draw(DrawOp::Outline { x: 0, y: 0, width, height, color: BORDER });

        let label_width = text_width(state.label.chars().count());
        let x = (width.saturating_sub(label_width) / 2) as i32;
        draw_text(&mut ctx, &state.label, x, text_baseline(height), TEXT);

        self.buffer = ctx.into_image();
    }

    fn buffer(&self) -> &RgbaImage {
        &self.buffer
    }

    fn children(&self) -> &[WidgetNode] {
        &[]
    }

    fn children_mut(&mut self) -> &mut [WidgetNode] {
        &mut []
    }
}
