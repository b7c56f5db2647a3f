use std::cell::RefCell;
use std::rc::Rc;

use image::RgbaImage;

use crate::core::elements::TextInput;
use crate::core::geometry::BoxRect;
use crate::core::graphics_context::{DrawOp, GraphicsContext};
use crate::traits::{Widget, WidgetNode};

use super::{draw_text, text_baseline, text_width, ACCENT, BORDER, FIELD, TEXT};

const INSET: i32 = 4;

/// Single-line text field
pub struct InputWidget {
    state: Rc<RefCell<TextInput>>,
    buffer: RgbaImage,
    dirty: bool,
}

impl InputWidget {
    pub fn new(value: impl Into<String>) -> Self {
        Self::with_state(Rc::new(RefCell::new(TextInput::new(value))))
    }

    pub fn with_state(state: Rc<RefCell<TextInput>>) -> Self {
        Self {
            state,
            buffer: RgbaImage::new(0, 0),
            dirty: true,
        }
    }

    pub fn state(&self) -> Rc<RefCell<TextInput>> {
        self.state.clone()
    }
}

impl Widget for InputWidget {
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
        let border = if state.active { ACCENT } else { BORDER };

        let mut ctx = GraphicsContext::filled(width, height, FIELD);
        ctx.draw(DrawOp::Outline { x: 0, y: 0, width, height, color: border });
        draw_text(&mut ctx, &state.value, INSET, text_baseline(height), TEXT);

        if state.active {
            if let Some(index) = state.insertion_index() {
                let x = INSET + text_width(index) as i32 - 1;
                ctx.draw(DrawOp::Line {
                    x1: x,
                    y1: INSET,
                    x2: x,
                    y2: height as i32 - INSET - 1,
                    color: ACCENT,
                });
            }
        }

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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widgets::GLYPH_ADVANCE;

    #[test]
    fn test_edit_marks_widget_dirty() {
        let mut input = InputWidget::new("abc");
        input.clear_dirty();

        input.state().borrow_mut().insert_char('d');
        assert!(input.needs_repaint());

        input.clear_dirty();
        assert!(!input.state().borrow().needs_repaint);
    }

    #[test]
    fn test_caret_drawn_only_when_active() {
        let mut input = InputWidget::new("ab");
        input.layout(BoxRect::sized(80, 24));
        let caret_x = (INSET + 2 * GLYPH_ADVANCE as i32 - 1) as u32;

        input.render();
        assert_ne!(*input.buffer().get_pixel(caret_x, 12), ACCENT);

        input.state().borrow_mut().activate();
        input.render();
        assert_eq!(*input.buffer().get_pixel(caret_x, 12), ACCENT);
        assert_eq!(*input.buffer().get_pixel(0, 0), ACCENT);
    }
}
