use std::cell::RefCell;
use std::rc::Rc;

use image::RgbaImage;

use crate::core::elements::{TreeNode, TreeState};
use crate::core::geometry::BoxRect;
use crate::core::graphics_context::{DrawOp, GraphicsContext};
use crate::traits::{Widget, WidgetNode};

use super::{draw_text, text_baseline, ACCENT, BORDER, FIELD, SELECTION, TEXT};

const INDENT: u32 = 14;
const MARKER: u32 = 6;

/// Expandable tree of labels, one row per visible node
pub struct TreeWidget {
    state: Rc<RefCell<TreeState>>,
    buffer: RgbaImage,
    dirty: bool,
}

impl TreeWidget {
    pub fn new(roots: Vec<TreeNode>, row_height: u32) -> Self {
        Self::with_state(Rc::new(RefCell::new(TreeState::new(roots, row_height))))
    }

    pub fn with_state(state: Rc<RefCell<TreeState>>) -> Self {
        Self {
            state,
            buffer: RgbaImage::new(0, 0),
            dirty: true,
        }
    }

    pub fn state(&self) -> Rc<RefCell<TreeState>> {
        self.state.clone()
    }
}

impl Widget for TreeWidget {
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
        let row_height = state.row_height;

        let mut ctx = GraphicsContext::filled(width, height, FIELD);
        for (i, row) in state.visible_rows().iter().enumerate() {
            let y = (i as u32 * row_height) as i32;
            if y >= height as i32 {
                break;
            }
            if state.selected == Some(i) {
                ctx.draw(DrawOp::Rect { x: 0, y, width, height: row_height, color: SELECTION });
            }

            let x = 4 + (row.depth as u32 * INDENT) as i32;
            let marker_y = y + (row_height.saturating_sub(MARKER) / 2) as i32;
            if row.has_children {
                let op = if row.expanded {
                    DrawOp::Rect { x, y: marker_y, width: MARKER, height: MARKER, color: ACCENT }
                } else {
                    DrawOp::Outline { x, y: marker_y, width: MARKER, height: MARKER, color: ACCENT }
                };
                ctx.draw(op);
            }
            draw_text(&mut ctx, &row.label, x + MARKER as i32 + 4, y + text_baseline(row_height), TEXT);
        }
        ctx.draw(DrawOp::Outline { x: 0, y: 0, width, height, color: BORDER });

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
    use crate::traits::{Direction, Focusable};

    fn sample() -> TreeWidget {
        TreeWidget::new(
            vec![
                TreeNode::branch("src", vec![TreeNode::leaf("main.rs")]),
                TreeNode::leaf("Cargo.toml"),
            ],
            20,
        )
    }

    #[test]
    fn test_selected_row_is_highlighted() {
        let mut tree = sample();
        tree.layout(BoxRect::sized(120, 100));
        tree.state().borrow_mut().navigate(Direction::Down);
        tree.state().borrow_mut().navigate(Direction::Down);
        tree.render();

        // Second row (Cargo.toml) spans y 20..40
        assert_eq!(*tree.buffer().get_pixel(100, 30), SELECTION);
        assert_eq!(*tree.buffer().get_pixel(100, 10), FIELD);
    }

    #[test]
    fn test_expanding_marks_dirty() {
        let mut widget = sample();
        widget.clear_dirty();

        let state = widget.state();
        state.borrow_mut().navigate(Direction::Down);
        state.borrow_mut().needs_repaint = false;
        state.borrow_mut().navigate(Direction::Right);

        assert!(widget.needs_repaint());
        assert_eq!(state.borrow().visible_rows().len(), 3);
    }
}
