use image::{Rgba, RgbaImage};

use crate::core::geometry::BoxRect;
use crate::core::graphics_context::GraphicsContext;
use crate::traits::{Widget, WidgetNode};

/// Container stacking its children top to bottom.
///
/// Each child gets a fixed height; a height of 0 takes whatever is left.
pub struct FrameWidget {
    background: Rgba<u8>,
    padding: u32,
    spacing: u32,
    bounds: BoxRect,
    buffer: RgbaImage,
    dirty: bool,
    heights: Vec<u32>,
    children: Vec<WidgetNode>,
}

impl FrameWidget {
    pub fn new(background: Rgba<u8>) -> Self {
        Self {
            background,
            padding: 0,
            spacing: 0,
            bounds: BoxRect::default(),
            buffer: RgbaImage::new(0, 0),
            dirty: true,
            heights: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn with_padding(mut self, padding: u32) -> Self {
        self.padding = padding;
        self
    }

    pub fn with_spacing(mut self, spacing: u32) -> Self {
        self.spacing = spacing;
        self
    }

    /// Append a child with a fixed height (0 = fill)
    pub fn push(&mut self, child: WidgetNode, height: u32) {
        self.children.push(child);
        self.heights.push(height);
        self.dirty = true;
    }

    pub fn with_child(mut self, child: WidgetNode, height: u32) -> Self {
        self.push(child, height);
        self
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

impl Widget for FrameWidget {
    fn needs_repaint(&self) -> bool {
        self.dirty
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    fn clear_dirty(&mut self) {
        self.dirty = false;
    }

    fn computed_box(&self) -> BoxRect {
        self.bounds
    }

    fn layout(&mut self, available: BoxRect) {
        self.bounds = available;

        let inner_width = available.width.saturating_sub(2 * self.padding);
        let bottom = available.bottom() - self.padding as i32;
        let left = available.left + self.padding as i32;
        let mut y = available.top + self.padding as i32;

        for (child, &height) in self.children.iter_mut().zip(&self.heights) {
            let remaining = (bottom - y).max(0) as u32;
            let height = if height == 0 { remaining } else { height.min(remaining) };
            child.layout(BoxRect::new(y, left, inner_width, height));
            y += (height + self.spacing) as i32;
        }
    }

    fn render(&mut self) {
        let ctx = GraphicsContext::filled(self.bounds.width, self.bounds.height, self.background);
        self.buffer = ctx.into_image();
    }

    fn buffer(&self) -> &RgbaImage {
        &self.buffer
    }

    fn children(&self) -> &[WidgetNode] {
        &self.children
    }

    fn children_mut(&mut self) -> &mut [WidgetNode] {
        &mut self.children
    }
}
