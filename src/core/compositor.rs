//! Frame composition: widget tree into the graphics context, then overlays.
//!
//! The graphics context keeps the composited tree between frames, so only
//! widgets flagged dirty are blended again. Overlays never touch the
//! context; they are merged into a fresh copy each frame.

use image::RgbaImage;

use crate::traits::Widget;

use super::geometry::BoxRect;
use super::graphics_context::GraphicsContext;
use super::overlay::OverlayStack;

/// Counters from one composition pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CompositeStats {
    pub widgets: usize,
    pub static_overlays: usize,
    pub dynamic_overlays: usize,
}

/// Lay out the whole tree within `available` and repaint every node
pub fn reflow_tree(root: &mut dyn Widget, available: BoxRect) {
    root.layout(available);
    repaint_all(root);
}

fn repaint_all(widget: &mut dyn Widget) {
    widget.render();
    widget.mark_dirty();
    for child in widget.children_mut() {
        repaint_all(child.as_mut());
    }
}

/// Re-render only dirty nodes; a clean parent can still have dirty children
pub fn redraw_dirty(widget: &mut dyn Widget) -> usize {
    let mut redrawn = 0;
    if widget.needs_repaint() {
        widget.render();
        redrawn += 1;
    }
    for child in widget.children_mut() {
        redrawn += redraw_dirty(child.as_mut());
    }
    redrawn
}

/// Blend every dirty widget into `target` at its computed box, depth first,
/// clearing dirty flags as it goes
pub fn composite_tree(target: &mut GraphicsContext, widget: &mut dyn Widget) -> usize {
    let mut composited = 0;
    let covered = widget.needs_repaint();
    if covered {
        let origin = widget.computed_box().origin();
        target.blend_image(widget.buffer(), origin);
        widget.clear_dirty();
        composited += 1;
    }
    for child in widget.children_mut() {
        // A repainted parent covers its children; blend their buffers again
        if covered {
            child.mark_dirty();
        }
        composited += composite_tree(target, child.as_mut());
    }
    composited
}

/// Copy `base` and blend each active overlay on top, in registration order
pub fn merge_overlays(base: &RgbaImage, overlays: &OverlayStack) -> (RgbaImage, usize) {
    let mut merged = GraphicsContext::from(base.clone());
    let mut count = 0;
    for overlay in overlays.iter().filter(|o| o.is_active()) {
        merged.blend_image(overlay.buffer(), overlay.position());
        count += 1;
    }
    (merged.into_image(), count)
}

/// Produce the frame buffer: tree image, then static overlays, then dynamic ones
pub fn compose_frame(
    tree: &RgbaImage,
    static_overlays: &OverlayStack,
    dynamic_overlays: &OverlayStack,
) -> (RgbaImage, CompositeStats) {
    let mut stats = CompositeStats::default();
    let mut frame = None;

    if static_overlays.has_overlays() {
        let (merged, count) = merge_overlays(tree, static_overlays);
        stats.static_overlays = count;
        frame = Some(merged);
    }

    if dynamic_overlays.has_overlays() {
        let base = frame.as_ref().unwrap_or(tree);
        let (merged, count) = merge_overlays(base, dynamic_overlays);
        stats.dynamic_overlays = count;
        frame = Some(merged);
    }

    (frame.unwrap_or_else(|| tree.clone()), stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geometry::Point;
    use crate::core::overlay::Overlay;
    use crate::traits::WidgetNode;
    use image::Rgba;

    struct Block {
        rect: BoxRect,
        color: Rgba<u8>,
        buffer: RgbaImage,
        dirty: bool,
        renders: usize,
        children: Vec<WidgetNode>,
    }

    impl Block {
        fn new(rect: BoxRect, color: [u8; 4]) -> Self {
            Self {
                rect,
                color: Rgba(color),
                buffer: RgbaImage::new(0, 0),
                dirty: false,
                renders: 0,
                children: Vec::new(),
            }
        }
    }

    impl Widget for Block {
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
            self.rect
        }
        fn layout(&mut self, _available: BoxRect) {}
        fn render(&mut self) {
            self.renders += 1;
            self.buffer = RgbaImage::from_pixel(self.rect.width, self.rect.height, self.color);
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

    fn tree() -> Block {
        let mut root = Block::new(BoxRect::sized(4, 4), [255, 255, 255, 255]);
        root.children.push(Box::new(Block::new(BoxRect::new(1, 1, 2, 2), [255, 0, 0, 255])));
        root
    }

    #[test]
    fn test_reflow_repaints_every_node() {
        let mut root = tree();
        reflow_tree(&mut root, BoxRect::sized(4, 4));
        assert!(root.needs_repaint());
        assert!(root.children()[0].needs_repaint());

        let mut ctx = GraphicsContext::new(4, 4);
        assert_eq!(composite_tree(&mut ctx, &mut root), 2);
        assert_eq!(ctx.image().get_pixel(0, 0).0, [255, 255, 255, 255]);
        assert_eq!(ctx.image().get_pixel(1, 1).0, [255, 0, 0, 255]);
        assert!(!root.needs_repaint());
        assert!(!root.children()[0].needs_repaint());
    }

    #[test]
    fn test_clean_parent_dirty_child() {
        let mut root = tree();
        reflow_tree(&mut root, BoxRect::sized(4, 4));
        let mut ctx = GraphicsContext::new(4, 4);
        composite_tree(&mut ctx, &mut root);

        root.children_mut()[0].mark_dirty();
        assert_eq!(redraw_dirty(&mut root), 1);
        assert_eq!(composite_tree(&mut ctx, &mut root), 1);
        assert_eq!(root.renders, 1);
    }

    #[test]
    fn test_dirty_parent_reblends_children() {
        let mut root = tree();
        reflow_tree(&mut root, BoxRect::sized(4, 4));
        let mut ctx = GraphicsContext::new(4, 4);
        composite_tree(&mut ctx, &mut root);

        root.mark_dirty();
        assert_eq!(composite_tree(&mut ctx, &mut root), 2);
        assert_eq!(ctx.image().get_pixel(1, 1).0, [255, 0, 0, 255]);
        assert!(!root.children[0].needs_repaint());
    }

    #[test]
    fn test_compose_without_overlays_is_copy() {
        let base = RgbaImage::from_pixel(3, 3, Rgba([1, 2, 3, 255]));
        let (frame, stats) = compose_frame(&base, &OverlayStack::new(), &OverlayStack::new());
        assert_eq!(frame, base);
        assert_eq!(stats, CompositeStats::default());
    }

    #[test]
    fn test_dynamic_overlays_draw_above_static() {
        let base = RgbaImage::from_pixel(4, 4, Rgba([0, 0, 0, 255]));
        let mut statics = OverlayStack::new();
        let mut dynamics = OverlayStack::new();

        dynamics.push(Overlay::from_image("menu", RgbaImage::from_pixel(2, 2, Rgba([0, 255, 0, 255])), Point::new(0, 0)));
        statics.push(Overlay::from_image("chrome", RgbaImage::from_pixel(3, 3, Rgba([255, 0, 0, 255])), Point::new(0, 0)));

        let (frame, stats) = compose_frame(&base, &statics, &dynamics);
        assert_eq!(frame.get_pixel(1, 1).0, [0, 255, 0, 255]);
        assert_eq!(frame.get_pixel(2, 2).0, [255, 0, 0, 255]);
        assert_eq!(frame.get_pixel(3, 3).0, [0, 0, 0, 255]);
        assert_eq!(stats.static_overlays, 1);
        assert_eq!(stats.dynamic_overlays, 1);
    }

    #[test]
    fn test_later_static_overlay_wins() {
        let base = RgbaImage::new(2, 2);
        let mut statics = OverlayStack::new();
        statics.push(Overlay::from_image("a", RgbaImage::from_pixel(2, 2, Rgba([255, 0, 0, 255])), Point::new(0, 0)));
        statics.push(Overlay::from_image("b", RgbaImage::from_pixel(1, 1, Rgba([0, 0, 255, 255])), Point::new(1, 1)));

        let (frame, _) = compose_frame(&base, &statics, &OverlayStack::new());
        assert_eq!(frame.get_pixel(0, 0).0, [255, 0, 0, 255]);
        assert_eq!(frame.get_pixel(1, 1).0, [0, 0, 255, 255]);
    }

    #[test]
    fn test_inactive_overlay_is_skipped() {
        let base = RgbaImage::from_pixel(2, 2, Rgba([0, 0, 0, 255]));
        let mut dynamics = OverlayStack::new();
        let hidden = dynamics.push(Overlay::from_image("hidden", RgbaImage::from_pixel(2, 2, Rgba([255, 0, 0, 255])), Point::new(0, 0)));
        dynamics.push(Overlay::from_image("shown", RgbaImage::from_pixel(1, 1, Rgba([0, 0, 255, 255])), Point::new(1, 1)));
        dynamics.set_active(hidden, false);

        let (frame, stats) = compose_frame(&base, &OverlayStack::new(), &dynamics);
        assert_eq!(frame.get_pixel(0, 0).0, [0, 0, 0, 255]);
        assert_eq!(frame.get_pixel(1, 1).0, [0, 0, 255, 255]);
        assert_eq!(stats.dynamic_overlays, 1);
    }

    #[test]
    fn test_overlays_do_not_touch_base() {
        let base = RgbaImage::from_pixel(2, 2, Rgba([9, 9, 9, 255]));
        let mut dynamics = OverlayStack::new();
        dynamics.push(Overlay::from_image("tip", RgbaImage::from_pixel(2, 2, Rgba([1, 1, 1, 255])), Point::new(0, 0)));

        let _ = compose_frame(&base, &OverlayStack::new(), &dynamics);
        assert_eq!(base.get_pixel(0, 0).0, [9, 9, 9, 255]);
    }
}
