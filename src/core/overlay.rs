use std::sync::atomic::{AtomicU64, Ordering};

use image::RgbaImage;

use super::geometry::Point;
use super::graphics_context::GraphicsContext;

static NEXT_OVERLAY_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of an overlay, unique for the lifetime of the process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OverlayId(u64);

/// Positioned image layer drawn above the composited widget tree.
///
/// The pixel buffer is a snapshot: an overlay is never mutated after
/// creation, only added to or removed from a window.
#[derive(Debug)]
pub struct Overlay {
    id: OverlayId,
    reference: String,
    position: Point,
    buffer: RgbaImage,
    active: bool,
}

impl Overlay {
    /// Snapshot the context's current pixels into a new overlay at `position`
    pub fn from_context(reference: impl Into<String>, context: &GraphicsContext, position: Point) -> Self {
        Self::from_image(reference, context.image().clone(), position)
    }

    /// Wrap an already owned buffer
    pub fn from_image(reference: impl Into<String>, buffer: RgbaImage, position: Point) -> Self {
        Self {
            id: OverlayId(NEXT_OVERLAY_ID.fetch_add(1, Ordering::Relaxed)),
            reference: reference.into(),
            position,
            buffer,
            active: true,
        }
    }

    pub fn id(&self) -> OverlayId {
        self.id
    }

    pub fn reference(&self) -> &str {
        &self.reference
    }

    pub fn position(&self) -> Point {
        self.position
    }

    /// Size taken from the snapshot bounds
    pub fn size(&self) -> (u32, u32) {
        self.buffer.dimensions()
    }

    pub fn buffer(&self) -> &RgbaImage {
        &self.buffer
    }

    pub fn is_active(&self) -> bool {
        self.active
    }
}

/// Ordered overlay list; later entries draw on top of earlier ones
#[derive(Debug, Default)]
pub struct OverlayStack {
    overlays: Vec<Overlay>,
}

impl OverlayStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an overlay and return its identity
    pub fn push(&mut self, overlay: Overlay) -> OverlayId {
        let id = overlay.id();
        self.overlays.push(overlay);
        id
    }

    /// Remove the overlay with this identity; unknown ids are ignored
    pub fn remove_by_id(&mut self, id: OverlayId) -> Option<Overlay> {
        let idx = self.overlays.iter().position(|o| o.id == id)?;
        Some(self.overlays.remove(idx))
    }

    /// Remove every overlay registered under `reference`, returning how many were dropped
    pub fn remove_by_reference(&mut self, reference: &str) -> usize {
        let before = self.overlays.len();
        self.overlays.retain(|o| o.reference != reference);
        before - self.overlays.len()
    }

    /// True while at least one active overlay is registered
    pub fn has_overlays(&self) -> bool {
        self.overlays.iter().any(Overlay::is_active)
    }

    pub fn len(&self) -> usize {
        self.overlays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.overlays.is_empty()
    }

    pub fn contains(&self, id: OverlayId) -> bool {
        self.overlays.iter().any(|o| o.id == id)
    }

    /// Overlays in registration order
    pub fn iter(&self) -> impl Iterator<Item = &Overlay> {
        self.overlays.iter()
    }

    /// Show or hide an overlay without removing it; returns whether it changed
    pub fn set_active(&mut self, id: OverlayId, active: bool) -> bool {
        match self.overlays.iter_mut().find(|o| o.id == id) {
            Some(overlay) if overlay.active != active => {
                overlay.active = active;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::graphics_context::DrawOp;
    use image::Rgba;

    fn overlay(reference: &str) -> Overlay {
        Overlay::from_image(reference, RgbaImage::new(2, 2), Point::new(0, 0))
    }

    #[test]
    fn test_overlay_snapshot_is_independent() {
        let mut ctx = GraphicsContext::new(3, 2);
        ctx.draw(DrawOp::Clear(Rgba([10, 20, 30, 255])));

        let overlay = Overlay::from_context("badge", &ctx, Point::new(5, 6));
        ctx.draw(DrawOp::Clear(Rgba([0, 0, 0, 0])));

        assert_eq!(overlay.size(), (3, 2));
        assert_eq!(overlay.position(), Point::new(5, 6));
        assert_eq!(overlay.reference(), "badge");
        assert!(overlay.is_active());
        assert_eq!(overlay.buffer().get_pixel(0, 0).0, [10, 20, 30, 255]);
    }

    #[test]
    fn test_overlay_ids_are_unique() {
        let a = overlay("same");
        let b = overlay("same");
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_remove_by_reference_removes_all_matches() {
        let mut stack = OverlayStack::new();
        stack.push(overlay("chrome"));
        stack.push(overlay("other"));
        stack.push(overlay("chrome"));

        assert_eq!(stack.remove_by_reference("chrome"), 2);
        assert_eq!(stack.len(), 1);
        assert!(stack.has_overlays());

        assert_eq!(stack.remove_by_reference("other"), 1);
        assert!(!stack.has_overlays());
    }

    #[test]
    fn test_inactive_overlays_do_not_count() {
        let mut stack = OverlayStack::new();
        let id = stack.push(overlay("tip"));

        assert!(stack.set_active(id, false));
        assert!(!stack.set_active(id, false));
        assert!(!stack.has_overlays());
        assert_eq!(stack.len(), 1);

        assert!(stack.set_active(id, true));
        assert!(stack.has_overlays());
    }

    #[test]
    fn test_remove_missing_reference_is_noop() {
        let mut stack = OverlayStack::new();
        stack.push(overlay("chrome"));
        assert_eq!(stack.remove_by_reference("missing"), 0);
        assert_eq!(stack.len(), 1);
    }

    #[test]
    fn test_remove_by_id_only_removes_that_overlay() {
        let mut stack = OverlayStack::new();
        let first = stack.push(overlay("menu"));
        let second = stack.push(overlay("menu"));

        let removed = stack.remove_by_id(first).map(|o| o.id());
        assert_eq!(removed, Some(first));
        assert!(!stack.contains(first));
        assert!(stack.contains(second));

        assert!(stack.remove_by_id(first).is_none());
    }

    #[test]
    fn test_iteration_keeps_registration_order() {
        let mut stack = OverlayStack::new();
        stack.push(overlay("a"));
        stack.push(overlay("b"));
        stack.push(overlay("c"));

        let refs: Vec<&str> = stack.iter().map(|o| o.reference()).collect();
        assert_eq!(refs, vec!["a", "b", "c"]);
    }
}
