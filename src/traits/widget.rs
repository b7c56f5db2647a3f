use image::RgbaImage;

use crate::core::geometry::BoxRect;

/// Owned child node; each node owns its children
pub type WidgetNode = Box<dyn Widget>;

/// Capability contract every node of the widget tree satisfies.
///
/// The window core never looks inside a widget: it only asks for the box,
/// the pixels and the children, and toggles the dirty flag.
pub trait Widget {
    /// Whether the widget's pixels changed since it was last composited
    fn needs_repaint(&self) -> bool;

    /// Flag the widget for repaint on the next frame
    fn mark_dirty(&mut self);

    /// Clear the dirty flag after compositing
    fn clear_dirty(&mut self);

    /// Box computed by the last layout, in device pixels
    fn computed_box(&self) -> BoxRect;

    /// Compute this node's box (and its children's) within `available`
    fn layout(&mut self, available: BoxRect);

    /// Re-render the private pixel buffer from current state
    fn render(&mut self);

    /// Private pixel buffer, sized to the computed box
    fn buffer(&self) -> &RgbaImage;

    /// Children in paint order
    fn children(&self) -> &[WidgetNode];

    fn children_mut(&mut self) -> &mut [WidgetNode];
}
