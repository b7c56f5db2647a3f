use image::{Rgba, RgbaImage};

use crate::config::WindowConfig;
use crate::traits::{CursorShape, TextureHandle, WidgetNode};

use super::geometry::scale_size;
use super::graphics_context::{DrawOp, GraphicsContext};
use super::overlay::{Overlay, OverlayId, OverlayStack};
use super::registry::{ElementId, ElementRegistry, Listeners};

/// Everything a window owns or references, in one place.
///
/// The frame cycle and the input router both work on this struct through
/// `&mut`; nothing here is global.
pub struct WindowState {
    pub(crate) title: String,
    pub(crate) hidpi: bool,
    /// Logical (screen) size reported by the platform
    pub(crate) logical_size: (f64, f64),
    /// `round(logical × scale)`
    pub(crate) device_size: (u32, u32),
    pub(crate) scale: f64,
    pub(crate) visible: bool,
    pub(crate) focused: bool,
    pub(crate) needs_reflow: bool,
    /// Device-independent cursor position
    pub(crate) cursor: (f64, f64),
    pub(crate) cursor_shape: CursorShape,
    pub(crate) background: Rgba<u8>,

    pub(crate) root: Option<WidgetNode>,
    pub(crate) registry: ElementRegistry,
    pub(crate) listeners: Listeners,
    pub(crate) active_input: Option<ElementId>,
    pub(crate) focused_tree: Option<ElementId>,

    pub(crate) overlays: OverlayStack,
    pub(crate) static_overlays: OverlayStack,
    pub(crate) context_menu: Option<OverlayId>,

    pub(crate) context: GraphicsContext,
    pub(crate) frame_buffer: RgbaImage,
    pub(crate) texture: TextureHandle,
    /// Set when something other than a dirty widget changed the frame
    pub(crate) frame_invalidated: bool,
    pub(crate) close_requested: bool,
}

impl WindowState {
    /// Build the state for a new window; `content_scale` comes from the surface
    pub fn new(config: &WindowConfig, content_scale: f64) -> Self {
        let (width, height) = config.clamped_size();
        let [r, g, b, a] = config.background;

        let mut state = Self {
            title: config.title.clone(),
            hidpi: config.hidpi,
            logical_size: (width as f64, height as f64),
            device_size: (0, 0),
            scale: 1.0,
            visible: false,
            focused: false,
            needs_reflow: false,
            cursor: (0.0, 0.0),
            cursor_shape: CursorShape::Default,
            background: Rgba([r, g, b, a]),
            root: None,
            registry: ElementRegistry::new(),
            listeners: Listeners::default(),
            active_input: None,
            focused_tree: None,
            overlays: OverlayStack::new(),
            static_overlays: OverlayStack::new(),
            context_menu: None,
            context: GraphicsContext::new(0, 0),
            frame_buffer: RgbaImage::new(0, 0),
            texture: TextureHandle::NONE,
            frame_invalidated: true,
            close_requested: false,
        };
        state.apply_scale(content_scale);
        state.recreate_context();
        state
    }

    /// Scale used for the frame buffer: the content scale when hiDPI is on, else 1
    pub fn effective_scale(&self, content_scale: f64) -> f64 {
        if self.hidpi && content_scale > 0.0 {
            content_scale
        } else {
            1.0
        }
    }

    fn apply_scale(&mut self, content_scale: f64) {
        self.scale = self.effective_scale(content_scale);
        self.device_size = (
            scale_size(self.logical_size.0, self.scale),
            scale_size(self.logical_size.1, self.scale),
        );
    }

    /// Handle a platform resize: rescale, reallocate the context, request reflow
    pub fn apply_resize(&mut self, width: f64, height: f64, content_scale: f64) {
        self.logical_size = (width.max(0.0), height.max(0.0));
        self.apply_scale(content_scale);
        self.recreate_context();
        self.needs_reflow = true;
        log::debug!(
            "resized to {}x{} logical, {}x{} device (scale {})",
            width,
            height,
            self.device_size.0,
            self.device_size.1,
            self.scale
        );
    }

    /// Reallocate the graphics context at the current device size
    pub fn recreate_context(&mut self) {
        let (width, height) = self.device_size;
        self.context.resize(width, height);
        self.frame_invalidated = true;
    }

    /// Clear the context to the background color before a full repaint
    pub(crate) fn clear_context(&mut self) {
        self.context.draw(DrawOp::Clear(self.background));
        self.frame_invalidated = true;
    }

    /// Deactivate and deselect the active input, if any, and forget it
    pub fn deactivate_input(&mut self) {
        if let Some(id) = self.active_input.take() {
            if let Some(input) = self.registry.input(id) {
                input.borrow_mut().deactivate();
            }
        }
    }

    pub fn add_overlay(&mut self, overlay: Overlay) -> OverlayId {
        self.frame_invalidated = true;
        self.overlays.push(overlay)
    }

    pub fn remove_overlay(&mut self, id: OverlayId) {
        if self.overlays.remove_by_id(id).is_some() {
            self.frame_invalidated = true;
        }
        if self.context_menu == Some(id) {
            self.context_menu = None;
        }
    }

    pub fn set_overlay_active(&mut self, id: OverlayId, active: bool) {
        if self.overlays.set_active(id, active) {
            self.frame_invalidated = true;
        }
    }

    pub fn add_static_overlay(&mut self, overlay: Overlay) {
        log::info!("static overlay '{}' added", overlay.reference());
        self.static_overlays.push(overlay);
        self.frame_invalidated = true;
    }

    pub fn remove_static_overlay(&mut self, reference: &str) {
        if self.static_overlays.remove_by_reference(reference) > 0 {
            self.frame_invalidated = true;
        }
    }

    /// Replace any open context menu with `overlay`
    pub fn show_context_menu(&mut self, overlay: Overlay) -> OverlayId {
        self.destroy_context_menu();
        let id = self.add_overlay(overlay);
        self.context_menu = Some(id);
        id
    }

    pub fn destroy_context_menu(&mut self) {
        if let Some(id) = self.context_menu.take() {
            self.remove_overlay(id);
        }
    }
}
