use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use image::RgbaImage;

use crate::config::WindowConfig;
use crate::error::WindowError;
use crate::traits::{CursorShape, FrameRenderer, NativeSurface, TextureHandle, WidgetNode};

use super::compositor::{self, CompositeStats};
use super::elements::{ButtonState, TextInput, TreeState};
use super::event::{InputEvent, PointerButton};
use super::geometry::BoxRect;
use super::overlay::{Overlay, OverlayId};
use super::registry::ElementId;
use super::router::InputRouter;
use super::state::WindowState;

/// Outcome of one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameStatus {
    Continue,
    /// A close event was dispatched; the caller should terminate
    CloseRequested,
}

/// Top-level window: native surface, GPU upload path and all UI state.
///
/// Owned resources are released when the value is dropped or passed to
/// [`Window::destroy`].
pub struct Window<S: NativeSurface, R: FrameRenderer> {
    state: WindowState,
    surface: S,
    renderer: R,
    pending: VecDeque<InputEvent>,
    reuse_clean_texture: bool,
    last_stats: CompositeStats,
}

impl<S: NativeSurface, R: FrameRenderer> Window<S, R> {
    /// Wrap a freshly created surface and renderer and build the first texture
    pub fn create(surface: S, renderer: R, config: &WindowConfig) -> Result<Self, WindowError> {
        let state = WindowState::new(config, surface.content_scale());
        log::info!(
            "created window '{}' at {}x{} device pixels (scale {})",
            state.title,
            state.device_size.0,
            state.device_size.1,
            state.scale
        );

        let mut window = Self {
            state,
            surface,
            renderer,
            pending: VecDeque::new(),
            reuse_clean_texture: config.reuse_clean_texture,
            last_stats: CompositeStats::default(),
        };
        window.generate_texture(true)?;
        Ok(window)
    }

    /// Mark visible and force a full reflow on the next frame
    pub fn show(&mut self) {
        self.state.needs_reflow = true;
        self.state.visible = true;
        self.surface.show();
        log::info!("showing window '{}'", self.state.title);
    }

    /// Replace the root widget; call [`Window::request_reflow`] to lay it out
    pub fn set_root_frame(&mut self, root: WidgetNode) {
        self.state.root = Some(root);
    }

    pub fn root_frame(&self) -> Option<&WidgetNode> {
        self.state.root.as_ref()
    }

    pub fn request_reflow(&mut self) {
        self.state.needs_reflow = true;
    }

    pub fn needs_reflow(&self) -> bool {
        self.state.needs_reflow
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.state.title = title.into();
        self.surface.set_title(&self.state.title);
    }

    pub fn title(&self) -> &str {
        &self.state.title
    }

    /// Size in device pixels
    pub fn size(&self) -> (u32, u32) {
        self.state.device_size
    }

    pub fn logical_size(&self) -> (f64, f64) {
        self.state.logical_size
    }

    pub fn scale_factor(&self) -> f64 {
        self.state.scale
    }

    /// Device-independent cursor position
    pub fn cursor_position(&self) -> (f64, f64) {
        self.state.cursor
    }

    pub fn is_visible(&self) -> bool {
        self.state.visible
    }

    pub fn is_focused(&self) -> bool {
        self.state.focused
    }

    /// Composited image of the last frame
    pub fn frame_buffer(&self) -> &RgbaImage {
        &self.state.frame_buffer
    }

    /// Texture uploaded for the last frame
    pub fn texture(&self) -> TextureHandle {
        self.state.texture
    }

    /// Counters from the last composition
    pub fn last_stats(&self) -> CompositeStats {
        self.last_stats
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Run one frame: present, reflow or redraw, composite, upload, draw,
    /// then dispatch queued input. Events dispatched here are only visible
    /// to the next call.
    pub fn process_frame(&mut self) -> Result<FrameStatus, WindowError> {
        self.renderer.begin_frame()?;

        let reflowed = if self.state.needs_reflow {
            self.reflow();
            true
        } else {
            if let Some(root) = self.state.root.as_mut() {
                compositor::redraw_dirty(root.as_mut());
            }
            false
        };

        self.generate_texture(reflowed)?;
        self.renderer.draw()?;

        self.dispatch_pending();

        Ok(if self.state.close_requested {
            FrameStatus::CloseRequested
        } else {
            FrameStatus::Continue
        })
    }

    fn reflow(&mut self) {
        let (width, height) = self.state.device_size;
        log::debug!("reflow at {}x{}", width, height);

        self.state.clear_context();
        if let Some(root) = self.state.root.as_mut() {
            compositor::reflow_tree(root.as_mut(), BoxRect::sized(width, height));
        }
        self.state.needs_reflow = false;
    }

    /// Composite dirty widgets and overlays into the frame buffer and
    /// upload it as a new texture
    fn generate_texture(&mut self, force: bool) -> Result<(), WindowError> {
        let state = &mut self.state;
        let widgets = match state.root.as_mut() {
            Some(root) => compositor::composite_tree(&mut state.context, root.as_mut()),
            None => 0,
        };

        let unchanged = widgets == 0 && !state.frame_invalidated && !force;
        if self.reuse_clean_texture && unchanged && state.texture.is_valid() {
            self.last_stats = CompositeStats::default();
            return Ok(());
        }

        let (frame, mut stats) =
            compositor::compose_frame(state.context.image(), &state.static_overlays, &state.overlays);
        stats.widgets = widgets;
        state.frame_buffer = frame;

        let texture = self.renderer.upload(&state.frame_buffer)?;
        log::debug!("texture {:?} -> {:?} ({:?})", state.texture, texture, stats);
        state.texture = texture;
        state.frame_invalidated = false;
        self.last_stats = stats;
        Ok(())
    }

    /// Reallocate the graphics context at the current device size
    pub fn recreate_context(&mut self) {
        self.state.recreate_context();
    }

    /// Queue a native event for dispatch at the end of the next frame
    pub fn queue_event(&mut self, event: InputEvent) {
        self.pending.push_back(event);
    }

    pub fn pending_events(&self) -> usize {
        self.pending.len()
    }

    fn dispatch_pending(&mut self) {
        while let Some(event) = self.pending.pop_front() {
            self.dispatch_event(event);
        }
    }

    /// Dispatch an event immediately, bypassing the queue
    pub fn dispatch_event(&mut self, event: InputEvent) {
        InputRouter::new(&mut self.state, &mut self.surface).dispatch(event);
    }

    pub fn register_button(&mut self, button: &Rc<RefCell<ButtonState>>, callback: impl FnMut() + 'static) -> ElementId {
        button.borrow_mut().set_on_click(Box::new(callback));
        self.state.registry.register_button(button)
    }

    pub fn register_input(&mut self, input: &Rc<RefCell<TextInput>>) -> ElementId {
        self.state.registry.register_input(input)
    }

    pub fn register_tree(&mut self, tree: &Rc<RefCell<TreeState>>) -> ElementId {
        self.state.registry.register_tree(tree)
    }

    /// Drop registrations whose widgets are gone
    pub fn prune_registrations(&mut self) -> usize {
        let pruned = self.state.registry.prune();
        if pruned > 0 {
            log::debug!("pruned {} dead registrations", pruned);
        }
        pruned
    }

    /// Input currently receiving text, if any
    pub fn active_input(&self) -> Option<Rc<RefCell<TextInput>>> {
        self.state.active_input.and_then(|id| self.state.registry.input(id))
    }

    pub fn attach_pointer_position_listener(&mut self, listener: impl FnMut(f64, f64) + 'static) {
        self.state.listeners.pointer_position.push(Box::new(listener));
    }

    /// Listener receives vertical scroll in whole lines, never zero
    pub fn attach_scroll_listener(&mut self, listener: impl FnMut(i32) + 'static) {
        self.state.listeners.scroll.push(Box::new(listener));
    }

    pub fn attach_click_listener(&mut self, listener: impl FnMut(PointerButton) + 'static) {
        self.state.listeners.click.push(Box::new(listener));
    }

    pub fn set_cursor(&mut self, shape: CursorShape) {
        self.state.cursor_shape = shape;
        self.surface.set_cursor(shape);
    }

    pub fn cursor_shape(&self) -> CursorShape {
        self.state.cursor_shape
    }

    /// Add a dynamic overlay; remove it later by identity
    pub fn add_overlay(&mut self, overlay: Overlay) -> OverlayId {
        self.state.add_overlay(overlay)
    }

    pub fn remove_overlay(&mut self, id: OverlayId) {
        self.state.remove_overlay(id);
    }

    /// Hide or show a dynamic overlay while keeping its place in the stack
    pub fn set_overlay_active(&mut self, id: OverlayId, active: bool) {
        self.state.set_overlay_active(id, active);
    }

    pub fn has_overlays(&self) -> bool {
        self.state.overlays.has_overlays()
    }

    pub fn add_static_overlay(&mut self, overlay: Overlay) {
        self.state.add_static_overlay(overlay);
    }

    /// Remove every static overlay registered under `reference`
    pub fn remove_static_overlay(&mut self, reference: &str) {
        self.state.remove_static_overlay(reference);
    }

    pub fn has_static_overlays(&self) -> bool {
        self.state.static_overlays.has_overlays()
    }

    /// Show `overlay` as the context menu, replacing any open one
    pub fn show_context_menu(&mut self, overlay: Overlay) -> OverlayId {
        self.state.show_context_menu(overlay)
    }

    pub fn destroy_context_menu(&mut self) {
        self.state.destroy_context_menu();
    }

    pub fn context_menu(&self) -> Option<OverlayId> {
        self.state.context_menu
    }

    /// Release the window and everything it owns.
    ///
    /// Consuming `self` makes a second destroy impossible; the root tree,
    /// overlays, GPU resources and native surface drop here.
    pub fn destroy(self) {
        log::info!("destroying window '{}'", self.state.title);
    }
}
