/// Standard cursor shapes a surface can display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorShape {
    /// Arrow
    #[default]
    Default,
    /// Hand, shown over clickable elements
    Pointer,
}

/// Native window surface the core draws into and receives input from
pub trait NativeSurface {
    /// Content scale reported by the platform (1.0 on standard displays)
    fn content_scale(&self) -> f64;

    /// Make the surface visible
    fn show(&mut self);

    fn set_title(&mut self, title: &str);

    fn set_cursor(&mut self, shape: CursorShape);

    /// Current platform clipboard text, if any
    fn clipboard_text(&mut self) -> Option<String>;

    /// Ask the platform to schedule another frame
    fn request_redraw(&self);
}
