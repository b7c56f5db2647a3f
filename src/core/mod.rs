pub mod app;
pub mod compositor;
pub mod elements;
pub mod event;
pub mod geometry;
pub mod gpu_context;
pub mod graphics_context;
pub mod input_adapter;
pub mod overlay;
pub mod registry;
pub mod router;
pub mod state;
pub mod surface_renderer;
pub mod window;
pub mod winit_surface;

pub use app::{open_window, run, PlatformWindow};
pub use compositor::CompositeStats;
pub use elements::{ButtonState, TextInput, TreeNode, TreeRow, TreeState};
pub use event::{Action, InputEvent, Key, Modifiers, PointerButton};
pub use geometry::{BoxRect, Point};
pub use graphics_context::{DrawOp, GraphicsContext};
pub use input_adapter::WinitInputAdapter;
pub use overlay::{Overlay, OverlayId, OverlayStack};
pub use registry::ElementId;
pub use surface_renderer::SurfaceRenderer;
pub use window::{FrameStatus, Window};
pub use winit_surface::WinitSurface;
