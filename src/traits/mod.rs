pub mod focus;
pub mod renderer;
pub mod surface;
pub mod widget;

pub use focus::*;
pub use renderer::*;
pub use surface::*;
pub use widget::*;
