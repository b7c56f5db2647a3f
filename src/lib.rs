pub mod cli;
pub mod config;
pub mod core;
pub mod demo;
pub mod error;
pub mod traits;
pub mod widgets;

pub use config::WindowConfig;
pub use error::WindowError;
