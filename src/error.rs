use thiserror::Error;

/// Errors surfaced by window setup and the per-frame GPU path.
///
/// Text editing, navigation and overlay removal never fail; they clamp to
/// no-ops instead, so nothing here covers them.
#[derive(Debug, Error)]
pub enum WindowError {
    #[error("failed to create native surface: {0}")]
    SurfaceCreation(String),

    #[error("failed to find a suitable GPU adapter: {0}")]
    Adapter(String),

    #[error("failed to create GPU device: {0}")]
    Device(String),

    #[error("failed to acquire surface texture: {0}")]
    Surface(#[from] wgpu::SurfaceError),

    #[error("failed to read config {path}: {source}")]
    ConfigIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {path}: {source}")]
    ConfigParse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

impl WindowError {
    /// Whether the frame loop can keep going after this error
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            WindowError::Surface(
                wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated | wgpu::SurfaceError::Timeout
            )
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_surface_lost_is_recoverable() {
        assert!(WindowError::Surface(wgpu::SurfaceError::Lost).is_recoverable());
        assert!(WindowError::Surface(wgpu::SurfaceError::Outdated).is_recoverable());
        assert!(!WindowError::Surface(wgpu::SurfaceError::OutOfMemory).is_recoverable());
    }

    #[test]
    fn test_setup_errors_are_fatal() {
        assert!(!WindowError::SurfaceCreation("no display".into()).is_recoverable());
        assert!(!WindowError::Adapter("none".into()).is_recoverable());
    }

    #[test]
    fn test_error_messages() {
        let err = WindowError::SurfaceCreation("no display".into());
        assert_eq!(err.to_string(), "failed to create native surface: no display");
    }
}
