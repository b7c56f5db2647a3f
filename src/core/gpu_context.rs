use std::sync::Arc;

use wgpu::{Adapter, Device, DeviceDescriptor, Features, Instance, Limits, Queue, Surface};
use winit::window::Window as WinitWindow;

use crate::error::WindowError;

/// Device and queue shared by everything that draws into one surface
#[derive(Clone)]
pub struct GpuContext {
    adapter: Arc<Adapter>,
    device: Arc<Device>,
    queue: Arc<Queue>,
}

impl GpuContext {
    /// Create a surface for `window` and a device able to present to it
    pub async fn for_window(window: Arc<WinitWindow>) -> Result<(Self, Surface<'static>), WindowError> {
        let instance = Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });

        let surface = instance
            .create_surface(window)
            .map_err(|e| WindowError::SurfaceCreation(e.to_string()))?;

        let adapter = Self::request_adapter(&instance, &surface).await?;
        let (device, queue) = Self::request_device(&adapter).await?;

        log::debug!("using adapter {:?}", adapter.get_info().name);

        Ok((
            Self {
                adapter: Arc::new(adapter),
                device: Arc::new(device),
                queue: Arc::new(queue),
            },
            surface,
        ))
    }

    pub fn adapter(&self) -> &Adapter {
        &self.adapter
    }

    pub fn device(&self) -> &Device {
        &self.device
    }

    pub fn queue(&self) -> &Queue {
        &self.queue
    }

    /// Request adapter with surface compatibility
    async fn request_adapter(instance: &Instance, surface: &Surface<'_>) -> Result<Adapter, WindowError> {
        instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| WindowError::Adapter(format!("{:?}", e)))
    }

    /// A textured quad needs nothing beyond the downlevel defaults
    async fn request_device(adapter: &Adapter) -> Result<(Device, Queue), WindowError> {
        adapter
            .request_device(&DeviceDescriptor {
                label: Some("Window Device"),
                required_features: Features::empty(),
                required_limits: Limits::downlevel_webgl2_defaults().using_resolution(adapter.limits()),
                memory_hints: Default::default(),
                experimental_features: Default::default(),
                trace: Default::default(),
            })
            .await
            .map_err(|e| WindowError::Device(format!("{:?}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clone_semantics() {
        fn assert_clone<T: Clone>() {}
        assert_clone::<GpuContext>();
    }
}
