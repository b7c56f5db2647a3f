use std::time::Instant;

use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::window::WindowId;

use crate::config::WindowConfig;
use crate::error::WindowError;
use crate::traits::NativeSurface;

use super::input_adapter::WinitInputAdapter;
use super::surface_renderer::SurfaceRenderer;
use super::window::{FrameStatus, Window};
use super::winit_surface::WinitSurface;

const FPS_UPDATE_INTERVAL: f32 = 1.0;

/// A window on the native platform
pub type PlatformWindow = Window<WinitSurface, SurfaceRenderer>;

/// Create the native surface and GPU path, then wrap them in a [`Window`]
pub fn open_window(event_loop: &ActiveEventLoop, config: &WindowConfig) -> Result<PlatformWindow, WindowError> {
    let surface = WinitSurface::create(event_loop, config)?;
    let renderer = SurfaceRenderer::new(surface.window().clone())?;
    Window::create(surface, renderer, config)
}

/// Open one window, hand it to `setup`, then run frames until it closes.
///
/// A close request terminates the process once the frame that dispatched
/// it has finished.
pub fn run<F>(config: WindowConfig, setup: F) -> Result<(), WindowError>
where
    F: FnOnce(&mut PlatformWindow),
{
    let event_loop = EventLoop::new().map_err(|e| WindowError::SurfaceCreation(e.to_string()))?;
    let mut app = App::new(config, setup);
    event_loop
        .run_app(&mut app)
        .map_err(|e| WindowError::SurfaceCreation(e.to_string()))?;

    match app.error.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

struct App<F> {
    config: WindowConfig,
    setup: Option<F>,
    window: Option<PlatformWindow>,
    adapter: WinitInputAdapter,
    error: Option<WindowError>,
    last_frame_time: Instant,
    frame_count: u32,
    fps_update_timer: f32,
}

impl<F> App<F>
where
    F: FnOnce(&mut PlatformWindow),
{
    fn new(config: WindowConfig, setup: F) -> Self {
        Self {
            config,
            setup: Some(setup),
            window: None,
            adapter: WinitInputAdapter::default(),
            error: None,
            last_frame_time: Instant::now(),
            frame_count: 0,
            fps_update_timer: 0.0,
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: WindowError) {
        log::error!("{}", error);
        self.error = Some(error);
        event_loop.exit();
    }

    fn update_fps(&mut self) {
        let now = Instant::now();
        self.fps_update_timer += now.duration_since(self.last_frame_time).as_secs_f32();
        self.last_frame_time = now;
        self.frame_count += 1;

        if self.fps_update_timer >= FPS_UPDATE_INTERVAL {
            log::debug!("FPS: {:.1}", self.frame_count as f32 / self.fps_update_timer);
            self.frame_count = 0;
            self.fps_update_timer = 0.0;
        }
    }

    fn run_frame(&mut self, event_loop: &ActiveEventLoop) {
        let Some(window) = self.window.as_mut() else {
            return;
        };

        match window.process_frame() {
            Ok(FrameStatus::Continue) => self.update_fps(),
            Ok(FrameStatus::CloseRequested) => {
                if let Some(window) = self.window.take() {
                    window.destroy();
                }
                std::process::exit(0);
            }
            Err(e) if e.is_recoverable() => log::warn!("skipping frame: {}", e),
            Err(e) => self.fail(event_loop, e),
        }
    }
}

impl<F> ApplicationHandler for App<F>
where
    F: FnOnce(&mut PlatformWindow),
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let mut window = match open_window(event_loop, &self.config) {
            Ok(window) => window,
            Err(e) => {
                self.fail(event_loop, e);
                return;
            }
        };

        self.adapter = WinitInputAdapter::new(window.surface().content_scale());
        if let Some(setup) = self.setup.take() {
            setup(&mut window);
        }
        window.show();
        self.window = Some(window);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        if let WindowEvent::RedrawRequested = event {
            self.run_frame(event_loop);
            return;
        }

        if let Some(window) = self.window.as_mut() {
            for input in self.adapter.translate(&event, window.scale_factor()) {
                window.queue_event(input);
            }
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.surface().request_redraw();
        }
    }
}
