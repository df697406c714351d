//! Window shell and frame loop.
//!
//! One frame = one `RedrawRequested`: tick the clock, advance the scene,
//! update the orbit camera, draw, then request the next redraw. The loop
//! runs until externally cancelled — window close or Escape both route
//! through [`App::stop`].

use std::sync::Arc;

use tracing::{error, info, warn};
use winit::application::ApplicationHandler;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowAttributes, WindowId};

use helios_config::Config;
use helios_render::{Camera, DepthBuffer, SurfaceError, init_render_context_blocking};
use helios_scene::Scene;

use crate::frame::FrameClock;
use crate::orbit::OrbitController;
use crate::scene_renderer::SceneRenderer;

/// Returns [`WindowAttributes`] based on the given configuration.
pub fn window_attributes_from_config(config: &Config) -> WindowAttributes {
    WindowAttributes::default()
        .with_title(config.window.title.clone())
        .with_inner_size(winit::dpi::LogicalSize::new(
            config.window.width as f64,
            config.window.height as f64,
        ))
}

/// Application state driving the continuous frame loop.
pub struct App {
    config: Config,
    scene: Scene,
    camera: Camera,
    controller: OrbitController,
    clock: FrameClock,
    window: Option<Arc<Window>>,
    gpu: Option<helios_render::RenderContext>,
    depth: Option<DepthBuffer>,
    renderer: Option<SceneRenderer>,
}

impl App {
    /// Create the application state for a built scene.
    pub fn new(config: Config, scene: Scene) -> Self {
        let camera = Camera {
            fov_y: config.camera.fov_degrees.to_radians(),
            near: config.camera.near,
            far: config.camera.far,
            aspect_ratio: config.window.width as f32 / config.window.height.max(1) as f32,
            ..Camera::default()
        };
        let controller = OrbitController::new(scene.camera_limits(), config.camera.start_distance);

        Self {
            config,
            scene,
            camera,
            controller,
            clock: FrameClock::new(),
            window: None,
            gpu: None,
            depth: None,
            renderer: None,
        }
    }

    /// Tear down the loop: the scene has no internal stop state, so
    /// stopping is exiting the event loop.
    fn stop(&self, event_loop: &ActiveEventLoop) {
        info!("Stopping after {} frames", self.clock.frame_count());
        event_loop.exit();
    }

    /// Run one frame and schedule the next.
    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let elapsed_ms = self.clock.tick();
        self.scene.advance(elapsed_ms);
        self.controller.update(&mut self.camera);

        let (Some(gpu), Some(depth), Some(renderer), Some(window)) =
            (&self.gpu, &self.depth, &self.renderer, &self.window)
        else {
            return;
        };

        let result = renderer.render(gpu, depth, &self.camera, &self.scene);
        window.request_redraw();

        match result {
            Ok(()) => {}
            Err(SurfaceError::Timeout) => warn!("Frame skipped: surface timeout"),
            Err(SurfaceError::Lost) => warn!("Frame skipped: surface lost"),
            Err(SurfaceError::OutOfMemory) => {
                error!("GPU out of memory");
                self.stop(event_loop);
            }
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window = match event_loop.create_window(window_attributes_from_config(&self.config)) {
            Ok(window) => Arc::new(window),
            Err(err) => {
                error!("Failed to create window: {err}");
                event_loop.exit();
                return;
            }
        };

        let gpu = match init_render_context_blocking(window.clone(), self.config.window.vsync) {
            Ok(gpu) => gpu,
            Err(err) => {
                error!("GPU initialization failed: {err}");
                event_loop.exit();
                return;
            }
        };

        let size = window.inner_size();
        self.camera
            .set_aspect_ratio(size.width as f32, size.height as f32);
        self.depth = Some(DepthBuffer::new(
            &gpu.device,
            size.width.max(1),
            size.height.max(1),
        ));
        self.renderer = Some(SceneRenderer::new(&gpu, &self.scene, &self.config.assets));
        self.gpu = Some(gpu);

        window.request_redraw();
        self.window = Some(window);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => self.stop(event_loop),
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } => self.stop(event_loop),
            WindowEvent::Resized(size) => {
                // Resize touches only the surface and the camera
                // projection; body state is never involved.
                if let Some(gpu) = self.gpu.as_mut() {
                    gpu.resize(size.width, size.height);
                }
                if let (Some(gpu), Some(depth)) = (&self.gpu, self.depth.as_mut()) {
                    depth.resize(&gpu.device, size.width.max(1), size.height.max(1));
                }
                self.camera
                    .set_aspect_ratio(size.width as f32, size.height as f32);
            }
            WindowEvent::MouseInput { state, button, .. } => {
                self.controller.on_mouse_button(button, state);
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.controller.on_cursor_moved(position.x, position.y);
            }
            WindowEvent::MouseWheel { delta, .. } => {
                self.controller.on_scroll(delta);
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {}
        }
    }
}

/// Create an event loop and run the application with the given config and
/// scene. Blocks until the window is closed.
pub fn run(config: Config, scene: Scene) {
    let event_loop = EventLoop::new().expect("Failed to create event loop");
    let mut app = App::new(config, scene);
    event_loop.run_app(&mut app).expect("Event loop failed");
}
