//! Interactive window for a [`Scene`].
//!
//! Left drag orbits the camera, the wheel zooms the model, Escape quits.
//! Every redraw advances the swarm by exactly one tick.

use std::sync::Arc;

use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::error::ViewerError;
use crate::gpu::{FrameBatch, GpuState};
use crate::input::{Input, KeyCode};
use crate::scene::Scene;
use crate::time::FrameClock;

const TITLE: &str = "pointswarm";

/// Open a window and run `scene` until it is closed.
pub fn run(scene: Scene) -> Result<(), ViewerError> {
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(scene);
    event_loop.run_app(&mut app)?;

    match app.error.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

struct App {
    window: Option<Arc<Window>>,
    gpu_state: Option<GpuState>,
    scene: Scene,
    batch: FrameBatch,
    input: Input,
    clock: FrameClock,
    /// Set when setup fails inside the event loop; returned by [`run`].
    error: Option<ViewerError>,
}

impl App {
    fn new(scene: Scene) -> Self {
        Self {
            window: None,
            gpu_state: None,
            scene,
            batch: FrameBatch::new(),
            input: Input::new(),
            clock: FrameClock::new(),
            error: None,
        }
    }

    fn init_window(&mut self, event_loop: &ActiveEventLoop) -> Result<(), ViewerError> {
        let [width, height] = self.scene.config().sketch.canvas_size;
        let window_attrs = Window::default_attributes()
            .with_title(TITLE)
            .with_inner_size(winit::dpi::LogicalSize::new(width, height));

        let window = Arc::new(event_loop.create_window(window_attrs)?);
        self.window = Some(window.clone());
        self.gpu_state = Some(pollster::block_on(GpuState::new(window))?);

        tracing::info!(width, height, "viewer window ready");
        Ok(())
    }

    /// Apply this frame's input, tick, and draw.
    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let Some(gpu_state) = &mut self.gpu_state else {
            return;
        };

        if self.input.key_pressed(KeyCode::Escape) {
            event_loop.exit();
            return;
        }

        let drag = self.input.drag_delta();
        if drag != glam::Vec2::ZERO {
            self.scene.camera_mut().drag(drag.x, drag.y);
        }
        let wheel = self.input.wheel_delta();
        if wheel != 0.0 {
            self.scene.zoom(wheel);
        }
        self.input.begin_frame();

        let dt = self.clock.update();
        self.batch.clear();
        self.scene.frame(dt).draw(&mut self.batch);

        let projection = self.scene.camera().projection(gpu_state.aspect());
        match gpu_state.render(&self.batch, projection, self.scene.model_view()) {
            Ok(_) => {}
            Err(wgpu::SurfaceError::Lost) => gpu_state.resize(winit::dpi::PhysicalSize {
                width: gpu_state.config.width,
                height: gpu_state.config.height,
            }),
            Err(wgpu::SurfaceError::OutOfMemory) => {
                tracing::error!("GPU out of memory, exiting");
                event_loop.exit();
            }
            Err(e) => tracing::warn!(error = ?e, "render error"),
        }

        if self.clock.frame() % 60 == 0 {
            if let Some(window) = &self.window {
                window.set_title(&format!("{TITLE} - {:.0} fps", self.clock.fps()));
            }
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            if let Err(e) = self.init_window(event_loop) {
                tracing::error!(error = %e, "viewer setup failed");
                self.error = Some(e);
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        self.input.handle_event(&event);

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(physical_size) => {
                if let Some(gpu_state) = &mut self.gpu_state {
                    gpu_state.resize(physical_size);
                }
            }
            WindowEvent::RedrawRequested => {
                self.redraw(event_loop);
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            _ => {}
        }
    }
}
