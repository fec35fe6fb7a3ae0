//! Interactive particle field
//!
//! Drifting, connected particles that react to the pointer, drawn with wgpu.

mod config;
mod gui;

use anyhow::{Context, Result};
use clap::Parser;
use config::{Args, Settings};
use field_renderer::{draw_field, GpuContext, ShapeList, ShapeRenderer};
use field_simulation::FieldView;
use glam::Vec2;
use gui::{Gui, UiState};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Instant;
use winit::{
    application::ApplicationHandler,
    event::*,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

struct GpuState {
    gpu: GpuContext,
    shape_renderer: ShapeRenderer,
    gui: Gui,
}

impl GpuState {
    fn new(window: Arc<Window>) -> Option<Self> {
        let size = window.inner_size();
        let context = GpuContext::new(window.clone(), size.width, size.height);
        let gpu = match pollster::block_on(context) {
            Ok(gpu) => gpu,
            Err(err) => {
                log::warn!("Drawing surface unavailable, nothing will be drawn: {}", err);
                return None;
            }
        };

        let shape_renderer = ShapeRenderer::new(&gpu.device, gpu.format());
        log::info!("✓ Renderer initialized");

        let gui = Gui::new(&gpu.device, gpu.format(), &window);

        Some(Self {
            gpu,
            shape_renderer,
            gui,
        })
    }
}

struct App {
    view: FieldView,
    shapes: ShapeList,
    ui_state: UiState,
    show_panel: bool,
    /// Paused by the user, as opposed to stopped while occluded
    paused: bool,

    window: Option<Arc<Window>>,
    gpu_state: Option<GpuState>,

    frame_times: VecDeque<f32>,
    last_frame_time: Instant,
}

impl App {
    fn new(settings: Settings) -> Self {
        Self {
            view: FieldView::new(settings.params.clone(), StdRng::seed_from_u64(settings.seed)),
            shapes: ShapeList::new(),
            ui_state: UiState::new(settings.params, settings.seed),
            show_panel: settings.show_panel,
            paused: false,
            window: None,
            gpu_state: None,
            frame_times: VecDeque::with_capacity(100),
            last_frame_time: Instant::now(),
        }
    }

    fn resize(&mut self, size: winit::dpi::PhysicalSize<u32>, scale_factor: f64) {
        if let Some(gpu_state) = &mut self.gpu_state {
            gpu_state.gpu.resize(size.width, size.height);
        }
        self.view
            .resize_physical(size.width, size.height, scale_factor as f32);
    }

    fn toggle_pause(&mut self) {
        self.paused = !self.paused;
        if self.paused {
            self.view.stop();
        } else {
            self.view.start();
        }
        log::info!("{}", if self.paused { "Paused" } else { "Resumed" });
    }

    /// Track frame time, returning (fps, average frame time in ms)
    fn track_frame_time(&mut self, now: Instant) -> (f32, f32) {
        let frame_time = (now - self.last_frame_time).as_secs_f32() * 1000.0;
        self.last_frame_time = now;

        self.frame_times.push_back(frame_time);
        if self.frame_times.len() > 100 {
            self.frame_times.pop_front();
        }

        let avg_frame_time = self.frame_times.iter().sum::<f32>() / self.frame_times.len() as f32;
        let fps = if avg_frame_time > 0.0 {
            1000.0 / avg_frame_time
        } else {
            0.0
        };
        (fps, avg_frame_time)
    }

    fn apply_ui_changes(&mut self) {
        if self.ui_state.reseed_requested {
            self.ui_state.reseed_requested = false;
            self.view.reseed();
        }

        if &self.ui_state.params == self.view.simulation().params() {
            return;
        }
        match self.ui_state.params.validate() {
            Ok(()) => self.view.set_params(self.ui_state.params.clone()),
            Err(err) => {
                log::warn!("Rejected parameter change: {}", err);
                self.ui_state.params = self.view.simulation().params().clone();
            }
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let now = Instant::now();
        let (fps, frame_time) = self.track_frame_time(now);
        self.view.frame(now);

        let (Some(window), Some(gpu_state)) = (&self.window, &mut self.gpu_state) else {
            return;
        };
        if !self.view.surface().is_drawable() {
            return;
        }

        draw_field(&mut self.shapes, self.view.simulation());

        let output = match gpu_state.gpu.surface.get_current_texture() {
            Ok(output) => output,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                gpu_state.gpu.reconfigure();
                return;
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("Surface out of memory, exiting");
                event_loop.exit();
                return;
            }
            Err(err) => {
                log::warn!("Skipping frame: {:?}", err);
                return;
            }
        };
        let target = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = gpu_state
            .gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        gpu_state.shape_renderer.render(
            &gpu_state.gpu.device,
            &gpu_state.gpu.queue,
            &mut encoder,
            &target,
            &self.shapes,
            self.view.surface().bounds(),
        );

        let simulation = self.view.simulation();
        window.set_title(&format!(
            "fieldfx - {:.0} FPS ({:.2}ms) - {} entities",
            fps,
            frame_time,
            simulation.entities().len()
        ));

        if self.show_panel {
            self.ui_state.fps = fps;
            self.ui_state.frame_time = frame_time;
            self.ui_state.running = self.view.is_running();
            self.ui_state.entity_count = simulation.entities().len();
            self.ui_state.connection_count = simulation.connections().len();
            self.ui_state.effect_count = simulation.effects().len();
            self.ui_state.mean_energy = simulation.mean_energy();

            gpu_state.gui.render(
                &gpu_state.gpu.device,
                &gpu_state.gpu.queue,
                &mut encoder,
                window,
                &target,
                &mut self.ui_state,
            );
        }

        gpu_state.gpu.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        self.apply_ui_changes();
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window_attributes = Window::default_attributes()
            .with_title("fieldfx")
            .with_inner_size(winit::dpi::LogicalSize::new(1280, 800));

        let window = match event_loop.create_window(window_attributes) {
            Ok(window) => Arc::new(window),
            Err(err) => {
                log::error!("Failed to create window: {}", err);
                event_loop.exit();
                return;
            }
        };

        self.gpu_state = GpuState::new(window.clone());
        self.resize(window.inner_size(), window.scale_factor());
        self.view.start();
        window.request_redraw();
        self.window = Some(window);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        // Handle GUI events
        if self.show_panel {
            if let (Some(gpu_state), Some(window)) = (&mut self.gpu_state, &self.window) {
                if gpu_state.gui.handle_event(window, &event) {
                    window.request_redraw();
                    return;
                }
            }
        }

        match event {
            WindowEvent::CloseRequested
            | WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        ..
                    },
                ..
            } => {
                self.view.stop();
                event_loop.exit();
            }

            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state: ElementState::Pressed,
                        repeat: false,
                        ..
                    },
                ..
            } => match code {
                KeyCode::Space => self.toggle_pause(),
                KeyCode::KeyR => {
                    self.view.reseed();
                    log::info!("Reseeded field");
                }
                KeyCode::Tab => self.show_panel = !self.show_panel,
                _ => {}
            },

            WindowEvent::Resized(physical_size) => {
                let scale_factor = self
                    .window
                    .as_ref()
                    .map(|window| window.scale_factor())
                    .unwrap_or(1.0);
                self.resize(physical_size, scale_factor);
            }

            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                if let Some(size) = self.window.as_ref().map(|window| window.inner_size()) {
                    self.resize(size, scale_factor);
                }
            }

            WindowEvent::CursorMoved { position, .. } => {
                self.view
                    .pointer_moved_physical(Vec2::new(position.x as f32, position.y as f32));
            }

            WindowEvent::CursorLeft { .. } => self.view.pointer_left(),

            WindowEvent::Occluded(occluded) => {
                if occluded {
                    self.view.stop();
                } else if !self.paused {
                    self.view.start();
                }
            }

            WindowEvent::RedrawRequested => self.redraw(event_loop),

            _ => {}
        }

        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn main() -> Result<()> {
    // Initialize logger (RUST_LOG=debug for verbose output)
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let settings = Settings::from_args(&args)?;

    log::info!("Starting particle field...");
    log::info!("  Preset: {:?}", settings.preset);
    log::info!("  Seed: {} (pass --seed {} to replay)", settings.seed, settings.seed);

    let event_loop = EventLoop::new().context("failed to create event loop")?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(settings);
    event_loop.run_app(&mut app).context("event loop terminated with an error")?;

    Ok(())
}
