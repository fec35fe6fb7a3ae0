use egui::Context;
use egui_wgpu::{Renderer, ScreenDescriptor};
use egui_winit::State;
use field_core::Palette;
use field_simulation::FieldParams;
use wgpu::{Device, TextureFormat};
use winit::{event::WindowEvent, window::Window};

pub struct UiState {
    pub fps: f32,
    pub frame_time: f32,
    pub seed: u64,
    pub running: bool,
    pub entity_count: usize,
    pub connection_count: usize,
    pub effect_count: usize,
    pub mean_energy: f32,
    /// Working copy edited by the sliders, applied by the host after each frame
    pub params: FieldParams,
    pub reseed_requested: bool,
}

impl UiState {
    pub fn new(params: FieldParams, seed: u64) -> Self {
        Self {
            fps: 0.0,
            frame_time: 0.0,
            seed,
            running: true,
            entity_count: 0,
            connection_count: 0,
            effect_count: 0,
            mean_energy: 0.0,
            params,
            reseed_requested: false,
        }
    }
}

/// Tuning panel drawn over the field with egui
pub struct Gui {
    context: Context,
    state: State,
    renderer: Renderer,
}

fn screen_descriptor(window: &Window) -> ScreenDescriptor {
    let size = window.inner_size();
    ScreenDescriptor {
        size_in_pixels: [size.width, size.height],
        pixels_per_point: window.scale_factor() as f32,
    }
}

impl Gui {
    pub fn new(device: &Device, format: TextureFormat, window: &Window) -> Self {
        let context = Context::default();
        let state = State::new(
            context.clone(),
            context.viewport_id(),
            window,
            Some(window.scale_factor() as f32),
            None,
            Some(device.limits().max_texture_dimension_2d as usize),
        );

        Self {
            context,
            state,
            renderer: Renderer::new(
                device,
                format,
                egui_wgpu::RendererOptions {
                    msaa_samples: 1,
                    depth_stencil_format: None,
                    dithering: false,
                    ..Default::default()
                },
            ),
        }
    }

    /// Feed a window event to the panel; true when the panel consumed it
    pub fn handle_event(&mut self, window: &Window, event: &WindowEvent) -> bool {
        self.state.on_window_event(window, event).consumed
    }

    /// Run the panel for this frame and draw it on top of `target`
    pub fn render(
        &mut self,
        device: &Device,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        window: &Window,
        target: &wgpu::TextureView,
        ui_state: &mut UiState,
    ) {
        let input = self.state.take_egui_input(window);
        let output = self.context.run(input, |ctx| Self::ui(ctx, ui_state));
        self.state
            .handle_platform_output(window, output.platform_output);

        let primitives = self
            .context
            .tessellate(output.shapes, output.pixels_per_point);
        let screen = screen_descriptor(window);

        for (id, delta) in &output.textures_delta.set {
            self.renderer.update_texture(device, queue, *id, delta);
        }
        self.renderer
            .update_buffers(device, queue, encoder, &primitives, &screen);

        {
            // Load keeps the field drawn earlier in this encoder
            let mut pass = encoder
                .begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("Panel Pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view: target,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Load,
                            store: wgpu::StoreOp::Store,
                        },
                        depth_slice: None,
                    })],
                    depth_stencil_attachment: None,
                    timestamp_writes: None,
                    occlusion_query_set: None,
                })
                .forget_lifetime();
            self.renderer.render(&mut pass, &primitives, &screen);
        }

        for id in &output.textures_delta.free {
            self.renderer.free_texture(id);
        }
    }

    fn ui(ctx: &Context, state: &mut UiState) {
        egui::Window::new("Diagnostics")
            .anchor(egui::Align2::LEFT_TOP, [10.0, 10.0])
            .resizable(false)
            .collapsible(true)
            .show(ctx, |ui| {
                ui.label(format!("FPS: {:.1}", state.fps));
                ui.label(format!("Frame Time: {:.2} ms", state.frame_time));
                ui.label(format!("Seed: {}", state.seed));
                ui.label(if state.running { "Running" } else { "Paused" });
                ui.separator();
                ui.label(format!("Entities: {}", state.entity_count));
                ui.label(format!("Connections: {}", state.connection_count));
                ui.label(format!("Effects: {}", state.effect_count));
                ui.label(format!("Mean Energy: {:.3}", state.mean_energy));
            });

        egui::Window::new("Field Controls")
            .anchor(egui::Align2::LEFT_BOTTOM, [10.0, -10.0])
            .resizable(false)
            .collapsible(true)
            .show(ctx, |ui| {
                let params = &mut state.params;

                ui.heading("Population");
                ui.add(egui::Slider::new(&mut params.max_entities, 0..=300).text("Max Entities"));
                ui.add(egui::Slider::new(&mut params.trail_length, 0..=64).text("Trail Length"));
                ui.horizontal(|ui| {
                    if ui.button("Mocha").clicked() {
                        params.palette = Palette::mocha();
                    }
                    if ui.button("Macchiato").clicked() {
                        params.palette = Palette::macchiato();
                    }
                    if ui.button("Latte").clicked() {
                        params.palette = Palette::latte();
                    }
                });
                if ui.button("Reseed").clicked() {
                    state.reseed_requested = true;
                }

                ui.separator();
                ui.heading("Motion");
                ui.add(egui::Slider::new(&mut params.damping, 0.8..=1.0).text("Damping"));
                ui.add(egui::Slider::new(&mut params.max_speed, 0.1..=10.0).text("Max Speed"));
                ui.add(
                    egui::Slider::new(&mut params.drift_strength, 0.0..=0.3).text("Drift"),
                );

                ui.separator();
                ui.heading("Pointer");
                ui.add(
                    egui::Slider::new(&mut params.interaction_radius, 10.0..=400.0)
                        .text("Radius"),
                );
                ui.add(
                    egui::Slider::new(&mut params.interaction_strength, 0.0..=50.0)
                        .text("Strength"),
                );

                ui.separator();
                ui.heading("Connections");
                ui.add(
                    egui::Slider::new(&mut params.connection_distance, 0.0..=300.0)
                        .text("Distance"),
                );
                ui.add(
                    egui::Slider::new(&mut params.spawn_probability, 0.0..=0.05)
                        .text("Packet Rate")
                        .logarithmic(true),
                );
                ui.add(egui::Slider::new(&mut params.max_effects, 0..=128).text("Max Effects"));

                ui.separator();
                ui.heading("Drawing");
                ui.add(egui::Slider::new(&mut params.line_width, 0.5..=4.0).text("Line Width"));
                ui.add(egui::Slider::new(&mut params.glow_scale, 0.5..=8.0).text("Glow"));
            });
    }
}
