//! Instanced shape rendering for recorded frames

use crate::canvas::{Shape, ShapeList};
use bytemuck::{Pod, Zeroable};
use field_core::{Color, Palette};
use glam::Vec2;

const KIND_LINE: u32 = 0;
const KIND_CIRCLE: u32 = 1;
const KIND_RING: u32 = 2;
const KIND_GLOW: u32 = 3;

const INITIAL_CAPACITY: usize = 1024;

/// GPU-side layout of one shape, mirrored by `Shape` in shape.wgsl
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct ShapeInstance {
    /// Line: from.xy, to.xy. Circle, ring and glow: center.xy, radius, 0
    pub geometry: [f32; 4],
    pub color: [f32; 4],
    /// Glow edge color, unused by other kinds
    pub outer_color: [f32; 4],
    pub kind: u32,
    /// Line and ring stroke width
    pub width: f32,
    pub _padding: [f32; 2],
}

impl From<&Shape> for ShapeInstance {
    fn from(shape: &Shape) -> Self {
        let (geometry, color, outer_color, kind, width) = match *shape {
            Shape::Line {
                from,
                to,
                width,
                color,
            } => ([from.x, from.y, to.x, to.y], color, color, KIND_LINE, width),
            Shape::Circle {
                center,
                radius,
                color,
            } => ([center.x, center.y, radius, 0.0], color, color, KIND_CIRCLE, 0.0),
            Shape::Ring {
                center,
                radius,
                width,
                color,
            } => ([center.x, center.y, radius, 0.0], color, color, KIND_RING, width),
            Shape::Glow {
                center,
                radius,
                inner,
                outer,
            } => ([center.x, center.y, radius, 0.0], inner, outer, KIND_GLOW, 0.0),
        };

        Self {
            geometry,
            color: color.to_array(),
            outer_color: outer_color.to_array(),
            kind,
            width,
            _padding: [0.0; 2],
        }
    }
}

#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
struct ViewUniform {
    size: [f32; 2],
    _padding: [f32; 2],
}

/// Pack recorded shapes into `out`, replacing its contents
pub fn pack_shapes(shapes: &[Shape], out: &mut Vec<ShapeInstance>) {
    out.clear();
    out.extend(shapes.iter().map(ShapeInstance::from));
}

fn clear_color(color: Color) -> wgpu::Color {
    wgpu::Color {
        r: color.r as f64,
        g: color.g as f64,
        b: color.b as f64,
        a: color.a as f64,
    }
}

pub struct ShapeRenderer {
    render_pipeline: wgpu::RenderPipeline,
    bind_group_layout: wgpu::BindGroupLayout,
    bind_group: wgpu::BindGroup,
    view_buffer: wgpu::Buffer,
    instance_buffer: wgpu::Buffer,
    instance_capacity: usize,
    instances: Vec<ShapeInstance>,
}

impl ShapeRenderer {
    pub fn new(device: &wgpu::Device, format: wgpu::TextureFormat) -> Self {
        let view_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Shape View Buffer"),
            size: std::mem::size_of::<ViewUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let instance_buffer = Self::create_instance_buffer(device, INITIAL_CAPACITY);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Shape Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/shape.wgsl").into()),
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Shape Bind Group Layout"),
            entries: &[
                // View (Uniform) - Binding 0
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
                // Shapes (Storage) - Binding 1
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Storage { read_only: true },
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
            ],
        });

        let bind_group =
            Self::create_bind_group(device, &bind_group_layout, &view_buffer, &instance_buffer);

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Shape Pipeline Layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let render_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Shape Render Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vertex"),
                buffers: &[],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fragment"),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                unclipped_depth: false,
                polygon_mode: wgpu::PolygonMode::Fill,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        Self {
            render_pipeline,
            bind_group_layout,
            bind_group,
            view_buffer,
            instance_buffer,
            instance_capacity: INITIAL_CAPACITY,
            instances: Vec::with_capacity(INITIAL_CAPACITY),
        }
    }

    fn create_instance_buffer(device: &wgpu::Device, capacity: usize) -> wgpu::Buffer {
        device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Shape Instance Buffer"),
            size: (capacity * std::mem::size_of::<ShapeInstance>()) as u64,
            usage: wgpu::BufferUsages::STORAGE | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        })
    }

    fn create_bind_group(
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        view_buffer: &wgpu::Buffer,
        instance_buffer: &wgpu::Buffer,
    ) -> wgpu::BindGroup {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Shape Bind Group"),
            layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: view_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: instance_buffer.as_entire_binding(),
                },
            ],
        })
    }

    /// Grow the instance buffer (doubling) until it fits `count` shapes
    fn ensure_capacity(&mut self, device: &wgpu::Device, count: usize) {
        if count <= self.instance_capacity {
            return;
        }

        let mut capacity = self.instance_capacity.max(1);
        while capacity < count {
            capacity *= 2;
        }

        self.instance_buffer = Self::create_instance_buffer(device, capacity);
        self.bind_group = Self::create_bind_group(
            device,
            &self.bind_group_layout,
            &self.view_buffer,
            &self.instance_buffer,
        );
        self.instance_capacity = capacity;
        log::debug!("shape instance buffer grown to {} shapes", capacity);
    }

    /// Record a pass that clears the target and draws `shapes`
    ///
    /// `logical_size` maps shape coordinates to the target; a zero size only
    /// clears.
    pub fn render(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        target: &wgpu::TextureView,
        shapes: &ShapeList,
        logical_size: Vec2,
    ) {
        let drawable = logical_size.x > 0.0 && logical_size.y > 0.0;

        pack_shapes(shapes.shapes(), &mut self.instances);
        let count = if drawable { self.instances.len() } else { 0 };

        if count > 0 {
            self.ensure_capacity(device, count);
            queue.write_buffer(
                &self.view_buffer,
                0,
                bytemuck::cast_slice(&[ViewUniform {
                    size: logical_size.to_array(),
                    _padding: [0.0; 2],
                }]),
            );
            queue.write_buffer(&self.instance_buffer, 0, bytemuck::cast_slice(&self.instances));
        }

        let background = shapes.clear_color().unwrap_or_else(Palette::background);

        let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Shape Render Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(clear_color(background)),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        if count > 0 {
            render_pass.set_pipeline(&self.render_pipeline);
            render_pass.set_bind_group(0, &self.bind_group, &[]);
            render_pass.draw(0..6, 0..count as u32);
        }
    }
}
