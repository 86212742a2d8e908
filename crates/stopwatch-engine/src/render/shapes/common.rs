//! GPU plumbing shared by the shape renderers.

use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use crate::coords::Viewport;
use crate::render::RenderCtx;

// ── uniforms & geometry ──────────────────────────────────────────────────

/// Bound at group 0 for every shape pipeline.
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct ViewportUniform {
    size: [f32; 2],
    scale: f32,
    _pad: f32,
}

/// Unit quad corner in `0..1`; instance data places and sizes it.
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct QuadVertex {
    corner: [f32; 2],
}

impl QuadVertex {
    const ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x2];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<QuadVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

const QUAD_VERTICES: [QuadVertex; 4] = [
    QuadVertex { corner: [0.0, 0.0] },
    QuadVertex { corner: [1.0, 0.0] },
    QuadVertex { corner: [1.0, 1.0] },
    QuadVertex { corner: [0.0, 1.0] },
];

const QUAD_INDICES: [u16; 6] = [0, 1, 2, 0, 2, 3];

/// Viewport bind group and unit quad buffers, created once per device.
pub(crate) struct SharedResources {
    viewport_layout: wgpu::BindGroupLayout,
    viewport_ubo: wgpu::Buffer,
    viewport_group: wgpu::BindGroup,
    quad_vbo: wgpu::Buffer,
    quad_ibo: wgpu::Buffer,
}

impl SharedResources {
    pub(crate) fn new(device: &wgpu::Device) -> Self {
        let viewport_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("stopwatch viewport bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: wgpu::BufferSize::new(
                        std::mem::size_of::<ViewportUniform>() as u64,
                    ),
                },
                count: None,
            }],
        });

        let viewport_ubo = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("stopwatch viewport ubo"),
            size: std::mem::size_of::<ViewportUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let viewport_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("stopwatch viewport bind group"),
            layout: &viewport_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: viewport_ubo.as_entire_binding(),
            }],
        });

        let quad_vbo = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("stopwatch quad vbo"),
            contents: bytemuck::cast_slice(&QUAD_VERTICES),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let quad_ibo = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("stopwatch quad ibo"),
            contents: bytemuck::cast_slice(&QUAD_INDICES),
            usage: wgpu::BufferUsages::INDEX,
        });

        Self {
            viewport_layout,
            viewport_ubo,
            viewport_group,
            quad_vbo,
            quad_ibo,
        }
    }

    pub(crate) fn viewport_layout(&self) -> &wgpu::BindGroupLayout {
        &self.viewport_layout
    }

    pub(crate) fn write_viewport(&self, queue: &wgpu::Queue, viewport: Viewport, scale: f32) {
        let uniform = ViewportUniform {
            size: [viewport.width.max(1.0), viewport.height.max(1.0)],
            scale,
            _pad: 0.0,
        };
        queue.write_buffer(&self.viewport_ubo, 0, bytemuck::bytes_of(&uniform));
    }

    /// Binds group 0 and the unit quad. Pipelines keep these bindings valid
    /// because they all share the same group 0 layout.
    pub(crate) fn bind(&self, rpass: &mut wgpu::RenderPass<'_>) {
        rpass.set_bind_group(0, &self.viewport_group, &[]);
        rpass.set_vertex_buffer(0, self.quad_vbo.slice(..));
        rpass.set_index_buffer(self.quad_ibo.slice(..), wgpu::IndexFormat::Uint16);
    }
}

// ── pipelines ────────────────────────────────────────────────────────────

/// Pipeline cached against the surface format it was built for.
#[derive(Default)]
pub(super) struct PipelineSlot {
    format: Option<wgpu::TextureFormat>,
    pipeline: Option<wgpu::RenderPipeline>,
}

impl PipelineSlot {
    pub(super) fn ensure(
        &mut self,
        format: wgpu::TextureFormat,
        create: impl FnOnce() -> wgpu::RenderPipeline,
    ) {
        if self.format != Some(format) || self.pipeline.is_none() {
            self.pipeline = Some(create());
            self.format = Some(format);
        }
    }

    pub(super) fn get(&self) -> Option<&wgpu::RenderPipeline> {
        self.pipeline.as_ref()
    }
}

/// Builds an instanced unit-quad pipeline with premultiplied alpha blending.
///
/// `bind_group_layouts[0]` must be the shared viewport layout.
pub(super) fn create_quad_pipeline(
    ctx: &RenderCtx<'_>,
    label: &str,
    source: &str,
    instance_layout: wgpu::VertexBufferLayout<'static>,
    bind_group_layouts: &[&wgpu::BindGroupLayout],
) -> wgpu::RenderPipeline {
    let shader = ctx
        .device
        .create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(label),
            source: wgpu::ShaderSource::Wgsl(source.into()),
        });

    let layout = ctx
        .device
        .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some(label),
            bind_group_layouts,
            immediate_size: 0,
        });

    ctx.device
        .create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(label),
            layout: Some(&layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[QuadVertex::layout(), instance_layout],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: ctx.surface_format,
                    blend: Some(wgpu::BlendState::PREMULTIPLIED_ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                cull_mode: None,
                ..Default::default()
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        })
}

// ── instance buffers ─────────────────────────────────────────────────────

/// CPU staging plus a grow-only GPU vertex buffer for one instance type.
pub(super) struct InstanceBuffer<T: Pod> {
    label: &'static str,
    staged: Vec<T>,
    buffer: Option<wgpu::Buffer>,
    capacity: usize,
}

impl<T: Pod> InstanceBuffer<T> {
    pub(super) fn new(label: &'static str) -> Self {
        Self {
            label,
            staged: Vec::new(),
            buffer: None,
            capacity: 0,
        }
    }

    pub(super) fn clear(&mut self) {
        self.staged.clear();
    }

    pub(super) fn len(&self) -> u32 {
        self.staged.len() as u32
    }

    pub(super) fn push(&mut self, instance: T) {
        self.staged.push(instance);
    }

    /// Copies the staged instances to the GPU, growing the buffer if needed.
    pub(super) fn upload(&mut self, ctx: &RenderCtx<'_>) {
        if self.staged.is_empty() {
            return;
        }

        if self.buffer.is_none() || self.staged.len() > self.capacity {
            let capacity = grown_capacity(self.staged.len());
            self.buffer = Some(ctx.device.create_buffer(&wgpu::BufferDescriptor {
                label: Some(self.label),
                size: (capacity * std::mem::size_of::<T>()) as u64,
                usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            }));
            self.capacity = capacity;
        }

        if let Some(buffer) = &self.buffer {
            ctx.queue
                .write_buffer(buffer, 0, bytemuck::cast_slice(&self.staged));
        }
    }

    pub(super) fn buffer(&self) -> Option<&wgpu::Buffer> {
        self.buffer.as_ref()
    }
}

fn grown_capacity(required: usize) -> usize {
    required.next_power_of_two().max(64)
}
