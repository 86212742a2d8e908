use std::collections::HashMap;
use std::ops::Range;

use bytemuck::{Pod, Zeroable};
use fontdue::layout::{CoordinateSystem, GlyphRasterConfig, Layout, LayoutSettings, TextStyle};

use crate::render::RenderCtx;
use crate::scene::shapes::TextCmd;
use crate::text::FontSystem;

use super::common::{InstanceBuffer, PipelineSlot, SharedResources, create_quad_pipeline};

const ATLAS_SIZE: u32 = 1024;
const GLYPH_PADDING: u32 = 1;

/// Shelf packer for the glyph atlas.
///
/// Glyphs fill a row left to right; a glyph that does not fit opens a new
/// row below the tallest glyph of the current one.
#[derive(Debug)]
struct ShelfPacker {
    size: u32,
    cursor_x: u32,
    cursor_y: u32,
    row_height: u32,
    full: bool,
}

impl ShelfPacker {
    fn new(size: u32) -> Self {
        Self {
            size,
            cursor_x: GLYPH_PADDING,
            cursor_y: GLYPH_PADDING,
            row_height: 0,
            full: false,
        }
    }

    /// Reserves a `w` x `h` slot and returns its top-left corner.
    fn place(&mut self, w: u32, h: u32) -> Option<(u32, u32)> {
        if self.full {
            return None;
        }

        if self.cursor_x + w + GLYPH_PADDING > self.size {
            self.cursor_y += self.row_height + GLYPH_PADDING;
            self.cursor_x = GLYPH_PADDING;
            self.row_height = 0;
        }

        if self.cursor_y + h + GLYPH_PADDING > self.size || w + 2 * GLYPH_PADDING > self.size {
            self.full = true;
            return None;
        }

        let slot = (self.cursor_x, self.cursor_y);
        self.cursor_x += w + GLYPH_PADDING;
        self.row_height = self.row_height.max(h);
        Some(slot)
    }
}

struct CachedGlyph {
    uv_min: [f32; 2],
    uv_max: [f32; 2],
}

struct Atlas {
    texture: wgpu::Texture,
    layout: wgpu::BindGroupLayout,
    bind_group: wgpu::BindGroup,
}

impl Atlas {
    fn new(device: &wgpu::Device) -> Self {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("stopwatch glyph atlas"),
            size: wgpu::Extent3d {
                width: ATLAS_SIZE,
                height: ATLAS_SIZE,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::R8Unorm,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("stopwatch glyph sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        let layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("stopwatch glyph atlas bgl"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("stopwatch glyph atlas bind group"),
            layout: &layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&sampler),
                },
            ],
        });

        Self {
            texture,
            layout,
            bind_group,
        }
    }

    fn upload(&self, queue: &wgpu::Queue, x: u32, y: u32, w: u32, h: u32, bitmap: &[u8]) {
        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &self.texture,
                mip_level: 0,
                origin: wgpu::Origin3d { x, y, z: 0 },
                aspect: wgpu::TextureAspect::All,
            },
            bitmap,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(w),
                rows_per_image: Some(h),
            },
            wgpu::Extent3d {
                width: w,
                height: h,
                depth_or_array_layers: 1,
            },
        );
    }
}

/// Glyph-atlas text renderer.
///
/// Text is laid out and rasterized at `size * scale_factor` physical pixels
/// so it stays sharp on HiDPI displays; quads are converted back to logical
/// pixels for the shared viewport transform. Glyphs are cached by fontdue's
/// raster config (font, glyph and pixel size), so the ten digits of the
/// readout are rasterized once and reused every tick.
pub(crate) struct TextRenderer {
    pipeline: PipelineSlot,
    instances: InstanceBuffer<GlyphInstance>,
    atlas: Option<Atlas>,
    packer: ShelfPacker,
    glyphs: HashMap<GlyphRasterConfig, CachedGlyph>,
    layout: Layout<()>,
}

impl TextRenderer {
    pub(crate) fn new() -> Self {
        Self {
            pipeline: PipelineSlot::default(),
            instances: InstanceBuffer::new("stopwatch glyph instances"),
            atlas: None,
            packer: ShelfPacker::new(ATLAS_SIZE),
            glyphs: HashMap::new(),
            layout: Layout::new(CoordinateSystem::PositiveYDown),
        }
    }

    pub(crate) fn clear(&mut self) {
        self.instances.clear();
    }

    /// Lays out `cmd`, rasterizing unseen glyphs, and stages one instance per glyph.
    pub(crate) fn stage(
        &mut self,
        ctx: &RenderCtx<'_>,
        fonts: &FontSystem,
        cmd: &TextCmd,
    ) -> Range<u32> {
        let start = self.instances.len();
        let Some(font) = fonts.get(cmd.font) else {
            log::debug!("text renderer: unknown {:?}, skipping", cmd.font);
            return start..start;
        };

        let scale = ctx.scale_factor;
        self.layout.reset(&LayoutSettings {
            x: (cmd.origin.x * scale).round(),
            y: (cmd.origin.y * scale).round(),
            ..LayoutSettings::default()
        });
        self.layout
            .append(&[font], &TextStyle::new(&cmd.text, cmd.size * scale, 0));

        // Copy positions out so the layout borrow ends before the cache is mutated.
        let placed: Vec<(GlyphRasterConfig, f32, f32, usize, usize)> = self
            .layout
            .glyphs()
            .iter()
            .filter(|g| g.char_data.rasterize() && g.width > 0 && g.height > 0)
            .map(|g| (g.key, g.x, g.y, g.width, g.height))
            .collect();

        let atlas = self.atlas.get_or_insert_with(|| Atlas::new(ctx.device));
        let color = cmd.color.to_array();

        for (key, x, y, w, h) in placed {
            if !self.glyphs.contains_key(&key) {
                let (metrics, bitmap) = font.rasterize_config(key);
                let (gw, gh) = (metrics.width as u32, metrics.height as u32);
                if gw == 0 || gh == 0 {
                    continue;
                }
                let Some((gx, gy)) = self.packer.place(gw, gh) else {
                    log::warn!("glyph atlas is full ({ATLAS_SIZE}x{ATLAS_SIZE}); dropping glyph");
                    continue;
                };
                atlas.upload(ctx.queue, gx, gy, gw, gh, &bitmap);

                let s = ATLAS_SIZE as f32;
                self.glyphs.insert(
                    key,
                    CachedGlyph {
                        uv_min: [gx as f32 / s, gy as f32 / s],
                        uv_max: [(gx + gw) as f32 / s, (gy + gh) as f32 / s],
                    },
                );
            }

            let Some(cached) = self.glyphs.get(&key) else {
                continue;
            };

            self.instances.push(GlyphInstance {
                dst_min: [x / scale, y / scale],
                dst_max: [(x + w as f32) / scale, (y + h as f32) / scale],
                uv_min: cached.uv_min,
                uv_max: cached.uv_max,
                color,
            });
        }

        start..self.instances.len()
    }

    pub(crate) fn prepare(&mut self, ctx: &RenderCtx<'_>, shared: &SharedResources) {
        if self.instances.len() == 0 {
            return;
        }
        let Some(atlas) = self.atlas.as_ref() else {
            return;
        };
        self.pipeline.ensure(ctx.surface_format, || {
            create_quad_pipeline(
                ctx,
                "stopwatch text pipeline",
                include_str!("shaders/text.wgsl"),
                GlyphInstance::layout(),
                &[shared.viewport_layout(), &atlas.layout],
            )
        });
        self.instances.upload(ctx);
    }

    pub(crate) fn draw(&self, rpass: &mut wgpu::RenderPass<'_>, range: Range<u32>) {
        let (Some(pipeline), Some(instances), Some(atlas)) = (
            self.pipeline.get(),
            self.instances.buffer(),
            self.atlas.as_ref(),
        ) else {
            return;
        };
        rpass.set_pipeline(pipeline);
        rpass.set_bind_group(1, &atlas.bind_group, &[]);
        rpass.set_vertex_buffer(1, instances.slice(..));
        rpass.draw_indexed(0..6, 0, range);
    }
}

/// 48 bytes: destination rect, atlas UV rect, color.
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct GlyphInstance {
    dst_min: [f32; 2],
    dst_max: [f32; 2],
    uv_min: [f32; 2],
    uv_max: [f32; 2],
    color: [f32; 4],
}

impl GlyphInstance {
    const ATTRS: [wgpu::VertexAttribute; 5] = wgpu::vertex_attr_array![
        1 => Float32x2,
        2 => Float32x2,
        3 => Float32x2,
        4 => Float32x2,
        5 => Float32x4
    ];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<GlyphInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRS,
        }
    }
}
