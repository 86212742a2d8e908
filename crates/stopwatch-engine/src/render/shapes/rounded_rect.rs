use std::ops::Range;

use bytemuck::{Pod, Zeroable};

use crate::render::RenderCtx;
use crate::scene::shapes::RoundedRectCmd;

use super::common::{InstanceBuffer, PipelineSlot, SharedResources, create_quad_pipeline};

/// SDF rounded rectangles with a uniform corner radius and optional border.
pub(crate) struct RoundedRectRenderer {
    pipeline: PipelineSlot,
    instances: InstanceBuffer<RoundedRectInstance>,
}

impl RoundedRectRenderer {
    pub(crate) fn new() -> Self {
        Self {
            pipeline: PipelineSlot::default(),
            instances: InstanceBuffer::new("stopwatch rounded rect instances"),
        }
    }

    pub(crate) fn clear(&mut self) {
        self.instances.clear();
    }

    pub(crate) fn stage(&mut self, cmd: &RoundedRectCmd) -> Range<u32> {
        let start = self.instances.len();
        let r = cmd.rect;
        if r.is_empty() {
            return start..start;
        }

        let radius = cmd.radius.clamp(0.0, r.min_side() * 0.5);
        let (border_width, border_color) = match cmd.border {
            Some(b) => (b.width.clamp(0.0, r.min_side() * 0.5), b.color.to_array()),
            None => (0.0, [0.0; 4]),
        };

        self.instances.push(RoundedRectInstance {
            origin: [r.origin.x, r.origin.y],
            size: [r.size.x, r.size.y],
            radius_bw: [radius, border_width],
            fill: cmd.fill.to_array(),
            border: border_color,
        });
        start..self.instances.len()
    }

    pub(crate) fn prepare(&mut self, ctx: &RenderCtx<'_>, shared: &SharedResources) {
        if self.instances.len() == 0 {
            return;
        }
        self.pipeline.ensure(ctx.surface_format, || {
            create_quad_pipeline(
                ctx,
                "stopwatch rounded rect pipeline",
                include_str!("shaders/rounded_rect.wgsl"),
                RoundedRectInstance::layout(),
                &[shared.viewport_layout()],
            )
        });
        self.instances.upload(ctx);
    }

    pub(crate) fn draw(&self, rpass: &mut wgpu::RenderPass<'_>, range: Range<u32>) {
        let (Some(pipeline), Some(instances)) = (self.pipeline.get(), self.instances.buffer())
        else {
            return;
        };
        rpass.set_pipeline(pipeline);
        rpass.set_vertex_buffer(1, instances.slice(..));
        rpass.draw_indexed(0..6, 0, range);
    }
}

/// 56 bytes: origin, size, (radius, border width), fill, border color.
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct RoundedRectInstance {
    origin: [f32; 2],
    size: [f32; 2],
    radius_bw: [f32; 2],
    fill: [f32; 4],
    border: [f32; 4],
}

impl RoundedRectInstance {
    const ATTRS: [wgpu::VertexAttribute; 5] = wgpu::vertex_attr_array![
        1 => Float32x2,
        2 => Float32x2,
        3 => Float32x2,
        4 => Float32x4,
        5 => Float32x4
    ];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<RoundedRectInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::Rect;
    use crate::paint::Color;

    #[test]
    fn radius_is_clamped_to_half_the_short_side() {
        let mut r = RoundedRectRenderer::new();
        let range = r.stage(&RoundedRectCmd {
            rect: Rect::new(0.0, 0.0, 100.0, 30.0),
            radius: 40.0,
            fill: Color::BLACK,
            border: None,
        });
        assert_eq!(range, 0..1);
        assert_eq!(r.instances.len(), 1);
    }

    #[test]
    fn empty_rect_is_culled() {
        let mut r = RoundedRectRenderer::new();
        let range = r.stage(&RoundedRectCmd {
            rect: Rect::new(5.0, 5.0, 0.0, 30.0),
            radius: 4.0,
            fill: Color::BLACK,
            border: None,
        });
        assert!(range.is_empty());
    }
}
