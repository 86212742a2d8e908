use std::ops::Range;

use bytemuck::{Pod, Zeroable};

use crate::render::RenderCtx;
use crate::scene::shapes::CircleCmd;

use super::common::{InstanceBuffer, PipelineSlot, SharedResources, create_quad_pipeline};

/// SDF circles with an optional inner border ring.
pub(crate) struct CircleRenderer {
    pipeline: PipelineSlot,
    instances: InstanceBuffer<CircleInstance>,
}

impl CircleRenderer {
    pub(crate) fn new() -> Self {
        Self {
            pipeline: PipelineSlot::default(),
            instances: InstanceBuffer::new("stopwatch circle instances"),
        }
    }

    pub(crate) fn clear(&mut self) {
        self.instances.clear();
    }

    /// Stages one instance; returns the instance range it occupies (empty if culled).
    pub(crate) fn stage(&mut self, cmd: &CircleCmd) -> Range<u32> {
        let start = self.instances.len();
        if cmd.radius <= 0.0 || !cmd.center.is_finite() {
            return start..start;
        }

        let (border_width, border_color) = match cmd.border {
            Some(b) => (b.width.clamp(0.0, cmd.radius), b.color.to_array()),
            None => (0.0, [0.0; 4]),
        };

        self.instances.push(CircleInstance {
            center: [cmd.center.x, cmd.center.y],
            radius_bw: [cmd.radius, border_width],
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
                "stopwatch circle pipeline",
                include_str!("shaders/circle.wgsl"),
                CircleInstance::layout(),
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

/// 48 bytes: center, (radius, border width), fill, border color.
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct CircleInstance {
    center: [f32; 2],
    radius_bw: [f32; 2],
    fill: [f32; 4],
    border: [f32; 4],
}

impl CircleInstance {
    const ATTRS: [wgpu::VertexAttribute; 4] = wgpu::vertex_attr_array![
        1 => Float32x2,
        2 => Float32x2,
        3 => Float32x4,
        4 => Float32x4
    ];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<CircleInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::Vec2;
    use crate::paint::Color;
    use crate::scene::shapes::Border;

    fn cmd(radius: f32, border: Option<Border>) -> CircleCmd {
        CircleCmd {
            center: Vec2::new(10.0, 10.0),
            radius,
            fill: Color::WHITE,
            border,
        }
    }

    #[test]
    fn degenerate_circles_are_culled() {
        let mut r = CircleRenderer::new();
        assert!(r.stage(&cmd(0.0, None)).is_empty());
        assert!(r.stage(&cmd(-3.0, None)).is_empty());
        assert_eq!(r.stage(&cmd(4.0, None)), 0..1);
        assert_eq!(r.stage(&cmd(4.0, None)), 1..2);
    }

    #[test]
    fn border_cannot_exceed_radius() {
        let mut r = CircleRenderer::new();
        r.stage(&cmd(4.0, Some(Border::new(9.0, Color::BLACK))));
        assert_eq!(r.instances.len(), 1);
        assert_eq!(std::mem::size_of::<CircleInstance>(), 48);
    }
}
