use std::ops::Range;

use bytemuck::{Pod, Zeroable};

use crate::render::RenderCtx;
use crate::scene::shapes::{LineCap, LineCmd};

use super::common::{InstanceBuffer, PipelineSlot, SharedResources, create_quad_pipeline};

/// Anti-aliased stroked segments. Each segment is an oriented quad; the
/// fragment shader evaluates a box or capsule SDF depending on the cap.
pub(crate) struct LineRenderer {
    pipeline: PipelineSlot,
    instances: InstanceBuffer<LineInstance>,
}

impl LineRenderer {
    pub(crate) fn new() -> Self {
        Self {
            pipeline: PipelineSlot::default(),
            instances: InstanceBuffer::new("stopwatch line instances"),
        }
    }

    pub(crate) fn clear(&mut self) {
        self.instances.clear();
    }

    pub(crate) fn stage(&mut self, cmd: &LineCmd) -> Range<u32> {
        let start = self.instances.len();
        if cmd.width <= 0.0 || !cmd.from.is_finite() || !cmd.to.is_finite() {
            return start..start;
        }
        // A zero-length butt segment covers nothing; a round one is a dot.
        if cmd.cap == LineCap::Butt && (cmd.to - cmd.from).length() <= f32::EPSILON {
            return start..start;
        }

        let cap = match cmd.cap {
            LineCap::Butt => 0.0,
            LineCap::Round => 1.0,
        };
        self.instances.push(LineInstance {
            from: [cmd.from.x, cmd.from.y],
            to: [cmd.to.x, cmd.to.y],
            width_cap: [cmd.width, cap],
            color: cmd.color.to_array(),
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
                "stopwatch line pipeline",
                include_str!("shaders/line.wgsl"),
                LineInstance::layout(),
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

/// 40 bytes: from, to, (width, cap), color.
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct LineInstance {
    from: [f32; 2],
    to: [f32; 2],
    width_cap: [f32; 2],
    color: [f32; 4],
}

impl LineInstance {
    const ATTRS: [wgpu::VertexAttribute; 4] = wgpu::vertex_attr_array![
        1 => Float32x2,
        2 => Float32x2,
        3 => Float32x2,
        4 => Float32x4
    ];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<LineInstance>() as u64,
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

    fn line(to: Vec2, cap: LineCap) -> LineCmd {
        LineCmd {
            from: Vec2::new(1.0, 1.0),
            to,
            width: 2.0,
            color: Color::BLACK,
            cap,
        }
    }

    #[test]
    fn zero_length_butt_is_culled_but_round_is_a_dot() {
        let mut r = LineRenderer::new();
        assert!(r.stage(&line(Vec2::new(1.0, 1.0), LineCap::Butt)).is_empty());
        assert_eq!(r.stage(&line(Vec2::new(1.0, 1.0), LineCap::Round)), 0..1);
    }

    #[test]
    fn non_finite_endpoints_are_culled() {
        let mut r = LineRenderer::new();
        assert!(r.stage(&line(Vec2::new(f32::NAN, 0.0), LineCap::Round)).is_empty());
        assert_eq!(r.stage(&line(Vec2::new(9.0, 1.0), LineCap::Butt)), 0..1);
    }
}
