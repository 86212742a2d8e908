use std::ops::Range;

use crate::scene::{DrawCmd, DrawList};
use crate::text::FontSystem;

use super::shapes::SharedResources;
use super::shapes::circle::CircleRenderer;
use super::shapes::line::LineRenderer;
use super::shapes::rounded_rect::RoundedRectRenderer;
use super::shapes::text::TextRenderer;
use super::{RenderCtx, RenderTarget};

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum BatchKind {
    RoundedRect,
    Circle,
    Line,
    Text,
}

/// Consecutive instances of one kind, drawn with a single call.
#[derive(Debug, Clone, PartialEq)]
struct Batch {
    kind: BatchKind,
    instances: Range<u32>,
}

/// Appends `instances` to the last batch when it continues it, else starts a new one.
fn push_batch(batches: &mut Vec<Batch>, kind: BatchKind, instances: Range<u32>) {
    if instances.is_empty() {
        return;
    }
    if let Some(last) = batches.last_mut()
        && last.kind == kind
        && last.instances.end == instances.start
    {
        last.instances.end = instances.end;
        return;
    }
    batches.push(Batch { kind, instances });
}

/// Draws a [`DrawList`] back-to-front in one render pass.
pub struct SceneRenderer {
    shared: Option<SharedResources>,
    rounded_rects: RoundedRectRenderer,
    circles: CircleRenderer,
    lines: LineRenderer,
    text: TextRenderer,
    batches: Vec<Batch>,
}

impl SceneRenderer {
    pub fn new() -> Self {
        Self {
            shared: None,
            rounded_rects: RoundedRectRenderer::new(),
            circles: CircleRenderer::new(),
            lines: LineRenderer::new(),
            text: TextRenderer::new(),
            batches: Vec::new(),
        }
    }

    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        draw_list: &mut DrawList,
        fonts: &FontSystem,
    ) {
        if !ctx.viewport.is_valid() {
            return;
        }

        self.rounded_rects.clear();
        self.circles.clear();
        self.lines.clear();
        self.text.clear();
        self.batches.clear();

        for item in draw_list.iter_in_paint_order() {
            let (kind, range) = match &item.cmd {
                DrawCmd::RoundedRect(cmd) => (BatchKind::RoundedRect, self.rounded_rects.stage(cmd)),
                DrawCmd::Circle(cmd) => (BatchKind::Circle, self.circles.stage(cmd)),
                DrawCmd::Line(cmd) => (BatchKind::Line, self.lines.stage(cmd)),
                DrawCmd::Text(cmd) => (BatchKind::Text, self.text.stage(ctx, fonts, cmd)),
            };
            push_batch(&mut self.batches, kind, range);
        }

        if self.batches.is_empty() {
            return;
        }

        let shared = self
            .shared
            .get_or_insert_with(|| SharedResources::new(ctx.device));
        shared.write_viewport(ctx.queue, ctx.viewport, ctx.scale_factor);

        self.rounded_rects.prepare(ctx, shared);
        self.circles.prepare(ctx, shared);
        self.lines.prepare(ctx, shared);
        self.text.prepare(ctx, shared);

        let mut rpass = target
            .encoder
            .begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("stopwatch scene pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: target.color_view,
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
                multiview_mask: None,
            });

        shared.bind(&mut rpass);
        for batch in &self.batches {
            let range = batch.instances.clone();
            match batch.kind {
                BatchKind::RoundedRect => self.rounded_rects.draw(&mut rpass, range),
                BatchKind::Circle => self.circles.draw(&mut rpass, range),
                BatchKind::Line => self.lines.draw(&mut rpass, range),
                BatchKind::Text => self.text.draw(&mut rpass, range),
            }
        }
    }
}

impl Default for SceneRenderer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contiguous_ranges_of_one_kind_merge() {
        let mut batches = Vec::new();
        push_batch(&mut batches, BatchKind::Circle, 0..1);
        push_batch(&mut batches, BatchKind::Circle, 1..2);
        assert_eq!(
            batches,
            vec![Batch {
                kind: BatchKind::Circle,
                instances: 0..2
            }]
        );
    }

    #[test]
    fn interleaved_kinds_keep_paint_order() {
        let mut batches = Vec::new();
        push_batch(&mut batches, BatchKind::Circle, 0..1);
        push_batch(&mut batches, BatchKind::Line, 0..12);
        push_batch(&mut batches, BatchKind::Circle, 1..2);

        let kinds: Vec<_> = batches.iter().map(|b| b.kind).collect();
        assert_eq!(kinds, vec![BatchKind::Circle, BatchKind::Line, BatchKind::Circle]);
    }

    #[test]
    fn culled_commands_do_not_split_batches() {
        let mut batches = Vec::new();
        push_batch(&mut batches, BatchKind::Text, 0..8);
        push_batch(&mut batches, BatchKind::Circle, 0..0);
        push_batch(&mut batches, BatchKind::Text, 8..16);
        assert_eq!(batches.len(), 1);
        assert_eq!(batches[0].instances, 0..16);
    }
}
