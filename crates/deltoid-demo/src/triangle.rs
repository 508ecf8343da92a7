use bytemuck::{Pod, Zeroable};
use deltoid_engine::render::{RenderCtx, RenderTarget};
use glam::Mat4;
use wgpu::util::DeviceExt;

use crate::shader::{ShaderProgram, ShaderSources};

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub pos: [f32; 3],
}

impl Vertex {
    const ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x3];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

/// The only geometry the demo draws, uploaded once.
pub const TRIANGLE_VERTICES: [Vertex; 3] = [
    Vertex { pos: [-1.0, -1.0, 0.0] },
    Vertex { pos: [1.0, -1.0, 0.0] },
    Vertex { pos: [0.0, 1.0, 0.0] },
];

/// Draws the triangle with the `model` transform of the current frame.
///
/// GPU resources are created on first use and the program is rebuilt when the
/// surface format changes.
#[derive(Default)]
pub struct TriangleRenderer {
    program: Option<ShaderProgram>,
    vbo: Option<wgpu::Buffer>,
}

impl TriangleRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Uploads `model` and draws the three vertices into `target`.
    pub fn render(&mut self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>, model: &Mat4) {
        self.ensure_program(ctx);
        self.ensure_vertex_buffer(ctx);

        let Some(program) = self.program.as_ref() else { return };
        let Some(vbo) = self.vbo.as_ref() else { return };

        program.set_model(ctx.queue, model);

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("deltoid triangle pass"),
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

        program.bind(&mut rpass);
        rpass.set_vertex_buffer(0, vbo.slice(..));
        rpass.draw(0..TRIANGLE_VERTICES.len() as u32, 0..1);
    }

    fn ensure_program(&mut self, ctx: &RenderCtx<'_>) {
        if let Some(program) = self.program.as_ref() {
            if program.surface_format() == ctx.surface_format {
                return;
            }
            log::debug!("surface format changed; rebuilding shader program");
        }

        let build = ShaderProgram::build(ctx, ShaderSources::default(), &[Vertex::layout()]);
        if let Err(e) = &build.outcome {
            // Not fatal: keep drawing with whatever the build produced.
            log::error!("{e}");
        }

        self.program = Some(build.program);
    }

    fn ensure_vertex_buffer(&mut self, ctx: &RenderCtx<'_>) {
        if self.vbo.is_some() {
            return;
        }

        self.vbo = Some(ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("deltoid triangle vbo"),
            contents: bytemuck::cast_slice(&TRIANGLE_VERTICES),
            usage: wgpu::BufferUsages::VERTEX,
        }));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn triangle_has_the_three_fixed_vertices() {
        let positions: Vec<[f32; 3]> = TRIANGLE_VERTICES.iter().map(|v| v.pos).collect();
        assert_eq!(
            positions,
            vec![[-1.0, -1.0, 0.0], [1.0, -1.0, 0.0], [0.0, 1.0, 0.0]]
        );
    }

    #[test]
    fn vertex_bytes_are_tightly_packed_positions() {
        let bytes: &[u8] = bytemuck::cast_slice(&TRIANGLE_VERTICES);
        assert_eq!(bytes.len(), 3 * 3 * 4);

        let floats: &[f32] = bytemuck::cast_slice(bytes);
        assert_eq!(floats, &[-1.0, -1.0, 0.0, 1.0, -1.0, 0.0, 0.0, 1.0, 0.0]);
    }

    #[test]
    fn layout_reads_one_vec3_per_vertex() {
        let layout = Vertex::layout();
        assert_eq!(layout.array_stride, 12);
        assert_eq!(layout.attributes.len(), 1);
        assert_eq!(layout.attributes[0].shader_location, 0);
        assert_eq!(layout.attributes[0].format, wgpu::VertexFormat::Float32x3);
    }

    #[test]
    fn renderer_creates_nothing_before_first_frame() {
        let renderer = TriangleRenderer::new();
        assert!(renderer.program.is_none());
        assert!(renderer.vbo.is_none());
    }
}
