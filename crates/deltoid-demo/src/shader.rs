//! The triangle's shader program.
//!
//! Building a program runs three checked stages:
//! - compile: each WGSL stage module, checked against the compiler messages
//! - link: pipeline layout + render pipeline
//! - validate: the `model` uniform buffer and its bind group
//!
//! A failing stage is reported through [`ProgramBuild::outcome`], but the
//! program objects are still created and used. wgpu turns invalid objects
//! into no-op draws plus captured errors, so the window keeps running.

use std::fmt;

use bytemuck::{Pod, Zeroable};
use deltoid_engine::render::RenderCtx;
use glam::Mat4;
use thiserror::Error;

pub const VERTEX_SHADER: &str = include_str!("shaders/triangle.vert.wgsl");
pub const FRAGMENT_SHADER: &str = include_str!("shaders/triangle.frag.wgsl");

const VERTEX_ENTRY: &str = "vs_main";
const FRAGMENT_ENTRY: &str = "fs_main";

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => f.write_str("vertex"),
            ShaderStage::Fragment => f.write_str("fragment"),
        }
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum ShaderError {
    #[error("error compiling the {stage} shader: '{log}'")]
    Compile { stage: ShaderStage, log: String },

    #[error("error linking program: '{log}'")]
    Link { log: String },

    #[error("error validating program: '{log}'")]
    Validate { log: String },
}

/// One compiler message, reduced to what goes into a log line.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Diagnostic {
    pub line: Option<u32>,
    pub column: Option<u32>,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.line, self.column) {
            (Some(l), Some(c)) => write!(f, "{l}:{c}: {}", self.message),
            (Some(l), None) => write!(f, "{l}: {}", self.message),
            _ => f.write_str(&self.message),
        }
    }
}

/// Joins diagnostics into one log text; `None` when there is nothing to report.
pub fn format_log(diagnostics: &[Diagnostic]) -> Option<String> {
    if diagnostics.is_empty() {
        return None;
    }
    let lines: Vec<String> = diagnostics.iter().map(|d| d.to_string()).collect();
    Some(lines.join("\n"))
}

fn error_diagnostics(info: &wgpu::CompilationInfo) -> Vec<Diagnostic> {
    info.messages
        .iter()
        .filter(|m| matches!(m.message_type, wgpu::CompilationMessageType::Error))
        .map(|m| Diagnostic {
            line: m.location.as_ref().map(|loc| loc.line_number),
            column: m.location.as_ref().map(|loc| loc.line_position),
            message: m.message.clone(),
        })
        .collect()
}

fn sink_diagnostics(messages: Vec<String>) -> Vec<Diagnostic> {
    messages
        .into_iter()
        .map(|message| Diagnostic {
            line: None,
            column: None,
            message,
        })
        .collect()
}

/// WGSL sources for the two stages.
#[derive(Debug, Copy, Clone)]
pub struct ShaderSources<'a> {
    pub vertex: &'a str,
    pub fragment: &'a str,
}

impl Default for ShaderSources<'static> {
    fn default() -> Self {
        Self {
            vertex: VERTEX_SHADER,
            fragment: FRAGMENT_SHADER,
        }
    }
}

/// Host-side layout of the `model` uniform (column-major 4x4).
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub struct ModelUniform {
    pub model: [[f32; 4]; 4],
}

impl From<&Mat4> for ModelUniform {
    fn from(m: &Mat4) -> Self {
        Self {
            model: m.to_cols_array_2d(),
        }
    }
}

/// Result of [`ShaderProgram::build`].
pub struct ProgramBuild {
    pub program: ShaderProgram,
    /// First stage that failed, if any.
    pub outcome: Result<(), ShaderError>,
}

/// Compiled pipeline plus the `model` uniform it reads.
pub struct ShaderProgram {
    pipeline: wgpu::RenderPipeline,
    model_ubo: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    surface_format: wgpu::TextureFormat,
}

impl ShaderProgram {
    /// Compiles, links and validates the program for `ctx.surface_format`.
    ///
    /// `vertex_buffers` describes the vertex input the vertex stage reads.
    pub fn build(
        ctx: &RenderCtx<'_>,
        sources: ShaderSources<'_>,
        vertex_buffers: &[wgpu::VertexBufferLayout<'_>],
    ) -> ProgramBuild {
        let mut outcome: Result<(), ShaderError> = Ok(());

        // Anything recorded before this point belongs to someone else.
        for stale in ctx.errors.take() {
            log::error!("GPU error: {stale}");
        }

        // ── compile ──────────────────────────────────────────────────────
        let vs = compile_stage(ctx, ShaderStage::Vertex, sources.vertex, &mut outcome);
        let fs = compile_stage(ctx, ShaderStage::Fragment, sources.fragment, &mut outcome);

        // ── link ─────────────────────────────────────────────────────────
        let bind_group_layout =
            ctx.device
                .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                    label: Some("deltoid model bgl"),
                    entries: &[wgpu::BindGroupLayoutEntry {
                        binding: 0,
                        visibility: wgpu::ShaderStages::VERTEX,
                        ty: wgpu::BindingType::Buffer {
                            ty: wgpu::BufferBindingType::Uniform,
                            has_dynamic_offset: false,
                            min_binding_size: wgpu::BufferSize::new(
                                std::mem::size_of::<ModelUniform>() as u64,
                            ),
                        },
                        count: None,
                    }],
                });

        let pipeline_layout =
            ctx.device
                .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                    label: Some("deltoid triangle pipeline layout"),
                    bind_group_layouts: &[&bind_group_layout],
                    immediate_size: 0,
                });

        let pipeline = ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("deltoid triangle pipeline"),
            layout: Some(&pipeline_layout),

            vertex: wgpu::VertexState {
                module: &vs,
                entry_point: Some(VERTEX_ENTRY),
                compilation_options: Default::default(),
                buffers: vertex_buffers,
            },

            fragment: Some(wgpu::FragmentState {
                module: &fs,
                entry_point: Some(FRAGMENT_ENTRY),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: ctx.surface_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),

            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                // Rotation and negative scale can flip winding.
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },

            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        check_stage(ctx, &mut outcome, |log| ShaderError::Link { log });

        // ── validate ─────────────────────────────────────────────────────
        let model_ubo = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("deltoid model ubo"),
            size: std::mem::size_of::<ModelUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("deltoid model bind group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: model_ubo.as_entire_binding(),
            }],
        });

        check_stage(ctx, &mut outcome, |log| ShaderError::Validate { log });

        if outcome.is_ok() {
            log::debug!("shader program ready for {:?}", ctx.surface_format);
        }

        ProgramBuild {
            program: ShaderProgram {
                pipeline,
                model_ubo,
                bind_group,
                surface_format: ctx.surface_format,
            },
            outcome,
        }
    }

    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.surface_format
    }

    /// Writes `model` into the uniform read by the vertex stage.
    pub fn set_model(&self, queue: &wgpu::Queue, model: &Mat4) {
        let u = ModelUniform::from(model);
        queue.write_buffer(&self.model_ubo, 0, bytemuck::bytes_of(&u));
    }

    /// Sets pipeline and uniform bindings on `rpass`.
    pub fn bind(&self, rpass: &mut wgpu::RenderPass<'_>) {
        rpass.set_pipeline(&self.pipeline);
        rpass.set_bind_group(0, &self.bind_group, &[]);
    }
}

fn compile_stage(
    ctx: &RenderCtx<'_>,
    stage: ShaderStage,
    source: &str,
    outcome: &mut Result<(), ShaderError>,
) -> wgpu::ShaderModule {
    let label = match stage {
        ShaderStage::Vertex => "deltoid triangle vertex shader",
        ShaderStage::Fragment => "deltoid triangle fragment shader",
    };

    let module = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(label),
        source: wgpu::ShaderSource::Wgsl(source.into()),
    });

    let info = pollster::block_on(module.get_compilation_info());
    let mut diagnostics = error_diagnostics(&info);
    let captured = ctx.errors.take();
    if diagnostics.is_empty() {
        diagnostics = sink_diagnostics(captured);
    }

    if let Some(log) = format_log(&diagnostics) {
        record(outcome, ShaderError::Compile { stage, log });
    }

    module
}

fn check_stage(
    ctx: &RenderCtx<'_>,
    outcome: &mut Result<(), ShaderError>,
    make: impl FnOnce(String) -> ShaderError,
) {
    if let Some(log) = format_log(&sink_diagnostics(ctx.errors.take())) {
        record(outcome, make(log));
    }
}

/// Keeps the first failure; later ones are usually its consequence.
fn record(outcome: &mut Result<(), ShaderError>, err: ShaderError) {
    match outcome {
        Ok(()) => *outcome = Err(err),
        Err(first) => log::debug!("{err} (after {first})"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compile_error_names_stage_and_log() {
        let err = ShaderError::Compile {
            stage: ShaderStage::Fragment,
            log: "3:5: unknown identifier".into(),
        };
        assert_eq!(
            err.to_string(),
            "error compiling the fragment shader: '3:5: unknown identifier'"
        );
    }

    #[test]
    fn link_and_validate_errors_carry_log() {
        let link = ShaderError::Link { log: "entry point missing".into() };
        let validate = ShaderError::Validate { log: "binding size".into() };
        assert!(link.to_string().contains("linking"));
        assert!(link.to_string().contains("entry point missing"));
        assert!(validate.to_string().contains("validating"));
    }

    #[test]
    fn log_joins_diagnostics_with_positions() {
        let diags = [
            Diagnostic { line: Some(4), column: Some(12), message: "expected ';'".into() },
            Diagnostic { line: None, column: None, message: "Validation Error".into() },
        ];
        assert_eq!(
            format_log(&diags).as_deref(),
            Some("4:12: expected ';'\nValidation Error")
        );
        assert_eq!(format_log(&[]), None);
    }

    #[test]
    fn first_failure_is_kept() {
        let mut outcome = Ok(());
        record(&mut outcome, ShaderError::Compile {
            stage: ShaderStage::Vertex,
            log: "bad".into(),
        });
        record(&mut outcome, ShaderError::Link { log: "worse".into() });
        assert!(matches!(
            outcome,
            Err(ShaderError::Compile { stage: ShaderStage::Vertex, .. })
        ));
    }

    #[test]
    fn model_uniform_is_column_major() {
        let m = Mat4::from_translation(glam::Vec3::new(0.25, -0.5, 0.0));
        let u = ModelUniform::from(&m);
        assert_eq!(u.model[3], [0.25, -0.5, 0.0, 1.0]);
        assert_eq!(std::mem::size_of::<ModelUniform>(), 64);
    }

    #[test]
    fn sources_declare_model_uniform_and_entry_points() {
        let s = ShaderSources::default();
        assert!(s.vertex.contains("var<uniform> model: mat4x4<f32>"));
        assert!(s.vertex.contains(&format!("fn {VERTEX_ENTRY}(")));
        assert!(s.fragment.contains(&format!("fn {FRAGMENT_ENTRY}(")));
        assert!(s.fragment.contains("vec4<f32>(1.0, 0.0, 0.0, 1.0)"));
    }
}
