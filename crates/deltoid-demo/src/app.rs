use deltoid_engine::core::{App, AppControl, FrameCtx};
use glam::Mat4;

use crate::config::DemoConfig;
use crate::transform::{KeySnapshot, TransformState};
use crate::triangle::TriangleRenderer;

/// The demo application: transform state plus the triangle renderer.
pub struct DemoApp {
    clear_color: wgpu::Color,
    transform: TransformState,
    renderer: TriangleRenderer,
}

impl DemoApp {
    pub fn new(config: DemoConfig) -> Self {
        Self {
            clear_color: config.clear_color,
            transform: TransformState::new(config.tuning),
            renderer: TriangleRenderer::new(),
        }
    }

    /// Advances the transform by one frame and returns the matrix to upload.
    pub fn step(&mut self, keys: &KeySnapshot) -> Mat4 {
        self.transform.update(keys);
        self.transform.model_matrix()
    }
}

impl App for DemoApp {
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let keys = KeySnapshot::capture(ctx.input);
        let model = self.step(&keys);

        if !keys.is_idle() {
            let t = &self.transform;
            log::trace!(
                "frame {}: offset=({:.4}, {:.4}) size={:.4} angle={:.2}",
                ctx.time.frame_index,
                t.x_offset,
                t.y_offset,
                t.size,
                t.angle
            );
        }

        let renderer = &mut self.renderer;
        ctx.render(self.clear_color, |rctx, target| {
            renderer.render(rctx, target, &model);
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_step_returns_same_matrix() {
        let mut app = DemoApp::new(DemoConfig::default());
        let first = app.step(&KeySnapshot::default());
        let second = app.step(&KeySnapshot::default());
        assert_eq!(first, second);
        assert_eq!(first, TransformState::default().model_matrix());
    }

    #[test]
    fn step_uses_configured_tuning() {
        let mut config = DemoConfig::default();
        config.tuning.translate_step = 0.25;
        let mut app = DemoApp::new(config);

        let keys = KeySnapshot { up: true, ..KeySnapshot::default() };
        let m = app.step(&keys);
        assert_eq!(app.transform.y_offset, 0.25);
        assert_eq!(m.w_axis.y, 0.25);
    }
}
