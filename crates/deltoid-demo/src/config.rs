use deltoid_engine::window::RuntimeConfig;
use winit::dpi::LogicalSize;

/// Per-frame increments and bounds for the transform update.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TransformTuning {
    /// Translation per frame while an arrow key is held.
    pub translate_step: f32,
    /// Scale change per frame while W or S is held.
    pub scale_step: f32,
    /// Rotation per frame while A or D is held, in degrees.
    pub rotate_step_deg: f32,

    /// Size the triangle starts at.
    pub initial_size: f32,
    /// Lower bound that flips the scale direction flag. Not a clamp.
    pub min_size: f32,
    /// Upper bound that flips the scale direction flag. Not a clamp.
    pub max_size: f32,
}

impl Default for TransformTuning {
    fn default() -> Self {
        Self {
            translate_step: 0.0005,
            scale_step: 0.0003,
            rotate_step_deg: 0.05,
            initial_size: 0.4,
            min_size: 0.1,
            max_size: 0.8,
        }
    }
}

/// Demo configuration.
#[derive(Debug, Clone)]
pub struct DemoConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub clear_color: wgpu::Color,
    pub tuning: TransformTuning,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            title: "TEST WINDOW".to_string(),
            width: 800,
            height: 600,
            clear_color: wgpu::Color::BLACK,
            tuning: TransformTuning::default(),
        }
    }
}

impl DemoConfig {
    pub fn runtime_config(&self) -> RuntimeConfig {
        RuntimeConfig {
            title: self.title.clone(),
            initial_size: LogicalSize::new(self.width as f64, self.height as f64),
            resizable: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_window_is_800_by_600() {
        let rc = DemoConfig::default().runtime_config();
        assert_eq!(rc.title, "TEST WINDOW");
        assert_eq!(rc.initial_size, LogicalSize::new(800.0, 600.0));
    }

    #[test]
    fn default_tuning_matches_demo_increments() {
        let t = TransformTuning::default();
        assert_eq!(t.translate_step, 0.0005);
        assert_eq!(t.scale_step, 0.0003);
        assert_eq!(t.rotate_step_deg, 0.05);
        assert_eq!(t.initial_size, 0.4);
    }
}
