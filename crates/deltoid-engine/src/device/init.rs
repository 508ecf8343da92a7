/// Device and presentation requirements for the GPU context.
///
/// The default is the demo's fixed context: no optional features, default
/// limits and FIFO presentation, the equivalent of a plain core-profile
/// context with vsync.
#[derive(Debug, Clone)]
pub struct GpuInit {
    /// FIFO blocks on the display refresh and is supported everywhere.
    pub present_mode: wgpu::PresentMode,
    pub required_features: wgpu::Features,
    pub required_limits: wgpu::Limits,
}

impl Default for GpuInit {
    fn default() -> Self {
        Self {
            present_mode: wgpu::PresentMode::Fifo,
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_a_plain_vsynced_context() {
        let init = GpuInit::default();
        assert_eq!(init.present_mode, wgpu::PresentMode::Fifo);
        assert!(init.required_features.is_empty());
        assert_eq!(init.required_limits, wgpu::Limits::default());
    }
}
