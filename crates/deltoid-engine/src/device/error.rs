use thiserror::Error;

/// High-level response after a surface error.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SurfaceErrorAction {
    /// Surface was reconfigured; rendering may resume next frame.
    Reconfigured,
    /// Transient error; skip the current frame.
    SkipFrame,
    /// Fatal error (commonly OOM); terminate gracefully.
    Fatal,
}

/// Failure to bring up the GPU context for a window.
#[derive(Debug, Error)]
pub enum GpuInitError {
    #[error("window has zero size")]
    ZeroSize,

    #[error("failed to create wgpu surface: {0}")]
    Surface(#[source] wgpu::CreateSurfaceError),

    #[error("failed to find a suitable GPU adapter: {0}")]
    Adapter(#[source] wgpu::RequestAdapterError),

    #[error("failed to create wgpu device/queue: {0}")]
    Device(#[source] wgpu::RequestDeviceError),

    #[error("no supported surface formats")]
    NoSurfaceFormat,
}
