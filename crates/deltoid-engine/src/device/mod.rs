//! GPU device + surface management.
//!
//! This module is responsible for:
//! - creating the wgpu Instance/Adapter/Device/Queue
//! - creating & configuring the Surface (swapchain)
//! - acquiring frames and providing encoders/views for rendering
//! - capturing GPU validation errors instead of panicking on them

mod error;
mod frame;
mod gpu;
mod init;
mod sink;
mod surface;

pub use error::{GpuInitError, SurfaceErrorAction};
pub use frame::GpuFrame;
pub use gpu::Gpu;
pub use init::GpuInit;
pub use sink::ErrorSink;
pub(crate) use sink::ReportedErrors;
