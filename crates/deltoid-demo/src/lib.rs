//! Keyboard-driven triangle demo.
//!
//! One red triangle, moved with the arrow keys, scaled with W/S and rotated
//! with A/D. The per-frame update lives in [`transform`] and is independent
//! of the window and GPU.

pub mod app;
pub mod config;
pub mod shader;
pub mod transform;
pub mod triangle;

use deltoid_engine::device::GpuInit;
use deltoid_engine::window::Runtime;
use deltoid_engine::RuntimeError;

pub use app::DemoApp;
pub use config::DemoConfig;

/// Opens the demo window and runs until it is closed.
pub fn run(config: DemoConfig) -> Result<(), RuntimeError> {
    let runtime_config = config.runtime_config();
    Runtime::run(runtime_config, GpuInit::default(), DemoApp::new(config))
}
