//! Deltoid engine crate.
//!
//! This crate owns the platform + GPU runtime pieces used by the demo.

pub mod device;
pub mod error;
pub mod window;
pub mod input;
pub mod time;
pub mod core;

pub mod logging;
pub mod render;

pub use error::RuntimeError;
