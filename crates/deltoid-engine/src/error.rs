use thiserror::Error;
use winit::error::{EventLoopError, OsError};

use crate::device::GpuInitError;

/// Fatal runtime failures.
///
/// The first three variants are the bootstrap checkpoints: none of them
/// leaves a frame drawn. Every variant maps to a non-zero process exit code.
#[derive(Debug, Error)]
pub enum RuntimeError {
    /// The window system could not be initialized.
    #[error("window system initialization failed: {0}")]
    EventLoop(#[source] EventLoopError),

    /// The OS refused to create the window.
    #[error("window creation failed: {0}")]
    WindowCreation(#[source] OsError),

    /// The graphics backend could not be brought up for the window.
    #[error("graphics initialization failed: {0}")]
    Gpu(#[from] GpuInitError),

    /// The event loop stopped with an error after startup.
    #[error("event loop terminated with error: {0}")]
    EventLoopRun(#[source] EventLoopError),
}

impl RuntimeError {
    /// Process exit code for this failure.
    pub fn exit_code(&self) -> u8 {
        match self {
            RuntimeError::EventLoop(_)
            | RuntimeError::WindowCreation(_)
            | RuntimeError::Gpu(_)
            | RuntimeError::EventLoopRun(_) => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gpu_failure_exits_with_one() {
        let err = RuntimeError::from(GpuInitError::NoSurfaceFormat);
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn gpu_failure_message_names_the_stage() {
        let err = RuntimeError::from(GpuInitError::ZeroSize);
        let msg = err.to_string();
        assert!(msg.starts_with("graphics initialization failed"), "{msg}");
        assert!(msg.contains("zero size"), "{msg}");
    }

    #[test]
    fn event_loop_failures_exit_with_one() {
        let init = RuntimeError::EventLoop(EventLoopError::RecreationAttempt);
        let run = RuntimeError::EventLoopRun(EventLoopError::ExitFailure(3));
        assert_eq!(init.exit_code(), 1);
        assert_eq!(run.exit_code(), 1);
    }
}
