use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::core::{App, AppControl, FrameCtx, WindowCtx};
use crate::device::{Gpu, GpuInit, ReportedErrors};
use crate::error::RuntimeError;
use crate::input::platform::winit::translate_window_event;
use crate::input::InputState;
use crate::time::{FrameClock, FrameTime};

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
    pub resizable: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "deltoid".to_string(),
            initial_size: LogicalSize::new(800.0, 600.0),
            resizable: true,
        }
    }
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Opens the window, brings up the GPU context and drives `app` until the
    /// window is closed or the app asks to exit.
    ///
    /// Bootstrap failures stop the loop before any frame is drawn and are
    /// returned as the matching [`RuntimeError`] variant.
    pub fn run<A>(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Result<(), RuntimeError>
    where
        A: 'static + App,
    {
        let event_loop = EventLoop::new().map_err(RuntimeError::EventLoop)?;
        let mut state = AppState::new(config, gpu_init, app);

        let run = event_loop.run_app(&mut state);

        if let Some(err) = state.failure.take() {
            return Err(err);
        }

        run.map_err(RuntimeError::EventLoopRun)?;
        log::info!("event loop finished");
        Ok(())
    }
}

#[self_referencing]
struct WindowEntry {
    input_state: InputState,
    clock: FrameClock,

    window: Window,

    #[borrows(window)]
    #[covariant]
    gpu: Gpu<'this>,
}

struct AppState<A>
where
    A: App + 'static,
{
    config: RuntimeConfig,
    gpu_init: GpuInit,
    app: A,

    window: Option<WindowEntry>,
    reported_errors: ReportedErrors,
    failure: Option<RuntimeError>,
    exit_requested: bool,
}

impl<A> AppState<A>
where
    A: App + 'static,
{
    fn new(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Self {
        Self {
            config,
            gpu_init,
            app,
            window: None,
            reported_errors: ReportedErrors::default(),
            failure: None,
            exit_requested: false,
        }
    }

    fn create_window_entry(&self, event_loop: &ActiveEventLoop) -> Result<WindowEntry, RuntimeError> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size)
            .with_resizable(self.config.resizable);

        let window = event_loop
            .create_window(attrs)
            .map_err(RuntimeError::WindowCreation)?;

        let gpu_init = self.gpu_init.clone();

        let entry = WindowEntryTryBuilder {
            input_state: InputState::default(),
            clock: FrameClock::default(),
            window,
            gpu_builder: |w| pollster::block_on(Gpu::new(w, gpu_init)),
        }
        .try_build()?;

        Ok(entry)
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: RuntimeError) {
        log::debug!("startup aborted: {err}");
        self.failure = Some(err);
        self.exit_requested = true;
        event_loop.exit();
    }

    fn request_exit(&mut self, event_loop: &ActiveEventLoop) {
        self.exit_requested = true;
        event_loop.exit();
    }

    fn redraw(&mut self) -> AppControl {
        let app = &mut self.app;
        let reported = &mut self.reported_errors;
        let Some(entry) = self.window.as_mut() else {
            return AppControl::Continue;
        };

        entry.with_mut(|fields| {
            let ft: FrameTime = fields.clock.tick();

            let mut ctx = FrameCtx {
                window: WindowCtx {
                    window: fields.window,
                },
                gpu: fields.gpu,
                input: fields.input_state,
                time: ft,
            };

            let control = app.on_frame(&mut ctx);

            for message in ctx.gpu.errors().take() {
                if reported.first_report(&message) {
                    log::error!("GPU error during frame {}: {message}", ft.frame_index);
                } else {
                    log::trace!("repeated GPU error during frame {}: {message}", ft.frame_index);
                }
            }

            control
        })
    }
}

impl<A> ApplicationHandler for AppState<A>
where
    A: App + 'static,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() || self.exit_requested {
            return;
        }

        match self.create_window_entry(event_loop) {
            Ok(entry) => {
                let size = entry.borrow_gpu().size();
                log::info!(
                    "window \"{}\" ready ({}x{} physical)",
                    self.config.title,
                    size.width,
                    size.height
                );
                entry.with_window(|w| w.request_redraw());
                self.window = Some(entry);
            }
            Err(err) => self.fail(event_loop, err),
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        event_loop.set_control_flow(ControlFlow::Wait);

        // Continuous redraw; presentation paces the loop.
        if let Some(entry) = self.window.as_ref() {
            entry.with_window(|w| w.request_redraw());
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        let Some(entry) = self.window.as_mut() else {
            return;
        };

        if let Some(ev) = translate_window_event(&event) {
            entry.with_input_state_mut(|input| input.apply_event(&ev));
        }

        if self.app.on_window_event(&event) == AppControl::Exit {
            self.request_exit(event_loop);
            return;
        }

        match &event {
            WindowEvent::CloseRequested => {
                log::info!("close requested");
                self.window = None;
                self.request_exit(event_loop);
            }

            WindowEvent::Resized(new_size) => {
                if let Some(entry) = self.window.as_mut() {
                    entry.with_gpu_mut(|gpu| gpu.resize(*new_size));
                    entry.with_window(|w| w.request_redraw());
                }
            }

            WindowEvent::ScaleFactorChanged { .. } => {
                if let Some(entry) = self.window.as_mut() {
                    let new_size = entry.with_window(|w| w.inner_size());
                    entry.with_gpu_mut(|gpu| gpu.resize(new_size));
                    entry.with_window(|w| w.request_redraw());
                }
            }

            WindowEvent::RedrawRequested => {
                if self.redraw() == AppControl::Exit {
                    self.request_exit(event_loop);
                }
            }

            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::GpuInitError;

    #[derive(Default)]
    struct CountingApp {
        frames: usize,
    }

    impl App for CountingApp {
        fn on_frame(&mut self, _ctx: &mut FrameCtx<'_, '_>) -> AppControl {
            self.frames += 1;
            AppControl::Continue
        }
    }

    #[test]
    fn no_frame_is_driven_without_a_window() {
        let mut state = AppState::new(
            RuntimeConfig::default(),
            GpuInit::default(),
            CountingApp::default(),
        );
        state.failure = Some(RuntimeError::from(GpuInitError::NoSurfaceFormat));

        assert_eq!(state.redraw(), AppControl::Continue);
        assert_eq!(state.app.frames, 0);
        assert_eq!(state.failure.as_ref().map(RuntimeError::exit_code), Some(1));
    }

    #[test]
    fn default_config_is_a_resizable_800_by_600_window() {
        let config = RuntimeConfig::default();
        assert_eq!(config.initial_size, LogicalSize::new(800.0, 600.0));
        assert!(config.resizable);
    }
}
