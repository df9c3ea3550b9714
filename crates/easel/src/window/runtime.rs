use std::rc::Rc;

use anyhow::{Context, Result};
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::core::{App, AppControl, AppCtx, HostCtx};
use crate::host::{HostConfig, NativeHost};

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "easel".to_string(),
            initial_size: LogicalSize::new(960.0, 540.0),
        }
    }
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Builds the native host and its facade, opens a window and runs until
    /// the window closes or the app asks to exit.
    pub fn run<A>(config: RuntimeConfig, host_config: HostConfig, app: A) -> Result<()>
    where
        A: 'static + App,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;

        let native = NativeHost::new(&host_config);
        let host = Rc::new(HostCtx::from_host(&native));
        let mut state = AppState {
            config,
            native,
            host,
            app,
            window: None,
            exit_requested: false,
        };

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        Ok(())
    }
}

struct AppState<A>
where
    A: App + 'static,
{
    config: RuntimeConfig,
    native: NativeHost,
    host: Rc<HostCtx>,
    app: A,

    window: Option<Rc<Window>>,
    exit_requested: bool,
}

impl<A> AppState<A>
where
    A: App + 'static,
{
    fn request_exit(&mut self, event_loop: &ActiveEventLoop) {
        self.exit_requested = true;
        self.native.frames().clear_redraw_hook();
        self.window = None;
        event_loop.exit();
    }

    fn create_window(&mut self, event_loop: &ActiveEventLoop) -> Result<Rc<Window>> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size);

        let window = Rc::new(
            event_loop
                .create_window(attrs)
                .context("failed to create window")?,
        );

        self.native.scale_factor().set(window.scale_factor());

        // Paint requests wake the window; the weak ref lets the window drop
        // on close while the queue lives on.
        let weak = Rc::downgrade(&window);
        self.native.frames().set_redraw_hook(move || {
            if let Some(w) = weak.upgrade() {
                w.request_redraw();
            }
        });

        Ok(window)
    }

    /// Runs one paint of the native frame queue.
    fn paint(&self, window: &Window) {
        let frames = self.native.frames();
        let timestamp = self.host.now();

        window.pre_present_notify();
        let ran = frames.run_frame(timestamp);
        log::trace!("paint at {timestamp:.3}ms ran {ran} callbacks");

        if frames.has_pending() {
            window.request_redraw();
        }
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

        let window = match self.create_window(event_loop) {
            Ok(w) => w,
            Err(e) => {
                log::error!("failed to create initial window: {e:#}");
                self.request_exit(event_loop);
                return;
            }
        };
        self.window = Some(window.clone());

        let ctx = AppCtx {
            host: &self.host,
            native: &self.native,
            window: &window,
        };
        if self.app.init(&ctx) == AppControl::Exit {
            self.request_exit(event_loop);
            return;
        }

        window.request_redraw();
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        // Redraws are requested by the frame queue; idle otherwise.
        event_loop.set_control_flow(ControlFlow::Wait);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(window) = self.window.clone().filter(|w| w.id() == window_id) else {
            return;
        };

        let ctx = AppCtx {
            host: &self.host,
            native: &self.native,
            window: &window,
        };
        if self.app.on_window_event(&ctx, &event) == AppControl::Exit {
            self.request_exit(event_loop);
            return;
        }

        match &event {
            WindowEvent::CloseRequested => self.request_exit(event_loop),

            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                self.native.scale_factor().set(*scale_factor);
                window.request_redraw();
            }

            WindowEvent::RedrawRequested => self.paint(&window),

            _ => {}
        }
    }
}
