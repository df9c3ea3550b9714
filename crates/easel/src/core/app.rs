use winit::event::WindowEvent;

use super::ctx::AppCtx;

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Application contract driven by `window::Runtime`.
///
/// Per-frame work is not a callback here: the app schedules it through
/// `HostCtx::frame`, and the runtime runs due frames on each redraw.
pub trait App {
    /// Called once, after the window exists and the host is live.
    fn init(&mut self, ctx: &AppCtx<'_>) -> AppControl;

    /// Called for window events.
    fn on_window_event(&mut self, ctx: &AppCtx<'_>, event: &WindowEvent) -> AppControl {
        let _ = (ctx, event);
        AppControl::Continue
    }
}
