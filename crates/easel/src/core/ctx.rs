use std::rc::Rc;

use winit::window::Window;

use crate::host::NativeHost;

use super::HostCtx;

/// Handles passed to `App` callbacks.
pub struct AppCtx<'a> {
    /// Facade. Clone the `Rc` into frame callbacks that reschedule themselves.
    pub host: &'a Rc<HostCtx>,
    /// Writer side of host state (media features, scale factor).
    pub native: &'a NativeHost,
    pub window: &'a Window,
}

impl AppCtx<'_> {
    /// Returns the logical window size as `(width, height)` in logical pixels.
    pub fn logical_size(&self) -> (f32, f32) {
        let phys = self.window.inner_size();
        let scale = self.window.scale_factor();
        let logi: winit::dpi::LogicalSize<f64> = phys.to_logical(scale);
        (logi.width as f32, logi.height as f32)
    }
}
