//! Core contracts.
//!
//! - [`HostCtx`]: the facade the application calls into
//! - [`App`]: what the window runtime calls back into
//! - [`AppCtx`]: handles passed to `App` callbacks

mod app;
mod ctx;
mod host_ctx;

pub use app::{App, AppControl};
pub use ctx::AppCtx;
pub use host_ctx::HostCtx;
