//! Window + paint loop.
//!
//! Owns the `winit` EventLoop and Window, and drives the native frame queue
//! from redraw events.

mod runtime;

pub use runtime::{Runtime, RuntimeConfig};
