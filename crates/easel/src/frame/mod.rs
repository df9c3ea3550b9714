//! Paint-aligned frame scheduling.
//!
//! - [`PaintScheduler`] is the host primitive: run a callback once, on the next
//!   paint, with the paint timestamp in milliseconds.
//! - [`Cancelable`] is the handle handed back to callers.
//! - [`ErrorState`] is the one-way switch that turns all further scheduling
//!   into no-ops.
//! - [`FrameQueue`] is the native scheduler driven by the window runtime.

mod queue;
mod scheduler;

pub use queue::FrameQueue;
pub use scheduler::{Cancelable, ErrorState, FrameCallback, FrameToken, PaintScheduler};
