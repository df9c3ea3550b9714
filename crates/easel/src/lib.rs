//! Easel host crate.
//!
//! A small facade over host-environment capabilities for rendering code:
//! clock, paint-aligned frame scheduling, offscreen pixel read-back, URL
//! resolution and the reduced-motion preference. Host primitives sit behind
//! traits negotiated once into a [`HostCtx`]; [`host::NativeHost`] and
//! [`window::Runtime`] provide a desktop host.

pub mod core;
pub mod error;
pub mod frame;
pub mod host;
pub mod link;
pub mod logging;
pub mod media;
pub mod raster;
pub mod time;
pub mod window;

pub use crate::core::{App, AppControl, AppCtx, HostCtx};
pub use crate::error::HostError;
pub use crate::frame::Cancelable;
pub use crate::raster::{ImageData, ImageSource};
