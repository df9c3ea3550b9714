//! Host capability negotiation.
//!
//! A [`Host`] describes which primitives the surrounding environment offers.
//! [`Capabilities::negotiate`] probes it once and produces the resolved set
//! `HostCtx` runs on, so no operation re-checks availability per call.

mod caps;
mod config;
mod native;

use std::rc::Rc;

use crate::frame::PaintScheduler;
use crate::link::UrlFacility;
use crate::media::{DisplayMetrics, MediaQueryFacility};
use crate::raster::RasterFacility;
use crate::time::MonotonicClock;

pub use caps::Capabilities;
pub use config::HostConfig;
pub use native::NativeHost;

/// Probe surface of a host environment.
///
/// Optional primitives return `None` when the host lacks them.
pub trait Host {
    fn monotonic_clock(&self) -> Option<Rc<dyn MonotonicClock>>;
    fn paint_scheduler(&self) -> Rc<dyn PaintScheduler>;
    fn raster(&self) -> Rc<dyn RasterFacility>;
    fn url_facility(&self) -> Rc<dyn UrlFacility>;
    fn media_queries(&self) -> Option<Rc<dyn MediaQueryFacility>>;
    fn display(&self) -> Rc<dyn DisplayMetrics>;
}
