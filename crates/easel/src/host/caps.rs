use std::rc::Rc;

use crate::frame::PaintScheduler;
use crate::link::UrlFacility;
use crate::media::{DisplayMetrics, MediaQueryFacility};
use crate::raster::RasterFacility;
use crate::time::BaseClock;

use super::Host;

/// Resolved host primitives.
#[derive(Clone)]
pub struct Capabilities {
    pub clock: BaseClock,
    pub scheduler: Rc<dyn PaintScheduler>,
    pub raster: Rc<dyn RasterFacility>,
    pub urls: Rc<dyn UrlFacility>,
    pub media: Option<Rc<dyn MediaQueryFacility>>,
    pub display: Rc<dyn DisplayMetrics>,
}

impl Capabilities {
    /// Probes `host` once.
    ///
    /// A missing monotonic clock falls back to wall-clock time.
    pub fn negotiate(host: &dyn Host) -> Self {
        let clock = match host.monotonic_clock() {
            Some(clock) => BaseClock::Monotonic(clock),
            None => BaseClock::WallClock,
        };
        let media = host.media_queries();

        log::debug!(
            "host capabilities: clock={:?}, media queries={}",
            clock,
            if media.is_some() { "yes" } else { "no" },
        );

        Self {
            clock,
            scheduler: host.paint_scheduler(),
            raster: host.raster(),
            urls: host.url_facility(),
            media,
            display: host.display(),
        }
    }
}

impl std::fmt::Debug for Capabilities {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Capabilities")
            .field("clock", &self.clock)
            .field("media", &self.media.is_some())
            .field("max_raster_dimension", &self.raster.max_dimension())
            .finish_non_exhaustive()
    }
}
