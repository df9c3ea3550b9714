use std::rc::Rc;

use crate::frame::{FrameQueue, PaintScheduler};
use crate::link::{BaseUrlFacility, UrlFacility};
use crate::media::{
    DisplayMetrics, MediaFeatures, MediaQueryFacility, ScaleFactor, REDUCED_MOTION_QUERY,
};
use crate::raster::{RasterFacility, SoftwareRaster};
use crate::time::{InstantClock, MonotonicClock};

use super::{Host, HostConfig};

/// Desktop host built from [`HostConfig`].
///
/// Keeps writer-side handles (frame queue, media features, scale factor) so
/// the runtime and the application can drive host state the facade reads.
pub struct NativeHost {
    clock: Option<Rc<InstantClock>>,
    frames: Rc<FrameQueue>,
    raster: Rc<dyn RasterFacility>,
    urls: Rc<BaseUrlFacility>,
    media: Option<MediaFeatures>,
    scale: ScaleFactor,
}

impl NativeHost {
    pub fn new(config: &HostConfig) -> Self {
        let media = config.media_queries.then(|| {
            let features = MediaFeatures::new();
            features.set(REDUCED_MOTION_QUERY, config.reduced_motion);
            features
        });

        Self {
            clock: config.monotonic_clock.then(|| Rc::new(InstantClock::new())),
            frames: Rc::new(FrameQueue::new()),
            raster: Rc::new(SoftwareRaster::with_max_dimension(config.max_raster_dimension)),
            urls: Rc::new(BaseUrlFacility::from_str_or_cwd(config.base_url.as_deref())),
            media,
            scale: ScaleFactor::new(config.device_pixel_ratio),
        }
    }

    /// The native paint scheduler. The runtime runs it once per redraw.
    pub fn frames(&self) -> &Rc<FrameQueue> {
        &self.frames
    }

    /// Writer handle for media features, if the host offers them.
    pub fn media_features(&self) -> Option<&MediaFeatures> {
        self.media.as_ref()
    }

    pub fn scale_factor(&self) -> &ScaleFactor {
        &self.scale
    }
}

impl Host for NativeHost {
    fn monotonic_clock(&self) -> Option<Rc<dyn MonotonicClock>> {
        self.clock.clone().map(|c| c as Rc<dyn MonotonicClock>)
    }

    fn paint_scheduler(&self) -> Rc<dyn PaintScheduler> {
        self.frames.clone()
    }

    fn raster(&self) -> Rc<dyn RasterFacility> {
        self.raster.clone()
    }

    fn url_facility(&self) -> Rc<dyn UrlFacility> {
        self.urls.clone()
    }

    fn media_queries(&self) -> Option<Rc<dyn MediaQueryFacility>> {
        self.media
            .clone()
            .map(|m| Rc::new(m) as Rc<dyn MediaQueryFacility>)
    }

    fn display(&self) -> Rc<dyn DisplayMetrics> {
        Rc::new(self.scale.clone())
    }
}
