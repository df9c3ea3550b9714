use std::cell::{OnceCell, RefCell};

use crate::error::HostError;
use crate::frame::{Cancelable, ErrorState};
use crate::host::{Capabilities, Host};
use crate::link::UrlAnchor;
use crate::media::{MediaQueryList, REDUCED_MOTION_QUERY};
use crate::raster::{extract_image_data, ImageData, ImageSource};
use crate::time::Clock;

/// Facade over host capabilities, owned by the hosting application.
///
/// Holds all state the operations share:
/// - the swappable clock
/// - the one-way frame suppression flag
/// - the lazily created URL anchor and reduced-motion query
///
/// Single-threaded; the application keeps it on its main thread.
pub struct HostCtx {
    caps: Capabilities,
    clock: Clock,
    error_state: ErrorState,
    anchor: OnceCell<RefCell<Box<dyn UrlAnchor>>>,
    reduced_motion: OnceCell<Box<dyn MediaQueryList>>,
}

impl HostCtx {
    pub fn new(caps: Capabilities) -> Self {
        Self {
            clock: Clock::new(caps.clock.clone()),
            caps,
            error_state: ErrorState::new(),
            anchor: OnceCell::new(),
            reduced_motion: OnceCell::new(),
        }
    }

    /// Negotiates capabilities with `host` and builds a context on them.
    pub fn from_host(host: &dyn Host) -> Self {
        Self::new(Capabilities::negotiate(host))
    }

    pub fn capabilities(&self) -> &Capabilities {
        &self.caps
    }

    // ── clock ─────────────────────────────────────────────────────────────

    /// Current time in milliseconds.
    ///
    /// Monotonic when the host has a monotonic clock, wall-clock otherwise.
    #[inline]
    pub fn now(&self) -> f64 {
        self.clock.now()
    }

    /// Pins [`now`](Self::now) to `time` until [`restore_now`](Self::restore_now).
    pub fn set_now(&self, time: f64) {
        self.clock.set_now(time);
    }

    pub fn restore_now(&self) {
        self.clock.restore_now();
    }

    // ── frames ────────────────────────────────────────────────────────────

    /// Stops all future frame scheduling. Cannot be undone.
    pub fn set_error_state(&self) {
        if self.error_state.set() {
            log::warn!("host entered error state; frame scheduling disabled");
        }
    }

    pub fn is_error_state(&self) -> bool {
        self.error_state.is_set()
    }

    /// Schedules `callback` for the next paint. It receives the paint
    /// timestamp in milliseconds.
    ///
    /// In the error state nothing is scheduled and the handle is inert.
    pub fn frame<F>(&self, callback: F) -> Cancelable
    where
        F: FnOnce(f64) + 'static,
    {
        if self.error_state.is_set() {
            return Cancelable::noop();
        }

        let scheduler = self.caps.scheduler.clone();
        let token = scheduler.request_frame(Box::new(callback));
        log::trace!("scheduled frame {}", token.0);
        Cancelable::scheduled(scheduler, token)
    }

    // ── pixels ────────────────────────────────────────────────────────────

    /// Rasterizes `image` offscreen and returns its pixels with `padding`
    /// transparent pixels on every side.
    pub fn get_image_data(
        &self,
        image: &dyn ImageSource,
        padding: u32,
    ) -> Result<ImageData, HostError> {
        extract_image_data(self.caps.raster.as_ref(), image, padding)
    }

    // ── urls ──────────────────────────────────────────────────────────────

    /// Resolves `path` against the host base URL.
    ///
    /// Input the host cannot resolve comes back unchanged.
    pub fn resolve_url(&self, path: &str) -> String {
        let anchor = self.anchor.get_or_init(|| {
            log::debug!("creating url anchor");
            RefCell::new(self.caps.urls.create_anchor())
        });

        let mut anchor = anchor.borrow_mut();
        anchor.set_href(path);
        anchor.href()
    }

    // ── display ───────────────────────────────────────────────────────────

    /// Whether the user asked for reduced motion. `false` when the host has
    /// no media queries.
    pub fn prefers_reduced_motion(&self) -> bool {
        let Some(media) = &self.caps.media else {
            return false;
        };

        self.reduced_motion
            .get_or_init(|| {
                log::debug!("creating media query {REDUCED_MOTION_QUERY}");
                media.match_media(REDUCED_MOTION_QUERY)
            })
            .matches()
    }

    pub fn device_pixel_ratio(&self) -> f64 {
        self.caps.display.device_pixel_ratio()
    }
}

impl std::fmt::Debug for HostCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HostCtx")
            .field("caps", &self.caps)
            .field("clock", &self.clock)
            .field("error_state", &self.error_state.is_set())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    use image::{Rgba, RgbaImage};
    use url::Url;

    use crate::frame::{FrameQueue, PaintScheduler};
    use crate::link::{BaseUrlFacility, UrlFacility};
    use crate::media::{DisplayMetrics, MediaFeatures, MediaQueryFacility, ScaleFactor};
    use crate::raster::{RasterFacility, SoftwareRaster};
    use crate::time::MonotonicClock;

    struct ManualClock(Cell<f64>);

    impl MonotonicClock for ManualClock {
        fn now_ms(&self) -> f64 {
            self.0.get()
        }
    }

    /// Counts how often the facade asks for host handles.
    struct Counting<T> {
        inner: T,
        created: Cell<u32>,
    }

    impl MediaQueryFacility for Counting<MediaFeatures> {
        fn match_media(&self, query: &str) -> Box<dyn MediaQueryList> {
            self.created.set(self.created.get() + 1);
            self.inner.match_media(query)
        }
    }

    impl UrlFacility for Counting<BaseUrlFacility> {
        fn create_anchor(&self) -> Box<dyn UrlAnchor> {
            self.created.set(self.created.get() + 1);
            self.inner.create_anchor()
        }
    }

    struct TestHost {
        clock: Option<Rc<ManualClock>>,
        frames: Rc<FrameQueue>,
        media: Option<Rc<Counting<MediaFeatures>>>,
        urls: Rc<Counting<BaseUrlFacility>>,
        scale: ScaleFactor,
    }

    impl TestHost {
        fn new() -> Self {
            let base = Url::parse("https://maps.example.com/app/").unwrap();
            Self {
                clock: Some(Rc::new(ManualClock(Cell::new(5.0)))),
                frames: Rc::new(FrameQueue::new()),
                media: Some(Rc::new(Counting { inner: MediaFeatures::new(), created: Cell::new(0) })),
                urls: Rc::new(Counting { inner: BaseUrlFacility::new(base), created: Cell::new(0) }),
                scale: ScaleFactor::new(1.5),
            }
        }

        fn without_media(mut self) -> Self {
            self.media = None;
            self
        }

        fn without_clock(mut self) -> Self {
            self.clock = None;
            self
        }

        fn features(&self) -> &MediaFeatures {
            &self.media.as_ref().unwrap().inner
        }
    }

    impl Host for TestHost {
        fn monotonic_clock(&self) -> Option<Rc<dyn MonotonicClock>> {
            self.clock.clone().map(|c| c as Rc<dyn MonotonicClock>)
        }

        fn paint_scheduler(&self) -> Rc<dyn PaintScheduler> {
            self.frames.clone()
        }

        fn raster(&self) -> Rc<dyn RasterFacility> {
            Rc::new(SoftwareRaster::with_max_dimension(64))
        }

        fn url_facility(&self) -> Rc<dyn UrlFacility> {
            self.urls.clone()
        }

        fn media_queries(&self) -> Option<Rc<dyn MediaQueryFacility>> {
            self.media.clone().map(|m| m as Rc<dyn MediaQueryFacility>)
        }

        fn display(&self) -> Rc<dyn DisplayMetrics> {
            Rc::new(self.scale.clone())
        }
    }

    fn counter() -> (Rc<Cell<u32>>, impl FnOnce(f64) + 'static) {
        let count = Rc::new(Cell::new(0));
        let c = count.clone();
        (count, move |_| c.set(c.get() + 1))
    }

    // ── clock ─────────────────────────────────────────────────────────────

    #[test]
    fn now_reads_host_clock() {
        let host = TestHost::new();
        let ctx = HostCtx::from_host(&host);
        assert_eq!(ctx.now(), 5.0);
        host.clock.as_ref().unwrap().0.set(9.5);
        assert_eq!(ctx.now(), 9.5);
    }

    #[test]
    fn override_holds_until_restored() {
        let host = TestHost::new();
        let ctx = HostCtx::from_host(&host);

        for v in [0.0, 1000.0, -3.25, 1e15] {
            ctx.set_now(v);
            assert_eq!(ctx.now(), v);
            host.clock.as_ref().unwrap().0.set(v + 1.0);
            assert_eq!(ctx.now(), v);
        }

        ctx.restore_now();
        host.clock.as_ref().unwrap().0.set(42.0);
        assert_eq!(ctx.now(), 42.0);
    }

    #[test]
    fn missing_monotonic_clock_uses_wall_clock() {
        let ctx = HostCtx::from_host(&TestHost::new().without_clock());
        assert!(!ctx.capabilities().clock.is_monotonic());
        assert!(ctx.now() > 1.0e12);
    }

    // ── frames ────────────────────────────────────────────────────────────

    #[test]
    fn frame_receives_paint_timestamp() {
        let host = TestHost::new();
        let ctx = HostCtx::from_host(&host);
        let seen = Rc::new(Cell::new(None));
        let s = seen.clone();

        let handle = ctx.frame(move |ts| s.set(Some(ts)));
        assert!(handle.token().is_some());
        host.frames.run_frame(33.0);
        assert_eq!(seen.get(), Some(33.0));
    }

    #[test]
    fn each_frame_fires_once() {
        let host = TestHost::new();
        let ctx = HostCtx::from_host(&host);
        let (count, cb) = counter();

        let _handle = ctx.frame(cb);
        host.frames.run_frame(0.0);
        host.frames.run_frame(16.0);
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn cancel_before_fire_with_pinned_clock() {
        let host = TestHost::new();
        let ctx = HostCtx::from_host(&host);
        ctx.set_now(1000.0);
        let (count, cb) = counter();

        let handle = ctx.frame(cb);
        handle.cancel();
        host.frames.run_frame(ctx.now());
        assert_eq!(count.get(), 0);
    }

    #[test]
    fn cancel_after_fire_is_harmless() {
        let host = TestHost::new();
        let ctx = HostCtx::from_host(&host);
        let (count, cb) = counter();

        let handle = ctx.frame(cb);
        host.frames.run_frame(0.0);
        handle.cancel();
        handle.cancel();
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn error_state_suppresses_all_frames() {
        let host = TestHost::new();
        let ctx = HostCtx::from_host(&host);
        ctx.set_error_state();
        assert!(ctx.is_error_state());

        let (count, _) = counter();
        let handles: Vec<Cancelable> = (0..3)
            .map(|_| {
                let c = count.clone();
                ctx.frame(move |_| c.set(c.get() + 1))
            })
            .collect();

        assert_eq!(host.frames.pending_len(), 0);
        host.frames.run_frame(0.0);
        for handle in &handles {
            assert_eq!(handle.token(), None);
            handle.cancel();
        }
        assert_eq!(count.get(), 0);
    }

    #[test]
    fn error_state_is_idempotent() {
        let host = TestHost::new();
        let ctx = HostCtx::from_host(&host);
        ctx.set_error_state();
        ctx.set_error_state();
        ctx.set_error_state();
        assert!(ctx.is_error_state());

        let (count, cb) = counter();
        let _handle = ctx.frame(cb);
        host.frames.run_frame(0.0);
        assert_eq!(count.get(), 0);
    }

    #[test]
    fn frames_already_pending_survive_error_state() {
        let host = TestHost::new();
        let ctx = HostCtx::from_host(&host);
        let (count, cb) = counter();

        let _handle = ctx.frame(cb);
        ctx.set_error_state();
        host.frames.run_frame(0.0);
        assert_eq!(count.get(), 1);
    }

    // ── pixels ────────────────────────────────────────────────────────────

    #[test]
    fn image_data_is_padded_around_content() {
        let ctx = HostCtx::from_host(&TestHost::new());
        let img = RgbaImage::from_pixel(4, 3, Rgba([10, 20, 30, 255]));

        let plain = ctx.get_image_data(&img, 0).unwrap();
        assert_eq!(plain.pixel_count(), 12);

        let padded = ctx.get_image_data(&img, 3).unwrap();
        assert_eq!((padded.width(), padded.height()), (10, 9));
        assert_eq!(padded.pixel(3, 3), Some([10, 20, 30, 255]));
        assert_eq!(padded.pixel(6, 5), Some([10, 20, 30, 255]));
        assert_eq!(padded.pixel(2, 3), Some([0, 0, 0, 0]));
        assert_eq!(padded.pixel(7, 5), Some([0, 0, 0, 0]));
    }

    #[test]
    fn missing_context_is_an_error() {
        let ctx = HostCtx::from_host(&TestHost::new());
        let img = RgbaImage::new(65, 1);
        assert_eq!(
            ctx.get_image_data(&img, 0),
            Err(HostError::ContextUnavailable { width: 65, height: 1 })
        );
    }

    // ── urls ──────────────────────────────────────────────────────────────

    #[test]
    fn resolve_url_reuses_one_anchor() {
        let host = TestHost::new();
        let ctx = HostCtx::from_host(&host);
        assert_eq!(host.urls.created.get(), 0);

        assert_eq!(ctx.resolve_url("tiles/0/0/0.png"), "https://maps.example.com/app/tiles/0/0/0.png");
        assert_eq!(ctx.resolve_url("../style.json"), "https://maps.example.com/style.json");
        assert_eq!(host.urls.created.get(), 1);
    }

    #[test]
    fn resolve_url_is_idempotent() {
        let ctx = HostCtx::from_host(&TestHost::new());
        for path in ["a", "/b", "https://other.example.net/c?d", "", "#top"] {
            let once = ctx.resolve_url(path);
            assert_eq!(ctx.resolve_url(&once), once);
        }
        let abs = "https://other.example.net/c?d";
        assert_eq!(ctx.resolve_url(abs), abs);
    }

    // ── display ───────────────────────────────────────────────────────────

    #[test]
    fn reduced_motion_is_lazy_and_live() {
        let host = TestHost::new();
        let ctx = HostCtx::from_host(&host);
        assert_eq!(host.media.as_ref().unwrap().created.get(), 0);

        assert!(!ctx.prefers_reduced_motion());
        host.features().set(REDUCED_MOTION_QUERY, true);
        assert!(ctx.prefers_reduced_motion());
        host.features().set(REDUCED_MOTION_QUERY, false);
        assert!(!ctx.prefers_reduced_motion());

        assert_eq!(host.media.as_ref().unwrap().created.get(), 1);
    }

    #[test]
    fn reduced_motion_without_media_queries_is_false() {
        let ctx = HostCtx::from_host(&TestHost::new().without_media());
        assert!(!ctx.prefers_reduced_motion());
        assert!(!ctx.prefers_reduced_motion());
    }

    #[test]
    fn device_pixel_ratio_is_not_cached() {
        let host = TestHost::new();
        let ctx = HostCtx::from_host(&host);
        assert_eq!(ctx.device_pixel_ratio(), 1.5);
        host.scale.set(3.0);
        assert_eq!(ctx.device_pixel_ratio(), 3.0);
    }
}
