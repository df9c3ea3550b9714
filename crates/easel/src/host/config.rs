use crate::raster::DEFAULT_MAX_DIMENSION;

/// Native host configuration.
///
/// Keep this small; each flag maps to one host primitive.
#[derive(Debug, Clone)]
pub struct HostConfig {
    /// Base for URL resolution. `None` uses the working directory.
    pub base_url: Option<String>,

    /// Offer a monotonic clock. When disabled the facade falls back to
    /// wall-clock time.
    pub monotonic_clock: bool,

    /// Offer media-feature queries. When disabled reduced motion reads `false`.
    pub media_queries: bool,

    /// Initial reduced-motion preference.
    pub reduced_motion: bool,

    /// Initial device pixel ratio, until the window reports its own.
    pub device_pixel_ratio: f64,

    /// Largest edge, in pixels, of an offscreen surface that gets a 2D context.
    pub max_raster_dimension: u32,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            monotonic_clock: true,
            media_queries: true,
            reduced_motion: false,
            device_pixel_ratio: 1.0,
            max_raster_dimension: DEFAULT_MAX_DIMENSION,
        }
    }
}

impl HostConfig {
    /// Defaults overridden by `EASEL_BASE_URL`, `EASEL_REDUCED_MOTION` and
    /// `EASEL_MAX_RASTER_DIMENSION`.
    pub fn from_env() -> Self {
        Self::default().with_overrides(|key| std::env::var(key).ok())
    }

    /// Applies overrides from `lookup`. Unrecognized values are ignored.
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(base) = lookup("EASEL_BASE_URL").filter(|s| !s.is_empty()) {
            self.base_url = Some(base);
        }

        if let Some(flag) = lookup("EASEL_REDUCED_MOTION").as_deref().and_then(parse_flag) {
            self.reduced_motion = flag;
        }

        if let Some(raw) = lookup("EASEL_MAX_RASTER_DIMENSION") {
            match raw.trim().parse::<u32>() {
                Ok(max) if max > 0 => self.max_raster_dimension = max,
                _ => log::warn!("ignoring EASEL_MAX_RASTER_DIMENSION={raw:?}"),
            }
        }

        self
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
