//! Media-feature queries and display metrics.
//!
//! A [`MediaQueryList`] is live: its `matches()` tracks host state for its
//! whole lifetime, so callers keep one and re-read it instead of
//! re-querying.

mod features;

pub use features::{MediaFeatures, ScaleFactor};

/// Query text for the user's reduced-motion accessibility preference.
pub const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";

/// Live boolean media condition.
pub trait MediaQueryList {
    fn media(&self) -> &str;
    fn matches(&self) -> bool;
}

/// Host facility evaluating media queries.
pub trait MediaQueryFacility {
    fn match_media(&self, query: &str) -> Box<dyn MediaQueryList>;
}

/// Host display properties.
pub trait DisplayMetrics {
    /// Physical pixels per logical pixel.
    fn device_pixel_ratio(&self) -> f64;
}
