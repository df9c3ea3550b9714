use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use super::{DisplayMetrics, MediaQueryFacility, MediaQueryList};

/// Native registry of live media features, keyed by query text.
///
/// The hosting application flips features with [`MediaFeatures::set`]; every
/// list previously handed out for that query observes the change. Unknown
/// queries evaluate to `false` until set.
///
/// Cloning shares the registry.
#[derive(Debug, Clone, Default)]
pub struct MediaFeatures {
    features: Rc<RefCell<HashMap<String, Rc<Cell<bool>>>>>,
}

impl MediaFeatures {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, query: &str, matches: bool) {
        let cell = self.cell(query);
        if cell.replace(matches) != matches {
            log::debug!("media feature {query} -> {matches}");
        }
    }

    pub fn get(&self, query: &str) -> bool {
        self.features
            .borrow()
            .get(normalize(query).as_str())
            .is_some_and(|c| c.get())
    }

    fn cell(&self, query: &str) -> Rc<Cell<bool>> {
        self.features
            .borrow_mut()
            .entry(normalize(query))
            .or_default()
            .clone()
    }
}

/// Canonical key: lowercase, whitespace collapsed around `(`, `)` and `:`.
fn normalize(query: &str) -> String {
    let mut out = String::with_capacity(query.len());
    for token in query.split_whitespace() {
        let glue = out.ends_with(['(', ':']) || token.starts_with([')', ':']);
        if !out.is_empty() && !glue {
            out.push(' ');
        }
        out.push_str(&token.to_ascii_lowercase());
    }
    out.replace(':', ": ")
}

impl MediaQueryFacility for MediaFeatures {
    fn match_media(&self, query: &str) -> Box<dyn MediaQueryList> {
        Box::new(LiveQuery {
            media: query.to_string(),
            state: self.cell(query),
        })
    }
}

struct LiveQuery {
    media: String,
    state: Rc<Cell<bool>>,
}

impl MediaQueryList for LiveQuery {
    fn media(&self) -> &str {
        &self.media
    }

    fn matches(&self) -> bool {
        self.state.get()
    }
}

/// Live device pixel ratio, shared between the runtime (writer) and the
/// facade (reader).
#[derive(Debug, Clone)]
pub struct ScaleFactor {
    ratio: Rc<Cell<f64>>,
}

impl ScaleFactor {
    pub fn new(ratio: f64) -> Self {
        Self { ratio: Rc::new(Cell::new(ratio)) }
    }

    pub fn set(&self, ratio: f64) {
        self.ratio.set(ratio);
    }
}

impl Default for ScaleFactor {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl DisplayMetrics for ScaleFactor {
    fn device_pixel_ratio(&self) -> f64 {
        self.ratio.get()
    }
}
