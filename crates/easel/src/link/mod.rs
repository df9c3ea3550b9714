//! URL resolution.
//!
//! The host resolves paths through an anchor-like handle: set its target,
//! read back the absolute form. [`BaseUrlFacility`] is the native version,
//! resolving against a fixed base `url::Url`.

use url::Url;

/// Host handle that turns a possibly-relative target into an absolute URL.
pub trait UrlAnchor {
    fn set_href(&mut self, href: &str);

    /// Resolved form of the last target.
    fn href(&self) -> String;
}

/// Host facility creating [`UrlAnchor`]s bound to the current base URL.
pub trait UrlFacility {
    fn create_anchor(&self) -> Box<dyn UrlAnchor>;
}

/// Resolves against a fixed base URL.
///
/// Without a base only absolute URLs resolve.
#[derive(Debug, Clone)]
pub struct BaseUrlFacility {
    base: Option<Url>,
}

impl BaseUrlFacility {
    pub fn new(base: Url) -> Self {
        Self { base: Some(base) }
    }

    /// Facility with no base URL.
    pub fn unbased() -> Self {
        Self { base: None }
    }

    /// Parses `base`; falls back to the working directory when it does not
    /// parse.
    pub fn from_str_or_cwd(base: Option<&str>) -> Self {
        match base.map(Url::parse) {
            Some(Ok(url)) => Self::new(url),
            Some(Err(e)) => {
                log::warn!("ignoring unparseable base url: {e}");
                Self::cwd()
            }
            None => Self::cwd(),
        }
    }

    /// The current working directory as a `file:` URL, or no base when it
    /// cannot be determined.
    pub fn cwd() -> Self {
        let base = std::env::current_dir()
            .ok()
            .and_then(|dir| Url::from_directory_path(dir).ok());

        if base.is_none() {
            log::warn!("no working directory; only absolute urls will resolve");
        }
        Self { base }
    }

    pub fn base(&self) -> Option<&Url> {
        self.base.as_ref()
    }
}

impl UrlFacility for BaseUrlFacility {
    fn create_anchor(&self) -> Box<dyn UrlAnchor> {
        Box::new(Anchor {
            base: self.base.clone(),
            href: String::new(),
        })
    }
}

struct Anchor {
    base: Option<Url>,
    href: String,
}

impl UrlAnchor for Anchor {
    fn set_href(&mut self, href: &str) {
        let resolved = match &self.base {
            Some(base) => base.join(href),
            None => Url::parse(href),
        };

        // Unresolvable targets read back verbatim.
        self.href = match resolved {
            Ok(url) => url.into(),
            Err(_) => href.to_string(),
        };
    }

    fn href(&self) -> String {
        self.href.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolve(base: &str, path: &str) -> String {
        let facility = BaseUrlFacility::new(Url::parse(base).unwrap());
        let mut anchor = facility.create_anchor();
        anchor.set_href(path);
        anchor.href()
    }

    #[test]
    fn relative_path_joins_base() {
        assert_eq!(
            resolve("https://tiles.example.com/styles/dark/", "sprite.png"),
            "https://tiles.example.com/styles/dark/sprite.png"
        );
        assert_eq!(
            resolve("https://tiles.example.com/styles/dark/", "/fonts/a.pbf"),
            "https://tiles.example.com/fonts/a.pbf"
        );
    }

    #[test]
    fn absolute_url_is_unchanged() {
        let abs = "https://cdn.example.org/v1/icons.json?key=abc#frag";
        assert_eq!(resolve("https://tiles.example.com/", abs), abs);
    }

    #[test]
    fn resolution_is_idempotent() {
        let base = "https://tiles.example.com/a/b/";
        for path in ["../c", "./d?e=1", "", "//other.host/x", "https://x.y", "%zz", "a b"] {
            let once = resolve(base, path);
            assert_eq!(resolve(base, &once), once, "path {path:?}");
        }
    }

    #[test]
    fn unresolvable_input_is_returned_verbatim() {
        // `about:blank` cannot serve as a base for relative references.
        assert_eq!(resolve("about:blank", "tiles/1.png"), "tiles/1.png");
    }

    #[test]
    fn without_base_only_absolute_urls_resolve() {
        let mut anchor = BaseUrlFacility::unbased().create_anchor();
        anchor.set_href("tiles/1.png");
        assert_eq!(anchor.href(), "tiles/1.png");
        anchor.set_href("HTTPS://Example.com");
        assert_eq!(anchor.href(), "https://example.com/");
    }

    #[test]
    fn anchor_is_reusable() {
        let facility = BaseUrlFacility::new(Url::parse("https://a.test/x/").unwrap());
        let mut anchor = facility.create_anchor();
        anchor.set_href("one");
        assert_eq!(anchor.href(), "https://a.test/x/one");
        anchor.set_href("two");
        assert_eq!(anchor.href(), "https://a.test/x/two");
    }

    #[test]
    fn bad_base_falls_back_to_cwd() {
        let facility = BaseUrlFacility::from_str_or_cwd(Some("not a url"));
        assert!(facility.base().is_none_or(|base| base.scheme() == "file"));
    }
}
