use std::fmt;

/// Errors surfaced by the host facade.
///
/// Only pixel extraction can fail at call time. Every other facade operation
/// degrades to a documented default instead of returning an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostError {
    /// The raster facility could not provide a 2D drawing context for an
    /// offscreen surface of the given size.
    ContextUnavailable { width: u32, height: u32 },
}

impl fmt::Display for HostError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostError::ContextUnavailable { width, height } => {
                write!(f, "failed to create 2d context for {width}x{height} surface")
            }
        }
    }
}

impl std::error::Error for HostError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_unavailable_mentions_size() {
        let err = HostError::ContextUnavailable { width: 3, height: 7 };
        assert_eq!(err.to_string(), "failed to create 2d context for 3x7 surface");
    }
}
