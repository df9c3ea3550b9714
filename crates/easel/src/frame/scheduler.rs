use std::cell::Cell;
use std::rc::Rc;

/// Callback run on the next paint. Receives the paint timestamp (ms).
pub type FrameCallback = Box<dyn FnOnce(f64)>;

/// Host-issued identifier for a pending frame callback.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct FrameToken(pub u64);

/// Host primitive for paint-aligned callbacks.
pub trait PaintScheduler {
    /// Queues `callback` for the next paint.
    fn request_frame(&self, callback: FrameCallback) -> FrameToken;

    /// Drops a pending callback. Unknown or already-fired tokens are ignored.
    fn cancel_frame(&self, token: FrameToken);
}

/// Cancellation handle returned by `HostCtx::frame`.
///
/// Cancelling is idempotent. A handle produced while the error state is set
/// is inert.
#[must_use = "dropping the handle does not cancel the frame"]
pub struct Cancelable {
    pending: Option<(Rc<dyn PaintScheduler>, FrameToken)>,
}

impl Cancelable {
    pub(crate) fn scheduled(scheduler: Rc<dyn PaintScheduler>, token: FrameToken) -> Self {
        Self { pending: Some((scheduler, token)) }
    }

    /// Handle whose `cancel` does nothing.
    pub fn noop() -> Self {
        Self { pending: None }
    }

    pub fn token(&self) -> Option<FrameToken> {
        self.pending.as_ref().map(|(_, token)| *token)
    }

    pub fn cancel(&self) {
        if let Some((scheduler, token)) = &self.pending {
            log::trace!("cancel frame {}", token.0);
            scheduler.cancel_frame(*token);
        }
    }
}

impl std::fmt::Debug for Cancelable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cancelable").field("token", &self.token()).finish()
    }
}

/// One-way suppression flag for frame scheduling.
///
/// States: active → suppressed. There is no way back; a fresh context is the
/// only recovery path.
#[derive(Debug, Default)]
pub struct ErrorState {
    tripped: Cell<bool>,
}

impl ErrorState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enters the suppressed state. Returns `true` on the first transition.
    pub fn set(&self) -> bool {
        !self.tripped.replace(true)
    }

    #[inline]
    pub fn is_set(&self) -> bool {
        self.tripped.get()
    }
}
