use std::cell::{Cell, RefCell};
use std::collections::VecDeque;

use super::{FrameCallback, FrameToken, PaintScheduler};

/// Native paint scheduler.
///
/// Callbacks are queued FIFO and run by [`FrameQueue::run_frame`], which the
/// window runtime calls once per redraw. Each run takes the callbacks that
/// were pending when it started; callbacks requested from inside a frame wait
/// for the next one.
pub struct FrameQueue {
    pending: RefCell<VecDeque<(FrameToken, FrameCallback)>>,
    /// Snapshot being drained by the current `run_frame`.
    running: RefCell<VecDeque<(FrameToken, FrameCallback)>>,
    in_frame: Cell<bool>,
    next_token: Cell<u64>,
    redraw_hook: RefCell<Option<Box<dyn Fn()>>>,
}

impl FrameQueue {
    pub fn new() -> Self {
        Self {
            pending: RefCell::new(VecDeque::new()),
            running: RefCell::new(VecDeque::new()),
            in_frame: Cell::new(false),
            next_token: Cell::new(1),
            redraw_hook: RefCell::new(None),
        }
    }

    /// Installs a hook invoked whenever a frame is requested.
    ///
    /// The runtime uses it to ask the window for a redraw.
    pub fn set_redraw_hook<F>(&self, hook: F)
    where
        F: Fn() + 'static,
    {
        *self.redraw_hook.borrow_mut() = Some(Box::new(hook));
    }

    pub fn clear_redraw_hook(&self) {
        self.redraw_hook.borrow_mut().take();
    }

    /// Number of callbacks waiting for a future frame.
    pub fn pending_len(&self) -> usize {
        self.pending.borrow().len()
    }

    pub fn has_pending(&self) -> bool {
        self.pending_len() > 0
    }

    /// Runs one paint: invokes every callback pending at entry with
    /// `timestamp`, in request order. Returns how many ran.
    ///
    /// A nested call from inside a callback runs nothing.
    pub fn run_frame(&self, timestamp: f64) -> usize {
        if self.in_frame.replace(true) {
            return 0;
        }
        let _guard = FrameGuard { queue: self };

        let batch = std::mem::take(&mut *self.pending.borrow_mut());
        *self.running.borrow_mut() = batch;

        let mut ran = 0;
        loop {
            // Borrow released before the callback runs; it may request or
            // cancel frames.
            let next = self.running.borrow_mut().pop_front();
            let Some((_, callback)) = next else {
                break;
            };
            callback(timestamp);
            ran += 1;
        }

        ran
    }
}

/// Ends a `run_frame`, even when a callback unwinds. Callbacks the frame did
/// not reach go back to the front of the queue.
struct FrameGuard<'a> {
    queue: &'a FrameQueue,
}

impl Drop for FrameGuard<'_> {
    fn drop(&mut self) {
        let leftover = std::mem::take(&mut *self.queue.running.borrow_mut());
        if !leftover.is_empty() {
            let mut pending = self.queue.pending.borrow_mut();
            for entry in leftover.into_iter().rev() {
                pending.push_front(entry);
            }
        }
        self.queue.in_frame.set(false);
    }
}

impl Default for FrameQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl PaintScheduler for FrameQueue {
    fn request_frame(&self, callback: FrameCallback) -> FrameToken {
        let token = FrameToken(self.next_token.get());
        self.next_token.set(token.0.wrapping_add(1));
        self.pending.borrow_mut().push_back((token, callback));

        if let Some(hook) = self.redraw_hook.borrow().as_ref() {
            hook();
        }

        token
    }

    fn cancel_frame(&self, token: FrameToken) {
        self.pending.borrow_mut().retain(|(t, _)| *t != token);
        self.running.borrow_mut().retain(|(t, _)| *t != token);
    }
}
