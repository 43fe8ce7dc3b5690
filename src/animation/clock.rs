use std::cell::RefCell;
use std::rc::Rc;

use crate::animation::scheduler::{FrameRequester, FrameToken};

#[derive(Debug, Default)]
struct ClockState {
    next: u64,
    pending: Option<FrameToken>,
    requested: u64,
    cancelled: Vec<FrameToken>,
}

/// Host-less [`FrameRequester`] for offline rendering and tests.
///
/// Cloning shares state, so the caller keeps a handle after boxing one into a scheduler and reads
/// back which token is armed.
#[derive(Clone, Debug, Default)]
pub struct ManualFrameClock {
    inner: Rc<RefCell<ClockState>>,
}

impl ManualFrameClock {
    /// Fresh clock with no callback armed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Token of the armed callback, if any.
    pub fn pending(&self) -> Option<FrameToken> {
        self.inner.borrow().pending
    }

    /// Total callbacks requested so far.
    pub fn requested(&self) -> u64 {
        self.inner.borrow().requested
    }

    /// Tokens cancelled so far, oldest first.
    pub fn cancelled(&self) -> Vec<FrameToken> {
        self.inner.borrow().cancelled.clone()
    }

    /// Take the armed token, as a host does right before invoking the callback.
    pub fn fire(&self) -> Option<FrameToken> {
        self.inner.borrow_mut().pending.take()
    }
}

impl FrameRequester for ManualFrameClock {
    fn request_frame(&mut self) -> FrameToken {
        let mut s = self.inner.borrow_mut();
        s.next += 1;
        s.requested += 1;
        let token = FrameToken(s.next);
        s.pending = Some(token);
        token
    }

    fn cancel_frame(&mut self, token: FrameToken) {
        let mut s = self.inner.borrow_mut();
        if s.pending == Some(token) {
            s.pending = None;
        }
        s.cancelled.push(token);
    }
}
