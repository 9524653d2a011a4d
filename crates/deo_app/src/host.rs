//! The two scheduling guarantees the runner needs from its environment.
//!
//! In the browser this is `requestAnimationFrame` / `cancelAnimationFrame`
//! plus `performance.now()` (see `web::WebHost`).  [`ManualHost`] drives
//! the same runner from synthetic time, which is what the tests and the
//! headless sandbox use.

use crate::error::HostError;

/// Opaque id of a scheduled frame, used only to cancel it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub i64);

pub trait FrameHost {
    /// High-resolution timestamp in milliseconds.
    fn now(&self) -> f64;

    /// Ask for one callback right before the next repaint.
    fn request_frame(&mut self) -> Result<FrameHandle, HostError>;

    /// Drop a pending request.  Unknown or already-fired handles are ignored.
    fn cancel_frame(&mut self, handle: FrameHandle);
}

/// Deterministic host: time only moves when told to, and a requested frame
/// only fires when the owner takes it with [`ManualHost::take_pending`].
#[derive(Debug, Default)]
pub struct ManualHost {
    now_ms: f64,
    next_handle: i64,
    pending: Option<FrameHandle>,
    requested: u64,
    cancelled: u64,
}

impl ManualHost {
    pub fn new() -> Self {
        Default::default()
    }

    /// Start the synthetic clock at `now_ms`.
    pub fn starting_at(now_ms: f64) -> Self {
        Self { now_ms, ..Default::default() }
    }

    pub fn advance(&mut self, ms: f64) {
        self.now_ms += ms;
    }

    pub fn set_now(&mut self, now_ms: f64) {
        self.now_ms = now_ms;
    }

    /// The frame request waiting to fire, if any.
    pub fn pending(&self) -> Option<FrameHandle> {
        self.pending
    }

    /// Remove and return the pending request, as the browser does right
    /// before invoking the callback.
    pub fn take_pending(&mut self) -> Option<FrameHandle> {
        self.pending.take()
    }

    /// Total number of frame requests made.
    pub fn requested(&self) -> u64 {
        self.requested
    }

    /// Total number of cancellations that hit a pending request.
    pub fn cancelled(&self) -> u64 {
        self.cancelled
    }
}

impl FrameHost for ManualHost {
    fn now(&self) -> f64 {
        self.now_ms
    }

    fn request_frame(&mut self) -> Result<FrameHandle, HostError> {
        let handle = FrameHandle(self.next_handle);
        self.next_handle += 1;
        self.requested += 1;
        self.pending = Some(handle);
        Ok(handle)
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if self.pending == Some(handle) {
            self.pending = None;
            self.cancelled += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_host_tracks_requests() {
        let mut host = ManualHost::starting_at(100.0);
        let first = host.request_frame().unwrap();
        assert_eq!(host.pending(), Some(first));

        host.cancel_frame(FrameHandle(42));
        assert_eq!(host.cancelled(), 0);
        host.cancel_frame(first);
        assert_eq!(host.pending(), None);
        assert_eq!(host.cancelled(), 1);

        let second = host.request_frame().unwrap();
        assert_ne!(first, second);
        assert_eq!(host.take_pending(), Some(second));
        assert_eq!(host.take_pending(), None);

        host.advance(16.0);
        assert_eq!(host.now(), 116.0);
        assert_eq!(host.requested(), 2);
    }
}
