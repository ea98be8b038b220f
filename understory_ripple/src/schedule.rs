// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cancellable callbacks: display-refresh frames and one-shot timers.
//!
//! The ripple never blocks. It asks the host for a frame callback to advance the
//! wave and for a one-shot timer to release the gesture lock, and the host calls
//! back into [`Ripple`](crate::Ripple) with the handle it returned.
//!
//! [`ScheduledTask`] holds at most one pending handle. Scheduling through it
//! always cancels the previous handle first, and [`ScheduledTask::fire`] only
//! accepts the handle it currently holds, so a callback that raced with a
//! cancellation is ignored rather than acting twice.
//!
//! ```
//! use understory_ripple::queue::TaskQueue;
//! use understory_ripple::schedule::FrameTask;
//!
//! let mut queue = TaskQueue::new();
//! let mut task = FrameTask::new();
//!
//! task.request_frame(&mut queue);
//! let first = task.pending().unwrap();
//! task.request_frame(&mut queue);
//!
//! // The first request was cancelled before the second was made.
//! assert_eq!(queue.cancelled_frames(), 1);
//! assert_eq!(queue.pending_frames(), 1);
//! assert!(!task.fire(first));
//! ```

use core::time::Duration;

/// Handle for a requested display-refresh callback.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameId(pub u64);

/// Handle for a one-shot timer.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(pub u64);

/// Source of display-refresh callbacks (`requestAnimationFrame` and friends).
pub trait FrameScheduler {
    /// Ask for one callback at the next display refresh.
    ///
    /// Returns `None` when the platform refused the request; no callback will
    /// follow.
    fn request_frame(&mut self) -> Option<FrameId>;

    /// Withdraw a request. Unknown or already delivered handles are ignored.
    fn cancel_frame(&mut self, id: FrameId);
}

/// Source of one-shot timers (`setTimeout` and friends).
pub trait TimerScheduler {
    /// Ask for one callback after `delay`.
    ///
    /// Returns `None` when the platform refused the request.
    fn set_timer(&mut self, delay: Duration) -> Option<TimerId>;

    /// Withdraw a timer. Unknown or already fired handles are ignored.
    fn cancel_timer(&mut self, id: TimerId);
}

/// At most one pending callback handle.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ScheduledTask<Id> {
    pending: Option<Id>,
}

/// Pending display-refresh callback.
pub type FrameTask = ScheduledTask<FrameId>;

/// Pending one-shot timer.
pub type TimerTask = ScheduledTask<TimerId>;

impl<Id> Default for ScheduledTask<Id> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Id> ScheduledTask<Id> {
    /// Nothing pending.
    pub const fn new() -> Self {
        Self { pending: None }
    }

    /// Returns `true` while a callback is pending.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

impl<Id: Copy + PartialEq> ScheduledTask<Id> {
    /// The pending handle, if any.
    pub fn pending(&self) -> Option<Id> {
        self.pending
    }

    /// Accept a delivered callback.
    ///
    /// Returns `true` and clears the slot if `id` is the pending handle; stale
    /// handles return `false` and leave the slot alone.
    pub fn fire(&mut self, id: Id) -> bool {
        if self.pending == Some(id) {
            self.pending = None;
            true
        } else {
            false
        }
    }
}

impl FrameTask {
    /// Cancel the pending frame, if any.
    pub fn cancel_frame<S: FrameScheduler + ?Sized>(&mut self, scheduler: &mut S) {
        if let Some(id) = self.pending.take() {
            scheduler.cancel_frame(id);
        }
    }

    /// Cancel the pending frame, then request a new one.
    ///
    /// Returns `false` if the scheduler refused; nothing is pending then.
    pub fn request_frame<S: FrameScheduler + ?Sized>(&mut self, scheduler: &mut S) -> bool {
        self.cancel_frame(scheduler);
        self.pending = scheduler.request_frame();
        self.pending.is_some()
    }
}

impl TimerTask {
    /// Cancel the pending timer, if any.
    pub fn cancel_timer<S: TimerScheduler + ?Sized>(&mut self, scheduler: &mut S) {
        if let Some(id) = self.pending.take() {
            scheduler.cancel_timer(id);
        }
    }

    /// Cancel the pending timer, then arm a new one.
    ///
    /// Returns `false` if the scheduler refused; nothing is pending then.
    pub fn set_timer<S: TimerScheduler + ?Sized>(
        &mut self,
        scheduler: &mut S,
        delay: Duration,
    ) -> bool {
        self.cancel_timer(scheduler);
        self.pending = scheduler.set_timer(delay);
        self.pending.is_some()
    }
}
