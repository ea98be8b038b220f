// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host-agnostic task queue with a manual clock.
//!
//! [`TaskQueue`] implements [`FrameScheduler`] and [`TimerScheduler`] without
//! touching any platform API. The embedder decides when a display refresh
//! happens ([`TaskQueue::take_frames`]) and how time moves
//! ([`TaskQueue::advance_by`]). That makes it suitable for headless renderers,
//! windowing loops that already own a frame clock, and deterministic tests.
//!
//! The queue also counts effective cancellations, which lets callers verify that
//! at most one callback was ever outstanding.

use alloc::vec::Vec;
use core::time::Duration;

use crate::schedule::{FrameId, FrameScheduler, TimerId, TimerScheduler};

/// Deterministic frame and timer queue.
#[derive(Clone, Debug, Default)]
pub struct TaskQueue {
    now_ms: u64,
    next_id: u64,
    frames: Vec<FrameId>,
    /// `(deadline_ms, id)`, unordered.
    timers: Vec<(u64, TimerId)>,
    cancelled_frames: usize,
    cancelled_timers: usize,
    requested_frames: usize,
}

impl TaskQueue {
    /// Empty queue at time zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current time in milliseconds.
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Number of frame callbacks waiting for the next refresh.
    pub fn pending_frames(&self) -> usize {
        self.frames.len()
    }

    /// Number of armed timers.
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// Frames withdrawn before delivery.
    pub fn cancelled_frames(&self) -> usize {
        self.cancelled_frames
    }

    /// Timers withdrawn before firing.
    pub fn cancelled_timers(&self) -> usize {
        self.cancelled_timers
    }

    /// Total frames ever requested.
    pub fn requested_frames(&self) -> usize {
        self.requested_frames
    }

    /// Deadline of the earliest armed timer.
    pub fn next_deadline_ms(&self) -> Option<u64> {
        self.timers.iter().map(|&(deadline, _)| deadline).min()
    }

    /// Simulate a display refresh: hand out every pending frame callback.
    pub fn take_frames(&mut self) -> Vec<FrameId> {
        core::mem::take(&mut self.frames)
    }

    /// Move the clock forward and return the timers that came due, earliest first.
    pub fn advance_by(&mut self, by: Duration) -> Vec<TimerId> {
        let by_ms = u64::try_from(by.as_millis()).unwrap_or(u64::MAX);
        self.advance_to(self.now_ms.saturating_add(by_ms))
    }

    /// Set the clock (never backwards) and return the timers that came due,
    /// earliest first.
    pub fn advance_to(&mut self, now_ms: u64) -> Vec<TimerId> {
        self.now_ms = self.now_ms.max(now_ms);
        let now = self.now_ms;
        let mut due: Vec<(u64, TimerId)> = Vec::new();
        self.timers.retain(|&entry| {
            if entry.0 <= now {
                due.push(entry);
                false
            } else {
                true
            }
        });
        due.sort_unstable();
        due.into_iter().map(|(_, id)| id).collect()
    }

    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

impl FrameScheduler for TaskQueue {
    fn request_frame(&mut self) -> Option<FrameId> {
        let id = FrameId(self.next_id());
        self.frames.push(id);
        self.requested_frames += 1;
        Some(id)
    }

    fn cancel_frame(&mut self, id: FrameId) {
        let before = self.frames.len();
        self.frames.retain(|&f| f != id);
        self.cancelled_frames += before - self.frames.len();
    }
}

impl TimerScheduler for TaskQueue {
    fn set_timer(&mut self, delay: Duration) -> Option<TimerId> {
        let id = TimerId(self.next_id());
        let delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
        self.timers.push((self.now_ms.saturating_add(delay_ms), id));
        Some(id)
    }

    fn cancel_timer(&mut self, id: TimerId) {
        let before = self.timers.len();
        self.timers.retain(|&(_, t)| t != id);
        self.cancelled_timers += before - self.timers.len();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frames_are_delivered_once() {
        let mut queue = TaskQueue::new();
        let a = queue.request_frame().unwrap();
        let b = queue.request_frame().unwrap();
        assert_ne!(a, b);
        assert_eq!(queue.take_frames(), [a, b]);
        assert!(queue.take_frames().is_empty());
        assert_eq!(queue.requested_frames(), 2);
    }

    #[test]
    fn cancelling_delivered_frame_is_not_counted() {
        let mut queue = TaskQueue::new();
        let a = queue.request_frame().unwrap();
        queue.take_frames();
        queue.cancel_frame(a);
        assert_eq!(queue.cancelled_frames(), 0);
    }

    #[test]
    fn timers_fire_in_deadline_order() {
        let mut queue = TaskQueue::new();
        let late = queue.set_timer(Duration::from_millis(300)).unwrap();
        let early = queue.set_timer(Duration::from_millis(100)).unwrap();
        assert_eq!(queue.next_deadline_ms(), Some(100));

        assert!(queue.advance_by(Duration::from_millis(99)).is_empty());
        assert_eq!(queue.advance_by(Duration::from_millis(300)), [early, late]);
        assert_eq!(queue.now_ms(), 399);
        assert_eq!(queue.pending_timers(), 0);
    }

    #[test]
    fn timer_fires_exactly_at_deadline() {
        let mut queue = TaskQueue::new();
        let t = queue.set_timer(Duration::from_millis(500)).unwrap();
        assert!(queue.advance_to(499).is_empty());
        assert_eq!(queue.advance_to(500), [t]);
    }

    #[test]
    fn clock_never_runs_backwards() {
        let mut queue = TaskQueue::new();
        queue.advance_to(50);
        queue.advance_to(10);
        assert_eq!(queue.now_ms(), 50);
    }

    #[test]
    fn cancelled_timer_never_fires() {
        let mut queue = TaskQueue::new();
        let t = queue.set_timer(Duration::from_millis(5)).unwrap();
        queue.cancel_timer(t);
        assert!(queue.advance_by(Duration::from_millis(10)).is_empty());
        assert_eq!(queue.cancelled_timers(), 1);
    }
}
