// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The ripple widget core: raw events in, waves out.

use understory_gesture::classify::{self, PointerCoords, RawEvent};
use understory_gesture::tap::{GRACE_WINDOW, GraceAction, TapTracker};

use crate::config::RippleConfig;
use crate::host::RippleHost;
use crate::schedule::{FrameId, TimerId, TimerTask};
use crate::wave::{RippleRequest, WaveLoop};

/// Tap-triggered ripple for one container.
///
/// Owns the gesture tracker, the grace timer that releases the device-family
/// lock, and the wave loop. One instance per container; not shared.
#[derive(Clone, Debug)]
pub struct Ripple {
    config: RippleConfig,
    tracker: TapTracker,
    grace: TimerTask,
    wave: WaveLoop,
}

impl Default for Ripple {
    fn default() -> Self {
        Self::new(RippleConfig::default())
    }
}

impl Ripple {
    /// Create an idle ripple.
    pub fn new(config: RippleConfig) -> Self {
        Self {
            config,
            tracker: TapTracker::new(),
            grace: TimerTask::new(),
            wave: WaveLoop::new(),
        }
    }

    /// Raw event names the host must subscribe to on the container.
    pub fn event_types() -> impl Iterator<Item = &'static str> + Clone {
        classify::event_types_to_watch()
    }

    /// Current configuration.
    pub fn config(&self) -> &RippleConfig {
        &self.config
    }

    /// Replace the configuration. A wave in flight keeps its old parameters.
    pub fn set_config(&mut self, config: RippleConfig) {
        self.config = config;
    }

    /// Gesture tracker state.
    pub fn tracker(&self) -> &TapTracker {
        &self.tracker
    }

    /// Wave loop state.
    pub fn wave(&self) -> &WaveLoop {
        &self.wave
    }

    /// Returns `true` while a wave is in flight.
    pub fn is_animating(&self) -> bool {
        self.wave.is_running()
    }

    /// Returns `true` while the grace timer is armed.
    pub fn grace_pending(&self) -> bool {
        self.grace.is_pending()
    }

    /// Feed one raw container event. Returns `true` if it started a wave.
    ///
    /// Events must arrive in delivery order. Unknown names, cross-family
    /// duplicates and out-of-order sequences are ignored.
    pub fn handle_event<H: RippleHost + ?Sized>(
        &mut self,
        host: &mut H,
        event: &RawEvent<'_>,
    ) -> bool {
        let Some(classified) = event.classify() else {
            log::trace!("ignoring unclassified event {:?}", event.event_type);
            return false;
        };
        let transition = self.tracker.handle(classified, event.coords());
        if transition.grace == GraceAction::Keep {
            log::trace!(
                "ignoring {} ({:?}); locked to {:?}",
                event.event_type,
                classified.group,
                self.tracker.locked_group()
            );
            return false;
        }

        self.grace.cancel_timer(host);
        let started = match transition.tap {
            Some(coords) => self.create_wave(host, coords),
            None => false,
        };
        if transition.grace == GraceAction::Restart
            && !self.grace.set_timer(host, GRACE_WINDOW)
        {
            log::warn!("grace timer refused; releasing group lock now");
            self.tracker.release_group();
        }
        started
    }

    /// Deliver a frame callback.
    pub fn on_frame<H: RippleHost + ?Sized>(&mut self, host: &mut H, id: FrameId) -> bool {
        self.wave.on_frame(host, id)
    }

    /// Deliver a timer callback. Releases the device-family lock when it is the
    /// pending grace timer.
    pub fn on_timer<H: RippleHost + ?Sized>(&mut self, _host: &mut H, id: TimerId) -> bool {
        if self.grace.fire(id) {
            log::trace!("grace window over; releasing {:?}", self.tracker.locked_group());
            self.tracker.release_group();
            true
        } else {
            false
        }
    }

    /// Start a wave at `coords` as if a tap had been confirmed there.
    pub fn trigger_at<H: RippleHost + ?Sized>(
        &mut self,
        host: &mut H,
        coords: PointerCoords,
    ) -> bool {
        self.create_wave(host, coords)
    }

    /// Stop everything before the container goes away.
    ///
    /// Withdraws the pending frame and grace timer and forgets the gesture;
    /// callbacks delivered afterwards are ignored.
    pub fn teardown<H: RippleHost + ?Sized>(&mut self, host: &mut H) {
        log::debug!("ripple teardown");
        self.wave.cancel(host);
        self.grace.cancel_timer(host);
        self.tracker.reset();
    }

    fn create_wave<H: RippleHost + ?Sized>(&mut self, host: &mut H, coords: PointerCoords) -> bool {
        let bounds = host.bounds();
        let request = RippleRequest {
            point: coords.client - bounds.origin().to_vec2(),
            size: bounds.size(),
        };
        self.wave.trigger(host, request, &self.config)
    }
}
