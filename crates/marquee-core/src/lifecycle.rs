#![forbid(unsafe_code)]

//! Run/pause/stop state machine and the tick-delivery gate.
//!
//! Logical state and visibility are independent:
//!
//! | state     | attached | ticks delivered |
//! |-----------|----------|-----------------|
//! | `Stopped` | any      | no              |
//! | `Paused`  | any      | no              |
//! | `Running` | no       | no (deferred)   |
//! | `Running` | yes      | yes             |
//!
//! Every transition ends with [`LifecycleController::sync`], which brings
//! the clock subscription in line with the table. The subscription is
//! created on first use and kept (paused) until [`LifecycleController::cancel`].

use crate::host::{FrameClock, TickId};

/// Logical playback state of a marquee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RunState {
    /// Nothing visible, offset zero. Initial state.
    #[default]
    Stopped,
    /// Scrolling (when attached to a display).
    Running,
    /// Frozen in place; resumes without re-seeding.
    Paused,
}

impl RunState {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Stopped => "stopped",
            Self::Running => "running",
            Self::Paused => "paused",
        }
    }
}

impl std::fmt::Display for RunState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Owns the logical state, the attach flag and the clock subscription.
#[derive(Debug, Default)]
pub struct LifecycleController {
    state: RunState,
    attached: bool,
    subscription: Option<TickId>,
    delivering: bool,
}

impl LifecycleController {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn state(&self) -> RunState {
        self.state
    }

    #[inline]
    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Whether ticks should reach the engine right now.
    #[inline]
    pub fn should_deliver(&self) -> bool {
        self.state == RunState::Running && self.attached
    }

    /// Whether the clock subscription is currently unpaused.
    #[inline]
    pub fn is_delivering(&self) -> bool {
        self.delivering
    }

    /// The clock subscription, once created.
    #[inline]
    pub fn subscription(&self) -> Option<TickId> {
        self.subscription
    }

    /// Enter `state` and update tick delivery.
    pub fn transition<C: FrameClock>(&mut self, state: RunState, clock: &mut C) {
        if self.state != state {
            tracing::debug!(from = %self.state, to = %state, "marquee state change");
            self.state = state;
        }
        self.sync(clock);
    }

    /// Record attachment to (or detachment from) a live display.
    pub fn set_attached<C: FrameClock>(&mut self, attached: bool, clock: &mut C) {
        if self.attached != attached {
            tracing::debug!(attached, state = %self.state, "marquee visibility change");
            self.attached = attached;
        }
        self.sync(clock);
    }

    /// Bring the clock subscription in line with state and visibility.
    pub fn sync<C: FrameClock>(&mut self, clock: &mut C) {
        let want = self.should_deliver();
        if want == self.delivering {
            return;
        }
        match (want, self.subscription) {
            (true, None) => {
                let id = clock.subscribe();
                tracing::debug!(sub_id = id, "subscribed to frame clock");
                self.subscription = Some(id);
            }
            (true, Some(id)) => clock.set_paused(id, false),
            (false, Some(id)) => clock.set_paused(id, true),
            (false, None) => {}
        }
        self.delivering = want;
    }

    /// Cancel the clock subscription for good.
    pub fn cancel<C: FrameClock>(&mut self, clock: &mut C) {
        if let Some(id) = self.subscription.take() {
            tracing::debug!(sub_id = id, "unsubscribed from frame clock");
            clock.unsubscribe(id);
        }
        self.delivering = false;
    }
}
