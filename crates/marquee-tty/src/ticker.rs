#![forbid(unsafe_code)]

//! Fixed-rate frame ticker.
//!
//! [`FrameTicker`] is a polled [`FrameClock`]: the host loop calls
//! [`FrameTicker::poll`] with the current instant and forwards each due
//! `(TickId, dt)` pair to the marquee that owns the subscription.
//!
//! `dt` is the real time since that subscription's previous tick. The first
//! tick after subscribing or resuming carries the nominal frame interval, so
//! time spent paused never turns into a jump.
//!
//! The ticker is a cheap handle over shared state. The marquee owns one
//! clone (to subscribe and pause), the event loop keeps another to poll.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;
use std::time::Duration;

use marquee_core::{FrameClock, TickId};
use web_time::Instant;

#[derive(Debug, Clone, Copy)]
struct Slot {
    paused: bool,
    last: Option<Instant>,
}

#[derive(Debug)]
struct TickerState {
    interval: Duration,
    next_id: TickId,
    slots: BTreeMap<TickId, Slot>,
}

/// A polled frame clock firing at a fixed interval.
#[derive(Debug, Clone)]
pub struct FrameTicker {
    state: Rc<RefCell<TickerState>>,
}

impl FrameTicker {
    pub fn new(interval: Duration) -> Self {
        Self {
            state: Rc::new(RefCell::new(TickerState {
                interval,
                next_id: 0,
                slots: BTreeMap::new(),
            })),
        }
    }

    /// A ticker firing `fps` times per second. Zero is treated as one.
    pub fn from_fps(fps: u32) -> Self {
        Self::new(Duration::from_secs(1) / fps.max(1))
    }

    pub fn interval(&self) -> Duration {
        self.state.borrow().interval
    }

    /// Live subscriptions that are not paused.
    pub fn active_count(&self) -> usize {
        self.state
            .borrow()
            .slots
            .values()
            .filter(|slot| !slot.paused)
            .count()
    }

    /// Collect due ticks at `now`, oldest subscription first.
    pub fn poll(&self, now: Instant) -> Vec<(TickId, Duration)> {
        let mut state = self.state.borrow_mut();
        let interval = state.interval;
        let mut due = Vec::new();
        for (&id, slot) in state.slots.iter_mut().filter(|(_, s)| !s.paused) {
            let dt = match slot.last {
                None => interval,
                Some(last) => {
                    let elapsed = now.saturating_duration_since(last);
                    if elapsed < interval {
                        continue;
                    }
                    elapsed
                }
            };
            slot.last = Some(now);
            due.push((id, dt));
        }
        due
    }

    /// When the next tick falls due, or `None` with nothing active.
    ///
    /// A subscription that has not ticked yet is due immediately.
    pub fn next_deadline(&self, now: Instant) -> Option<Instant> {
        let state = self.state.borrow();
        state
            .slots
            .values()
            .filter(|slot| !slot.paused)
            .map(|slot| slot.last.map_or(now, |last| last + state.interval))
            .min()
    }
}

impl FrameClock for FrameTicker {
    fn subscribe(&mut self) -> TickId {
        let mut state = self.state.borrow_mut();
        state.next_id += 1;
        let id = state.next_id;
        state.slots.insert(
            id,
            Slot {
                paused: false,
                last: None,
            },
        );
        tracing::debug!(
            sub_id = id,
            interval_us = state.interval.as_micros() as u64,
            "ticker subscription started"
        );
        id
    }

    fn unsubscribe(&mut self, id: TickId) {
        if self.state.borrow_mut().slots.remove(&id).is_some() {
            tracing::debug!(sub_id = id, "ticker subscription stopped");
        }
    }

    fn set_paused(&mut self, id: TickId, paused: bool) {
        if let Some(slot) = self.state.borrow_mut().slots.get_mut(&id) {
            slot.paused = paused;
            if paused {
                slot.last = None;
            }
        }
    }
}
