#![forbid(unsafe_code)]

//! The marquee widget.
//!
//! [`Marquee`] ties the [`ScrollEngine`] to the host's surface and clock and
//! runs the run/pause/stop state machine:
//!
//! - `stopped --run()--> running`: seeds one element at the trailing edge.
//!   Ticks start only if attached to a display.
//! - `running --pause()--> paused`: ticks stop; everything stays in place.
//! - `paused --run()--> running`: ticks resume, no re-seeding.
//! - `running|paused --stop()--> stopped`: every element is recycled, offset
//!   and text index rewind.
//!
//! Commands at their boundary (`run` while running, `pause` while not
//! running, `stop` while stopped, `run` with an empty list) do nothing.
//!
//! # Locked properties
//!
//! `text_spacing`, `scroll_speed` and `font` may only change while stopped.
//! The plain setters panic otherwise; the `try_set_*` variants return
//! [`MarqueeError::PropertyLocked`]. Colors may change at any time and are
//! pushed to every element, idle or visible.

use std::time::Duration;

use crate::config::{self, MarqueeConfig};
use crate::engine::{ScrollEngine, TickReport};
use crate::error::{MarqueeError, Property};
use crate::geometry::Size;
use crate::host::{FrameClock, TextSurface, TickId};
use crate::lifecycle::{LifecycleController, RunState};
use crate::style::{Color, Font};

/// A horizontally scrolling text marquee.
///
/// Dropping a marquee cancels its tick subscription and destroys every
/// glyph run it created.
pub struct Marquee<S: TextSurface, C: FrameClock> {
    surface: S,
    clock: C,
    config: MarqueeConfig,
    texts: Vec<String>,
    engine: ScrollEngine<S::Handle>,
    lifecycle: LifecycleController,
}

impl<S: TextSurface, C: FrameClock> std::fmt::Debug for Marquee<S, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Marquee")
            .field("state", &self.lifecycle.state())
            .field("attached", &self.lifecycle.is_attached())
            .field("texts", &self.texts.len())
            .field("offset", &self.engine.offset())
            .field("visible", &self.engine.queue().len())
            .field("pooled", &self.engine.pool().len())
            .finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// Construction
// ---------------------------------------------------------------------------

impl<S: TextSurface, C: FrameClock> Marquee<S, C> {
    /// A stopped, detached marquee with the default configuration and no
    /// texts.
    pub fn new(surface: S, clock: C) -> Self {
        Self {
            surface,
            clock,
            config: MarqueeConfig::default(),
            texts: Vec::new(),
            engine: ScrollEngine::new(),
            lifecycle: LifecycleController::new(),
        }
    }

    /// A marquee with an explicit configuration.
    pub fn with_config(surface: S, clock: C, config: MarqueeConfig) -> Result<Self, MarqueeError> {
        let problems = config.validate();
        if !problems.is_empty() {
            return Err(MarqueeError::InvalidConfig(problems));
        }
        let mut marquee = Self::new(surface, clock);
        marquee.config = config;
        Ok(marquee)
    }
}

// ---------------------------------------------------------------------------
// Playback control
// ---------------------------------------------------------------------------

impl<S: TextSurface, C: FrameClock> Marquee<S, C> {
    /// Start scrolling, or resume from pause.
    pub fn run(&mut self) {
        let state = self.lifecycle.state();
        if state == RunState::Running {
            tracing::trace!("run ignored: already running");
            return;
        }
        if self.texts.is_empty() {
            tracing::trace!("run ignored: empty text list");
            return;
        }
        if state == RunState::Stopped {
            self.engine.seed(&mut self.surface, &self.texts, &self.config);
        }
        self.lifecycle.transition(RunState::Running, &mut self.clock);
    }

    /// Freeze in place. No-op unless running.
    pub fn pause(&mut self) {
        if self.lifecycle.state() != RunState::Running {
            tracing::trace!(state = %self.lifecycle.state(), "pause ignored");
            return;
        }
        self.lifecycle.transition(RunState::Paused, &mut self.clock);
    }

    /// Clear the strip and rewind. No-op when already stopped.
    pub fn stop(&mut self) {
        if self.lifecycle.state() == RunState::Stopped {
            tracing::trace!("stop ignored: already stopped");
            return;
        }
        self.lifecycle.transition(RunState::Stopped, &mut self.clock);
        self.engine.reset(&mut self.surface, self.texts.len());
    }

    /// Deliver one frame tick of `dt`.
    ///
    /// Returns `None` when ticks are gated (not running, or not attached to
    /// a display); the marquee is left untouched in that case.
    pub fn on_tick(&mut self, dt: Duration) -> Option<TickReport> {
        if !self.lifecycle.should_deliver() {
            tracing::trace!(
                state = %self.lifecycle.state(),
                attached = self.lifecycle.is_attached(),
                "tick dropped"
            );
            return None;
        }
        Some(
            self.engine
                .advance(dt, &mut self.surface, &self.texts, &self.config),
        )
    }

    /// The widget was placed on a live display.
    pub fn attach_to_display(&mut self) {
        self.lifecycle.set_attached(true, &mut self.clock);
    }

    /// The widget left its display. Ticks stop whatever the logical state.
    pub fn detach_from_display(&mut self) {
        self.lifecycle.set_attached(false, &mut self.clock);
    }

    #[inline]
    pub fn state(&self) -> RunState {
        self.lifecycle.state()
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.state() == RunState::Running
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        self.state() == RunState::Paused
    }

    #[inline]
    pub fn is_stopped(&self) -> bool {
        self.state() == RunState::Stopped
    }

    #[inline]
    pub fn is_attached(&self) -> bool {
        self.lifecycle.is_attached()
    }

    /// Whether the clock subscription is currently delivering.
    #[inline]
    pub fn is_ticking(&self) -> bool {
        self.lifecycle.is_delivering()
    }

    /// The clock subscription this marquee listens on, once created.
    #[inline]
    pub fn tick_id(&self) -> Option<TickId> {
        self.lifecycle.subscription()
    }
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

impl<S: TextSurface, C: FrameClock> Marquee<S, C> {
    pub fn config(&self) -> &MarqueeConfig {
        &self.config
    }

    pub fn text_list(&self) -> &[String] {
        &self.texts
    }

    /// Replace the texts. Stops first, then rewinds to the new list's start.
    pub fn set_text_list<I, T>(&mut self, texts: I)
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.stop();
        self.texts = texts.into_iter().map(Into::into).collect();
        self.engine.reset_cycler(self.texts.len());
        tracing::debug!(count = self.texts.len(), "text list replaced");
    }

    pub fn viewport(&self) -> Size {
        self.engine.viewport()
    }

    /// Resize the visible strip. Allowed in any state.
    pub fn set_viewport(&mut self, viewport: Size) {
        self.engine.set_viewport(viewport, &mut self.surface);
    }

    pub fn text_spacing(&self) -> f64 {
        self.config.text_spacing
    }

    /// # Panics
    ///
    /// If not stopped, or `spacing` is negative or not finite.
    pub fn set_text_spacing(&mut self, spacing: f64) {
        if let Err(err) = self.try_set_text_spacing(spacing) {
            panic!("{err}");
        }
    }

    pub fn try_set_text_spacing(&mut self, spacing: f64) -> Result<(), MarqueeError> {
        self.ensure_stopped(Property::TextSpacing)?;
        self.config.text_spacing = config::check_spacing(spacing)?;
        Ok(())
    }

    pub fn scroll_speed(&self) -> f64 {
        self.config.scroll_speed
    }

    /// # Panics
    ///
    /// If not stopped, or `speed` is negative or not finite.
    pub fn set_scroll_speed(&mut self, speed: f64) {
        if let Err(err) = self.try_set_scroll_speed(speed) {
            panic!("{err}");
        }
    }

    pub fn try_set_scroll_speed(&mut self, speed: f64) -> Result<(), MarqueeError> {
        self.ensure_stopped(Property::ScrollSpeed)?;
        self.config.scroll_speed = config::check_speed(speed)?;
        Ok(())
    }

    pub fn font(&self) -> &Font {
        &self.config.font
    }

    /// # Panics
    ///
    /// If not stopped, or the font size is not positive.
    pub fn set_font(&mut self, font: Font) {
        if let Err(err) = self.try_set_font(font) {
            panic!("{err}");
        }
    }

    pub fn try_set_font(&mut self, font: Font) -> Result<(), MarqueeError> {
        self.ensure_stopped(Property::Font)?;
        config::check_font(&font)?;
        self.config.font = font;
        self.restyle();
        Ok(())
    }

    pub fn text_color(&self) -> Color {
        self.config.text_color
    }

    pub fn set_text_color(&mut self, color: Color) {
        self.config.text_color = color;
        self.restyle();
    }

    pub fn background_color(&self) -> Option<Color> {
        self.config.background_color
    }

    pub fn set_background_color(&mut self, color: Option<Color>) {
        self.config.background_color = color;
        self.restyle();
    }

    /// Replace the whole configuration.
    ///
    /// Colors always apply. Locked fields may only differ from the current
    /// ones while stopped.
    pub fn apply_config(&mut self, config: MarqueeConfig) -> Result<(), MarqueeError> {
        let problems = config.validate();
        if !problems.is_empty() {
            return Err(MarqueeError::InvalidConfig(problems));
        }
        if let Some(property) = self.config.locked_fields_differ(&config) {
            self.ensure_stopped(property)?;
        }
        self.config = config;
        self.restyle();
        Ok(())
    }

    fn ensure_stopped(&self, property: Property) -> Result<(), MarqueeError> {
        match self.lifecycle.state() {
            RunState::Stopped => Ok(()),
            state => Err(MarqueeError::PropertyLocked { property, state }),
        }
    }

    fn restyle(&mut self) {
        let style = self.config.text_style();
        self.engine.restyle(&mut self.surface, &style);
    }
}

// ---------------------------------------------------------------------------
// Host access
// ---------------------------------------------------------------------------

impl<S: TextSurface, C: FrameClock> Marquee<S, C> {
    pub fn engine(&self) -> &ScrollEngine<S::Handle> {
        &self.engine
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }
}

impl<S: TextSurface, C: FrameClock> Drop for Marquee<S, C> {
    fn drop(&mut self) {
        self.lifecycle.cancel(&mut self.clock);
        self.engine.destroy_all(&mut self.surface);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{ManualClock, RecordingSurface};

    type TestMarquee = Marquee<RecordingSurface, ManualClock>;

    const FRAME: Duration = Duration::from_millis(100);

    /// Viewport 200x20, spacing 10, speed 50; chars are 10 wide.
    fn marquee(texts: &[&str]) -> (TestMarquee, RecordingSurface, ManualClock) {
        let surface = RecordingSurface::new();
        let clock = ManualClock::new();
        let config = MarqueeConfig::default()
            .with_text_spacing(10.0)
            .with_scroll_speed(50.0);
        let mut m = Marquee::with_config(surface.clone(), clock.clone(), config).unwrap();
        m.set_viewport(Size::new(200.0, 20.0));
        m.set_text_list(texts.iter().copied());
        (m, surface, clock)
    }

    // --- Run / pause / stop ---

    #[test]
    fn run_seeds_first_text_at_trailing_edge() {
        let (mut m, surface, _) = marquee(&["AB", "CD"]);
        m.run();

        assert_eq!(m.state(), RunState::Running);
        assert_eq!(surface.attached_texts(), vec!["AB"]);
        let (_, el) = surface.attached().remove(0);
        assert_eq!(el.x, 200.0);
        assert_eq!(m.engine().queue().len(), 1);
    }

    #[test]
    fn run_on_empty_list_is_noop() {
        let (mut m, surface, clock) = marquee(&[]);
        m.attach_to_display();
        m.run();
        assert_eq!(m.state(), RunState::Stopped);
        assert_eq!(surface.live_count(), 0);
        assert_eq!(clock.subscription_count(), 0);
    }

    #[test]
    fn run_twice_does_not_reseed() {
        let (mut m, _, _) = marquee(&["AB", "CD"]);
        m.run();
        m.run();
        assert_eq!(m.engine().queue().len(), 1);
        assert_eq!(m.engine().cycler().peek(), Some(1));
    }

    #[test]
    fn run_while_detached_defers_ticks() {
        let (mut m, _, clock) = marquee(&["AB"]);
        m.run();
        assert!(m.is_running());
        assert!(!m.is_ticking());
        assert_eq!(clock.subscription_count(), 0);
        assert_eq!(m.on_tick(FRAME), None);

        m.attach_to_display();
        assert!(m.is_ticking());
        assert!(clock.is_delivering(m.tick_id().unwrap()));
        assert!(m.on_tick(FRAME).is_some());
    }

    #[test]
    fn pause_freezes_and_resume_continues() {
        let (mut m, _, clock) = marquee(&["AB", "CD"]);
        m.attach_to_display();
        m.run();
        m.on_tick(FRAME);
        let offset = m.engine().offset();

        m.pause();
        assert!(m.is_paused());
        assert!(!clock.is_delivering(m.tick_id().unwrap()));
        assert_eq!(m.on_tick(FRAME), None);
        assert_eq!(m.engine().offset(), offset);

        m.run();
        assert!(m.is_running());
        assert_eq!(m.engine().queue().len(), 1, "resume must not re-seed");
        m.on_tick(FRAME);
        assert!(m.engine().offset() > offset);
    }

    #[test]
    fn pause_is_idempotent() {
        let (mut m, _, _) = marquee(&["AB", "CD"]);
        m.attach_to_display();
        m.run();
        m.on_tick(FRAME);
        m.pause();
        let once = (m.state(), m.engine().offset(), m.engine().visible_indices(), m.is_ticking());
        m.pause();
        let twice = (m.state(), m.engine().offset(), m.engine().visible_indices(), m.is_ticking());
        assert_eq!(once, twice);
    }

    #[test]
    fn pause_while_stopped_is_noop() {
        let (mut m, _, _) = marquee(&["AB"]);
        m.pause();
        assert!(m.is_stopped());
    }

    #[test]
    fn run_then_stop_restores_initial_state() {
        let (mut m, surface, _) = marquee(&["AB", "CD"]);
        m.attach_to_display();
        m.run();
        for _ in 0..20 {
            m.on_tick(FRAME);
        }
        m.stop();

        assert!(m.is_stopped());
        assert!(m.engine().queue().is_empty());
        assert_eq!(m.engine().offset(), 0.0);
        assert_eq!(m.engine().cycler().peek(), Some(0));
        assert!(!m.is_ticking());
        assert_eq!(surface.attached_count(), 0);
        assert_eq!(m.engine().pool().len(), m.engine().pool().created());
    }

    #[test]
    fn stop_while_stopped_is_noop() {
        let (mut m, surface, _) = marquee(&["AB"]);
        m.stop();
        assert!(m.is_stopped());
        assert!(surface.ops().is_empty());
    }

    #[test]
    fn stop_from_paused() {
        let (mut m, _, _) = marquee(&["AB"]);
        m.run();
        m.pause();
        m.stop();
        assert!(m.is_stopped());
        assert!(m.engine().queue().is_empty());
    }

    // --- Visibility ---

    #[test]
    fn detached_ticks_change_nothing() {
        let (mut m, surface, clock) = marquee(&["AB", "CD"]);
        m.attach_to_display();
        m.run();
        m.on_tick(FRAME);
        let offset = m.engine().offset();
        let positions = surface.attached();

        m.detach_from_display();
        assert!(m.is_running());
        assert!(!clock.is_delivering(m.tick_id().unwrap()));
        for _ in 0..10 {
            assert_eq!(m.on_tick(FRAME), None);
        }
        assert_eq!(m.engine().offset(), offset);
        assert_eq!(surface.attached(), positions);

        m.attach_to_display();
        let report = m.on_tick(FRAME).unwrap();
        assert_eq!(m.engine().offset(), offset + report.distance);
    }

    #[test]
    fn reattach_while_paused_does_not_resume() {
        let (mut m, _, _) = marquee(&["AB"]);
        m.attach_to_display();
        m.run();
        m.pause();
        m.detach_from_display();
        m.attach_to_display();
        assert!(m.is_paused());
        assert!(!m.is_ticking());
    }

    // --- Text list ---

    #[test]
    fn replacing_list_while_running_stops_and_rewinds() {
        let (mut m, surface, _) = marquee(&["AB", "CD"]);
        m.attach_to_display();
        m.run();
        for _ in 0..10 {
            m.on_tick(FRAME);
        }
        assert!(m.engine().queue().len() > 1);

        m.set_text_list(["one", "two", "three"]);
        assert!(m.is_stopped());
        assert!(m.engine().queue().is_empty());
        assert_eq!(surface.attached_count(), 0);

        m.run();
        assert_eq!(surface.attached_texts(), vec!["one"]);
        assert_eq!(m.engine().visible_indices(), vec![0]);
    }

    #[test]
    fn replacing_with_empty_list_makes_run_noop() {
        let (mut m, _, _) = marquee(&["AB"]);
        m.run();
        m.set_text_list(Vec::<String>::new());
        m.run();
        assert!(m.is_stopped());
        assert_eq!(m.engine().cycler().peek(), None);
    }

    // --- Locked properties ---

    #[test]
    fn locked_setters_work_while_stopped() {
        let (mut m, _, _) = marquee(&["AB"]);
        m.set_text_spacing(25.0);
        m.set_scroll_speed(80.0);
        m.set_font(Font::system(20.0));
        assert_eq!(m.text_spacing(), 25.0);
        assert_eq!(m.scroll_speed(), 80.0);
        assert_eq!(m.font().size, 20.0);
    }

    #[test]
    fn try_setters_report_locked_state() {
        let (mut m, _, _) = marquee(&["AB"]);
        m.run();
        let err = m.try_set_scroll_speed(10.0).unwrap_err();
        assert_eq!(
            err,
            MarqueeError::PropertyLocked {
                property: Property::ScrollSpeed,
                state: RunState::Running,
            }
        );
        assert_eq!(m.scroll_speed(), 50.0);

        m.pause();
        assert!(matches!(
            m.try_set_font(Font::system(9.0)),
            Err(MarqueeError::PropertyLocked { state: RunState::Paused, .. })
        ));
    }

    #[test]
    #[should_panic(expected = "text_spacing can only be changed while stopped")]
    fn set_spacing_while_running_panics() {
        let (mut m, _, _) = marquee(&["AB"]);
        m.run();
        m.set_text_spacing(5.0);
    }

    #[test]
    #[should_panic(expected = "invalid value for scroll_speed")]
    fn negative_speed_panics() {
        let (mut m, _, _) = marquee(&["AB"]);
        m.set_scroll_speed(-1.0);
    }

    #[test]
    fn colors_cascade_while_running() {
        let (mut m, surface, _) = marquee(&["AB", "CD"]);
        m.attach_to_display();
        m.run();
        for _ in 0..20 {
            m.on_tick(FRAME);
        }
        m.set_text_color(Color::rgb(255, 0, 0));
        m.set_background_color(Some(Color::WHITE));

        let handles: Vec<u32> = m
            .engine()
            .pool()
            .iter()
            .chain(m.engine().queue().iter())
            .map(|e| e.handle())
            .collect();
        assert!(!handles.is_empty());
        for h in handles {
            let el = surface.element(h).unwrap();
            assert_eq!(el.style.color, Color::rgb(255, 0, 0));
            assert_eq!(el.style.background, Some(Color::WHITE));
        }
    }

    #[test]
    fn font_change_reaches_pooled_elements() {
        let (mut m, surface, _) = marquee(&["AB"]);
        m.run();
        m.stop();
        let pooled = m.engine().pool().peek().unwrap().handle();
        m.set_font(Font::new("Menlo", 12.0));
        assert_eq!(surface.element(pooled).unwrap().style.font, Font::new("Menlo", 12.0));
    }

    #[test]
    fn apply_config_recolors_any_time_but_locks_speed() {
        let (mut m, _, _) = marquee(&["AB"]);
        m.run();
        let recolored = m.config().clone().with_text_color(Color::WHITE);
        assert!(m.apply_config(recolored).is_ok());
        assert_eq!(m.text_color(), Color::WHITE);

        let faster = m.config().clone().with_scroll_speed(99.0);
        assert!(matches!(
            m.apply_config(faster),
            Err(MarqueeError::PropertyLocked { property: Property::ScrollSpeed, .. })
        ));
    }

    #[test]
    fn with_config_rejects_invalid() {
        let config = MarqueeConfig::default().with_text_spacing(f64::INFINITY);
        let err = Marquee::with_config(RecordingSurface::new(), ManualClock::new(), config).unwrap_err();
        assert!(matches!(err, MarqueeError::InvalidConfig(ref p) if p.len() == 1));
    }

    // --- Teardown ---

    #[test]
    fn drop_cancels_subscription_and_destroys_elements() {
        let (mut m, surface, clock) = marquee(&["AB", "CD"]);
        m.attach_to_display();
        m.run();
        for _ in 0..20 {
            m.on_tick(FRAME);
        }
        let id = m.tick_id().unwrap();
        assert!(surface.live_count() > 0);

        drop(m);
        assert_eq!(clock.cancelled(), vec![id]);
        assert_eq!(clock.subscription_count(), 0);
        assert_eq!(surface.live_count(), 0);
    }

    #[test]
    fn empty_text_with_tiny_spacing_stays_bounded() {
        let (mut m, surface, _) = marquee(&[""]);
        m.set_text_spacing(0.001);
        m.attach_to_display();
        m.run();

        let report = m.on_tick(Duration::from_secs(1)).unwrap();
        assert_eq!(report.admitted, crate::engine::MAX_VISIBLE - 1);
        assert_eq!(m.engine().queue().len(), crate::engine::MAX_VISIBLE);
        assert_eq!(surface.live_count(), crate::engine::MAX_VISIBLE);
    }
}
