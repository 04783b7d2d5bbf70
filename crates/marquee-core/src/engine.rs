#![forbid(unsafe_code)]

//! Scroll engine: the per-tick update of a marquee strip.
//!
//! The engine keeps element positions in content coordinates and a scalar
//! `offset` that grows as the strip scrolls left. The viewport covers
//! `[offset, offset + viewport.width)` in content space; every element is
//! placed on the surface at `x - offset`.
//!
//! # Tick algorithm
//!
//! 1. `offset += scroll_speed * dt`.
//! 2. Eviction: while the front element's trailing edge is at or left of the
//!    viewport's leading edge, detach it and park it in the pool.
//! 3. Admission: while the back element leaves a gap of at least
//!    `text_spacing` before the viewport's trailing edge (or the strip is
//!    empty), take an element from the pool, give it the next text, size it,
//!    and place it `text_spacing` after the back (or at the trailing edge).
//! 4. Reposition every visible element on the surface.
//!
//! Eviction always runs before admission. Both may repeat within one tick,
//! e.g. after a long gap between ticks or with very short texts.
//!
//! # Invariants
//!
//! 1. The visible queue is ordered left to right and adjacent gaps equal
//!    `text_spacing` (see [`VisibleQueue::is_well_spaced`]).
//! 2. After a tick, the leftmost element's trailing edge is right of the
//!    viewport's leading edge.
//! 3. A tick is bounded: an admission that does not move the trailing edge
//!    (empty text with zero spacing) ends admission for that tick, and the
//!    strip never holds more than [`MAX_VISIBLE`] elements.

use std::time::Duration;

use crate::config::MarqueeConfig;
use crate::cycler::IndexCycler;
use crate::element::DisplayElement;
use crate::geometry::Size;
use crate::host::TextSurface;
use crate::pool::RecyclePool;
use crate::queue::VisibleQueue;
use crate::style::TextStyle;

/// Upper bound on simultaneously visible elements.
///
/// Only reachable with near-empty texts and a spacing that is tiny relative
/// to the viewport. Once hit, the rest of the gap is filled on later ticks as
/// elements exit.
pub const MAX_VISIBLE: usize = 1024;

/// What one tick did.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TickReport {
    /// Distance scrolled this tick.
    pub distance: f64,
    /// Elements that left the strip.
    pub evicted: usize,
    /// Elements that entered the strip.
    pub admitted: usize,
}

/// Scroll state plus the containers it moves elements between.
#[derive(Debug)]
pub struct ScrollEngine<H> {
    offset: f64,
    viewport: Size,
    queue: VisibleQueue<H>,
    pool: RecyclePool<H>,
    cycler: IndexCycler,
}

impl<H: Copy + std::fmt::Debug> ScrollEngine<H> {
    pub fn new() -> Self {
        Self {
            offset: 0.0,
            viewport: Size::ZERO,
            queue: VisibleQueue::new(),
            pool: RecyclePool::new(),
            cycler: IndexCycler::new(),
        }
    }

    /// Distance scrolled since the last reset.
    #[inline]
    pub fn offset(&self) -> f64 {
        self.offset
    }

    #[inline]
    pub fn viewport(&self) -> Size {
        self.viewport
    }

    /// Viewport's left edge in content coordinates.
    #[inline]
    pub fn leading_edge(&self) -> f64 {
        self.offset
    }

    /// Viewport's right edge in content coordinates.
    #[inline]
    pub fn trailing_edge(&self) -> f64 {
        self.offset + self.viewport.width
    }

    pub fn queue(&self) -> &VisibleQueue<H> {
        &self.queue
    }

    pub fn pool(&self) -> &RecyclePool<H> {
        &self.pool
    }

    pub fn cycler(&self) -> &IndexCycler {
        &self.cycler
    }

    /// Text indices of the visible elements, leftmost first.
    pub fn visible_indices(&self) -> Vec<usize> {
        self.queue
            .iter()
            .filter_map(DisplayElement::text_index)
            .collect()
    }

    /// Point the cycler at the start of a list of `text_count` items.
    pub fn reset_cycler(&mut self, text_count: usize) {
        self.cycler.reset(text_count);
    }

    /// Resize the viewport and re-place visible elements (vertical centring
    /// depends on the height).
    pub fn set_viewport<S>(&mut self, viewport: Size, surface: &mut S)
    where
        S: TextSurface<Handle = H>,
    {
        self.viewport = viewport;
        self.reposition(surface);
    }

    /// Admit exactly one element at the viewport's trailing edge.
    ///
    /// Used when a stopped marquee starts. Returns `false` for an empty list.
    pub fn seed<S>(&mut self, surface: &mut S, texts: &[String], config: &MarqueeConfig) -> bool
    where
        S: TextSurface<Handle = H>,
    {
        let style = config.text_style();
        self.admit_next(surface, texts, &style, config.text_spacing)
    }

    /// Run one tick of `dt`.
    pub fn advance<S>(
        &mut self,
        dt: Duration,
        surface: &mut S,
        texts: &[String],
        config: &MarqueeConfig,
    ) -> TickReport
    where
        S: TextSurface<Handle = H>,
    {
        let distance = config.scroll_speed * dt.as_secs_f64();
        self.offset += distance;

        let evicted = self.evict_exited(surface);
        let admitted = self.admit_needed(surface, texts, config);
        self.reposition(surface);

        TickReport {
            distance,
            evicted,
            admitted,
        }
    }

    /// Evict every element whose trailing edge has crossed the leading edge.
    fn evict_exited<S>(&mut self, surface: &mut S) -> usize
    where
        S: TextSurface<Handle = H>,
    {
        let leading = self.leading_edge();
        let mut evicted = 0;
        while self
            .queue
            .front()
            .is_some_and(|front| front.trailing() <= leading)
        {
            let Some(element) = self.queue.pop_front() else {
                break;
            };
            surface.detach(element.handle());
            tracing::trace!(
                handle = ?element.handle(),
                text_index = ?element.text_index(),
                "evicted"
            );
            self.pool.release(element);
            evicted += 1;
        }
        evicted
    }

    /// Admit elements until the gap before the trailing edge is under
    /// `text_spacing`.
    fn admit_needed<S>(&mut self, surface: &mut S, texts: &[String], config: &MarqueeConfig) -> usize
    where
        S: TextSurface<Handle = H>,
    {
        let spacing = config.text_spacing;
        let style = config.text_style();
        let mut admitted = 0;

        loop {
            if self.queue.len() >= MAX_VISIBLE {
                tracing::trace!(visible = self.queue.len(), "admission capped");
                break;
            }
            let trailing_edge = self.trailing_edge();
            let before = match self.queue.back() {
                Some(back) if trailing_edge - back.trailing() >= spacing => Some(back.trailing()),
                Some(_) => break,
                None if self.viewport.width > 0.0 => None,
                None => break,
            };

            if !self.admit_next(surface, texts, &style, spacing) {
                break;
            }
            admitted += 1;

            if let (Some(before), Some(back)) = (before, self.queue.back())
                && back.trailing() <= before
            {
                break;
            }
        }
        admitted
    }

    fn admit_next<S>(
        &mut self,
        surface: &mut S,
        texts: &[String],
        style: &TextStyle,
        spacing: f64,
    ) -> bool
    where
        S: TextSurface<Handle = H>,
    {
        let Some(index) = self.cycler.peek_and_advance() else {
            return false;
        };
        assert!(
            index < texts.len(),
            "text index {index} out of range for {} items; the cycler must be reset when the list changes",
            texts.len()
        );

        let mut element = self.pool.acquire(surface, style);
        let size = surface.size_to_fit(element.handle(), &texts[index], style);
        element.assign(index, size);

        let x = match self.queue.back() {
            Some(back) => back.trailing() + spacing,
            None => self.trailing_edge(),
        };
        element.set_x(x);

        surface.set_position(element.handle(), x - self.offset, self.viewport.center_y(size));
        surface.attach(element.handle());
        tracing::trace!(
            handle = ?element.handle(),
            text_index = index,
            x,
            width = size.width,
            "admitted"
        );
        self.queue.push_back(element);
        true
    }

    /// Place every visible element on the surface at its scrolled position.
    fn reposition<S>(&self, surface: &mut S)
    where
        S: TextSurface<Handle = H>,
    {
        for element in self.queue.iter() {
            surface.set_position(
                element.handle(),
                element.x() - self.offset,
                self.viewport.center_y(element.size()),
            );
        }
    }

    /// Detach and recycle every visible element, rewind the cycler and the
    /// offset.
    pub fn reset<S>(&mut self, surface: &mut S, text_count: usize)
    where
        S: TextSurface<Handle = H>,
    {
        for element in self.queue.drain() {
            surface.detach(element.handle());
            self.pool.release(element);
        }
        self.offset = 0.0;
        self.cycler.reset(text_count);
    }

    /// Apply `style` to every element, idle or visible.
    pub fn restyle<S>(&mut self, surface: &mut S, style: &TextStyle)
    where
        S: TextSurface<Handle = H>,
    {
        for element in self.pool.iter().chain(self.queue.iter()) {
            surface.apply_style(element.handle(), style);
        }
    }

    /// Destroy every element on the surface. The engine is empty afterwards.
    pub fn destroy_all<S>(&mut self, surface: &mut S)
    where
        S: TextSurface<Handle = H>,
    {
        for element in self.queue.drain() {
            surface.detach(element.handle());
            surface.destroy(element.handle());
        }
        for element in self.pool.drain() {
            surface.destroy(element.handle());
        }
        self.offset = 0.0;
    }
}

impl<H: Copy + std::fmt::Debug> Default for ScrollEngine<H> {
    fn default() -> Self {
        Self::new()
    }
}
