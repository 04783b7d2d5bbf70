#![forbid(unsafe_code)]

//! In-memory host doubles for tests and examples.
//!
//! [`RecordingSurface`] measures every character as a fixed width (scaled by
//! font size) and remembers what each glyph run shows and where.
//! [`ManualClock`] tracks subscriptions without ever firing; tests deliver
//! ticks by calling [`crate::Marquee::on_tick`] directly.
//!
//! Both are cheap handles over shared state: clone one before moving it
//! into a marquee to keep inspecting it afterwards, including after the
//! marquee is dropped.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use crate::config::DEFAULT_FONT_SIZE;
use crate::geometry::Size;
use crate::host::{FrameClock, TextSurface, TickId};
use crate::style::TextStyle;

/// Width of one character at the default font size.
pub const DEFAULT_CHAR_WIDTH: f64 = 10.0;

/// A surface call, in the order it was made.
///
/// Positioning is not logged; read it from [`RecordedElement`].
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceOp {
    Create(u32),
    Destroy(u32),
    SizeToFit(u32, String),
    Attach(u32),
    Detach(u32),
    ApplyStyle(u32),
}

/// Last known state of one glyph run.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedElement {
    pub text: String,
    pub style: TextStyle,
    pub x: f64,
    pub y: f64,
    pub attached: bool,
    pub destroyed: bool,
}

#[derive(Debug, Default)]
struct SurfaceState {
    next_handle: u32,
    elements: BTreeMap<u32, RecordedElement>,
    ops: Vec<SurfaceOp>,
}

/// A [`TextSurface`] that records everything done to it.
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    state: Rc<RefCell<SurfaceState>>,
    char_width: f64,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::with_char_width(DEFAULT_CHAR_WIDTH)
    }

    pub fn with_char_width(char_width: f64) -> Self {
        Self {
            state: Rc::new(RefCell::new(SurfaceState::default())),
            char_width,
        }
    }

    /// Snapshot of one run, destroyed or not.
    pub fn element(&self, handle: u32) -> Option<RecordedElement> {
        self.state.borrow().elements.get(&handle).cloned()
    }

    /// Attached runs as `(handle, element)`, left to right on screen.
    pub fn attached(&self) -> Vec<(u32, RecordedElement)> {
        let state = self.state.borrow();
        let mut runs: Vec<_> = state
            .elements
            .iter()
            .filter(|(_, el)| el.attached)
            .map(|(h, el)| (*h, el.clone()))
            .collect();
        runs.sort_by(|a, b| a.1.x.total_cmp(&b.1.x));
        runs
    }

    /// Texts of attached runs, left to right.
    pub fn attached_texts(&self) -> Vec<String> {
        self.attached().into_iter().map(|(_, el)| el.text).collect()
    }

    pub fn attached_count(&self) -> usize {
        self.state
            .borrow()
            .elements
            .values()
            .filter(|el| el.attached)
            .count()
    }

    /// Runs created and not yet destroyed.
    pub fn live_count(&self) -> usize {
        self.state
            .borrow()
            .elements
            .values()
            .filter(|el| !el.destroyed)
            .count()
    }

    pub fn ops(&self) -> Vec<SurfaceOp> {
        self.state.borrow().ops.clone()
    }

    pub fn clear_ops(&self) {
        self.state.borrow_mut().ops.clear();
    }

    fn update(&self, handle: u32, op: SurfaceOp, f: impl FnOnce(&mut RecordedElement)) {
        let mut state = self.state.borrow_mut();
        if let Some(el) = state.elements.get_mut(&handle) {
            assert!(!el.destroyed, "use of destroyed handle {handle}");
            f(el);
        }
        state.ops.push(op);
    }
}

impl Default for RecordingSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl TextSurface for RecordingSurface {
    type Handle = u32;

    fn create_element(&mut self, style: &TextStyle) -> u32 {
        let mut state = self.state.borrow_mut();
        let handle = state.next_handle;
        state.next_handle += 1;
        state.elements.insert(
            handle,
            RecordedElement {
                text: String::new(),
                style: style.clone(),
                x: 0.0,
                y: 0.0,
                attached: false,
                destroyed: false,
            },
        );
        state.ops.push(SurfaceOp::Create(handle));
        handle
    }

    fn destroy(&mut self, handle: u32) {
        self.update(handle, SurfaceOp::Destroy(handle), |el| {
            el.attached = false;
            el.destroyed = true;
        });
    }

    fn size_to_fit(&mut self, handle: u32, text: &str, style: &TextStyle) -> Size {
        let scale = style.font.size / DEFAULT_FONT_SIZE;
        let size = Size::new(
            text.chars().count() as f64 * self.char_width * scale,
            style.font.size,
        );
        self.update(handle, SurfaceOp::SizeToFit(handle, text.to_string()), |el| {
            el.text = text.to_string();
            el.style = style.clone();
        });
        size
    }

    fn set_position(&mut self, handle: u32, x: f64, y: f64) {
        let mut state = self.state.borrow_mut();
        if let Some(el) = state.elements.get_mut(&handle) {
            el.x = x;
            el.y = y;
        }
    }

    fn attach(&mut self, handle: u32) {
        self.update(handle, SurfaceOp::Attach(handle), |el| el.attached = true);
    }

    fn detach(&mut self, handle: u32) {
        self.update(handle, SurfaceOp::Detach(handle), |el| el.attached = false);
    }

    fn apply_style(&mut self, handle: u32, style: &TextStyle) {
        self.update(handle, SurfaceOp::ApplyStyle(handle), |el| {
            el.style = style.clone();
        });
    }
}

#[derive(Debug, Default)]
struct ClockState {
    next_id: TickId,
    /// Live subscriptions and whether each is paused.
    subscriptions: BTreeMap<TickId, bool>,
    cancelled: Vec<TickId>,
}

/// A [`FrameClock`] that only keeps books.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    state: Rc<RefCell<ClockState>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `id` is subscribed and unpaused.
    pub fn is_delivering(&self, id: TickId) -> bool {
        self.state.borrow().subscriptions.get(&id) == Some(&false)
    }

    /// Live (not cancelled) subscriptions.
    pub fn subscription_count(&self) -> usize {
        self.state.borrow().subscriptions.len()
    }

    /// Ids passed to `unsubscribe`, in order.
    pub fn cancelled(&self) -> Vec<TickId> {
        self.state.borrow().cancelled.clone()
    }
}

impl FrameClock for ManualClock {
    fn subscribe(&mut self) -> TickId {
        let mut state = self.state.borrow_mut();
        state.next_id += 1;
        let id = state.next_id;
        state.subscriptions.insert(id, false);
        id
    }

    fn unsubscribe(&mut self, id: TickId) {
        let mut state = self.state.borrow_mut();
        state.subscriptions.remove(&id);
        state.cancelled.push(id);
    }

    fn set_paused(&mut self, id: TickId, paused: bool) {
        if let Some(flag) = self.state.borrow_mut().subscriptions.get_mut(&id) {
            *flag = paused;
        }
    }
}
