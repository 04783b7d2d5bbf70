#![forbid(unsafe_code)]

//! Recycle pool for idle display elements.
//!
//! Elements leave the strip on the left and come back on the right. Rather
//! than destroying and recreating surface objects, evicted elements park
//! here and are handed out again last-in-first-out: the most recently
//! evicted run is the most likely to still be close in size to the next one.
//!
//! Growth is unbounded, but in practice the pool never holds more elements
//! than fit on the strip at once.

use crate::element::DisplayElement;
use crate::host::TextSurface;
use crate::style::TextStyle;

/// Idle elements waiting to be reused.
#[derive(Debug)]
pub struct RecyclePool<H> {
    idle: Vec<DisplayElement<H>>,
    created: usize,
}

impl<H: Copy> RecyclePool<H> {
    pub fn new() -> Self {
        Self {
            idle: Vec::new(),
            created: 0,
        }
    }

    /// Take the most recently released element, or create one on `surface`.
    pub fn acquire<S>(&mut self, surface: &mut S, style: &TextStyle) -> DisplayElement<H>
    where
        S: TextSurface<Handle = H>,
    {
        if let Some(element) = self.idle.pop() {
            return element;
        }
        self.created += 1;
        let handle = surface.create_element(style);
        tracing::trace!(created = self.created, "pool miss, created element");
        DisplayElement::new(handle)
    }

    /// Park an element for reuse.
    pub fn release(&mut self, element: DisplayElement<H>) {
        self.idle.push(element);
    }

    /// The element the next [`RecyclePool::acquire`] will return, if any.
    pub fn peek(&self) -> Option<&DisplayElement<H>> {
        self.idle.last()
    }

    pub fn len(&self) -> usize {
        self.idle.len()
    }

    pub fn is_empty(&self) -> bool {
        self.idle.is_empty()
    }

    /// Number of elements this pool has ever created.
    pub fn created(&self) -> usize {
        self.created
    }

    pub fn iter(&self) -> impl Iterator<Item = &DisplayElement<H>> {
        self.idle.iter()
    }

    /// Remove every idle element, leaving the pool empty.
    pub fn drain(&mut self) -> impl Iterator<Item = DisplayElement<H>> + '_ {
        self.idle.drain(..)
    }
}

impl<H: Copy> Default for RecyclePool<H> {
    fn default() -> Self {
        Self::new()
    }
}
