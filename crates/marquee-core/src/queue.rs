#![forbid(unsafe_code)]

//! Ordered set of visible elements.
//!
//! # Invariants
//!
//! 1. Elements are ordered by ascending `x`: front is leftmost and exits
//!    first, back is the most recently admitted.
//! 2. Adjacent elements are separated by exactly the configured spacing
//!    (the engine places each new element at `back.trailing() + spacing`).

use std::collections::VecDeque;

use crate::element::DisplayElement;

/// Visible elements, leftmost first.
#[derive(Debug)]
pub struct VisibleQueue<H> {
    elements: VecDeque<DisplayElement<H>>,
}

impl<H: Copy> VisibleQueue<H> {
    pub fn new() -> Self {
        Self {
            elements: VecDeque::new(),
        }
    }

    /// Leftmost element.
    pub fn front(&self) -> Option<&DisplayElement<H>> {
        self.elements.front()
    }

    /// Rightmost element.
    pub fn back(&self) -> Option<&DisplayElement<H>> {
        self.elements.back()
    }

    /// Append at the right. The element must start at or after the current back.
    pub fn push_back(&mut self, element: DisplayElement<H>) {
        debug_assert!(
            self.back().is_none_or(|back| element.x() >= back.x()),
            "visible queue must stay ordered left to right"
        );
        self.elements.push_back(element);
    }

    /// Remove the leftmost element.
    pub fn pop_front(&mut self) -> Option<DisplayElement<H>> {
        self.elements.pop_front()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DisplayElement<H>> {
        self.elements.iter()
    }

    /// Remove every element, leftmost first.
    pub fn drain(&mut self) -> impl Iterator<Item = DisplayElement<H>> + '_ {
        self.elements.drain(..)
    }

    /// Check ordering and that every gap equals `spacing` within `tolerance`.
    pub fn is_well_spaced(&self, spacing: f64, tolerance: f64) -> bool {
        self.elements.iter().zip(self.elements.iter().skip(1)).all(|(a, b)| {
            b.x() > a.x() - tolerance && ((b.x() - a.trailing()) - spacing).abs() <= tolerance
        })
    }
}

impl<H: Copy> Default for VisibleQueue<H> {
    fn default() -> Self {
        Self::new()
    }
}
