#![forbid(unsafe_code)]

//! Index cycling over the text list.
//!
//! The cycler only knows how many items the list has. It yields
//! `0, 1, ..., n-1, 0, 1, ...` and must be reset whenever the list is
//! replaced, before the next admission reads from it.

/// Tracks which text item is admitted next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IndexCycler {
    next: Option<usize>,
    len: usize,
}

impl IndexCycler {
    /// A cycler over an empty list.
    pub const fn new() -> Self {
        Self { next: None, len: 0 }
    }

    /// Point at the first item of a list with `len` items, or at nothing if
    /// the list is empty.
    pub fn reset(&mut self, len: usize) {
        self.len = len;
        self.next = (len > 0).then_some(0);
    }

    /// The index the next admission will use.
    pub fn peek(&self) -> Option<usize> {
        self.next
    }

    /// Return the next index and advance, wrapping at the list length.
    ///
    /// Returns `None` for an empty list.
    pub fn peek_and_advance(&mut self) -> Option<usize> {
        let current = self.next?;
        self.next = Some((current + 1) % self.len);
        Some(current)
    }

    /// Length of the list the cycler was last reset for.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_cycler_yields_nothing() {
        let mut c = IndexCycler::new();
        assert_eq!(c.peek(), None);
        assert_eq!(c.peek_and_advance(), None);
    }

    #[test]
    fn cycles_modulo_len() {
        let mut c = IndexCycler::new();
        c.reset(3);
        let seq: Vec<_> = (0..7).filter_map(|_| c.peek_and_advance()).collect();
        assert_eq!(seq, vec![0, 1, 2, 0, 1, 2, 0]);
    }

    #[test]
    fn single_item_repeats() {
        let mut c = IndexCycler::new();
        c.reset(1);
        for _ in 0..5 {
            assert_eq!(c.peek_and_advance(), Some(0));
        }
    }

    #[test]
    fn reset_rewinds_to_zero() {
        let mut c = IndexCycler::new();
        c.reset(4);
        c.peek_and_advance();
        c.peek_and_advance();
        c.reset(4);
        assert_eq!(c.peek(), Some(0));
    }

    #[test]
    fn reset_to_shorter_list_never_overflows() {
        let mut c = IndexCycler::new();
        c.reset(5);
        for _ in 0..4 {
            c.peek_and_advance();
        }
        c.reset(2);
        let seq: Vec<_> = (0..4).filter_map(|_| c.peek_and_advance()).collect();
        assert_eq!(seq, vec![0, 1, 0, 1]);
    }

    #[test]
    fn reset_to_empty_sets_sentinel() {
        let mut c = IndexCycler::new();
        c.reset(3);
        c.reset(0);
        assert!(c.is_empty());
        assert_eq!(c.peek_and_advance(), None);
    }
}
