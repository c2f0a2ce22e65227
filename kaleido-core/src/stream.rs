//! Generic single-element lookahead buffer.
//!
//! Both stages of the front end need to inspect the next element of a
//! stream without consuming it: the lexer peeks at characters, the
//! parser peeks at tokens. `Lookahead` wraps any iterator and buffers
//! at most one element; the grammar never needs more than that.

/// Wraps an iterator with one element of lookahead.
pub struct Lookahead<I: Iterator> {
    iter: I,
    buffered: Option<I::Item>,
}

impl<I: Iterator> Lookahead<I> {
    pub fn new(iter: I) -> Self {
        Self {
            iter,
            buffered: None,
        }
    }

    /// Returns a reference to the next element without consuming it.
    ///
    /// Repeated calls return the same element until `next` is called.
    /// Returns `None` once the underlying source is exhausted.
    pub fn peek(&mut self) -> Option<&I::Item> {
        if self.buffered.is_none() {
            self.buffered = self.iter.next();
        }
        self.buffered.as_ref()
    }

    /// Consumes and returns the next element, draining the buffer first.
    pub fn next(&mut self) -> Option<I::Item> {
        match self.buffered.take() {
            Some(element) => Some(element),
            None => self.iter.next(),
        }
    }
}
