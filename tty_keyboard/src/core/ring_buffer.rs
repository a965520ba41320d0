// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! A fixed-capacity FIFO of raw input bytes, stored inline on the stack. See
//! [`ByteRingBuffer`].

use std::{fmt::{self, Debug},
          ops::Index};

/// Default capacity of the keyboard's byte buffer.
///
/// Terminal input rarely holds more than a handful of escape sequences at a time. 512
/// bytes absorbs a burst (e.g. a paste) without the reader having to drop bytes while
/// the classifier catches up.
pub const FIFO_BUF_SIZE: usize = 512;

/// Errors from [`ByteRingBuffer`] operations that consume bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error, miette::Diagnostic)]
pub enum RingBufferError {
    /// More bytes were requested than the buffer holds.
    #[error("can't pop {requested} bytes from a buffer holding {available}")]
    #[diagnostic(
        code(tty_keyboard::ring_buffer::underflow),
        help("The pop count must come from a prior successful match against the buffer")
    )]
    Underflow { requested: usize, available: usize },
}

/// Fixed-capacity FIFO of bytes with random access, used as the working window for
/// matching escape sequences.
///
/// `N` must be a power of two so that wraparound is a mask rather than a modulo. This
/// is checked at compile time when the buffer is used.
///
/// ```text
/// internal_storage: [ . . c d e . . . a b ]
///                         ▲     ▲       ▲
///                         │     head    tail (oldest byte, index 0)
///                         └── wrapped
/// count = 5, logical contents = "abcde"
/// ```
///
/// - [`push()`] appends at `head`, and is a no-op when the buffer is full.
/// - [`pop()`] removes bytes from `tail`.
/// - [`prefix_equals()`] compares without consuming.
///
/// [`pop()`]: Self::pop
/// [`prefix_equals()`]: Self::prefix_equals
/// [`push()`]: Self::push
#[derive(Clone, PartialEq, Eq)]
pub struct ByteRingBuffer<const N: usize> {
    internal_storage: [u8; N],
    head: usize,
    tail: usize,
    count: usize,
}

impl<const N: usize> Default for ByteRingBuffer<N> {
    fn default() -> Self { Self::new() }
}

impl<const N: usize> Debug for ByteRingBuffer<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let escaped: String = self
            .iter()
            .flat_map(std::ascii::escape_default)
            .map(char::from)
            .collect();
        f.debug_struct("ByteRingBuffer")
            .field("capacity", &N)
            .field("len", &self.count)
            .field("bytes", &escaped)
            .finish()
    }
}

impl<const N: usize> ByteRingBuffer<N> {
    const MASK: usize = {
        assert!(N.is_power_of_two(), "ByteRingBuffer capacity must be a power of two");
        N - 1
    };

    #[must_use]
    pub const fn new() -> Self {
        Self {
            internal_storage: [0; N],
            head: 0,
            tail: 0,
            count: 0,
        }
    }

    #[must_use]
    pub const fn capacity(&self) -> usize { N }

    #[must_use]
    pub const fn len(&self) -> usize { self.count }

    #[must_use]
    pub const fn is_empty(&self) -> bool { self.count == 0 }

    #[must_use]
    pub const fn has_data(&self) -> bool { self.count > 0 }

    #[must_use]
    pub const fn is_full(&self) -> bool { self.count == N }

    /// Append a byte. Returns `false` (and leaves the buffer untouched) when full, so
    /// callers that care should check [`Self::is_full`] first.
    pub fn push(&mut self, byte: u8) -> bool {
        if self.is_full() {
            return false;
        }
        self.internal_storage[self.head] = byte;
        self.head = (self.head + 1) & Self::MASK;
        self.count += 1;
        true
    }

    /// Remove the first `count` bytes.
    ///
    /// # Errors
    ///
    /// Returns [`RingBufferError::Underflow`] if `count` exceeds [`Self::len`]. The
    /// buffer is not modified in that case.
    pub fn pop(&mut self, count: usize) -> Result<(), RingBufferError> {
        if count > self.count {
            return Err(RingBufferError::Underflow {
                requested: count,
                available: self.count,
            });
        }
        self.tail = (self.tail + count) & Self::MASK;
        self.count -= count;
        Ok(())
    }

    /// The oldest byte, if any.
    #[must_use]
    pub fn front(&self) -> Option<u8> { self.get(0) }

    /// The newest byte, if any.
    #[must_use]
    pub fn back(&self) -> Option<u8> { self.count.checked_sub(1).and_then(|it| self.get(it)) }

    /// The byte at logical position `index` (0 is the oldest byte).
    #[must_use]
    pub fn get(&self, index: usize) -> Option<u8> {
        if index >= self.count {
            return None;
        }
        Some(self.internal_storage[(self.tail + index) & Self::MASK])
    }

    /// Returns `true` if the buffer starts with `bytes`. Never mutates the buffer.
    #[must_use]
    pub fn prefix_equals(&self, bytes: &[u8]) -> bool {
        bytes.len() <= self.count && self.iter().zip(bytes).all(|(lhs, rhs)| lhs == *rhs)
    }

    /// Logical position of the first byte matching `predicate`.
    #[must_use]
    pub fn position(&self, predicate: impl Fn(u8) -> bool) -> Option<usize> {
        self.iter().position(predicate)
    }

    pub fn clear(&mut self) {
        self.head = 0;
        self.tail = 0;
        self.count = 0;
    }

    #[must_use]
    pub fn iter(&self) -> ByteRingBufferIterator<'_, N> {
        ByteRingBufferIterator {
            ring_buffer: self,
            iterator_index: 0,
        }
    }
}

impl<const N: usize> Index<usize> for ByteRingBuffer<N> {
    type Output = u8;

    /// # Panics
    ///
    /// Panics if `index` is out of range, like slice indexing.
    fn index(&self, index: usize) -> &Self::Output {
        assert!(
            index < self.count,
            "index {index} out of range for ByteRingBuffer of length {}",
            self.count
        );
        &self.internal_storage[(self.tail + index) & Self::MASK]
    }
}

/// This implementation allows the ring buffer to be used in a for loop directly.
impl<'a, const N: usize> IntoIterator for &'a ByteRingBuffer<N> {
    type Item = u8;
    type IntoIter = ByteRingBufferIterator<'a, N>;

    fn into_iter(self) -> Self::IntoIter { self.iter() }
}

#[derive(Debug)]
pub struct ByteRingBufferIterator<'a, const N: usize> {
    ring_buffer: &'a ByteRingBuffer<N>,
    iterator_index: usize,
}

impl<const N: usize> Iterator for ByteRingBufferIterator<'_, N> {
    type Item = u8;

    fn next(&mut self) -> Option<Self::Item> {
        let byte = self.ring_buffer.get(self.iterator_index)?;
        self.iterator_index += 1;
        Some(byte)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.ring_buffer.len() - self.iterator_index;
        (remaining, Some(remaining))
    }
}

impl<const N: usize> ExactSizeIterator for ByteRingBufferIterator<'_, N> {}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn filled<const N: usize>(bytes: &[u8]) -> ByteRingBuffer<N> {
        let mut buffer = ByteRingBuffer::<N>::new();
        for byte in bytes {
            assert!(buffer.push(*byte));
        }
        buffer
    }

    #[test]
    fn test_new_buffer_is_empty() {
        let buffer = ByteRingBuffer::<8>::new();
        assert!(buffer.is_empty());
        assert!(!buffer.has_data());
        assert_eq!(buffer.len(), 0);
        assert_eq!(buffer.capacity(), 8);
        assert_eq!(buffer.front(), None);
        assert_eq!(buffer.back(), None);
    }

    #[test]
    fn test_push_and_index() {
        let buffer = filled::<8>(b"\x1b[A");
        assert_eq!(buffer.len(), 3);
        assert_eq!(buffer.front(), Some(0x1b));
        assert_eq!(buffer[1], b'[');
        assert_eq!(buffer.get(2), Some(b'A'));
        assert_eq!(buffer.get(3), None);
        assert_eq!(buffer.back(), Some(b'A'));
    }

    #[test]
    fn test_push_when_full_is_a_no_op() {
        let mut buffer = filled::<4>(b"abcd");
        assert!(buffer.is_full());
        assert!(!buffer.push(b'e'));
        assert_eq!(buffer.iter().collect::<Vec<_>>(), b"abcd".to_vec());
    }

    #[test]
    fn test_pop_removes_from_front() {
        let mut buffer = filled::<8>(b"hello");
        buffer.pop(2).unwrap();
        assert_eq!(buffer.iter().collect::<Vec<_>>(), b"llo".to_vec());
        buffer.pop(0).unwrap();
        assert_eq!(buffer.len(), 3);
    }

    #[test]
    fn test_pop_more_than_len_fails_without_change() {
        let mut buffer = filled::<8>(b"ab");
        assert_eq!(
            buffer.pop(3),
            Err(RingBufferError::Underflow {
                requested: 3,
                available: 2
            })
        );
        assert_eq!(buffer.len(), 2);
        assert_eq!(buffer.front(), Some(b'a'));
    }

    #[test]
    fn test_wraparound_keeps_logical_order() {
        let mut buffer = filled::<4>(b"abc");
        buffer.pop(2).unwrap();
        assert!(buffer.push(b'd'));
        assert!(buffer.push(b'e'));
        assert!(buffer.push(b'f'));
        assert!(buffer.is_full());
        assert_eq!(buffer.iter().collect::<Vec<_>>(), b"cdef".to_vec());
        assert_eq!(buffer[3], b'f');
        assert!(buffer.prefix_equals(b"cde"));
    }

    #[test]
    fn test_prefix_equals_does_not_consume() {
        let buffer = filled::<8>(b"\x1bOP");
        assert!(buffer.prefix_equals(b"\x1bO"));
        assert!(buffer.prefix_equals(b"\x1bOP"));
        assert!(!buffer.prefix_equals(b"\x1bOPQ"));
        assert!(!buffer.prefix_equals(b"\x1b["));
        assert!(buffer.prefix_equals(b""));
        assert_eq!(buffer.len(), 3);
    }

    #[test]
    fn test_clear_resets() {
        let mut buffer = filled::<8>(b"xyz");
        buffer.clear();
        assert!(buffer.is_empty());
        assert!(buffer.push(b'q'));
        assert_eq!(buffer.front(), Some(b'q'));
    }

    #[test]
    fn test_position() {
        let buffer = filled::<16>(b"\x1b[<0;1;2M");
        assert_eq!(buffer.position(|it| it == b'M'), Some(8));
        assert_eq!(buffer.position(|it| it == b'm'), None);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_index_out_of_range_panics() {
        let buffer = filled::<8>(b"a");
        let _unused = buffer[1];
    }

    #[test]
    fn test_debug_escapes_bytes() {
        let buffer = filled::<8>(b"\x1b[A");
        let debug_str = format!("{buffer:?}");
        assert!(debug_str.contains("\\x1b[A"));
    }
}
