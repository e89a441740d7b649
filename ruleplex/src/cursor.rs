use crate::position::Position;

/// Byte returned by [`Cursor::current`] and [`Cursor::peek`] past the end of
/// the input.
pub const SENTINEL: u8 = 0;

/// A cursor for traversing a borrowed source buffer during lexing.
///
/// [`Cursor::advance`] is the only place that moves the cursor forward, so
/// line and column stay consistent with the byte offset no matter how a rule
/// consumes its input.
#[derive(Debug, Clone)]
pub struct Cursor<'src> {
    source: &'src [u8],
    position: Position,
}

impl<'src> Cursor<'src> {
    /// Creates a cursor at the start of `source`.
    pub fn new(source: &'src [u8]) -> Self {
        Self {
            source,
            position: Position::new(),
        }
    }

    /// Returns the full buffer being scanned.
    pub fn source(&self) -> &'src [u8] {
        self.source
    }

    /// Returns the length of the buffer in bytes.
    pub fn len(&self) -> usize {
        self.source.len()
    }

    /// Returns true if the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.source.is_empty()
    }

    /// Returns the current position in the source.
    pub fn position(&self) -> Position {
        self.position
    }

    /// Returns the current offset in bytes.
    pub fn offset(&self) -> usize {
        self.position.offset
    }

    pub fn line(&self) -> usize {
        self.position.line
    }

    pub fn column(&self) -> usize {
        self.position.column
    }

    /// Returns true if the cursor is at the end of the input.
    pub fn is_eof(&self) -> bool {
        self.position.offset >= self.source.len()
    }

    /// Returns the byte under the cursor, or [`SENTINEL`] at end of input.
    pub fn current(&self) -> u8 {
        self.peek(0)
    }

    /// Returns the byte `offset` bytes ahead of the cursor, or [`SENTINEL`]
    /// if that lies at or past the end of input.
    pub fn peek(&self, offset: usize) -> u8 {
        self.position
            .offset
            .checked_add(offset)
            .and_then(|index| self.source.get(index))
            .copied()
            .unwrap_or(SENTINEL)
    }

    /// Returns up to `n` bytes starting at the cursor without advancing.
    pub fn peek_slice(&self, n: usize) -> &'src [u8] {
        let rest = self.remaining();
        &rest[..n.min(rest.len())]
    }

    /// Returns true if the unconsumed input begins with `prefix`.
    pub fn starts_with(&self, prefix: &[u8]) -> bool {
        self.remaining().starts_with(prefix)
    }

    /// Advances the cursor by one byte.
    ///
    /// Does nothing at end of input. A consumed `\n` moves to the first
    /// column of the next line; any other byte moves one column right.
    pub fn advance(&mut self) -> Option<u8> {
        let byte = *self.source.get(self.position.offset)?;
        self.position.step(byte);
        Some(byte)
    }

    /// Advances the cursor by up to `n` bytes, returning how many were consumed.
    pub fn advance_by(&mut self, n: usize) -> usize {
        let mut count = 0;
        for _ in 0..n {
            if self.advance().is_none() {
                break;
            }
            count += 1;
        }
        count
    }

    /// Consumes bytes while the predicate returns true.
    pub fn consume_while<F>(&mut self, mut predicate: F) -> &'src [u8]
    where
        F: FnMut(u8) -> bool,
    {
        let start = self.position.offset;
        while !self.is_eof() && predicate(self.current()) {
            self.advance();
        }
        &self.source[start..self.position.offset]
    }

    /// Returns the remaining input from the current position.
    pub fn remaining(&self) -> &'src [u8] {
        self.source.get(self.position.offset..).unwrap_or_default()
    }

    /// Returns the window of `len` bytes starting at `start`.
    ///
    /// Returns `None` if `start` is at or past the end of the buffer. A
    /// window reaching past the end is clamped to it.
    pub fn lexeme(&self, start: usize, len: usize) -> Option<&'src [u8]> {
        if start >= self.source.len() {
            return None;
        }
        let end = start.saturating_add(len).min(self.source.len());
        Some(&self.source[start..end])
    }

    /// Points the cursor at a new buffer and rewinds to its start.
    pub fn reset(&mut self, source: &'src [u8]) {
        self.source = source;
        self.position = Position::new();
    }

    /// Creates a checkpoint that can be restored later.
    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            position: self.position,
        }
    }

    /// Restores the cursor to a previous checkpoint.
    pub fn restore(&mut self, checkpoint: Checkpoint) {
        self.position = checkpoint.position;
    }
}

/// A saved cursor location, used to roll back after a failed rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Checkpoint {
    position: Position,
}

impl Checkpoint {
    /// Returns the position stored in this checkpoint.
    pub fn position(&self) -> Position {
        self.position
    }

    /// Returns the byte offset stored in this checkpoint.
    pub fn offset(&self) -> usize {
        self.position.offset
    }
}
