use crate::cursor::{Checkpoint, Cursor};
use crate::position::Position;

/// Read/consume access to the source, as seen by lexing rules.
///
/// Implementors only provide the cursor and the filename; everything else
/// is derived from them. Consumption always goes through
/// [`LexContext::advance`], which keeps line and column bookkeeping intact.
pub trait LexContext<'src> {
    /// Returns a reference to the cursor.
    fn cursor(&self) -> &Cursor<'src>;

    /// Returns a mutable reference to the cursor.
    fn cursor_mut(&mut self) -> &mut Cursor<'src>;

    /// Returns the diagnostic filename of the buffer being scanned.
    fn filename(&self) -> &'src str;

    /// Returns the current position.
    fn position(&self) -> Position {
        self.cursor().position()
    }

    fn offset(&self) -> usize {
        self.cursor().offset()
    }

    fn line(&self) -> usize {
        self.cursor().line()
    }

    fn column(&self) -> usize {
        self.cursor().column()
    }

    /// Returns true if at end of input.
    fn is_eof(&self) -> bool {
        self.cursor().is_eof()
    }

    /// Returns the byte under the cursor, or `0` at end of input.
    fn current(&self) -> u8 {
        self.cursor().current()
    }

    /// Returns the byte `offset` ahead of the cursor, or `0` past the end.
    fn peek(&self, offset: usize) -> u8 {
        self.cursor().peek(offset)
    }

    fn peek_slice(&self, n: usize) -> &'src [u8] {
        self.cursor().peek_slice(n)
    }

    fn starts_with(&self, prefix: &[u8]) -> bool {
        self.cursor().starts_with(prefix)
    }

    fn remaining(&self) -> &'src [u8] {
        self.cursor().remaining()
    }

    /// Advances the cursor by one byte and returns it.
    fn advance(&mut self) -> Option<u8> {
        self.cursor_mut().advance()
    }

    fn advance_by(&mut self, n: usize) -> usize {
        self.cursor_mut().advance_by(n)
    }

    /// Consumes bytes while the predicate returns true.
    fn consume_while<F>(&mut self, predicate: F) -> &'src [u8]
    where
        F: FnMut(u8) -> bool,
    {
        self.cursor_mut().consume_while(predicate)
    }

    /// Returns `len` bytes of the source starting at `start`, clamped to the
    /// end of the buffer, or `None` if `start` is out of range.
    fn lexeme(&self, start: usize, len: usize) -> Option<&'src [u8]> {
        self.cursor().lexeme(start, len)
    }

    /// Creates a checkpoint of the current state.
    fn checkpoint(&self) -> Checkpoint {
        self.cursor().checkpoint()
    }

    /// Restores the cursor to a checkpoint.
    fn restore(&mut self, checkpoint: Checkpoint) {
        self.cursor_mut().restore(checkpoint);
    }
}

/// The state a lexer exposes to its rules: the cursor, the filename, and a
/// caller-owned payload of type `C`.
///
/// The engine never inspects the payload. Rules and actions reach it through
/// [`LexState::user`] and [`LexState::user_mut`].
#[derive(Debug)]
pub struct LexState<'src, C> {
    cursor: Cursor<'src>,
    filename: &'src str,
    user: C,
}

impl<'src, C> LexState<'src, C> {
    pub fn new(source: &'src [u8], filename: &'src str, user: C) -> Self {
        Self {
            cursor: Cursor::new(source),
            filename,
            user,
        }
    }

    pub fn user(&self) -> &C {
        &self.user
    }

    pub fn user_mut(&mut self) -> &mut C {
        &mut self.user
    }

    pub fn into_user(self) -> C {
        self.user
    }

    /// Points the state at a new buffer and filename, rewinding to the start.
    /// The payload is kept.
    pub fn reset(&mut self, source: &'src [u8], filename: &'src str) {
        self.cursor.reset(source);
        self.filename = filename;
    }
}

impl<'src> LexState<'src, ()> {
    /// Creates a state with no payload over a string.
    pub fn from_str(source: &'src str) -> Self {
        Self::new(source.as_bytes(), "", ())
    }
}

impl<'src, C> LexContext<'src> for LexState<'src, C> {
    fn cursor(&self) -> &Cursor<'src> {
        &self.cursor
    }

    fn cursor_mut(&mut self) -> &mut Cursor<'src> {
        &mut self.cursor
    }

    fn filename(&self) -> &'src str {
        self.filename
    }
}
