//! Tokens and the draft that rules fill in while matching.

use crate::context::LexContext;
use bitflags::bitflags;

/// An opaque token tag.
///
/// The engine reserves [`TokenKind::EOF`] and [`TokenKind::ERROR`]. Every
/// other value belongs to the caller's rule set, typically declared as
/// constants starting at [`TokenKind::FIRST_USER`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct TokenKind(pub u32);

impl TokenKind {
    /// End of input. Returned on every call once the input is exhausted.
    pub const EOF: TokenKind = TokenKind(0);
    /// A single byte no rule could match.
    pub const ERROR: TokenKind = TokenKind(1);
    /// First value free for caller-defined kinds.
    pub const FIRST_USER: u32 = 2;

    /// Creates the `n`th caller-defined kind.
    pub const fn user(n: u32) -> Self {
        TokenKind(Self::FIRST_USER + n)
    }

    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Returns true for the two engine-reserved kinds.
    pub const fn is_reserved(self) -> bool {
        self.0 < Self::FIRST_USER
    }
}

bitflags! {
    /// Per-token flag bits.
    ///
    /// Only [`TokenFlags::IGNORE`] has meaning to the engine. Other bits are
    /// carried through untouched for the caller's own use.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct TokenFlags: u32 {
        /// Drop this token from the stream unless the lexer keeps ignorable tokens.
        const IGNORE = 1 << 0;
    }
}

/// One lexical unit.
///
/// The lexeme borrows from the source buffer the lexer was scanning when the
/// token was produced; tokens never own text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'src> {
    pub kind: TokenKind,
    pub lexeme: &'src [u8],
    pub filename: &'src str,
    /// 1-based line of the first byte.
    pub line: usize,
    /// 1-based column of the first byte.
    pub column: usize,
    pub flags: TokenFlags,
}

impl<'src> Token<'src> {
    /// Builds a token from its parts. No validation is performed.
    pub fn new(
        kind: TokenKind,
        lexeme: &'src [u8],
        line: usize,
        column: usize,
        filename: &'src str,
        flags: TokenFlags,
    ) -> Self {
        Self {
            kind,
            lexeme,
            filename,
            line,
            column,
            flags,
        }
    }

    /// Length of the lexeme in bytes.
    pub fn len(&self) -> usize {
        self.lexeme.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lexeme.is_empty()
    }

    /// The lexeme as text, if it is valid UTF-8.
    pub fn text(&self) -> Option<&'src str> {
        std::str::from_utf8(self.lexeme).ok()
    }

    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::EOF
    }

    pub fn is_error(&self) -> bool {
        self.kind == TokenKind::ERROR
    }

    pub fn is_ignorable(&self) -> bool {
        self.flags.contains(TokenFlags::IGNORE)
    }
}

/// The candidate token a rule fills in while matching.
///
/// Before each rule attempt the engine points the draft at the checkpoint:
/// its span starts at the checkpoint offset with zero length, and its line
/// and column are those of the checkpoint. A successful matcher is expected
/// to set the kind and extend the span over what it consumed, usually with
/// [`TokenDraft::finish`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TokenDraft {
    pub kind: TokenKind,
    /// Byte offset of the lexeme in the source buffer.
    pub start: usize,
    pub length: usize,
    pub line: usize,
    pub column: usize,
    pub flags: TokenFlags,
}

impl TokenDraft {
    pub(crate) fn at(start: usize, line: usize, column: usize) -> Self {
        Self {
            kind: TokenKind::default(),
            start,
            length: 0,
            line,
            column,
            flags: TokenFlags::empty(),
        }
    }

    /// Sets the kind and stretches the span up to the cursor's offset.
    pub fn finish<'src>(&mut self, kind: TokenKind, ctx: &impl LexContext<'src>) {
        self.kind = kind;
        self.length = ctx.offset().saturating_sub(self.start);
    }

    pub fn set_kind(&mut self, kind: TokenKind) {
        self.kind = kind;
    }

    pub fn set_span(&mut self, start: usize, length: usize) {
        self.start = start;
        self.length = length;
    }

    /// Marks the token to be dropped from the stream.
    pub fn set_ignorable(&mut self) {
        self.flags.insert(TokenFlags::IGNORE);
    }

    pub fn is_ignorable(&self) -> bool {
        self.flags.contains(TokenFlags::IGNORE)
    }
}
