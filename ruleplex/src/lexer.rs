use crate::context::{LexContext, LexState};
use crate::error::LexError;
use crate::position::Position;
use crate::token::{Token, TokenDraft, TokenFlags, TokenKind};
use crate::traits::{FnRule, LexingRule};
use bitflags::bitflags;
use tracing::{debug, trace, warn};

bitflags! {
    /// Lexer configuration bits.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct LexerFlags: u32 {
        /// Surface ignorable tokens instead of silently consuming them.
        const KEEP_IGNORABLE = 1 << 0;
    }
}

/// Bounds `source` to its first `length` bytes.
///
/// A `length` of zero means "up to the first NUL byte", or the whole slice if
/// it contains none.
pub fn bounded_source(source: &[u8], length: usize) -> Result<&[u8], LexError> {
    if length == 0 {
        let end = source.iter().position(|&b| b == 0).unwrap_or(source.len());
        return Ok(&source[..end]);
    }
    source.get(..length).ok_or(LexError::LengthOutOfBounds {
        length,
        available: source.len(),
    })
}

type RuleBox<'src, C> = Box<dyn LexingRule<'src, C> + 'src>;

/// Outcome of one pass over the rule registry.
enum Pass<'src> {
    Emit(Token<'src>),
    Skip,
    Exhausted,
}

/// A lexer that applies rules in registration order.
///
/// `C` is the caller's payload. The engine stores it and hands it to rules
/// but never looks inside.
pub struct Lexer<'src, C = ()> {
    state: LexState<'src, C>,
    rules: Vec<RuleBox<'src, C>>,
    error: Option<LexError>,
    flags: LexerFlags,
}

impl<'src> Lexer<'src, ()> {
    /// Creates a lexer over `source` with no payload and no rules.
    pub fn new(source: &'src [u8], filename: &'src str) -> Self {
        Self::with_context(source, filename, ())
    }

    pub fn from_str(source: &'src str, filename: &'src str) -> Self {
        Self::new(source.as_bytes(), filename)
    }

    /// Creates a lexer over the first `length` bytes of `source`, with the
    /// zero-length convention of [`bounded_source`].
    pub fn with_length(
        source: &'src [u8],
        length: usize,
        filename: &'src str,
    ) -> Result<Self, LexError> {
        Ok(Self::new(bounded_source(source, length)?, filename))
    }
}

impl<'src, C> Lexer<'src, C> {
    /// Creates a lexer carrying the given payload.
    pub fn with_context(source: &'src [u8], filename: &'src str, context: C) -> Self {
        Self {
            state: LexState::new(source, filename, context),
            rules: Vec::new(),
            error: None,
            flags: LexerFlags::empty(),
        }
    }

    /// Creates a lexer carrying the given payload over the first `length`
    /// bytes of `source`, with the zero-length convention of
    /// [`bounded_source`].
    pub fn with_context_and_length(
        source: &'src [u8],
        length: usize,
        filename: &'src str,
        context: C,
    ) -> Result<Self, LexError> {
        Ok(Self::with_context(
            bounded_source(source, length)?,
            filename,
            context,
        ))
    }

    pub fn with_flags(mut self, flags: LexerFlags) -> Self {
        self.flags = flags;
        self
    }

    pub fn flags(&self) -> LexerFlags {
        self.flags
    }

    pub fn set_flags(&mut self, flags: LexerFlags) {
        self.flags = flags;
    }

    /// Appends a rule. Rules registered earlier take priority.
    pub fn add_rule<R>(&mut self, rule: R) -> &mut Self
    where
        R: LexingRule<'src, C> + 'src,
    {
        self.rules.push(Box::new(rule));
        self
    }

    /// Appends a rule made from a matcher closure with no action.
    pub fn add_fn<M>(&mut self, matcher: M) -> &mut Self
    where
        M: FnMut(&mut LexState<'src, C>, &mut TokenDraft) -> bool + 'src,
        C: 'src,
    {
        self.add_rule(FnRule::new(matcher))
    }

    /// Appends a rule made from a matcher closure and an action closure.
    pub fn add_fn_with_action<M, A>(&mut self, matcher: M, action: A) -> &mut Self
    where
        M: FnMut(&mut LexState<'src, C>, &mut TokenDraft) -> bool + 'src,
        A: FnMut(&mut LexState<'src, C>, &mut TokenDraft) + 'src,
        C: 'src,
    {
        self.add_rule(FnRule::new(matcher).with_action(action))
    }

    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Returns the caller's payload.
    pub fn context(&self) -> &C {
        self.state.user()
    }

    pub fn context_mut(&mut self) -> &mut C {
        self.state.user_mut()
    }

    pub fn into_context(self) -> C {
        self.state.into_user()
    }

    /// Returns the state rules operate on.
    pub fn state(&self) -> &LexState<'src, C> {
        &self.state
    }

    /// Returns the error recorded by the most recent error token, if no
    /// rule has matched since.
    pub fn error(&self) -> Option<&LexError> {
        self.error.as_ref()
    }

    pub fn source(&self) -> &'src [u8] {
        self.state.cursor().source()
    }

    pub fn filename(&self) -> &'src str {
        self.state.filename()
    }

    pub fn position(&self) -> Position {
        self.state.position()
    }

    pub fn offset(&self) -> usize {
        self.state.offset()
    }

    pub fn line(&self) -> usize {
        self.state.line()
    }

    pub fn column(&self) -> usize {
        self.state.column()
    }

    pub fn is_eof(&self) -> bool {
        self.state.is_eof()
    }

    pub fn current(&self) -> u8 {
        self.state.current()
    }

    pub fn peek(&self, offset: usize) -> u8 {
        self.state.peek(offset)
    }

    pub fn advance(&mut self) -> Option<u8> {
        self.state.advance()
    }

    pub fn lexeme(&self, start: usize, len: usize) -> Option<&'src [u8]> {
        self.state.lexeme(start, len)
    }

    /// Points the lexer at a new buffer and rewinds to line 1, column 1.
    ///
    /// Rules, payload, flags and the error slot are kept.
    pub fn reset(&mut self, source: &'src [u8], filename: &'src str) {
        self.state.reset(source, filename);
    }

    /// Like [`Lexer::reset`], bounding the buffer as [`bounded_source`] does.
    /// On error the lexer is left untouched.
    pub fn reset_with_length(
        &mut self,
        source: &'src [u8],
        length: usize,
        filename: &'src str,
    ) -> Result<(), LexError> {
        self.reset(bounded_source(source, length)?, filename);
        Ok(())
    }

    /// Produces the next token.
    ///
    /// Rules are tried in registration order from a checkpoint; a failing
    /// rule has the cursor restored before the next one runs. Ignorable
    /// tokens are consumed and the search starts over from the new position
    /// unless [`LexerFlags::KEEP_IGNORABLE`] is set. When no rule matches,
    /// one byte is consumed and returned as a [`TokenKind::ERROR`] token.
    /// At end of input every call returns a [`TokenKind::EOF`] token.
    #[tracing::instrument(level = "trace", skip_all)]
    pub fn next_token(&mut self) -> Token<'src> {
        if self.state.is_eof() {
            return self.eof_token();
        }

        loop {
            match self.rule_pass() {
                Pass::Emit(token) => {
                    self.error = None;
                    return token;
                }
                Pass::Skip => continue,
                Pass::Exhausted => break,
            }
        }

        if self.state.is_eof() {
            return self.eof_token();
        }
        self.error_token()
    }

    /// Collects every token up to, but not including, end of input.
    pub fn tokenize(&mut self) -> Vec<Token<'src>> {
        self.collect()
    }

    fn rule_pass(&mut self) -> Pass<'src> {
        let Self {
            state,
            rules,
            flags,
            ..
        } = self;

        let checkpoint = state.checkpoint();
        let start = checkpoint.position();
        let first_byte = (!state.is_eof()).then(|| state.current());
        let keep_ignorable = flags.contains(LexerFlags::KEEP_IGNORABLE);

        for (index, rule) in rules.iter_mut().enumerate() {
            if let Some(false) = rule.quick_check(first_byte) {
                continue;
            }

            let mut draft = TokenDraft::at(start.offset, start.line, start.column);
            if !rule.try_match(state, &mut draft) {
                state.restore(checkpoint);
                continue;
            }
            rule.on_match(state, &mut draft);

            if draft.is_ignorable() && !keep_ignorable {
                if state.offset() == start.offset {
                    // Skipping would not consume anything; treat as no match.
                    warn!(
                        rule = index,
                        offset = start.offset,
                        "zero-width ignorable match skipped"
                    );
                    state.restore(checkpoint);
                    continue;
                }
                trace!(rule = index, from = start.offset, to = state.offset(), "skip ignorable");
                return Pass::Skip;
            }

            trace!(rule = index, kind = draft.kind.raw(), at = %start, "matched");
            let lexeme = state
                .lexeme(draft.start, draft.length)
                .unwrap_or_default();
            return Pass::Emit(Token::new(
                draft.kind,
                lexeme,
                draft.line,
                draft.column,
                state.filename(),
                draft.flags,
            ));
        }

        Pass::Exhausted
    }

    fn eof_token(&self) -> Token<'src> {
        Token::new(
            TokenKind::EOF,
            self.state.remaining(),
            self.state.line(),
            self.state.column(),
            self.state.filename(),
            TokenFlags::empty(),
        )
    }

    fn error_token(&mut self) -> Token<'src> {
        let position = self.state.position();
        let byte = self.state.current();
        let lexeme = self.state.lexeme(position.offset, 1).unwrap_or_default();
        let token = Token::new(
            TokenKind::ERROR,
            lexeme,
            position.line,
            position.column,
            self.state.filename(),
            TokenFlags::empty(),
        );

        debug!(byte, at = %position, "no rule matched");
        self.error = Some(LexError::UnexpectedByte {
            byte,
            line: position.line,
            column: position.column,
        });
        self.state.advance();
        token
    }
}

/// Make Lexer implement Iterator for stream-like processing.
/// Yields tokens until end of input; the EOF token itself is not yielded.
///
/// A token that consumed no input ends the iteration, since the next call
/// would produce it again from the same position.
impl<'src, C> Iterator for Lexer<'src, C> {
    type Item = Token<'src>;

    fn next(&mut self) -> Option<Self::Item> {
        let offset_before = self.state.offset();
        let token = self.next_token();
        if token.is_eof() {
            return None;
        }
        if self.state.offset() == offset_before {
            warn!(
                offset = offset_before,
                kind = token.kind.raw(),
                "no progress made; stopping iteration"
            );
            return None;
        }
        Some(token)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        // Every yielded token consumes at least one byte.
        let remaining = self.state.remaining().len();
        (0, Some(remaining))
    }
}

impl<C: std::fmt::Debug> std::fmt::Debug for Lexer<'_, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Lexer")
            .field("state", &self.state)
            .field("rules", &self.rules.len())
            .field("error", &self.error)
            .field("flags", &self.flags)
            .finish()
    }
}
