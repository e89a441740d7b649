use crate::context::LexState;
use crate::token::TokenDraft;

/// A lexing rule: a matcher plus an optional post-match action.
///
/// Rules are tried in registration order and the first one whose
/// [`try_match`](LexingRule::try_match) succeeds wins. A rule carries its
/// own state in `self`; state shared between rules belongs in the lexer's
/// payload `C`.
pub trait LexingRule<'src, C> {
    /// Attempts to recognize a token at the cursor.
    ///
    /// On success the rule must have consumed its input through the state's
    /// cursor and filled in the draft's kind and span. On failure the engine
    /// restores the cursor to where the attempt began, so partial
    /// consumption is harmless.
    fn try_match(&mut self, state: &mut LexState<'src, C>, draft: &mut TokenDraft) -> bool;

    /// Runs after a successful match.
    ///
    /// May reclassify the draft, set its flags, or update the payload. It
    /// must not rewind the cursor.
    fn on_match(&mut self, state: &mut LexState<'src, C>, draft: &mut TokenDraft) {
        let _ = (state, draft);
    }

    /// Quick check: returns whether this rule might match based on the first byte.
    ///
    /// - `Some(true)`  - This rule might match
    /// - `Some(false)` - This rule definitely won't match; the engine skips it
    /// - `None`        - Unknown, need to try full match
    ///
    /// `first_byte` is `None` at end of input.
    #[inline]
    fn quick_check(&self, first_byte: Option<u8>) -> Option<bool> {
        let _ = first_byte;
        None
    }
}

type MatcherFn<'src, C> = dyn FnMut(&mut LexState<'src, C>, &mut TokenDraft) -> bool + 'src;
type ActionFn<'src, C> = dyn FnMut(&mut LexState<'src, C>, &mut TokenDraft) + 'src;

/// A rule built from a matcher closure and an optional action closure.
pub struct FnRule<'src, C> {
    matcher: Box<MatcherFn<'src, C>>,
    action: Option<Box<ActionFn<'src, C>>>,
}

impl<'src, C> FnRule<'src, C> {
    pub fn new<M>(matcher: M) -> Self
    where
        M: FnMut(&mut LexState<'src, C>, &mut TokenDraft) -> bool + 'src,
    {
        Self {
            matcher: Box::new(matcher),
            action: None,
        }
    }

    pub fn with_action<A>(mut self, action: A) -> Self
    where
        A: FnMut(&mut LexState<'src, C>, &mut TokenDraft) + 'src,
    {
        self.action = Some(Box::new(action));
        self
    }
}

impl<'src, C> LexingRule<'src, C> for FnRule<'src, C> {
    fn try_match(&mut self, state: &mut LexState<'src, C>, draft: &mut TokenDraft) -> bool {
        (self.matcher)(state, draft)
    }

    fn on_match(&mut self, state: &mut LexState<'src, C>, draft: &mut TokenDraft) {
        if let Some(action) = &mut self.action {
            action(state, draft);
        }
    }
}

impl<C> std::fmt::Debug for FnRule<'_, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnRule")
            .field("has_action", &self.action.is_some())
            .finish()
    }
}
