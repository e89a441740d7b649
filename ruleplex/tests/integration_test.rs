//! End-to-end scenarios: a small language lexer assembled from struct rules,
//! rule-local state and a typed payload.

use pretty_assertions::assert_eq;
use ruleplex::{
    chars, LexContext, LexState, Lexer, LexerFlags, LexingRule, Token, TokenDraft, TokenKind,
};

const KEYWORD: TokenKind = TokenKind::user(0);
const IDENT: TokenKind = TokenKind::user(1);
const NUMBER: TokenKind = TokenKind::user(2);
const STRING: TokenKind = TokenKind::user(3);
const OPERATOR: TokenKind = TokenKind::user(4);
const NEWLINE: TokenKind = TokenKind::user(5);
const COMMENT: TokenKind = TokenKind::user(6);
const BLANK: TokenKind = TokenKind::user(7);

#[derive(Debug, Default)]
struct Stats {
    lines: usize,
    identifiers: Vec<String>,
}

// Identifier rule with a keyword table
struct WordRule {
    keywords: Vec<&'static str>,
}

impl WordRule {
    fn new() -> Self {
        Self {
            keywords: vec!["let", "if", "else", "fn", "return"],
        }
    }
}

impl<'src> LexingRule<'src, Stats> for WordRule {
    fn quick_check(&self, first_byte: Option<u8>) -> Option<bool> {
        first_byte.map(chars::is_alpha)
    }

    fn try_match(&mut self, state: &mut LexState<'src, Stats>, draft: &mut TokenDraft) -> bool {
        if !chars::is_alpha(state.current()) {
            return false;
        }
        let word = state.consume_while(chars::is_alnum);
        let kind = if self.keywords.iter().any(|k| k.as_bytes() == word) {
            KEYWORD
        } else {
            IDENT
        };
        draft.finish(kind, state);
        true
    }

    fn on_match(&mut self, state: &mut LexState<'src, Stats>, draft: &mut TokenDraft) {
        if draft.kind == IDENT {
            let text = state
                .lexeme(draft.start, draft.length)
                .map(|b| String::from_utf8_lossy(b).into_owned())
                .unwrap_or_default();
            state.user_mut().identifiers.push(text);
        }
    }
}

struct NumberRule;

impl<'src, C> LexingRule<'src, C> for NumberRule {
    fn try_match(&mut self, state: &mut LexState<'src, C>, draft: &mut TokenDraft) -> bool {
        if state.consume_while(chars::is_digit).is_empty() {
            return false;
        }
        // A trailing '.' needs at least one digit after it.
        if state.current() == b'.' && chars::is_digit(state.peek(1)) {
            state.advance();
            state.consume_while(chars::is_digit);
        }
        draft.finish(NUMBER, state);
        true
    }
}

// Double-quoted string; fails on a missing closing quote or a newline.
struct StringRule;

impl<'src, C> LexingRule<'src, C> for StringRule {
    fn try_match(&mut self, state: &mut LexState<'src, C>, draft: &mut TokenDraft) -> bool {
        if state.current() != b'"' {
            return false;
        }
        state.advance();
        loop {
            match state.advance() {
                Some(b'"') => break,
                Some(b'\\') => {
                    state.advance();
                }
                Some(b'\n') | None => return false,
                Some(_) => {}
            }
        }
        draft.finish(STRING, state);
        true
    }
}

// Operators, longest first
struct OperatorRule {
    operators: Vec<&'static str>,
}

impl<'src, C> LexingRule<'src, C> for OperatorRule {
    fn try_match(&mut self, state: &mut LexState<'src, C>, draft: &mut TokenDraft) -> bool {
        let Some(op) = self.operators.iter().find(|op| state.starts_with(op.as_bytes())) else {
            return false;
        };
        state.advance_by(op.len());
        draft.finish(OPERATOR, state);
        true
    }
}

struct CommentRule;

impl<'src, C> LexingRule<'src, C> for CommentRule {
    fn try_match(&mut self, state: &mut LexState<'src, C>, draft: &mut TokenDraft) -> bool {
        if state.current() != b'#' {
            return false;
        }
        state.consume_while(|b| b != b'\n');
        draft.finish(COMMENT, state);
        draft.set_ignorable();
        true
    }
}

struct NewlineRule;

impl<'src> LexingRule<'src, Stats> for NewlineRule {
    fn try_match(&mut self, state: &mut LexState<'src, Stats>, draft: &mut TokenDraft) -> bool {
        if state.current() != b'\n' {
            return false;
        }
        state.advance();
        draft.finish(NEWLINE, state);
        true
    }

    fn on_match(&mut self, state: &mut LexState<'src, Stats>, _draft: &mut TokenDraft) {
        state.user_mut().lines += 1;
    }
}

struct BlankRule;

impl<'src, C> LexingRule<'src, C> for BlankRule {
    fn try_match(&mut self, state: &mut LexState<'src, C>, draft: &mut TokenDraft) -> bool {
        if state.consume_while(|b| b == b' ' || b == b'\t').is_empty() {
            return false;
        }
        draft.finish(BLANK, state);
        draft.set_ignorable();
        true
    }
}

fn language_lexer(source: &str) -> Lexer<'_, Stats> {
    let mut lexer = Lexer::with_context(source.as_bytes(), "main.lang", Stats::default());
    lexer
        .add_rule(CommentRule)
        .add_rule(BlankRule)
        .add_rule(NewlineRule)
        .add_rule(WordRule::new())
        .add_rule(NumberRule)
        .add_rule(StringRule)
        .add_rule(OperatorRule {
            operators: vec!["==", "!=", "=", "+", "-", "(", ")", "{", "}"],
        });
    lexer
}

fn render(tokens: &[Token<'_>]) -> Vec<String> {
    tokens
        .iter()
        .map(|t| {
            let name = match t.kind {
                KEYWORD => "kw",
                IDENT => "id",
                NUMBER => "num",
                STRING => "str",
                OPERATOR => "op",
                NEWLINE => "nl",
                COMMENT => "comment",
                BLANK => "blank",
                TokenKind::ERROR => "error",
                _ => "?",
            };
            format!(
                "{name} {:?} @{}:{}",
                String::from_utf8_lossy(t.lexeme),
                t.line,
                t.column
            )
        })
        .collect()
}

#[test]
fn test_small_program() {
    let source = "let x = 1.5 # the answer\nif x == 2 { return \"ok\" }";
    let mut lexer = language_lexer(source);
    let tokens = lexer.tokenize();

    assert_eq!(
        render(&tokens),
        vec![
            "kw \"let\" @1:1",
            "id \"x\" @1:5",
            "op \"=\" @1:7",
            "num \"1.5\" @1:9",
            "nl \"\\n\" @1:25",
            "kw \"if\" @2:1",
            "id \"x\" @2:4",
            "op \"==\" @2:6",
            "num \"2\" @2:9",
            "op \"{\" @2:11",
            "kw \"return\" @2:13",
            "str \"\\\"ok\\\"\" @2:20",
            "op \"}\" @2:25",
        ]
    );

    let stats = lexer.into_context();
    assert_eq!(stats.lines, 1);
    assert_eq!(stats.identifiers, vec!["x", "x"]);
}

#[test]
fn test_unterminated_string_backtracks() {
    let mut lexer = language_lexer("\"abc\nfn");
    let tokens = lexer.tokenize();
    assert_eq!(
        render(&tokens),
        vec![
            "error \"\\\"\" @1:1",
            "id \"abc\" @1:2",
            "nl \"\\n\" @1:5",
            "kw \"fn\" @2:1",
        ]
    );
}

#[test]
fn test_keep_ignorable_shows_comments() {
    let mut lexer = language_lexer("a # note\n").with_flags(LexerFlags::KEEP_IGNORABLE);
    let tokens = lexer.tokenize();
    assert_eq!(
        render(&tokens),
        vec![
            "id \"a\" @1:1",
            "blank \" \" @1:2",
            "comment \"# note\" @1:3",
            "nl \"\\n\" @1:9",
        ]
    );
    assert!(tokens[1].is_ignorable());
    assert!(!tokens[3].is_ignorable());
}

#[test]
fn test_reset_reuses_rules_and_context() {
    let mut lexer = language_lexer("a\nb\n");
    lexer.tokenize();
    assert_eq!(lexer.context().lines, 2);

    lexer.reset(b"c\n", "second.lang");
    let tokens = lexer.tokenize();
    assert_eq!(render(&tokens), vec!["id \"c\" @1:1", "nl \"\\n\" @1:2"]);
    assert_eq!(tokens[0].filename, "second.lang");
    assert_eq!(lexer.context().lines, 3);
    assert_eq!(lexer.context().identifiers, vec!["a", "b", "c"]);
}

#[test]
fn test_errors_interleave_without_stopping() {
    let mut lexer = language_lexer("x $ y @@ 3");
    let kinds: Vec<_> = lexer.tokenize().iter().map(|t| t.kind).collect();
    assert_eq!(
        kinds,
        vec![
            IDENT,
            TokenKind::ERROR,
            IDENT,
            TokenKind::ERROR,
            TokenKind::ERROR,
            NUMBER
        ]
    );
}
