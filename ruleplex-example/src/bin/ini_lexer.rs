//! INI lexer example.
//!
//! Shows a typed payload driving context-sensitive rules: the text after `=`
//! is lexed as a raw value, and section headers update the current section
//! name that later tokens are reported under.
//!
//! Usage: `ini-lexer [--keep-ignorable] [FILE]`

use ruleplex::{chars, LexContext, LexState, Lexer, LexerFlags, LexingRule, TokenDraft, TokenKind};
use ruleplex_example::{describe, init_tracing};

const SECTION: TokenKind = TokenKind::user(0);
const KEY: TokenKind = TokenKind::user(1);
const EQUALS: TokenKind = TokenKind::user(2);
const VALUE: TokenKind = TokenKind::user(3);
const NEWLINE: TokenKind = TokenKind::user(4);
const COMMENT: TokenKind = TokenKind::user(5);
const BLANK: TokenKind = TokenKind::user(6);

const SAMPLE: &str = "\
; global settings
name = demo

[server]
host = 127.0.0.1   # bind address
port = 8080

[paths]
root=/srv/www
";

#[derive(Debug, Default)]
struct IniState {
    section: String,
    in_value: bool,
    keys: usize,
}

fn kind_name(kind: TokenKind) -> &'static str {
    match kind {
        SECTION => "Section",
        KEY => "Key",
        EQUALS => "Equals",
        VALUE => "Value",
        NEWLINE => "Newline",
        COMMENT => "Comment",
        BLANK => "Blank",
        TokenKind::ERROR => "Error",
        TokenKind::EOF => "Eof",
        _ => "Unknown",
    }
}

/// `;` or `#` up to the end of the line.
struct CommentRule;

impl<'src> LexingRule<'src, IniState> for CommentRule {
    fn quick_check(&self, first_byte: Option<u8>) -> Option<bool> {
        Some(matches!(first_byte, Some(b';' | b'#')))
    }

    fn try_match(&mut self, state: &mut LexState<'src, IniState>, draft: &mut TokenDraft) -> bool {
        if !matches!(state.current(), b';' | b'#') {
            return false;
        }
        state.consume_while(|b| b != b'\n');
        draft.finish(COMMENT, state);
        draft.set_ignorable();
        true
    }
}

/// Spaces and tabs within a line.
struct BlankRule;

impl<'src> LexingRule<'src, IniState> for BlankRule {
    fn try_match(&mut self, state: &mut LexState<'src, IniState>, draft: &mut TokenDraft) -> bool {
        if state.consume_while(|b| b == b' ' || b == b'\t').is_empty() {
            return false;
        }
        draft.finish(BLANK, state);
        draft.set_ignorable();
        true
    }
}

struct NewlineRule;

impl<'src> LexingRule<'src, IniState> for NewlineRule {
    fn try_match(&mut self, state: &mut LexState<'src, IniState>, draft: &mut TokenDraft) -> bool {
        if state.starts_with(b"\r\n") {
            state.advance_by(2);
        } else if state.current() == b'\n' {
            state.advance();
        } else {
            return false;
        }
        draft.finish(NEWLINE, state);
        true
    }

    fn on_match(&mut self, state: &mut LexState<'src, IniState>, _draft: &mut TokenDraft) {
        state.user_mut().in_value = false;
    }
}

/// `[name]`, which fails on a missing `]` so the `[` becomes an error token.
struct SectionRule;

impl<'src> LexingRule<'src, IniState> for SectionRule {
    fn try_match(&mut self, state: &mut LexState<'src, IniState>, draft: &mut TokenDraft) -> bool {
        if state.current() != b'[' {
            return false;
        }
        state.advance();
        state.consume_while(|b| b != b']' && b != b'\n');
        if state.advance() != Some(b']') {
            return false;
        }
        draft.finish(SECTION, state);
        true
    }

    fn on_match(&mut self, state: &mut LexState<'src, IniState>, draft: &mut TokenDraft) {
        let name = state
            .lexeme(draft.start + 1, draft.length.saturating_sub(2))
            .map(|b| String::from_utf8_lossy(b).into_owned())
            .unwrap_or_default();
        state.user_mut().section = name;
    }
}

/// The raw text after `=`, up to a comment or the end of the line, with
/// trailing blanks left out of the lexeme.
struct ValueRule;

impl<'src> LexingRule<'src, IniState> for ValueRule {
    fn try_match(&mut self, state: &mut LexState<'src, IniState>, draft: &mut TokenDraft) -> bool {
        if !state.user().in_value {
            return false;
        }
        let mut last_visible = None;
        while !state.is_eof() && !matches!(state.current(), b'\n' | b'\r' | b';' | b'#') {
            let byte = state.advance();
            if !matches!(byte, Some(b' ' | b'\t')) {
                last_visible = Some(state.checkpoint());
            }
        }
        let Some(last_visible) = last_visible else {
            return false;
        };
        // Give the trailing blanks back to the blank rule.
        state.restore(last_visible);
        draft.finish(VALUE, state);
        true
    }

    fn on_match(&mut self, state: &mut LexState<'src, IniState>, _draft: &mut TokenDraft) {
        state.user_mut().in_value = false;
    }
}

struct KeyRule;

impl<'src> LexingRule<'src, IniState> for KeyRule {
    fn try_match(&mut self, state: &mut LexState<'src, IniState>, draft: &mut TokenDraft) -> bool {
        if state
            .consume_while(|b| chars::is_alnum(b) || b == b'.' || b == b'-')
            .is_empty()
        {
            return false;
        }
        draft.finish(KEY, state);
        true
    }

    fn on_match(&mut self, state: &mut LexState<'src, IniState>, _draft: &mut TokenDraft) {
        state.user_mut().keys += 1;
    }
}

struct EqualsRule;

impl<'src> LexingRule<'src, IniState> for EqualsRule {
    fn try_match(&mut self, state: &mut LexState<'src, IniState>, draft: &mut TokenDraft) -> bool {
        if state.current() != b'=' {
            return false;
        }
        state.advance();
        draft.finish(EQUALS, state);
        true
    }

    fn on_match(&mut self, state: &mut LexState<'src, IniState>, _draft: &mut TokenDraft) {
        state.user_mut().in_value = true;
    }
}

fn main() {
    init_tracing();

    let mut keep_ignorable = false;
    let mut path = None;
    for arg in std::env::args().skip(1) {
        if arg == "--keep-ignorable" {
            keep_ignorable = true;
        } else {
            path = Some(arg);
        }
    }

    let (source, filename) = match &path {
        Some(path) => match std::fs::read(path) {
            Ok(bytes) => (bytes, path.as_str()),
            Err(err) => {
                eprintln!("error: cannot read {path}: {err}");
                std::process::exit(1);
            }
        },
        None => (SAMPLE.as_bytes().to_vec(), "<sample>"),
    };

    let flags = if keep_ignorable {
        LexerFlags::KEEP_IGNORABLE
    } else {
        LexerFlags::empty()
    };
    let mut lexer = Lexer::with_context(&source, filename, IniState::default()).with_flags(flags);
    lexer
        .add_rule(CommentRule)
        .add_rule(BlankRule)
        .add_rule(NewlineRule)
        .add_rule(ValueRule)
        .add_rule(SectionRule)
        .add_rule(KeyRule)
        .add_rule(EqualsRule);

    loop {
        let token = lexer.next_token();
        if token.is_eof() {
            break;
        }
        if token.kind == NEWLINE {
            continue;
        }
        let section = &lexer.context().section;
        println!("[{section}] {}", describe(kind_name(token.kind), &token));
        if token.is_error() {
            if let Some(error) = lexer.error() {
                println!("  ! {}:{error}", lexer.filename());
            }
        }
    }

    let keys = lexer.context().keys;
    tracing::info!(filename, keys, "finished lexing");
    println!("{keys} keys");
}
