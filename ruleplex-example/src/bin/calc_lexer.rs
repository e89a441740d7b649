//! Calculator lexer example.
//! Demonstrates defining arithmetic tokens and rules with ruleplex.

use ruleplex::{chars, LexContext, LexState, Lexer, LexingRule, TokenDraft, TokenKind};
use ruleplex_example::{describe, init_tracing};

const NUMBER: TokenKind = TokenKind::user(0);
const PLUS: TokenKind = TokenKind::user(1);
const MINUS: TokenKind = TokenKind::user(2);
const MULTIPLY: TokenKind = TokenKind::user(3);
const DIVIDE: TokenKind = TokenKind::user(4);
const POWER: TokenKind = TokenKind::user(5);
const LEFT_PAREN: TokenKind = TokenKind::user(6);
const RIGHT_PAREN: TokenKind = TokenKind::user(7);
const WHITESPACE: TokenKind = TokenKind::user(8);

fn kind_name(kind: TokenKind) -> &'static str {
    match kind {
        NUMBER => "Number",
        PLUS => "Plus",
        MINUS => "Minus",
        MULTIPLY => "Multiply",
        DIVIDE => "Divide",
        POWER => "Power",
        LEFT_PAREN => "LParen",
        RIGHT_PAREN => "RParen",
        WHITESPACE => "Space",
        TokenKind::ERROR => "Error",
        TokenKind::EOF => "Eof",
        _ => "Unknown",
    }
}

/// Matches decimal numbers such as `12`, `3.14` and `.5`.
struct NumberRule;

impl<'src> LexingRule<'src, ()> for NumberRule {
    fn quick_check(&self, first_byte: Option<u8>) -> Option<bool> {
        first_byte.map(|b| chars::is_digit(b) || b == b'.')
    }

    fn try_match(&mut self, state: &mut LexState<'src, ()>, draft: &mut TokenDraft) -> bool {
        let mut has_digit = !state.consume_while(chars::is_digit).is_empty();

        if state.current() == b'.' {
            state.advance();
            has_digit |= !state.consume_while(chars::is_digit).is_empty();
        }

        // A lone '.' is not a number.
        if !has_digit {
            return false;
        }
        draft.finish(NUMBER, state);
        true
    }
}

/// Matches single-byte operators and parentheses.
struct OperatorRule;

impl<'src> LexingRule<'src, ()> for OperatorRule {
    fn try_match(&mut self, state: &mut LexState<'src, ()>, draft: &mut TokenDraft) -> bool {
        let kind = match state.current() {
            b'+' => PLUS,
            b'-' => MINUS,
            b'*' => MULTIPLY,
            b'/' => DIVIDE,
            b'^' => POWER,
            b'(' => LEFT_PAREN,
            b')' => RIGHT_PAREN,
            _ => return false,
        };
        state.advance();
        draft.finish(kind, state);
        true
    }
}

/// Matches whitespace; the action marks it ignorable.
struct WhitespaceRule;

impl<'src> LexingRule<'src, ()> for WhitespaceRule {
    fn try_match(&mut self, state: &mut LexState<'src, ()>, draft: &mut TokenDraft) -> bool {
        if state.consume_while(chars::is_space).is_empty() {
            return false;
        }
        draft.finish(WHITESPACE, state);
        true
    }

    fn on_match(&mut self, _state: &mut LexState<'src, ()>, draft: &mut TokenDraft) {
        draft.set_ignorable();
    }
}

fn main() {
    init_tracing();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let expressions: Vec<&str> = if args.is_empty() {
        vec!["12 + 3", "2 * 3.14", "(1 + 2) * 3", "2 ^ 8", "10 / 2.5", "1 @ 2"]
    } else {
        args.iter().map(String::as_str).collect()
    };

    for expr in expressions {
        println!("Expression: {}", expr);

        let mut lexer = Lexer::from_str(expr, "<expr>");
        lexer
            .add_rule(NumberRule)
            .add_rule(OperatorRule)
            .add_rule(WhitespaceRule);

        println!("Tokens:");
        loop {
            let token = lexer.next_token();
            println!("  {}", describe(kind_name(token.kind), &token));
            if token.is_error() {
                if let Some(error) = lexer.error() {
                    println!("  ! {}:{}", lexer.filename(), error);
                }
            }
            if token.is_eof() {
                break;
            }
        }
        println!();
    }
}
