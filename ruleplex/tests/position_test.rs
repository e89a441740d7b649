use pretty_assertions::assert_eq;
use ruleplex::{chars, LexContext, Lexer, Position, TokenKind};

const WORD: TokenKind = TokenKind::user(0);

fn word_lexer(source: &str) -> Lexer<'_> {
    let mut lexer = Lexer::from_str(source, "pos.txt");
    lexer.add_fn(|state, draft| {
        if state.consume_while(chars::is_alnum).is_empty() {
            return false;
        }
        draft.finish(WORD, state);
        true
    });
    lexer.add_fn(|state, draft| {
        if state.consume_while(chars::is_space).is_empty() {
            return false;
        }
        draft.finish(TokenKind::user(1), state);
        draft.set_ignorable();
        true
    });
    lexer
}

#[test]
fn test_position_default() {
    assert_eq!(Position::default(), Position::new());
}

#[test]
fn test_token_positions_across_lines() {
    let lexer = word_lexer("abc def\n  ghi\n\njkl");
    let positions: Vec<_> = lexer
        .map(|t| (t.text().unwrap_or_default().to_owned(), t.line, t.column))
        .collect();

    assert_eq!(
        positions,
        vec![
            ("abc".to_owned(), 1, 1),
            ("def".to_owned(), 1, 5),
            ("ghi".to_owned(), 2, 3),
            ("jkl".to_owned(), 4, 1),
        ]
    );
}

#[test]
fn test_eof_position_after_trailing_newline() {
    let mut lexer = word_lexer("ab\n");
    assert_eq!(lexer.next_token().kind, WORD);
    let eof = lexer.next_token();
    assert!(eof.is_eof());
    assert_eq!((eof.line, eof.column), (2, 1));
    assert_eq!(lexer.position(), Position::at(2, 1, 3));
}

#[test]
fn test_tokens_carry_filename() {
    let mut lexer = word_lexer("x");
    assert_eq!(lexer.next_token().filename, "pos.txt");
    assert_eq!(lexer.next_token().filename, "pos.txt");
}
