//! A rule-driven lexical analysis engine.
//!
//! A [`Lexer`] scans a borrowed byte buffer with an ordered list of
//! [`LexingRule`]s. Each call to [`Lexer::next_token`] tries the rules in
//! registration order from a checkpoint, rolling the cursor back after every
//! rule that fails. The first rule to match produces the token. Tokens flagged
//! [`TokenFlags::IGNORE`] are consumed silently unless
//! [`LexerFlags::KEEP_IGNORABLE`] is set, and bytes no rule recognizes come
//! back one at a time as [`TokenKind::ERROR`] tokens.
//!
//! ```
//! use ruleplex::{chars, LexContext, Lexer, TokenKind};
//!
//! const NUMBER: TokenKind = TokenKind::user(0);
//!
//! let mut lexer = Lexer::from_str("12@3", "input");
//! lexer.add_fn(|state, draft| {
//!     if state.consume_while(chars::is_digit).is_empty() {
//!         return false;
//!     }
//!     draft.finish(NUMBER, state);
//!     true
//! });
//!
//! let kinds: Vec<_> = lexer.map(|token| token.kind).collect();
//! assert_eq!(kinds, [NUMBER, TokenKind::ERROR, NUMBER]);
//! ```

pub mod chars;
pub mod context;
pub mod cursor;
pub mod error;
pub mod lexer;
pub mod position;
pub mod token;
pub mod traits;

pub use context::{LexContext, LexState};
pub use cursor::{Checkpoint, Cursor, SENTINEL};
pub use error::LexError;
pub use lexer::{bounded_source, Lexer, LexerFlags};
pub use position::Position;
pub use token::{Token, TokenDraft, TokenFlags, TokenKind};
pub use traits::{FnRule, LexingRule};
