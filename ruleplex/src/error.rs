use thiserror::Error;

/// Errors reported by the lexer.
///
/// Unmatched input never interrupts tokenization: it is reported as an
/// error token and recorded in the lexer's error slot as
/// [`LexError::UnexpectedByte`]. Only construction and reset with an
/// explicit length can fail outright.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LexError {
    /// The filename is not stored; [`Lexer::filename`](crate::Lexer::filename)
    /// still names the buffer the error came from.
    #[error("{line}:{column}: unexpected byte 0x{byte:02x}")]
    UnexpectedByte { byte: u8, line: usize, column: usize },

    #[error("source length {length} exceeds buffer of {available} bytes")]
    LengthOutOfBounds { length: usize, available: usize },
}

impl LexError {
    /// Line of the offending input, if the error has a location.
    pub fn line(&self) -> Option<usize> {
        match self {
            LexError::UnexpectedByte { line, .. } => Some(*line),
            LexError::LengthOutOfBounds { .. } => None,
        }
    }

    /// Column of the offending input, if the error has a location.
    pub fn column(&self) -> Option<usize> {
        match self {
            LexError::UnexpectedByte { column, .. } => Some(*column),
            LexError::LengthOutOfBounds { .. } => None,
        }
    }
}
