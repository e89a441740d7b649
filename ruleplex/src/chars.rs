//! Byte classification helpers for writing matchers.

/// `0`-`9`.
pub fn is_digit(byte: u8) -> bool {
    byte.is_ascii_digit()
}

/// ASCII letters and `_`.
pub fn is_alpha(byte: u8) -> bool {
    byte.is_ascii_alphabetic() || byte == b'_'
}

/// [`is_alpha`] or [`is_digit`].
pub fn is_alnum(byte: u8) -> bool {
    is_alpha(byte) || is_digit(byte)
}

/// Space, newline, tab, backspace, carriage return and vertical tab.
///
/// Form feed is deliberately not included.
pub fn is_space(byte: u8) -> bool {
    matches!(byte, b' ' | b'\n' | b'\t' | 0x08 | b'\r' | 0x0b)
}
