//! Parsing of user-typed input values.
//!
//! Front ends turn what the user types into the byte latched into IN:
//! - A single character gives its character code: `d` is 100, `5` is 53
//! - Longer input is a number with an optional base prefix: `b11000` is
//!   24, `x20` is 32, `d5` and `123` are decimal

use thiserror::Error;

/// Parse typed input into an 8-bit value.
pub fn parse_input(text: &str) -> Result<u8, InputError> {
    let mut chars = text.chars();
    let first = chars.next().ok_or(InputError::Empty)?;

    if chars.next().is_none() {
        let code = first as u32;
        return u8::try_from(code).map_err(|_| InputError::NotLatin1(first));
    }

    let (radix, digits) = match first {
        'b' | 'B' => (2, &text[1..]),
        'd' | 'D' => (10, &text[1..]),
        'x' | 'X' => (16, &text[1..]),
        c if c.is_ascii_digit() => (10, text),
        c => return Err(InputError::UnknownBase(c)),
    };

    if let Some(bad) = digits.chars().find(|c| !c.is_digit(radix)) {
        return Err(InputError::InvalidDigit { digit: bad, radix });
    }

    let value = u32::from_str_radix(digits, radix)
        .map_err(|_| InputError::OutOfRange(digits.to_string()))?;
    u8::try_from(value).map_err(|_| InputError::OutOfRange(digits.to_string()))
}

/// Errors that can occur while parsing input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("no input given")]
    Empty,

    #[error("'{0}' is not a base; use b, d or x")]
    UnknownBase(char),

    #[error("'{digit}' is not a base-{radix} digit")]
    InvalidDigit { digit: char, radix: u32 },

    #[error("{0} does not fit in a byte")]
    OutOfRange(String),

    #[error("'{0}' has no 8-bit character code")]
    NotLatin1(char),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_character() {
        assert_eq!(parse_input("d"), Ok(100));
        assert_eq!(parse_input("5"), Ok(53));
        assert_eq!(parse_input(" "), Ok(32));
        assert_eq!(parse_input("é"), Ok(0xE9));
    }

    #[test]
    fn test_based_numbers() {
        assert_eq!(parse_input("x20"), Ok(32));
        assert_eq!(parse_input("b11000"), Ok(24));
        assert_eq!(parse_input("d5"), Ok(5));
        assert_eq!(parse_input("123"), Ok(123));
        assert_eq!(parse_input("XfF"), Ok(255));
    }

    #[test]
    fn test_errors() {
        assert_eq!(parse_input(""), Err(InputError::Empty));
        assert_eq!(parse_input("q12"), Err(InputError::UnknownBase('q')));
        assert_eq!(parse_input("b102"), Err(InputError::InvalidDigit { digit: '2', radix: 2 }));
        assert_eq!(parse_input("256"), Err(InputError::OutOfRange("256".to_string())));
        assert_eq!(parse_input("x"), Ok(b'x'));
        assert!(matches!(parse_input("€"), Err(InputError::NotLatin1('€'))));
    }

    #[test]
    fn test_huge_number() {
        assert!(matches!(parse_input("99999999999999"), Err(InputError::OutOfRange(_))));
    }
}
