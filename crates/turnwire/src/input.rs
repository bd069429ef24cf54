//! Parsing of console input into user intents.
//!
//! Bad input is rejected here, before anything is encoded, so a typo
//! never reaches the server.

/// Why a line of user input was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    /// Nothing but whitespace was entered.
    #[error("input is empty")]
    Empty,

    /// The input is not a number in `0..=255`.
    #[error("'{0}' is not a move number (0-255)")]
    NotANumber(String),
}

/// Parses a move such as `"2"` or `" 3 \n"`.
pub fn parse_move(input: &str) -> Result<u8, InputError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(InputError::Empty);
    }
    trimmed
        .parse()
        .map_err(|_| InputError::NotANumber(trimmed.to_string()))
}

/// Parses a user name: surrounding whitespace is dropped, empty names are
/// rejected.
pub fn parse_user_name(input: &str) -> Result<String, InputError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(InputError::Empty);
    }
    Ok(trimmed.to_string())
}
