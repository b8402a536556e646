//! Base58 alphabet checks for signature and address tokens.
//!
//! Validation is format-only: a token is accepted when every character is in
//! the alphabet. Nothing is decoded.

/// The Bitcoin/Solana base58 alphabet (no `0`, `O`, `I`, `l`).
pub const BASE58_ALPHABET: &str = "123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

/// Whether `ch` belongs to the base58 alphabet.
pub fn is_base58_char(ch: char) -> bool {
    match ch {
        '1'..='9' => true,
        'A'..='Z' => ch != 'I' && ch != 'O',
        'a'..='z' => ch != 'l',
        _ => false,
    }
}

/// Whether every character of `s` is base58. The empty string passes.
pub fn is_base58(s: &str) -> bool {
    s.chars().all(is_base58_char)
}

/// The first character outside the alphabet, with its char position.
pub fn first_invalid(s: &str) -> Option<(usize, char)> {
    s.chars().enumerate().find(|(_, ch)| !is_base58_char(*ch))
}
