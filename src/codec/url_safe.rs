//! URL-safe remapping of standard base64.
//!
//! `+` becomes `-`, `/` becomes `_` and trailing `=` padding is dropped.
//! Decoding reverses the substitution and restores padding from the length:
//!
//! | `len % 4` | padding |
//! |-----------|---------|
//! | 0         | none    |
//! | 2         | `==`    |
//! | 3         | `=`     |
//! | 1         | invalid |

use crate::error::DecodeError;

/// Convert standard base64 to the URL-safe, unpadded form.
pub fn encode(standard: &str) -> String {
    standard
        .trim_end_matches('=')
        .chars()
        .map(|c| match c {
            '+' => '-',
            '/' => '_',
            c => c,
        })
        .collect()
}

/// Convert a URL-safe string back to padded standard base64.
pub fn decode(url_safe: &str) -> Result<String, DecodeError> {
    let mut standard = String::with_capacity(url_safe.len() + 2);
    for (position, character) in url_safe.chars().enumerate() {
        let mapped = match character {
            'A'..='Z' | 'a'..='z' | '0'..='9' => character,
            '-' => '+',
            '_' => '/',
            _ => {
                return Err(DecodeError::InvalidCharacter {
                    character,
                    position,
                })
            },
        };
        standard.push(mapped);
    }

    // All characters are ASCII past this point, so byte length == char count.
    let padding = match standard.len() % 4 {
        0 => 0,
        2 => 2,
        3 => 1,
        _ => return Err(DecodeError::InvalidLength(standard.len())),
    };
    standard.extend(std::iter::repeat('=').take(padding));
    Ok(standard)
}

/// Check that every character is in `[A-Za-z0-9-_]`.
pub fn is_url_safe(s: &str) -> bool {
    s.bytes()
        .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
}
