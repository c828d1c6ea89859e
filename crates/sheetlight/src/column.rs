//! Bijective base-26 column names: 1 -> A, 26 -> Z, 27 -> AA, ...

use crate::error::{Error, Result};

const BASE: usize = 26;

/// Column name for a 1-based column number. `0` has no name.
pub fn to_letters(number: usize) -> Option<String> {
    if number == 0 {
        return None;
    }
    let mut letters = Vec::new();
    let mut d = number;
    while d > 0 {
        let r = (d - 1) % BASE;
        d = (d - 1) / BASE;
        letters.push(b'A' + r as u8);
    }
    letters.reverse();
    // Only ASCII uppercase bytes were pushed.
    Some(letters.into_iter().map(char::from).collect())
}

/// 1-based column number for a column name. Letters are case-insensitive.
pub fn to_number(letters: &str) -> Result<usize> {
    let invalid = || Error::InvalidBase26Letters {
        letters: letters.to_string(),
    };
    if letters.is_empty() {
        return Err(invalid());
    }
    let mut number = 0usize;
    for ch in letters.chars() {
        if !ch.is_ascii_alphabetic() {
            return Err(invalid());
        }
        let digit = (ch.to_ascii_uppercase() as u8 - b'A') as usize + 1;
        number = number
            .checked_mul(BASE)
            .and_then(|n| n.checked_add(digit))
            .ok_or_else(invalid)?;
    }
    Ok(number)
}
