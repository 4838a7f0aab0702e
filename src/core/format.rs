//! Text and colour helpers.

use crate::errors::{Error, Result};

/// Repairs an URL assembled from a stored path: spaces become `%20` and
/// backslashes become forward slashes.
#[must_use]
pub fn fix_url(url: &str) -> String {
    url.replace(' ', "%20").replace('\\', "/")
}

/// Packs an RGB triple into a `0xRRGGBB` colour.
///
/// # Errors
/// Returns [`Error::InvalidColor`] listing every channel outside `0..=255`.
pub fn rgb_to_hex(color: [i32; 3]) -> Result<u32> {
    let invalid: Vec<i32> = color
        .iter()
        .copied()
        .filter(|value| !(0..=255).contains(value))
        .collect();
    if !invalid.is_empty() {
        return Err(Error::InvalidColor { values: invalid });
    }

    Ok(color
        .iter()
        .fold(0u32, |acc, &channel| (acc << 8) | channel.unsigned_abs()))
}

/// Capitalizes the first letter of every word and lowercases the rest, so
/// user input matches how item names are stored (`"battle axe"` -> `"Battle Axe"`).
#[must_use]
pub fn title_case(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut at_word_start = true;
    for ch in text.chars() {
        if ch.is_alphabetic() {
            if at_word_start {
                result.extend(ch.to_uppercase());
            } else {
                result.extend(ch.to_lowercase());
            }
            at_word_start = false;
        } else {
            result.push(ch);
            at_word_start = true;
        }
    }
    result
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_fix_url() {
        assert_eq!(
            fix_url("https://example.com/images\\melee\\battle axe.png"),
            "https://example.com/images/melee/battle%20axe.png"
        );
        assert_eq!(fix_url("https://example.com/ok.png"), "https://example.com/ok.png");
    }

    #[test]
    fn test_rgb_to_hex() {
        assert_eq!(rgb_to_hex([12, 25, 38]).unwrap(), 0x000C_1926);
        assert_eq!(rgb_to_hex([255, 0, 0]).unwrap(), 0x00FF_0000);
        assert_eq!(rgb_to_hex([0, 0, 0]).unwrap(), 0);
    }

    #[test]
    fn test_rgb_to_hex_rejects_out_of_range() {
        let err = rgb_to_hex([-1, 128, 300]).unwrap_err();
        match err {
            Error::InvalidColor { values } => assert_eq!(values, vec![-1, 300]),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("axe"), "Axe");
        assert_eq!(title_case("bATTLE aXE"), "Battle Axe");
        assert_eq!(title_case("o'brien's-hammer"), "O'Brien'S-Hammer");
        assert_eq!(title_case(""), "");
    }
}
