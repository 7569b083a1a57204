//! Background and character sizing
//!
//! The background grows with the number of characters so the sprite always
//! frames the text. Both sizes scale with the character-size multiplier.

use glam::Vec2;

use crate::consts::{BASE_BACKGROUND_HEIGHT, REFERENCE_CHAR_COUNT};

/// Number of characters as the sizing formula counts them
#[inline]
pub fn text_length(text: &str) -> usize {
    text.chars().count()
}

/// Background size for `text`
///
/// Width is `len * character_mult / 30`; height is
/// `0.1 * character_mult * width_mult`.
pub fn background_size(text: &str, character_mult: f32, width_mult: f32) -> Vec2 {
    let width = text_length(text) as f32 * character_mult / REFERENCE_CHAR_COUNT;
    let height = BASE_BACKGROUND_HEIGHT * character_mult * width_mult;
    Vec2::new(width, height)
}

/// Character size written to the text surface
#[inline]
pub fn character_size(base: f32, character_mult: f32) -> f32 {
    base * character_mult
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::BASE_CHARACTER_SIZE;
    use proptest::prelude::*;

    #[test]
    fn test_hello_at_unit_multipliers() {
        let size = background_size("Hello", 1.0, 1.0);
        assert!((size.x - 5.0 / 30.0).abs() < 1e-6);
        assert!((size.y - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_empty_text_has_zero_width() {
        let size = background_size("", 3.0, 2.0);
        assert_eq!(size.x, 0.0);
        assert!((size.y - 0.6).abs() < 1e-6);
    }

    #[test]
    fn test_counts_characters_not_bytes() {
        assert_eq!(text_length("héllo"), 5);
        assert_eq!(background_size("日本", 30.0, 1.0).x, 2.0);
    }

    #[test]
    fn test_character_size_scales_base() {
        assert!((character_size(BASE_CHARACTER_SIZE, 10.0) - 0.1).abs() < 1e-6);
    }

    proptest! {
        #[test]
        fn prop_background_size_formula(
            text in ".{0,64}",
            character_mult in 1.0f32..=30.0,
            width_mult in 1.0f32..=10.0,
        ) {
            let size = background_size(&text, character_mult, width_mult);
            let expected_w = text.chars().count() as f32 * character_mult / 30.0;
            let expected_h = 0.1 * character_mult * width_mult;
            prop_assert!((size.x - expected_w).abs() <= 1e-4 * expected_w.max(1.0));
            prop_assert!((size.y - expected_h).abs() <= 1e-4 * expected_h.max(1.0));
        }
    }
}
