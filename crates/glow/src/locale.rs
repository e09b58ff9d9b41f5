//! Locale helpers for the view layer.

/// Horizontal writing direction of a locale.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Left-to-right.
    Ltr,
    /// Right-to-left.
    Rtl,
}

/// Language codes written right-to-left.
const RTL_LANGS: &[&str] =
    &["ar", "he", "fa", "ur", "ps", "sd", "ug", "yi", "dv", "ku"];

/// Returns the writing direction for a language tag.
///
/// A pure lookup of the tag's primary subtag, so `"ar-EG"` and `"ar"`
/// both resolve to right-to-left. Unknown tags default to
/// left-to-right.
pub fn text_direction(lang: &str) -> Direction {
    let primary = lang
        .split(['-', '_'])
        .next()
        .unwrap_or(lang)
        .to_ascii_lowercase();
    if RTL_LANGS.contains(&primary.as_str()) {
        Direction::Rtl
    } else {
        Direction::Ltr
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_direction() {
        assert_eq!(text_direction("en"), Direction::Ltr);
        assert_eq!(text_direction("en-US"), Direction::Ltr);
        assert_eq!(text_direction("ar"), Direction::Rtl);
        assert_eq!(text_direction("ar-EG"), Direction::Rtl);
        assert_eq!(text_direction("HE"), Direction::Rtl);
        assert_eq!(text_direction("fa_IR"), Direction::Rtl);
        assert_eq!(text_direction(""), Direction::Ltr);
    }
}
