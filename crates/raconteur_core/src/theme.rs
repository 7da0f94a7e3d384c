//! Carousel visual theme detection result.

use serde::{Deserialize, Serialize};

/// Visual theme the renderer detected for a carousel.
///
/// Detection happens server-side from the story's imagery; the client only
/// carries the result through so a UI can style the preview. Render responses
/// may omit the theme entirely.
///
/// # Examples
///
/// ```
/// use raconteur_core::CarouselTheme;
///
/// assert_eq!(CarouselTheme::parse("dark"), Some(CarouselTheme::Dark));
/// assert_eq!(CarouselTheme::parse("sepia"), None);
/// assert_eq!(format!("{}", CarouselTheme::Vivid), "Vivid");
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum CarouselTheme {
    /// Bright backgrounds with dark text
    Light,
    /// Dark backgrounds with light text
    Dark,
    /// Saturated accent colors
    Vivid,
    /// Desaturated, low-contrast palette
    Muted,
}

impl CarouselTheme {
    /// Parse a server-declared theme name, returning `None` for names this
    /// client does not know.
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            "vivid" => Some(Self::Vivid),
            "muted" => Some(Self::Muted),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(CarouselTheme::parse("DARK"), Some(CarouselTheme::Dark));
        assert_eq!(CarouselTheme::parse(" Light "), Some(CarouselTheme::Light));
    }

    #[test]
    fn unknown_names_parse_to_none() {
        assert_eq!(CarouselTheme::parse(""), None);
        assert_eq!(CarouselTheme::parse("neon"), None);
    }
}
