//! Rendered carousel preview types.

use crate::{Caption, CarouselTheme};
use serde::{Deserialize, Serialize};

/// One rendered slide of a carousel.
///
/// # Examples
///
/// ```
/// use raconteur_core::SlideImage;
///
/// let slide = SlideImage {
///     url: "https://cdn.example.com/previews/story-1/0.png".to_string(),
///     alt_text: Some("Opening panel".to_string()),
/// };
/// assert!(slide.url.ends_with(".png"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlideImage {
    /// Where the rendered image can be fetched
    pub url: String,
    /// Accessibility text for the slide, when the renderer produced one
    pub alt_text: Option<String>,
}

/// A rendered-but-unpublished carousel.
///
/// Produced by the render endpoint and held in the preview cache until the
/// story is published or regenerated. The slide sequence is ordered and
/// always non-empty; a render that yields no slides is reported as an error
/// before this type is built.
///
/// # Examples
///
/// ```
/// use raconteur_core::{Caption, PreviewResult, SlideImage};
///
/// let preview = PreviewResult {
///     slides: vec![SlideImage {
///         url: "https://cdn.example.com/previews/story-1/0.png".to_string(),
///         alt_text: None,
///     }],
///     caption: Caption::new("A winter tale.").unwrap(),
///     theme: None,
/// };
/// assert_eq!(preview.slide_count(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreviewResult {
    /// Ordered slide images
    pub slides: Vec<SlideImage>,
    /// Shared caption for the whole carousel
    pub caption: Caption,
    /// Theme the renderer detected, if any
    pub theme: Option<CarouselTheme>,
}

impl PreviewResult {
    /// Number of slides in the carousel.
    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }
}
