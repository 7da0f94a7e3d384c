//! Types exchanged over the progress subscription surface.

use serde::Serialize;

/// User-displayable projection of a workflow state.
///
/// Emitted to subscribers on every transition. Derived purely from the
/// state snapshot, so a UI can rebuild its display from the most recent
/// view alone.
///
/// # Examples
///
/// ```
/// use raconteur_interface::ProgressView;
///
/// let view = ProgressView {
///     step_index: 2,
///     step_label: "publish",
///     percent: 80,
///     message: "posting to the social platform".to_string(),
/// };
/// assert_eq!(view.percent, 80);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProgressView {
    /// Position in the pipeline, counting from zero
    pub step_index: u8,
    /// Short machine-friendly label for the step
    pub step_label: &'static str,
    /// Progress percent (0-100)
    pub percent: u8,
    /// Human-readable status message
    pub message: String,
}
