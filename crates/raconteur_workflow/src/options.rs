//! Runtime options for workflow orchestration.

use derive_getters::Getters;
use raconteur_cache::PreviewCacheConfig;
use std::time::Duration;

const DEFAULT_HANDLE_DEADLINE: Duration = Duration::from_secs(30);
const DEFAULT_PROGRESS_CAPACITY: usize = 16;

/// Tunables for the orchestrator.
///
/// Defaults match production behavior; tests shrink the deadline instead of
/// waiting it out.
///
/// # Examples
///
/// ```
/// use raconteur_workflow::WorkflowOptions;
/// use std::time::Duration;
///
/// let options = WorkflowOptions::default()
///     .with_handle_deadline(Duration::from_secs(10));
/// assert_eq!(*options.handle_deadline(), Duration::from_secs(10));
/// ```
#[derive(Debug, Clone, Getters, derive_setters::Setters)]
#[setters(prefix = "with_")]
pub struct WorkflowOptions {
    /// How long the handle prompt stays open after a publish
    handle_deadline: Duration,

    /// Capacity of each workflow's progress broadcast channel
    progress_capacity: usize,

    /// Preview cache sizing
    cache: PreviewCacheConfig,
}

impl Default for WorkflowOptions {
    fn default() -> Self {
        Self {
            handle_deadline: DEFAULT_HANDLE_DEADLINE,
            progress_capacity: DEFAULT_PROGRESS_CAPACITY,
            cache: PreviewCacheConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_production_behavior() {
        let options = WorkflowOptions::default();
        assert_eq!(*options.handle_deadline(), Duration::from_secs(30));
        assert_eq!(*options.progress_capacity(), 16);
        assert!(options.cache().enabled());
    }

    #[test]
    fn setters_override_individual_fields() {
        let options = WorkflowOptions::default()
            .with_handle_deadline(Duration::from_millis(250))
            .with_progress_capacity(4);
        assert_eq!(*options.handle_deadline(), Duration::from_millis(250));
        assert_eq!(*options.progress_capacity(), 4);
    }
}
