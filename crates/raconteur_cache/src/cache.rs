//! Preview cache implementation.

use derive_getters::Getters;
use raconteur_core::{PreviewResult, StoryId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Cache entry holding a rendered preview.
#[derive(Debug, Clone, Getters)]
pub struct CacheEntry {
    preview: PreviewResult,
    rendered_at: Instant,
}

impl CacheEntry {
    /// How long ago this preview was rendered.
    pub fn age(&self) -> Duration {
        self.rendered_at.elapsed()
    }
}

/// Configuration for the preview cache.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Getters,
    derive_setters::Setters,
    derive_builder::Builder,
)]
#[setters(prefix = "with_")]
pub struct PreviewCacheConfig {
    /// Maximum number of story previews retained
    #[serde(default = "default_max_entries")]
    max_entries: usize,

    /// Whether caching is enabled
    #[serde(default = "default_enabled")]
    enabled: bool,
}

fn default_max_entries() -> usize {
    64
}

fn default_enabled() -> bool {
    true
}

impl Default for PreviewCacheConfig {
    fn default() -> Self {
        Self {
            max_entries: default_max_entries(),
            enabled: default_enabled(),
        }
    }
}

/// Cache of rendered carousel previews, one entry per story.
///
/// A story's entry is overwritten whole on re-render, never merged, and is
/// dropped when the user explicitly regenerates the story. When the cache
/// reaches capacity the least recently used story is evicted.
///
/// # Example
///
/// ```
/// use raconteur_cache::{PreviewCache, PreviewCacheConfig};
/// use raconteur_core::{Caption, PreviewResult, SlideImage, StoryId};
///
/// let mut cache = PreviewCache::new(PreviewCacheConfig::default());
/// let story = StoryId::new("story-1").unwrap();
///
/// cache.insert(
///     story.clone(),
///     PreviewResult {
///         slides: vec![SlideImage {
///             url: "https://cdn.example.com/previews/story-1/0.png".to_string(),
///             alt_text: None,
///         }],
///         caption: Caption::new("A winter tale.").unwrap(),
///         theme: None,
///     },
/// );
///
/// if let Some(entry) = cache.get(&story) {
///     println!("Cached {} slides", entry.preview().slide_count());
/// }
/// ```
pub struct PreviewCache {
    config: PreviewCacheConfig,
    entries: HashMap<StoryId, CacheEntry>,
    access_order: Vec<StoryId>,
}

impl PreviewCache {
    /// Create a new preview cache with configuration.
    pub fn new(config: PreviewCacheConfig) -> Self {
        tracing::debug!(
            max_entries = config.max_entries,
            enabled = config.enabled,
            "Creating new PreviewCache"
        );
        Self {
            config,
            entries: HashMap::new(),
            access_order: Vec::new(),
        }
    }

    /// Insert a rendered preview, replacing any previous render of the
    /// same story.
    #[tracing::instrument(
        skip(self, preview),
        fields(
            story = %story,
            slide_count = preview.slide_count(),
            cache_size = self.entries.len()
        )
    )]
    pub fn insert(&mut self, story: StoryId, preview: PreviewResult) {
        if !self.config.enabled {
            tracing::debug!("Cache disabled, skipping insert");
            return;
        }

        // Evict if at capacity
        if self.entries.len() >= self.config.max_entries && !self.entries.contains_key(&story) {
            self.evict_lru();
        }

        // Track access order for LRU
        if let Some(pos) = self.access_order.iter().position(|k| k == &story) {
            self.access_order.remove(pos);
        }
        self.access_order.push(story.clone());

        tracing::debug!(
            replaced = self.entries.contains_key(&story),
            "Inserted preview into cache"
        );

        self.entries.insert(
            story,
            CacheEntry {
                preview,
                rendered_at: Instant::now(),
            },
        );
    }

    /// Get the cached preview for a story.
    ///
    /// Returns None if no render is cached or the cache is disabled.
    #[tracing::instrument(skip(self), fields(story = %story, cache_size = self.entries.len()))]
    pub fn get(&mut self, story: &StoryId) -> Option<&CacheEntry> {
        if !self.config.enabled {
            tracing::debug!("Cache disabled, returning None");
            return None;
        }

        if !self.entries.contains_key(story) {
            return None;
        }

        // Update access order for LRU
        if let Some(pos) = self.access_order.iter().position(|k| k == story) {
            let key = self.access_order.remove(pos);
            self.access_order.push(key);
        }

        tracing::debug!("Cache hit");
        self.entries.get(story)
    }

    /// Whether a preview is cached for a story, without touching LRU order.
    pub fn contains(&self, story: &StoryId) -> bool {
        self.config.enabled && self.entries.contains_key(story)
    }

    /// Drop a story's preview, returning whether one was cached.
    ///
    /// Called when the user regenerates a story, so the next workflow run
    /// renders fresh slides instead of reusing a stale carousel.
    #[tracing::instrument(skip(self), fields(story = %story))]
    pub fn invalidate(&mut self, story: &StoryId) -> bool {
        if let Some(pos) = self.access_order.iter().position(|k| k == story) {
            self.access_order.remove(pos);
        }
        let removed = self.entries.remove(story).is_some();
        if removed {
            tracing::debug!("Invalidated cached preview");
        }
        removed
    }

    /// Clear all cached previews.
    pub fn clear(&mut self) {
        let count = self.entries.len();
        self.entries.clear();
        self.access_order.clear();
        tracing::info!(cleared = count, "Cleared preview cache");
    }

    /// Number of cached previews.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Evict least recently used entry.
    fn evict_lru(&mut self) {
        if let Some(story) = self.access_order.first().cloned() {
            tracing::debug!(story = %story, "Evicting LRU preview");
            self.entries.remove(&story);
            self.access_order.remove(0);
        }
    }
}

impl Default for PreviewCache {
    fn default() -> Self {
        Self::new(PreviewCacheConfig::default())
    }
}
