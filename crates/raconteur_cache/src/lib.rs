//! Carousel preview caching.
//!
//! This crate holds the most recently rendered preview per story so a UI can
//! show slides without re-rendering, and so regeneration can drop a stale
//! render explicitly.

#![warn(missing_docs)]

mod cache;

pub use cache::{CacheEntry, PreviewCache, PreviewCacheConfig, PreviewCacheConfigBuilder};
