//! Error types for the raconteur publishing workflow.
//!
//! This crate provides the foundation error types used throughout the
//! raconteur ecosystem.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern for clean error
//! handling:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All errors use `#[track_caller]` for automatic location capture
//!
//! # Examples
//!
//! ```
//! use raconteur_error::{HttpError, RaconteurResult};
//!
//! fn fetch_data() -> RaconteurResult<String> {
//!     Err(HttpError::new("Connection refused"))?
//! }
//!
//! match fetch_data() {
//!     Ok(data) => println!("Got: {}", data),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod comment;
mod config;
mod error;
mod http;
mod json;
mod publish;
mod render;
mod settings;
mod validation;
mod workflow;

pub use comment::CommentError;
pub use config::ConfigError;
pub use error::{RaconteurError, RaconteurErrorKind, RaconteurResult};
pub use http::HttpError;
pub use json::JsonError;
pub use publish::{PublishError, PublishErrorKind};
pub use render::{RenderError, RenderErrorKind};
pub use settings::SettingsError;
pub use validation::{ValidationError, ValidationErrorKind};
pub use workflow::{WorkflowError, WorkflowErrorKind};
