//! Lynx Navigation
//!
//! Address bar input resolution for the shell:
//! 1. Scheme-prefixed or domain-looking input → navigate
//! 2. Anything else → search
//!
//! The URL heuristic is intentionally dumb (contains a `.`, no
//! whitespace): no TLD validation, no IP literal detection. The search
//! engine and the page load itself live behind the rendering engine.

mod error;
mod input;

pub use error::NavigationError;
pub use input::{normalize_url, InputResolver, Resolution, HOME_URL};

pub type Result<T> = std::result::Result<T, NavigationError>;
