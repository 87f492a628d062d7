//! Common utilities for the pak bundler.
//!
//! This crate provides shared infrastructure used by every scanner, parser
//! and the asset graph:
//! - **Runes** - character class predicates shared by the CSS and HTML scanners
//! - **Syntax errors** - the `{offset, message}` error every parser reports
//! - **URLs** - reference parsing, resolution, and the rebase/rewrite algebra
//! - **Warning System** - deduplicated, colored diagnostics on stderr

pub mod error;
pub mod runes;
pub mod url;
pub mod warning;

pub use error::SyntaxError;
pub use crate::url::{SharedUrl, Url, UrlError};
