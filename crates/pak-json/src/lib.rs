//! Import map and web app manifest readers and writers for the pak bundler.
//!
//! # Scope
//!
//! This crate implements:
//! - **Import maps** ([HTML § 8.1.5.3](https://html.spec.whatwg.org/multipage/webappapis.html#import-maps))
//!   - `imports` and `scopes` specifier maps, in document order
//!   - Shape errors reported with the JSON path of the offending value
//!   - Unknown top-level members kept verbatim
//!
//! - **Web app manifests** ([Web Application Manifest](https://www.w3.org/TR/appmanifest/))
//!   - Image resources of `icons`, `screenshots` and `shortcuts`
//!   - Rewrites addressed by JSON pointer
//!
//! JSON syntax errors are reported as a [`pak_common::SyntaxError`] at a byte
//! offset.
//!
//! # Not Yet Implemented
//!
//! - Resolving specifiers against an import map
//! - Validating manifest members other than image resources

/// Errors and JSON paths.
pub mod error;
/// Import map reader and writer.
pub mod import_map;
/// Web app manifest reader and writer.
pub mod manifest;

pub use error::JsonError;
pub use import_map::{AddressIndex, ImportMap, Scope, Specifier, is_url_like};
pub use manifest::{ImageSource, WebManifest};
