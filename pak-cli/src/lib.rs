//! Library side of the `pak` command line.
//!
//! The binary only parses arguments and prints; the build itself lives
//! here so it can be driven from tests.

/// The `pak build` pipeline.
pub mod build;

pub use build::{BuildOptions, BuildReport, WrittenAsset, build};
