//! Asset graph for the pak bundler.
//!
//! # Scope
//!
//! This crate implements:
//! - **Assets**: stylesheets, HTML documents, JavaScript modules, import
//!   maps, web app manifests and opaque blobs, each exposing its URL, media
//!   type, references and serialized data
//!
//! - **References**: the URL an asset uses to reach another, with ordered
//!   flags and an anchor naming where in the asset's syntax tree the URL is
//!   written, so it can be rewritten in place
//!
//! - **Graph**: a directed graph keyed by handle, with symmetric incoming
//!   and outgoing adjacency
//!
//! - **Bundle**: the graph of assets with a merge that collapses one asset
//!   into another and keeps every reference pointing at the same resource
//!
//! # Not Yet Implemented
//!
//! - Merging JavaScript modules or HTML documents (only `@import` inlining)
//! - Optimization passes over merged assets

/// Asset kinds and their capabilities.
pub mod asset;
/// The asset graph with merge.
pub mod bundle;
/// Generic directed graph.
pub mod graph;
/// References between assets.
pub mod reference;

pub use asset::{Asset, AssetError, AssetKind};
pub use bundle::Bundle;
pub use graph::{EdgeId, Graph, NodeId};
pub use reference::{Anchor, Flags, Reference};
