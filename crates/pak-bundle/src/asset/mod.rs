//! Assets: parsed files that reference each other by URL.
//!
//! Every asset kind owns its syntax tree and exposes the same capabilities:
//! its URL and media type, the [`Reference`]s written in it, its serialized
//! data, and a content merge with another asset. The kinds are variants of
//! [`Asset`] and each capability dispatches on the variant.

mod css;
mod html;
mod js;
mod json;

pub use css::CssAsset;
pub use html::HtmlAsset;
pub use js::JsAsset;
pub use json::{ImportMapAsset, ManifestAsset};

use pak_common::error::decode_utf8;
use pak_common::{SyntaxError, Url};
use pak_json::JsonError;
use strum_macros::Display;
use thiserror::Error;

use crate::reference::{Anchor, Reference};

/// Failure to read an asset.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssetError {
    /// The bytes are not UTF-8 or do not parse.
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
    /// An import map or manifest has the wrong shape.
    #[error(transparent)]
    Json(#[from] JsonError),
}

/// The kind of an asset, chosen from its file name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum AssetKind {
    /// A stylesheet.
    #[strum(serialize = "css")]
    Css,
    /// An HTML document.
    #[strum(serialize = "html")]
    Html,
    /// A JavaScript module.
    #[strum(serialize = "js")]
    Js,
    /// An import map.
    #[strum(serialize = "import map")]
    ImportMap,
    /// A web app manifest.
    #[strum(serialize = "manifest")]
    WebManifest,
    /// Anything else, carried as bytes.
    #[strum(serialize = "blob")]
    Blob,
}

impl AssetKind {
    /// The kind for a file path, by extension or well-known file name.
    #[must_use]
    pub fn from_path(path: &str) -> Self {
        let name = path.rsplit('/').next().unwrap_or(path).to_ascii_lowercase();
        match name.as_str() {
            "importmap.json" => return Self::ImportMap,
            "manifest.json" => return Self::WebManifest,
            _ => {}
        }
        match extension(&name) {
            Some("css") => Self::Css,
            Some("html" | "htm") => Self::Html,
            Some("js" | "mjs") => Self::Js,
            Some("importmap") => Self::ImportMap,
            Some("webmanifest") => Self::WebManifest,
            _ => Self::Blob,
        }
    }
}

/// Bytes the bundler does not look into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlobAsset {
    /// Where the asset lives.
    pub url: Url,
    /// The media type guessed from the file name.
    pub media_type: String,
    /// The content.
    pub bytes: Vec<u8>,
}

/// A parsed file in the bundle.
#[derive(Debug, Clone)]
pub enum Asset {
    /// A stylesheet.
    Css(CssAsset),
    /// An HTML document.
    Html(HtmlAsset),
    /// A JavaScript module.
    Js(JsAsset),
    /// An import map.
    ImportMap(ImportMapAsset),
    /// A web app manifest.
    WebManifest(ManifestAsset),
    /// Anything else.
    Blob(BlobAsset),
}

impl Asset {
    /// Parse `bytes` as an asset of `kind` located at `url`.
    pub fn parse(kind: AssetKind, url: Url, bytes: &[u8]) -> Result<Self, AssetError> {
        Ok(match kind {
            AssetKind::Css => Self::Css(CssAsset::parse(url, decode_utf8(bytes)?)?),
            AssetKind::Html => Self::Html(HtmlAsset::parse(url, decode_utf8(bytes)?)?),
            AssetKind::Js => Self::Js(JsAsset::parse(url, decode_utf8(bytes)?)?),
            AssetKind::ImportMap => {
                Self::ImportMap(ImportMapAsset::parse(url, decode_utf8(bytes)?)?)
            }
            AssetKind::WebManifest => {
                Self::WebManifest(ManifestAsset::parse(url, decode_utf8(bytes)?)?)
            }
            AssetKind::Blob => Self::Blob(BlobAsset {
                media_type: guess_media_type(&url.path).to_string(),
                url,
                bytes: bytes.to_vec(),
            }),
        })
    }

    /// Parse `bytes` with the kind chosen from the path of `url`.
    pub fn from_bytes(url: Url, bytes: &[u8]) -> Result<Self, AssetError> {
        Self::parse(AssetKind::from_path(&url.path), url, bytes)
    }

    /// The kind of this asset.
    #[must_use]
    pub const fn kind(&self) -> AssetKind {
        match self {
            Self::Css(_) => AssetKind::Css,
            Self::Html(_) => AssetKind::Html,
            Self::Js(_) => AssetKind::Js,
            Self::ImportMap(_) => AssetKind::ImportMap,
            Self::WebManifest(_) => AssetKind::WebManifest,
            Self::Blob(_) => AssetKind::Blob,
        }
    }

    /// Where the asset lives.
    #[must_use]
    pub const fn url(&self) -> &Url {
        match self {
            Self::Css(asset) => &asset.url,
            Self::Html(asset) => &asset.url,
            Self::Js(asset) => &asset.url,
            Self::ImportMap(asset) => &asset.url,
            Self::WebManifest(asset) => &asset.url,
            Self::Blob(asset) => &asset.url,
        }
    }

    /// The media type the asset is written as.
    #[must_use]
    pub fn media_type(&self) -> &str {
        match self {
            Self::Css(_) => "text/css",
            Self::Html(_) => "text/html",
            Self::Js(_) => "text/javascript",
            Self::ImportMap(_) => "application/importmap+json",
            Self::WebManifest(_) => "application/manifest+json",
            Self::Blob(asset) => &asset.media_type,
        }
    }

    /// The references written in the asset, in document order. Each URL is
    /// resolved against the asset's URL.
    #[must_use]
    pub fn references(&self) -> Vec<Reference> {
        match self {
            Self::Css(asset) => asset.references(),
            Self::Html(asset) => asset.references(),
            Self::Js(asset) => asset.references(),
            Self::ImportMap(asset) => asset.references(),
            Self::WebManifest(asset) => asset.references(),
            Self::Blob(_) => Vec::new(),
        }
    }

    /// The serialized asset.
    #[must_use]
    pub fn data(&self) -> Vec<u8> {
        match self {
            Self::Css(asset) => asset.data().into_bytes(),
            Self::Html(asset) => asset.data().into_bytes(),
            Self::Js(asset) => asset.data().into_bytes(),
            Self::ImportMap(asset) => asset.data().into_bytes(),
            Self::WebManifest(asset) => asset.data().into_bytes(),
            Self::Blob(asset) => asset.bytes.clone(),
        }
    }

    /// The URL currently written at `anchor`, as it appears in the source
    /// (not resolved). `None` when the anchor is not part of this asset.
    #[must_use]
    pub fn written(&self, anchor: &Anchor) -> Option<Url> {
        match self {
            Self::Css(asset) => asset.written(anchor),
            Self::Html(asset) => asset.written(anchor),
            Self::Js(asset) => asset.written(anchor),
            Self::ImportMap(asset) => asset.written(anchor),
            Self::WebManifest(asset) => asset.written(anchor),
            Self::Blob(_) => None,
        }
    }

    /// Write `url` at the anchor of `reference` and point the reference at
    /// the resource `url` now resolves to. Returns false when the anchor is
    /// not part of this asset.
    pub fn rewrite(&mut self, reference: &mut Reference, url: &Url) -> bool {
        let written = match self {
            Self::Css(asset) => asset.rewrite(&reference.anchor, url),
            Self::Html(asset) => asset.rewrite(&reference.anchor, url),
            Self::Js(asset) => asset.rewrite(&reference.anchor, url),
            Self::ImportMap(asset) => asset.rewrite(&reference.anchor, url),
            Self::WebManifest(asset) => asset.rewrite(&reference.anchor, url),
            Self::Blob(_) => false,
        };
        if written {
            reference.url = self.url().resolve_reference(url);
        }
        written
    }

    /// Merge the content of `source` into this asset. `reference` is the
    /// relation from this asset to `source`.
    ///
    /// Only stylesheets merge: the `@import` of `source` is replaced by its
    /// rules. Every other combination is refused.
    pub fn merge(&mut self, source: &Self, reference: &Reference) -> bool {
        match (self, source) {
            (Self::Css(target), Self::Css(source)) => target.merge(source, reference),
            _ => false,
        }
    }
}

/// Whether a URL as written should be followed at all: `data:` URLs carry
/// their content inline and fragment-only URLs point into the same asset.
pub(crate) fn is_followable(value: &str) -> bool {
    let value = value.trim();
    !value.is_empty()
        && !value.starts_with('#')
        && !value
            .get(..5)
            .is_some_and(|scheme| scheme.eq_ignore_ascii_case("data:"))
}

fn extension(name: &str) -> Option<&str> {
    name.rsplit_once('.').map(|(_, extension)| extension)
}

/// A small table of media types for the files a web bundle usually carries.
fn guess_media_type(path: &str) -> &'static str {
    let name = path.rsplit('/').next().unwrap_or(path).to_ascii_lowercase();
    match extension(&name) {
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("svg") => "image/svg+xml",
        Some("webp") => "image/webp",
        Some("avif") => "image/avif",
        Some("ico") => "image/x-icon",
        Some("woff") => "font/woff",
        Some("woff2") => "font/woff2",
        Some("ttf") => "font/ttf",
        Some("otf") => "font/otf",
        Some("json") => "application/json",
        Some("wasm") => "application/wasm",
        Some("txt") => "text/plain",
        Some("mp4") => "video/mp4",
        Some("webm") => "video/webm",
        Some("mp3") => "audio/mpeg",
        Some("vtt") => "text/vtt",
        _ => "application/octet-stream",
    }
}
