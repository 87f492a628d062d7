use pak_common::Url;
use pak_json::{ImportMap, JsonError, WebManifest, is_url_like};

use super::is_followable;
use crate::reference::{Anchor, Reference};

/// An import map and where it lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportMapAsset {
    /// Where the map lives.
    pub url: Url,
    /// The parsed map.
    pub map: ImportMap,
}

impl ImportMapAsset {
    /// Parse `text` as an import map located at `url`.
    pub fn parse(url: Url, text: &str) -> Result<Self, JsonError> {
        Ok(Self {
            url,
            map: ImportMap::parse(text)?,
        })
    }

    /// One reference per URL-like address. The `specifier` flag holds the
    /// key the address belongs to and `scope` the scope prefix, if any.
    #[must_use]
    pub fn references(&self) -> Vec<Reference> {
        self.map
            .addresses()
            .filter(|(_, address)| is_url_like(address))
            .filter_map(|(index, address)| {
                let written = Url::parse(address).ok()?;
                let imports = match index.scope {
                    None => &self.map.imports,
                    Some(scope) => &self.map.scopes.get(scope)?.imports,
                };
                let mut reference =
                    Reference::new(self.url.resolve_reference(&written), Anchor::Address(index))
                        .with_flag("specifier", imports.get(index.specifier)?.key.as_str());
                if let Some(scope) = index.scope.and_then(|scope| self.map.scopes.get(scope)) {
                    reference.flags.set("scope", scope.prefix.as_str());
                }
                Some(reference)
            })
            .collect()
    }

    /// The map as JSON.
    #[must_use]
    pub fn data(&self) -> String {
        self.map.to_json()
    }

    pub(crate) fn written(&self, anchor: &Anchor) -> Option<Url> {
        let Anchor::Address(index) = anchor else {
            return None;
        };
        Url::parse(self.map.address(*index)?).ok()
    }

    pub(crate) fn rewrite(&mut self, anchor: &Anchor, url: &Url) -> bool {
        let Anchor::Address(index) = anchor else {
            return false;
        };
        let mut address = url.to_string();
        if !is_url_like(&address) {
            address.insert_str(0, "./");
        }
        self.map.set_address(*index, address)
    }
}

/// A web app manifest and where it lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestAsset {
    /// Where the manifest lives.
    pub url: Url,
    /// The parsed manifest.
    pub manifest: WebManifest,
}

impl ManifestAsset {
    /// Parse `text` as a manifest located at `url`.
    pub fn parse(url: Url, text: &str) -> Result<Self, JsonError> {
        Ok(Self {
            url,
            manifest: WebManifest::parse(text)?,
        })
    }

    /// [§ 3.2 Processing image resources](https://www.w3.org/TR/image-resource/#processing-an-imageresource-from-an-api)
    ///
    /// "Set image's src to the result of parsing input["src"] relative to the
    /// base URL."
    ///
    /// One reference per image `src`, with the member it was found under in
    /// the `member` flag.
    #[must_use]
    pub fn references(&self) -> Vec<Reference> {
        self.manifest
            .image_sources()
            .into_iter()
            .filter(|source| is_followable(&source.src))
            .filter_map(|source| {
                let written = Url::parse(source.src.trim()).ok()?;
                let member = source
                    .pointer
                    .split('/')
                    .nth(1)
                    .unwrap_or_default()
                    .to_string();
                Some(
                    Reference::new(
                        self.url.resolve_reference(&written),
                        Anchor::Pointer(source.pointer),
                    )
                    .with_flag("member", member),
                )
            })
            .collect()
    }

    /// The manifest as JSON.
    #[must_use]
    pub fn data(&self) -> String {
        self.manifest.to_json()
    }

    pub(crate) fn written(&self, anchor: &Anchor) -> Option<Url> {
        let Anchor::Pointer(pointer) = anchor else {
            return None;
        };
        Url::parse(self.manifest.get(pointer)?.trim()).ok()
    }

    pub(crate) fn rewrite(&mut self, anchor: &Anchor, url: &Url) -> bool {
        let Anchor::Pointer(pointer) = anchor else {
            return false;
        };
        self.manifest.set(pointer, url.to_string())
    }
}
