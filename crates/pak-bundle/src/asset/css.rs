use pak_common::{SharedUrl, SyntaxError, Url};
use pak_css::StyleSheet;
use pak_css::ast::{MediaRule, Rule};

use crate::reference::{Anchor, Reference};

/// A stylesheet and where it lives.
#[derive(Debug, Clone, PartialEq)]
pub struct CssAsset {
    /// Where the stylesheet lives.
    pub url: Url,
    /// The parsed stylesheet.
    pub stylesheet: StyleSheet,
}

impl CssAsset {
    /// Parse `text` as a stylesheet located at `url`.
    pub fn parse(url: Url, text: &str) -> Result<Self, SyntaxError> {
        Ok(Self {
            url,
            stylesheet: pak_css::parse(text)?,
        })
    }

    /// One reference per `@import`. Imports restricted by media queries
    /// carry the query list in the `media` flag.
    #[must_use]
    pub fn references(&self) -> Vec<Reference> {
        self.stylesheet
            .imports()
            .into_iter()
            .map(|import| {
                let url = self.url.resolve_reference(&import.url.get());
                let reference = Reference::new(url, Anchor::Import(import.url.clone()))
                    .with_flag("rule", "import");
                if import.conditions.is_empty() {
                    reference
                } else {
                    reference.with_flag(
                        "media",
                        pak_css::serialize_media_queries(&import.conditions),
                    )
                }
            })
            .collect()
    }

    /// The serialized stylesheet.
    #[must_use]
    pub fn data(&self) -> String {
        pak_css::serialize(&self.stylesheet)
    }

    pub(crate) fn written(&self, anchor: &Anchor) -> Option<Url> {
        let Anchor::Import(cell) = anchor else {
            return None;
        };
        self.owns(cell).then(|| cell.get())
    }

    pub(crate) fn rewrite(&self, anchor: &Anchor, url: &Url) -> bool {
        let Anchor::Import(cell) = anchor else {
            return false;
        };
        if !self.owns(cell) {
            return false;
        }
        cell.set(url.clone());
        true
    }

    /// [§ 2.3 Importing Style Sheets](https://www.w3.org/TR/css-cascade-4/#at-import)
    ///
    /// "The @import rule allows users to import style rules from other style
    /// sheets. ... If a <media-query-list> is given, the imported style sheet
    /// is only applied when it matches."
    ///
    /// Replace the import `reference` points at with the rules of `source`.
    /// `url(...)` values in the moved rules are rebased to this stylesheet;
    /// nested imports keep their text and are rewritten through their own
    /// relations.
    pub(crate) fn merge(&mut self, source: &Self, reference: &Reference) -> bool {
        let Anchor::Import(cell) = &reference.anchor else {
            return false;
        };
        let Some(conditions) = self
            .stylesheet
            .imports()
            .into_iter()
            .find(|import| import.url.same_cell(cell))
            .map(|import| import.conditions.clone())
        else {
            return false;
        };

        let mut moved = source.stylesheet.clone();
        moved.rebase_urls(&source.url, &self.url);

        let rules = if conditions.is_empty() {
            moved.rules
        } else {
            vec![Rule::Media(MediaRule {
                conditions,
                stylesheet: moved,
            })]
        };
        self.stylesheet.replace_import(cell, rules)
    }

    fn owns(&self, cell: &SharedUrl) -> bool {
        self.stylesheet
            .imports()
            .iter()
            .any(|import| import.url.same_cell(cell))
    }
}
