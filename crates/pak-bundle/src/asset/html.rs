use pak_common::warning::warn_once;
use pak_common::{SyntaxError, Url};
use pak_dom::DomTree;

use super::is_followable;
use crate::reference::{Anchor, Reference};

/// Element attributes that hold a URL the page loads.
///
/// [§ 4.2.4 The link element](https://html.spec.whatwg.org/multipage/semantics.html#the-link-element),
/// [§ 4.12.1 The script element](https://html.spec.whatwg.org/multipage/scripting.html#the-script-element),
/// [§ 4.8 Embedded content](https://html.spec.whatwg.org/multipage/embedded-content.html)
const URL_ATTRIBUTES: [(&str, &str); 10] = [
    ("link", "href"),
    ("script", "src"),
    ("img", "src"),
    ("source", "src"),
    ("audio", "src"),
    ("video", "src"),
    ("video", "poster"),
    ("track", "src"),
    ("embed", "src"),
    ("iframe", "src"),
];

/// Attributes copied into the flags of a reference when present.
const FLAG_ATTRIBUTES: [&str; 3] = ["rel", "type", "media"];

/// An HTML document and where it lives.
#[derive(Debug, Clone)]
pub struct HtmlAsset {
    /// Where the document lives.
    pub url: Url,
    /// The parsed document.
    pub document: DomTree,
}

impl HtmlAsset {
    /// Parse `text` as a document located at `url`.
    pub fn parse(url: Url, text: &str) -> Result<Self, SyntaxError> {
        Ok(Self {
            url,
            document: pak_html::parse(text)?,
        })
    }

    /// One reference per URL attribute, breadth first through the document.
    ///
    /// `data:` URLs and fragment-only URLs are skipped. Attributes that do
    /// not parse as URLs are reported and skipped.
    #[must_use]
    pub fn references(&self) -> Vec<Reference> {
        let mut references = Vec::new();
        for id in self.document.walk(self.document.root()) {
            let Some(element) = self.document.as_element(id) else {
                continue;
            };
            for (tag, name) in URL_ATTRIBUTES {
                if element.tag_name != tag {
                    continue;
                }
                let Some(value) = element.attribute(name) else {
                    continue;
                };
                if !is_followable(value) {
                    continue;
                }
                let written = match Url::parse(value.trim()) {
                    Ok(url) => url,
                    Err(error) => {
                        warn_once("HTML", &format!("<{tag} {name}>: {error}"));
                        continue;
                    }
                };

                let mut reference = Reference::new(
                    self.url.resolve_reference(&written),
                    Anchor::Attribute {
                        element: id,
                        name: name.to_string(),
                    },
                )
                .with_flag("element", tag);
                for flag in FLAG_ATTRIBUTES {
                    if let Some(value) = element.attribute(flag) {
                        reference.flags.set(flag, value);
                    }
                }
                references.push(reference);
            }
        }
        references
    }

    /// The serialized document.
    #[must_use]
    pub fn data(&self) -> String {
        pak_html::serialize(&self.document)
    }

    pub(crate) fn written(&self, anchor: &Anchor) -> Option<Url> {
        let Anchor::Attribute { element, name } = anchor else {
            return None;
        };
        let value = self.document.as_element(*element)?.attribute(name)?;
        Url::parse(value.trim()).ok()
    }

    pub(crate) fn rewrite(&mut self, anchor: &Anchor, url: &Url) -> bool {
        let Anchor::Attribute { element, name } = anchor else {
            return false;
        };
        match self.document.as_element_mut(*element) {
            Some(data) if data.attribute(name).is_some() => {
                data.set_attribute(name, url.to_string());
                true
            }
            _ => false,
        }
    }
}
