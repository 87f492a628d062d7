use pak_common::warning::warn_once;
use pak_common::{SyntaxError, Url};
use pak_js::{DeclarationKind, Program};

use crate::reference::{Anchor, Reference};

/// A JavaScript module and where it lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsAsset {
    /// Where the module lives.
    pub url: Url,
    /// The module's declarations over its source text.
    pub program: Program,
}

impl JsAsset {
    /// Parse `text` as a module located at `url`.
    pub fn parse(url: Url, text: &str) -> Result<Self, SyntaxError> {
        Ok(Self {
            url,
            program: pak_js::parse(text)?,
        })
    }

    /// [§ 8.1.5.5 Resolve a module specifier](https://html.spec.whatwg.org/multipage/webappapis.html#resolve-a-module-specifier)
    ///
    /// One reference per import or re-export whose specifier is a URL:
    /// absolute, or starting with `/`, `./` or `../`. Bare specifiers are
    /// left for an import map to resolve.
    #[must_use]
    pub fn references(&self) -> Vec<Reference> {
        self.program
            .declarations
            .iter()
            .enumerate()
            .filter_map(|(index, declaration)| {
                let specifier = declaration.source.value.as_str();
                let Some(written) = module_url(specifier) else {
                    warn_once(
                        "JS",
                        &format!("bare specifier {specifier:?} left for the import map"),
                    );
                    return None;
                };
                let kind = match declaration.kind {
                    DeclarationKind::Import => "import",
                    DeclarationKind::ExportAll | DeclarationKind::ExportNamed => "export",
                };
                Some(
                    Reference::new(self.url.resolve_reference(&written), Anchor::Module(index))
                        .with_flag("declaration", kind),
                )
            })
            .collect()
    }

    /// The program text with current module specifiers.
    #[must_use]
    pub fn data(&self) -> String {
        pak_js::write(&self.program)
    }

    pub(crate) fn written(&self, anchor: &Anchor) -> Option<Url> {
        let Anchor::Module(index) = anchor else {
            return None;
        };
        Url::parse(self.program.specifier(*index)?).ok()
    }

    pub(crate) fn rewrite(&mut self, anchor: &Anchor, url: &Url) -> bool {
        let Anchor::Module(index) = anchor else {
            return false;
        };
        self.program.set_specifier(*index, module_specifier(url))
    }
}

/// [Resolve a URL-like module specifier](https://html.spec.whatwg.org/multipage/webappapis.html#resolve-a-url-like-module-specifier)
///
/// "If specifier starts with "/", "./", or "../", then ... Return the result
/// of applying the URL parser to specifier with baseURL."
fn module_url(specifier: &str) -> Option<Url> {
    let url = Url::parse(specifier).ok()?;
    let relative = specifier.starts_with('/')
        || specifier.starts_with("./")
        || specifier.starts_with("../");
    (relative || url.is_absolute()).then_some(url)
}

/// Write `url` as a specifier that is still URL-like: a plain relative path
/// gains a leading `./`.
fn module_specifier(url: &Url) -> String {
    let written = url.to_string();
    if url.is_absolute()
        || url.path.is_empty()
        || written.starts_with('/')
        || written.starts_with("./")
        || written.starts_with("../")
    {
        written
    } else {
        format!("./{written}")
    }
}
