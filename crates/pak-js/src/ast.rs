//! Module declarations of a JavaScript program.
//!
//! [§ 16.2 Modules](https://tc39.es/ecma262/#sec-modules)
//!
//! Only the declarations that name another module are modelled. Everything
//! else in the program stays as source text and is written back unchanged.

use std::ops::Range;

/// A parsed module: its source text and the declarations found in it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Program {
    /// The source text, never modified. Specifier changes live in
    /// [`ModuleDeclaration::source`] and are applied by [`crate::write`].
    pub text: String,
    /// Top-level import and re-export declarations, in source order.
    pub declarations: Vec<ModuleDeclaration>,
}

impl Program {
    /// The current module specifier of declaration `index`.
    #[must_use]
    pub fn specifier(&self, index: usize) -> Option<&str> {
        self.declarations
            .get(index)
            .map(|declaration| declaration.source.value.as_str())
    }

    /// Replace the module specifier of declaration `index`, keeping its
    /// quote mark. Returns false when there is no such declaration.
    pub fn set_specifier(&mut self, index: usize, value: impl Into<String>) -> bool {
        match self.declarations.get_mut(index) {
            Some(declaration) => {
                declaration.source.set_value(value);
                true
            }
            None => false,
        }
    }
}

/// What kind of declaration names the module.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclarationKind {
    /// [§ 16.2.2 Imports](https://tc39.es/ecma262/#sec-imports)
    ///
    /// `import ... from "m"` and `import "m"`.
    Import,
    /// `export * from "m"` and `export * as ns from "m"`.
    ExportAll,
    /// `export { a, b as c } from "m"`.
    ExportNamed,
}

/// [§ 16.2.2 Imports](https://tc39.es/ecma262/#sec-imports) and
/// [§ 16.2.3 Exports](https://tc39.es/ecma262/#sec-exports)
///
/// A declaration with a `FromClause` or, for side-effect imports, a bare
/// `ModuleSpecifier`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleDeclaration {
    /// Import or re-export.
    pub kind: DeclarationKind,
    /// Bindings in source order, empty for `import "m"` and `export * from "m"`.
    pub specifiers: Vec<Specifier>,
    /// "ModuleSpecifier :: StringLiteral"
    pub source: StringLiteral,
    /// `with { type: "json" }` attributes.
    pub attributes: Vec<ImportAttribute>,
    /// Byte range of the whole declaration, including a terminating `;`.
    pub span: Range<usize>,
}

/// One binding of an import or re-export clause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Specifier {
    /// "ImportedDefaultBinding": `import name from "m"`.
    Default(String),
    /// "NameSpaceImport": `* as name`.
    Namespace(String),
    /// "ImportSpecifier" / "ExportSpecifier": `name` or `name as alias`
    /// between braces. String export names are kept without quotes.
    Named {
        /// The name exported by the other module.
        name: String,
        /// The name bound (imports) or exported (re-exports), when renamed.
        alias: Option<String>,
    },
}

/// [§ 16.2.2 Imports](https://tc39.es/ecma262/#sec-imports)
///
/// "WithEntries :: AttributeKey : StringLiteral"
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportAttribute {
    /// The attribute key, an identifier name or string value.
    pub key: String,
    /// The attribute value.
    pub value: String,
}

/// A string literal as it appears in the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringLiteral {
    /// The string value after escape processing.
    pub value: String,
    /// The quote mark, `"` or `'`.
    pub quote: char,
    /// The literal as written, quotes included.
    pub raw: String,
    /// Byte range of the literal, quotes included.
    pub span: Range<usize>,
}

impl StringLiteral {
    /// Replace the value and re-quote it with the same quote mark.
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.raw = quote(&self.value, self.quote);
    }
}

/// Write `value` as a string literal delimited by `mark`.
#[must_use]
pub fn quote(value: &str, mark: char) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push(mark);
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            c if c == mark => {
                out.push('\\');
                out.push(c);
            }
            c => out.push(c),
        }
    }
    out.push(mark);
    out
}
