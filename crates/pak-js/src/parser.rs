//! Module declaration parser.
//!
//! [§ 16.2 Modules](https://tc39.es/ecma262/#sec-modules)
//!
//! The parser walks the token stream looking for `import` and `export` at
//! the top level, where bracket depth is zero and the keyword is not a
//! property name. Those are parsed with the module item grammar; every other
//! token is skipped.

use pak_common::SyntaxError;

use crate::ast::{
    DeclarationKind, ImportAttribute, ModuleDeclaration, Program, Specifier, StringLiteral,
};
use crate::lexer::{Token, TokenKind};

/// [§ 13.1 Identifiers](https://tc39.es/ecma262/#sec-identifiers)
///
/// "ReservedWord", plus the words reserved in strict mode code. Module code
/// is always strict, and `await` is reserved in modules.
const RESERVED_WORDS: [&str; 46] = [
    "await",
    "break",
    "case",
    "catch",
    "class",
    "const",
    "continue",
    "debugger",
    "default",
    "delete",
    "do",
    "else",
    "enum",
    "export",
    "extends",
    "false",
    "finally",
    "for",
    "function",
    "if",
    "import",
    "in",
    "instanceof",
    "new",
    "null",
    "return",
    "super",
    "switch",
    "this",
    "throw",
    "true",
    "try",
    "typeof",
    "var",
    "void",
    "while",
    "with",
    "yield",
    "let",
    "static",
    "implements",
    "interface",
    "package",
    "private",
    "protected",
    "public",
];

/// Parser for the import and re-export declarations of a module.
pub struct ModuleParser<'a> {
    text: &'a str,
    tokens: Vec<Token>,
    position: usize,
    declarations: Vec<ModuleDeclaration>,
}

impl<'a> ModuleParser<'a> {
    /// Create a parser over the tokens scanned from `text`.
    #[must_use]
    pub const fn new(text: &'a str, tokens: Vec<Token>) -> Self {
        Self {
            text,
            tokens,
            position: 0,
            declarations: Vec::new(),
        }
    }

    /// Parse every top-level module declaration.
    pub fn run(mut self) -> Result<Program, SyntaxError> {
        let mut depth = 0_usize;
        while self.position < self.tokens.len() {
            let start = self.position;
            let top_level = depth == 0 && !self.after_member_access();
            let token = &self.tokens[start];
            let opens = matches!(token.kind, TokenKind::Punctuator("{" | "(" | "["));
            let closes = matches!(token.kind, TokenKind::Punctuator("}" | ")" | "]"));
            let import = top_level && token.is_identifier("import");
            let export = top_level && token.is_identifier("export");

            let declaration = if import {
                self.import_declaration()?
            } else if export {
                self.export_declaration()?
            } else {
                None
            };

            if let Some(declaration) = declaration {
                self.declarations.push(declaration);
                continue;
            }

            // Not a declaration: count its brackets like any other token.
            if opens {
                depth += 1;
            } else if closes {
                depth = depth.saturating_sub(1);
            }
            self.position = start + 1;
        }

        Ok(Program {
            text: self.text.to_string(),
            declarations: self.declarations,
        })
    }

    /// [§ 16.2.2 Imports](https://tc39.es/ecma262/#sec-imports)
    ///
    /// ```text
    /// ImportDeclaration :
    ///   import ImportClause FromClause WithClause? ;
    ///   import ModuleSpecifier WithClause? ;
    /// ```
    ///
    /// Returns `None` for `import(...)` and `import.meta`, which are
    /// expressions.
    fn import_declaration(&mut self) -> Result<Option<ModuleDeclaration>, SyntaxError> {
        let offset = self.tokens[self.position].offset;
        self.position += 1;

        let next = self.peek().ok_or_else(|| self.eof())?;
        if next.is_punctuator("(") || next.is_punctuator(".") {
            return Ok(None);
        }

        let specifiers = if matches!(next.kind, TokenKind::String { .. }) {
            Vec::new()
        } else {
            let specifiers = self.import_clause()?;
            self.expect_identifier("from")?;
            specifiers
        };
        let source = self.module_specifier()?;
        let attributes = self.with_clause()?;
        let _ = self.eat_punctuator(";");

        Ok(Some(ModuleDeclaration {
            kind: DeclarationKind::Import,
            specifiers,
            source,
            attributes,
            span: offset..self.previous_end(),
        }))
    }

    /// ```text
    /// ImportClause :
    ///   ImportedDefaultBinding
    ///   NameSpaceImport
    ///   NamedImports
    ///   ImportedDefaultBinding , NameSpaceImport
    ///   ImportedDefaultBinding , NamedImports
    /// ```
    fn import_clause(&mut self) -> Result<Vec<Specifier>, SyntaxError> {
        let mut specifiers = Vec::new();

        if self.peek().and_then(Token::identifier).is_some() {
            specifiers.push(Specifier::Default(self.binding_identifier()?));
            if !self.eat_punctuator(",") {
                return Ok(specifiers);
            }
        }

        if self.eat_punctuator("*") {
            // "NameSpaceImport : * as ImportedBinding"
            self.expect_identifier("as")?;
            specifiers.push(Specifier::Namespace(self.binding_identifier()?));
        } else if self.eat_punctuator("{") {
            self.named_imports(&mut specifiers)?;
        } else {
            return Err(self.expected("import clause"));
        }
        Ok(specifiers)
    }

    /// ```text
    /// NamedImports : { ImportsList? ,? }
    /// ImportSpecifier :
    ///   ImportedBinding
    ///   ModuleExportName as ImportedBinding
    /// ```
    ///
    /// Called after the `{`.
    fn named_imports(&mut self, specifiers: &mut Vec<Specifier>) -> Result<(), SyntaxError> {
        loop {
            if self.eat_punctuator("}") {
                return Ok(());
            }

            let offset = self.current_offset();
            let (name, is_string) = self.module_export_name()?;
            let alias = if self.eat_identifier("as") {
                Some(self.binding_identifier()?)
            } else if is_string {
                return Err(self.expected("as"));
            } else if is_reserved(&name) {
                return Err(SyntaxError::new(offset, format!("unexpected reserved word {name}")));
            } else {
                None
            };
            specifiers.push(Specifier::Named { name, alias });

            if !self.eat_punctuator(",") {
                return self.expect_punctuator("}");
            }
        }
    }

    /// [§ 16.2.3 Exports](https://tc39.es/ecma262/#sec-exports)
    ///
    /// ```text
    /// ExportDeclaration :
    ///   export ExportFromClause FromClause WithClause? ;
    /// ExportFromClause :
    ///   *
    ///   * as ModuleExportName
    ///   NamedExports
    /// ```
    ///
    /// Returns `None` for exports that do not name another module.
    fn export_declaration(&mut self) -> Result<Option<ModuleDeclaration>, SyntaxError> {
        let offset = self.tokens[self.position].offset;
        self.position += 1;

        let mut specifiers = Vec::new();
        let kind = if self.eat_punctuator("*") {
            if self.eat_identifier("as") {
                specifiers.push(Specifier::Namespace(self.module_export_name()?.0));
            }
            self.expect_identifier("from")?;
            DeclarationKind::ExportAll
        } else if self.eat_punctuator("{") {
            self.named_exports(&mut specifiers)?;
            if !self.eat_identifier("from") {
                return Ok(None);
            }
            DeclarationKind::ExportNamed
        } else {
            return Ok(None);
        };

        let source = self.module_specifier()?;
        let attributes = self.with_clause()?;
        let _ = self.eat_punctuator(";");

        Ok(Some(ModuleDeclaration {
            kind,
            specifiers,
            source,
            attributes,
            span: offset..self.previous_end(),
        }))
    }

    /// ```text
    /// NamedExports : { ExportsList? ,? }
    /// ExportSpecifier :
    ///   ModuleExportName
    ///   ModuleExportName as ModuleExportName
    /// ```
    ///
    /// Called after the `{`.
    fn named_exports(&mut self, specifiers: &mut Vec<Specifier>) -> Result<(), SyntaxError> {
        loop {
            if self.eat_punctuator("}") {
                return Ok(());
            }

            let (name, _) = self.module_export_name()?;
            let alias = if self.eat_identifier("as") {
                Some(self.module_export_name()?.0)
            } else {
                None
            };
            specifiers.push(Specifier::Named { name, alias });

            if !self.eat_punctuator(",") {
                return self.expect_punctuator("}");
            }
        }
    }

    /// ```text
    /// WithClause :
    ///   with { WithEntries? ,? }
    ///   assert { WithEntries? ,? }
    /// AttributeKey : IdentifierName | StringLiteral
    /// ```
    fn with_clause(&mut self) -> Result<Vec<ImportAttribute>, SyntaxError> {
        let mut attributes = Vec::new();
        let introduced = self
            .peek()
            .is_some_and(|token| token.is_identifier("with") || token.is_identifier("assert"));
        let opens_block = self
            .tokens
            .get(self.position + 1)
            .is_some_and(|token| token.is_punctuator("{"));
        if !introduced || !opens_block {
            return Ok(attributes);
        }
        self.position += 2;

        loop {
            if self.eat_punctuator("}") {
                return Ok(attributes);
            }

            let (key, _) = self.module_export_name()?;
            self.expect_punctuator(":")?;
            let value = self.string_literal()?.value;
            attributes.push(ImportAttribute { key, value });

            if !self.eat_punctuator(",") {
                self.expect_punctuator("}")?;
                return Ok(attributes);
            }
        }
    }

    /// "ModuleSpecifier : StringLiteral"
    fn module_specifier(&mut self) -> Result<StringLiteral, SyntaxError> {
        self.string_literal()
    }

    fn string_literal(&mut self) -> Result<StringLiteral, SyntaxError> {
        let token = self.peek().ok_or_else(|| self.eof())?;
        let TokenKind::String { value, quote } = &token.kind else {
            return Err(self.expected("string literal"));
        };
        let literal = StringLiteral {
            value: value.clone(),
            quote: *quote,
            raw: self.text[token.span()].to_string(),
            span: token.span(),
        };
        self.position += 1;
        Ok(literal)
    }

    /// "ModuleExportName : IdentifierName | StringLiteral"
    ///
    /// Returns the name and whether it was written as a string.
    fn module_export_name(&mut self) -> Result<(String, bool), SyntaxError> {
        let token = self.peek().ok_or_else(|| self.eof())?;
        let name = match &token.kind {
            TokenKind::Identifier(name) if !name.starts_with('#') => (name.clone(), false),
            TokenKind::String { value, .. } => (value.clone(), true),
            _ => return Err(self.expected("export name")),
        };
        self.position += 1;
        Ok(name)
    }

    /// "ImportedBinding : BindingIdentifier"
    fn binding_identifier(&mut self) -> Result<String, SyntaxError> {
        let token = self.peek().ok_or_else(|| self.eof())?;
        match token.identifier() {
            Some(name) if is_reserved(name) => Err(SyntaxError::new(
                token.offset,
                format!("unexpected reserved word {name}"),
            )),
            Some(name) if !name.starts_with('#') => {
                let name = name.to_string();
                self.position += 1;
                Ok(name)
            }
            _ => Err(self.expected("identifier")),
        }
    }

    /// Whether the current token follows `.` or `?.`, as in `a.import`.
    fn after_member_access(&self) -> bool {
        self.position
            .checked_sub(1)
            .and_then(|previous| self.tokens.get(previous))
            .is_some_and(|token| token.is_punctuator(".") || token.is_punctuator("?."))
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.position)
    }

    fn eat_identifier(&mut self, name: &str) -> bool {
        let matched = self.peek().is_some_and(|token| token.is_identifier(name));
        if matched {
            self.position += 1;
        }
        matched
    }

    fn eat_punctuator(&mut self, punctuator: &str) -> bool {
        let matched = self
            .peek()
            .is_some_and(|token| token.is_punctuator(punctuator));
        if matched {
            self.position += 1;
        }
        matched
    }

    fn expect_identifier(&mut self, name: &str) -> Result<(), SyntaxError> {
        if self.eat_identifier(name) {
            Ok(())
        } else {
            Err(self.expected(name))
        }
    }

    fn expect_punctuator(&mut self, punctuator: &str) -> Result<(), SyntaxError> {
        if self.eat_punctuator(punctuator) {
            Ok(())
        } else {
            Err(self.expected(punctuator))
        }
    }

    /// Error for a missing `what` at the current token.
    fn expected(&self, what: &str) -> SyntaxError {
        match self.peek() {
            Some(token) => SyntaxError::new(token.offset, format!("expected {what}")),
            None => self.eof(),
        }
    }

    fn eof(&self) -> SyntaxError {
        SyntaxError::unexpected_eof(self.text.len())
    }

    fn current_offset(&self) -> usize {
        self.peek().map_or(self.text.len(), |token| token.offset)
    }

    /// End offset of the last consumed token.
    fn previous_end(&self) -> usize {
        self.position
            .checked_sub(1)
            .and_then(|previous| self.tokens.get(previous))
            .map_or(0, |token| token.end)
    }
}

fn is_reserved(name: &str) -> bool {
    RESERVED_WORDS.contains(&name)
}
