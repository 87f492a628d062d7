//! Integration tests for module declaration parsing and writing.

use pak_common::SyntaxError;
use pak_js::ast::ImportAttribute;
use pak_js::{DeclarationKind, ModuleDeclaration, Program, Specifier};
use quickcheck_macros::quickcheck;

/// Helper to parse a module and unwrap
fn parse(input: &str) -> Program {
    pak_js::parse(input).unwrap()
}

fn error(input: &str) -> SyntaxError {
    pak_js::parse(input).unwrap_err()
}

fn single(input: &str) -> ModuleDeclaration {
    let mut program = parse(input);
    assert_eq!(program.declarations.len(), 1, "{input}");
    program.declarations.remove(0)
}

fn specifiers(input: &str) -> Vec<String> {
    parse(input)
        .declarations
        .into_iter()
        .map(|declaration| declaration.source.value)
        .collect()
}

fn named(name: &str, alias: Option<&str>) -> Specifier {
    Specifier::Named {
        name: name.to_string(),
        alias: alias.map(str::to_string),
    }
}

#[test]
fn test_side_effect_import() {
    let declaration = single(r#"import "./a.js";"#);
    assert_eq!(declaration.kind, DeclarationKind::Import);
    assert!(declaration.specifiers.is_empty());
    assert_eq!(declaration.source.value, "./a.js");
    assert_eq!(declaration.source.quote, '"');
    assert_eq!(declaration.source.raw, r#""./a.js""#);
    assert_eq!(declaration.source.span, 7..15);
    assert_eq!(declaration.span, 0..16);
}

#[test]
fn test_default_import() {
    let declaration = single("import a from './a.js'");
    assert_eq!(declaration.specifiers, [Specifier::Default("a".to_string())]);
    assert_eq!(declaration.source.quote, '\'');
}

#[test]
fn test_namespace_import() {
    let declaration = single(r#"import * as ns from "m";"#);
    assert_eq!(declaration.specifiers, [Specifier::Namespace("ns".to_string())]);
}

#[test]
fn test_named_imports() {
    let declaration = single(r#"import { a, b as c, "d-e" as f, default as g, } from "m";"#);
    assert_eq!(
        declaration.specifiers,
        [
            named("a", None),
            named("b", Some("c")),
            named("d-e", Some("f")),
            named("default", Some("g")),
        ]
    );
}

#[test]
fn test_combined_import_clauses() {
    assert_eq!(
        single(r#"import a, { b } from "m""#).specifiers,
        [Specifier::Default("a".to_string()), named("b", None)]
    );
    assert_eq!(
        single(r#"import a, * as ns from "m""#).specifiers,
        [
            Specifier::Default("a".to_string()),
            Specifier::Namespace("ns".to_string()),
        ]
    );
    assert!(single(r#"import {} from "m""#).specifiers.is_empty());
}

#[test]
fn test_import_attributes() {
    let declaration = single(r#"import data from "./d.json" with { type: "json" };"#);
    assert_eq!(
        declaration.attributes,
        [ImportAttribute {
            key: "type".to_string(),
            value: "json".to_string(),
        }]
    );

    let declaration = single(r#"import data from "./d.json" assert { "type": 'json' }"#);
    assert_eq!(declaration.attributes.len(), 1);
    assert_eq!(declaration.attributes[0].key, "type");
}

#[test]
fn test_re_exports() {
    let program = parse(concat!(
        "export * from \"a\";\n",
        "export * as ns from \"b\";\n",
        "export { x, y as z } from \"c\";\n",
        "export { w };\n",
        "export default 1;\n",
    ));
    let kinds: Vec<DeclarationKind> = program.declarations.iter().map(|d| d.kind).collect();
    assert_eq!(
        kinds,
        [
            DeclarationKind::ExportAll,
            DeclarationKind::ExportAll,
            DeclarationKind::ExportNamed,
        ]
    );
    assert!(program.declarations[0].specifiers.is_empty());
    assert_eq!(
        program.declarations[1].specifiers,
        [Specifier::Namespace("ns".to_string())]
    );
    assert_eq!(
        program.declarations[2].specifiers,
        [named("x", None), named("y", Some("z"))]
    );
}

#[test]
fn test_dynamic_import_and_import_meta_are_skipped() {
    assert!(specifiers(r#"import("./x.js"); const u = import.meta.url;"#).is_empty());
}

#[test]
fn test_nested_and_member_imports_are_skipped() {
    assert!(
        specifiers(r#"function f() { import("./y.js") } const o = { import: 1 }; o.import;"#)
            .is_empty()
    );
}

#[test]
fn test_imports_inside_literals_are_skipped() {
    let input = concat!(
        "const s = \"import x from 'y'\"; // import \"z\"\n",
        "const t = `import a from \"b\"`;\n",
        "const r = /import \"c\"/;\n",
    );
    assert!(specifiers(input).is_empty());
}

#[test]
fn test_declarations_without_semicolons() {
    assert_eq!(
        specifiers("import a from 'a'\nimport b from 'b'\nfoo()\nexport * from 'c'"),
        ["a", "b", "c"]
    );
}

#[test]
fn test_missing_closing_brace() {
    let err = error(r#"import { a from "m""#);
    assert_eq!(err.offset, 11);
    assert_eq!(err.message, "expected }");
}

#[test]
fn test_missing_from() {
    let err = error(r#"import a "m""#);
    assert_eq!(err.offset, 9);
    assert_eq!(err.message, "expected from");
}

#[test]
fn test_string_import_name_needs_alias() {
    let err = error(r#"import { "x" } from "m""#);
    assert_eq!(err.offset, 13);
    assert_eq!(err.message, "expected as");
}

#[test]
fn test_reserved_word_binding() {
    let err = error(r#"import { class } from "m""#);
    assert_eq!(err.offset, 9);
    assert_eq!(err.message, "unexpected reserved word class");
}

#[test]
fn test_specifier_must_be_string() {
    let err = error("import x from y");
    assert_eq!(err.offset, 14);
    assert_eq!(err.message, "expected string literal");

    let err = error("import x from");
    assert_eq!(err.offset, 13);
    assert_eq!(err.message, "unexpected end of file");
}

#[test]
fn test_namespace_needs_as() {
    let err = error(r#"import * from "m""#);
    assert_eq!(err.offset, 9);
    assert_eq!(err.message, "expected as");
}

#[test]
fn test_write_replaces_specifiers() {
    let mut program = parse(concat!(
        "import a from './a.js';\n",
        "export * from \"./b.js\";\n",
        "console.log(a);\n",
    ));
    assert!(program.set_specifier(0, "./dist/a.js"));
    assert!(program.set_specifier(1, "https://cdn.example/b.js"));
    assert!(!program.set_specifier(2, "nope"));
    assert_eq!(program.specifier(0), Some("./dist/a.js"));

    assert_eq!(
        pak_js::write(&program),
        concat!(
            "import a from './dist/a.js';\n",
            "export * from \"https://cdn.example/b.js\";\n",
            "console.log(a);\n",
        )
    );
}

#[test]
fn test_write_escapes_quote_mark() {
    let mut program = parse("import 'x';");
    assert!(program.set_specifier(0, "./it's.js"));
    assert_eq!(pak_js::write(&program), r"import './it\'s.js';");
}

#[test]
fn test_write_keeps_untouched_specifiers_verbatim() {
    let input = r#"import a from "\x2e/a.js"; export { b } from './b.js'"#;
    let program = parse(input);
    assert_eq!(program.specifier(0), Some("./a.js"));
    assert_eq!(pak_js::write(&program), input);
}

#[quickcheck]
fn prop_write_without_changes_is_identity(input: String) -> bool {
    match pak_js::parse(&input) {
        Ok(program) => pak_js::write(&program) == input,
        Err(_) => true,
    }
}
