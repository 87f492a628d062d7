//! Integration tests for assets and their references.

use pak_bundle::{Anchor, Asset, AssetError, AssetKind, Reference};
use pak_common::Url;
use pak_common::warning::{emitted_warnings, set_quiet};

/// Helper to parse an asset located at `path`, picking the kind from the path
fn asset(path: &str, text: &str) -> Asset {
    set_quiet(true);
    Asset::from_bytes(Url::from_path(path), text.as_bytes()).unwrap()
}

fn urls(references: &[Reference]) -> Vec<String> {
    references.iter().map(|r| r.url.to_string()).collect()
}

fn data(asset: &Asset) -> String {
    String::from_utf8(asset.data()).unwrap()
}

#[test]
fn test_kind_from_path() {
    assert_eq!(AssetKind::from_path("/a/b.css"), AssetKind::Css);
    assert_eq!(AssetKind::from_path("index.HTML"), AssetKind::Html);
    assert_eq!(AssetKind::from_path("page.htm"), AssetKind::Html);
    assert_eq!(AssetKind::from_path("main.mjs"), AssetKind::Js);
    assert_eq!(AssetKind::from_path("app.importmap"), AssetKind::ImportMap);
    assert_eq!(AssetKind::from_path("/importmap.json"), AssetKind::ImportMap);
    assert_eq!(AssetKind::from_path("site.webmanifest"), AssetKind::WebManifest);
    assert_eq!(AssetKind::from_path("/manifest.json"), AssetKind::WebManifest);
    assert_eq!(AssetKind::from_path("data.json"), AssetKind::Blob);
    assert_eq!(AssetKind::from_path("Makefile"), AssetKind::Blob);
    assert_eq!(AssetKind::ImportMap.to_string(), "import map");
}

#[test]
fn test_media_types() {
    assert_eq!(asset("/a.css", "").media_type(), "text/css");
    assert_eq!(asset("/a.js", "").media_type(), "text/javascript");
    assert_eq!(asset("/a.importmap", "{}").media_type(), "application/importmap+json");
    assert_eq!(asset("/logo.png", "").media_type(), "image/png");
    assert_eq!(asset("/blob.bin", "").media_type(), "application/octet-stream");
}

#[test]
fn test_invalid_utf8() {
    let err = Asset::parse(AssetKind::Css, Url::from_path("/a.css"), b"a{}\xff").unwrap_err();
    assert_eq!(err, AssetError::Syntax(pak_common::SyntaxError::new(3, "invalid utf-8")));

    let blob = Asset::parse(AssetKind::Blob, Url::from_path("/a.bin"), b"\xff\x00").unwrap();
    assert_eq!(blob.data(), b"\xff\x00");
    assert!(blob.references().is_empty());
}

#[test]
fn test_syntax_errors_propagate() {
    let err = Asset::from_bytes(Url::from_path("/a.css"), b"\"foo\n").unwrap_err();
    let AssetError::Syntax(err) = err else {
        panic!("expected a syntax error");
    };
    assert_eq!(err.offset, 4);
    assert_eq!(err.message, "unexpected newline");

    let err = Asset::from_bytes(Url::from_path("/a.importmap"), b"[]").unwrap_err();
    assert!(matches!(err, AssetError::Json(_)));
}

#[test]
fn test_css_references() {
    let css = asset(
        "/css/main.css",
        "@import 'base.css'; @import url(/print.css) print; @media screen { @import '../x.css'; }",
    );
    let references = css.references();
    assert_eq!(urls(&references), ["/css/base.css", "/print.css", "/x.css"]);
    assert_eq!(references[0].flags.get_str("rule"), Some("import"));
    assert!(!references[0].flags.has("media"));
    assert_eq!(references[1].flags.get_str("media"), Some("print"));
    assert!(matches!(references[0].anchor, Anchor::Import(_)));
}

#[test]
fn test_css_rewrite() {
    let mut css = asset("/css/main.css", "@import 'base.css';");
    let mut reference = css.references().remove(0);
    assert!(css.rewrite(&mut reference, &Url::from_path("../shared/base.css")));
    assert_eq!(reference.url.path, "/shared/base.css");
    assert_eq!(data(&css), "@import \"../shared/base.css\";");
    assert_eq!(
        css.written(&reference.anchor),
        Some(Url::from_path("../shared/base.css"))
    );
}

#[test]
fn test_html_references() {
    let html = asset(
        "/site/index.html",
        concat!(
            r#"<!doctype html><html><head>"#,
            r#"<link rel="stylesheet" href="css/main.css" media="screen">"#,
            r#"<script type="module" src="/js/app.js"></script></head>"#,
            r##"<body><img src="data:image/png;base64,AAAA"><a href="#top">x</a>"##,
            r#"<video src="v.mp4" poster="p.jpg"></video>"#,
            r##"<img src="#frag"><iframe src="https://example.com/embed"></iframe></body></html>"##,
        ),
    );
    let references = html.references();
    assert_eq!(
        urls(&references),
        [
            "/site/css/main.css",
            "/js/app.js",
            "/site/v.mp4",
            "/site/p.jpg",
            "https://example.com/embed",
        ]
    );
    let link = &references[0];
    assert_eq!(link.flags.get_str("element"), Some("link"));
    assert_eq!(link.flags.get_str("rel"), Some("stylesheet"));
    assert_eq!(link.flags.get_str("media"), Some("screen"));
    assert_eq!(references[1].flags.get_str("type"), Some("module"));
    assert!(!references[2].flags.has("rel"));
}

#[test]
fn test_html_rewrite() {
    let mut html = asset(
        "/index.html",
        r#"<!doctype html><link rel=stylesheet href="a.css">"#,
    );
    let mut reference = html.references().remove(0);
    assert!(html.rewrite(&mut reference, &Url::from_path("styles/a.css")));
    assert_eq!(reference.url.path, "/styles/a.css");
    assert!(data(&html).contains(r#"href="styles/a.css""#), "{}", data(&html));
}

#[test]
fn test_js_references() {
    let js = asset(
        "/js/app.js",
        concat!(
            "import a from './a.js';\n",
            "import 'lodash';\n",
            "export * from '../lib/b.js';\n",
            "import c from 'https://cdn.example/c.js';\n",
            "const d = import('./d.js');\n",
        ),
    );
    let references = js.references();
    assert_eq!(
        urls(&references),
        ["/js/a.js", "/lib/b.js", "https://cdn.example/c.js"]
    );
    assert_eq!(references[0].flags.get_str("declaration"), Some("import"));
    assert_eq!(references[1].flags.get_str("declaration"), Some("export"));
    assert!(matches!(references[1].anchor, Anchor::Module(2)));
    assert!(
        emitted_warnings()
            .iter()
            .any(|warning| warning.starts_with("[JS] bare specifier \"lodash\""))
    );
}

#[test]
fn test_js_rewrite_keeps_specifier_url_like() {
    let mut js = asset("/app.js", "import a from \"./a.js\";\nexport { b } from './b.js';");
    let mut references = js.references();
    assert!(js.rewrite(&mut references[0], &Url::from_path("lib/a.js")));
    assert!(js.rewrite(&mut references[1], &Url::from_path("/b.js")));
    assert_eq!(
        data(&js),
        "import a from \"./lib/a.js\";\nexport { b } from '/b.js';"
    );
    assert_eq!(references[0].url.path, "/lib/a.js");
}

#[test]
fn test_import_map_references() {
    let map = asset(
        "/maps/app.importmap",
        r#"{"imports": {"lodash": "../vendor/lodash.js", "react": "react-dom"},
            "scopes": {"/admin/": {"ui": ["/admin/ui.js"]}}}"#,
    );
    let references = map.references();
    assert_eq!(urls(&references), ["/vendor/lodash.js", "/admin/ui.js"]);
    assert_eq!(references[0].flags.get_str("specifier"), Some("lodash"));
    assert!(!references[0].flags.has("scope"));
    assert_eq!(references[1].flags.get_str("scope"), Some("/admin/"));
}

#[test]
fn test_import_map_rewrite() {
    let mut map = asset("/app.importmap", r#"{"imports": {"a": "./a.js"}}"#);
    let mut reference = map.references().remove(0);
    assert!(map.rewrite(&mut reference, &Url::from_path("js/a.js")));
    assert!(data(&map).contains(r#""a": "./js/a.js""#), "{}", data(&map));
}

#[test]
fn test_manifest_references() {
    let manifest = asset(
        "/app/site.webmanifest",
        r#"{"name": "x", "icons": [{"src": "icon.png"}, {"src": "data:image/png,AA"}],
            "shortcuts": [{"icons": [{"src": "/s.png"}]}]}"#,
    );
    let references = manifest.references();
    assert_eq!(urls(&references), ["/app/icon.png", "/s.png"]);
    assert_eq!(references[0].flags.get_str("member"), Some("icons"));
    assert_eq!(references[1].flags.get_str("member"), Some("shortcuts"));
    assert_eq!(
        references[1].anchor,
        Anchor::Pointer("/shortcuts/0/icons/0/src".to_string())
    );
}

#[test]
fn test_manifest_rewrite() {
    let mut manifest = asset("/site.webmanifest", r#"{"icons": [{"src": "a.png"}]}"#);
    let mut reference = manifest.references().remove(0);
    assert!(manifest.rewrite(&mut reference, &Url::from_path("img/a.png")));
    assert!(data(&manifest).contains(r#""src": "img/a.png""#));
}

#[test]
fn test_rewrite_foreign_anchor_fails() {
    let mut css = asset("/a.css", "@import 'b.css';");
    let mut reference = Reference::new(Url::from_path("/x.js"), Anchor::Module(0));
    assert!(!css.rewrite(&mut reference, &Url::from_path("y.js")));
    assert_eq!(reference.url.path, "/x.js");
}

#[test]
fn test_only_stylesheets_merge() {
    let mut js = asset("/a.js", "import './b.js';");
    let other = asset("/b.js", "");
    let reference = js.references().remove(0);
    assert!(!js.merge(&other, &reference));

    let mut css = asset("/a.css", "@import 'b.css';");
    let reference = css.references().remove(0);
    assert!(!css.merge(&other, &reference));
}
