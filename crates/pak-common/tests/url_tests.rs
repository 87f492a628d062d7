//! Integration tests for URL parsing and the rebase/rewrite algebra.

use pak_common::url::{clean, dir, rebase, relative, remove_dot_segments, rewrite};
use pak_common::Url;
use quickcheck_macros::quickcheck;

/// Helper to build a path-only reference
fn path(p: &str) -> Url {
    Url::from_path(p)
}

#[test]
fn test_parse_absolute() {
    let url = Url::parse("https://cdn.example.com:8080/a/b.css?v=1#top").unwrap();
    assert_eq!(url.scheme, "https");
    assert_eq!(url.host, "cdn.example.com:8080");
    assert_eq!(url.path, "/a/b.css");
    assert_eq!(url.query.as_deref(), Some("v=1"));
    assert_eq!(url.fragment.as_deref(), Some("top"));
    assert!(url.is_absolute());
}

#[test]
fn test_parse_relative_forms() {
    assert_eq!(Url::parse("foo.css").unwrap(), path("foo.css"));
    assert_eq!(Url::parse("/foo/bar.css").unwrap(), path("/foo/bar.css"));

    let network = Url::parse("//cdn.example.com/x.js").unwrap();
    assert_eq!(network.scheme, "");
    assert_eq!(network.host, "cdn.example.com");
    assert_eq!(network.path, "/x.js");

    let query = Url::parse("img.png?size=2#frag").unwrap();
    assert_eq!(query.path, "img.png");
    assert_eq!(query.query.as_deref(), Some("size=2"));
    assert_eq!(query.fragment.as_deref(), Some("frag"));
}

#[test]
fn test_parse_invalid() {
    assert!(Url::parse("http://[::1").is_err());
}

#[test]
fn test_display_round_trip() {
    for input in [
        "foo.css",
        "/foo/bar.css",
        "../x.png?a=b#c",
        "//cdn.example.com/x.js",
        "https://example.com/a.css",
        "data:text/plain,hello",
    ] {
        assert_eq!(Url::parse(input).unwrap().to_string(), input);
    }
}

#[test]
fn test_resolve_reference() {
    let base = Url::parse("http://a/b/c/d;p?q").unwrap();
    let resolve = |r: &str| base.resolve_reference(&Url::parse(r).unwrap()).to_string();

    // RFC 3986 § 5.4.1 normal examples
    assert_eq!(resolve("g"), "http://a/b/c/g");
    assert_eq!(resolve("./g"), "http://a/b/c/g");
    assert_eq!(resolve("g/"), "http://a/b/c/g/");
    assert_eq!(resolve("/g"), "http://a/g");
    assert_eq!(resolve("//g"), "http://g");
    assert_eq!(resolve("?y"), "http://a/b/c/d;p?y");
    assert_eq!(resolve("g?y"), "http://a/b/c/g?y");
    assert_eq!(resolve("#s"), "http://a/b/c/d;p?q#s");
    assert_eq!(resolve(".."), "http://a/b/");
    assert_eq!(resolve("../g"), "http://a/b/g");
    assert_eq!(resolve("../../g"), "http://a/g");
}

#[test]
fn test_resolve_against_relative_base() {
    let base = path("/foo/bar.css");
    assert_eq!(base.resolve_reference(&path("foo.css")), path("/foo/foo.css"));
    assert_eq!(base.resolve_reference(&path("../x/y.css")), path("/x/y.css"));
    assert_eq!(base.resolve_reference(&path("/z.css")), path("/z.css"));
}

#[test]
fn test_remove_dot_segments() {
    assert_eq!(remove_dot_segments("/a/b/c/./../../g"), "/a/g");
    assert_eq!(remove_dot_segments("mid/content=5/../6"), "mid/6");
}

#[test]
fn test_path_helpers() {
    assert_eq!(clean("/a//b/./c/.."), "/a/b");
    assert_eq!(clean("../a/../.."), "../..");
    assert_eq!(clean(""), ".");
    assert_eq!(dir("/foo/bar.css"), "/foo");
    assert_eq!(dir("/bar.css"), "/");
    assert_eq!(dir("bar.css"), ".");
    assert_eq!(relative("/bar", "/foo/foo.css").as_deref(), Some("../foo/foo.css"));
    assert_eq!(relative("/", "/a/b.css").as_deref(), Some("a/b.css"));
    assert_eq!(relative("/a", "/a").as_deref(), Some("."));
    assert_eq!(relative("/a", "b"), None);
}

#[test]
fn test_rebase_scenario() {
    let result = rebase(&path("foo.css"), &path("/foo/bar.css"), &path("/bar/baz.css"));
    assert_eq!(result, path("../foo/foo.css"));
}

#[test]
fn test_rebase_rooted_target() {
    let result = rebase(&path("/img/a.png"), &path("/foo/bar.css"), &path("/bar/baz.css"));
    assert_eq!(result, path("/img/a.png"));
}

#[test]
fn test_rebase_keeps_fragment() {
    let target = Url::parse("icons.svg#home").unwrap();
    let result = rebase(&target, &path("/a/x.css"), &path("/y.css"));
    assert_eq!(result.to_string(), "a/icons.svg#home");
}

#[test]
fn test_rebase_other_origin() {
    let from = Url::parse("https://cdn.example.com/css/a.css").unwrap();
    let result = rebase(&path("b.css"), &from, &path("/main.css"));
    assert_eq!(result.to_string(), "https://cdn.example.com/css/b.css");
}

#[test]
fn test_rewrite_scenario() {
    let result = rewrite(&path("/foo/foo.css"), &path("baz.css"), &path("/bar/bar.css"));
    assert_eq!(result, path("../bar/bar.css"));
}

#[test]
fn test_rewrite_rooted_reference() {
    let result = rewrite(&path("/foo/foo.css"), &path("/baz.css"), &path("/bar/bar.css"));
    assert_eq!(result, path("/bar/bar.css"));
}

#[test]
fn test_rewrite_relative_reference_in_absolute_document() {
    let base = Url::parse("https://x.com/a/three.css").unwrap();
    let to = Url::parse("https://x.com/a/one.css").unwrap();
    assert_eq!(rewrite(&base, &path("two.css"), &to), path("one.css"));
    assert_eq!(rewrite(&base, &path("/a/two.css"), &to), path("/a/one.css"));

    let elsewhere = Url::parse("https://y.com/one.css").unwrap();
    assert_eq!(rewrite(&base, &path("two.css"), &elsewhere), elsewhere);
}

#[quickcheck]
fn prop_rebase_keeps_absolute(segment: String, from: String, to: String) -> bool {
    let segment: String = segment.chars().filter(char::is_ascii_alphanumeric).collect();
    let target = Url {
        scheme: "https".to_string(),
        host: "example.com".to_string(),
        path: format!("/{segment}"),
        ..Url::default()
    };
    rebase(&target, &path(&from), &path(&to)) == target
}

#[quickcheck]
fn prop_rewrite_across_origins_returns_to(base: String, from: String, to: String) -> bool {
    let from = Url {
        host: "one.example".to_string(),
        path: from,
        ..Url::default()
    };
    let to = Url {
        host: "two.example".to_string(),
        path: to,
        ..Url::default()
    };
    rewrite(&path(&base), &from, &to) == to
}
