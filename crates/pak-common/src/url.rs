//! URL references and the rebase/rewrite algebra.
//!
//! [RFC 3986](https://www.rfc-editor.org/rfc/rfc3986)
//!
//! Assets address each other through URL references that are frequently
//! relative (`../img/logo.png`). When the graph merges one asset into another
//! those references have to be re-expressed from a new location; [`rebase`]
//! and [`rewrite`] compute the new form.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use thiserror::Error;

/// Failure to parse a URL reference.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UrlError {
    /// The input is not a valid absolute URL or relative reference.
    #[error("invalid URL {input:?}: {source}")]
    Invalid {
        /// The rejected input.
        input: String,
        /// The underlying parse failure.
        #[source]
        source: ::url::ParseError,
    },
}

/// A parsed URL reference.
///
/// [§ 4.1 URI Reference](https://www.rfc-editor.org/rfc/rfc3986#section-4.1)
/// "URI-reference is used to denote the most common usage of a resource
/// identifier."
///
/// Both absolute URLs (`https://cdn.example/a.css`) and relative references
/// (`//cdn.example/a.css`, `/a.css`, `a.css`) are represented. A reference
/// without a scheme is relative.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Url {
    /// Scheme without the trailing colon, empty for relative references.
    pub scheme: String,
    /// Authority host, including a non-default port.
    pub host: String,
    /// Path component, possibly empty.
    pub path: String,
    /// Query without the leading `?`.
    pub query: Option<String>,
    /// Fragment without the leading `#`.
    pub fragment: Option<String>,
}

impl Url {
    /// A relative reference consisting of a path alone.
    #[must_use]
    pub fn from_path(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    /// Parse an absolute URL or a relative reference.
    pub fn parse(input: &str) -> Result<Self, UrlError> {
        match ::url::Url::parse(input) {
            Ok(absolute) => {
                let host = match (absolute.host_str(), absolute.port()) {
                    (Some(host), Some(port)) => format!("{host}:{port}"),
                    (Some(host), None) => host.to_string(),
                    (None, _) => String::new(),
                };
                Ok(Self {
                    scheme: absolute.scheme().to_string(),
                    host,
                    path: absolute.path().to_string(),
                    query: absolute.query().map(str::to_string),
                    fragment: absolute.fragment().map(str::to_string),
                })
            }
            Err(::url::ParseError::RelativeUrlWithoutBase) => Ok(Self::parse_relative(input)),
            Err(source) => Err(UrlError::Invalid {
                input: input.to_string(),
                source,
            }),
        }
    }

    /// [§ 4.2 Relative Reference](https://www.rfc-editor.org/rfc/rfc3986#section-4.2)
    ///
    /// "relative-ref = relative-part [ "?" query ] [ "#" fragment ]"
    fn parse_relative(input: &str) -> Self {
        let (rest, fragment) = match input.split_once('#') {
            Some((rest, fragment)) => (rest, Some(fragment.to_string())),
            None => (input, None),
        };
        let (rest, query) = match rest.split_once('?') {
            Some((rest, query)) => (rest, Some(query.to_string())),
            None => (rest, None),
        };
        let (host, path) = match rest.strip_prefix("//") {
            Some(authority) => {
                let end = authority.find('/').unwrap_or(authority.len());
                (authority[..end].to_string(), authority[end..].to_string())
            }
            None => (String::new(), rest.to_string()),
        };
        Self {
            scheme: String::new(),
            host,
            path,
            query,
            fragment,
        }
    }

    /// A URL is absolute when it carries a scheme.
    #[must_use]
    pub fn is_absolute(&self) -> bool {
        !self.scheme.is_empty()
    }

    /// Whether both URLs share scheme and host.
    #[must_use]
    pub fn same_origin(&self, other: &Self) -> bool {
        self.scheme == other.scheme && self.host == other.host
    }

    /// [§ 5.2.2 Transform References](https://www.rfc-editor.org/rfc/rfc3986#section-5.2.2)
    ///
    /// Resolve `reference` against `self` as the base URL.
    #[must_use]
    pub fn resolve_reference(&self, reference: &Self) -> Self {
        let mut target = Self {
            fragment: reference.fragment.clone(),
            ..Self::default()
        };

        if reference.is_absolute() {
            target.scheme.clone_from(&reference.scheme);
            target.host.clone_from(&reference.host);
            target.path = remove_dot_segments(&reference.path);
            target.query.clone_from(&reference.query);
            return target;
        }

        target.scheme.clone_from(&self.scheme);

        if !reference.host.is_empty() {
            target.host.clone_from(&reference.host);
            target.path = remove_dot_segments(&reference.path);
            target.query.clone_from(&reference.query);
            return target;
        }

        target.host.clone_from(&self.host);

        if reference.path.is_empty() {
            target.path.clone_from(&self.path);
            target.query = reference.query.clone().or_else(|| self.query.clone());
        } else {
            if reference.path.starts_with('/') {
                target.path = remove_dot_segments(&reference.path);
            } else {
                target.path = remove_dot_segments(&self.merge_path(&reference.path));
            }
            target.query.clone_from(&reference.query);
        }
        target
    }

    /// [§ 5.2.3 Merge Paths](https://www.rfc-editor.org/rfc/rfc3986#section-5.2.3)
    fn merge_path(&self, reference: &str) -> String {
        if !self.host.is_empty() && self.path.is_empty() {
            return format!("/{reference}");
        }
        match self.path.rfind('/') {
            Some(i) => format!("{}{reference}", &self.path[..=i]),
            None => reference.to_string(),
        }
    }
}

impl fmt::Display for Url {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_absolute() {
            write!(f, "{}:", self.scheme)?;
        }
        if !self.host.is_empty() || (self.is_absolute() && self.path.starts_with('/')) {
            write!(f, "//{}", self.host)?;
        }
        f.write_str(&self.path)?;
        if let Some(query) = &self.query {
            write!(f, "?{query}")?;
        }
        if let Some(fragment) = &self.fragment {
            write!(f, "#{fragment}")?;
        }
        Ok(())
    }
}

impl std::str::FromStr for Url {
    type Err = UrlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// A URL cell shared between an AST node and the relations pointing into it.
///
/// The cell keeps its identity while its value changes, so a relation can
/// rewrite the URL of an `@import` even after the rule moved to another
/// stylesheet during a merge.
#[derive(Clone, Default)]
pub struct SharedUrl(Rc<RefCell<Url>>);

impl SharedUrl {
    /// Wrap a URL in a new cell.
    #[must_use]
    pub fn new(url: Url) -> Self {
        Self(Rc::new(RefCell::new(url)))
    }

    /// A copy of the current value.
    #[must_use]
    pub fn get(&self) -> Url {
        self.0.borrow().clone()
    }

    /// Replace the current value.
    pub fn set(&self, url: Url) {
        let _ = self.0.replace(url);
    }

    /// Whether both handles address the same cell.
    #[must_use]
    pub fn same_cell(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl PartialEq for SharedUrl {
    fn eq(&self, other: &Self) -> bool {
        self.same_cell(other) || *self.0.borrow() == *other.0.borrow()
    }
}

impl fmt::Debug for SharedUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SharedUrl").field(&*self.0.borrow()).finish()
    }
}

impl From<Url> for SharedUrl {
    fn from(url: Url) -> Self {
        Self::new(url)
    }
}

/// [§ 5.2.4 Remove Dot Segments](https://www.rfc-editor.org/rfc/rfc3986#section-5.2.4)
#[must_use]
pub fn remove_dot_segments(path: &str) -> String {
    let mut input = path;
    let mut output = String::with_capacity(path.len());

    while !input.is_empty() {
        // "A. If the input buffer begins with a prefix of "../" or "./", then
        // remove that prefix from the input buffer"
        if let Some(rest) = input.strip_prefix("../") {
            input = rest;
        } else if let Some(rest) = input.strip_prefix("./") {
            input = rest;
        }
        // "B. if the input buffer begins with a prefix of "/./" or "/.", where
        // "." is a complete path segment, then replace that prefix with "/""
        else if input.starts_with("/./") {
            input = &input[2..];
        } else if input == "/." {
            input = "/";
        }
        // "C. if the input buffer begins with a prefix of "/../" or "/..", where
        // ".." is a complete path segment, then replace that prefix with "/" and
        // remove the last segment and its preceding "/" (if any) from the output
        // buffer"
        else if input.starts_with("/../") {
            input = &input[3..];
            output.truncate(output.rfind('/').unwrap_or(0));
        } else if input == "/.." {
            input = "/";
            output.truncate(output.rfind('/').unwrap_or(0));
        }
        // "D. if the input buffer consists only of "." or "..", then remove that
        // from the input buffer"
        else if input == "." || input == ".." {
            input = "";
        }
        // "E. move the first path segment in the input buffer to the end of the
        // output buffer"
        else {
            let start = usize::from(input.starts_with('/'));
            let end = input[start..].find('/').map_or(input.len(), |i| i + start);
            output.push_str(&input[..end]);
            input = &input[end..];
        }
    }
    output
}

/// Lexically simplify a slash-separated path: collapse repeated slashes,
/// drop `.` segments and fold `..` into its parent where possible.
#[must_use]
pub fn clean(path: &str) -> String {
    let rooted = path.starts_with('/');
    let mut segments: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => match segments.last() {
                Some(&last) if last != ".." => {
                    let _ = segments.pop();
                }
                _ if rooted => {}
                _ => segments.push(".."),
            },
            other => segments.push(other),
        }
    }
    let joined = segments.join("/");
    match (rooted, joined.is_empty()) {
        (true, _) => format!("/{joined}"),
        (false, true) => ".".to_string(),
        (false, false) => joined,
    }
}

/// The directory part of a slash-separated path, cleaned.
///
/// `dir("/foo/bar.css")` is `"/foo"`, `dir("bar.css")` is `"."`.
#[must_use]
pub fn dir(path: &str) -> String {
    match path.rfind('/') {
        Some(i) => clean(&path[..=i]),
        None => ".".to_string(),
    }
}

/// The path that reaches `target` when walked from the directory `base`.
///
/// Both paths must be rooted, or both relative. Returns `None` when no
/// lexical relative path exists, e.g. when `base` climbs above its start.
#[must_use]
pub fn relative(base: &str, target: &str) -> Option<String> {
    let base = clean(base);
    let target = clean(target);
    if base == target {
        return Some(".".to_string());
    }
    if base.starts_with('/') != target.starts_with('/') {
        return None;
    }

    let split = |path: &str| -> Vec<String> {
        path.split('/')
            .filter(|segment| !segment.is_empty() && *segment != ".")
            .map(str::to_string)
            .collect()
    };
    let base_segments = split(&base);
    let target_segments = split(&target);

    let common = base_segments
        .iter()
        .zip(&target_segments)
        .take_while(|(a, b)| a == b)
        .count();

    if base_segments[common..].iter().any(|segment| segment == "..") {
        return None;
    }

    let mut parts: Vec<&str> = vec![".."; base_segments.len() - common];
    parts.extend(target_segments[common..].iter().map(String::as_str));
    if parts.is_empty() {
        return Some(".".to_string());
    }
    Some(parts.join("/"))
}

/// Re-express `target`, a reference written in a document located at `from`,
/// so that it resolves to the same resource from a document located at `to`.
///
/// Absolute references are returned unchanged. References that resolve to
/// the origin of `to` come back as a path: rooted when `target` was rooted,
/// otherwise relative to the directory of `to`. Anything else resolves to
/// an absolute URL.
#[must_use]
pub fn rebase(target: &Url, from: &Url, to: &Url) -> Url {
    if target.is_absolute() {
        return target.clone();
    }

    let resolved = from.resolve_reference(target);
    if !resolved.same_origin(to) {
        return resolved;
    }

    let path = if target.path.starts_with('/') {
        resolved.path.clone()
    } else {
        relative(&dir(&to.path), &resolved.path).unwrap_or_else(|| resolved.path.clone())
    };
    Url {
        path,
        query: resolved.query,
        fragment: resolved.fragment,
        ..Url::default()
    }
}

/// Re-express `from`, a reference written in a document located at `base`,
/// so that it points at the resource that now lives at `to`.
///
/// `from` may be written relative to `base`; its origin is the one it
/// resolves to. When that origin is the origin of `to` the result is a path,
/// rooted when `from` was rooted and otherwise relative to the directory of
/// `base`. The query and fragment of `from` are kept. Across origins the
/// result is `to`.
#[must_use]
pub fn rewrite(base: &Url, from: &Url, to: &Url) -> Url {
    if !base.resolve_reference(from).same_origin(to) {
        return to.clone();
    }

    let path = if from.path.starts_with('/') {
        to.path.clone()
    } else {
        relative(&dir(&base.path), &to.path).unwrap_or_else(|| to.path.clone())
    };
    Url {
        path,
        query: from.query.clone(),
        fragment: from.fragment.clone(),
        ..Url::default()
    }
}
