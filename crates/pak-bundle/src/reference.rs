//! Relations between assets.
//!
//! A [`Reference`] is the edge value of the bundle graph: the URL one asset
//! uses to address another, the flags describing how it is used and the
//! [`Anchor`] naming where in the owning asset's syntax tree the URL lives.

use pak_common::{SharedUrl, Url};
use pak_json::AddressIndex;
use serde_json::{Map, Value};

/// A URL reference from one asset to another.
#[derive(Debug, Clone, PartialEq)]
pub struct Reference {
    /// The target, resolved against the owning asset's URL.
    pub url: Url,
    /// How the reference is used, such as the element it sits on.
    pub flags: Flags,
    /// Where the URL is written in the owning asset.
    pub anchor: Anchor,
}

impl Reference {
    /// A reference with no flags.
    #[must_use]
    pub fn new(url: Url, anchor: Anchor) -> Self {
        Self {
            url,
            flags: Flags::default(),
            anchor,
        }
    }

    /// Add a flag, builder style.
    #[must_use]
    pub fn with_flag(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.flags.set(key, value);
        self
    }
}

/// The place in an asset's syntax tree a reference URL is written.
#[derive(Debug, Clone, PartialEq)]
pub enum Anchor {
    /// The URL cell of a CSS `@import` rule.
    Import(SharedUrl),
    /// An attribute of an HTML element.
    Attribute {
        /// The element.
        element: pak_dom::NodeId,
        /// The attribute name, such as `href`.
        name: String,
    },
    /// The module specifier of a JavaScript declaration, by index.
    Module(usize),
    /// An import map address.
    Address(AddressIndex),
    /// A web manifest member, by JSON pointer.
    Pointer(String),
}

/// Ordered string-keyed flags with opaque values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Flags(Map<String, Value>);

impl Flags {
    /// Whether `key` is set.
    #[must_use]
    pub fn has(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// The value of `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// The value of `key` when it is a string.
    #[must_use]
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    /// Set `key`, replacing any previous value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        let _ = self.0.insert(key.into(), value.into());
    }

    /// Remove `key`, returning its value.
    pub fn delete(&mut self, key: &str) -> Option<Value> {
        self.0.remove(key)
    }

    /// Keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Number of flags.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no flag is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
