//! [Import maps](https://html.spec.whatwg.org/multipage/webappapis.html#import-maps)
//!
//! "An import map allows control over module specifier resolution."
//!
//! The map is read in document order and written back in the same order.
//! Addresses are kept as written; resolving them is left to whoever follows
//! the references.

use pak_common::Url;
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use serde_json::{Map, Value};

use crate::error::{JsonError, JsonPath, syntax_error};

/// "A specifier map is an ordered map from strings to resolution results."
///
/// Each entry maps one module specifier to its addresses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Specifier {
    /// The specifier key, such as `lodash` or `./lib/`.
    pub key: String,
    /// The addresses, in order.
    pub addresses: Vec<String>,
    /// Whether the addresses were written as an array.
    pub array: bool,
}

/// "A scopes map is an ordered map from URLs to specifier maps."
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scope {
    /// The scope prefix.
    pub prefix: String,
    /// The specifier map applying under the prefix.
    pub imports: Vec<Specifier>,
}

/// Where an address lives in an [`ImportMap`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AddressIndex {
    /// Index into [`ImportMap::scopes`], or `None` for the top-level imports.
    pub scope: Option<usize>,
    /// Index of the specifier in its map.
    pub specifier: usize,
    /// Index of the address in the specifier.
    pub address: usize,
}

/// A parsed import map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportMap {
    /// The top-level `imports` specifier map.
    pub imports: Vec<Specifier>,
    /// The `scopes` maps, in order.
    pub scopes: Vec<Scope>,
    /// Other top-level members, such as `integrity`, kept verbatim.
    pub extra: Map<String, Value>,
}

impl ImportMap {
    /// [§ 8.1.5.3.2 Parse an import map string](https://html.spec.whatwg.org/multipage/webappapis.html#parse-an-import-map-string)
    ///
    /// "Let parsed be the result of parsing a JSON string to an Infra value
    /// given input."
    pub fn parse(text: &str) -> Result<Self, JsonError> {
        let value: Value =
            serde_json::from_str(text).map_err(|error| syntax_error(text, &error))?;

        let root = JsonPath::root();
        // "If parsed is not an ordered map, then throw a TypeError indicating
        // that the top-level value needs to be a JSON object."
        let Value::Object(members) = value else {
            return Err(JsonError::shape(&root, "expected an object"));
        };

        let mut map = Self::default();
        for (key, value) in members {
            match key.as_str() {
                "imports" => map.imports = parse_specifier_map(&value, &root.key("imports"))?,
                "scopes" => map.scopes = parse_scopes(&value, &root.key("scopes"))?,
                _ => {
                    let _ = map.extra.insert(key, value);
                }
            }
        }
        Ok(map)
    }

    /// Every address, with where it lives.
    pub fn addresses(&self) -> impl Iterator<Item = (AddressIndex, &str)> {
        let top = std::iter::once((None, &self.imports));
        let scoped = self
            .scopes
            .iter()
            .enumerate()
            .map(|(index, scope)| (Some(index), &scope.imports));
        top.chain(scoped).flat_map(|(scope, imports)| {
            imports
                .iter()
                .enumerate()
                .flat_map(move |(specifier, entry)| {
                    entry.addresses.iter().enumerate().map(move |(address, value)| {
                        (
                            AddressIndex {
                                scope,
                                specifier,
                                address,
                            },
                            value.as_str(),
                        )
                    })
                })
        })
    }

    /// The address at `index`.
    #[must_use]
    pub fn address(&self, index: AddressIndex) -> Option<&str> {
        let imports = match index.scope {
            None => &self.imports,
            Some(scope) => &self.scopes.get(scope)?.imports,
        };
        imports
            .get(index.specifier)?
            .addresses
            .get(index.address)
            .map(String::as_str)
    }

    /// Replace the address at `index`. Returns false when there is none.
    pub fn set_address(&mut self, index: AddressIndex, value: impl Into<String>) -> bool {
        let imports = match index.scope {
            None => &mut self.imports,
            Some(scope) => match self.scopes.get_mut(scope) {
                Some(scope) => &mut scope.imports,
                None => return false,
            },
        };
        match imports
            .get_mut(index.specifier)
            .and_then(|entry| entry.addresses.get_mut(index.address))
        {
            Some(address) => {
                *address = value.into();
                true
            }
            None => false,
        }
    }

    /// Write the map as pretty-printed JSON.
    #[must_use]
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}

/// Whether an address names a URL rather than another bare specifier:
/// it starts with `/`, `./` or `../`, or carries a scheme.
#[must_use]
pub fn is_url_like(address: &str) -> bool {
    address.starts_with('/')
        || address.starts_with("./")
        || address.starts_with("../")
        || Url::parse(address).is_ok_and(|url| url.is_absolute())
}

/// [§ 8.1.5.3.3 Sort and normalize a specifier map](https://html.spec.whatwg.org/multipage/webappapis.html#sorting-and-normalizing-a-module-specifier-map)
///
/// Entries are kept in document order rather than sorted, so the map is
/// written back the way it was read.
fn parse_specifier_map(value: &Value, path: &JsonPath) -> Result<Vec<Specifier>, JsonError> {
    // "If sortedAndNormalizedImports is not an ordered map, then throw a
    // TypeError indicating that the value for the "imports" top-level key
    // needs to be a JSON object."
    let Value::Object(entries) = value else {
        return Err(JsonError::shape(path, "expected an object"));
    };

    entries
        .iter()
        .map(|(key, value)| {
            let path = path.key(key);
            match value {
                Value::String(address) => Ok(Specifier {
                    key: key.clone(),
                    addresses: vec![address.clone()],
                    array: false,
                }),
                Value::Array(items) => {
                    let addresses = items
                        .iter()
                        .enumerate()
                        .map(|(index, item)| match item {
                            Value::String(address) => Ok(address.clone()),
                            _ => Err(JsonError::shape(&path.index(index), "expected a string")),
                        })
                        .collect::<Result<_, _>>()?;
                    Ok(Specifier {
                        key: key.clone(),
                        addresses,
                        array: true,
                    })
                }
                _ => Err(JsonError::shape(
                    &path,
                    "expected a string or an array of strings",
                )),
            }
        })
        .collect()
}

/// [§ 8.1.5.3.4 Sort and normalize scopes](https://html.spec.whatwg.org/multipage/webappapis.html#sorting-and-normalizing-scopes)
///
/// "If potentialSpecifierMap is not an ordered map, then throw a TypeError
/// indicating that the value of the scope with prefix scopePrefix needs to
/// be a JSON object."
fn parse_scopes(value: &Value, path: &JsonPath) -> Result<Vec<Scope>, JsonError> {
    let Value::Object(entries) = value else {
        return Err(JsonError::shape(path, "expected an object"));
    };

    entries
        .iter()
        .map(|(prefix, value)| {
            Ok(Scope {
                prefix: prefix.clone(),
                imports: parse_specifier_map(value, &path.key(prefix))?,
            })
        })
        .collect()
}

/// A specifier map, serialized as an object.
struct SpecifierMap<'a>(&'a [Specifier]);

impl Serialize for SpecifierMap<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for entry in self.0 {
            map.serialize_entry(&entry.key, entry)?;
        }
        map.end()
    }
}

impl Serialize for Specifier {
    /// A single address is written as a string unless it was read from
    /// an array.
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.addresses.as_slice() {
            [address] if !self.array => serializer.serialize_str(address),
            addresses => {
                let mut seq = serializer.serialize_seq(Some(addresses.len()))?;
                for address in addresses {
                    seq.serialize_element(address)?;
                }
                seq.end()
            }
        }
    }
}

impl Serialize for ImportMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let scopes: Vec<(&String, SpecifierMap<'_>)> = self
            .scopes
            .iter()
            .map(|scope| (&scope.prefix, SpecifierMap(&scope.imports)))
            .collect();

        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("imports", &SpecifierMap(&self.imports))?;
        if !scopes.is_empty() {
            map.serialize_entry("scopes", &ScopesMap(&scopes))?;
        }
        for (key, value) in &self.extra {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

struct ScopesMap<'a>(&'a [(&'a String, SpecifierMap<'a>)]);

impl Serialize for ScopesMap<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (prefix, imports) in self.0 {
            map.serialize_entry(prefix, imports)?;
        }
        map.end()
    }
}
