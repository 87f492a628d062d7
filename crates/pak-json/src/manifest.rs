//! [Web Application Manifest](https://www.w3.org/TR/appmanifest/)
//!
//! The manifest is kept as a JSON value so members this crate knows nothing
//! about survive a round trip. Image resources are found by walking the
//! members that hold them and are addressed by JSON pointer.

use serde_json::Value;

use crate::error::{JsonError, JsonPath, syntax_error};

/// Top-level members holding a list of
/// [image resources](https://www.w3.org/TR/image-resource/).
const IMAGE_LISTS: [&str; 2] = ["icons", "screenshots"];

/// A parsed web app manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebManifest {
    /// The manifest document, always an object.
    pub value: Value,
}

/// An image resource `src` and the JSON pointer to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageSource {
    /// [RFC 6901](https://www.rfc-editor.org/rfc/rfc6901) pointer, such
    /// as `/icons/0/src`.
    pub pointer: String,
    /// The `src` member as written.
    pub src: String,
}

impl WebManifest {
    /// [§ 3.1 Processing the manifest](https://www.w3.org/TR/appmanifest/#processing)
    ///
    /// "If json is not an ordered map, ... treat the manifest as invalid."
    pub fn parse(text: &str) -> Result<Self, JsonError> {
        let value: Value =
            serde_json::from_str(text).map_err(|error| syntax_error(text, &error))?;
        if !value.is_object() {
            return Err(JsonError::shape(&JsonPath::root(), "expected an object"));
        }
        Ok(Self { value })
    }

    /// The `src` of every image resource in `icons`, `screenshots` and
    /// `shortcuts[].icons`, in document order.
    #[must_use]
    pub fn image_sources(&self) -> Vec<ImageSource> {
        let mut sources = Vec::new();
        for list in IMAGE_LISTS {
            collect_sources(self.value.get(list), &format!("/{list}"), &mut sources);
        }
        if let Some(shortcuts) = self.value.get("shortcuts").and_then(Value::as_array) {
            for (index, shortcut) in shortcuts.iter().enumerate() {
                collect_sources(
                    shortcut.get("icons"),
                    &format!("/shortcuts/{index}/icons"),
                    &mut sources,
                );
            }
        }
        sources
    }

    /// The string at `pointer`.
    #[must_use]
    pub fn get(&self, pointer: &str) -> Option<&str> {
        self.value.pointer(pointer).and_then(Value::as_str)
    }

    /// Replace the string at `pointer`. Returns false when no string lives
    /// there.
    pub fn set(&mut self, pointer: &str, src: impl Into<String>) -> bool {
        match self.value.pointer_mut(pointer) {
            Some(slot) if slot.is_string() => {
                *slot = Value::String(src.into());
                true
            }
            _ => false,
        }
    }

    /// Write the manifest as pretty-printed JSON.
    #[must_use]
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(&self.value).unwrap_or_default()
    }
}

fn collect_sources(list: Option<&Value>, pointer: &str, sources: &mut Vec<ImageSource>) {
    let Some(images) = list.and_then(Value::as_array) else {
        return;
    };
    for (index, image) in images.iter().enumerate() {
        if let Some(src) = image.get("src").and_then(Value::as_str) {
            sources.push(ImageSource {
                pointer: format!("{pointer}/{index}/src"),
                src: src.to_string(),
            });
        }
    }
}
