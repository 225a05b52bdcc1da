// Tiddler record: the in-memory form of one wiki entry and its JSON
// mapping. Fixed attributes live at the top level of the JSON object;
// extra fields are nested under `fields`, keyed by name.

use crate::error::{Error, Result};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// Content type used for plain wiki text.
pub const DEFAULT_TYPE: &str = "text/vnd.tiddlywiki";

/// One wiki entry. `title` is the key the server addresses it by.
///
/// Timestamps are kept as the opaque strings the server sends
/// (`20191229203445271`), and `tags` is the raw space-separated list.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Tiddler {
    #[serde(deserialize_with = "null_as_empty")]
    pub title: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub created: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub creator: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub modified: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub modifier: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub tags: String,
    #[serde(rename = "type", deserialize_with = "null_as_empty")]
    pub content_type: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub text: String,
    #[serde(deserialize_with = "named_fields")]
    fields: BTreeMap<String, String>,
}

impl Tiddler {
    /// A tiddler with only its title set.
    pub fn new(title: impl Into<String>) -> Self {
        Tiddler {
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn with_tags(mut self, tags: impl Into<String>) -> Self {
        self.tags = tags.into();
        self
    }

    pub fn with_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = content_type.into();
        self
    }

    /// Set an extra field. Empty names are ignored; an existing name has
    /// its value replaced.
    pub fn add_field(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        if name.is_empty() {
            return;
        }
        self.fields.insert(name, value.into());
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// Extra fields, ordered by name.
    pub fn fields(&self) -> &BTreeMap<String, String> {
        &self.fields
    }

    /// Add `text` to the end of the body, separated by a blank line.
    pub fn append_text(&mut self, text: &str) {
        self.text.push_str("\n\n");
        self.text.push_str(text);
    }

    pub fn try_to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(Error::Encode)
    }

    /// Serialize to JSON. Returns an empty string if serialization fails,
    /// so callers must treat `""` as an error.
    pub fn to_json(&self) -> String {
        match self.try_to_json() {
            Ok(json) => json,
            Err(e) => {
                tracing::error!(title = %self.title, error = ?e, "failed to serialize tiddler");
                String::new()
            }
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(Error::Decode)
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

// Servers may send `"fields": null`; entries with an empty name are not
// addressable and get dropped like in `add_field`.
fn named_fields<'de, D>(deserializer: D) -> std::result::Result<BTreeMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    let mut fields = Option::<BTreeMap<String, String>>::deserialize(deserializer)?.unwrap_or_default();
    fields.remove("");
    Ok(fields)
}
