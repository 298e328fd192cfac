// OpenGraph properties attached to an upload.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SxcuError};

/// Controls how the page of an uploaded file embeds in other sites and apps.
///
/// The same value can be reused across uploads. Unset text fields are sent
/// as `false`, which is what sxcu.net expects.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OgProperties {
    #[serde(default, with = "text_or_false")]
    pub color: Option<String>,
    #[serde(default, with = "text_or_false")]
    pub title: Option<String>,
    #[serde(default, with = "text_or_false")]
    pub description: Option<String>,
    #[serde(default)]
    pub discord_hide_url: bool,
    #[serde(default, with = "text_or_false")]
    pub site_name: Option<String>,
}

impl OgProperties {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn discord_hide_url(mut self, hide: bool) -> Self {
        self.discord_hide_url = hide;
        self
    }

    pub fn site_name(mut self, site_name: impl Into<String>) -> Self {
        self.site_name = Some(site_name.into());
        self
    }

    /// Compact JSON sent in the `og_properties` form field.
    pub fn export(&self) -> String {
        // Only strings and bools: serialization cannot fail.
        serde_json::to_string(self).unwrap_or_default()
    }

    /// Parse properties previously produced by [`OgProperties::export`].
    pub fn from_json(contents: &str) -> Result<Self> {
        serde_json::from_str(contents)
            .map_err(|e| SxcuError::Decode(format!("invalid og_properties JSON: {e}")))
    }
}

mod text_or_false {
    use serde::de::{self, Deserializer};
    use serde::ser::Serializer;
    use serde::Deserialize;
    use serde_json::Value;

    pub fn serialize<S: Serializer>(value: &Option<String>, serializer: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(text) => serializer.serialize_str(text),
            None => serializer.serialize_bool(false),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::String(text) => Ok(Some(text)),
            Value::Null | Value::Bool(false) => Ok(None),
            other => Err(de::Error::custom(format!(
                "expected a string or false, got {other}"
            ))),
        }
    }
}
