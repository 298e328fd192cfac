// Inputs and outputs of the endpoint operations.

use serde::Deserialize;
use serde_json::{Map, Value};
use std::io::Read;
use std::path::Path;

use crate::og::OgProperties;

/// What to upload: a file on disk or a stream the caller already holds.
pub enum UploadSource<'a> {
    /// Opened and closed by the upload itself.
    Path(&'a Path),
    /// Read to the end but left open; the caller keeps ownership.
    Stream {
        reader: &'a mut dyn Read,
        file_name: &'a str,
    },
}

impl<'a> UploadSource<'a> {
    pub fn path(path: &'a Path) -> Self {
        UploadSource::Path(path)
    }

    pub fn stream(reader: &'a mut dyn Read, file_name: &'a str) -> Self {
        UploadSource::Stream { reader, file_name }
    }
}

/// Optional settings for a file upload.
#[derive(Debug, Clone, Default)]
pub struct UploadOptions {
    /// Collection to add the file to.
    pub collection: Option<String>,
    /// Token of a private collection.
    pub collection_token: Option<String>,
    /// Return a direct link to the file instead of its page.
    pub noembed: bool,
    pub og_properties: Option<OgProperties>,
    /// Delete the file automatically after 24 hours.
    pub self_destruct: bool,
}

impl UploadOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn collection(mut self, id: impl Into<String>, token: Option<String>) -> Self {
        self.collection = Some(id.into());
        self.collection_token = token;
        self
    }

    pub fn noembed(mut self, noembed: bool) -> Self {
        self.noembed = noembed;
        self
    }

    pub fn og_properties(mut self, og: OgProperties) -> Self {
        self.og_properties = Some(og);
        self
    }

    pub fn self_destruct(mut self, self_destruct: bool) -> Self {
        self.self_destruct = self_destruct;
        self
    }
}

/// A collection to create.
///
/// One-off or bot collections should be unlisted.
#[derive(Debug, Clone, Default)]
pub struct NewCollection {
    pub title: String,
    pub private: bool,
    pub unlisted: bool,
    pub description: Option<String>,
}

impl NewCollection {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }
}

/// Changes to apply to an existing collection. Unset fields are left alone.
#[derive(Debug, Clone, Default)]
pub struct CollectionEdit {
    pub title: Option<String>,
    pub description: Option<String>,
    pub unlisted: Option<bool>,
    /// Ask for a new collection token; the response carries it in `token`.
    pub regen_token: bool,
    /// Remove every file from the collection.
    pub empty_collection: bool,
    pub delete_collection: bool,
}

/// One entry of the public subdomain list.
///
/// The service returns plain JSON objects (`domain`, `upload_count`,
/// `public`, `img_views`). Text fields are also exposed as raw bytes, which
/// is how earlier releases handed them out.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct SubdomainRecord {
    fields: Map<String, Value>,
}

impl SubdomainRecord {
    pub fn domain(&self) -> Option<&str> {
        self.text("domain")
    }

    pub fn upload_count(&self) -> Option<u64> {
        self.fields.get("upload_count").and_then(Value::as_u64)
    }

    pub fn is_public(&self) -> Option<bool> {
        self.fields.get("public").and_then(Value::as_bool)
    }

    pub fn text(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(Value::as_str)
    }

    /// Bytes of a string field; `None` for missing or non-string fields.
    pub fn field_bytes(&self, key: &str) -> Option<&[u8]> {
        self.text(key).map(str::as_bytes)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }
}
