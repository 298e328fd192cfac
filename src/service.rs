// Operations on the public sxcu.net API that do not depend on a subdomain:
// collections, file metadata, subdomain listing, text pastes and deletion.

use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::config::{API_ENDPOINT, UPLOAD_TEXT_ENDPOINT};
use crate::error::{Result, SxcuError};
use crate::status::{check_response, ErrorFamily, SUCCESS_CODE};
use crate::transport::{HttpTransport, Request, Response, Transport};
use crate::types::{CollectionEdit, NewCollection, SubdomainRecord};
use crate::url::{file_id_from_url, join_url};

/// Stateless handle on the public API. Holds nothing but the transport and
/// the API root, so it is cheap to clone and share.
#[derive(Clone)]
pub struct SxcuService {
    transport: Arc<dyn Transport>,
    api_root: String,
    text_endpoint: String,
}

impl SxcuService {
    pub fn new() -> Result<Self> {
        Ok(Self::with_transport(Arc::new(HttpTransport::new()?)))
    }

    pub fn with_transport(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            api_root: API_ENDPOINT.to_string(),
            text_endpoint: UPLOAD_TEXT_ENDPOINT.to_string(),
        }
    }

    /// Point the service at a different API root.
    pub fn with_api_root(mut self, api_root: impl Into<String>) -> Self {
        self.api_root = api_root.into();
        self
    }

    pub fn api_root(&self) -> &str {
        &self.api_root
    }

    fn url(&self, path: &str) -> String {
        join_url(&self.api_root, path)
    }

    fn call(&self, family: ErrorFamily, request: Request) -> Result<Response> {
        let response = self.transport.send(request)?;
        check_response(family, &response)?;
        Ok(response)
    }

    /// Create a collection. The response carries `collection_id` and
    /// `collection_token`.
    pub fn create_collection(&self, collection: &NewCollection) -> Result<Value> {
        let mut request = Request::post(self.url("/collections/create"))
            .form("title", collection.title.as_str())
            .form("private", bool_field(collection.private))
            .form("unlisted", bool_field(collection.unlisted));
        if let Some(desc) = &collection.description {
            request = request.form("desc", desc.as_str());
        }
        self.call(ErrorFamily::General, request)?.json()
    }

    /// Edit, empty or delete a collection.
    ///
    /// The response's `token` is the regenerated collection token, or null
    /// when none was requested.
    pub fn edit_collection(
        &self,
        collection_id: &str,
        collection_token: &str,
        edit: &CollectionEdit,
    ) -> Result<Value> {
        let mut request = Request::post(self.url(&format!("/collections/edit/{collection_id}")))
            .form("collection_token", collection_token);
        if let Some(title) = &edit.title {
            request = request.form("title", title.as_str());
        }
        if let Some(desc) = &edit.description {
            request = request.form("desc", desc.as_str());
        }
        if let Some(unlisted) = edit.unlisted {
            request = request.form("unlisted", bool_field(unlisted));
        }
        if edit.regen_token {
            request = request.form("regen_token", bool_field(true));
        }
        if edit.empty_collection {
            request = request.form("empty_collection", bool_field(true));
        }
        if edit.delete_collection {
            request = request.form("delete_collection", bool_field(true));
        }

        let response = self.call(ErrorFamily::General, request)?;
        let body: Value = response.json()?;
        if body.is_array() {
            // Seen when no token is regenerated; the API answers with a list.
            warn!(body = %body, "collection edit returned a list, treating it as no new token");
            return Ok(json!({ "token": null }));
        }
        Ok(body)
    }

    /// Details of a collection and the files in it.
    pub fn collection_meta(&self, collection_id: &str) -> Result<Value> {
        let request = Request::get(self.url(&format!("/collections/{collection_id}")));
        self.call(ErrorFamily::General, request)?.json()
    }

    /// Paste `text` through the text service sxcu.net uses.
    pub fn upload_text(&self, text: &str) -> Result<Value> {
        let request = Request::post(self.text_endpoint.as_str()).form("text", text);
        self.call(ErrorFamily::Text, request)?.json()
    }

    /// Metadata of an uploaded file, looked up by id or by its URL.
    ///
    /// The id is the same on every subdomain. When both are given the id
    /// is used.
    pub fn file_meta(&self, file_id: Option<&str>, file_url: Option<&str>) -> Result<Value> {
        let id = match (file_id.filter(|id| !id.is_empty()), file_url) {
            (Some(id), _) => Some(id),
            (None, Some(url)) => file_id_from_url(url),
            (None, None) => None,
        }
        .ok_or(SxcuError::MissingArgument("file_id or file_url"))?;
        debug!(file_id = id, "fetching file metadata");
        let request = Request::get(self.url(&format!("/files/{id}")));
        self.call(ErrorFamily::General, request)?.json()
    }

    /// Public subdomains sorted by upload count. `count == -1` returns all
    /// of them, otherwise at most `count`.
    pub fn list_subdomains(&self, count: i64) -> Result<Vec<SubdomainRecord>> {
        let request = Request::get(self.url("/subdomains"));
        let mut records: Vec<SubdomainRecord> = self.call(ErrorFamily::General, request)?.json()?;
        if count != -1 {
            records.truncate(usize::try_from(count).unwrap_or(0));
        }
        Ok(records)
    }

    /// Delete an upload through the `del_url` returned when it was made.
    ///
    /// Returns whether the service answered 200; other statuses are not
    /// errors here.
    pub fn delete_file(&self, delete_url: &str) -> Result<bool> {
        let response = self.transport.send(Request::get(delete_url))?;
        debug!(status = response.status, "delete request finished");
        Ok(response.status == SUCCESS_CODE)
    }
}

fn bool_field(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}
