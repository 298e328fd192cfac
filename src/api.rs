// API client module: the operations that depend on the configured
// subdomain (file uploads and short links). Operations that only talk to
// the public API root live in `service`.

use serde_json::Value;
use std::fs::File;
use std::sync::Arc;
use tracing::debug;

use crate::config::ClientConfig;
use crate::error::Result;
use crate::service::SxcuService;
use crate::status::{check_response, ErrorFamily};
use crate::transport::{FileBody, FilePart, HttpTransport, Request, Transport};
use crate::types::{UploadOptions, UploadSource};
use crate::url::join_url;

/// Client bound to one subdomain. Holds the configuration and the
/// transport; cloning shares the transport.
#[derive(Clone)]
pub struct SxcuClient {
    config: ClientConfig,
    transport: Arc<dyn Transport>,
}

impl SxcuClient {
    /// Client using a new [`HttpTransport`].
    pub fn new(config: ClientConfig) -> Result<Self> {
        Ok(Self::with_transport(config, Arc::new(HttpTransport::new()?)))
    }

    /// Client using an existing transport, e.g. one shared with other clients.
    pub fn with_transport(config: ClientConfig, transport: Arc<dyn Transport>) -> Self {
        debug!(config = ?config, "creating sxcu client");
        Self { config, transport }
    }

    /// Client for the configuration [`ClientConfig::discover`] finds without
    /// an explicit path.
    pub fn from_env() -> Result<Self> {
        Self::new(ClientConfig::discover(None)?)
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Stateless operations, sharing this client's transport.
    pub fn service(&self) -> SxcuService {
        SxcuService::with_transport(Arc::clone(&self.transport))
            .with_api_root(self.config.api_endpoint())
    }

    fn api_url(&self, path: &str) -> String {
        join_url(&join_url(self.config.base_domain(), "/api"), path)
    }

    /// Upload a file to the configured subdomain.
    ///
    /// Returns the JSON sent back by the service, normally
    /// `{"url": ..., "del_url": ..., "thumb": ...}`.
    pub fn upload_file(&self, source: UploadSource<'_>, options: &UploadOptions) -> Result<Value> {
        let mut request = Request::post(self.api_url("/files/create"));
        if let Some(token) = self.config.upload_token() {
            request = request.form("token", token);
        }
        if let Some(collection) = &options.collection {
            request = request.form("collection", collection.as_str());
        }
        if let Some(collection_token) = &options.collection_token {
            request = request.form("collection_token", collection_token.as_str());
        }
        if options.noembed {
            request = request.form("noembed", "");
        }
        if let Some(og) = &options.og_properties {
            request = request.form("og_properties", og.export());
        }
        if options.self_destruct {
            request = request.form("self_destruct", "");
        }

        let part = match source {
            UploadSource::Path(path) => {
                debug!(path = %path.display(), "uploading file");
                let file_name = path
                    .file_name()
                    .and_then(|n| n.to_str())
                    .unwrap_or("file")
                    .to_string();
                FilePart {
                    field: "file".into(),
                    file_name,
                    body: FileBody::File(File::open(path)?),
                }
            }
            UploadSource::Stream { reader, file_name } => {
                let mut contents = Vec::new();
                reader.read_to_end(&mut contents)?;
                debug!(file = file_name, size = contents.len(), "uploading stream");
                FilePart {
                    field: "file".into(),
                    file_name: file_name.to_string(),
                    body: FileBody::Bytes(contents),
                }
            }
        };

        // The request owns the opened file, so it is closed once `send`
        // returns, whatever the outcome.
        let response = self.transport.send(request.file(part))?;
        check_response(ErrorFamily::Upload, &response)?;
        response.json()
    }

    /// Create a short link redirecting to `link`.
    ///
    /// The service validates the URL; nothing is checked here.
    pub fn create_link(&self, link: &str) -> Result<Value> {
        let request = Request::post(self.api_url("/links/create")).form("link", link);
        let response = self.transport.send(request)?;
        check_response(ErrorFamily::Link, &response)?;
        response.json()
    }
}
