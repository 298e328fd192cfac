// HTTP transport used by every endpoint operation.
//
// Operations describe what they want with a [`Request`] and hand it to a
// [`Transport`]. The real implementation, [`HttpTransport`], wraps a
// blocking `reqwest` client; tests substitute a mock.

use reqwest::blocking::{multipart, Client};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, USER_AGENT};
use serde::de::DeserializeOwned;
use std::fs::File;
use tracing::{debug, info};

use crate::error::{Result, SxcuError};

/// Identification sent with every request unless the caller overrides it.
pub const DEFAULT_USER_AGENT: &str = concat!(
    env!("CARGO_PKG_NAME"),
    "/",
    env!("CARGO_PKG_VERSION"),
    " (Rust; https://sxcu.net)"
);

/// HTTP method of a [`Request`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

/// Bytes of a file part.
pub enum FileBody {
    /// A file opened by the operation; it is closed when the request is dropped.
    File(File),
    /// Contents already held in memory.
    Bytes(Vec<u8>),
}

/// A file sent as one field of a multipart body.
pub struct FilePart {
    pub field: String,
    pub file_name: String,
    pub body: FileBody,
}

/// Everything needed to issue one HTTP call.
pub struct Request {
    pub method: Method,
    pub url: String,
    /// Explicit headers; these replace defaults with the same name.
    pub headers: HeaderMap,
    pub form: Vec<(String, String)>,
    pub file: Option<FilePart>,
}

impl Request {
    pub fn get(url: impl Into<String>) -> Self {
        Self::new(Method::Get, url)
    }

    pub fn post(url: impl Into<String>) -> Self {
        Self::new(Method::Post, url)
    }

    fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: HeaderMap::new(),
            form: Vec::new(),
            file: None,
        }
    }

    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    pub fn form(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.form.push((name.into(), value.into()));
        self
    }

    pub fn file(mut self, part: FilePart) -> Self {
        self.file = Some(part);
        self
    }

    /// Value of a form field, if the request carries it.
    pub fn form_value(&self, name: &str) -> Option<&str> {
        self.form
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// A response as received, before any classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    pub headers: HeaderMap,
    pub body: String,
}

impl Response {
    /// Decode the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_str(&self.body).map_err(|e| {
            SxcuError::Decode(format!("response from sxcu.net is not valid JSON: {e}"))
        })
    }
}

/// Issues HTTP calls on behalf of the endpoint operations.
///
/// Implementations must not retry and must return non-success responses
/// as `Ok`; classification is the caller's job.
pub trait Transport: Send + Sync {
    fn send(&self, request: Request) -> Result<Response>;
}

/// [`Transport`] backed by a blocking `reqwest` client.
///
/// One instance can be shared between clients to reuse connections.
#[derive(Clone)]
pub struct HttpTransport {
    client: Client,
    default_headers: HeaderMap,
}

impl HttpTransport {
    /// Create a transport that sends [`DEFAULT_USER_AGENT`].
    pub fn new() -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(DEFAULT_USER_AGENT));
        Self::with_headers(headers)
    }

    /// Create a transport with a custom default header map.
    pub fn with_headers(default_headers: HeaderMap) -> Result<Self> {
        let client = Client::builder().build()?;
        debug!(headers = ?default_headers, "default headers for transport");
        Ok(Self {
            client,
            default_headers,
        })
    }

    /// Defaults with `explicit` inserted over them, one value per name.
    fn header_map(&self, explicit: HeaderMap) -> HeaderMap {
        let mut headers = self.default_headers.clone();
        for (name, value) in explicit {
            if let Some(name) = name {
                headers.insert(name, value);
            }
        }
        headers
    }
}

impl Transport for HttpTransport {
    fn send(&self, request: Request) -> Result<Response> {
        let Request {
            method,
            url,
            headers,
            form,
            file,
        } = request;

        let mut builder = match method {
            Method::Get => {
                debug!(url = %url, "trying to do a GET request");
                self.client.get(&url)
            }
            Method::Post => {
                debug!(url = %url, "trying to do a POST request");
                self.client.post(&url)
            }
        };
        builder = builder.headers(self.header_map(headers));

        if let Some(file) = file {
            let mut multipart_form = multipart::Form::new();
            for (name, value) in form {
                multipart_form = multipart_form.text(name, value);
            }
            let part = match file.body {
                FileBody::File(handle) => multipart::Part::reader(handle),
                FileBody::Bytes(bytes) => multipart::Part::bytes(bytes),
            }
            .file_name(file.file_name);
            builder = builder.multipart(multipart_form.part(file.field, part));
        } else if !form.is_empty() {
            builder = builder.form(&form);
        }

        let res = builder.send()?;
        let status = res.status().as_u16();
        let headers = res.headers().clone();
        debug!(url = %url, headers = ?headers, "received headers");
        debug!(status, "status code returned");

        let body = res.text()?;
        info!(body = %body, "received response");

        Ok(Response {
            status,
            headers,
            body,
        })
    }
}
