// Client configuration and `.sxcu` endpoint descriptions.
//
// A `.sxcu` file is what ShareX style tools export for a subdomain:
//
// ```json
// {"RequestURL": "https://example.shx.gg/api/files/create", "Arguments": {"token": "..."}}
// ```
//
// Only `RequestURL` and `Arguments.token` are used.

use serde::Deserialize;
use std::fmt;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{Result, SxcuError};
use crate::url::strip_segments;

/// Public domain used when no subdomain is configured.
pub const DEFAULT_DOMAIN: &str = "https://sxcu.net";

/// Root of the stable API that does not depend on the subdomain.
pub const API_ENDPOINT: &str = "https://sxcu.net/api/";

/// Paste service sxcu.net forwards text uploads to.
pub const UPLOAD_TEXT_ENDPOINT: &str = "https://cancer-co.de/upload";

/// Environment variable naming the `.sxcu` file to use when none is given.
pub const CONFIG_ENV: &str = "SXCU_CONFIG";

/// Number of path segments (`api/files/create`) after the domain in `RequestURL`.
const REQUEST_URL_SUFFIX_SEGMENTS: usize = 3;

/// Settings of one client. Immutable once built.
#[derive(Clone, PartialEq, Eq)]
pub struct ClientConfig {
    base_domain: String,
    upload_token: Option<String>,
    api_endpoint: String,
}

impl ClientConfig {
    /// Configuration for `base_domain`, optionally with its upload token.
    pub fn new(base_domain: impl Into<String>, upload_token: Option<String>) -> Self {
        Self {
            base_domain: base_domain.into(),
            upload_token,
            api_endpoint: API_ENDPOINT.to_string(),
        }
    }

    pub fn builder() -> ClientConfigBuilder<'static> {
        ClientConfigBuilder::default()
    }

    /// Find the configuration to use: `explicit`, else the file named by
    /// `SXCU_CONFIG`, else the per-user default file when it exists, else
    /// the public domain.
    ///
    /// A file that was asked for explicitly or through the environment must
    /// load; there is no fallback past it.
    pub fn discover(explicit: Option<&Path>) -> Result<Self> {
        let from_env = std::env::var_os(CONFIG_ENV)
            .filter(|value| !value.is_empty())
            .map(PathBuf::from);
        discover_from(
            explicit.map(Path::to_path_buf).or(from_env),
            default_config_path(),
        )
    }

    /// Build a configuration straight from an endpoint description.
    pub fn from_sxcu(source: ConfigSource<'_>) -> Result<Self> {
        ClientConfigBuilder::default().sxcu_config(source).build()
    }

    pub fn base_domain(&self) -> &str {
        &self.base_domain
    }

    pub fn upload_token(&self) -> Option<&str> {
        self.upload_token.as_deref()
    }

    pub fn api_endpoint(&self) -> &str {
        &self.api_endpoint
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_DOMAIN, None)
    }
}

// The token is a secret; keep it out of logs and panics.
impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_domain", &self.base_domain)
            .field(
                "upload_token",
                &self.upload_token.as_ref().map(|_| "<redacted>"),
            )
            .field("api_endpoint", &self.api_endpoint)
            .finish()
    }
}

/// Where to read an endpoint description from.
pub enum ConfigSource<'a> {
    /// A `.sxcu` file on disk.
    Path(PathBuf),
    /// An open stream containing the JSON.
    Reader(Box<dyn Read + 'a>),
    /// JSON that was already parsed.
    Value(serde_json::Value),
}

impl ConfigSource<'static> {
    pub fn path(path: impl AsRef<Path>) -> Self {
        ConfigSource::Path(path.as_ref().to_path_buf())
    }
}

impl<'a> ConfigSource<'a> {
    pub fn reader(reader: impl Read + 'a) -> Self {
        ConfigSource::Reader(Box::new(reader))
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
struct Arguments {
    #[serde(default)]
    token: Option<String>,
}

/// The parts of a `.sxcu` file this crate understands.
#[derive(Clone, Deserialize)]
pub struct EndpointDescription {
    #[serde(rename = "RequestURL")]
    request_url: String,
    #[serde(rename = "Arguments", default)]
    arguments: Option<Arguments>,
}

impl EndpointDescription {
    /// Read and parse a description from `source`.
    pub fn load(source: ConfigSource<'_>) -> Result<Self> {
        let invalid = |e: serde_json::Error| SxcuError::Configuration(e.to_string());
        match source {
            ConfigSource::Path(path) => {
                let file = File::open(&path).map_err(|e| {
                    SxcuError::Configuration(format!("cannot open {}: {e}", path.display()))
                })?;
                serde_json::from_reader(BufReader::new(file))
                    .map_err(|e| SxcuError::Configuration(format!("{}: {e}", path.display())))
            }
            ConfigSource::Reader(reader) => serde_json::from_reader(reader).map_err(invalid),
            ConfigSource::Value(value) => serde_json::from_value(value).map_err(invalid),
        }
    }

    /// `RequestURL` without its `/api/files/create` suffix.
    pub fn base_domain(&self) -> String {
        strip_segments(&self.request_url, REQUEST_URL_SUFFIX_SEGMENTS)
    }

    pub fn upload_token(&self) -> Option<&str> {
        self.arguments.as_ref().and_then(|a| a.token.as_deref())
    }
}

/// Builds a [`ClientConfig`]. A `.sxcu` source takes priority over values
/// passed explicitly.
#[derive(Default)]
pub struct ClientConfigBuilder<'a> {
    base_domain: Option<String>,
    upload_token: Option<String>,
    source: Option<ConfigSource<'a>>,
}

impl<'a> ClientConfigBuilder<'a> {
    pub fn base_domain(mut self, base_domain: impl Into<String>) -> Self {
        self.base_domain = Some(base_domain.into());
        self
    }

    pub fn upload_token(mut self, token: impl Into<String>) -> Self {
        self.upload_token = Some(token.into());
        self
    }

    pub fn sxcu_config<'b>(self, source: ConfigSource<'b>) -> ClientConfigBuilder<'b> {
        ClientConfigBuilder {
            base_domain: self.base_domain,
            upload_token: self.upload_token,
            source: Some(source),
        }
    }

    pub fn build(self) -> Result<ClientConfig> {
        let mut base_domain = self
            .base_domain
            .filter(|d| !d.is_empty())
            .unwrap_or_else(|| DEFAULT_DOMAIN.to_string());
        let mut upload_token = self.upload_token;

        if let Some(source) = self.source {
            let description = EndpointDescription::load(source)?;
            base_domain = description.base_domain();
            if base_domain.is_empty() {
                return Err(SxcuError::Configuration(
                    "RequestURL does not contain a domain".into(),
                ));
            }
            if let Some(token) = description.upload_token() {
                upload_token = Some(token.to_string());
            }
        }

        debug!(subdomain = %base_domain, has_token = upload_token.is_some(), "client configured");
        Ok(ClientConfig::new(base_domain, upload_token))
    }
}

/// Per-user location of the default `.sxcu` file, e.g.
/// `~/.config/sxcu/config.sxcu` on Linux.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("sxcu").join("config.sxcu"))
}

fn discover_from(requested: Option<PathBuf>, default: Option<PathBuf>) -> Result<ClientConfig> {
    match requested.or_else(|| default.filter(|path| path.is_file())) {
        Some(path) => {
            debug!(path = %path.display(), "loading endpoint description");
            ClientConfig::from_sxcu(ConfigSource::Path(path))
        }
        None => {
            debug!("no endpoint description found, using the public domain");
            Ok(ClientConfig::default())
        }
    }
}
