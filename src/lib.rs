// Library root
// -----------
// Client for sxcu.net. The binary (`main.rs`) is a thin CLI on top of
// the same modules.
//
// Module responsibilities:
// - `config`: client configuration and `.sxcu` endpoint descriptions.
// - `url`: joining the base domain with endpoint paths.
// - `status`: mapping status codes to documented error kinds.
// - `transport`: the HTTP layer, behind the `Transport` trait.
// - `api`: uploads and links on the configured subdomain.
// - `service`: collections, metadata, subdomains, pastes and deletion.
// - `cli`, `logging`, `ui`: argument parsing, log setup and terminal output
//   for the binary.
pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod og;
pub mod service;
pub mod status;
pub mod transport;
pub mod types;
pub mod ui;
pub mod url;

pub use api::SxcuClient;
pub use config::{ClientConfig, ConfigSource, EndpointDescription};
pub use error::{Result, SxcuError};
pub use og::OgProperties;
pub use service::SxcuService;
pub use status::{ErrorFamily, ErrorKind};
pub use transport::{HttpTransport, Request, Response, Transport};
pub use types::{CollectionEdit, NewCollection, SubdomainRecord, UploadOptions, UploadSource};
