// Status code classification.
//
// sxcu.net documents a distinct meaning for each error status, and the
// meaning depends on which endpoint answered. `ErrorFamily` names the
// endpoint group, `ErrorKind` the documented failure.

use serde::Deserialize;
use tracing::error;

use crate::error::{Result, SxcuError};
use crate::transport::Response;

/// The only status sxcu.net uses for success.
pub const SUCCESS_CODE: u16 = 200;

/// Endpoint groups that share a status code table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorFamily {
    /// `POST /api/files/create`
    Upload,
    /// The text paste endpoint.
    Text,
    /// `POST /api/links/create`
    Link,
    /// Collections, file metadata and subdomain listing.
    General,
}

/// A documented failure reported by sxcu.net.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidUploadToken,
    CollectionNotFound,
    MethodNotAllowed,
    UploadFailed,
    PrivateSubdomain,
    NoFileSent,
    PrivateCollection,
    MissingUserAgent,
    FileTooLarge,
    OgPropertiesTooLong,
    FileTypeNotAllowed,
    InvalidCollectionToken,
    FileTooSmall,
    MalformedOgProperties,
    RateLimited,
    UnknownUploadError,
    MissingText,
    TextTooLong,
    InvalidLink,
}

impl ErrorKind {
    /// Human readable meaning, as documented by the service.
    pub fn description(self) -> &'static str {
        match self {
            ErrorKind::InvalidUploadToken => {
                "The specified upload token does not match the domain's upload token."
            }
            ErrorKind::CollectionNotFound => "The specified collection was not found.",
            ErrorKind::MethodNotAllowed => "The request method must be POST.",
            ErrorKind::UploadFailed => "An error occurred while handling the uploaded file.",
            ErrorKind::PrivateSubdomain => {
                "The sub domain you tried to upload to is private, \
                 and requires a valid upload token in order to upload to it."
            }
            ErrorKind::NoFileSent => "No binary file was sent in the 'image' field.",
            ErrorKind::PrivateCollection => {
                "The collection you tried to upload to is set to private and requires \
                 a collection token in order to upload to it."
            }
            ErrorKind::MissingUserAgent => "The request did not contain a User-Agent header.",
            ErrorKind::FileTooLarge => "Uploaded file is larger than 95 MB",
            ErrorKind::OgPropertiesTooLong => {
                "The minified og_properties is longer than 250 characters"
            }
            ErrorKind::FileTypeNotAllowed => "The type of the uploaded file is not supported.",
            ErrorKind::InvalidCollectionToken => {
                "The specified collection token does not match the collection's token."
            }
            ErrorKind::FileTooSmall => "Uploaded file is smaller than 12 B",
            ErrorKind::MalformedOgProperties => {
                "The OpenGraph properties JSON array could not be properly \
                 parsed, and is most likely malformed."
            }
            ErrorKind::RateLimited => "The request exceeded the rate limit.",
            ErrorKind::UnknownUploadError => {
                "An unknown error has occurred while processing the \
                 file, try again later."
            }
            ErrorKind::MissingText => "The text POST param is missing.",
            ErrorKind::TextTooLong => "Text is too long (8 MB).",
            ErrorKind::InvalidLink => "The text POST param is missing or invalid URL",
        }
    }
}

impl ErrorFamily {
    /// Look up the documented meaning of `status` for this endpoint group.
    pub fn kind(self, status: u16) -> Option<ErrorKind> {
        use ErrorKind::*;
        match (self, status) {
            (_, 429) => Some(RateLimited),
            (ErrorFamily::Upload, 403) => Some(InvalidUploadToken),
            (ErrorFamily::Upload, 404) => Some(CollectionNotFound),
            (ErrorFamily::Upload, 405) => Some(MethodNotAllowed),
            (ErrorFamily::Upload, 406) => Some(UploadFailed),
            (ErrorFamily::Upload, 407) => Some(PrivateSubdomain),
            (ErrorFamily::Upload, 409) => Some(NoFileSent),
            (ErrorFamily::Upload, 410) => Some(PrivateCollection),
            (ErrorFamily::Upload, 412) => Some(MissingUserAgent),
            (ErrorFamily::Upload, 413) => Some(FileTooLarge),
            (ErrorFamily::Upload, 414) => Some(OgPropertiesTooLong),
            (ErrorFamily::Upload, 415) => Some(FileTypeNotAllowed),
            (ErrorFamily::Upload, 416) => Some(InvalidCollectionToken),
            (ErrorFamily::Upload, 417) => Some(FileTooSmall),
            (ErrorFamily::Upload, 422) => Some(MalformedOgProperties),
            (ErrorFamily::Upload, 500) => Some(UnknownUploadError),
            (ErrorFamily::Text, 409) => Some(MissingText),
            (ErrorFamily::Text, 413) => Some(TextTooLong),
            (ErrorFamily::Link, 400) => Some(InvalidLink),
            _ => None,
        }
    }

    /// Every status code this group documents.
    pub fn documented_codes(self) -> &'static [u16] {
        match self {
            ErrorFamily::Upload => &[
                403, 404, 405, 406, 407, 409, 410, 412, 413, 414, 415, 416, 417, 422, 429, 500,
            ],
            ErrorFamily::Text => &[409, 413, 429],
            ErrorFamily::Link => &[400, 429],
            ErrorFamily::General => &[429],
        }
    }
}

/// Error body sent by sxcu.net alongside a failing status.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    code: Option<i64>,
}

/// Turn a status code and the server's error fields into an outcome.
///
/// Anything other than 200 is logged and returned as
/// [`SxcuError::RemoteService`].
pub fn classify(
    family: ErrorFamily,
    status: u16,
    error_code: Option<i64>,
    error_message: Option<&str>,
) -> Result<()> {
    if status == SUCCESS_CODE {
        return Ok(());
    }

    let kind = family.kind(status);
    let message = match (error_message, kind) {
        (Some(msg), _) if !msg.trim().is_empty() => msg.to_string(),
        (_, Some(kind)) => kind.description().to_string(),
        _ => undocumented(status),
    };

    error!(
        status,
        expected = SUCCESS_CODE,
        "status code from remote does not match the expected one"
    );
    error!(code = ?error_code, "error code from remote");
    error!(reason = %message, "reason for the failure");

    Err(SxcuError::RemoteService {
        status,
        code: error_code,
        kind,
        message,
    })
}

/// Classify a raw response, decoding the error body when there is one.
pub(crate) fn check_response(family: ErrorFamily, response: &Response) -> Result<()> {
    if response.status == SUCCESS_CODE {
        return Ok(());
    }
    let body: ErrorBody = serde_json::from_str(&response.body).unwrap_or_default();
    classify(family, response.status, body.code, body.error.as_deref())
}

fn undocumented(status: u16) -> String {
    match reqwest::StatusCode::from_u16(status)
        .ok()
        .and_then(|s| s.canonical_reason())
    {
        Some(reason) => format!("Unexpected status {status} ({reason}) from sxcu.net"),
        None => format!("Unexpected status {status} from sxcu.net"),
    }
}
