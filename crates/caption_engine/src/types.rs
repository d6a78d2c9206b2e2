use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

pub type RequestId = u64;

/// The image to upload: where to read it and how to present it on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageSource {
    pub path: PathBuf,
    pub file_name: String,
    pub mime: String,
}

/// What the captioning service produced for a successful request.
///
/// `caption` is `None` when the response body carried no caption text
/// (absent field or empty string); the caller decides the fallback wording.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptionOutput {
    pub caption: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    RequestCompleted {
        request_id: RequestId,
        result: Result<CaptionOutput, UploadError>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct UploadError {
    pub kind: FailureKind,
    pub message: String,
}

impl UploadError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidEndpoint,
    HttpStatus(u16),
    Timeout,
    FileRead,
    MalformedResponse,
    Network,
    Runtime,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidEndpoint => write!(f, "invalid endpoint"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::FileRead => write!(f, "file read error"),
            FailureKind::MalformedResponse => write!(f, "malformed response"),
            FailureKind::Network => write!(f, "network error"),
            FailureKind::Runtime => write!(f, "runtime error"),
        }
    }
}
