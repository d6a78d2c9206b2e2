//! Caption engine: upload execution against the remote captioning service.
mod engine;
mod types;
mod upload;

pub use engine::EngineHandle;
pub use types::{CaptionOutput, EngineEvent, FailureKind, ImageSource, RequestId, UploadError};
pub use upload::{ReqwestUploader, UploadSettings, Uploader, DEFAULT_ENDPOINT};
