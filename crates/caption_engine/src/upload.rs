use std::time::Duration;

use client_logging::{client_debug, client_error};
use reqwest::multipart::{Form, Part};
use serde::Deserialize;

use crate::{CaptionOutput, FailureKind, ImageSource, RequestId, UploadError};

/// Public captioning service this client talks to by default.
pub const DEFAULT_ENDPOINT: &str = "https://salehmangrio-image-captioning-api.hf.space/caption";

#[derive(Debug, Clone)]
pub struct UploadSettings {
    pub endpoint: String,
    /// Unset means the transport's own behavior applies; the request itself
    /// waits indefinitely.
    pub connect_timeout: Option<Duration>,
    pub request_timeout: Option<Duration>,
}

impl Default for UploadSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            connect_timeout: None,
            request_timeout: None,
        }
    }
}

#[async_trait::async_trait]
pub trait Uploader: Send + Sync {
    /// Uploads the image and resolves to the caption the service produced.
    ///
    /// `method` is passed through verbatim as the `method` query parameter.
    async fn upload(
        &self,
        request_id: RequestId,
        image: &ImageSource,
        method: &str,
    ) -> Result<CaptionOutput, UploadError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestUploader {
    settings: UploadSettings,
}

#[derive(Debug, Deserialize)]
struct CaptionResponse {
    #[serde(default)]
    caption: Option<String>,
}

impl ReqwestUploader {
    pub fn new(settings: UploadSettings) -> Self {
        Self { settings }
    }

    fn build_client(&self) -> Result<reqwest::Client, UploadError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.settings.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }
        if let Some(timeout) = self.settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        builder
            .build()
            .map_err(|err| UploadError::new(FailureKind::Network, err.to_string()))
    }
}

#[async_trait::async_trait]
impl Uploader for ReqwestUploader {
    async fn upload(
        &self,
        request_id: RequestId,
        image: &ImageSource,
        method: &str,
    ) -> Result<CaptionOutput, UploadError> {
        let endpoint = reqwest::Url::parse(&self.settings.endpoint)
            .map_err(|err| UploadError::new(FailureKind::InvalidEndpoint, err.to_string()))?;
        let client = self.build_client()?;

        let bytes = tokio::fs::read(&image.path)
            .await
            .map_err(|err| UploadError::new(FailureKind::FileRead, err.to_string()))?;
        client_debug!(
            "uploading request_id={} file={} bytes={} method={}",
            request_id,
            image.file_name,
            bytes.len(),
            method
        );

        let part = Part::bytes(bytes)
            .file_name(image.file_name.clone())
            .mime_str(&image.mime)
            .map_err(|err| UploadError::new(FailureKind::FileRead, err.to_string()))?;
        let form = Form::new().part("file", part);

        let response = client
            .post(endpoint)
            .query(&[("method", method)])
            .multipart(form)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            // Body is opaque text, logged only; the user never sees it.
            let body = response.text().await.unwrap_or_default();
            client_error!(
                "caption request {} rejected: status={} body={}",
                request_id,
                status.as_u16(),
                body
            );
            return Err(UploadError::new(
                FailureKind::HttpStatus(status.as_u16()),
                format!("server error: {} - {}", status.as_u16(), body),
            ));
        }

        let parsed: CaptionResponse = response.json().await.map_err(|err| {
            if err.is_timeout() {
                UploadError::new(FailureKind::Timeout, err.to_string())
            } else {
                UploadError::new(FailureKind::MalformedResponse, err.to_string())
            }
        })?;

        Ok(CaptionOutput {
            caption: parsed.caption.filter(|caption| !caption.is_empty()),
        })
    }
}

fn map_reqwest_error(err: reqwest::Error) -> UploadError {
    if err.is_timeout() {
        return UploadError::new(FailureKind::Timeout, err.to_string());
    }
    UploadError::new(FailureKind::Network, err.to_string())
}
