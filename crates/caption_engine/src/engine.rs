use std::sync::{mpsc, Arc, Mutex};
use std::thread;

use crate::upload::{ReqwestUploader, UploadSettings, Uploader};
use crate::{EngineEvent, FailureKind, ImageSource, RequestId, UploadError};

enum EngineCommand {
    Submit {
        request_id: RequestId,
        image: ImageSource,
        method: String,
    },
}

/// Handle to the background upload runtime.
///
/// Every accepted command produces exactly one `RequestCompleted` event.
/// Events sent after the last handle is dropped are discarded silently, so a
/// teardown during an in-flight request simply loses the response.
#[derive(Clone)]
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: Arc<Mutex<mpsc::Receiver<EngineEvent>>>,
}

impl EngineHandle {
    pub fn new(settings: UploadSettings) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let uploader = Arc::new(ReqwestUploader::new(settings));

        thread::spawn(move || {
            let runtime = match tokio::runtime::Runtime::new() {
                Ok(runtime) => runtime,
                Err(err) => {
                    client_logging::client_error!("tokio runtime unavailable: {err}");
                    fail_pending_commands(cmd_rx, event_tx, &err.to_string());
                    return;
                }
            };
            while let Ok(command) = cmd_rx.recv() {
                let uploader = uploader.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    handle_command(uploader.as_ref(), command, event_tx).await;
                });
            }
        });

        Self {
            cmd_tx,
            event_rx: Arc::new(Mutex::new(event_rx)),
        }
    }

    pub fn submit(&self, request_id: RequestId, image: ImageSource, method: impl Into<String>) {
        let _ = self.cmd_tx.send(EngineCommand::Submit {
            request_id,
            image,
            method: method.into(),
        });
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.lock().ok()?.try_recv().ok()
    }
}

/// Keeps the one-completion-per-command guarantee when the runtime could not
/// start: every command still resolves, as a failure.
fn fail_pending_commands(
    cmd_rx: mpsc::Receiver<EngineCommand>,
    event_tx: mpsc::Sender<EngineEvent>,
    message: &str,
) {
    while let Ok(EngineCommand::Submit { request_id, .. }) = cmd_rx.recv() {
        let _ = event_tx.send(EngineEvent::RequestCompleted {
            request_id,
            result: Err(UploadError::new(FailureKind::Runtime, message)),
        });
    }
}

async fn handle_command(
    uploader: &dyn Uploader,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    match command {
        EngineCommand::Submit {
            request_id,
            image,
            method,
        } => {
            let result = uploader.upload(request_id, &image, &method).await;
            let _ = event_tx.send(EngineEvent::RequestCompleted { request_id, result });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commands_still_complete_when_runtime_is_unavailable() {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        cmd_tx
            .send(EngineCommand::Submit {
                request_id: 7,
                image: ImageSource {
                    path: "/photos/dog.jpg".into(),
                    file_name: "dog.jpg".to_string(),
                    mime: "image/jpeg".to_string(),
                },
                method: "beam".to_string(),
            })
            .unwrap();
        drop(cmd_tx);

        fail_pending_commands(cmd_rx, event_tx, "thread limit reached");

        match event_rx.recv().unwrap() {
            EngineEvent::RequestCompleted { request_id, result } => {
                assert_eq!(request_id, 7);
                let err = result.unwrap_err();
                assert_eq!(err.kind, FailureKind::Runtime);
                assert_eq!(err.message, "thread limit reached");
            }
        }
        assert!(event_rx.recv().is_err());
    }
}
