use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use caption_core::{Effect, Msg, RequestOutcome};
use caption_engine::{
    CaptionOutput, EngineEvent, EngineHandle, ImageSource, RequestId, UploadError, UploadSettings,
};
use client_logging::{client_info, client_warn};

pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(msg_tx: mpsc::Sender<Msg>, endpoint: Option<String>) -> Self {
        let mut settings = UploadSettings::default();
        if let Some(endpoint) = endpoint {
            settings.endpoint = endpoint;
        }

        let engine = EngineHandle::new(settings);
        let runner = Self { engine };
        runner.spawn_event_loop(msg_tx);
        runner
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::RequestCaption {
                    request_id,
                    image,
                    method,
                } => {
                    client_info!(
                        "RequestCaption request_id={} file={} method={}",
                        request_id,
                        image.file_name,
                        method.as_query_value()
                    );
                    let source = ImageSource {
                        path: image.path,
                        file_name: image.file_name,
                        mime: image.mime,
                    };
                    self.engine
                        .submit(request_id, source, method.as_query_value());
                }
            }
        }
    }

    fn spawn_event_loop(&self, msg_tx: mpsc::Sender<Msg>) {
        let engine = self.engine.clone();
        thread::spawn(move || loop {
            if let Some(event) = engine.try_recv() {
                match event {
                    EngineEvent::RequestCompleted { request_id, result } => {
                        let outcome = outcome_for(request_id, result);
                        if msg_tx
                            .send(Msg::RequestCompleted {
                                request_id,
                                outcome,
                            })
                            .is_err()
                        {
                            // Shell is gone; nothing left to notify.
                            return;
                        }
                    }
                }
            } else {
                thread::sleep(Duration::from_millis(20));
            }
        });
    }
}

/// Collapses an engine result onto the controller's outcome vocabulary: a
/// produced caption, a 2xx without caption text, or the single failure class.
fn outcome_for(request_id: RequestId, result: Result<CaptionOutput, UploadError>) -> RequestOutcome {
    match result {
        Ok(output) => match output.caption {
            Some(text) => RequestOutcome::Caption(text),
            None => RequestOutcome::Empty,
        },
        Err(err) => {
            client_warn!("caption request {} failed: {}", request_id, err);
            RequestOutcome::Failed
        }
    }
}
