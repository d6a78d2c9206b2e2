use std::path::PathBuf;

use crate::view_model::{AppViewModel, CaptionBlockView};

/// Identifies one generation attempt. Monotonically increasing per state.
pub type RequestId = u64;

/// Shown when the service answers 2xx but produces no caption text.
pub const NO_CAPTION_FALLBACK: &str = "No caption generated.";

/// Shown for every failure class; causes are distinguished only in logs.
pub const FAILURE_MESSAGE: &str = "Failed to connect. Please try again.";

/// The image the user picked, as handed over by the file-selection surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedImage {
    pub path: PathBuf,
    pub file_name: String,
    pub mime: String,
}

/// Transient, locally-resolvable reference used only to display the selected
/// image before upload. Exists iff an image is selected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewHandle(String);

impl PreviewHandle {
    pub(crate) fn for_image(image: &SelectedImage) -> Self {
        Self(image.path.display().to_string())
    }

    /// Where the rendering surface can resolve the preview.
    pub fn location(&self) -> &str {
        &self.0
    }
}

/// Server-side decoding strategy selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CaptionMethod {
    /// Higher-quality, slower search.
    #[default]
    Beam,
    /// Faster, locally optimal token selection.
    Greedy,
}

impl CaptionMethod {
    /// Value carried in the `method` query parameter of the upload request.
    pub fn as_query_value(&self) -> &'static str {
        match self {
            CaptionMethod::Beam => "beam",
            CaptionMethod::Greedy => "greedy",
        }
    }

    /// Human-readable name for the result block.
    pub fn label(&self) -> &'static str {
        match self {
            CaptionMethod::Beam => "Beam Search",
            CaptionMethod::Greedy => "Greedy",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RequestState {
    #[default]
    Idle,
    InFlight(RequestId),
}

/// How one generation attempt resolved, as reported back to the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestOutcome {
    /// 2xx with a non-empty `caption` field.
    Caption(String),
    /// 2xx but the `caption` field was absent or empty.
    Empty,
    /// Any error: transport, non-2xx status, unreadable file, bad JSON.
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    image: Option<SelectedImage>,
    preview: Option<PreviewHandle>,
    method: CaptionMethod,
    request: RequestState,
    caption: String,
    // Method that was active when the displayed caption was requested.
    caption_method: Option<CaptionMethod>,
    pending_method: Option<CaptionMethod>,
    next_request_id: RequestId,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> AppViewModel {
        let generating = matches!(self.request, RequestState::InFlight(_));
        AppViewModel {
            preview: self.preview.clone(),
            method: self.method,
            can_select_method: self.image.is_some(),
            can_generate: self.image.is_some() && !generating,
            generating,
            caption: if self.caption.is_empty() {
                None
            } else {
                Some(CaptionBlockView {
                    text: self.caption.clone(),
                    method: self.caption_method.unwrap_or(self.method),
                })
            },
            dirty: self.dirty,
        }
    }

    /// Returns whether a re-render is due and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn select_image(&mut self, image: SelectedImage) {
        self.preview = Some(PreviewHandle::for_image(&image));
        self.image = Some(image);
        self.caption.clear();
        self.caption_method = None;
        self.dirty = true;
    }

    pub(crate) fn set_method(&mut self, method: CaptionMethod) {
        if self.method != method {
            self.method = method;
            self.dirty = true;
        }
    }

    /// Starts a generation attempt if one may start: an image is selected and
    /// no request is in flight. Clears the previous result and returns what
    /// the effect executor needs to issue the upload.
    pub(crate) fn begin_request(&mut self) -> Option<(RequestId, SelectedImage, CaptionMethod)> {
        let image = match (&self.request, &self.image) {
            (RequestState::Idle, Some(image)) => image.clone(),
            _ => return None,
        };
        self.next_request_id += 1;
        let request_id = self.next_request_id;
        self.request = RequestState::InFlight(request_id);
        self.caption.clear();
        self.caption_method = None;
        self.pending_method = Some(self.method);
        self.dirty = true;
        Some((request_id, image, self.method))
    }

    /// Applies a completion for the matching in-flight request. Stale ids
    /// (from an attempt that is no longer current) are ignored.
    pub(crate) fn apply_completion(&mut self, request_id: RequestId, outcome: RequestOutcome) {
        if self.request != RequestState::InFlight(request_id) {
            return;
        }
        self.caption = match outcome {
            RequestOutcome::Caption(text) => text,
            RequestOutcome::Empty => NO_CAPTION_FALLBACK.to_string(),
            RequestOutcome::Failed => FAILURE_MESSAGE.to_string(),
        };
        self.caption_method = self.pending_method.take();
        // The idle transition happens last: the result is already written.
        self.request = RequestState::Idle;
        self.dirty = true;
    }

    pub fn request_state(&self) -> RequestState {
        self.request
    }
}
