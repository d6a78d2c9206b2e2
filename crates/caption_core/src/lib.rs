//! Caption client core: pure request-lifecycle state machine and view-model helpers.
mod effect;
mod msg;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use msg::Msg;
pub use state::{
    AppState, CaptionMethod, PreviewHandle, RequestId, RequestOutcome, RequestState,
    SelectedImage, FAILURE_MESSAGE, NO_CAPTION_FALLBACK,
};
pub use update::update;
pub use view_model::{AppViewModel, CaptionBlockView};
