use crate::{CaptionMethod, RequestId, RequestOutcome, SelectedImage};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User picked a file from the selection surface.
    ImageSelected(SelectedImage),
    /// User switched the captioning strategy.
    MethodSelected(CaptionMethod),
    /// User triggered caption generation.
    GenerateClicked,
    /// Upload engine resolved a generation attempt.
    RequestCompleted {
        request_id: RequestId,
        outcome: RequestOutcome,
    },
    /// Fallback for placeholder wiring.
    NoOp,
}
