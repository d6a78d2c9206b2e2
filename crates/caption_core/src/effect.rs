use crate::{CaptionMethod, RequestId, SelectedImage};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Upload the image and ask the captioning service for a caption.
    RequestCaption {
        request_id: RequestId,
        image: SelectedImage,
        method: CaptionMethod,
    },
}
