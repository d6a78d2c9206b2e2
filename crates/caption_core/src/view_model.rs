use crate::{CaptionMethod, PreviewHandle};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub preview: Option<PreviewHandle>,
    pub method: CaptionMethod,
    pub can_select_method: bool,
    pub can_generate: bool,
    pub generating: bool,
    pub caption: Option<CaptionBlockView>,
    pub dirty: bool,
}

/// Result block: the caption text and the method that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptionBlockView {
    pub text: String,
    pub method: CaptionMethod,
}
