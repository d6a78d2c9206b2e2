use caption_core::AppViewModel;

/// Prints the current view to the terminal. Purely presentational; every
/// behavior lives in `caption_core`.
pub fn render(view: &AppViewModel) {
    if let Some(preview) = &view.preview {
        println!("Image: {}", preview.location());
    }
    if view.generating {
        println!("Generating caption ({})...", view.method.label());
    }
    if let Some(block) = &view.caption {
        println!("\"{}\"", block.text);
        println!("Method: {}", block.method.label());
    }
}
