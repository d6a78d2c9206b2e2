use crate::{AppState, Effect, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::ImageSelected(image) => {
            state.select_image(image);
            Vec::new()
        }
        Msg::MethodSelected(method) => {
            state.set_method(method);
            Vec::new()
        }
        Msg::GenerateClicked => match state.begin_request() {
            Some((request_id, image, method)) => vec![Effect::RequestCaption {
                request_id,
                image,
                method,
            }],
            // No image selected, or a request is already in flight.
            None => Vec::new(),
        },
        Msg::RequestCompleted {
            request_id,
            outcome,
        } => {
            state.apply_completion(request_id, outcome);
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}
