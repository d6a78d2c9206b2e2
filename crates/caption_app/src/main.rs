//! Terminal shell for the caption client: selects the image given on the
//! command line, issues one generation request, and prints the result.

mod effects;
mod media;
mod render;

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::mpsc;

use caption_core::{update, AppState, CaptionMethod, Msg, FAILURE_MESSAGE};
use client_logging::{client_info, LogDestination};

use effects::EffectRunner;

const USAGE: &str = "Usage: caption_app <image-file> [--method beam|greedy] [--endpoint <url>]";

struct CliArgs {
    image_path: PathBuf,
    method: CaptionMethod,
    endpoint: Option<String>,
}

impl CliArgs {
    fn parse(mut args: impl Iterator<Item = String>) -> Result<Self, String> {
        let mut image_path = None;
        let mut method = CaptionMethod::default();
        let mut endpoint = None;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--method" => {
                    let value = args.next().ok_or("--method requires a value")?;
                    method = match value.as_str() {
                        "beam" => CaptionMethod::Beam,
                        "greedy" => CaptionMethod::Greedy,
                        other => return Err(format!("unknown method: {other}")),
                    };
                }
                "--endpoint" => {
                    endpoint = Some(args.next().ok_or("--endpoint requires a value")?);
                }
                other if other.starts_with("--") => {
                    return Err(format!("unknown option: {other}"));
                }
                _ => {
                    if image_path.is_some() {
                        return Err("only one image file may be given".to_string());
                    }
                    image_path = Some(PathBuf::from(arg));
                }
            }
        }

        Ok(Self {
            image_path: image_path.ok_or("an image file is required")?,
            method,
            endpoint,
        })
    }
}

fn main() -> ExitCode {
    client_logging::initialize(LogDestination::File);

    let args = match CliArgs::parse(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(message) => {
            eprintln!("{message}");
            eprintln!("{USAGE}");
            return ExitCode::FAILURE;
        }
    };

    let image = media::selected_image_for(&args.image_path);
    client_info!(
        "selected image file={} mime={}",
        image.file_name,
        image.mime
    );

    let (msg_tx, msg_rx) = mpsc::channel::<Msg>();
    let runner = EffectRunner::new(msg_tx.clone(), args.endpoint);

    let _ = msg_tx.send(Msg::ImageSelected(image));
    let _ = msg_tx.send(Msg::MethodSelected(args.method));
    let _ = msg_tx.send(Msg::GenerateClicked);

    let mut state = AppState::new();
    for msg in msg_rx.iter() {
        let completed = matches!(msg, Msg::RequestCompleted { .. });
        let (next, effects) = update(state, msg);
        state = next;
        if state.consume_dirty() {
            render::render(&state.view());
        }
        runner.enqueue(effects);
        if completed {
            break;
        }
    }

    let failed = state
        .view()
        .caption
        .map(|block| block.text == FAILURE_MESSAGE)
        .unwrap_or(true);
    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
