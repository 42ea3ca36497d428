use std::path::PathBuf;
use std::sync::Arc;

use anyhow::bail;
use av_core::{view, ClassificationController, Endpoint, ErrorKind, InferenceClient, ViewModel};
use clap::Subcommand;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::picker::{PathPicker, PromptPicker, SharedLines};
use crate::render::render;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Classify a single image and print the result
    Classify {
        /// Path to the image to upload
        path: PathBuf,
        /// Print the view as JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Select and submit images from an interactive prompt
    Interactive,
    /// List the available endpoints
    Endpoints,
}

pub async fn classify(
    endpoint: Endpoint,
    client: Arc<dyn InferenceClient>,
    path: PathBuf,
    json: bool,
) -> anyhow::Result<()> {
    let controller = ClassificationController::new(endpoint.clone(), Arc::new(PathPicker::new(path)), client);

    if let Err(kind) = controller.select_image().await {
        bail!(view::error_message(&kind, &endpoint));
    }
    let outcome = controller.submit().await;

    let view_model = ViewModel::from_state(&controller.state(), &endpoint);
    if json {
        println!("{}", serde_json::to_string_pretty(&view_model)?);
    } else {
        println!("{}", render(&view_model));
    }

    match outcome {
        Ok(_) => Ok(()),
        Err(kind) => bail!(view::error_message(&kind, &endpoint)),
    }
}

pub fn list_endpoints(endpoints: &[Endpoint]) {
    for endpoint in endpoints {
        println!("  {:<6} {}", endpoint.name, endpoint.url);
    }
}

const HELP: &str = "Commands: select, submit, cancel, state, help, quit";

pub async fn interactive(endpoint: Endpoint, client: Arc<dyn InferenceClient>) -> anyhow::Result<()> {
    let lines: SharedLines<_> = Arc::new(Mutex::new(BufReader::new(tokio::io::stdin()).lines()));
    let picker = Arc::new(PromptPicker::new(lines.clone()));
    let controller = Arc::new(ClassificationController::new(endpoint, picker, client));
    run_interactive(controller, lines).await
}

pub async fn run_interactive<R>(controller: Arc<ClassificationController>, lines: SharedLines<R>) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin + Send + 'static,
{
    let renderer = tokio::spawn(render_transitions(controller.clone()));
    println!("{}", HELP);

    loop {
        let line = lines.lock().await.next_line().await?;
        let Some(line) = line else { break };
        let command = line.trim().to_lowercase();
        debug!(command = %command, "Interactive command");

        match command.as_str() {
            "" => continue,
            "select" => {
                if let Err(kind) = controller.select_image().await {
                    println!("{}", view::error_message(&kind, controller.endpoint()));
                }
            }
            "submit" => {
                let controller = controller.clone();
                tokio::spawn(async move {
                    match controller.submit().await {
                        // Rejections do not transition, so the renderer never sees them.
                        Err(kind @ ErrorKind::RequestInProgress) => println!("{}", kind),
                        Err(ErrorKind::Superseded) => info!("Request superseded"),
                        _ => {}
                    }
                });
            }
            "cancel" => {
                if !controller.cancel() {
                    println!("Nothing to cancel.");
                }
            }
            "state" => println!("{}", serde_json::to_string_pretty(&controller.state())?),
            "help" => println!("{}", HELP),
            "quit" | "exit" => break,
            other => println!("Unknown command: {}. {}", other, HELP),
        }
    }

    renderer.abort();
    Ok(())
}

async fn render_transitions(controller: Arc<ClassificationController>) {
    let mut rx = controller.subscribe();
    while rx.changed().await.is_ok() {
        let state = rx.borrow_and_update().clone();
        println!("{}", render(&ViewModel::from_state(&state, controller.endpoint())));
    }
}
