//! An interactive terminal front-end for the routine advisor session.

#[macro_use]
extern crate tracing;

use std::env;
use std::io::Write as _;
use std::sync::Arc;
use std::time::Duration;

use glow::catalog;
use glow::locale::{self, Direction};
use glow::storage::FileStorage;
use glow_core::conversation::TranscriptSource;
use glow_core::{RequestState, SessionBuilder};
use glow_openai_model::{OpenAIConfigBuilder, OpenAIProvider};
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use tokio::io::{self, AsyncBufReadExt};
use tokio::select;
use tokio::sync::mpsc;
use tokio::time::sleep;

enum SessionEvent {
    Idle,
    Transcript(String, TranscriptSource),
    SelectionChanged(Vec<glow_core::catalog::Product>),
    RequestState(RequestState),
    Notice(String),
}

const BAR_CHAR: &str = "▎";

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let Ok(endpoint) = env::var("GLOW_ENDPOINT") else {
        eprintln!("GLOW_ENDPOINT environment variable is not set");
        return;
    };
    let mut config_builder = OpenAIConfigBuilder::with_endpoint(endpoint);
    if let Ok(model) = env::var("GLOW_MODEL") {
        config_builder = config_builder.with_model(model);
    }
    if let Ok(api_key) = env::var("GLOW_API_KEY") {
        config_builder = config_builder.with_api_key(api_key);
    }

    // The session itself imposes no timeout, so bound requests at the
    // transport layer.
    let http_client = match reqwest::Client::builder()
        .timeout(Duration::from_secs(60))
        .build()
    {
        Ok(client) => client,
        Err(err) => {
            eprintln!("failed to create HTTP client: {err}");
            return;
        }
    };
    let provider =
        OpenAIProvider::with_client(http_client, config_builder.build());

    let catalog_path =
        env::var("GLOW_CATALOG").unwrap_or_else(|_| "products.json".to_owned());
    let products = match catalog::load_products(&catalog_path) {
        Ok(products) => products,
        Err(err) => {
            eprintln!("failed to load catalog from {catalog_path}: {err}");
            return;
        }
    };

    let direction = env::var("LANG")
        .map(|lang| locale::text_direction(&lang))
        .unwrap_or(Direction::Ltr);
    debug!("text direction: {direction:?}");

    let state_dir =
        env::var("GLOW_STATE_DIR").unwrap_or_else(|_| ".glow".to_owned());

    let (event_tx, mut event_rx) = mpsc::unbounded_channel();

    let session = SessionBuilder::with_completion_provider(provider)
        .with_storage(Arc::new(FileStorage::new(state_dir)))
        .on_idle({
            let event_tx = event_tx.clone();
            move || {
                event_tx.send(SessionEvent::Idle).ok();
            }
        })
        .on_transcript({
            let event_tx = event_tx.clone();
            move |transcript, source| {
                event_tx
                    .send(SessionEvent::Transcript(transcript.to_owned(), source))
                    .ok();
            }
        })
        .on_selection_changed({
            let event_tx = event_tx.clone();
            move |selection| {
                event_tx
                    .send(SessionEvent::SelectionChanged(selection.to_vec()))
                    .ok();
            }
        })
        .on_request_state({
            let event_tx = event_tx.clone();
            move |state| {
                event_tx.send(SessionEvent::RequestState(state)).ok();
            }
        })
        .on_notice({
            let event_tx = event_tx.clone();
            move |notice| {
                event_tx.send(SessionEvent::Notice(notice.to_owned())).ok();
            }
        })
        .build();

    println!("Categories: {}", catalog::categories(&products).join(", "));
    println!(
        "Commands: /products <category>, /toggle <id>, /routine, /quit, \
         or type a question."
    );

    'outer: loop {
        print!("> ");
        std::io::stdout().flush().unwrap();

        let Some(line) = read_line().await else {
            break;
        };
        let line = line.trim();

        match line.split_once(' ').unwrap_or((line, "")) {
            ("/quit", _) => break,
            ("/products", category) => {
                let category = category.trim();
                for product in
                    products.iter().filter(|p| p.category == category)
                {
                    println!(
                        "  [{}] {} by {}",
                        product.id, product.name, product.brand
                    );
                }
                continue;
            }
            ("/toggle", id) => {
                let Ok(id) = id.trim().parse::<u32>() else {
                    println!("usage: /toggle <id>");
                    continue;
                };
                let Some(product) = products.iter().find(|p| p.id == id)
                else {
                    println!("no product with id {id}");
                    continue;
                };
                session.toggle_selection(product.clone());
            }
            ("/routine", _) => session.request_routine(),
            _ => session.ask_question(line),
        }

        let progress_style =
            ProgressStyle::with_template("{spinner} {wide_msg}")
                .unwrap()
                .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏");
        let mut progress_bar: Option<ProgressBar> = None;

        loop {
            let sleep = sleep(Duration::from_millis(100));
            let event = select! {
                event = event_rx.recv() => {
                    let Some(event) = event else {
                        break 'outer;
                    };
                    event
                },
                _ = sleep => {
                    if let Some(progress_bar) = &progress_bar {
                        progress_bar.inc(1);
                    }
                    continue;
                }
            };

            // Finish the spinner before printing anything else.
            if let Some(progress_bar) = progress_bar.take() {
                progress_bar.finish_and_clear();
            }

            match event {
                SessionEvent::RequestState(RequestState::Pending) => {
                    let bar = ProgressBar::new_spinner();
                    bar.set_style(progress_style.clone());
                    bar.set_message("✨ Thinking...");
                    progress_bar = Some(bar);
                }
                SessionEvent::RequestState(_) => {}
                SessionEvent::Transcript(transcript, source) => {
                    if source == TranscriptSource::Assistant {
                        println!(
                            "{}✨ {}",
                            BAR_CHAR.bright_cyan(),
                            transcript.bright_white()
                        );
                    }
                }
                SessionEvent::SelectionChanged(selection) => {
                    let names: Vec<_> = selection
                        .iter()
                        .map(|p| p.name.as_str())
                        .collect();
                    println!("Selected: {}", names.join(", ").bright_green());
                }
                SessionEvent::Notice(notice) => {
                    println!(
                        "{}{}",
                        BAR_CHAR.bright_yellow(),
                        notice.bright_yellow()
                    );
                }
                SessionEvent::Idle => {
                    break;
                }
            }
        }
    }
}

async fn read_line() -> Option<String> {
    let mut stdin = io::BufReader::new(io::stdin());
    let mut line = String::new();

    match stdin.read_line(&mut line).await {
        Ok(count) => {
            if count == 0 {
                return None;
            }
            Some(line)
        }
        Err(err) => {
            error!("error reading input: {}", err);
            None
        }
    }
}
