mod command;
mod config;
mod services;
mod state;

use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

use crate::services::ai::{self, PlaceholderGenerator};
use crate::state::{Event, Session};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let filter = EnvFilter::try_from_env("MOODBOARD_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = config::AppConfig::from_env().expect("invalid configuration");

    // Generation falls back to the placeholder rather than refusing to start.
    let generator = match ai::generator_from_config(&config.ai) {
        Ok(generator) => generator,
        Err(e) => {
            tracing::warn!(error = %e, "image generator unavailable; using placeholder");
            Arc::new(PlaceholderGenerator)
        }
    };
    let sink = services::persistence::sink_from_config(&config);

    let (event_tx, event_rx) = mpsc::unbounded_channel();
    let (done_tx, mut done_rx) = mpsc::unbounded_channel();
    let writer = tokio::spawn(write_events(event_rx));
    let mut session = Session::new(&config, generator, sink, event_tx, done_tx);

    tracing::info!(
        board = %config.default_board,
        ai_endpoint = config.ai.url.is_some(),
        save_dir = config.save_dir.is_some(),
        "moodboard session started"
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => match line {
                Ok(Some(line)) => session.handle_line(&line),
                Ok(None) => break,
                Err(e) => {
                    tracing::warn!(error = %e, "stdin read failed");
                    break;
                }
            },
            Some(completion) = done_rx.recv() => session.complete_generation(completion),
        }
    }

    // Input is closed; let in-flight generations land before exiting.
    while session.pending_generations() > 0 {
        let Some(completion) = done_rx.recv().await else {
            break;
        };
        session.complete_generation(completion);
    }

    let boards = session.controller().store.len();
    drop(session);
    if let Err(e) = writer.await {
        tracing::warn!(error = %e, "event writer failed");
    }
    tracing::info!(boards, "moodboard session ended");
}

/// Write each event as one JSON line on stdout until the session closes.
async fn write_events(mut events: mpsc::UnboundedReceiver<Event>) {
    let mut stdout = tokio::io::stdout();
    while let Some(event) = events.recv().await {
        let mut line = match serde_json::to_vec(&event) {
            Ok(line) => line,
            Err(e) => {
                tracing::warn!(error = %e, "event encode failed");
                continue;
            }
        };
        line.push(b'\n');
        if let Err(e) = stdout.write_all(&line).await {
            tracing::warn!(error = %e, "stdout write failed");
            return;
        }
        if let Err(e) = stdout.flush().await {
            tracing::warn!(error = %e, "stdout flush failed");
            return;
        }
    }
}
