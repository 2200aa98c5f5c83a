//! CLI entry point - the composition root.
//!
//! This is the only place where adapters are wired together: the in-memory
//! clip store is filled from a recordings directory, the dedicated audio
//! thread provides the playback port, and the queue controller drives the
//! session. Everything else talks through the `taptalk-core` ports.

#![deny(unused_crate_dependencies)]

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use taptalk_core::SentenceBuilder;
use taptalk_voice::{
    AudioThreadHandle, InMemoryClipStore, PlaybackEvent, PlaybackQueueController, QueueState,
};

#[derive(Parser)]
#[command(name = "taptalk", version, about = "Voice a sentence from recorded word clips")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the clips available in a recordings directory.
    Clips {
        /// Directory of recordings (one file per card, file stem = card name).
        #[arg(long, default_value = "clips")]
        dir: PathBuf,
    },

    /// Assemble a sentence from words and voice it clip by clip.
    Speak {
        /// Words to speak, in order.
        words: Vec<String>,

        /// Directory of recordings to resolve words against.
        #[arg(long, default_value = "clips")]
        clips: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Clips { dir } => list_clips(&dir),
        Commands::Speak { words, clips } => speak(&words, &clips).await,
    }
}

fn load_store(dir: &Path) -> anyhow::Result<InMemoryClipStore> {
    let store = InMemoryClipStore::new();
    store
        .load_dir(dir)
        .with_context(|| format!("failed to read clip directory {}", dir.display()))?;
    Ok(store)
}

fn list_clips(dir: &Path) -> anyhow::Result<()> {
    let store = load_store(dir)?;
    let names = store.names();
    println!("{} clip(s) in {}", names.len(), dir.display());
    for name in names {
        println!("  {name}");
    }
    Ok(())
}

async fn speak(words: &[String], clips_dir: &Path) -> anyhow::Result<()> {
    anyhow::ensure!(!words.is_empty(), "no words given - nothing to speak");

    let store = load_store(clips_dir)?;
    anyhow::ensure!(
        !store.is_empty(),
        "no playable clips found in {}",
        clips_dir.display()
    );

    let port = AudioThreadHandle::spawn().context("failed to open audio output")?;

    let mut sentence = SentenceBuilder::new();
    for word in words {
        sentence.append(word);
    }
    println!("{}", sentence.display_sentence());

    let (controller, mut events) = PlaybackQueueController::new(Arc::new(store), Arc::new(port));
    controller.start(sentence.snapshot());

    // When nothing resolves the controller stays idle and emits no events,
    // so poll the state alongside the event stream instead of blocking on
    // events alone.
    let mut poll = tokio::time::interval(Duration::from_millis(200));
    poll.tick().await; // first tick resolves immediately

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("interrupted - cancelling playback");
                controller.cancel();
            }
            event = events.recv() => match event {
                Some(PlaybackEvent::Started { clip_count }) => {
                    tracing::info!(clip_count, "speaking");
                }
                Some(PlaybackEvent::ClipStarted { index, text }) => {
                    println!("  [{index}] {text}");
                }
                Some(PlaybackEvent::Finished) => {
                    println!("done");
                    break;
                }
                Some(PlaybackEvent::Cancelled) => {
                    println!("cancelled");
                    break;
                }
                None => break,
            },
            _ = poll.tick() => {
                if controller.state() == QueueState::Idle && events.is_empty() {
                    println!("none of those words have a recorded clip");
                    break;
                }
            }
        }
    }

    Ok(())
}
