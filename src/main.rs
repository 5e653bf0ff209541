use anyhow::{Context, Result};
use lingoverse::catalog::Language;
use lingoverse::config::Config;
use lingoverse::engine::EngineClient;
use lingoverse::orchestrator::{Orchestrator, Submission};
use lingoverse::stats::{BatchProgress, SourceStats};
use lingoverse::store::{SessionStore, SourceSelection, TaskStatus};
use std::io::Read;
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored when absent)
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("lingoverse=info".parse()?),
        )
        .init();

    let config = Config::from_env()?;

    // Seed the session from the environment
    let store = Arc::new(SessionStore::new());
    if let Some(key) = &config.engine_api_key {
        store.set_api_key(key.clone());
    }
    match &config.source_language {
        Some(code) => store.set_source_language(SourceSelection::Explicit(
            Language::from_code(code).context("SOURCE_LANGUAGE is not in the catalog")?,
        )),
        None => store.set_source_language(SourceSelection::AutoDetect),
    }
    for code in &config.target_languages {
        let language =
            Language::from_code(code).context("TARGET_LANGUAGES entry is not in the catalog")?;
        store.toggle_target_language(language);
    }
    store.set_tone(config.tone);

    let mut text = String::new();
    std::io::stdin()
        .read_to_string(&mut text)
        .context("Failed to read source text from stdin")?;
    store.set_source_text(text);

    let mut engine = EngineClient::new(config.engine_url.clone());
    if let Some(timeout) = config.request_timeout {
        engine = engine.with_timeout(timeout);
    }
    let orchestrator =
        Orchestrator::new(engine, Arc::clone(&store)).with_dwell(config.immersive_dwell);

    let source = SourceStats::of(&store.source_text());
    info!(words = source.words, chars = source.chars, "submitting source text");

    let handle = match orchestrator.submit()? {
        Submission::Started(handle) => handle,
        Submission::Skipped => {
            info!("nothing to translate");
            return Ok(());
        }
    };

    handle.settled().await;

    let batch = store.batch().context("Batch vanished before it settled")?;
    if let Some(detected) = store.detected_language() {
        info!(code = detected.code(), name = detected.name(), "detected source language");
    }

    for task in batch.tasks() {
        match &task.status {
            TaskStatus::Succeeded(translated) => {
                println!("[{}] {}", task.language.code(), task.language.name());
                println!("{translated}\n");
            }
            TaskStatus::Failed(message) => {
                println!(
                    "[{}] {} FAILED: {}\n",
                    task.language.code(),
                    task.language.name(),
                    message
                );
            }
            TaskStatus::Pending | TaskStatus::InFlight => {}
        }
    }

    let progress = BatchProgress::of(&batch);
    if let Some(elapsed) = batch.elapsed() {
        println!(
            "Translated {} of {} languages in {:.2}s",
            progress.succeeded,
            progress.total,
            elapsed.as_secs_f64()
        );
    }

    Ok(())
}
