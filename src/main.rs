//! AI Doctor service entry point.

use std::sync::Arc;

use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ai_doctor::collaborators::{ElevenLabsSynthesizer, GroqTranscriber, GroqVisionAnalyst};
use ai_doctor::{create_router, AppConfig, AppState, ConsultationPipeline};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A `.env` file is optional; deployed environments set variables directly.
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ai_doctor=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting AI Doctor service");

    let config = AppConfig::from_env();
    if config.groq.api_key.is_none() {
        warn!("GROQ_API_KEY is not set; consultations will fail until it is configured");
    }
    if config.elevenlabs.api_key.is_none() {
        warn!("ELEVEN_API_KEY is not set; consultations will fail until it is configured");
    }
    info!(scratch_dir = %config.server.scratch_dir.display(), "Scratch directory");

    let mut transcriber_builder = GroqTranscriber::builder()
        .base_url(config.groq.base_url.clone())
        .model(config.groq.stt_model.clone())
        .language(config.groq.stt_language.clone())
        .timeout_secs(config.server.collaborator_timeout_secs);
    if let Some(key) = &config.groq.api_key {
        transcriber_builder = transcriber_builder.api_key(key.clone());
    }
    let transcriber = transcriber_builder.build()?;

    let mut analyst_builder = GroqVisionAnalyst::builder()
        .base_url(config.groq.base_url.clone())
        .model(config.groq.vision_model.clone())
        .timeout_secs(config.server.collaborator_timeout_secs);
    if let Some(key) = &config.groq.api_key {
        analyst_builder = analyst_builder.api_key(key.clone());
    }
    let analyst = analyst_builder.build()?;

    let mut synthesizer_builder = ElevenLabsSynthesizer::builder()
        .base_url(config.elevenlabs.base_url.clone())
        .voice_id(config.elevenlabs.voice_id.clone())
        .model_id(config.elevenlabs.model_id.clone())
        .output_format(config.elevenlabs.output_format.clone())
        .timeout_secs(config.server.collaborator_timeout_secs);
    if let Some(key) = &config.elevenlabs.api_key {
        synthesizer_builder = synthesizer_builder.api_key(key.clone());
    }
    let synthesizer = synthesizer_builder.build()?;

    let pipeline = ConsultationPipeline::new(
        Arc::new(transcriber),
        Arc::new(analyst),
        Arc::new(synthesizer),
        config.server.scratch_dir.clone(),
    );
    let app = create_router(AppState::new(pipeline), config.server.max_upload_bytes);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Wait for Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down...");
        },
        _ = terminate => {
            info!("Received SIGTERM, shutting down...");
        },
    }
}
