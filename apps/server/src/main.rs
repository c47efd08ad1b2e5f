#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use dotenv::dotenv;
use reply_classifier::{OnnxClassifier, checkpoint, hub};
use reply_classifier_api::{construct_router, state::State};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    tracing::info!("Starting Reply Classifier API Service");

    let config = config::Config::from_env()?;
    tracing::info!(
        "Loaded configuration: port={}, checkpoint_dir={}, temperature={}",
        config.port,
        config.checkpoint_dir.display(),
        config.temperature
    );

    // Model construction failure is fatal: the listener is never bound.
    let artifact_dir = match checkpoint::latest_checkpoint(&config.checkpoint_dir) {
        Some(dir) => {
            tracing::info!("Using local checkpoint {}", dir.display());
            dir
        }
        None => {
            tracing::info!(
                "No checkpoint under {}, fetching {}",
                config.checkpoint_dir.display(),
                config.model_id
            );
            hub::fetch_model(&config.model_id).await?
        }
    };
    let classifier = OnnxClassifier::load(&artifact_dir, config.temperature)?;

    let state = Arc::new(State::new(Arc::new(classifier), config.temperature));
    let app = construct_router(state);

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
