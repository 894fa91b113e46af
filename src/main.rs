pub mod modules;
pub use modules::reels;

use sea_orm::{ConnectOptions, Database};
use std::env;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::reels::adapter::outgoing::cloud_storage::GcsObjectStore;
use crate::reels::adapter::outgoing::db::ReelRepositoryPostgres;
use crate::reels::adapter::outgoing::media::{
    FfmpegEncoder, HttpArtifactFetcher, UnsplashSourceFinder,
};
use crate::reels::adapter::outgoing::openai::OpenAiClient;
use crate::reels::application::domain::entities::GenerationRequest;
use crate::reels::application::ports::incoming::GenerateReelUseCase;
use crate::reels::application::services::{
    GenerateReelService, ImageSourcer, PipelineConfig, ScriptGenerator,
};

#[cfg(test)]
mod tests;

#[tokio::main]
#[cfg(not(tarpaulin_include))]
async fn start() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting reel generator...");

    // Environment variable loading
    let env_name = env::var("RUST_ENV").unwrap_or_else(|_| "development".to_string());

    // Try .env.{environment} first, then fall back to .env
    let env_file = format!(".env.{}", env_name);
    if dotenvy::from_filename(&env_file).is_err() {
        dotenvy::dotenv().ok();
    }

    let db_url = env::var("DATABASE_URL").expect("DATABASE_URL is not set in .env file");
    let openai_api_key =
        env::var("OPENAI_API_KEY").expect("OPENAI_API_KEY is not set in .env file");
    let bucket = env::var("GCS_BUCKET").unwrap_or_else(|_| "sportsreel-media".to_string());

    let mut args = env::args().skip(1);
    let name = args
        .next()
        .ok_or_else(|| anyhow::anyhow!("usage: sportsreel-backend <name> <sport> [description]"))?;
    let sport = args
        .next()
        .ok_or_else(|| anyhow::anyhow!("usage: sportsreel-backend <name> <sport> [description]"))?;
    let description = args.next();

    // Database connection
    let mut opt = ConnectOptions::new(db_url);
    opt.max_connections(10)
        .min_connections(2)
        .connect_timeout(Duration::from_secs(5))
        .acquire_timeout(Duration::from_secs(5))
        .idle_timeout(Duration::from_secs(300))
        .sqlx_logging(false);

    let conn = Database::connect(opt)
        .await
        .expect("Failed to connect to database");
    let db_arc = Arc::new(conn);

    // Collaborators
    let openai = OpenAiClient::new(openai_api_key);
    let fetcher = Arc::new(HttpArtifactFetcher::new());
    let finder = Arc::new(UnsplashSourceFinder::new());

    let mut config = PipelineConfig::default();
    if let Ok(root) = env::var("WORKSPACE_ROOT") {
        config.workspace_root = PathBuf::from(root);
    }
    if let Ok(voice) = env::var("REEL_VOICE") {
        config.voice = voice;
    }

    let service = GenerateReelService::new(
        ScriptGenerator::new(openai.clone()),
        ImageSourcer::standard(
            finder,
            Arc::new(openai.clone()),
            Arc::new(openai.clone()),
            fetcher,
        ),
        openai,
        FfmpegEncoder::new(),
        GcsObjectStore::new(bucket),
        ReelRepositoryPostgres::new(Arc::clone(&db_arc)),
        config,
    );

    let generated = service
        .execute(GenerationRequest {
            name,
            sport,
            description,
            celebrity_id: None,
        })
        .await?;

    println!("{}", serde_json::to_string_pretty(&generated)?);
    Ok(())
}

#[cfg(not(tarpaulin_include))]
fn main() {
    if let Err(e) = start() {
        eprintln!("Error generating reel: {e}");
        std::process::exit(1);
    }
}
