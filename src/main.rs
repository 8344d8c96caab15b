use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

use prosegen::config;
use prosegen::generator::Generator;
use prosegen::keys::KeyPool;
use prosegen::options;
use prosegen::providers::{GeminiProvider, MockProvider, TextProvider};
use prosegen::request::GenerationRequest;
use prosegen::store::MemoryStore;

#[derive(Parser)]
#[command(name = "prosegen", about = "Creative-writing generation service")]
struct Cli {
    /// Service config YAML; defaults match the original deployment.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate one writing and record it to history.
    Generate {
        /// Free-text instructions for the model.
        #[arg(long)]
        text: String,
        #[arg(long)]
        mood: String,
        #[arg(long = "type")]
        content_type: String,
        #[arg(long)]
        genre: String,
        #[arg(long)]
        length: String,
        /// Attribute the history entry to this user; a fresh id otherwise.
        #[arg(long)]
        user: Option<Uuid>,
        /// Also file the result into a new collection with this name.
        #[arg(long)]
        collection: Option<String>,
    },
    /// Print the selectable moods, types, genres, and lengths as JSON.
    Options,
    /// Audit the credential pool: which env vars are set, and usage stats.
    Keys,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let cfg = config::load_or_default(cli.config.as_deref())?;

    match cli.command {
        Command::Generate {
            text,
            mood,
            content_type,
            genre,
            length,
            user,
            collection,
        } => {
            let req = GenerationRequest::parse(&text, &mood, &content_type, &genre, &length)
                .map_err(|e| anyhow!("invalid request: {e}"))?;

            let pool = Arc::new(KeyPool::from_env(&cfg.keys.env_vars));
            let provider: Arc<dyn TextProvider> = match cfg.provider.kind.as_str() {
                "mock" => Arc::new(MockProvider),
                "gemini" => Arc::new(GeminiProvider::new(cfg.provider.model())),
                other => return Err(anyhow!("unknown provider kind: {other}")),
            };

            let generator = Generator::new(provider, pool);
            let store = MemoryStore::new();
            let user_id = user.unwrap_or_else(Uuid::new_v4);

            let result = generator.generate(&req).await;
            let entry = store.record(user_id, &req, &result.normalized_text);

            println!("{}", result.normalized_text);
            println!();
            println!("recorded history entry {} for user {}", entry.id, user_id);

            if let Some(name) = collection {
                let created = store.create_collection(user_id, &name, "");
                let writing = store.add_writing(created.id, entry.id)?;
                println!(
                    "filed writing {} into collection \"{}\" ({})",
                    writing.id, name, created.id
                );
            }
        }
        Command::Options => {
            println!("{}", serde_json::to_string_pretty(&options::catalog())?);
        }
        Command::Keys => {
            let pool = KeyPool::from_env(&cfg.keys.env_vars);
            println!("{}", serde_json::to_string_pretty(&pool.stats())?);
        }
    }

    Ok(())
}
