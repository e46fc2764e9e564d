//! One-turn CLI for exercising the assistant core end-to-end.

use anyhow::Context;
use clap::Parser;
use nimbus::types::{ImageReference, ImageSource};
use nimbus::{
    Config, InMemoryStore, MemoryManager, OpenAIClient, Orchestrator, ToolRegistry, TurnRequest,
    VisionAgent, WeatherTool,
};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "nimbus-assistant",
    about = "Run one assistant turn from the command line"
)]
struct Args {
    /// Message to send to the assistant
    message: String,

    /// Identity of the acting user
    #[arg(long, default_value = "local-user")]
    user: String,

    /// Attach an image by URL
    #[arg(long)]
    image_url: Option<String>,

    /// Attach an image as base64-encoded data
    #[arg(long, conflicts_with = "image_url")]
    image_data: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let config = Config::from_env();

    let api_key = config
        .completion
        .api_key
        .clone()
        .context("OPENAI_API_KEY is required to run the assistant")?;

    let client = Arc::new(OpenAIClient::new(
        api_key,
        config.completion.api_base.clone(),
        config.completion.model.clone(),
        config.completion.vision_model.clone(),
    ));

    // The embedded store lives for this process only; a one-shot CLI run
    // therefore starts from an empty memory unless a remote backend is
    // plugged in behind the MemoryStore trait.
    let memory = if config.is_memory_configured() {
        match config.memory.backend.as_deref() {
            Some("local") => Arc::new(MemoryManager::new(Arc::new(InMemoryStore::new()))),
            Some(other) => {
                tracing::warn!(backend = other, "unknown memory backend; memory disabled");
                Arc::new(MemoryManager::unconfigured())
            }
            None => Arc::new(MemoryManager::unconfigured()),
        }
    } else {
        tracing::info!("memory not configured; running without long-term memory");
        Arc::new(MemoryManager::unconfigured())
    };

    let mut weather = WeatherTool::new(config.weather.api_key.clone());
    if let Some(api_base) = &config.weather.api_base {
        weather = weather.with_api_base(api_base.clone());
    }

    let tools = Arc::new(ToolRegistry::with_default_tools(memory, weather));
    let vision = Arc::new(VisionAgent::new(client.clone()));
    let orchestrator = Orchestrator::new(client, vision, tools);

    let image = if let Some(url) = args.image_url {
        Some(ImageReference {
            source: ImageSource::Url,
            content: url,
        })
    } else {
        args.image_data.map(|data| ImageReference {
            source: ImageSource::InlineData,
            content: data,
        })
    };

    let reply = orchestrator
        .handle_turn(TurnRequest {
            message: args.message,
            user_identity: args.user,
            image,
            history: vec![],
        })
        .await?;

    println!("{}", reply);
    Ok(())
}
