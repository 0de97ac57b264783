use clap::Parser;
use rig::client::CompletionClient;
use rig::providers::openai;
use serde_json::Value;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, level_filters::LevelFilter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use vibe_caption::{
    carousel::MAX_CAROUSEL_IMAGES, create_llm_client_with_config, CaptionConfig, CaptionRequest,
    CaptionService, CaptionType, CarouselRequest, ImageInput, LlmConfig, PromptCompiler,
    ServiceSettings, VibeVector,
};

#[derive(Parser, Debug)]
#[command(name = "vibe-caption", version, about = "Vibe-driven Instagram captions")]
struct Cli {
    /// One image for a single caption, 2 or 3 for a carousel
    #[arg(value_name = "IMAGE", required = true, num_args = 1..=MAX_CAROUSEL_IMAGES)]
    images: Vec<PathBuf>,

    /// Caption type (funny, romantic, motivational, business, witty, artistic, explain, default)
    #[arg(short = 't', long = "type", default_value = "default")]
    caption_type: String,

    /// Vibe vector as JSON, e.g. '{"humor":80,"energy":60}'
    #[arg(long, conflicts_with = "preset")]
    vibes: Option<String>,

    /// Seed the vibe vector from a caption type preset
    #[arg(long)]
    preset: Option<String>,

    /// Directory holding prompts/caption-types.* and prompts/format-constraints.*
    #[arg(short, long)]
    config_dir: Option<PathBuf>,

    #[arg(short, long, default_value = vibe_caption::llm::DEFAULT_MODEL)]
    model: String,

    /// Checked against SHARED_SECRET when that is set
    #[arg(long)]
    api_key: Option<String>,

    /// Print the compiled instructions and exit without calling the model
    #[arg(long)]
    dry_run: bool,

    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()?;

    let config = Arc::new(match &cli.config_dir {
        Some(dir) => {
            info!("Loading prompt configuration from {:?}", dir);
            CaptionConfig::load_dir(dir)
        }
        None => CaptionConfig::builtin(),
    });

    let vibes: Option<Value> = match (&cli.vibes, &cli.preset) {
        (Some(raw), _) => Some(
            serde_json::from_str(raw).map_err(|e| format!("Error: --vibes is not JSON: {}", e))?,
        ),
        (None, Some(preset)) => Some(serde_json::to_value(VibeVector::preset(
            CaptionType::parse(preset),
        ))?),
        (None, None) => None,
    };

    let mut images = Vec::with_capacity(cli.images.len());
    for path in &cli.images {
        if !path.exists() {
            return Err(format!("Error: File '{}' not found", path.display()).into());
        }
        let image = ImageInput::from_bytes(fs::read(path)?)?;
        images.push(image.to_base64());
    }

    if cli.dry_run {
        let compiler = PromptCompiler::new(config);
        let prompt = if images.len() == 1 {
            compiler.compile(Some(&cli.caption_type), vibes.as_ref())
        } else {
            compiler.compile_carousel(Some(&cli.caption_type), vibes.as_ref(), images.len())?
        };
        if cli.json {
            println!("{}", serde_json::to_string_pretty(&prompt)?);
        } else {
            println!("{}", prompt);
        }
        return Ok(());
    }

    let client = openai::Client::from_env();
    let llm = create_llm_client_with_config(
        client.completion_model(&cli.model),
        LlmConfig::default().with_model(&cli.model),
    );
    let service = CaptionService::new(config, llm, ServiceSettings::from_env());

    if images.len() == 1 {
        let request = CaptionRequest {
            image: images.remove(0),
            caption_type: cli.caption_type,
            vibes,
            api_key: cli.api_key,
        };
        let response = service.caption(request).await?;
        if cli.json {
            println!("{}", serde_json::to_string_pretty(&response)?);
        } else {
            println!("{}", response.caption);
        }
    } else {
        let request = CarouselRequest {
            images,
            caption_type: cli.caption_type,
            vibes,
            api_key: cli.api_key,
        };
        let result = service.carousel(request).await?;
        if cli.json {
            println!("{}", serde_json::to_string_pretty(&result)?);
        } else {
            println!("{}\n", result.master_caption);
            for (i, caption) in result.individual_captions.iter().enumerate() {
                println!("{}. {}", i + 1, caption);
            }
        }
    }

    Ok(())
}
