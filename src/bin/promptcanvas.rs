//! CLI for PromptCanvas - prompt-to-image generation.

use clap::{Args, Parser, Subcommand};
use promptcanvas::{Config, Controller, ImageFormat, UiState, View};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

/// Typing this on its own line leaves interactive mode.
const QUIT_COMMAND: &str = ":q";

#[derive(Parser)]
#[command(name = "promptcanvas")]
#[command(about = "Generate an image from a text prompt via the OpenAI Images API")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate one image from a prompt
    Generate(GenerateArgs),

    /// Read prompts from stdin, one per line
    Interactive,
}

#[derive(Args)]
struct GenerateArgs {
    /// The text prompt describing the image
    prompt: String,

    /// Download the generated image to this path
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "promptcanvas=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::from_env();

    match cli.command {
        Commands::Generate(args) => generate_once(config, args, cli.json).await,
        Commands::Interactive => interactive(config, cli.json).await,
    }
}

async fn generate_once(
    config: Config,
    args: GenerateArgs,
    json: bool,
) -> anyhow::Result<ExitCode> {
    let mut controller = Controller::new(config);
    controller.update_prompt(args.prompt);
    controller.generate().await;

    let state = controller.state();
    print_state(&state, json)?;

    if !state.error.is_empty() {
        return Ok(ExitCode::FAILURE);
    }
    if let Some(path) = args.output {
        if state.image.is_empty() {
            tracing::warn!("no image URL returned, nothing to save");
        } else {
            save_image(&state.image, &path).await?;
        }
    }
    Ok(ExitCode::SUCCESS)
}

async fn interactive(config: Config, json: bool) -> anyhow::Result<ExitCode> {
    let mut controller = Controller::new(config);

    let mut rx = controller.subscribe();
    let busy_indicator = tokio::spawn(async move {
        let mut was_loading = false;
        while rx.changed().await.is_ok() {
            let loading = rx.borrow_and_update().loading;
            if loading && !was_loading {
                eprintln!("Generating...");
            }
            was_loading = loading;
        }
    });

    eprintln!("Enter a prompt per line ({QUIT_COMMAND} to quit).");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim() == QUIT_COMMAND {
            break;
        }
        controller.update_prompt(line);
        if !controller.can_generate() {
            continue;
        }
        controller.generate().await;
        print_state(&controller.state(), json)?;
    }

    drop(controller);
    busy_indicator.await?;
    Ok(ExitCode::SUCCESS)
}

fn print_state(state: &UiState, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(state)?);
    } else {
        println!("{}", View::from(state));
    }
    Ok(())
}

async fn save_image(url: &str, path: &Path) -> anyhow::Result<()> {
    let client = reqwest::Client::new();
    let (data, format) = promptcanvas::image::download(&client, url).await?;

    let requested = path.extension().and_then(|e| e.to_str());
    if let (Some(format), Some(ext)) = (format, requested) {
        if !ext.eq_ignore_ascii_case(format.extension())
            && !(format == ImageFormat::Jpeg && ext.eq_ignore_ascii_case("jpeg"))
        {
            tracing::warn!(
                detected = format.extension(),
                requested = ext,
                "saved image format does not match file extension"
            );
        }
    }

    std::fs::write(path, &data)?;
    eprintln!("Saved image: {} ({} bytes)", path.display(), data.len());
    Ok(())
}
