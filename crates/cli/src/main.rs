//! CLI tool for generating slide decks from a title and free text.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use slidegen_core::{DeckRequest, DeckStyle};
use slidegen_images::{ConfiguredSource, ImageSourceConfig, DEFAULT_ENDPOINT, DEFAULT_TIMEOUT_SECS};
use slidegen_pptx::DeckGenerator;
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Turn a title and paragraphs of text into an illustrated slide deck.
#[derive(Parser, Debug)]
#[command(name = "slidegen")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a .pptx deck
    Generate(GenerateArgs),

    /// Print the slides of existing .pptx files
    Inspect {
        /// Presentation file(s) to read
        #[arg(required = true)]
        input: Vec<PathBuf>,

        /// Print JSON instead of plain text
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args, Debug)]
struct GenerateArgs {
    /// Deck title
    #[arg(short, long)]
    title: String,

    /// Content; each non-empty line becomes a slide (default: read stdin)
    #[arg(short, long, conflicts_with = "content_file")]
    content: Option<String>,

    /// Read content from a file
    #[arg(short = 'f', long)]
    content_file: Option<PathBuf>,

    /// Output directory
    #[arg(short, long, default_value = ".")]
    output: PathBuf,

    /// Skip image lookups
    #[arg(long)]
    no_images: bool,

    /// Image search URL template containing {query}
    #[arg(long, env = "SLIDEGEN_IMAGE_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    endpoint: String,

    /// Image request timeout in seconds
    #[arg(long, env = "SLIDEGEN_IMAGE_TIMEOUT", default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout: u64,

    /// Subtitle for the title slide
    #[arg(long)]
    subtitle: Option<String>,

    /// Text of the closing slide (\n separates paragraphs)
    #[arg(long)]
    closing_text: Option<String>,

    /// Print the slide plan as JSON instead of generating
    #[arg(long)]
    print_outline: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    match cli.command {
        Command::Generate(args) => {
            let content = read_content(&args)?;
            let path = generate(&args, content).await?;
            if let Some(path) = path {
                println!("{}", path.display());
            }
        }
        Command::Inspect { input, json } => {
            for path in &input {
                if let Err(e) = inspect_file(path, json) {
                    eprintln!("Error processing {}: {}", path.display(), e);
                }
            }
        }
    }

    Ok(())
}

/// Content from `--content`, `--content-file` or stdin, in that order.
fn read_content(args: &GenerateArgs) -> Result<String> {
    if let Some(content) = &args.content {
        return Ok(content.clone());
    }

    if let Some(path) = &args.content_file {
        return std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()));
    }

    let mut content = String::new();
    io::stdin()
        .read_to_string(&mut content)
        .context("Failed to read content from stdin")?;
    Ok(content)
}

fn build_style(args: &GenerateArgs) -> DeckStyle {
    let mut style = DeckStyle::default();
    if let Some(subtitle) = &args.subtitle {
        style = style.with_subtitle(subtitle.as_str());
    }
    if let Some(closing) = &args.closing_text {
        style = style.with_closing_text(closing.replace("\\n", "\n"));
    }
    style
}

/// Generate the deck; returns the written path, or `None` when only the outline was printed.
async fn generate(args: &GenerateArgs, content: String) -> Result<Option<PathBuf>> {
    let request = DeckRequest::new(args.title.as_str(), content)?;

    let config = ImageSourceConfig::default()
        .with_endpoint(args.endpoint.as_str())
        .with_timeout(Duration::from_secs(args.timeout));
    let source = ConfiguredSource::from_config(config, !args.no_images)
        .context("Invalid image source configuration")?;
    let generator = DeckGenerator::new(source).with_style(build_style(args));

    if args.print_outline {
        let plan = generator.plan(&request);
        println!("{}", serde_json::to_string_pretty(&plan)?);
        return Ok(None);
    }

    let deck = generator.generate(&request).await?;
    log::debug!(
        "{} slides, {} with images",
        deck.slide_count,
        deck.images_embedded
    );

    let path = deck
        .save(&args.output)
        .with_context(|| format!("Failed to write deck to {}", args.output.display()))?;
    Ok(Some(path))
}

/// Print the slides of one presentation.
fn inspect_file(path: &Path, json: bool) -> Result<()> {
    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    let slides = slidegen_pptx::inspect(BufReader::new(file))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&slides)?);
        return Ok(());
    }

    println!("{}: {} slides", path.display(), slides.len());
    for slide in &slides {
        println!("  [{}] pictures: {}", slide.number, slide.pictures);
        for text in &slide.texts {
            for line in text.lines() {
                println!("      {}", line);
            }
        }
    }
    Ok(())
}
