//! chunkers CLI - Split text and documents into sentences or paragraphs.

use std::io::Read;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::{debug, Level};
use tracing_subscriber::FmtSubscriber;

use chunkers::{build_chunker, ChunkersConfig, SplitterKind};
use chunkers_model::ModelFamily;

/// chunkers - Sentence and paragraph chunking for text and documents
#[derive(Parser)]
#[command(name = "chunkers")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Config file (default: <config dir>/doc-chunkers/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Split input into chunks
    Chunk {
        /// Splitter name (see `chunkers list`)
        splitter: String,

        /// Raw text, a file path, a URL, or `-` for stdin
        input: String,

        /// Segmentation model name
        #[arg(short, long)]
        model: Option<String>,

        /// Language code for the rule-based splitter
        #[arg(short, long)]
        lang: Option<String>,

        /// Run the model on CUDA
        #[arg(long)]
        cuda: bool,

        /// Print chunks as a JSON array
        #[arg(long)]
        json: bool,
    },

    /// List splitters and segmentation models
    List,
}

fn setup_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber).ok();
}

fn load_config(path: Option<&PathBuf>) -> chunkers::Result<ChunkersConfig> {
    match path {
        Some(path) => ChunkersConfig::load(path),
        None => ChunkersConfig::load_default(),
    }
}

fn main() {
    let cli = Cli::parse();

    setup_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Chunk {
            splitter,
            input,
            model,
            lang,
            cuda,
            json,
        } => {
            let mut config = load_config(cli.config.as_ref())?;
            if model.is_some() {
                config.model.name = model;
            }
            if let Some(lang) = lang {
                config.text.lang = lang;
            }
            if cuda {
                config.model.use_cuda = true;
            }

            let kind: SplitterKind = splitter.parse()?;
            let input = read_input(input)?;
            chunk(kind, &input, &config, json)?;
        }
        Commands::List => list(),
    }

    Ok(())
}

fn read_input(input: String) -> std::io::Result<String> {
    if input != "-" {
        return Ok(input);
    }
    let mut buf = String::new();
    std::io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}

fn chunk(
    kind: SplitterKind,
    input: &str,
    config: &ChunkersConfig,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let chunker = build_chunker(kind, config)?;
    let chunks = chunker.chunk(input)?;
    debug!("{} produced {} chunks", kind, chunks.len());

    if json {
        println!("{}", serde_json::to_string_pretty(&chunks)?);
    } else {
        println!("{}", chunks.join("\n\n"));
    }
    Ok(())
}

fn list() {
    println!("Splitters:");
    for kind in SplitterKind::all() {
        let note = if kind.needs_model() { " (model)" } else { "" };
        println!("  {:<20} {}{}", kind.name(), kind.granularity(), note);
    }

    for family in [ModelFamily::Sat, ModelFamily::Wtp] {
        println!("\n{} models (default: {}):", family, family.default_model());
        for model in family.models() {
            println!("  {}", model);
        }
    }
}
