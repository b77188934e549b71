use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use pravo_linker::{Engine, EngineConfig};
use pravo_protocol::{Lexicon, NormalizedForm};
use rkyv::ser::{serializers::AllocSerializer, Serializer};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

/// Finds references to Russian legal acts and resolves them to law identifiers.
#[derive(Parser)]
#[command(name = "pravo")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Alias dictionary (JSON: alias -> id or [ids]); bundled when omitted
    #[arg(long, global = true, value_name = "FILE")]
    aliases: Option<PathBuf>,

    /// Lexicon as JSON or compiled rkyv archive; bundled when omitted
    #[arg(long, global = true, value_name = "FILE")]
    lexicon: Option<PathBuf>,

    /// Engine settings (JSON)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print law mentions as JSON.
    Resolve {
        /// Text to scan; read from stdin when omitted
        text: Option<String>,
    },

    /// Print article/point/subpoint citations as JSON.
    Citations {
        /// Text to scan; read from stdin when omitted
        text: Option<String>,
    },

    /// Print the lemma analyses of each word.
    Analyze {
        #[arg(required = true)]
        words: Vec<String>,
    },

    /// Compile a JSON lexicon to an rkyv archive.
    CompileLexicon {
        #[arg(short, long, value_name = "FILE")]
        input: PathBuf,

        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,
    },
}

#[derive(Serialize)]
struct Analysis<'a> {
    word: &'a str,
    forms: Vec<NormalizedForm>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match &cli.command {
        Commands::Resolve { text } => {
            let engine = build_engine(&cli)?;
            let text = input_text(text.as_deref())?;
            print_json(&engine.resolve(&text))
        }
        Commands::Citations { text } => {
            let engine = build_engine(&cli)?;
            let text = input_text(text.as_deref())?;
            print_json(&engine.citations(&text))
        }
        Commands::Analyze { words } => {
            let engine = build_engine(&cli)?;
            let analyses: Vec<Analysis<'_>> = words
                .iter()
                .map(|word| Analysis {
                    word,
                    forms: engine.normalize(word),
                })
                .collect();
            print_json(&analyses)
        }
        Commands::CompileLexicon { input, output } => compile_lexicon(input, output),
    }
}

fn build_engine(cli: &Cli) -> Result<Engine> {
    let mut builder = Engine::builder();
    if let Some(path) = &cli.lexicon {
        builder = builder.lexicon_path(path);
    }
    if let Some(path) = &cli.aliases {
        builder = builder.aliases_path(path);
    }
    if let Some(path) = &cli.config {
        let config = EngineConfig::from_path(path)
            .with_context(|| format!("loading config {}", path.display()))?;
        builder = builder.config(config);
    }
    builder.build().context("engine initialization failed")
}

fn input_text(arg: Option<&str>) -> Result<String> {
    match arg {
        Some(text) => Ok(text.to_string()),
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("reading text from stdin")?;
            Ok(text)
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn compile_lexicon(input: &Path, output: &Path) -> Result<()> {
    let json = fs::read_to_string(input)
        .with_context(|| format!("reading {}", input.display()))?;
    let lexicon: Lexicon = serde_json::from_str(&json)
        .with_context(|| format!("parsing {}", input.display()))?;
    lexicon
        .validate()
        .map_err(|e| anyhow::anyhow!("invalid lexicon {}: {e}", input.display()))?;

    tracing::info!(
        version = lexicon.version,
        lemmas = lexicon.lemmas.len(),
        paradigms = lexicon.paradigms.len(),
        "Compiling lexicon"
    );

    let mut serializer = AllocSerializer::<256>::default();
    serializer
        .serialize_value(&lexicon)
        .map_err(|e| anyhow::anyhow!("rkyv serialization failed: {e:?}"))?;
    let bytes = serializer.into_serializer().into_inner();

    fs::write(output, &bytes).with_context(|| format!("writing {}", output.display()))?;
    eprintln!("Wrote {} bytes to {}", bytes.len(), output.display());
    Ok(())
}
