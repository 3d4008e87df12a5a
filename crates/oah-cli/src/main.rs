use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use clap_complete::Shell;

use oah_core::parse::{self, ApiDocument};

#[derive(Parser)]
#[command(
    name = "oah",
    about = "Convert OpenAPI/Swagger documents to HAR request templates",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert an API document to a HAR request array
    Convert {
        /// Path to the OpenAPI/Swagger document (YAML or JSON)
        #[arg(short, long)]
        input: PathBuf,

        /// Write the HAR array here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Parse a document and report what would be converted
    Validate {
        /// Path to the OpenAPI/Swagger document
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Convert {
            input,
            output,
            pretty,
        } => cmd_convert(input, output, pretty),

        Commands::Validate { input } => cmd_validate(input),

        Commands::Completions { shell } => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            clap_complete::generate(shell, &mut cmd, "oah", &mut std::io::stdout());
            Ok(())
        }
    }
}

fn load_document(path: &PathBuf) -> Result<ApiDocument> {
    let content =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;

    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("yaml");

    let document = match ext {
        "json" => parse::from_json(&content)?,
        _ => parse::from_yaml(&content)?,
    };
    Ok(document)
}

fn cmd_convert(input: PathBuf, output: Option<PathBuf>, pretty: bool) -> Result<()> {
    let document = load_document(&input)?;
    let requests = oah_core::convert(&document);

    let json = if pretty {
        serde_json::to_string_pretty(&requests)?
    } else {
        serde_json::to_string(&requests)?
    };

    match output {
        Some(path) => {
            fs::write(&path, json)
                .with_context(|| format!("failed to write {}", path.display()))?;
            eprintln!(
                "Wrote {} request templates to {}",
                requests.len(),
                path.display()
            );
        }
        None => println!("{}", json),
    }
    Ok(())
}

fn cmd_validate(input: PathBuf) -> Result<()> {
    let document = load_document(&input)?;

    let (version, paths) = match &document {
        ApiDocument::V2(spec) => (format!("Swagger {}", spec.swagger), spec.paths.len()),
        ApiDocument::V3(spec) => (format!("OpenAPI {}", spec.openapi), spec.paths.len()),
        ApiDocument::Unrecognized(_) => {
            anyhow::bail!(
                "{} is not a recognizable OpenAPI 2.0 or 3.x document",
                input.display()
            )
        }
    };

    let requests = oah_core::convert(&document);

    eprintln!("{}: {}", input.display(), version);
    eprintln!("  Paths: {}", paths);
    eprintln!("  Request templates: {}", requests.len());
    Ok(())
}
