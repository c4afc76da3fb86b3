//! Protodoc CLI
//!
//! Command-line interface for generating API documentation from Protocol
//! Buffer service definitions.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use colored::*;
use protodoc_generator::DocGenerator;
use protodoc_parser::{build_document, ProtoParser};
use std::fs;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "protodoc")]
#[command(version, about = "Generate API documentation from Protocol Buffer service definitions", long_about = None)]
#[command(after_help = "EXAMPLES:\n  \
    # Plain text listing to stdout\n  \
    protodoc api.proto\n\n  \
    # Markdown with table of contents and cross-references\n  \
    protodoc api.proto --format markdown --output api.md\n\n  \
    # Documentation model as JSON, for scripting\n  \
    protodoc api.proto --format json")]
struct Cli {
    /// Path to the .proto schema file
    schema: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Write the document to a file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Plain indented listing
    Text,
    /// Markdown document with table of contents
    Markdown,
    /// Documentation model as JSON
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Markdown => write!(f, "markdown"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Keep stdout clean for piping when the document itself goes there
    let chatty = cli.verbose || cli.output.is_some();

    if chatty {
        println!(
            "{} Parsing schema: {}",
            "→".cyan(),
            cli.schema.display()
        );
    }

    let parser = ProtoParser::from_file(&cli.schema)
        .with_context(|| format!("Failed to read schema file {}", cli.schema.display()))?;
    let unit = parser
        .parse()
        .with_context(|| format!("Failed to parse {}", cli.schema.display()))?;
    let document = build_document(&unit).context("Failed to build documentation model")?;

    if chatty {
        println!(
            "{} Parsed {} services, {} objects, {} enums",
            "✓".green(),
            document.services.len(),
            document.objects.len(),
            document.enums.len()
        );
        if cli.verbose {
            println!("  Format: {}", cli.format);
            for service in &document.services {
                println!(
                    "  • {} ({} methods)",
                    service.service_name.yellow(),
                    service.methods.len()
                );
            }
        }
    }

    let rendered = match cli.format {
        OutputFormat::Text => protodoc_generator::render_text(&document),
        OutputFormat::Markdown => {
            let generator =
                DocGenerator::new(document).context("Failed to load document templates")?;
            generator
                .render_markdown()
                .context("Failed to render markdown")?
        }
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(&document)
                .context("Failed to serialize documentation model")?;
            json.push('\n');
            json
        }
    };

    match &cli.output {
        Some(path) => {
            fs::write(path, &rendered)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("{} Wrote {}", "✓".green(), path.display());
        }
        None => print!("{}", rendered),
    }

    Ok(())
}
