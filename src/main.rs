use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use clap::{Parser, Subcommand};
use profile_scraper::{batch, ExtractConfig, ProfileExtractor, SectionFailure};

#[derive(Parser)]
#[command(name = "profile_scraper", about = "Structured profile extraction from saved profile pages")]
struct Cli {
    /// What to do when one section's markup is rejected (default: skip)
    #[arg(long, global = true, value_enum)]
    section_failure: Option<SectionFailure>,
    /// Parser errors tolerated per document or section fragment
    #[arg(long, global = true)]
    max_parse_errors: Option<usize>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract one HTML file and print the record as JSON
    Extract {
        file: PathBuf,
        /// Indent the JSON output
        #[arg(long)]
        pretty: bool,
    },
    /// Extract every .html file in a directory, one JSON file per page
    Batch {
        dir: PathBuf,
        /// Output directory (default: <DIR>/json)
        #[arg(long)]
        out: Option<PathBuf>,
        /// Max pages to process (default: all)
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();

    let mut config = ExtractConfig::from_env().context("loading PROFILE_* settings")?;
    if let Some(policy) = cli.section_failure {
        config.section_failure = policy;
    }
    if let Some(n) = cli.max_parse_errors {
        config.max_parse_errors = Some(n);
    }
    let extractor = ProfileExtractor::new(config);

    let result = match cli.command {
        Commands::Extract { file, pretty } => {
            let bytes = std::fs::read(&file).with_context(|| format!("reading {}", file.display()))?;
            let html = String::from_utf8_lossy(&bytes);
            let record = extractor
                .extract(&html)
                .with_context(|| format!("extracting {}", file.display()))?;
            let json = if pretty {
                serde_json::to_string_pretty(&record)?
            } else {
                serde_json::to_string(&record)?
            };
            println!("{}", json);
            Ok(())
        }
        Commands::Batch { dir, out, limit } => {
            let inputs = batch::collect_inputs(&dir, limit)?;
            if inputs.is_empty() {
                eprintln!("No .html files in {}.", dir.display());
                return Ok(());
            }
            let out = out.unwrap_or_else(|| dir.join("json"));
            eprintln!("Extracting {} pages into {}...", inputs.len(), out.display());
            let stats = batch::run(&extractor, &inputs, &out)?;
            stats.print();
            Ok(())
        }
    };

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        eprintln!("\nDone in {}", format_duration(elapsed));
    }

    result
}

fn format_duration(d: std::time::Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        format!("{:.1}s", d.as_secs_f64())
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m {}s", secs / 3600, (secs % 3600) / 60, secs % 60)
    }
}
