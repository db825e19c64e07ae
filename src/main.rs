//! refdoc — assemble API reference pages from type-doc output and
//! hand-authored spec files.
//!
//! Joins five sources by function id:
//!
//! - the type-doc JSON tree (signatures, parameters, summaries)
//! - the function list (`$ref`, descriptions, notes, examples, overrides)
//! - the common library spec (slugs)
//! - the examples spec (display titles)
//! - a directory of `<id>.mdx` prose fragments
//!
//! `refdoc --typedoc combined.json --spec functions.yml --common common.yml
//! --examples examples.yml --prose docs/ref/js -o out`

mod assemble;
mod error;
mod model;
mod render;
mod source;
mod toc;
mod typedoc;

use anyhow::{Context, Result};
use assemble::{AssembleOptions, Sources};
use clap::Parser;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "refdoc",
    about = "Assemble API reference documentation from type-doc output and spec files"
)]
struct Cli {
    /// Type-doc JSON output
    #[arg(long)]
    typedoc: PathBuf,

    /// Function list specification (YAML)
    #[arg(long)]
    spec: PathBuf,

    /// Common library specification with slugs (YAML)
    #[arg(long)]
    common: PathBuf,

    /// Examples specification with display titles (YAML)
    #[arg(long)]
    examples: PathBuf,

    /// Directory of <id>.mdx / <id>.md prose fragments
    #[arg(long)]
    prose: Option<PathBuf>,

    /// Extra preamble page id, rendered before the reference.
    /// Can be specified multiple times.
    #[arg(long)]
    preamble: Vec<String>,

    /// Output format: markdown (default), json
    #[arg(short = 'f', long, default_value = "markdown")]
    format: String,

    /// Output directory. Writes to stdout when omitted.
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Output file name without extension
    #[arg(long, default_value = "reference")]
    name: String,

    /// File whose contents are prepended to every example's code
    #[arg(long)]
    example_prelude: Option<PathBuf>,

    /// Fail when an override names a parameter the signature does not have
    #[arg(long)]
    strict_overrides: bool,

    /// Increase log verbosity (-v info, -vv debug). RUST_LOG takes precedence.
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let sources = load_sources(&cli)?;
    let opts = AssembleOptions {
        preamble_pages: cli.preamble.clone(),
        strict_overrides: cli.strict_overrides,
    };
    let doc = assemble::assemble(&sources, &opts).context("failed to assemble reference")?;

    let prelude = match cli.example_prelude {
        Some(ref path) => Some(
            fs::read_to_string(path)
                .with_context(|| format!("failed to read example prelude: {}", path.display()))?,
        ),
        None => None,
    };
    let renderer = render::create_renderer(&cli.format, prelude)?;
    let output = renderer.render(&doc)?;

    match cli.output {
        Some(ref dir) => {
            fs::create_dir_all(dir)
                .with_context(|| format!("failed to create output directory: {}", dir.display()))?;
            let out_path = dir.join(format!("{}.{}", cli.name, renderer.file_extension()));
            fs::write(&out_path, &output)
                .with_context(|| format!("failed to write {}", out_path.display()))?;
            info!(path = %out_path.display(), records = doc.records.len(), "wrote reference");
        }
        None => print!("{}", output),
    }

    Ok(())
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .init();
}

fn load_sources(cli: &Cli) -> Result<Sources> {
    let prose = match cli.prose {
        Some(ref dir) => source::prose::load_dir(dir)?,
        None => HashMap::new(),
    };

    Ok(Sources {
        typedoc: source::load_typedoc(&cli.typedoc)?,
        functions: source::load_function_spec(&cli.spec)?,
        common: source::load_common_lib(&cli.common)?,
        examples: source::load_examples(&cli.examples)?,
        prose,
    })
}
