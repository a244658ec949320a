//! `dtmpl` CLI: render a template against JSON, YAML or TOML data.
//!
//! ## Usage
//!
//! ```sh
//! # Data from a file, template from stdin, output to stdout
//! echo '{{ name }}' | dtmpl -d data.json
//!
//! # Data from stdin, template from a file
//! cat config.yaml | dtmpl -f yaml -t report.j2
//!
//! # Format inferred from the extension, output to a file
//! dtmpl -d Cargo.toml -t deps.j2 -o deps.txt
//! ```
//!
//! Data and template cannot both come from stdin.

use anyhow::{bail, Context, Result};
use clap::Parser;
use dtmpl_core::format::STDIO_SENTINEL as STDIO;
use dtmpl_core::{Format, HelperTable, Renderer, Source};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "dtmpl",
    version,
    about = "Render a template against JSON, YAML or TOML data"
)]
struct Cli {
    /// Data file ("-" for stdin)
    #[arg(
        short = 'd',
        long = "data",
        visible_alias = "json",
        short_alias = 'j',
        value_name = "FILE",
        default_value = STDIO
    )]
    data: String,

    /// Template file ("-" for stdin)
    #[arg(short, long, value_name = "FILE", default_value = STDIO)]
    template: String,

    /// Output file ("-" for stdout)
    #[arg(short, long, value_name = "FILE", default_value = STDIO)]
    output: String,

    /// Data format: json, yaml or toml (inferred from the data file's extension if omitted)
    #[arg(short, long)]
    format: Option<Format>,

    /// Log more to stderr (repeat for more detail)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let data_source = Source::from(cli.data.as_str());
    let template_source = Source::from(cli.template.as_str());
    if data_source.is_stdin() && template_source.is_stdin() {
        bail!(
            "Cannot read data and template from stdin at the same time; pass --data or --template"
        );
    }

    let data = dtmpl_core::decode(&data_source, cli.format)
        .with_context(|| format!("Failed to load data from {}", data_source))?;
    let template_text = read_template(&template_source)?;

    let helpers = HelperTable::new();
    let renderer = Renderer::new(&helpers);
    let template = renderer
        .parse(&template_text)
        .with_context(|| format!("Failed to parse template {}", template_source))?;

    let mut out = open_output(&cli.output)?;
    renderer
        .render(&template, &data, &mut out)
        .context("Failed to render template")?;
    out.flush().context("Failed to write output")?;
    tracing::info!(output = %cli.output, "render complete");

    Ok(())
}

/// Install the stderr log subscriber. The level comes from `-v` alone.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(level))
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn read_template(source: &Source) -> Result<String> {
    let bytes = dtmpl_core::read_source(source)
        .with_context(|| format!("Failed to read template {}", source))?;
    String::from_utf8(bytes).with_context(|| format!("Template {} is not valid UTF-8", source))
}

fn open_output(path: &str) -> Result<Box<dyn Write>> {
    if path == STDIO {
        Ok(Box::new(BufWriter::new(io::stdout().lock())))
    } else {
        let file = File::create(path).with_context(|| format!("Failed to create file: {}", path))?;
        Ok(Box::new(BufWriter::new(file)))
    }
}
