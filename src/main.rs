use anyhow::Context;
use clap::Parser;
use fieldcast::config::Config;
use fieldcast::Template;
use std::io::Read;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "fieldcast", about = "Coerce JSON fields to the types declared by a template")]
struct Cli {
    /// Template file: a JSON object mapping field names to types.
    #[arg(short, long)]
    template: PathBuf,

    /// Config file to use instead of ~/.config/fieldcast/config.toml.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Pretty-print the normalised record.
    #[arg(long)]
    pretty: bool,

    /// Write debug logs to stderr (filter with RUST_LOG).
    #[arg(long)]
    debug: bool,

    /// JSON document to normalise. Reads stdin when omitted.
    input: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.debug {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_ansi(false)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
            )
            .init();
        tracing::info!("fieldcast debug log started");
    }

    let config = match &cli.config {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => Config::load()?,
    };
    let phone = config.phone.format().context("invalid [phone] subscriber_pattern")?;

    let template_text = std::fs::read_to_string(&cli.template)
        .with_context(|| format!("reading template {}", cli.template.display()))?;
    let template = Template::parse_with(&template_text, &phone)
        .with_context(|| format!("parsing template {}", cli.template.display()))?;

    let input = match &cli.input {
        Some(path) => std::fs::read(path).with_context(|| format!("reading {}", path.display()))?,
        None => {
            let mut buf = Vec::new();
            std::io::stdin().read_to_end(&mut buf).context("reading stdin")?;
            buf
        }
    };

    let record = fieldcast::normalize_slice(&input, &template)?;
    let rendered = if cli.pretty || config.output.pretty {
        serde_json::to_string_pretty(&record)?
    } else {
        serde_json::to_string(&record)?
    };
    println!("{rendered}");
    Ok(())
}
