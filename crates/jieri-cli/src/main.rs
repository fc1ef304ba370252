use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDateTime};
use clap::{ArgAction, Parser};
use jieri_core::client::DEFAULT_PAGE_URL;
use jieri_core::{
    BuildConfig, CalendarBuilder, FetchConfig, FsWriter, HtmlFile, KeywordGroups, PageFetcher,
    RiliClient, Spider, Strictness,
};
use tracing::{debug, Level};

#[derive(Parser, Debug)]
#[command(name = "jieri", version)]
#[command(about = "Publish the festival list from rili.com.cn as an .ics calendar")]
struct Cli {
    /// Directory the calendar file is written to
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// Festival list page to download
    #[arg(long, default_value = DEFAULT_PAGE_URL)]
    url: String,

    /// Read the festival page from a saved HTML file instead of downloading it
    #[arg(long, value_name = "HTML", conflicts_with = "url")]
    from_file: Option<PathBuf>,

    /// Skip malformed festival entries instead of failing
    #[arg(long)]
    lenient: bool,

    /// Publish every festival, including the ones redacted by default
    #[arg(long)]
    no_filter: bool,

    /// Print the parsed festivals as JSON instead of writing a calendar
    #[arg(long)]
    json: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn log_level(verbose: u8) -> Level {
    match verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

fn calendar_builder(cli: &Cli, generated_at: NaiveDateTime) -> CalendarBuilder {
    let strictness = if cli.lenient {
        Strictness::Lenient
    } else {
        Strictness::Strict
    };
    let builder = CalendarBuilder::new(BuildConfig::new(generated_at)).strictness(strictness);

    if cli.no_filter {
        builder
    } else {
        builder.exclude_if(KeywordGroups::redaction_default())
    }
}

async fn run<F: PageFetcher>(spider: Spider<F, FsWriter>, json: bool) -> Result<()> {
    if json {
        let (year, festivals) = spider
            .festivals()
            .await
            .context("failed to read festival list")?;
        let dump = serde_json::json!({ "year": year, "festivals": festivals });
        println!("{}", serde_json::to_string_pretty(&dump)?);
        return Ok(());
    }

    let path = spider
        .run()
        .await
        .context("failed to generate festival calendar")?;
    println!("{}", path.display());
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(log_level(cli.verbose).into()),
        )
        .with_writer(std::io::stderr)
        .init();

    // One timestamp per run, shared by every event's LAST-MODIFIED
    let generated_at = Local::now().naive_local();
    debug!(?cli, %generated_at, "starting");

    let builder = calendar_builder(&cli, generated_at);
    let writer = FsWriter::new(&cli.output_dir);

    match &cli.from_file {
        Some(path) => run(Spider::new(HtmlFile::new(path), writer, builder), cli.json).await,
        None => {
            let client = RiliClient::with_config(FetchConfig {
                url: cli.url.clone(),
                ..FetchConfig::default()
            })?;
            run(Spider::new(client, writer, builder), cli.json).await
        }
    }
}
