//! CLI command definitions, routing, and tracing setup.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, eyre};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;
use url::Url;

use scrapeflow_intake::{UrlList, estimate_seconds, format_duration};
use scrapeflow_metadata::{
    TRUNCATE_LIMIT, TextBlock, confidence_tier, detect_bullet_structure, organize, sentiment_tier,
    truncate,
};
use scrapeflow_shared::{
    AiProvider, AppConfig, CrawlOptions, CrawlRecord, CrawlRequest, RawMetadataMap, init_config,
    load_config,
};
use scrapeflow_submit::{HttpSink, submit_batch};

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// ScrapeFlow — batch crawl intake and scraped-metadata normalization.
#[derive(Parser)]
#[command(
    name = "scrapeflow",
    version,
    about = "Validate URL batches, submit crawl tasks, and organize scraped metadata.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Estimate crawl duration for a batch configuration.
    Estimate {
        /// Link-follow depth (1-5).
        #[arg(long, default_value_t = 2)]
        depth: u8,

        /// Page cap per URL (1-50).
        #[arg(long, default_value_t = 10)]
        max_pages: u8,

        /// Number of custom selectors.
        #[arg(long, default_value_t = 0)]
        selectors: usize,

        /// Whether custom selectors are enabled.
        #[arg(long)]
        custom: bool,

        /// Number of URLs in the batch.
        #[arg(long, default_value_t = 1)]
        urls: usize,
    },

    /// Submit a crawl batch: one task per URL, shared configuration.
    Submit {
        /// Target URLs (absolute).
        urls: Vec<String>,

        /// Newline-separated URL file to import.
        #[arg(long)]
        from_file: Option<PathBuf>,

        /// Link-follow depth (1-5); defaults from config.
        #[arg(long)]
        depth: Option<u8>,

        /// Page cap per URL (1-50); defaults from config.
        #[arg(long)]
        max_pages: Option<u8>,

        /// Custom selector as name=css (repeatable); enables custom selectors.
        #[arg(long = "selector", value_name = "NAME=CSS")]
        selectors: Vec<String>,

        /// Disable auto-save of crawl results to the catalog.
        #[arg(long)]
        no_auto_save: bool,

        /// AI provider: default, openai, gemini, or claude.
        #[arg(long)]
        provider: Option<String>,

        /// Submission endpoint override.
        #[arg(long)]
        endpoint: Option<String>,
    },

    /// Organize a scraped metadata JSON file into categorized groups.
    Organize {
        /// JSON file holding a crawl record or a bare metadata map.
        input: PathBuf,
    },

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "scrapeflow=info",
        1 => "scrapeflow=debug",
        _ => "scrapeflow=trace",
    };

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .init();
        }
        LogFormat::Json => {
            fmt().json().with_env_filter(env_filter).init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Estimate {
            depth,
            max_pages,
            selectors,
            custom,
            urls,
        } => cmd_estimate(depth, max_pages, selectors, custom, urls),
        Command::Submit {
            urls,
            from_file,
            depth,
            max_pages,
            selectors,
            no_auto_save,
            provider,
            endpoint,
        } => {
            cmd_submit(
                &urls,
                from_file.as_deref(),
                depth,
                max_pages,
                &selectors,
                no_auto_save,
                provider.as_deref(),
                endpoint.as_deref(),
            )
            .await
        }
        Command::Organize { input } => cmd_organize(&input),
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init(),
            ConfigAction::Show => cmd_config_show(),
        },
    }
}

// ---------------------------------------------------------------------------
// estimate
// ---------------------------------------------------------------------------

fn cmd_estimate(
    depth: u8,
    max_pages: u8,
    selectors: usize,
    custom: bool,
    urls: usize,
) -> Result<()> {
    let seconds = clamped_estimate(depth, max_pages, selectors, custom, urls);
    println!("Estimated crawl time: {}", format_duration(seconds));
    Ok(())
}

/// Estimate with raw flag values clamped through the same boundary the
/// submit path uses, so both commands report the same figure.
fn clamped_estimate(
    depth: u8,
    max_pages: u8,
    selectors: usize,
    custom: bool,
    urls: usize,
) -> u64 {
    let options = CrawlOptions {
        depth,
        max_pages,
        ..CrawlOptions::default()
    }
    .clamped();
    estimate_seconds(options.depth, options.max_pages, selectors, custom, urls)
}

// ---------------------------------------------------------------------------
// submit
// ---------------------------------------------------------------------------

#[allow(clippy::too_many_arguments)]
async fn cmd_submit(
    urls: &[String],
    from_file: Option<&std::path::Path>,
    depth: Option<u8>,
    max_pages: Option<u8>,
    selector_args: &[String],
    no_auto_save: bool,
    provider: Option<&str>,
    endpoint: Option<&str>,
) -> Result<()> {
    let config = load_config()?;

    // Gather URLs: positional candidates first, then the file blob.
    let mut list = UrlList::new();
    for candidate in urls {
        if let Err(e) = list.add(candidate) {
            eprintln!("  skipped: {e}");
        }
    }
    if let Some(path) = from_file {
        let blob = std::fs::read_to_string(path)
            .map_err(|e| eyre!("cannot read {}: {e}", path.display()))?;
        let summary = list.import(&blob);
        println!(
            "  Imported {} new URL(s) ({} invalid, {} duplicate)",
            summary.added, summary.invalid, summary.duplicate
        );
    }

    let selectors = parse_selectors(selector_args)?;
    let mut options = CrawlOptions::from(&config);
    if let Some(depth) = depth {
        options.depth = depth;
    }
    if let Some(max_pages) = max_pages {
        options.max_pages = max_pages;
    }
    if no_auto_save {
        options.auto_save = false;
    }
    if let Some(provider) = provider {
        options.ai_provider = provider.parse::<AiProvider>()?;
    }
    options.use_custom_selectors = !selectors.is_empty();
    options.selectors = selectors;

    let request = CrawlRequest::new(list.into_urls(), options);

    let seconds = estimate_seconds(
        request.options.depth,
        request.options.max_pages,
        request.options.selectors.len(),
        request.options.use_custom_selectors,
        request.urls.len(),
    );

    info!(
        urls = request.urls.len(),
        depth = request.options.depth,
        max_pages = request.options.max_pages,
        "submitting crawl batch"
    );

    let endpoint = endpoint.unwrap_or(&config.submission.endpoint);
    let endpoint = Url::parse(endpoint).map_err(|e| eyre!("invalid endpoint '{endpoint}': {e}"))?;
    let sink = Arc::new(HttpSink::new(endpoint, config.submission.timeout_secs)?);

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .expect("valid template")
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
    );
    spinner.enable_steady_tick(std::time::Duration::from_millis(80));
    spinner.set_message(format!(
        "Submitting {} task(s), est. {}",
        request.urls.len(),
        format_duration(seconds)
    ));

    let outcome = submit_batch(sink, &request).await;
    spinner.finish_and_clear();
    let outcome = outcome?;

    println!();
    println!("  Submitted: {}", outcome.submitted);
    println!("  Failed:    {}", outcome.failures.len());
    for failure in &outcome.failures {
        println!("    {} — {}", failure.url, failure.error);
    }
    println!("  Estimated crawl time: {}", format_duration(seconds));
    println!();

    Ok(())
}

/// Parse repeated `name=css` selector arguments.
fn parse_selectors(
    args: &[String],
) -> Result<std::collections::BTreeMap<String, String>> {
    let mut selectors = std::collections::BTreeMap::new();
    for arg in args {
        let (name, css) = arg
            .split_once('=')
            .ok_or_else(|| eyre!("selector '{arg}' must be name=css"))?;
        selectors.insert(name.trim().to_string(), css.trim().to_string());
    }
    Ok(selectors)
}

// ---------------------------------------------------------------------------
// organize
// ---------------------------------------------------------------------------

fn cmd_organize(input: &std::path::Path) -> Result<()> {
    let content = std::fs::read_to_string(input)
        .map_err(|e| eyre!("cannot read {}: {e}", input.display()))?;

    // Accept either a full crawl record or a bare metadata map.
    let (metadata, description, analysis) =
        match serde_json::from_str::<CrawlRecord>(&content) {
            Ok(record) => (
                record.processed_data.metadata,
                record.processed_data.description,
                record.ai_analysis,
            ),
            Err(_) => {
                let map: RawMetadataMap = serde_json::from_str(&content)
                    .map_err(|e| eyre!("{}: neither a crawl record nor a metadata map: {e}", input.display()))?;
                (map, None, None)
            }
        };

    let categorized = organize(&metadata);
    if categorized.is_empty() {
        println!("  No displayable metadata after filtering.");
    }
    for (group, entries) in categorized.sections() {
        println!();
        println!("  {group}");
        for (key, value) in entries {
            println!("    {key}: {value}");
        }
    }

    if let Some(description) = description {
        println!();
        println!("  Description");
        let cut = truncate(&description, TRUNCATE_LIMIT);
        match detect_bullet_structure(cut.visible) {
            TextBlock::Bulleted {
                prefix,
                bullets,
                suffix,
            } => {
                if !prefix.is_empty() {
                    println!("    {prefix}");
                }
                for bullet in bullets {
                    println!("    • {bullet}");
                }
                if !suffix.is_empty() {
                    println!("    {suffix}");
                }
            }
            TextBlock::Paragraph(text) => {
                for line in text.lines() {
                    println!("    {line}");
                }
            }
        }
        if cut.truncated {
            println!("    …");
        }
    }

    if let Some(analysis) = analysis {
        println!();
        println!("  AI Analysis");
        println!("    Sentiment:  {}", sentiment_tier(analysis.sentiment));
        println!(
            "    Confidence: {}",
            confidence_tier(analysis.confidence_score)
        );
        if !analysis.categories.is_empty() {
            println!("    Categories: {}", analysis.categories.join(", "));
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// config
// ---------------------------------------------------------------------------

fn cmd_config_init() -> Result<()> {
    let path = init_config()?;
    println!("Wrote default config to {}", path.display());
    Ok(())
}

fn cmd_config_show() -> Result<()> {
    let config: AppConfig = load_config()?;
    println!("{}", toml::to_string_pretty(&config)?);
    Ok(())
}
