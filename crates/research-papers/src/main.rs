//! Research Paper Service - Entry Point
//!
//! `serve` runs the HTTP API; `search` runs one query and prints the result.

use std::net::{IpAddr, SocketAddr};

use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use research_papers::models::{DEFAULT_LIMIT, Query};
use research_papers::{Config, Pipeline, formatters, server::HttpServer};

#[derive(Parser, Debug)]
#[command(name = "research-papers")]
#[command(about = "Search academic papers and augment them with LLM summaries")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Semantic Scholar API key (optional, enables higher rate limits)
    #[arg(long, global = true, env = "SEMANTIC_SCHOLAR_API_KEY", hide_env_values = true)]
    search_api_key: Option<String>,

    /// API key for the completion endpoint
    #[arg(long, global = true, env = "OPENAI_API_KEY", hide_env_values = true)]
    llm_api_key: Option<String>,

    /// Base URL of the Semantic Scholar Graph API
    #[arg(long, global = true, env = "SEMANTIC_SCHOLAR_API_URL")]
    search_api_url: Option<String>,

    /// Base URL of an OpenAI-compatible completion API
    #[arg(long, global = true, env = "LLM_API_URL")]
    llm_api_url: Option<String>,

    /// Completion model identifier
    #[arg(long, global = true, env = "LLM_MODEL")]
    llm_model: Option<String>,

    /// Papers augmented in parallel
    #[arg(long, global = true, env = "AUGMENT_CONCURRENCY")]
    concurrency: Option<usize>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    /// Output logs as JSON
    #[arg(long, global = true)]
    json_logs: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP API
    Serve {
        /// Interface to bind
        #[arg(long, default_value = "127.0.0.1", env = "HOST")]
        host: IpAddr,

        /// Port to listen on
        #[arg(long, default_value = "8000", env = "PORT")]
        port: u16,
    },
    /// Run a single query and print the augmented papers
    Search {
        /// Research query
        text: String,

        /// Number of papers to retrieve (1-50)
        #[arg(long, default_value_t = DEFAULT_LIMIT)]
        limit: u32,

        /// Print JSON instead of Markdown
        #[arg(long)]
        json: bool,
    },
}

fn init_tracing(log_level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    let subscriber = tracing_subscriber::registry().with(filter);

    // Logs go to stderr so `search` output stays pipeable.
    if json {
        subscriber.with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr)).init();
    } else {
        subscriber
            .with(tracing_subscriber::fmt::layer().compact().with_writer(std::io::stderr))
            .init();
    }
}

fn build_config(cli: &Cli) -> anyhow::Result<Config> {
    let config = apply_overrides(cli, Config::from_env()?);
    config.validate()?;
    Ok(config)
}

/// Command-line values take precedence over the environment.
fn apply_overrides(cli: &Cli, mut config: Config) -> Config {
    if cli.search_api_key.is_some() {
        config.search_api_key.clone_from(&cli.search_api_key);
    }
    if cli.llm_api_key.is_some() {
        config.llm_api_key.clone_from(&cli.llm_api_key);
    }
    if let Some(url) = &cli.search_api_url {
        config.search_api_url.clone_from(url);
    }
    if let Some(url) = &cli.llm_api_url {
        config.llm_api_url.clone_from(url);
    }
    if let Some(model) = &cli.llm_model {
        config.llm_model.clone_from(model);
    }
    if let Some(concurrency) = cli.concurrency {
        config.augment_concurrency = concurrency;
    }
    config
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    init_tracing(&cli.log_level, cli.json_logs);

    let config = build_config(&cli)?;
    if !config.has_llm_api_key() {
        tracing::warn!("No completion API key configured; summaries may degrade to placeholders");
    }

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        model = %config.llm_model,
        concurrency = config.augment_concurrency,
        "Starting research paper service"
    );

    let pipeline = Pipeline::from_config(&config)?;

    match cli.command {
        Command::Serve { host, port } => {
            HttpServer::new(pipeline).run(SocketAddr::new(host, port)).await?;
        }
        Command::Search { text, limit, json } => {
            let response = pipeline.run(&Query::new(text, limit)).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&response)?);
            } else {
                println!("{}", formatters::format_papers_markdown(&response.papers));
            }
        }
    }

    Ok(())
}
