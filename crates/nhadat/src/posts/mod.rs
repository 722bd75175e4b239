use crate::prelude::{println, *};
use std::time::Duration;

pub mod browse;
pub mod list;
pub mod read;

// Re-export public data functions
pub use list::list_posts_data;
pub use read::read_post_data;

/// Posts module app - root command
#[derive(Debug, clap::Parser)]
#[command(name = "posts")]
#[command(about = "Listing post operations")]
pub struct App {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, clap::Subcommand)]
pub enum Commands {
    /// List posts with optional filters and pagination
    #[clap(name = "list")]
    List(list::ListOptions),

    /// Browse posts interactively, paging through results
    #[clap(name = "browse")]
    Browse(browse::BrowseOptions),

    /// Read a single post by id
    #[clap(name = "read")]
    Read(read::ReadOptions),
}

/// Backend configuration from environment variables
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    pub token: Option<String>,
}

impl ApiConfig {
    /// Load configuration from environment variables. The token is optional;
    /// listing endpoints are public.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            base_url: std::env::var("NHADAT_API_URL")
                .map_err(|_| eyre!("NHADAT_API_URL environment variable not set"))?,
            token: std::env::var("NHADAT_API_TOKEN").ok(),
        })
    }
}

/// Create an HTTP client with JSON headers and an optional Bearer token
pub fn create_client(config: &ApiConfig) -> Result<reqwest::Client> {
    use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};

    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    if let Some(token) = &config.token {
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {token}"))
                .map_err(|e| eyre!("Invalid header value: {}", e))?,
        );
    }

    reqwest::Client::builder()
        .default_headers(headers)
        .timeout(Duration::from_secs(10))
        .build()
        .map_err(|e| eyre!("Failed to build HTTP client: {}", e))
}

/// Module entry point
pub async fn run(app: App, global: crate::Global) -> Result<()> {
    if global.verbose {
        println!("Running posts module...");
    }

    match app.command {
        Commands::List(options) => list::run(options, global).await,
        Commands::Browse(options) => browse::run(options, global).await,
        Commands::Read(options) => read::run(options, global).await,
    }
}

/// Read the error envelope out of a non-2xx response body, falling back to a
/// generic message when the body does not parse.
pub fn server_error(status: u16, body: &str) -> Error {
    let message = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(String::from))
        .unwrap_or_else(|| "An error occurred".to_string());

    Error::Server { status, message }
}
