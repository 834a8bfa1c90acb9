use clap::{Parser, Subcommand};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use serde_json::Value;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "inspector-cli")]
#[command(about = "Command-line client for the event-inspection API", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:9090")]
    url: String,

    /// Bearer token forwarded to the authorization API by the gateway.
    #[arg(short, long)]
    token: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show total/good/bad counts
    Summary,
    /// Clear the validation cache
    Reset,
    /// List good events, optionally filtered by a JSON filter file
    Good {
        #[arg(short, long)]
        filter: Option<PathBuf>,
    },
    /// List bad events, optionally filtered by a JSON filter file
    Bad {
        #[arg(short, long)]
        filter: Option<PathBuf>,
    },
    /// List good and incomplete enriched events
    Events,
    /// Fetch a JSON schema from the registries
    Schema {
        vendor: String,
        name: String,
        version: String,
    },
    /// Show the public authorization settings
    AuthConfig,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base = format!("{}/micro", cli.url.trim_end_matches('/'));

    let mut headers = HeaderMap::new();
    if let Some(token) = &cli.token {
        headers.insert(AUTHORIZATION, HeaderValue::from_str(&format!("Bearer {token}"))?);
    }

    let request = match cli.command {
        Commands::Summary => client.get(format!("{base}/all")),
        Commands::Reset => client.post(format!("{base}/reset")),
        Commands::Good { filter } => filtered(&client, format!("{base}/good"), filter)?,
        Commands::Bad { filter } => filtered(&client, format!("{base}/bad"), filter)?,
        Commands::Events => client.get(format!("{base}/events")),
        Commands::Schema { vendor, name, version } => {
            client.get(format!("{base}/iglu/{vendor}/{name}/jsonschema/{version}"))
        }
        Commands::AuthConfig => client.get(format!("{base}/auth-config")),
    };

    let res = request.headers(headers).send().await?;
    print_response(res).await
}

fn filtered(
    client: &reqwest::Client,
    url: String,
    filter: Option<PathBuf>,
) -> Result<reqwest::RequestBuilder, Box<dyn std::error::Error>> {
    match filter {
        Some(path) => {
            let document: Value = serde_json::from_str(&std::fs::read_to_string(path)?)?;
            Ok(client.post(url).json(&document))
        }
        None => Ok(client.get(url)),
    }
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: inspection API returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        return Ok(());
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
