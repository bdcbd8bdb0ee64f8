use clap::{Parser, Subcommand};
use serde_json::{Map, Value};
use std::path::PathBuf;
use std::process::ExitCode;

use webhook_relay::RoutePreference;

#[derive(Parser)]
#[command(name = "relay-cli")]
#[command(about = "Management CLI for the webhook relay", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    /// Relay endpoint path.
    #[arg(short, long, default_value = "/api/webhooks/n8n")]
    path: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check relay status and which routes are configured
    Status,
    /// Send a payload through the relay
    Send {
        /// Route key (predefined, trip-design)
        #[arg(short, long)]
        route: RoutePreference,

        /// Inline JSON object with extra fields
        #[arg(short, long, conflicts_with = "file")]
        data: Option<String>,

        /// File containing a JSON object with extra fields
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    match cli.command {
        Commands::Status => {
            let res = client.get(format!("{}/health", cli.url)).send().await?;
            print_response(res).await
        }
        Commands::Send { route, data, file } => {
            let extra = match (data, file) {
                (Some(data), _) => Some(data),
                (None, Some(path)) => Some(std::fs::read_to_string(path)?),
                (None, None) => None,
            };
            let payload = build_payload(route, extra.as_deref())?;

            let res = client
                .post(format!("{}{}", cli.url, cli.path))
                .json(&payload)
                .send()
                .await?;
            print_response(res).await
        }
    }
}

/// Merge extra fields into a payload carrying the route key.
fn build_payload(route: RoutePreference, extra: Option<&str>) -> Result<Value, Box<dyn std::error::Error>> {
    let mut fields = match extra {
        Some(raw) => match serde_json::from_str::<Value>(raw)? {
            Value::Object(map) => map,
            _ => return Err("payload data must be a JSON object".into()),
        },
        None => Map::new(),
    };
    fields.insert("routePreference".to_string(), Value::String(route.as_str().to_string()));
    Ok(Value::Object(fields))
}

async fn print_response(res: reqwest::Response) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let status = res.status();
    let text = res.text().await?;

    match serde_json::from_str::<Value>(&text) {
        Ok(json) => println!("{}", serde_json::to_string_pretty(&json)?),
        Err(_) => println!("{}", text),
    }

    if !status.is_success() {
        eprintln!("Error: relay returned status {}", status);
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}
