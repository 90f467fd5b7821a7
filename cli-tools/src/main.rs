//! directdns-api - CLI tool for the DirectDNS create API
//!
//! Creates proxy sessions from the command line, useful for testing the API
//! without going through the web page.

mod batch;
mod client;

use std::time::Duration;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use shared::api::{ApiClientConfig, DEFAULT_API_BASE_URL, DEFAULT_PROXY_DOMAIN};
use shared::Session;
use tabled::{Table, Tabled};

use batch::{BatchOutcome, Entry};
use client::NativeApiClient;

#[derive(Parser)]
#[command(name = "directdns-api")]
#[command(about = "CLI tool for creating DirectDNS proxy sessions", long_about = None)]
struct Cli {
    /// API server URL
    #[arg(long, env = "DIRECTDNS_API_URL", default_value = DEFAULT_API_BASE_URL)]
    api_url: String,

    /// Domain the proxy URLs are built under
    #[arg(long, env = "DIRECTDNS_DOMAIN", default_value = DEFAULT_PROXY_DOMAIN)]
    domain: String,

    /// Request timeout in seconds (0 disables the timeout)
    #[arg(long, default_value_t = 30)]
    timeout: u64,

    /// Output format
    #[arg(short, long, default_value = "pretty")]
    format: OutputFormat,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Default, clap::ValueEnum)]
enum OutputFormat {
    #[default]
    Pretty,
    Json,
    Table,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a proxy session
    Create {
        /// Hostname to proxy
        hostname: String,
        /// Optional IP address to reach the hostname at
        #[arg(long)]
        ip: Option<String>,
    },

    /// Create several proxy sessions, given as HOSTNAME or HOSTNAME=IP
    Batch {
        #[arg(required = true)]
        entries: Vec<String>,
    },

    /// Print the proxy URL for an existing token
    Url {
        token: String,
    },
}

#[derive(Tabled)]
struct SessionRow {
    #[tabled(rename = "URL")]
    url: String,
    #[tabled(rename = "Hostname")]
    hostname: String,
    #[tabled(rename = "IP")]
    ip: String,
    #[tabled(rename = "Token")]
    token: String,
}

impl From<&Session> for SessionRow {
    fn from(s: &Session) -> Self {
        Self {
            url: s.url.clone(),
            hostname: s.name.clone(),
            ip: s.ip_label().to_string(),
            token: s.token.clone(),
        }
    }
}

impl Cli {
    fn api_config(&self) -> ApiClientConfig {
        let timeout = (self.timeout > 0).then(|| Duration::from_secs(self.timeout));
        ApiClientConfig::default()
            .with_api_base_url(self.api_url.as_str())
            .with_proxy_domain(self.domain.as_str())
            .with_timeout(timeout)
    }

    fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    }
}

fn print_outcome(outcome: &BatchOutcome, format: OutputFormat) -> Result<()> {
    let sessions = outcome.sessions();

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&sessions)?),
        OutputFormat::Table => {
            if !sessions.is_empty() {
                let rows: Vec<SessionRow> = sessions.iter().map(SessionRow::from).collect();
                println!("{}", Table::new(rows));
            }
        }
        OutputFormat::Pretty => {
            for s in &sessions {
                println!("{} {}", "✓".green(), s.url.bold());
                println!("    {} ({})", s.name, s.ip_label());
            }
        }
    }

    for failure in &outcome.failures {
        let hostname = if failure.hostname.is_empty() {
            "<empty>"
        } else {
            failure.hostname.as_str()
        };
        eprintln!("{} {}: {}", "✗".red(), hostname, failure.message);
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| cli.log_filter().into()),
        )
        .init();

    let config = cli.api_config();

    let entries = match &cli.command {
        Commands::Url { token } => {
            println!("{}", config.proxy_url(token));
            return Ok(());
        }
        Commands::Create { hostname, ip } => {
            vec![Entry::new(hostname, ip.as_deref().unwrap_or_default())]
        }
        Commands::Batch { entries } => entries.iter().map(|raw| Entry::parse(raw)).collect(),
    };

    let client = NativeApiClient::new(config.clone())?;
    let total = entries.len();
    let outcome = batch::run(&client, &config, entries).await;
    print_outcome(&outcome, cli.format)?;

    if !outcome.failures.is_empty() {
        bail!("{} of {} sessions failed", outcome.failures.len(), total);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::try_parse_from(["directdns-api", "create", "example.com"]).unwrap();
        let config = cli.api_config();
        assert_eq!(config.create_url(), "https://api.directdns.net/api/create");
        assert_eq!(config.timeout, Some(Duration::from_secs(30)));
        assert_eq!(cli.log_filter(), "warn");
    }

    #[test]
    fn test_cli_overrides() {
        let cli = Cli::try_parse_from([
            "directdns-api",
            "--api-url",
            "http://localhost:3000/",
            "--domain",
            "proxy.test",
            "--timeout",
            "0",
            "-vv",
            "url",
            "abc123",
        ])
        .unwrap();
        let config = cli.api_config();
        assert_eq!(config.create_url(), "http://localhost:3000/api/create");
        assert_eq!(config.proxy_url("abc123"), "https://abc123.proxy.test/");
        assert!(config.timeout.is_none());
        assert_eq!(cli.log_filter(), "debug");
    }

    #[test]
    fn test_batch_requires_entries() {
        assert!(Cli::try_parse_from(["directdns-api", "batch"]).is_err());
    }

    #[test]
    fn test_session_row_uses_ip_label() {
        let session = Session {
            token: "xyz".to_string(),
            url: "https://xyz.directdns.net/".to_string(),
            name: "example.com".to_string(),
            ip: String::new(),
        };
        let row = SessionRow::from(&session);
        assert_eq!(row.ip, "No IP");
        assert_eq!(row.hostname, "example.com");
    }
}
