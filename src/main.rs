use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;
use vendor_search::search::{
    dispatch, flush_after, parse_query, RestQueryLogger, TracingQueryLogger,
};
use vendor_search::server::{self, AppState};
use vendor_search::{
    Config, ParsedQuery, QueryLogEntry, QueryLogger, RestVendorSource, VendorSource,
};

#[derive(Parser)]
#[command(name = "vendor-search", version, about = "Find event vendors from a plain-language query")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the filters extracted from a query
    Parse {
        query: String,
        #[arg(long)]
        user_id: Option<String>,
    },
    /// Extract filters and fetch matching vendors from the backend
    Search {
        query: String,
        #[arg(long)]
        user_id: Option<String>,
        /// Write the matched vendors as JSON
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Serve the ai-search endpoint
    Serve {
        #[arg(short, long)]
        port: Option<u16>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;
    let logger = query_logger(&config)?;

    match cli.command {
        Command::Parse { query, user_id } => {
            let parsed = parse_query(&query);
            let pending = dispatch(logger, QueryLogEntry::new(&parsed, user_id.as_deref()));
            flush_after(pending, async {
                println!("{}", serde_json::to_string_pretty(&parsed)?);
                Ok::<_, anyhow::Error>(())
            })
            .await?;
        }
        Command::Search {
            query,
            user_id,
            output,
        } => {
            let parsed = parse_query(&query);
            let pending = dispatch(logger, QueryLogEntry::new(&parsed, user_id.as_deref()));
            flush_after(pending, search_vendors(&config, &parsed, output.as_deref())).await?;
        }
        Command::Serve { port } => {
            let addr = SocketAddr::from(([0, 0, 0, 0], port.unwrap_or(config.port)));
            let app = server::router(Arc::new(AppState { logger }));

            let listener = tokio::net::TcpListener::bind(addr)
                .await
                .with_context(|| format!("Failed to bind {}", addr))?;
            info!("Listening on {}", addr);
            axum::serve(listener, app).await?;
        }
    }

    Ok(())
}

async fn search_vendors(
    config: &Config,
    parsed: &ParsedQuery,
    output: Option<&Path>,
) -> anyhow::Result<()> {
    let source = RestVendorSource::new(
        &config.backend_url,
        config.service_key.clone(),
        config.http_timeout,
    )?;

    info!("Querying {} for {:?}", source.source_name(), parsed.filters);
    let vendors = source.search(&parsed.filters).await?;

    for (i, vendor) in vendors.iter().enumerate() {
        println!("{}. {} ({})", i + 1, vendor.business_name, vendor.city);
        let services: Vec<&str> = vendor
            .services
            .iter()
            .map(|s| s.service_type.as_str())
            .collect();
        println!("   Services: {}", services.join(", "));
        println!("   ID: {}", vendor.id);
    }

    if let Some(path) = output {
        let json = serde_json::to_string_pretty(&vendors)?;
        tokio::fs::write(path, json)
            .await
            .with_context(|| format!("Failed to write {}", path.display()))?;
        info!("Saved {} vendors to {}", vendors.len(), path.display());
    }

    Ok(())
}

fn query_logger(config: &Config) -> anyhow::Result<Arc<dyn QueryLogger>> {
    Ok(match &config.service_key {
        Some(key) => Arc::new(RestQueryLogger::new(
            &config.backend_url,
            key,
            config.http_timeout,
        )?),
        None => Arc::new(TracingQueryLogger),
    })
}
