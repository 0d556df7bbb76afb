//! Cliptag - clipboard capture analysis service.
//!
//! Runs the HTTP API server used by the Cliptag clients, or performs a
//! one-shot classification of text given on the command line.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cliptag_core::{ContentClassifier, TitleGenerator};
use cliptag_server::{Server, ServerConfig, DEFAULT_HOST, DEFAULT_PORT};

/// Cliptag - clipboard capture analysis service
#[derive(Parser, Debug)]
#[command(name = "cliptag", version, about)]
struct Args {
    /// Classify this text once, print the result as JSON, and exit
    text: Option<String>,

    /// Host to bind the API server to
    #[arg(long, default_value = DEFAULT_HOST)]
    host: String,

    /// Port to bind the API server to
    #[arg(long, default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,

    /// Set log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,
}

/// Initialize console logging.
fn init_logging(args: &Args) {
    let log_level = if args.debug { "debug" } else { &args.log_level };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "cliptag={0},cliptag_core={0},cliptag_server={0},warn",
            log_level
        ))
    });

    tracing_subscriber::fmt().with_env_filter(env_filter).init();
}

/// Classify the given text once and print the merged result to stdout.
fn analyze_once(text: &str) -> anyhow::Result<()> {
    let classifier = ContentClassifier::new();
    let titles = TitleGenerator::new();

    let classification = classifier.classify(text);
    let title = titles.generate(text, &classification);

    let doc = serde_json::json!({
        "content_type": classification.content_type,
        "tags": classification.tags,
        "language": classification.language,
        "confidence": classification.confidence,
        "title": title,
    });
    println!("{}", serde_json::to_string_pretty(&doc)?);

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(&args);

    if let Some(ref text) = args.text {
        return analyze_once(text);
    }

    let config = ServerConfig::default()
        .with_host(args.host.clone())
        .with_port(args.port);

    tracing::info!(host = %config.host, port = config.port, "Starting cliptag");

    let server = Server::new(config)?;
    server.run().await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn args_are_well_formed() {
        Args::command().debug_assert();
    }

    #[test]
    fn one_shot_analysis_succeeds() {
        analyze_once("https://example.com").unwrap();
        analyze_once("").unwrap();
    }
}
