use clap::Parser;
use tracing::info;

use rw_client::{create_service, DEFAULT_BACKEND_URL};
use rw_flows::BatchRewriter;

/// Rewrite scraped articles through the backend pipeline.
///
/// With no argument every original article is rewritten, one at a time; pass
/// an article id to rewrite just that one.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Article id to rewrite. Omit to rewrite all original articles.
    id: Option<String>,

    /// Backend base URL. Falls back to $BACKEND_BASE_URL, then the default.
    #[arg(long)]
    backend_url: Option<String>,

    /// Run against the in-process memory backend instead of a live server.
    #[arg(long)]
    offline: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    let base_url = cli
        .backend_url
        .or_else(|| std::env::var("BACKEND_BASE_URL").ok())
        .unwrap_or_else(|| DEFAULT_BACKEND_URL.to_string());
    info!("🌐 Backend base URL: {}", base_url);

    let service = create_service(&base_url, cli.offline)?;
    let rewriter = BatchRewriter::new(service);

    // Selection failures abort with a non-zero exit; per-item failures are
    // part of a completed run.
    let report = rewriter.run(cli.id.as_deref()).await?;

    for failure in &report.failed {
        eprintln!("article #{}: {}", failure.source_id, failure.message);
    }
    println!(
        "Rewrote {} of {} article(s)",
        report.succeeded.len(),
        report.attempted()
    );

    Ok(())
}
