//! folio command-line consumer
//!
//! Wires the real source adapters into a repository/service pair, loads the
//! catalog once and prints the resulting DTO as JSON. Logs go to stderr so
//! stdout stays pipeable.

use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use folio_catalog::{CatalogManager, CatalogRepository, CatalogService, FilterInput};
use folio_sources::{
    GithubSource, HuggingFaceModelSource, HuggingFaceSpaceSource, ProjectSource,
};
use folio_types::ProjectProfile;

#[derive(Parser, Debug)]
#[command(name = "folio", about = "Render the project catalog as JSON", version)]
struct Args {
    /// GitHub username to pull repositories from
    #[arg(long)]
    github: Option<String>,

    /// Hugging Face username to pull models and spaces from
    #[arg(long)]
    huggingface: Option<String>,

    /// Category slug to filter by (repeatable)
    #[arg(long = "category")]
    categories: Vec<String>,

    /// Language slug to filter by (repeatable)
    #[arg(long = "language")]
    languages: Vec<String>,

    /// Snapshot time-to-live in seconds; 0 caches until invalidated
    #[arg(long, default_value_t = 300)]
    ttl_seconds: u64,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "folio=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();

    let profile = ProjectProfile {
        github_username: args.github,
        huggingface_username: args.huggingface,
    };

    let sources: Vec<Arc<dyn ProjectSource>> = vec![
        Arc::new(GithubSource::new()),
        Arc::new(HuggingFaceModelSource::new()),
        Arc::new(HuggingFaceSpaceSource::new()),
    ];

    let ttl = match args.ttl_seconds {
        0 => None,
        secs => Some(Duration::from_secs(secs)),
    };

    let repository = Arc::new(CatalogRepository::new(
        CatalogManager::new(sources),
        profile,
        ttl,
    ));
    let service = CatalogService::new(repository);

    let input = FilterInput {
        categories: args.categories,
        languages: args.languages,
    };

    let catalog = service.load_catalog(&input).await?;
    info!(
        "Loaded {} of {} projects",
        catalog.projects.len(),
        catalog.total
    );

    let json = if args.pretty {
        serde_json::to_string_pretty(&catalog)?
    } else {
        serde_json::to_string(&catalog)?
    };
    println!("{}", json);

    Ok(())
}
