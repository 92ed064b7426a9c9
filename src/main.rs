use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};
use ttlview::config::ViewerConfig;
use ttlview::rdf::{normalize_same_as, RdfParser, RdfSerializer, RdfStore};
use ttlview::wikidata::{ExternalEnricher, NoopEnricher, SparqlClient, WikidataEnricher, WikidataLinker};
use ttlview::{AppState, HttpServer};

#[derive(Parser)]
#[command(name = "ttlview", version, about = "Browse a Turtle knowledge graph in the browser")]
struct Cli {
    /// YAML configuration file
    #[arg(long, global = true, env = "TTLVIEW_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the viewer over HTTP
    Serve {
        /// Turtle file to load
        #[arg(long, env = "TTLVIEW_DATA")]
        data: Option<PathBuf>,

        /// Bind address
        #[arg(long, env = "TTLVIEW_ADDRESS")]
        address: Option<String>,

        /// Port
        #[arg(long, env = "TTLVIEW_PORT")]
        port: Option<u16>,

        /// Do not query Wikidata for entity pages
        #[arg(long)]
        no_wikidata: bool,
    },
    /// Add owl:sameAs links to Wikidata items matching each rdfs:label
    LinkWikidata {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        output: PathBuf,
    },
    /// Turn URI-shaped owl:sameAs literals into IRIs
    NormalizeSameAs {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        output: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let mut config = match &cli.config {
        Some(path) => ViewerConfig::from_file(path)?,
        None => ViewerConfig::default(),
    };

    match cli.command {
        Commands::Serve {
            data,
            address,
            port,
            no_wikidata,
        } => {
            if let Some(data) = data {
                config.data_file = data;
            }
            if let Some(address) = address {
                config.address = address;
            }
            if let Some(port) = port {
                config.port = port;
            }
            if no_wikidata {
                config.wikidata.enabled = false;
            }
            serve(config).await
        }
        Commands::LinkWikidata { input, output } => link_wikidata(&config, &input, &output).await,
        Commands::NormalizeSameAs { input, output } => normalize(&input, &output),
    }
}

fn load(path: &Path) -> Result<RdfStore> {
    let store = RdfParser::load_store(path)
        .with_context(|| format!("cannot load knowledge base {}", path.display()))?;
    info!("Loaded {} triples from {}", store.len(), path.display());
    Ok(store)
}

async fn serve(config: ViewerConfig) -> Result<()> {
    info!("ttlview v{}", ttlview::version());
    let store = load(&config.data_file)?;

    let enricher: Arc<dyn ExternalEnricher> = if config.wikidata.enabled {
        Arc::new(WikidataEnricher::new(&config.wikidata)?)
    } else {
        warn!("Wikidata enrichment disabled");
        Arc::new(NoopEnricher)
    };

    let server = HttpServer::new(AppState::new(store, config, enricher));
    server
        .start()
        .await
        .map_err(|e| anyhow::anyhow!("server error: {}", e))
}

async fn link_wikidata(config: &ViewerConfig, input: &Path, output: &Path) -> Result<()> {
    let store = load(input)?;
    let linker = WikidataLinker::new(SparqlClient::new(&config.wikidata)?);

    let (linked, stats) = linker.link(&store).await;
    RdfSerializer::serialize_file(&linked, output)?;
    info!(
        "Linked {} of {} labels ({} lookups failed); saved to {}",
        stats.links_added,
        stats.labels_seen,
        stats.lookups_failed,
        output.display()
    );
    Ok(())
}

fn normalize(input: &Path, output: &Path) -> Result<()> {
    let store = load(input)?;
    let (normalized, count) = normalize_same_as(&store);
    RdfSerializer::serialize_file(&normalized, output)?;
    info!("Rewrote {} owl:sameAs literal(s); saved to {}", count, output.display());
    Ok(())
}
