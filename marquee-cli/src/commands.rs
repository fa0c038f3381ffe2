//! CLI command implementations

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Subcommand;
use marquee_core::{MarqueeConfig, SearchInput, spawn_debouncer};
use marquee_search::{
    AppwriteMetricStore, DiscoverySession, DiscoveryView, FetchOutcome, FetchState,
    InMemoryMetricStore, Movie, MovieDiscoveryService, SearchMetricStore, TmdbCatalog,
    TrendingEntry,
};
use tokio::io::{AsyncBufReadExt, BufReader};

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Start the web UI
    Serve {
        /// Host to bind to
        #[arg(long)]
        host: Option<String>,
        /// Port to bind to
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Search the catalog once and count the search
    Search {
        /// Search text
        query: String,
    },
    /// List popular movies
    Discover,
    /// Show the most searched terms
    Trending,
    /// Search as you type: each stdin line replaces the input text
    Watch,
}

/// Handle the CLI command
///
/// # Errors
/// - Service construction failed
/// - `serve` could not bind its address
/// - `search`/`discover` fetch failed
pub async fn handle_command(command: Commands, config: MarqueeConfig, dev: bool) -> anyhow::Result<()> {
    let service = build_service(&config, dev)?;

    match command {
        Commands::Serve { host, port } => serve(config, service, host, port).await,
        Commands::Search { query } => run_once(&service, &query).await,
        Commands::Discover => run_once(&service, "").await,
        Commands::Trending => show_trending(&service).await,
        Commands::Watch => {
            let quiet_period = config.discovery.debounce_quiet_period;
            watch(service, quiet_period).await
        }
    }
}

fn build_service(config: &MarqueeConfig, dev: bool) -> anyhow::Result<MovieDiscoveryService> {
    let catalog = TmdbCatalog::new(&config.catalog).context("creating catalog client")?;

    let store: Arc<dyn SearchMetricStore> = if dev {
        tracing::info!("Development mode: search metrics kept in memory");
        Arc::new(InMemoryMetricStore::new())
    } else {
        Arc::new(AppwriteMetricStore::new(&config.store).context("creating document store client")?)
    };

    Ok(MovieDiscoveryService::new(Arc::new(catalog), store, config))
}

async fn serve(
    mut config: MarqueeConfig,
    service: MovieDiscoveryService,
    host: Option<String>,
    port: Option<u16>,
) -> anyhow::Result<()> {
    if let Some(host) = host {
        config.web.host = host;
    }
    if let Some(port) = port {
        config.web.port = port;
    }

    marquee_web::run_server(config, service)
        .await
        .context("web server stopped")
}

async fn run_once(service: &MovieDiscoveryService, query: &str) -> anyhow::Result<()> {
    match service.run_query(query).await {
        FetchOutcome::Success(movies) => {
            println!("{}", format_movies(&movies, service.image_base_url()));
            Ok(())
        }
        FetchOutcome::Failed(message) => anyhow::bail!(message),
    }
}

async fn show_trending(service: &MovieDiscoveryService) -> anyhow::Result<()> {
    let entries = service.load_trending().await.unwrap_or_default();
    let output = format_trending(&entries);
    if !output.is_empty() {
        println!("{output}");
    }
    Ok(())
}

/// Feeds stdin lines through the debouncer and prints each settled view.
async fn watch(service: MovieDiscoveryService, quiet_period: Duration) -> anyhow::Result<()> {
    let image_base_url = service.image_base_url().to_string();
    let session = DiscoverySession::new(service);

    let view = session.mount().await;
    let trending = format_trending(&view.trending);
    if !trending.is_empty() {
        println!("{trending}\n");
    }
    println!("{}", format_view(&view, &image_base_url));

    let (debouncer, mut settled) = spawn_debouncer(quiet_period, "");
    let mut input = SearchInput::new("", move |raw| {
        if let Err(e) = debouncer.update(raw) {
            tracing::warn!(error = %e, "Dropped input change");
        }
    });

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => match line.context("reading stdin")? {
                Some(line) => input.set_value(line),
                None => break,
            },
            Some(query) = settled.next() => {
                if let Some(view) = session.on_settled(&query).await {
                    println!("{}", format_view(&view, &image_base_url));
                }
            }
        }
    }

    // Let the last line settle before exiting.
    if let Ok(Some(query)) = tokio::time::timeout(quiet_period * 2, settled.next()).await {
        if let Some(view) = session.on_settled(&query).await {
            println!("{}", format_view(&view, &image_base_url));
        }
    }

    Ok(())
}

fn format_view(view: &DiscoveryView, image_base_url: &str) -> String {
    let heading = if view.settled_query.is_empty() {
        "Popular movies".to_string()
    } else {
        format!("Results for \"{}\"", view.settled_query)
    };

    match (view.state, view.error.as_deref()) {
        (FetchState::Failed, Some(message)) => format!("{heading}\n  error: {message}"),
        _ => format!("{heading}\n{}", format_movies(&view.movies, image_base_url)),
    }
}

fn format_movies(movies: &[Movie], image_base_url: &str) -> String {
    if movies.is_empty() {
        return "  (no movies)".to_string();
    }

    movies
        .iter()
        .map(|movie| {
            let year = movie
                .release_year()
                .map(|year| format!(" ({year})"))
                .unwrap_or_default();
            let poster = movie.poster_url(image_base_url).unwrap_or_else(|| "-".to_string());
            format!("  {}{year}  {poster}", movie.title)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn format_trending(entries: &[TrendingEntry]) -> String {
    entries
        .iter()
        .map(|entry| format!("{:>2}. {} ({} searches)", entry.rank, entry.search_term, entry.count))
        .collect::<Vec<_>>()
        .join("\n")
}
