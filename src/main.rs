use anyhow::{Result, bail};
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

use lexdash::archive::{self, ArchiveStore, ArchivingTransport};
use lexdash::judicial::{JudicialClient, SearchOrchestrator};
use lexdash::util::config::AppConfig;
use lexdash::{app, report};

#[derive(Parser, Debug)]
#[command(
    name = "lexdash",
    version,
    about = "Search a NUC across judicial decisions, cases and hearings"
)]
struct Cli {
    /// NUC to search on startup
    nuc: Option<String>,

    /// Path to config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print the results as text and exit
    #[arg(long, requires = "nuc")]
    plain: bool,

    /// List archived searches and exit
    #[arg(long)]
    history: bool,

    /// Print one archived search, by file name, and exit
    #[arg(long, value_name = "NAME")]
    show: Option<String>,

    /// Delete all archived searches and exit
    #[arg(long)]
    clear_history: bool,

    /// Do not archive search responses
    #[arg(long)]
    no_archive: bool,

    /// Query the judicial APIs directly instead of the search backend
    #[arg(long)]
    direct: bool,

    /// Enable debug logging to file
    #[arg(short, long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load(cli.config.as_deref())?;

    let _guard = setup_logging(&config, cli.debug)?;

    info!("lexdash starting");

    if cli.history {
        let store = ArchiveStore::new(config.archive_dir());
        print!("{}", report::render_history(&store.list()?));
        return Ok(());
    }

    if let Some(ref name) = cli.show {
        let store = ArchiveStore::new(config.archive_dir());
        let Some(archived) = store.load(name)? else {
            bail!("No archived search named {}", name);
        };
        let state = archive::replay(&archived, config.search.page_size)?;
        print!("{}", report::render_plain(&state));
        return Ok(());
    }

    if cli.clear_history {
        let store = ArchiveStore::new(config.archive_dir());
        store.clear()?;
        println!("Archive cleared: {}", store.dir().display());
        return Ok(());
    }

    let archive = if config.archive.enabled && !cli.no_archive {
        Some(ArchiveStore::new(config.archive_dir()))
    } else {
        None
    };

    let client = JudicialClient::from_config(&config.api, cli.direct)?;
    let transport = ArchivingTransport::new(client, archive);

    if cli.plain {
        let nuc = cli.nuc.unwrap_or_default();
        let mut orchestrator = SearchOrchestrator::new(transport, config.search.page_size);
        match orchestrator.search(&nuc).await {
            Ok(state) => {
                print!("{}", report::render_plain(&state));
                return Ok(());
            }
            Err(e) => {
                eprintln!("Search failed: {e}");
                std::process::exit(1);
            }
        }
    }

    app::event_loop::run(config, transport, cli.nuc).await
}

fn setup_logging(
    config: &AppConfig,
    debug: bool,
) -> Result<Option<tracing_appender::non_blocking::WorkerGuard>> {
    if !debug {
        return Ok(None);
    }

    let log_dir = config.log_dir();
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = tracing_appender::rolling::daily(&log_dir, "lexdash.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter("lexdash=debug")
        .with_ansi(false)
        .init();

    Ok(Some(guard))
}
