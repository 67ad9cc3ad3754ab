use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};

use depper::config::{self, Config};
use depper::index::{HttpFetcher, ProjectMirror, PypiSimpleIndex};
use depper::mirror::JsonCacheFile;

#[derive(Parser)]
#[command(name = "depper")]
#[command(version, about = "Records the declared dependencies of every project on a Python package index")]
struct Cli {
    /// JSON config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Also print log events to stderr
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Extract the latest release's setup.py or METADATA of every project
    Mirror {
        /// Extraction cache file
        #[arg(long)]
        cache: Option<PathBuf>,
    },
    /// Print cached projects whose dependencies mention a prefix
    Analyze {
        /// Extraction cache file
        #[arg(long)]
        cache: Option<PathBuf>,

        /// Dependency name prefix
        #[arg(long)]
        prefix: Option<String>,
    },
    /// Manage the saved project list
    Projects {
        /// Save the index's current project list
        #[arg(long)]
        download: bool,

        /// Print projects on the index that the saved list lacks
        #[arg(long)]
        new: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;
    let _guard = depper::logging::init(&config::log_path(), cli.verbose)?;

    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?
        .block_on(run(cli.command, config))
}

async fn run(command: Command, config: Config) -> anyhow::Result<()> {
    let index = PypiSimpleIndex::new(config.index.url.clone());
    let project_mirror = ProjectMirror::new(&config.index.mirror_file);
    let mut stdout = std::io::stdout();

    match command {
        Command::Mirror { cache } => {
            let fetcher = HttpFetcher::new(Duration::from_millis(config.index.timeout_ms))?;
            let store = JsonCacheFile::new(cache.unwrap_or(config.mirror.cache_file));
            depper::app::run_mirror(
                &index,
                &fetcher,
                &project_mirror,
                &store,
                config.mirror.checkpoint_interval,
                &mut stdout,
            )
            .await?;
        }
        Command::Analyze { cache, prefix } => {
            let store = JsonCacheFile::new(cache.unwrap_or(config.mirror.cache_file));
            let prefix = prefix.unwrap_or(config.scan.prefix);
            depper::app::run_analyze(&store, &prefix, &mut stdout)?;
        }
        Command::Projects { download, new } => {
            depper::app::run_projects(&index, &project_mirror, download, new, &mut stdout).await?;
        }
    }

    Ok(())
}
