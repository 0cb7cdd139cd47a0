use std::time::Duration;
use anyhow::{anyhow, bail, Result};
use clap::Parser;
use hl_client::config::{DEFAULT_BASE_URL, DEFAULT_PAGE_SIZE};
use hl_client::{ClientConfig, HttpFetcher};
use hl_core::NewsFetcher;
use hl_feed::FeedViewModel;
use tracing::info;

mod browse;
mod logging;
mod render;

use render::{render_detail, render_list};

#[derive(Parser, Debug)]
#[command(author, version, about = "Search and page through news articles", long_about = None)]
pub struct Cli {
    /// NewsAPI key
    #[arg(long, env = "NEWS_API_KEY", hide_env_values = true)]
    api_key: String,
    /// Base URL of the news API
    #[arg(long, env = "NEWS_API_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,
    /// Articles per page
    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
    page_size: u32,
    /// Request timeout in seconds
    #[arg(long, default_value_t = 10)]
    timeout: u64,
    /// Log at debug level
    #[arg(short, long)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Print the first pages of results for a query
    Search {
        query: String,
        /// Number of pages to load
        #[arg(long, default_value_t = 1)]
        pages: u32,
    },
    /// Print one article of a query's results in full
    Show {
        query: String,
        /// Position of the article in the result list, starting at 0
        index: usize,
    },
    /// Interactive search with debounced input and infinite scrolling
    Browse {
        /// Rows shown per screen
        #[arg(long, default_value_t = 10)]
        window: usize,
    },
}

impl Cli {
    fn client_config(&self) -> ClientConfig {
        ClientConfig::new(self.api_key.clone())
            .with_base_url(self.base_url.clone())
            .with_page_size(self.page_size)
            .with_timeout(Duration::from_secs(self.timeout))
    }
}

/// Runs a search and keeps loading pages until `enough` says stop, the
/// results run out, or a request fails.
async fn load_until<F, P>(vm: &mut FeedViewModel<F>, query: &str, mut enough: P) -> Result<()>
where
    F: NewsFetcher + 'static,
    P: FnMut(&FeedViewModel<F>, u32) -> bool,
{
    vm.search(Some(query));
    vm.settle().await;

    let mut pages = 1;
    while !enough(vm, pages) {
        if let Some(message) = vm.state().error_message() {
            bail!("{}", message);
        }
        if vm.state().is_exhausted() {
            break;
        }
        vm.load_more();
        vm.settle().await;
        pages += 1;
    }

    match vm.state().error_message() {
        Some(message) => Err(anyhow!("{}", message)),
        None => Ok(()),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    let config = cli.client_config();
    config.validate()?;
    info!("📰 Using news API at {} ({} articles per page)", config.base_url, config.page_size);

    let fetcher = HttpFetcher::new(&config)?;
    let mut vm = FeedViewModel::new(fetcher, config);

    match cli.command {
        Commands::Search { query, pages } => {
            let pages = pages.max(1);
            load_until(&mut vm, &query, |_, loaded| loaded >= pages).await?;
            let state = vm.state();
            info!("✨ {} articles for {:?}", state.rows().len(), query);
            println!("{}", render_list(state, 0, state.rows().len()));
        }
        Commands::Show { query, index } => {
            load_until(&mut vm, &query, |vm, _| vm.row(index).is_some()).await?;
            match vm.row(index) {
                Some(row) => println!("{}", render_detail(row)),
                None => bail!("Only {} articles found for {:?}", vm.state().rows().len(), query),
            }
        }
        Commands::Browse { window } => browse::run(&mut vm, window).await?,
    }

    Ok(())
}
