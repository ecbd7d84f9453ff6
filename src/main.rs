use anyhow::{anyhow, Context};
use clap::{Parser, Subcommand, ValueEnum};
use meatra_site::config::Config;
use meatra_site::constants::INTERIOR_PAGE_ID;
use meatra_site::content::ProductType;
use meatra_site::loaders;
use meatra_site::logging;
use meatra_site::metrics;
use meatra_site::server::{self, AppState};
use serde::Serialize;
use tracing::info;

#[derive(Parser)]
#[command(name = "meatra_site")]
#[command(about = "Meatra restaurant site backend and CMS content gateway")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve page data and the booking/career form endpoints
    Serve {
        /// Port to listen on (overrides config and PORT)
        #[arg(long)]
        port: Option<u16>,
        /// Also expose Prometheus metrics on this port
        #[arg(long)]
        metrics_port: Option<u16>,
    },
    /// Fetch one CMS collection and print the normalized records as JSON
    Fetch {
        #[arg(value_enum)]
        collection: Collection,
        /// Event slug to look up (only with the `event` collection)
        #[arg(long)]
        slug: Option<String>,
        /// Only products of this type (special, dish, drink)
        #[arg(long = "type")]
        product_type: Option<String>,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Collection {
    Products,
    MainMenu,
    GameMenu,
    Events,
    Event,
    Team,
    Vacancies,
    Benefits,
    Interior,
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn fetch(
    state: &AppState,
    collection: Collection,
    slug: Option<String>,
    product_type: Option<String>,
) -> anyhow::Result<()> {
    let gateway = &state.gateway;
    match collection {
        Collection::Products => {
            let wanted = match product_type.as_deref() {
                Some(t) => Some(
                    ProductType::parse(t).ok_or_else(|| anyhow!("Unknown product type: {}", t))?,
                ),
                None => None,
            };
            print_json(&loaders::products(gateway, wanted, Some(100)).await)
        }
        Collection::MainMenu => print_json(&loaders::main_menu(gateway).await),
        Collection::GameMenu => print_json(&loaders::game_menu(gateway).await),
        Collection::Events => print_json(&loaders::events(gateway).await),
        Collection::Event => {
            let slug = slug.context("--slug is required for the event collection")?;
            match loaders::event_by_slug(gateway, &slug).await {
                Some(event) => print_json(&event),
                None => Err(anyhow!("No event with slug '{}'", slug)),
            }
        }
        Collection::Team => print_json(&loaders::team_members(gateway).await),
        Collection::Vacancies => print_json(&loaders::vacancies(gateway).await),
        Collection::Benefits => print_json(&loaders::benefits(gateway).await),
        Collection::Interior => {
            print_json(&loaders::interior_images(gateway, INTERIOR_PAGE_ID).await)
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init_logging();

    let cli = Cli::parse();
    let config = Config::load().context("Failed to load configuration")?;
    let state = AppState::from_config(&config).context("Failed to build HTTP client")?;

    match cli.command {
        Commands::Serve { port, metrics_port } => {
            if let Some(metrics_port) = metrics_port {
                metrics::init_metrics(metrics_port);
            }
            let port = port.unwrap_or(config.server.port);
            info!(
                cms = %config.cms.api_url,
                forwarding = config.server.submission_forward_url.is_some(),
                "Starting site server"
            );
            server::start_server(state, port)
                .await
                .map_err(|e| anyhow!("Server error: {}", e))?;
        }
        Commands::Fetch {
            collection,
            slug,
            product_type,
        } => fetch(&state, collection, slug, product_type).await?,
    }

    Ok(())
}
