use std::env;
use std::net::SocketAddr;

use log::error;
use log::info;
use simplelog::{Config, LevelFilter, SimpleLogger};
use tokio_util::sync::CancellationToken;

use tableview_lib::error::Error;
use tableview_lib::mock::{MockConfig, MockServer, MockVehicleService, VEHICLES_PATH};

const DEFAULT_ADDR: &str = "127.0.0.1:8080";

fn env_or<T: std::str::FromStr>(name: &str, default: T) -> T {
    match env::var(name) {
        Ok(value) => value.parse().unwrap_or_else(|_| {
            eprintln!("Ignoring invalid {}={}", name, value);
            default
        }),
        Err(_) => default,
    }
}

fn mock_config() -> MockConfig {
    let defaults = MockConfig::default();
    MockConfig::new()
        .with_rows(env_or("TABLEVIEW_ROWS", defaults.rows))
        .with_page_size(env_or("TABLEVIEW_PAGE_SIZE", defaults.page_size))
        .with_seed(env_or("TABLEVIEW_SEED", defaults.seed))
}

async fn run(addr: SocketAddr, config: MockConfig) -> Result<(), Error> {
    let server = MockServer::bind(addr, MockVehicleService::new(config)).await?;
    info!(
        "Try {}{}?page=0&sort=name&sortDirection=desc",
        server.base_url()?,
        VEHICLES_PATH
    );

    let cancel = CancellationToken::new();
    let shutdown = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            shutdown.cancel();
        }
    });

    server.serve(cancel).await?;
    Ok(())
}

#[tokio::main]
async fn main() {
    let level = if env::var_os("TABLEVIEW_DEBUG").is_some() {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    SimpleLogger::init(level, Config::default()).expect("Failed to initialize logger");

    let addr: SocketAddr = env_or(
        "TABLEVIEW_ADDR",
        DEFAULT_ADDR.parse().expect("valid default address"),
    );
    let config = mock_config();
    info!(
        "Serving {} rows, {} per page (seed {})",
        config.rows, config.page_size, config.seed
    );

    if let Err(e) = run(addr, config).await {
        error!("{}", e);
        std::process::exit(1);
    }
}
