use tracing::info;
use tracing_subscriber::EnvFilter;

use netguessr_client::{
    HttpGameApi, SessionClient, SessionOptions,
    config::Config,
    terminal::{self, NoticePrinter, TerminalPrompter},
};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // Logs go to stderr, the game itself owns stdout
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "netguessr_client=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{}", e);
            std::process::exit(1);
        }
    };

    info!(
        "Starting NetGuessr client against {} (image checks: {})",
        config.base_url, config.check_images
    );

    let api = match HttpGameApi::new(config.base_url.clone()) {
        Ok(api) => api,
        Err(e) => {
            tracing::error!("Failed to build HTTP client: {}", e);
            std::process::exit(1);
        }
    };

    let mut client = SessionClient::new(
        api,
        SessionOptions {
            check_images: config.check_images,
        },
    );
    client.add_event_handler(Box::new(NoticePrinter));

    // A failed first load is recoverable with `next`
    if let Err(e) = client.start().await {
        tracing::warn!("Initial load failed: {}", e);
    }

    println!("{}", terminal::HELP);
    let mut prompter = TerminalPrompter::stdin();
    terminal::run(&mut client, &mut prompter).await;

    info!("Goodbye.");
}
