use std::sync::Arc;

use anyhow::Context;
use dotenv::dotenv;
use tokio::io::BufReader;

use wigle_bot::chat::{ConsoleMessenger, Messenger};
use wigle_bot::config::Config;
use wigle_bot::controller::Controller;
use wigle_bot::network::{StatsApi, WigleClient};

/// The bot's entry-point.
///
/// Hosts the bot in a console chat: every line read from stdin is either
/// a `/command`, or a button press below a ranking, f.e. `#2 next`.
/// Messages are written to stdout.
#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Read environment variables from an '.env' file in the working directory.
    // We use these env vars:
    //  - RUST_LOG
    //  - WIGLE_BOT_CONFIG
    let using_env_file = dotenv().is_ok();

    env_logger::init(); // Use log::* to write to stderr

    if using_env_file {
        log::info!("using .env file")
    }

    let config = Config::read_from_env()?;

    let client = WigleClient::new(&config).context("failed to build http client")?;
    let api = Arc::new(client) as Arc<dyn StatsApi>;
    let messenger = Arc::new(ConsoleMessenger::new(tokio::io::stdout())) as Arc<dyn Messenger>;

    let controller = Controller::init(&config, api, messenger.clone());

    if let Err(err) = messenger.send_help().await {
        log::error!("failed to send help: {}", err);
    }

    log::info!("running input loop...");
    controller.serve(BufReader::new(tokio::io::stdin())).await?;

    log::info!("input closed, shutting down");
    Ok(())
}
