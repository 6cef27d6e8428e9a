//! Bot entry point
//!
//! ```bash
//! BOT_CONFIG=bot_config.ini cargo run -p social-bot
//! ```

use social_bot::{BotConfig, Simulation};
use social_common::try_init_tracing;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    if let Err(e) = try_init_tracing() {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    let config = match BotConfig::load() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Invalid bot configuration");
            std::process::exit(1);
        }
    };

    info!(
        base_url = %config.base_url,
        users = config.number_of_users,
        max_posts = config.max_posts_per_user,
        max_likes = config.max_likes_per_user,
        "Starting simulation"
    );

    Simulation::new(config).run().await;
}
