//! Bot configuration
//!
//! Read from an INI file with a `[BotConfiguration]` section. `BOT_*`
//! environment variables take precedence over the file.

use config::{Config, File, FileFormat};
use serde::Deserialize;
use thiserror::Error;

/// Default configuration file
pub const DEFAULT_CONFIG_PATH: &str = "bot_config.ini";

const SECTION: &str = "BotConfiguration";

/// Largest user count whose `user_N` password still fits the 6-10 character rule
pub const MAX_USERS: u32 = 99_999;

/// Environment variable overrides as (variable, key inside the section)
const ENV_OVERRIDES: [(&str, &str); 4] = [
    ("BOT_BASE_URL", "base_url"),
    ("BOT_NUMBER_OF_USERS", "number_of_users"),
    ("BOT_MAX_POSTS_PER_USER", "max_posts_per_user"),
    ("BOT_MAX_LIKES_PER_USER", "max_likes_per_user"),
];

#[derive(Debug, Error)]
pub enum BotConfigError {
    #[error("Failed to read bot configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("{0} must be at least 1")]
    Invalid(&'static str),

    #[error("number_of_users must be at most {MAX_USERS}, got {0}")]
    TooManyUsers(u32),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BotConfig {
    pub base_url: String,
    pub number_of_users: u32,
    pub max_posts_per_user: u32,
    pub max_likes_per_user: u32,
}

#[derive(Deserialize)]
struct BotConfigFile {
    #[serde(rename = "BotConfiguration", alias = "botconfiguration")]
    bot: BotConfig,
}

impl BotConfig {
    /// Load from `BOT_CONFIG` (or `bot_config.ini`) and the process environment
    pub fn load() -> Result<Self, BotConfigError> {
        let path = std::env::var("BOT_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        Self::load_from(&path, |name| std::env::var(name).ok())
    }

    /// Load from `path`, resolving overrides through `env`
    pub fn load_from(
        path: &str,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, BotConfigError> {
        let key = |name: &str| format!("{SECTION}.{name}");

        let mut builder = Config::builder()
            .set_default(key("base_url"), "http://127.0.0.1:8000")?
            .set_default(key("number_of_users"), 5)?
            .set_default(key("max_posts_per_user"), 3)?
            .set_default(key("max_likes_per_user"), 5)?
            .add_source(File::new(path, FileFormat::Ini).required(false));

        for (variable, name) in ENV_OVERRIDES {
            builder = builder.set_override_option(key(name), env(variable))?;
        }

        let file: BotConfigFile = builder.build()?.try_deserialize()?;
        file.bot.validate()
    }

    fn validate(self) -> Result<Self, BotConfigError> {
        if self.number_of_users == 0 {
            return Err(BotConfigError::Invalid("number_of_users"));
        }
        if self.number_of_users > MAX_USERS {
            return Err(BotConfigError::TooManyUsers(self.number_of_users));
        }
        if self.max_posts_per_user == 0 {
            return Err(BotConfigError::Invalid("max_posts_per_user"));
        }
        if self.max_likes_per_user == 0 {
            return Err(BotConfigError::Invalid("max_likes_per_user"));
        }
        Ok(self)
    }
}
