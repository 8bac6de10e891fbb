//! Application configuration. Bot credentials, cache location, transport settings.

use secrecy::SecretString;
use serde::Deserialize;
use std::time::Duration;

/// Default cache root for mirrored sticker images.
pub const DEFAULT_IMAGES_DIR: &str = "./images";

/// Default Bot API endpoint.
pub const DEFAULT_API_URL: &str = "https://api.telegram.org";

/// Default per-request timeout in seconds.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Deserialize, Default)]
pub struct AppConfig {
    /// Bot token. Read from TG_STICKERS_BOT_TOKEN, falling back to TELEGRAM_BOT_TOKEN.
    #[serde(default)]
    pub bot_token: Option<SecretString>,

    /// Cache root; one subdirectory per pack. Read from TG_STICKERS_IMAGES_DIR.
    #[serde(default)]
    pub images_dir: Option<String>,

    /// Bot API base URL (self-hosted Bot API servers, tests). Read from TG_STICKERS_API_URL.
    #[serde(default)]
    pub api_url: Option<String>,

    /// Timeout for each Bot API request. Read from TG_STICKERS_REQUEST_TIMEOUT_SECS.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

impl AppConfig {
    /// Load from `.env`, TG_STICKERS_* environment variables, and the optional
    /// file named by TG_STICKERS_CONFIG (environment wins over the file).
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenv::dotenv().ok();
        let mut c = config::Config::builder();
        if let Ok(path) = std::env::var("TG_STICKERS_CONFIG") {
            c = c.add_source(config::File::with_name(&path));
        }
        c = c.add_source(config::Environment::with_prefix("TG_STICKERS"));
        let mut cfg: Self = c.build()?.try_deserialize()?;
        if cfg.bot_token.is_none() {
            if let Ok(token) = std::env::var("TELEGRAM_BOT_TOKEN") {
                cfg.bot_token = Some(SecretString::new(token));
            }
        }
        Ok(cfg)
    }

    /// Returns the images directory. Defaults to `./images`.
    pub fn images_dir_or_default(&self) -> String {
        self.images_dir
            .clone()
            .unwrap_or_else(|| DEFAULT_IMAGES_DIR.to_string())
    }

    /// Returns the Bot API base URL. Defaults to the public endpoint.
    pub fn api_url_or_default(&self) -> String {
        self.api_url
            .clone()
            .unwrap_or_else(|| DEFAULT_API_URL.to_string())
    }

    /// Returns the request timeout. Defaults to 30 seconds; zero is treated as unset.
    pub fn request_timeout_or_default(&self) -> Duration {
        let secs = self
            .request_timeout_secs
            .filter(|s| *s > 0)
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS);
        Duration::from_secs(secs)
    }

    /// Returns true if a non-empty bot token is configured.
    pub fn is_bot_configured(&self) -> bool {
        use secrecy::ExposeSecret;
        self.bot_token
            .as_ref()
            .is_some_and(|t| !t.expose_secret().trim().is_empty())
    }
}
