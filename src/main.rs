//! Wiring & DI. Entry point: load config, bootstrap the Bot API adapter,
//! build the sticker client, run the operator console. No business logic here.

use std::path::PathBuf;
use std::sync::Arc;
use tg_stickers::adapters::telegram::HttpBotApi;
use tg_stickers::adapters::ui::console::ConsoleInputPort;
use tg_stickers::ports::{BotApiPort, InputPort, StickerClientPort};
use tg_stickers::shared::config::AppConfig;
use tg_stickers::usecases::StickerClient;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let env_loaded = dotenv::dotenv();
    tg_stickers::shared::logging::init();

    match &env_loaded {
        Ok(path) => info!(path = %path.display(), "loaded .env"),
        Err(_) => info!(cwd = %cwd.display(), "no .env found (check CWD)"),
    }

    tg_stickers::adapters::ui::init_ui();

    let cfg = AppConfig::load()?;
    if !cfg.is_bot_configured() {
        anyhow::bail!("Set TG_STICKERS_BOT_TOKEN (env or .env). Get one from @BotFather");
    }
    let token = cfg
        .bot_token
        .clone()
        .ok_or_else(|| anyhow::anyhow!("bot token missing"))?;

    let images_dir = PathBuf::from(cfg.images_dir_or_default());
    tokio::fs::create_dir_all(&images_dir)
        .await
        .map_err(|e| anyhow::anyhow!("create images dir: {}", e))?;
    let images_dir_abs = images_dir
        .canonicalize()
        .unwrap_or_else(|_| images_dir.clone());
    info!(path = %images_dir_abs.display(), "sticker cache directory");

    let timeout = cfg.request_timeout_or_default();
    info!(
        api_url = %cfg.api_url_or_default(),
        timeout_secs = timeout.as_secs(),
        "Bot API transport"
    );
    let api: Arc<dyn BotApiPort> = Arc::new(
        HttpBotApi::new(cfg.api_url_or_default(), token, timeout)
            .map_err(|e| anyhow::anyhow!("{}", e))?,
    );

    let client: Arc<dyn StickerClientPort> = Arc::new(StickerClient::new(api, images_dir_abs));

    let input_port: Arc<dyn InputPort> = Arc::new(ConsoleInputPort::new(client));
    input_port.run().await?;

    Ok(())
}
