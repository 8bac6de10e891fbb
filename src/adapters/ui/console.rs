//! Implements InputPort. Inquire-based operator console over StickerClientPort.

use crate::adapters::ui::progress;
use crate::domain::DomainError;
use crate::ports::{InputPort, StickerClientPort};
use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use inquire::ui::{Color, RenderConfig, Styled};
use inquire::{Select, Text};
use std::fmt;
use std::sync::Arc;
use tracing::warn;

/// Maximum concurrent sticker downloads while mirroring a pack.
const MAX_CONCURRENT: usize = 3;

/// Set the inquire prompt theme for the rest of the process.
pub fn apply_theme() {
    let mut config = RenderConfig::default_colored();
    config.prompt_prefix = Styled::new("›").with_fg(Color::Rgb {
        r: 0x22,
        g: 0x9e,
        b: 0xd9,
    });
    config.highlighted_option_prefix = Styled::new("▸").with_fg(Color::Rgb {
        r: 0xff,
        g: 0x5f,
        b: 0xa2,
    });
    inquire::set_global_render_config(config);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    CheckPack,
    MirrorPack,
    SendMessage,
    Quit,
}

impl Action {
    const ALL: [Action; 4] = [
        Action::CheckPack,
        Action::MirrorPack,
        Action::SendMessage,
        Action::Quit,
    ];
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Action::CheckPack => "Check pack",
            Action::MirrorPack => "Mirror pack",
            Action::SendMessage => "Send message",
            Action::Quit => "Quit",
        };
        f.write_str(label)
    }
}

/// Result of mirroring one pack.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct MirrorReport {
    pub cached: Vec<String>,
    pub failed: Vec<(String, DomainError)>,
}

/// Console adapter. Inquire prompts.
pub struct ConsoleInputPort {
    client: Arc<dyn StickerClientPort>,
}

impl ConsoleInputPort {
    pub fn new(client: Arc<dyn StickerClientPort>) -> Self {
        Self { client }
    }

    async fn check_pack(&self) -> anyhow::Result<()> {
        let name = Text::new("Sticker pack name:").prompt()?;
        match self.client.pack_exists(name.trim()).await {
            Ok(true) => println!("✔ pack '{}' exists", name.trim()),
            Ok(false) => println!("✘ pack '{}' does not exist", name.trim()),
            Err(e) => println!("could not check pack: {}", e),
        }
        Ok(())
    }

    async fn mirror_pack_prompt(&self) -> anyhow::Result<()> {
        let name = Text::new("Sticker pack name:").prompt()?;
        match mirror_pack(self.client.as_ref(), name.trim()).await {
            Ok(report) => {
                println!(
                    "cached {} sticker(s), {} failed",
                    report.cached.len(),
                    report.failed.len()
                );
                for (file_id, e) in &report.failed {
                    println!("  {}: {}", file_id, e);
                }
            }
            Err(e) => println!("could not mirror pack: {}", e),
        }
        Ok(())
    }

    async fn send_message(&self) -> anyhow::Result<()> {
        let recipient = Text::new("Recipient username:").prompt()?;
        let content = Text::new("Message:").prompt()?;
        match self.client.send_message(recipient.trim(), &content).await {
            Ok(()) => println!("✔ sent"),
            Err(e) => println!("could not send message: {}", e),
        }
        Ok(())
    }
}

/// Enumerate `pack_name` and cache every sticker, at most `MAX_CONCURRENT` at a time.
/// Per-file failures are collected; enumeration failure aborts.
pub async fn mirror_pack(
    client: &dyn StickerClientPort,
    pack_name: &str,
) -> Result<MirrorReport, DomainError> {
    let file_ids = client.enumerate_sticker_files(pack_name).await?;
    let bar = progress::mirror_bar(pack_name, file_ids.len() as u64);

    let results: Vec<(String, Result<String, DomainError>)> = stream::iter(file_ids)
        .map(|file_id| {
            let bar = bar.clone();
            async move {
                let result = client.resolve_local_file(pack_name, &file_id).await;
                bar.inc(1);
                (file_id, result)
            }
        })
        .buffered(MAX_CONCURRENT)
        .collect()
        .await;
    bar.finish();

    let mut report = MirrorReport::default();
    for (file_id, result) in results {
        match result {
            Ok(path) => report.cached.push(path),
            Err(e) => {
                warn!(pack = pack_name, file_id = %file_id, error = %e, "sticker not cached");
                report.failed.push((file_id, e));
            }
        }
    }
    Ok(report)
}

#[async_trait]
impl InputPort for ConsoleInputPort {
    async fn run(&self) -> anyhow::Result<()> {
        loop {
            let action = Select::new("What do you want to do?", Action::ALL.to_vec()).prompt()?;
            match action {
                Action::CheckPack => self.check_pack().await?,
                Action::MirrorPack => self.mirror_pack_prompt().await?,
                Action::SendMessage => self.send_message().await?,
                Action::Quit => return Ok(()),
            }
        }
    }
}
