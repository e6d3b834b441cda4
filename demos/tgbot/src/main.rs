//! tgbot: drive the Bot API client from the command line.
//!
//! Usage:
//!   tgbot webhook <url>
//!   tgbot send <chat_id> <text>
//!   tgbot photo <chat_id> <png_path>
//!   tgbot download <file_id> <out_path>
//!
//! The token is read from TELEGRAM_BOT_TOKEN; TELEGRAM_API_URL overrides the endpoint.

use anyhow::{bail, Context, Result};
use clients_telegrambot::{decode, escape_markdown, File, Message, TelegramBot, TelegramBotConfig};
use tokio::io::AsyncWriteExt;
use tracing_subscriber::EnvFilter;

const USAGE: &str = "Usage: tgbot <webhook <url> | send <chat_id> <text> | photo <chat_id> <png_path> | download <file_id> <out_path>>";

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let args: Vec<&str> = args.iter().map(|s| s.trim()).collect();

    let config = TelegramBotConfig::from_env()?;
    let client = reqwest::Client::builder().build()?;
    let bot = TelegramBot::new(client, config);

    match args.as_slice() {
        ["webhook", url] => {
            let resp = decode::<bool>(bot.set_webhook(url).await?).await?;
            tracing::info!(
                set = resp.result,
                description = resp.description.as_deref().unwrap_or(""),
                "webhook updated"
            );
        }
        ["send", chat_id, text] => {
            let chat_id: i64 = chat_id.parse().context("chat_id must be an integer")?;
            let resp = bot.send_message(chat_id, &escape_markdown(text)).await?;
            let sent = decode::<Message>(resp).await?.result;
            tracing::info!(message_id = sent.message_id, "message sent");
        }
        ["photo", chat_id, path] => {
            let chat_id: i64 = chat_id.parse().context("chat_id must be an integer")?;
            let image = image::open(path).with_context(|| format!("failed to open {}", path))?;
            let sent = decode::<Message>(bot.send_photo(chat_id, &image).await?)
                .await?
                .result;
            tracing::info!(
                message_id = sent.message_id,
                file_id = sent.full_size_photo().unwrap_or(""),
                "photo sent"
            );
        }
        ["download", file_id, out_path] => {
            let file = decode::<File>(bot.get_file(file_id).await?).await?.result;
            let Some(file_path) = file.file_path else {
                bail!("file {} has no download path", file.file_id);
            };
            let mut resp = bot.download_file(&file_path).await?;
            let mut out = tokio::fs::File::create(out_path)
                .await
                .with_context(|| format!("failed to create {}", out_path))?;
            let mut written = 0usize;
            while let Some(chunk) = resp.chunk().await? {
                out.write_all(&chunk).await?;
                written += chunk.len();
            }
            out.flush().await?;
            tracing::info!(file_path, bytes = written, "file downloaded");
        }
        _ => bail!("{}", USAGE),
    }

    Ok(())
}
