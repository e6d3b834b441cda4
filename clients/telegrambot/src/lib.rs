//! Client for the Telegram Bot HTTP API.
//!
//! Sends MarkdownV2 text, uploads photos as streamed multipart forms, registers
//! webhooks and downloads files.
//!
//! ```rust,ignore
//! use clients_telegrambot::{escape_markdown, TelegramBot};
//!
//! let bot = TelegramBot::from_api_key("BOT_TOKEN");
//! bot.send_message(42, &escape_markdown("Hello_World")).await?;
//! ```

mod bot;
pub mod command;
mod config;
mod error;
pub mod form;
mod markdown;
mod multipart;
mod transport;
mod types;

pub use bot::{decode, encode_png, TelegramBot};
pub use config::{TelegramBotConfig, TELEGRAM_API_BASE};
pub use error::TelegramError;
pub use form::{FormField, FormFields, FormValue};
pub use markdown::{escape_markdown, unescape_markdown};
pub use multipart::SendFile;
pub use types::{full_size_image, Chat, File, Message, PhotoSize, Response, Update, User};

pub use image;
pub use reqwest::StatusCode;
