use std::io::Cursor;

use image::{ColorType, DynamicImage, ImageFormat};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::command::{GetFile, SendMessage, SendPhoto, SetWebhook};
use crate::form::FormFields;
use crate::multipart::SendFile;
use crate::transport::Transport;
use crate::types::{self, Message};
use crate::{TelegramBotConfig, TelegramError};

/// Client for the Telegram Bot API.
///
/// Every call returns the raw HTTP response once the status is 200; decode the
/// body with [`decode`] into the matching [`types::Response`].
#[derive(Clone)]
pub struct TelegramBot {
    transport: Transport,
}

impl TelegramBot {
    /// Creates a new `TelegramBot` sharing the given HTTP client.
    pub fn new(client: Client, config: TelegramBotConfig) -> Self {
        Self {
            transport: Transport::new(client, config.api_key, config.base_url),
        }
    }

    /// Creates a new `TelegramBot` for the public endpoint with its own HTTP client.
    pub fn from_api_key(api_key: impl Into<String>) -> Self {
        Self::new(Client::new(), TelegramBotConfig::new(api_key))
    }

    /// Sends `body` as JSON to the Bot API method `cmd`.
    pub async fn send_command<B>(&self, cmd: &str, body: &B) -> Result<Response, TelegramError>
    where
        B: Serialize + ?Sized,
    {
        self.transport.post_json(cmd, body).await
    }

    /// Sends the fields of `body` followed by `files` as a multipart form to `cmd`.
    pub async fn send_files<B>(
        &self,
        cmd: &str,
        body: &B,
        files: Vec<SendFile>,
    ) -> Result<Response, TelegramError>
    where
        B: FormFields + ?Sized,
    {
        self.transport.post_multipart(cmd, body, files).await
    }

    /// Downloads a file by the `file_path` obtained from [`TelegramBot::get_file`].
    pub async fn download_file(&self, file_path: &str) -> Result<Response, TelegramError> {
        self.transport.get_file(file_path).await
    }

    /// Sends a MarkdownV2 text message to a chat. `text` must already be escaped.
    pub async fn send_message(&self, chat_id: i64, text: &str) -> Result<Response, TelegramError> {
        self.send_command("sendMessage", &SendMessage::new(chat_id, text))
            .await
    }

    /// Replies with text in the chat `message` came from.
    pub async fn respond(&self, message: &Message, text: &str) -> Result<Response, TelegramError> {
        self.send_message(message.chat.id, text).await
    }

    /// Sends an image to a chat as a PNG upload.
    pub async fn send_photo(
        &self,
        chat_id: i64,
        image: &DynamicImage,
    ) -> Result<Response, TelegramError> {
        let png = encode_png(image)?;
        let files = vec![SendFile::from_bytes("photo", "photo.png", png).with_mime("image/png")];
        self.send_files("sendPhoto", &SendPhoto { chat_id }, files)
            .await
    }

    /// Replies with an image in the chat `message` came from.
    pub async fn respond_photo(
        &self,
        message: &Message,
        image: &DynamicImage,
    ) -> Result<Response, TelegramError> {
        self.send_photo(message.chat.id, image).await
    }

    /// Registers `url` as the bot's webhook.
    pub async fn set_webhook(&self, url: &str) -> Result<Response, TelegramError> {
        url::Url::parse(url)?;
        self.send_command("setWebhook", &SetWebhook { url }).await
    }

    /// Asks for the download path of a file id; the result decodes as `Response<File>`.
    pub async fn get_file(&self, file_id: &str) -> Result<Response, TelegramError> {
        self.send_command("getFile", &GetFile { file_id }).await
    }
}

/// Encodes an image as PNG in memory.
///
/// PNG has no float samples; 32-bit float images are written as 16-bit.
pub fn encode_png(image: &DynamicImage) -> Result<Vec<u8>, TelegramError> {
    let widened = match image.color() {
        ColorType::Rgb32F => Some(DynamicImage::ImageRgb16(image.to_rgb16())),
        ColorType::Rgba32F => Some(DynamicImage::ImageRgba16(image.to_rgba16())),
        _ => None,
    };
    let mut buf = Cursor::new(Vec::new());
    widened
        .as_ref()
        .unwrap_or(image)
        .write_to(&mut buf, ImageFormat::Png)?;
    Ok(buf.into_inner())
}

/// Reads a Bot API response body into its envelope.
pub async fn decode<T>(resp: Response) -> Result<types::Response<T>, TelegramError>
where
    T: DeserializeOwned,
{
    let body = resp.bytes().await?;
    Ok(serde_json::from_slice(&body)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn png_has_signature() {
        let png = encode_png(&DynamicImage::new_rgb8(3, 2)).unwrap();
        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
    }

    #[test]
    fn float_images_are_encoded() {
        for source in [DynamicImage::new_rgb32f(2, 2), DynamicImage::new_rgba32f(3, 1)] {
            let png = encode_png(&source).unwrap();
            let decoded = image::load_from_memory(&png).unwrap();
            assert_eq!(
                (decoded.width(), decoded.height()),
                (source.width(), source.height())
            );
        }
    }

    #[tokio::test]
    async fn invalid_webhook_url_is_rejected_before_sending() {
        let bot = TelegramBot::new(
            Client::new(),
            TelegramBotConfig::new("t").with_base_url("http://127.0.0.1:9"),
        );
        let err = bot.set_webhook("not a url").await.unwrap_err();
        assert!(matches!(err, TelegramError::InvalidUrl(_)));
    }
}
