use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Response, StatusCode};
use serde::Serialize;

use crate::form::FormFields;
use crate::multipart::{self, SendFile};
use crate::TelegramError;

/// Raw HTTP access to the Bot API, authenticated by the token in the URL path.
#[derive(Clone)]
pub(crate) struct Transport {
    client: Client,
    api_key: String,
    base_url: String,
}

impl Transport {
    pub(crate) fn new(client: Client, api_key: String, base_url: String) -> Self {
        Self {
            client,
            api_key,
            base_url,
        }
    }

    fn command_url(&self, cmd: &str) -> String {
        format!("{}/bot{}/{}", self.base_url, self.api_key, cmd)
    }

    fn file_url(&self, file_path: &str) -> String {
        format!(
            "{}/file/bot{}/{}",
            self.base_url,
            self.api_key,
            file_path.trim_start_matches('/')
        )
    }

    /// GETs a file; the body is left unread for the caller.
    pub(crate) async fn get_file(&self, file_path: &str) -> Result<Response, TelegramError> {
        tracing::debug!(file_path, "downloading file");
        let resp = self.client.get(self.file_url(file_path)).send().await?;
        check_status(resp)
    }

    pub(crate) async fn post_json<B>(&self, cmd: &str, body: &B) -> Result<Response, TelegramError>
    where
        B: Serialize + ?Sized,
    {
        let payload = serde_json::to_vec(body)?;
        tracing::debug!(command = cmd, bytes = payload.len(), "sending command");
        let resp = self
            .client
            .post(self.command_url(cmd))
            .header(CONTENT_TYPE, "application/json")
            .body(payload)
            .send()
            .await?;
        check_status(resp)
    }

    /// POSTs a multipart form that is encoded while the request is in flight.
    pub(crate) async fn post_multipart<B>(
        &self,
        cmd: &str,
        body: &B,
        files: Vec<SendFile>,
    ) -> Result<Response, TelegramError>
    where
        B: FormFields + ?Sized,
    {
        tracing::debug!(command = cmd, files = files.len(), "sending multipart command");
        let form = multipart::build_form(body.form_fields(), files)?;
        let resp = self
            .client
            .post(self.command_url(cmd))
            .multipart(form)
            .send()
            .await?;
        check_status(resp)
    }
}

fn check_status(resp: Response) -> Result<Response, TelegramError> {
    let status = resp.status();
    if status != StatusCode::OK {
        tracing::debug!(%status, "Bot API request failed");
        return Err(TelegramError::Status(status));
    }
    Ok(resp)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transport() -> Transport {
        Transport::new(
            Client::new(),
            "123:abc".to_string(),
            "https://api.telegram.org".to_string(),
        )
    }

    #[test]
    fn command_url_embeds_token() {
        assert_eq!(
            transport().command_url("sendMessage"),
            "https://api.telegram.org/bot123:abc/sendMessage"
        );
    }

    #[test]
    fn file_url_uses_file_prefix() {
        assert_eq!(
            transport().file_url("photos/file_1.jpg"),
            "https://api.telegram.org/file/bot123:abc/photos/file_1.jpg"
        );
        assert_eq!(
            transport().file_url("/photos/file_1.jpg"),
            "https://api.telegram.org/file/bot123:abc/photos/file_1.jpg"
        );
    }
}
