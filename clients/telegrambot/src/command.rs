//! Outgoing command payloads.

use serde::Serialize;

use crate::form::{FormField, FormFields};

/// Parse mode used for every text message this client sends.
pub const PARSE_MODE: &str = "MarkdownV2";

/// Body of `sendMessage`.
#[derive(Debug, Clone, Serialize)]
pub struct SendMessage<'a> {
    pub chat_id: i64,
    pub text: &'a str,
    pub parse_mode: &'static str,
}

impl<'a> SendMessage<'a> {
    pub fn new(chat_id: i64, text: &'a str) -> Self {
        Self {
            chat_id,
            text,
            parse_mode: PARSE_MODE,
        }
    }
}

/// Form fields of `sendPhoto`; the photo itself goes in as the `photo` file part.
#[derive(Debug, Clone, Copy)]
pub struct SendPhoto {
    pub chat_id: i64,
}

impl FormFields for SendPhoto {
    fn form_fields(&self) -> Vec<FormField> {
        vec![("chat_id", self.chat_id.into())]
    }
}

/// Body of `setWebhook`.
#[derive(Debug, Clone, Serialize)]
pub struct SetWebhook<'a> {
    pub url: &'a str,
}

/// Body of `getFile`.
#[derive(Debug, Clone, Serialize)]
pub struct GetFile<'a> {
    pub file_id: &'a str,
}
