use serde::{Deserialize, Serialize};

/// Sender of a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

/// Chat a message belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chat {
    pub id: i64,
}

/// One resolution of a photo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotoSize {
    pub file_id: String,
    pub width: u32,
    pub height: u32,
}

/// A file ready to be downloaded; `file_path` feeds `TelegramBot::download_file`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct File {
    pub file_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_path: Option<String>,
}

/// Message as returned by the Bot API or delivered in an update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub message_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<User>,
    pub chat: Chat,
    /// Available sizes of an attached photo, smallest first as sent by Telegram.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub photo: Vec<PhotoSize>,
}

impl Message {
    /// File id of the widest attached photo, if the message has one.
    pub fn full_size_photo(&self) -> Option<&str> {
        full_size_image(&self.photo)
    }
}

/// Envelope around every Bot API result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Response<T> {
    pub ok: bool,
    pub result: T,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_code: Option<i32>,
}

/// One webhook delivery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Update {
    #[serde(default)]
    pub update_id: i64,
    pub message: Message,
}

/// Returns the file id of the widest photo variant.
///
/// Variants of equal width keep the first one seen.
pub fn full_size_image(photos: &[PhotoSize]) -> Option<&str> {
    let mut widest: Option<&PhotoSize> = None;
    for photo in photos {
        match widest {
            Some(current) if photo.width <= current.width => {}
            _ => widest = Some(photo),
        }
    }
    widest.map(|photo| photo.file_id.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn photo(id: &str, width: u32) -> PhotoSize {
        PhotoSize {
            file_id: id.to_string(),
            width,
            height: width / 2,
        }
    }

    #[test]
    fn full_size_prefers_first_of_equal_widths() {
        let photos = vec![photo("a", 100), photo("b", 200), photo("c", 200)];
        assert_eq!(full_size_image(&photos), Some("b"));
    }

    #[test]
    fn full_size_is_never_narrower_than_any_variant() {
        let photos = vec![photo("x", 320), photo("y", 1280), photo("z", 800), photo("w", 0)];
        let id = full_size_image(&photos).unwrap();
        let chosen = photos.iter().find(|p| p.file_id == id).unwrap();
        assert!(photos.iter().all(|p| chosen.width >= p.width));
    }

    #[test]
    fn full_size_of_nothing_is_none() {
        assert_eq!(full_size_image(&[]), None);
    }

    #[test]
    fn zero_width_single_variant_is_selected() {
        assert_eq!(full_size_image(&[photo("only", 0)]), Some("only"));
    }

    #[test]
    fn decodes_update_with_photo() {
        let raw = r#"{
            "update_id": 10,
            "message": {
                "message_id": 7,
                "from": {"id": 99, "username": "alice", "is_bot": false},
                "chat": {"id": -100, "type": "group"},
                "date": 1700000000,
                "photo": [
                    {"file_id": "small", "file_unique_id": "s", "width": 90, "height": 60},
                    {"file_id": "large", "file_unique_id": "l", "width": 1280, "height": 853}
                ]
            }
        }"#;
        let update: Update = serde_json::from_str(raw).unwrap();
        assert_eq!(update.update_id, 10);
        assert_eq!(update.message.message_id, 7);
        assert_eq!(update.message.text, None);
        assert_eq!(update.message.chat.id, -100);
        assert_eq!(
            update.message.from.as_ref().and_then(|u| u.username.as_deref()),
            Some("alice")
        );
        assert_eq!(update.message.full_size_photo(), Some("large"));
    }

    #[test]
    fn decodes_text_message_without_photo() {
        let raw = r#"{"message_id": 1, "text": "hi", "chat": {"id": 42}}"#;
        let message: Message = serde_json::from_str(raw).unwrap();
        assert_eq!(message.text.as_deref(), Some("hi"));
        assert!(message.photo.is_empty());
        assert_eq!(message.full_size_photo(), None);
    }

    #[test]
    fn decodes_file_response_envelope() {
        let raw = r#"{"ok": true, "result": {"file_id": "abc", "file_unique_id": "u", "file_size": 12, "file_path": "photos/file_1.jpg"}}"#;
        let response: Response<File> = serde_json::from_str(raw).unwrap();
        assert!(response.ok);
        assert_eq!(response.result.file_path.as_deref(), Some("photos/file_1.jpg"));
        assert_eq!(response.description, None);
    }

    #[test]
    fn decodes_boolean_result() {
        let raw = r#"{"ok": true, "result": true, "description": "Webhook was set"}"#;
        let response: Response<bool> = serde_json::from_str(raw).unwrap();
        assert!(response.result);
        assert_eq!(response.description.as_deref(), Some("Webhook was set"));
    }
}
