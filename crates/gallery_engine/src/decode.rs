use gallery_logging::gallery_warn;
use serde::Deserialize;
use serde_json::Value;

use crate::{ImagePage, ImageRecord};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("response body is not JSON: {message}")]
    InvalidJson { message: String },
}

/// Record shape on the wire. Every field is optional; `null` reads as absent.
#[derive(Debug, Deserialize)]
struct WireRecord {
    #[serde(default)]
    public_id: Option<String>,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    prompt: Option<String>,
    #[serde(default)]
    album: Option<String>,
    #[serde(default)]
    created_at: Option<String>,
}

impl From<WireRecord> for ImageRecord {
    fn from(wire: WireRecord) -> Self {
        Self {
            public_id: wire.public_id.unwrap_or_default(),
            url: wire.url.unwrap_or_default(),
            prompt: wire.prompt.unwrap_or_default(),
            album: wire.album,
            created_at: wire.created_at.unwrap_or_default(),
        }
    }
}

/// Decode a list endpoint body.
///
/// Only a body that is not JSON at all is an error. A body without an `items`
/// array decodes to an empty page with no cursor, and entries that are not
/// records are dropped.
pub fn decode_page(bytes: &[u8]) -> Result<ImagePage, DecodeError> {
    let value: Value = serde_json::from_slice(bytes).map_err(|err| DecodeError::InvalidJson {
        message: err.to_string(),
    })?;

    let Value::Object(mut body) = value else {
        gallery_warn!("Image list body is not an object; treating as empty page");
        return Ok(ImagePage::default());
    };

    let items = match body.remove("items") {
        Some(Value::Array(entries)) => decode_records(entries),
        Some(other) => {
            gallery_warn!(
                "Image list `items` is not an array ({}); treating as empty",
                kind_of(&other)
            );
            Vec::new()
        }
        None => {
            gallery_warn!("Image list body has no `items`; treating as empty");
            Vec::new()
        }
    };

    let next_cursor = match body.remove("next_cursor") {
        Some(Value::String(cursor)) if !cursor.is_empty() => Some(cursor),
        _ => None,
    };

    Ok(ImagePage { items, next_cursor })
}

fn decode_records(entries: Vec<Value>) -> Vec<ImageRecord> {
    entries
        .into_iter()
        .enumerate()
        .filter_map(|(index, entry)| match serde_json::from_value::<WireRecord>(entry) {
            Ok(wire) => Some(ImageRecord::from(wire)),
            Err(err) => {
                gallery_warn!("Skipping malformed image record #{}: {}", index, err);
                None
            }
        })
        .collect()
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
