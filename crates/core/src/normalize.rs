//! Normalization of raw Graph API payloads into strict records
//!
//! Parsing happens in two stages: the shell decodes a response into a generic
//! [`serde_json::Value`], and the adapters here project each element into a record
//! from [`crate::models`]. Every adapter is a pure, total function: it either returns
//! the record or a [`NormalizeError`] naming the first offending field. Required
//! fields are never defaulted.
//!
//! The adapters depend on the field selectors in [`crate::fields`] having been
//! requested; see [`crate::fields::POST_FIELDS`] and [`crate::fields::COMMENT_FIELDS`].

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

use crate::models::{Account, Attachments, Author, Comment, Image, Post};

/// Error raised when a raw payload cannot be projected into a record
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NormalizeError {
    #[error("Expected a JSON object for {entity}")]
    NotAnObject { entity: &'static str },

    #[error("Missing required field: {field}")]
    MissingField { field: String },

    #[error("Invalid type for field {field}: expected {expected}")]
    InvalidType {
        field: String,
        expected: &'static str,
    },

    #[error("Invalid timestamp in field {field}: {value}")]
    InvalidTimestamp { field: String, value: String },
}

impl NormalizeError {
    /// Dotted path of the field that failed validation, if the error names one
    pub fn field(&self) -> Option<&str> {
        match self {
            NormalizeError::NotAnObject { .. } => None,
            NormalizeError::MissingField { field }
            | NormalizeError::InvalidType { field, .. }
            | NormalizeError::InvalidTimestamp { field, .. } => Some(field),
        }
    }
}

type Result<T> = std::result::Result<T, NormalizeError>;

// =============================================================================
// Field access
// =============================================================================

/// Read-only view over a JSON object that remembers its dotted path
///
/// Explicit `null` is treated the same as an absent key.
struct Fields<'a> {
    object: &'a Map<String, Value>,
    prefix: String,
}

impl<'a> Fields<'a> {
    fn root(raw: &'a Value, entity: &'static str) -> Result<Self> {
        match raw {
            Value::Object(object) => Ok(Self {
                object,
                prefix: String::new(),
            }),
            _ => Err(NormalizeError::NotAnObject { entity }),
        }
    }

    fn nested(raw: &'a Value, path: String) -> Result<Self> {
        match raw {
            Value::Object(object) => Ok(Self {
                object,
                prefix: path,
            }),
            _ => Err(NormalizeError::InvalidType {
                field: path,
                expected: "object",
            }),
        }
    }

    fn path(&self, key: &str) -> String {
        if self.prefix.is_empty() {
            key.to_string()
        } else {
            format!("{}.{}", self.prefix, key)
        }
    }

    fn is_empty(&self) -> bool {
        self.object.is_empty()
    }

    fn get(&self, key: &str) -> Option<&'a Value> {
        self.object.get(key).filter(|v| !v.is_null())
    }

    fn required(&self, key: &str) -> Result<&'a Value> {
        self.get(key).ok_or_else(|| NormalizeError::MissingField {
            field: self.path(key),
        })
    }

    fn invalid(&self, key: &str, expected: &'static str) -> NormalizeError {
        NormalizeError::InvalidType {
            field: self.path(key),
            expected,
        }
    }

    fn string(&self, key: &str) -> Result<String> {
        self.required(key)?
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| self.invalid(key, "string"))
    }

    fn optional_string(&self, key: &str) -> Result<Option<String>> {
        match self.get(key) {
            None => Ok(None),
            Some(value) => value
                .as_str()
                .map(|s| Some(s.to_string()))
                .ok_or_else(|| self.invalid(key, "string")),
        }
    }

    fn unsigned(&self, key: &str) -> Result<u64> {
        as_unsigned(self.required(key)?).ok_or_else(|| self.invalid(key, "non-negative integer"))
    }

    fn unsigned_or(&self, key: &str, default: u64) -> Result<u64> {
        match self.get(key) {
            None => Ok(default),
            Some(value) => {
                as_unsigned(value).ok_or_else(|| self.invalid(key, "non-negative integer"))
            }
        }
    }

    fn timestamp(&self, key: &str) -> Result<DateTime<Utc>> {
        let raw = self
            .required(key)?
            .as_str()
            .ok_or_else(|| self.invalid(key, "ISO-8601 timestamp string"))?;

        parse_timestamp(raw).ok_or_else(|| NormalizeError::InvalidTimestamp {
            field: self.path(key),
            value: raw.to_string(),
        })
    }

    fn string_list(&self, key: &str) -> Result<Vec<String>> {
        let items = self
            .required(key)?
            .as_array()
            .ok_or_else(|| self.invalid(key, "array of strings"))?;

        items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                item.as_str()
                    .map(str::to_string)
                    .ok_or_else(|| NormalizeError::InvalidType {
                        field: format!("{}[{}]", self.path(key), index),
                        expected: "string",
                    })
            })
            .collect()
    }

    fn object(&self, key: &str) -> Result<Fields<'a>> {
        Fields::nested(self.required(key)?, self.path(key))
    }

    fn optional_object(&self, key: &str) -> Result<Option<Fields<'a>>> {
        self.get(key)
            .map(|value| Fields::nested(value, self.path(key)))
            .transpose()
    }
}

/// Accepts JSON integers and integral floats (`720.0`), rejects negatives
fn as_unsigned(value: &Value) -> Option<u64> {
    value.as_u64().or_else(|| {
        value
            .as_f64()
            .filter(|f| *f >= 0.0 && f.fract() == 0.0 && *f <= u64::MAX as f64)
            .map(|f| f as u64)
    })
}

/// Parse a Graph API timestamp
///
/// The Graph API writes offsets without a colon (`2024-01-01T00:00:00+0000`);
/// RFC 3339 forms (`Z`, `+00:00`) are accepted as well.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .or_else(|_| DateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%z"))
        .or_else(|_| DateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f%z"))
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

// =============================================================================
// Per-entity adapters
// =============================================================================

/// Normalize one element of the `accounts` connection
///
/// Fields are validated and copied as-is.
pub fn normalize_account(raw: &Value) -> Result<Account> {
    let fields = Fields::root(raw, "account")?;

    Ok(Account {
        access_token: fields.string("access_token")?,
        id: fields.string("id")?,
        name: fields.string("name")?,
        tasks: fields.string_list("tasks")?,
    })
}

/// Normalize one element of the `posts` connection
///
/// Only attachments of type `photo` that carry a `media.image` contribute
/// images. When none do, `attachments` is `None`.
pub fn normalize_post(raw: &Value) -> Result<Post> {
    let fields = Fields::root(raw, "post")?;
    let id = fields.string("id")?;
    let created_time = fields.timestamp("created_time")?;
    let message = fields.optional_string("message")?;
    let images = extract_images(&fields)?;

    Ok(Post {
        id,
        created_time,
        message,
        attachments: if images.is_empty() {
            None
        } else {
            Some(Attachments { images })
        },
    })
}

fn extract_images(post: &Fields<'_>) -> Result<Vec<Image>> {
    let Some(attachments) = post.optional_object("attachments")? else {
        return Ok(Vec::new());
    };
    let Some(data) = attachments.get("data") else {
        return Ok(Vec::new());
    };
    let entries = data
        .as_array()
        .ok_or_else(|| attachments.invalid("data", "array"))?;

    let mut images = Vec::new();

    for (index, entry) in entries.iter().enumerate() {
        let entry = Fields::nested(entry, format!("{}[{}]", attachments.path("data"), index))?;

        if entry.get("type").and_then(Value::as_str) != Some("photo") {
            continue;
        }

        let Some(media) = entry.optional_object("media")? else {
            continue;
        };
        let Some(image) = media.optional_object("image")? else {
            continue;
        };
        if image.is_empty() {
            continue;
        }

        images.push(Image {
            src: image.string("src")?,
            width: image.unsigned("width")?,
            height: image.unsigned("height")?,
        });
    }

    Ok(images)
}

/// Normalize one element of a `comments` connection (comments and replies alike)
///
/// `like_count` defaults to 0 when absent. `parent_id` is only set when the raw
/// comment carries a non-empty `parent` object.
pub fn normalize_comment(raw: &Value) -> Result<Comment> {
    let fields = Fields::root(raw, "comment")?;
    let id = fields.string("id")?;
    let message = fields.string("message")?;
    let created_time = fields.timestamp("created_time")?;
    let from = fields.object("from")?;

    let parent_id = match fields.optional_object("parent")? {
        Some(parent) if !parent.is_empty() => parent.optional_string("id")?,
        _ => None,
    };

    Ok(Comment {
        id,
        message,
        created_time,
        author: Author {
            id: from.string("id")?,
            name: from.string("name")?,
        },
        like_count: fields.unsigned_or("like_count", 0)?,
        parent_id,
    })
}

/// Normalize every item with `normalize`, failing on the first error
pub fn normalize_all<T, F>(items: &[Value], normalize: F) -> Result<Vec<T>>
where
    F: Fn(&Value) -> Result<T>,
{
    items.iter().map(normalize).collect()
}

// =============================================================================
// Tests
// =============================================================================
