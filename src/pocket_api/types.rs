use std::collections::HashMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize, Serializer};

use crate::pocket_api::scalar::{self, FlagValue};

/// Decoded body of a retrieve call.
///
/// The server sends the items as an object keyed by item id. That map stays private;
/// callers get the items as a plain sequence through [`RetrieveResponse::into_items`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetrieveResponse {
    #[serde(deserialize_with = "scalar::integer")]
    pub status: u64,
    #[serde(
        deserialize_with = "scalar::bool_flag",
        serialize_with = "serialize_bool_flag"
    )]
    pub complete: bool,
    #[serde(deserialize_with = "scalar::keyed_map")]
    list: HashMap<String, Item>,
    /// Server time of this response, usable as `since` for the next call
    pub since: i64,
}

impl RetrieveResponse {
    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Flatten the keyed list into a sequence. Keys are dropped, order is unspecified.
    pub fn into_items(self) -> Vec<Item> {
        self.list.into_values().collect()
    }
}

/// A saved article or page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    #[serde(rename = "item_id")]
    pub id: String,
    /// Identifies the canonical url target; distinct items may share it.
    /// `"0"` means the server has not processed the item yet.
    #[serde(default)]
    pub resolved_id: String,
    /// The url as it was saved
    #[serde(default)]
    pub given_url: String,
    #[serde(rename = "resolved_url", default)]
    pub url: String,
    #[serde(default)]
    pub given_title: String,
    #[serde(rename = "resolved_title", default)]
    pub title: String,
    #[serde(
        default,
        deserialize_with = "scalar::bool_flag",
        serialize_with = "serialize_bool_flag"
    )]
    pub favorite: bool,
    #[serde(default)]
    pub status: ItemStatus,
    #[serde(default)]
    pub excerpt: String,
    #[serde(
        default,
        deserialize_with = "scalar::bool_flag",
        serialize_with = "serialize_bool_flag"
    )]
    pub is_article: bool,
    #[serde(default)]
    pub has_image: MediaPresence,
    #[serde(default)]
    pub has_video: MediaPresence,
    #[serde(default, deserialize_with = "scalar::integer")]
    pub word_count: u64,
    #[serde(
        default,
        deserialize_with = "scalar::keyed_map",
        skip_serializing_if = "HashMap::is_empty"
    )]
    pub tags: HashMap<String, Tag>,
    #[serde(
        default,
        deserialize_with = "scalar::keyed_map",
        skip_serializing_if = "HashMap::is_empty"
    )]
    pub authors: HashMap<String, Author>,
    /// Passed through as received
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images: Option<serde_json::Value>,
    /// Passed through as received
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub videos: Option<serde_json::Value>,
}

impl Item {
    /// Names of all tags on this item, in no particular order.
    pub fn tag_names(&self) -> Vec<&str> {
        self.tags.values().map(|tag| tag.name.as_str()).collect()
    }

    pub fn author_names(&self) -> Vec<&str> {
        self.authors
            .values()
            .map(|author| author.name.as_str())
            .collect()
    }

    /// Resolved title, falling back to the title given on save.
    pub fn display_title(&self) -> &str {
        if self.title.is_empty() {
            &self.given_title
        } else {
            &self.title
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    #[serde(default)]
    pub item_id: String,
    #[serde(rename = "tag")]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    #[serde(default)]
    pub item_id: String,
    #[serde(rename = "author_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub url: String,
}

/// Read state of an item: `0`, `1` or `2` on the wire.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "FlagValue", into = "u8")]
pub enum ItemStatus {
    #[default]
    Unread,
    Archived,
    ShouldDelete,
}

impl TryFrom<FlagValue> for ItemStatus {
    type Error = String;

    fn try_from(value: FlagValue) -> Result<Self, Self::Error> {
        match value.0 {
            0 => Ok(ItemStatus::Unread),
            1 => Ok(ItemStatus::Archived),
            2 => Ok(ItemStatus::ShouldDelete),
            other => Err(format!("invalid item status {other}, expected 0, 1 or 2")),
        }
    }
}

impl From<ItemStatus> for u8 {
    fn from(status: ItemStatus) -> Self {
        match status {
            ItemStatus::Unread => 0,
            ItemStatus::Archived => 1,
            ItemStatus::ShouldDelete => 2,
        }
    }
}

/// Whether an item contains images/videos (`1`) or is one itself (`2`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "FlagValue", into = "u8")]
pub enum MediaPresence {
    #[default]
    None,
    Contains,
    IsMedia,
}

impl TryFrom<FlagValue> for MediaPresence {
    type Error = String;

    fn try_from(value: FlagValue) -> Result<Self, Self::Error> {
        match value.0 {
            0 => Ok(MediaPresence::None),
            1 => Ok(MediaPresence::Contains),
            2 => Ok(MediaPresence::IsMedia),
            other => Err(format!("invalid media flag {other}, expected 0, 1 or 2")),
        }
    }
}

impl From<MediaPresence> for u8 {
    fn from(presence: MediaPresence) -> Self {
        match presence {
            MediaPresence::None => 0,
            MediaPresence::Contains => 1,
            MediaPresence::IsMedia => 2,
        }
    }
}

fn serialize_bool_flag<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u8(u8::from(*value))
}

/// Errors while getting the raw response body.
#[derive(thiserror::Error, Debug)]
pub enum TransportError {
    #[error("Failed to encode request: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Error with cache file '{}'", .path.display())]
    Cache {
        path: PathBuf,
        #[source]
        io_error: std::io::Error,
    },
}

/// The response body does not match the expected shape.
#[derive(thiserror::Error, Debug)]
#[error("Failed to decode retrieve response: {0}")]
pub struct DecodeError(#[from] serde_json::Error);

#[derive(thiserror::Error, Debug)]
pub enum RetrieveError {
    #[error("Error in transport")]
    Transport(#[from] TransportError),

    #[error("Error in response")]
    Decode(#[from] DecodeError),
}
