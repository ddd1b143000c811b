//! Input payload types submitted for analysis

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Content type of a single [`ContentItem`]
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
pub enum ContentItemType {
    /// Plain text (default)
    #[default]
    #[serde(rename = "text/plain")]
    TextPlain,
    /// HTML; the service strips tags before analysis
    #[serde(rename = "text/html")]
    TextHtml,
}

/// Language of submitted content
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[serde(rename_all = "lowercase")]
pub enum ContentLanguage {
    /// Arabic
    Ar,
    /// English
    En,
    /// Spanish
    Es,
    /// Japanese
    Ja,
    /// Korean
    Ko,
}

impl ContentLanguage {
    /// Returns the language code used in headers and JSON
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ar => "ar",
            Self::En => "en",
            Self::Es => "es",
            Self::Ja => "ja",
            Self::Ko => "ko",
        }
    }
}

/// A single unit of text, such as a tweet, post or email
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
pub struct ContentItem {
    /// The text to analyze
    pub content: String,

    /// Unique identifier for this item
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Creation time, milliseconds since the UNIX epoch
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<i64>,

    /// Last update time, milliseconds since the UNIX epoch
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated: Option<i64>,

    /// Content type of `content`
    #[serde(default, rename = "contenttype", skip_serializing_if = "Option::is_none")]
    pub content_type: Option<ContentItemType>,

    /// Language of `content`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<ContentLanguage>,

    /// Id of the parent item, for replies
    #[serde(default, rename = "parentid", skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,

    /// Whether this item is a reply to another item
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reply: Option<bool>,

    /// Whether this item is a forwarded or copied item
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forward: Option<bool>,
}

impl ContentItem {
    /// Create a content item holding `content`
    #[must_use]
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..Self::default()
        }
    }

    /// Set the item id
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set the creation time
    #[must_use]
    pub fn with_created_at(mut self, at: DateTime<Utc>) -> Self {
        self.created = Some(at.timestamp_millis());
        self
    }

    /// Set the last update time
    #[must_use]
    pub fn with_updated_at(mut self, at: DateTime<Utc>) -> Self {
        self.updated = Some(at.timestamp_millis());
        self
    }

    /// Set the content type
    #[must_use]
    pub const fn with_content_type(mut self, content_type: ContentItemType) -> Self {
        self.content_type = Some(content_type);
        self
    }

    /// Set the language
    #[must_use]
    pub const fn with_language(mut self, language: ContentLanguage) -> Self {
        self.language = Some(language);
        self
    }

    /// Set the parent item id
    #[must_use]
    pub fn with_parent_id(mut self, parent_id: impl Into<String>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }

    /// Mark the item as a reply
    #[must_use]
    pub const fn with_reply(mut self, reply: bool) -> Self {
        self.reply = Some(reply);
        self
    }

    /// Mark the item as forwarded
    #[must_use]
    pub const fn with_forward(mut self, forward: bool) -> Self {
        self.forward = Some(forward);
        self
    }

    /// Creation time, if set and in range
    #[must_use]
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created.and_then(DateTime::from_timestamp_millis)
    }

    /// Last update time, if set and in range
    #[must_use]
    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated.and_then(DateTime::from_timestamp_millis)
    }
}

/// A collection of content items submitted as `application/json`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct Content {
    /// Items to analyze
    #[serde(default)]
    pub content_items: Vec<ContentItem>,
}

impl Content {
    /// Create content from a list of items
    #[must_use]
    pub const fn new(content_items: Vec<ContentItem>) -> Self {
        Self { content_items }
    }

    /// Append an item
    #[must_use]
    pub fn with_item(mut self, item: ContentItem) -> Self {
        self.content_items.push(item);
        self
    }

    /// Number of items
    #[must_use]
    pub fn len(&self) -> usize {
        self.content_items.len()
    }

    /// Whether there are no items
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.content_items.is_empty()
    }
}

impl FromIterator<ContentItem> for Content {
    fn from_iter<I: IntoIterator<Item = ContentItem>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
