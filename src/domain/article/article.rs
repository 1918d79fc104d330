//! Article entity as it flows from the source, through the engine, to the feed.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::foundation::{ArticleId, Timestamp};

/// A publishable news item.
///
/// Source attributes (`message_id`, `link`, `title`, ...) arrive from the
/// article store; the publish fields are derived by the cycling engine the
/// first time the article is seen in a cycle. Attributes the engine does not
/// know about are carried through untouched in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    /// Stable identifier from the store.
    #[serde(rename = "message_id", alias = "messageId")]
    pub id: ArticleId,

    /// Absolute URL of the full story.
    pub link: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Dateline location.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    /// First-sight publish time within the current cycle.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publish_timestamp: Option<Timestamp>,

    /// `publish_timestamp` rendered as local wall-clock time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_at: Option<String>,

    /// Position of the article within the cycle.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cycle_index: Option<usize>,

    /// Whether this is the currently published article.
    #[serde(default)]
    pub is_current: bool,

    /// Any further attributes of the stored item.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Publish fields frozen for an article the first time a cycle reaches it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishStamp {
    pub publish_timestamp: Timestamp,
    pub published_at: String,
    pub cycle_index: usize,
}

impl PublishStamp {
    /// Stamps a publication at `at` for the given cycle position.
    pub fn new(at: Timestamp, cycle_index: usize) -> Self {
        Self {
            publish_timestamp: at,
            published_at: at.local_clock(),
            cycle_index,
        }
    }
}

impl Article {
    /// Creates an article with only its source attributes set.
    pub fn new(id: ArticleId, link: impl Into<String>) -> Self {
        Self {
            id,
            link: link.into(),
            title: None,
            description: None,
            location: None,
            publish_timestamp: None,
            published_at: None,
            cycle_index: None,
            is_current: false,
            extra: Map::new(),
        }
    }

    /// Sets the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the dateline location.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Returns a copy carrying the given publish stamp and current flag.
    pub fn stamped(&self, stamp: &PublishStamp, is_current: bool) -> Self {
        Self {
            publish_timestamp: Some(stamp.publish_timestamp),
            published_at: Some(stamp.published_at.clone()),
            cycle_index: Some(stamp.cycle_index),
            is_current,
            ..self.clone()
        }
    }

    /// Returns the publish stamp if the engine has assigned one.
    pub fn stamp(&self) -> Option<PublishStamp> {
        Some(PublishStamp {
            publish_timestamp: self.publish_timestamp?,
            published_at: self.published_at.clone()?,
            cycle_index: self.cycle_index?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Article {
        Article::new(ArticleId::new("bw-1").unwrap(), "https://www.businesswire.com/news/1")
            .with_title("Acme Corp Reports Record Quarter")
            .with_location("NEW YORK")
    }

    #[test]
    fn deserializes_store_item_with_extra_fields() {
        let item = json!({
            "message_id": "bw-7",
            "link": "https://example.com/7",
            "title": "Seven",
            "source": "wire",
        });

        let article: Article = serde_json::from_value(item).unwrap();

        assert_eq!(article.id.as_str(), "bw-7");
        assert_eq!(article.title.as_deref(), Some("Seven"));
        assert_eq!(article.extra.get("source"), Some(&json!("wire")));
        assert!(!article.is_current);
        assert!(article.stamp().is_none());
    }

    #[test]
    fn serializes_publish_fields_in_camel_case() {
        let stamp = PublishStamp::new(Timestamp::from_millis(1_700_000_000_000), 3);
        let value = serde_json::to_value(sample().stamped(&stamp, true)).unwrap();

        assert_eq!(value["message_id"], json!("bw-1"));
        assert_eq!(value["publishTimestamp"], json!(1_700_000_000_000_i64));
        assert_eq!(value["cycleIndex"], json!(3));
        assert_eq!(value["isCurrent"], json!(true));
        assert!(value["publishedAt"].is_string());
    }

    #[test]
    fn unstamped_article_omits_publish_fields() {
        let value = serde_json::to_value(sample()).unwrap();

        assert!(value.get("publishTimestamp").is_none());
        assert!(value.get("cycleIndex").is_none());
        assert_eq!(value["isCurrent"], json!(false));
    }

    #[test]
    fn stamp_roundtrips_through_stamped() {
        let stamp = PublishStamp::new(Timestamp::from_millis(42), 0);
        let article = sample().stamped(&stamp, false);

        assert_eq!(article.stamp(), Some(stamp));
    }

    #[test]
    fn accepts_camel_case_id_with_numeric_value() {
        let article: Article =
            serde_json::from_value(json!({"messageId": 12, "link": "https://example.com"}))
                .unwrap();
        assert_eq!(article.id.as_str(), "12");
    }
}
