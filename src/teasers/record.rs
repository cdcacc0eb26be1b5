//! Decoding of weakly-typed listing records.
//!
//! Listing API responses are consumed as raw JSON. Each item is decoded here,
//! once, into a closed [`ListingItem`] so the teaser factory can dispatch with
//! an exhaustive `match`. The `type` discriminator picks the variant; an
//! absent discriminator reads as `"unknown"` and, like any other value outside
//! the table, is rejected.
//!
//! Optional parts of a record (image, subjects, curator et al flag) are
//! tolerated when missing. An image only counts when it carries both square
//! renditions teasers use (`sizes["1:1"]["140"]` and `sizes["1:1"]["70"]`).

use super::TeaserError;
use crate::model::ArticleType;
use chrono::{DateTime, FixedOffset};
use serde::Deserialize;
use serde_json::Value;
use std::fmt;

/// Every discriminator the teaser factory understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentType {
    Article(ArticleType),
    BlogArticle,
    Collection,
    Event,
    LabsExperiment,
    MediumArticle,
    PodcastEpisode,
}

impl ContentType {
    pub fn from_discriminator(value: &str) -> Option<Self> {
        let content_type = match value {
            "blog-article" => ContentType::BlogArticle,
            "collection" => ContentType::Collection,
            "event" => ContentType::Event,
            "labs-experiment" => ContentType::LabsExperiment,
            "medium-article" => ContentType::MediumArticle,
            "podcast-episode" => ContentType::PodcastEpisode,
            other => ContentType::Article(ArticleType::from_discriminator(other)?),
        };
        Some(content_type)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ContentType::Article(kind) => kind.as_str(),
            ContentType::BlogArticle => "blog-article",
            ContentType::Collection => "collection",
            ContentType::Event => "event",
            ContentType::LabsExperiment => "labs-experiment",
            ContentType::MediumArticle => "medium-article",
            ContentType::PodcastEpisode => "podcast-episode",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Subject reference on a listing record; names come from `SubjectLookup`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SubjectRef {
    pub id: String,
}

/// Square renditions of a record's image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SquareImage {
    pub alt: String,
    pub uri_140: String,
    pub uri_70: String,
}

impl SquareImage {
    fn from_record(image: Option<&Value>) -> Option<Self> {
        let image = image?;
        let uri = |width: &str| {
            image
                .get("sizes")?
                .get("1:1")?
                .get(width)?
                .as_str()
                .map(str::to_string)
        };
        Some(Self {
            alt: image
                .get("alt")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
            uri_140: uri("140")?,
            uri_70: uri("70")?,
        })
    }
}

/// Experiment numbers arrive as JSON numbers or strings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum NumberOrString {
    Number(u64),
    String(String),
}

impl fmt::Display for NumberOrString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumberOrString::Number(n) => write!(f, "{n}"),
            NumberOrString::String(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ArticleRecord {
    pub title: String,
    pub published: DateTime<FixedOffset>,
    #[serde(default)]
    pub subjects: Vec<SubjectRef>,
    #[serde(default)]
    image: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BlogArticleRecord {
    pub title: String,
    pub published: DateTime<FixedOffset>,
    #[serde(default)]
    pub subjects: Vec<SubjectRef>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CuratorName {
    pub preferred: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CuratorRecord {
    pub name: CuratorName,
    #[serde(default)]
    pub et_al: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionRecord {
    pub id: String,
    pub title: String,
    pub selected_curator: CuratorRecord,
    #[serde(default)]
    pub updated: Option<DateTime<FixedOffset>>,
    #[serde(default)]
    pub published: Option<DateTime<FixedOffset>>,
    #[serde(default)]
    pub subjects: Vec<SubjectRef>,
    #[serde(default)]
    image: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EventRecord {
    pub title: String,
    pub starts: DateTime<FixedOffset>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LabsExperimentRecord {
    pub number: NumberOrString,
    pub title: String,
    pub published: DateTime<FixedOffset>,
    #[serde(default)]
    image: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MediumArticleRecord {
    pub title: String,
    pub uri: String,
    pub published: DateTime<FixedOffset>,
    #[serde(default)]
    image: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PodcastEpisodeRecord {
    pub title: String,
    pub published: DateTime<FixedOffset>,
    #[serde(default)]
    image: Option<Value>,
}

macro_rules! square_image_accessor {
    ($($record:ty),*) => {
        $(impl $record {
            pub fn image(&self) -> Option<SquareImage> {
                SquareImage::from_record(self.image.as_ref())
            }
        })*
    };
}

square_image_accessor!(
    ArticleRecord,
    CollectionRecord,
    LabsExperimentRecord,
    MediumArticleRecord,
    PodcastEpisodeRecord
);

/// A listing record decoded according to its discriminator.
#[derive(Debug, Clone, PartialEq)]
pub enum ListingItem {
    Article(ArticleType, ArticleRecord),
    BlogArticle(BlogArticleRecord),
    Collection(CollectionRecord),
    Event(EventRecord),
    LabsExperiment(LabsExperimentRecord),
    MediumArticle(MediumArticleRecord),
    PodcastEpisode(PodcastEpisodeRecord),
}

impl ListingItem {
    /// Decode one record. `forced_type` overrides the record's own `type`.
    pub fn decode(item: &Value, forced_type: Option<&str>) -> Result<Self, TeaserError> {
        let discriminator = forced_type
            .or_else(|| item.get("type").and_then(Value::as_str))
            .unwrap_or("unknown");
        let content_type = ContentType::from_discriminator(discriminator)
            .ok_or_else(|| TeaserError::UnrecognizedContentType(discriminator.to_string()))?;

        let malformed = |source| TeaserError::Malformed {
            content_type: content_type.as_str(),
            source,
        };

        let decoded = match content_type {
            ContentType::Article(kind) => {
                ListingItem::Article(kind, ArticleRecord::deserialize(item).map_err(malformed)?)
            }
            ContentType::BlogArticle => {
                ListingItem::BlogArticle(BlogArticleRecord::deserialize(item).map_err(malformed)?)
            }
            ContentType::Collection => {
                ListingItem::Collection(CollectionRecord::deserialize(item).map_err(malformed)?)
            }
            ContentType::Event => {
                ListingItem::Event(EventRecord::deserialize(item).map_err(malformed)?)
            }
            ContentType::LabsExperiment => ListingItem::LabsExperiment(
                LabsExperimentRecord::deserialize(item).map_err(malformed)?,
            ),
            ContentType::MediumArticle => ListingItem::MediumArticle(
                MediumArticleRecord::deserialize(item).map_err(malformed)?,
            ),
            ContentType::PodcastEpisode => ListingItem::PodcastEpisode(
                PodcastEpisodeRecord::deserialize(item).map_err(malformed)?,
            ),
        };
        Ok(decoded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn every_article_discriminator_is_recognized() {
        for kind in ArticleType::ALL {
            assert_eq!(
                ContentType::from_discriminator(kind.as_str()),
                Some(ContentType::Article(kind))
            );
        }
    }

    #[test]
    fn discriminators_round_trip() {
        for name in [
            "blog-article",
            "collection",
            "event",
            "labs-experiment",
            "medium-article",
            "podcast-episode",
            "research-advance",
        ] {
            assert_eq!(ContentType::from_discriminator(name).unwrap().as_str(), name);
        }
    }

    #[test]
    fn absent_type_is_unknown() {
        let err = ListingItem::decode(&json!({"title": "No type"}), None).unwrap_err();
        assert!(matches!(err, TeaserError::UnrecognizedContentType(t) if t == "unknown"));
    }

    #[test]
    fn unrecognized_type_is_rejected() {
        let item = json!({"type": "interview", "title": "x"});
        let err = ListingItem::decode(&item, None).unwrap_err();
        assert!(matches!(err, TeaserError::UnrecognizedContentType(t) if t == "interview"));
    }

    #[test]
    fn forced_type_wins_over_record_type() {
        let item = json!({"type": "unknown", "title": "Meetup", "starts": "2017-03-01T09:00:00Z"});
        let decoded = ListingItem::decode(&item, Some("event")).unwrap();
        assert!(matches!(decoded, ListingItem::Event(e) if e.title == "Meetup"));
    }

    #[test]
    fn missing_required_field_is_malformed() {
        let err = ListingItem::decode(&json!({"type": "podcast-episode", "title": "Ep 1"}), None)
            .unwrap_err();
        assert!(matches!(
            err,
            TeaserError::Malformed {
                content_type: "podcast-episode",
                ..
            }
        ));
    }

    #[test]
    fn experiment_number_accepts_string_or_number() {
        for number in [json!(7), json!("7")] {
            let item = json!({
                "type": "labs-experiment",
                "number": number,
                "title": "Experiment",
                "published": "2017-01-01T00:00:00Z"
            });
            match ListingItem::decode(&item, None).unwrap() {
                ListingItem::LabsExperiment(record) => assert_eq!(record.number.to_string(), "7"),
                other => panic!("unexpected {other:?}"),
            }
        }
    }

    #[test]
    fn square_image_needs_both_renditions() {
        let full = json!({
            "alt": "Cells",
            "sizes": {"1:1": {"70": "a-70.jpg", "140": "a-140.jpg"}}
        });
        let partial = json!({"sizes": {"1:1": {"70": "a-70.jpg"}}});
        let other_ratio = json!({"sizes": {"16:9": {"250": "a.jpg"}}});

        assert_eq!(
            SquareImage::from_record(Some(&full)),
            Some(SquareImage {
                alt: "Cells".into(),
                uri_140: "a-140.jpg".into(),
                uri_70: "a-70.jpg".into(),
            })
        );
        assert_eq!(SquareImage::from_record(Some(&partial)), None);
        assert_eq!(SquareImage::from_record(Some(&other_ratio)), None);
        assert_eq!(SquareImage::from_record(None), None);
    }

    #[test]
    fn empty_array_image_is_no_image() {
        let item = json!({
            "type": "podcast-episode",
            "title": "Ep 1",
            "published": "2017-01-01T00:00:00Z",
            "image": []
        });
        match ListingItem::decode(&item, None).unwrap() {
            ListingItem::PodcastEpisode(record) => assert_eq!(record.image(), None),
            other => panic!("unexpected {other:?}"),
        }
    }
}
