//! Strongly-typed domain objects as delivered by the content API client.
//!
//! These are read-only inputs to the converters. They deserialize from the
//! API's JSON (camelCase keys, RFC 3339 dates) and are never mutated here.

use chrono::{DateTime, FixedOffset};
use serde::Deserialize;
use std::fmt;

/// Research content types, as named by the API's `type` discriminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ArticleType {
    Correction,
    Editorial,
    Feature,
    Insight,
    ResearchAdvance,
    ResearchArticle,
    ResearchExchange,
    Retraction,
    RegisteredReport,
    ReplicationStudy,
    ShortReport,
    ToolsResources,
}

impl ArticleType {
    pub const ALL: [ArticleType; 12] = [
        ArticleType::Correction,
        ArticleType::Editorial,
        ArticleType::Feature,
        ArticleType::Insight,
        ArticleType::ResearchAdvance,
        ArticleType::ResearchArticle,
        ArticleType::ResearchExchange,
        ArticleType::Retraction,
        ArticleType::RegisteredReport,
        ArticleType::ReplicationStudy,
        ArticleType::ShortReport,
        ArticleType::ToolsResources,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ArticleType::Correction => "correction",
            ArticleType::Editorial => "editorial",
            ArticleType::Feature => "feature",
            ArticleType::Insight => "insight",
            ArticleType::ResearchAdvance => "research-advance",
            ArticleType::ResearchArticle => "research-article",
            ArticleType::ResearchExchange => "research-exchange",
            ArticleType::Retraction => "retraction",
            ArticleType::RegisteredReport => "registered-report",
            ArticleType::ReplicationStudy => "replication-study",
            ArticleType::ShortReport => "short-report",
            ArticleType::ToolsResources => "tools-resources",
        }
    }

    pub fn from_discriminator(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == value)
    }
}

impl fmt::Display for ArticleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageFile {
    pub media_type: String,
    pub uri: String,
    #[serde(default)]
    pub filename: Option<String>,
}

/// An image served through IIIF. `uri` is the IIIF base for the asset.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    pub uri: String,
    #[serde(default)]
    pub alt: String,
    pub width: u32,
    pub height: u32,
    pub source: ImageFile,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subject {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonName {
    pub preferred: String,
    #[serde(default)]
    pub index: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Person {
    pub id: String,
    pub name: PersonName,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub id: String,
    pub article_type: ArticleType,
    pub title: String,
    pub published: DateTime<FixedOffset>,
    #[serde(default)]
    pub subjects: Vec<Subject>,
    #[serde(default)]
    pub image: Option<Image>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Collection {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub impact_statement: Option<String>,
    pub published: DateTime<FixedOffset>,
    #[serde(default)]
    pub updated: Option<DateTime<FixedOffset>>,
    #[serde(default)]
    pub subjects: Vec<Subject>,
    pub selected_curator: Person,
    #[serde(default)]
    pub selected_curator_et_al: bool,
    #[serde(default)]
    pub image: Option<Image>,
}

impl Collection {
    /// Date shown in listings: last update if any, else first publication.
    pub fn updated_or_published(&self) -> DateTime<FixedOffset> {
        self.updated.unwrap_or(self.published)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PodcastEpisode {
    pub number: u32,
    pub title: String,
    pub published: DateTime<FixedOffset>,
    #[serde(default)]
    pub subjects: Vec<Subject>,
    #[serde(default)]
    pub image: Option<Image>,
}

/// Item wrapped by a homepage cover.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum CoverItem {
    Article(Article),
    Collection(Collection),
    PodcastEpisode(PodcastEpisode),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Cover {
    pub title: String,
    pub image: Image,
    pub item: CoverItem,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub impact_statement: Option<String>,
    pub starts: DateTime<FixedOffset>,
    pub ends: DateTime<FixedOffset>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PressPackage {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub impact_statement: Option<String>,
    pub published: DateTime<FixedOffset>,
    #[serde(default)]
    pub subjects: Vec<Subject>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabsExperiment {
    pub number: u32,
    pub title: String,
    #[serde(default)]
    pub impact_statement: Option<String>,
    pub published: DateTime<FixedOffset>,
    #[serde(default)]
    pub image: Option<Image>,
}

/// Everything the converter registry accepts, tagged by `type`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ContentObject {
    Article(Article),
    Collection(Collection),
    Cover(Cover),
    Event(Event),
    Image(Image),
    LabsExperiment(LabsExperiment),
    PodcastEpisode(PodcastEpisode),
    PressPackage(PressPackage),
}

impl ContentObject {
    /// Short kind name used in error messages, e.g. `cover(collection)`.
    pub fn describe(&self) -> String {
        match self {
            ContentObject::Article(a) => format!("article({})", a.article_type),
            ContentObject::Collection(_) => "collection".to_string(),
            ContentObject::Cover(c) => {
                let item = match c.item {
                    CoverItem::Article(_) => "article",
                    CoverItem::Collection(_) => "collection",
                    CoverItem::PodcastEpisode(_) => "podcast-episode",
                };
                format!("cover({item})")
            }
            ContentObject::Event(_) => "event".to_string(),
            ContentObject::Image(_) => "image".to_string(),
            ContentObject::LabsExperiment(_) => "labs-experiment".to_string(),
            ContentObject::PodcastEpisode(_) => "podcast-episode".to_string(),
            ContentObject::PressPackage(_) => "press-package".to_string(),
        }
    }
}
