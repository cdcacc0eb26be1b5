//! Shared test utilities for the journal-views test suite.
//!
//! Provides domain object fixtures, raw listing records, route and subject
//! tables matching the stock config, and controllable [`SubjectLookup`]
//! doubles for concurrency tests.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let factory = SecondaryListingTeaserFactory::new(Arc::new(routes()), Arc::new(subjects()));
//! let listing = json!({"items": [article_record("insight", "Title", &["neuroscience"], true)]});
//! let result = factory.for_result(&listing, None, None).await.unwrap();
//! assert_eq!(teaser_titles(&result), vec!["Title"]);
//! ```

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset};
use serde_json::{Value, json};
use std::collections::BTreeMap;
use std::sync::Mutex;
use std::time::Duration;

use crate::config::SiteConfig;
use crate::model::{
    Article, ArticleType, Collection, Cover, CoverItem, Event, Image, ImageFile, LabsExperiment,
    Person, PersonName, PodcastEpisode, PressPackage, Subject,
};
use crate::routing::RouteTable;
use crate::subjects::{StaticSubjects, SubjectLookup, SubjectLookupError};
use crate::view_model::{Link, ListingTeasers, Meta, Teaser};

// =========================================================================
// Collaborators
// =========================================================================

/// Route table from the stock config.
pub fn routes() -> RouteTable {
    SiteConfig::default().route_table()
}

/// Subject names from the stock config.
pub fn subjects() -> StaticSubjects {
    StaticSubjects::new(SiteConfig::default().subjects)
}

/// Lookup that resolves each id after its own delay and records the order in
/// which lookups finished. Works with a paused tokio clock.
pub struct DelayedSubjects {
    delays: BTreeMap<String, Duration>,
    failing: Option<String>,
    completed: Mutex<Vec<String>>,
}

impl DelayedSubjects {
    pub fn new(delays: &[(&str, Duration)]) -> Self {
        Self {
            delays: delays.iter().map(|(id, d)| (id.to_string(), *d)).collect(),
            failing: None,
            completed: Mutex::new(Vec::new()),
        }
    }

    /// Make lookups of `id` fail with `Unavailable` once their delay elapses.
    pub fn failing(self, id: &str) -> Self {
        Self {
            failing: Some(id.to_string()),
            ..self
        }
    }

    /// Ids in completion order.
    pub fn completed(&self) -> Vec<String> {
        self.completed.lock().unwrap().clone()
    }
}

#[async_trait]
impl SubjectLookup for DelayedSubjects {
    async fn subject_name(&self, id: &str) -> Result<String, SubjectLookupError> {
        let delay = self.delays.get(id).copied().unwrap_or_default();
        tokio::time::sleep(delay).await;

        if self.failing.as_deref() == Some(id) {
            return Err(SubjectLookupError::Unavailable {
                id: id.to_string(),
                reason: "timed out".to_string(),
            });
        }
        self.completed.lock().unwrap().push(id.to_string());
        Ok(format!("Subject {id}"))
    }
}

// =========================================================================
// Domain objects
// =========================================================================

fn date(s: &str) -> DateTime<FixedOffset> {
    DateTime::parse_from_rfc3339(s).unwrap()
}

pub fn published() -> DateTime<FixedOffset> {
    date("2017-02-01T00:00:00Z")
}

pub fn updated() -> DateTime<FixedOffset> {
    date("2017-03-01T00:00:00Z")
}

fn subject(id: &str, name: &str) -> Subject {
    Subject {
        id: id.to_string(),
        name: name.to_string(),
    }
}

/// 1800x900 IIIF image whose source file has the given media type.
pub fn image(media_type: &str) -> Image {
    Image {
        uri: "https://iiif.example.org/lax:1234%2Fimage.tif".to_string(),
        alt: "A microscope image".to_string(),
        width: 1800,
        height: 900,
        source: ImageFile {
            media_type: media_type.to_string(),
            uri: "https://cdn.example.org/image.tif".to_string(),
            filename: Some("image.tif".to_string()),
        },
    }
}

pub fn article() -> Article {
    Article {
        id: "09560".to_string(),
        article_type: ArticleType::ResearchArticle,
        title: "Cells divide".to_string(),
        published: published(),
        subjects: vec![subject("cell-biology", "Cell Biology")],
        image: None,
    }
}

pub fn collection() -> Collection {
    Collection {
        id: "tropical-disease".to_string(),
        title: "Tropical disease".to_string(),
        impact_statement: Some("Research on neglected tropical diseases.".to_string()),
        published: published(),
        updated: None,
        subjects: vec![subject("epidemiology-global-health", "Epidemiology and Global Health")],
        selected_curator: Person {
            id: "pjha".to_string(),
            name: PersonName {
                preferred: "Prabhat Jha".to_string(),
                index: Some("Jha, Prabhat".to_string()),
            },
        },
        selected_curator_et_al: false,
        image: Some(image(crate::picture::JPEG)),
    }
}

pub fn podcast_episode() -> PodcastEpisode {
    PodcastEpisode {
        number: 29,
        title: "Episode 29".to_string(),
        published: published(),
        subjects: vec![],
        image: Some(image(crate::picture::JPEG)),
    }
}

pub fn event() -> Event {
    Event {
        id: "sprint-2017".to_string(),
        title: "eLife Innovation Sprint".to_string(),
        impact_statement: None,
        starts: date("2017-05-10T09:00:00Z"),
        ends: date("2017-05-11T17:00:00Z"),
    }
}

pub fn press_package() -> PressPackage {
    PressPackage {
        id: "a1b2c3d4".to_string(),
        title: "Malaria: Hiding in the bone marrow".to_string(),
        impact_statement: Some("Malaria parasites hide in bone marrow.".to_string()),
        published: published(),
        subjects: vec![subject(
            "microbiology-infectious-disease",
            "Microbiology and Infectious Disease",
        )],
    }
}

pub fn labs_experiment() -> LabsExperiment {
    LabsExperiment {
        number: 7,
        title: "Lens".to_string(),
        impact_statement: None,
        published: published(),
        image: None,
    }
}

pub fn cover_of(item: CoverItem) -> Cover {
    Cover {
        title: "Featured".to_string(),
        image: image(crate::picture::JPEG),
        item,
    }
}

pub fn cover_of_collection() -> Cover {
    Cover {
        title: "Tropical disease cover".to_string(),
        ..cover_of(CoverItem::Collection(collection()))
    }
}

// =========================================================================
// Listing records
// =========================================================================

/// Record image with both square renditions teasers use.
pub fn square_image(alt: &str) -> Value {
    json!({
        "alt": alt,
        "sizes": {
            "1:1": {
                "140": "https://iiif.example.org/square-140.jpg",
                "70": "https://iiif.example.org/square-70.jpg"
            }
        }
    })
}

fn subject_refs(ids: &[&str]) -> Value {
    Value::Array(ids.iter().map(|id| json!({"id": id})).collect())
}

/// Article-like record published 2017-01-05. The image alt text is the title.
pub fn article_record(
    content_type: &str,
    title: &str,
    subjects: &[&str],
    with_image: bool,
) -> Value {
    let mut record = json!({
        "type": content_type,
        "id": "09560",
        "title": title,
        "published": "2017-01-05T00:00:00Z",
        "subjects": subject_refs(subjects)
    });
    if with_image {
        record["image"] = square_image(title);
    }
    record
}

/// Collection record published 2017-02-01, updated 2017-03-01.
pub fn collection_record(title: &str, et_al: bool) -> Value {
    json!({
        "type": "collection",
        "id": "tropical-disease",
        "title": title,
        "selectedCurator": {
            "id": "pjha",
            "name": {"preferred": "Prabhat Jha", "index": "Jha, Prabhat"},
            "etAl": et_al
        },
        "published": "2017-02-01T00:00:00Z",
        "updated": "2017-03-01T00:00:00Z",
        "subjects": subject_refs(&["epidemiology-global-health"]),
        "image": square_image(title)
    })
}

pub fn collection_record_with_subjects(title: &str, subjects: &[&str]) -> Value {
    let mut record = collection_record(title, false);
    record["subjects"] = subject_refs(subjects);
    record
}

// =========================================================================
// Extractors
// =========================================================================

pub fn teaser_titles(listing: &ListingTeasers) -> Vec<&str> {
    listing.items().iter().map(|t| t.title.as_str()).collect()
}

/// Plain-text label of a teaser's footer meta line.
pub fn footer_text(teaser: &Teaser) -> Option<&str> {
    match &teaser.footer.as_ref()?.meta {
        Meta::Text { text, .. } => Some(text),
        _ => None,
    }
}

/// Link of a teaser's footer meta line.
pub fn footer_link(teaser: &Teaser) -> Option<&Link> {
    match &teaser.footer.as_ref()?.meta {
        Meta::Link { link, .. } => Some(link),
        _ => None,
    }
}
