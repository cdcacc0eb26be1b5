//! Secondary listing teasers from raw listing results.
//!
//! [`SecondaryListingTeaserFactory`] takes a listing API response
//! (`{"items": [...]}`) whose items differ in shape by their `type`, turns
//! every item into a teaser, and wraps them in a [`ListingTeasers`].
//!
//! | `type` | Teaser |
//! |---|---|
//! | research content (`insight`, ...) | title, image, context label, humanized type + published |
//! | `blog-article` | title, context label, "Inside eLife" link + published |
//! | `collection` | linked title, curator byline, context label, image, "Collection" + updated |
//! | `event` | event teaser, date-only start |
//! | `labs-experiment` | linked title, image, "Experiment: NNN" + published |
//! | `medium-article` | title linked to the external URI, image, published date |
//! | `podcast-episode` | title, image, "Podcast" + published |
//!
//! ## Concurrency
//!
//! Context labels need a subject lookup per subject, which may suspend. All
//! items of a listing (and all lookups within an item) are polled together
//! with `try_join_all`: completion order is free, output order is input
//! order, and the first failure fails the whole listing.

mod record;

pub use record::{ContentType, ListingItem, SquareImage};

use crate::labels::{curated_by, experiment_label, humanize_type};
use crate::model::ArticleType;
use crate::routing::UrlGenerator;
use crate::subjects::{SubjectLookup, SubjectLookupError};
use crate::view_model::{
    ContextLabel, Date, ImageRendition, Link, ListingTeasers, Meta, SeeMoreLink, Teaser,
    TeaserFooter, TeaserImage,
};
use futures::future::try_join_all;
use record::{
    ArticleRecord, BlogArticleRecord, CollectionRecord, EventRecord, LabsExperimentRecord,
    MediumArticleRecord, PodcastEpisodeRecord, SubjectRef,
};
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum TeaserError {
    #[error("Unrecognized content type: {0}")]
    UnrecognizedContentType(String),
    #[error("Malformed {content_type} record: {source}")]
    Malformed {
        content_type: &'static str,
        source: serde_json::Error,
    },
    #[error("{content_type} record has no {field}")]
    MissingField {
        content_type: &'static str,
        field: &'static str,
    },
    #[error("Listing result has no items array")]
    MissingItems,
    #[error(transparent)]
    SubjectLookup(#[from] SubjectLookupError),
}

/// Square teaser image with the 140px and 70px renditions, 70px by default.
pub(crate) fn square_teaser_image(
    uri_140: String,
    uri_70: String,
    alt: String,
    url: Option<String>,
) -> TeaserImage {
    TeaserImage::small(
        uri_70.clone(),
        alt,
        url,
        vec![
            ImageRendition {
                width: 140,
                uri: uri_140,
            },
            ImageRendition {
                width: 70,
                uri: uri_70,
            },
        ],
    )
}

fn record_image(image: Option<SquareImage>, url: Option<String>) -> Option<TeaserImage> {
    image.map(|img| square_teaser_image(img.uri_140, img.uri_70, img.alt, url))
}

pub struct SecondaryListingTeaserFactory {
    urls: Arc<dyn UrlGenerator>,
    subjects: Arc<dyn SubjectLookup>,
}

impl SecondaryListingTeaserFactory {
    pub fn new(urls: Arc<dyn UrlGenerator>, subjects: Arc<dyn SubjectLookup>) -> Self {
        Self { urls, subjects }
    }

    /// Teasers for a mixed listing; each item's own `type` decides its shape.
    pub async fn for_result(
        &self,
        result: &Value,
        heading: Option<String>,
        see_more: Option<SeeMoreLink>,
    ) -> Result<ListingTeasers, TeaserError> {
        self.listing(result, None, heading, see_more).await
    }

    /// Teasers for an events listing, whose items carry no `type`.
    pub async fn for_events(
        &self,
        result: &Value,
        heading: Option<String>,
        see_more: Option<SeeMoreLink>,
    ) -> Result<ListingTeasers, TeaserError> {
        self.listing(result, Some("event"), heading, see_more).await
    }

    /// Teasers for a Medium feed listing, whose items carry no `type`.
    pub async fn for_medium_articles(
        &self,
        result: &Value,
        heading: Option<String>,
        see_more: Option<SeeMoreLink>,
    ) -> Result<ListingTeasers, TeaserError> {
        self.listing(result, Some("medium-article"), heading, see_more)
            .await
    }

    async fn listing(
        &self,
        result: &Value,
        forced_type: Option<&str>,
        heading: Option<String>,
        see_more: Option<SeeMoreLink>,
    ) -> Result<ListingTeasers, TeaserError> {
        let items = result
            .get("items")
            .and_then(Value::as_array)
            .ok_or(TeaserError::MissingItems)?;
        debug!(items = items.len(), forced_type, "building listing teasers");

        let teasers =
            try_join_all(items.iter().map(|item| self.create_teaser(item, forced_type))).await?;

        Ok(match see_more {
            Some(link) => ListingTeasers::with_see_more(teasers, link, heading),
            None => ListingTeasers::basic(teasers, heading),
        })
    }

    async fn create_teaser(
        &self,
        item: &Value,
        forced_type: Option<&str>,
    ) -> Result<Teaser, TeaserError> {
        match ListingItem::decode(item, forced_type)? {
            ListingItem::Article(kind, article) => self.article(kind, article).await,
            ListingItem::BlogArticle(article) => self.blog_article(article).await,
            ListingItem::Collection(collection) => self.collection(collection).await,
            ListingItem::Event(event) => Ok(Self::event(event)),
            ListingItem::LabsExperiment(experiment) => Ok(self.labs_experiment(experiment)),
            ListingItem::MediumArticle(article) => Ok(Self::medium_article(article)),
            ListingItem::PodcastEpisode(episode) => Ok(Self::podcast_episode(episode)),
        }
    }

    /// Subject links for an item; `None` when it has no subjects.
    async fn context_label(
        &self,
        subjects: &[SubjectRef],
    ) -> Result<Option<ContextLabel>, TeaserError> {
        if subjects.is_empty() {
            return Ok(None);
        }
        let names = try_join_all(subjects.iter().map(|s| self.subjects.subject_name(&s.id))).await?;
        let links = subjects
            .iter()
            .zip(names)
            .map(|(subject, name)| {
                Link::new(name, self.urls.generate("subject", &[("id", &subject.id)]))
            })
            .collect();
        Ok(Some(ContextLabel { links }))
    }

    async fn article(
        &self,
        kind: ArticleType,
        article: ArticleRecord,
    ) -> Result<Teaser, TeaserError> {
        let image = record_image(article.image(), None);
        let context_label = self.context_label(&article.subjects).await?;

        Ok(Teaser::secondary(
            article.title,
            None,
            None,
            context_label,
            image,
            TeaserFooter::for_non_article(Meta::with_text(
                humanize_type(kind.as_str()),
                Date::new(article.published),
            )),
        ))
    }

    async fn blog_article(&self, article: BlogArticleRecord) -> Result<Teaser, TeaserError> {
        let context_label = self.context_label(&article.subjects).await?;

        Ok(Teaser::secondary(
            article.title,
            None,
            None,
            context_label,
            None,
            TeaserFooter::for_non_article(Meta::with_link(
                Link::new("Inside eLife", self.urls.generate("inside-elife", &[])),
                Date::new(article.published),
            )),
        ))
    }

    async fn collection(&self, collection: CollectionRecord) -> Result<Teaser, TeaserError> {
        let date = collection
            .updated
            .or(collection.published)
            .ok_or(TeaserError::MissingField {
                content_type: "collection",
                field: "updated",
            })?;
        let context_label = self.context_label(&collection.subjects).await?;

        let url = self.urls.generate("collection", &[("id", &collection.id)]);
        let byline = curated_by(
            &collection.selected_curator.name.preferred,
            collection.selected_curator.et_al,
        );

        Ok(Teaser::secondary(
            collection.title.clone(),
            Some(url.clone()),
            Some(byline),
            context_label,
            record_image(collection.image(), Some(url)),
            TeaserFooter::for_non_article(Meta::with_link(
                Link::new("Collection", self.urls.generate("collections", &[])),
                Date::new(date),
            )),
        ))
    }

    fn event(event: EventRecord) -> Teaser {
        Teaser::event(event.title, None, Date::date_only(event.starts))
    }

    fn labs_experiment(&self, experiment: LabsExperimentRecord) -> Teaser {
        let number = experiment.number.to_string();
        Teaser::secondary(
            experiment.title.clone(),
            Some(self.urls.generate("labs-experiment", &[("number", &number)])),
            None,
            None,
            record_image(experiment.image(), None),
            TeaserFooter::for_non_article(Meta::with_text(
                experiment_label(&number),
                Date::new(experiment.published),
            )),
        )
    }

    fn medium_article(article: MediumArticleRecord) -> Teaser {
        Teaser::secondary(
            article.title.clone(),
            Some(article.uri.clone()),
            None,
            None,
            record_image(article.image(), None),
            TeaserFooter::for_non_article(Meta::with_date(Date::new(article.published))),
        )
    }

    fn podcast_episode(episode: PodcastEpisodeRecord) -> Teaser {
        Teaser::secondary(
            episode.title.clone(),
            None,
            None,
            None,
            record_image(episode.image(), None),
            TeaserFooter::for_non_article(Meta::with_text("Podcast", Date::new(episode.published))),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;
    use crate::view_model::TeaserKind;
    use serde_json::json;
    use std::time::Duration;

    fn factory(subjects: Arc<dyn SubjectLookup>) -> SecondaryListingTeaserFactory {
        SecondaryListingTeaserFactory::new(Arc::new(routes()), subjects)
    }

    fn listing(items: Vec<Value>) -> Value {
        json!({"total": items.len(), "items": items})
    }

    async fn single(item: Value) -> Teaser {
        let result = factory(Arc::new(subjects()))
            .for_result(&listing(vec![item]), None, None)
            .await
            .unwrap();
        result.items()[0].clone()
    }

    // =========================================================================
    // Dispatch table
    // =========================================================================

    #[tokio::test]
    async fn article_teaser() {
        let record = article_record("research-advance", "Cells divide", &["cell-biology"], true);
        let teaser = single(record).await;

        assert_eq!(teaser.kind, TeaserKind::Secondary);
        assert_eq!(teaser.title, "Cells divide");
        assert_eq!(teaser.url, None);
        assert_eq!(footer_text(&teaser), Some("Research advance"));
        assert_eq!(teaser.footer.unwrap().meta.date().for_human, "Jan 5, 2017");
        let label = teaser.context_label.unwrap();
        assert_eq!(label.links, vec![Link::new("Cell Biology", "/subjects/cell-biology")]);
    }

    #[tokio::test]
    async fn every_article_type_gets_a_humanized_footer() {
        for kind in ArticleType::ALL {
            let teaser = single(article_record(kind.as_str(), "Title", &[], false)).await;
            assert_eq!(footer_text(&teaser), Some(humanize_type(kind.as_str()).as_str()));
        }
    }

    #[tokio::test]
    async fn blog_article_teaser() {
        let teaser = single(json!({
            "type": "blog-article",
            "title": "Inside the lab",
            "published": "2017-02-01T00:00:00Z",
            "subjects": [{"id": "neuroscience", "name": "Neuroscience"}]
        }))
        .await;

        assert!(teaser.image.is_none());
        assert_eq!(footer_link(&teaser), Some(&Link::new("Inside eLife", "/inside-elife")));
        assert_eq!(teaser.context_label.unwrap().links[0].name, "Neuroscience");
    }

    #[tokio::test]
    async fn collection_teaser() {
        let teaser = single(collection_record("Tropical disease", false)).await;

        assert_eq!(teaser.url.as_deref(), Some("/collections/tropical-disease"));
        assert_eq!(teaser.secondary_info.as_deref(), Some("Curated by Prabhat Jha."));
        let image = teaser.image.as_ref().unwrap();
        assert_eq!(image.url.as_deref(), Some("/collections/tropical-disease"));
        assert_eq!(footer_link(&teaser), Some(&Link::new("Collection", "/collections")));
        // Uses the updated date, not published
        assert_eq!(teaser.footer.unwrap().meta.date().for_human, "Mar 1, 2017");
    }

    #[tokio::test]
    async fn collection_id_is_encoded_in_urls() {
        let mut record = collection_record("Tropical disease", false);
        record["id"] = json!("a b/c?d");
        let teaser = single(record).await;

        assert_eq!(teaser.url.as_deref(), Some("/collections/a%20b%2Fc%3Fd"));
        assert_eq!(
            teaser.image.unwrap().url.as_deref(),
            Some("/collections/a%20b%2Fc%3Fd")
        );
    }

    #[tokio::test]
    async fn context_label_names_come_from_lookup() {
        let teaser = single(json!({
            "type": "blog-article",
            "title": "Inside the lab",
            "published": "2017-02-01T00:00:00Z",
            "subjects": [{"id": "neuroscience", "name": "Stale name"}]
        }))
        .await;

        let label = teaser.context_label.unwrap();
        assert_eq!(
            label.links,
            vec![Link::new("Neuroscience", "/subjects/neuroscience")]
        );
    }

    #[tokio::test]
    async fn collection_byline_et_al() {
        let teaser = single(collection_record("Tropical disease", true)).await;
        assert_eq!(
            teaser.secondary_info.as_deref(),
            Some("Curated by Prabhat Jha et al.")
        );
    }

    #[tokio::test]
    async fn collection_without_dates_is_an_error() {
        let mut record = collection_record("Tropical disease", false);
        let fields = record.as_object_mut().unwrap();
        fields.remove("updated");
        fields.remove("published");
        let result = factory(Arc::new(subjects()))
            .for_result(&listing(vec![record]), None, None)
            .await;
        assert!(matches!(
            result,
            Err(TeaserError::MissingField {
                field: "updated",
                ..
            })
        ));
    }

    #[tokio::test]
    async fn event_teaser() {
        let teaser = single(json!({
            "type": "event",
            "title": "eLife Innovation Sprint",
            "starts": "2017-05-10T09:00:00Z"
        }))
        .await;

        assert_eq!(teaser.kind, TeaserKind::Event);
        assert!(teaser.image.is_none());
        assert!(teaser.footer.is_none());
        let date = teaser.event_date.unwrap();
        assert!(date.date_only);
        assert_eq!(date.for_machine, "2017-05-10");
    }

    #[tokio::test]
    async fn labs_experiment_teaser() {
        let teaser = single(json!({
            "type": "labs-experiment",
            "number": "7",
            "title": "Lens",
            "published": "2017-01-01T00:00:00Z",
            "image": square_image("Lens")
        }))
        .await;

        assert_eq!(teaser.url.as_deref(), Some("/labs/7"));
        assert_eq!(footer_text(&teaser), Some("Experiment: 007"));
        assert!(teaser.context_label.is_none());
    }

    #[tokio::test]
    async fn medium_article_teaser() {
        let teaser = single(json!({
            "type": "medium-article",
            "title": "On Medium",
            "uri": "https://medium.com/@elife/on-medium",
            "published": "2017-01-01T00:00:00Z"
        }))
        .await;

        assert_eq!(teaser.url.as_deref(), Some("https://medium.com/@elife/on-medium"));
        assert!(teaser.context_label.is_none());
        assert!(matches!(
            teaser.footer.unwrap().meta,
            Meta::DateOnly { .. }
        ));
    }

    #[tokio::test]
    async fn podcast_episode_teaser() {
        let teaser = single(json!({
            "type": "podcast-episode",
            "number": 29,
            "title": "Episode 29",
            "published": "2017-01-01T00:00:00Z",
            "image": square_image("Microphone")
        }))
        .await;

        assert_eq!(footer_text(&teaser), Some("Podcast"));
        assert_eq!(teaser.image.unwrap().alt, "Microphone");
    }

    #[tokio::test]
    async fn unknown_type_fails_the_listing() {
        let result = factory(Arc::new(subjects()))
            .for_result(
                &listing(vec![
                    article_record("insight", "Fine", &[], false),
                    json!({"type": "interview", "title": "Not here"}),
                ]),
                None,
                None,
            )
            .await;
        assert!(matches!(result, Err(TeaserError::UnrecognizedContentType(t)) if t == "interview"));
    }

    #[tokio::test]
    async fn missing_items_is_an_error() {
        let result = factory(Arc::new(subjects()))
            .for_result(&json!({"total": 0}), None, None)
            .await;
        assert!(matches!(result, Err(TeaserError::MissingItems)));
    }

    // =========================================================================
    // Images
    // =========================================================================

    #[tokio::test]
    async fn image_exposes_140_and_70_renditions() {
        let teaser = single(article_record("research-article", "With image", &[], true)).await;
        let image = teaser.image.unwrap();

        assert_eq!(image.default_uri, "https://iiif.example.org/square-70.jpg");
        let widths: Vec<u32> = image.renditions.iter().map(|r| r.width).collect();
        assert_eq!(widths, vec![140, 70]);
        assert_eq!(image.renditions[0].uri, "https://iiif.example.org/square-140.jpg");
        assert_eq!(image.alt, "With image");
    }

    #[tokio::test]
    async fn absent_image_means_no_image_field() {
        let teaser = single(article_record("research-article", "No image", &[], false)).await;
        assert!(teaser.image.is_none());

        let json = serde_json::to_value(&teaser).unwrap();
        assert!(json.get("image").is_none());
    }

    #[tokio::test]
    async fn image_is_optional_for_every_imaged_type() {
        const PUBLISHED: &str = "2017-01-01T00:00:00Z";
        let records = vec![
            json!({"type": "labs-experiment", "number": 1, "title": "a", "published": PUBLISHED}),
            json!({"type": "medium-article", "uri": "m", "title": "b", "published": PUBLISHED}),
            json!({"type": "podcast-episode", "title": "c", "published": PUBLISHED}),
        ];
        let result = factory(Arc::new(subjects()))
            .for_result(&listing(records), None, None)
            .await
            .unwrap();
        assert!(result.items().iter().all(|t| t.image.is_none()));
    }

    // =========================================================================
    // Forced types
    // =========================================================================

    #[tokio::test]
    async fn for_events_forces_event_type() {
        let result = factory(Arc::new(subjects()))
            .for_events(
                &listing(vec![json!({"title": "Untyped", "starts": "2017-05-10T09:00:00Z"})]),
                Some("Events".into()),
                None,
            )
            .await
            .unwrap();
        assert_eq!(result.items()[0].kind, TeaserKind::Event);
        assert_eq!(result.heading(), Some("Events"));
    }

    #[tokio::test]
    async fn for_medium_articles_forces_medium_type() {
        let result = factory(Arc::new(subjects()))
            .for_medium_articles(
                &listing(vec![json!({
                    "title": "Untyped",
                    "uri": "https://medium.com/x",
                    "published": "2017-01-01T00:00:00Z"
                })]),
                None,
                None,
            )
            .await
            .unwrap();
        assert_eq!(result.items()[0].url.as_deref(), Some("https://medium.com/x"));
    }

    // =========================================================================
    // Aggregation
    // =========================================================================

    #[tokio::test]
    async fn see_more_link_selects_variant() {
        let see_more = SeeMoreLink::new(Link::new("See more", "/collections"));
        let result = factory(Arc::new(subjects()))
            .for_result(
                &listing(vec![collection_record("A", false)]),
                Some("Collections".into()),
                Some(see_more.clone()),
            )
            .await
            .unwrap();

        assert_eq!(result.see_more(), Some(&see_more));
        assert_eq!(result.heading(), Some("Collections"));
    }

    #[tokio::test]
    async fn empty_listing_is_basic() {
        let result = factory(Arc::new(subjects()))
            .for_result(&listing(vec![]), None, None)
            .await
            .unwrap();
        assert!(matches!(
            result,
            ListingTeasers::Basic { ref items, heading: None } if items.is_empty()
        ));
    }

    // =========================================================================
    // Concurrency
    // =========================================================================

    #[tokio::test(start_paused = true)]
    async fn order_is_preserved_when_lookups_finish_in_reverse() {
        // First item's subject resolves last.
        let lookup = Arc::new(DelayedSubjects::new(&[
            ("first", Duration::from_millis(30)),
            ("second", Duration::from_millis(20)),
            ("third", Duration::from_millis(10)),
        ]));
        let records = vec![
            article_record("research-article", "One", &["first"], false),
            json!({"type": "event", "title": "Two", "starts": "2017-01-01T00:00:00Z"}),
            article_record("insight", "Three", &["second"], false),
            collection_record_with_subjects("Four", &["third"]),
        ];

        let result = factory(lookup.clone())
            .for_result(&listing(records), None, None)
            .await
            .unwrap();

        assert_eq!(teaser_titles(&result), vec!["One", "Two", "Three", "Four"]);
        assert_eq!(lookup.completed(), vec!["third", "second", "first"]);
    }

    #[tokio::test(start_paused = true)]
    async fn lookups_are_issued_concurrently() {
        let lookup = Arc::new(DelayedSubjects::new(&[
            ("first", Duration::from_millis(100)),
            ("second", Duration::from_millis(100)),
        ]));
        let records = vec![
            article_record("research-article", "One", &["first"], false),
            article_record("research-article", "Two", &["second"], false),
        ];

        let started = tokio::time::Instant::now();
        factory(lookup)
            .for_result(&listing(records), None, None)
            .await
            .unwrap();
        assert!(started.elapsed() < Duration::from_millis(200));
    }

    #[tokio::test(start_paused = true)]
    async fn one_failed_lookup_fails_the_listing() {
        let lookup = Arc::new(
            DelayedSubjects::new(&[
                ("first", Duration::from_millis(10)),
                ("second", Duration::from_millis(10)),
            ])
            .failing("second"),
        );
        let records = vec![
            article_record("research-article", "One", &["first"], false),
            article_record("research-article", "Two", &["second"], false),
        ];

        let result = factory(lookup)
            .for_result(&listing(records), None, None)
            .await;
        let Err(TeaserError::SubjectLookup(SubjectLookupError::Unavailable { id, .. })) = &result
        else {
            panic!("expected the lookup failure, got {result:?}");
        };
        assert_eq!(id, "second");
    }
}
