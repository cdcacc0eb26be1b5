//! Domain objects → teasers.
//!
//! These mirror the listing factory's teaser shapes for callers that already
//! hold a typed domain object, so subject names are known and no lookup is
//! needed.

use super::{ConvertContext, ConvertError, ViewModelConverter, wants};
use crate::labels::{curated_by, experiment_label};
use crate::model::{ContentObject, Image, Subject};
use crate::picture::iiif_uri;
use crate::routing::UrlGenerator;
use crate::teasers::square_teaser_image;
use crate::view_model::{
    ContextLabel, Date, Link, Meta, Teaser, TeaserFooter, TeaserImage, ViewModel, ViewModelKind,
};
use std::sync::Arc;

fn small_image(image: &Image, url: Option<String>) -> TeaserImage {
    square_teaser_image(
        iiif_uri(image, Some(140), Some(140), "jpg"),
        iiif_uri(image, Some(70), Some(70), "jpg"),
        image.alt.clone(),
        url,
    )
}

fn context_label(urls: &dyn UrlGenerator, subjects: &[Subject]) -> Option<ContextLabel> {
    if subjects.is_empty() {
        return None;
    }
    Some(ContextLabel {
        links: subjects
            .iter()
            .map(|s| Link::new(&s.name, urls.generate("subject", &[("id", &s.id)])))
            .collect(),
    })
}

/// Declares a teaser converter over one `ContentObject` variant.
macro_rules! teaser_converter {
    ($(#[$doc:meta])* $name:ident, $variant:ident, |$self_:ident, $object:ident| $body:block) => {
        $(#[$doc])*
        pub struct $name {
            urls: Arc<dyn UrlGenerator>,
        }

        impl $name {
            pub fn new(urls: Arc<dyn UrlGenerator>) -> Self {
                Self { urls }
            }
        }

        impl ViewModelConverter for $name {
            fn supports(
                &self,
                object: &ContentObject,
                kind: Option<ViewModelKind>,
                _: &ConvertContext,
            ) -> bool {
                wants(kind, ViewModelKind::Teaser) && matches!(object, ContentObject::$variant(_))
            }

            fn convert(
                &self,
                object: &ContentObject,
                kind: Option<ViewModelKind>,
                _: &ConvertContext,
            ) -> Result<ViewModel, ConvertError> {
                let ContentObject::$variant($object) = object else {
                    return Err(ConvertError::no_converter(object, kind));
                };
                let $self_ = self;
                Ok(ViewModel::Teaser($body))
            }
        }
    };
}

teaser_converter!(
    /// Main teaser linking to the press pack, with its impact statement.
    PressPackageTeaserConverter,
    PressPackage,
    |this, package| {
        Teaser::main(
            &package.title,
            Some(this.urls.generate("press-pack", &[("id", &package.id)])),
            package.impact_statement.clone(),
            context_label(this.urls.as_ref(), &package.subjects),
            TeaserFooter::for_non_article(Meta::with_link(
                Link::new("For the press", this.urls.generate("press-packs", &[])),
                Date::new(package.published),
            )),
        )
    }
);

teaser_converter!(
    CollectionTeaserConverter,
    Collection,
    |this, collection| {
        let url = this.urls.generate("collection", &[("id", &collection.id)]);
        Teaser::secondary(
            &collection.title,
            Some(url.clone()),
            Some(curated_by(
                &collection.selected_curator.name.preferred,
                collection.selected_curator_et_al,
            )),
            None,
            collection.image.as_ref().map(|image| small_image(image, Some(url))),
            TeaserFooter::for_non_article(Meta::with_link(
                Link::new("Collection", this.urls.generate("collections", &[])),
                Date::new(collection.updated_or_published()),
            )),
        )
    }
);

teaser_converter!(
    EventTeaserConverter,
    Event,
    |this, event| {
        Teaser::event(
            &event.title,
            Some(this.urls.generate("event", &[("id", &event.id)])),
            Date::date_only(event.starts),
        )
    }
);

teaser_converter!(
    PodcastEpisodeTeaserConverter,
    PodcastEpisode,
    |this, episode| {
        let number = episode.number.to_string();
        Teaser::secondary(
            &episode.title,
            Some(this.urls.generate("podcast-episode", &[("number", &number)])),
            None,
            None,
            episode.image.as_ref().map(|image| small_image(image, None)),
            TeaserFooter::for_non_article(Meta::with_text("Podcast", Date::new(episode.published))),
        )
    }
);

teaser_converter!(
    LabsExperimentTeaserConverter,
    LabsExperiment,
    |this, experiment| {
        let number = experiment.number.to_string();
        Teaser::secondary(
            &experiment.title,
            Some(this.urls.generate("labs-experiment", &[("number", &number)])),
            None,
            None,
            experiment.image.as_ref().map(|image| small_image(image, None)),
            TeaserFooter::for_non_article(Meta::with_text(
                experiment_label(&number),
                Date::new(experiment.published),
            )),
        )
    }
);
