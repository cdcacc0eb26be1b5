//! Homepage covers → carousel items.
//!
//! All three converters share the same frame: subject links, the cover's own
//! title linked to the wrapped item, a call to action, a meta line and a 2:1
//! background image. They differ only in which item they accept and what the
//! button and meta line say.

use super::{ConvertContext, ConvertError, ViewModelConverter, wants};
use crate::labels::humanize_type;
use crate::model::{ContentObject, Cover, CoverItem, Image, Subject};
use crate::picture::iiif_uri;
use crate::routing::UrlGenerator;
use crate::view_model::{BackgroundImage, CarouselItem, Date, Link, Meta, ViewModel, ViewModelKind};
use std::sync::Arc;

/// Background widths; heights follow from the 2:1 crop.
const LOW_RES_WIDTH: u32 = 900;
const HIGH_RES_WIDTH: u32 = 1800;

fn background_image(image: &Image) -> BackgroundImage {
    BackgroundImage::new(
        iiif_uri(image, Some(LOW_RES_WIDTH), Some(LOW_RES_WIDTH / 2), "jpg"),
        iiif_uri(image, Some(HIGH_RES_WIDTH), Some(HIGH_RES_WIDTH / 2), "jpg"),
    )
}

fn subject_links(urls: &dyn UrlGenerator, subjects: &[Subject]) -> Vec<Link> {
    subjects
        .iter()
        .map(|s| Link::new(&s.name, urls.generate("subject", &[("id", &s.id)])))
        .collect()
}

fn unwrap_cover<'a>(
    object: &'a ContentObject,
    kind: Option<ViewModelKind>,
) -> Result<(&'a Cover, &'a CoverItem), ConvertError> {
    match object {
        ContentObject::Cover(cover) => Ok((cover, &cover.item)),
        _ => Err(ConvertError::no_converter(object, kind)),
    }
}

fn is_carousel_cover(
    object: &ContentObject,
    kind: Option<ViewModelKind>,
    accepts: fn(&CoverItem) -> bool,
) -> bool {
    wants(kind, ViewModelKind::CarouselItem)
        && matches!(object, ContentObject::Cover(cover) if accepts(&cover.item))
}

pub struct CoverCollectionCarouselItemConverter {
    urls: Arc<dyn UrlGenerator>,
}

impl CoverCollectionCarouselItemConverter {
    pub fn new(urls: Arc<dyn UrlGenerator>) -> Self {
        Self { urls }
    }
}

impl ViewModelConverter for CoverCollectionCarouselItemConverter {
    fn supports(
        &self,
        object: &ContentObject,
        kind: Option<ViewModelKind>,
        _: &ConvertContext,
    ) -> bool {
        is_carousel_cover(object, kind, |item| matches!(item, CoverItem::Collection(_)))
    }

    fn convert(
        &self,
        object: &ContentObject,
        kind: Option<ViewModelKind>,
        _: &ConvertContext,
    ) -> Result<ViewModel, ConvertError> {
        let (cover, CoverItem::Collection(collection)) = unwrap_cover(object, kind)? else {
            return Err(ConvertError::no_converter(object, kind));
        };

        Ok(ViewModel::CarouselItem(CarouselItem::new(
            subject_links(self.urls.as_ref(), &collection.subjects),
            Link::new(
                &cover.title,
                self.urls.generate("collection", &[("id", &collection.id)]),
            ),
            "Read collection",
            Meta::with_link(
                Link::new("Collection", self.urls.generate("collections", &[])),
                Date::new(collection.published),
            ),
            background_image(&cover.image),
        )))
    }
}

pub struct CoverArticleCarouselItemConverter {
    urls: Arc<dyn UrlGenerator>,
}

impl CoverArticleCarouselItemConverter {
    pub fn new(urls: Arc<dyn UrlGenerator>) -> Self {
        Self { urls }
    }
}

impl ViewModelConverter for CoverArticleCarouselItemConverter {
    fn supports(
        &self,
        object: &ContentObject,
        kind: Option<ViewModelKind>,
        _: &ConvertContext,
    ) -> bool {
        is_carousel_cover(object, kind, |item| matches!(item, CoverItem::Article(_)))
    }

    fn convert(
        &self,
        object: &ContentObject,
        kind: Option<ViewModelKind>,
        _: &ConvertContext,
    ) -> Result<ViewModel, ConvertError> {
        let (cover, CoverItem::Article(article)) = unwrap_cover(object, kind)? else {
            return Err(ConvertError::no_converter(object, kind));
        };

        Ok(ViewModel::CarouselItem(CarouselItem::new(
            subject_links(self.urls.as_ref(), &article.subjects),
            Link::new(&cover.title, self.urls.generate("article", &[("id", &article.id)])),
            "Read article",
            Meta::with_text(
                humanize_type(article.article_type.as_str()),
                Date::new(article.published),
            ),
            background_image(&cover.image),
        )))
    }
}

pub struct CoverPodcastEpisodeCarouselItemConverter {
    urls: Arc<dyn UrlGenerator>,
}

impl CoverPodcastEpisodeCarouselItemConverter {
    pub fn new(urls: Arc<dyn UrlGenerator>) -> Self {
        Self { urls }
    }
}

impl ViewModelConverter for CoverPodcastEpisodeCarouselItemConverter {
    fn supports(
        &self,
        object: &ContentObject,
        kind: Option<ViewModelKind>,
        _: &ConvertContext,
    ) -> bool {
        is_carousel_cover(object, kind, |item| matches!(item, CoverItem::PodcastEpisode(_)))
    }

    fn convert(
        &self,
        object: &ContentObject,
        kind: Option<ViewModelKind>,
        _: &ConvertContext,
    ) -> Result<ViewModel, ConvertError> {
        let (cover, CoverItem::PodcastEpisode(episode)) = unwrap_cover(object, kind)? else {
            return Err(ConvertError::no_converter(object, kind));
        };
        let number = episode.number.to_string();

        Ok(ViewModel::CarouselItem(CarouselItem::new(
            subject_links(self.urls.as_ref(), &episode.subjects),
            Link::new(
                &cover.title,
                self.urls.generate("podcast-episode", &[("number", &number)]),
            ),
            "Listen to episode",
            Meta::with_link(
                Link::new("Podcast", self.urls.generate("podcast", &[])),
                Date::new(episode.published),
            ),
            background_image(&cover.image),
        )))
    }
}
