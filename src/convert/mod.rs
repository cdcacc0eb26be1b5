//! Domain object → view model conversion.
//!
//! A [`ConverterRegistry`] holds converters in registration order. `convert`
//! asks each one whether it supports the `(object, desired kind)` pair and
//! delegates to the first that does. Support checks are pure, so the scan is
//! cheap and order alone decides which converter wins when two overlap.
//!
//! The standard registry, in order:
//!
//! | Converter | Input | Output |
//! |---|---|---|
//! | [`CoverCollectionCarouselItemConverter`] | cover of a collection | carousel item |
//! | [`CoverArticleCarouselItemConverter`] | cover of an article | carousel item |
//! | [`CoverPodcastEpisodeCarouselItemConverter`] | cover of a podcast episode | carousel item |
//! | [`PressPackageTeaserConverter`] | press package | main teaser |
//! | [`CollectionTeaserConverter`] | collection | secondary teaser |
//! | [`EventTeaserConverter`] | event | event teaser |
//! | [`PodcastEpisodeTeaserConverter`] | podcast episode | secondary teaser |
//! | [`LabsExperimentTeaserConverter`] | labs experiment | secondary teaser |
//! | [`ImagePictureConverter`] | image | picture |
//!
//! A converter with no desired kind accepts the request too, so
//! `convert(cover, None, ..)` yields the carousel item.

mod carousel;
mod image;
mod teaser;

pub use carousel::{
    CoverArticleCarouselItemConverter, CoverCollectionCarouselItemConverter,
    CoverPodcastEpisodeCarouselItemConverter,
};
pub use image::ImagePictureConverter;
pub use teaser::{
    CollectionTeaserConverter, EventTeaserConverter, LabsExperimentTeaserConverter,
    PodcastEpisodeTeaserConverter, PressPackageTeaserConverter,
};

use crate::model::ContentObject;
use crate::picture::PictureBuilderFactory;
use crate::routing::UrlGenerator;
use crate::view_model::{ViewModel, ViewModelKind};
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConvertError {
    #[error(
        "No converter found for {object}{}",
        .kind.map(|k| format!(" as {k}")).unwrap_or_default()
    )]
    NoConverterFound {
        object: String,
        kind: Option<ViewModelKind>,
    },
}

impl ConvertError {
    pub fn no_converter(object: &ContentObject, kind: Option<ViewModelKind>) -> Self {
        ConvertError::NoConverterFound {
            object: object.describe(),
            kind,
        }
    }
}

/// Optional hints passed through to converters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConvertContext {
    pub width: Option<u32>,
    pub height: Option<u32>,
}

/// One `(input kind → view model kind)` conversion.
pub trait ViewModelConverter: Send + Sync {
    /// Whether this converter handles `object` for the requested kind.
    fn supports(
        &self,
        object: &ContentObject,
        kind: Option<ViewModelKind>,
        context: &ConvertContext,
    ) -> bool;

    /// Only called after `supports` returned true for the same arguments.
    fn convert(
        &self,
        object: &ContentObject,
        kind: Option<ViewModelKind>,
        context: &ConvertContext,
    ) -> Result<ViewModel, ConvertError>;
}

/// `true` when no kind was requested or the requested kind is `produces`.
pub(crate) fn wants(kind: Option<ViewModelKind>, produces: ViewModelKind) -> bool {
    kind.is_none_or(|k| k == produces)
}

#[derive(Default)]
pub struct ConverterRegistry {
    converters: Vec<Box<dyn ViewModelConverter>>,
}

impl ConverterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every built-in converter, in the order of the module table.
    pub fn standard(urls: Arc<dyn UrlGenerator>, pictures: PictureBuilderFactory) -> Self {
        let mut registry = Self::new();
        registry.register(CoverCollectionCarouselItemConverter::new(urls.clone()));
        registry.register(CoverArticleCarouselItemConverter::new(urls.clone()));
        registry.register(CoverPodcastEpisodeCarouselItemConverter::new(urls.clone()));
        registry.register(PressPackageTeaserConverter::new(urls.clone()));
        registry.register(CollectionTeaserConverter::new(urls.clone()));
        registry.register(EventTeaserConverter::new(urls.clone()));
        registry.register(PodcastEpisodeTeaserConverter::new(urls.clone()));
        registry.register(LabsExperimentTeaserConverter::new(urls));
        registry.register(ImagePictureConverter::new(pictures));
        registry
    }

    pub fn register(&mut self, converter: impl ViewModelConverter + 'static) {
        self.converters.push(Box::new(converter));
    }

    pub fn len(&self) -> usize {
        self.converters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.converters.is_empty()
    }

    /// Convert with the first registered converter that supports the request.
    pub fn convert(
        &self,
        object: &ContentObject,
        kind: Option<ViewModelKind>,
        context: &ConvertContext,
    ) -> Result<ViewModel, ConvertError> {
        let (index, converter) = self
            .converters
            .iter()
            .enumerate()
            .find(|(_, c)| c.supports(object, kind, context))
            .ok_or_else(|| ConvertError::no_converter(object, kind))?;
        debug!(object = %object.describe(), ?kind, converter = index, "converting");
        converter.convert(object, kind, context)
    }
}
