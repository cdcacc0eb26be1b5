//! Images → responsive pictures.

use super::{ConvertContext, ConvertError, ViewModelConverter, wants};
use crate::model::ContentObject;
use crate::picture::PictureBuilderFactory;
use crate::view_model::{ViewModel, ViewModelKind};

/// Display width used when the context gives none.
pub const DEFAULT_WIDTH: u32 = 250;

pub struct ImagePictureConverter {
    pictures: PictureBuilderFactory,
}

impl ImagePictureConverter {
    pub fn new(pictures: PictureBuilderFactory) -> Self {
        Self { pictures }
    }
}

impl ViewModelConverter for ImagePictureConverter {
    fn supports(
        &self,
        object: &ContentObject,
        kind: Option<ViewModelKind>,
        _: &ConvertContext,
    ) -> bool {
        wants(kind, ViewModelKind::Picture) && matches!(object, ContentObject::Image(_))
    }

    fn convert(
        &self,
        object: &ContentObject,
        kind: Option<ViewModelKind>,
        context: &ConvertContext,
    ) -> Result<ViewModel, ConvertError> {
        let ContentObject::Image(image) = object else {
            return Err(ConvertError::no_converter(object, kind));
        };
        let builder = self.pictures.for_image(
            image,
            context.width.unwrap_or(DEFAULT_WIDTH),
            context.height,
        );
        Ok(ViewModel::Picture(builder.build()))
    }
}
