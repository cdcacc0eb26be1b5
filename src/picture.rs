//! Responsive picture descriptors.
//!
//! A [`PictureBuilder`] records *which* renditions a picture should offer
//! (media types in preference order, display sizes, natural size, alt text)
//! and delegates URI construction to a caller-supplied template. The builder
//! never formats URIs itself, so the same code serves IIIF images, static
//! assets, or anything else with a `(type, width, height) → URI` mapping.
//!
//! [`PictureBuilderFactory`] covers the two common cases:
//!
//! | Constructor | Default type | Extra types |
//! |---|---|---|
//! | `create(.., "image/svg+xml", ..)` | SVG | PNG fallback |
//! | `create(.., other, ..)` | as given | — |
//! | `for_image(png source)` | PNG | — |
//! | `for_image(anything else)` | JPEG | — |

use crate::model::Image;
use crate::view_model::{Picture, PictureFallback, PictureSource, SrcsetEntry};
use std::fmt;
use std::sync::Arc;

pub const SVG: &str = "image/svg+xml";
pub const PNG: &str = "image/png";
pub const JPEG: &str = "image/jpeg";

const MEDIA_TYPES: &[(&str, &str)] = &[
    ("image/gif", "gif"),
    (JPEG, "jpg"),
    (PNG, "png"),
    (SVG, "svg"),
    ("image/tiff", "tif"),
    ("image/webp", "webp"),
];

/// File extension for a media type, e.g. `image/jpeg` → `jpg`.
pub fn extension_for(media_type: &str) -> Option<&'static str> {
    MEDIA_TYPES
        .iter()
        .find(|(t, _)| *t == media_type)
        .map(|(_, ext)| *ext)
}

/// IIIF image API URI for `image` at the given size.
///
/// A missing dimension is left blank so the server keeps the aspect ratio.
pub fn iiif_uri(image: &Image, width: Option<u32>, height: Option<u32>, extension: &str) -> String {
    let size = match (width, height) {
        (Some(w), Some(h)) => format!("{w},{h}"),
        (Some(w), None) => format!("{w},"),
        (None, Some(h)) => format!(",{h}"),
        (None, None) => "full".to_string(),
    };
    format!(
        "{}/full/{size}/0/default.{extension}",
        image.uri.trim_end_matches('/')
    )
}

/// `(media type, width, height) → URI`.
pub type UriTemplate = Arc<dyn Fn(&str, Option<u32>, Option<u32>) -> String + Send + Sync>;

/// Immutable picture builder: every configuration step returns a new builder.
#[derive(Clone)]
pub struct PictureBuilder {
    uri: UriTemplate,
    alt: String,
    types: Vec<String>,
    sizes: Vec<(u32, Option<u32>)>,
    original_size: Option<(u32, u32)>,
}

impl fmt::Debug for PictureBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PictureBuilder")
            .field("alt", &self.alt)
            .field("types", &self.types)
            .field("sizes", &self.sizes)
            .field("original_size", &self.original_size)
            .finish_non_exhaustive()
    }
}

impl PictureBuilder {
    pub fn new(uri: UriTemplate, base_type: impl Into<String>, alt: impl Into<String>) -> Self {
        Self {
            uri,
            alt: alt.into(),
            types: vec![base_type.into()],
            sizes: Vec::new(),
            original_size: None,
        }
    }

    /// Offer another media type, after the ones already registered.
    #[must_use]
    pub fn add_type(&self, media_type: impl Into<String>) -> Self {
        let media_type = media_type.into();
        let mut next = self.clone();
        if !next.types.contains(&media_type) {
            next.types.push(media_type);
        }
        next
    }

    /// Offer another display size. Each size yields a 1x and a 2x rendition.
    #[must_use]
    pub fn add_size(&self, width: u32, height: Option<u32>) -> Self {
        let mut next = self.clone();
        if !next.sizes.contains(&(width, height)) {
            next.sizes.push((width, height));
        }
        next
    }

    #[must_use]
    pub fn set_original_size(&self, width: u32, height: u32) -> Self {
        let mut next = self.clone();
        next.original_size = Some((width, height));
        next
    }

    pub fn base_type(&self) -> &str {
        &self.types[0]
    }

    /// Second registered type, offered to consumers that can't use the base type.
    pub fn fallback_type(&self) -> Option<&str> {
        self.types.get(1).map(String::as_str)
    }

    pub fn types(&self) -> &[String] {
        &self.types
    }

    pub fn sizes(&self) -> &[(u32, Option<u32>)] {
        &self.sizes
    }

    pub fn original_size(&self) -> Option<(u32, u32)> {
        self.original_size
    }

    pub fn alt(&self) -> &str {
        &self.alt
    }

    pub fn build(&self) -> Picture {
        let sources = self
            .types
            .iter()
            .map(|media_type| PictureSource {
                media_type: media_type.clone(),
                srcset: self.srcset(media_type),
            })
            .collect();

        let (width, height) = match self.sizes.first() {
            Some(&(w, h)) => (Some(w), h),
            None => (None, None),
        };

        Picture {
            sources,
            fallback: PictureFallback {
                uri: (self.uri)(self.base_type(), width, height),
                alt: self.alt.clone(),
                width,
                height,
            },
            original_width: self.original_size.map(|(w, _)| w),
            original_height: self.original_size.map(|(_, h)| h),
        }
    }

    fn srcset(&self, media_type: &str) -> Vec<SrcsetEntry> {
        if self.sizes.is_empty() {
            return vec![SrcsetEntry {
                uri: (self.uri)(media_type, None, None),
                density: 1,
            }];
        }
        self.sizes
            .iter()
            .flat_map(|&(w, h)| {
                [
                    SrcsetEntry {
                        uri: (self.uri)(
                            media_type,
                            Some(w.saturating_mul(2)),
                            h.map(|h| h.saturating_mul(2)),
                        ),
                        density: 2,
                    },
                    SrcsetEntry {
                        uri: (self.uri)(media_type, Some(w), h),
                        density: 1,
                    },
                ]
            })
            .collect()
    }
}

/// Builds [`PictureBuilder`]s with sensible defaults.
#[derive(Debug, Clone, Copy, Default)]
pub struct PictureBuilderFactory;

impl PictureBuilderFactory {
    /// Builder over an arbitrary URI template.
    ///
    /// Dimensions the builder doesn't specify fall back to the defaults given
    /// here. SVG pictures also offer a PNG rendition.
    pub fn create<F>(
        &self,
        uri_template: F,
        default_type: &str,
        default_width: Option<u32>,
        default_height: Option<u32>,
        alt: &str,
    ) -> PictureBuilder
    where
        F: Fn(&str, Option<u32>, Option<u32>) -> String + Send + Sync + 'static,
    {
        let uri: UriTemplate = Arc::new(
            move |media_type: &str, width: Option<u32>, height: Option<u32>| {
                uri_template(media_type, width.or(default_width), height.or(default_height))
            },
        );

        let mut builder = PictureBuilder::new(uri, default_type, alt);
        if default_type == SVG {
            builder = builder.add_type(PNG);
        }
        if let Some(width) = default_width {
            builder = builder.add_size(width, default_height);
        }
        builder
    }

    /// Builder for an IIIF-served image, with its natural size and alt text.
    pub fn for_image(
        &self,
        image: &Image,
        default_width: u32,
        default_height: Option<u32>,
    ) -> PictureBuilder {
        let default_type = if image.source.media_type == PNG {
            PNG
        } else {
            JPEG
        };

        let source = image.clone();
        self.create(
            move |media_type: &str, width: Option<u32>, height: Option<u32>| {
                let extension = extension_for(media_type).unwrap_or("jpg");
                iiif_uri(&source, width, height, extension)
            },
            default_type,
            Some(default_width),
            default_height,
            &image.alt,
        )
        .set_original_size(image.width, image.height)
    }
}
