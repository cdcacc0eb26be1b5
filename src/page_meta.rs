//! Page `<head>` metadata: title, canonical link, Open Graph, Twitter Card
//! and Dublin Core tags.
//!
//! | Tag | Emitted when |
//! |---|---|
//! | `<title>` `"{title} \| {site}"` | always |
//! | `link[rel=canonical]` (site-relative path) | always |
//! | `og:url` (absolute), `og:title` | always |
//! | `og:description`, `description` | description set |
//! | `twitter:card` | always: `summary`, or `summary_large_image` with an image |
//! | `og:image` (+ `:width`, `:height`) | image set |
//! | `dc.*` | Dublin Core block set |

use crate::config::SiteInfo;
use crate::routing::UrlGenerator;
use chrono::{DateTime, FixedOffset};
use serde::Serialize;

/// One `<meta>` element, keyed by `name` or by `property` (Open Graph).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum MetaTag {
    Name { name: String, content: String },
    Property { property: String, content: String },
}

impl MetaTag {
    fn name(name: &str, content: impl Into<String>) -> Self {
        MetaTag::Name {
            name: name.to_string(),
            content: content.into(),
        }
    }

    fn property(property: &str, content: impl Into<String>) -> Self {
        MetaTag::Property {
            property: property.to_string(),
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SocialImage {
    pub uri: String,
    pub width: u32,
    pub height: u32,
}

/// Citation metadata for scholarly content pages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DublinCore {
    pub identifier: String,
    pub is_part_of: String,
    pub title: String,
    pub description: Option<String>,
    pub date: DateTime<FixedOffset>,
    pub rights: String,
}

/// What a page says about itself. Rendered into tags by [`PageMetadata::tags`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageMetadata {
    title: String,
    path: String,
    description: Option<String>,
    image: Option<SocialImage>,
    dublin_core: Option<DublinCore>,
}

impl PageMetadata {
    pub fn new(title: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            path: path.into(),
            description: None,
            image: None,
            dublin_core: None,
        }
    }

    /// Metadata for a named route.
    pub fn for_route(
        urls: &dyn UrlGenerator,
        title: impl Into<String>,
        route: &str,
        params: &[(&str, &str)],
    ) -> Self {
        Self::new(title, urls.generate(route, params))
    }

    #[must_use]
    pub fn with_description(self, description: impl Into<String>) -> Self {
        Self {
            description: Some(description.into()),
            ..self
        }
    }

    #[must_use]
    pub fn with_image(self, image: SocialImage) -> Self {
        Self {
            image: Some(image),
            ..self
        }
    }

    #[must_use]
    pub fn with_dublin_core(self, dublin_core: DublinCore) -> Self {
        Self {
            dublin_core: Some(dublin_core),
            ..self
        }
    }

    pub fn tags(&self, site: &SiteInfo) -> PageTags {
        let mut meta = vec![
            MetaTag::property("og:url", site.absolute_url(&self.path)),
            MetaTag::property("og:title", &self.title),
        ];

        if let Some(description) = &self.description {
            meta.push(MetaTag::property("og:description", description));
            meta.push(MetaTag::name("description", description));
        }

        let card = if self.image.is_some() {
            "summary_large_image"
        } else {
            "summary"
        };
        meta.push(MetaTag::name("twitter:card", card));

        if let Some(image) = &self.image {
            meta.push(MetaTag::property("og:image", &image.uri));
            meta.push(MetaTag::property("og:image:width", image.width.to_string()));
            meta.push(MetaTag::property("og:image:height", image.height.to_string()));
        }

        if let Some(dc) = &self.dublin_core {
            meta.push(MetaTag::name("dc.identifier", &dc.identifier));
            meta.push(MetaTag::name("dc.relation.ispartof", &dc.is_part_of));
            meta.push(MetaTag::name("dc.title", &dc.title));
            if let Some(description) = &dc.description {
                meta.push(MetaTag::name("dc.description", description));
            }
            meta.push(MetaTag::name("dc.date", dc.date.format("%Y-%m-%d").to_string()));
            meta.push(MetaTag::name("dc.rights", &dc.rights));
        }

        PageTags {
            title: format!("{} | {}", self.title, site.name),
            canonical: self.path.clone(),
            meta,
        }
    }
}

/// Rendered head metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageTags {
    pub title: String,
    pub canonical: String,
    pub meta: Vec<MetaTag>,
}

impl PageTags {
    pub fn property(&self, key: &str) -> Option<&str> {
        self.meta.iter().find_map(|tag| match tag {
            MetaTag::Property { property, content } if property == key => Some(content.as_str()),
            _ => None,
        })
    }

    pub fn name(&self, key: &str) -> Option<&str> {
        self.meta.iter().find_map(|tag| match tag {
            MetaTag::Name { name, content } if name == key => Some(content.as_str()),
            _ => None,
        })
    }
}
