//! Presentation-ready view models handed to the pattern renderer.
//!
//! Every type here is a plain value: built in one constructor call, never
//! mutated afterwards, and serialized (camelCase keys) for the rendering
//! engine. Nothing in this module knows about domain objects or listing
//! records; converters and factories do the mapping.

use chrono::{DateTime, FixedOffset};
use serde::Serialize;

/// A named hyperlink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Link {
    pub name: String,
    pub url: String,
}

impl Link {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }
}

/// A date with machine- and human-readable forms.
///
/// `date_only` marks dates whose time of day is meaningless (event start
/// dates), so the machine form drops the time component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Date {
    pub for_machine: String,
    pub for_human: String,
    pub date_only: bool,
}

impl Date {
    pub fn new(date: DateTime<FixedOffset>) -> Self {
        Self {
            for_machine: date.to_rfc3339(),
            for_human: date.format("%b %-d, %Y").to_string(),
            date_only: false,
        }
    }

    pub fn date_only(date: DateTime<FixedOffset>) -> Self {
        Self {
            for_machine: date.format("%Y-%m-%d").to_string(),
            for_human: date.format("%b %-d, %Y").to_string(),
            date_only: true,
        }
    }
}

/// One line of teaser/carousel metadata: a label (plain or linked) and a date,
/// or the date alone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Meta {
    Text { text: String, date: Date },
    Link { link: Link, date: Date },
    DateOnly { date: Date },
}

impl Meta {
    pub fn with_text(text: impl Into<String>, date: Date) -> Self {
        Meta::Text {
            text: text.into(),
            date,
        }
    }

    pub fn with_link(link: Link, date: Date) -> Self {
        Meta::Link { link, date }
    }

    pub fn with_date(date: Date) -> Self {
        Meta::DateOnly { date }
    }

    pub fn date(&self) -> &Date {
        match self {
            Meta::Text { date, .. } | Meta::Link { date, .. } | Meta::DateOnly { date } => date,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TeaserFooter {
    pub meta: Meta,
}

impl TeaserFooter {
    /// Footer for anything that isn't a research article: just the meta line.
    pub fn for_non_article(meta: Meta) -> Self {
        Self { meta }
    }
}

/// One explicit-width rendition of a teaser image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageRendition {
    pub width: u32,
    pub uri: String,
}

/// Small square teaser image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeaserImage {
    pub default_uri: String,
    pub alt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub renditions: Vec<ImageRendition>,
}

impl TeaserImage {
    pub fn small(
        default_uri: impl Into<String>,
        alt: impl Into<String>,
        url: Option<String>,
        renditions: Vec<ImageRendition>,
    ) -> Self {
        Self {
            default_uri: default_uri.into(),
            alt: alt.into(),
            url,
            renditions,
        }
    }
}

/// Subject links shown above a teaser title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContextLabel {
    pub links: Vec<Link>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TeaserKind {
    Main,
    Secondary,
    Event,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Teaser {
    pub kind: TeaserKind,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Byline, e.g. "Curated by Jane Doe et al."
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secondary_info: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context_label: Option<ContextLabel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<TeaserImage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer: Option<TeaserFooter>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_date: Option<Date>,
}

impl Teaser {
    pub fn main(
        title: impl Into<String>,
        url: Option<String>,
        content: Option<String>,
        context_label: Option<ContextLabel>,
        footer: TeaserFooter,
    ) -> Self {
        Self {
            kind: TeaserKind::Main,
            title: title.into(),
            url,
            content,
            secondary_info: None,
            context_label,
            image: None,
            footer: Some(footer),
            event_date: None,
        }
    }

    pub fn secondary(
        title: impl Into<String>,
        url: Option<String>,
        secondary_info: Option<String>,
        context_label: Option<ContextLabel>,
        image: Option<TeaserImage>,
        footer: TeaserFooter,
    ) -> Self {
        Self {
            kind: TeaserKind::Secondary,
            title: title.into(),
            url,
            content: None,
            secondary_info,
            context_label,
            image,
            footer: Some(footer),
            event_date: None,
        }
    }

    /// Event teasers carry only a title, an optional link and the start date.
    pub fn event(title: impl Into<String>, url: Option<String>, date: Date) -> Self {
        Self {
            kind: TeaserKind::Event,
            title: title.into(),
            url,
            content: None,
            secondary_info: None,
            context_label: None,
            image: None,
            footer: None,
            event_date: Some(date),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeeMoreLink {
    pub link: Link,
}

impl SeeMoreLink {
    pub fn new(link: Link) -> Self {
        Self { link }
    }
}

/// An ordered list of teasers, optionally headed and optionally followed by
/// a "see more" link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "variant", rename_all = "kebab-case")]
pub enum ListingTeasers {
    Basic {
        items: Vec<Teaser>,
        #[serde(skip_serializing_if = "Option::is_none")]
        heading: Option<String>,
    },
    #[serde(rename_all = "camelCase")]
    WithSeeMore {
        items: Vec<Teaser>,
        see_more: SeeMoreLink,
        #[serde(skip_serializing_if = "Option::is_none")]
        heading: Option<String>,
    },
}

impl ListingTeasers {
    pub fn basic(items: Vec<Teaser>, heading: Option<String>) -> Self {
        ListingTeasers::Basic { items, heading }
    }

    pub fn with_see_more(
        items: Vec<Teaser>,
        see_more: SeeMoreLink,
        heading: Option<String>,
    ) -> Self {
        ListingTeasers::WithSeeMore {
            items,
            see_more,
            heading,
        }
    }

    pub fn items(&self) -> &[Teaser] {
        match self {
            ListingTeasers::Basic { items, .. } | ListingTeasers::WithSeeMore { items, .. } => {
                items
            }
        }
    }

    pub fn heading(&self) -> Option<&str> {
        match self {
            ListingTeasers::Basic { heading, .. } | ListingTeasers::WithSeeMore { heading, .. } => {
                heading.as_deref()
            }
        }
    }

    pub fn see_more(&self) -> Option<&SeeMoreLink> {
        match self {
            ListingTeasers::Basic { .. } => None,
            ListingTeasers::WithSeeMore { see_more, .. } => Some(see_more),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BackgroundImage {
    pub low_res_uri: String,
    pub high_res_uri: String,
}

impl BackgroundImage {
    pub fn new(low_res_uri: impl Into<String>, high_res_uri: impl Into<String>) -> Self {
        Self {
            low_res_uri: low_res_uri.into(),
            high_res_uri: high_res_uri.into(),
        }
    }
}

/// Homepage carousel entry for a cover.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CarouselItem {
    pub subjects: Vec<Link>,
    pub title: Link,
    pub button: String,
    pub meta: Meta,
    pub image: BackgroundImage,
}

impl CarouselItem {
    pub fn new(
        subjects: Vec<Link>,
        title: Link,
        button: impl Into<String>,
        meta: Meta,
        image: BackgroundImage,
    ) -> Self {
        Self {
            subjects,
            title,
            button: button.into(),
            meta,
            image,
        }
    }
}

/// One candidate URI in a `srcset`, at a pixel density.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SrcsetEntry {
    pub uri: String,
    pub density: u32,
}

/// All renditions of a picture in one media type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PictureSource {
    pub media_type: String,
    pub srcset: Vec<SrcsetEntry>,
}

impl PictureSource {
    /// Render as a `srcset` attribute value, highest density first.
    pub fn srcset_attr(&self) -> String {
        self.srcset
            .iter()
            .map(|e| format!("{} {}x", e.uri, e.density))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PictureFallback {
    pub uri: String,
    pub alt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
}

/// Responsive picture: sources in preference order plus a fallback image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Picture {
    pub sources: Vec<PictureSource>,
    pub fallback: PictureFallback,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_height: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvestorLogo {
    pub name: String,
    pub picture: Picture,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Footer {
    pub footer_menu_links: Vec<Link>,
    pub investors: Vec<InvestorLogo>,
}

impl Footer {
    pub fn menu_link(&self, name: &str) -> Option<&Link> {
        self.footer_menu_links.iter().find(|l| l.name == name)
    }
}

/// The kinds of view model the converter registry can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ViewModelKind {
    CarouselItem,
    Teaser,
    Picture,
}

impl std::fmt::Display for ViewModelKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ViewModelKind::CarouselItem => "carousel-item",
            ViewModelKind::Teaser => "teaser",
            ViewModelKind::Picture => "picture",
        };
        f.write_str(name)
    }
}

/// Output of the converter registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ViewModel {
    CarouselItem(CarouselItem),
    Teaser(Teaser),
    Picture(Picture),
}

impl ViewModel {
    pub fn kind(&self) -> ViewModelKind {
        match self {
            ViewModel::CarouselItem(_) => ViewModelKind::CarouselItem,
            ViewModel::Teaser(_) => ViewModelKind::Teaser,
            ViewModel::Picture(_) => ViewModelKind::Picture,
        }
    }
}
