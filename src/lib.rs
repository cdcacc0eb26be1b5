//! # Journal Views
//!
//! The presentation layer of a scholarly-publishing site. Domain objects from
//! the content API (articles, collections, covers, events, press packages,
//! podcast episodes, labs experiments, images) and raw listing records go in;
//! immutable, serializable view models for the pattern renderer come out.
//!
//! # Data Flow
//!
//! ```text
//! ContentObject ──► ConverterRegistry ──► CarouselItem / Teaser / Picture
//! listing JSON  ──► SecondaryListingTeaserFactory ──► ListingTeasers
//! today + config ─► FooterFactory ──► Footer
//! title + route ──► PageMetadata ──► PageTags
//! ```
//!
//! Routing, HTML rendering and the API client live elsewhere. This crate
//! reaches them only through narrow traits: [`routing::UrlGenerator`] for
//! paths and [`subjects::SubjectLookup`] for subject names.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`model`] | Strongly-typed domain objects, closed `ContentObject` sum |
//! | [`view_model`] | Values handed to the renderer (teasers, carousel items, pictures, footer) |
//! | [`picture`] | Immutable responsive picture builder and its factory (IIIF and static assets) |
//! | [`convert`] | Converter registry (first match wins) and the per-kind converters |
//! | [`teasers`] | Listing records → teasers, with concurrent subject lookups |
//! | [`footer`] | Footer menu with archive year, investor logos, injectable clock |
//! | [`page_meta`] | Title, canonical, Open Graph, Twitter Card and Dublin Core tags |
//! | [`routing`] | `UrlGenerator` seam and the config-driven `RouteTable` |
//! | [`subjects`] | Async `SubjectLookup` seam and the static table implementation |
//! | [`labels`] | Display text from identifiers: humanized types, experiment numbers, bylines |
//! | [`config`] | `config.toml` loading, stock defaults, merging, validation |
//! | [`output`] | CLI summary formatting |
//!
//! # Design Decisions
//!
//! ## Closed Sums at the Boundary
//!
//! Listing records arrive as loosely-typed JSON distinguished by a `type`
//! string. They are decoded once, in [`teasers`], into a closed enum; past
//! that point every dispatch is an exhaustive `match`, and an unknown type is
//! an error at the edge instead of a silent fallthrough.
//!
//! ## Fire-and-Collect Teasers
//!
//! Context labels need a subject lookup per subject. All lookups for a listing
//! run concurrently through `futures::future::try_join_all`: results keep the
//! input order whatever order lookups complete in, and a single failure fails
//! the whole listing. No partial listings.
//!
//! ## Immutable View Models
//!
//! View models are plain values built in one constructor call.
//! [`picture::PictureBuilder`] is the one incremental builder, and every step
//! returns a new builder.

pub mod config;
pub mod convert;
pub mod footer;
pub mod labels;
pub mod model;
pub mod output;
pub mod page_meta;
pub mod picture;
pub mod routing;
pub mod subjects;
pub mod teasers;
pub mod view_model;

#[cfg(test)]
pub(crate) mod test_helpers;
