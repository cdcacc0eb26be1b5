//! CLI output formatting for view models.
//!
//! The CLI prints JSON by default (what the rendering engine consumes). With
//! `--summary` it prints a human-readable outline instead, using the same
//! two-level pattern for every entity:
//!
//! 1. **Header line**: positional index + title
//! 2. **Context lines**: indented link, label, meta line
//!
//! # Output Format
//!
//! ## Listing
//!
//! ```text
//! Latest research
//! 001 Cells divide
//!     Subjects: Cell Biology
//!     Research article · Jan 5, 2017
//! 002 Tropical disease → /collections/tropical-disease
//!     Curated by Prabhat Jha.
//!     Collection · Mar 1, 2017
//! See more → /collections
//! ```
//!
//! ## Footer
//!
//! ```text
//! Menu
//!     About → /about
//!     Monthly archive → /archive/2017
//! Investors
//!     001 Howard Hughes Medical Institute
//! ```
//!
//! Each entity has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout.

use crate::page_meta::{MetaTag, PageTags};
use crate::view_model::{Footer, ListingTeasers, Meta, Teaser, ViewModel};

// ============================================================================
// Shared entity display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Header line: index, title and link target if any.
///
/// ```text
/// 001 Cells divide
/// 002 Tropical disease → /collections/tropical-disease
/// ```
fn entity_header(index: usize, title: &str, url: Option<&str>) -> String {
    match url {
        Some(u) => format!("{} {} → {}", format_index(index), title, u),
        None => format!("{} {}", format_index(index), title),
    }
}

fn meta_line(meta: &Meta) -> String {
    match meta {
        Meta::Text { text, date } => format!("{} · {}", text, date.for_human),
        Meta::Link { link, date } => format!("{} · {}", link.name, date.for_human),
        Meta::DateOnly { date } => date.for_human.clone(),
    }
}

fn teaser_lines(index: usize, teaser: &Teaser) -> Vec<String> {
    let mut lines = vec![entity_header(index, &teaser.title, teaser.url.as_deref())];
    let ctx = indent(1);

    if let Some(label) = &teaser.context_label {
        let names: Vec<&str> = label.links.iter().map(|l| l.name.as_str()).collect();
        lines.push(format!("{}Subjects: {}", ctx, names.join(", ")));
    }
    if let Some(info) = &teaser.secondary_info {
        lines.push(format!("{}{}", ctx, info));
    }
    if let Some(footer) = &teaser.footer {
        lines.push(format!("{}{}", ctx, meta_line(&footer.meta)));
    }
    if let Some(date) = &teaser.event_date {
        lines.push(format!("{}Starts {}", ctx, date.for_human));
    }
    lines
}

// ============================================================================
// Listings
// ============================================================================

pub fn format_listing(listing: &ListingTeasers) -> Vec<String> {
    let mut lines = Vec::new();
    if let Some(heading) = listing.heading() {
        lines.push(heading.to_string());
    }
    for (i, teaser) in listing.items().iter().enumerate() {
        lines.extend(teaser_lines(i + 1, teaser));
    }
    if let Some(see_more) = listing.see_more() {
        lines.push(format!("{} → {}", see_more.link.name, see_more.link.url));
    }
    lines.push(String::new());
    lines.push(format!("{} teasers", listing.items().len()));
    lines
}

pub fn print_listing(listing: &ListingTeasers) {
    for line in format_listing(listing) {
        println!("{}", line);
    }
}

// ============================================================================
// Single view models
// ============================================================================

pub fn format_view_model(model: &ViewModel) -> Vec<String> {
    match model {
        ViewModel::Teaser(teaser) => teaser_lines(1, teaser),
        ViewModel::CarouselItem(item) => {
            let ctx = indent(1);
            let mut lines = vec![format!("{} → {}", item.title.name, item.title.url)];
            if !item.subjects.is_empty() {
                let names: Vec<&str> = item.subjects.iter().map(|l| l.name.as_str()).collect();
                lines.push(format!("{}Subjects: {}", ctx, names.join(", ")));
            }
            lines.push(format!("{}[{}]", ctx, item.button));
            lines.push(format!("{}{}", ctx, meta_line(&item.meta)));
            lines.push(format!("{}Background: {}", ctx, item.image.high_res_uri));
            lines
        }
        ViewModel::Picture(picture) => {
            let ctx = indent(1);
            let mut lines = vec![picture.fallback.alt.clone()];
            for source in &picture.sources {
                lines.push(format!("{}{}: {}", ctx, source.media_type, source.srcset_attr()));
            }
            lines.push(format!("{}fallback: {}", ctx, picture.fallback.uri));
            lines
        }
    }
}

pub fn print_view_model(model: &ViewModel) {
    for line in format_view_model(model) {
        println!("{}", line);
    }
}

// ============================================================================
// Footer and page metadata
// ============================================================================

pub fn format_footer(footer: &Footer) -> Vec<String> {
    let mut lines = vec!["Menu".to_string()];
    for link in &footer.footer_menu_links {
        lines.push(format!("{}{} → {}", indent(1), link.name, link.url));
    }
    lines.push("Investors".to_string());
    for (i, investor) in footer.investors.iter().enumerate() {
        lines.push(format!("{}{}", indent(1), entity_header(i + 1, &investor.name, None)));
    }
    lines
}

pub fn print_footer(footer: &Footer) {
    for line in format_footer(footer) {
        println!("{}", line);
    }
}

pub fn format_page_tags(tags: &PageTags) -> Vec<String> {
    let mut lines = vec![
        format!("<title>{}</title>", tags.title),
        format!("<link rel=\"canonical\" href=\"{}\">", tags.canonical),
    ];
    for tag in &tags.meta {
        lines.push(match tag {
            MetaTag::Name { name, content } => {
                format!("<meta name=\"{}\" content=\"{}\">", name, content)
            }
            MetaTag::Property { property, content } => {
                format!("<meta property=\"{}\" content=\"{}\">", property, content)
            }
        });
    }
    lines
}

pub fn print_page_tags(tags: &PageTags) {
    for line in format_page_tags(tags) {
        println!("{}", line);
    }
}
