//! Named-route URL generation.
//!
//! The web framework owns routing; this layer only needs to turn a route name
//! plus parameters into a path. [`UrlGenerator`] is that seam. [`RouteTable`]
//! implements it from the `[routes]` config table, where each route is a path
//! template with `{param}` placeholders:
//!
//! ```text
//! subject         = "/subjects/{id}"
//! labs-experiment = "/labs/{number}"
//! ```
//!
//! Parameter values are percent-encoded as path segments, so ids from API
//! data cannot introduce extra segments or a query string.

use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use std::collections::BTreeMap;

/// Characters escaped in a path segment value.
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Routes this crate generates URLs for. Config validation rejects route
/// tables missing any of them.
pub const REQUIRED_ROUTES: &[&str] = &[
    "about",
    "archive-year",
    "article",
    "collection",
    "collections",
    "contact",
    "event",
    "inside-elife",
    "labs-experiment",
    "podcast",
    "podcast-episode",
    "press-pack",
    "press-packs",
    "privacy",
    "subject",
    "terms",
];

/// Produces URLs for named routes.
///
/// Generation is infallible: an unknown route name or a missing parameter is
/// a programming error.
pub trait UrlGenerator: Send + Sync {
    fn generate(&self, route: &str, params: &[(&str, &str)]) -> String;
}

/// Route name → path template table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteTable {
    routes: BTreeMap<String, String>,
}

impl RouteTable {
    pub fn new(routes: BTreeMap<String, String>) -> Self {
        Self { routes }
    }

    pub fn contains(&self, route: &str) -> bool {
        self.routes.contains_key(route)
    }

    /// First `{param}` placeholder of `route` that `params` leaves unfilled.
    pub fn missing_param(&self, route: &str, params: &[(&str, &str)]) -> Option<String> {
        let mut rest = self.routes.get(route)?.as_str();
        while let Some(start) = rest.find('{') {
            let end = rest[start..].find('}')? + start;
            let name = &rest[start + 1..end];
            if !params.iter().any(|(param, _)| *param == name) {
                return Some(name.to_string());
            }
            rest = &rest[end + 1..];
        }
        None
    }
}

impl UrlGenerator for RouteTable {
    fn generate(&self, route: &str, params: &[(&str, &str)]) -> String {
        let Some(template) = self.routes.get(route) else {
            panic!("unknown route '{route}'");
        };
        if let Some(name) = self.missing_param(route, params) {
            panic!("route '{route}' is missing parameter '{name}'");
        }
        params.iter().fold(template.clone(), |path, (name, value)| {
            path.replace(
                &format!("{{{name}}}"),
                &utf8_percent_encode(value, SEGMENT).to_string(),
            )
        })
    }
}
