//! Site configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. Stock defaults are
//! the base layer; a user `config.toml` only needs the keys it overrides.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [site]
//! name = "eLife"                           # Suffix of every page <title>
//! base_url = "https://elifesciences.org"   # Prefix for absolute og:url / og:image
//!
//! [footer]
//! investor_logo_path = "/assets/images/investors"
//! investor_logo_width = 185
//!
//! [routes]
//! subject = "/subjects/{id}"               # Route name -> path template
//! # ...one entry per route, see `gen-config`
//!
//! [subjects]
//! cell-biology = "Cell Biology"            # Subject id -> display name
//! ```
//!
//! Route and subject tables merge key by key, so overriding a single route
//! keeps the rest of the stock table. Unknown keys in fixed sections are
//! rejected to catch typos early.

use crate::routing::{REQUIRED_ROUTES, RouteTable};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Site identity used in page metadata.
    pub site: SiteInfo,
    /// Investor logo assets for the footer.
    pub footer: FooterConfig,
    /// Route name → path template.
    pub routes: BTreeMap<String, String>,
    /// Subject id → display name, used when no subjects API is available.
    pub subjects: BTreeMap<String, String>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            site: SiteInfo::default(),
            footer: FooterConfig::default(),
            routes: default_routes(),
            subjects: default_subjects(),
        }
    }
}

impl SiteConfig {
    /// Validate config values are usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.site.name.trim().is_empty() {
            return Err(ConfigError::Validation("site.name must not be empty".into()));
        }
        let base_url = &self.site.base_url;
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ConfigError::Validation(
                "site.base_url must be an absolute http(s) URL".into(),
            ));
        }
        if self.footer.investor_logo_width == 0 {
            return Err(ConfigError::Validation(
                "footer.investor_logo_width must be non-zero".into(),
            ));
        }
        let missing: Vec<&str> = REQUIRED_ROUTES
            .iter()
            .copied()
            .filter(|r| !self.routes.contains_key(*r))
            .collect();
        if !missing.is_empty() {
            return Err(ConfigError::Validation(format!(
                "routes missing: {}",
                missing.join(", ")
            )));
        }
        Ok(())
    }

    pub fn route_table(&self) -> RouteTable {
        RouteTable::new(self.routes.clone())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteInfo {
    /// Appended to page titles: `"For the press | eLife"`.
    pub name: String,
    /// Scheme and host without trailing slash.
    pub base_url: String,
}

impl Default for SiteInfo {
    fn default() -> Self {
        Self {
            name: "eLife".to_string(),
            base_url: "https://elifesciences.org".to_string(),
        }
    }
}

impl SiteInfo {
    /// Absolute URL for a site-relative path.
    pub fn absolute_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FooterConfig {
    /// Directory holding `{slug}.svg` logos and `{slug}-{width}.png` rasters.
    pub investor_logo_path: String,
    /// Rendered logo width in CSS pixels.
    pub investor_logo_width: u32,
}

impl Default for FooterConfig {
    fn default() -> Self {
        Self {
            investor_logo_path: "/assets/images/investors".to_string(),
            investor_logo_width: 185,
        }
    }
}

fn default_routes() -> BTreeMap<String, String> {
    [
        ("about", "/about"),
        ("archive-year", "/archive/{year}"),
        ("article", "/articles/{id}"),
        ("collection", "/collections/{id}"),
        ("collections", "/collections"),
        ("contact", "/contact"),
        ("event", "/events/{id}"),
        ("inside-elife", "/inside-elife"),
        ("labs-experiment", "/labs/{number}"),
        ("podcast", "/podcast"),
        ("podcast-episode", "/podcast/episode{number}"),
        ("press-pack", "/for-the-press/{id}"),
        ("press-packs", "/for-the-press"),
        ("privacy", "/privacy"),
        ("subject", "/subjects/{id}"),
        ("terms", "/terms"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

fn default_subjects() -> BTreeMap<String, String> {
    [
        ("biochemistry-chemical-biology", "Biochemistry and Chemical Biology"),
        ("cell-biology", "Cell Biology"),
        ("epidemiology-global-health", "Epidemiology and Global Health"),
        ("microbiology-infectious-disease", "Microbiology and Infectious Disease"),
        ("neuroscience", "Neuroscience"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(SiteConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// Tables merge key by key; any other overlay value replaces the base value.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `config.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if the directory has no `config.toml`.
pub fn load_raw_config(dir: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = dir.join("config.toml");
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<SiteConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in the given directory, on top of stock defaults.
pub fn load_config(dir: &Path) -> Result<SiteConfig, ConfigError> {
    resolve_config(stock_defaults_value(), load_raw_config(dir)?)
}

/// Fully-commented stock `config.toml`. Printed by `gen-config`.
pub fn stock_config_toml() -> &'static str {
    r##"# journal-views configuration
# ===========================
# All settings are optional. Values shown below are the defaults.
# Route and subject tables merge key by key with these defaults.
# Unknown keys in [site] and [footer] cause an error.

# ---------------------------------------------------------------------------
# Site identity (page metadata)
# ---------------------------------------------------------------------------
[site]
# Appended to every page title: "For the press | eLife".
name = "eLife"

# Used to build absolute og:url and og:image values.
base_url = "https://elifesciences.org"

# ---------------------------------------------------------------------------
# Footer
# ---------------------------------------------------------------------------
[footer]
# Directory with {slug}.svg and {slug}-{width}.png files per investor.
investor_logo_path = "/assets/images/investors"

# Rendered logo width (CSS pixels); 2x renditions are requested too.
investor_logo_width = 185

# ---------------------------------------------------------------------------
# Routes: name -> path template with {param} placeholders
# ---------------------------------------------------------------------------
[routes]
about = "/about"
archive-year = "/archive/{year}"
article = "/articles/{id}"
collection = "/collections/{id}"
collections = "/collections"
contact = "/contact"
event = "/events/{id}"
inside-elife = "/inside-elife"
labs-experiment = "/labs/{number}"
podcast = "/podcast"
podcast-episode = "/podcast/episode{number}"
press-pack = "/for-the-press/{id}"
press-packs = "/for-the-press"
privacy = "/privacy"
subject = "/subjects/{id}"
terms = "/terms"

# ---------------------------------------------------------------------------
# Subjects: id -> display name (context labels without a subjects API)
# ---------------------------------------------------------------------------
[subjects]
biochemistry-chemical-biology = "Biochemistry and Chemical Biology"
cell-biology = "Cell Biology"
epidemiology-global-health = "Epidemiology and Global Health"
microbiology-infectious-disease = "Microbiology and Infectious Disease"
neuroscience = "Neuroscience"
"##
}
