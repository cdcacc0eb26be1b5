//! Site footer: navigation menu and investor logos.
//!
//! The footer is a pure function of the current date and static config. The
//! only date-dependent part is the "Monthly archive" link, which points at
//! the current year except in January, when the new year's archive is still
//! empty and the link targets the previous year instead.

use crate::config::FooterConfig;
use crate::picture::{PictureBuilderFactory, SVG, extension_for};
use crate::routing::UrlGenerator;
use crate::view_model::{Footer, InvestorLogo, Link};
use chrono::{Datelike, Local, NaiveDate};
use std::sync::Arc;
use tracing::debug;

/// Source of "today" for date-dependent view models.
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// Server local time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Always returns the same date.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

/// `(display name, asset slug)` for every investor, in display order.
const INVESTORS: [(&str, &str); 4] = [
    ("Howard Hughes Medical Institute", "hhmi"),
    ("Wellcome Trust", "wellcome"),
    ("Max-Planck-Gesellschaft", "max"),
    ("Knut and Alice Wallenberg Foundation", "kaw"),
];

/// Year the "Monthly archive" link targets on `today`.
pub fn archive_year(today: NaiveDate) -> i32 {
    if today.month() == 1 {
        today.year() - 1
    } else {
        today.year()
    }
}

pub struct FooterFactory {
    urls: Arc<dyn UrlGenerator>,
    pictures: PictureBuilderFactory,
    clock: Arc<dyn Clock>,
    config: FooterConfig,
}

impl FooterFactory {
    pub fn new(
        urls: Arc<dyn UrlGenerator>,
        pictures: PictureBuilderFactory,
        clock: Arc<dyn Clock>,
        config: FooterConfig,
    ) -> Self {
        Self {
            urls,
            pictures,
            clock,
            config,
        }
    }

    pub fn create_footer(&self) -> Footer {
        let year = archive_year(self.clock.today());
        debug!(archive_year = year, "building footer");

        Footer {
            footer_menu_links: self.menu_links(year),
            investors: self.investor_logos(),
        }
    }

    fn menu_links(&self, archive_year: i32) -> Vec<Link> {
        let year = archive_year.to_string();
        vec![
            Link::new("About", self.urls.generate("about", &[])),
            Link::new("For the press", self.urls.generate("press-packs", &[])),
            Link::new("Monthly archive", self.urls.generate("archive-year", &[("year", &year)])),
            Link::new("Contact", self.urls.generate("contact", &[])),
            Link::new("Terms and conditions", self.urls.generate("terms", &[])),
            Link::new("Privacy notice", self.urls.generate("privacy", &[])),
        ]
    }

    fn investor_logos(&self) -> Vec<InvestorLogo> {
        INVESTORS
            .iter()
            .map(|&(name, slug)| {
                let path = self.config.investor_logo_path.trim_end_matches('/').to_string();
                let picture = self
                    .pictures
                    .create(
                        move |media_type: &str, width: Option<u32>, _height: Option<u32>| {
                            let extension = extension_for(media_type).unwrap_or("png");
                            match (media_type, width) {
                                (SVG, _) | (_, None) => format!("{path}/{slug}.{extension}"),
                                (_, Some(w)) => format!("{path}/{slug}-{w}.{extension}"),
                            }
                        },
                        SVG,
                        Some(self.config.investor_logo_width),
                        None,
                        name,
                    )
                    .build();
                InvestorLogo {
                    name: name.to_string(),
                    picture,
                }
            })
            .collect()
    }
}
