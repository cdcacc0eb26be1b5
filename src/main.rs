use clap::{Parser, Subcommand, ValueEnum};
use journal_views::config::{self, SiteConfig};
use journal_views::convert::{ConvertContext, ConverterRegistry};
use journal_views::footer::{Clock, FixedClock, FooterFactory, SystemClock};
use journal_views::model::ContentObject;
use journal_views::output;
use journal_views::page_meta::PageMetadata;
use journal_views::picture::PictureBuilderFactory;
use journal_views::routing::UrlGenerator;
use journal_views::subjects::StaticSubjects;
use journal_views::teasers::SecondaryListingTeaserFactory;
use journal_views::view_model::{Link, SeeMoreLink, ViewModelKind};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // clap needs a &'static str; built once per run
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "journal-views")]
#[command(about = "Build presentation view models for the journal site")]
#[command(long_about = "\
Build presentation view models for the journal site

Reads content API JSON from disk and prints the view models the pattern
renderer consumes: listing teasers, carousel items, pictures, the site
footer, and page metadata.

Inputs:

  teasers  listing response      {\"total\": n, \"items\": [{\"type\": ..., ...}]}
  convert  one domain object     {\"type\": \"cover\", \"title\": ..., \"item\": {...}}

Routes and subject names come from config.toml in --config-dir (stock
defaults otherwise). Set RUST_LOG=journal_views=debug for tracing output.

Run 'journal-views gen-config' to generate a documented config.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Directory containing config.toml
    #[arg(long, default_value = ".", global = true)]
    config_dir: PathBuf,

    /// Print a human-readable outline instead of JSON
    #[arg(long, global = true)]
    summary: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Copy, ValueEnum)]
enum ListingKind {
    /// Mixed listing; each item's `type` decides its teaser
    Result,
    /// Events listing
    Events,
    /// Medium articles feed
    Medium,
}

#[derive(Clone, Copy, ValueEnum)]
enum KindArg {
    CarouselItem,
    Teaser,
    Picture,
}

impl From<KindArg> for ViewModelKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::CarouselItem => ViewModelKind::CarouselItem,
            KindArg::Teaser => ViewModelKind::Teaser,
            KindArg::Picture => ViewModelKind::Picture,
        }
    }
}

#[derive(Subcommand)]
enum Command {
    #[command(flatten)]
    Build(BuildCommand),
    /// Print a stock config.toml with all options documented
    GenConfig,
}

/// Commands that read config.toml and build view models.
#[derive(Subcommand)]
enum BuildCommand {
    /// Build listing teasers from a listing response
    Teasers {
        /// Listing JSON file
        file: PathBuf,
        #[arg(long, value_enum, default_value = "result")]
        kind: ListingKind,
        /// Heading shown above the teasers
        #[arg(long)]
        heading: Option<String>,
        /// URL of a "see more" link after the teasers
        #[arg(long)]
        see_more: Option<String>,
        /// Text of the "see more" link
        #[arg(long, default_value = "See more")]
        see_more_label: String,
    },
    /// Convert one domain object into a view model
    Convert {
        /// Domain object JSON file
        file: PathBuf,
        /// Desired view model; first matching converter if omitted
        #[arg(long = "as", value_enum)]
        kind: Option<KindArg>,
        /// Display width hint for pictures
        #[arg(long)]
        width: Option<u32>,
        /// Display height hint for pictures
        #[arg(long)]
        height: Option<u32>,
    },
    /// Build the site footer
    Footer {
        /// Pretend today is this date (YYYY-MM-DD)
        #[arg(long)]
        today: Option<chrono::NaiveDate>,
    },
    /// Print page metadata tags for a route
    Meta {
        /// Page title
        title: String,
        /// Route name, e.g. press-packs
        route: String,
        /// Route parameter as NAME=VALUE (repeatable)
        #[arg(long = "param", value_parser = parse_param)]
        params: Vec<(String, String)>,
        #[arg(long)]
        description: Option<String>,
    },
}

fn parse_param(s: &str) -> Result<(String, String), String> {
    s.split_once('=')
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .ok_or_else(|| format!("expected NAME=VALUE, got '{s}'"))
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::GenConfig => print!("{}", config::stock_config_toml()),
        Command::Build(command) => {
            let site_config = config::load_config(&cli.config_dir)?;
            run(command, &site_config, cli.summary).await?;
        }
    }

    Ok(())
}

async fn run(
    command: BuildCommand,
    site_config: &SiteConfig,
    summary: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let urls: Arc<dyn UrlGenerator> = Arc::new(site_config.route_table());

    match command {
        BuildCommand::Teasers {
            file,
            kind,
            heading,
            see_more,
            see_more_label,
        } => {
            let result = read_json(&file)?;
            let subjects = Arc::new(StaticSubjects::new(site_config.subjects.clone()));
            let factory = SecondaryListingTeaserFactory::new(urls, subjects);
            let see_more = see_more.map(|url| SeeMoreLink::new(Link::new(see_more_label, url)));

            let listing = match kind {
                ListingKind::Result => factory.for_result(&result, heading, see_more).await?,
                ListingKind::Events => factory.for_events(&result, heading, see_more).await?,
                ListingKind::Medium => {
                    factory
                        .for_medium_articles(&result, heading, see_more)
                        .await?
                }
            };
            emit(summary, &listing, output::print_listing)?;
        }
        BuildCommand::Convert {
            file,
            kind,
            width,
            height,
        } => {
            let object: ContentObject = serde_json::from_value(read_json(&file)?)?;
            let registry = ConverterRegistry::standard(urls, PictureBuilderFactory);
            let context = ConvertContext { width, height };
            let model = registry.convert(&object, kind.map(Into::into), &context)?;
            emit(summary, &model, output::print_view_model)?;
        }
        BuildCommand::Footer { today } => {
            let clock: Arc<dyn Clock> = match today {
                Some(date) => Arc::new(FixedClock(date)),
                None => Arc::new(SystemClock),
            };
            let factory = FooterFactory::new(
                urls,
                PictureBuilderFactory,
                clock,
                site_config.footer.clone(),
            );
            emit(summary, &factory.create_footer(), output::print_footer)?;
        }
        BuildCommand::Meta {
            title,
            route,
            params,
            description,
        } => {
            let params: Vec<(&str, &str)> = params
                .iter()
                .map(|(k, v)| (k.as_str(), v.as_str()))
                .collect();
            ensure_route(site_config, &route, &params)?;
            let mut page = PageMetadata::for_route(urls.as_ref(), title, &route, &params);
            if let Some(description) = description {
                page = page.with_description(description);
            }
            emit(summary, &page.tags(&site_config.site), output::print_page_tags)?;
        }
    }

    Ok(())
}

/// Check a route can be generated; `RouteTable` panics otherwise.
fn ensure_route(
    config: &SiteConfig,
    route: &str,
    params: &[(&str, &str)],
) -> Result<(), Box<dyn std::error::Error>> {
    let table = config.route_table();
    if !table.contains(route) {
        return Err(format!("unknown route '{route}'").into());
    }
    match table.missing_param(route, params) {
        Some(name) => Err(format!("route '{route}' needs --param {name}=VALUE").into()),
        None => Ok(()),
    }
}

fn read_json(path: &Path) -> Result<serde_json::Value, Box<dyn std::error::Error>> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

fn emit<T: Serialize>(
    summary: bool,
    value: &T,
    print: fn(&T),
) -> Result<(), Box<dyn std::error::Error>> {
    if summary {
        print(value);
    } else {
        println!("{}", serde_json::to_string_pretty(value)?);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Command {
        let argv = std::iter::once("journal-views").chain(args.iter().copied());
        Cli::try_parse_from(argv).unwrap().command
    }

    #[test]
    fn gen_config_needs_no_site_config() {
        assert!(matches!(parse(&["gen-config"]), Command::GenConfig));
    }

    #[test]
    fn build_commands_parse_at_top_level() {
        assert!(matches!(
            parse(&["footer", "--today", "2017-01-15"]),
            Command::Build(BuildCommand::Footer { today: Some(_) })
        ));
        assert!(matches!(
            parse(&["meta", "Podcast", "podcast-episode", "--param", "number=29"]),
            Command::Build(BuildCommand::Meta { ref params, .. }) if params.len() == 1
        ));
    }

    #[test]
    fn ensure_route_reports_unknown_routes_and_missing_params() {
        let config = SiteConfig::default();
        assert!(ensure_route(&config, "podcast", &[]).is_ok());
        assert!(ensure_route(&config, "podcast-episode", &[("number", "29")]).is_ok());

        let err = ensure_route(&config, "nope", &[]).unwrap_err();
        assert_eq!(err.to_string(), "unknown route 'nope'");
        let err = ensure_route(&config, "podcast-episode", &[]).unwrap_err();
        assert_eq!(err.to_string(), "route 'podcast-episode' needs --param number=VALUE");
    }
}
