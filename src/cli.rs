//! Command-line front-end.
//!
//! ```text
//! ledcat search "fine pitch" --sort price --order desc
//! ledcat --session state.json saved save cheap-outdoor --category Outdoor --price 0-1000
//! ledcat --session state.json saved run cheap-outdoor --format csv
//! ```
use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::info;

use crate::config::LedcatConfig;
use crate::{
    Catalog, CatalogService, ProductId, Query, QueryParams, SearchResult, SessionState,
    SessionStore, export_csv, fixtures,
};

/// Search the LED display product catalog.
#[derive(Debug, Parser)]
#[command(name = "ledcat")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to a YAML configuration file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// JSON catalog file (defaults to the built-in product fixtures).
    #[arg(long, global = true)]
    pub catalog: Option<PathBuf>,

    /// Session file for search history and saved searches.
    #[arg(long, global = true)]
    pub session: Option<PathBuf>,

    /// Emit logs as JSON.
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Filter, sort, and page through the catalog.
    Search {
        #[command(flatten)]
        args: SearchArgs,

        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// Show or clear recent searches.
    History {
        #[arg(long)]
        clear: bool,
    },

    /// Manage saved searches.
    Saved {
        #[command(subcommand)]
        action: SavedAction,
    },

    /// Manage favorite products.
    Favorites {
        #[command(subcommand)]
        action: FavoriteAction,
    },
}

#[derive(Debug, Subcommand)]
pub enum FavoriteAction {
    /// List favorite products.
    List,

    /// Star a product, or unstar it if already starred.
    Toggle { id: String },

    /// Unstar a product.
    Remove { id: String },
}

#[derive(Debug, Subcommand)]
pub enum SavedAction {
    /// List saved searches.
    List,

    /// Save a search under a name.
    Save {
        name: String,

        #[command(flatten)]
        args: SearchArgs,
    },

    /// Run a saved search.
    Run {
        name: String,

        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// Delete a saved search.
    Delete { name: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
}

/// Search inputs, kept as strings so parsing follows [`QueryParams`].
#[derive(Debug, Clone, Default, Args)]
pub struct SearchArgs {
    /// Free-text search term.
    pub text: Option<String>,

    #[arg(long)]
    pub category: Option<String>,

    /// Range such as `1-2`, `3+`, or a single pitch like `1.25mm`.
    #[arg(long)]
    pub pixel_pitch: Option<String>,

    /// Range such as `1000-3000` or `5000+`.
    #[arg(long)]
    pub brightness: Option<String>,

    /// Range such as `0-1000` or `3000+`.
    #[arg(long)]
    pub price: Option<String>,

    /// Comma-separated applications; any may match.
    #[arg(long)]
    pub application: Option<String>,

    /// Comma-separated features; all must match.
    #[arg(long)]
    pub features: Option<String>,

    /// small, medium, or large.
    #[arg(long)]
    pub size: Option<String>,

    /// name, price, category, pixelPitch, or brightness.
    #[arg(long)]
    pub sort: Option<String>,

    /// asc or desc.
    #[arg(long)]
    pub order: Option<String>,

    #[arg(long, allow_hyphen_values = true)]
    pub page: Option<String>,

    #[arg(long, allow_hyphen_values = true)]
    pub page_size: Option<String>,
}

impl From<SearchArgs> for QueryParams {
    fn from(args: SearchArgs) -> Self {
        QueryParams {
            q: args.text,
            category: args.category,
            pixel_pitch: args.pixel_pitch,
            brightness: args.brightness,
            price: args.price,
            application: args.application,
            features: args.features,
            size: args.size,
            sort: args.sort,
            order: args.order,
            page: args.page,
            page_size: args.page_size,
        }
    }
}

struct Runtime {
    service: CatalogService,
    store: Option<SessionStore>,
}

impl Runtime {
    fn load(cli: &Cli) -> Result<Self> {
        let config = match &cli.config {
            Some(path) => LedcatConfig::from_file(path)
                .with_context(|| format!("loading config {}", path.display()))?,
            None => LedcatConfig::default(),
        };

        let catalog_cfg = config.catalog_config()?;
        let catalog = match cli.catalog.as_ref().or(config.catalog.path.as_ref()) {
            Some(path) => Catalog::from_path(path, &catalog_cfg)
                .with_context(|| format!("loading catalog {}", path.display()))?,
            None => fixtures::canonical_catalog(),
        };
        info!(products = catalog.len(), "catalog_loaded");

        let store = cli
            .session
            .clone()
            .or_else(|| config.session.path.clone())
            .map(|path| SessionStore::new(path, config.session_config()));

        Ok(Self {
            service: CatalogService::with_config(catalog, config.query),
            store,
        })
    }

    fn query(&self, args: SearchArgs) -> Result<Query> {
        let params = QueryParams::from(args);
        Ok(params.into_query(self.service.query_config().default_page_size())?)
    }

    fn session(&self) -> Result<(&SessionStore, SessionState)> {
        let Some(store) = &self.store else {
            bail!("no session file configured; pass --session or set session.path");
        };
        Ok((store, store.load()?))
    }
}

/// Execute a parsed command, writing its output to `out`.
pub fn run<W: Write>(cli: Cli, out: &mut W) -> Result<()> {
    let ctx = Runtime::load(&cli)?;

    match cli.command {
        Command::Search { args, format } => {
            let query = ctx.query(args)?;
            let result = ctx.service.search(&query)?;
            if let Some(store) = &ctx.store {
                let mut state = store.load()?;
                if state.history.record(&query).is_some() {
                    store.save(&state)?;
                }
            }
            render(&result, format, out)?;
        }

        Command::History { clear } => {
            let (store, mut state) = ctx.session()?;
            if clear {
                state.history.clear();
                store.save(&state)?;
                writeln!(out, "search history cleared")?;
            } else if state.history.is_empty() {
                writeln!(out, "no searches recorded")?;
            } else {
                for entry in state.history.entries() {
                    writeln!(
                        out,
                        "{}  {:<8}  {}",
                        entry.recorded_at.format("%Y-%m-%d %H:%M:%S"),
                        entry.kind.as_str(),
                        serde_json::to_string(&entry.query)?
                    )?;
                }
            }
        }

        Command::Saved { action } => match action {
            SavedAction::List => {
                let (_, state) = ctx.session()?;
                if state.saved.is_empty() {
                    writeln!(out, "no saved searches")?;
                }
                for saved in state.saved.list() {
                    writeln!(
                        out,
                        "{}  {}  {}",
                        saved.name,
                        saved.saved_at.format("%Y-%m-%d"),
                        saved.id
                    )?;
                }
            }
            SavedAction::Save { name, args } => {
                let query = ctx.query(args)?;
                let (store, mut state) = ctx.session()?;
                let saved = state.saved.save(&name, query)?.clone();
                store.save(&state)?;
                writeln!(out, "saved search {:?} ({})", saved.name, saved.id)?;
            }
            SavedAction::Run { name, format } => {
                let (_, state) = ctx.session()?;
                let Some(saved) = state.saved.find_by_name(&name) else {
                    bail!("no saved search named {name:?}");
                };
                let result = ctx.service.search(&saved.query)?;
                render(&result, format, out)?;
            }
            SavedAction::Delete { name } => {
                let (store, mut state) = ctx.session()?;
                let Some(id) = state.saved.find_by_name(&name).map(|s| s.id) else {
                    bail!("no saved search named {name:?}");
                };
                state.saved.delete(id);
                store.save(&state)?;
                writeln!(out, "deleted saved search {name:?}")?;
            }
        },

        Command::Favorites { action } => match action {
            FavoriteAction::List => {
                let (_, state) = ctx.session()?;
                if state.favorites.is_empty() {
                    writeln!(out, "no favorites")?;
                }
                for favorite in state.favorites.list() {
                    writeln!(
                        out,
                        "{}  {}  {}  {}",
                        favorite.id,
                        favorite.name,
                        favorite.price,
                        favorite.added_at.format("%Y-%m-%d")
                    )?;
                }
            }
            FavoriteAction::Toggle { id } => {
                let catalog = ctx.service.snapshot();
                let Some(product) = catalog.get(&id) else {
                    bail!("no product with id {id:?}");
                };
                let (store, mut state) = ctx.session()?;
                let starred = state.favorites.toggle(product);
                store.save(&state)?;
                if starred {
                    writeln!(out, "added {:?} to favorites", product.name)?;
                } else {
                    writeln!(out, "removed {:?} from favorites", product.name)?;
                }
            }
            FavoriteAction::Remove { id } => {
                let (store, mut state) = ctx.session()?;
                if !state.favorites.remove(&ProductId::new(id.as_str())) {
                    bail!("{id:?} is not a favorite");
                }
                store.save(&state)?;
                writeln!(out, "removed {id:?} from favorites")?;
            }
        },
    }

    Ok(())
}

fn render<W: Write>(result: &SearchResult, format: OutputFormat, out: &mut W) -> Result<()> {
    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, result)?;
            writeln!(out)?;
        }
        OutputFormat::Csv => export_csv(&result.items, &mut *out)?,
        OutputFormat::Table => render_table(result, out)?,
    }
    Ok(())
}

fn render_table<W: Write>(result: &SearchResult, out: &mut W) -> Result<()> {
    if result.is_empty() {
        writeln!(out, "0 products found")?;
        return Ok(());
    }

    writeln!(
        out,
        "{:<32} {:<12} {:>8} {:>9} {:>9}  {}",
        "NAME", "CATEGORY", "PITCH", "NITS", "PRICE", "SIZE"
    )?;
    for p in &result.items {
        writeln!(
            out,
            "{:<32} {:<12} {:>6}mm {:>9} {:>9}  {}",
            p.name, p.category, p.pixel_pitch, p.brightness, p.price, p.size
        )?;
    }

    let noun = if result.total_matches == 1 { "product" } else { "products" };
    writeln!(
        out,
        "{} {noun} found, page {} of {}",
        result.total_matches, result.page, result.total_pages
    )?;

    let window = result.window(2);
    if !window.is_hidden() {
        let mut links = Vec::new();
        if let Some(prev) = window.previous {
            links.push(format!("< {prev}"));
        }
        if let Some(first) = window.first {
            links.push(first.to_string());
        }
        if window.leading_gap {
            links.push("...".into());
        }
        for page in &window.pages {
            if *page == result.page {
                links.push(format!("[{page}]"));
            } else {
                links.push(page.to_string());
            }
        }
        if window.trailing_gap {
            links.push("...".into());
        }
        if let Some(last) = window.last {
            links.push(last.to_string());
        }
        if let Some(next) = window.next {
            links.push(format!("{next} >"));
        }
        writeln!(out, "{}", links.join(" "))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_args(args: &[&str]) -> Result<String> {
        let cli = Cli::try_parse_from(std::iter::once("ledcat").chain(args.iter().copied()))?;
        let mut out = Vec::new();
        run(cli, &mut out)?;
        Ok(String::from_utf8(out)?)
    }

    #[test]
    fn search_renders_a_table() {
        let out = run_args(&["search", "--category", "Outdoor", "--sort", "price"]).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert!(lines[0].starts_with("NAME"));
        assert!(lines[1].starts_with("P6 Outdoor LED Display"));
        assert!(lines[2].starts_with("P4 Outdoor LED Display"));
        assert_eq!(lines[3], "2 products found, page 1 of 1");
    }

    #[test]
    fn search_renders_pagination_links() {
        let out = run_args(&["search", "--page-size", "2", "--page", "2"]).unwrap();
        assert!(out.contains("page 2 of 3"));
        assert!(out.lines().last().unwrap().contains("[2]"));
    }

    #[test]
    fn search_json_output_parses() {
        let out = run_args(&["search", "fine pitch", "--format", "json"]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["totalMatches"], 2);
    }

    #[test]
    fn invalid_page_size_is_an_error() {
        let err = run_args(&["search", "--page-size", "-3"]).unwrap_err();
        assert!(err.to_string().contains("page_size"));
    }

    #[test]
    fn history_requires_a_session() {
        assert!(run_args(&["history"]).is_err());
    }

    #[test]
    fn saved_search_lifecycle() {
        let dir = tempfile::tempdir().unwrap();
        let session = dir.path().join("session.json");
        let session = session.to_str().unwrap();

        run_args(&["--session", session, "saved", "save", "cheap", "--price", "0-1000"]).unwrap();
        let listed = run_args(&["--session", session, "saved", "list"]).unwrap();
        assert!(listed.starts_with("cheap  "));

        let csv = run_args(&["--session", session, "saved", "run", "cheap", "--format", "csv"])
            .unwrap();
        assert_eq!(csv.lines().count(), 3, "header plus P4 and P6");

        run_args(&["--session", session, "saved", "delete", "cheap"]).unwrap();
        assert!(run_args(&["--session", session, "saved", "run", "cheap"]).is_err());
    }

    #[test]
    fn searches_are_recorded_in_history() {
        let dir = tempfile::tempdir().unwrap();
        let session = dir.path().join("session.json");
        let session = session.to_str().unwrap();

        run_args(&["--session", session, "search", "rental"]).unwrap();
        run_args(&["--session", session, "search"]).unwrap();
        let history = run_args(&["--session", session, "history"]).unwrap();
        assert_eq!(history.lines().count(), 1);
        assert!(history.contains("quick"));

        run_args(&["--session", session, "history", "--clear"]).unwrap();
        let history = run_args(&["--session", session, "history"]).unwrap();
        assert_eq!(history.trim(), "no searches recorded");
    }

    #[test]
    fn favorites_toggle_and_persist() {
        let dir = tempfile::tempdir().unwrap();
        let session = dir.path().join("session.json");
        let session = session.to_str().unwrap();

        let added = run_args(&["--session", session, "favorites", "toggle", "p4-outdoor"]).unwrap();
        assert!(added.starts_with("added"));
        run_args(&["--session", session, "favorites", "toggle", "p3-rental"]).unwrap();

        let listed = run_args(&["--session", session, "favorites", "list"]).unwrap();
        let ids: Vec<&str> = listed.lines().filter_map(|l| l.split("  ").next()).collect();
        assert_eq!(ids, vec!["p4-outdoor", "p3-rental"]);

        let removed = run_args(&["--session", session, "favorites", "toggle", "p4-outdoor"]).unwrap();
        assert!(removed.starts_with("removed"));
        run_args(&["--session", session, "favorites", "remove", "p3-rental"]).unwrap();
        let listed = run_args(&["--session", session, "favorites", "list"]).unwrap();
        assert_eq!(listed.trim(), "no favorites");

        assert!(run_args(&["--session", session, "favorites", "toggle", "no-such-id"]).is_err());
        assert!(run_args(&["--session", session, "favorites", "remove", "p3-rental"]).is_err());
    }
}
