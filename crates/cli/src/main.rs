use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use shelf_app::modules::books::fixture;
use shelf_app::ListQuery;
use shelf_kernel::settings::Settings;

/// Serve the Shelf catalog API or query a catalog fixture offline.
#[derive(Debug, Parser)]
#[command(name = "shelf", version, about)]
struct Cli {
    /// Book fixture to load instead of the configured one
    #[arg(long, global = true, value_name = "PATH")]
    fixture: Option<PathBuf>,

    /// Reading text to use instead of the configured one
    #[arg(long, global = true, value_name = "PATH")]
    content: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the HTTP API until interrupted
    Serve,
    /// Search and page through books
    List(ListArgs),
    /// Show one book
    Show {
        /// Book id
        id: String,
    },
    /// List every category, sorted
    Categories,
    /// Print one page of a book's reading text
    Read {
        /// Book id
        id: String,
        #[arg(long, default_value_t = 1)]
        page: usize,
        /// Overrides the configured page size
        #[arg(long)]
        words_per_page: Option<usize>,
    },
}

#[derive(Debug, Args)]
struct ListArgs {
    /// Case-insensitive title/author substring
    #[arg(long, short, default_value = "")]
    query: String,
    #[arg(long, default_value_t = 1)]
    page: usize,
    #[arg(long, default_value_t = 24)]
    limit: usize,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut settings = Settings::load().with_context(|| "failed to load Shelf settings")?;
    if let Some(path) = cli.fixture {
        settings.catalog.fixture_path = Some(path);
    }
    if let Some(path) = cli.content {
        settings.catalog.content_path = Some(path);
    }
    shelf_telemetry::init(&settings.telemetry)?;
    tracing::debug!(command = ?cli.command, fixture = ?settings.catalog.fixture_path, "running command");

    match cli.command {
        Command::Serve => serve(settings),
        Command::List(args) => {
            let catalog = fixture::load_catalog(&settings.catalog)?;
            print_json(&catalog.list(&ListQuery::new(args.query, args.page, args.limit)))
        }
        Command::Show { id } => {
            let catalog = fixture::load_catalog(&settings.catalog)?;
            print_json(&catalog.get(&id)?)
        }
        Command::Categories => {
            let catalog = fixture::load_catalog(&settings.catalog)?;
            print_json(&catalog.categories())
        }
        Command::Read {
            id,
            page,
            words_per_page,
        } => {
            let catalog = fixture::load_catalog(&settings.catalog)?;
            // Only known books have reading text.
            catalog.get(&id)?;
            let content = fixture::load_content(&settings.catalog)?;
            let words = words_per_page.unwrap_or(settings.catalog.words_per_page);
            print_json(&content.read_page(&id, page, words))
        }
    }
}

fn serve(settings: Settings) -> anyhow::Result<()> {
    let runtime = tokio::runtime::Runtime::new().context("failed to start tokio runtime")?;
    runtime.block_on(shelf_app::run(settings))
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let rendered = serde_json::to_string_pretty(value).context("failed to render JSON")?;
    println!("{rendered}");
    Ok(())
}
