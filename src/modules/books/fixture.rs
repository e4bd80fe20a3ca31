//! Startup data: the book fixture and the default reading text.

use std::path::Path;

use anyhow::Context;
use serde::Deserialize;
use shelf_kernel::settings::CatalogSettings;

use super::catalog::Catalog;
use super::content::ContentStore;
use super::models::Book;

const BUNDLED_BOOKS: &str = include_str!("../../../data/books.json");
const BUNDLED_CONTENT: &str = include_str!("../../../data/book_content.txt");

#[derive(Debug, Deserialize)]
struct FixtureFile {
    books: Vec<Book>,
}

/// Parse a `{"books": [...]}` document into a catalog.
pub fn parse_catalog(raw: &str) -> anyhow::Result<Catalog> {
    let fixture: FixtureFile =
        serde_json::from_str(raw).context("book fixture is not valid JSON")?;
    Ok(Catalog::new(fixture.books)?)
}

/// Load the configured fixture, or the bundled one.
pub fn load_catalog(settings: &CatalogSettings) -> anyhow::Result<Catalog> {
    match &settings.fixture_path {
        Some(path) => {
            let raw = read(path)?;
            parse_catalog(&raw).with_context(|| format!("failed to load {}", path.display()))
        }
        None => parse_catalog(BUNDLED_BOOKS).context("bundled book fixture is broken"),
    }
}

/// Load the configured default reading text, or the bundled one.
pub fn load_content(settings: &CatalogSettings) -> anyhow::Result<ContentStore> {
    let text = match &settings.content_path {
        Some(path) => read(path)?,
        None => BUNDLED_CONTENT.to_string(),
    };
    Ok(ContentStore::new(text))
}

fn read(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}
