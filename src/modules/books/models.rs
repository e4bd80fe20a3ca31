use serde::{Deserialize, Serialize};

/// Page used when `page` is missing or unparseable.
pub const DEFAULT_PAGE: usize = 1;
/// Page size used when `limit` is missing or unparseable.
pub const DEFAULT_LIMIT: usize = 24;

/// One catalog record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    /// Unique identifier for the book
    pub id: String,
    /// Title of the book
    pub title: String,
    /// Author of the book
    pub author: String,
    /// Year of first publication
    pub published_year: i32,
    /// Categories in display order; duplicates are allowed
    #[serde(default)]
    pub categories: Vec<String>,
    /// Price in the catalog's currency unit
    pub price: f64,
    /// Copies in stock
    pub stock: i64,
    /// Short blurb
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

/// Sparse set of fields to overwrite on an existing record.
///
/// `id` is deliberately absent: it is immutable, and serde drops it along
/// with any other unknown field in the request body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_year: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

impl BookPatch {
    /// Shallow merge: present fields replace the old value wholesale.
    pub fn apply_to(self, book: &mut Book) {
        if let Some(title) = self.title {
            book.title = title;
        }
        if let Some(author) = self.author {
            book.author = author;
        }
        if let Some(published_year) = self.published_year {
            book.published_year = published_year;
        }
        if let Some(categories) = self.categories {
            book.categories = categories;
        }
        if let Some(price) = self.price {
            book.price = price;
        }
        if let Some(stock) = self.stock {
            book.stock = stock;
        }
        if let Some(summary) = self.summary {
            book.summary = Some(summary);
        }
    }
}

/// Search and pagination window for a list request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub query: String,
    pub page: usize,
    pub limit: usize,
}

impl ListQuery {
    /// Zero is not a valid page or limit and falls back to the default.
    pub fn new(query: impl Into<String>, page: usize, limit: usize) -> Self {
        Self {
            query: query.into(),
            page: if page == 0 { DEFAULT_PAGE } else { page },
            limit: if limit == 0 { DEFAULT_LIMIT } else { limit },
        }
    }

    /// Build from raw request strings, substituting defaults for anything
    /// missing, non-numeric, or zero.
    pub fn from_raw(query: Option<&str>, page: Option<&str>, limit: Option<&str>) -> Self {
        Self {
            query: query.unwrap_or_default().to_string(),
            page: parse_positive(page, DEFAULT_PAGE),
            limit: parse_positive(limit, DEFAULT_LIMIT),
        }
    }

    /// Zero-based index of the first record on this page.
    pub fn offset(&self) -> usize {
        self.page.saturating_sub(1).saturating_mul(self.limit)
    }
}

impl Default for ListQuery {
    fn default() -> Self {
        Self::new("", DEFAULT_PAGE, DEFAULT_LIMIT)
    }
}

/// One page of list results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BooksPage {
    pub books: Vec<Book>,
    pub total: usize,
    pub page: usize,
    pub limit: usize,
}

/// Parse a positive integer query parameter, falling back to `default`.
pub fn parse_positive(raw: Option<&str>, default: usize) -> usize {
    raw.and_then(|value| value.trim().parse::<usize>().ok())
        .filter(|value| *value > 0)
        .unwrap_or(default)
}
