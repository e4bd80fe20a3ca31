use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Reading text per book, falling back to one shared default.
#[derive(Debug, Clone)]
pub struct ContentStore {
    default_text: String,
    texts: HashMap<String, String>,
}

/// A slice of a book's text as shown by the reader.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadingPage {
    pub page: usize,
    pub total_pages: usize,
    pub text: String,
}

impl ContentStore {
    pub fn new(default_text: impl Into<String>) -> Self {
        Self {
            default_text: default_text.into(),
            texts: HashMap::new(),
        }
    }

    pub fn get(&self, id: &str) -> &str {
        self.texts.get(id).unwrap_or(&self.default_text)
    }

    /// Overwrite the text for `id` and return it.
    pub fn replace(&mut self, id: &str, content: String) -> &str {
        self.texts.insert(id.to_string(), content);
        self.get(id)
    }

    /// Cut the text for `id` into pages of `words_per_page` words.
    ///
    /// Whitespace runs collapse to single spaces. There is always at least
    /// one page; a page past the end comes back with empty text.
    pub fn read_page(&self, id: &str, page: usize, words_per_page: usize) -> ReadingPage {
        let words_per_page = words_per_page.max(1);
        let words: Vec<&str> = self.get(id).split_whitespace().collect();
        let total_pages = words.len().div_ceil(words_per_page).max(1);

        let start = page.saturating_sub(1).saturating_mul(words_per_page);
        let text = words
            .iter()
            .skip(start)
            .take(words_per_page)
            .copied()
            .collect::<Vec<_>>()
            .join(" ");

        ReadingPage {
            page,
            total_pages,
            text,
        }
    }
}
