//! The in-memory book collection and its query/update semantics.

use std::collections::{BTreeSet, HashSet};

use super::error::{CatalogError, FieldError};
use super::models::{Book, BookPatch, BooksPage, ListQuery};

/// Ordered, id-unique collection of books.
///
/// Insertion order is preserved and is the order `list` returns.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    books: Vec<Book>,
}

impl Catalog {
    /// Build a catalog, rejecting the first repeated id.
    pub fn new(books: Vec<Book>) -> Result<Self, CatalogError> {
        if let Some(id) = first_duplicate_id(&books) {
            return Err(CatalogError::DuplicateId(id.to_string()));
        }
        Ok(Self { books })
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    /// Search titles and authors, then cut out one page.
    pub fn list(&self, query: &ListQuery) -> BooksPage {
        let needle = query.query.to_lowercase();
        let matches: Vec<&Book> = self
            .books
            .iter()
            .filter(|book| needle.is_empty() || matches_query(book, &needle))
            .collect();

        let total = matches.len();
        let books = matches
            .into_iter()
            .skip(query.offset())
            .take(query.limit)
            .cloned()
            .collect();

        BooksPage {
            books,
            total,
            page: query.page,
            limit: query.limit,
        }
    }

    pub fn get(&self, id: &str) -> Result<Book, CatalogError> {
        self.find(id)
            .cloned()
            .ok_or_else(|| CatalogError::NotFound(id.to_string()))
    }

    /// Merge `patch` over the record with `id` and return the result.
    ///
    /// The record is untouched unless the whole patch is valid.
    pub fn update(&mut self, id: &str, patch: BookPatch) -> Result<Book, CatalogError> {
        let book = self
            .books
            .iter_mut()
            .find(|book| book.id == id)
            .ok_or_else(|| CatalogError::NotFound(id.to_string()))?;

        let problems = validate(&patch);
        if !problems.is_empty() {
            return Err(CatalogError::Invalid(problems));
        }

        patch.apply_to(book);
        Ok(book.clone())
    }

    /// Every distinct category across the whole collection, sorted.
    pub fn categories(&self) -> Vec<String> {
        self.books
            .iter()
            .flat_map(|book| book.categories.iter())
            .cloned()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    fn find(&self, id: &str) -> Option<&Book> {
        self.books.iter().find(|book| book.id == id)
    }
}

fn first_duplicate_id(books: &[Book]) -> Option<&str> {
    let mut seen = HashSet::with_capacity(books.len());
    books
        .iter()
        .map(|book| book.id.as_str())
        .find(|id| !seen.insert(*id))
}

fn matches_query(book: &Book, needle: &str) -> bool {
    book.title.to_lowercase().contains(needle) || book.author.to_lowercase().contains(needle)
}

fn validate(patch: &BookPatch) -> Vec<FieldError> {
    let mut problems = Vec::new();

    if patch.title.as_deref().is_some_and(|t| t.trim().is_empty()) {
        problems.push(FieldError::new("title", "required"));
    }
    if patch.author.as_deref().is_some_and(|a| a.trim().is_empty()) {
        problems.push(FieldError::new("author", "required"));
    }
    if let Some(price) = patch.price {
        if !price.is_finite() {
            problems.push(FieldError::new("price", "must_be_finite"));
        } else if price < 0.0 {
            problems.push(FieldError::new("price", "must_be_non_negative"));
        }
    }
    if patch.stock.is_some_and(|stock| stock < 0) {
        problems.push(FieldError::new("stock", "must_be_non_negative"));
    }

    problems
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book(id: &str, title: &str, author: &str, categories: &[&str]) -> Book {
        Book {
            id: id.to_string(),
            title: title.to_string(),
            author: author.to_string(),
            published_year: 2000,
            categories: categories.iter().map(|c| c.to_string()).collect(),
            price: 10.0,
            stock: 1,
            summary: None,
        }
    }

    fn two_books() -> Catalog {
        Catalog::new(vec![
            book("1", "Dune", "Frank Herbert", &["Novel", "SciFi"]),
            book("2", "Clean Code", "Robert Martin", &["CS"]),
        ])
        .unwrap()
    }

    fn numbered(count: usize) -> Catalog {
        Catalog::new(
            (1..=count)
                .map(|i| book(&i.to_string(), &format!("Volume {i}"), "Anon", &["Misc"]))
                .collect(),
        )
        .unwrap()
    }

    fn ids(page: &BooksPage) -> Vec<&str> {
        page.books.iter().map(|b| b.id.as_str()).collect()
    }

    #[test]
    fn search_matches_title_case_insensitively() {
        let catalog = two_books();
        let page = catalog.list(&ListQuery::new("code", 1, 24));

        assert_eq!(ids(&page), vec!["2"]);
        assert_eq!(page.total, 1);
        assert_eq!(page.page, 1);
        assert_eq!(page.limit, 24);
    }

    #[test]
    fn search_matches_author() {
        let catalog = two_books();
        let page = catalog.list(&ListQuery::new("HERBERT", 1, 24));
        assert_eq!(ids(&page), vec!["1"]);
    }

    #[test]
    fn search_without_match_is_empty() {
        let catalog = two_books();
        let page = catalog.list(&ListQuery::new("tolkien", 1, 24));
        assert!(page.books.is_empty());
        assert_eq!(page.total, 0);
    }

    #[test]
    fn empty_query_pages_whole_collection_in_order() {
        let catalog = two_books();
        let page = catalog.list(&ListQuery::new("", 1, 1));

        assert_eq!(ids(&page), vec!["1"]);
        assert_eq!(page.total, 2);

        let page = catalog.list(&ListQuery::new("", 2, 1));
        assert_eq!(ids(&page), vec!["2"]);
    }

    #[test]
    fn page_length_follows_window_arithmetic() {
        let catalog = numbered(50);
        for limit in [1, 7, 24, 50, 60] {
            for page in 1..=8 {
                let result = catalog.list(&ListQuery::new("", page, limit));
                let expected = limit.min(50usize.saturating_sub((page - 1) * limit));
                assert_eq!(result.books.len(), expected, "page {page} limit {limit}");
                assert_eq!(result.total, 50);
            }
        }
    }

    #[test]
    fn out_of_range_page_is_empty_not_an_error() {
        let catalog = numbered(5);
        let page = catalog.list(&ListQuery::new("", 99, 24));
        assert!(page.books.is_empty());
        assert_eq!(page.total, 5);
        assert_eq!(page.page, 99);
    }

    #[test]
    fn get_returns_matching_record() {
        let catalog = two_books();
        assert_eq!(catalog.get("2").unwrap().title, "Clean Code");
    }

    #[test]
    fn get_unknown_id_is_not_found() {
        let catalog = two_books();
        assert_eq!(
            catalog.get("does-not-exist"),
            Err(CatalogError::NotFound("does-not-exist".to_string()))
        );
    }

    #[test]
    fn update_changes_only_supplied_fields() {
        let mut catalog = two_books();
        let before = catalog.get("1").unwrap();

        let updated = catalog
            .update(
                "1",
                BookPatch {
                    price: Some(9.99),
                    ..BookPatch::default()
                },
            )
            .unwrap();

        assert_eq!(updated.price, 9.99);
        assert_eq!(
            updated,
            Book {
                price: 9.99,
                ..before
            }
        );
        assert_eq!(catalog.get("1").unwrap(), updated);
    }

    #[test]
    fn update_is_visible_to_search() {
        let mut catalog = two_books();
        catalog
            .update(
                "1",
                BookPatch {
                    title: Some("Children of Dune".to_string()),
                    ..BookPatch::default()
                },
            )
            .unwrap();

        let page = catalog.list(&ListQuery::new("children", 1, 24));
        assert_eq!(ids(&page), vec!["1"]);
    }

    #[test]
    fn update_unknown_id_leaves_collection_alone() {
        let mut catalog = two_books();
        let err = catalog
            .update(
                "nope",
                BookPatch {
                    stock: Some(3),
                    ..BookPatch::default()
                },
            )
            .unwrap_err();

        assert_eq!(err, CatalogError::NotFound("nope".to_string()));
        assert_eq!(catalog.list(&ListQuery::default()).total, 2);
    }

    #[test]
    fn invalid_patch_is_rejected_whole() {
        let mut catalog = two_books();
        let before = catalog.get("2").unwrap();

        let err = catalog
            .update(
                "2",
                BookPatch {
                    title: Some("   ".to_string()),
                    price: Some(-1.0),
                    stock: Some(-4),
                    summary: Some("kept out".to_string()),
                    ..BookPatch::default()
                },
            )
            .unwrap_err();

        assert_eq!(
            err,
            CatalogError::Invalid(vec![
                FieldError::new("title", "required"),
                FieldError::new("price", "must_be_non_negative"),
                FieldError::new("stock", "must_be_non_negative"),
            ])
        );
        assert_eq!(catalog.get("2").unwrap(), before);
    }

    #[test]
    fn non_finite_price_is_rejected() {
        let mut catalog = two_books();
        let err = catalog
            .update(
                "2",
                BookPatch {
                    price: Some(f64::NAN),
                    ..BookPatch::default()
                },
            )
            .unwrap_err();
        assert_eq!(
            err,
            CatalogError::Invalid(vec![FieldError::new("price", "must_be_finite")])
        );
    }

    #[test]
    fn categories_are_sorted_and_distinct() {
        let catalog = Catalog::new(vec![
            book("1", "Dune", "Frank Herbert", &["SciFi", "Novel", "SciFi"]),
            book("2", "Clean Code", "Robert Martin", &["CS"]),
            book("3", "SPQR", "Mary Beard", &["History", "CS"]),
        ])
        .unwrap();

        assert_eq!(
            catalog.categories(),
            vec!["CS", "History", "Novel", "SciFi"]
        );
    }

    #[test]
    fn categories_follow_updates() {
        let mut catalog = two_books();
        catalog
            .update(
                "2",
                BookPatch {
                    categories: Some(vec!["Craft".to_string()]),
                    ..BookPatch::default()
                },
            )
            .unwrap();
        assert_eq!(catalog.categories(), vec!["Craft", "Novel", "SciFi"]);
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let err = Catalog::new(vec![
            book("1", "Dune", "Frank Herbert", &[]),
            book("1", "Dune Messiah", "Frank Herbert", &[]),
        ])
        .unwrap_err();
        assert_eq!(err, CatalogError::DuplicateId("1".to_string()));
    }
}
