//! HTTP handlers for the books module.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use shelf_http::AppError;
use tokio::sync::RwLock;

use super::catalog::Catalog;
use super::content::{ContentStore, ReadingPage};
use super::models::{parse_positive, Book, BookPatch, BooksPage, ListQuery, DEFAULT_PAGE};
use crate::utils;

/// Shared state behind every books handler.
#[derive(Clone)]
pub struct BooksState {
    pub catalog: Arc<RwLock<Catalog>>,
    pub content: Arc<RwLock<ContentStore>>,
    pub latency: Duration,
    pub words_per_page: usize,
}

/// Raw list parameters. Values stay strings so bad numbers fall back to
/// defaults instead of rejecting the request.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub query: Option<String>,
    #[serde(rename = "_page", alias = "page")]
    pub page: Option<String>,
    #[serde(rename = "_limit", alias = "limit")]
    pub limit: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ReadParams {
    pub page: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ContentUpdate {
    pub content: String,
}

pub fn router(state: BooksState) -> Router {
    Router::new()
        .route("/", get(list_books))
        .route("/health", get(health_check))
        .route("/{id}", get(get_book).put(update_book).patch(update_book))
        .route("/{id}/content", get(get_content).put(replace_content))
        .route("/{id}/read", get(read_content))
        .with_state(state)
}

/// Artificial network delay, zero unless configured.
pub async fn simulate_latency(latency: Duration) {
    if !latency.is_zero() {
        tokio::time::sleep(latency).await;
    }
}

async fn health_check() -> &'static str {
    "books module is healthy"
}

async fn list_books(
    State(state): State<BooksState>,
    Query(params): Query<ListParams>,
) -> Json<BooksPage> {
    simulate_latency(state.latency).await;

    let query = ListQuery::from_raw(
        params.query.as_deref(),
        params.page.as_deref(),
        params.limit.as_deref(),
    );
    let page = state.catalog.read().await.list(&query);

    tracing::debug!(
        query = %query.query,
        page = query.page,
        limit = query.limit,
        total = page.total,
        "listed books"
    );
    Json(page)
}

async fn get_book(
    State(state): State<BooksState>,
    Path(id): Path<String>,
) -> Result<Json<Book>, AppError> {
    simulate_latency(state.latency).await;
    let book = state.catalog.read().await.get(&id)?;
    Ok(Json(book))
}

async fn update_book(
    State(state): State<BooksState>,
    Path(id): Path<String>,
    body: Result<Json<BookPatch>, JsonRejection>,
) -> Result<Json<Book>, AppError> {
    let Json(patch) = body.map_err(|rejection| AppError::bad_request(rejection.body_text()))?;
    simulate_latency(state.latency).await;

    let book = state.catalog.write().await.update(&id, patch)?;
    tracing::info!(prefix = %utils::log_prefix("books"), book_id = %id, "book updated");
    Ok(Json(book))
}

/// Reading text only exists for books in the catalog.
async fn ensure_known(state: &BooksState, id: &str) -> Result<(), AppError> {
    state.catalog.read().await.get(id)?;
    Ok(())
}

async fn get_content(
    State(state): State<BooksState>,
    Path(id): Path<String>,
) -> Result<Json<String>, AppError> {
    simulate_latency(state.latency).await;
    ensure_known(&state, &id).await?;
    Ok(Json(state.content.read().await.get(&id).to_string()))
}

async fn replace_content(
    State(state): State<BooksState>,
    Path(id): Path<String>,
    body: Result<Json<ContentUpdate>, JsonRejection>,
) -> Result<Json<String>, AppError> {
    let Json(update) = body.map_err(|rejection| AppError::bad_request(rejection.body_text()))?;
    simulate_latency(state.latency).await;
    ensure_known(&state, &id).await?;

    let mut content = state.content.write().await;
    let stored = content.replace(&id, update.content).to_string();
    tracing::info!(
        prefix = %utils::log_prefix("books"),
        book_id = %id,
        chars = stored.chars().count(),
        "book content replaced"
    );
    Ok(Json(stored))
}

async fn read_content(
    State(state): State<BooksState>,
    Path(id): Path<String>,
    Query(params): Query<ReadParams>,
) -> Result<Json<ReadingPage>, AppError> {
    simulate_latency(state.latency).await;
    ensure_known(&state, &id).await?;

    let page = parse_positive(params.page.as_deref(), DEFAULT_PAGE);
    Ok(Json(
        state
            .content
            .read()
            .await
            .read_page(&id, page, state.words_per_page),
    ))
}
