pub mod catalog;
pub mod content;
pub mod error;
pub mod fixture;
pub mod models;
pub mod routes;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::Router;
use serde_json::json;
use shelf_kernel::{settings::CatalogSettings, InitCtx, Module};
use tokio::sync::RwLock;

use crate::utils;
use catalog::Catalog;
use content::ContentStore;
use routes::BooksState;

/// Books module: the catalog, its reading content, and their HTTP routes
pub struct BooksModule {
    state: BooksState,
}

impl BooksModule {
    pub fn new(catalog: Catalog, content: ContentStore, settings: &CatalogSettings) -> Self {
        Self {
            state: BooksState {
                catalog: Arc::new(RwLock::new(catalog)),
                content: Arc::new(RwLock::new(content)),
                latency: Duration::from_millis(settings.latency_ms),
                words_per_page: settings.words_per_page,
            },
        }
    }

    /// Handle on the shared catalog, for modules that read the same records
    pub fn catalog(&self) -> Arc<RwLock<Catalog>> {
        Arc::clone(&self.state.catalog)
    }
}

#[async_trait]
impl Module for BooksModule {
    fn name(&self) -> &'static str {
        "books"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        let books = self.state.catalog.read().await.len();
        tracing::info!(
            module = self.name(),
            prefix = %utils::log_prefix(self.name()),
            environment = ?ctx.settings.environment,
            books,
            latency_ms = self.state.latency.as_millis() as u64,
            "books module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        routes::router(self.state.clone())
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        Some(openapi_fragment())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "books module stopped");
        Ok(())
    }
}

/// Create the books module from catalog settings
pub fn create_module(settings: &CatalogSettings) -> anyhow::Result<Arc<BooksModule>> {
    let catalog = fixture::load_catalog(settings)?;
    let content = fixture::load_content(settings)?;
    Ok(Arc::new(BooksModule::new(catalog, content, settings)))
}

fn id_param() -> serde_json::Value {
    json!({
        "name": "id",
        "in": "path",
        "required": true,
        "schema": { "type": "string" }
    })
}

fn error_response(description: &str) -> serde_json::Value {
    json!({
        "description": description,
        "content": {
            "application/json": {
                "schema": { "$ref": "#/components/schemas/ErrorResponse" }
            }
        }
    })
}

fn json_response(description: &str, schema: serde_json::Value) -> serde_json::Value {
    json!({
        "description": description,
        "content": { "application/json": { "schema": schema } }
    })
}

fn openapi_fragment() -> serde_json::Value {
    let book_ref = json!({ "$ref": "#/components/schemas/Book" });

    json!({
        "paths": {
            "/": {
                "get": {
                    "summary": "Search and page through books",
                    "tags": ["Books"],
                    "parameters": [
                        { "name": "query", "in": "query", "required": false, "schema": { "type": "string" } },
                        { "name": "_page", "in": "query", "required": false, "schema": { "type": "integer", "default": 1 } },
                        { "name": "_limit", "in": "query", "required": false, "schema": { "type": "integer", "default": 24 } }
                    ],
                    "responses": {
                        "200": json_response("One page of matching books", json!({ "$ref": "#/components/schemas/BooksPage" }))
                    }
                }
            },
            "/health": {
                "get": {
                    "summary": "Books health check",
                    "tags": ["Books"],
                    "responses": {
                        "200": {
                            "description": "OK",
                            "content": { "text/plain": { "schema": { "type": "string" } } }
                        }
                    }
                }
            },
            "/{id}": {
                "get": {
                    "summary": "Get a book",
                    "tags": ["Books"],
                    "parameters": [id_param()],
                    "responses": {
                        "200": json_response("The book", book_ref.clone()),
                        "404": error_response("Book not found")
                    }
                },
                "put": {
                    "summary": "Update some fields of a book",
                    "tags": ["Books"],
                    "parameters": [id_param()],
                    "requestBody": {
                        "required": true,
                        "content": {
                            "application/json": {
                                "schema": { "$ref": "#/components/schemas/BookPatch" }
                            }
                        }
                    },
                    "responses": {
                        "200": json_response("The merged book", book_ref),
                        "400": error_response("Malformed body"),
                        "404": error_response("Book not found"),
                        "422": error_response("Field validation failed")
                    }
                }
            },
            "/{id}/content": {
                "get": {
                    "summary": "Get a book's reading text",
                    "tags": ["Books"],
                    "parameters": [id_param()],
                    "responses": {
                        "200": json_response("Reading text", json!({ "type": "string" })),
                        "404": error_response("Book not found")
                    }
                },
                "put": {
                    "summary": "Replace a book's reading text",
                    "tags": ["Books"],
                    "parameters": [id_param()],
                    "requestBody": {
                        "required": true,
                        "content": {
                            "application/json": {
                                "schema": {
                                    "type": "object",
                                    "properties": { "content": { "type": "string" } },
                                    "required": ["content"]
                                }
                            }
                        }
                    },
                    "responses": {
                        "200": json_response("The stored text", json!({ "type": "string" })),
                        "400": error_response("Malformed body"),
                        "404": error_response("Book not found")
                    }
                }
            },
            "/{id}/read": {
                "get": {
                    "summary": "Read one page of a book",
                    "tags": ["Books"],
                    "parameters": [
                        id_param(),
                        { "name": "page", "in": "query", "required": false, "schema": { "type": "integer", "default": 1 } }
                    ],
                    "responses": {
                        "200": json_response("One page of text", json!({ "$ref": "#/components/schemas/ReadingPage" })),
                        "404": error_response("Book not found")
                    }
                }
            }
        },
        "components": {
            "schemas": {
                "Book": {
                    "type": "object",
                    "properties": {
                        "id": { "type": "string", "description": "Unique identifier for the book" },
                        "title": { "type": "string", "description": "Title of the book" },
                        "author": { "type": "string", "description": "Author of the book" },
                        "publishedYear": { "type": "integer" },
                        "categories": { "type": "array", "items": { "type": "string" } },
                        "price": { "type": "number", "minimum": 0 },
                        "stock": { "type": "integer", "minimum": 0 },
                        "summary": { "type": "string" }
                    },
                    "required": ["id", "title", "author", "publishedYear", "categories", "price", "stock"]
                },
                "BookPatch": {
                    "type": "object",
                    "properties": {
                        "title": { "type": "string" },
                        "author": { "type": "string" },
                        "publishedYear": { "type": "integer" },
                        "categories": { "type": "array", "items": { "type": "string" } },
                        "price": { "type": "number", "minimum": 0 },
                        "stock": { "type": "integer", "minimum": 0 },
                        "summary": { "type": "string" }
                    }
                },
                "BooksPage": {
                    "type": "object",
                    "properties": {
                        "books": { "type": "array", "items": { "$ref": "#/components/schemas/Book" } },
                        "total": { "type": "integer" },
                        "page": { "type": "integer" },
                        "limit": { "type": "integer" }
                    },
                    "required": ["books", "total", "page", "limit"]
                },
                "ReadingPage": {
                    "type": "object",
                    "properties": {
                        "page": { "type": "integer" },
                        "totalPages": { "type": "integer" },
                        "text": { "type": "string" }
                    },
                    "required": ["page", "totalPages", "text"]
                }
            }
        }
    })
}
