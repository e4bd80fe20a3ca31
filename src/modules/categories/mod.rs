use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::{extract::State, routing::get, Json, Router};
use serde_json::json;
use shelf_kernel::Module;
use tokio::sync::RwLock;

use super::books::catalog::Catalog;
use super::books::routes::simulate_latency;

#[derive(Clone)]
struct CategoriesState {
    catalog: Arc<RwLock<Catalog>>,
    latency: Duration,
}

/// Categories module: the distinct category names across the shared catalog
pub struct CategoriesModule {
    state: CategoriesState,
}

impl CategoriesModule {
    pub fn new(catalog: Arc<RwLock<Catalog>>, latency: Duration) -> Self {
        Self {
            state: CategoriesState { catalog, latency },
        }
    }
}

#[async_trait]
impl Module for CategoriesModule {
    fn name(&self) -> &'static str {
        "categories"
    }

    fn routes(&self) -> Router {
        Router::new()
            .route("/", get(list_categories))
            .with_state(self.state.clone())
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        Some(json!({
            "paths": {
                "/": {
                    "get": {
                        "summary": "List every category in the catalog",
                        "tags": ["Categories"],
                        "responses": {
                            "200": {
                                "description": "Sorted, de-duplicated category names",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "type": "array",
                                            "items": { "type": "string" }
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }))
    }
}

async fn list_categories(State(state): State<CategoriesState>) -> Json<Vec<String>> {
    simulate_latency(state.latency).await;
    Json(state.catalog.read().await.categories())
}
