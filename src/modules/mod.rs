pub mod books;
pub mod categories;

use std::sync::Arc;
use std::time::Duration;

use shelf_kernel::{settings::Settings, ModuleRegistry};

/// Register all project-specific modules with the registry
pub fn register_all(registry: &mut ModuleRegistry, settings: &Settings) -> anyhow::Result<()> {
    let books = books::create_module(&settings.catalog)?;
    let categories = categories::CategoriesModule::new(
        books.catalog(),
        Duration::from_millis(settings.catalog.latency_ms),
    );

    registry.register(books);
    registry.register(Arc::new(categories));
    Ok(())
}
