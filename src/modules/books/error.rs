use serde::Serialize;
use shelf_http::AppError;
use thiserror::Error;

/// One rejected field in an update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub error: &'static str,
}

impl FieldError {
    pub const fn new(field: &'static str, error: &'static str) -> Self {
        Self { field, error }
    }
}

/// Outcomes of catalog operations that are not a book.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CatalogError {
    #[error("book '{0}' not found")]
    NotFound(String),

    #[error("invalid book fields: {}", describe(.0))]
    Invalid(Vec<FieldError>),

    #[error("duplicate book id '{0}'")]
    DuplicateId(String),
}

fn describe(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| format!("{} {}", e.field, e.error))
        .collect::<Vec<_>>()
        .join(", ")
}

impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::NotFound(_) => AppError::not_found(err.to_string()),
            CatalogError::Invalid(ref fields) => {
                let details = fields
                    .iter()
                    .filter_map(|field| serde_json::to_value(field).ok())
                    .collect();
                AppError::validation(details, err.to_string())
            }
            CatalogError::DuplicateId(_) => AppError::Internal(err.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn invalid_message_lists_fields() {
        let err = CatalogError::Invalid(vec![
            FieldError::new("price", "must_be_non_negative"),
            FieldError::new("title", "required"),
        ]);
        assert_eq!(
            err.to_string(),
            "invalid book fields: price must_be_non_negative, title required"
        );
    }

    #[test]
    fn maps_onto_http_statuses() {
        let not_found: AppError = CatalogError::NotFound("7".to_string()).into();
        assert_eq!(not_found.status(), StatusCode::NOT_FOUND);

        let invalid: AppError =
            CatalogError::Invalid(vec![FieldError::new("stock", "must_be_non_negative")]).into();
        assert_eq!(invalid.status(), StatusCode::UNPROCESSABLE_ENTITY);
        match invalid {
            AppError::Validation { details, .. } => {
                assert_eq!(
                    details,
                    vec![serde_json::json!({"field": "stock", "error": "must_be_non_negative"})]
                );
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }
}
