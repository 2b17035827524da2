use crate::types::DbId;

/// Domain-level errors shared across the service.
///
/// Draw-specific failures have their own taxonomy in
/// [`crate::draw::DrawError`]; this type covers generic CRUD conditions.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
