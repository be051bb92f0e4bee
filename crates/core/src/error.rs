#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Data integrity failure: {0}")]
    DataIntegrity(String),

    #[error("I/O error: {0}")]
    Io(String),
}

impl CoreError {
    /// Shorthand for a not-found error on a site identifier.
    pub fn site_not_found(id: impl Into<String>) -> Self {
        CoreError::NotFound {
            entity: "Site",
            id: id.into(),
        }
    }
}
