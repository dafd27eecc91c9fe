use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("malformed identifier: {0}")]
    MalformedId(String),
    #[error("validation error: {0}")]
    Validation(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("database error: {0}")]
    Db(String),
    #[error("model error: {0}")]
    Model(#[from] models::errors::ModelError),
}

impl ServiceError {
    pub fn not_found(entity: &str) -> Self { Self::NotFound(format!("{} not found", entity)) }

    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            ServiceError::MalformedId(_) => 1001,
            ServiceError::Validation(_) => 1002,
            ServiceError::Model(models::errors::ModelError::Validation(_)) => 1002,
            ServiceError::NotFound(_) => 1003,
            ServiceError::Db(_) => 1200,
            ServiceError::Model(models::errors::ModelError::Db(_)) => 1200,
        }
    }

    /// True for every failure caused by the caller's input.
    pub fn is_client_error(&self) -> bool {
        matches!(self.code(), 1001..=1099)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::errors::ModelError;

    #[test]
    fn codes_distinguish_categories() {
        assert_eq!(ServiceError::MalformedId("x".into()).code(), 1001);
        assert_eq!(ServiceError::Validation("x".into()).code(), 1002);
        assert_eq!(ServiceError::Model(ModelError::Validation("x".into())).code(), 1002);
        assert_eq!(ServiceError::not_found("ship").code(), 1003);
        assert_eq!(ServiceError::Db("x".into()).code(), 1200);
    }

    #[test]
    fn not_found_is_not_a_client_error() {
        assert!(ServiceError::Validation("x".into()).is_client_error());
        assert!(!ServiceError::not_found("ship").is_client_error());
        assert!(!ServiceError::Model(ModelError::Db("x".into())).is_client_error());
    }
}
