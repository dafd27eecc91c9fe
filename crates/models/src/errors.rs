use std::fmt::Display;

use thiserror::Error;

/// Failures raised below the service layer.
#[derive(Debug, Error)]
pub enum ModelError {
    /// A field value the registry cannot store or rate.
    #[error("validation error: {0}")]
    Validation(String),
    #[error("database error: {0}")]
    Db(String),
}

impl ModelError {
    pub fn invalid(field: &str, detail: impl Display) -> Self {
        Self::Validation(format!("{field}: {detail}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_names_the_field() {
        let e = ModelError::invalid("speed", "must be finite");
        assert_eq!(e.to_string(), "validation error: speed: must be finite");
    }
}
