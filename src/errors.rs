use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlannerError {
    #[error("invalid input for {field}: {message}")]
    InvalidInput {
        field: String,
        message: String,
    },

    #[error("division by zero: {context}")]
    DivisionByZero {
        context: String,
    },

    #[error("not found: {message}")]
    NotFound {
        message: String,
    },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration {
        message: String,
    },

    #[error("calculation error: {message}")]
    CalculationError {
        message: String,
    },

    #[error("serialization error: {message}")]
    Serialization {
        message: String,
    },
}

impl PlannerError {
    pub(crate) fn invalid_input(field: &str, message: impl Into<String>) -> Self {
        PlannerError::InvalidInput {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for PlannerError {
    fn from(err: serde_json::Error) -> Self {
        PlannerError::Serialization {
            message: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, PlannerError>;
