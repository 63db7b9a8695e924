use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformed position `{description}`: {reason}")]
pub struct MalformedPositionError {
    pub description: String,
    pub reason: String,
}

impl MalformedPositionError {
    pub fn new(description: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            reason: reason.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RulesError {
    #[error("`{notation}` is not a legal move in this position")]
    UnknownMove { notation: String },
}
