//! Perception Context - Errors

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PerceptionError {
    #[error("Would you please enter a valid E-Mail ID? ({0})")]
    InvalidEmail(String),

    #[error("Please provide your rating for '{0}'!")]
    MissingRating(String),

    #[error("Please provide your rating for this sample!")]
    NothingChecked,

    #[error("Only one rating allowed for '{0}'")]
    DuplicateRating(String),

    #[error("Unknown option: {0}")]
    UnknownOption(String),

    #[error("Scale position out of range for '{item}': {position}")]
    PositionOutOfRange { item: String, position: usize },

    #[error("Ratings do not match the {expected} option schema")]
    SchemaMismatch { expected: &'static str },

    #[error("Malformed perception test response: {0}")]
    MalformedResponse(String),
}

impl PerceptionError {
    /// 是否为用户输入校验错误（不涉及服务端）
    pub fn is_validation(&self) -> bool {
        !matches!(self, Self::MalformedResponse(_))
    }
}
