/// Core errors.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("signing configuration error: {0}")]
    SigningConfiguration(String),

    #[error("invalid handle: {0}")]
    InvalidHandle(String),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
