use cc_types::TypeError;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("failed to deserialize search response: {0}")]
    Deserialization(serde_json::Error),
    #[error("failed to serialize metrics: {0}")]
    Serialization(serde_json::Error),
    #[error("invalid value: {0}")]
    Type(#[from] TypeError),
}

pub type CoreResult<T> = std::result::Result<T, CoreError>;
