use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("invalid unit table: {0}")]
    InvalidUnitTable(String),

    #[error("unknown unit kind `{0}`")]
    UnknownUnitKind(String),

    #[error("invalid chart config: {0}")]
    InvalidConfig(String),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
