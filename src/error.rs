use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("price data source failed: {0}")]
    DataSource(String),

    #[error("invalid surface size: width={width}, height={height}")]
    InvalidSurface { width: f64, height: f64 },

    #[error("drawing backend error: {0}")]
    Backend(String),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
