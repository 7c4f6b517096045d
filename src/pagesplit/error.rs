use thiserror::Error;

#[derive(Error, Debug)]
pub enum PagesplitError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid page: {0}")]
    InvalidPage(String),

    #[error("Invalid layout type: {0}")]
    InvalidLayoutType(String),

    #[error("Invalid params: {0}")]
    InvalidParams(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Api Error: {0}")]
    Api(String),
}

pub type Result<T> = std::result::Result<T, PagesplitError>;
