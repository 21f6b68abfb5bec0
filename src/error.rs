use thiserror::Error;

#[derive(Error, Debug)]
pub enum DenoiseError {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Undefined metric: {0}")]
    Undefined(String),
}

pub type Result<T> = std::result::Result<T, DenoiseError>;
