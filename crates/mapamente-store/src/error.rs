use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Missing required builder field: {0}")]
    MissingField(&'static str),
}

pub type Result<T> = std::result::Result<T, StoreError>;
