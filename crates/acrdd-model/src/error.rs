use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("enumeration threshold must be between 0 and 100, got {value}")]
    InvalidThreshold { value: u32 },
}

pub type Result<T> = std::result::Result<T, ModelError>;
