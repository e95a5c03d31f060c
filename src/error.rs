#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Encode: {0}")]
    Encode(Box<dyn std::error::Error + Send + Sync>),

    #[error("Decode: {0}")]
    Decode(Box<dyn std::error::Error + Send + Sync>),

    #[error("Copy buffer busy")]
    Busy,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
