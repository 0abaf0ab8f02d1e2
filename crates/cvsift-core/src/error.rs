use thiserror::Error;

use crate::config::ConfigError;
use crate::inference::InferenceError;
use crate::reader::ReaderError;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Inference error: {0}")]
    Inference(#[from] InferenceError),

    #[error("Document error: {0}")]
    Reader(#[from] ReaderError),
}

pub type Result<T> = std::result::Result<T, Error>;
