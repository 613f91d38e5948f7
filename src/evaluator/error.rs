use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EvaluationError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Dataset error: {0}")]
    Dataset(String),

    #[error("Failed to load model {}: {source}", .path.display())]
    ModelLoad {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Inference failed for image {image}: {source}")]
    Inference {
        image: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Unexpected model output: {0}")]
    ModelOutput(String),
}
