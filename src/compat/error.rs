use thiserror::Error;

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Unexpected status {status} from {url}")]
    Status { status: u16, url: String },

    #[error("Invalid dataset: {0}")]
    Validation(String),
}
