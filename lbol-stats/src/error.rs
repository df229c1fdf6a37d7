use thiserror::Error;

/// Failures while obtaining or decoding a character dataset.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("failed to fetch {url}: {message}")]
    Network { url: String, message: String },
    #[error("failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("dataset is missing {0}")]
    MissingData(&'static str),
}

/// Locale lookup failures. Callers that render text map these to defaults.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TextError {
    #[error("no text for key `{0}`")]
    MissingKey(String),
}
