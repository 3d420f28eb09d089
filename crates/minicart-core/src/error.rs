use std::path::PathBuf;

/// Errors surfaced by the cart widget and its hosts.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The stored cart text could not be decoded. Nothing else is supposed to
    /// write the cart key, so this is not recovered from.
    #[error("malformed cart data under key {key:?}: {source}")]
    Decode {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode cart: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("invalid config: {0}")]
    Config(String),

    #[error("parse error in {}: {message}", .file.display())]
    Parse { file: PathBuf, message: String },
}
