//! Error types for loading keymaps and configuring translation

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Cannot read {}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed XML in {document} at line {line}: {message}")]
    Xml {
        document: String,
        line: usize,
        message: String,
    },

    #[error("No root element in {document}")]
    MissingRoot { document: String },

    #[error("Action without an id attribute in {document} at line {line}")]
    MissingActionId { document: String, line: usize },

    #[error("Keyboard shortcut without a first-keystroke attribute in action '{action}' of {document}")]
    MissingKeystroke { document: String, action: String },

    #[error("Invalid modifier pair: {0}")]
    InvalidModifierPair(String),
}

pub type Result<T> = std::result::Result<T, Error>;
