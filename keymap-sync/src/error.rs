use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SyncError {
    #[error(transparent)]
    Keymap(#[from] keymap_core::Error),

    #[error("Cannot write {}: {}", .path.display(), .source)]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("XML write error: {0}")]
    Serialize(#[from] quick_xml::Error),

    #[error("Serialized keymap is not valid UTF-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),
}
