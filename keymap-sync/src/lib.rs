pub mod error;
pub mod logging;
pub mod sync;
pub mod writer;

pub use keymap_core::*;

pub use error::SyncError;
pub use sync::{save_keymap, sync_keymaps, SyncOptions, SyncSummary, WriteMode};
pub use writer::{render_keymap, KeymapWriter};
