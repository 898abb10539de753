pub mod types;
pub mod error;
pub mod keystroke;
pub mod translate;
pub mod merge;
pub mod xml;

pub use types::*;

// Re-export commonly used types
pub use error::{Error, Result};
pub use keystroke::{Keystroke, Segment};
pub use translate::{translate, Direction, ModifierPair, TranslationMode, Translator};
pub use merge::{merge_keymaps, MergeReport, SideReport};
pub use xml::KeymapLoader;
