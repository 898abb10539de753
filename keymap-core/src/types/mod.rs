pub mod keymap;
pub mod node;

pub use keymap::*;
pub use node::*;
