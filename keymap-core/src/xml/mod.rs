mod loader;

pub use loader::KeymapLoader;
