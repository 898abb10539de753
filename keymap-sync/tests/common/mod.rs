#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A scratch directory holding a primary and a secondary keymap file
pub struct KeymapPair {
    // Keeps the directory alive for the duration of the test
    _dir: TempDir,
    pub primary: PathBuf,
    pub secondary: PathBuf,
}

impl KeymapPair {
    pub fn new(primary_xml: &str, secondary_xml: &str) -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let primary = dir.path().join("Windows - Fraser.xml");
        let secondary = dir.path().join("macOS - Fraser.xml");
        fs::write(&primary, primary_xml).expect("Failed to write primary keymap");
        fs::write(&secondary, secondary_xml).expect("Failed to write secondary keymap");

        Self {
            _dir: dir,
            primary,
            secondary,
        }
    }

    /// Copies the checked-in fixtures
    pub fn from_fixtures() -> Self {
        Self::new(&fixture("windows.xml"), &fixture("macos.xml"))
    }

    pub fn primary_xml(&self) -> String {
        read(&self.primary)
    }

    pub fn secondary_xml(&self) -> String {
        read(&self.secondary)
    }
}

pub fn fixture(name: &str) -> String {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures").join(name);
    read(&path)
}

pub fn read(path: &Path) -> String {
    fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {}: {}", path.display(), e))
}
