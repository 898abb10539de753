//! Load → merge → save cycle over a pair of keymap files

use crate::error::SyncError;
use crate::writer::render_keymap;
use keymap_core::{merge_keymaps, Keymap, KeymapLoader, MergeReport, SideReport, Translator};
use log::{debug, info};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WriteMode {
    /// Overwrite files whose content changed
    #[default]
    Write,
    /// Merge and report, never touch the files
    DryRun,
    /// Like `DryRun`; the caller treats pending changes as a failure
    Check,
}

#[derive(Debug, Clone, Default)]
pub struct SyncOptions {
    pub translator: Translator,
    pub write_mode: WriteMode,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncSummary {
    pub report: MergeReport,
    /// Whether the canonical output differs from the primary file's content
    pub primary_changed: bool,
    pub secondary_changed: bool,
}

impl SyncSummary {
    pub fn is_up_to_date(&self) -> bool {
        !self.primary_changed && !self.secondary_changed
    }
}

/// Synchronize two keymap files in place.
///
/// Both files are loaded and both outputs rendered before anything is
/// written, so input errors never leave a file modified. A failure while
/// writing the second file still leaves the first one updated.
pub fn sync_keymaps(
    primary_path: &Path,
    secondary_path: &Path,
    options: &SyncOptions,
) -> Result<SyncSummary, SyncError> {
    let primary_source = KeymapLoader::read_source(primary_path)?;
    let secondary_source = KeymapLoader::read_source(secondary_path)?;

    let mut primary = KeymapLoader::parse(&primary_source, Some(primary_path))?;
    let mut secondary = KeymapLoader::parse(&secondary_source, Some(secondary_path))?;
    debug!(
        "Loaded {} ({} actions) and {} ({} actions)",
        primary_path.display(),
        primary.actions.len(),
        secondary_path.display(),
        secondary.actions.len()
    );

    let report = merge_keymaps(&mut primary, &mut secondary, &options.translator);
    log_side(primary_path, &report.primary);
    log_side(secondary_path, &report.secondary);

    primary.sort_actions();
    secondary.sort_actions();
    let primary_output = render_keymap(&primary)?;
    let secondary_output = render_keymap(&secondary)?;

    let summary = SyncSummary {
        report,
        primary_changed: primary_output != primary_source,
        secondary_changed: secondary_output != secondary_source,
    };

    match options.write_mode {
        WriteMode::Write => {
            write_if_changed(primary_path, &primary_output, summary.primary_changed)?;
            write_if_changed(secondary_path, &secondary_output, summary.secondary_changed)?;
        }
        WriteMode::DryRun | WriteMode::Check => {
            for (path, changed) in [
                (primary_path, summary.primary_changed),
                (secondary_path, summary.secondary_changed),
            ] {
                if changed {
                    info!("{} would be rewritten", path.display());
                }
            }
        }
    }

    Ok(summary)
}

/// Sort the keymap's actions and overwrite `path` with its canonical form
pub fn save_keymap(keymap: &mut Keymap, path: &Path) -> Result<(), SyncError> {
    keymap.sort_actions();
    let output = render_keymap(keymap)?;
    write_file(path, &output)
}

fn write_if_changed(path: &Path, output: &str, changed: bool) -> Result<(), SyncError> {
    if !changed {
        debug!("{} is already up to date", path.display());
        return Ok(());
    }
    write_file(path, output)?;
    info!("Wrote {}", path.display());
    Ok(())
}

fn write_file(path: &Path, output: &str) -> Result<(), SyncError> {
    fs::write(path, output).map_err(|source| SyncError::Write {
        path: path.to_path_buf(),
        source,
    })
}

fn log_side(path: &Path, side: &SideReport) {
    if side.is_empty() {
        info!("{}: nothing to add", path.display());
    } else {
        info!(
            "{}: added {} action(s) and {} shortcut(s)",
            path.display(),
            side.actions_added.len(),
            side.shortcuts_added.len()
        );
    }
}
