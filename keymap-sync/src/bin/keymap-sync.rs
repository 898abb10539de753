use anyhow::Context;
use clap::Parser;
use keymap_sync::logging::init_logging;
use keymap_sync::{sync_keymaps, ModifierPair, SyncOptions, TranslationMode, Translator, WriteMode};
use log::info;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Synchronize keyboard shortcuts between two platform keymaps", long_about = None)]
struct Args {
    /// Keymap written with the primary modifier (e.g. the Windows keymap)
    primary: PathBuf,

    /// Keymap written with the secondary modifier (e.g. the macOS keymap)
    secondary: PathBuf,

    /// Modifier token of the primary keymap
    #[arg(long, default_value = "ctrl")]
    primary_modifier: String,

    /// Modifier token of the secondary keymap
    #[arg(long, default_value = "meta")]
    secondary_modifier: String,

    /// Translate by plain substring replacement, rewriting key names that
    /// contain a modifier token too
    #[arg(long)]
    substring: bool,

    /// Merge and report without writing either file
    #[arg(long, conflicts_with = "check")]
    dry_run: bool,

    /// Exit with status 1 if either file is not already synchronized
    #[arg(long)]
    check: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    match run(&args) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    }
}

/// Returns false when `--check` found pending changes
fn run(args: &Args) -> anyhow::Result<bool> {
    let modifiers = ModifierPair::new(args.primary_modifier.as_str(), args.secondary_modifier.as_str())?;
    let mode = if args.substring {
        TranslationMode::Substring
    } else {
        TranslationMode::Token
    };
    let write_mode = if args.check {
        WriteMode::Check
    } else if args.dry_run {
        WriteMode::DryRun
    } else {
        WriteMode::Write
    };

    let options = SyncOptions {
        translator: Translator::new(modifiers, mode),
        write_mode,
    };

    let summary = sync_keymaps(&args.primary, &args.secondary, &options).with_context(|| {
        format!(
            "failed to synchronize {} and {}",
            args.primary.display(),
            args.secondary.display()
        )
    })?;

    if summary.is_up_to_date() {
        info!("Keymaps are already synchronized");
        return Ok(true);
    }

    match write_mode {
        WriteMode::Check => Ok(false),
        WriteMode::DryRun => Ok(true),
        WriteMode::Write => {
            info!("Keymap synchronization complete!");
            Ok(true)
        }
    }
}
