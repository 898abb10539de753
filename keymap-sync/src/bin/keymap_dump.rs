use anyhow::Context;
use clap::Parser;
use keymap_sync::logging::init_logging;
use keymap_sync::{Direction, KeymapLoader, Translator};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Print the actions and shortcuts of a keymap file", long_about = None)]
struct Args {
    /// Keymap XML file
    input: PathBuf,

    /// Also show each keystroke translated to the other platform
    #[arg(long, value_enum)]
    translate: Option<Target>,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum Target {
    /// ctrl -> meta
    Secondary,
    /// meta -> ctrl
    Primary,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(false);

    let mut keymap = KeymapLoader::load_file(&args.input)
        .with_context(|| format!("failed to load {}", args.input.display()))?;
    keymap.sort_actions();

    let translator = Translator::default();
    let direction = args.translate.map(|target| match target {
        Target::Secondary => Direction::ToSecondary,
        Target::Primary => Direction::ToPrimary,
    });

    println!("Keymap: {}", keymap.display_name());
    println!(
        "Counts: {} actions, {} shortcuts",
        keymap.actions.len(),
        keymap.shortcut_count()
    );

    for id in keymap.duplicate_ids() {
        println!("Duplicate action id: {}", id);
    }

    println!();
    for action in &keymap.actions {
        println!("{}", action.id);
        for shortcut in action.shortcuts() {
            match direction {
                Some(direction) => println!(
                    "  {} -> {}",
                    shortcut.first_keystroke,
                    translator.translate(&shortcut.first_keystroke, direction)
                ),
                None => println!("  {}", shortcut.first_keystroke),
            }
        }
    }

    Ok(())
}
