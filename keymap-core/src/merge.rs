//! Union of actions and shortcuts across the two platform keymaps

use crate::translate::{Direction, Translator};
use crate::types::{Action, Keymap};
use log::{debug, warn};
use std::collections::BTreeSet;

/// What a merge added to one keymap
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SideReport {
    /// Ids of actions synthesized because the keymap lacked them
    pub actions_added: Vec<String>,
    /// `(action id, keystroke)` pairs appended as new shortcuts
    pub shortcuts_added: Vec<(String, String)>,
}

impl SideReport {
    pub fn is_empty(&self) -> bool {
        self.actions_added.is_empty() && self.shortcuts_added.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeReport {
    pub primary: SideReport,
    pub secondary: SideReport,
}

impl MergeReport {
    pub fn is_empty(&self) -> bool {
        self.primary.is_empty() && self.secondary.is_empty()
    }
}

/// Make both keymaps contain the union of their actions and shortcuts.
///
/// After the merge, every action id of either keymap exists in both, and each
/// action holds its own keystrokes plus the other side's keystrokes translated
/// into this side's convention. Nothing is removed or rewritten; missing
/// actions and shortcuts are appended in id and keystroke order.
pub fn merge_keymaps(primary: &mut Keymap, secondary: &mut Keymap, translator: &Translator) -> MergeReport {
    for keymap in [&*primary, &*secondary] {
        for id in keymap.duplicate_ids() {
            warn!(
                "{}: action '{}' is defined more than once, only the first definition is merged",
                keymap.display_name(),
                id
            );
        }
    }

    let ids: BTreeSet<String> = primary
        .action_ids()
        .union(&secondary.action_ids())
        .cloned()
        .collect();

    let primary_name = primary.display_name();
    let secondary_name = secondary.display_name();
    let mut report = MergeReport::default();

    for id in &ids {
        // Both sets are taken before either side changes
        let primary_own = own_keystrokes(primary, id);
        let secondary_own = own_keystrokes(secondary, id);

        let from_secondary = translator.translate_all(&secondary_own, Direction::ToPrimary);
        let from_primary = translator.translate_all(&primary_own, Direction::ToSecondary);

        merge_action(primary, &primary_name, id, &primary_own, from_secondary, &mut report.primary);
        merge_action(secondary, &secondary_name, id, &secondary_own, from_primary, &mut report.secondary);
    }

    report
}

fn own_keystrokes(keymap: &Keymap, id: &str) -> BTreeSet<String> {
    keymap.action(id).map(Action::keystrokes).unwrap_or_default()
}

fn merge_action(
    keymap: &mut Keymap,
    name: &str,
    id: &str,
    own: &BTreeSet<String>,
    incoming: BTreeSet<String>,
    report: &mut SideReport,
) {
    let (action, created) = keymap.action_entry(id);

    if created {
        debug!("{}: added action '{}'", name, id);
        report.actions_added.push(id.to_string());
    }

    for keystroke in incoming.difference(own) {
        if action.add_shortcut(keystroke) {
            debug!("{}: added '{}' to action '{}'", name, keystroke, id);
            report.shortcuts_added.push((id.to_string(), keystroke.clone()));
        }
    }
}
