use keymap_core::{Action, Keymap, KeymapLoader};

/// Creates a keymap from `(action id, keystrokes)` pairs
#[allow(dead_code)]
pub fn keymap_with(name: &str, actions: &[(&str, &[&str])]) -> Keymap {
    let mut keymap = Keymap::new("keymap");
    keymap.root_attributes.push(("version".to_string(), "1".to_string()));
    keymap.root_attributes.push(("name".to_string(), name.to_string()));

    for (id, keystrokes) in actions {
        let mut action = Action::new(*id);
        for keystroke in keystrokes.iter() {
            action.add_shortcut(keystroke);
        }
        keymap.actions.push(action);
    }

    keymap
}

/// Loads a keymap from XML, panicking on errors
#[allow(dead_code)]
pub fn load(xml: &str) -> Keymap {
    KeymapLoader::load_str(xml).expect("Failed to load keymap")
}

/// Keystrokes of an action in document order
#[allow(dead_code)]
pub fn keystrokes_of(keymap: &Keymap, id: &str) -> Vec<String> {
    keymap
        .action(id)
        .unwrap_or_else(|| panic!("Action '{}' not found", id))
        .shortcuts()
        .map(|s| s.first_keystroke.clone())
        .collect()
}

/// Action ids in document order
#[allow(dead_code)]
pub fn ids_of(keymap: &Keymap) -> Vec<String> {
    keymap.actions.iter().map(|a| a.id.clone()).collect()
}
