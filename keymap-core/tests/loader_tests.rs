mod common;

use common::*;
use keymap_core::*;
use pretty_assertions::assert_eq;

#[test]
fn test_load_basic_keymap() {
    let keymap = load(r#"<?xml version="1.0" encoding="UTF-8"?>
<keymap version="1" name="Windows - Fraser" parent="$default">
  <action id="EditorCopy">
    <keyboard-shortcut first-keystroke="ctrl C"/>
    <keyboard-shortcut first-keystroke="ctrl INSERT"/>
  </action>
  <action id="EditorPaste"/>
</keymap>"#);

    assert_eq!(keymap.root_name, "keymap");
    assert_eq!(
        keymap.root_attributes,
        vec![
            ("version".to_string(), "1".to_string()),
            ("name".to_string(), "Windows - Fraser".to_string()),
            ("parent".to_string(), "$default".to_string()),
        ]
    );
    assert_eq!(ids_of(&keymap), vec!["EditorCopy", "EditorPaste"]);
    assert_eq!(keystrokes_of(&keymap, "EditorCopy"), vec!["ctrl C", "ctrl INSERT"]);
    assert!(keystrokes_of(&keymap, "EditorPaste").is_empty());
    assert!(keymap.source.is_none());
}

#[test]
fn test_extra_attributes_and_children_are_kept() {
    let keymap = load(r#"<keymap>
  <!-- navigation -->
  <action id="GotoDeclaration" scope="editor">
    <keyboard-shortcut first-keystroke="ctrl B" second-keystroke="D"/>
    <mouse-shortcut keystroke="ctrl button1"/>
  </action>
  <action-group id="custom"/>
</keymap>"#);

    let action = keymap.action("GotoDeclaration").unwrap();
    assert_eq!(action.extra_attributes, vec![("scope".to_string(), "editor".to_string())]);

    let shortcut = action.shortcuts().next().unwrap();
    assert_eq!(shortcut.first_keystroke, "ctrl B");
    assert_eq!(shortcut.attribute("second-keystroke"), Some("D"));

    assert_eq!(action.children.len(), 2);
    assert!(matches!(
        &action.children[1],
        ActionChild::Other(Node::Element(e)) if e.name == "mouse-shortcut"
    ));

    assert_eq!(keymap.extra_children.len(), 2);
    assert_eq!(keymap.extra_children[0], Node::Comment(" navigation ".to_string()));
    assert!(matches!(
        &keymap.extra_children[1],
        Node::Element(e) if e.name == "action-group"
    ));
}

#[test]
fn test_attribute_entities_are_unescaped() {
    let keymap = load(r#"<keymap><action id="Find&amp;Replace"><keyboard-shortcut first-keystroke="ctrl &quot;R&quot;"/></action></keymap>"#);

    assert_eq!(ids_of(&keymap), vec!["Find&Replace"]);
    assert_eq!(keystrokes_of(&keymap, "Find&Replace"), vec!["ctrl \"R\""]);
}

#[test]
fn test_bom_is_stripped() {
    let keymap = load("\u{FEFF}<keymap><action id=\"a\"/></keymap>");
    assert_eq!(ids_of(&keymap), vec!["a"]);
}

#[test]
fn test_duplicate_action_ids_are_loaded() {
    let keymap = load(r#"<keymap>
  <action id="copy"><keyboard-shortcut first-keystroke="ctrl C"/></action>
  <action id="copy"><keyboard-shortcut first-keystroke="ctrl INSERT"/></action>
</keymap>"#);

    assert_eq!(keymap.actions.len(), 2);
    assert_eq!(keymap.duplicate_ids(), vec!["copy"]);
    assert_eq!(keystrokes_of(&keymap, "copy"), vec!["ctrl C"]);
}

#[test]
fn test_missing_action_id() {
    let result = KeymapLoader::load_str(r#"<keymap>
  <action id="copy"/>
  <action>
    <keyboard-shortcut first-keystroke="ctrl V"/>
  </action>
</keymap>"#);

    match result {
        Err(Error::MissingActionId { document, line }) => {
            assert_eq!(document, "<string>");
            assert_eq!(line, 3);
        }
        other => panic!("Expected MissingActionId, got {:?}", other),
    }
}

#[test]
fn test_missing_first_keystroke() {
    let result = KeymapLoader::load_str(r#"<keymap><action id="copy"><keyboard-shortcut second-keystroke="C"/></action></keymap>"#);

    match result {
        Err(Error::MissingKeystroke { action, .. }) => assert_eq!(action, "copy"),
        other => panic!("Expected MissingKeystroke, got {:?}", other),
    }
}

#[test]
fn test_malformed_xml() {
    let result = KeymapLoader::load_str("<keymap>\n<action id=\"copy\">\n</keymap>");
    assert!(matches!(result, Err(Error::Xml { .. })), "got {:?}", result);
}

#[test]
fn test_missing_root() {
    let result = KeymapLoader::load_str("<?xml version=\"1.0\"?>\n<!-- nothing here -->\n");
    assert!(matches!(result, Err(Error::MissingRoot { .. })), "got {:?}", result);
}

#[test]
fn test_missing_file() {
    let path = std::env::temp_dir().join("keymap_core_definitely_missing.xml");
    let _ = std::fs::remove_file(&path);

    match KeymapLoader::load_file(&path) {
        Err(Error::Io { path: reported, .. }) => assert_eq!(reported, path),
        other => panic!("Expected Io error, got {:?}", other),
    }
}

#[test]
fn test_load_file_records_source() {
    let path = std::env::temp_dir().join("keymap_core_source_test.xml");
    std::fs::write(&path, "<keymap><action id=\"a\"/></keymap>").expect("Failed to write keymap");

    let keymap = KeymapLoader::load_file(&path).expect("Failed to load keymap");
    assert_eq!(keymap.source.as_deref(), Some(path.as_path()));
    assert_eq!(keymap.display_name(), path.display().to_string());

    let _ = std::fs::remove_file(&path);
}
