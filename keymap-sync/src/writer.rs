use crate::error::SyncError;
use keymap_core::{
    Action, ActionChild, Element, Keymap, Node, Shortcut, ACTION_TAG, FIRST_KEYSTROKE_ATTR, ID_ATTR,
    SHORTCUT_TAG,
};
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::io::Write;

/// Serializes keymaps in the canonical layout: actions sorted by id, two
/// spaces of indentation per level, one tag per line, no XML declaration and
/// no trailing newline.
pub struct KeymapWriter<W: Write> {
    writer: Writer<W>,
}

impl<W: Write> KeymapWriter<W> {
    pub fn new(inner: W) -> Self {
        Self {
            writer: Writer::new_with_indent(inner, b' ', 2),
        }
    }

    /// Write the whole keymap and hand back the underlying writer
    pub fn write_keymap(mut self, keymap: &Keymap) -> Result<W, SyncError> {
        let mut actions: Vec<&Action> = keymap.actions.iter().collect();
        actions.sort_by(|a, b| a.id.cmp(&b.id));

        let start = start_tag(&keymap.root_name, &[], &keymap.root_attributes);

        if keymap.extra_children.is_empty() && actions.is_empty() {
            self.writer.write_event(Event::Empty(start))?;
        } else {
            self.writer.write_event(Event::Start(start))?;

            // Non-action children go first
            for node in &keymap.extra_children {
                self.write_node(node)?;
            }
            for action in actions {
                self.write_action(action)?;
            }

            self.writer
                .write_event(Event::End(BytesEnd::new(keymap.root_name.as_str())))?;
        }

        Ok(self.writer.into_inner())
    }

    fn write_action(&mut self, action: &Action) -> Result<(), SyncError> {
        let start = start_tag(ACTION_TAG, &[(ID_ATTR, action.id.as_str())], &action.extra_attributes);

        if action.children.is_empty() {
            self.writer.write_event(Event::Empty(start))?;
            return Ok(());
        }

        self.writer.write_event(Event::Start(start))?;
        for child in &action.children {
            match child {
                ActionChild::Shortcut(shortcut) => self.write_shortcut(shortcut)?,
                ActionChild::Other(node) => self.write_node(node)?,
            }
        }
        self.writer.write_event(Event::End(BytesEnd::new(ACTION_TAG)))?;

        Ok(())
    }

    fn write_shortcut(&mut self, shortcut: &Shortcut) -> Result<(), SyncError> {
        let start = start_tag(
            SHORTCUT_TAG,
            &[(FIRST_KEYSTROKE_ATTR, shortcut.first_keystroke.as_str())],
            &shortcut.extra_attributes,
        );
        self.writer.write_event(Event::Empty(start))?;
        Ok(())
    }

    fn write_node(&mut self, node: &Node) -> Result<(), SyncError> {
        match node {
            Node::Element(element) => self.write_element(element)?,
            Node::Text(text) => {
                self.writer.write_event(Event::Text(BytesText::new(text)))?;
            }
            Node::Comment(comment) => {
                self.writer
                    .write_event(Event::Comment(BytesText::from_escaped(comment.as_str())))?;
            }
        }
        Ok(())
    }

    fn write_element(&mut self, element: &Element) -> Result<(), SyncError> {
        let start = start_tag(&element.name, &[], &element.attributes);

        if element.children.is_empty() {
            self.writer.write_event(Event::Empty(start))?;
            return Ok(());
        }

        self.writer.write_event(Event::Start(start))?;
        for child in &element.children {
            self.write_node(child)?;
        }
        self.writer
            .write_event(Event::End(BytesEnd::new(element.name.as_str())))?;

        Ok(())
    }
}

fn start_tag<'a>(
    name: &'a str,
    leading: &[(&'a str, &'a str)],
    attributes: &'a [(String, String)],
) -> BytesStart<'a> {
    let mut start = BytesStart::new(name);
    for &(key, value) in leading {
        start.push_attribute((key, value));
    }
    for (key, value) in attributes {
        start.push_attribute((key.as_str(), value.as_str()));
    }
    start
}

/// Serialize a keymap to a string in the canonical layout
pub fn render_keymap(keymap: &Keymap) -> Result<String, SyncError> {
    let buffer = KeymapWriter::new(Vec::new()).write_keymap(keymap)?;
    Ok(String::from_utf8(buffer)?)
}
