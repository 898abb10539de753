use crate::error::{Error, Result};
use crate::types::{
    Action, ActionChild, Element, Keymap, Node, Shortcut, ACTION_TAG, FIRST_KEYSTROKE_ATTR, ID_ATTR,
    SHORTCUT_TAG,
};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::fs;
use std::path::Path;

pub struct KeymapLoader;

impl KeymapLoader {
    /// Load a keymap file
    pub fn load_file(path: &Path) -> Result<Keymap> {
        let content = Self::read_source(path)?;
        Self::parse(&content, Some(path))
    }

    /// Load a keymap from an XML string
    pub fn load_str(xml: &str) -> Result<Keymap> {
        Self::parse(xml, None)
    }

    /// Read a keymap file as text without parsing it
    pub fn read_source(path: &Path) -> Result<String> {
        fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parse keymap XML; `path` names the document in errors and becomes
    /// the keymap's source
    pub fn parse(xml: &str, path: Option<&Path>) -> Result<Keymap> {
        let document = match path {
            Some(path) => path.display().to_string(),
            None => "<string>".to_string(),
        };

        // Strip UTF-8 BOM if present
        let xml = xml.strip_prefix('\u{FEFF}').unwrap_or(xml);

        let mut builder = TreeBuilder::new(xml, document);
        let mut keymap = builder.run()?;
        keymap.source = path.map(Path::to_path_buf);
        Ok(keymap)
    }
}

/// Streams XML events into a keymap. Direct `<action>` children of the root
/// are converted to `Action`s as soon as they close; everything else is kept
/// as generic nodes.
struct TreeBuilder<'a> {
    input: &'a str,
    document: String,
    /// Open elements with the line they started on
    stack: Vec<(Element, usize)>,
    keymap: Option<Keymap>,
}

impl<'a> TreeBuilder<'a> {
    fn new(input: &'a str, document: String) -> Self {
        Self {
            input,
            document,
            stack: Vec::new(),
            keymap: None,
        }
    }

    fn run(&mut self) -> Result<Keymap> {
        let mut reader = Reader::from_str(self.input);
        reader.trim_text(true);

        loop {
            let event = reader.read_event();
            // Just past the event, so on the line where its tag ends
            let position = reader.buffer_position();
            match event {
                Ok(Event::Start(e)) => {
                    let element = self.element_from(&e, position)?;
                    self.open(element, position)?;
                }
                Ok(Event::Empty(e)) => {
                    let element = self.element_from(&e, position)?;
                    self.open(element, position)?;
                    self.close(position)?;
                }
                Ok(Event::End(_)) => self.close(position)?,
                Ok(Event::Text(e)) => {
                    let text = e
                        .unescape()
                        .map_err(|err| self.xml_error(position, err.to_string()))?;
                    self.push_text(text.into_owned());
                }
                Ok(Event::CData(e)) => {
                    let text = String::from_utf8_lossy(&e.into_inner()).into_owned();
                    self.push_text(text);
                }
                Ok(Event::Comment(e)) => {
                    let text = String::from_utf8_lossy(&e).into_owned();
                    self.push_node(Node::Comment(text));
                }
                Ok(Event::Eof) => break,
                // XML declaration, doctype and processing instructions are dropped
                Ok(_) => {}
                Err(e) => return Err(self.xml_error(position, e.to_string())),
            }
        }

        if let Some((element, line)) = self.stack.last() {
            return Err(Error::Xml {
                document: self.document.clone(),
                line: *line,
                message: format!("unclosed element <{}>", element.name),
            });
        }

        self.keymap.take().ok_or_else(|| Error::MissingRoot {
            document: self.document.clone(),
        })
    }

    fn element_from(&self, e: &BytesStart, position: usize) -> Result<Element> {
        let mut element = Element::new(String::from_utf8_lossy(e.name().as_ref()).into_owned());

        for attr in e.attributes() {
            let attr = attr.map_err(|err| self.xml_error(position, err.to_string()))?;
            let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
            let value = attr
                .unescape_value()
                .map_err(|err| self.xml_error(position, err.to_string()))?
                .into_owned();
            element.attributes.push((key, value));
        }

        Ok(element)
    }

    fn open(&mut self, element: Element, position: usize) -> Result<()> {
        if self.stack.is_empty() {
            if self.keymap.is_some() {
                return Err(self.xml_error(position, format!("second root element <{}>", element.name)));
            }
            let mut keymap = Keymap::new(element.name.clone());
            keymap.root_attributes = element.attributes.clone();
            self.keymap = Some(keymap);
        }

        let line = self.line_at(position);
        self.stack.push((element, line));
        Ok(())
    }

    fn close(&mut self, position: usize) -> Result<()> {
        let (element, line) = self
            .stack
            .pop()
            .ok_or_else(|| self.xml_error(position, "unexpected closing tag".to_string()))?;

        match self.stack.len() {
            // Root element finished; its children were collected on the way
            0 => Ok(()),
            1 => {
                let keymap = self.keymap.as_mut().ok_or_else(|| Error::MissingRoot {
                    document: self.document.clone(),
                })?;
                if element.name == ACTION_TAG {
                    let action = build_action(element, line, &self.document)?;
                    keymap.actions.push(action);
                } else {
                    keymap.extra_children.push(Node::Element(element));
                }
                Ok(())
            }
            _ => {
                if let Some((parent, _)) = self.stack.last_mut() {
                    parent.children.push(Node::Element(element));
                }
                Ok(())
            }
        }
    }

    fn push_text(&mut self, text: String) {
        if !text.is_empty() {
            self.push_node(Node::Text(text));
        }
    }

    /// Attach a non-element node to the innermost open element. Nodes outside
    /// the root are dropped.
    fn push_node(&mut self, node: Node) {
        match self.stack.len() {
            0 => {}
            1 => {
                if let Some(keymap) = self.keymap.as_mut() {
                    keymap.extra_children.push(node);
                }
            }
            _ => {
                if let Some((parent, _)) = self.stack.last_mut() {
                    parent.children.push(node);
                }
            }
        }
    }

    fn line_at(&self, position: usize) -> usize {
        let end = position.min(self.input.len());
        self.input.as_bytes()[..end].iter().filter(|&&b| b == b'\n').count() + 1
    }

    fn xml_error(&self, position: usize, message: String) -> Error {
        Error::Xml {
            document: self.document.clone(),
            line: self.line_at(position),
            message,
        }
    }
}

fn build_action(element: Element, line: usize, document: &str) -> Result<Action> {
    let mut id = None;
    let mut extra_attributes = Vec::new();
    for (key, value) in element.attributes {
        if key == ID_ATTR && id.is_none() {
            id = Some(value);
        } else {
            extra_attributes.push((key, value));
        }
    }

    let id = id.ok_or_else(|| Error::MissingActionId {
        document: document.to_string(),
        line,
    })?;

    let mut children = Vec::with_capacity(element.children.len());
    for child in element.children {
        match child {
            Node::Element(child) if child.name == SHORTCUT_TAG => {
                children.push(ActionChild::Shortcut(build_shortcut(child, &id, document)?));
            }
            other => children.push(ActionChild::Other(other)),
        }
    }

    Ok(Action {
        id,
        extra_attributes,
        children,
    })
}

fn build_shortcut(element: Element, action: &str, document: &str) -> Result<Shortcut> {
    let mut first_keystroke = None;
    let mut extra_attributes = Vec::new();
    for (key, value) in element.attributes {
        if key == FIRST_KEYSTROKE_ATTR && first_keystroke.is_none() {
            first_keystroke = Some(value);
        } else {
            extra_attributes.push((key, value));
        }
    }

    let first_keystroke = first_keystroke.ok_or_else(|| Error::MissingKeystroke {
        document: document.to_string(),
        action: action.to_string(),
    })?;

    Ok(Shortcut {
        first_keystroke,
        extra_attributes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_numbers() {
        let xml = "<keymap>\n  <action>\n  </action>\n</keymap>";
        match KeymapLoader::load_str(xml) {
            Err(Error::MissingActionId { line, .. }) => assert_eq!(line, 2),
            other => panic!("Expected MissingActionId, got {:?}", other),
        }
    }

    #[test]
    fn test_nested_elements_are_kept() {
        let xml = r#"<keymap><action id="a"><mouse-shortcut keystroke="ctrl button1"><extra/></mouse-shortcut></action></keymap>"#;
        let keymap = KeymapLoader::load_str(xml).unwrap();

        match &keymap.actions[0].children[0] {
            ActionChild::Other(Node::Element(mouse)) => {
                assert_eq!(mouse.name, "mouse-shortcut");
                assert_eq!(mouse.attribute("keystroke"), Some("ctrl button1"));
                assert_eq!(mouse.children.len(), 1);
            }
            other => panic!("Expected mouse-shortcut element, got {:?}", other),
        }
    }

    #[test]
    fn test_second_root_is_rejected() {
        let result = KeymapLoader::load_str("<keymap/><keymap/>");
        assert!(matches!(result, Err(Error::Xml { .. })));
    }

    #[test]
    fn test_unclosed_root_is_rejected() {
        let result = KeymapLoader::load_str("<keymap><action id=\"a\">");
        assert!(matches!(result, Err(Error::Xml { .. })));
    }
}
