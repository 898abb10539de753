use super::node::{find_attribute, Node};
use std::collections::{BTreeSet, HashSet};
use std::path::PathBuf;

pub const ACTION_TAG: &str = "action";
pub const SHORTCUT_TAG: &str = "keyboard-shortcut";
pub const ID_ATTR: &str = "id";
pub const FIRST_KEYSTROKE_ATTR: &str = "first-keystroke";

/// A `<keyboard-shortcut>` element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shortcut {
    pub first_keystroke: String,
    /// Attributes other than `first-keystroke`, e.g. `second-keystroke`
    pub extra_attributes: Vec<(String, String)>,
}

impl Shortcut {
    pub fn new(first_keystroke: impl Into<String>) -> Self {
        Self {
            first_keystroke: first_keystroke.into(),
            extra_attributes: Vec::new(),
        }
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        if key == FIRST_KEYSTROKE_ATTR {
            return Some(self.first_keystroke.as_str());
        }
        find_attribute(&self.extra_attributes, key)
    }
}

/// Child of an `<action>`, in document order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionChild {
    Shortcut(Shortcut),
    /// Anything else, e.g. `<mouse-shortcut>`
    Other(Node),
}

/// An `<action>` element identified by its `id`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    pub id: String,
    pub extra_attributes: Vec<(String, String)>,
    pub children: Vec<ActionChild>,
}

impl Action {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            extra_attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn with_shortcut(mut self, keystroke: impl Into<String>) -> Self {
        self.children.push(ActionChild::Shortcut(Shortcut::new(keystroke)));
        self
    }

    pub fn shortcuts(&self) -> impl Iterator<Item = &Shortcut> {
        self.children.iter().filter_map(|child| match child {
            ActionChild::Shortcut(shortcut) => Some(shortcut),
            ActionChild::Other(_) => None,
        })
    }

    /// The set of `first-keystroke` values bound to this action
    pub fn keystrokes(&self) -> BTreeSet<String> {
        self.shortcuts()
            .map(|s| s.first_keystroke.clone())
            .collect()
    }

    pub fn has_keystroke(&self, keystroke: &str) -> bool {
        self.shortcuts().any(|s| s.first_keystroke == keystroke)
    }

    /// Appends a shortcut unless one with the same keystroke already exists.
    /// Returns whether a shortcut was added.
    pub fn add_shortcut(&mut self, keystroke: &str) -> bool {
        if self.has_keystroke(keystroke) {
            return false;
        }
        self.children.push(ActionChild::Shortcut(Shortcut::new(keystroke)));
        true
    }
}

/// A keymap document: the root container and its actions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keymap {
    /// File the keymap was loaded from, if any
    pub source: Option<PathBuf>,
    pub root_name: String,
    pub root_attributes: Vec<(String, String)>,
    /// Root children that are not actions; written ahead of the actions
    pub extra_children: Vec<Node>,
    pub actions: Vec<Action>,
}

impl Keymap {
    pub fn new(root_name: impl Into<String>) -> Self {
        Self {
            source: None,
            root_name: root_name.into(),
            root_attributes: Vec::new(),
            extra_children: Vec::new(),
            actions: Vec::new(),
        }
    }

    pub fn with_action(mut self, action: Action) -> Self {
        self.actions.push(action);
        self
    }

    /// Name used in log and error messages
    pub fn display_name(&self) -> String {
        match (&self.source, find_attribute(&self.root_attributes, "name")) {
            (Some(path), _) => path.display().to_string(),
            (None, Some(name)) => name.to_string(),
            (None, None) => format!("<{}>", self.root_name),
        }
    }

    pub fn action_ids(&self) -> BTreeSet<String> {
        self.actions.iter().map(|a| a.id.clone()).collect()
    }

    /// First action with the given id
    pub fn action(&self, id: &str) -> Option<&Action> {
        self.actions.iter().find(|a| a.id == id)
    }

    /// Returns the first action with the given id, appending an empty one if
    /// there is none. The flag is true when the action was created.
    pub fn action_entry(&mut self, id: &str) -> (&mut Action, bool) {
        let (index, created) = match self.actions.iter().position(|a| a.id == id) {
            Some(index) => (index, false),
            None => {
                self.actions.push(Action::new(id));
                (self.actions.len() - 1, true)
            }
        };
        (&mut self.actions[index], created)
    }

    /// Ids that occur more than once, in sorted order
    pub fn duplicate_ids(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        let duplicates: BTreeSet<&str> = self
            .actions
            .iter()
            .filter(|a| !seen.insert(a.id.as_str()))
            .map(|a| a.id.as_str())
            .collect();
        duplicates.into_iter().map(String::from).collect()
    }

    /// Stable sort of the actions by id
    pub fn sort_actions(&mut self) {
        self.actions.sort_by(|a, b| a.id.cmp(&b.id));
    }

    pub fn shortcut_count(&self) -> usize {
        self.actions.iter().map(|a| a.shortcuts().count()).sum()
    }
}
