//! Shortcut translation between the two platforms' modifier vocabularies

use crate::error::{Error, Result};
use crate::keystroke::Keystroke;
use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Primary convention (`ctrl`) to secondary convention (`meta`)
    ToSecondary,
    /// Secondary convention (`meta`) to primary convention (`ctrl`)
    ToPrimary,
}

impl Direction {
    pub fn reverse(self) -> Self {
        match self {
            Direction::ToSecondary => Direction::ToPrimary,
            Direction::ToPrimary => Direction::ToSecondary,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TranslationMode {
    /// Replace whole modifier parts only; the key is never touched
    #[default]
    Token,
    /// Replace every occurrence of the token text anywhere in the keystroke.
    /// A key name that contains the token text is rewritten as well.
    Substring,
}

/// Modifier token names of the two platforms
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModifierPair {
    pub primary: String,
    pub secondary: String,
}

impl ModifierPair {
    pub fn new(primary: impl Into<String>, secondary: impl Into<String>) -> Result<Self> {
        let primary = primary.into();
        let secondary = secondary.into();

        for token in [&primary, &secondary] {
            if token.is_empty() {
                return Err(Error::InvalidModifierPair("modifier token is empty".to_string()));
            }
            if token.chars().any(|c| c == '+' || c.is_whitespace()) {
                return Err(Error::InvalidModifierPair(format!(
                    "modifier token '{}' contains a separator",
                    token
                )));
            }
        }
        if primary == secondary {
            return Err(Error::InvalidModifierPair(format!(
                "primary and secondary modifiers are both '{}'",
                primary
            )));
        }

        Ok(Self { primary, secondary })
    }

    /// (token to replace, replacement) for a direction
    pub fn tokens(&self, direction: Direction) -> (&str, &str) {
        match direction {
            Direction::ToSecondary => (self.primary.as_str(), self.secondary.as_str()),
            Direction::ToPrimary => (self.secondary.as_str(), self.primary.as_str()),
        }
    }
}

impl Default for ModifierPair {
    fn default() -> Self {
        Self {
            primary: "ctrl".to_string(),
            secondary: "meta".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Translator {
    pub modifiers: ModifierPair,
    pub mode: TranslationMode,
}

impl Translator {
    pub fn new(modifiers: ModifierPair, mode: TranslationMode) -> Self {
        Self { modifiers, mode }
    }

    pub fn with_mode(mut self, mode: TranslationMode) -> Self {
        self.mode = mode;
        self
    }

    /// Translate a keystroke string. A no-op when the source token is absent.
    ///
    /// # Examples
    /// ```
    /// use keymap_core::{Direction, Translator};
    ///
    /// let translator = Translator::default();
    /// assert_eq!(translator.translate("ctrl shift V", Direction::ToSecondary), "meta shift V");
    /// assert_eq!(translator.translate("meta+c", Direction::ToPrimary), "ctrl+c");
    /// ```
    pub fn translate(&self, keystroke: &str, direction: Direction) -> String {
        let (from, to) = self.modifiers.tokens(direction);

        match self.mode {
            TranslationMode::Substring => keystroke.replace(from, to),
            TranslationMode::Token => {
                let mut parsed = Keystroke::parse(keystroke);
                if parsed.replace_modifier(from, to) == 0 {
                    return keystroke.to_string();
                }
                parsed.to_string()
            }
        }
    }

    pub fn translate_all<'a, I>(&self, keystrokes: I, direction: Direction) -> BTreeSet<String>
    where
        I: IntoIterator<Item = &'a String>,
    {
        keystrokes
            .into_iter()
            .map(|k| self.translate(k, direction))
            .collect()
    }
}

/// Translate with the default `ctrl`/`meta` pair in token mode
pub fn translate(keystroke: &str, direction: Direction) -> String {
    Translator::default().translate(keystroke, direction)
}
