//! Keystroke lexing
//!
//! A keystroke such as `ctrl shift A` or `meta+alt+F4` is split into parts and
//! separators. Every part that is followed by a separator is a modifier; a
//! trailing part is the key. Separators are kept verbatim so a keystroke
//! always prints back exactly as it was written.

use logos::Logos;
use std::fmt;

#[derive(Logos, Debug, PartialEq, Clone, Copy)]
enum Token {
    #[regex(r"[+ \t\r\n]+")]
    Separator,

    #[regex(r"[^+ \t\r\n]+")]
    Part,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Part(String),
    Separator(String),
}

impl Segment {
    fn as_str(&self) -> &str {
        match self {
            Segment::Part(s) | Segment::Separator(s) => s.as_str(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keystroke {
    segments: Vec<Segment>,
}

impl Keystroke {
    /// Lex a keystroke string. Never fails: any text is a valid keystroke.
    ///
    /// # Examples
    /// ```
    /// use keymap_core::Keystroke;
    ///
    /// let keystroke = Keystroke::parse("ctrl shift A");
    /// assert_eq!(keystroke.modifiers().collect::<Vec<_>>(), vec!["ctrl", "shift"]);
    /// assert_eq!(keystroke.key(), Some("A"));
    /// ```
    pub fn parse(input: &str) -> Self {
        let mut lexer = Token::lexer(input);
        let mut segments = Vec::new();

        while let Some(token) = lexer.next() {
            let text = lexer.slice().to_string();
            match token {
                Ok(Token::Separator) => segments.push(Segment::Separator(text)),
                // Both patterns together cover every character
                Ok(Token::Part) | Err(_) => segments.push(Segment::Part(text)),
            }
        }

        Self { segments }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Parts followed by a separator, in order
    pub fn modifiers(&self) -> impl Iterator<Item = &str> {
        self.segments
            .windows(2)
            .filter_map(|pair| match pair {
                [Segment::Part(part), Segment::Separator(_)] => Some(part.as_str()),
                _ => None,
            })
    }

    /// The terminal part. `None` when the keystroke is empty or ends with a
    /// separator, as in `ctrl++` where the key is the plus sign itself.
    pub fn key(&self) -> Option<&str> {
        match self.segments.last() {
            Some(Segment::Part(part)) => Some(part.as_str()),
            _ => None,
        }
    }

    pub fn has_modifier(&self, token: &str) -> bool {
        self.modifiers().any(|m| m == token)
    }

    /// Replace every modifier equal to `from` with `to`, leaving the key and
    /// separators untouched. Returns the number of replacements.
    pub fn replace_modifier(&mut self, from: &str, to: &str) -> usize {
        let last = self.segments.len().saturating_sub(1);
        let mut replaced = 0;

        for (index, segment) in self.segments.iter_mut().enumerate() {
            if index == last {
                break;
            }
            if let Segment::Part(part) = segment {
                if part.as_str() == from {
                    *part = to.to_string();
                    replaced += 1;
                }
            }
        }

        replaced
    }
}

impl fmt::Display for Keystroke {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.segments {
            f.write_str(segment.as_str())?;
        }
        Ok(())
    }
}
