//! Parsed templates.

use std::fmt;

use crate::parser::tokenize;
use crate::token::{MessageTemplateToken, PropertyToken};

/// A template parsed once into literal and property tokens.
///
/// The same type serves both output templates (`"[{Level:u3}] {Message}"`)
/// and event message templates (`"Hello {Name}"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageTemplate {
    text: String,
    tokens: Vec<MessageTemplateToken>,
}

impl MessageTemplate {
    /// Parses `text`. Never fails; malformed placeholders become literal text.
    pub fn parse(text: &str) -> Self {
        Self {
            text: text.to_string(),
            tokens: tokenize(text),
        }
    }

    /// A template with no tokens.
    pub fn empty() -> Self {
        Self {
            text: String::new(),
            tokens: Vec::new(),
        }
    }

    /// The source text the template was parsed from.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn tokens(&self) -> &[MessageTemplateToken] {
        &self.tokens
    }

    /// Property tokens in template order.
    pub fn property_tokens(&self) -> impl Iterator<Item = &PropertyToken> {
        self.tokens.iter().filter_map(MessageTemplateToken::as_property)
    }

    /// Whether any placeholder refers to `name`.
    pub fn contains_property(&self, name: &str) -> bool {
        self.property_tokens().any(|p| p.property_name() == name)
    }

    /// Renders the template as plain text.
    ///
    /// `lookup` returns the display text for a property token, or `None` when
    /// the property is missing, in which case the placeholder's raw text is
    /// written instead.
    pub fn render_with<F>(&self, mut lookup: F) -> String
    where
        F: FnMut(&PropertyToken) -> Option<String>,
    {
        let mut out = String::with_capacity(self.text.len());
        for token in &self.tokens {
            match token {
                MessageTemplateToken::Text(t) => out.push_str(t.text()),
                MessageTemplateToken::Property(p) => match lookup(p) {
                    Some(value) => out.push_str(&value),
                    None => out.push_str(p.raw_text()),
                },
            }
        }
        out
    }
}

impl Default for MessageTemplate {
    fn default() -> Self {
        Self::empty()
    }
}

impl From<&str> for MessageTemplate {
    fn from(text: &str) -> Self {
        Self::parse(text)
    }
}

impl fmt::Display for MessageTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
