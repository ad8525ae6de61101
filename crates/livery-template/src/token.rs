//! Token types produced by the template parser.

use std::fmt;

/// Horizontal direction used when padding a rendered value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlignmentDirection {
    /// Value first, padding after (`{Name,-10}`).
    Left,
    /// Padding first, value after (`{Name,10}`).
    Right,
}

/// Minimum width and direction requested by a property token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Alignment {
    direction: AlignmentDirection,
    width: usize,
}

impl Alignment {
    /// Creates an alignment of the given direction and minimum width.
    pub fn new(direction: AlignmentDirection, width: usize) -> Self {
        Self { direction, width }
    }

    /// The padding direction.
    pub fn direction(&self) -> AlignmentDirection {
        self.direction
    }

    /// The minimum visible width.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns an alignment with the same direction and `width + by`.
    ///
    /// Used when the value being padded contains characters that must not
    /// count towards the visible width, such as a line terminator.
    pub fn widen(&self, by: usize) -> Self {
        Self {
            direction: self.direction,
            width: self.width + by,
        }
    }
}

/// Capture hint carried by the first character of a property name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Destructuring {
    /// No hint.
    #[default]
    Default,
    /// `$Name`: render the value's string form.
    Stringify,
    /// `@Name`: capture the value's structure.
    Destructure,
}

impl Destructuring {
    pub(crate) fn from_hint(c: char) -> Option<Self> {
        match c {
            '@' => Some(Self::Destructure),
            '$' => Some(Self::Stringify),
            _ => None,
        }
    }
}

/// A run of literal text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextToken {
    text: String,
    start_index: usize,
}

impl TextToken {
    pub fn new(text: impl Into<String>, start_index: usize) -> Self {
        Self {
            text: text.into(),
            start_index,
        }
    }

    /// The decoded text (`{{` already collapsed to `{`).
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Byte offset of the token in the source template.
    pub fn start_index(&self) -> usize {
        self.start_index
    }
}

impl fmt::Display for TextToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// A `{Name,alignment:format}` placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyToken {
    property_name: String,
    raw_text: String,
    format: Option<String>,
    alignment: Option<Alignment>,
    destructuring: Destructuring,
    start_index: usize,
}

impl PropertyToken {
    pub fn new(property_name: impl Into<String>, raw_text: impl Into<String>) -> Self {
        Self {
            property_name: property_name.into(),
            raw_text: raw_text.into(),
            format: None,
            alignment: None,
            destructuring: Destructuring::Default,
            start_index: 0,
        }
    }

    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    pub fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = Some(alignment);
        self
    }

    pub fn with_destructuring(mut self, destructuring: Destructuring) -> Self {
        self.destructuring = destructuring;
        self
    }

    pub fn with_start_index(mut self, start_index: usize) -> Self {
        self.start_index = start_index;
        self
    }

    pub fn property_name(&self) -> &str {
        &self.property_name
    }

    /// The placeholder exactly as written, braces included.
    pub fn raw_text(&self) -> &str {
        &self.raw_text
    }

    pub fn format(&self) -> Option<&str> {
        self.format.as_deref()
    }

    pub fn alignment(&self) -> Option<Alignment> {
        self.alignment
    }

    pub fn destructuring(&self) -> Destructuring {
        self.destructuring
    }

    pub fn start_index(&self) -> usize {
        self.start_index
    }

    /// Returns the index when the name is made only of digits (`{0}`).
    pub fn positional_index(&self) -> Option<usize> {
        if self.property_name.bytes().all(|b| b.is_ascii_digit()) {
            self.property_name.parse().ok()
        } else {
            None
        }
    }

    pub fn is_positional(&self) -> bool {
        self.positional_index().is_some()
    }
}

impl fmt::Display for PropertyToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw_text)
    }
}

/// One unit of a parsed template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageTemplateToken {
    Text(TextToken),
    Property(PropertyToken),
}

impl MessageTemplateToken {
    pub fn start_index(&self) -> usize {
        match self {
            MessageTemplateToken::Text(t) => t.start_index(),
            MessageTemplateToken::Property(p) => p.start_index(),
        }
    }

    pub fn as_property(&self) -> Option<&PropertyToken> {
        match self {
            MessageTemplateToken::Property(p) => Some(p),
            MessageTemplateToken::Text(_) => None,
        }
    }
}
