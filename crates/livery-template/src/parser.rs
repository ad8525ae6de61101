//! Template tokenizer.
//!
//! The parser never fails: anything that does not form a valid placeholder is
//! kept as literal text, so a typo in a template degrades to visible braces
//! instead of a lost log line.

use crate::token::{
    Alignment, AlignmentDirection, Destructuring, MessageTemplateToken, PropertyToken, TextToken,
};

/// Splits `template` into text and property tokens.
pub(crate) fn tokenize(template: &str) -> Vec<MessageTemplateToken> {
    let mut tokens = Vec::new();
    let mut next = 0;

    while next < template.len() {
        let (text, after_text) = parse_text(template, next);
        if !text.is_empty() {
            tokens.push(MessageTemplateToken::Text(TextToken::new(text, next)));
        }
        next = after_text;
        if next == template.len() {
            break;
        }

        let (token, after_property) = parse_property(template, next);
        tokens.push(token);
        next = after_property;
    }

    tokens
}

/// Reads literal text up to the next unescaped `{`.
fn parse_text(template: &str, start: usize) -> (String, usize) {
    let bytes = template.as_bytes();
    let mut text = String::new();
    let mut i = start;

    while i < template.len() {
        match bytes[i] {
            b'{' => {
                if bytes.get(i + 1) == Some(&b'{') {
                    text.push('{');
                    i += 2;
                } else {
                    break;
                }
            }
            b'}' => {
                text.push('}');
                i += if bytes.get(i + 1) == Some(&b'}') { 2 } else { 1 };
            }
            _ => {
                // `{` and `}` are ASCII, so the next char boundary is safe to find.
                let ch = template[i..].chars().next().unwrap_or_default();
                text.push(ch);
                i += ch.len_utf8().max(1);
            }
        }
    }

    (text, i)
}

/// Reads a placeholder starting at the `{` at `start`.
fn parse_property(template: &str, start: usize) -> (MessageTemplateToken, usize) {
    let mut end = start + 1;
    for (offset, ch) in template[start + 1..].char_indices() {
        if !is_valid_in_property_tag(ch) {
            end = start + 1 + offset;
            break;
        }
        end = start + 1 + offset + ch.len_utf8();
    }

    if end >= template.len() || template.as_bytes()[end] != b'}' {
        let text = TextToken::new(&template[start..end], start);
        return (MessageTemplateToken::Text(text), end);
    }

    let next = end + 1;
    let raw_text = &template[start..next];
    let content = &template[start + 1..end];
    let literal = || MessageTemplateToken::Text(TextToken::new(raw_text, start));

    match property_from_content(content, raw_text, start) {
        Some(token) => (MessageTemplateToken::Property(token), next),
        None => (literal(), next),
    }
}

fn property_from_content(content: &str, raw_text: &str, start: usize) -> Option<PropertyToken> {
    if content.is_empty() {
        return None;
    }

    let (name, format, alignment) = split_tag_content(content)?;

    let mut destructuring = Destructuring::Default;
    let mut name = name;
    if let Some(hint) = name.chars().next().and_then(Destructuring::from_hint) {
        destructuring = hint;
        name = &name[1..];
    }

    if name.is_empty() || !name.chars().all(is_valid_in_property_name) {
        return None;
    }

    if let Some(format) = format {
        if !format.chars().all(is_valid_in_format) {
            return None;
        }
    }

    let mut token = PropertyToken::new(name, raw_text)
        .with_destructuring(destructuring)
        .with_start_index(start);

    if let Some(alignment) = alignment {
        token = token.with_alignment(parse_alignment(alignment)?);
    }
    if let Some(format) = format {
        token = token.with_format(format);
    }

    Some(token)
}

/// Splits `Name,align:format` into its parts.
///
/// Returns `None` when a separator is present with nothing after it where
/// something is required (`{A,}` or `{A,:x}`).
fn split_tag_content(content: &str) -> Option<(&str, Option<&str>, Option<&str>)> {
    let format_delim = content.find(':');
    let alignment_delim = content.find(',');

    fn non_empty(s: &str) -> Option<&str> {
        if s.is_empty() {
            None
        } else {
            Some(s)
        }
    }

    match (alignment_delim, format_delim) {
        (None, None) => Some((content, None, None)),
        (None, Some(f)) => Some((&content[..f], non_empty(&content[f + 1..]), None)),
        (Some(a), Some(f)) if a > f => Some((&content[..f], non_empty(&content[f + 1..]), None)),
        (Some(a), None) => {
            let alignment = non_empty(&content[a + 1..])?;
            Some((&content[..a], None, Some(alignment)))
        }
        (Some(a), Some(f)) => {
            let alignment = non_empty(&content[a + 1..f])?;
            Some((&content[..a], non_empty(&content[f + 1..]), Some(alignment)))
        }
    }
}

fn parse_alignment(text: &str) -> Option<Alignment> {
    if !text.chars().all(|c| c.is_ascii_digit() || c == '-') {
        return None;
    }

    let (direction, digits) = match text.rfind('-') {
        None => (AlignmentDirection::Right, text),
        Some(0) => (AlignmentDirection::Left, &text[1..]),
        Some(_) => return None,
    };

    let width: usize = digits.parse().ok()?;
    if width == 0 {
        return None;
    }
    Some(Alignment::new(direction, width))
}

fn is_valid_in_property_name(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn is_valid_in_format(c: char) -> bool {
    c != '}' && (c.is_alphanumeric() || c.is_ascii_punctuation() || c == ' ')
}

fn is_valid_in_property_tag(c: char) -> bool {
    Destructuring::from_hint(c).is_some()
        || is_valid_in_property_name(c)
        || is_valid_in_format(c)
        || c == ':'
}
