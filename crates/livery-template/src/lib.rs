//! Message and output template parser.
//!
//! Templates mix literal text with `{Name}` placeholders. A placeholder may
//! carry a capture hint, an alignment and a format specifier:
//!
//! ```text
//! {[@|$]Name[,[-]width][:format]}
//! ```
//!
//! - `@Name` captures structure, `$Name` forces the string form
//! - `,10` right-aligns to 10 columns, `,-10` left-aligns
//! - `:format` is passed verbatim to whatever renders the value
//! - `{{` and `}}` produce literal braces
//!
//! # Example
//!
//! ```rust
//! use livery_template::{AlignmentDirection, MessageTemplate, MessageTemplateToken};
//!
//! let template = MessageTemplate::parse("[{Level,-5:u3}] {Message}");
//! let level = template.property_tokens().next().unwrap();
//!
//! assert_eq!(level.property_name(), "Level");
//! assert_eq!(level.format(), Some("u3"));
//! assert_eq!(level.alignment().unwrap().direction(), AlignmentDirection::Left);
//! assert!(matches!(template.tokens()[0], MessageTemplateToken::Text(_)));
//! ```
//!
//! Parsing never fails. Anything that does not form a valid placeholder is
//! kept as literal text.

mod parser;
mod template;
mod token;

pub use template::MessageTemplate;
pub use token::{
    Alignment, AlignmentDirection, Destructuring, MessageTemplateToken, PropertyToken, TextToken,
};
