use std::fmt;

use livery_template::Alignment;

use crate::error::RenderError;
use crate::event::LogEvent;
use crate::rendering::padding;

use super::TokenRenderer;

/// The platform line terminator.
#[cfg(windows)]
pub const NEWLINE: &str = "\r\n";
/// The platform line terminator.
#[cfg(not(windows))]
pub const NEWLINE: &str = "\n";

/// Writes `{NewLine}`. An alignment adds spaces before or after the line
/// break; the break itself never counts towards the width.
#[derive(Debug, Clone, Copy, Default)]
pub struct NewLineTokenRenderer {
    alignment: Option<Alignment>,
}

impl NewLineTokenRenderer {
    pub fn new(alignment: Option<Alignment>) -> Self {
        Self { alignment }
    }
}

impl TokenRenderer for NewLineTokenRenderer {
    fn render(&self, _event: &LogEvent, output: &mut dyn fmt::Write) -> Result<(), RenderError> {
        match self.alignment {
            Some(alignment) => padding::apply(output, NEWLINE, Some(alignment.widen(NEWLINE.len())))?,
            None => output.write_str(NEWLINE)?,
        }
        Ok(())
    }
}
