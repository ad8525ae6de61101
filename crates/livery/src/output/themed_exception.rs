use std::fmt;
use std::sync::Arc;

use crate::error::RenderError;
use crate::event::{ExceptionInfo, LogEvent, END_OF_INNER_EXCEPTION};
use crate::rendering::write_styled;
use crate::self_log;
use crate::theme::{Theme, ThemeStyle};

use super::stack_trace::{parse_stack_trace, StackFrame, StackTraceError, StackTraceLine};
use super::{TokenRenderer, NEWLINE};

/// Inner exceptions nested deeper than this are not rendered.
const MAX_INNER_DEPTH: usize = 16;

const INDENT: &str = "   ";
const FRAME_PREFIX: &str = "   at ";
const INNER_PREFIX: &str = "   ---> ";

/// Renders `{Exception}` with each part of the exception and of every stack
/// frame in its own style.
///
/// All stack traces in the chain are decomposed before anything is written.
/// If decomposition or writing fails, the failure goes to the self-log and
/// the fallback renderer (if any) renders the exception instead. The
/// failure never reaches the caller.
pub struct ThemedExceptionTokenRenderer {
    theme: Arc<dyn Theme>,
    fallback: Option<Box<dyn TokenRenderer>>,
}

struct ParsedException<'a> {
    info: &'a ExceptionInfo,
    lines: Vec<StackTraceLine>,
    inner: Option<Box<ParsedException<'a>>>,
}

enum Failure {
    Parse(StackTraceError),
    Write,
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Failure::Parse(err) => write!(f, "could not decompose stack trace: {err}"),
            Failure::Write => f.write_str("could not write styled exception"),
        }
    }
}

impl ThemedExceptionTokenRenderer {
    pub fn new(theme: Arc<dyn Theme>) -> Self {
        Self {
            theme,
            fallback: None,
        }
    }

    /// Renders with `fallback` when the exception cannot be styled.
    pub fn with_fallback(mut self, fallback: impl TokenRenderer + 'static) -> Self {
        self.fallback = Some(Box::new(fallback));
        self
    }

    fn parse(info: &ExceptionInfo, depth: usize) -> Result<ParsedException<'_>, StackTraceError> {
        let lines = match info.stack_trace() {
            Some(trace) => parse_stack_trace(trace)?,
            None => Vec::new(),
        };
        let inner = match info.inner() {
            Some(inner) if depth < MAX_INNER_DEPTH => Some(Box::new(Self::parse(inner, depth + 1)?)),
            _ => None,
        };
        Ok(ParsedException { info, lines, inner })
    }

    fn write_exception(&self, parsed: &ParsedException<'_>, output: &mut dyn fmt::Write) -> fmt::Result {
        let theme = &*self.theme;
        write_styled(theme, output, ThemeStyle::SecondaryText, parsed.info.type_name())?;
        write_styled(theme, output, ThemeStyle::TertiaryText, ": ")?;
        write_styled(theme, output, ThemeStyle::Text, parsed.info.message())?;
        output.write_str(NEWLINE)?;

        if let Some(inner) = &parsed.inner {
            write_styled(theme, output, ThemeStyle::TertiaryText, INNER_PREFIX)?;
            self.write_exception(inner, output)?;
            output.write_str(INDENT)?;
            write_styled(theme, output, ThemeStyle::TertiaryText, END_OF_INNER_EXCEPTION)?;
            output.write_str(NEWLINE)?;
        }

        for line in &parsed.lines {
            match line {
                StackTraceLine::Frame(frame) => self.write_frame(frame, output)?,
                StackTraceLine::Annotation(text) => {
                    output.write_str(INDENT)?;
                    write_styled(theme, output, ThemeStyle::TertiaryText, text)?;
                }
            }
            output.write_str(NEWLINE)?;
        }
        Ok(())
    }

    fn write_frame(&self, frame: &StackFrame, output: &mut dyn fmt::Write) -> fmt::Result {
        let theme = &*self.theme;
        write_styled(theme, output, ThemeStyle::TertiaryText, FRAME_PREFIX)?;
        match frame {
            StackFrame::Opaque(text) => write_styled(theme, output, ThemeStyle::TertiaryText, text),
            StackFrame::Structured {
                declaring_type,
                method,
                parameters,
                file,
                line,
            } => {
                write_styled(theme, output, ThemeStyle::Text, declaring_type)?;
                write_styled(theme, output, ThemeStyle::TertiaryText, ".")?;
                write_styled(theme, output, ThemeStyle::Name, method)?;
                write_styled(theme, output, ThemeStyle::TertiaryText, parameters)?;
                write_styled(theme, output, ThemeStyle::TertiaryText, " in ")?;
                write_styled(theme, output, ThemeStyle::String, file)?;
                write_styled(theme, output, ThemeStyle::TertiaryText, ":line ")?;
                write_styled(theme, output, ThemeStyle::Number, &line.to_string())
            }
        }
    }
}

impl TokenRenderer for ThemedExceptionTokenRenderer {
    fn render(&self, event: &LogEvent, output: &mut dyn fmt::Write) -> Result<(), RenderError> {
        let Some(exception) = event.exception() else {
            return Ok(());
        };

        let outcome = Self::parse(exception, 0)
            .map_err(Failure::Parse)
            .and_then(|parsed| self.write_exception(&parsed, output).map_err(|_| Failure::Write));

        let Err(failure) = outcome else {
            return Ok(());
        };
        self_log!(
            "failed to render {} with styling, {}: {}",
            exception.type_name(),
            if self.fallback.is_some() { "falling back" } else { "omitting it" },
            failure
        );
        match &self.fallback {
            Some(fallback) => fallback.render(event, output),
            None => Ok(()),
        }
    }
}

impl fmt::Debug for ThemedExceptionTokenRenderer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThemedExceptionTokenRenderer")
            .field("theme", &self.theme)
            .field("has_fallback", &self.fallback.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::LogEventLevel;
    use crate::output::ExceptionTokenRenderer;
    use crate::theme::{AnsiTheme, NoTheme};
    use serial_test::serial;
    use std::collections::HashMap;
    use std::sync::Mutex;

    const TRACE: &str = "   at Shop.Cart.Add(Int32 qty) in /src/Cart.cs:line 42\n   at Shop.Program.Main()";

    fn event(exception: ExceptionInfo) -> LogEvent {
        LogEvent::builder(LogEventLevel::Error, "checkout failed")
            .exception(exception)
            .build()
    }

    fn tagged_theme() -> Arc<dyn Theme> {
        let styles: HashMap<ThemeStyle, String> = ThemeStyle::ALL
            .iter()
            .map(|style| (*style, format!("<{}>", style.name())))
            .collect();
        Arc::new(AnsiTheme::new(styles))
    }

    fn render(renderer: &ThemedExceptionTokenRenderer, event: &LogEvent) -> String {
        let mut out = String::new();
        renderer.render(event, &mut out).unwrap();
        out
    }

    #[test]
    fn test_plain_layout() {
        let renderer = ThemedExceptionTokenRenderer::new(Arc::new(NoTheme));
        let out = render(
            &renderer,
            &event(ExceptionInfo::new("Shop.CartException", "cart is locked").with_stack_trace(TRACE)),
        );
        assert_eq!(
            out,
            format!(
                "Shop.CartException: cart is locked{NEWLINE}\
                 \x20  at Shop.Cart.Add(Int32 qty) in /src/Cart.cs:line 42{NEWLINE}\
                 \x20  at Shop.Program.Main(){NEWLINE}"
            )
        );
    }

    #[test]
    fn test_each_part_styled() {
        let renderer = ThemedExceptionTokenRenderer::new(tagged_theme());
        let out = render(
            &renderer,
            &event(ExceptionInfo::new("Shop.CartException", "cart is locked").with_stack_trace(TRACE)),
        );
        let r = "\x1b[0m";
        assert!(out.starts_with(&format!(
            "<secondary_text>Shop.CartException{r}<tertiary_text>: {r}<text>cart is locked{r}"
        )));
        assert!(out.contains(&format!(
            "<tertiary_text>   at {r}<text>Shop.Cart{r}<tertiary_text>.{r}<name>Add{r}\
             <tertiary_text>(Int32 qty){r}<tertiary_text> in {r}<string>/src/Cart.cs{r}\
             <tertiary_text>:line {r}<number>42{r}"
        )));
        assert!(out.contains(&format!("<tertiary_text>   at {r}<tertiary_text>Shop.Program.Main(){r}")));
    }

    #[test]
    fn test_inner_exception_before_outer_frames() {
        let renderer = ThemedExceptionTokenRenderer::new(Arc::new(NoTheme));
        let info = ExceptionInfo::new("Outer", "wrapped")
            .with_stack_trace("   at A.Outer() in a.cs:line 1")
            .with_inner(ExceptionInfo::new("Inner", "root cause").with_stack_trace("   at B.Inner() in b.cs:line 2"));
        let out = render(&renderer, &event(info));
        let expected = [
            "Outer: wrapped",
            "   ---> Inner: root cause",
            "   at B.Inner() in b.cs:line 2",
            "   --- End of inner exception stack trace ---",
            "   at A.Outer() in a.cs:line 1",
        ]
        .map(|line| format!("{line}{NEWLINE}"))
        .concat();
        assert_eq!(out, expected);
    }

    #[test]
    fn test_no_exception_no_output() {
        let renderer = ThemedExceptionTokenRenderer::new(tagged_theme());
        let out = render(&renderer, &LogEvent::builder(LogEventLevel::Information, "ok").build());
        assert!(out.is_empty());
    }

    #[test]
    #[serial(self_log)]
    fn test_malformed_trace_falls_back() {
        let reported = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&reported);
        crate::self_log::enable(move |line| sink.lock().unwrap().push(line.to_string()));

        let renderer = ThemedExceptionTokenRenderer::new(Arc::new(NoTheme))
            .with_fallback(ExceptionTokenRenderer::new(Arc::new(NoTheme)));
        let info = ExceptionInfo::new("Boom", "bad frame").with_stack_trace("   at A.B() in x.cs:line ??");
        let out = render(&renderer, &event(info));
        crate::self_log::disable();

        assert_eq!(
            out,
            format!("Boom: bad frame{NEWLINE}   at A.B() in x.cs:line ??{NEWLINE}")
        );
        let reported = reported.lock().unwrap();
        assert_eq!(reported.len(), 1);
        assert!(reported[0].contains("Boom"));
    }

    #[test]
    #[serial(self_log)]
    fn test_malformed_trace_without_fallback_is_omitted() {
        let renderer = ThemedExceptionTokenRenderer::new(Arc::new(NoTheme));
        let info = ExceptionInfo::new("Boom", "bad").with_stack_trace("   at nonsense in x.cs:line 1");
        assert_eq!(render(&renderer, &event(info)), "");
    }
}
