//! Console output for rendered events.

use std::fmt;
use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use crate::error::RenderError;
use crate::event::{LogEvent, LogEventLevel};
use crate::output::TokenRenderer;
use crate::theme::Theme;

/// Writes rendered events to standard output, or to standard error from a
/// configurable level up.
///
/// With a theme that can buffer, each event is rendered to a string first
/// and written in one piece. Otherwise the renderer writes straight to the
/// locked stream, so out-of-band styling lands between the right segments.
/// Either way, concurrent `emit` calls never interleave.
///
/// A theme that styles a stream directly must style the stream the text
/// goes to; give standard error its own renderer and theme with
/// [`standard_error_renderer`](Self::standard_error_renderer).
pub struct ConsoleSink {
    standard_output: Route,
    standard_error: Option<Route>,
    standard_error_from_level: Option<LogEventLevel>,
    sync_root: Mutex<()>,
}

struct Route {
    renderer: Box<dyn TokenRenderer>,
    theme: Arc<dyn Theme>,
}

impl Route {
    fn new(renderer: impl TokenRenderer + 'static, theme: Arc<dyn Theme>) -> Self {
        Self {
            renderer: Box::new(renderer),
            theme,
        }
    }
}

impl ConsoleSink {
    pub fn new(renderer: impl TokenRenderer + 'static, theme: Arc<dyn Theme>) -> Self {
        Self {
            standard_output: Route::new(renderer, theme),
            standard_error: None,
            standard_error_from_level: None,
            sync_root: Mutex::new(()),
        }
    }

    /// Sends events at `level` or above to standard error.
    pub fn standard_error_from_level(mut self, level: LogEventLevel) -> Self {
        self.standard_error_from_level = Some(level);
        self
    }

    /// Renders standard error events with `renderer` and `theme` instead of
    /// the standard output pair.
    pub fn standard_error_renderer(
        mut self,
        renderer: impl TokenRenderer + 'static,
        theme: Arc<dyn Theme>,
    ) -> Self {
        self.standard_error = Some(Route::new(renderer, theme));
        self
    }

    /// Whether `level` goes to standard error.
    pub fn uses_standard_error(&self, level: LogEventLevel) -> bool {
        self.standard_error_from_level
            .is_some_and(|threshold| level >= threshold)
    }

    /// The theme events at `level` are rendered with.
    pub fn theme_for(&self, level: LogEventLevel) -> &Arc<dyn Theme> {
        &self.route(level).theme
    }

    /// Renders `event` and writes it to the selected stream.
    pub fn emit(&self, event: &LogEvent) -> io::Result<()> {
        if self.uses_standard_error(event.level()) {
            self.emit_to(event, &mut io::stderr())
        } else {
            self.emit_to(event, &mut io::stdout())
        }
    }

    /// Renders `event` with the renderer its level selects and writes it to
    /// `stream`.
    pub fn emit_to(&self, event: &LogEvent, stream: &mut dyn Write) -> io::Result<()> {
        let route = self.route(event.level());
        if route.theme.can_buffer() {
            let mut buffer = String::new();
            route
                .renderer
                .render(event, &mut buffer)
                .map_err(|err| into_io_error(err, None))?;
            let _guard = self.lock();
            stream.write_all(buffer.as_bytes())?;
            return stream.flush();
        }

        let _guard = self.lock();
        let mut adapter = IoAdapter {
            inner: stream,
            error: None,
        };
        if let Err(err) = route.renderer.render(event, &mut adapter) {
            return Err(into_io_error(err, adapter.error.take()));
        }
        adapter.inner.flush()
    }

    fn route(&self, level: LogEventLevel) -> &Route {
        match &self.standard_error {
            Some(route) if self.uses_standard_error(level) => route,
            _ => &self.standard_output,
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, ()> {
        self.sync_root
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl fmt::Debug for ConsoleSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConsoleSink")
            .field("theme", &self.standard_output.theme)
            .field(
                "standard_error_theme",
                &self.standard_error.as_ref().map(|route| &route.theme),
            )
            .field("standard_error_from_level", &self.standard_error_from_level)
            .finish_non_exhaustive()
    }
}

/// `fmt::Write` over an `io::Write`, keeping the underlying I/O error.
struct IoAdapter<'a> {
    inner: &'a mut dyn Write,
    error: Option<io::Error>,
}

impl fmt::Write for IoAdapter<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.inner.write_all(s.as_bytes()).map_err(|err| {
            self.error = Some(err);
            fmt::Error
        })
    }
}

fn into_io_error(err: RenderError, io_error: Option<io::Error>) -> io::Error {
    match (err, io_error) {
        (RenderError::Write(_), Some(io_error)) => io_error,
        (err, _) => io::Error::other(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::FormatProvider;
    use crate::output::{renderer_fn, OutputTemplateRenderer};
    use crate::theme::{AnsiTheme, NoTheme, SystemConsoleTheme};
    use std::fmt::Write as _;
    use std::thread;

    fn sink(theme: Arc<dyn Theme>, template: &str) -> ConsoleSink {
        let renderer =
            OutputTemplateRenderer::new(theme.clone(), template, Arc::new(FormatProvider::invariant()));
        ConsoleSink::new(renderer, theme)
    }

    struct FailingStream;

    impl Write for FailingStream {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_buffered_emit() {
        let sink = sink(Arc::new(AnsiTheme::sixteen()), "{Level:u3} {Message}\n");
        let event = LogEvent::builder(LogEventLevel::Warning, "{N} left")
            .property("N", 2)
            .build();
        let mut out: Vec<u8> = Vec::new();
        sink.emit_to(&event, &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "\x1b[33;1mWRN\x1b[0m \x1b[35m2\x1b[0m left\n"
        );
    }

    #[test]
    fn test_unbuffered_emit_writes_text() {
        let sink = sink(Arc::new(SystemConsoleTheme::literate()), "[{Level:w3}] {Message}");
        let event = LogEvent::builder(LogEventLevel::Debug, "ready").build();
        let mut out: Vec<u8> = Vec::new();
        sink.emit_to(&event, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "[dbg] ready");
    }

    #[test]
    fn test_stream_error_is_kept() {
        let sink = sink(Arc::new(SystemConsoleTheme::literate()), "{Message}");
        let event = LogEvent::builder(LogEventLevel::Debug, "ready").build();
        let err = sink.emit_to(&event, &mut FailingStream).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
    }

    #[test]
    fn test_renderer_error_becomes_io_error() {
        let failing = renderer_fn(|_, _| Err(RenderError::renderer("X", "nope")));
        let sink = ConsoleSink::new(failing, Arc::new(NoTheme));
        let err = sink
            .emit_to(&LogEvent::builder(LogEventLevel::Debug, "").build(), &mut Vec::<u8>::new())
            .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::Other);
        assert!(err.to_string().contains("nope"));
    }

    #[test]
    fn test_standard_error_threshold() {
        let sink = sink(Arc::new(NoTheme), "{Message}").standard_error_from_level(LogEventLevel::Error);
        assert!(!sink.uses_standard_error(LogEventLevel::Warning));
        assert!(sink.uses_standard_error(LogEventLevel::Error));
        assert!(sink.uses_standard_error(LogEventLevel::Fatal));
    }

    #[test]
    fn test_standard_error_renderer_used_from_threshold() {
        let sink = sink(Arc::new(NoTheme), "out:{Message}")
            .standard_error_from_level(LogEventLevel::Error)
            .standard_error_renderer(
                renderer_fn(|event, out| Ok(write!(out, "err:{}", event.level())?)),
                Arc::new(NoTheme),
            );

        let mut out: Vec<u8> = Vec::new();
        sink.emit_to(&LogEvent::builder(LogEventLevel::Warning, "fine").build(), &mut out)
            .unwrap();
        sink.emit_to(&LogEvent::builder(LogEventLevel::Fatal, "gone").build(), &mut out)
            .unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "out:fineerr:Fatal");
    }

    #[test]
    fn test_standard_error_renderer_ignored_without_threshold() {
        let sink = sink(Arc::new(NoTheme), "{Message}").standard_error_renderer(
            renderer_fn(|_, out| Ok(out.write_str("err")?)),
            Arc::new(NoTheme),
        );
        let mut out: Vec<u8> = Vec::new();
        sink.emit_to(&LogEvent::builder(LogEventLevel::Fatal, "x").build(), &mut out)
            .unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "x");
    }

    #[test]
    fn test_shared_across_threads() {
        let sink = sink(Arc::new(NoTheme), "{Message}\n");
        let out = Mutex::new(Vec::<u8>::new());
        thread::scope(|scope| {
            for worker in 0..4 {
                let sink = &sink;
                let out = &out;
                scope.spawn(move || {
                    for i in 0..25 {
                        let event = LogEvent::builder(LogEventLevel::Information, "{W}-{I}")
                            .property("W", worker)
                            .property("I", i)
                            .build();
                        let mut line: Vec<u8> = Vec::new();
                        sink.emit_to(&event, &mut line).unwrap();
                        out.lock().unwrap().extend(line);
                    }
                });
            }
        });
        let text = String::from_utf8(out.into_inner().unwrap()).unwrap();
        assert_eq!(text.lines().count(), 100);
        assert!(text.lines().all(|line| line.split('-').count() == 2));
    }
}
