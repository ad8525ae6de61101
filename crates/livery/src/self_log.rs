//! Internal diagnostic channel.
//!
//! Renderers that recover from a failure locally (for example the structured
//! exception renderer falling back to plain text) report what happened here
//! instead of failing the render call.
//!
//! Every message is emitted as a `tracing` event under the
//! `livery::self_log` target. Applications that do not use `tracing` can
//! install a sink with [`enable`]:
//!
//! ```rust
//! livery::self_log::enable(|line| eprintln!("livery: {line}"));
//! # livery::self_log::disable();
//! ```
//!
//! Writing never blocks and never panics: if the sink is busy on another
//! thread the message only goes to `tracing`.

use std::fmt;
use std::sync::{Mutex, TryLockError};

use once_cell::sync::Lazy;

type SelfLogSink = Box<dyn Fn(&str) + Send + Sync>;

static SINK: Lazy<Mutex<Option<SelfLogSink>>> = Lazy::new(|| Mutex::new(None));

/// Installs `sink` as the receiver of diagnostic lines, replacing any previous one.
pub fn enable<F>(sink: F)
where
    F: Fn(&str) + Send + Sync + 'static,
{
    let mut guard = SINK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    *guard = Some(Box::new(sink));
}

/// Removes the installed sink.
pub fn disable() {
    let mut guard = SINK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    *guard = None;
}

/// Reports a diagnostic line.
pub fn write_line(args: fmt::Arguments<'_>) {
    let line = args.to_string();
    tracing::warn!(target: "livery::self_log", "{}", line);

    let guard = match SINK.try_lock() {
        Ok(guard) => guard,
        Err(TryLockError::Poisoned(poisoned)) => poisoned.into_inner(),
        Err(TryLockError::WouldBlock) => return,
    };
    if let Some(sink) = guard.as_ref() {
        sink(&line);
    }
}

/// `format!`-style shorthand for [`write_line`].
#[macro_export]
macro_rules! self_log {
    ($($arg:tt)*) => {
        $crate::self_log::write_line(format_args!($($arg)*))
    };
}
