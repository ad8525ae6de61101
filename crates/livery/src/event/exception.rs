//! Exceptions attached to log events.

use std::error::Error;
use std::fmt;

/// Description of a failure attached to a log event.
///
/// The stack trace is kept as raw text; structural decomposition happens at
/// render time (see [`crate::output::parse_stack_trace`]).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExceptionInfo {
    type_name: String,
    message: String,
    stack_trace: Option<String>,
    inner: Option<Box<ExceptionInfo>>,
}

impl ExceptionInfo {
    pub fn new(type_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            message: message.into(),
            stack_trace: None,
            inner: None,
        }
    }

    /// Captures a Rust error and its `source()` chain.
    ///
    /// The outermost error's type name comes from `E`; sources are behind
    /// `dyn Error` and are recorded under the generic name `Error`.
    pub fn from_error<E: Error + ?Sized>(err: &E) -> Self {
        let mut info = Self::new(std::any::type_name::<E>(), err.to_string());
        info.inner = err.source().map(|source| Box::new(Self::from_source(source, 1)));
        info
    }

    fn from_source(err: &(dyn Error + 'static), depth: usize) -> Self {
        let mut info = Self::new("Error", err.to_string());
        if depth < MAX_SOURCE_DEPTH {
            info.inner = err
                .source()
                .map(|source| Box::new(Self::from_source(source, depth + 1)));
        }
        info
    }

    pub fn with_stack_trace(mut self, stack_trace: impl Into<String>) -> Self {
        self.stack_trace = Some(stack_trace.into());
        self
    }

    pub fn with_inner(mut self, inner: ExceptionInfo) -> Self {
        self.inner = Some(Box::new(inner));
        self
    }

    /// Fully qualified type name, e.g. `System.InvalidOperationException`.
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn stack_trace(&self) -> Option<&str> {
        self.stack_trace.as_deref()
    }

    pub fn inner(&self) -> Option<&ExceptionInfo> {
        self.inner.as_deref()
    }
}

const MAX_SOURCE_DEPTH: usize = 32;

/// Line written between an inner exception's frames and the outer ones.
pub const END_OF_INNER_EXCEPTION: &str = "--- End of inner exception stack trace ---";

impl fmt::Display for ExceptionInfo {
    /// `Type: message ---> Inner: message`, followed by the innermost frames
    /// first, each block closed by an end-of-inner marker.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.type_name, self.message)?;
        if let Some(inner) = &self.inner {
            write!(f, " ---> {}", inner)?;
            write!(f, "\n   {}", END_OF_INNER_EXCEPTION)?;
        }
        if let Some(trace) = &self.stack_trace {
            for line in trace.lines().filter(|l| !l.trim().is_empty()) {
                write!(f, "\n{}", line)?;
            }
        }
        Ok(())
    }
}
