//! Decomposition of raw stack trace text into frames.

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

static FRAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?P<type>.+?)\.(?P<method>\.?[^.(\s]+)(?P<params>\(.*\))(?:\s+in\s+(?P<file>.+):line\s+(?P<line>\S+))?$",
    )
    .expect("frame pattern is valid")
});

const FRAME_PREFIX: &str = "at ";

/// One `at ...` line of a stack trace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StackFrame {
    /// A frame with a recoverable source location.
    Structured {
        declaring_type: String,
        method: String,
        parameters: String,
        file: String,
        line: u32,
    },
    /// Everything after `at `, kept as-is.
    Opaque(String),
}

/// A stack trace line: a frame, or any other text such as
/// `--- End of stack trace from previous location ---`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StackTraceLine {
    Frame(StackFrame),
    Annotation(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StackTraceError {
    #[error("invalid line number {value:?} in frame {frame:?}")]
    InvalidLineNumber { frame: String, value: String },

    #[error("cannot decompose frame {frame:?}")]
    MalformedFrame { frame: String },
}

/// Splits `trace` into lines and decomposes each frame.
///
/// Frames without a file and line are opaque. A frame that names a source
/// location which cannot be read is an error, so the caller can fall back
/// to printing the trace verbatim.
///
/// ```rust
/// use livery::output::{parse_stack_trace, StackFrame, StackTraceLine};
///
/// let lines = parse_stack_trace("   at App.Run(String[] args) in /src/App.cs:line 12").unwrap();
/// assert!(matches!(
///     &lines[0],
///     StackTraceLine::Frame(StackFrame::Structured { line: 12, .. })
/// ));
/// ```
pub fn parse_stack_trace(trace: &str) -> Result<Vec<StackTraceLine>, StackTraceError> {
    trace
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| match line.strip_prefix(FRAME_PREFIX) {
            Some(frame) => parse_frame(frame.trim_start()).map(StackTraceLine::Frame),
            None => Ok(StackTraceLine::Annotation(line.to_string())),
        })
        .collect()
}

fn parse_frame(text: &str) -> Result<StackFrame, StackTraceError> {
    let Some(captures) = FRAME.captures(text) else {
        if text.contains(" in ") && text.contains(":line ") {
            return Err(StackTraceError::MalformedFrame {
                frame: text.to_string(),
            });
        }
        return Ok(StackFrame::Opaque(text.to_string()));
    };

    let (Some(file), Some(line)) = (captures.name("file"), captures.name("line")) else {
        return Ok(StackFrame::Opaque(text.to_string()));
    };

    let line = line
        .as_str()
        .parse()
        .map_err(|_| StackTraceError::InvalidLineNumber {
            frame: text.to_string(),
            value: line.as_str().to_string(),
        })?;

    Ok(StackFrame::Structured {
        declaring_type: captures["type"].to_string(),
        method: captures["method"].to_string(),
        parameters: captures["params"].to_string(),
        file: file.as_str().to_string(),
        line,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_structured_frame() {
        let lines = parse_stack_trace(
            "   at Shop.Orders.OrderService.Place(Int32 id, String sku) in /src/Orders/OrderService.cs:line 88",
        )
        .unwrap();
        assert_eq!(
            lines,
            vec![StackTraceLine::Frame(StackFrame::Structured {
                declaring_type: "Shop.Orders.OrderService".to_string(),
                method: "Place".to_string(),
                parameters: "(Int32 id, String sku)".to_string(),
                file: "/src/Orders/OrderService.cs".to_string(),
                line: 88,
            })]
        );
    }

    #[test]
    fn test_constructor_frames_keep_leading_dot_in_method() {
        let lines = parse_stack_trace(
            "   at Shop.Cart..ctor(Int32 x) in f.cs:line 3\n   at Shop.Cart..cctor() in f.cs:line 1",
        )
        .unwrap();
        let methods: Vec<_> = lines
            .iter()
            .map(|line| match line {
                StackTraceLine::Frame(StackFrame::Structured {
                    declaring_type,
                    method,
                    ..
                }) => (declaring_type.as_str(), method.as_str()),
                other => panic!("unexpected line {other:?}"),
            })
            .collect();
        assert_eq!(methods, vec![("Shop.Cart", ".ctor"), ("Shop.Cart", ".cctor")]);
    }

    #[test]
    fn test_frame_without_location_is_opaque() {
        let lines = parse_stack_trace("   at Shop.Program.Main()\n   at lambda_method(Closure)").unwrap();
        assert_eq!(
            lines,
            vec![
                StackTraceLine::Frame(StackFrame::Opaque("Shop.Program.Main()".to_string())),
                StackTraceLine::Frame(StackFrame::Opaque("lambda_method(Closure)".to_string())),
            ]
        );
    }

    #[test]
    fn test_annotations_and_blank_lines() {
        let lines = parse_stack_trace(
            "   at A.B()\n\n--- End of stack trace from previous location ---\n   at C.D()",
        )
        .unwrap();
        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[1],
            StackTraceLine::Annotation("--- End of stack trace from previous location ---".to_string())
        );
    }

    #[test]
    fn test_bad_line_number() {
        let err = parse_stack_trace("   at A.B() in x.cs:line twelve").unwrap_err();
        assert!(matches!(err, StackTraceError::InvalidLineNumber { ref value, .. } if value == "twelve"));
    }

    #[test]
    fn test_malformed_location() {
        let err = parse_stack_trace("   at broken in x.cs:line 3").unwrap_err();
        assert!(matches!(err, StackTraceError::MalformedFrame { .. }));
    }
}
