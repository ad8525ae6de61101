//! Output templates and the token renderers they compile to.
//!
//! An output template such as
//! `[{Timestamp:HH:mm:ss} {Level:u3}] {Message:lj}{NewLine}{Exception}` is
//! parsed once into tokens. Every token becomes a [`TokenRenderer`]:
//!
//! | Token | Renderer |
//! |-------|----------|
//! | literal text | [`TextTokenRenderer`] |
//! | `{Timestamp}` | [`TimestampTokenRenderer`] |
//! | `{Level}` | [`LevelTokenRenderer`] |
//! | `{Message}` | [`MessageTemplateOutputTokenRenderer`] |
//! | `{Properties}` | [`PropertiesTokenRenderer`] |
//! | `{NewLine}` | [`NewLineTokenRenderer`] |
//! | `{Exception}` | [`ThemedExceptionTokenRenderer`], falling back to [`ExceptionTokenRenderer`] |
//! | anything else | [`EventPropertyTokenRenderer`] |
//!
//! [`OutputTemplateRenderer`] runs the chain. A factory passed to
//! [`OutputTemplateRenderer::with_factory`] can replace or wrap any of the
//! placeholder renderers, for example with a [`BufferScrubbingRenderer`] or
//! an [`EventSwitchingRenderer`].

mod event_property;
mod exception;
mod factory;
mod level;
mod message;
mod newline;
mod properties;
mod renderer;
mod scrubbing;
mod stack_trace;
mod switching;
mod template_renderer;
mod text;
mod themed_exception;
mod timestamp;

pub use event_property::EventPropertyTokenRenderer;
pub use exception::ExceptionTokenRenderer;
pub use factory::{
    is_standard_property, new_event_property_renderer, new_standard_renderer, RendererContext,
};
pub use level::LevelTokenRenderer;
pub use message::MessageTemplateOutputTokenRenderer;
pub use newline::{NewLineTokenRenderer, NEWLINE};
pub use properties::PropertiesTokenRenderer;
pub use renderer::{renderer_fn, FnTokenRenderer, TokenRenderer};
pub use scrubbing::BufferScrubbingRenderer;
pub use stack_trace::{parse_stack_trace, StackFrame, StackTraceError, StackTraceLine};
pub use switching::EventSwitchingRenderer;
pub use template_renderer::{FailurePolicy, OutputTemplateRenderer};
pub use text::TextTokenRenderer;
pub use themed_exception::ThemedExceptionTokenRenderer;
pub use timestamp::TimestampTokenRenderer;
