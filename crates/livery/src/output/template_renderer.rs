//! Output template compilation and rendering.

use std::convert::Infallible;
use std::fmt;
use std::sync::Arc;

use livery_template::{MessageTemplate, MessageTemplateToken};

use crate::error::{ConfigError, RenderError};
use crate::event::LogEvent;
use crate::format::FormatProvider;
use crate::rendering::write_styled;
use crate::self_log;
use crate::theme::{Theme, ThemeStyle};

use super::factory::{new_event_property_renderer, new_standard_renderer, RendererContext};
use super::{TextTokenRenderer, TokenRenderer};

/// What a render call does when one of its token renderers fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Stop and return the error. Output written so far stays written.
    #[default]
    Propagate,
    /// Write the failing placeholder's raw text in the `Invalid` style,
    /// report the failure to the self-log and carry on with the next token.
    /// Destination write failures still stop the call.
    Placeholder,
}

struct CompiledToken {
    raw_text: String,
    renderer: Box<dyn TokenRenderer>,
}

/// An output template compiled into one renderer per token.
///
/// Compile once, render many times. Rendering never mutates the compiled
/// chain, so one instance can be shared across threads.
///
/// ```rust
/// use std::sync::Arc;
/// use livery::event::{LogEvent, LogEventLevel};
/// use livery::format::FormatProvider;
/// use livery::output::OutputTemplateRenderer;
/// use livery::theme::NoTheme;
///
/// let renderer = OutputTemplateRenderer::new(
///     Arc::new(NoTheme),
///     "{Level:u3} {Message:lj}",
///     Arc::new(FormatProvider::invariant()),
/// );
/// let event = LogEvent::builder(LogEventLevel::Warning, "Disk {Pct}% full")
///     .property("Pct", 91)
///     .build();
/// assert_eq!(renderer.render_to_string(&event).unwrap(), "WRN Disk 91% full");
/// ```
pub struct OutputTemplateRenderer {
    template: MessageTemplate,
    theme: Arc<dyn Theme>,
    renderers: Vec<CompiledToken>,
    failure_policy: FailurePolicy,
}

impl OutputTemplateRenderer {
    /// Compiles `template` with the standard renderers.
    pub fn new(theme: Arc<dyn Theme>, template: &str, format_provider: Arc<FormatProvider>) -> Self {
        let template = MessageTemplate::parse(template);
        let renderers = Self::compile(&template, &theme, &format_provider, |ctx| {
            Ok::<_, Infallible>(new_standard_renderer(ctx))
        })
        .unwrap_or_else(|never| match never {});
        Self {
            renderers,
            template,
            theme,
            failure_policy: FailurePolicy::default(),
        }
    }

    /// Compiles `template`, asking `factory` for each placeholder's renderer.
    ///
    /// `Ok(None)` from the factory selects the event property renderer.
    /// A factory error aborts compilation.
    pub fn with_factory<F>(
        theme: Arc<dyn Theme>,
        template: &str,
        format_provider: Arc<FormatProvider>,
        factory: F,
    ) -> Result<Self, ConfigError>
    where
        F: Fn(&RendererContext<'_>) -> Result<Option<Box<dyn TokenRenderer>>, ConfigError>,
    {
        let template = MessageTemplate::parse(template);
        let renderers = Self::compile(&template, &theme, &format_provider, factory)?;
        Ok(Self {
            template,
            theme,
            renderers,
            failure_policy: FailurePolicy::default(),
        })
    }

    fn compile<F, E>(
        template: &MessageTemplate,
        theme: &Arc<dyn Theme>,
        format_provider: &Arc<FormatProvider>,
        factory: F,
    ) -> Result<Vec<CompiledToken>, E>
    where
        F: Fn(&RendererContext<'_>) -> Result<Option<Box<dyn TokenRenderer>>, E>,
    {
        let renderers = template
            .tokens()
            .iter()
            .map(|token| match token {
                MessageTemplateToken::Text(text) => Ok(CompiledToken {
                    raw_text: text.text().to_string(),
                    renderer: Box::new(TextTokenRenderer::new(theme.clone(), text.text())),
                }),
                MessageTemplateToken::Property(property) => {
                    let ctx = RendererContext {
                        template,
                        token: property,
                        theme,
                        format_provider,
                    };
                    let renderer = match factory(&ctx)? {
                        Some(renderer) => renderer,
                        None => new_event_property_renderer(&ctx),
                    };
                    Ok(CompiledToken {
                        raw_text: property.raw_text().to_string(),
                        renderer,
                    })
                }
            })
            .collect::<Result<Vec<_>, E>>()?;
        tracing::debug!(
            template = template.text(),
            tokens = renderers.len(),
            "compiled output template"
        );
        Ok(renderers)
    }

    pub fn with_failure_policy(mut self, failure_policy: FailurePolicy) -> Self {
        self.failure_policy = failure_policy;
        self
    }

    pub fn template(&self) -> &MessageTemplate {
        &self.template
    }

    /// Whether the theme lets rendered output be captured and replayed.
    pub fn can_buffer(&self) -> bool {
        self.theme.can_buffer()
    }

    /// Renders `event` into `output`, token by token.
    pub fn render(&self, event: &LogEvent, output: &mut dyn fmt::Write) -> Result<(), RenderError> {
        for compiled in &self.renderers {
            match compiled.renderer.render(event, output) {
                Ok(()) => {}
                Err(err @ RenderError::Renderer { .. })
                    if self.failure_policy == FailurePolicy::Placeholder =>
                {
                    self_log!("{err}; writing {} in its place", compiled.raw_text);
                    write_styled(&*self.theme, output, ThemeStyle::Invalid, &compiled.raw_text)?;
                }
                Err(err) => return Err(err),
            }
        }
        Ok(())
    }

    /// Renders `event` into a new string.
    pub fn render_to_string(&self, event: &LogEvent) -> Result<String, RenderError> {
        let mut output = String::new();
        self.render(event, &mut output)?;
        Ok(output)
    }
}

impl TokenRenderer for OutputTemplateRenderer {
    fn render(&self, event: &LogEvent, output: &mut dyn fmt::Write) -> Result<(), RenderError> {
        OutputTemplateRenderer::render(self, event, output)
    }
}

impl fmt::Debug for OutputTemplateRenderer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OutputTemplateRenderer")
            .field("template", &self.template.text())
            .field("theme", &self.theme)
            .field("failure_policy", &self.failure_policy)
            .finish_non_exhaustive()
    }
}
