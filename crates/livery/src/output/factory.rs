//! Token renderer construction.
//!
//! The standard registry maps the built-in output properties to their
//! renderers. Custom factories handle the tokens they care about and
//! delegate the rest to [`new_standard_renderer`] or
//! [`new_event_property_renderer`].

use std::collections::HashMap;
use std::sync::Arc;

use livery_template::{MessageTemplate, PropertyToken};
use once_cell::sync::Lazy;

use crate::format::FormatProvider;
use crate::theme::Theme;

use super::{
    EventPropertyTokenRenderer, ExceptionTokenRenderer, LevelTokenRenderer,
    MessageTemplateOutputTokenRenderer, NewLineTokenRenderer, PropertiesTokenRenderer,
    ThemedExceptionTokenRenderer, TimestampTokenRenderer, TokenRenderer,
};

/// Everything a factory gets to build the renderer for one placeholder.
#[derive(Debug, Clone, Copy)]
pub struct RendererContext<'a> {
    /// The whole output template being compiled.
    pub template: &'a MessageTemplate,
    pub token: &'a PropertyToken,
    pub theme: &'a Arc<dyn Theme>,
    pub format_provider: &'a Arc<FormatProvider>,
}

type Constructor = fn(&RendererContext<'_>) -> Box<dyn TokenRenderer>;

static STANDARD_RENDERERS: Lazy<HashMap<&'static str, Constructor>> = Lazy::new(|| {
    let mut registry: HashMap<&'static str, Constructor> = HashMap::new();
    registry.insert("Level", |ctx| {
        Box::new(LevelTokenRenderer::new(ctx.theme.clone(), ctx.token.clone()))
    });
    registry.insert("NewLine", |ctx| {
        Box::new(NewLineTokenRenderer::new(ctx.token.alignment()))
    });
    registry.insert("Exception", |ctx| {
        Box::new(
            ThemedExceptionTokenRenderer::new(ctx.theme.clone())
                .with_fallback(ExceptionTokenRenderer::new(ctx.theme.clone())),
        )
    });
    registry.insert("Message", |ctx| {
        Box::new(MessageTemplateOutputTokenRenderer::new(
            ctx.theme.clone(),
            ctx.token.clone(),
            ctx.format_provider.clone(),
        ))
    });
    registry.insert("Timestamp", |ctx| {
        Box::new(TimestampTokenRenderer::new(
            ctx.theme.clone(),
            ctx.token.clone(),
            ctx.format_provider.clone(),
        ))
    });
    registry.insert("Properties", |ctx| {
        Box::new(PropertiesTokenRenderer::new(
            ctx.theme.clone(),
            ctx.token.clone(),
            ctx.template.clone(),
            ctx.format_provider.clone(),
        ))
    });
    registry
});

/// Names handled by [`new_standard_renderer`].
pub fn is_standard_property(name: &str) -> bool {
    STANDARD_RENDERERS.contains_key(name)
}

/// The built-in renderer for `ctx.token`, or `None` when the token does not
/// name a built-in output property. Names match exactly.
pub fn new_standard_renderer(ctx: &RendererContext<'_>) -> Option<Box<dyn TokenRenderer>> {
    STANDARD_RENDERERS
        .get(ctx.token.property_name())
        .map(|construct| construct(ctx))
}

/// A renderer that looks the token up among the event's own properties.
pub fn new_event_property_renderer(ctx: &RendererContext<'_>) -> Box<dyn TokenRenderer> {
    Box::new(EventPropertyTokenRenderer::new(
        ctx.theme.clone(),
        ctx.token.clone(),
        ctx.format_provider.clone(),
    ))
}
