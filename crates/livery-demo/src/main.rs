//! Prints a handful of representative events through a console sink.
//!
//! ```text
//! livery-demo --theme code
//! livery-demo --template "{Timestamp:HH:mm:ss.fff} {Level,-11} {Message:lj}{NewLine}{Exception}"
//! livery-demo --config console.yaml --scrub '\d{4}-\d{4}-\d{4}-\d{4}'
//! ```

use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use livery::event::{ExceptionInfo, LogEvent, LogEventLevel, LogEventProperty, StructureValue};
use livery::output::{
    new_standard_renderer, BufferScrubbingRenderer, FailurePolicy, OutputTemplateRenderer,
};
use livery::{ConsoleSink, ConsoleSinkConfig};
use regex::Regex;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "livery-demo", about = "Render sample log events to the console")]
struct Cli {
    /// YAML sink configuration file
    #[arg(short, long)]
    config: Option<std::path::PathBuf>,

    /// Theme name (auto, none, code, literate, grayscale, sixteen, system) or theme file
    #[arg(short, long)]
    theme: Option<String>,

    /// Output template
    #[arg(long)]
    template: Option<String>,

    /// Write events at this level and above to standard error
    #[arg(long, value_name = "LEVEL")]
    stderr_from: Option<LogEventLevel>,

    /// Mask matches of this pattern in rendered messages
    #[arg(long, value_name = "REGEX")]
    scrub: Option<String>,

    /// Report internal diagnostics on standard error
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(EnvFilter::new("livery=debug"))
            .init();
    }

    let mut config = match &cli.config {
        Some(path) => ConsoleSinkConfig::from_file(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => ConsoleSinkConfig::default(),
    };
    if let Some(theme) = cli.theme {
        config.theme = theme;
    }
    if let Some(template) = cli.template {
        config.output_template = template;
    }
    if let Some(level) = cli.stderr_from {
        config.standard_error_from_level = Some(level);
    }

    let sink = match &cli.scrub {
        Some(pattern) => scrubbing_sink(&config, pattern)?,
        None => config.build().context("building console sink")?,
    };

    for event in sample_events() {
        sink.emit(&event).context("writing to the console")?;
    }
    Ok(())
}

/// Builds the configured sink with the message passed through a scrubber.
fn scrubbing_sink(config: &ConsoleSinkConfig, pattern: &str) -> Result<ConsoleSink> {
    let regex = Regex::new(pattern).with_context(|| format!("invalid pattern {pattern:?}"))?;
    let theme = config.resolve_theme()?;
    let renderer = OutputTemplateRenderer::with_factory(
        theme.clone(),
        &config.output_template,
        Arc::new(config.format_provider.clone()),
        |ctx| {
            let standard = new_standard_renderer(ctx);
            match standard {
                Some(inner) if ctx.token.property_name() == "Message" => {
                    let scrubbed =
                        BufferScrubbingRenderer::regex(&**ctx.theme, regex.clone(), "****", inner)?;
                    Ok(Some(Box::new(scrubbed)))
                }
                other => Ok(other),
            }
        },
    )
    .context("compiling output template")?
    .with_failure_policy(FailurePolicy::Placeholder);

    let sink = ConsoleSink::new(renderer, theme);
    Ok(match config.standard_error_from_level {
        Some(level) => sink.standard_error_from_level(level),
        None => sink,
    })
}

fn sample_events() -> Vec<LogEvent> {
    let started = Local::now().fixed_offset();
    let cart = StructureValue::new(vec![
        LogEventProperty::new("Items", vec!["apple", "pear"]),
        LogEventProperty::new("Total", 12.5),
        LogEventProperty::new("Express", true),
    ])
    .with_type_tag("Cart");

    let failure = ExceptionInfo::new("Shop.PaymentDeclinedException", "Card 4111-1111-1111-1111 was declined")
        .with_stack_trace(
            "   at Shop.Payments.Gateway.Charge(Decimal amount) in /srv/shop/Payments/Gateway.cs:line 214\n   \
             at Shop.Checkout.Complete(Cart cart) in /srv/shop/Checkout.cs:line 58\n   \
             at Shop.Program.Main(String[] args)",
        )
        .with_inner(ExceptionInfo::new("System.Net.Http.HttpRequestException", "Connection reset by peer"));

    vec![
        LogEvent::builder(LogEventLevel::Verbose, "Polling {Queue} every {Interval} ms")
            .property("Queue", "orders")
            .property("Interval", 250)
            .build(),
        LogEvent::builder(LogEventLevel::Debug, "Session {SessionId} resumed at {ResumedAt}")
            .property("SessionId", 'α')
            .property("ResumedAt", started)
            .property("SourceContext", "Shop.Sessions")
            .build(),
        LogEvent::builder(LogEventLevel::Information, "Checked out {@Cart} for {User}")
            .property("Cart", cart)
            .property("User", "ada@example.com")
            .build(),
        LogEvent::builder(LogEventLevel::Warning, "Stock for {Sku} is low: {Remaining} left ({Ratio:P0})")
            .property("Sku", "PEAR-01")
            .property("Remaining", 3)
            .property("Ratio", 0.03)
            .property("Warehouse", Option::<&str>::None)
            .build(),
        LogEvent::builder(LogEventLevel::Error, "Payment for order {OrderId} failed")
            .property("OrderId", 90_210)
            .exception(failure)
            .build(),
        LogEvent::builder(LogEventLevel::Fatal, "Shutting down after {Failures} consecutive failures")
            .property("Failures", 5u8)
            .build(),
    ]
}
