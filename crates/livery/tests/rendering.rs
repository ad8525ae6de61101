//! End-to-end behavior of compiled output templates.

use std::sync::{Arc, Mutex};
use std::thread;

use chrono::{FixedOffset, TimeZone};
use livery::event::{ExceptionInfo, LogEvent, LogEventLevel, LogEventProperty, StructureValue};
use livery::format::FormatProvider;
use livery::output::{
    new_standard_renderer, renderer_fn, BufferScrubbingRenderer, EventSwitchingRenderer,
    FailurePolicy, OutputTemplateRenderer, TokenRenderer, NEWLINE,
};
use livery::theme::{AnsiTheme, NoTheme, SystemConsoleTheme, Theme};
use livery::{ConfigError, RenderError};
use proptest::prelude::*;
use regex::Regex;
use serial_test::serial;

fn provider() -> Arc<FormatProvider> {
    Arc::new(FormatProvider::invariant())
}

fn plain(template: &str) -> OutputTemplateRenderer {
    OutputTemplateRenderer::new(Arc::new(NoTheme), template, provider())
}

fn ansi_presets() -> Vec<(&'static str, Arc<dyn Theme>)> {
    vec![
        ("code", Arc::new(AnsiTheme::code())),
        ("literate", Arc::new(AnsiTheme::literate())),
        ("grayscale", Arc::new(AnsiTheme::grayscale())),
        ("sixteen", Arc::new(AnsiTheme::sixteen())),
    ]
}

/// Renders `event` with every ANSI preset and checks the visible text
/// matches the unstyled rendering.
fn assert_styling_is_invisible(template: &str, event: &LogEvent) -> String {
    let expected = plain(template).render_to_string(event).unwrap();
    for (name, theme) in ansi_presets() {
        let styled = OutputTemplateRenderer::new(theme, template, provider())
            .render_to_string(event)
            .unwrap();
        assert_eq!(console::strip_ansi_codes(&styled), expected, "theme {name}");
    }
    expected
}

fn sample_event() -> LogEvent {
    let ts = FixedOffset::east_opt(-5 * 3600)
        .unwrap()
        .with_ymd_and_hms(2023, 11, 7, 8, 15, 30)
        .unwrap();
    LogEvent::builder(
        LogEventLevel::Warning,
        "Order {OrderId} for {Customer} took {Elapsed:0.0} ms",
    )
    .timestamp(ts)
    .property("OrderId", 1042)
    .property("Customer", "Ada")
    .property("Elapsed", 153.27)
    .property("Region", "eu-west")
    .build()
}

fn failing_event() -> LogEvent {
    let trace = "   at Shop.Checkout.Submit(Order order) in /app/src/Checkout.cs:line 117\n   \
                 at Shop.Program.Main(String[] args)";
    LogEvent::builder(LogEventLevel::Error, "Checkout failed")
        .exception(
            ExceptionInfo::new("System.InvalidOperationException", "Basket is empty")
                .with_stack_trace(trace),
        )
        .build()
}

// Templates made only of text, with `{{`/`}}` escapes, render to their
// decoded text regardless of the event.
fn literal_template() -> impl Strategy<Value = (String, String)> {
    prop::collection::vec(
        prop_oneof![
            "[a-zA-Z0-9 .,:;|\\[\\]()-]{1,8}".prop_map(|s| (s.clone(), s)),
            Just(("{{".to_string(), "{".to_string())),
            Just(("}}".to_string(), "}".to_string())),
        ],
        0..12,
    )
    .prop_map(|parts| {
        parts
            .into_iter()
            .fold((String::new(), String::new()), |(mut t, mut e), (raw, decoded)| {
                t.push_str(&raw);
                e.push_str(&decoded);
                (t, e)
            })
    })
}

proptest! {
    #[test]
    fn test_literal_only_templates_render_verbatim((template, expected) in literal_template()) {
        let renderer = plain(&template);
        prop_assert_eq!(renderer.render_to_string(&sample_event()).unwrap(), expected.clone());
        prop_assert_eq!(renderer.render_to_string(&failing_event()).unwrap(), expected.clone());

        for (name, theme) in ansi_presets() {
            let styled = OutputTemplateRenderer::new(theme, &template, provider())
                .render_to_string(&sample_event())
                .unwrap();
            prop_assert_eq!(
                console::strip_ansi_codes(&styled).into_owned(),
                expected.clone(),
                "theme {}",
                name
            );
        }
    }

    #[test]
    fn test_left_alignment_pads_to_width(value in "[a-z]{0,12}", width in 1usize..16) {
        let event = LogEvent::builder(LogEventLevel::Information, "x")
            .property("Value", value.as_str())
            .build();
        let out = plain(&format!("{{Value,-{width}}}|")).render_to_string(&event).unwrap();
        let rendered = out.strip_suffix('|').unwrap();
        prop_assert_eq!(rendered.len(), value.len().max(width));
        prop_assert!(rendered.starts_with(value.as_str()));
        prop_assert!(rendered[value.len()..].chars().all(|c| c == ' '));
    }

    #[test]
    fn test_right_alignment_pads_to_width(value in "[a-z]{0,12}", width in 1usize..16) {
        let event = LogEvent::builder(LogEventLevel::Information, "x")
            .property("Value", value.as_str())
            .build();
        let out = plain(&format!("{{Value,{width}}}")).render_to_string(&event).unwrap();
        prop_assert_eq!(out.len(), value.len().max(width));
        prop_assert!(out.ends_with(value.as_str()));
    }
}

#[test]
fn test_typical_console_line() {
    let renderer = plain(
        "{Timestamp:yyyy-MM-dd HH:mm:ss zzz} [{Level:u3}] {Message:l} {Properties}{NewLine}",
    );
    assert_eq!(
        renderer.render_to_string(&sample_event()).unwrap(),
        format!(
            "2023-11-07 08:15:30 -05:00 [WRN] Order 1042 for Ada took 153.3 ms {{Region=\"eu-west\"}}{NEWLINE}"
        )
    );
}

#[test]
fn test_styled_line_with_literate_theme() {
    let renderer = OutputTemplateRenderer::new(
        Arc::new(AnsiTheme::literate()),
        "[{Level:u3}] {Message}",
        provider(),
    );
    let event = LogEvent::builder(LogEventLevel::Information, "Hi {Name}")
        .property("Name", "Bo")
        .build();
    assert_eq!(
        renderer.render_to_string(&event).unwrap(),
        "\x1b[38;5;0015m[\x1b[0m\x1b[38;5;0015mINF\x1b[0m\x1b[38;5;0015m] \x1b[0m\
         \x1b[38;5;0015mHi \x1b[0m\x1b[38;5;0045m\"Bo\"\x1b[0m"
    );
}

#[test]
fn test_themes_only_add_styling() {
    let event = LogEvent::builder(
        LogEventLevel::Error,
        "Order {OrderId} for {@Cart} failed after {Elapsed} ms",
    )
    .property("OrderId", 1042)
    .property(
        "Cart",
        StructureValue::new(vec![
            LogEventProperty::new("Items", vec!["apple", "pear"]),
            LogEventProperty::new("Express", true),
        ])
        .with_type_tag("Cart"),
    )
    .property("Elapsed", 12.5)
    .property("Region", "eu-west")
    .property("Retry", Option::<i32>::None)
    .exception(
        ExceptionInfo::new("Shop.CheckoutException", "Payment declined")
            .with_stack_trace("   at Shop.Checkout.Pay(Decimal amount) in /app/Checkout.cs:line 42")
            .with_inner(
                ExceptionInfo::new("System.TimeoutException", "Gateway timed out")
                    .with_stack_trace("   at Shop.Gateway..ctor(Uri uri) in /app/Gateway.cs:line 7"),
            ),
    )
    .build();

    let expected = assert_styling_is_invisible(
        "[{Level,-11}] {OrderId,8} {Message:lj} {Properties:j}{NewLine}{Exception}",
        &event,
    );
    assert!(expected.starts_with("[Error      ]     1042 Order 1042 for "));
    assert!(expected.contains("Gateway timed out"));

    assert_styling_is_invisible(
        "{Level:t4}|{Region,-10}|{Missing,4}|{Message}|{Properties}",
        &event,
    );
}

#[test]
fn test_alignment_ignores_escape_sequences() {
    let renderer = OutputTemplateRenderer::new(
        Arc::new(AnsiTheme::sixteen()),
        "{Count,-4}|",
        provider(),
    );
    let event = LogEvent::builder(LogEventLevel::Information, "x")
        .property("Count", 7)
        .build();
    assert_eq!(
        renderer.render_to_string(&event).unwrap(),
        "\x1b[35m7\x1b[0m   |"
    );
}

#[test]
fn test_structured_exception_contains_location_and_message() {
    let renderer = OutputTemplateRenderer::new(
        Arc::new(AnsiTheme::code()),
        "{Message}{NewLine}{Exception}",
        provider(),
    );
    let out = renderer.render_to_string(&failing_event()).unwrap();
    assert!(out.contains("/app/src/Checkout.cs"));
    assert!(out.contains("117"));
    assert!(out.contains("Basket is empty"));
    assert!(out.contains("System.InvalidOperationException"));
}

#[test]
fn test_no_exception_renders_nothing() {
    assert_eq!(plain("{Exception}").render_to_string(&sample_event()).unwrap(), "");
}

#[test]
#[serial(self_log)]
fn test_malformed_stack_trace_does_not_abort_rendering() {
    let event = LogEvent::builder(LogEventLevel::Error, "bad")
        .exception(ExceptionInfo::new("Odd", "weird trace").with_stack_trace("   at X.Y() in f.cs:line -"))
        .build();
    let out = plain("{Exception}<end>").render_to_string(&event).unwrap();
    assert_eq!(
        out,
        format!("Odd: weird trace{NEWLINE}   at X.Y() in f.cs:line -{NEWLINE}<end>")
    );
}

#[test]
fn test_scrubbing_message_through_factory() {
    let theme: Arc<dyn Theme> = Arc::new(AnsiTheme::sixteen());
    let renderer = OutputTemplateRenderer::with_factory(theme, "{Message}", provider(), |ctx| {
        let Some(inner) = new_standard_renderer(ctx) else {
            return Ok(None);
        };
        let scrubbed = BufferScrubbingRenderer::regex(
            &**ctx.theme,
            Regex::new(r"\d{3}-\d{2}-\d{4}").unwrap(),
            "***-**-****",
            inner,
        )?;
        Ok(Some(Box::new(scrubbed)))
    })
    .unwrap();
    let event = LogEvent::builder(LogEventLevel::Information, "SSN {Ssn}")
        .property("Ssn", "123-45-6789")
        .build();
    assert_eq!(
        renderer.render_to_string(&event).unwrap(),
        "SSN \x1b[36m\"***-**-****\"\x1b[0m"
    );
}

#[test]
fn test_scrubbing_requires_buffering_theme() {
    let theme: Arc<dyn Theme> = Arc::new(SystemConsoleTheme::grayscale());
    let err = OutputTemplateRenderer::with_factory(theme, "{Message}", provider(), |ctx| {
        let inner = new_standard_renderer(ctx).expect("Message is standard");
        Ok(Some(Box::new(BufferScrubbingRenderer::new(
            &**ctx.theme,
            str::to_uppercase,
            inner,
        )?)))
    })
    .unwrap_err();
    assert!(matches!(err, ConfigError::BufferingUnsupported { .. }));
}

#[test]
fn test_factory_replaces_only_chosen_token() {
    let renderer = OutputTemplateRenderer::with_factory(
        Arc::new(NoTheme),
        "[{Level:u3}] {Message}{NewLine}{Exception}",
        provider(),
        |ctx| match ctx.token.property_name() {
            "Exception" => Ok(Some(Box::new(renderer_fn(|_, out| Ok(out.write_str("<custom exception>")?))))),
            _ => Ok(new_standard_renderer(ctx)),
        },
    )
    .unwrap();
    assert_eq!(
        renderer.render_to_string(&failing_event()).unwrap(),
        format!("[ERR] Checkout failed{NEWLINE}<custom exception>")
    );
}

#[test]
fn test_switching_per_level() {
    let renderer = OutputTemplateRenderer::with_factory(
        Arc::new(NoTheme),
        "{Badge}{Message}",
        provider(),
        |ctx| {
            if ctx.token.property_name() != "Badge" {
                return Ok(new_standard_renderer(ctx));
            }
            Ok(Some(Box::new(EventSwitchingRenderer::per_level(|level| {
                (level >= LogEventLevel::Error).then(|| {
                    Arc::new(renderer_fn(|_, out| Ok(out.write_str("!! ")?))) as Arc<dyn TokenRenderer>
                })
            }))))
        },
    )
    .unwrap();
    let quiet = LogEvent::builder(LogEventLevel::Information, "ok").build();
    let loud = LogEvent::builder(LogEventLevel::Fatal, "down").build();
    assert_eq!(renderer.render_to_string(&quiet).unwrap(), "ok");
    assert_eq!(renderer.render_to_string(&loud).unwrap(), "!! down");
}

#[test]
#[serial(self_log)]
fn test_placeholder_policy_reports_and_continues() {
    let lines = Arc::new(Mutex::new(Vec::new()));
    let captured = Arc::clone(&lines);
    livery::self_log::enable(move |line| captured.lock().unwrap().push(line.to_string()));

    let renderer = OutputTemplateRenderer::with_factory(
        Arc::new(NoTheme),
        "<{Flaky:x}>",
        provider(),
        |_| Ok(Some(Box::new(renderer_fn(|_, _| Err(RenderError::renderer("Flaky", "timeout")))))),
    )
    .unwrap()
    .with_failure_policy(FailurePolicy::Placeholder);
    let out = renderer.render_to_string(&sample_event()).unwrap();
    livery::self_log::disable();

    assert_eq!(out, "<{Flaky:x}>");
    let lines = lines.lock().unwrap();
    assert_eq!(lines.len(), 1);
    assert!(lines[0].contains("timeout"));
}

#[test]
fn test_rendering_is_deterministic() {
    let renderer = OutputTemplateRenderer::new(
        Arc::new(AnsiTheme::code()),
        "{Timestamp} {Level} {Message:j} {Properties:j}{NewLine}{Exception}",
        provider(),
    );
    let event = sample_event();
    let first = renderer.render_to_string(&event).unwrap();
    for _ in 0..10 {
        assert_eq!(renderer.render_to_string(&event).unwrap(), first);
    }
}

#[test]
fn test_concurrent_rendering_matches_sequential() {
    let renderer = OutputTemplateRenderer::new(
        Arc::new(AnsiTheme::literate()),
        "[{Level,-11}] {Message} {Point}{NewLine}{Exception}",
        provider(),
    );
    let events: Vec<LogEvent> = (0..32)
        .map(|i| {
            let point = StructureValue::new(vec![
                LogEventProperty::new("X", i),
                LogEventProperty::new("Y", -i),
            ])
            .with_type_tag("Point");
            LogEvent::builder(LogEventLevel::ALL[i as usize % 6], "Item {I} of {N}")
                .property("I", i)
                .property("N", 32)
                .property("Point", point)
                .build()
        })
        .chain(std::iter::once(failing_event()))
        .collect();
    let expected: Vec<String> = events
        .iter()
        .map(|e| renderer.render_to_string(e).unwrap())
        .collect();

    thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| {
                scope.spawn(|| {
                    events
                        .iter()
                        .map(|e| renderer.render_to_string(e).unwrap())
                        .collect::<Vec<_>>()
                })
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}
