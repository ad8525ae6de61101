use livery_template::{AlignmentDirection, MessageTemplate, MessageTemplateToken};
use proptest::prelude::*;

#[test]
fn test_default_console_template() {
    let template =
        MessageTemplate::parse("[{Timestamp:HH:mm:ss} {Level:u3}] {Message:lj}{NewLine}{Exception}");

    let names: Vec<&str> = template
        .property_tokens()
        .map(|p| p.property_name())
        .collect();
    assert_eq!(
        names,
        vec!["Timestamp", "Level", "Message", "NewLine", "Exception"]
    );

    let message = template
        .property_tokens()
        .find(|p| p.property_name() == "Message")
        .unwrap();
    assert_eq!(message.format(), Some("lj"));
}

#[test]
fn test_right_alignment() {
    let template = MessageTemplate::parse("{ThreadId,4}");
    let token = template.property_tokens().next().unwrap();
    let alignment = token.alignment().unwrap();
    assert_eq!(alignment.direction(), AlignmentDirection::Right);
    assert_eq!(alignment.width(), 4);
}

#[test]
fn test_positional_placeholders() {
    let template = MessageTemplate::parse("{0} and {1}");
    let indices: Vec<Option<usize>> = template
        .property_tokens()
        .map(|p| p.positional_index())
        .collect();
    assert_eq!(indices, vec![Some(0), Some(1)]);
}

proptest! {
    #[test]
    fn prop_brace_free_text_is_one_text_token(text in "[^{}]{1,64}") {
        let template = MessageTemplate::parse(&text);
        prop_assert_eq!(template.tokens().len(), 1);
        match &template.tokens()[0] {
            MessageTemplateToken::Text(t) => prop_assert_eq!(t.text(), text.as_str()),
            MessageTemplateToken::Property(_) => prop_assert!(false, "unexpected property"),
        }
    }

    #[test]
    fn prop_missing_properties_render_back_to_source(
        parts in proptest::collection::vec(("[a-z ]{0,8}", "[A-Za-z_][A-Za-z0-9_]{0,8}"), 1..6)
    ) {
        let source: String = parts
            .iter()
            .map(|(text, name)| format!("{text}{{{name}}}"))
            .collect();
        let template = MessageTemplate::parse(&source);
        prop_assert_eq!(template.render_with(|_| None), source);
    }
}
