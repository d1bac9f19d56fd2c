use super::{parse_object, string_list, typed_list, Generated};
use crate::campaign::Question;

#[test]
fn parses_plain_objects() {
    let value = parse_object(r#"{"suggestions": []}"#).expect("object");
    assert!(value.get("suggestions").is_some());
}

#[test]
fn parses_fenced_objects() {
    let text = "Here you go:\n```json\n{\"questions\": []}\n```\n";
    let value = parse_object(text).expect("object");
    assert!(value.get("questions").is_some());
}

#[test]
fn parses_objects_embedded_in_prose() {
    let text = "Sure! The answer is {\"emails\": [\"one\"]} — hope that helps.";
    let value = parse_object(text).expect("object");
    assert_eq!(string_list(&value, "emails").expect("list"), ["one"]);
}

#[test]
fn non_json_text_yields_none() {
    assert!(parse_object("I could not produce suggestions today.").is_none());
    assert!(parse_object("").is_none());
    assert!(parse_object("[1, 2, 3]").is_none());
}

#[test]
fn missing_or_wrong_shaped_keys_yield_none() {
    let value = parse_object(r#"{"emails": "not an array"}"#).expect("object");
    assert!(string_list(&value, "emails").is_none());
    assert!(string_list(&value, "tweets").is_none());
}

#[test]
fn string_lists_drop_non_strings_and_blanks() {
    let value = parse_object(r#"{"tweets": ["keep", 7, "  ", {"x":1}, " also keep "]}"#)
        .expect("object");
    assert_eq!(
        string_list(&value, "tweets").expect("list"),
        ["keep", "also keep"]
    );
}

#[test]
fn typed_lists_skip_malformed_entries() {
    let value = parse_object(
        r#"{"questions": [
            {"label": "Any constraints?", "type": "text", "field_name": "constraints"},
            "free-floating string",
            {"label": "Partial"}
        ]}"#,
    )
    .expect("object");
    let questions: Vec<Question> = typed_list(&value, "questions").expect("list");
    assert_eq!(questions.len(), 2);
    assert_eq!(questions[0].field_name, "constraints");
    // defaulted fields survive a partial entry
    assert_eq!(questions[1].label, "Partial");
    assert_eq!(questions[1].field_name, "");
}

#[test]
fn generated_marker_reports_degradation() {
    let full = Generated::Full(vec!["content".to_string()]);
    assert!(!full.is_degraded());
    assert_eq!(full.into_inner(), ["content"]);

    let degraded: Generated<Vec<String>> = Generated::degraded();
    assert!(degraded.is_degraded());
    assert!(degraded.into_inner().is_empty());
}
