use std::{sync::Arc, thread};

use serde_json::json;
use slate_core::{normalize::normalize, text_to_slate, Converter, ConverterConfig, SlateNode};

fn assert_no_adjacent_plain_text(nodes: &[SlateNode]) {
    for pair in nodes.windows(2) {
        let both_text = pair[0].is_text() && pair[1].is_text();
        let around_break = pair[0].is_line_break() || pair[1].is_line_break();
        assert!(!both_text || around_break, "unmerged text leaves: {pair:?}");
    }
    for node in nodes {
        assert_no_adjacent_plain_text(node.children());
    }
}

const SAMPLES: &[&str] = &[
    "Hello world",
    "<p>Hello world</p>",
    "<p>Hello <br/>world</p>",
    "<h1>   Hello <span> World!</span>   </h1>",
    "Loose <em>text</em> and <a href=\"/doc\">a link</a>.",
    "<ul><li>One <b>bold</b></li><li>Two<br>lines</li></ul>",
    "<div><p>one </p> two <span>three</span></div>",
    "<table><tr><td>a</td><td> b </td></tr></table>",
    r#"<div data-slate-data='{"type":"x","text":"hi","styleName":"info"}'>in</div>"#,
];

#[test]
fn converted_output_is_normalized() {
    let config = ConverterConfig::default();
    for html in SAMPLES {
        let value = text_to_slate(html).unwrap();
        assert_eq!(normalize(value.clone(), &config), value, "{html}");
        for node in &value {
            assert!(!node.is_text(), "{html}");
            assert!(!config.is_inline_tag(node.kind().unwrap_or_default()), "{html}");
        }
        assert_no_adjacent_plain_text(&value);
    }
}

#[test]
fn output_survives_json_round_trip() {
    for html in SAMPLES {
        let value = text_to_slate(html).unwrap();
        let text = serde_json::to_string(&value).unwrap();
        let back: Vec<SlateNode> = serde_json::from_str(&text).unwrap();
        assert_eq!(back, value, "{html}");
    }
}

#[test]
fn empty_input_gives_empty_value() {
    assert!(text_to_slate("").unwrap().is_empty());
    assert!(text_to_slate("<!-- only a comment -->").unwrap().is_empty());
}

#[test]
fn list_markup_keeps_structure() {
    let value = text_to_slate("<ul><li>One <b>bold</b></li><li>Two<br>lines</li></ul>").unwrap();
    assert_eq!(
        serde_json::to_value(value).unwrap(),
        json!([{"type": "ul", "children": [
            {"type": "li", "children": [
                {"text": "One "},
                {"type": "b", "children": [{"text": "bold"}]}
            ]},
            {"type": "li", "children": [
                {"text": "Two"},
                {"text": "\n"},
                {"text": "lines"}
            ]}
        ]}])
    );
}

#[test]
fn converter_is_shared_across_threads() {
    let converter = Arc::new(Converter::default());
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let converter = Arc::clone(&converter);
            thread::spawn(move || converter.to_slate(&format!("<p>item {i}</p>")))
        })
        .collect();
    for (i, handle) in handles.into_iter().enumerate() {
        let value = handle.join().unwrap().unwrap();
        assert_eq!(
            serde_json::to_value(value).unwrap(),
            json!([{"type": "p", "children": [{"text": format!("item {i}")}]}])
        );
    }
}
