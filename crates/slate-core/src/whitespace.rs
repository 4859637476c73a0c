//! Browser-style whitespace collapsing for text-bearing DOM nodes.
//!
//! See <https://developer.mozilla.org/en-US/docs/Web/API/Document_Object_Model/Whitespace>.
//! The steps run in order, each on the output of the previous one:
//!
//! 1. whitespace around a line break is removed, the break is kept
//! 2. tabs become spaces
//! 3. line breaks become spaces
//! 4. a space following another space is dropped, also across inline elements
//! 5. whitespace at the start and end of a block is removed

use std::collections::HashMap;

use crate::{
    classify::{is_inline, is_line_break},
    config::ConverterConfig,
    dom::{Dom, NodeId},
};

pub fn remove_space_around_line_breaks(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut run = String::new();
    for ch in text.chars() {
        if ch.is_whitespace() {
            run.push(ch);
            continue;
        }
        flush_whitespace_run(&mut run, &mut out);
        out.push(ch);
    }
    flush_whitespace_run(&mut run, &mut out);
    out
}

// A whitespace run holding a line break shrinks to that single break.
fn flush_whitespace_run(run: &mut String, out: &mut String) {
    if run.contains('\n') {
        out.push('\n');
    } else {
        out.push_str(run);
    }
    run.clear();
}

pub fn convert_tabs_to_spaces(text: &str) -> String {
    text.replace('\t', " ")
}

pub fn convert_line_breaks_to_spaces(text: &str) -> String {
    text.replace('\n', " ")
}

pub fn collapse_space_runs(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last_space = false;
    for ch in text.chars() {
        if ch == ' ' {
            if !last_space {
                out.push(' ');
            }
            last_space = true;
        } else {
            out.push(ch);
            last_space = false;
        }
    }
    out
}

/// Steps 1 to 3 plus the context-free half of step 4.
pub fn collapse_runs(text: &str) -> String {
    let text = remove_space_around_line_breaks(text);
    let text = convert_tabs_to_spaces(&text);
    let text = convert_line_breaks_to_spaces(&text);
    collapse_space_runs(&text)
}

fn strip_one_leading_space(text: String) -> String {
    match text.strip_prefix(' ') {
        Some(rest) => rest.to_string(),
        None => text,
    }
}

enum Preceding {
    Space,
    NoSpace,
    Collapsed(NodeId),
}

/// Collapses node text against its surroundings in one DOM.
///
/// Results are memoized per node; step 4 lookups that need the collapsed text
/// of an earlier node are resolved through a worklist instead of recursion.
pub struct Collapser<'a> {
    dom: &'a Dom,
    config: &'a ConverterConfig,
    memo: HashMap<NodeId, String>,
}

impl<'a> Collapser<'a> {
    pub fn new(dom: &'a Dom, config: &'a ConverterConfig) -> Self {
        Self {
            dom,
            config,
            memo: HashMap::new(),
        }
    }

    pub fn collapse(&mut self, node: NodeId) -> String {
        let mut pending = vec![node];
        while let Some(&current) = pending.last() {
            if self.memo.contains_key(&current) {
                pending.pop();
                continue;
            }
            let text = collapse_runs(&self.dom.text_content(current));
            let trailing_space = match self.preceding(current, &text) {
                Preceding::Space => true,
                Preceding::NoSpace => false,
                Preceding::Collapsed(dep) => match self.memo.get(&dep) {
                    Some(prev) => prev.ends_with(' '),
                    None => {
                        pending.push(dep);
                        continue;
                    }
                },
            };
            let text = if trailing_space {
                strip_one_leading_space(text)
            } else {
                text
            };
            let text = self.remove_element_edges(current, text);
            self.memo.insert(current, text);
            pending.pop();
        }
        self.memo.get(&node).cloned().unwrap_or_default()
    }

    // Step 4, across element boundaries: what comes right before `node`?
    fn preceding(&self, node: NodeId, text: &str) -> Preceding {
        if !text.starts_with(' ') {
            return Preceding::NoSpace;
        }
        match self.dom.prev(node) {
            Some(prev) if self.dom.is_text(prev) => {
                if self.dom.text(prev).is_some_and(|t| t.ends_with(' ')) {
                    Preceding::Space
                } else {
                    Preceding::NoSpace
                }
            }
            Some(prev) if is_inline(self.dom, Some(prev), self.config) => {
                Preceding::Collapsed(prev)
            }
            Some(_) => Preceding::NoSpace,
            None => match self.dom.parent(node).and_then(|p| self.dom.prev(p)) {
                Some(uncle) => Preceding::Collapsed(uncle),
                None => Preceding::NoSpace,
            },
        }
    }

    // Step 5.
    fn remove_element_edges(&self, node: NodeId, text: String) -> String {
        let parent_inline = is_inline(self.dom, self.dom.parent(node), self.config);
        let next = self.dom.next(node);

        let text = if !parent_inline && self.dom.prev(node).is_none() {
            text.trim_start().to_string()
        } else {
            text
        };

        if (next.is_none() && !parent_inline) || is_line_break(self.dom, next) {
            text.trim_end().to_string()
        } else {
            text
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collapse_all_text(html: &str) -> Vec<String> {
        let dom = Dom::parse_fragment(html);
        let config = ConverterConfig::default();
        let mut collapser = Collapser::new(&dom, &config);
        dom.node_ids()
            .filter(|id| dom.is_text(*id))
            .map(|id| collapser.collapse(id))
            .collect()
    }

    #[test]
    fn removes_space_before_and_after_line_breaks() {
        let html = "<h1>   Hello \n\t\t\t\t<span> World!</span>\t  </h1>";
        assert_eq!(
            remove_space_around_line_breaks(html),
            "<h1>   Hello\n<span> World!</span>\t  </h1>"
        );
    }

    #[test]
    fn folds_consecutive_line_breaks() {
        assert_eq!(remove_space_around_line_breaks("a \n \n b"), "a\nb");
        assert_eq!(remove_space_around_line_breaks("\n  a"), "\na");
        assert_eq!(remove_space_around_line_breaks("a  b\t"), "a  b\t");
    }

    #[test]
    fn converts_tabs_to_spaces() {
        let html = "<h1>   Hello\n<span> World!</span>\t  </h1>";
        assert_eq!(
            convert_tabs_to_spaces(html),
            "<h1>   Hello\n<span> World!</span>   </h1>"
        );
    }

    #[test]
    fn converts_line_breaks_to_spaces() {
        let html = "<h1>   Hello\n<span> World!</span>   </h1>";
        assert_eq!(
            convert_line_breaks_to_spaces(html),
            "<h1>   Hello <span> World!</span>   </h1>"
        );
    }

    #[test]
    fn collapses_space_runs() {
        assert_eq!(collapse_space_runs("hello     World!"), "hello World!");
        assert_eq!(collapse_space_runs("World!"), "World!");
    }

    #[test]
    fn collapses_across_inline_siblings() {
        let texts = collapse_all_text("<h1>   Hello <span> World!</span>   </h1>");
        assert_eq!(texts, vec!["Hello ", "World!", ""]);
    }

    #[test]
    fn looks_through_previous_inline_element() {
        let texts = collapse_all_text("<h1>   Hello <b>bla </b><span> World!</span>   </h1>");
        assert_eq!(texts, vec!["Hello ", "bla ", "World!", ""]);
    }

    #[test]
    fn looks_through_nested_inline_elements() {
        let texts = collapse_all_text("<h1>Hello <b><i>bla </i></b><span> World!</span></h1>");
        assert_eq!(texts, vec!["Hello ", "bla ", "World!"]);
    }

    #[test]
    fn keeps_space_after_block_sibling() {
        let texts = collapse_all_text("<div><p>one </p> two</div>");
        assert_eq!(texts, vec!["one", " two"]);
    }

    #[test]
    fn trims_before_line_break_element() {
        let texts = collapse_all_text("<p>Hello <br/>world</p>");
        assert_eq!(texts, vec!["Hello", "world"]);
    }

    #[test]
    fn keeps_edges_inside_inline_parent() {
        let texts = collapse_all_text("<p>a<em> b </em>c</p>");
        assert_eq!(texts, vec!["a", " b ", "c"]);
    }

    #[test]
    fn top_level_text_is_trimmed_at_fragment_edges() {
        let texts = collapse_all_text("Hello   world\t");
        assert_eq!(texts, vec!["Hello world"]);
    }

    #[test]
    fn long_sibling_chains_do_not_recurse() {
        let html = "<p>x".to_string() + &"<b> y</b>".repeat(20_000) + "</p>";
        let texts = collapse_all_text(&html);
        assert_eq!(texts.len(), 20_001);
        assert!(texts[1..].iter().all(|t| t == " y"));
    }
}
