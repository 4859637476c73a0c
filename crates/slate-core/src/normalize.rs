use crate::{
    classify::is_inline_slate,
    config::ConverterConfig,
    types::{SlateNode, LINE_BREAK},
};

/// Brings a raw node list in line with Slate's constraints: block-only top
/// level, no adjacent text leaves. Running it twice changes nothing.
pub fn normalize(mut value: Vec<SlateNode>, config: &ConverterConfig) -> Vec<SlateNode> {
    // all top-level nodes need to be blocks
    if value.iter().any(|node| is_inline_slate(node, config)) {
        log::debug!(
            "wrapping {} top-level nodes in <{}>",
            value.len(),
            config.default_block_type
        );
        value = vec![SlateNode::element(config.default_block_type.clone(), value)];
    }

    let mut stack: Vec<&mut SlateNode> = value.iter_mut().collect();
    while let Some(node) = stack.pop() {
        if let Some(children) = node.children_mut() {
            merge_adjacent_text_nodes(children);
            stack.extend(children.iter_mut());
        }
    }
    value
}

/// Concatenates runs of text leaves in place. Line-break leaves stay separate.
pub fn merge_adjacent_text_nodes(children: &mut Vec<SlateNode>) {
    let mut merged: Vec<SlateNode> = Vec::with_capacity(children.len());
    for child in children.drain(..) {
        if let SlateNode::Text(leaf) = &child {
            if let Some(SlateNode::Text(prev)) = merged.last_mut() {
                if !child.is_line_break() && prev.text != LINE_BREAK {
                    prev.text.push_str(&leaf.text);
                    continue;
                }
            }
        }
        merged.push(child);
    }
    *children = merged;
}
