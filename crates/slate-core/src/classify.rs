use crate::{config::ConverterConfig, dom::Dom, dom::NodeId, types::SlateNode};

/// Text nodes and whitelisted inline elements. An absent node is not inline.
pub fn is_inline(dom: &Dom, node: Option<NodeId>, config: &ConverterConfig) -> bool {
    let Some(node) = node else {
        return false;
    };
    if dom.is_text(node) {
        return true;
    }
    dom.tag(node).is_some_and(|tag| config.is_inline_tag(tag))
}

/// Raw payload of the reserved embedded-data attribute, if the element carries one.
pub fn embedded_data<'d>(dom: &'d Dom, node: NodeId, config: &ConverterConfig) -> Option<&'d str> {
    dom.attr(node, &config.data_attribute)
}

pub fn is_line_break(dom: &Dom, node: Option<NodeId>) -> bool {
    node.and_then(|n| dom.tag(n)) == Some("br")
}

/// Output-side check: leaves and inline-typed elements may not sit at the top level.
pub fn is_inline_slate(node: &SlateNode, config: &ConverterConfig) -> bool {
    match node {
        SlateNode::Text(_) => true,
        SlateNode::Element(el) => config.is_inline_tag(&el.kind),
    }
}
