use serde_json::json;
use url::{ParseError, Url};

use super::{Deserializer, Handled};
use crate::{
    dom::NodeId,
    error::ConvertError,
    types::{ElementNode, SlateNode},
};

pub fn handle_anchor(cx: &mut Deserializer<'_>, node: NodeId) -> Result<Handled, ConvertError> {
    let href = cx.dom().attr(node, "href").unwrap_or_default();
    let element = ElementNode::new("a", cx.deserialize_children(node)?);
    if href.is_empty() || is_absolute_href(href) {
        // TODO: annotate external links once the link data shape for them is settled.
        return Ok(element.into());
    }
    Ok(element.with_data(internal_link(href)).into())
}

pub fn handle_line_break(_cx: &mut Deserializer<'_>, _node: NodeId) -> Result<Handled, ConvertError> {
    Ok(SlateNode::line_break().into())
}

/// `<b>` is kept as its own element, like a generic block.
pub fn handle_bold(cx: &mut Deserializer<'_>, node: NodeId) -> Result<Handled, ConvertError> {
    Ok(cx.handle_block(node)?.into())
}

fn internal_link(href: &str) -> serde_json::Value {
    json!({
        "link": {
            "internal": {
                "internal_link": [{"@id": href}]
            }
        }
    })
}

// Absolute: has a scheme, or is protocol-relative. Url::parse only returns
// RelativeUrlWithoutBase when no scheme is present.
fn is_absolute_href(href: &str) -> bool {
    let href = href.trim();
    if href.starts_with("//") {
        return true;
    }
    !matches!(Url::parse(href), Err(ParseError::RelativeUrlWithoutBase))
}
