use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One node of a Slate document value.
///
/// Serializes to `{"text": ...}` for leaves and
/// `{"type": ..., "children": [...], "data": ...}` for elements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SlateNode {
    Text(TextLeaf),
    Element(ElementNode),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextLeaf {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementNode {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub children: Vec<SlateNode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    // Payload fields from embedded-data elements that have no dedicated slot.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

pub const LINE_BREAK: &str = "\n";

impl SlateNode {
    pub fn text(text: impl Into<String>) -> Self {
        SlateNode::Text(TextLeaf { text: text.into() })
    }

    pub fn line_break() -> Self {
        Self::text(LINE_BREAK)
    }

    pub fn element(kind: impl Into<String>, children: Vec<SlateNode>) -> Self {
        SlateNode::Element(ElementNode::new(kind, children))
    }

    pub fn is_text(&self) -> bool {
        matches!(self, SlateNode::Text(_))
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            SlateNode::Text(leaf) => Some(&leaf.text),
            SlateNode::Element(_) => None,
        }
    }

    /// A leaf produced by a `<br>`; merging never crosses it.
    pub fn is_line_break(&self) -> bool {
        self.as_text() == Some(LINE_BREAK)
    }

    pub fn kind(&self) -> Option<&str> {
        match self {
            SlateNode::Text(_) => None,
            SlateNode::Element(el) => Some(&el.kind),
        }
    }

    pub fn children(&self) -> &[SlateNode] {
        match self {
            SlateNode::Text(_) => &[],
            SlateNode::Element(el) => &el.children,
        }
    }

    pub fn children_mut(&mut self) -> Option<&mut Vec<SlateNode>> {
        match self {
            SlateNode::Text(_) => None,
            SlateNode::Element(el) => Some(&mut el.children),
        }
    }
}

impl ElementNode {
    pub fn new(kind: impl Into<String>, children: Vec<SlateNode>) -> Self {
        Self {
            kind: kind.into(),
            children,
            data: None,
            extra: Map::new(),
        }
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }
}

impl From<ElementNode> for SlateNode {
    fn from(el: ElementNode) -> Self {
        SlateNode::Element(el)
    }
}

impl From<TextLeaf> for SlateNode {
    fn from(leaf: TextLeaf) -> Self {
        SlateNode::Text(leaf)
    }
}
