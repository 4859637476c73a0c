//! Arena-backed DOM for one parsed fragment.
//!
//! Every node lives in a single `Vec` and refers to its parent and siblings by
//! [`NodeId`], so navigation never involves shared ownership. Text that trails
//! an element inside its parent's flow is an ordinary text node here, with its
//! own parent/prev/next links.

use kuchiki::{traits::*, NodeRef};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Text(String),
    Element {
        tag: String,
        attrs: Vec<(String, String)>,
    },
    Comment(String),
}

#[derive(Debug, Clone)]
pub struct DomNode {
    pub kind: NodeKind,
    pub parent: Option<NodeId>,
    pub prev: Option<NodeId>,
    pub next: Option<NodeId>,
    pub children: Vec<NodeId>,
}

#[derive(Debug, Clone, Default)]
pub struct Dom {
    nodes: Vec<DomNode>,
    roots: Vec<NodeId>,
}

impl Dom {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses `html` as body content and keeps the body's child nodes as roots.
    pub fn parse_fragment(html: &str) -> Self {
        let document = kuchiki::parse_html().one(html.to_string());
        let mut dom = Dom::new();
        let Ok(body) = document.select_first("body") else {
            return dom;
        };

        let mut stack: Vec<(NodeRef, Option<NodeId>)> = body
            .as_node()
            .children()
            .rev()
            .map(|child| (child, None))
            .collect();
        while let Some((node, parent)) = stack.pop() {
            let Some(kind) = node_kind(&node) else {
                continue;
            };
            let id = dom.append(parent, kind);
            if node.as_element().is_some() {
                stack.extend(node.children().rev().map(|child| (child, Some(id))));
            }
        }
        dom
    }

    pub fn append_text(&mut self, parent: Option<NodeId>, text: impl Into<String>) -> NodeId {
        self.append(parent, NodeKind::Text(text.into()))
    }

    pub fn append_element(
        &mut self,
        parent: Option<NodeId>,
        tag: &str,
        attrs: &[(&str, &str)],
    ) -> NodeId {
        let attrs = attrs
            .iter()
            .map(|(k, v)| (k.to_ascii_lowercase(), v.to_string()))
            .collect();
        self.append(
            parent,
            NodeKind::Element {
                tag: tag.to_ascii_lowercase(),
                attrs,
            },
        )
    }

    pub fn append_comment(&mut self, parent: Option<NodeId>, text: impl Into<String>) -> NodeId {
        self.append(parent, NodeKind::Comment(text.into()))
    }

    fn append(&mut self, parent: Option<NodeId>, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        let prev = match parent {
            Some(p) => self.nodes[p.0].children.last().copied(),
            None => self.roots.last().copied(),
        };
        self.nodes.push(DomNode {
            kind,
            parent,
            prev,
            next: None,
            children: Vec::new(),
        });
        if let Some(prev) = prev {
            self.nodes[prev.0].next = Some(id);
        }
        match parent {
            Some(p) => self.nodes[p.0].children.push(id),
            None => self.roots.push(id),
        }
        id
    }

    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All node ids in document order.
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.nodes.len()).map(NodeId)
    }

    pub fn get(&self, id: NodeId) -> Option<&DomNode> {
        self.nodes.get(id.0)
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.parent)
    }

    pub fn prev(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.prev)
    }

    pub fn next(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.next)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    pub fn is_text(&self, id: NodeId) -> bool {
        matches!(self.get(id).map(|n| &n.kind), Some(NodeKind::Text(_)))
    }

    /// Own text of a text node.
    pub fn text(&self, id: NodeId) -> Option<&str> {
        match self.get(id).map(|n| &n.kind) {
            Some(NodeKind::Text(text)) => Some(text),
            _ => None,
        }
    }

    pub fn tag(&self, id: NodeId) -> Option<&str> {
        match self.get(id).map(|n| &n.kind) {
            Some(NodeKind::Element { tag, .. }) => Some(tag),
            _ => None,
        }
    }

    pub fn attr(&self, id: NodeId, name: &str) -> Option<&str> {
        match self.get(id).map(|n| &n.kind) {
            Some(NodeKind::Element { attrs, .. }) => attrs
                .iter()
                .find(|(k, _)| k.eq_ignore_ascii_case(name))
                .map(|(_, v)| v.as_str()),
            _ => None,
        }
    }

    /// Concatenated text of `id` and all its descendant text nodes.
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            match self.get(current).map(|n| &n.kind) {
                Some(NodeKind::Text(text)) => out.push_str(text),
                Some(NodeKind::Element { .. }) => {
                    stack.extend(self.children(current).iter().rev().copied());
                }
                Some(NodeKind::Comment(_)) | None => {}
            }
        }
        out
    }
}

fn node_kind(node: &NodeRef) -> Option<NodeKind> {
    if let Some(text) = node.as_text() {
        return Some(NodeKind::Text(text.borrow().clone()));
    }
    if let Some(comment) = node.as_comment() {
        return Some(NodeKind::Comment(comment.borrow().clone()));
    }
    let el = node.as_element()?;
    let attrs = el
        .attributes
        .borrow()
        .map
        .iter()
        .map(|(name, attr)| (name.local.to_string(), attr.value.clone()))
        .collect();
    Some(NodeKind::Element {
        tag: el.name.local.to_lowercase(),
        attrs,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn links_text_siblings_around_elements() {
        let dom = Dom::parse_fragment("<p class='first'>Hello <br/>world</p>");
        let [p] = dom.roots() else {
            panic!("expected a single root");
        };
        let p = *p;
        assert_eq!(dom.tag(p), Some("p"));
        assert_eq!(dom.attr(p, "class"), Some("first"));

        let [hello, br, world] = dom.children(p) else {
            panic!("expected three children");
        };
        assert_eq!(dom.text(*hello), Some("Hello "));
        assert_eq!(dom.prev(*hello), None);
        assert_eq!(dom.next(*hello), Some(*br));
        assert_eq!(dom.tag(*br), Some("br"));
        assert_eq!(dom.prev(*br), Some(*hello));
        assert_eq!(dom.parent(*br), Some(p));
        assert_eq!(dom.text(*world), Some("world"));
        assert_eq!(dom.next(*world), None);
    }

    #[test]
    fn top_level_nodes_have_no_parent() {
        let dom = Dom::parse_fragment("Hello <b>bold</b> tail");
        assert_eq!(dom.roots().len(), 3);
        for root in dom.roots() {
            assert_eq!(dom.parent(*root), None);
        }
        let tail = dom.roots()[2];
        assert_eq!(dom.text(tail), Some(" tail"));
        assert_eq!(dom.prev(tail), Some(dom.roots()[1]));
    }

    #[test]
    fn text_content_walks_descendants_in_order() {
        let dom = Dom::parse_fragment("<div>a<span>b<i>c</i></span>d<!-- skip --></div>");
        let div = dom.roots()[0];
        assert_eq!(dom.text_content(div), "abcd");
    }

    #[test]
    fn keeps_comments_as_nodes() {
        let dom = Dom::parse_fragment("<p>x</p><!-- note -->");
        assert_eq!(dom.roots().len(), 2);
        assert!(matches!(
            dom.get(dom.roots()[1]).map(|n| &n.kind),
            Some(NodeKind::Comment(c)) if c == " note "
        ));
    }

    #[test]
    fn builder_links_siblings() {
        let mut dom = Dom::new();
        let h1 = dom.append_element(None, "H1", &[]);
        let a = dom.append_text(Some(h1), "a");
        let span = dom.append_element(Some(h1), "span", &[("ID", "x")]);
        assert_eq!(dom.tag(h1), Some("h1"));
        assert_eq!(dom.next(a), Some(span));
        assert_eq!(dom.prev(span), Some(a));
        assert_eq!(dom.attr(span, "id"), Some("x"));
    }
}
