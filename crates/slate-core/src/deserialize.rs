use std::{collections::HashMap, sync::Arc};

use serde_json::Value;

use crate::{
    classify::embedded_data,
    config::ConverterConfig,
    dom::{Dom, NodeId},
    error::ConvertError,
    types::{ElementNode, SlateNode},
    whitespace::Collapser,
};

pub mod handlers;

/// What a tag handler produced for one DOM node.
#[derive(Debug, Clone, PartialEq)]
pub enum Handled {
    One(SlateNode),
    Many(Vec<SlateNode>),
}

impl Handled {
    pub fn into_vec(self) -> Vec<SlateNode> {
        match self {
            Handled::One(node) => vec![node],
            Handled::Many(nodes) => nodes,
        }
    }
}

impl From<SlateNode> for Handled {
    fn from(node: SlateNode) -> Self {
        Handled::One(node)
    }
}

impl From<ElementNode> for Handled {
    fn from(el: ElementNode) -> Self {
        Handled::One(el.into())
    }
}

impl From<Vec<SlateNode>> for Handled {
    fn from(nodes: Vec<SlateNode>) -> Self {
        Handled::Many(nodes)
    }
}

/// Converts one DOM element into Slate nodes.
///
/// Implemented for plain functions and closures with the matching signature.
pub trait TagHandler: Send + Sync {
    fn handle(&self, cx: &mut Deserializer<'_>, node: NodeId) -> Result<Handled, ConvertError>;
}

impl<F> TagHandler for F
where
    F: Fn(&mut Deserializer<'_>, NodeId) -> Result<Handled, ConvertError> + Send + Sync,
{
    fn handle(&self, cx: &mut Deserializer<'_>, node: NodeId) -> Result<Handled, ConvertError> {
        self(cx, node)
    }
}

pub type HandlerMap = HashMap<String, Arc<dyn TagHandler>>;

pub fn default_handlers() -> HandlerMap {
    let mut map: HandlerMap = HashMap::new();
    map.insert("a".into(), Arc::new(handlers::handle_anchor));
    map.insert("br".into(), Arc::new(handlers::handle_line_break));
    map.insert("b".into(), Arc::new(handlers::handle_bold));
    map
}

/// Walks one DOM and dispatches every node to its handler.
pub struct Deserializer<'a> {
    dom: &'a Dom,
    config: &'a ConverterConfig,
    handlers: &'a HandlerMap,
    collapser: Collapser<'a>,
    depth: usize,
}

impl<'a> Deserializer<'a> {
    pub fn new(dom: &'a Dom, config: &'a ConverterConfig, handlers: &'a HandlerMap) -> Self {
        Self {
            dom,
            config,
            handlers,
            collapser: Collapser::new(dom, config),
            depth: 0,
        }
    }

    pub fn dom(&self) -> &'a Dom {
        self.dom
    }

    pub fn config(&self) -> &'a ConverterConfig {
        self.config
    }

    /// Deserializes every root of the DOM, in order.
    pub fn deserialize_roots(&mut self) -> Result<Vec<SlateNode>, ConvertError> {
        let dom = self.dom;
        let mut out = Vec::new();
        for &root in dom.roots() {
            out.extend(self.deserialize(Some(root))?);
        }
        Ok(out)
    }

    pub fn deserialize(&mut self, node: Option<NodeId>) -> Result<Vec<SlateNode>, ConvertError> {
        let Some(node) = node else {
            return Ok(Vec::new());
        };

        let dom = self.dom;
        if dom.is_text(node) {
            let text = self.collapser.collapse(node);
            return Ok(if text.is_empty() {
                Vec::new()
            } else {
                vec![SlateNode::text(text)]
            });
        }

        let Some(tag) = dom.tag(node) else {
            return Ok(Vec::new());
        };

        if self.depth >= self.config.max_depth {
            return Err(ConvertError::DepthLimit(self.config.max_depth));
        }
        self.depth += 1;
        let result = self.dispatch(node, tag);
        self.depth -= 1;
        result
    }

    fn dispatch(&mut self, node: NodeId, tag: &'a str) -> Result<Vec<SlateNode>, ConvertError> {
        if let Some(payload) = embedded_data(self.dom, node, self.config) {
            log::trace!("<{tag}> carries embedded data");
            return Ok(vec![self.handle_data_element(node, tag, payload)?]);
        }

        let handlers = self.handlers;
        if let Some(handler) = handlers.get(tag) {
            log::trace!("<{tag}> dispatched to tag handler");
            return Ok(handler.handle(self, node)?.into_vec());
        }

        if self.config.is_known_block(tag) {
            log::trace!("<{tag}> handled as block");
            return Ok(vec![self.handle_block(node)?]);
        }

        log::trace!("<{tag}> passed through");
        self.handle_fallback(node)
    }

    /// Children in document order, tail text included, results flattened.
    pub fn deserialize_children(&mut self, node: NodeId) -> Result<Vec<SlateNode>, ConvertError> {
        let dom = self.dom;
        let mut out = Vec::new();
        for &child in dom.children(node) {
            out.extend(self.deserialize(Some(child))?);
        }
        Ok(out)
    }

    /// Element typed after its own tag name.
    pub fn handle_block(&mut self, node: NodeId) -> Result<SlateNode, ConvertError> {
        let dom = self.dom;
        let kind = dom.tag(node).unwrap_or_default();
        let children = self.deserialize_children(node)?;
        Ok(SlateNode::element(kind, children))
    }

    /// Unknown tags vanish; their children are promoted into the parent.
    pub fn handle_fallback(&mut self, node: NodeId) -> Result<Vec<SlateNode>, ConvertError> {
        self.deserialize_children(node)
    }

    fn handle_data_element(
        &mut self,
        node: NodeId,
        tag: &str,
        payload: &str,
    ) -> Result<SlateNode, ConvertError> {
        let value: Value = serde_json::from_str(payload).map_err(|source| {
            log::warn!("rejecting embedded data on <{tag}>: {source}");
            ConvertError::MalformedPayload {
                tag: tag.to_string(),
                source,
            }
        })?;
        let Value::Object(mut fields) = value else {
            return Err(ConvertError::InvalidPayload {
                tag: tag.to_string(),
                reason: "payload is not a JSON object",
            });
        };
        let kind = match fields.remove("type") {
            None => tag.to_string(),
            Some(Value::String(kind)) => kind,
            Some(_) => {
                return Err(ConvertError::InvalidPayload {
                    tag: tag.to_string(),
                    reason: "payload type is not a string",
                })
            }
        };
        let _ = fields.remove("children");
        // a `text` field would make the element read back as a text leaf
        if fields.remove("text").is_some() {
            log::warn!("dropping `text` field from embedded data on <{tag}>");
        }
        let data = fields.remove("data");

        let children = self.deserialize_children(node)?;
        Ok(SlateNode::Element(ElementNode {
            kind,
            children,
            data,
            extra: fields,
        }))
    }
}
