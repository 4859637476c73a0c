pub mod classify;
pub mod config;
pub mod deserialize;
pub mod dom;
pub mod error;
pub mod normalize;
pub mod types;
pub mod whitespace;

use std::sync::Arc;

pub use config::ConverterConfig;
pub use deserialize::{Deserializer, Handled, TagHandler};
pub use dom::{Dom, NodeId};
pub use error::ConvertError;
pub use types::{ElementNode, SlateNode, TextLeaf};

use deserialize::{default_handlers, HandlerMap};

/// HTML fragment to Slate value converter.
///
/// Holds the configuration and the tag handler table; each call to
/// [`Converter::to_slate`] works on its own DOM, so one converter can be
/// shared across threads.
#[derive(Clone)]
pub struct Converter {
    config: ConverterConfig,
    handlers: HandlerMap,
}

impl Default for Converter {
    fn default() -> Self {
        Self::new(ConverterConfig::default())
    }
}

impl Converter {
    pub fn new(config: ConverterConfig) -> Self {
        Self {
            config,
            handlers: default_handlers(),
        }
    }

    pub fn config(&self) -> &ConverterConfig {
        &self.config
    }

    /// Registers `handler` for `tag`, replacing any built-in one.
    pub fn with_handler<H>(mut self, tag: &str, handler: H) -> Self
    where
        H: TagHandler + 'static,
    {
        let _ = self.handlers.insert(tag.to_ascii_lowercase(), Arc::new(handler));
        self
    }

    pub fn without_handler(mut self, tag: &str) -> Self {
        let _ = self.handlers.remove(&tag.to_ascii_lowercase());
        self
    }

    pub fn to_slate(&self, html: &str) -> Result<Vec<SlateNode>, ConvertError> {
        let dom = Dom::parse_fragment(html);
        self.deserialize_dom(&dom)
    }

    /// Converts an already parsed DOM.
    pub fn deserialize_dom(&self, dom: &Dom) -> Result<Vec<SlateNode>, ConvertError> {
        let mut deserializer = Deserializer::new(dom, &self.config, &self.handlers);
        let nodes = deserializer.deserialize_roots()?;
        let value = normalize::normalize(nodes, &self.config);
        log::debug!(
            "converted {} DOM nodes into {} top-level Slate nodes",
            dom.len(),
            value.len()
        );
        Ok(value)
    }
}

/// Converts `html` with the default configuration.
pub fn text_to_slate(html: &str) -> Result<Vec<SlateNode>, ConvertError> {
    Converter::default().to_slate(html)
}
