use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

pub const DEFAULT_BLOCK_TYPE: &str = "p";
pub const DEFAULT_DATA_ATTRIBUTE: &str = "data-slate-data";
pub const DEFAULT_MAX_DEPTH: usize = 512;

pub const KNOWN_BLOCK_TYPES: &[&str] = &[
    "p", "h1", "h2", "h3", "h4", "h5", "h6", "blockquote", "pre", "div", "ul", "ol", "li", "dl",
    "dt", "dd", "table", "thead", "tbody", "tfoot", "tr", "th", "td", "hr", "figure",
    "figcaption", "b", "strong", "i", "em", "u", "s", "del", "sub", "sup", "code",
];

pub const INLINE_ELEMENTS: &[&str] = &[
    "a", "abbr", "acronym", "audio", "b", "bdi", "bdo", "big", "br", "button", "canvas", "cite",
    "code", "data", "datalist", "del", "dfn", "em", "embed", "i", "iframe", "img", "input", "ins",
    "kbd", "label", "map", "mark", "meter", "noscript", "object", "output", "picture", "progress",
    "q", "ruby", "s", "samp", "script", "select", "slot", "small", "span", "strong", "sub", "sup",
    "svg", "template", "textarea", "time", "u", "tt", "var", "video", "wbr",
];

/// Tag sets and limits injected into the converter.
///
/// Tag names are stored lowercase; lookups are case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConverterConfig {
    pub default_block_type: String,
    pub known_block_types: BTreeSet<String>,
    pub inline_tags: BTreeSet<String>,
    pub data_attribute: String,
    pub max_depth: usize,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            default_block_type: DEFAULT_BLOCK_TYPE.to_string(),
            known_block_types: tag_set(KNOWN_BLOCK_TYPES),
            inline_tags: tag_set(INLINE_ELEMENTS),
            data_attribute: DEFAULT_DATA_ATTRIBUTE.to_string(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

fn tag_set(tags: &[&str]) -> BTreeSet<String> {
    tags.iter().map(|t| t.to_ascii_lowercase()).collect()
}

impl ConverterConfig {
    pub fn with_default_block_type(mut self, kind: impl Into<String>) -> Self {
        self.default_block_type = kind.into();
        self
    }

    pub fn with_known_block_types<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.known_block_types = tags
            .into_iter()
            .map(|t| t.as_ref().to_ascii_lowercase())
            .collect();
        self
    }

    pub fn with_inline_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.inline_tags = tags
            .into_iter()
            .map(|t| t.as_ref().to_ascii_lowercase())
            .collect();
        self
    }

    pub fn with_data_attribute(mut self, name: impl Into<String>) -> Self {
        self.data_attribute = name.into().to_ascii_lowercase();
        self
    }

    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    pub fn is_inline_tag(&self, tag: &str) -> bool {
        contains_ignore_case(&self.inline_tags, tag)
    }

    pub fn is_known_block(&self, tag: &str) -> bool {
        contains_ignore_case(&self.known_block_types, tag)
    }

    /// Lowercases every configured tag and attribute name. Apply after
    /// deserializing a config from user input.
    pub fn lowercased(mut self) -> Self {
        self.known_block_types = self
            .known_block_types
            .iter()
            .map(|t| t.to_ascii_lowercase())
            .collect();
        self.inline_tags = self
            .inline_tags
            .iter()
            .map(|t| t.to_ascii_lowercase())
            .collect();
        self.data_attribute = self.data_attribute.to_ascii_lowercase();
        self
    }
}

fn contains_ignore_case(set: &BTreeSet<String>, tag: &str) -> bool {
    if tag.bytes().any(|b| b.is_ascii_uppercase()) {
        set.contains(&tag.to_ascii_lowercase())
    } else {
        set.contains(tag)
    }
}
