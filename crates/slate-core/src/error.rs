use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("Malformed data payload on <{tag}>: {source}")]
    MalformedPayload {
        tag: String,
        source: serde_json::Error,
    },
    #[error("Invalid data payload on <{tag}>: {reason}")]
    InvalidPayload { tag: String, reason: &'static str },
    #[error("Markup nested deeper than {0} levels")]
    DepthLimit(usize),
}
