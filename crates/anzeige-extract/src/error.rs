use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractError {
    /// Never escapes [`crate::normalize`], which falls back to the raw content.
    #[error("malformed HTML: {reason}")]
    MalformedInput { reason: String },
}
