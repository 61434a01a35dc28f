use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ResolveError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}
