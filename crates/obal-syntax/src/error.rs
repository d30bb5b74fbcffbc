use thiserror::Error;

#[derive(Debug, Error)]
pub enum SyntaxError {
    #[error("malformed tree: {0}")]
    MalformedTree(String),
}
