use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// No negative cycle is reachable from the requested source vertex.
    #[error("negative cycle not found")]
    NotFound,

    /// A caller-supplied argument does not satisfy the operation's precondition,
    /// e.g. rotating a path to start at a vertex it does not contain.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

pub type Result<T> = std::result::Result<T, Error>;
