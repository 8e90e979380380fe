use thiserror::Error;

/// Errors returned by graph operations.
///
/// An unreachable goal is not an error. Searches report it as `None`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// The named vertex has never been added to the graph.
    #[error("unknown vertex {0}")]
    UnknownVertex(String),
}

impl GraphError {
    pub(crate) fn unknown_vertex<K: std::fmt::Debug>(key: &K) -> Self {
        Self::UnknownVertex(format!("{:?}", key))
    }
}

pub type Result<T> = std::result::Result<T, GraphError>;
