/// Failures while turning an edge table into a graph.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    /// A configured column name is not present in the table.
    #[error("missing column `{column}` (available: {available:?})")]
    MissingColumn {
        column: String,
        available: Vec<String>,
    },

    /// The table cannot be read as rows of (source, target[, weight]).
    #[error("malformed input: {0}")]
    MalformedInput(String),
}

impl GraphError {
    pub(crate) fn malformed_row(row: usize, reason: impl std::fmt::Display) -> Self {
        GraphError::MalformedInput(format!("row {row}: {reason}"))
    }
}

pub type Result<T> = std::result::Result<T, GraphError>;
