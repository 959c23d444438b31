use crate::model::Cell;

/// Swap proposals the board refuses before touching any cell.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SwapError {
    #[error("cell {0} is outside the board")]
    OutOfBounds(Cell),

    #[error("cells {a} and {b} are not orthogonal neighbours")]
    NotAdjacent { a: Cell, b: Cell },
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to parse config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}
