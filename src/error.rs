//! Errors
//!
//! Error type shared by the dataset, tree and metric modules.
use thiserror::Error;

/// Errors that can occur while building or using a decision tree.
#[derive(Debug, Error)]
pub enum TreeError {
    /// `classify` or `predict` was called before `fit`.
    #[error("Tree wasn't built yet.")]
    NotTrained,
    /// `remove_min` was called on an empty heap.
    #[error("Cannot remove the minimum of an empty queue.")]
    EmptyQueue,
    /// A best split was requested over a dataset without attributes.
    #[error("Cannot choose a split without any attributes.")]
    NoAttributes,
    /// The dataset, or the subset being evaluated, has no instances.
    #[error("The dataset contains no instances.")]
    EmptyDataset,
    /// Two sequences that must be aligned have different lengths.
    #[error("Dimension mismatch: expected {expected}, found {found}.")]
    DimensionMismatch { expected: usize, found: usize },
    /// An outcome label other than 0 or 1.
    #[error("Invalid outcome label {0}, expected 0 or 1.")]
    InvalidLabel(String),
    /// The same attribute name appears twice.
    #[error("Attribute '{0}' is defined more than once.")]
    DuplicateAttribute(String),
    /// A feature value that is NaN or infinite.
    #[error("Non-finite value in row {row}, column {column}.")]
    NonFiniteValue { row: usize, column: usize },
    /// An attribute name without a matching value column.
    #[error("Attribute '{0}' has no values.")]
    UnknownAttribute(String),
    /// A hyperparameter outside its valid range.
    #[error("Invalid parameter value passed for {name}, expected {expected} but {found} provided.")]
    InvalidParameter {
        name: String,
        expected: String,
        found: String,
    },
    /// A CSV field that couldn't be parsed as a number.
    #[error("Couldn't parse '{value}' in line {line}, column {column}.")]
    Parse {
        line: usize,
        column: usize,
        value: String,
    },
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
