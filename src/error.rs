//! Error types for settlement.

use crate::amount::Amount;
use thiserror::Error;

/// Result type alias for settlement operations
pub type Result<T> = std::result::Result<T, SettleError>;

/// Errors that can occur while computing or reading a settlement.
#[derive(Error, Debug)]
pub enum SettleError {
    /// No participants were supplied, so there is no average cost
    #[error("No participants supplied; the average cost is undefined")]
    EmptyInput,

    /// The requested participant is not part of the settlement
    #[error("Participant {name:?} not found")]
    NameNotFound { name: String },

    /// The same name was supplied for more than one participant
    #[error("Participant {name:?} appears more than once")]
    DuplicateName { name: String },

    /// A payer still owes money but nobody is left to receive it
    #[error("No receiver left for {payer:?} who still owes {outstanding}")]
    UnreachableSettlement { payer: String, outstanding: Amount },

    /// The total paid does not fit in a decimal
    #[error("Amount overflow while summing payments")]
    AmountOverflow,

    /// The name and amount columns have different lengths
    #[error("Column length mismatch: {names} names but {amounts} amounts")]
    ColumnMismatch { names: usize, amounts: usize },

    /// Failed to open or read the input file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV parsing error
    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    /// Invalid contribution record
    #[error("Invalid record at row {row}: {message}")]
    InvalidRecord { row: usize, message: String },

    /// Missing input file argument
    #[error("Missing input file argument. Usage: settle-up <input.csv> [name]")]
    MissingArgument,
}
