//! # Settle Up
//!
//! Splits a shared cost equally between participants and works out the
//! pairwise transfers that even everyone out.
//!
//! ## Design Principles
//!
//! - **Full-precision arithmetic**: `rust_decimal`, rounded only for display
//! - **Greedy matching**: smallest debt pays first, to the largest receiver
//! - **Strict invariants**: every debt and every due ends at exactly zero
//! - **Deterministic output**: ties are broken by input order
//!
//! ## Example
//!
//! ```
//! use settle_up::{describe_settlement, Amount, Contribution};
//!
//! let contributions = vec![
//!     Contribution::new("Alice", Amount::from(0)),
//!     Contribution::new("Bob", Amount::from(1000)),
//! ];
//! let text = describe_settlement(&contributions, "Alice").unwrap();
//! assert_eq!(text, "to Bob 500, pay.");
//! ```

pub mod amount;
pub mod engine;
pub mod error;
pub mod input;
pub mod participant;
pub mod position;
pub mod receivers;

pub use amount::Amount;
pub use engine::{Settlement, SettlementEngine};
pub use error::{Result, SettleError};
pub use input::{pair_columns, read_contributions, ContributionRecord};
pub use participant::{Action, Contribution, Direction, LogEntry, Participant, Transfer};
pub use position::{average_cost, compute_positions};
pub use receivers::ReceiverQueue;

/// Positions and settles `contributions` in one call.
pub fn settle(contributions: &[Contribution]) -> Result<Settlement> {
    let participants = compute_positions(contributions)?;
    SettlementEngine::settle(participants)
}

/// Settles `contributions` and returns the rendered transfers for `target`.
pub fn describe_settlement(contributions: &[Contribution], target: &str) -> Result<String> {
    settle(contributions)?.describe(target)
}
