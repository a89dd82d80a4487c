//! Participant model and the transfer records attached to it.
//!
//! Maintains the invariant: `owed` and `due` are never both positive, and
//! `action` reflects the sign of the net position at construction time.

use crate::amount::Amount;
use crate::error::{Result, SettleError};
use serde::Serialize;
use std::fmt;

/// One raw input pair: who paid, and how much.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contribution {
    pub name: String,
    pub paid: Amount,
}

impl Contribution {
    pub fn new(name: impl Into<String>, paid: Amount) -> Self {
        Contribution {
            name: name.into(),
            paid,
        }
    }
}

/// What a participant has to do to reach the equal share.
///
/// Fixed once from the sign of the net position and never changed, even
/// though `owed`/`due` reach zero during settlement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    /// Paid less than the share.
    Pay,
    /// Paid more than the share.
    Receive,
    /// Paid exactly the share.
    None,
}

impl Action {
    /// The closing verb phrase of a rendered description.
    pub fn phrase(&self) -> &'static str {
        match self {
            Action::Pay => "pay.",
            Action::Receive => "receive.",
            Action::None => "no payment or receipt.",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Action::Pay => "pay",
            Action::Receive => "receive",
            Action::None => "none",
        };
        f.write_str(label)
    }
}

/// Direction of a transfer as seen from the participant holding the entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Sent,
    Received,
}

/// One entry of a participant's transfer log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    /// The other side of the transfer.
    pub counterparty: String,
    pub amount: Amount,
    pub direction: Direction,
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let preposition = match self.direction {
            Direction::Sent => "to",
            Direction::Received => "from",
        };
        write!(f, "{} {} {}, ", preposition, self.counterparty, self.amount)
    }
}

/// A single payment from one participant to another.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Transfer {
    pub from: String,
    pub to: String,
    pub amount: Amount,
}

/// A participant's settlement state.
///
/// # Invariants
///
/// - At most one of `owed` and `due` is positive
/// - `transfer_log` only grows
/// - `action == Action::None` iff `paid` equals the average exactly
#[derive(Debug, Clone)]
pub struct Participant {
    pub name: String,

    /// Amount actually paid toward the shared cost.
    pub paid: Amount,

    /// Remaining amount this participant must pay.
    pub owed: Amount,

    /// Remaining amount this participant must receive.
    pub due: Amount,

    pub action: Action,

    /// Transfers sent or received so far, in settlement order.
    pub transfer_log: Vec<LogEntry>,
}

impl Participant {
    /// Creates a participant positioned against the given average cost.
    ///
    /// Fails with `AmountOverflow` if `average - paid` does not fit, which
    /// large refunds (negative payments) can cause.
    pub fn with_position(name: impl Into<String>, paid: Amount, average: Amount) -> Result<Self> {
        let delta = average
            .checked_sub(paid)
            .ok_or(SettleError::AmountOverflow)?;

        let (owed, due, action) = if delta.is_positive() {
            (delta, Amount::ZERO, Action::Pay)
        } else if delta.is_zero() {
            (Amount::ZERO, Amount::ZERO, Action::None)
        } else {
            (Amount::ZERO, delta.abs(), Action::Receive)
        };

        Ok(Participant {
            name: name.into(),
            paid,
            owed,
            due,
            action,
            transfer_log: Vec::new(),
        })
    }

    /// Records a payment sent to `receiver`, reducing `owed`. A remainder
    /// within `tolerance` is a rounding residue and becomes zero.
    pub fn record_sent(&mut self, receiver: &str, amount: Amount, tolerance: Amount) {
        self.owed = (self.owed - amount).clamp_residue(tolerance);
        self.transfer_log.push(LogEntry {
            counterparty: receiver.to_string(),
            amount,
            direction: Direction::Sent,
        });
    }

    /// Records a payment received from `payer`, reducing `due`.
    pub fn record_received(&mut self, payer: &str, amount: Amount, tolerance: Amount) {
        self.due = (self.due - amount).clamp_residue(tolerance);
        self.transfer_log.push(LogEntry {
            counterparty: payer.to_string(),
            amount,
            direction: Direction::Received,
        });
    }

    /// Total recorded in the log for one direction.
    pub fn total(&self, direction: Direction) -> Amount {
        self.transfer_log
            .iter()
            .filter(|entry| entry.direction == direction)
            .map(|entry| entry.amount)
            .sum()
    }

    /// Renders the transfer log followed by the closing verb phrase.
    pub fn describe(&self) -> String {
        if self.action == Action::None {
            return self.action.phrase().to_string();
        }

        let mut text: String = self.transfer_log.iter().map(|e| e.to_string()).collect();
        text.push_str(self.action.phrase());
        text
    }
}
