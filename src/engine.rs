//! Settlement engine.
//!
//! Turns positioned participants into pairwise transfers. Payers are taken in
//! ascending order of what they owe, and each one pays the receivers with the
//! largest remaining due until their debt is cleared.

use crate::amount::Amount;
use crate::error::{Result, SettleError};
use crate::participant::{Action, Participant, Transfer};
use crate::receivers::ReceiverQueue;
use log::{debug, trace, warn};
use serde::Serialize;
use std::io::Write;

/// The greedy largest-receiver-first settlement engine.
///
/// # Tie-breaking
///
/// Payers with equal debts, and receivers with equal dues, are handled in
/// input order so that the same input always yields the same transfers.
pub struct SettlementEngine;

impl SettlementEngine {
    /// Settles all participants, consuming them into a [`Settlement`].
    ///
    /// Fails with `UnreachableSettlement` if a payer still owes money after
    /// every receiver has been paid in full, which only happens when the
    /// positions were not balanced to begin with.
    ///
    /// Remainders within [`SettlementEngine::residue_tolerance`] count as
    /// settled.
    pub fn settle(mut participants: Vec<Participant>) -> Result<Settlement> {
        let tolerance = Self::residue_tolerance(&participants);
        trace!("Residue tolerance {}", tolerance);

        // Stable sort keeps input order among equal debts.
        let mut payers: Vec<usize> = (0..participants.len()).collect();
        payers.sort_by(|&a, &b| participants[a].owed.cmp(&participants[b].owed));

        let mut receivers = ReceiverQueue::from_participants(&participants);
        let mut transfers = Vec::new();

        for payer_idx in payers {
            if participants[payer_idx].owed.is_within(tolerance) {
                participants[payer_idx].owed = Amount::ZERO;
                continue;
            }

            while participants[payer_idx].owed.is_positive() {
                let receiver_idx = match receivers.pop() {
                    Some(idx) => idx,
                    None => {
                        let payer = &participants[payer_idx];
                        return Err(SettleError::UnreachableSettlement {
                            payer: payer.name.clone(),
                            outstanding: payer.owed,
                        });
                    }
                };

                let amount = participants[payer_idx]
                    .owed
                    .min(participants[receiver_idx].due);
                let payer_name = participants[payer_idx].name.clone();
                let receiver_name = participants[receiver_idx].name.clone();

                participants[payer_idx].record_sent(&receiver_name, amount, tolerance);
                participants[receiver_idx].record_received(&payer_name, amount, tolerance);

                debug!("{} pays {} to {}", payer_name, amount, receiver_name);

                let remaining = participants[receiver_idx].due;
                if remaining.is_positive() {
                    receivers.push(receiver_idx, remaining);
                } else {
                    trace!("{} is fully paid", receiver_name);
                }

                transfers.push(Transfer {
                    from: payer_name,
                    to: receiver_name,
                    amount,
                });
            }
        }

        // Rounding in the average can leave a receiver nobody was left to pay.
        for p in participants.iter_mut() {
            if p.due.is_within(tolerance) {
                p.due = Amount::ZERO;
            } else {
                warn!("{} is still due {} after settlement", p.name, p.due);
            }
        }

        debug!(
            "Settled {} participants with {} transfers",
            participants.len(),
            transfers.len()
        );

        Ok(Settlement {
            participants,
            transfers,
        })
    }

    /// Largest remainder treated as rounding residue for these participants.
    ///
    /// Scales with the largest position, since `Decimal` rounding error grows
    /// with magnitude.
    pub fn residue_tolerance(participants: &[Participant]) -> Amount {
        let largest = participants
            .iter()
            .map(|p| p.owed.max(p.due))
            .max()
            .unwrap_or(Amount::ZERO);
        Amount::tolerance_for(largest)
    }
}

/// Row written by [`Settlement::write_output`].
#[derive(Serialize)]
struct SummaryRow<'a> {
    name: &'a str,
    paid: Amount,
    action: Action,
    description: String,
}

/// The outcome of a completed settlement.
#[derive(Debug, Clone)]
pub struct Settlement {
    /// Participants in input order, with logs filled in.
    participants: Vec<Participant>,

    /// Every transfer in the order it was made.
    transfers: Vec<Transfer>,
}

impl Settlement {
    /// Rendered description for the participant called `name`.
    pub fn describe(&self, name: &str) -> Result<String> {
        self.participant(name)
            .map(Participant::describe)
            .ok_or_else(|| SettleError::NameNotFound {
                name: name.to_string(),
            })
    }

    /// Looks up a participant by exact name.
    pub fn participant(&self, name: &str) -> Option<&Participant> {
        self.participants.iter().find(|p| p.name == name)
    }

    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    pub fn transfers(&self) -> &[Transfer] {
        &self.transfers
    }

    /// Writes every participant as CSV in input order.
    pub fn write_output<W: Write>(&self, writer: W) -> Result<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        for p in &self.participants {
            csv_writer.serialize(SummaryRow {
                name: &p.name,
                paid: p.paid,
                action: p.action,
                description: p.describe(),
            })?;
        }

        csv_writer.flush()?;
        Ok(())
    }
}
