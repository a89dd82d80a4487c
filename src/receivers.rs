//! Receiver priority index.
//!
//! Max-heap of participants that still have money due, keyed by remaining
//! amount with stable tie-breaking on input position.

use crate::amount::Amount;
use crate::participant::Participant;
use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// Heap slot for one receiver.
///
/// Field order drives the derived `Ord`: larger `due` first, then the
/// smaller input position (hence `Reverse`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct ReceiverSlot {
    due: Amount,
    position: Reverse<usize>,
}

/// Priority index over receivers with a positive remaining due.
///
/// # Ordering Guarantees
/// Receivers are handed out by:
/// 1. Remaining due (descending)
/// 2. Input position (ascending) when dues are equal
///
/// A receiver that is only partly paid must be pushed back with its new due.
#[derive(Debug, Default)]
pub struct ReceiverQueue {
    heap: BinaryHeap<ReceiverSlot>,
}

impl ReceiverQueue {
    /// Indexes every participant with a positive `due`.
    pub fn from_participants(participants: &[Participant]) -> Self {
        let mut queue = ReceiverQueue {
            heap: BinaryHeap::with_capacity(participants.len()),
        };
        for (position, p) in participants.iter().enumerate() {
            queue.push(position, p.due);
        }
        queue
    }

    /// Adds a receiver. Non-positive dues are ignored.
    pub fn push(&mut self, position: usize, due: Amount) {
        if due.is_positive() {
            self.heap.push(ReceiverSlot {
                due,
                position: Reverse(position),
            });
        }
    }

    /// Removes and returns the position of the receiver with the largest due.
    pub fn pop(&mut self) -> Option<usize> {
        self.heap.pop().map(|slot| slot.position.0)
    }
}
