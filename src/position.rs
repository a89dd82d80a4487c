//! Net position calculation.
//!
//! Splits the total paid equally and positions every participant against
//! that share. Input order is preserved in the output.

use crate::amount::Amount;
use crate::error::{Result, SettleError};
use crate::participant::{Contribution, Participant};
use log::debug;
use std::collections::HashSet;

/// Average cost per participant: total paid divided by participant count.
pub fn average_cost(contributions: &[Contribution]) -> Result<Amount> {
    if contributions.is_empty() {
        return Err(SettleError::EmptyInput);
    }

    let total = contributions
        .iter()
        .try_fold(Amount::ZERO, |acc, c| acc.checked_add(c.paid))
        .ok_or(SettleError::AmountOverflow)?;

    total
        .checked_split(contributions.len())
        .ok_or(SettleError::EmptyInput)
}

/// Builds a fresh participant for every contribution, positioned against the
/// average cost.
///
/// Fails on empty input, on duplicate names, and when a position does not
/// fit in a decimal.
pub fn compute_positions(contributions: &[Contribution]) -> Result<Vec<Participant>> {
    let average = average_cost(contributions)?;

    let mut seen = HashSet::with_capacity(contributions.len());
    for c in contributions {
        if !seen.insert(c.name.as_str()) {
            return Err(SettleError::DuplicateName {
                name: c.name.clone(),
            });
        }
    }

    let participants: Vec<Participant> = contributions
        .iter()
        .map(|c| Participant::with_position(c.name.clone(), c.paid, average))
        .collect::<Result<_>>()?;

    debug!(
        "Positioned {} participants against average cost {}",
        participants.len(),
        average
    );

    Ok(participants)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::participant::Action;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn contributions(pairs: &[(&str, &str)]) -> Vec<Contribution> {
        pairs
            .iter()
            .map(|(name, paid)| Contribution::new(*name, Amount::from_str(paid).unwrap()))
            .collect()
    }

    #[test]
    fn test_empty_input_fails() {
        assert!(matches!(
            compute_positions(&[]),
            Err(SettleError::EmptyInput)
        ));
        assert!(matches!(average_cost(&[]), Err(SettleError::EmptyInput)));
    }

    #[test]
    fn test_two_party_positions() {
        let participants = compute_positions(&contributions(&[("A", "0"), ("B", "1000")])).unwrap();

        assert_eq!(participants[0].name, "A");
        assert_eq!(participants[0].action, Action::Pay);
        assert_eq!(participants[0].owed.to_string(), "500");
        assert_eq!(participants[1].action, Action::Receive);
        assert_eq!(participants[1].due.to_string(), "500");
    }

    #[test]
    fn test_exact_split_has_no_actions() {
        let participants =
            compute_positions(&contributions(&[("A", "1000"), ("B", "1000")])).unwrap();
        assert!(participants.iter().all(|p| p.action == Action::None));
    }

    #[test]
    fn test_single_participant_has_no_action() {
        let participants = compute_positions(&contributions(&[("Solo", "42.5")])).unwrap();
        assert_eq!(participants[0].action, Action::None);
        assert!(participants[0].transfer_log.is_empty());
    }

    #[test]
    fn test_preserves_input_order() {
        let participants =
            compute_positions(&contributions(&[("C", "900"), ("A", "0"), ("B", "0")])).unwrap();
        let names: Vec<&str> = participants.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["C", "A", "B"]);
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let result = compute_positions(&contributions(&[("A", "10"), ("B", "0"), ("A", "5")]));
        match result {
            Err(SettleError::DuplicateName { name }) => assert_eq!(name, "A"),
            other => panic!("Expected DuplicateName, got {:?}", other),
        }
    }

    #[test]
    fn test_positions_are_repeatable() {
        let input = contributions(&[("A", "12.34"), ("B", "0"), ("C", "99.99")]);
        let first = compute_positions(&input).unwrap();
        let second = compute_positions(&input).unwrap();

        for (a, b) in first.iter().zip(second.iter()) {
            assert_eq!(a.action, b.action);
            assert_eq!(a.owed, b.owed);
            assert_eq!(a.due, b.due);
        }
    }

    #[test]
    fn test_refund_overflow_is_an_error() {
        let input = vec![
            Contribution::new("A", Amount::new(-Decimal::MAX)),
            Contribution::new("B", Amount::new(Decimal::MAX)),
            Contribution::new("C", Amount::new(Decimal::MAX)),
        ];
        assert!(matches!(
            compute_positions(&input),
            Err(SettleError::AmountOverflow)
        ));
    }

    #[test]
    fn test_sum_overflow_is_an_error() {
        let input = vec![
            Contribution::new("A", Amount::new(Decimal::MAX)),
            Contribution::new("B", Amount::new(Decimal::MAX)),
        ];
        assert!(matches!(
            average_cost(&input),
            Err(SettleError::AmountOverflow)
        ));
    }

    #[test]
    fn test_average_cost_of_thirds() {
        let average = average_cost(&contributions(&[("A", "0"), ("B", "0"), ("C", "1000")])).unwrap();
        assert_eq!(average.to_string(), "333.3333");
    }
}
