//! Input adapters: CSV rows and parallel name/amount columns.

use crate::amount::Amount;
use crate::error::{Result, SettleError};
use crate::participant::Contribution;
use csv::{ReaderBuilder, Trim};
use log::debug;
use serde::Deserialize;
use std::io::Read;

/// Raw contribution record as read from CSV.
#[derive(Debug, Deserialize)]
pub struct ContributionRecord {
    /// Participant name
    pub name: String,

    /// Amount this participant paid
    pub paid: Amount,
}

impl ContributionRecord {
    /// Validates the raw record into a contribution.
    ///
    /// Returns `None` if the name is blank.
    pub fn parse(self) -> Option<Contribution> {
        let name = self.name.trim();
        if name.is_empty() {
            return None;
        }
        Some(Contribution::new(name, self.paid))
    }
}

/// Reads every contribution from a headered `name,paid` CSV.
///
/// Any malformed row fails the whole read: dropping a participant would
/// silently change everyone else's share.
pub fn read_contributions<R: Read>(reader: R) -> Result<Vec<Contribution>> {
    let mut csv_reader = ReaderBuilder::new().trim(Trim::All).from_reader(reader);
    let mut contributions = Vec::new();

    for (row_idx, result) in csv_reader.deserialize::<ContributionRecord>().enumerate() {
        let row = row_idx + 2; // 1-indexed, accounting for header row

        let record = result.map_err(|e| SettleError::InvalidRecord {
            row,
            message: e.to_string(),
        })?;
        let contribution = record.parse().ok_or_else(|| SettleError::InvalidRecord {
            row,
            message: "empty name".to_string(),
        })?;

        debug!("Row {}: {} paid {}", row, contribution.name, contribution.paid);
        contributions.push(contribution);
    }

    Ok(contributions)
}

/// Zips a name column with an amount column, the way a spreadsheet hands
/// over two ranges.
pub fn pair_columns<S: AsRef<str>>(names: &[S], amounts: &[Amount]) -> Result<Vec<Contribution>> {
    if names.len() != amounts.len() {
        return Err(SettleError::ColumnMismatch {
            names: names.len(),
            amounts: amounts.len(),
        });
    }

    Ok(names
        .iter()
        .zip(amounts)
        .map(|(name, paid)| Contribution::new(name.as_ref(), *paid))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use std::str::FromStr;

    fn amt(s: &str) -> Amount {
        Amount::from_str(s).unwrap()
    }

    #[test]
    fn test_read_contributions() {
        let csv = "name,paid\nAlice,0\nBob,1000.50\n";
        let contributions = read_contributions(Cursor::new(csv)).unwrap();

        assert_eq!(
            contributions,
            vec![
                Contribution::new("Alice", amt("0")),
                Contribution::new("Bob", amt("1000.5")),
            ]
        );
    }

    #[test]
    fn test_read_handles_whitespace() {
        let csv = "name, paid\n  Alice ,  12.5 \n";
        let contributions = read_contributions(Cursor::new(csv)).unwrap();
        assert_eq!(contributions[0].name, "Alice");
        assert_eq!(contributions[0].paid, amt("12.5"));
    }

    #[test]
    fn test_read_rejects_bad_amount() {
        let csv = "name,paid\nAlice,0\nBob,lots\n";
        match read_contributions(Cursor::new(csv)) {
            Err(SettleError::InvalidRecord { row, .. }) => assert_eq!(row, 3),
            other => panic!("Expected InvalidRecord, got {:?}", other),
        }
    }

    #[test]
    fn test_read_rejects_blank_name() {
        let csv = "name,paid\n,10\n";
        match read_contributions(Cursor::new(csv)) {
            Err(SettleError::InvalidRecord { row, message }) => {
                assert_eq!(row, 2);
                assert_eq!(message, "empty name");
            }
            other => panic!("Expected InvalidRecord, got {:?}", other),
        }
    }

    #[test]
    fn test_read_header_only_is_empty() {
        let contributions = read_contributions(Cursor::new("name,paid\n")).unwrap();
        assert!(contributions.is_empty());
    }

    #[test]
    fn test_pair_columns() {
        let contributions = pair_columns(&["A", "B"], &[amt("0"), amt("1000")]).unwrap();
        assert_eq!(contributions[1], Contribution::new("B", amt("1000")));
    }

    #[test]
    fn test_pair_columns_length_mismatch() {
        match pair_columns(&["A", "B", "C"], &[amt("0"), amt("1000")]) {
            Err(SettleError::ColumnMismatch { names, amounts }) => {
                assert_eq!((names, amounts), (3, 2));
            }
            other => panic!("Expected ColumnMismatch, got {:?}", other),
        }
    }
}
