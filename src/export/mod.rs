//! Flattens records into spreadsheet-ready rows.
//!
//! Rows follow the display tree: parents date-descending, each immediately
//! followed by its own sub-items date-descending, so the parent/child
//! association survives a round-trip through a spreadsheet. Field order and
//! escaping belong to the CSV writer, not to this projection.

use chrono::NaiveDate;
use serde::Serialize;

use crate::ledger::{build_tree, Transaction, TransactionKind};

/// One transaction, root or sub-item, in canonical export form.
/// `amount` is signed: expense rows are negative.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportRow {
    pub date: NaiveDate,
    pub description: String,
    pub category: String,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub amount: f64,
}

impl ExportRow {
    fn from_transaction(transaction: &Transaction) -> Self {
        Self {
            date: transaction.date,
            description: transaction.description.clone(),
            category: transaction.category.clone(),
            kind: transaction.kind,
            amount: transaction.signed_amount(),
        }
    }
}

/// Projects the flat set into export rows, sub-items directly after their
/// parent.
pub fn project(records: &[Transaction]) -> Vec<ExportRow> {
    let mut rows = Vec::with_capacity(records.len());
    for node in build_tree(records) {
        rows.push(ExportRow::from_transaction(&node.transaction));
        for sub_item in &node.sub_items {
            rows.push(ExportRow::from_transaction(sub_item));
        }
    }
    rows
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::*;

    fn record(
        description: &str,
        amount: f64,
        kind: TransactionKind,
        day: u32,
        parent_id: Option<Uuid>,
    ) -> Transaction {
        Transaction {
            id: Uuid::new_v4(),
            description: description.into(),
            amount,
            date: NaiveDate::from_ymd_opt(2024, 4, day).unwrap(),
            kind,
            category: "Misc".into(),
            parent_id,
            notes: None,
        }
    }

    #[test]
    fn sub_items_follow_their_parent() {
        let old_parent = record("old", 75.0, TransactionKind::Expense, 1, None);
        let new_root = record("new", 500.0, TransactionKind::Income, 20, None);
        let sub_a = record("sub a", 30.0, TransactionKind::Expense, 3, Some(old_parent.id));
        let sub_b = record("sub b", 45.0, TransactionKind::Expense, 9, Some(old_parent.id));

        let rows = project(&[old_parent, sub_a, sub_b, new_root]);
        let order: Vec<&str> = rows.iter().map(|row| row.description.as_str()).collect();
        assert_eq!(order, vec!["new", "old", "sub b", "sub a"]);
    }

    #[test]
    fn expense_rows_are_negative() {
        let income = record("pay", 100.0, TransactionKind::Income, 2, None);
        let expense = record("rent", 80.0, TransactionKind::Expense, 1, None);
        let rows = project(&[income, expense]);
        assert_eq!(rows[0].amount, 100.0);
        assert_eq!(rows[1].amount, -80.0);
    }

    #[test]
    fn row_count_covers_every_record() {
        let parent = record("parent", 10.0, TransactionKind::Expense, 5, None);
        let sub = record("sub", 10.0, TransactionKind::Expense, 4, Some(parent.id));
        assert_eq!(project(&[parent, sub]).len(), 2);
    }
}
