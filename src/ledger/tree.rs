//! Rebuilds the two-level display tree from the flat persisted list.

use std::collections::{HashMap, HashSet};

use uuid::Uuid;

use super::transaction::Transaction;

/// A top-level transaction together with its sub-items.
///
/// `sub_items` exists only in this derived shape; it is never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionNode {
    pub transaction: Transaction,
    pub sub_items: Vec<Transaction>,
}

impl TransactionNode {
    pub fn has_sub_items(&self) -> bool {
        !self.sub_items.is_empty()
    }
}

/// Partitions the flat set into roots and attached sub-items, most recent
/// first at both levels.
///
/// A `parent_id` that does not resolve to a known record is treated as no
/// parent at all, so partially deleted data still renders instead of
/// erroring out.
pub fn build_tree(records: &[Transaction]) -> Vec<TransactionNode> {
    let known: HashSet<Uuid> = records.iter().map(|record| record.id).collect();

    let mut roots: Vec<Transaction> = Vec::new();
    let mut attached: HashMap<Uuid, Vec<Transaction>> = HashMap::new();
    for record in records {
        match record.parent_id {
            Some(parent_id) if known.contains(&parent_id) => {
                attached.entry(parent_id).or_default().push(record.clone());
            }
            _ => roots.push(record.clone()),
        }
    }

    let mut nodes: Vec<TransactionNode> = roots
        .into_iter()
        .map(|transaction| {
            let mut sub_items = attached.remove(&transaction.id).unwrap_or_default();
            sub_items.sort_by(|a, b| b.date.cmp(&a.date));
            TransactionNode {
                transaction,
                sub_items,
            }
        })
        .collect();
    nodes.sort_by(|a, b| b.transaction.date.cmp(&a.transaction.date));
    nodes
}
