//! Applies long pseudo-random operation sequences and checks the structural
//! invariants after every single step: parent amounts always equal the sum
//! of their children, the tree never exceeds two levels, and top-level
//! totals never double-count sub-items.

use chrono::NaiveDate;
use ledger_core::ledger::{
    period_totals, Transaction, TransactionDraft, TransactionKind, TransactionService,
};
use uuid::Uuid;

/// Deterministic generator so failures reproduce; no RNG crate needed.
struct Lcg(u64);

impl Lcg {
    fn next(&mut self) -> u64 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0 >> 33
    }

    fn pick(&mut self, bound: usize) -> usize {
        (self.next() as usize) % bound
    }

    fn amount(&mut self) -> f64 {
        // Whole units keep child sums exact in f64.
        self.pick(1000) as f64
    }

    fn kind(&mut self) -> TransactionKind {
        if self.pick(2) == 0 {
            TransactionKind::Income
        } else {
            TransactionKind::Expense
        }
    }

    fn date(&mut self) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1 + self.pick(12) as u32, 1 + self.pick(28) as u32).unwrap()
    }
}

fn assert_invariants(records: &[Transaction]) {
    for parent in records {
        let children: Vec<&Transaction> = records
            .iter()
            .filter(|record| record.parent_id == Some(parent.id))
            .collect();
        if !children.is_empty() {
            assert!(
                parent.is_root(),
                "sub-item {} has children of its own",
                parent.id
            );
            let sum: f64 = children.iter().map(|child| child.amount).sum();
            assert_eq!(
                parent.amount, sum,
                "parent {} diverged from its child sum",
                parent.id
            );
        }
    }

    let totals = period_totals(records);
    let top_level: f64 = records
        .iter()
        .filter(|record| record.is_root())
        .map(|record| record.amount)
        .sum();
    assert_eq!(totals.income + totals.expense, top_level);
}

fn random_root(records: &[Transaction], rng: &mut Lcg) -> Option<Uuid> {
    let roots: Vec<Uuid> = records
        .iter()
        .filter(|record| record.is_root())
        .map(|record| record.id)
        .collect();
    if roots.is_empty() {
        None
    } else {
        Some(roots[rng.pick(roots.len())])
    }
}

fn run_sequence(seed: u64, steps: usize) {
    let mut rng = Lcg(seed);
    let mut records: Vec<Transaction> = Vec::new();

    for step in 0..steps {
        match rng.pick(4) {
            // Create a root.
            0 => {
                let draft = TransactionDraft::new(
                    format!("root {step}"),
                    rng.amount(),
                    rng.date(),
                    rng.kind(),
                    "Generated",
                );
                let (next, _) = TransactionService::create(&records, draft).expect("create root");
                records = next;
            }
            // Create a sub-item under a random root.
            1 => {
                if let Some(parent_id) = random_root(&records, &mut rng) {
                    let draft = TransactionDraft::new(
                        format!("sub {step}"),
                        rng.amount(),
                        rng.date(),
                        TransactionKind::Expense,
                        "Generated",
                    )
                    .with_parent(parent_id);
                    let (next, _) =
                        TransactionService::create(&records, draft).expect("create sub-item");
                    records = next;
                }
            }
            // Update a random record.
            2 => {
                if !records.is_empty() {
                    let id = records[rng.pick(records.len())].id;
                    let draft = TransactionDraft::new(
                        format!("edited {step}"),
                        rng.amount(),
                        rng.date(),
                        rng.kind(),
                        "Generated",
                    );
                    records = TransactionService::update(&records, id, draft).expect("update");
                }
            }
            // Delete a random record (cascades when it is a parent).
            _ => {
                if !records.is_empty() {
                    let id = records[rng.pick(records.len())].id;
                    records = TransactionService::delete(&records, id).expect("delete");
                }
            }
        }
        assert_invariants(&records);
    }
}

#[test]
fn invariants_hold_across_random_operation_sequences() {
    for seed in [1, 7, 42, 1234, 987654321] {
        run_sequence(seed, 200);
    }
}

#[test]
fn cascading_delete_removes_parent_plus_children() {
    let mut rng = Lcg(99);
    let (records, parent_id) = TransactionService::create(
        &[],
        TransactionDraft::new(
            "parent",
            0.0,
            rng.date(),
            TransactionKind::Expense,
            "Generated",
        ),
    )
    .unwrap();
    let mut records = records;
    let sub_count = 5;
    for _ in 0..sub_count {
        let draft = TransactionDraft::new(
            "sub",
            rng.amount(),
            rng.date(),
            TransactionKind::Expense,
            "Generated",
        )
        .with_parent(parent_id);
        let (next, _) = TransactionService::create(&records, draft).unwrap();
        records = next;
    }
    assert_eq!(records.len(), sub_count + 1);

    let remaining = TransactionService::delete(&records, parent_id).unwrap();
    assert!(remaining.is_empty(), "parent and all sub-items removed");
}
