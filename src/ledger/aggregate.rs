//! Pure derived views over the flat record set.
//!
//! Every function here is deterministic in its input and never mutates it;
//! callers recompute on demand instead of caching. Sub-items are excluded
//! from totals and series because their value is already folded into the
//! parent amount; counting both would double-count.

use std::collections::BTreeMap;

use super::transaction::{Transaction, TransactionKind};

/// Month filter value that disables filtering altogether.
pub const MONTH_FILTER_ALL: &str = "all";

/// Summed top-level income and expense for a (possibly pre-filtered) set.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PeriodTotals {
    pub income: f64,
    pub expense: f64,
}

impl PeriodTotals {
    pub fn balance(&self) -> f64 {
        self.income - self.expense
    }
}

pub fn period_totals(records: &[Transaction]) -> PeriodTotals {
    let mut totals = PeriodTotals::default();
    for record in records.iter().filter(|record| record.is_root()) {
        match record.kind {
            TransactionKind::Income => totals.income += record.amount,
            TransactionKind::Expense => totals.expense += record.amount,
        }
    }
    totals
}

/// One income/expense bar pair per month present in the data.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlySummary {
    /// `YYYY-MM` grouping key.
    pub month: String,
    pub income: f64,
    pub expense: f64,
}

impl MonthlySummary {
    /// Signed bar value; the renderer colors by sign.
    pub fn balance(&self) -> f64 {
        self.income - self.expense
    }
}

/// Groups top-level records by month, chronologically ascending.
pub fn monthly_series(records: &[Transaction]) -> Vec<MonthlySummary> {
    let mut by_month: BTreeMap<String, (f64, f64)> = BTreeMap::new();
    for record in records.iter().filter(|record| record.is_root()) {
        let entry = by_month.entry(record.month_key()).or_default();
        match record.kind {
            TransactionKind::Income => entry.0 += record.amount,
            TransactionKind::Expense => entry.1 += record.amount,
        }
    }
    by_month
        .into_iter()
        .map(|(month, (income, expense))| MonthlySummary {
            month,
            income,
            expense,
        })
        .collect()
}

/// One slice of the expense-by-category chart.
#[derive(Debug, Clone, PartialEq)]
pub struct CategorySlice {
    pub name: String,
    pub value: f64,
}

/// Sums top-level expenses per category, in first-occurrence order.
/// Categories without a matching expense do not appear.
pub fn category_breakdown(records: &[Transaction]) -> Vec<CategorySlice> {
    let mut slices: Vec<CategorySlice> = Vec::new();
    for record in records
        .iter()
        .filter(|record| record.is_root() && record.kind == TransactionKind::Expense)
    {
        match slices.iter_mut().find(|slice| slice.name == record.category) {
            Some(slice) => slice.value += record.amount,
            None => slices.push(CategorySlice {
                name: record.category.clone(),
                value: record.amount,
            }),
        }
    }
    slices
}

/// Distinct `YYYY-MM` keys across roots and sub-items, most recent first.
pub fn available_months(records: &[Transaction]) -> Vec<String> {
    let mut months: Vec<String> = records.iter().map(Transaction::month_key).collect();
    months.sort();
    months.dedup();
    months.reverse();
    months
}

/// Subset of records whose date starts with `filter`; the literal
/// [`MONTH_FILTER_ALL`] passes the whole set through.
pub fn filter_by_month(records: &[Transaction], filter: &str) -> Vec<Transaction> {
    if filter == MONTH_FILTER_ALL {
        return records.to_vec();
    }
    records
        .iter()
        .filter(|record| {
            record
                .date
                .format("%Y-%m-%d")
                .to_string()
                .starts_with(filter)
        })
        .cloned()
        .collect()
}
