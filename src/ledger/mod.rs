//! Ledger domain models, the mutation engine, and derived-aggregate helpers.

pub mod aggregate;
pub mod category;
#[allow(clippy::module_inception)]
pub mod ledger;
pub mod mutation;
pub mod transaction;
pub mod tree;

pub use aggregate::{
    available_months, category_breakdown, filter_by_month, monthly_series, period_totals,
    CategorySlice, MonthlySummary, PeriodTotals, MONTH_FILTER_ALL,
};
pub use category::{Category, PLACEHOLDER_ICON};
pub use ledger::Ledger;
pub use mutation::{CategoryService, TransactionService};
pub use transaction::{parse_date, Transaction, TransactionDraft, TransactionKind};
pub use tree::{build_tree, TransactionNode};
