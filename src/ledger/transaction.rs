use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::LedgerError;

/// A single financial record in the flat, persisted form.
///
/// A record with a `parent_id` is a sub-item; its amount is folded into the
/// parent's amount by the mutation engine, so sub-items never contribute to
/// period totals on their own.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    pub id: Uuid,
    pub description: String,
    pub amount: f64,
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Transaction {
    pub(crate) fn from_draft(draft: &TransactionDraft) -> Self {
        Self {
            id: Uuid::new_v4(),
            description: draft.description.clone(),
            amount: draft.amount,
            date: draft.date,
            kind: draft.kind,
            category: draft.category.clone(),
            parent_id: draft.parent_id,
            notes: draft.notes.clone(),
        }
    }

    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    /// The `YYYY-MM` grouping key used by the monthly series and the
    /// available-month index.
    pub fn month_key(&self) -> String {
        self.date.format("%Y-%m").to_string()
    }

    /// Amount with the sign implied by `kind` (expenses negative).
    pub fn signed_amount(&self) -> f64 {
        match self.kind {
            TransactionKind::Income => self.amount,
            TransactionKind::Expense => -self.amount,
        }
    }
}

/// Whether a record adds to or draws from the account.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionKind {
    Income,
    Expense,
}

/// Caller-supplied fields for create and update operations.
///
/// Ids are never part of a draft; the mutation engine assigns them. On
/// update the draft's `parent_id` is ignored, since a record's place in the
/// tree is fixed at creation.
#[derive(Debug, Clone)]
pub struct TransactionDraft {
    pub description: String,
    pub amount: f64,
    pub date: NaiveDate,
    pub kind: TransactionKind,
    pub category: String,
    pub parent_id: Option<Uuid>,
    pub notes: Option<String>,
}

impl TransactionDraft {
    pub fn new(
        description: impl Into<String>,
        amount: f64,
        date: NaiveDate,
        kind: TransactionKind,
        category: impl Into<String>,
    ) -> Self {
        Self {
            description: description.into(),
            amount,
            date,
            kind,
            category: category.into(),
            parent_id: None,
            notes: None,
        }
    }

    pub fn with_parent(mut self, parent_id: Uuid) -> Self {
        self.parent_id = Some(parent_id);
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Structural validation; nothing is coerced silently.
    pub fn validate(&self) -> Result<(), LedgerError> {
        if self.description.trim().is_empty() {
            return Err(LedgerError::Validation(
                "description must not be empty".into(),
            ));
        }
        if !self.amount.is_finite() {
            return Err(LedgerError::Validation("amount must be a number".into()));
        }
        if self.amount < 0.0 {
            return Err(LedgerError::Validation(
                "amount must be a non-negative magnitude".into(),
            ));
        }
        if self.category.trim().is_empty() {
            return Err(LedgerError::Validation("category must be set".into()));
        }
        Ok(())
    }
}

/// Parses a calendar date supplied by an input boundary as text.
pub fn parse_date(raw: &str) -> Result<NaiveDate, LedgerError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| LedgerError::Validation(format!("unparseable date `{raw}`")))
}
