//! Structural edits over the flat record set.
//!
//! Every operation takes the caller's current snapshot by reference and
//! returns a fresh set reflecting the change; the input is never aliased or
//! mutated, so an error leaves the caller's state untouched. The parent-sum
//! re-derivation runs inside the same operation that changed a child, so no
//! reader ever observes a parent out of sync with its sub-items.

use uuid::Uuid;

use crate::errors::LedgerError;

use super::{
    category::Category,
    transaction::{Transaction, TransactionDraft},
};

/// Validated create/update/delete operations for [`Transaction`] records.
pub struct TransactionService;

impl TransactionService {
    /// Appends a new record and returns the updated set with the assigned id.
    ///
    /// A draft carrying a `parent_id` becomes a sub-item: the parent must
    /// exist and must itself be top-level (the tree never exceeds two
    /// levels), and its amount is re-derived from all current children.
    pub fn create(
        records: &[Transaction],
        draft: TransactionDraft,
    ) -> Result<(Vec<Transaction>, Uuid), LedgerError> {
        draft.validate()?;
        if let Some(parent_id) = draft.parent_id {
            let parent = records
                .iter()
                .find(|record| record.id == parent_id)
                .ok_or(LedgerError::NotFound(parent_id))?;
            if !parent.is_root() {
                return Err(LedgerError::Validation(
                    "sub-items can only attach to top-level transactions".into(),
                ));
            }
        }

        let record = Transaction::from_draft(&draft);
        let id = record.id;
        tracing::debug!(%id, parent = ?draft.parent_id, "creating transaction");

        let mut next = records.to_vec();
        next.push(record);
        if let Some(parent_id) = draft.parent_id {
            rederive_parent(&mut next, parent_id)?;
        }
        Ok((next, id))
    }

    /// Replaces the editable fields of the record matching `id`.
    ///
    /// `id` and tree placement are preserved; the draft's `parent_id` is
    /// ignored. If the record has sub-items its amount stays the derived
    /// sum regardless of what the draft says, and if the record is itself a
    /// sub-item its parent is re-derived afterwards.
    pub fn update(
        records: &[Transaction],
        id: Uuid,
        draft: TransactionDraft,
    ) -> Result<Vec<Transaction>, LedgerError> {
        draft.validate()?;
        let mut next = records.to_vec();
        let index = next
            .iter()
            .position(|record| record.id == id)
            .ok_or(LedgerError::NotFound(id))?;
        let parent_id = next[index].parent_id;
        let has_sub_items = next.iter().any(|record| record.parent_id == Some(id));

        let record = &mut next[index];
        record.description = draft.description;
        record.amount = draft.amount;
        record.date = draft.date;
        record.kind = draft.kind;
        record.category = draft.category;
        record.notes = draft.notes;
        tracing::debug!(%id, "updating transaction");

        if has_sub_items {
            rederive_parent(&mut next, id)?;
        }
        if let Some(parent_id) = parent_id {
            rederive_parent(&mut next, parent_id)?;
        }
        Ok(next)
    }

    /// Removes the record matching `id` together with its direct sub-items.
    ///
    /// If the target was itself a sub-item, the parent is re-derived from
    /// the remaining children; deleting the last child re-derives the
    /// parent to 0 immediately rather than leaving a stale amount.
    pub fn delete(records: &[Transaction], id: Uuid) -> Result<Vec<Transaction>, LedgerError> {
        let target = records
            .iter()
            .find(|record| record.id == id)
            .ok_or(LedgerError::NotFound(id))?;
        let parent_id = target.parent_id;

        let mut next: Vec<Transaction> = records
            .iter()
            .filter(|record| record.id != id && record.parent_id != Some(id))
            .cloned()
            .collect();
        tracing::debug!(%id, removed = records.len() - next.len(), "deleting transaction");

        if let Some(parent_id) = parent_id {
            rederive_parent(&mut next, parent_id)?;
        }
        Ok(next)
    }
}

/// Validated operations for the active [`Category`] set.
pub struct CategoryService;

impl CategoryService {
    /// Adds a category, enforcing case-insensitive name uniqueness.
    pub fn add(
        categories: &[Category],
        name: &str,
        icon: Option<&str>,
    ) -> Result<(Vec<Category>, Uuid), LedgerError> {
        Self::validate_name(categories, None, name)?;
        let category = match icon {
            Some(icon) => Category::with_icon(name, icon),
            None => Category::new(name),
        };
        let id = category.id;
        let mut next = categories.to_vec();
        next.push(category);
        Ok((next, id))
    }

    /// Renames a category; the new name must stay unique in the set.
    pub fn rename(
        categories: &[Category],
        id: Uuid,
        name: &str,
    ) -> Result<Vec<Category>, LedgerError> {
        Self::validate_name(categories, Some(id), name)?;
        let mut next = categories.to_vec();
        let category = next
            .iter_mut()
            .find(|category| category.id == id)
            .ok_or(LedgerError::NotFound(id))?;
        category.name = name.trim().to_string();
        Ok(next)
    }

    /// Removes a category unless any transaction, root or sub-item, still
    /// references its name. Refusal leaves the set unchanged; orphaned
    /// records are never auto-reassigned.
    pub fn remove(
        categories: &[Category],
        records: &[Transaction],
        id: Uuid,
    ) -> Result<Vec<Category>, LedgerError> {
        let category = categories
            .iter()
            .find(|category| category.id == id)
            .ok_or(LedgerError::NotFound(id))?;
        let key = Category::name_key(&category.name);
        if records
            .iter()
            .any(|record| Category::name_key(&record.category) == key)
        {
            return Err(LedgerError::CategoryInUse(category.name.clone()));
        }
        Ok(categories
            .iter()
            .filter(|category| category.id != id)
            .cloned()
            .collect())
    }

    fn validate_name(
        categories: &[Category],
        exclude: Option<Uuid>,
        candidate: &str,
    ) -> Result<(), LedgerError> {
        if candidate.trim().is_empty() {
            return Err(LedgerError::Validation(
                "category name must not be empty".into(),
            ));
        }
        let key = Category::name_key(candidate);
        let duplicate = categories.iter().any(|category| {
            Category::name_key(&category.name) == key && exclude != Some(category.id)
        });
        if duplicate {
            Err(LedgerError::Validation(format!(
                "category `{}` already exists",
                candidate.trim()
            )))
        } else {
            Ok(())
        }
    }
}

/// Parent-sum rule shared by create, update, and delete:
/// `parent.amount = Σ child.amount` over the children currently in the set.
///
/// A parent that is no longer present (dangling reference after external
/// data drift) is skipped; a non-finite or negative derived sum is a
/// contract failure and fails loudly instead of clamping.
fn rederive_parent(records: &mut [Transaction], parent_id: Uuid) -> Result<(), LedgerError> {
    let sum: f64 = records
        .iter()
        .filter(|record| record.parent_id == Some(parent_id))
        .map(|record| record.amount)
        .sum();
    if !sum.is_finite() || sum < 0.0 {
        return Err(LedgerError::InvariantViolation(format!(
            "derived amount {sum} for parent {parent_id}"
        )));
    }
    match records.iter_mut().find(|record| record.id == parent_id) {
        Some(parent) => {
            parent.amount = sum;
            Ok(())
        }
        None => {
            tracing::warn!(%parent_id, "re-derivation target missing, skipping");
            Ok(())
        }
    }
}
