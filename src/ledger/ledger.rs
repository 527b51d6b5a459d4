use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{
    category::{Category, PLACEHOLDER_ICON},
    transaction::Transaction,
};

const CURRENT_SCHEMA_VERSION: u8 = 1;

/// A single account's persisted blob: the flat record list plus its
/// category set. Serialized and reloaded whole; the persistence backend
/// treats it as opaque.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ledger {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub categories: Vec<Category>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default = "Ledger::schema_version_default")]
    pub schema_version: u8,
}

impl Ledger {
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            transactions: Vec::new(),
            categories: Vec::new(),
            created_at: now,
            updated_at: now,
            schema_version: CURRENT_SCHEMA_VERSION,
        }
    }

    pub fn transaction(&self, id: Uuid) -> Option<&Transaction> {
        self.transactions.iter().find(|txn| txn.id == id)
    }

    pub fn category(&self, id: Uuid) -> Option<&Category> {
        self.categories.iter().find(|category| category.id == id)
    }

    pub fn category_by_name(&self, name: &str) -> Option<&Category> {
        let key = Category::name_key(name);
        self.categories
            .iter()
            .find(|category| Category::name_key(&category.name) == key)
    }

    /// Swaps in the record set returned by a mutation operation.
    pub fn replace_transactions(&mut self, transactions: Vec<Transaction>) {
        self.transactions = transactions;
        self.touch();
    }

    pub fn replace_categories(&mut self, categories: Vec<Category>) {
        self.categories = categories;
        self.touch();
    }

    pub fn transaction_count(&self) -> usize {
        self.transactions.len()
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    pub fn schema_version_default() -> u8 {
        CURRENT_SCHEMA_VERSION
    }

    /// One-shot normalization applied right after a snapshot is loaded.
    ///
    /// A category that arrived without an icon resolves against previously
    /// known icons by name, falling back to the placeholder symbol. Kept as
    /// a single explicit step so read sites never need per-field fallbacks.
    pub fn normalize(&mut self, known_icons: &HashMap<String, String>) {
        for category in &mut self.categories {
            if category.icon.trim().is_empty() {
                category.icon = known_icons
                    .get(&Category::name_key(&category.name))
                    .cloned()
                    .unwrap_or_else(|| PLACEHOLDER_ICON.to_string());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_resolves_missing_icons_by_name() {
        let mut ledger = Ledger::new("Main");
        let mut groceries = Category::new("Groceries");
        groceries.icon = String::new();
        let mut unknown = Category::new("Subscriptions");
        unknown.icon = String::new();
        ledger.categories = vec![groceries, unknown];

        let known: HashMap<String, String> =
            [("groceries".to_string(), "cart".to_string())].into();
        ledger.normalize(&known);

        assert_eq!(ledger.category_by_name("groceries").unwrap().icon, "cart");
        assert_eq!(
            ledger.category_by_name("Subscriptions").unwrap().icon,
            PLACEHOLDER_ICON
        );
    }

    #[test]
    fn normalize_leaves_present_icons_alone() {
        let mut ledger = Ledger::new("Main");
        ledger.categories = vec![Category::with_icon("Travel", "plane")];
        ledger.normalize(&HashMap::new());
        assert_eq!(ledger.categories[0].icon, "plane");
    }
}
