use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Symbolic icon used when a category has none of its own.
pub const PLACEHOLDER_ICON: &str = "tag";

/// Names a spending bucket that transactions reference by `name`.
///
/// The reference is not a foreign key; only the deletion guard in the
/// mutation engine keeps the two sets consistent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub icon: String,
}

impl Category {
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_icon(name, PLACEHOLDER_ICON)
    }

    pub fn with_icon(name: impl Into<String>, icon: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            icon: icon.into(),
        }
    }

    /// Key used for case-insensitive name comparison and lookups.
    pub(crate) fn name_key(name: &str) -> String {
        name.trim().to_ascii_lowercase()
    }
}
