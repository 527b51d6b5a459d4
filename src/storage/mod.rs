pub mod json_backend;

use std::path::Path;

use crate::{errors::LedgerError, ledger::Ledger};

pub type Result<T> = std::result::Result<T, LedgerError>;

/// Abstraction over persistence backends that store one blob per account.
///
/// The engine itself never performs I/O; the session layer loads a snapshot
/// through this trait, threads it through mutations, and saves it back after
/// every change, overwriting the previous blob.
pub trait StorageBackend: Send + Sync {
    fn save(&self, ledger: &Ledger, account: &str) -> Result<()>;
    fn load(&self, account: &str) -> Result<Ledger>;

    /// Ad-hoc file operations; default implementations forward to the JSON
    /// helpers when not overridden.
    fn save_to_path(&self, ledger: &Ledger, path: &Path) -> Result<()> {
        json_backend::save_ledger_to_path(ledger, path)
    }

    fn load_from_path(&self, path: &Path) -> Result<Ledger> {
        json_backend::load_ledger_from_path(path)
    }
}

pub use json_backend::JsonStorage;
