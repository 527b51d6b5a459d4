use std::{
    collections::HashMap,
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use crate::ledger::{Category, Ledger};

use super::Result;

const TMP_SUFFIX: &str = "tmp";
const APP_DIR: &str = "ledger_core";

/// Stores each account's ledger as a single pretty-printed JSON file,
/// written atomically by staging to a temporary file and renaming.
#[derive(Clone)]
pub struct JsonStorage {
    ledgers_dir: PathBuf,
}

impl JsonStorage {
    pub fn new(root: Option<PathBuf>) -> Result<Self> {
        let base = resolve_base(root);
        let ledgers_dir = base.join("ledgers");
        ensure_dir(&ledgers_dir)?;
        Ok(Self { ledgers_dir })
    }

    pub fn new_default() -> Result<Self> {
        Self::new(None)
    }

    pub fn ledger_path(&self, account: &str) -> PathBuf {
        self.ledgers_dir
            .join(format!("{}.json", canonical_name(account)))
    }
}

impl super::StorageBackend for JsonStorage {
    fn save(&self, ledger: &Ledger, account: &str) -> Result<()> {
        let path = self.ledger_path(account);
        tracing::debug!(account, path = %path.display(), "saving ledger snapshot");
        save_ledger_to_path(ledger, &path)
    }

    fn load(&self, account: &str) -> Result<Ledger> {
        let path = self.ledger_path(account);
        load_ledger_from_path(&path)
    }
}

pub fn save_ledger_to_path(ledger: &Ledger, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let json = serde_json::to_string_pretty(ledger)?;
    let tmp = tmp_path(path);
    write_atomic(&tmp, &json)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

/// Loads a snapshot and runs the one-shot normalization pass, resolving
/// icons that were missing from the blob against the icons it did carry.
pub fn load_ledger_from_path(path: &Path) -> Result<Ledger> {
    let data = fs::read_to_string(path)?;
    let mut ledger: Ledger = serde_json::from_str(&data)?;
    let known_icons: HashMap<String, String> = ledger
        .categories
        .iter()
        .filter(|category| !category.icon.trim().is_empty())
        .map(|category| (Category::name_key(&category.name), category.icon.clone()))
        .collect();
    ledger.normalize(&known_icons);
    Ok(ledger)
}

fn resolve_base(root: Option<PathBuf>) -> PathBuf {
    root.unwrap_or_else(|| {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR)
    })
}

fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}

fn canonical_name(name: &str) -> String {
    let sanitized: String = name
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| match c {
            'a'..='z' | '0'..='9' => c,
            _ => '_',
        })
        .collect();
    if sanitized.trim_matches('_').is_empty() {
        "ledger".into()
    } else {
        sanitized
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
