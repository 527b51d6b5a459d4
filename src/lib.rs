#![doc(test(attr(deny(warnings))))]

//! Ledger Core stores a single account's financial records as a flat list
//! with parent/sub-item back-references and derives every view the
//! surrounding application renders: the display tree, period totals,
//! monthly series, category breakdowns, the available-month index, and
//! spreadsheet export rows.

pub mod errors;
pub mod export;
pub mod ledger;
pub mod storage;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Ledger Core tracing initialized.");
    });
}
