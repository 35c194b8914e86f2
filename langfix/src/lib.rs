#![forbid(unsafe_code)]
//! Rule-driven normalizer for JSON locale tables.
//!
//! Translated string tables drift from the formatting of the reference
//! locale: stray multipliers, trailing exclamation marks (ASCII or
//! full-width), `label: %.1fx` leftovers. `langfix` carries a fixed catalog
//! of per-key rewrite rules that bring every other locale back in line and
//! reports exactly what changed.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use langfix::{FixOptions, LangDir, RuleCatalog, fix_locales};
//!
//! let mut dir = LangDir::new("assets/catchrate-display/lang");
//! let report = fix_locales(&mut dir, &RuleCatalog::catchrate(), &FixOptions::new(), &mut ())?;
//! println!("{} changes", report.total_changes());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! Or run the rules over a table you already hold:
//!
//! ```rust
//! use langfix::{LocaleTable, RuleCatalog};
//!
//! let table = LocaleTable::from_pairs("de_de", [("catchrate.ball.guaranteed_catch", "Sicherer Fang!")]);
//! let outcome = RuleCatalog::catchrate().apply(&table);
//! assert_eq!(outcome.table.get("catchrate.ball.guaranteed_catch"), Some("Sicherer Fang"));
//! assert_eq!(outcome.changes.len(), 1);
//! ```
//!
//! Applying the catalog is idempotent: a second pass over its own output
//! never reports a change.

pub mod error;
pub mod json;
pub mod normalize;
pub mod operations;
pub mod rules;
pub mod store;
pub mod traits;
pub mod types;

// Re-export most used types for easy consumption
pub use crate::{
    error::Error,
    operations::{FixOptions, FixReport, LocaleReport, fix_locales, fix_locales_into},
    rules::{CATCHRATE_PREFIX, Rule, RuleCatalog, Transform},
    store::{DEFAULT_EXTENSION, DEFAULT_REFERENCE_LOCALE, LangDir, MemoryStore},
    traits::{Parser, Reporter, TableSink, TableSource},
    types::{ChangeRecord, Entry, FixOutcome, LocaleTable},
};
