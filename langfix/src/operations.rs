//! The per-locale fix pass, reusable by the CLI and library users.
//!
//! Every locale is handled on its own: load, run the catalog, save when
//! something changed, report. Nothing is shared between locales, so the
//! order they are visited in does not affect the result.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{
    error::Error,
    rules::RuleCatalog,
    traits::{Reporter, TableSink, TableSource},
    types::{ChangeRecord, LocaleTable},
};

/// Options controlling a fix pass.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FixOptions {
    /// Compute and report changes without saving anything.
    pub dry_run: bool,
    /// Only process these locales. Empty means all of them.
    pub locale_filter: Vec<String>,
}

impl FixOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn with_locales<I, S>(mut self, locales: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.locale_filter = locales.into_iter().map(Into::into).collect();
        self
    }

    fn selects(&self, locale: &str) -> bool {
        self.locale_filter.is_empty() || self.locale_filter.iter().any(|l| l == locale)
    }
}

/// What happened to one locale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocaleReport {
    pub locale: String,
    pub changes: Vec<ChangeRecord>,
    /// Whether the rewritten table was handed to the sink.
    pub written: bool,
}

impl LocaleReport {
    pub fn is_unchanged(&self) -> bool {
        self.changes.is_empty()
    }
}

/// Result of a whole fix pass, locales in processing order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FixReport {
    pub locales: Vec<LocaleReport>,
}

impl FixReport {
    pub fn files_processed(&self) -> usize {
        self.locales.len()
    }

    pub fn total_changes(&self) -> usize {
        self.locales.iter().map(|l| l.changes.len()).sum()
    }

    pub fn changed_locales(&self) -> impl Iterator<Item = &LocaleReport> {
        self.locales.iter().filter(|l| !l.is_unchanged())
    }

    /// `true` when no locale needed a change.
    pub fn is_clean(&self) -> bool {
        self.locales.iter().all(LocaleReport::is_unchanged)
    }
}

/// Runs `catalog` over every locale of `store` and saves changed tables back
/// into it.
///
/// Loading or saving errors abort the pass and name the failing locale.
/// Locales already handled keep their new contents.
pub fn fix_locales<S, R>(
    store: &mut S,
    catalog: &RuleCatalog,
    options: &FixOptions,
    reporter: &mut R,
) -> Result<FixReport, Error>
where
    S: TableSource + TableSink + ?Sized,
    R: Reporter + ?Sized,
{
    let mut report = FixReport::default();

    for locale in store.locales()? {
        if !options.selects(&locale) {
            debug!(%locale, "skipped by locale filter");
            continue;
        }

        let table = store
            .load(&locale)
            .map_err(|e| Error::in_locale(&locale, e))?;
        let outcome = catalog.apply(&table);

        let written = !outcome.is_unchanged() && !options.dry_run;
        if written {
            store
                .save(&outcome.table)
                .map_err(|e| Error::in_locale(&locale, e))?;
        }
        info!(%locale, changes = outcome.changes.len(), written, "processed locale");

        let locale_report = LocaleReport {
            locale,
            changes: outcome.changes,
            written,
        };
        reporter.report(&locale_report);
        report.locales.push(locale_report);
    }

    Ok(report)
}

/// Like [`fix_locales`], reading from `source` and saving into `sink`.
pub fn fix_locales_into<S, K, R>(
    source: &S,
    sink: &mut K,
    catalog: &RuleCatalog,
    options: &FixOptions,
    reporter: &mut R,
) -> Result<FixReport, Error>
where
    S: TableSource + ?Sized,
    K: TableSink + ?Sized,
    R: Reporter + ?Sized,
{
    let mut pipe = Pipe { source, sink };
    fix_locales(&mut pipe, catalog, options, reporter)
}

struct Pipe<'a, S: ?Sized, K: ?Sized> {
    source: &'a S,
    sink: &'a mut K,
}

impl<S: TableSource + ?Sized, K: ?Sized> TableSource for Pipe<'_, S, K> {
    fn locales(&self) -> Result<Vec<String>, Error> {
        self.source.locales()
    }

    fn load(&self, locale: &str) -> Result<LocaleTable, Error> {
        self.source.load(locale)
    }
}

impl<S: ?Sized, K: TableSink + ?Sized> TableSink for Pipe<'_, S, K> {
    fn save(&mut self, table: &LocaleTable) -> Result<(), Error> {
        self.sink.save(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn store() -> MemoryStore {
        MemoryStore::new()
            .with_table(LocaleTable::from_pairs(
                "en_us",
                [("catchrate.ball.guaranteed_catch", "Guaranteed catch!")],
            ))
            .with_table(LocaleTable::from_pairs(
                "de_de",
                [
                    ("catchrate.ball.guaranteed_catch", "Sicherer Fang!"),
                    ("catchrate.ball.lure.effective", "4x beim Angeln!"),
                ],
            ))
            .with_table(LocaleTable::from_pairs(
                "fr_fr",
                [("catchrate.ball.guaranteed_catch", "Capture assurée")],
            ))
    }

    #[test]
    fn test_fix_rewrites_changed_locales_only() {
        let mut store = store();
        let mut seen: Vec<LocaleReport> = Vec::new();
        let report = fix_locales(
            &mut store,
            &RuleCatalog::catchrate(),
            &FixOptions::new(),
            &mut seen,
        )
        .unwrap();

        assert_eq!(report.files_processed(), 2);
        assert_eq!(report.total_changes(), 2);
        assert_eq!(seen, report.locales);

        let de = &report.locales[0];
        assert_eq!(de.locale, "de_de");
        assert!(de.written);
        let fr = &report.locales[1];
        assert!(fr.is_unchanged());
        assert!(!fr.written);

        let saved = store.get("de_de").unwrap();
        assert_eq!(saved.get("catchrate.ball.guaranteed_catch"), Some("Sicherer Fang"));
        assert_eq!(saved.get("catchrate.ball.lure.effective"), Some("Beim Angeln"));
        // reference locale is never touched
        assert_eq!(
            store.get("en_us").unwrap().get("catchrate.ball.guaranteed_catch"),
            Some("Guaranteed catch!")
        );
    }

    #[test]
    fn test_second_pass_is_clean() {
        let mut store = store();
        let catalog = RuleCatalog::catchrate();
        fix_locales(&mut store, &catalog, &FixOptions::new(), &mut ()).unwrap();
        let second = fix_locales(&mut store, &catalog, &FixOptions::new(), &mut ()).unwrap();
        assert!(second.is_clean());
        assert_eq!(second.total_changes(), 0);
    }

    #[test]
    fn test_dry_run_does_not_save() {
        let mut store = store();
        let before = store.clone();
        let report = fix_locales(
            &mut store,
            &RuleCatalog::catchrate(),
            &FixOptions::new().with_dry_run(true),
            &mut (),
        )
        .unwrap();
        assert_eq!(report.total_changes(), 2);
        assert!(report.locales.iter().all(|l| !l.written));
        assert_eq!(store, before);
    }

    #[test]
    fn test_locale_filter() {
        let mut store = store();
        let report = fix_locales(
            &mut store,
            &RuleCatalog::catchrate(),
            &FixOptions::new().with_locales(["fr_fr", "xx_xx"]),
            &mut (),
        )
        .unwrap();
        assert_eq!(report.files_processed(), 1);
        assert_eq!(report.locales[0].locale, "fr_fr");
    }

    #[test]
    fn test_fix_into_separate_sink() {
        let source = store();
        let mut sink = MemoryStore::new();
        let report = fix_locales_into(
            &source,
            &mut sink,
            &RuleCatalog::catchrate(),
            &FixOptions::new(),
            &mut (),
        )
        .unwrap();
        assert_eq!(report.changed_locales().count(), 1);
        assert!(sink.get("de_de").is_some());
        assert!(sink.get("fr_fr").is_none());
        assert_eq!(
            source.get("de_de").unwrap().get("catchrate.ball.lure.effective"),
            Some("4x beim Angeln!")
        );
    }

    #[test]
    fn test_load_error_names_locale() {
        struct Broken;
        impl TableSource for Broken {
            fn locales(&self) -> Result<Vec<String>, Error> {
                Ok(vec!["pl_pl".to_string()])
            }
            fn load(&self, _locale: &str) -> Result<LocaleTable, Error> {
                Err(Error::invalid_table("boom"))
            }
        }

        let mut sink = MemoryStore::new();
        let err = fix_locales_into(
            &Broken,
            &mut sink,
            &RuleCatalog::catchrate(),
            &FixOptions::new(),
            &mut (),
        )
        .unwrap_err();
        assert!(err.to_string().contains("pl_pl"));
        assert!(err.to_string().contains("boom"));
    }
}
