//! Where locale tables come from and go to.
//!
//! [`LangDir`] is a directory holding one `<locale>.<ext>` file per locale,
//! the layout of a Minecraft-style `assets/<mod>/lang` folder. [`MemoryStore`]
//! keeps tables in memory for embedding and tests.

use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use tracing::{debug, info};

use crate::{
    error::Error,
    traits::{Parser, TableSink, TableSource},
    types::LocaleTable,
};

/// Locale whose formatting the others are normalized towards.
pub const DEFAULT_REFERENCE_LOCALE: &str = "en_us";

/// File extension of locale tables.
pub const DEFAULT_EXTENSION: &str = "json";

/// A directory of `<locale>.<ext>` JSON tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LangDir {
    root: PathBuf,
    reference_locale: String,
    extension: String,
}

impl LangDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        LangDir {
            root: root.into(),
            reference_locale: DEFAULT_REFERENCE_LOCALE.to_string(),
            extension: DEFAULT_EXTENSION.to_string(),
        }
    }

    /// Sets the locale that is never listed or rewritten.
    pub fn with_reference_locale(mut self, locale: impl Into<String>) -> Self {
        self.reference_locale = locale.into();
        self
    }

    /// Sets the table file extension, without the leading dot.
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into().trim_start_matches('.').to_string();
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn reference_locale(&self) -> &str {
        &self.reference_locale
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Path of the table file for `locale`.
    pub fn path_for(&self, locale: &str) -> PathBuf {
        self.root.join(format!("{}.{}", locale, self.extension))
    }

    fn locale_of(&self, path: &Path) -> Option<String> {
        if path.extension().and_then(|e| e.to_str()) != Some(self.extension.as_str()) {
            return None;
        }
        let stem = path.file_stem()?.to_str()?;
        (stem != self.reference_locale && !stem.is_empty()).then(|| stem.to_string())
    }
}

impl TableSource for LangDir {
    fn locales(&self) -> Result<Vec<String>, Error> {
        if !self.root.is_dir() {
            return Err(Error::MissingDirectory(self.root.clone()));
        }

        // Ordered by file name, so `a-b.json` comes before `a.json`.
        let mut files = Vec::new();
        for dent in fs::read_dir(&self.root)? {
            let dent = dent?;
            if dent.file_type()?.is_file() {
                files.push(dent.path());
            }
        }
        files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

        let locales: Vec<String> = files
            .iter()
            .filter_map(|path| self.locale_of(path))
            .collect();
        debug!(root = %self.root.display(), count = locales.len(), "listed locales");
        Ok(locales)
    }

    fn load(&self, locale: &str) -> Result<LocaleTable, Error> {
        let table = LocaleTable::read_from(self.path_for(locale))?;
        Ok(table.with_locale(locale))
    }
}

impl TableSink for LangDir {
    /// Writes next to the target first, then renames over it, so a failed
    /// write never leaves a truncated table behind.
    fn save(&mut self, table: &LocaleTable) -> Result<(), Error> {
        let target = self.path_for(&table.locale);
        let staging = self
            .root
            .join(format!(".{}.{}.tmp", table.locale, self.extension));

        if let Err(e) = table.write_to(&staging).and_then(|_| {
            fs::rename(&staging, &target)?;
            Ok(())
        }) {
            let _ = fs::remove_file(&staging);
            return Err(e);
        }
        info!(path = %target.display(), entries = table.len(), "wrote locale table");
        Ok(())
    }
}

/// Tables held in memory, keyed by locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryStore {
    reference_locale: String,
    tables: BTreeMap<String, LocaleTable>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore {
            reference_locale: DEFAULT_REFERENCE_LOCALE.to_string(),
            tables: BTreeMap::new(),
        }
    }

    pub fn with_reference_locale(mut self, locale: impl Into<String>) -> Self {
        self.reference_locale = locale.into();
        self
    }

    pub fn with_table(mut self, table: LocaleTable) -> Self {
        self.tables.insert(table.locale.clone(), table);
        self
    }

    pub fn get(&self, locale: &str) -> Option<&LocaleTable> {
        self.tables.get(locale)
    }
}

impl TableSource for MemoryStore {
    fn locales(&self) -> Result<Vec<String>, Error> {
        Ok(self
            .tables
            .keys()
            .filter(|l| **l != self.reference_locale)
            .cloned()
            .collect())
    }

    fn load(&self, locale: &str) -> Result<LocaleTable, Error> {
        self.tables
            .get(locale)
            .cloned()
            .ok_or_else(|| Error::invalid_table(format!("no table for locale `{}`", locale)))
    }
}

impl TableSink for MemoryStore {
    fn save(&mut self, table: &LocaleTable) -> Result<(), Error> {
        self.tables.insert(table.locale.clone(), table.clone());
        Ok(())
    }
}
