//! Seams between the rule engine and the outside world.

use std::{
    fs::File,
    io::{BufRead, BufReader, BufWriter, Cursor, Write},
    path::Path,
};

use crate::{error::Error, operations::LocaleReport, types::LocaleTable};

/// Reading and writing one locale table from/to one file.
///
/// # Example
///
/// ```rust,no_run
/// use langfix::{LocaleTable, traits::Parser};
/// let table = LocaleTable::read_from("lang/de_de.json")?;
/// table.write_to("lang/de_de.copy.json")?;
/// Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub trait Parser {
    /// Parse from any reader.
    fn from_reader<R: BufRead>(reader: R) -> Result<Self, Error>
    where
        Self: Sized;

    /// Parse from file path.
    fn read_from<P: AsRef<Path>>(path: P) -> Result<Self, Error>
    where
        Self: Sized,
    {
        let file = File::open(path).map_err(Error::Io)?;
        let reader = BufReader::new(file);
        Self::from_reader(reader)
    }

    /// Write to any writer (file, memory, etc.).
    fn to_writer<W: Write>(&self, writer: W) -> Result<(), Error>;

    /// Write to file path.
    fn write_to<P: AsRef<Path>>(&self, path: P) -> Result<(), Error> {
        let file = File::create(path)?;
        let writer = BufWriter::new(file);
        self.to_writer(writer)
    }

    /// Parse from a string.
    fn from_str(s: &str) -> Result<Self, Error>
    where
        Self: Sized,
    {
        Self::from_reader(Cursor::new(s))
    }

    /// Write to a string.
    fn write_to_string(&self) -> Result<String, Error> {
        let mut buf = Vec::new();
        self.to_writer(&mut buf)?;
        String::from_utf8(buf).map_err(|e| Error::invalid_table(e.to_string()))
    }
}

/// Supplies the tables to normalize.
pub trait TableSource {
    /// Locales to process, reference locale excluded, in a stable order.
    fn locales(&self) -> Result<Vec<String>, Error>;

    /// Loads one locale's table.
    fn load(&self, locale: &str) -> Result<LocaleTable, Error>;
}

/// Persists rewritten tables.
///
/// Only called with complete tables, and only when something changed.
pub trait TableSink {
    fn save(&mut self, table: &LocaleTable) -> Result<(), Error>;
}

/// Observes the per-locale result. Never influences processing.
pub trait Reporter {
    fn report(&mut self, report: &LocaleReport);
}

/// Discards everything.
impl Reporter for () {
    fn report(&mut self, _report: &LocaleReport) {}
}

/// Collects reports in processing order.
impl Reporter for Vec<LocaleReport> {
    fn report(&mut self, report: &LocaleReport) {
        self.push(report.clone());
    }
}
