//! JSON persistence of locale tables.
//!
//! A table file is a flat object of string values:
//!
//! ```json
//! {
//!   "catchrate.ball.guaranteed_catch": "Guaranteed catch",
//!   "catchrate.ball.multiplier_always": ""
//! }
//! ```
//!
//! Key order is kept on read and write. Output is indented by two spaces,
//! keeps non-ASCII text verbatim and ends with a newline.

use std::io::{BufRead, Write};

use serde_json::{Map, Value};

use crate::{error::Error, traits::Parser, types::LocaleTable};

impl Parser for LocaleTable {
    /// Parse from any reader. The locale is left empty; callers name it.
    fn from_reader<R: BufRead>(reader: R) -> Result<Self, Error> {
        let root: Value = serde_json::from_reader(reader)?;
        let map = match root {
            Value::Object(map) => map,
            other => {
                return Err(Error::invalid_table(format!(
                    "expected a JSON object at the top level, found {}",
                    value_kind(&other)
                )));
            }
        };

        let mut table = LocaleTable::default();
        for (key, value) in map {
            match value {
                Value::String(text) => {
                    table.insert(key, text);
                }
                other => {
                    return Err(Error::invalid_table(format!(
                        "value of `{}` is {}, expected a string",
                        key,
                        value_kind(&other)
                    )));
                }
            }
        }
        Ok(table)
    }

    /// Write to any writer (file, memory, etc.).
    fn to_writer<W: Write>(&self, mut writer: W) -> Result<(), Error> {
        let map: Map<String, Value> = self
            .iter()
            .map(|e| (e.key.clone(), Value::String(e.value.clone())))
            .collect();
        serde_json::to_writer_pretty(&mut writer, &map)?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        Ok(())
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
