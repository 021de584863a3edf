// Params store — bounds triples in a TOML file, addressed by dotted keys.
//
// `topics.text.num_keywords.default` reads the `default` value under the
// nested tables `topics` -> `text` -> `num_keywords`. The file is loaded
// fresh on every lookup so external edits (or admin API updates) are
// observed on the very next request. Writes rewrite the whole file.
//
// Bounds are never checked for internal consistency (min <= default <= max
// is the file author's problem) — a misconfigured store makes every request
// fail validation, which is the accepted failure mode.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use toml::{Table, Value};

use crate::error;

/// Read/write access to the params file. Holds only the path; every
/// operation re-reads the file, so cloning or sharing this is free.
pub struct ParamsStore {
    path: PathBuf,
}

impl ParamsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn load(&self) -> Result<Table> {
        let raw = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read params file {}", self.path.display()))?;
        raw.parse::<Table>()
            .with_context(|| format!("Params file {} is not valid TOML", self.path.display()))
    }

    /// Value of the scalar parameter at the dotted key `name`.
    pub fn get(&self, name: &str) -> Result<i64> {
        let table = self.load()?;
        let mut current = Value::Table(table);
        for key in name.split('.') {
            current = current
                .as_table()
                .and_then(|t| t.get(key))
                .cloned()
                .with_context(|| {
                    format!(
                        "Parameter '{name}' not found in {} (missing key '{key}')",
                        self.path.display()
                    )
                })?;
        }
        current
            .as_integer()
            .with_context(|| format!("Parameter '{name}' is not an integer"))
    }

    /// Update the scalar parameter at the dotted key `name` and rewrite the
    /// file. All parent tables must already exist; the leaf may be new.
    /// Sibling keys are carried over untouched.
    pub fn set(&self, name: &str, value: i64) -> Result<()> {
        let mut table = self.load()?;
        let keys: Vec<&str> = name.split('.').collect();
        let (last, parents) = keys
            .split_last()
            .context("Parameter name must not be empty")?;

        let mut current = &mut table;
        for key in parents {
            current = current
                .get_mut(*key)
                .and_then(|v| v.as_table_mut())
                .with_context(|| {
                    format!(
                        "Parameter '{name}' has no parent table '{key}' in {}",
                        self.path.display()
                    )
                })?;
        }
        current.insert((*last).to_string(), Value::Integer(value));

        let serialized =
            toml::to_string_pretty(&table).context("Failed to serialize params file")?;
        fs::write(&self.path, serialized)
            .with_context(|| format!("Failed to write params file {}", self.path.display()))?;
        Ok(())
    }

    /// Resolve an optional user-supplied value against the bounds stored
    /// under `name`.
    ///
    /// No value: returns `<name>.default` as-is — defaults are trusted and
    /// never range-checked. A value: returns it unchanged when it lies in
    /// `[<name>.min, <name>.max]`, otherwise fails with the offending bounds
    /// in the error. Pure function of (store contents, input).
    pub fn resolve(&self, name: &str, value: Option<i64>) -> error::Result<i64> {
        match value {
            None => Ok(self.get(&format!("{name}.default"))?),
            Some(v) => {
                let min = self.get(&format!("{name}.min"))?;
                let max = self.get(&format!("{name}.max"))?;
                if v < min || v > max {
                    return Err(error::Error::InvalidParamRange {
                        name: name.to_string(),
                        value: v,
                        min,
                        max,
                    });
                }
                Ok(v)
            }
        }
    }

    /// Like [`resolve`](Self::resolve), but only the lower bound is
    /// enforced. `<name>.max` is never consulted.
    pub fn resolve_min_only(&self, name: &str, value: Option<i64>) -> error::Result<i64> {
        match value {
            None => Ok(self.get(&format!("{name}.default"))?),
            Some(v) => {
                let min = self.get(&format!("{name}.min"))?;
                if v < min {
                    return Err(error::Error::InvalidParamMin {
                        name: name.to_string(),
                        value: v,
                        min,
                    });
                }
                Ok(v)
            }
        }
    }
}
