//! Layout document access.
//!
//! A layout document is a flat key/value table. Element descriptors are
//! spread over prefixed keys (`<id>_type`, `<id>_x`, ...) and chained with
//! `<id>_next`. [`LayoutDocument`] reads the table from TOML:
//!
//! ```toml
//! overlay_width = 200
//! overlay_height = 100
//! first_element = "key_a"
//!
//! key_a_type = 1
//! key_a_code = 0x41
//! key_a_u = 0
//! key_a_v = 0
//! key_a_w = 32
//! key_a_h = 32
//! key_a_next = ""
//! ```
//!
//! # Errors
//! - **Fatal**: unreadable file, TOML syntax error. The document has no values.
//! - **Non-fatal**: a required key is missing or holds the wrong type. The
//!   getter returns the type's zero value and the error is recorded.
//!
//! Getters never fail; callers check [`ConfigSource::has_errors`] and
//! [`ConfigSource::has_fatal_errors`] once they are done reading.

use std::path::Path;
use toml::{Table, Value};

/// Key/value access used by the layout loader and elements.
///
/// With `allow_missing`, an absent key silently yields the zero value; a key
/// of the wrong type is still recorded as an error.
pub trait ConfigSource {
    fn get_int(&mut self, key: &str, allow_missing: bool) -> i64;
    fn get_float(&mut self, key: &str, allow_missing: bool) -> f64;
    fn get_string(&mut self, key: &str, allow_missing: bool) -> String;
    fn get_bool(&mut self, key: &str, allow_missing: bool) -> bool;

    fn has_errors(&self) -> bool;
    fn has_fatal_errors(&self) -> bool;
    /// All recorded errors, one per line.
    fn error_message(&self) -> String;
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConfigIssue {
    pub message: String,
    pub fatal: bool,
}

/// TOML-backed layout document.
#[derive(Clone, Debug, Default)]
pub struct LayoutDocument {
    values: Table,
    issues: Vec<ConfigIssue>,
}

impl LayoutDocument {
    /// Read and parse `path`. Failures are recorded as fatal errors.
    pub fn open(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(text) => Self::parse(&text),
            Err(e) => {
                let mut doc = Self::default();
                doc.fatal(format!("Couldn't read {}: {e}", path.display()));
                doc
            }
        }
    }

    pub fn parse(text: &str) -> Self {
        match text.parse::<Table>() {
            Ok(values) => Self {
                values,
                issues: Vec::new(),
            },
            Err(e) => {
                let mut doc = Self::default();
                doc.fatal(format!("Syntax error: {}", e.message()));
                doc
            }
        }
    }

    pub fn issues(&self) -> &[ConfigIssue] {
        &self.issues
    }

    fn fatal(&mut self, message: String) {
        self.issues.push(ConfigIssue {
            message,
            fatal: true,
        });
    }

    fn warn(&mut self, message: String) {
        self.issues.push(ConfigIssue {
            message,
            fatal: false,
        });
    }

    fn lookup(&mut self, key: &str, allow_missing: bool) -> Option<Value> {
        let value = self.values.get(key).cloned();
        if value.is_none() && !allow_missing {
            self.warn(format!("Missing key '{key}'"));
        }
        value
    }

    fn wrong_type(&mut self, key: &str, expected: &str, found: &Value) {
        self.warn(format!(
            "Key '{key}' should be {expected}, found {}",
            found.type_str()
        ));
    }
}

impl ConfigSource for LayoutDocument {
    fn get_int(&mut self, key: &str, allow_missing: bool) -> i64 {
        match self.lookup(key, allow_missing) {
            Some(Value::Integer(i)) => i,
            Some(other) => {
                self.wrong_type(key, "an integer", &other);
                0
            }
            None => 0,
        }
    }

    fn get_float(&mut self, key: &str, allow_missing: bool) -> f64 {
        match self.lookup(key, allow_missing) {
            Some(Value::Float(f)) => f,
            Some(Value::Integer(i)) => i as f64,
            Some(other) => {
                self.wrong_type(key, "a number", &other);
                0.0
            }
            None => 0.0,
        }
    }

    fn get_string(&mut self, key: &str, allow_missing: bool) -> String {
        match self.lookup(key, allow_missing) {
            Some(Value::String(s)) => s,
            Some(other) => {
                self.wrong_type(key, "a string", &other);
                String::new()
            }
            None => String::new(),
        }
    }

    fn get_bool(&mut self, key: &str, allow_missing: bool) -> bool {
        match self.lookup(key, allow_missing) {
            Some(Value::Boolean(b)) => b,
            Some(other) => {
                self.wrong_type(key, "a boolean", &other);
                false
            }
            None => false,
        }
    }

    fn has_errors(&self) -> bool {
        !self.issues.is_empty()
    }

    fn has_fatal_errors(&self) -> bool {
        self.issues.iter().any(|i| i.fatal)
    }

    fn error_message(&self) -> String {
        self.issues
            .iter()
            .map(|i| i.message.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}
