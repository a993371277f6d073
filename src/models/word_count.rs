use crate::services::WordCountError;
use indexmap::IndexMap;
use serde::Serialize;
use std::fmt;

/// Label reported by texcount for the body word total
pub const WORDS_IN_TEXT: &str = "Words in text";

/// `label: value` pairs reported by the word count tool
///
/// Labels are whatever the tool printed; no schema is enforced. Entries keep
/// the order the tool printed them in, but equality ignores order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ParsedCount {
    entries: IndexMap<String, String>,
}

impl ParsedCount {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a pair; a repeated label keeps the latest value
    pub fn insert(&mut self, label: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(label.into(), value.into());
    }

    pub fn get(&self, label: &str) -> Option<&str> {
        self.entries.get(label).map(String::as_str)
    }

    /// Like [`get`](Self::get), but a missing label is a lookup failure
    pub fn require(&self, label: &str) -> Result<&str, WordCountError> {
        self.get(label)
            .ok_or_else(|| WordCountError::Lookup(format!("no \"{}\" entry in output", label)))
    }

    /// The body word total as a number
    pub fn words_in_text(&self) -> Result<u64, WordCountError> {
        let raw = self.require(WORDS_IN_TEXT)?;
        raw.trim().parse().map_err(|e| {
            WordCountError::OutputParse(format!("\"{}\" is not a count: {}", raw, e))
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl fmt::Display for ParsedCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (label, value) in self.iter() {
            writeln!(f, "{}: {}", label, value)?;
        }
        Ok(())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ParsedCount {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut count = Self::new();
        for (label, value) in iter {
            count.insert(label, value);
        }
        count
    }
}
