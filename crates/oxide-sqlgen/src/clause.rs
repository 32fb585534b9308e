//! Keyed, ordered clause sequences.
//!
//! Generators assemble statements as a tree of named clauses so that a more
//! specialized generator can take the generic result and edit it surgically
//! (remove, replace or insert around a named clause) instead of rebuilding
//! the whole statement.
//!
//! # Example
//!
//! ```rust
//! use oxide_sqlgen::ClauseSequence;
//!
//! let mut sql = ClauseSequence::new();
//! sql.append("create", "CREATE TABLE")
//!     .unwrap()
//!     .append("name", "person")
//!     .unwrap();
//! let mut columns = ClauseSequence::wrapped("(", ", ", ")");
//! columns.append("id", "id INT").unwrap();
//! sql.append("columns", columns).unwrap();
//!
//! sql.insert_after("create", "if not exists", "IF NOT EXISTS").unwrap();
//! assert_eq!(sql.to_string(), "CREATE TABLE IF NOT EXISTS person (id INT)");
//! ```

use std::fmt;

use crate::error::ClauseError;

/// One entry of a [`ClauseSequence`]: literal text or a nested sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Clause {
    Fragment(String),
    Sequence(ClauseSequence),
}

impl Clause {
    /// Renders the clause.
    #[must_use]
    pub fn render(&self) -> String {
        match self {
            Self::Fragment(text) => text.clone(),
            Self::Sequence(sequence) => sequence.render(),
        }
    }
}

impl From<&str> for Clause {
    fn from(text: &str) -> Self {
        Self::Fragment(text.trim().to_string())
    }
}

impl From<String> for Clause {
    fn from(text: String) -> Self {
        Self::Fragment(text.trim().to_string())
    }
}

impl From<ClauseSequence> for Clause {
    fn from(sequence: ClauseSequence) -> Self {
        Self::Sequence(sequence)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Entry {
    key: String,
    clause: Clause,
}

/// An ordered list of uniquely keyed clauses, rendered with a separator and
/// optional start/end wrappers.
///
/// Keys are trimmed and compared case-insensitively; clause text keeps its
/// casing. Blank clauses are skipped on rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClauseSequence {
    start: String,
    separator: String,
    end: String,
    entries: Vec<Entry>,
}

fn normalize(key: &str) -> String {
    key.trim().to_lowercase()
}

impl Default for ClauseSequence {
    fn default() -> Self {
        Self::new()
    }
}

impl ClauseSequence {
    /// Creates an empty sequence separated by single spaces.
    #[must_use]
    pub fn new() -> Self {
        Self::with_separator(" ")
    }

    #[must_use]
    pub fn with_separator(separator: impl Into<String>) -> Self {
        Self::wrapped("", separator, "")
    }

    /// Creates an empty sequence rendered as `start + joined + end`.
    #[must_use]
    pub fn wrapped(
        start: impl Into<String>,
        separator: impl Into<String>,
        end: impl Into<String>,
    ) -> Self {
        Self {
            start: start.into(),
            separator: separator.into(),
            end: end.into(),
            entries: Vec::new(),
        }
    }

    /// Number of top-level entries, including blank ones.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if nothing in the sequence would render.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries
            .iter()
            .all(|entry| entry.clause.render().trim().is_empty())
    }

    /// True if a top-level entry has this key.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.position(key).is_some()
    }

    /// Top-level keys in order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.key.as_str())
    }

    fn position(&self, key: &str) -> Option<usize> {
        let key = normalize(key);
        self.entries.iter().position(|entry| entry.key == key)
    }

    fn existing(&self, key: &str) -> Result<usize, ClauseError> {
        self.position(key)
            .ok_or_else(|| ClauseError::MissingKey(normalize(key)))
    }

    /// Validates an explicit key for insertion.
    fn new_key(&self, key: &str) -> Result<String, ClauseError> {
        let key = normalize(key);
        if key.is_empty() {
            return Err(ClauseError::BlankKey);
        }
        if self.contains(&key) {
            return Err(ClauseError::DuplicateKey(key));
        }
        Ok(key)
    }

    /// Resolves the key for an append or prepend. A blank key on a fragment
    /// falls back to the fragment text, suffixed with `#2`, `#3`, ... while
    /// that key is taken.
    fn resolve_key(&self, key: &str, clause: &Clause) -> Result<String, ClauseError> {
        if !key.trim().is_empty() {
            return self.new_key(key);
        }
        let Clause::Fragment(text) = clause else {
            return Err(ClauseError::BlankKey);
        };
        let base = match normalize(text) {
            base if base.is_empty() => "#".to_string(),
            base => base,
        };
        if !self.contains(&base) {
            return Ok(base);
        }
        let mut suffix = 2;
        loop {
            let candidate = format!("{base} #{suffix}");
            if !self.contains(&candidate) {
                return Ok(candidate);
            }
            suffix += 1;
        }
    }

    /// Adds a clause at the end.
    ///
    /// # Errors
    ///
    /// [`ClauseError::DuplicateKey`] if the key is taken,
    /// [`ClauseError::BlankKey`] for a blank key on a nested sequence.
    pub fn append(
        &mut self,
        key: &str,
        clause: impl Into<Clause>,
    ) -> Result<&mut Self, ClauseError> {
        let clause = clause.into();
        let key = self.resolve_key(key, &clause)?;
        self.entries.push(Entry { key, clause });
        Ok(self)
    }

    /// Adds a clause at the front.
    ///
    /// # Errors
    ///
    /// Same as [`append`](Self::append).
    pub fn prepend(
        &mut self,
        key: &str,
        clause: impl Into<Clause>,
    ) -> Result<&mut Self, ClauseError> {
        let clause = clause.into();
        let key = self.resolve_key(key, &clause)?;
        self.entries.insert(0, Entry { key, clause });
        Ok(self)
    }

    /// Inserts a clause immediately before `existing`.
    ///
    /// # Errors
    ///
    /// [`ClauseError::MissingKey`] if `existing` is absent,
    /// [`ClauseError::BlankKey`] or [`ClauseError::DuplicateKey`] for a bad
    /// new key.
    pub fn insert_before(
        &mut self,
        existing: &str,
        key: &str,
        clause: impl Into<Clause>,
    ) -> Result<&mut Self, ClauseError> {
        let index = self.existing(existing)?;
        let key = self.new_key(key)?;
        self.entries.insert(
            index,
            Entry {
                key,
                clause: clause.into(),
            },
        );
        Ok(self)
    }

    /// Inserts a clause immediately after `existing`.
    ///
    /// # Errors
    ///
    /// Same as [`insert_before`](Self::insert_before).
    pub fn insert_after(
        &mut self,
        existing: &str,
        key: &str,
        clause: impl Into<Clause>,
    ) -> Result<&mut Self, ClauseError> {
        let index = self.existing(existing)?;
        let key = self.new_key(key)?;
        self.entries.insert(
            index + 1,
            Entry {
                key,
                clause: clause.into(),
            },
        );
        Ok(self)
    }

    /// Replaces the clause under `key`, keeping its position.
    ///
    /// # Errors
    ///
    /// [`ClauseError::MissingKey`] if the key is absent.
    pub fn replace(
        &mut self,
        key: &str,
        clause: impl Into<Clause>,
    ) -> Result<&mut Self, ClauseError> {
        let index = self.existing(key)?;
        self.entries[index].clause = clause.into();
        Ok(self)
    }

    /// Replaces the clause under `key` if present.
    pub fn replace_if_exists(&mut self, key: &str, clause: impl Into<Clause>) -> &mut Self {
        if let Some(index) = self.position(key) {
            self.entries[index].clause = clause.into();
        }
        self
    }

    /// Removes the clause under `key`, if any.
    pub fn remove(&mut self, key: &str) -> Option<Clause> {
        self.position(key)
            .map(|index| self.entries.remove(index).clause)
    }

    fn find(&self, key: &str) -> Option<&Clause> {
        if let Some(index) = self.position(key) {
            return Some(&self.entries[index].clause);
        }
        self.entries.iter().find_map(|entry| match &entry.clause {
            Clause::Sequence(nested) => nested.find(key),
            Clause::Fragment(_) => None,
        })
    }

    /// Looks a key up at this level, then depth-first through nested
    /// sequences, and renders the first match.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        self.find(key).map(Clause::render)
    }

    /// Like [`get`](Self::get), but returns the match as a sequence; a
    /// fragment becomes a one-entry sequence.
    #[must_use]
    pub fn get_sequence(&self, key: &str) -> Option<Self> {
        self.find(key).map(|clause| match clause {
            Clause::Sequence(sequence) => sequence.clone(),
            Clause::Fragment(text) => {
                let mut sequence = Self::new();
                sequence.entries.push(Entry {
                    key: normalize(key),
                    clause: Clause::Fragment(text.clone()),
                });
                sequence
            }
        })
    }

    /// Mutable access to a nested sequence, searched like
    /// [`get`](Self::get).
    pub fn get_sequence_mut(&mut self, key: &str) -> Option<&mut Self> {
        if let Some(index) = self.position(key) {
            return match &mut self.entries[index].clause {
                Clause::Sequence(sequence) => Some(sequence),
                Clause::Fragment(_) => None,
            };
        }
        self.entries
            .iter_mut()
            .find_map(|entry| match &mut entry.clause {
                Clause::Sequence(nested) => nested.get_sequence_mut(key),
                Clause::Fragment(_) => None,
            })
    }

    /// Joins the non-blank entries with the separator and wraps them. A
    /// sequence with nothing to render yields an empty string.
    #[must_use]
    pub fn render(&self) -> String {
        let parts: Vec<String> = self
            .entries
            .iter()
            .map(|entry| entry.clause.render())
            .filter(|text| !text.trim().is_empty())
            .collect();
        if parts.is_empty() {
            return String::new();
        }
        format!("{}{}{}", self.start, parts.join(&self.separator), self.end)
    }
}

impl fmt::Display for ClauseSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn abc() -> ClauseSequence {
        let mut sequence = ClauseSequence::new();
        sequence
            .append("a", "A")
            .unwrap()
            .append("b", "B")
            .unwrap()
            .append("c", "C")
            .unwrap();
        sequence
    }

    #[test]
    fn test_render_in_order() {
        assert_eq!(abc().to_string(), "A B C");
    }

    #[test]
    fn test_remove_then_render() {
        let mut sequence = abc();
        assert_eq!(sequence.remove("b"), Some(Clause::from("B")));
        assert_eq!(sequence.to_string(), "A C");
        assert_eq!(sequence.remove("missing"), None);
        assert_eq!(sequence.to_string(), "A C");
    }

    #[test]
    fn test_insert_before_and_after() {
        let mut sequence = abc();
        sequence.insert_before("b", "x", "X").unwrap();
        assert_eq!(sequence.to_string(), "A X B C");
        sequence.insert_after("c", "y", "Y").unwrap();
        assert_eq!(sequence.to_string(), "A X B C Y");
    }

    #[test]
    fn test_keys_are_case_insensitive_and_trimmed() {
        let mut sequence = abc();
        assert!(sequence.contains(" B "));
        assert_eq!(
            sequence.append("A", "again").unwrap_err(),
            ClauseError::DuplicateKey("a".to_string())
        );
        sequence.replace("C ", "Cc").unwrap();
        assert_eq!(sequence.to_string(), "A B Cc");
    }

    #[test]
    fn test_missing_and_blank_keys() {
        let mut sequence = abc();
        assert_eq!(
            sequence.insert_after("zz", "k", "K").unwrap_err(),
            ClauseError::MissingKey("zz".to_string())
        );
        assert_eq!(
            sequence.replace("zz", "K").unwrap_err(),
            ClauseError::MissingKey("zz".to_string())
        );
        assert_eq!(
            sequence.insert_before("a", "  ", "K").unwrap_err(),
            ClauseError::BlankKey
        );
        assert_eq!(
            sequence.append("", ClauseSequence::new()).unwrap_err(),
            ClauseError::BlankKey
        );
    }

    #[test]
    fn test_blank_key_uses_text() {
        let mut sequence = ClauseSequence::new();
        sequence.append("", "NOT NULL").unwrap();
        sequence.append("", "NOT NULL").unwrap();
        sequence.prepend("", "  ").unwrap();
        assert_eq!(
            sequence.keys().collect::<Vec<_>>(),
            ["#", "not null", "not null #2"]
        );
        assert_eq!(sequence.to_string(), "NOT NULL NOT NULL");
    }

    #[test]
    fn test_blank_entries_skipped() {
        let mut sequence = ClauseSequence::with_separator(", ");
        sequence
            .append("a", "A")
            .unwrap()
            .append("empty", "")
            .unwrap()
            .append("b", "B")
            .unwrap();
        assert_eq!(sequence.to_string(), "A, B");
        assert!(!sequence.is_empty());

        let mut blank = ClauseSequence::wrapped("(", ", ", ")");
        blank.append("only", " ").unwrap();
        assert!(blank.is_empty());
        assert_eq!(blank.to_string(), "");
    }

    #[test]
    fn test_nested_lookup_and_edit() {
        let mut column = ClauseSequence::new();
        column
            .append("name", "id")
            .unwrap()
            .append("type", "INT")
            .unwrap();
        let mut columns = ClauseSequence::wrapped("(", ", ", ")");
        columns.append("id", column).unwrap();
        let mut table = ClauseSequence::new();
        table
            .append("create", "CREATE TABLE t")
            .unwrap()
            .append("columns", columns)
            .unwrap();

        assert_eq!(table.get("type").as_deref(), Some("INT"));
        assert_eq!(table.get("id").as_deref(), Some("id INT"));
        assert_eq!(table.get("nope"), None);

        let fragment = table.get_sequence("create").unwrap();
        assert_eq!(fragment.to_string(), "CREATE TABLE t");

        table
            .get_sequence_mut("id")
            .unwrap()
            .append("not null", "NOT NULL")
            .unwrap();
        assert_eq!(table.to_string(), "CREATE TABLE t (id INT NOT NULL)");
        assert!(table.get_sequence_mut("create").is_none());
    }
}
