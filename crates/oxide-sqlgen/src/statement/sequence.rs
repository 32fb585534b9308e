//! Sequence statements.

use serde::{Deserialize, Serialize};

use crate::object::ObjectName;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateSequenceStatement {
    pub sequence: ObjectName,
    #[serde(default)]
    pub start_value: Option<i64>,
    #[serde(default)]
    pub increment_by: Option<i64>,
    #[serde(default)]
    pub min_value: Option<i64>,
    #[serde(default)]
    pub max_value: Option<i64>,
    #[serde(default)]
    pub cycle: Option<bool>,
    #[serde(default)]
    pub ordered: Option<bool>,
    #[serde(default)]
    pub cache_size: Option<u64>,
    /// Value type of the sequence (`AS <type>`).
    #[serde(default)]
    pub data_type: Option<String>,
    #[serde(default)]
    pub if_not_exists: bool,
}

impl CreateSequenceStatement {
    #[must_use]
    pub fn new(sequence: impl Into<ObjectName>) -> Self {
        Self {
            sequence: sequence.into(),
            start_value: None,
            increment_by: None,
            min_value: None,
            max_value: None,
            cycle: None,
            ordered: None,
            cache_size: None,
            data_type: None,
            if_not_exists: false,
        }
    }

    #[must_use]
    pub const fn start_value(mut self, start: i64) -> Self {
        self.start_value = Some(start);
        self
    }

    #[must_use]
    pub const fn increment_by(mut self, increment: i64) -> Self {
        self.increment_by = Some(increment);
        self
    }

    #[must_use]
    pub const fn min_value(mut self, min: i64) -> Self {
        self.min_value = Some(min);
        self
    }

    #[must_use]
    pub const fn max_value(mut self, max: i64) -> Self {
        self.max_value = Some(max);
        self
    }

    #[must_use]
    pub const fn cycle(mut self, cycle: bool) -> Self {
        self.cycle = Some(cycle);
        self
    }

    #[must_use]
    pub const fn ordered(mut self, ordered: bool) -> Self {
        self.ordered = Some(ordered);
        self
    }

    #[must_use]
    pub const fn cache_size(mut self, size: u64) -> Self {
        self.cache_size = Some(size);
        self
    }

    #[must_use]
    pub fn data_type(mut self, data_type: impl Into<String>) -> Self {
        self.data_type = Some(data_type.into());
        self
    }

    #[must_use]
    pub const fn if_not_exists(mut self) -> Self {
        self.if_not_exists = true;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlterSequenceStatement {
    pub sequence: ObjectName,
    #[serde(default)]
    pub increment_by: Option<i64>,
    #[serde(default)]
    pub min_value: Option<i64>,
    #[serde(default)]
    pub max_value: Option<i64>,
    #[serde(default)]
    pub cycle: Option<bool>,
    #[serde(default)]
    pub ordered: Option<bool>,
    #[serde(default)]
    pub cache_size: Option<u64>,
}

impl AlterSequenceStatement {
    #[must_use]
    pub fn new(sequence: impl Into<ObjectName>) -> Self {
        Self {
            sequence: sequence.into(),
            increment_by: None,
            min_value: None,
            max_value: None,
            cycle: None,
            ordered: None,
            cache_size: None,
        }
    }

    #[must_use]
    pub const fn increment_by(mut self, increment: i64) -> Self {
        self.increment_by = Some(increment);
        self
    }

    #[must_use]
    pub const fn min_value(mut self, min: i64) -> Self {
        self.min_value = Some(min);
        self
    }

    #[must_use]
    pub const fn max_value(mut self, max: i64) -> Self {
        self.max_value = Some(max);
        self
    }

    #[must_use]
    pub const fn cycle(mut self, cycle: bool) -> Self {
        self.cycle = Some(cycle);
        self
    }

    #[must_use]
    pub const fn cache_size(mut self, size: u64) -> Self {
        self.cache_size = Some(size);
        self
    }

    /// True if no property would change.
    #[must_use]
    pub const fn is_noop(&self) -> bool {
        self.increment_by.is_none()
            && self.min_value.is_none()
            && self.max_value.is_none()
            && self.cycle.is_none()
            && self.ordered.is_none()
            && self.cache_size.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropSequenceStatement {
    pub sequence: ObjectName,
    #[serde(default)]
    pub if_exists: bool,
}

impl DropSequenceStatement {
    #[must_use]
    pub fn new(sequence: impl Into<ObjectName>) -> Self {
        Self {
            sequence: sequence.into(),
            if_exists: false,
        }
    }

    #[must_use]
    pub const fn if_exists(mut self) -> Self {
        self.if_exists = true;
        self
    }
}
