//! View statements.

use serde::{Deserialize, Serialize};

use crate::object::ObjectName;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateViewStatement {
    pub view: ObjectName,
    pub select_query: String,
    #[serde(default)]
    pub replace_if_exists: bool,
}

impl CreateViewStatement {
    #[must_use]
    pub fn new(view: impl Into<ObjectName>, select_query: impl Into<String>) -> Self {
        Self {
            view: view.into(),
            select_query: select_query.into(),
            replace_if_exists: false,
        }
    }

    #[must_use]
    pub const fn replace_if_exists(mut self) -> Self {
        self.replace_if_exists = true;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropViewStatement {
    pub view: ObjectName,
    #[serde(default)]
    pub if_exists: bool,
}

impl DropViewStatement {
    #[must_use]
    pub fn new(view: impl Into<ObjectName>) -> Self {
        Self {
            view: view.into(),
            if_exists: false,
        }
    }

    #[must_use]
    pub const fn if_exists(mut self) -> Self {
        self.if_exists = true;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenameViewStatement {
    pub old_view: ObjectName,
    pub new_name: String,
}

impl RenameViewStatement {
    #[must_use]
    pub fn new(old_view: impl Into<ObjectName>, new_name: impl Into<String>) -> Self {
        Self {
            old_view: old_view.into(),
            new_name: new_name.into(),
        }
    }
}
