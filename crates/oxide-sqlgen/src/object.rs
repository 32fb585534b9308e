//! Object names and the schema objects a rendered statement touches.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A catalog- and schema-qualifiable object name.
///
/// Deserializes from either `{"schema": .., "name": ..}` or a dotted
/// `"schema.name"` string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "NameRepr")]
pub struct ObjectName {
    /// Catalog (database on MySQL-like dialects).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog: Option<String>,
    /// Schema.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,
    /// Unqualified object name.
    pub name: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NameRepr {
    Dotted(String),
    Parts {
        #[serde(default)]
        catalog: Option<String>,
        #[serde(default)]
        schema: Option<String>,
        name: String,
    },
}

impl From<NameRepr> for ObjectName {
    fn from(repr: NameRepr) -> Self {
        match repr {
            NameRepr::Dotted(dotted) => Self::from(dotted),
            NameRepr::Parts {
                catalog,
                schema,
                name,
            } => Self {
                catalog,
                schema,
                name,
            },
        }
    }
}

impl ObjectName {
    /// Creates an unqualified name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            catalog: None,
            schema: None,
            name: name.into(),
        }
    }

    /// Sets the schema.
    #[must_use]
    pub fn with_schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = Some(schema.into());
        self
    }

    /// Sets the catalog.
    #[must_use]
    pub fn with_catalog(mut self, catalog: impl Into<String>) -> Self {
        self.catalog = Some(catalog.into());
        self
    }

    /// Returns a name in the same catalog and schema with a different
    /// object name.
    #[must_use]
    pub fn sibling(&self, name: impl Into<String>) -> Self {
        Self {
            catalog: self.catalog.clone(),
            schema: self.schema.clone(),
            name: name.into(),
        }
    }

    /// Returns true if the object name is empty or whitespace.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.name.trim().is_empty()
    }
}

/// `"schema.table"` splits on the last dot.
impl From<&str> for ObjectName {
    fn from(value: &str) -> Self {
        match value.rsplit_once('.') {
            Some((schema, name)) => Self::new(name).with_schema(schema),
            None => Self::new(value),
        }
    }
}

impl From<String> for ObjectName {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl fmt::Display for ObjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for part in [&self.catalog, &self.schema].into_iter().flatten() {
            write!(f, "{part}.")?;
        }
        f.write_str(&self.name)
    }
}

/// A schema object affected by a rendered statement.
///
/// Carried opaquely on [`RenderedSql`](crate::RenderedSql) for downstream
/// consumers; the engine never inspects it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DatabaseObject {
    Table { name: ObjectName },
    Column { table: ObjectName, name: String },
    View { name: ObjectName },
    Index { name: String, table: Option<ObjectName> },
    Sequence { name: ObjectName },
    Constraint { table: ObjectName, name: Option<String> },
}

impl DatabaseObject {
    #[must_use]
    pub fn table(name: &ObjectName) -> Self {
        Self::Table { name: name.clone() }
    }

    #[must_use]
    pub fn column(table: &ObjectName, name: &str) -> Self {
        Self::Column {
            table: table.clone(),
            name: name.to_string(),
        }
    }

    #[must_use]
    pub fn view(name: &ObjectName) -> Self {
        Self::View { name: name.clone() }
    }

    #[must_use]
    pub fn index(name: &str, table: Option<&ObjectName>) -> Self {
        Self::Index {
            name: name.to_string(),
            table: table.cloned(),
        }
    }

    #[must_use]
    pub fn sequence(name: &ObjectName) -> Self {
        Self::Sequence { name: name.clone() }
    }

    #[must_use]
    pub fn constraint(table: &ObjectName, name: Option<&str>) -> Self {
        Self::Constraint {
            table: table.clone(),
            name: name.map(str::to_string),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str_splits_schema() {
        let name = ObjectName::from("public.users");
        assert_eq!(name.schema.as_deref(), Some("public"));
        assert_eq!(name.name, "users");
        assert_eq!(ObjectName::from("users").schema, None);
    }

    #[test]
    fn test_display_joins_qualifiers() {
        let name = ObjectName::new("users")
            .with_schema("app")
            .with_catalog("main");
        assert_eq!(name.to_string(), "main.app.users");
        assert_eq!(name.sibling("orders").to_string(), "main.app.orders");
    }

    #[test]
    fn test_deserialize_dotted_or_parts() {
        let dotted: ObjectName = serde_json::from_str(r#""app.person""#).unwrap();
        let parts: ObjectName =
            serde_json::from_str(r#"{"schema": "app", "name": "person"}"#).unwrap();
        assert_eq!(dotted, parts);
        assert_eq!(dotted, ObjectName::from("app.person"));
    }
}
