//! Statement values: the dialect-neutral description of a change.
//!
//! Each statement is a plain data struct with public fields and consuming
//! builder methods. [`Statement`] wraps them all; generators declare which
//! struct they handle through [`TypedStatement`].

mod column;
mod constraint;
mod data;
mod index;
mod raw;
mod sequence;
mod table;
mod view;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use column::{
    AddAutoIncrementStatement, AddColumnStatement, AddDefaultValueStatement, ColumnReference,
    DropColumnStatement, DropDefaultValueStatement, ModifyDataTypeStatement, NewColumn,
    RenameColumnStatement, SetNullableStatement,
};
pub use constraint::{
    AddForeignKeyConstraintStatement, AddPrimaryKeyStatement, AddUniqueConstraintStatement,
    DropForeignKeyConstraintStatement, DropPrimaryKeyStatement, DropUniqueConstraintStatement,
    ForeignKeyAction,
};
pub use data::{ColumnValue, DeleteStatement, InsertStatement, UpdateStatement};
pub use index::{CreateIndexStatement, DropIndexStatement, IndexColumn};
pub use raw::{CommentStatement, RawSqlStatement, TagDatabaseStatement};
pub use sequence::{AlterSequenceStatement, CreateSequenceStatement, DropSequenceStatement};
pub use table::{
    AutoIncrement, ColumnSpec, CreateTableStatement, DropTableStatement, ForeignKeySpec,
    PrimaryKeySpec, ReorganizeTableStatement, RenameTableStatement, SetTableRemarksStatement,
    UniqueSpec,
};
pub use view::{CreateViewStatement, DropViewStatement, RenameViewStatement};

/// A statement struct that can be viewed out of a [`Statement`].
pub trait TypedStatement: Sized + 'static {
    /// The kind this struct is wrapped as.
    const KIND: StatementKind;

    /// Borrows the struct if `statement` is of this kind.
    fn from_statement(statement: &Statement) -> Option<&Self>;
}

macro_rules! statements {
    ($($variant:ident($ty:ty)),+ $(,)?) => {
        /// Any statement the engine can render.
        #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
        #[serde(tag = "type", rename_all = "snake_case")]
        pub enum Statement {
            $($variant($ty),)+
        }

        /// The kind of a [`Statement`], used to index generators.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum StatementKind {
            $($variant,)+
        }

        impl StatementKind {
            /// Every statement kind.
            pub const ALL: &'static [Self] = &[$(Self::$variant,)+];

            /// The kind's name, e.g. `"CreateTable"`.
            #[must_use]
            pub const fn name(self) -> &'static str {
                match self {
                    $(Self::$variant => stringify!($variant),)+
                }
            }
        }

        impl Statement {
            #[must_use]
            pub const fn kind(&self) -> StatementKind {
                match self {
                    $(Self::$variant(_) => StatementKind::$variant,)+
                }
            }
        }

        $(
            impl TypedStatement for $ty {
                const KIND: StatementKind = StatementKind::$variant;

                fn from_statement(statement: &Statement) -> Option<&Self> {
                    match statement {
                        Statement::$variant(inner) => Some(inner),
                        _ => None,
                    }
                }
            }

            impl From<$ty> for Statement {
                fn from(inner: $ty) -> Self {
                    Self::$variant(inner)
                }
            }
        )+
    };
}

statements! {
    CreateTable(CreateTableStatement),
    DropTable(DropTableStatement),
    RenameTable(RenameTableStatement),
    SetTableRemarks(SetTableRemarksStatement),
    ReorganizeTable(ReorganizeTableStatement),
    AddColumn(AddColumnStatement),
    DropColumn(DropColumnStatement),
    RenameColumn(RenameColumnStatement),
    ModifyDataType(ModifyDataTypeStatement),
    AddDefaultValue(AddDefaultValueStatement),
    DropDefaultValue(DropDefaultValueStatement),
    SetNullable(SetNullableStatement),
    AddAutoIncrement(AddAutoIncrementStatement),
    AddPrimaryKey(AddPrimaryKeyStatement),
    DropPrimaryKey(DropPrimaryKeyStatement),
    AddForeignKeyConstraint(AddForeignKeyConstraintStatement),
    DropForeignKeyConstraint(DropForeignKeyConstraintStatement),
    AddUniqueConstraint(AddUniqueConstraintStatement),
    DropUniqueConstraint(DropUniqueConstraintStatement),
    CreateIndex(CreateIndexStatement),
    DropIndex(DropIndexStatement),
    CreateView(CreateViewStatement),
    DropView(DropViewStatement),
    RenameView(RenameViewStatement),
    CreateSequence(CreateSequenceStatement),
    AlterSequence(AlterSequenceStatement),
    DropSequence(DropSequenceStatement),
    Insert(InsertStatement),
    Update(UpdateStatement),
    Delete(DeleteStatement),
    RawSql(RawSqlStatement),
    Comment(CommentStatement),
    TagDatabase(TagDatabaseStatement),
}

impl Statement {
    /// Whether an unsupported instance should be skipped with a warning
    /// instead of failing validation.
    #[must_use]
    pub const fn skip_on_unsupported(&self) -> bool {
        matches!(self, Self::ReorganizeTable(_))
    }
}

impl fmt::Display for StatementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

pub(crate) const fn default_true() -> bool {
    true
}
