//! Mapping entries: a display label bound to one or two source columns.
//!
//! The persisted JSON form distinguishes single and double columns by shape
//! alone: a string for one column, a two-element list for two. A relative
//! second column is written as [`NEXT_COLUMN_TOKEN`] or [`PREV_COLUMN_TOKEN`].

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{ModelError, Result};

/// Persisted token for "the column after the first one".
pub const NEXT_COLUMN_TOKEN: &str = "<next>";

/// Persisted token for "the column before the first one".
pub const PREV_COLUMN_TOKEN: &str = "<prev>";

/// Label shown on the payslip for a mapped line.
///
/// A two-part label is kept as two parts; it is never flattened into a
/// string key.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DisplayName {
    Label(String),
    Pair(String, String),
}

impl DisplayName {
    pub fn label(text: impl Into<String>) -> Self {
        Self::Label(text.into())
    }

    pub fn pair(first: impl Into<String>, second: impl Into<String>) -> Self {
        Self::Pair(first.into(), second.into())
    }

    /// Text printed in the label column.
    pub fn render(&self) -> String {
        match self {
            Self::Label(text) => text.trim().to_string(),
            Self::Pair(first, second) => format!("{} {}", first.trim(), second.trim()),
        }
    }

    fn is_blank(&self) -> bool {
        match self {
            Self::Label(text) => text.trim().is_empty(),
            Self::Pair(first, second) => first.trim().is_empty() && second.trim().is_empty(),
        }
    }
}

impl fmt::Display for DisplayName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Label(text) => f.write_str(text),
            Self::Pair(first, second) => write!(f, "[{first}, {second}]"),
        }
    }
}

/// Position of a second column relative to the first one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelativeRef {
    NextColumn,
    PrevColumn,
}

impl RelativeRef {
    /// Signed offset from the first column.
    pub fn offset(self) -> isize {
        match self {
            Self::NextColumn => 1,
            Self::PrevColumn => -1,
        }
    }

    pub fn token(self) -> &'static str {
        match self {
            Self::NextColumn => NEXT_COLUMN_TOKEN,
            Self::PrevColumn => PREV_COLUMN_TOKEN,
        }
    }
}

/// Second column of a double-column entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SecondColumn {
    Named(String),
    Relative(RelativeRef),
}

impl SecondColumn {
    /// Parses user or file input. Accepts the persisted tokens as well as
    /// the bare words `next` and `prev`.
    pub fn parse(text: &str) -> Result<Self> {
        let trimmed = text.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "" => Err(ModelError::EmptyColumnName),
            NEXT_COLUMN_TOKEN | "next" => Ok(Self::Relative(RelativeRef::NextColumn)),
            PREV_COLUMN_TOKEN | "prev" | "previous" => Ok(Self::Relative(RelativeRef::PrevColumn)),
            _ => Ok(Self::Named(text.to_string())),
        }
    }

    fn as_text(&self) -> &str {
        match self {
            Self::Named(name) => name,
            Self::Relative(relative) => relative.token(),
        }
    }
}

impl fmt::Display for SecondColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_text())
    }
}

impl Serialize for SecondColumn {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_text())
    }
}

impl<'de> Deserialize<'de> for SecondColumn {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::parse(&text).map_err(serde::de::Error::custom)
    }
}

/// Source column(s) feeding one payslip line.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SourceColumns {
    Single(String),
    Double(String, SecondColumn),
}

impl SourceColumns {
    pub fn single(column: impl Into<String>) -> Self {
        Self::Single(column.into())
    }

    pub fn double(first: impl Into<String>, second: impl Into<String>) -> Self {
        Self::Double(first.into(), SecondColumn::Named(second.into()))
    }

    pub fn relative(first: impl Into<String>, relative: RelativeRef) -> Self {
        Self::Double(first.into(), SecondColumn::Relative(relative))
    }

    /// Builds columns from a first name and an optional second column or relative token.
    pub fn parse(first: &str, second: Option<&str>) -> Result<Self> {
        if first.trim().is_empty() {
            return Err(ModelError::EmptyColumnName);
        }
        match second {
            None => Ok(Self::Single(first.to_string())),
            Some(second) => Ok(Self::Double(first.to_string(), SecondColumn::parse(second)?)),
        }
    }

    /// The first (always named) column.
    pub fn primary(&self) -> &str {
        match self {
            Self::Single(column) | Self::Double(column, _) => column,
        }
    }

    pub fn is_double(&self) -> bool {
        matches!(self, Self::Double(..))
    }
}

impl fmt::Display for SourceColumns {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Single(column) => f.write_str(column),
            Self::Double(first, second) => write!(f, "{first} + {second}"),
        }
    }
}

/// One configured payslip line item.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MappingEntry {
    pub name: DisplayName,
    pub columns: SourceColumns,
}

impl MappingEntry {
    pub fn new(name: DisplayName, columns: SourceColumns) -> Result<Self> {
        let entry = Self { name, columns };
        entry.validate()?;
        Ok(entry)
    }

    pub fn validate(&self) -> Result<()> {
        if self.name.is_blank() {
            return Err(ModelError::EmptyDisplayName);
        }
        let second_blank = match &self.columns {
            SourceColumns::Double(_, SecondColumn::Named(name)) => name.trim().is_empty(),
            _ => false,
        };
        if self.columns.primary().trim().is_empty() || second_blank {
            return Err(ModelError::EmptyColumnName);
        }
        Ok(())
    }
}
