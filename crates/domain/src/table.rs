use std::collections::HashSet;

use adminreports_core::{AppError, AppResult};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::qualifier::{QualOperator, Qualifier, QualifierValues};
use crate::report::ReportCategory;

/// Semantic type of a table column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    /// Plain text.
    Text,
    /// Nested JSON document.
    Json,
}

impl ColumnType {
    /// Returns the stable type name.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Json => "json",
        }
    }
}

/// Where a column takes its value from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnSource {
    /// Dotted path into the serialized report item, e.g. `actor.key`.
    Field(&'static str),
    /// Literal the query supplied for the key column of the same name.
    Qualifier,
}

/// One output column of a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnDefinition {
    name: &'static str,
    description: &'static str,
    column_type: ColumnType,
    source: ColumnSource,
}

impl ColumnDefinition {
    /// Creates a text column read from a field path.
    #[must_use]
    pub const fn text(name: &'static str, description: &'static str, path: &'static str) -> Self {
        Self {
            name,
            description,
            column_type: ColumnType::Text,
            source: ColumnSource::Field(path),
        }
    }

    /// Creates a JSON column read from a field path.
    #[must_use]
    pub const fn json(name: &'static str, description: &'static str, path: &'static str) -> Self {
        Self {
            name,
            description,
            column_type: ColumnType::Json,
            source: ColumnSource::Field(path),
        }
    }

    /// Creates a text column echoing the query's qualifier value.
    #[must_use]
    pub const fn from_qualifier(name: &'static str, description: &'static str) -> Self {
        Self {
            name,
            description,
            column_type: ColumnType::Text,
            source: ColumnSource::Qualifier,
        }
    }

    /// Returns the column name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the column description.
    #[must_use]
    pub fn description(&self) -> &'static str {
        self.description
    }

    /// Returns the column type.
    #[must_use]
    pub fn column_type(&self) -> ColumnType {
        self.column_type
    }

    /// Returns the value source.
    #[must_use]
    pub fn source(&self) -> ColumnSource {
        self.source
    }
}

/// Whether a query must qualify a key column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyColumnRequirement {
    /// Queries without the qualifier return no rows.
    Required,
    /// The qualifier is forwarded to the API when present.
    Optional,
}

impl KeyColumnRequirement {
    /// Returns the stable requirement label.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::Optional => "optional",
        }
    }
}

/// A column the table accepts qualifiers on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyColumn {
    name: &'static str,
    requirement: KeyColumnRequirement,
    operators: &'static [QualOperator],
}

const EQUALITY_ONLY: &[QualOperator] = &[QualOperator::Eq];

impl KeyColumn {
    /// Creates a required equality key column.
    #[must_use]
    pub const fn required(name: &'static str) -> Self {
        Self {
            name,
            requirement: KeyColumnRequirement::Required,
            operators: EQUALITY_ONLY,
        }
    }

    /// Creates an optional equality key column.
    #[must_use]
    pub const fn optional(name: &'static str) -> Self {
        Self {
            name,
            requirement: KeyColumnRequirement::Optional,
            operators: EQUALITY_ONLY,
        }
    }

    /// Replaces the accepted operators.
    #[must_use]
    pub const fn with_operators(mut self, operators: &'static [QualOperator]) -> Self {
        self.operators = operators;
        self
    }

    /// Returns the column name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the requirement.
    #[must_use]
    pub fn requirement(&self) -> KeyColumnRequirement {
        self.requirement
    }

    /// Returns the accepted operators.
    #[must_use]
    pub fn operators(&self) -> &'static [QualOperator] {
        self.operators
    }

    /// Whether the column accepts `operator`.
    #[must_use]
    pub fn accepts(&self, operator: QualOperator) -> bool {
        self.operators.contains(&operator)
    }

    fn is_range(&self) -> bool {
        self.operators.iter().any(|operator| *operator != QualOperator::Eq)
    }
}

/// Static description of one report table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableDefinition {
    name: &'static str,
    description: &'static str,
    category: ReportCategory,
    key_columns: &'static [KeyColumn],
    columns: &'static [ColumnDefinition],
}

impl TableDefinition {
    /// Creates a table definition.
    #[must_use]
    pub const fn new(
        name: &'static str,
        description: &'static str,
        category: ReportCategory,
        key_columns: &'static [KeyColumn],
        columns: &'static [ColumnDefinition],
    ) -> Self {
        Self {
            name,
            description,
            category,
            key_columns,
            columns,
        }
    }

    /// Returns the table name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the table description.
    #[must_use]
    pub fn description(&self) -> &'static str {
        self.description
    }

    /// Returns the report category.
    #[must_use]
    pub fn category(&self) -> ReportCategory {
        self.category
    }

    /// Returns the key columns.
    #[must_use]
    pub fn key_columns(&self) -> &'static [KeyColumn] {
        self.key_columns
    }

    /// Returns the output columns in order.
    #[must_use]
    pub fn columns(&self) -> &'static [ColumnDefinition] {
        self.columns
    }

    /// Finds a key column by name.
    #[must_use]
    pub fn key_column(&self, name: &str) -> Option<&'static KeyColumn> {
        self.key_columns.iter().find(|column| column.name == name)
    }

    /// Finds an output column by name.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<&'static ColumnDefinition> {
        self.columns.iter().find(|column| column.name == name)
    }

    /// Returns required key columns the qualifiers leave unset.
    #[must_use]
    pub fn missing_required(&self, qualifiers: &[Qualifier]) -> Vec<&'static str> {
        self.key_columns
            .iter()
            .filter(|column| column.requirement == KeyColumnRequirement::Required)
            .filter(|column| {
                !qualifiers
                    .iter()
                    .any(|qualifier| qualifier.column() == column.name)
            })
            .map(|column| column.name)
            .collect()
    }

    /// Checks every qualifier targets a key column with a legal operator.
    ///
    /// Equality-only key columns accept a single qualifier per query.
    pub fn validate_qualifiers(&self, qualifiers: &[Qualifier]) -> AppResult<()> {
        let mut seen = HashSet::new();

        for qualifier in qualifiers {
            let Some(key_column) = self.key_column(qualifier.column()) else {
                return Err(AppError::Validation(format!(
                    "table '{}' does not accept qualifiers on column '{}'",
                    self.name,
                    qualifier.column()
                )));
            };

            if !key_column.accepts(qualifier.operator()) {
                return Err(AppError::Validation(format!(
                    "operator '{}' is not supported on column '{}' of table '{}'",
                    qualifier.operator(),
                    qualifier.column(),
                    self.name
                )));
            }

            if !key_column.is_range() && !seen.insert(key_column.name) {
                return Err(AppError::Validation(format!(
                    "column '{}' of table '{}' accepts a single qualifier",
                    key_column.name, self.name
                )));
            }
        }

        Ok(())
    }

    /// Projects a report item into a row following the column sources.
    pub fn project<T: Serialize>(
        &self,
        item: &T,
        qualifiers: &dyn QualifierValues,
    ) -> AppResult<TableRow> {
        let document = serde_json::to_value(item).map_err(|error| {
            AppError::Internal(format!(
                "failed to serialize report item for table '{}': {error}",
                self.name
            ))
        })?;

        let values = self
            .columns
            .iter()
            .map(|column| {
                let value = match column.source {
                    ColumnSource::Field(path) => lookup_path(&document, path)
                        .cloned()
                        .unwrap_or(Value::Null),
                    ColumnSource::Qualifier => qualifiers
                        .qualifier_value(column.name)
                        .map_or(Value::Null, |value| Value::String(value.to_owned())),
                };
                (column.name, coerce(column.column_type, value))
            })
            .collect();

        Ok(TableRow { values })
    }
}

fn lookup_path<'a>(document: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.')
        .try_fold(document, |current, segment| current.get(segment))
}

fn coerce(column_type: ColumnType, value: Value) -> Value {
    match (column_type, value) {
        (ColumnType::Text, value @ (Value::Null | Value::String(_))) => value,
        (ColumnType::Text, value) => Value::String(value.to_string()),
        (ColumnType::Json, value) => value,
    }
}

/// One output row, values in column order.
#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    values: Vec<(&'static str, Value)>,
}

impl TableRow {
    /// Returns the value of a column.
    #[must_use]
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.values
            .iter()
            .find(|(name, _)| *name == column)
            .map(|(_, value)| value)
    }

    /// Returns the text value of a column.
    #[must_use]
    pub fn text(&self, column: &str) -> Option<&str> {
        self.get(column).and_then(Value::as_str)
    }

    /// Iterates `(column, value)` pairs in column order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &Value)> {
        self.values.iter().map(|(name, value)| (*name, value))
    }

    /// Converts the row into a JSON object.
    #[must_use]
    pub fn to_json(&self) -> Value {
        let object = self
            .values
            .iter()
            .map(|(name, value)| ((*name).to_owned(), value.clone()))
            .collect::<Map<String, Value>>();
        Value::Object(object)
    }
}
