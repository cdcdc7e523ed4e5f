use std::fmt::{Display, Formatter};
use std::str::FromStr;

use adminreports_core::{AppError, AppResult, NonEmptyString};

/// Comparison operator of one host qualifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QualOperator {
    /// Equality.
    Eq,
    /// Greater than.
    Gt,
    /// Greater than or equal.
    Gte,
    /// Less than.
    Lt,
    /// Less than or equal.
    Lte,
}

impl QualOperator {
    /// Every operator, longest symbols first so expression parsing is greedy.
    pub const ALL: [Self; 5] = [Self::Gte, Self::Lte, Self::Eq, Self::Gt, Self::Lt];

    /// Returns the SQL symbol of the operator.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::Gt => ">",
            Self::Gte => ">=",
            Self::Lt => "<",
            Self::Lte => "<=",
        }
    }
}

impl FromStr for QualOperator {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "=" => Ok(Self::Eq),
            ">" => Ok(Self::Gt),
            ">=" => Ok(Self::Gte),
            "<" => Ok(Self::Lt),
            "<=" => Ok(Self::Lte),
            _ => Err(AppError::Validation(format!(
                "unknown qualifier operator '{value}'"
            ))),
        }
    }
}

impl Display for QualOperator {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// One predicate the host pushes down to a table: `column operator value`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Qualifier {
    column: NonEmptyString,
    operator: QualOperator,
    value: String,
}

impl Qualifier {
    /// Creates a qualifier on a named column.
    pub fn new(
        column: impl Into<String>,
        operator: QualOperator,
        value: impl Into<String>,
    ) -> AppResult<Self> {
        Ok(Self {
            column: NonEmptyString::new(column)?,
            operator,
            value: value.into(),
        })
    }

    /// Creates an equality qualifier.
    pub fn eq(column: impl Into<String>, value: impl Into<String>) -> AppResult<Self> {
        Self::new(column, QualOperator::Eq, value)
    }

    /// Parses an expression such as `date=2024-03-01` or `time>=...`.
    pub fn parse_expression(expression: &str) -> AppResult<Self> {
        let found = expression.char_indices().find_map(|(index, _)| {
            QualOperator::ALL
                .into_iter()
                .find(|operator| expression[index..].starts_with(operator.as_str()))
                .map(|operator| (index, operator))
        });

        let Some((index, operator)) = found else {
            return Err(AppError::Validation(format!(
                "qualifier expression '{expression}' has no comparison operator"
            )));
        };

        let column = expression[..index].trim();
        let value = expression[index + operator.as_str().len()..].trim();
        Self::new(column, operator, value).map_err(|_| {
            AppError::Validation(format!(
                "qualifier expression '{expression}' has no column name"
            ))
        })
    }

    /// Returns the qualified column name.
    #[must_use]
    pub fn column(&self) -> &str {
        self.column.as_str()
    }

    /// Returns the comparison operator.
    #[must_use]
    pub fn operator(&self) -> QualOperator {
        self.operator
    }

    /// Returns the literal value.
    #[must_use]
    pub fn value(&self) -> &str {
        self.value.as_str()
    }
}

/// Lookup of qualifier literals by column, used for qualifier-sourced columns.
pub trait QualifierValues {
    /// Returns the literal the query supplied for `column`, if any.
    fn qualifier_value(&self, column: &str) -> Option<&str>;
}
