use adminreports_core::{AppError, AppResult};
use adminreports_domain::Qualifier;

/// Environment variable capping the number of printed rows.
pub const ROW_LIMIT_ENV: &str = "REPORTS_ROW_LIMIT";

const USAGE: &str = "usage: adminreports-runner <table> [column<op>value ...] | adminreports-runner tables";

/// What one runner invocation does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunnerCommand {
    /// Prints the table descriptors.
    Tables,
    /// Runs one query and prints its rows.
    Query {
        table: String,
        qualifiers: Vec<Qualifier>,
    },
}

impl RunnerCommand {
    /// Parses the command line arguments after the program name.
    pub fn parse(args: impl IntoIterator<Item = String>) -> AppResult<Self> {
        let mut args = args.into_iter();
        let Some(first) = args.next() else {
            return Err(AppError::Validation(USAGE.to_owned()));
        };

        match first.as_str() {
            "-h" | "--help" => Err(AppError::Validation(USAGE.to_owned())),
            "tables" => match args.next() {
                Some(extra) => Err(AppError::Validation(format!(
                    "unexpected argument '{extra}' after 'tables'; {USAGE}"
                ))),
                None => Ok(Self::Tables),
            },
            _ => {
                let qualifiers = args
                    .map(|expression| Qualifier::parse_expression(expression.as_str()))
                    .collect::<AppResult<Vec<_>>>()?;
                Ok(Self::Query {
                    table: first,
                    qualifiers,
                })
            }
        }
    }
}

/// Parses the optional row limit.
pub fn parse_row_limit(value: Option<String>) -> AppResult<Option<u64>> {
    let Some(value) = value.map(|value| value.trim().to_owned()) else {
        return Ok(None);
    };
    if value.is_empty() {
        return Ok(None);
    }

    value.parse::<u64>().map(Some).map_err(|error| {
        AppError::Configuration(format!("invalid {ROW_LIMIT_ENV} value '{value}': {error}"))
    })
}
