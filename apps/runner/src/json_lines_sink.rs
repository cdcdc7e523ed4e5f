use std::io::Write;

use adminreports_application::RowSink;
use adminreports_core::{AppError, AppResult};
use adminreports_domain::{TableDefinition, TableRow};
use serde_json::{Value, json};
use tokio_util::sync::CancellationToken;
use tracing::warn;

/// Writes each row as one JSON object per line.
pub struct JsonLinesSink<W> {
    writer: W,
    limit: Option<u64>,
    written: u64,
    cancellation: CancellationToken,
}

impl<W: Write> JsonLinesSink<W> {
    /// Creates a sink that cancels `cancellation` once `limit` rows are written.
    pub fn new(writer: W, limit: Option<u64>, cancellation: CancellationToken) -> Self {
        Self {
            writer,
            limit,
            written: 0,
            cancellation,
        }
    }

    /// Flushes and returns the writer.
    pub fn finish(mut self) -> AppResult<W> {
        self.writer.flush().map_err(write_error)?;
        Ok(self.writer)
    }

    /// Flushes after a query. A query error takes precedence over a flush
    /// error, which is then only logged.
    pub fn complete<T>(self, result: AppResult<T>) -> AppResult<T> {
        let flushed = self.finish();
        match result {
            Err(error) => {
                if let Err(flush_error) = flushed {
                    warn!(error = %flush_error, "failed to flush rows after query error");
                }
                Err(error)
            }
            Ok(value) => flushed.map(|_| value),
        }
    }
}

impl<W: Write + Send> RowSink for JsonLinesSink<W> {
    fn emit(&mut self, row: TableRow) -> AppResult<()> {
        write_line(&mut self.writer, &row.to_json())?;
        self.written = self.written.saturating_add(1);

        if self.limit.is_some_and(|limit| self.written >= limit) {
            self.cancellation.cancel();
        }
        Ok(())
    }
}

/// Writes one line per table describing its columns and key columns.
pub fn write_table_catalog(writer: &mut impl Write, tables: &[TableDefinition]) -> AppResult<()> {
    for table in tables {
        let columns = table
            .columns()
            .iter()
            .map(|column| {
                json!({
                    "name": column.name(),
                    "type": column.column_type().as_str(),
                    "description": column.description(),
                })
            })
            .collect::<Vec<_>>();
        let key_columns = table
            .key_columns()
            .iter()
            .map(|key_column| {
                json!({
                    "name": key_column.name(),
                    "require": key_column.requirement().as_str(),
                    "operators": key_column
                        .operators()
                        .iter()
                        .map(|operator| operator.as_str())
                        .collect::<Vec<_>>(),
                })
            })
            .collect::<Vec<_>>();

        write_line(
            writer,
            &json!({
                "name": table.name(),
                "description": table.description(),
                "columns": columns,
                "key_columns": key_columns,
            }),
        )?;
    }

    writer.flush().map_err(write_error)
}

fn write_line(writer: &mut impl Write, value: &Value) -> AppResult<()> {
    serde_json::to_writer(&mut *writer, value)
        .map_err(|error| AppError::Internal(format!("failed to write row: {error}")))?;
    writer.write_all(b"\n").map_err(write_error)
}

fn write_error(error: std::io::Error) -> AppError {
    AppError::Internal(format!("failed to write output: {error}"))
}
