use adminreports_core::AppResult;
use adminreports_domain::{QualifierValues, TableDefinition, TableRow};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::report_ports::{AdminReportsClient, PagedReportRequest, ReportPage};

/// Host side receiver of output rows.
pub trait RowSink: Send {
    /// Receives one row. An error aborts the listing.
    fn emit(&mut self, row: TableRow) -> AppResult<()>;
}

/// Sink that keeps every row, optionally cancelling once a limit is reached.
#[derive(Debug, Default)]
pub struct CollectingRowSink {
    rows: Vec<TableRow>,
    limit: Option<(u64, CancellationToken)>,
}

impl CollectingRowSink {
    /// Creates an unbounded sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a sink that cancels `cancellation` after `limit` rows.
    #[must_use]
    pub fn with_limit(limit: u64, cancellation: CancellationToken) -> Self {
        Self {
            rows: Vec::new(),
            limit: Some((limit, cancellation)),
        }
    }

    /// Returns the collected rows.
    #[must_use]
    pub fn rows(&self) -> &[TableRow] {
        &self.rows
    }

    /// Consumes the sink and returns the collected rows.
    #[must_use]
    pub fn into_rows(self) -> Vec<TableRow> {
        self.rows
    }
}

impl RowSink for CollectingRowSink {
    fn emit(&mut self, row: TableRow) -> AppResult<()> {
        self.rows.push(row);
        if let Some((limit, cancellation)) = &self.limit
            && self.rows.len() as u64 >= *limit
        {
            cancellation.cancel();
        }
        Ok(())
    }
}

/// Outcome of one streamed listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StreamSummary {
    /// Pages fetched from the API.
    pub pages: u32,
    /// Rows handed to the sink.
    pub rows: u64,
    /// Whether pagination stopped because of cancellation.
    pub cancelled: bool,
}

/// Drives `request` page by page and emits each item as a row.
///
/// Cancellation is polled after every emitted row; once raised the rest of
/// the current page is skipped and no further page is requested. A failed
/// fetch aborts the listing with the rows emitted so far left in the sink.
pub async fn stream_pages<R: PagedReportRequest>(
    table: &TableDefinition,
    client: &dyn AdminReportsClient,
    request: &R,
    qualifiers: &(dyn QualifierValues + Sync),
    cancellation: &CancellationToken,
    sink: &mut dyn RowSink,
) -> AppResult<StreamSummary> {
    let mut summary = StreamSummary::default();
    let mut page_token: Option<String> = None;

    loop {
        if cancellation.is_cancelled() {
            summary.cancelled = true;
            break;
        }

        debug!(
            table = table.name(),
            page = summary.pages.saturating_add(1),
            has_page_token = page_token.is_some(),
            "fetching report page"
        );
        let ReportPage {
            items,
            mut next_page_token,
            warnings,
        } = request.fetch_page(client, page_token.as_deref()).await?;
        summary.pages = summary.pages.saturating_add(1);

        for warning in &warnings {
            warn!(
                table = table.name(),
                code = %warning.code,
                message = %warning.message,
                "report page returned a warning"
            );
        }

        for item in items {
            sink.emit(table.project(&item, qualifiers)?)?;
            summary.rows = summary.rows.saturating_add(1);

            if cancellation.is_cancelled() {
                next_page_token = None;
                summary.cancelled = true;
                break;
            }
        }

        match next_page_token.filter(|token| !token.is_empty()) {
            Some(token) => page_token = Some(token),
            None => break,
        }
    }

    Ok(summary)
}
