use std::sync::Arc;

use adminreports_core::{AppError, AppResult};
use adminreports_domain::{
    ACTIVITIES_TABLE, CUSTOMER_USAGE_TABLE, ENTITY_USAGE_TABLE, Qualifier, ReportCategory,
    TableDefinition, USER_USAGE_TABLE, all_tables, find_table,
};
use chrono::Utc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::page_streamer::{RowSink, StreamSummary, stream_pages};
use crate::report_ports::AdminReportsClient;
use crate::table_filters::{
    ActivitiesFilters, CustomerUsageFilters, EntityUsageFilters, UserUsageFilters, page_size,
};


/// Per-query execution context supplied by the host.
#[derive(Debug, Clone, Default)]
pub struct QueryContext {
    /// Row-limit hint; caps the page size.
    pub limit: Option<u64>,
    /// Raised by the host once it needs no more rows.
    pub cancellation: CancellationToken,
}

impl QueryContext {
    /// Creates a context without a limit.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the row-limit hint.
    #[must_use]
    pub fn with_limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Uses an existing cancellation token.
    #[must_use]
    pub fn with_cancellation(mut self, cancellation: CancellationToken) -> Self {
        self.cancellation = cancellation;
        self
    }
}

/// Executes report table queries against an Admin Reports client.
#[derive(Clone)]
pub struct ReportTableService {
    client: Arc<dyn AdminReportsClient>,
    default_customer_id: Option<String>,
}

impl ReportTableService {
    /// Creates a service over `client`.
    #[must_use]
    pub fn new(client: Arc<dyn AdminReportsClient>) -> Self {
        Self {
            client,
            default_customer_id: None,
        }
    }

    /// Applies `customer_id` to queries that do not filter on one.
    #[must_use]
    pub fn with_default_customer_id(mut self, customer_id: impl Into<String>) -> Self {
        self.default_customer_id = Some(customer_id.into());
        self
    }

    /// Returns the tables this service can execute.
    #[must_use]
    pub fn tables() -> &'static [TableDefinition] {
        all_tables()
    }

    /// Executes a query on the table named `table_name`.
    pub async fn execute(
        &self,
        table_name: &str,
        qualifiers: &[Qualifier],
        context: &QueryContext,
        sink: &mut dyn RowSink,
    ) -> AppResult<StreamSummary> {
        let table = find_table(table_name)
            .ok_or_else(|| AppError::Validation(format!("unknown table '{table_name}'")))?;

        let summary = match table.category() {
            ReportCategory::Activities => {
                let filters = ActivitiesFilters::from_qualifiers(qualifiers)?;
                self.list_activities(&filters, context, sink).await?
            }
            ReportCategory::CustomerUsage => {
                let filters = CustomerUsageFilters::from_qualifiers(qualifiers)?;
                self.list_customer_usage(&filters, context, sink).await?
            }
            ReportCategory::EntityUsage => {
                let filters = EntityUsageFilters::from_qualifiers(qualifiers)?;
                self.list_entity_usage(&filters, context, sink).await?
            }
            ReportCategory::UserUsage => {
                let filters = UserUsageFilters::from_qualifiers(qualifiers)?;
                self.list_user_usage(&filters, context, sink).await?
            }
        };

        info!(
            table = table.name(),
            pages = summary.pages,
            rows = summary.rows,
            cancelled = summary.cancelled,
            "report query finished"
        );

        Ok(summary)
    }

    /// Streams `googleworkspace_admin_reports_activities` rows.
    pub async fn list_activities(
        &self,
        filters: &ActivitiesFilters,
        context: &QueryContext,
        sink: &mut dyn RowSink,
    ) -> AppResult<StreamSummary> {
        if zero_limit(&ACTIVITIES_TABLE, context) {
            return Ok(StreamSummary::default());
        }

        let Some(mut request) = filters.to_request(page_size(context.limit), Utc::now())? else {
            skip(&ACTIVITIES_TABLE);
            return Ok(StreamSummary::default());
        };
        request.customer_id = self.customer_id_or_default(request.customer_id);

        stream_pages(
            &ACTIVITIES_TABLE,
            self.client.as_ref(),
            &request,
            filters,
            &context.cancellation,
            sink,
        )
        .await
    }

    /// Streams `googleworkspace_admin_reports_customer_usage` rows.
    pub async fn list_customer_usage(
        &self,
        filters: &CustomerUsageFilters,
        context: &QueryContext,
        sink: &mut dyn RowSink,
    ) -> AppResult<StreamSummary> {
        if zero_limit(&CUSTOMER_USAGE_TABLE, context) {
            return Ok(StreamSummary::default());
        }

        let Some(mut request) = filters.to_request() else {
            skip(&CUSTOMER_USAGE_TABLE);
            return Ok(StreamSummary::default());
        };
        request.customer_id = self.customer_id_or_default(request.customer_id);

        stream_pages(
            &CUSTOMER_USAGE_TABLE,
            self.client.as_ref(),
            &request,
            filters,
            &context.cancellation,
            sink,
        )
        .await
    }

    /// Streams `googleworkspace_admin_reports_entity_usage` rows.
    pub async fn list_entity_usage(
        &self,
        filters: &EntityUsageFilters,
        context: &QueryContext,
        sink: &mut dyn RowSink,
    ) -> AppResult<StreamSummary> {
        if zero_limit(&ENTITY_USAGE_TABLE, context) {
            return Ok(StreamSummary::default());
        }

        let Some(mut request) = filters.to_request(page_size(context.limit)) else {
            skip(&ENTITY_USAGE_TABLE);
            return Ok(StreamSummary::default());
        };
        request.customer_id = self.customer_id_or_default(request.customer_id);

        stream_pages(
            &ENTITY_USAGE_TABLE,
            self.client.as_ref(),
            &request,
            filters,
            &context.cancellation,
            sink,
        )
        .await
    }

    /// Streams `googleworkspace_admin_reports_user_usage` rows.
    pub async fn list_user_usage(
        &self,
        filters: &UserUsageFilters,
        context: &QueryContext,
        sink: &mut dyn RowSink,
    ) -> AppResult<StreamSummary> {
        if zero_limit(&USER_USAGE_TABLE, context) {
            return Ok(StreamSummary::default());
        }

        let Some(mut request) = filters.to_request(page_size(context.limit)) else {
            skip(&USER_USAGE_TABLE);
            return Ok(StreamSummary::default());
        };
        request.customer_id = self.customer_id_or_default(request.customer_id);

        stream_pages(
            &USER_USAGE_TABLE,
            self.client.as_ref(),
            &request,
            filters,
            &context.cancellation,
            sink,
        )
        .await
    }

    fn customer_id_or_default(&self, customer_id: Option<String>) -> Option<String> {
        customer_id.or_else(|| self.default_customer_id.clone())
    }
}

fn zero_limit(table: &TableDefinition, context: &QueryContext) -> bool {
    let zero = context.limit == Some(0);
    if zero {
        debug!(table = table.name(), "row limit is zero, skipping report query");
    }
    zero
}

fn skip(table: &TableDefinition) {
    debug!(
        table = table.name(),
        "required qualifiers missing or unsatisfiable, returning no rows"
    );
}
