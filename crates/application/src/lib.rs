//! Application services and ports for the Admin Reports tables.

#![forbid(unsafe_code)]

mod page_streamer;
mod report_ports;
mod report_table_service;
mod table_filters;

pub use page_streamer::{CollectingRowSink, RowSink, StreamSummary, stream_pages};
pub use report_ports::{
    ActivitiesRequest, AdminReportsClient, CustomerUsageRequest, EntityUsageRequest,
    PagedReportRequest, ReportPage, UserUsageRequest,
};
pub use report_table_service::{QueryContext, ReportTableService};
pub use table_filters::{
    ALL_KEYS, ActivitiesFilters, CustomerUsageFilters, EntityUsageFilters, MAX_PAGE_SIZE,
    UserUsageFilters, page_size,
};
