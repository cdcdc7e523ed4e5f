mod client;
mod requests;

pub use client::{AdminReportsClient, ReportPage};
pub use requests::{
    ActivitiesRequest, CustomerUsageRequest, EntityUsageRequest, PagedReportRequest,
    UserUsageRequest,
};
