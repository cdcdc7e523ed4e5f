use adminreports_core::AppResult;
use adminreports_domain::{Activity, ReportWarning, UsageReport};
use async_trait::async_trait;

use super::requests::{
    ActivitiesRequest, CustomerUsageRequest, EntityUsageRequest, UserUsageRequest,
};

/// One page returned by a report endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportPage<T> {
    /// Items in document order.
    pub items: Vec<T>,
    /// Continuation token; `None` on the last page.
    pub next_page_token: Option<String>,
    /// Warnings the API attached to the page.
    pub warnings: Vec<ReportWarning>,
}

impl<T> ReportPage<T> {
    /// Creates a page without warnings.
    #[must_use]
    pub fn new(items: Vec<T>, next_page_token: Option<String>) -> Self {
        Self {
            items,
            next_page_token,
            warnings: Vec::new(),
        }
    }
}

/// Port for the Admin Reports API.
///
/// Each call fetches exactly one page; `page_token` is the continuation
/// token of the previous page.
#[async_trait]
pub trait AdminReportsClient: Send + Sync {
    /// Lists activity records for one user key and application.
    async fn list_activities(
        &self,
        request: &ActivitiesRequest,
        page_token: Option<&str>,
    ) -> AppResult<ReportPage<Activity>>;

    /// Fetches account level usage for one date.
    async fn get_customer_usage(
        &self,
        request: &CustomerUsageRequest,
        page_token: Option<&str>,
    ) -> AppResult<ReportPage<UsageReport>>;

    /// Fetches entity usage for one entity type, key and date.
    async fn get_entity_usage(
        &self,
        request: &EntityUsageRequest,
        page_token: Option<&str>,
    ) -> AppResult<ReportPage<UsageReport>>;

    /// Fetches user usage for one user key and date.
    async fn get_user_usage(
        &self,
        request: &UserUsageRequest,
        page_token: Option<&str>,
    ) -> AppResult<ReportPage<UsageReport>>;
}
