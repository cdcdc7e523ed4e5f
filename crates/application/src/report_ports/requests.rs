use adminreports_core::AppResult;
use adminreports_domain::{Activity, UsageReport};
use async_trait::async_trait;
use serde::Serialize;

use super::client::{AdminReportsClient, ReportPage};

/// Request for `activities.list`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivitiesRequest {
    /// Profile id, email, or `all`.
    pub user_key: String,
    /// Application whose activities are listed.
    pub application_name: String,
    /// Page size.
    pub max_results: u32,
    /// Restricts to activities performed from this IP address.
    pub actor_ip_address: Option<String>,
    /// Customer to retrieve data for.
    pub customer_id: Option<String>,
    /// Inclusive lower time bound.
    pub start_time: Option<String>,
    /// Inclusive upper time bound.
    pub end_time: Option<String>,
    /// Event name to filter on.
    pub event_name: Option<String>,
    /// Event parameter conditions.
    pub filters: Option<String>,
    /// Organizational unit to report on.
    pub org_unit_id: Option<String>,
    /// Comma separated group ids.
    pub group_id_filter: Option<String>,
}

/// Request for `customerUsageReports.get`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerUsageRequest {
    /// Report date, `yyyy-mm-dd`.
    pub date: String,
    /// Customer to retrieve data for.
    pub customer_id: Option<String>,
    /// Comma separated parameters to include.
    pub parameters: Option<String>,
}

/// Request for `entityUsageReports.get`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityUsageRequest {
    /// Entity type, for example `gplus_communities`.
    pub entity_type: String,
    /// Entity key or `all`.
    pub entity_key: String,
    /// Report date, `yyyy-mm-dd`.
    pub date: String,
    /// Page size.
    pub max_results: u32,
    /// Customer to retrieve data for.
    pub customer_id: Option<String>,
    /// Parameter conditions.
    pub filters: Option<String>,
    /// Comma separated parameters to include.
    pub parameters: Option<String>,
}

/// Request for `userUsageReport.get`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserUsageRequest {
    /// Profile id, email, or `all`.
    pub user_key: String,
    /// Report date, `yyyy-mm-dd`.
    pub date: String,
    /// Page size.
    pub max_results: u32,
    /// Customer to retrieve data for.
    pub customer_id: Option<String>,
    /// Organizational unit to report on.
    pub org_unit_id: Option<String>,
    /// Parameter conditions.
    pub filters: Option<String>,
    /// Comma separated parameters to include.
    pub parameters: Option<String>,
    /// Comma separated group ids.
    pub group_id_filter: Option<String>,
}

/// A built request that can fetch its pages from the client port.
#[async_trait]
pub trait PagedReportRequest: Send + Sync {
    /// Item type of the pages.
    type Item: Serialize + Send;

    /// Fetches the page following `page_token`.
    async fn fetch_page(
        &self,
        client: &dyn AdminReportsClient,
        page_token: Option<&str>,
    ) -> AppResult<ReportPage<Self::Item>>;
}

#[async_trait]
impl PagedReportRequest for ActivitiesRequest {
    type Item = Activity;

    async fn fetch_page(
        &self,
        client: &dyn AdminReportsClient,
        page_token: Option<&str>,
    ) -> AppResult<ReportPage<Activity>> {
        client.list_activities(self, page_token).await
    }
}

#[async_trait]
impl PagedReportRequest for CustomerUsageRequest {
    type Item = UsageReport;

    async fn fetch_page(
        &self,
        client: &dyn AdminReportsClient,
        page_token: Option<&str>,
    ) -> AppResult<ReportPage<UsageReport>> {
        client.get_customer_usage(self, page_token).await
    }
}

#[async_trait]
impl PagedReportRequest for EntityUsageRequest {
    type Item = UsageReport;

    async fn fetch_page(
        &self,
        client: &dyn AdminReportsClient,
        page_token: Option<&str>,
    ) -> AppResult<ReportPage<UsageReport>> {
        client.get_entity_usage(self, page_token).await
    }
}

#[async_trait]
impl PagedReportRequest for UserUsageRequest {
    type Item = UsageReport;

    async fn fetch_page(
        &self,
        client: &dyn AdminReportsClient,
        page_token: Option<&str>,
    ) -> AppResult<ReportPage<UsageReport>> {
        client.get_user_usage(self, page_token).await
    }
}
