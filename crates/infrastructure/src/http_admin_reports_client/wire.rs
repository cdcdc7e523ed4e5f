use adminreports_application::ReportPage;
use adminreports_domain::{Activity, ReportWarning, UsageReport};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct ActivitiesResponse {
    #[serde(default)]
    items: Vec<Activity>,
    #[serde(default)]
    next_page_token: Option<String>,
}

impl ActivitiesResponse {
    pub(super) fn into_page(self) -> ReportPage<Activity> {
        ReportPage::new(self.items, self.next_page_token)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct UsageReportsResponse {
    #[serde(default)]
    usage_reports: Vec<UsageReport>,
    #[serde(default)]
    next_page_token: Option<String>,
    #[serde(default)]
    warnings: Vec<ReportWarning>,
}

impl UsageReportsResponse {
    pub(super) fn into_page(self) -> ReportPage<UsageReport> {
        let mut page = ReportPage::new(self.usage_reports, self.next_page_token);
        page.warnings = self.warnings;
        page
    }
}

/// Google API error body: `{"error": {"code": 403, "message": "..."}}`.
#[derive(Debug, Deserialize)]
pub(super) struct ApiErrorEnvelope {
    pub(super) error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
pub(super) struct ApiErrorBody {
    #[serde(default)]
    pub(super) message: Option<String>,
}
