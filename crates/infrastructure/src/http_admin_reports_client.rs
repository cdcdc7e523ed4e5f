use adminreports_application::{
    ActivitiesRequest, AdminReportsClient, CustomerUsageRequest, EntityUsageRequest, ReportPage,
    UserUsageRequest,
};
use adminreports_core::{AppError, AppResult};
use adminreports_domain::{Activity, UsageReport};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::admin_reports_config::AdminReportsConfig;

mod wire;


use wire::{ActivitiesResponse, ApiErrorEnvelope, UsageReportsResponse};

const API_PATH: [&str; 3] = ["admin", "reports", "v1"];

/// reqwest-backed implementation of the Admin Reports client port.
pub struct HttpAdminReportsClient {
    http_client: reqwest::Client,
    base_url: Url,
    access_token: String,
}

impl HttpAdminReportsClient {
    /// Creates a client over an existing reqwest client.
    #[must_use]
    pub fn new(http_client: reqwest::Client, base_url: Url, access_token: String) -> Self {
        Self {
            http_client,
            base_url,
            access_token,
        }
    }

    /// Builds the reqwest client from configuration.
    pub fn from_config(config: &AdminReportsConfig) -> AppResult<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .user_agent(concat!("adminreports/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|error| {
                AppError::Configuration(format!("failed to build admin reports HTTP client: {error}"))
            })?;

        Ok(Self::new(
            http_client,
            config.base_url.clone(),
            config.access_token.clone(),
        ))
    }

    /// Returns the URL for `segments` below `/admin/reports/v1`.
    pub(crate) fn endpoint_url(&self, segments: &[&str]) -> AppResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| {
                AppError::Configuration(format!(
                    "admin reports base url '{}' cannot carry a path",
                    self.base_url
                ))
            })?
            .pop_if_empty()
            .extend(API_PATH)
            .extend(segments);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        mut url: Url,
        query: QueryParams,
    ) -> AppResult<T> {
        query.apply(&mut url);
        debug!(operation, path = url.path(), "requesting admin reports page");

        let response = self
            .http_client
            .get(url)
            .bearer_auth(&self.access_token)
            .send()
            .await
            .map_err(|error| {
                AppError::Internal(format!("admin reports {operation} request failed: {error}"))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<response body unavailable>".to_owned());
            return Err(status_error(operation, status, &body));
        }

        response.json::<T>().await.map_err(|error| {
            AppError::Internal(format!(
                "failed to decode admin reports {operation} response: {error}"
            ))
        })
    }
}

#[async_trait]
impl AdminReportsClient for HttpAdminReportsClient {
    async fn list_activities(
        &self,
        request: &ActivitiesRequest,
        page_token: Option<&str>,
    ) -> AppResult<ReportPage<Activity>> {
        let url = self.endpoint_url(&[
            "activity",
            "users",
            request.user_key.as_str(),
            "applications",
            request.application_name.as_str(),
        ])?;

        let mut query = QueryParams::default();
        query.push("maxResults", Some(request.max_results.to_string()));
        query.push_ref("actorIpAddress", request.actor_ip_address.as_deref());
        query.push_ref("customerId", request.customer_id.as_deref());
        query.push_ref("startTime", request.start_time.as_deref());
        query.push_ref("endTime", request.end_time.as_deref());
        query.push_ref("eventName", request.event_name.as_deref());
        query.push_ref("filters", request.filters.as_deref());
        query.push_ref("orgUnitID", request.org_unit_id.as_deref());
        query.push_ref("groupIdFilter", request.group_id_filter.as_deref());
        query.push_ref("pageToken", page_token);

        let response: ActivitiesResponse = self.get_json("activities.list", url, query).await?;
        Ok(response.into_page())
    }

    async fn get_customer_usage(
        &self,
        request: &CustomerUsageRequest,
        page_token: Option<&str>,
    ) -> AppResult<ReportPage<UsageReport>> {
        let url = self.endpoint_url(&["usage", "dates", request.date.as_str()])?;

        let mut query = QueryParams::default();
        query.push_ref("customerId", request.customer_id.as_deref());
        query.push_ref("parameters", request.parameters.as_deref());
        query.push_ref("pageToken", page_token);

        let response: UsageReportsResponse =
            self.get_json("customerUsageReports.get", url, query).await?;
        Ok(response.into_page())
    }

    async fn get_entity_usage(
        &self,
        request: &EntityUsageRequest,
        page_token: Option<&str>,
    ) -> AppResult<ReportPage<UsageReport>> {
        let url = self.endpoint_url(&[
            "usage",
            request.entity_type.as_str(),
            request.entity_key.as_str(),
            "dates",
            request.date.as_str(),
        ])?;

        let mut query = QueryParams::default();
        query.push_ref("customerId", request.customer_id.as_deref());
        query.push_ref("filters", request.filters.as_deref());
        query.push("maxResults", Some(request.max_results.to_string()));
        query.push_ref("parameters", request.parameters.as_deref());
        query.push_ref("pageToken", page_token);

        let response: UsageReportsResponse =
            self.get_json("entityUsageReports.get", url, query).await?;
        Ok(response.into_page())
    }

    async fn get_user_usage(
        &self,
        request: &UserUsageRequest,
        page_token: Option<&str>,
    ) -> AppResult<ReportPage<UsageReport>> {
        let url = self.endpoint_url(&[
            "usage",
            "users",
            request.user_key.as_str(),
            "dates",
            request.date.as_str(),
        ])?;

        let mut query = QueryParams::default();
        query.push_ref("customerId", request.customer_id.as_deref());
        query.push_ref("orgUnitID", request.org_unit_id.as_deref());
        query.push_ref("filters", request.filters.as_deref());
        query.push_ref("parameters", request.parameters.as_deref());
        query.push_ref("groupIdFilter", request.group_id_filter.as_deref());
        query.push("maxResults", Some(request.max_results.to_string()));
        query.push_ref("pageToken", page_token);

        let response: UsageReportsResponse =
            self.get_json("userUsageReport.get", url, query).await?;
        Ok(response.into_page())
    }
}

/// Ordered query parameters; empty values are skipped.
#[derive(Debug, Default)]
struct QueryParams {
    pairs: Vec<(&'static str, String)>,
}

impl QueryParams {
    fn push(&mut self, name: &'static str, value: Option<String>) {
        if let Some(value) = value.filter(|value| !value.is_empty()) {
            self.pairs.push((name, value));
        }
    }

    fn push_ref(&mut self, name: &'static str, value: Option<&str>) {
        self.push(name, value.map(str::to_owned));
    }

    fn apply(self, url: &mut Url) {
        if self.pairs.is_empty() {
            return;
        }

        let mut serializer = url.query_pairs_mut();
        for (name, value) in &self.pairs {
            serializer.append_pair(name, value);
        }
    }
}

fn status_error(operation: &str, status: StatusCode, body: &str) -> AppError {
    let message = serde_json::from_str::<ApiErrorEnvelope>(body)
        .ok()
        .and_then(|envelope| envelope.error.message)
        .filter(|message| !message.is_empty())
        .unwrap_or_else(|| body.trim().to_owned());

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => AppError::Unauthorized(format!(
            "admin reports {operation} rejected the credentials: {message}"
        )),
        _ => AppError::Upstream {
            status: status.as_u16(),
            message,
        },
    }
}
