//! Infrastructure adapters for the Admin Reports tables.

#![forbid(unsafe_code)]

mod admin_reports_config;
mod http_admin_reports_client;

pub use admin_reports_config::{
    ACCESS_TOKEN_ENV, AdminReportsConfig, BASE_URL_ENV, CUSTOMER_ID_ENV, DEFAULT_BASE_URL,
    REQUEST_TIMEOUT_ENV,
};
pub use http_admin_reports_client::HttpAdminReportsClient;
