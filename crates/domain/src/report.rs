use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Report category served by one Admin Reports endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportCategory {
    /// Audit activity records for one application.
    Activities,
    /// Account-level usage statistics.
    CustomerUsage,
    /// Usage statistics for entities such as Google+ communities.
    EntityUsage,
    /// Per-user usage statistics.
    UserUsage,
}

impl ReportCategory {
    /// Returns the stable category name used in logs.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Activities => "activities",
            Self::CustomerUsage => "customer_usage",
            Self::EntityUsage => "entity_usage",
            Self::UserUsage => "user_usage",
        }
    }
}

/// Unique identifier of one activity record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityId {
    /// Time of occurrence, RFC 3339.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    /// Unique qualifier when several events share a time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unique_qualifier: Option<String>,
    /// Application name the event belongs to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application_name: Option<String>,
    /// Obfuscated customer identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<String>,
}

/// User or service that performed an activity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityActor {
    /// Primary email address of the actor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Workspace profile identifier of the actor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_id: Option<String>,
    /// Actor type, for example `USER` or `KEY`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caller_type: Option<String>,
    /// OAuth consumer key when the caller is not a user.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
}

/// One parameter attached to an activity event.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityEventParameter {
    /// Parameter name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// String value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// String values.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub multi_value: Vec<String>,
    /// Integer value, encoded as a decimal string by the API.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub int_value: Option<String>,
    /// Integer values, encoded as decimal strings.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub multi_int_value: Vec<String>,
    /// Boolean value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bool_value: Option<bool>,
    /// Nested parameter object.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_value: Option<Value>,
    /// Nested parameter objects.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multi_message_value: Option<Value>,
}

/// One event inside an activity record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityEvent {
    /// Event type, grouping related event names.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub event_type: Option<String>,
    /// Event name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Event parameters.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<ActivityEventParameter>,
}

/// One audit activity record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    /// Record identity.
    #[serde(default)]
    pub id: ActivityId,
    /// Actor of the activity.
    #[serde(default)]
    pub actor: ActivityActor,
    /// Domain affected by the activity.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_domain: Option<String>,
    /// IP address of the actor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,
    /// Events recorded for the activity.
    #[serde(default)]
    pub events: Vec<ActivityEvent>,
}

/// Entity a usage report describes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageReportEntity {
    /// Obfuscated customer identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<String>,
    /// Email of the user, for user usage reports.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_email: Option<String>,
    /// Workspace profile identifier of the user.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_id: Option<String>,
    /// Object key, for entity usage reports.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity_id: Option<String>,
    /// Entity type, for example `customer` or `user`.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub entity_type: Option<String>,
}

/// One statistic in a usage report.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageReportParameter {
    /// Parameter name, prefixed with the application.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Integer value, encoded as a decimal string by the API.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub int_value: Option<String>,
    /// String value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub string_value: Option<String>,
    /// RFC 3339 timestamp value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub datetime_value: Option<String>,
    /// Boolean value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bool_value: Option<bool>,
    /// Nested values.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub msg_value: Option<Value>,
}

/// One usage report row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageReport {
    /// Date the usage occurred, `yyyy-mm-dd`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    /// Entity the statistics belong to.
    #[serde(default)]
    pub entity: UsageReportEntity,
    /// Reported statistics.
    #[serde(default)]
    pub parameters: Vec<UsageReportParameter>,
}

/// Key/value detail attached to a report warning.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportWarningDetail {
    /// Detail key.
    #[serde(default)]
    pub key: String,
    /// Detail value.
    #[serde(default)]
    pub value: String,
}

/// Warning returned alongside usage reports, such as partial data.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportWarning {
    /// Machine readable code, for example `PARTIAL_DATA_AVAILABLE`.
    #[serde(default)]
    pub code: String,
    /// Human readable message.
    #[serde(default)]
    pub message: String,
    /// Additional details.
    #[serde(default)]
    pub data: Vec<ReportWarningDetail>,
}
