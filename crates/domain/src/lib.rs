//! Report items, table descriptors and qualifier translation.

#![forbid(unsafe_code)]

mod qualifier;
mod report;
mod table;
mod tables;
mod time_window;

pub use qualifier::{QualOperator, Qualifier, QualifierValues};
pub use report::{
    Activity, ActivityActor, ActivityEvent, ActivityEventParameter, ActivityId, ReportCategory,
    ReportWarning, ReportWarningDetail, UsageReport, UsageReportEntity, UsageReportParameter,
};
pub use table::{
    ColumnDefinition, ColumnSource, ColumnType, KeyColumn, KeyColumnRequirement, TableDefinition,
    TableRow,
};
pub use tables::{
    ACTIVITIES_TABLE, CUSTOMER_USAGE_TABLE, ENTITY_USAGE_TABLE, USER_USAGE_TABLE, all_tables,
    find_table,
};
pub use time_window::{
    DEFAULT_ACTIVITY_LOOKBACK_HOURS, REPORT_TIMESTAMP_FORMAT, TimeWindow, format_report_timestamp,
    parse_report_timestamp,
};
