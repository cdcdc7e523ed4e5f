use crate::qualifier::QualOperator;
use crate::report::ReportCategory;
use crate::table::{ColumnDefinition, KeyColumn, TableDefinition};

const TIME_OPERATORS: &[QualOperator] = &[
    QualOperator::Gt,
    QualOperator::Gte,
    QualOperator::Eq,
    QualOperator::Lt,
    QualOperator::Lte,
];

const USAGE_DATE: ColumnDefinition = ColumnDefinition::text(
    "date",
    "Represents the date the usage occurred. The timestamp is in the ISO 8601 format, yyyy-mm-dd",
    "date",
);
const USAGE_CUSTOMER_ID: ColumnDefinition = ColumnDefinition::text(
    "customer_id",
    "The unique ID of the customer to retrieve data for",
    "entity.customerId",
);
const USAGE_PARAMETERS: ColumnDefinition = ColumnDefinition::json(
    "parameters",
    "Comma-separated list of event parameters that refine a report's results",
    "parameters",
);
const USAGE_USER_EMAIL: ColumnDefinition =
    ColumnDefinition::text("user_email", "The user's email address", "entity.userEmail");
const USAGE_PROFILE_ID: ColumnDefinition = ColumnDefinition::text(
    "profile_id",
    "The user's immutable Google Workspace profile identifier",
    "entity.profileId",
);
const USAGE_ENTITY_ID: ColumnDefinition =
    ColumnDefinition::text("entity_id", "Object key", "entity.entityId");
const USAGE_TYPE: ColumnDefinition =
    ColumnDefinition::text("type", "The type of item", "entity.type");
const USAGE_FILTERS: ColumnDefinition = ColumnDefinition::from_qualifier(
    "filters",
    "comma-separated list of an application's event parameters where the parameter's value is manipulated by a relational operator",
);
const QUALIFIER_ORG_UNIT_ID: ColumnDefinition = ColumnDefinition::from_qualifier(
    "org_unit_id",
    "ID of the organizational unit to report on",
);

const USAGE_REPORT_DESCRIPTION: &str = "Retrieves usage reports including statistics";

/// `googleworkspace_admin_reports_activities`.
pub const ACTIVITIES_TABLE: TableDefinition = TableDefinition::new(
    "googleworkspace_admin_reports_activities",
    "Retrieves activity reports for one application",
    ReportCategory::Activities,
    &[
        KeyColumn::required("application_name"),
        KeyColumn::optional("user_key"),
        KeyColumn::optional("actor_ip_address"),
        KeyColumn::optional("customer_id"),
        KeyColumn::optional("time").with_operators(TIME_OPERATORS),
        KeyColumn::optional("event_name"),
        KeyColumn::optional("filters"),
        KeyColumn::optional("org_unit_id"),
        KeyColumn::optional("group_id_filter"),
    ],
    &[
        ColumnDefinition::text(
            "application_name",
            "The application name for query",
            "id.applicationName",
        ),
        ColumnDefinition::text("user_key", "The user id or email to retrieve", "actor.key"),
        ColumnDefinition::text(
            "actor_ip_address",
            "An actor's ip adress to retrieve",
            "ipAddress",
        ),
        ColumnDefinition::text(
            "customer_id",
            "The customer id for each activity record",
            "id.customerId",
        ),
        ColumnDefinition::text(
            "owner_domain",
            "The immutable ID of the message.",
            "ownerDomain",
        ),
        ColumnDefinition::text("ip_address", "The IP of the actor", "ipAddress"),
        ColumnDefinition::json("events", "Activity events in the report", "events"),
        ColumnDefinition::text(
            "time",
            "Unique identifier for each activity record",
            "id.time",
        ),
        ColumnDefinition::text(
            "unique_qualifier",
            "Unique identifier for each activity record",
            "id.uniqueQualifier",
        ),
        ColumnDefinition::text("profile_id", "The Profile id of actor", "actor.profileId"),
        ColumnDefinition::text("email", "An email of actor", "actor.email"),
        ColumnDefinition::text("caller_type", "A caller type of actor", "actor.callerType"),
        ColumnDefinition::from_qualifier(
            "event_name",
            "The name of the event being queried by the API",
        ),
        ColumnDefinition::from_qualifier(
            "filters",
            "A query string to filter for specific eventName",
        ),
        QUALIFIER_ORG_UNIT_ID,
        ColumnDefinition::from_qualifier(
            "group_id_filter",
            "Group ids on which user activities are filtered",
        ),
    ],
);

/// `googleworkspace_admin_reports_customer_usage`.
pub const CUSTOMER_USAGE_TABLE: TableDefinition = TableDefinition::new(
    "googleworkspace_admin_reports_customer_usage",
    USAGE_REPORT_DESCRIPTION,
    ReportCategory::CustomerUsage,
    &[
        KeyColumn::required("date"),
        KeyColumn::optional("customer_id"),
        KeyColumn::optional("parameters"),
    ],
    &[
        USAGE_DATE,
        USAGE_CUSTOMER_ID,
        USAGE_PARAMETERS,
        USAGE_USER_EMAIL,
        USAGE_PROFILE_ID,
        USAGE_ENTITY_ID,
        USAGE_TYPE,
    ],
);

/// `googleworkspace_admin_reports_entity_usage`.
pub const ENTITY_USAGE_TABLE: TableDefinition = TableDefinition::new(
    "googleworkspace_admin_reports_entity_usage",
    USAGE_REPORT_DESCRIPTION,
    ReportCategory::EntityUsage,
    &[
        KeyColumn::required("date"),
        KeyColumn::required("entity_type"),
        KeyColumn::optional("entity_key"),
        KeyColumn::optional("customer_id"),
        KeyColumn::optional("filters"),
        KeyColumn::optional("parameters"),
    ],
    &[
        USAGE_DATE,
        USAGE_CUSTOMER_ID,
        USAGE_PARAMETERS,
        USAGE_USER_EMAIL,
        USAGE_PROFILE_ID,
        USAGE_ENTITY_ID,
        USAGE_TYPE,
        USAGE_FILTERS,
        ColumnDefinition::from_qualifier(
            "entity_key",
            "Represents the key of the object to filter the data with",
        ),
        ColumnDefinition::from_qualifier(
            "entity_type",
            "Represents the type of entity for the report",
        ),
    ],
);

/// `googleworkspace_admin_reports_user_usage`.
pub const USER_USAGE_TABLE: TableDefinition = TableDefinition::new(
    "googleworkspace_admin_reports_user_usage",
    USAGE_REPORT_DESCRIPTION,
    ReportCategory::UserUsage,
    &[
        KeyColumn::required("date"),
        KeyColumn::optional("user_key"),
        KeyColumn::optional("customer_id"),
        KeyColumn::optional("org_unit_id"),
        KeyColumn::optional("filters"),
        KeyColumn::optional("parameters"),
        KeyColumn::optional("group_id_filter"),
    ],
    &[
        USAGE_DATE,
        USAGE_CUSTOMER_ID,
        USAGE_PARAMETERS,
        USAGE_USER_EMAIL,
        USAGE_PROFILE_ID,
        USAGE_ENTITY_ID,
        USAGE_TYPE,
        QUALIFIER_ORG_UNIT_ID,
        USAGE_FILTERS,
        ColumnDefinition::from_qualifier(
            "group_id_filter",
            "Comma separated group ids on which user activities are filtered",
        ),
        ColumnDefinition::from_qualifier(
            "user_key",
            "Represents the profile ID or the user email for which the data should be filtered",
        ),
    ],
);

static ALL_TABLES: [TableDefinition; 4] = [
    ACTIVITIES_TABLE,
    CUSTOMER_USAGE_TABLE,
    ENTITY_USAGE_TABLE,
    USER_USAGE_TABLE,
];

/// Returns every table the adapters expose.
#[must_use]
pub fn all_tables() -> &'static [TableDefinition] {
    &ALL_TABLES
}

/// Finds a table by name.
#[must_use]
pub fn find_table(name: &str) -> Option<&'static TableDefinition> {
    ALL_TABLES.iter().find(|table| table.name() == name)
}
