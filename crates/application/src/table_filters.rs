//! Typed per-table filters and the requests built from them.
//!
//! Host qualifiers are validated against the table descriptor and matched
//! field by field. A filter set missing a required value builds no request.

use adminreports_core::{AppError, AppResult};
use adminreports_domain::{
    ACTIVITIES_TABLE, CUSTOMER_USAGE_TABLE, ENTITY_USAGE_TABLE, Qualifier, QualifierValues,
    TableDefinition, TimeWindow, USER_USAGE_TABLE,
};
use chrono::{DateTime, Utc};

use crate::report_ports::{
    ActivitiesRequest, CustomerUsageRequest, EntityUsageRequest, UserUsageRequest,
};

/// Largest page the API serves.
pub const MAX_PAGE_SIZE: u32 = 1000;

/// Key value selecting every user or entity.
pub const ALL_KEYS: &str = "all";

/// Page size for a row-limit hint: the hint capped at [`MAX_PAGE_SIZE`].
#[must_use]
pub fn page_size(limit: Option<u64>) -> u32 {
    limit.map_or(MAX_PAGE_SIZE, |limit| {
        u32::try_from(limit.min(u64::from(MAX_PAGE_SIZE))).unwrap_or(MAX_PAGE_SIZE)
    })
}

fn unexpected_column(table: &TableDefinition, qualifier: &Qualifier) -> AppError {
    AppError::Validation(format!(
        "table '{}' does not accept qualifiers on column '{}'",
        table.name(),
        qualifier.column()
    ))
}

fn owned(qualifier: &Qualifier) -> Option<String> {
    Some(qualifier.value().to_owned())
}

/// Filters of `googleworkspace_admin_reports_activities`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActivitiesFilters {
    /// Required application name.
    pub application_name: Option<String>,
    /// User key, `all` when absent.
    pub user_key: Option<String>,
    /// Actor IP address.
    pub actor_ip_address: Option<String>,
    /// Customer id.
    pub customer_id: Option<String>,
    /// Time qualifiers, intersected into one window.
    pub time: Vec<Qualifier>,
    /// Event name.
    pub event_name: Option<String>,
    /// Event parameter conditions.
    pub filters: Option<String>,
    /// Organizational unit id.
    pub org_unit_id: Option<String>,
    /// Group id filter.
    pub group_id_filter: Option<String>,
}

impl ActivitiesFilters {
    /// Builds the filters from host qualifiers.
    pub fn from_qualifiers(qualifiers: &[Qualifier]) -> AppResult<Self> {
        ACTIVITIES_TABLE.validate_qualifiers(qualifiers)?;

        let mut filters = Self::default();
        for qualifier in qualifiers {
            match qualifier.column() {
                "application_name" => filters.application_name = owned(qualifier),
                "user_key" => filters.user_key = owned(qualifier),
                "actor_ip_address" => filters.actor_ip_address = owned(qualifier),
                "customer_id" => filters.customer_id = owned(qualifier),
                "time" => filters.time.push(qualifier.clone()),
                "event_name" => filters.event_name = owned(qualifier),
                "filters" => filters.filters = owned(qualifier),
                "org_unit_id" => filters.org_unit_id = owned(qualifier),
                "group_id_filter" => filters.group_id_filter = owned(qualifier),
                _ => return Err(unexpected_column(&ACTIVITIES_TABLE, qualifier)),
            }
        }

        Ok(filters)
    }

    /// Builds the request, or `None` when the application name is missing
    /// or the time qualifiers cannot match any instant.
    pub fn to_request(
        &self,
        max_results: u32,
        now: DateTime<Utc>,
    ) -> AppResult<Option<ActivitiesRequest>> {
        let Some(application_name) = self.application_name.clone() else {
            return Ok(None);
        };

        let window = TimeWindow::resolve(&self.time, now)?;
        if window.is_empty() {
            return Ok(None);
        }

        Ok(Some(ActivitiesRequest {
            user_key: self.user_key.clone().unwrap_or_else(|| ALL_KEYS.to_owned()),
            application_name,
            max_results,
            actor_ip_address: self.actor_ip_address.clone(),
            customer_id: self.customer_id.clone(),
            start_time: window.start_time(),
            end_time: window.end_time(),
            event_name: self.event_name.clone(),
            filters: self.filters.clone(),
            org_unit_id: self.org_unit_id.clone(),
            group_id_filter: self.group_id_filter.clone(),
        }))
    }
}

impl QualifierValues for ActivitiesFilters {
    fn qualifier_value(&self, column: &str) -> Option<&str> {
        match column {
            "application_name" => self.application_name.as_deref(),
            "user_key" => self.user_key.as_deref(),
            "actor_ip_address" => self.actor_ip_address.as_deref(),
            "customer_id" => self.customer_id.as_deref(),
            "event_name" => self.event_name.as_deref(),
            "filters" => self.filters.as_deref(),
            "org_unit_id" => self.org_unit_id.as_deref(),
            "group_id_filter" => self.group_id_filter.as_deref(),
            _ => None,
        }
    }
}

/// Filters of `googleworkspace_admin_reports_customer_usage`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomerUsageFilters {
    /// Required report date.
    pub date: Option<String>,
    /// Customer id.
    pub customer_id: Option<String>,
    /// Parameters to include.
    pub parameters: Option<String>,
}

impl CustomerUsageFilters {
    /// Builds the filters from host qualifiers.
    pub fn from_qualifiers(qualifiers: &[Qualifier]) -> AppResult<Self> {
        CUSTOMER_USAGE_TABLE.validate_qualifiers(qualifiers)?;

        let mut filters = Self::default();
        for qualifier in qualifiers {
            match qualifier.column() {
                "date" => filters.date = owned(qualifier),
                "customer_id" => filters.customer_id = owned(qualifier),
                "parameters" => filters.parameters = owned(qualifier),
                _ => return Err(unexpected_column(&CUSTOMER_USAGE_TABLE, qualifier)),
            }
        }

        Ok(filters)
    }

    /// Builds the request, or `None` when the date is missing.
    #[must_use]
    pub fn to_request(&self) -> Option<CustomerUsageRequest> {
        let date = self.date.clone()?;
        Some(CustomerUsageRequest {
            date,
            customer_id: self.customer_id.clone(),
            parameters: self.parameters.clone(),
        })
    }
}

impl QualifierValues for CustomerUsageFilters {
    fn qualifier_value(&self, column: &str) -> Option<&str> {
        match column {
            "date" => self.date.as_deref(),
            "customer_id" => self.customer_id.as_deref(),
            "parameters" => self.parameters.as_deref(),
            _ => None,
        }
    }
}

/// Filters of `googleworkspace_admin_reports_entity_usage`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntityUsageFilters {
    /// Required report date.
    pub date: Option<String>,
    /// Required entity type.
    pub entity_type: Option<String>,
    /// Entity key, `all` when absent.
    pub entity_key: Option<String>,
    /// Customer id.
    pub customer_id: Option<String>,
    /// Parameter conditions.
    pub filters: Option<String>,
    /// Parameters to include.
    pub parameters: Option<String>,
}

impl EntityUsageFilters {
    /// Builds the filters from host qualifiers.
    pub fn from_qualifiers(qualifiers: &[Qualifier]) -> AppResult<Self> {
        ENTITY_USAGE_TABLE.validate_qualifiers(qualifiers)?;

        let mut filters = Self::default();
        for qualifier in qualifiers {
            match qualifier.column() {
                "date" => filters.date = owned(qualifier),
                "entity_type" => filters.entity_type = owned(qualifier),
                "entity_key" => filters.entity_key = owned(qualifier),
                "customer_id" => filters.customer_id = owned(qualifier),
                "filters" => filters.filters = owned(qualifier),
                "parameters" => filters.parameters = owned(qualifier),
                _ => return Err(unexpected_column(&ENTITY_USAGE_TABLE, qualifier)),
            }
        }

        Ok(filters)
    }

    /// Builds the request, or `None` when the date or entity type is missing.
    #[must_use]
    pub fn to_request(&self, max_results: u32) -> Option<EntityUsageRequest> {
        let date = self.date.clone()?;
        let entity_type = self.entity_type.clone()?;
        Some(EntityUsageRequest {
            entity_type,
            entity_key: self
                .entity_key
                .clone()
                .unwrap_or_else(|| ALL_KEYS.to_owned()),
            date,
            max_results,
            customer_id: self.customer_id.clone(),
            filters: self.filters.clone(),
            parameters: self.parameters.clone(),
        })
    }
}

impl QualifierValues for EntityUsageFilters {
    fn qualifier_value(&self, column: &str) -> Option<&str> {
        match column {
            "date" => self.date.as_deref(),
            "entity_type" => self.entity_type.as_deref(),
            "entity_key" => self.entity_key.as_deref(),
            "customer_id" => self.customer_id.as_deref(),
            "filters" => self.filters.as_deref(),
            "parameters" => self.parameters.as_deref(),
            _ => None,
        }
    }
}

/// Filters of `googleworkspace_admin_reports_user_usage`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserUsageFilters {
    /// Required report date.
    pub date: Option<String>,
    /// User key, `all` when absent.
    pub user_key: Option<String>,
    /// Customer id.
    pub customer_id: Option<String>,
    /// Organizational unit id.
    pub org_unit_id: Option<String>,
    /// Parameter conditions.
    pub filters: Option<String>,
    /// Parameters to include.
    pub parameters: Option<String>,
    /// Group id filter.
    pub group_id_filter: Option<String>,
}

impl UserUsageFilters {
    /// Builds the filters from host qualifiers.
    pub fn from_qualifiers(qualifiers: &[Qualifier]) -> AppResult<Self> {
        USER_USAGE_TABLE.validate_qualifiers(qualifiers)?;

        let mut filters = Self::default();
        for qualifier in qualifiers {
            match qualifier.column() {
                "date" => filters.date = owned(qualifier),
                "user_key" => filters.user_key = owned(qualifier),
                "customer_id" => filters.customer_id = owned(qualifier),
                "org_unit_id" => filters.org_unit_id = owned(qualifier),
                "filters" => filters.filters = owned(qualifier),
                "parameters" => filters.parameters = owned(qualifier),
                "group_id_filter" => filters.group_id_filter = owned(qualifier),
                _ => return Err(unexpected_column(&USER_USAGE_TABLE, qualifier)),
            }
        }

        Ok(filters)
    }

    /// Builds the request, or `None` when the date is missing.
    #[must_use]
    pub fn to_request(&self, max_results: u32) -> Option<UserUsageRequest> {
        let date = self.date.clone()?;
        Some(UserUsageRequest {
            user_key: self.user_key.clone().unwrap_or_else(|| ALL_KEYS.to_owned()),
            date,
            max_results,
            customer_id: self.customer_id.clone(),
            org_unit_id: self.org_unit_id.clone(),
            filters: self.filters.clone(),
            parameters: self.parameters.clone(),
            group_id_filter: self.group_id_filter.clone(),
        })
    }
}

impl QualifierValues for UserUsageFilters {
    fn qualifier_value(&self, column: &str) -> Option<&str> {
        match column {
            "date" => self.date.as_deref(),
            "user_key" => self.user_key.as_deref(),
            "customer_id" => self.customer_id.as_deref(),
            "org_unit_id" => self.org_unit_id.as_deref(),
            "filters" => self.filters.as_deref(),
            "parameters" => self.parameters.as_deref(),
            "group_id_filter" => self.group_id_filter.as_deref(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use adminreports_core::AppError;
    use adminreports_domain::{QualOperator, Qualifier, format_report_timestamp};
    use chrono::{Duration, TimeZone, Utc};
    use proptest::prelude::*;

    use super::{
        ActivitiesFilters, CustomerUsageFilters, EntityUsageFilters, MAX_PAGE_SIZE,
        UserUsageFilters, page_size,
    };

    fn eq(column: &str, value: &str) -> Qualifier {
        Qualifier::eq(column, value).unwrap_or_else(|_| unreachable!())
    }

    #[test]
    fn page_size_follows_small_hints() {
        assert_eq!(page_size(Some(50)), 50);
        assert_eq!(page_size(Some(5000)), MAX_PAGE_SIZE);
        assert_eq!(page_size(None), MAX_PAGE_SIZE);
    }

    proptest! {
        #[test]
        fn page_size_never_exceeds_cap(limit in any::<u64>()) {
            let size = page_size(Some(limit));
            prop_assert!(size <= MAX_PAGE_SIZE);
            prop_assert_eq!(u64::from(size), limit.min(u64::from(MAX_PAGE_SIZE)));
        }
    }

    #[test]
    fn activities_request_defaults_user_key_and_window() {
        let now = Utc
            .with_ymd_and_hms(2024, 3, 2, 12, 0, 0)
            .single()
            .unwrap_or_else(|| unreachable!());
        let filters = ActivitiesFilters::from_qualifiers(&[eq("application_name", "login")])
            .unwrap_or_else(|_| unreachable!());

        let request = filters.to_request(100, now);
        assert!(request.is_ok());

        let request = request
            .unwrap_or_else(|_| unreachable!())
            .unwrap_or_else(|| unreachable!());
        assert_eq!(request.user_key, "all");
        assert_eq!(request.application_name, "login");
        assert_eq!(request.max_results, 100);
        assert_eq!(
            request.start_time,
            Some(format_report_timestamp(now - Duration::hours(24)))
        );
        assert_eq!(request.end_time, None);
    }

    #[test]
    fn activities_request_carries_optional_parameters() {
        let filters = ActivitiesFilters::from_qualifiers(&[
            eq("application_name", "drive"),
            eq("user_key", "ana@example.com"),
            eq("actor_ip_address", "10.0.0.1"),
            eq("customer_id", "C01"),
            eq("event_name", "edit"),
            eq("filters", "doc_id==abc"),
            eq("org_unit_id", "ou-1"),
            eq("group_id_filter", "g1,g2"),
            Qualifier::new("time", QualOperator::Eq, "2024-03-01T10:00:00.000Z")
                .unwrap_or_else(|_| unreachable!()),
        ])
        .unwrap_or_else(|_| unreachable!());

        let request = filters
            .to_request(10, Utc::now())
            .unwrap_or_else(|_| unreachable!())
            .unwrap_or_else(|| unreachable!());
        assert_eq!(request.user_key, "ana@example.com");
        assert_eq!(request.actor_ip_address.as_deref(), Some("10.0.0.1"));
        assert_eq!(request.customer_id.as_deref(), Some("C01"));
        assert_eq!(request.start_time.as_deref(), Some("2024-03-01T10:00:00.000Z"));
        assert_eq!(request.end_time.as_deref(), Some("2024-03-01T10:00:00.000Z"));
        assert_eq!(request.event_name.as_deref(), Some("edit"));
        assert_eq!(request.filters.as_deref(), Some("doc_id==abc"));
        assert_eq!(request.org_unit_id.as_deref(), Some("ou-1"));
        assert_eq!(request.group_id_filter.as_deref(), Some("g1,g2"));
    }

    #[test]
    fn missing_required_values_build_no_request() {
        let activities = ActivitiesFilters::from_qualifiers(&[eq("user_key", "all")])
            .unwrap_or_else(|_| unreachable!());
        assert!(matches!(activities.to_request(10, Utc::now()), Ok(None)));

        let customer = CustomerUsageFilters::from_qualifiers(&[eq("customer_id", "C01")])
            .unwrap_or_else(|_| unreachable!());
        assert!(customer.to_request().is_none());

        let entity = EntityUsageFilters::from_qualifiers(&[eq("date", "2024-03-01")])
            .unwrap_or_else(|_| unreachable!());
        assert!(entity.to_request(10).is_none());

        let user = UserUsageFilters::from_qualifiers(&[eq("user_key", "ana@example.com")])
            .unwrap_or_else(|_| unreachable!());
        assert!(user.to_request(10).is_none());
    }

    #[test]
    fn usage_requests_default_keys_to_all() {
        let entity = EntityUsageFilters::from_qualifiers(&[
            eq("date", "2024-03-01"),
            eq("entity_type", "gplus_communities"),
        ])
        .unwrap_or_else(|_| unreachable!())
        .to_request(25)
        .unwrap_or_else(|| unreachable!());
        assert_eq!(entity.entity_key, "all");
        assert_eq!(entity.max_results, 25);

        let user = UserUsageFilters::from_qualifiers(&[eq("date", "2024-03-01")])
            .unwrap_or_else(|_| unreachable!())
            .to_request(25)
            .unwrap_or_else(|| unreachable!());
        assert_eq!(user.user_key, "all");
    }

    #[test]
    fn misspelled_column_is_rejected() {
        let result = UserUsageFilters::from_qualifiers(&[eq("dates", "2024-03-01")]);
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[test]
    fn malformed_time_fails_request_build() {
        let filters = ActivitiesFilters::from_qualifiers(&[
            eq("application_name", "drive"),
            Qualifier::new("time", QualOperator::Gt, "2024-03-01")
                .unwrap_or_else(|_| unreachable!()),
        ])
        .unwrap_or_else(|_| unreachable!());

        assert!(matches!(
            filters.to_request(10, Utc::now()),
            Err(AppError::Parse(_))
        ));
    }
}
