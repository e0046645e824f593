//! Structured cache keys.
//!
//! A key is an ordered segment list; two keys built from structurally
//! equal inputs are equal, and invalidation matches on segment prefixes
//! (`["tickets"]` covers every tickets key).

use ticketflow_core::{TicketFilters, UserRole};

/// Composite cache key: resource name plus parameter segments.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey(Vec<String>);

impl QueryKey {
    pub fn new<I>(segments: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        Self(segments.into_iter().map(Into::into).collect())
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// Prefix match used by invalidation.
    pub fn starts_with(&self, prefix: &QueryKey) -> bool {
        self.0.len() >= prefix.0.len() && self.0[..prefix.0.len()] == prefix.0[..]
    }
}

impl core::fmt::Display for QueryKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0.join("/"))
    }
}

/// Key factories. All keys are built here so that key shapes (and thus
/// invalidation behavior) live in one place.
pub mod keys {
    use super::QueryKey;
    use super::{TicketFilters, UserRole};

    /// Every tickets key; the invalidation target for ticket mutations.
    pub fn tickets() -> QueryKey {
        QueryKey::new(["tickets"])
    }

    /// Every ticket-list key regardless of filter set.
    pub fn tickets_lists() -> QueryKey {
        QueryKey::new(["tickets", "list"])
    }

    /// Ticket list keyed by its filter set. Filters serialize in field
    /// declaration order, so equal filter sets produce equal keys.
    pub fn tickets_all(filters: &TicketFilters) -> QueryKey {
        let params = serde_json::to_string(filters).unwrap_or_default();
        QueryKey::new(["tickets".to_owned(), "list".to_owned(), params])
    }

    pub fn ticket_detail(id: &str) -> QueryKey {
        QueryKey::new(["tickets".to_owned(), "detail".to_owned(), id.to_owned()])
    }

    pub fn ticket_activities(id: &str) -> QueryKey {
        QueryKey::new([
            "tickets".to_owned(),
            "detail".to_owned(),
            id.to_owned(),
            "activities".to_owned(),
        ])
    }

    pub fn ai_suggestions(ticket_id: &str) -> QueryKey {
        QueryKey::new([
            "ai".to_owned(),
            "suggestions".to_owned(),
            ticket_id.to_owned(),
        ])
    }

    pub fn ai_stats() -> QueryKey {
        QueryKey::new(["ai", "stats"])
    }

    /// Every user-admin key; the invalidation target for role/status
    /// changes.
    pub fn users_all() -> QueryKey {
        QueryKey::new(["admin", "users"])
    }

    pub fn users(page: u32, limit: u32) -> QueryKey {
        QueryKey::new([
            "admin".to_owned(),
            "users".to_owned(),
            page.to_string(),
            limit.to_string(),
        ])
    }

    pub fn log_stats() -> QueryKey {
        QueryKey::new(["admin", "logs", "stats"])
    }

    pub fn logs(page: u32, limit: u32) -> QueryKey {
        QueryKey::new([
            "admin".to_owned(),
            "logs".to_owned(),
            page.to_string(),
            limit.to_string(),
        ])
    }

    pub fn dashboard_metrics(role: UserRole) -> QueryKey {
        QueryKey::new([
            "dashboard".to_owned(),
            "metrics".to_owned(),
            role.as_str().to_owned(),
        ])
    }

    pub fn auth_me() -> QueryKey {
        QueryKey::new(["auth", "me"])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ticketflow_core::TicketStatus;

    #[test]
    fn equal_filters_produce_equal_keys() {
        let a = TicketFilters {
            status: Some(TicketStatus::Open),
            page: Some(1),
            ..Default::default()
        };
        let b = TicketFilters {
            status: Some(TicketStatus::Open),
            page: Some(1),
            ..Default::default()
        };
        assert_eq!(keys::tickets_all(&a), keys::tickets_all(&b));
    }

    #[test]
    fn different_filters_produce_different_keys() {
        let open = TicketFilters {
            status: Some(TicketStatus::Open),
            ..Default::default()
        };
        assert_ne!(
            keys::tickets_all(&open),
            keys::tickets_all(&TicketFilters::default())
        );
    }

    #[test]
    fn prefix_matching() {
        let detail = keys::ticket_detail("t-1");
        assert!(detail.starts_with(&keys::tickets()));
        assert!(detail.starts_with(&detail));
        assert!(!detail.starts_with(&keys::tickets_lists()));
        assert!(!keys::tickets().starts_with(&detail));
        assert!(keys::ticket_activities("t-1").starts_with(&keys::ticket_detail("t-1")));
    }

    #[test]
    fn list_keys_share_the_lists_prefix() {
        let filtered = keys::tickets_all(&TicketFilters {
            status: Some(TicketStatus::Closed),
            ..Default::default()
        });
        let unfiltered = keys::tickets_all(&TicketFilters::default());
        assert!(filtered.starts_with(&keys::tickets_lists()));
        assert!(unfiltered.starts_with(&keys::tickets_lists()));
    }
}
