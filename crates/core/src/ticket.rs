//! Ticket DTOs, filters, and activity feed entries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle status of a ticket.
///
/// The client places no constraints on transitions; any status may follow
/// any other. If a state machine exists it is enforced server-side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TicketStatus {
    Open,
    InProgress,
    Resolved,
    Closed,
}

impl TicketStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TicketStatus::Open => "open",
            TicketStatus::InProgress => "in_progress",
            TicketStatus::Resolved => "resolved",
            TicketStatus::Closed => "closed",
        }
    }

    /// Whether the ticket is in a terminal state (no further agent work).
    pub fn is_terminal(&self) -> bool {
        matches!(self, TicketStatus::Resolved | TicketStatus::Closed)
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "open" => Some(TicketStatus::Open),
            "in_progress" => Some(TicketStatus::InProgress),
            "resolved" => Some(TicketStatus::Resolved),
            "closed" => Some(TicketStatus::Closed),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TicketPriority {
    Low,
    Medium,
    High,
    Urgent,
}

impl TicketPriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            TicketPriority::Low => "low",
            TicketPriority::Medium => "medium",
            TicketPriority::High => "high",
            TicketPriority::Urgent => "urgent",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "low" => Some(TicketPriority::Low),
            "medium" => Some(TicketPriority::Medium),
            "high" => Some(TicketPriority::High),
            "urgent" => Some(TicketPriority::Urgent),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TicketCategory {
    Technical,
    Billing,
    General,
    Other,
}

impl TicketCategory {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "technical" => Some(TicketCategory::Technical),
            "billing" => Some(TicketCategory::Billing),
            "general" => Some(TicketCategory::General),
            "other" => Some(TicketCategory::Other),
            _ => None,
        }
    }
}

/// A support ticket snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    pub id: String,
    pub title: String,
    pub description: String,
    pub status: TicketStatus,
    pub priority: TicketPriority,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<TicketCategory>,
    pub user_id: String,
    pub user_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_to_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_unread: Option<bool>,
}

/// Kind of entry on a ticket's activity feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TicketActivityType {
    StatusChange,
    Comment,
    Assignment,
    AiSuggestion,
}

/// One entry on a ticket's activity feed. Append-only from the client's
/// perspective.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketActivity {
    pub id: String,
    pub ticket_id: String,
    #[serde(rename = "type")]
    pub activity_type: TicketActivityType,
    pub content: String,
    pub user_id: String,
    pub user_name: String,
    pub created_at: DateTime<Utc>,
}

/// Payload for creating a ticket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTicketData {
    pub title: String,
    pub description: String,
    pub priority: TicketPriority,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<TicketCategory>,
}

/// Partial update payload; absent fields are left untouched by the backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTicketData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<TicketStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<TicketPriority>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<String>,
}

/// Ticket list filter set. Also serves as the cache-key parameter object,
/// so serialization must be deterministic (serde emits fields in
/// declaration order).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketFilters {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<TicketStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<TicketPriority>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

impl TicketFilters {
    /// Render the filter set as URL query parameters, omitting unset fields.
    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();
        if let Some(status) = self.status {
            params.push(("status".to_owned(), status.as_str().to_owned()));
        }
        if let Some(priority) = self.priority {
            params.push(("priority".to_owned(), priority.as_str().to_owned()));
        }
        if let Some(assigned_to) = &self.assigned_to {
            params.push(("assignedTo".to_owned(), assigned_to.clone()));
        }
        if let Some(search) = &self.search {
            params.push(("search".to_owned(), search.clone()));
        }
        if let Some(page) = self.page {
            params.push(("page".to_owned(), page.to_string()));
        }
        if let Some(limit) = self.limit {
            params.push(("limit".to_owned(), limit.to_string()));
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trip() {
        assert_eq!(
            serde_json::to_string(&TicketStatus::InProgress).unwrap(),
            "\"in_progress\""
        );
        assert_eq!(
            serde_json::from_str::<TicketStatus>("\"closed\"").unwrap(),
            TicketStatus::Closed
        );
    }

    #[test]
    fn terminal_statuses() {
        assert!(TicketStatus::Resolved.is_terminal());
        assert!(TicketStatus::Closed.is_terminal());
        assert!(!TicketStatus::Open.is_terminal());
        assert!(!TicketStatus::InProgress.is_terminal());
    }

    #[test]
    fn filters_to_query_skips_unset() {
        let filters = TicketFilters {
            status: Some(TicketStatus::Open),
            page: Some(2),
            ..Default::default()
        };
        assert_eq!(
            filters.to_query(),
            vec![
                ("status".to_owned(), "open".to_owned()),
                ("page".to_owned(), "2".to_owned()),
            ]
        );
        assert!(TicketFilters::default().to_query().is_empty());
    }

    #[test]
    fn update_payload_omits_unset_fields() {
        let update = UpdateTicketData {
            status: Some(TicketStatus::Resolved),
            ..Default::default()
        };
        let value = serde_json::to_value(&update).unwrap();
        assert_eq!(value, serde_json::json!({ "status": "resolved" }));
    }

    #[test]
    fn activity_type_field_renamed() {
        let raw = serde_json::json!({
            "id": "a-1",
            "ticketId": "t-1",
            "type": "status_change",
            "content": "open -> in_progress",
            "userId": "u-1",
            "userName": "Agent",
            "createdAt": "2024-03-01T10:00:00Z"
        });
        let activity: TicketActivity = serde_json::from_value(raw).unwrap();
        assert_eq!(activity.activity_type, TicketActivityType::StatusChange);
    }
}
