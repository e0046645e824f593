//! AI reply-suggestion DTOs.
//!
//! A suggestion is created by a generate call and mutated only by a single
//! review call (approve/reject). The client keeps at most a list per
//! ticket, newest first by insertion.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ticket::TicketStatus;

/// Review state of a suggestion. `Approved` and `Rejected` are terminal
/// per suggestion; a fresh generate call may still produce a new one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AiSuggestionStatus {
    Draft,
    Approved,
    Rejected,
}

/// Model-reported confidence band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceLevel {
    High,
    Medium,
    Low,
}

/// An AI-generated reply suggestion for a ticket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiSuggestion {
    pub id: String,
    pub ticket_id: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<ConfidenceLevel>,
    pub status: AiSuggestionStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edited_content: Option<String>,
}

/// Request body for generating a suggestion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateSuggestionRequest {
    pub ticket_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

/// Request body for approving or rejecting a suggestion. On approval with
/// local edits, `edited_content` carries the text actually sent to the
/// requester.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewSuggestionRequest {
    pub status: AiSuggestionStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edited_content: Option<String>,
}

/// Aggregate suggestion statistics for the admin/insights surfaces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiStats {
    pub total_suggestions: u64,
    pub approved_suggestions: u64,
    pub rejected_suggestions: u64,
    pub average_confidence: f64,
    pub suggestions_today: u64,
}

/// Whether suggestion generation is available for a ticket.
///
/// Generation is disabled once a ticket is resolved or closed; there is
/// nothing left to reply to.
pub fn can_generate(ticket_status: TicketStatus) -> bool {
    !ticket_status.is_terminal()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generation_gated_by_ticket_status() {
        assert!(can_generate(TicketStatus::Open));
        assert!(can_generate(TicketStatus::InProgress));
        assert!(!can_generate(TicketStatus::Resolved));
        assert!(!can_generate(TicketStatus::Closed));
    }

    #[test]
    fn review_request_omits_absent_edit() {
        let plain = ReviewSuggestionRequest {
            status: AiSuggestionStatus::Rejected,
            edited_content: None,
        };
        assert_eq!(
            serde_json::to_value(&plain).unwrap(),
            serde_json::json!({ "status": "rejected" })
        );

        let edited = ReviewSuggestionRequest {
            status: AiSuggestionStatus::Approved,
            edited_content: Some("hand-tuned reply".to_owned()),
        };
        assert_eq!(
            serde_json::to_value(&edited).unwrap(),
            serde_json::json!({ "status": "approved", "editedContent": "hand-tuned reply" })
        );
    }
}
