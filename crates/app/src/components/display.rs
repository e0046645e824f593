//! Small display helpers shared across pages.

use chrono::{DateTime, Utc};
use leptos::*;

use ticketflow_core::{AiSuggestionStatus, ConfidenceLevel, TicketPriority, TicketStatus};

pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.format("%b %e, %Y %H:%M").to_string()
}

pub fn status_label(status: TicketStatus) -> &'static str {
    match status {
        TicketStatus::Open => "Open",
        TicketStatus::InProgress => "In Progress",
        TicketStatus::Resolved => "Resolved",
        TicketStatus::Closed => "Closed",
    }
}

pub fn priority_label(priority: TicketPriority) -> &'static str {
    match priority {
        TicketPriority::Low => "Low",
        TicketPriority::Medium => "Medium",
        TicketPriority::High => "High",
        TicketPriority::Urgent => "Urgent",
    }
}

#[component]
pub fn StatusBadge(status: TicketStatus) -> impl IntoView {
    let class = match status {
        TicketStatus::Open => "badge status-open",
        TicketStatus::InProgress => "badge status-in-progress",
        TicketStatus::Resolved => "badge status-resolved",
        TicketStatus::Closed => "badge status-closed",
    };
    view! { <span class=class>{status_label(status)}</span> }
}

#[component]
pub fn PriorityBadge(priority: TicketPriority) -> impl IntoView {
    let class = match priority {
        TicketPriority::Low => "badge priority-low",
        TicketPriority::Medium => "badge priority-medium",
        TicketPriority::High => "badge priority-high",
        TicketPriority::Urgent => "badge priority-urgent",
    };
    view! { <span class=class>{priority_label(priority)}</span> }
}

#[component]
pub fn SuggestionStatusBadge(status: AiSuggestionStatus) -> impl IntoView {
    let (class, label) = match status {
        AiSuggestionStatus::Draft => ("badge suggestion-draft", "Draft"),
        AiSuggestionStatus::Approved => ("badge suggestion-approved", "Approved"),
        AiSuggestionStatus::Rejected => ("badge suggestion-rejected", "Rejected"),
    };
    view! { <span class=class>{label}</span> }
}

#[component]
pub fn ConfidenceBadge(confidence: Option<ConfidenceLevel>) -> impl IntoView {
    confidence.map(|level| {
        let (class, label) = match level {
            ConfidenceLevel::High => ("badge confidence-high", "High confidence"),
            ConfidenceLevel::Medium => ("badge confidence-medium", "Medium confidence"),
            ConfidenceLevel::Low => ("badge confidence-low", "Low confidence"),
        };
        view! { <span class=class>{label}</span> }
    })
}

/// Standard loading / error / ready switch for resource-backed views.
#[component]
pub fn QueryView<T, VF, V>(
    result: Option<Result<T, ticketflow_core::ApiError>>,
    ready: VF,
) -> impl IntoView
where
    T: Clone + 'static,
    VF: Fn(T) -> V + 'static,
    V: IntoView,
{
    match result {
        None => view! { <p class="loading">"Loading…"</p> }.into_view(),
        Some(Err(err)) => {
            view! { <p class="error">{format!("Something went wrong: {}", err.message)}</p> }
                .into_view()
        }
        Some(Ok(value)) => ready(value).into_view(),
    }
}
