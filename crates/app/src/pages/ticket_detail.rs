//! Ticket detail: the ticket itself, its activity feed, a comment form,
//! and (for agents and admins) the AI suggestion panel and triage controls.

use leptos::*;
use leptos_router::use_params_map;

use ticketflow_core::{
    Ticket, TicketActivityType, TicketPriority, TicketStatus, UpdateTicketData, UserRole,
};

use crate::components::ai_panel::AiSuggestionPanel;
use crate::components::display::{PriorityBadge, QueryView, StatusBadge, format_timestamp};
use crate::context::use_app;
use crate::hooks::{use_add_comment, use_delete_ticket, use_ticket, use_ticket_activities, use_update_ticket};

#[component]
pub fn TicketDetailPage() -> impl IntoView {
    let params = use_params_map();
    let id = Signal::derive(move || params.get().get("id").cloned().unwrap_or_default());

    let ctx = use_app();
    let ticket = use_ticket(id);
    let activities = use_ticket_activities(id);
    let update = use_update_ticket();
    let delete = use_delete_ticket();
    let add_comment = use_add_comment();

    // Comments and reviewed suggestions land on the feed; re-read it when a
    // write completes.
    create_effect(move |_| {
        add_comment.version().get();
        update.version().get();
        activities.refetch();
    });
    // Status/priority writes refresh the ticket header.
    create_effect(move |_| {
        update.version().get();
        ticket.refetch();
    });

    let can_triage = ctx.has_role(&[UserRole::Admin, UserRole::Agent]);
    let can_delete = ctx.has_role(&[UserRole::Admin]);

    let comment = create_rw_signal(String::new());
    let submit_comment = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let content = comment.get_untracked().trim().to_owned();
        if content.is_empty() {
            return;
        }
        add_comment.dispatch((id.get_untracked(), content));
        comment.set(String::new());
    };

    view! {
        <div class="ticket-detail-page">
            {move || view! {
                <QueryView
                    result=ticket.get()
                    ready=move |ticket: Ticket| {
                        let header = ticket.clone();
                        view! {
                            <TicketHeader ticket=header/>
                            {can_triage.then(|| {
                                let triage_ticket = ticket.clone();
                                view! {
                                    <TriageControls
                                        ticket=triage_ticket
                                        on_update=move |data| {
                                            update.dispatch((id.get_untracked(), data));
                                        }
                                    />
                                }
                            })}
                            {can_delete.then(|| view! {
                                <button
                                    class="delete-ticket"
                                    disabled=move || delete.pending().get()
                                    on:click=move |_| delete.dispatch(id.get_untracked())
                                >
                                    "Delete ticket"
                                </button>
                            })}
                            {can_triage.then(|| {
                                let panel_ticket = ticket.clone();
                                view! {
                                    <AiSuggestionPanel ticket=Signal::derive(move || {
                                        panel_ticket.clone()
                                    })/>
                                }
                            })}
                        }
                    }
                />
            }}

            <section class="activity-feed">
                <h2>"Activity"</h2>
                {move || view! {
                    <QueryView
                        result=activities.get()
                        ready=|feed| view! {
                            <ul>
                                {feed
                                    .into_iter()
                                    .map(|activity| {
                                        let kind = match activity.activity_type {
                                            TicketActivityType::StatusChange => "activity status",
                                            TicketActivityType::Comment => "activity comment",
                                            TicketActivityType::Assignment => "activity assignment",
                                            TicketActivityType::AiSuggestion => "activity ai",
                                        };
                                        view! {
                                            <li class=kind>
                                                <span class="activity-author">
                                                    {activity.user_name.clone()}
                                                </span>
                                                <span class="activity-content">
                                                    {activity.content.clone()}
                                                </span>
                                                <time>{format_timestamp(activity.created_at)}</time>
                                            </li>
                                        }
                                    })
                                    .collect_view()}
                            </ul>
                        }
                    />
                }}

                <form class="comment-form" on:submit=submit_comment>
                    <textarea
                        rows="3"
                        placeholder="Add a comment"
                        prop:value=move || comment.get()
                        on:input=move |ev| comment.set(event_target_value(&ev))
                    ></textarea>
                    <button type="submit" disabled=move || add_comment.pending().get()>
                        "Comment"
                    </button>
                </form>
            </section>
        </div>
    }
}

#[component]
fn TicketHeader(ticket: Ticket) -> impl IntoView {
    view! {
        <header class="ticket-header">
            <h1>{ticket.title.clone()}</h1>
            <div class="ticket-meta">
                <StatusBadge status=ticket.status/>
                <PriorityBadge priority=ticket.priority/>
                <span>{format!("Opened by {}", ticket.user_name)}</span>
                <time>{format_timestamp(ticket.created_at)}</time>
            </div>
            <p class="ticket-description">{ticket.description.clone()}</p>
        </header>
    }
}

#[component]
fn TriageControls<F>(ticket: Ticket, on_update: F) -> impl IntoView
where
    F: Fn(UpdateTicketData) + Copy + 'static,
{
    let status = ticket.status;
    let priority = ticket.priority;
    view! {
        <div class="triage-controls">
            <label>
                "Status"
                <select on:change=move |ev| {
                    if let Some(next) = TicketStatus::parse(&event_target_value(&ev)) {
                        if next != status {
                            on_update(UpdateTicketData {
                                status: Some(next),
                                ..Default::default()
                            });
                        }
                    }
                }>
                    <StatusOption value=TicketStatus::Open current=status label="Open"/>
                    <StatusOption value=TicketStatus::InProgress current=status label="In Progress"/>
                    <StatusOption value=TicketStatus::Resolved current=status label="Resolved"/>
                    <StatusOption value=TicketStatus::Closed current=status label="Closed"/>
                </select>
            </label>
            <label>
                "Priority"
                <select on:change=move |ev| {
                    if let Some(next) = TicketPriority::parse(&event_target_value(&ev)) {
                        if next != priority {
                            on_update(UpdateTicketData {
                                priority: Some(next),
                                ..Default::default()
                            });
                        }
                    }
                }>
                    <PriorityOption value=TicketPriority::Low current=priority label="Low"/>
                    <PriorityOption value=TicketPriority::Medium current=priority label="Medium"/>
                    <PriorityOption value=TicketPriority::High current=priority label="High"/>
                    <PriorityOption value=TicketPriority::Urgent current=priority label="Urgent"/>
                </select>
            </label>
        </div>
    }
}

#[component]
fn StatusOption(value: TicketStatus, current: TicketStatus, label: &'static str) -> impl IntoView {
    view! {
        <option value=value.as_str() selected=value == current>{label}</option>
    }
}

#[component]
fn PriorityOption(
    value: TicketPriority,
    current: TicketPriority,
    label: &'static str,
) -> impl IntoView {
    view! {
        <option value=value.as_str() selected=value == current>{label}</option>
    }
}
