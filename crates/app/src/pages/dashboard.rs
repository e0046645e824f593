//! Dashboard: headline counters plus the most recent tickets.

use leptos::*;
use leptos_router::A;

use ticketflow_core::TicketFilters;

use crate::components::display::{QueryView, StatusBadge, format_timestamp};
use crate::context::use_app;
use crate::hooks::{use_dashboard_metrics, use_tickets};
use crate::routes;

#[component]
pub fn DashboardPage() -> impl IntoView {
    let ctx = use_app();
    let metrics = use_dashboard_metrics();
    let recent_filters = create_rw_signal(TicketFilters {
        limit: Some(5),
        page: Some(1),
        ..Default::default()
    });
    let recent = use_tickets(recent_filters);

    view! {
        <div class="dashboard">
            <h1>
                {move || {
                    ctx.user()
                        .get()
                        .map(|user| format!("Welcome back, {}", user.name))
                        .unwrap_or_else(|| "Welcome back".to_owned())
                }}
            </h1>

            {move || view! {
                <QueryView
                    result=metrics.get()
                    ready=|m| view! {
                        <div class="metric-grid">
                            <MetricCard label="Total tickets" value=m.total_tickets/>
                            <MetricCard label="Open tickets" value=m.open_tickets/>
                            <MetricCard label="Resolved tickets" value=m.resolved_tickets/>
                            <MetricCard label="AI suggestions" value=m.ai_suggestions_generated/>
                        </div>
                    }
                />
            }}

            <section class="recent-tickets">
                <header>
                    <h2>"Recent tickets"</h2>
                    <A href=routes::TICKETS>"View all"</A>
                </header>
                {move || view! {
                    <QueryView
                        result=recent.get()
                        ready=|page| view! {
                            <ul class="ticket-summaries">
                                {page
                                    .data
                                    .into_iter()
                                    .map(|ticket| {
                                        view! {
                                            <li>
                                                <A href=routes::ticket_detail(&ticket.id)>
                                                    {ticket.title.clone()}
                                                </A>
                                                <StatusBadge status=ticket.status/>
                                                <time>{format_timestamp(ticket.updated_at)}</time>
                                            </li>
                                        }
                                    })
                                    .collect_view()}
                            </ul>
                        }
                    />
                }}
            </section>
        </div>
    }
}

#[component]
fn MetricCard(label: &'static str, value: u64) -> impl IntoView {
    view! {
        <div class="metric-card">
            <span class="metric-value">{value.to_string()}</span>
            <span class="metric-label">{label}</span>
        </div>
    }
}
