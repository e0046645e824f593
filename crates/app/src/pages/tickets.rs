//! Ticket list with filters and pagination.

use leptos::*;
use leptos_router::A;

use ticketflow_core::{TicketFilters, TicketPriority, TicketStatus};

use crate::components::display::{PriorityBadge, QueryView, StatusBadge, format_timestamp};
use crate::hooks::use_tickets;
use crate::routes;

const PAGE_SIZE: u32 = 10;

#[component]
pub fn TicketListPage() -> impl IntoView {
    let filters = create_rw_signal(TicketFilters {
        page: Some(1),
        limit: Some(PAGE_SIZE),
        ..Default::default()
    });
    let tickets = use_tickets(filters);

    // Filter edits reset to the first page.
    let set_status = move |value: String| {
        filters.update(|f| {
            f.status = TicketStatus::parse(&value);
            f.page = Some(1);
        });
    };
    let set_priority = move |value: String| {
        filters.update(|f| {
            f.priority = TicketPriority::parse(&value);
            f.page = Some(1);
        });
    };
    let set_search = move |value: String| {
        filters.update(|f| {
            f.search = (!value.trim().is_empty()).then(|| value.trim().to_owned());
            f.page = Some(1);
        });
    };
    let go_to_page = move |page: u32| {
        filters.update(|f| f.page = Some(page));
    };

    view! {
        <div class="ticket-list-page">
            <header class="page-header">
                <h1>"Tickets"</h1>
                <A href=routes::TICKET_NEW class="button-primary">"New ticket"</A>
            </header>

            <div class="filters">
                <input
                    type="search"
                    placeholder="Search tickets"
                    on:input=move |ev| set_search(event_target_value(&ev))
                />
                <select on:change=move |ev| set_status(event_target_value(&ev))>
                    <option value="">"All statuses"</option>
                    <option value="open">"Open"</option>
                    <option value="in_progress">"In Progress"</option>
                    <option value="resolved">"Resolved"</option>
                    <option value="closed">"Closed"</option>
                </select>
                <select on:change=move |ev| set_priority(event_target_value(&ev))>
                    <option value="">"All priorities"</option>
                    <option value="low">"Low"</option>
                    <option value="medium">"Medium"</option>
                    <option value="high">"High"</option>
                    <option value="urgent">"Urgent"</option>
                </select>
            </div>

            {move || view! {
                <QueryView
                    result=tickets.get()
                    ready=move |page| {
                        let current = page.page;
                        let total_pages = page.total_pages;
                        view! {
                            {if page.data.is_empty() {
                                view! { <p class="empty">"No tickets match these filters."</p> }
                                    .into_view()
                            } else {
                                view! {
                                    <table class="ticket-table">
                                        <thead>
                                            <tr>
                                                <th>"Title"</th>
                                                <th>"Status"</th>
                                                <th>"Priority"</th>
                                                <th>"Requester"</th>
                                                <th>"Updated"</th>
                                            </tr>
                                        </thead>
                                        <tbody>
                                            {page
                                                .data
                                                .iter()
                                                .map(|ticket| {
                                                    view! {
                                                        <tr>
                                                            <td>
                                                                <A href=routes::ticket_detail(&ticket.id)>
                                                                    {ticket.title.clone()}
                                                                </A>
                                                            </td>
                                                            <td><StatusBadge status=ticket.status/></td>
                                                            <td><PriorityBadge priority=ticket.priority/></td>
                                                            <td>{ticket.user_name.clone()}</td>
                                                            <td>{format_timestamp(ticket.updated_at)}</td>
                                                        </tr>
                                                    }
                                                })
                                                .collect_view()}
                                        </tbody>
                                    </table>
                                }
                                .into_view()
                            }}
                            <Pagination current total_pages on_page=go_to_page/>
                        }
                    }
                />
            }}
        </div>
    }
}

#[component]
fn Pagination<F>(current: u32, total_pages: u32, on_page: F) -> impl IntoView
where
    F: Fn(u32) + Copy + 'static,
{
    (total_pages > 1).then(|| {
        view! {
            <div class="pagination">
                <button
                    disabled=current <= 1
                    on:click=move |_| on_page(current - 1)
                >
                    "Previous"
                </button>
                <span>{format!("Page {current} of {total_pages}")}</span>
                <button
                    disabled=current >= total_pages
                    on:click=move |_| on_page(current + 1)
                >
                    "Next"
                </button>
            </div>
        }
    })
}
