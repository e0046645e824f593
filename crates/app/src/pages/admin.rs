//! Admin surface: overview, user management, activity logs.

use leptos::*;
use leptos_router::A;
use serde_json::Value;

use ticketflow_core::{User, UserRole, UserStatus};

use crate::components::display::{QueryView, format_timestamp};
use crate::hooks::{use_log_stats, use_logs, use_update_user_role, use_update_user_status, use_users};
use crate::routes;

#[component]
pub fn AdminOverviewPage() -> impl IntoView {
    // Aggregate log counters are backend-defined, so the card list renders
    // whatever numeric fields come back.
    let stats = use_log_stats();

    view! {
        <div class="admin-page">
            <h1>"Administration"</h1>
            <nav class="admin-nav">
                <A href=routes::ADMIN_USERS>"Manage users"</A>
                <A href=routes::ADMIN_LOGS>"Activity logs"</A>
            </nav>
            {move || view! {
                <QueryView
                    result=stats.get()
                    ready=|stats: Value| {
                        let cards = stats
                            .as_object()
                            .map(|map| {
                                map.iter()
                                    .filter_map(|(name, value)| {
                                        value.as_u64().map(|n| (name.clone(), n))
                                    })
                                    .collect::<Vec<_>>()
                            })
                            .unwrap_or_default();
                        view! {
                            <div class="metric-grid">
                                {cards
                                    .into_iter()
                                    .map(|(name, value)| {
                                        view! {
                                            <div class="metric-card">
                                                <span class="metric-value">{value.to_string()}</span>
                                                <span class="metric-label">{name}</span>
                                            </div>
                                        }
                                    })
                                    .collect_view()}
                            </div>
                        }
                    }
                />
            }}
        </div>
    }
}

#[component]
pub fn AdminUsersPage() -> impl IntoView {
    let page = create_rw_signal(1u32);
    let users = use_users(page);
    let update_role = use_update_user_role();
    let update_status = use_update_user_status();

    // Role/status writes invalidate the user pages; re-read after each.
    create_effect(move |_| {
        update_role.version().get();
        update_status.version().get();
        users.refetch();
    });

    view! {
        <div class="admin-page">
            <h1>"Users"</h1>
            {move || view! {
                <QueryView
                    result=users.get()
                    ready=move |list| {
                        let current = list.page;
                        let total_pages = list.total_pages;
                        view! {
                            <table class="user-table">
                                <thead>
                                    <tr>
                                        <th>"Name"</th>
                                        <th>"Email"</th>
                                        <th>"Role"</th>
                                        <th>"Status"</th>
                                        <th>"Joined"</th>
                                    </tr>
                                </thead>
                                <tbody>
                                    {list
                                        .data
                                        .iter()
                                        .cloned()
                                        .map(|user| view! {
                                            <UserRow
                                                user
                                                on_role=move |id, role| {
                                                    update_role.dispatch((id, role));
                                                }
                                                on_status=move |id, active| {
                                                    update_status.dispatch((id, active));
                                                }
                                            />
                                        })
                                        .collect_view()}
                                </tbody>
                            </table>
                            {(total_pages > 1).then(|| view! {
                                <div class="pagination">
                                    <button
                                        disabled=current <= 1
                                        on:click=move |_| page.set(current - 1)
                                    >
                                        "Previous"
                                    </button>
                                    <span>{format!("Page {current} of {total_pages}")}</span>
                                    <button
                                        disabled=current >= total_pages
                                        on:click=move |_| page.set(current + 1)
                                    >
                                        "Next"
                                    </button>
                                </div>
                            })}
                        }
                    }
                />
            }}
        </div>
    }
}

#[component]
fn UserRow<R, S>(user: User, on_role: R, on_status: S) -> impl IntoView
where
    R: Fn(String, UserRole) + Copy + 'static,
    S: Fn(String, bool) + Copy + 'static,
{
    let role = user.role;
    let is_active = user.status == UserStatus::Active;
    let role_id = user.id.clone();
    let status_id = user.id.clone();

    view! {
        <tr>
            <td>{user.name.clone()}</td>
            <td>{user.email.clone()}</td>
            <td>
                <select on:change=move |ev| {
                    if let Some(next) = UserRole::parse(&event_target_value(&ev)) {
                        if next != role {
                            on_role(role_id.clone(), next);
                        }
                    }
                }>
                    <option value="user" selected=role == UserRole::User>"User"</option>
                    <option value="agent" selected=role == UserRole::Agent>"Agent"</option>
                    <option value="admin" selected=role == UserRole::Admin>"Admin"</option>
                </select>
            </td>
            <td>
                <button
                    class=if is_active { "status-active" } else { "status-inactive" }
                    on:click=move |_| on_status(status_id.clone(), !is_active)
                >
                    {if is_active { "Deactivate" } else { "Activate" }}
                </button>
            </td>
            <td>{format_timestamp(user.created_at)}</td>
        </tr>
    }
}

#[component]
pub fn AdminLogsPage() -> impl IntoView {
    let page = create_rw_signal(1u32);
    let logs = use_logs(page);

    view! {
        <div class="admin-page">
            <h1>"Activity logs"</h1>
            {move || view! {
                <QueryView
                    result=logs.get()
                    ready=move |list| {
                        let current = list.page;
                        let total_pages = list.total_pages;
                        view! {
                            <table class="log-table">
                                <thead>
                                    <tr>
                                        <th>"When"</th>
                                        <th>"User"</th>
                                        <th>"Action"</th>
                                        <th>"Resource"</th>
                                        <th>"IP"</th>
                                    </tr>
                                </thead>
                                <tbody>
                                    {list
                                        .data
                                        .iter()
                                        .map(|log| view! {
                                            <tr>
                                                <td>{format_timestamp(log.created_at)}</td>
                                                <td>{log.user_name.clone()}</td>
                                                <td>{log.action.clone()}</td>
                                                <td>{log.resource.clone().unwrap_or_default()}</td>
                                                <td>{log.ip_address.clone().unwrap_or_default()}</td>
                                            </tr>
                                        })
                                        .collect_view()}
                                </tbody>
                            </table>
                            {(total_pages > 1).then(|| view! {
                                <div class="pagination">
                                    <button
                                        disabled=current <= 1
                                        on:click=move |_| page.set(current - 1)
                                    >
                                        "Previous"
                                    </button>
                                    <span>{format!("Page {current} of {total_pages}")}</span>
                                    <button
                                        disabled=current >= total_pages
                                        on:click=move |_| page.set(current + 1)
                                    >
                                        "Next"
                                    </button>
                                </div>
                            })}
                        }
                    }
                />
            }}
        </div>
    }
}
