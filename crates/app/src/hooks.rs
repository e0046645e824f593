//! Reactive bindings between components and the lower crates.
//!
//! Reads are `create_resource`s that go through the query cache; writes are
//! `create_action`s that go through [`QueryCache::mutate_as`] so the
//! invalidation rules in [`ticketflow_query::keys`] apply uniformly. Pages
//! never call [`ticketflow_client::api`] directly.

use leptos::*;
use leptos_router::use_navigate;
use serde_json::Value;

use ticketflow_client::api;
use ticketflow_core::{
    AiStats, AiSuggestion, AiSuggestionStatus, ApiError, CreateTicketData, DashboardMetrics,
    GenerateSuggestionRequest, LoginCredentials, Paginated, RegisterData, ReviewSuggestionRequest,
    Ticket, TicketActivity, TicketFilters, TicketStatus, UpdateTicketData, User, UserRole,
};
use ticketflow_core::ActivityLog;
use ticketflow_query::{MutationOptions, QueryCache, QueryKey, QueryOptions, keys};

use crate::context::use_app;
use crate::routes;

pub const USERS_PAGE_SIZE: u32 = 10;
pub const LOGS_PAGE_SIZE: u32 = 20;

fn encode<T: serde::Serialize>(value: &T) -> Result<Value, ApiError> {
    serde_json::to_value(value).map_err(|err| ApiError::decode(err.to_string()))
}

// ---------------------------------------------------------------------------
// Reads

pub fn use_tickets(
    filters: RwSignal<TicketFilters>,
) -> Resource<TicketFilters, Result<Paginated<Ticket>, ApiError>> {
    let ctx = use_app();
    create_resource(
        move || filters.get(),
        move |filters| {
            let ctx = ctx.clone();
            async move {
                let client = ctx.client.clone();
                let fetch_filters = filters.clone();
                ctx.cache
                    .read_as(
                        keys::tickets_all(&filters),
                        move || {
                            let client = client.clone();
                            let filters = fetch_filters.clone();
                            async move { encode(&api::tickets::list(&client, &filters).await?) }
                        },
                        QueryOptions::default(),
                    )
                    .await
            }
        },
    )
}

pub fn use_ticket(id: Signal<String>) -> Resource<String, Result<Ticket, ApiError>> {
    let ctx = use_app();
    create_resource(
        move || id.get(),
        move |id| {
            let ctx = ctx.clone();
            async move {
                let client = ctx.client.clone();
                let fetch_id = id.clone();
                ctx.cache
                    .read_as(
                        keys::ticket_detail(&id),
                        move || {
                            let client = client.clone();
                            let id = fetch_id.clone();
                            async move { encode(&api::tickets::get(&client, &id).await?) }
                        },
                        QueryOptions::default(),
                    )
                    .await
            }
        },
    )
}

pub fn use_ticket_activities(
    id: Signal<String>,
) -> Resource<String, Result<Vec<TicketActivity>, ApiError>> {
    let ctx = use_app();
    create_resource(
        move || id.get(),
        move |id| {
            let ctx = ctx.clone();
            async move {
                let client = ctx.client.clone();
                let fetch_id = id.clone();
                ctx.cache
                    .read_as(
                        keys::ticket_activities(&id),
                        move || {
                            let client = client.clone();
                            let id = fetch_id.clone();
                            async move { encode(&api::tickets::activities(&client, &id).await?) }
                        },
                        QueryOptions::default(),
                    )
                    .await
            }
        },
    )
}

pub fn use_ai_suggestions(
    ticket_id: Signal<String>,
) -> Resource<String, Result<Vec<AiSuggestion>, ApiError>> {
    let ctx = use_app();
    create_resource(
        move || ticket_id.get(),
        move |ticket_id| {
            let ctx = ctx.clone();
            async move {
                let client = ctx.client.clone();
                let fetch_id = ticket_id.clone();
                ctx.cache
                    .read_as(
                        keys::ai_suggestions(&ticket_id),
                        move || {
                            let client = client.clone();
                            let id = fetch_id.clone();
                            async move { encode(&api::ai::suggestions(&client, &id).await?) }
                        },
                        QueryOptions::default(),
                    )
                    .await
            }
        },
    )
}

pub fn use_ai_stats() -> Resource<(), Result<AiStats, ApiError>> {
    let ctx = use_app();
    create_resource(
        || (),
        move |_| {
            let ctx = ctx.clone();
            async move {
                let client = ctx.client.clone();
                ctx.cache
                    .read_as(
                        keys::ai_stats(),
                        move || {
                            let client = client.clone();
                            async move { encode(&api::ai::stats(&client).await?) }
                        },
                        QueryOptions::default(),
                    )
                    .await
            }
        },
    )
}

pub fn use_users(page: RwSignal<u32>) -> Resource<u32, Result<Paginated<User>, ApiError>> {
    let ctx = use_app();
    create_resource(
        move || page.get(),
        move |page| {
            let ctx = ctx.clone();
            async move {
                let client = ctx.client.clone();
                ctx.cache
                    .read_as(
                        keys::users(page, USERS_PAGE_SIZE),
                        move || {
                            let client = client.clone();
                            async move {
                                encode(&api::users::list(&client, page, USERS_PAGE_SIZE).await?)
                            }
                        },
                        QueryOptions::default(),
                    )
                    .await
            }
        },
    )
}

pub fn use_logs(page: RwSignal<u32>) -> Resource<u32, Result<Paginated<ActivityLog>, ApiError>> {
    let ctx = use_app();
    create_resource(
        move || page.get(),
        move |page| {
            let ctx = ctx.clone();
            async move {
                let client = ctx.client.clone();
                ctx.cache
                    .read_as(
                        keys::logs(page, LOGS_PAGE_SIZE),
                        move || {
                            let client = client.clone();
                            async move {
                                encode(&api::logs::list(&client, page, LOGS_PAGE_SIZE).await?)
                            }
                        },
                        QueryOptions::default(),
                    )
                    .await
            }
        },
    )
}

/// Aggregate log counters; the shape is backend-defined and stays untyped.
pub fn use_log_stats() -> Resource<(), Result<Value, ApiError>> {
    let ctx = use_app();
    create_resource(
        || (),
        move |_| {
            let ctx = ctx.clone();
            async move {
                let client = ctx.client.clone();
                ctx.cache
                    .read_as(
                        keys::log_stats(),
                        move || {
                            let client = client.clone();
                            async move { api::logs::stats(&client).await }
                        },
                        QueryOptions::default(),
                    )
                    .await
            }
        },
    )
}

/// Dashboard counters. There is no dedicated backend endpoint; the metrics
/// are derived from the first ticket page plus the AI stats, cached under
/// their own key so the dashboard does not refetch on every visit.
pub fn use_dashboard_metrics() -> Resource<(), Result<DashboardMetrics, ApiError>> {
    let ctx = use_app();
    create_resource(
        || (),
        move |_| {
            let ctx = ctx.clone();
            async move {
                let role = ctx
                    .user()
                    .get_untracked()
                    .map(|user| user.role)
                    .unwrap_or(UserRole::User);
                let client = ctx.client.clone();
                ctx.cache
                    .read_as(
                        keys::dashboard_metrics(role),
                        move || {
                            let client = client.clone();
                            async move {
                                let filters = TicketFilters {
                                    limit: Some(100),
                                    ..Default::default()
                                };
                                let tickets = api::tickets::list(&client, &filters).await?;
                                // AI stats are admin/agent-only; plain users
                                // just see a zero.
                                let ai = api::ai::stats(&client).await.ok();
                                encode(&derive_metrics(&tickets, ai.as_ref()))
                            }
                        },
                        QueryOptions::default(),
                    )
                    .await
            }
        },
    )
}

fn derive_metrics(tickets: &Paginated<Ticket>, ai: Option<&AiStats>) -> DashboardMetrics {
    let open = tickets
        .data
        .iter()
        .filter(|t| matches!(t.status, TicketStatus::Open | TicketStatus::InProgress))
        .count() as u64;
    let resolved = tickets
        .data
        .iter()
        .filter(|t| t.status == TicketStatus::Resolved)
        .count() as u64;
    DashboardMetrics {
        total_tickets: tickets.total,
        open_tickets: open,
        resolved_tickets: resolved,
        ai_suggestions_generated: ai.map(|s| s.total_suggestions).unwrap_or(0),
        open_tickets_percentage: (tickets.total > 0)
            .then(|| open as f64 * 100.0 / tickets.total as f64),
        resolved_comparison: None,
    }
}

/// Revalidate a persisted session against the server on startup.
///
/// The profile may have changed since the session was stored (name edits,
/// role changes by an admin), so the fresh copy replaces both the store and
/// the reactive mirror. A stale token surfaces as a 401, which the client
/// interceptor turns into a sign-out redirect on its own.
pub fn use_session_refresh() {
    let ctx = use_app();
    if !ctx.is_authenticated() {
        return;
    }
    spawn_local(async move {
        let client = ctx.client.clone();
        let result: Result<User, ApiError> = ctx
            .cache
            .read_as(
                keys::auth_me(),
                move || {
                    let client = client.clone();
                    async move { encode(&api::auth::me(&client).await?) }
                },
                QueryOptions::default(),
            )
            .await;
        if let Ok(user) = result {
            ctx.session.update_user(|stored| *stored = user.clone());
            ctx.user().set(Some(user));
        }
    });
}

// ---------------------------------------------------------------------------
// Writes

pub fn use_login() -> Action<LoginCredentials, Result<User, ApiError>> {
    let ctx = use_app();
    let navigate = use_navigate();
    create_action(move |credentials: &LoginCredentials| {
        let ctx = ctx.clone();
        let navigate = navigate.clone();
        let credentials = credentials.clone();
        async move {
            match api::auth::login(&ctx.client, &credentials).await {
                Ok(auth) => {
                    ctx.sign_in(auth.user.clone(), auth.access_token);
                    ctx.toasts
                        .success(format!("Welcome back, {}", auth.user.name));
                    navigate(routes::DASHBOARD, Default::default());
                    Ok(auth.user)
                }
                Err(err) => {
                    ctx.toasts.error(err.message.clone());
                    Err(err)
                }
            }
        }
    })
}

pub fn use_register() -> Action<RegisterData, Result<User, ApiError>> {
    let ctx = use_app();
    let navigate = use_navigate();
    create_action(move |data: &RegisterData| {
        let ctx = ctx.clone();
        let navigate = navigate.clone();
        let data = data.clone();
        async move {
            match api::auth::register(&ctx.client, &data).await {
                Ok(auth) => {
                    ctx.sign_in(auth.user.clone(), auth.access_token);
                    ctx.toasts.success("Account created");
                    navigate(routes::DASHBOARD, Default::default());
                    Ok(auth.user)
                }
                Err(err) => {
                    ctx.toasts.error(err.message.clone());
                    Err(err)
                }
            }
        }
    })
}

/// Local state is dropped regardless of whether the server call lands.
pub fn use_logout() -> Action<(), ()> {
    let ctx = use_app();
    let navigate = use_navigate();
    create_action(move |_: &()| {
        let ctx = ctx.clone();
        let navigate = navigate.clone();
        async move {
            if let Err(err) = api::auth::logout(&ctx.client).await {
                tracing::debug!(%err, "server-side logout failed");
            }
            ctx.sign_out();
            navigate(routes::LOGIN, Default::default());
        }
    })
}

pub fn use_create_ticket() -> Action<CreateTicketData, Result<Ticket, ApiError>> {
    let ctx = use_app();
    let navigate = use_navigate();
    create_action(move |data: &CreateTicketData| {
        let ctx = ctx.clone();
        let navigate = navigate.clone();
        let data = data.clone();
        async move {
            let client = ctx.client.clone();
            let payload = data.clone();
            let result: Result<Ticket, ApiError> = ctx
                .cache
                .mutate_as(
                    move || {
                        let client = client.clone();
                        let data = payload.clone();
                        async move { encode(&api::tickets::create(&client, &data).await?) }
                    },
                    MutationOptions::invalidating(vec![keys::tickets_lists()]),
                )
                .await;
            match &result {
                Ok(ticket) => {
                    ctx.cache.set(keys::ticket_detail(&ticket.id), ticket);
                    ctx.toasts.success("Ticket created");
                    navigate(&routes::ticket_detail(&ticket.id), Default::default());
                }
                Err(err) => ctx.toasts.error(err.message.clone()),
            }
            result
        }
    })
}

pub fn use_update_ticket() -> Action<(String, UpdateTicketData), Result<Ticket, ApiError>> {
    let ctx = use_app();
    create_action(move |(id, data): &(String, UpdateTicketData)| {
        let ctx = ctx.clone();
        let id = id.clone();
        let data = data.clone();
        async move {
            let client = ctx.client.clone();
            let ticket_id = id.clone();
            let payload = data.clone();
            let result: Result<Ticket, ApiError> = ctx
                .cache
                .mutate_as(
                    move || {
                        let client = client.clone();
                        let id = ticket_id.clone();
                        let data = payload.clone();
                        async move { encode(&api::tickets::update(&client, &id, &data).await?) }
                    },
                    MutationOptions::invalidating(vec![
                        keys::ticket_detail(&id),
                        keys::tickets_lists(),
                    ]),
                )
                .await;
            match &result {
                Ok(ticket) => {
                    ctx.cache.set(keys::ticket_detail(&ticket.id), ticket);
                    ctx.toasts.success("Ticket updated");
                }
                Err(err) => ctx.toasts.error(err.message.clone()),
            }
            result
        }
    })
}

pub fn use_delete_ticket() -> Action<String, Result<(), ApiError>> {
    let ctx = use_app();
    let navigate = use_navigate();
    create_action(move |id: &String| {
        let ctx = ctx.clone();
        let navigate = navigate.clone();
        let id = id.clone();
        async move {
            let client = ctx.client.clone();
            let ticket_id = id.clone();
            let result = ctx
                .cache
                .mutate(
                    move || {
                        let client = client.clone();
                        let id = ticket_id.clone();
                        async move {
                            api::tickets::delete(&client, &id).await?;
                            Ok(Value::Null)
                        }
                    },
                    MutationOptions::invalidating(vec![keys::tickets()]),
                )
                .await
                .map(|_| ());
            match &result {
                Ok(()) => {
                    ctx.toasts.success("Ticket deleted");
                    navigate(routes::TICKETS, Default::default());
                }
                Err(err) => ctx.toasts.error(err.message.clone()),
            }
            result
        }
    })
}

pub fn use_add_comment() -> Action<(String, String), Result<TicketActivity, ApiError>> {
    let ctx = use_app();
    create_action(move |(id, content): &(String, String)| {
        let ctx = ctx.clone();
        let id = id.clone();
        let content = content.clone();
        async move {
            let client = ctx.client.clone();
            let ticket_id = id.clone();
            let body = content.clone();
            let result: Result<TicketActivity, ApiError> = ctx
                .cache
                .mutate_as(
                    move || {
                        let client = client.clone();
                        let id = ticket_id.clone();
                        let content = body.clone();
                        async move {
                            encode(&api::tickets::add_comment(&client, &id, &content).await?)
                        }
                    },
                    MutationOptions::invalidating(vec![keys::ticket_activities(&id)]),
                )
                .await;
            if let Err(err) = &result {
                ctx.toasts.error(err.message.clone());
            }
            result
        }
    })
}

pub fn use_update_user_role() -> Action<(String, UserRole), Result<User, ApiError>> {
    let ctx = use_app();
    create_action(move |(id, role): &(String, UserRole)| {
        let ctx = ctx.clone();
        let id = id.clone();
        let role = *role;
        async move {
            let client = ctx.client.clone();
            let user_id = id.clone();
            let result: Result<User, ApiError> = ctx
                .cache
                .mutate_as(
                    move || {
                        let client = client.clone();
                        let id = user_id.clone();
                        async move { encode(&api::users::update_role(&client, &id, role).await?) }
                    },
                    MutationOptions::invalidating(vec![keys::users_all()]),
                )
                .await;
            match &result {
                Ok(user) => ctx.toasts.success(format!("{} is now {}", user.name, user.role)),
                Err(err) => ctx.toasts.error(err.message.clone()),
            }
            result
        }
    })
}

pub fn use_update_user_status() -> Action<(String, bool), Result<User, ApiError>> {
    let ctx = use_app();
    create_action(move |(id, is_active): &(String, bool)| {
        let ctx = ctx.clone();
        let id = id.clone();
        let is_active = *is_active;
        async move {
            let client = ctx.client.clone();
            let user_id = id.clone();
            let result: Result<User, ApiError> = ctx
                .cache
                .mutate_as(
                    move || {
                        let client = client.clone();
                        let id = user_id.clone();
                        async move {
                            encode(&api::users::update_status(&client, &id, is_active).await?)
                        }
                    },
                    MutationOptions::invalidating(vec![keys::users_all()]),
                )
                .await;
            match &result {
                Ok(user) => {
                    let state = if is_active { "activated" } else { "deactivated" };
                    ctx.toasts.success(format!("{} {state}", user.name));
                }
                Err(err) => ctx.toasts.error(err.message.clone()),
            }
            result
        }
    })
}

pub fn use_generate_suggestion() -> Action<GenerateSuggestionRequest, Result<AiSuggestion, ApiError>>
{
    let ctx = use_app();
    create_action(move |request: &GenerateSuggestionRequest| {
        let ctx = ctx.clone();
        let request = request.clone();
        async move {
            let client = ctx.client.clone();
            let payload = request.clone();
            let result: Result<AiSuggestion, ApiError> = ctx
                .cache
                .mutate_as(
                    move || {
                        let client = client.clone();
                        let request = payload.clone();
                        async move { encode(&api::ai::generate(&client, &request).await?) }
                    },
                    MutationOptions::invalidating(vec![keys::ai_stats()]),
                )
                .await;
            match &result {
                Ok(suggestion) => {
                    // New drafts land at the top of the per-ticket history.
                    if let Ok(value) = serde_json::to_value(suggestion) {
                        ctx.cache
                            .prepend(keys::ai_suggestions(&request.ticket_id), value);
                    }
                    ctx.toasts.success("Suggestion ready");
                }
                Err(err) => ctx.toasts.error(err.message.clone()),
            }
            result
        }
    })
}

/// Input: `(suggestion_id, ticket_id, request)`.
pub fn use_review_suggestion()
-> Action<(String, String, ReviewSuggestionRequest), Result<AiSuggestion, ApiError>> {
    let ctx = use_app();
    create_action(
        move |(id, ticket_id, request): &(String, String, ReviewSuggestionRequest)| {
            let ctx = ctx.clone();
            let id = id.clone();
            let ticket_id = ticket_id.clone();
            let request = request.clone();
            async move {
                let client = ctx.client.clone();
                let suggestion_id = id.clone();
                let payload = request.clone();
                let result: Result<AiSuggestion, ApiError> = ctx
                    .cache
                    .mutate_as(
                        move || {
                            let client = client.clone();
                            let id = suggestion_id.clone();
                            let request = payload.clone();
                            async move { encode(&api::ai::review(&client, &id, &request).await?) }
                        },
                        MutationOptions::invalidating(vec![
                            keys::ai_stats(),
                            keys::ticket_activities(&ticket_id),
                        ]),
                    )
                    .await;
                match &result {
                    Ok(updated) => {
                        replace_in_cached_list(
                            &ctx.cache,
                            keys::ai_suggestions(&ticket_id),
                            updated,
                        );
                        let verdict = match request.status {
                            AiSuggestionStatus::Approved => "Suggestion approved and sent",
                            AiSuggestionStatus::Rejected => "Suggestion rejected",
                            AiSuggestionStatus::Draft => "Suggestion updated",
                        };
                        ctx.toasts.success(verdict);
                    }
                    Err(err) => ctx.toasts.error(err.message.clone()),
                }
                result
            }
        },
    )
}

/// Swap the reviewed suggestion into the cached per-ticket list so the
/// panel reflects the verdict without a refetch round-trip.
fn replace_in_cached_list(cache: &QueryCache, key: QueryKey, updated: &AiSuggestion) {
    let Some(Value::Array(mut items)) = cache.peek(&key) else {
        return;
    };
    let Ok(value) = serde_json::to_value(updated) else {
        return;
    };
    for item in items.iter_mut() {
        if item.get("id").and_then(Value::as_str) == Some(updated.id.as_str()) {
            *item = value.clone();
        }
    }
    cache.set(key, &Value::Array(items));
}
