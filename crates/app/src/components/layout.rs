//! Application chrome: navbar, sidebar, toast viewport.

use leptos::*;
use leptos_router::A;

use ticketflow_core::UserRole;
use ticketflow_state::Theme;

use crate::context::use_app;
use crate::hooks::use_logout;
use crate::notify::Toasts;
use crate::routes;

/// Chrome around every authenticated page.
#[component]
pub fn Shell(children: Children) -> impl IntoView {
    let ctx = use_app();
    let collapsed = create_rw_signal(ctx.ui.sidebar_collapsed());

    view! {
        <div class="shell">
            <Navbar/>
            <div class="shell-body">
                <Sidebar collapsed=collapsed/>
                <main class="content">{children()}</main>
            </div>
            <ToastViewport toasts=ctx.toasts/>
        </div>
    }
}

#[component]
fn Navbar() -> impl IntoView {
    let ctx = use_app();
    let logout = use_logout();
    let theme_ctx = ctx.clone();
    let toggle_ctx = ctx.clone();

    view! {
        <header class="navbar">
            <A href=routes::DASHBOARD class="brand">"TicketFlow AI"</A>
            <div class="navbar-actions">
                <button
                    class="theme-toggle"
                    on:click=move |_| toggle_ctx.toggle_theme()
                >
                    {move || match theme_ctx.theme().get() {
                        Theme::Light => "Dark mode",
                        Theme::Dark => "Light mode",
                    }}
                </button>
                <span class="current-user">
                    {move || ctx.user().get().map(|user| user.name).unwrap_or_default()}
                </span>
                <button class="logout" on:click=move |_| logout.dispatch(())>
                    "Sign out"
                </button>
            </div>
        </header>
    }
}

#[component]
fn Sidebar(collapsed: RwSignal<bool>) -> impl IntoView {
    let ctx = use_app();
    let toggle_ctx = ctx.clone();

    let links = move || {
        let mut links = vec![
            (routes::DASHBOARD, "Dashboard"),
            (routes::TICKETS, "Tickets"),
            (routes::TICKET_NEW, "New Ticket"),
        ];
        if ctx.has_role(&[UserRole::Admin, UserRole::Agent]) {
            links.push((routes::AI_INSIGHTS, "AI Insights"));
        }
        if ctx.has_role(&[UserRole::Admin]) {
            links.push((routes::ADMIN, "Admin"));
            links.push((routes::ADMIN_USERS, "Users"));
            links.push((routes::ADMIN_LOGS, "Activity Logs"));
        }
        links.push((routes::PROFILE, "Profile"));
        links.push((routes::SETTINGS, "Settings"));
        links
    };

    view! {
        <nav class="sidebar" class:collapsed=move || collapsed.get()>
            <button
                class="sidebar-toggle"
                on:click=move |_| {
                    toggle_ctx.ui.toggle_sidebar();
                    collapsed.update(|c| *c = !*c);
                }
            >
                {move || if collapsed.get() { "»" } else { "«" }}
            </button>
            <ul>
                {move || {
                    links()
                        .into_iter()
                        .map(|(href, label)| {
                            view! { <li><A href=href>{label}</A></li> }
                        })
                        .collect_view()
                }}
            </ul>
        </nav>
    }
}

#[component]
fn ToastViewport(toasts: Toasts) -> impl IntoView {
    view! {
        <div class="toast-viewport">
            {move || {
                toasts
                    .items()
                    .get()
                    .into_iter()
                    .map(|toast| {
                        let id = toast.id;
                        view! {
                            <div class=toast.kind.css_class()>
                                <span>{toast.message}</span>
                                <button on:click=move |_| toasts.dismiss(id)>"×"</button>
                            </div>
                        }
                    })
                    .collect_view()
            }}
        </div>
    }
}
