//! Route guards.

use leptos::*;
use leptos_router::Redirect;

use ticketflow_core::UserRole;

use crate::context::use_app;
use crate::routes;

/// Wrap a routed view: unauthenticated visitors bounce to the login page,
/// authenticated visitors lacking one of `roles` bounce to the dashboard.
/// An empty `roles` list means any authenticated user.
#[component]
pub fn RequireAuth(
    #[prop(optional)] roles: Vec<UserRole>,
    children: ChildrenFn,
) -> impl IntoView {
    let ctx = use_app();
    let roles = store_value(roles);

    move || {
        if !ctx.is_authenticated() {
            return view! { <Redirect path=routes::LOGIN/> }.into_view();
        }
        let allowed = roles.with_value(|roles| roles.is_empty() || ctx.has_role(roles));
        if !allowed {
            return view! { <Redirect path=routes::DASHBOARD/> }.into_view();
        }
        children().into_view()
    }
}

/// Landing redirect for `/`: straight to the dashboard when signed in,
/// otherwise to login.
#[component]
pub fn Landing() -> impl IntoView {
    let ctx = use_app();
    move || {
        let target = if ctx.is_authenticated() {
            routes::DASHBOARD
        } else {
            routes::LOGIN
        };
        view! { <Redirect path=target/> }
    }
}
