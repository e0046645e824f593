//! Profile, settings, and the 404 page.

use leptos::*;
use leptos_router::A;

use ticketflow_state::Theme;

use crate::components::display::format_timestamp;
use crate::context::use_app;
use crate::routes;

#[component]
pub fn ProfilePage() -> impl IntoView {
    let ctx = use_app();

    view! {
        <div class="profile-page">
            <h1>"Profile"</h1>
            {move || {
                ctx.user().get().map(|user| {
                    view! {
                        <dl class="profile-fields">
                            <dt>"Name"</dt>
                            <dd>{user.name.clone()}</dd>
                            <dt>"Email"</dt>
                            <dd>{user.email.clone()}</dd>
                            <dt>"Role"</dt>
                            <dd>{user.role.to_string()}</dd>
                            <dt>"Member since"</dt>
                            <dd>{format_timestamp(user.created_at)}</dd>
                        </dl>
                    }
                })
            }}
        </div>
    }
}

#[component]
pub fn SettingsPage() -> impl IntoView {
    let ctx = use_app();
    let theme_ctx = ctx.clone();

    view! {
        <div class="settings-page">
            <h1>"Settings"</h1>
            <section>
                <h2>"Appearance"</h2>
                <label class="setting">
                    "Theme"
                    <button on:click=move |_| theme_ctx.toggle_theme()>
                        {move || match ctx.theme().get() {
                            Theme::Light => "Switch to dark",
                            Theme::Dark => "Switch to light",
                        }}
                    </button>
                </label>
            </section>
        </div>
    }
}

#[component]
pub fn NotFoundPage() -> impl IntoView {
    view! {
        <div class="not-found-page">
            <h1>"Page not found"</h1>
            <A href=routes::DASHBOARD>"Back to the dashboard"</A>
        </div>
    }
}
