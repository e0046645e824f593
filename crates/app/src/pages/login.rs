//! Login page.

use leptos::*;
use leptos_router::{A, Redirect};

use ticketflow_core::{LoginCredentials, ValidationError, validate::validate_login};

use crate::context::use_app;
use crate::hooks::use_login;
use crate::routes;

fn field_error<'a>(errors: &'a [ValidationError], field: &str) -> Option<&'a str> {
    errors
        .iter()
        .find(|e| e.field == field)
        .map(|e| e.message.as_str())
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let ctx = use_app();
    if ctx.is_authenticated() {
        return view! { <Redirect path=routes::DASHBOARD/> }.into_view();
    }

    let login = use_login();
    let email = create_rw_signal(String::new());
    let password = create_rw_signal(String::new());
    let remember_me = create_rw_signal(false);
    let errors = create_rw_signal(Vec::<ValidationError>::new());

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let credentials = LoginCredentials {
            email: email.get_untracked().trim().to_owned(),
            password: password.get_untracked(),
            remember_me: Some(remember_me.get_untracked()),
        };
        match validate_login(&credentials) {
            Ok(()) => {
                errors.set(Vec::new());
                login.dispatch(credentials);
            }
            Err(found) => errors.set(found),
        }
    };

    view! {
        <div class="auth-page">
            <form class="auth-form" on:submit=on_submit>
                <h1>"Sign in to TicketFlow AI"</h1>

                <label for="email">"Email"</label>
                <input
                    id="email"
                    type="email"
                    prop:value=move || email.get()
                    on:input=move |ev| email.set(event_target_value(&ev))
                />
                {move || {
                    errors.with(|e| field_error(e, "email").map(str::to_owned)).map(|msg| {
                        view! { <p class="field-error">{msg}</p> }
                    })
                }}

                <label for="password">"Password"</label>
                <input
                    id="password"
                    type="password"
                    prop:value=move || password.get()
                    on:input=move |ev| password.set(event_target_value(&ev))
                />
                {move || {
                    errors.with(|e| field_error(e, "password").map(str::to_owned)).map(|msg| {
                        view! { <p class="field-error">{msg}</p> }
                    })
                }}

                <label class="checkbox">
                    <input
                        type="checkbox"
                        prop:checked=move || remember_me.get()
                        on:change=move |ev| remember_me.set(event_target_checked(&ev))
                    />
                    "Remember me"
                </label>

                <button type="submit" disabled=move || login.pending().get()>
                    {move || if login.pending().get() { "Signing in…" } else { "Sign in" }}
                </button>

                <p class="auth-switch">
                    "No account yet? " <A href=routes::REGISTER>"Register"</A>
                </p>
            </form>
        </div>
    }
    .into_view()
}
