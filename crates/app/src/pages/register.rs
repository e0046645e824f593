//! Registration page.

use leptos::*;
use leptos_router::{A, Redirect};

use ticketflow_core::{
    RegisterData, ValidationError,
    validate::{PasswordStrength, password_strength, validate_register},
};

use crate::context::use_app;
use crate::hooks::use_register;
use crate::routes;

fn field_error<'a>(errors: &'a [ValidationError], field: &str) -> Option<&'a str> {
    errors
        .iter()
        .find(|e| e.field == field)
        .map(|e| e.message.as_str())
}

#[component]
pub fn RegisterPage() -> impl IntoView {
    let ctx = use_app();
    if ctx.is_authenticated() {
        return view! { <Redirect path=routes::DASHBOARD/> }.into_view();
    }

    let register = use_register();
    let name = create_rw_signal(String::new());
    let email = create_rw_signal(String::new());
    let password = create_rw_signal(String::new());
    let confirm_password = create_rw_signal(String::new());
    let errors = create_rw_signal(Vec::<ValidationError>::new());

    let strength = move || match password_strength(&password.get()) {
        PasswordStrength::Weak => ("strength weak", "Weak"),
        PasswordStrength::Medium => ("strength medium", "Medium"),
        PasswordStrength::Strong => ("strength strong", "Strong"),
    };

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let data = RegisterData {
            name: name.get_untracked().trim().to_owned(),
            email: email.get_untracked().trim().to_owned(),
            password: password.get_untracked(),
            confirm_password: confirm_password.get_untracked(),
        };
        match validate_register(&data) {
            Ok(()) => {
                errors.set(Vec::new());
                register.dispatch(data);
            }
            Err(found) => errors.set(found),
        }
    };

    let error_for = move |field: &'static str| {
        errors
            .with(|e| field_error(e, field).map(str::to_owned))
            .map(|msg| view! { <p class="field-error">{msg}</p> })
    };

    view! {
        <div class="auth-page">
            <form class="auth-form" on:submit=on_submit>
                <h1>"Create your account"</h1>

                <label for="name">"Name"</label>
                <input
                    id="name"
                    type="text"
                    prop:value=move || name.get()
                    on:input=move |ev| name.set(event_target_value(&ev))
                />
                {move || error_for("name")}

                <label for="email">"Email"</label>
                <input
                    id="email"
                    type="email"
                    prop:value=move || email.get()
                    on:input=move |ev| email.set(event_target_value(&ev))
                />
                {move || error_for("email")}

                <label for="password">"Password"</label>
                <input
                    id="password"
                    type="password"
                    prop:value=move || password.get()
                    on:input=move |ev| password.set(event_target_value(&ev))
                />
                {move || {
                    (!password.get().is_empty()).then(|| {
                        let (class, label) = strength();
                        view! { <p class=class>{label}</p> }
                    })
                }}
                {move || error_for("password")}

                <label for="confirm-password">"Confirm password"</label>
                <input
                    id="confirm-password"
                    type="password"
                    prop:value=move || confirm_password.get()
                    on:input=move |ev| confirm_password.set(event_target_value(&ev))
                />
                {move || error_for("confirmPassword")}

                <button type="submit" disabled=move || register.pending().get()>
                    {move || if register.pending().get() { "Creating…" } else { "Create account" }}
                </button>

                <p class="auth-switch">
                    "Already registered? " <A href=routes::LOGIN>"Sign in"</A>
                </p>
            </form>
        </div>
    }
    .into_view()
}
