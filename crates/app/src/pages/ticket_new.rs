//! Ticket creation form. Validation runs before anything touches the
//! network; the page only submits a payload that already passed it.

use leptos::*;

use ticketflow_core::{
    CreateTicketData, TicketCategory, TicketPriority, ValidationError,
    validate::validate_create_ticket,
};

use crate::hooks::use_create_ticket;

#[component]
pub fn TicketNewPage() -> impl IntoView {
    let create = use_create_ticket();
    let title = create_rw_signal(String::new());
    let description = create_rw_signal(String::new());
    let priority = create_rw_signal(TicketPriority::Medium);
    let category = create_rw_signal(None::<TicketCategory>);
    let errors = create_rw_signal(Vec::<ValidationError>::new());

    let error_for = move |field: &'static str| {
        errors
            .with(|e| {
                e.iter()
                    .find(|err| err.field == field)
                    .map(|err| err.message.clone())
            })
            .map(|msg| view! { <p class="field-error">{msg}</p> })
    };

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let data = CreateTicketData {
            title: title.get_untracked().trim().to_owned(),
            description: description.get_untracked().trim().to_owned(),
            priority: priority.get_untracked(),
            category: category.get_untracked(),
        };
        match validate_create_ticket(&data) {
            Ok(()) => {
                errors.set(Vec::new());
                create.dispatch(data);
            }
            Err(found) => errors.set(found),
        }
    };

    view! {
        <div class="ticket-new-page">
            <h1>"New ticket"</h1>
            <form class="ticket-form" on:submit=on_submit>
                <label for="title">"Title"</label>
                <input
                    id="title"
                    type="text"
                    prop:value=move || title.get()
                    on:input=move |ev| title.set(event_target_value(&ev))
                />
                {move || error_for("title")}

                <label for="description">"Description"</label>
                <textarea
                    id="description"
                    rows="8"
                    prop:value=move || description.get()
                    on:input=move |ev| description.set(event_target_value(&ev))
                ></textarea>
                {move || error_for("description")}

                <label for="priority">"Priority"</label>
                <select
                    id="priority"
                    on:change=move |ev| {
                        if let Some(parsed) = TicketPriority::parse(&event_target_value(&ev)) {
                            priority.set(parsed);
                        }
                    }
                >
                    <option value="low">"Low"</option>
                    <option value="medium" selected>"Medium"</option>
                    <option value="high">"High"</option>
                    <option value="urgent">"Urgent"</option>
                </select>

                <label for="category">"Category"</label>
                <select
                    id="category"
                    on:change=move |ev| {
                        category.set(TicketCategory::parse(&event_target_value(&ev)));
                    }
                >
                    <option value="">"None"</option>
                    <option value="technical">"Technical"</option>
                    <option value="billing">"Billing"</option>
                    <option value="general">"General"</option>
                    <option value="other">"Other"</option>
                </select>

                <button type="submit" disabled=move || create.pending().get()>
                    {move || if create.pending().get() { "Creating…" } else { "Create ticket" }}
                </button>
            </form>
        </div>
    }
}
