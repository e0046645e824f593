//! AI reply-suggestion panel shown on the ticket detail page.
//!
//! The panel renders the newest suggestion for the ticket as the working
//! draft and all older ones as read-only history. A draft can be edited
//! locally before approval; the edited text travels with the approval
//! request and never overwrites the generated content client-side.

use leptos::*;

use ticketflow_core::{
    AiSuggestionStatus, GenerateSuggestionRequest, ReviewSuggestionRequest, Ticket, can_generate,
};

use crate::components::display::{ConfidenceBadge, SuggestionStatusBadge, format_timestamp};
use crate::hooks::{use_ai_suggestions, use_generate_suggestion, use_review_suggestion};

#[component]
pub fn AiSuggestionPanel(ticket: Signal<Ticket>) -> impl IntoView {
    let ticket_id = Signal::derive(move || ticket.get().id);
    let suggestions = use_ai_suggestions(ticket_id);
    let generate = use_generate_suggestion();
    let review = use_review_suggestion();

    // Local edit buffer, re-seeded whenever a different draft becomes the
    // newest suggestion.
    let draft = create_rw_signal(String::new());
    let editing_id = create_rw_signal(None::<String>);
    create_effect(move |_| {
        let Some(Ok(list)) = suggestions.get() else {
            return;
        };
        let Some(latest) = list.first() else {
            return;
        };
        if latest.status == AiSuggestionStatus::Draft
            && editing_id.get_untracked().as_deref() != Some(latest.id.as_str())
        {
            draft.set(latest.content.clone());
            editing_id.set(Some(latest.id.clone()));
        }
    });

    // Completed generations and reviews re-read the (already updated)
    // cached list.
    create_effect(move |_| {
        generate.version().get();
        review.version().get();
        suggestions.refetch();
    });

    let generation_allowed = move || can_generate(ticket.get().status) && !generate.pending().get();
    let busy = move || generate.pending().get() || review.pending().get();

    let on_generate = move |_| {
        generate.dispatch(GenerateSuggestionRequest {
            ticket_id: ticket_id.get_untracked(),
            context: None,
        });
    };

    view! {
        <section class="ai-panel">
            <header class="ai-panel-header">
                <h3>"AI Assistant"</h3>
                <button
                    class="generate"
                    disabled=move || !generation_allowed()
                    on:click=on_generate
                >
                    {move || if generate.pending().get() { "Generating…" } else { "Generate suggestion" }}
                </button>
            </header>

            {move || {
                if !can_generate(ticket.get().status) {
                    Some(view! {
                        <p class="ai-panel-note">
                            "Suggestions are unavailable for resolved or closed tickets."
                        </p>
                    })
                } else {
                    None
                }
            }}

            {move || match suggestions.get() {
                None => view! { <p class="loading">"Loading suggestions…"</p> }.into_view(),
                Some(Err(err)) => {
                    view! { <p class="error">{err.message}</p> }.into_view()
                }
                Some(Ok(list)) if list.is_empty() => {
                    view! { <p class="ai-panel-note">"No suggestions yet."</p> }.into_view()
                }
                Some(Ok(list)) => {
                    let latest = list[0].clone();
                    let history = list[1..].to_vec();
                    let latest_view = match latest.status {
                        AiSuggestionStatus::Draft => {
                            let id = latest.id.clone();
                            let tid = latest.ticket_id.clone();
                            let original = latest.content.clone();
                            let reset_content = original.clone();
                            let approve_id = id.clone();
                            let approve_tid = tid.clone();
                            let reject_id = id;
                            let reject_tid = tid;
                            view! {
                                <article class="suggestion suggestion-current">
                                    <div class="suggestion-meta">
                                        <SuggestionStatusBadge status=latest.status/>
                                        <ConfidenceBadge confidence=latest.confidence/>
                                        <time>{format_timestamp(latest.created_at)}</time>
                                    </div>
                                    <textarea
                                        class="suggestion-editor"
                                        prop:value=move || draft.get()
                                        on:input=move |ev| draft.set(event_target_value(&ev))
                                    ></textarea>
                                    <div class="suggestion-actions">
                                        <button
                                            class="approve"
                                            disabled=busy
                                            on:click=move |_| {
                                                let edited = draft.get_untracked();
                                                let edited_content =
                                                    (edited != original).then_some(edited);
                                                review.dispatch((
                                                    approve_id.clone(),
                                                    approve_tid.clone(),
                                                    ReviewSuggestionRequest {
                                                        status: AiSuggestionStatus::Approved,
                                                        edited_content,
                                                    },
                                                ));
                                            }
                                        >
                                            "Approve & send"
                                        </button>
                                        <button
                                            class="reject"
                                            disabled=busy
                                            on:click=move |_| {
                                                review.dispatch((
                                                    reject_id.clone(),
                                                    reject_tid.clone(),
                                                    ReviewSuggestionRequest {
                                                        status: AiSuggestionStatus::Rejected,
                                                        edited_content: None,
                                                    },
                                                ));
                                            }
                                        >
                                            "Reject"
                                        </button>
                                        <button
                                            class="reset-edit"
                                            disabled={
                                                let original = reset_content.clone();
                                                move || draft.get() == original
                                            }
                                            on:click=move |_| {
                                                draft.set(reset_content.clone())
                                            }
                                        >
                                            "Discard edits"
                                        </button>
                                        <button
                                            class="copy"
                                            on:click=move |_| {
                                                copy_to_clipboard(&draft.get_untracked());
                                            }
                                        >
                                            "Copy"
                                        </button>
                                    </div>
                                </article>
                            }
                            .into_view()
                        }
                        _ => view! { <SuggestionCard suggestion=latest/> }.into_view(),
                    };
                    view! {
                        {latest_view}
                        {(!history.is_empty()).then(|| view! {
                            <details class="suggestion-history">
                                <summary>{format!("History ({})", history.len())}</summary>
                                {history
                                    .into_iter()
                                    .map(|suggestion| view! { <SuggestionCard suggestion/> })
                                    .collect_view()}
                            </details>
                        })}
                    }
                    .into_view()
                }
            }}
        </section>
    }
}

/// Fire-and-forget clipboard write; failures only surface in the console.
fn copy_to_clipboard(text: &str) {
    if let Some(window) = web_sys::window() {
        let _ = window.navigator().clipboard().write_text(text);
    }
}

/// Read-only rendering of a reviewed or historical suggestion.
#[component]
fn SuggestionCard(suggestion: ticketflow_core::AiSuggestion) -> impl IntoView {
    let shown = suggestion
        .edited_content
        .clone()
        .unwrap_or_else(|| suggestion.content.clone());
    let copy_text = shown.clone();
    view! {
        <article class="suggestion">
            <div class="suggestion-meta">
                <SuggestionStatusBadge status=suggestion.status/>
                <ConfidenceBadge confidence=suggestion.confidence/>
                <time>{format_timestamp(suggestion.created_at)}</time>
                <button class="copy" on:click=move |_| copy_to_clipboard(&copy_text)>
                    "Copy"
                </button>
            </div>
            <p class="suggestion-content">{shown}</p>
        </article>
    }
}
