//! AI insights: aggregate suggestion statistics for agents and admins.

use leptos::*;

use ticketflow_core::AiStats;

use crate::components::display::QueryView;
use crate::hooks::use_ai_stats;

#[component]
pub fn AiInsightsPage() -> impl IntoView {
    let stats = use_ai_stats();

    view! {
        <div class="ai-insights-page">
            <h1>"AI Insights"</h1>
            {move || view! {
                <QueryView
                    result=stats.get()
                    ready=|stats: AiStats| {
                        let reviewed = stats.approved_suggestions + stats.rejected_suggestions;
                        let approval_rate = (reviewed > 0)
                            .then(|| stats.approved_suggestions as f64 * 100.0 / reviewed as f64);
                        view! {
                            <div class="metric-grid">
                                <div class="metric-card">
                                    <span class="metric-value">
                                        {stats.total_suggestions.to_string()}
                                    </span>
                                    <span class="metric-label">"Suggestions generated"</span>
                                </div>
                                <div class="metric-card">
                                    <span class="metric-value">
                                        {stats.approved_suggestions.to_string()}
                                    </span>
                                    <span class="metric-label">"Approved"</span>
                                </div>
                                <div class="metric-card">
                                    <span class="metric-value">
                                        {stats.rejected_suggestions.to_string()}
                                    </span>
                                    <span class="metric-label">"Rejected"</span>
                                </div>
                                <div class="metric-card">
                                    <span class="metric-value">
                                        {approval_rate
                                            .map(|rate| format!("{rate:.0}%"))
                                            .unwrap_or_else(|| "—".to_owned())}
                                    </span>
                                    <span class="metric-label">"Approval rate"</span>
                                </div>
                                <div class="metric-card">
                                    <span class="metric-value">
                                        {format!("{:.2}", stats.average_confidence)}
                                    </span>
                                    <span class="metric-label">"Average confidence"</span>
                                </div>
                                <div class="metric-card">
                                    <span class="metric-value">
                                        {stats.suggestions_today.to_string()}
                                    </span>
                                    <span class="metric-label">"Generated today"</span>
                                </div>
                            </div>
                        }
                    }
                />
            }}
        </div>
    }
}
