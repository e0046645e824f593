//! Root component: context wiring and the route table.

use leptos::*;
use leptos_router::{Outlet, Route, Router, Routes};

use ticketflow_core::UserRole;

use crate::components::layout::Shell;
use crate::context::provide_app_context;
use crate::guard::{Landing, RequireAuth};
use crate::hooks::use_session_refresh;
use crate::pages::admin::{AdminLogsPage, AdminOverviewPage, AdminUsersPage};
use crate::pages::ai_insights::AiInsightsPage;
use crate::pages::dashboard::DashboardPage;
use crate::pages::login::LoginPage;
use crate::pages::misc::{NotFoundPage, ProfilePage, SettingsPage};
use crate::pages::register::RegisterPage;
use crate::pages::ticket_detail::TicketDetailPage;
use crate::pages::ticket_new::TicketNewPage;
use crate::pages::tickets::TicketListPage;
use crate::routes;

/// Every authenticated route renders inside the guard and the shell.
#[component]
fn Protected() -> impl IntoView {
    view! {
        <RequireAuth>
            <Shell>
                <Outlet/>
            </Shell>
        </RequireAuth>
    }
}

#[component]
pub fn App() -> impl IntoView {
    provide_app_context();
    use_session_refresh();

    view! {
        <Router>
            <Routes>
                <Route path=routes::LOGIN view=LoginPage/>
                <Route path=routes::REGISTER view=RegisterPage/>
                <Route path="" view=Protected>
                    <Route path="/" view=Landing/>
                    <Route path=routes::DASHBOARD view=DashboardPage/>
                    <Route path=routes::TICKETS view=TicketListPage/>
                    <Route path=routes::TICKET_NEW view=TicketNewPage/>
                    <Route path="/tickets/:id" view=TicketDetailPage/>
                    <Route path=routes::PROFILE view=ProfilePage/>
                    <Route path=routes::SETTINGS view=SettingsPage/>
                    <Route
                        path=routes::AI_INSIGHTS
                        view=|| view! {
                            <RequireAuth roles=vec![UserRole::Admin, UserRole::Agent]>
                                <AiInsightsPage/>
                            </RequireAuth>
                        }
                    />
                    <Route
                        path=routes::ADMIN
                        view=|| view! {
                            <RequireAuth roles=vec![UserRole::Admin]>
                                <AdminOverviewPage/>
                            </RequireAuth>
                        }
                    />
                    <Route
                        path=routes::ADMIN_USERS
                        view=|| view! {
                            <RequireAuth roles=vec![UserRole::Admin]>
                                <AdminUsersPage/>
                            </RequireAuth>
                        }
                    />
                    <Route
                        path=routes::ADMIN_LOGS
                        view=|| view! {
                            <RequireAuth roles=vec![UserRole::Admin]>
                                <AdminLogsPage/>
                            </RequireAuth>
                        }
                    />
                    <Route path="/*any" view=NotFoundPage/>
                </Route>
            </Routes>
        </Router>
    }
}
