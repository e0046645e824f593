//! Route table. Paths live here so guards, navigation, and the router
//! definition can never drift apart.

pub const LOGIN: &str = "/login";
pub const REGISTER: &str = "/register";
pub const DASHBOARD: &str = "/dashboard";
pub const TICKETS: &str = "/tickets";
pub const TICKET_NEW: &str = "/tickets/new";
pub const PROFILE: &str = "/profile";
pub const SETTINGS: &str = "/settings";
pub const ADMIN: &str = "/admin";
pub const ADMIN_USERS: &str = "/admin/users";
pub const ADMIN_LOGS: &str = "/admin/logs";
pub const AI_INSIGHTS: &str = "/ai-insights";

pub fn ticket_detail(id: &str) -> String {
    format!("/tickets/{id}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticket_detail_builds_path() {
        assert_eq!(ticket_detail("t-42"), "/tickets/t-42");
    }

    #[test]
    fn new_ticket_route_is_not_a_detail_route() {
        // "/tickets/new" must be registered before "/tickets/:id" so the
        // detail page never receives "new" as an id.
        assert_eq!(TICKET_NEW, ticket_detail("new"));
    }
}
