//! `ticketflow-core` — transport DTOs and client-side validation.
//!
//! Everything in this crate is a **server-owned snapshot**: the backend is
//! authoritative for every entity, and the client never treats its copy as
//! the source of truth. The only logic that lives here is schema-level form
//! validation, which must reject bad input before it ever reaches the
//! network.

pub mod ai;
pub mod api;
pub mod log;
pub mod ticket;
pub mod user;
pub mod validate;

pub use ai::{
    AiStats, AiSuggestion, AiSuggestionStatus, ConfidenceLevel, GenerateSuggestionRequest,
    ReviewSuggestionRequest, can_generate,
};
pub use api::{ApiError, DashboardMetrics, Paginated};
pub use log::{ActionType, ActivityLog};
pub use ticket::{
    CreateTicketData, Ticket, TicketActivity, TicketActivityType, TicketCategory, TicketFilters,
    TicketPriority, TicketStatus, UpdateTicketData,
};
pub use user::{AuthResponse, LoginCredentials, RegisterData, User, UserRole, UserStatus};
pub use validate::{ValidationError, ValidationResult};
