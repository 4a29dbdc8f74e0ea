//! Application use cases. Orchestrate domain logic via ports.

pub mod form_controller;
pub mod render;
pub mod report;
pub mod request_ticket;

pub use form_controller::{FormController, WorkflowOutcome};
pub use report::{ReportContext, ReportService};
pub use request_ticket::{RequestSequence, Ticket};
