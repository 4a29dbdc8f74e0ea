//! Port traits. API boundaries for the hexagon.
//!
//! - Inbound: Called by UI/adapter into the application
//! - Outbound: Called by application into infrastructure
//! - View: Called by application to update what the user sees

pub mod inbound;
pub mod outbound;
pub mod view;

pub use inbound::InputPort;
pub use outbound::SentimentServicePort;
pub use view::FormView;
