//! Infrastructure adapters. Implement outbound and view ports.
//!
//! HTTP service client, terminal UI. Map errors to DomainError.

pub mod http;
pub mod ui;
