//! sentiment-cli: Terminal client for the Twitter sentiment service, Hexagonal Architecture.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod shared;
pub mod usecases;
