//! signmeup-core — Pure domain logic, no UI.
//!
//! This crate holds the conversation session, the canned-reply classifier,
//! and the inert display fixtures for the SignMeUp demo shell. It is
//! completely UI-agnostic — frontends subscribe to session events via
//! tokio::broadcast.

pub mod classifier;
pub mod config;
pub mod events;
pub mod fixtures;
pub mod intent;
pub mod session;
pub mod suggest;
pub mod types;
