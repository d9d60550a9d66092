//! Participant identity
//!
//! A participant is reachable through exactly one channel. The domain only
//! knows the channel's identity snapshot ([`ContactableConfig`]); the ability
//! to actually send and receive text is a port in the application layer.

pub mod config;

pub use config::ContactableConfig;
