//! Babillages server library
//!
//! Community quote-sharing backend: users and anonymous devices submit short
//! quotes, vote on them once per quote, and monthly rankings are snapshotted
//! from the vote counts.

pub mod api;
mod app;
pub mod core;
pub mod data;
