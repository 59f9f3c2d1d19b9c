//! API route modules

pub mod devices;
pub mod health;
pub mod quotes;
pub mod rankings;
pub mod reports;
pub mod users;
pub mod votes;
