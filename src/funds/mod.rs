//! The singleton savings-funds record and its API endpoints.

mod core;
mod endpoints;

pub use core::{Fund, create_funds_table, get_funds, seed_funds_row, update_funds};
pub use endpoints::{get_funds_endpoint, update_funds_endpoint};
