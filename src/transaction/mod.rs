//! Transaction management for the finance tracker.
//!
//! This module contains everything related to transactions:
//! - The `Transaction` model, the `TransactionType` enum, and `NewTransaction`
//! - Database functions for storing, querying, and deleting transactions
//! - Route handlers for the income and expense API endpoints

mod core;
mod create_endpoint;
mod delete_endpoint;
mod list_endpoint;
pub mod window;

pub use core::{
    CHOICE_CATEGORY, CORE_CATEGORY, INCOME_CATEGORY, NewTransaction, RowsAffected, Transaction,
    TransactionType, all_expenses, create_transaction, create_transaction_table,
    delete_transaction, map_transaction_row, transactions_in_window,
};
pub use create_endpoint::{create_expense_endpoint, create_income_endpoint};
pub use delete_endpoint::{delete_expense_endpoint, delete_income_endpoint};
pub use list_endpoint::{get_expenses_endpoint, get_income_endpoint};
