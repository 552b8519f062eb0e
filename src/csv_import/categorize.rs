//! Expense categorization for imported transactions.
//!
//! A row's category comes from the user's own history first: if an expense
//! with the same payee name was categorized before, that category is
//! replayed. Only unknown names fall back to the keyword classifier over the
//! bank's category hint.

use std::collections::HashMap;

use rusqlite::Connection;

use crate::{
    Error,
    database_id::UserId,
    transaction::{CHOICE_CATEGORY, CORE_CATEGORY, all_expenses},
};

/// Bank category hints that mark an expense as a necessity.
const CORE_KEYWORDS: [&str; 9] = [
    "groceries",
    "credit card payments",
    "pharmacy",
    "doctor",
    "hospital",
    "utilities",
    "rent",
    "mortgage",
    "insurance",
];

/// Bank category hints that mark an expense as discretionary.
const CHOICE_KEYWORDS: [&str; 5] = [
    "atm/cash withdrawals",
    "restaurants/dining",
    "general merchandise",
    "shopping",
    "entertainment",
];

/// Classify a bank category hint as "Core" or "Choice".
///
/// The match is a case-insensitive substring check; Core keywords are
/// checked before Choice keywords, and hints matching neither default to
/// "Choice".
pub fn classify_hint(hint: &str) -> &'static str {
    let hint = hint.to_lowercase();

    if CORE_KEYWORDS.iter().any(|keyword| hint.contains(keyword)) {
        return CORE_CATEGORY;
    }

    if CHOICE_KEYWORDS.iter().any(|keyword| hint.contains(keyword)) {
        return CHOICE_CATEGORY;
    }

    CHOICE_CATEGORY
}

/// Build the payee-name to category map from the user's stored expenses.
///
/// The expenses arrive oldest first and later entries overwrite earlier
/// ones, so a name that was re-categorized over time maps to its most
/// recently dated category.
///
/// # Errors
/// This function will return an [Error::SqlError] if the expense query fails.
pub fn build_category_lookup(
    user_id: UserId,
    connection: &Connection,
) -> Result<HashMap<String, String>, Error> {
    Ok(all_expenses(user_id, connection)?
        .into_iter()
        .map(|transaction| (transaction.name, transaction.category))
        .collect())
}
