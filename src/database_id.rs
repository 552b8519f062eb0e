//! Database ID type definitions.

/// Alias for the integer type used for mapping to database IDs.
pub type DatabaseId = i64;

/// The ID of a row in the transactions table.
pub type TransactionId = i64;

/// The ID of the user that owns a row.
pub type UserId = i64;

/// The user that all rows belong to until multi-user support exists.
///
/// Handlers receive the user ID through [crate::AppState] rather than using
/// this constant directly, so adding real users later is a parameter change.
pub const DEFAULT_USER_ID: UserId = 1;
