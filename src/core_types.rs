//! Core types used throughout the wallet
//!
//! Type aliases shared by the account, operation and transfer modules.

/// Account ID - globally unique, immutable after assignment.
///
/// # Usage:
/// - Primary key in the account store
/// - Lock ordering key: transfers always lock the lower id first
pub type AccountId = u64;

/// Operation ID - unique, assigned once when a transfer commits.
pub type OperationId = u64;
