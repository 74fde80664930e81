//! Wallet - accounts and atomic money transfers
//!
//! Accounts hold exact decimal balances; a transfer moves money between two
//! accounts as one all-or-nothing unit and leaves an immutable operation
//! record behind.
//!
//! # Modules
//!
//! - [`core_types`] - Core type definitions (AccountId, OperationId)
//! - [`money`] - Decimal amount parsing and checked arithmetic
//! - [`error`] - `WalletError`, the failure kinds every operation reports
//! - [`account`] - Account model, per-account locks, Account Manager
//! - [`operation`] - Immutable operation records
//! - [`store`] - Storage contracts with in-memory and PostgreSQL backends
//! - [`db`] - PostgreSQL pool and schema
//! - [`transfer`] - Transfer Engine (lock, validate, apply, compensate)
//! - [`gateway`] - HTTP adapter (axum) with OpenAPI docs
//! - [`config`] / [`logging`] - YAML configuration and tracing setup

// Core types - must be first!
pub mod core_types;

// Domain
pub mod account;
pub mod error;
pub mod money;
pub mod operation;
pub mod transfer;

// Storage
pub mod db;
pub mod store;

// Service
pub mod config;
pub mod gateway;
pub mod logging;

// Convenient re-exports at crate root
pub use account::{Account, AccountManager};
pub use core_types::{AccountId, OperationId};
pub use error::WalletError;
pub use operation::Operation;
pub use transfer::{TransferEngine, TransferState};
