//! Transfer Engine
//!
//! Moves money between two accounts and records the result as an
//! [`Operation`](crate::operation::Operation).
//!
//! # State Machine
//!
//! ```text
//! VALIDATED → DEBITED → CREDITED → RECORDED → COMMITTED
//!                ↓          ↓          ↓
//!                └──────────┴──────────┴────→ ROLLED_BACK
//! ```
//!
//! # Safety Invariants
//!
//! 1. **Ordered Locking**: both account locks are taken in ascending id order
//!    and held until the transfer terminates
//! 2. **Validate Before Write**: every rejection (self transfer, bad amount,
//!    missing account, insufficient funds) happens before the first write
//! 3. **Commit Last**: the operation record is persisted only after both
//!    balances and both references, so a stored operation implies a
//!    completed transfer
//! 4. **Compensate In Reverse**: on failure, account snapshots are written
//!    back newest first while the locks are still held

pub mod engine;
pub mod state;


pub use engine::TransferEngine;
pub use state::TransferState;
