//! Transfer FSM State Definitions
//!
//! ```text
//! VALIDATED → DEBITED → CREDITED → RECORDED → COMMITTED
//!                ↓          ↓          ↓
//!                └──────────┴──────────┴────→ ROLLED_BACK
//! ```
//!
//! Everything between VALIDATED and COMMITTED happens under both account
//! locks, so no intermediate state is externally visible.

use std::fmt;

/// Transfer FSM States
///
/// Terminal states: COMMITTED (40), ROLLED_BACK (-30)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(i16)]
pub enum TransferState {
    /// Preconditions passed, nothing written yet
    Validated = 0,

    /// Source balance decreased and persisted
    Debited = 10,

    /// Destination balance increased and persisted
    Credited = 20,

    /// Operation id attached to both accounts
    Recorded = 30,

    /// Terminal: operation record persisted, transfer complete
    Committed = 40,

    /// Terminal: every write undone, balances back to pre-transfer values
    RolledBack = -30,
}

impl TransferState {
    /// Check if this is a terminal state (no more transitions possible)
    #[inline]
    pub fn is_terminal(&self) -> bool {
        matches!(self, TransferState::Committed | TransferState::RolledBack)
    }

    /// Source has been debited but the transfer has not committed
    #[inline]
    pub fn is_in_flight(&self) -> bool {
        matches!(
            self,
            TransferState::Debited | TransferState::Credited | TransferState::Recorded
        )
    }

    /// Whether the source account has been written
    #[inline]
    pub fn source_written(&self) -> bool {
        self.is_in_flight()
    }

    /// Whether the destination account has been written
    #[inline]
    pub fn destination_written(&self) -> bool {
        matches!(self, TransferState::Credited | TransferState::Recorded)
    }

    /// Forward step of the happy path, `None` from terminal states
    pub fn next(&self) -> Option<TransferState> {
        match self {
            TransferState::Validated => Some(TransferState::Debited),
            TransferState::Debited => Some(TransferState::Credited),
            TransferState::Credited => Some(TransferState::Recorded),
            TransferState::Recorded => Some(TransferState::Committed),
            TransferState::Committed | TransferState::RolledBack => None,
        }
    }

    /// Legal transitions: one step forward, or abort to ROLLED_BACK before COMMITTED
    pub fn can_transition_to(&self, to: TransferState) -> bool {
        match to {
            TransferState::RolledBack => !self.is_terminal(),
            _ => self.next() == Some(to),
        }
    }

    /// Get human-readable state name
    pub fn as_str(&self) -> &'static str {
        match self {
            TransferState::Validated => "VALIDATED",
            TransferState::Debited => "DEBITED",
            TransferState::Credited => "CREDITED",
            TransferState::Recorded => "RECORDED",
            TransferState::Committed => "COMMITTED",
            TransferState::RolledBack => "ROLLED_BACK",
        }
    }
}

impl fmt::Display for TransferState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
