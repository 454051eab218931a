//! Domain errors raised by the game state.

use thiserror::Error;

use crate::models::{Money, ParticipantId};

/// Rejections produced by money movements and lookups.
///
/// None of these are fatal: the round engine turns them into notices for the
/// organizer and carries on.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GameError {
    /// The treasury cannot cover a payment.
    #[error("treasury holds {available}, cannot pay {requested}")]
    InsufficientTreasury {
        /// Balance at the time of the request.
        available: Money,
        /// Amount that was asked for.
        requested: Money,
    },
    /// A participant tried to invest more than they hold.
    #[error("{name} holds {available}, cannot invest {requested}")]
    InsufficientParticipantFunds {
        /// Participant name.
        name: String,
        /// Participant balance.
        available: Money,
        /// Amount that was asked for.
        requested: Money,
    },
    /// No participant is registered under the id.
    #[error("unknown participant {0}")]
    UnknownParticipant(ParticipantId),
    /// A configuration value is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
