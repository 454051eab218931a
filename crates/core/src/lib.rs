#![warn(clippy::all, missing_docs)]

//! Core domain logic for the Ponzi operator game.
//!
//! This crate hosts the participant models, the registry and event log,
//! the injectable decision source, configuration handling and the round
//! engine used by the console frontend.

pub mod config;
pub mod decisions;
pub mod engine;
pub mod error;
pub mod events;
pub mod history;
pub mod models;
pub mod names;
pub mod registry;

pub use config::GameConfig;
pub use decisions::{Decisions, RngDecisions, ScriptedDecisions};
pub use engine::{
    GameState, GameSummary, InvitationProposal, Notice, Operator, PayoutDemand, RefundClaim,
    RoundEngine, RoundSummary, Standing, StatusReport,
};
pub use error::GameError;
pub use events::SpecialEvent;
pub use models::{GameAction, Money, Participant, ParticipantId, ParticipantStatus};
pub use registry::ParticipantRegistry;
