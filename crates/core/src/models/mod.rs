//! Shared domain models.

use std::fmt;

use chrono::{DateTime, Local};
use rust_decimal::Decimal;

use crate::error::GameError;

/// Monetary amounts are exact signed decimals.
pub type Money = Decimal;

/// Render an amount the way every log line and prompt shows money.
pub fn format_money(amount: Money) -> String {
    format!("${:.2}", amount)
}

/// Stable handle to a participant; the index into the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ParticipantId(pub usize);

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Lifecycle state of a participant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticipantStatus {
    /// Still in the scheme and able to demand, invite and be selected.
    Active,
    /// Walked away quietly (police scrutiny).
    Left,
    /// Walked away angry after being refused.
    Angry,
}

/// A single investor in the scheme.
#[derive(Debug, Clone, PartialEq)]
pub struct Participant {
    name: String,
    funds: Money,
    level: u32,
    status: ParticipantStatus,
    invited_count: u32,
    total_invested: Money,
    total_received: Money,
}

impl Participant {
    /// Create an active participant whose opening stake counts as invested.
    pub fn new(name: impl Into<String>, initial: Money) -> Self {
        Self {
            name: name.into(),
            funds: initial,
            level: 1,
            status: ParticipantStatus::Active,
            invited_count: 0,
            total_invested: initial,
            total_received: Money::ZERO,
        }
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current personal balance.
    pub fn funds(&self) -> Money {
        self.funds
    }

    /// Membership level. Every participant starts at 1.
    pub fn level(&self) -> u32 {
        self.level
    }

    /// Current lifecycle state.
    pub fn status(&self) -> ParticipantStatus {
        self.status
    }

    /// Number of approved invitations this participant made.
    pub fn invited_count(&self) -> u32 {
        self.invited_count
    }

    /// Cumulative amount put into the scheme.
    pub fn total_invested(&self) -> Money {
        self.total_invested
    }

    /// Cumulative amount taken out of the scheme (payouts, refunds, bonuses).
    pub fn total_received(&self) -> Money {
        self.total_received
    }

    /// Whether the participant is still in the game.
    pub fn is_active(&self) -> bool {
        self.status == ParticipantStatus::Active
    }

    /// True while cumulative receipts stay below `ceiling` times cumulative investment.
    pub fn demands_payout(&self, ceiling: Money) -> bool {
        self.total_received < self.total_invested * ceiling
    }

    /// Whether the participant holds at least `amount`.
    pub fn can_invest(&self, amount: Money) -> bool {
        self.funds >= amount
    }

    /// Move `amount` from the participant's balance into their invested total.
    pub fn invest(&mut self, amount: Money) -> Result<(), GameError> {
        if !self.can_invest(amount) {
            return Err(GameError::InsufficientParticipantFunds {
                name: self.name.clone(),
                available: self.funds,
                requested: amount,
            });
        }
        self.funds -= amount;
        self.total_invested += amount;
        Ok(())
    }

    /// Credit `amount` to the participant.
    pub fn receive(&mut self, amount: Money) {
        self.funds += amount;
        self.total_received += amount;
    }

    pub(crate) fn set_status(&mut self, status: ParticipantStatus) {
        self.status = status;
    }

    pub(crate) fn record_invitation(&mut self) {
        self.invited_count += 1;
    }
}

impl fmt::Display for Participant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, format_money(self.funds))
    }
}

/// Immutable entry of the event log.
#[derive(Debug, Clone, PartialEq)]
pub struct GameAction {
    /// Human readable account of what happened.
    pub description: String,
    /// Money moved by the action, zero when none was.
    pub amount: Money,
    /// Wall-clock time the action was recorded.
    pub time: DateTime<Local>,
}

impl GameAction {
    /// Record an action stamped with the current local time.
    pub fn now(description: impl Into<String>, amount: Money) -> Self {
        Self {
            description: description.into(),
            amount,
            time: Local::now(),
        }
    }
}

impl fmt::Display for GameAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.time.format("%H:%M"), self.description)
    }
}
