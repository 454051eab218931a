use crate::models::{Money, Participant};

/// Name and balances of a participant at report time.
#[derive(Debug, Clone, PartialEq)]
pub struct Standing {
    pub name: String,
    pub funds: Money,
    pub invested: Money,
}

impl From<&Participant> for Standing {
    fn from(participant: &Participant) -> Self {
        Self {
            name: participant.name().to_string(),
            funds: participant.funds(),
            invested: participant.total_invested(),
        }
    }
}

/// End-of-round snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusReport {
    pub round: u32,
    pub treasury: Money,
    pub active: usize,
    /// Participants that left or turned angry.
    pub departed: usize,
    /// Richest active participants, at most three.
    pub top: Vec<Standing>,
}

/// Outcome of a finished game.
#[derive(Debug, Clone, PartialEq)]
pub struct GameSummary {
    pub organizer: String,
    pub organizer_profit: Money,
    /// Everyone ever added, whatever their status.
    pub participants: usize,
    pub final_treasury: Money,
    pub peak_treasury: Money,
    pub richest: Option<Standing>,
}
