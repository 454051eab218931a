//! Scripted special events.

use crate::decisions::Decisions;

/// One of the four narrative events that may close a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecialEvent {
    /// A press article draws two new investors.
    MediaExposure,
    /// Police interest scares up to two participants away.
    PoliceScrutiny,
    /// Someone drops a large anonymous deposit into the treasury.
    AnonymousInvestment,
    /// Up to three participants want their money back.
    CrisisOfConfidence,
}

impl SpecialEvent {
    /// Every event, in draw order.
    pub const ALL: [SpecialEvent; 4] = [
        SpecialEvent::MediaExposure,
        SpecialEvent::PoliceScrutiny,
        SpecialEvent::AnonymousInvestment,
        SpecialEvent::CrisisOfConfidence,
    ];

    /// Pick one event uniformly.
    pub fn draw(decisions: &mut dyn Decisions) -> Self {
        Self::ALL[decisions.pick(Self::ALL.len())]
    }

    /// Narrative line shown when the event fires.
    pub fn headline(self) -> &'static str {
        match self {
            SpecialEvent::MediaExposure => {
                "The press ran a story about your scheme! Your reputation improved"
            }
            SpecialEvent::PoliceScrutiny => {
                "The police opened an inquiry! Some participants are frightened"
            }
            SpecialEvent::AnonymousInvestment => "Someone made a large investment!",
            SpecialEvent::CrisisOfConfidence => {
                "Crisis of confidence! Some participants want their money back"
            }
        }
    }
}
