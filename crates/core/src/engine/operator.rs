use crate::{
    events::SpecialEvent,
    models::{Money, ParticipantId},
};

/// A participant asking to be paid this round.
#[derive(Debug, Clone, PartialEq)]
pub struct PayoutDemand {
    pub id: ParticipantId,
    pub name: String,
    pub invested: Money,
    pub expected: Money,
}

/// An active participant wants to bring someone in.
#[derive(Debug, Clone, PartialEq)]
pub struct InvitationProposal {
    pub inviter: ParticipantId,
    pub inviter_name: String,
    pub invitee: String,
    pub investment: Money,
}

/// A participant asking for a refund during a crisis of confidence.
#[derive(Debug, Clone, PartialEq)]
pub struct RefundClaim {
    pub id: ParticipantId,
    pub name: String,
    pub invested: Money,
}

/// Narrative output of a round, in the order it happened.
#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    RoundStarted { round: u32, treasury: Money },
    Joined { name: String, investment: Money },
    PaymentMade { name: String, amount: Money },
    PaymentRefused { name: String, amount: Money, available: Money },
    NobodyPaid,
    TurnedAngry { name: String },
    InvitationAccepted { inviter: String, invitee: String, bonus: Money },
    InvitationDeclined { inviter: String, invitee: String },
    BonusRefused { inviter: String, bonus: Money },
    Event(SpecialEvent),
    FledPolice { name: String },
    AnonymousDeposit { amount: Money },
    RefundPaid { name: String, amount: Money },
    RefundRefused { name: String, amount: Money, available: Money },
    RefundsDeclined,
}

/// The organizer's side of the table.
///
/// The engine reports what happens through [`Operator::notify`] and blocks on
/// the three decisions a round can ask for.
pub trait Operator {
    fn notify(&mut self, notice: &Notice);

    /// Zero-based index into `demands` of the one to pay, or `None` to pay nobody.
    /// Indices past the end count as `None`.
    fn choose_payout(&mut self, demands: &[PayoutDemand]) -> Option<usize>;

    fn approve_invitation(&mut self, proposal: &InvitationProposal) -> bool;

    /// Refund every claimant (as far as the treasury allows) or nobody.
    fn approve_refunds(&mut self, claims: &[RefundClaim]) -> bool;
}

/// Forwards to the real operator while keeping a copy of every notice.
pub(crate) struct Recorder<'a> {
    inner: &'a mut dyn Operator,
    pub(crate) notices: Vec<Notice>,
}

impl<'a> Recorder<'a> {
    pub(crate) fn new(inner: &'a mut dyn Operator) -> Self {
        Self {
            inner,
            notices: Vec::new(),
        }
    }
}

impl Operator for Recorder<'_> {
    fn notify(&mut self, notice: &Notice) {
        self.notices.push(notice.clone());
        self.inner.notify(notice);
    }

    fn choose_payout(&mut self, demands: &[PayoutDemand]) -> Option<usize> {
        self.inner.choose_payout(demands)
    }

    fn approve_invitation(&mut self, proposal: &InvitationProposal) -> bool {
        self.inner.approve_invitation(proposal)
    }

    fn approve_refunds(&mut self, claims: &[RefundClaim]) -> bool {
        self.inner.approve_refunds(claims)
    }
}
