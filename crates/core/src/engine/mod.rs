#![allow(missing_docs)]

//! Round resolution.
//!
//! A round runs its phases in a fixed order: arrival, payout demands,
//! invitations, special event, report. Every random branch goes through the
//! engine's [`Decisions`] source and every organizer choice through an
//! [`Operator`].

mod operator;
mod report;
mod state;

pub use operator::{InvitationProposal, Notice, Operator, PayoutDemand, RefundClaim};
pub use report::{GameSummary, Standing, StatusReport};
pub use state::GameState;

use tracing::{debug, info, warn};

use crate::{
    config::GameConfig,
    decisions::Decisions,
    events::SpecialEvent,
    models::{format_money, Money, ParticipantId, ParticipantStatus},
    names,
};

use operator::Recorder;

const ARRIVAL_STAKE: (i64, i64) = (100, 301);
const INVITATION_STAKE: (i64, i64) = (50, 201);
const MEDIA_STAKE: (i64, i64) = (200, 501);
const ANONYMOUS_STAKE: (i64, i64) = (500, 1001);

const MEDIA_ARRIVALS: usize = 2;
const MAX_PAYOUT_DEMANDS: usize = 2;
const MAX_POLICE_DEPARTURES: usize = 2;
const MAX_REFUND_CLAIMS: usize = 3;
const TOP_STANDINGS: usize = 3;

/// Participants stop demanding once they received this multiple of their stake.
fn payout_ceiling() -> Money {
    Money::new(15, 1)
}

fn payout_rate() -> Money {
    Money::new(3, 1)
}

fn referral_rate() -> Money {
    Money::new(2, 1)
}

fn refund_rate() -> Money {
    Money::new(5, 1)
}

/// Inviters need strictly more than this in hand.
fn inviter_floor() -> Money {
    Money::from(50)
}

/// What a single call to [`RoundEngine::play_round`] produced.
#[derive(Debug, Clone, PartialEq)]
pub struct RoundSummary {
    /// Number of the round that was played.
    pub round: u32,
    pub report: StatusReport,
    pub event: Option<SpecialEvent>,
    pub notices: Vec<Notice>,
}

/// Owns the game state and advances it one round at a time.
pub struct RoundEngine<D> {
    config: GameConfig,
    state: GameState,
    decisions: D,
}

impl<D: Decisions> RoundEngine<D> {
    /// Fresh game with an empty registry and treasury.
    pub fn new(config: GameConfig, organizer_name: impl Into<String>, decisions: D) -> Self {
        let state = GameState::new(
            organizer_name,
            config.organizer_money(),
            config.history_len,
        );
        Self::with_state(config, state, decisions)
    }

    /// Resume from an existing state.
    pub fn with_state(config: GameConfig, state: GameState, decisions: D) -> Self {
        Self {
            config,
            state,
            decisions,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Seed the founding members; their stakes form the opening treasury.
    pub fn start(&mut self) {
        for (name, stake) in names::FOUNDERS {
            self.state.enroll(name, Money::from(stake));
        }
        info!(
            organizer = %self.state.organizer().name(),
            treasury = %self.state.treasury(),
            "Game started"
        );
    }

    /// Play every phase of the current round and advance the round counter.
    pub fn play_round(&mut self, operator: &mut dyn Operator) -> RoundSummary {
        let round = self.state.round();
        info!(round, treasury = %self.state.treasury(), "Round started");

        let mut recorder = Recorder::new(operator);
        recorder.notify(&Notice::RoundStarted {
            round,
            treasury: self.state.treasury(),
        });

        self.run_arrival(&mut recorder);
        self.run_payout_demands(&mut recorder);
        self.run_invitations(&mut recorder);
        let event = self.run_special_event(&mut recorder);

        let report = self.status_report();
        self.state.advance_round();
        info!(
            round,
            treasury = %report.treasury,
            active = report.active,
            departed = report.departed,
            "Round finished"
        );

        RoundSummary {
            round,
            report,
            event,
            notices: recorder.notices,
        }
    }

    /// Maybe admit one newcomer.
    pub fn run_arrival(&mut self, operator: &mut dyn Operator) -> Option<ParticipantId> {
        if !self.decisions.chance(self.config.odds.arrival) {
            debug!("No arrival this round");
            return None;
        }
        let name = names::generate(&mut self.decisions, self.state.registry().len());
        let investment = self.draw(ARRIVAL_STAKE);
        Some(self.admit(name, investment, operator))
    }

    /// Ask the organizer to pay one of up to two demanding participants.
    pub fn run_payout_demands(&mut self, operator: &mut dyn Operator) {
        let ceiling = payout_ceiling();
        let ids = self.state.registry().sample_where(
            &mut self.decisions,
            MAX_PAYOUT_DEMANDS,
            |participant| participant.is_active() && participant.demands_payout(ceiling),
        );
        if ids.is_empty() {
            debug!("Nobody demands a payout");
            return;
        }

        let demands: Vec<_> = ids
            .into_iter()
            .filter_map(|id| {
                self.state.registry().get(id).map(|participant| PayoutDemand {
                    id,
                    name: participant.name().to_string(),
                    invested: participant.total_invested(),
                    expected: participant.total_invested() * payout_rate(),
                })
            })
            .collect();

        match operator
            .choose_payout(&demands)
            .and_then(|index| demands.get(index))
        {
            Some(demand) => self.settle_payout(demand, operator),
            None => {
                operator.notify(&Notice::NobodyPaid);
                for demand in &demands {
                    if self.decisions.chance(self.config.odds.anger_on_decline) {
                        self.turn_angry(
                            demand.id,
                            format!("{} left over missing payouts", demand.name),
                            operator,
                        );
                    }
                }
            }
        }
    }

    /// Offer each active participant's invitation to the organizer.
    ///
    /// The active set is captured once, so newcomers admitted here cannot
    /// invite in the same round.
    pub fn run_invitations(&mut self, operator: &mut dyn Operator) {
        let inviters = self.state.registry().active_ids();
        for inviter in inviters {
            let proposes = self.decisions.chance(self.config.odds.invitation);
            let Ok(participant) = self.state.participant(inviter) else {
                continue;
            };
            if !proposes || participant.funds() <= inviter_floor() {
                continue;
            }
            let inviter_name = participant.name().to_string();

            let invitee = names::generate(&mut self.decisions, self.state.registry().len());
            let investment = self.draw(INVITATION_STAKE);
            let proposal = InvitationProposal {
                inviter,
                inviter_name,
                invitee,
                investment,
            };

            if operator.approve_invitation(&proposal) {
                self.accept_invitation(proposal, operator);
            } else {
                operator.notify(&Notice::InvitationDeclined {
                    inviter: proposal.inviter_name,
                    invitee: proposal.invitee,
                });
            }
        }
    }

    /// Maybe fire one special event.
    pub fn run_special_event(&mut self, operator: &mut dyn Operator) -> Option<SpecialEvent> {
        if !self.decisions.chance(self.config.odds.special_event) {
            return None;
        }
        let event = SpecialEvent::draw(&mut self.decisions);
        self.resolve_event(event, operator);
        Some(event)
    }

    /// Apply the consequences of `event`.
    pub fn resolve_event(&mut self, event: SpecialEvent, operator: &mut dyn Operator) {
        info!(?event, "Special event");
        operator.notify(&Notice::Event(event));
        match event {
            SpecialEvent::MediaExposure => self.media_exposure(operator),
            SpecialEvent::PoliceScrutiny => self.police_scrutiny(operator),
            SpecialEvent::AnonymousInvestment => self.anonymous_investment(operator),
            SpecialEvent::CrisisOfConfidence => self.crisis_of_confidence(operator),
        }
    }

    /// Read-only snapshot of the current standings.
    pub fn status_report(&self) -> StatusReport {
        let registry = self.state.registry();
        StatusReport {
            round: self.state.round(),
            treasury: self.state.treasury(),
            active: registry.active_count(),
            departed: registry.inactive_count(),
            top: registry
                .top_by_funds(TOP_STANDINGS)
                .into_iter()
                .map(Standing::from)
                .collect(),
        }
    }

    /// The game ends once the treasury is empty.
    ///
    /// With `end_when_no_active` set it also ends when nobody is left active.
    pub fn is_game_over(&self) -> bool {
        self.state.is_treasury_depleted()
            || (self.config.end_when_no_active && self.state.registry().active_count() == 0)
    }

    pub fn summary(&self) -> GameSummary {
        GameSummary {
            organizer: self.state.organizer().name().to_string(),
            organizer_profit: self.state.organizer_profit(),
            participants: self.state.registry().len(),
            final_treasury: self.state.treasury(),
            peak_treasury: self.state.peak_treasury(),
            richest: self.state.registry().richest().map(Standing::from),
        }
    }

    fn draw(&mut self, (low, high): (i64, i64)) -> Money {
        Money::from(self.decisions.amount(low, high))
    }

    fn admit(
        &mut self,
        name: String,
        investment: Money,
        operator: &mut dyn Operator,
    ) -> ParticipantId {
        let id = self.state.enroll(name.clone(), investment);
        info!(participant = %name, investment = %investment, "Participant joined");
        operator.notify(&Notice::Joined { name, investment });
        id
    }

    fn settle_payout(&mut self, demand: &PayoutDemand, operator: &mut dyn Operator) {
        match self.state.pay(demand.id, demand.expected) {
            Ok(()) => {
                self.state.record(
                    format!("Paid {} to {}", format_money(demand.expected), demand.name),
                    demand.expected,
                );
                info!(participant = %demand.name, amount = %demand.expected, "Payout made");
                operator.notify(&Notice::PaymentMade {
                    name: demand.name.clone(),
                    amount: demand.expected,
                });
            }
            Err(err) => {
                debug!(%err, "Payout rejected");
                operator.notify(&Notice::PaymentRefused {
                    name: demand.name.clone(),
                    amount: demand.expected,
                    available: self.state.treasury(),
                });
            }
        }
    }

    /// A treasury-funded bonus is settled before the invitee's stake arrives,
    /// so it can be refused when the treasury is short.
    fn accept_invitation(&mut self, proposal: InvitationProposal, operator: &mut dyn Operator) {
        let bonus = proposal.investment * referral_rate();
        let credited = if self.config.bonus_from_treasury {
            self.state.pay(proposal.inviter, bonus)
        } else {
            self.state.credit(proposal.inviter, bonus)
        };

        self.admit(proposal.invitee.clone(), proposal.investment, operator);
        if let Err(err) = self.state.note_invitation(proposal.inviter) {
            warn!(%err, "Invitation could not be credited");
        }

        let bonus = match credited {
            Ok(()) => {
                self.state.record(
                    format!(
                        "{} earned a {} referral bonus",
                        proposal.inviter_name,
                        format_money(bonus)
                    ),
                    bonus,
                );
                bonus
            }
            Err(err) => {
                debug!(%err, "Referral bonus withheld");
                operator.notify(&Notice::BonusRefused {
                    inviter: proposal.inviter_name.clone(),
                    bonus,
                });
                Money::ZERO
            }
        };

        operator.notify(&Notice::InvitationAccepted {
            inviter: proposal.inviter_name,
            invitee: proposal.invitee,
            bonus,
        });
    }

    fn turn_angry(&mut self, id: ParticipantId, reason: String, operator: &mut dyn Operator) {
        let name = match self.state.participant(id) {
            Ok(participant) => participant.name().to_string(),
            Err(err) => {
                warn!(%err, "Cannot change status");
                return;
            }
        };
        if let Err(err) = self.state.set_status(id, ParticipantStatus::Angry) {
            warn!(%err, "Cannot change status");
            return;
        }
        self.state.record(reason, Money::ZERO);
        info!(participant = %name, "Participant turned angry");
        operator.notify(&Notice::TurnedAngry { name });
    }

    fn media_exposure(&mut self, operator: &mut dyn Operator) {
        for _ in 0..MEDIA_ARRIVALS {
            let name = names::generate(&mut self.decisions, self.state.registry().len());
            let investment = self.draw(MEDIA_STAKE);
            self.admit(name, investment, operator);
        }
    }

    fn police_scrutiny(&mut self, operator: &mut dyn Operator) {
        let scared = self
            .state
            .registry()
            .sample_active(&mut self.decisions, MAX_POLICE_DEPARTURES);
        for id in scared {
            let Ok(participant) = self.state.participant(id) else {
                continue;
            };
            let name = participant.name().to_string();
            if self.state.set_status(id, ParticipantStatus::Left).is_ok() {
                info!(participant = %name, "Participant fled the police");
                operator.notify(&Notice::FledPolice { name });
            }
        }
    }

    fn anonymous_investment(&mut self, operator: &mut dyn Operator) {
        let amount = self.draw(ANONYMOUS_STAKE);
        self.state.deposit(amount);
        self.state.record(
            format!("Anonymous deposit of {}", format_money(amount)),
            amount,
        );
        operator.notify(&Notice::AnonymousDeposit { amount });
    }

    fn crisis_of_confidence(&mut self, operator: &mut dyn Operator) {
        let worried = self
            .state
            .registry()
            .sample_active(&mut self.decisions, MAX_REFUND_CLAIMS);
        let claims: Vec<_> = worried
            .into_iter()
            .filter_map(|id| {
                self.state.registry().get(id).map(|participant| RefundClaim {
                    id,
                    name: participant.name().to_string(),
                    invested: participant.total_invested(),
                })
            })
            .collect();
        if claims.is_empty() {
            debug!("Nobody left to panic");
            return;
        }

        if operator.approve_refunds(&claims) {
            for claim in &claims {
                let refund = claim.invested * refund_rate();
                match self.state.pay(claim.id, refund) {
                    Ok(()) => {
                        self.state.record(
                            format!("Refunded {} to {}", format_money(refund), claim.name),
                            refund,
                        );
                        operator.notify(&Notice::RefundPaid {
                            name: claim.name.clone(),
                            amount: refund,
                        });
                    }
                    Err(err) => {
                        debug!(%err, "Refund rejected");
                        operator.notify(&Notice::RefundRefused {
                            name: claim.name.clone(),
                            amount: refund,
                            available: self.state.treasury(),
                        });
                    }
                }
            }
        } else {
            operator.notify(&Notice::RefundsDeclined);
            for claim in &claims {
                if self.decisions.chance(self.config.odds.anger_on_refusal) {
                    self.turn_angry(
                        claim.id,
                        format!("{} turned angry over a refused refund", claim.name),
                        operator,
                    );
                }
            }
        }
    }
}
