use tracing::{debug, warn};

use crate::{
    error::GameError,
    history::EventLog,
    models::{format_money, Money, Participant, ParticipantId, ParticipantStatus},
    registry::ParticipantRegistry,
};

/// Everything that changes during a run, owned as one value.
#[derive(Debug, Clone)]
pub struct GameState {
    organizer: Participant,
    organizer_initial: Money,
    registry: ParticipantRegistry,
    history: EventLog,
    treasury: Money,
    peak_treasury: Money,
    round: u32,
}

impl GameState {
    pub fn new(
        organizer_name: impl Into<String>,
        organizer_funds: Money,
        history_len: usize,
    ) -> Self {
        Self {
            organizer: Participant::new(organizer_name, organizer_funds),
            organizer_initial: organizer_funds,
            registry: ParticipantRegistry::new(),
            history: EventLog::new(history_len),
            treasury: Money::ZERO,
            peak_treasury: Money::ZERO,
            round: 1,
        }
    }

    pub fn organizer(&self) -> &Participant {
        &self.organizer
    }

    /// Organizer funds minus what they started with.
    pub fn organizer_profit(&self) -> Money {
        self.organizer.funds() - self.organizer_initial
    }

    pub fn registry(&self) -> &ParticipantRegistry {
        &self.registry
    }

    pub fn history(&self) -> &EventLog {
        &self.history
    }

    pub fn treasury(&self) -> Money {
        self.treasury
    }

    /// Highest treasury balance reached so far.
    pub fn peak_treasury(&self) -> Money {
        self.peak_treasury
    }

    /// Number of the round about to be played.
    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn participant(&self, id: ParticipantId) -> Result<&Participant, GameError> {
        self.registry.get(id).ok_or(GameError::UnknownParticipant(id))
    }

    fn participant_mut(&mut self, id: ParticipantId) -> Result<&mut Participant, GameError> {
        self.registry
            .get_mut(id)
            .ok_or(GameError::UnknownParticipant(id))
    }

    /// Add a participant and log the join. The treasury is left alone.
    pub fn register(&mut self, name: impl Into<String>, investment: Money) -> ParticipantId {
        let name = name.into();
        self.history.record(
            format!("{name} joined with {}", format_money(investment)),
            investment,
        );
        self.registry.add(name, investment)
    }

    /// Add money to the treasury.
    pub fn deposit(&mut self, amount: Money) {
        self.treasury += amount;
        if self.treasury > self.peak_treasury {
            self.peak_treasury = self.treasury;
        }
        debug!(amount = %amount, treasury = %self.treasury, "Treasury deposit");
    }

    /// Register a participant whose stake goes straight into the treasury.
    pub fn enroll(&mut self, name: impl Into<String>, investment: Money) -> ParticipantId {
        let id = self.register(name, investment);
        self.deposit(investment);
        id
    }

    /// Pay `amount` from the treasury to a participant.
    ///
    /// Rejected without any change when the treasury holds less than `amount`.
    pub fn pay(&mut self, id: ParticipantId, amount: Money) -> Result<(), GameError> {
        if self.treasury < amount {
            warn!(participant = %id, amount = %amount, treasury = %self.treasury, "Payment refused");
            return Err(GameError::InsufficientTreasury {
                available: self.treasury,
                requested: amount,
            });
        }
        self.participant_mut(id)?.receive(amount);
        self.treasury -= amount;
        debug!(participant = %id, amount = %amount, treasury = %self.treasury, "Treasury payment");
        Ok(())
    }

    /// Credit a participant with money that does not come from the treasury.
    pub fn credit(&mut self, id: ParticipantId, amount: Money) -> Result<(), GameError> {
        self.participant_mut(id)?.receive(amount);
        Ok(())
    }

    pub fn set_status(
        &mut self,
        id: ParticipantId,
        status: ParticipantStatus,
    ) -> Result<(), GameError> {
        self.participant_mut(id)?.set_status(status);
        Ok(())
    }

    pub fn note_invitation(&mut self, id: ParticipantId) -> Result<(), GameError> {
        self.participant_mut(id)?.record_invitation();
        Ok(())
    }

    /// Append an entry to the event log.
    pub fn record(&mut self, description: impl Into<String>, amount: Money) {
        self.history.record(description, amount);
    }

    /// Whether the treasury has run dry.
    pub fn is_treasury_depleted(&self) -> bool {
        self.treasury <= Money::ZERO
    }

    pub(crate) fn advance_round(&mut self) {
        self.round += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> GameState {
        GameState::new("Organizer", Money::from(1000), 10)
    }

    #[test]
    fn enroll_logs_and_deposits() {
        let mut state = state();
        let id = state.enroll("Alexei", Money::from(200));
        assert_eq!(state.treasury(), Money::from(200));
        assert_eq!(state.peak_treasury(), Money::from(200));
        assert_eq!(state.participant(id).unwrap().name(), "Alexei");
        assert_eq!(state.history().len(), 1);
        assert_eq!(
            state.history().entries()[0].description,
            "Alexei joined with $200.00"
        );
    }

    #[test]
    fn payout_moves_money_from_treasury() {
        let mut state = state();
        let id = state.register("Maria", Money::from(200));
        state.deposit(Money::from(900));

        let payment = Money::from(200) * Money::new(3, 1);
        state.pay(id, payment).unwrap();

        let maria = state.participant(id).unwrap();
        assert_eq!(payment, Money::from(60));
        assert_eq!(state.treasury(), Money::from(840));
        assert_eq!(maria.funds(), Money::from(260));
        assert_eq!(maria.total_received(), Money::from(60));
        assert_eq!(state.peak_treasury(), Money::from(900));
    }

    #[test]
    fn payout_beyond_treasury_is_refused() {
        let mut state = state();
        let id = state.register("Dmitri", Money::from(300));
        state.deposit(Money::from(20));

        let err = state.pay(id, Money::from(50)).unwrap_err();
        assert_eq!(
            err,
            GameError::InsufficientTreasury {
                available: Money::from(20),
                requested: Money::from(50),
            }
        );
        assert_eq!(state.treasury(), Money::from(20));
        assert_eq!(state.participant(id).unwrap().funds(), Money::from(300));
    }

    #[test]
    fn unknown_participant_leaves_treasury_alone() {
        let mut state = state();
        state.deposit(Money::from(100));
        let err = state.pay(ParticipantId(9), Money::from(10)).unwrap_err();
        assert_eq!(err, GameError::UnknownParticipant(ParticipantId(9)));
        assert_eq!(state.treasury(), Money::from(100));
    }

    #[test]
    fn credit_does_not_touch_treasury() {
        let mut state = state();
        let id = state.enroll("Sergei", Money::from(250));
        state.credit(id, Money::from(30)).unwrap();
        assert_eq!(state.treasury(), Money::from(250));
        assert_eq!(state.participant(id).unwrap().funds(), Money::from(280));
    }

    #[test]
    fn depletion_depends_on_treasury_only() {
        let mut state = state();
        assert!(state.is_treasury_depleted());
        state.enroll("Olga1", Money::from(100));
        assert!(!state.is_treasury_depleted());
        state.set_status(ParticipantId(0), ParticipantStatus::Left).unwrap();
        assert!(!state.is_treasury_depleted());
        assert_eq!(state.organizer_profit(), Money::ZERO);
    }
}
