use std::collections::HashSet;

use ponzi_core::{
    GameConfig, InvitationProposal, Money, Notice, Operator, ParticipantId, PayoutDemand,
    RefundClaim, RngDecisions, RoundEngine,
};
use proptest::prelude::*;

/// Says yes to everything, which drains the treasury fastest.
struct GreedyOperator;

impl Operator for GreedyOperator {
    fn notify(&mut self, _notice: &Notice) {}

    fn choose_payout(&mut self, _demands: &[PayoutDemand]) -> Option<usize> {
        Some(0)
    }

    fn approve_invitation(&mut self, _proposal: &InvitationProposal) -> bool {
        true
    }

    fn approve_refunds(&mut self, _claims: &[RefundClaim]) -> bool {
        true
    }
}

/// Alternates answers so both branches of every decision get exercised.
struct FickleOperator {
    calls: usize,
}

impl FickleOperator {
    fn flip(&mut self) -> bool {
        self.calls += 1;
        self.calls % 2 == 0
    }
}

impl Operator for FickleOperator {
    fn notify(&mut self, _notice: &Notice) {}

    fn choose_payout(&mut self, demands: &[PayoutDemand]) -> Option<usize> {
        self.flip().then(|| demands.len() - 1)
    }

    fn approve_invitation(&mut self, _proposal: &InvitationProposal) -> bool {
        self.flip()
    }

    fn approve_refunds(&mut self, _claims: &[RefundClaim]) -> bool {
        self.flip()
    }
}

fn engine(seed: u64) -> RoundEngine<RngDecisions<rand::rngs::StdRng>> {
    let mut engine = RoundEngine::new(
        GameConfig::default(),
        "Organizer",
        RngDecisions::seeded(seed),
    );
    engine.start();
    engine
}

proptest! {
    #[test]
    fn treasury_never_goes_negative(seed in 0_u64..5_000, rounds in 1_usize..40) {
        let mut engine = engine(seed);
        let mut operator = GreedyOperator;
        for _ in 0..rounds {
            engine.play_round(&mut operator);
            prop_assert!(engine.state().treasury() >= Money::ZERO);
            prop_assert!(engine.state().peak_treasury() >= engine.state().treasury());
        }
    }

    #[test]
    fn participant_books_balance(seed in 0_u64..5_000, rounds in 1_usize..30) {
        let mut engine = engine(seed);
        let mut operator = FickleOperator { calls: 0 };
        for _ in 0..rounds {
            engine.play_round(&mut operator);
        }
        for (_, participant) in engine.state().registry().iter() {
            prop_assert_eq!(
                participant.funds(),
                participant.total_invested() + participant.total_received()
            );
        }
    }

    #[test]
    fn payout_eligibility_never_returns(seed in 0_u64..5_000, rounds in 1_usize..40) {
        let ceiling = Money::new(15, 1);
        let mut engine = engine(seed);
        let mut operator = GreedyOperator;
        let mut satisfied: HashSet<ParticipantId> = HashSet::new();
        for _ in 0..rounds {
            engine.play_round(&mut operator);
            for (id, participant) in engine.state().registry().iter() {
                let eligible = participant.demands_payout(ceiling);
                if satisfied.contains(&id) {
                    prop_assert!(!eligible);
                }
                if !eligible {
                    satisfied.insert(id);
                }
            }
        }
    }

    #[test]
    fn seeded_runs_replay_identically(seed in 0_u64..5_000, rounds in 1_usize..20) {
        let mut first = engine(seed);
        let mut second = engine(seed);
        for round in 1..=rounds {
            let a = first.play_round(&mut FickleOperator { calls: round });
            let b = second.play_round(&mut FickleOperator { calls: round });
            prop_assert_eq!(a, b);
        }
        let describe = |engine: &RoundEngine<_>| {
            engine
                .state()
                .history()
                .entries()
                .iter()
                .map(|action| action.description.clone())
                .collect::<Vec<_>>()
        };
        prop_assert_eq!(describe(&first), describe(&second));
    }

    #[test]
    fn round_counter_counts_rounds(seed in 0_u64..5_000, rounds in 1_u32..25) {
        let mut engine = engine(seed);
        let mut operator = FickleOperator { calls: 0 };
        for _ in 0..rounds {
            engine.play_round(&mut operator);
        }
        prop_assert_eq!(engine.state().round(), rounds + 1);
    }
}
