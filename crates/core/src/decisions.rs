//! Random decision sources.
//!
//! Every probability gate, amount draw, shuffle and pick the round engine
//! makes goes through [`Decisions`], so a run can be replayed from a seed and
//! tests can force each branch.

use std::collections::VecDeque;

use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};

use crate::models::ParticipantId;

/// Source of the random choices a round needs.
pub trait Decisions {
    /// Draw in `[0, 100)` and report whether it landed below `percent`.
    fn chance(&mut self, percent: u8) -> bool;

    /// Integer amount in `[low, high)`.
    fn amount(&mut self, low: i64, high: i64) -> i64;

    /// Index in `[0, len)`. `len` must be non-zero.
    fn pick(&mut self, len: usize) -> usize;

    /// Put `ids` into a random order.
    fn shuffle(&mut self, ids: &mut [ParticipantId]);
}

/// Production source backed by a `rand` generator.
#[derive(Debug, Clone)]
pub struct RngDecisions<R> {
    rng: R,
}

impl RngDecisions<StdRng> {
    /// Deterministic generator for reproducible runs.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    /// Seed from the configured value when present, otherwise from OS entropy.
    pub fn from_seed(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::seeded(seed),
            None => Self::new(StdRng::from_entropy()),
        }
    }
}

impl<R: Rng> RngDecisions<R> {
    /// Wrap an existing generator.
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> Decisions for RngDecisions<R> {
    fn chance(&mut self, percent: u8) -> bool {
        self.rng.gen_range(0..100u8) < percent
    }

    fn amount(&mut self, low: i64, high: i64) -> i64 {
        self.rng.gen_range(low..high)
    }

    fn pick(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len)
    }

    fn shuffle(&mut self, ids: &mut [ParticipantId]) {
        ids.shuffle(&mut self.rng);
    }
}

/// Scripted source that replays queued answers.
///
/// Once a queue runs dry it falls back to a fixed answer: `default_chance` for
/// gates, the lower bound for amounts, index 0 for picks. Shuffles leave the
/// registry order untouched.
#[derive(Debug, Clone, Default)]
pub struct ScriptedDecisions {
    chances: VecDeque<bool>,
    amounts: VecDeque<i64>,
    picks: VecDeque<usize>,
    default_chance: bool,
}

impl ScriptedDecisions {
    /// Source whose every gate answers "no".
    pub fn never() -> Self {
        Self::default()
    }

    /// Source whose every gate answers "yes".
    pub fn always() -> Self {
        Self {
            default_chance: true,
            ..Self::default()
        }
    }

    /// Queue answers for upcoming probability gates.
    pub fn with_chances(mut self, chances: impl IntoIterator<Item = bool>) -> Self {
        self.chances.extend(chances);
        self
    }

    /// Queue values for upcoming amount draws.
    pub fn with_amounts(mut self, amounts: impl IntoIterator<Item = i64>) -> Self {
        self.amounts.extend(amounts);
        self
    }

    /// Queue indices for upcoming picks.
    pub fn with_picks(mut self, picks: impl IntoIterator<Item = usize>) -> Self {
        self.picks.extend(picks);
        self
    }
}

impl Decisions for ScriptedDecisions {
    fn chance(&mut self, _percent: u8) -> bool {
        self.chances.pop_front().unwrap_or(self.default_chance)
    }

    fn amount(&mut self, low: i64, high: i64) -> i64 {
        self.amounts
            .pop_front()
            .map(|value| value.clamp(low, high - 1))
            .unwrap_or(low)
    }

    fn pick(&mut self, len: usize) -> usize {
        self.picks
            .pop_front()
            .map(|index| index.min(len.saturating_sub(1)))
            .unwrap_or(0)
    }

    fn shuffle(&mut self, _ids: &mut [ParticipantId]) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_sources_agree() {
        let mut a = RngDecisions::seeded(7);
        let mut b = RngDecisions::seeded(7);
        for _ in 0..32 {
            assert_eq!(a.amount(100, 301), b.amount(100, 301));
            assert_eq!(a.chance(60), b.chance(60));
        }
    }

    #[test]
    fn rng_draws_respect_bounds() {
        let mut decisions = RngDecisions::seeded(11);
        for _ in 0..500 {
            let value = decisions.amount(50, 201);
            assert!((50..201).contains(&value));
            assert!(decisions.pick(4) < 4);
        }
        assert!(!decisions.chance(0));
        assert!(decisions.chance(100));
    }

    #[test]
    fn rng_shuffle_keeps_members() {
        let mut decisions = RngDecisions::seeded(3);
        let mut ids: Vec<_> = (0..10).map(ParticipantId).collect();
        decisions.shuffle(&mut ids);
        ids.sort();
        assert_eq!(ids, (0..10).map(ParticipantId).collect::<Vec<_>>());
    }

    #[test]
    fn scripted_replays_then_falls_back() {
        let mut decisions = ScriptedDecisions::never()
            .with_chances([true])
            .with_amounts([250, 9999])
            .with_picks([2]);
        assert!(decisions.chance(10));
        assert!(!decisions.chance(90));
        assert_eq!(decisions.amount(100, 301), 250);
        assert_eq!(decisions.amount(100, 301), 300);
        assert_eq!(decisions.amount(100, 301), 100);
        assert_eq!(decisions.pick(4), 2);
        assert_eq!(decisions.pick(4), 0);
        assert!(ScriptedDecisions::always().chance(1));
    }
}
