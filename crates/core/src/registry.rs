//! Participant registry.

use std::cmp::Ordering;

use crate::{
    decisions::Decisions,
    models::{Money, Participant, ParticipantId},
};

/// Owns every participant ever added. Records are never removed; leaving the
/// scheme is a status change.
#[derive(Debug, Clone, Default)]
pub struct ParticipantRegistry {
    participants: Vec<Participant>,
}

impl ParticipantRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an active participant. Names are not required to be unique.
    pub fn add(&mut self, name: impl Into<String>, initial: Money) -> ParticipantId {
        let id = ParticipantId(self.participants.len());
        self.participants.push(Participant::new(name, initial));
        id
    }

    /// Total participants ever added.
    pub fn len(&self) -> usize {
        self.participants.len()
    }

    /// Whether nobody has joined yet.
    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }

    /// Look up a participant.
    pub fn get(&self, id: ParticipantId) -> Option<&Participant> {
        self.participants.get(id.0)
    }

    pub(crate) fn get_mut(&mut self, id: ParticipantId) -> Option<&mut Participant> {
        self.participants.get_mut(id.0)
    }

    /// All participants in registry order.
    pub fn iter(&self) -> impl Iterator<Item = (ParticipantId, &Participant)> {
        self.participants
            .iter()
            .enumerate()
            .map(|(index, participant)| (ParticipantId(index), participant))
    }

    /// Active participants in registry order.
    pub fn active(&self) -> impl Iterator<Item = (ParticipantId, &Participant)> {
        self.iter().filter(|(_, participant)| participant.is_active())
    }

    /// Ids of the active participants, in registry order.
    pub fn active_ids(&self) -> Vec<ParticipantId> {
        self.active().map(|(id, _)| id).collect()
    }

    /// Number of active participants.
    pub fn active_count(&self) -> usize {
        self.active().count()
    }

    /// Number of participants that left or turned angry.
    pub fn inactive_count(&self) -> usize {
        self.len() - self.active_count()
    }

    /// Up to `count` active participants in random order.
    pub fn sample_active(&self, decisions: &mut dyn Decisions, count: usize) -> Vec<ParticipantId> {
        self.sample_where(decisions, count, Participant::is_active)
    }

    /// Shuffle the participants matching `predicate` and keep the first `count`.
    pub fn sample_where(
        &self,
        decisions: &mut dyn Decisions,
        count: usize,
        predicate: impl Fn(&Participant) -> bool,
    ) -> Vec<ParticipantId> {
        let mut ids: Vec<_> = self
            .iter()
            .filter(|&(_, participant)| predicate(participant))
            .map(|(id, _)| id)
            .collect();
        decisions.shuffle(&mut ids);
        ids.truncate(count);
        ids
    }

    /// Active participants ranked by funds, richest first. Ties keep registry order.
    pub fn top_by_funds(&self, count: usize) -> Vec<&Participant> {
        let mut ranked: Vec<_> = self.active().map(|(_, participant)| participant).collect();
        ranked.sort_by(|a, b| b.funds().cmp(&a.funds()));
        ranked.truncate(count);
        ranked
    }

    /// Participant with the highest funds regardless of status; the first one wins ties.
    pub fn richest(&self) -> Option<&Participant> {
        self.participants.iter().fold(None, |best, participant| match best {
            Some(current) if participant.funds().cmp(&current.funds()) != Ordering::Greater => {
                Some(current)
            }
            _ => Some(participant),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        decisions::{RngDecisions, ScriptedDecisions},
        models::ParticipantStatus,
    };

    fn seeded() -> ParticipantRegistry {
        let mut registry = ParticipantRegistry::new();
        registry.add("Alexei", Money::from(200));
        registry.add("Maria", Money::from(150));
        registry.add("Dmitri", Money::from(300));
        registry.add("Sergei", Money::from(250));
        registry
    }

    #[test]
    fn add_allows_duplicate_names() {
        let mut registry = seeded();
        let first = registry.add("Anna5", Money::from(100));
        let second = registry.add("Anna5", Money::from(120));
        assert_ne!(first, second);
        assert_eq!(registry.len(), 6);
    }

    #[test]
    fn active_skips_departed_in_order() {
        let mut registry = seeded();
        registry
            .get_mut(ParticipantId(1))
            .unwrap()
            .set_status(ParticipantStatus::Angry);
        registry
            .get_mut(ParticipantId(3))
            .unwrap()
            .set_status(ParticipantStatus::Left);

        let names: Vec<_> = registry.active().map(|(_, p)| p.name()).collect();
        assert_eq!(names, ["Alexei", "Dmitri"]);
        assert_eq!(registry.active_count(), 2);
        assert_eq!(registry.inactive_count(), 2);
    }

    #[test]
    fn sample_is_bounded_and_filtered() {
        let registry = seeded();
        let mut decisions = RngDecisions::seeded(5);
        let sample = registry.sample_where(&mut decisions, 2, |p| p.funds() > Money::from(180));
        assert_eq!(sample.len(), 2);
        for id in sample {
            assert!(registry.get(id).unwrap().funds() > Money::from(180));
        }

        let everyone = registry.sample_active(&mut ScriptedDecisions::never(), 10);
        assert_eq!(everyone.len(), 4);
    }

    #[test]
    fn top_by_funds_is_stable() {
        let mut registry = seeded();
        registry.add("Olga5", Money::from(300));
        let top: Vec<_> = registry.top_by_funds(3).iter().map(|p| p.name()).collect();
        assert_eq!(top, ["Dmitri", "Olga5", "Sergei"]);
    }

    #[test]
    fn richest_prefers_first_on_tie() {
        let mut registry = seeded();
        registry.add("Olga5", Money::from(300));
        registry
            .get_mut(ParticipantId(2))
            .unwrap()
            .set_status(ParticipantStatus::Left);
        assert_eq!(registry.richest().unwrap().name(), "Dmitri");
        assert!(ParticipantRegistry::new().richest().is_none());
    }
}
