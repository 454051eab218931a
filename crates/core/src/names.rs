//! Participant naming.

use crate::decisions::Decisions;

const FIRST_NAMES: [&str; 10] = [
    "Anna", "Ivan", "Olga", "Mikhail", "Elena", "Andrei", "Natalia", "Pavel", "Yulia", "Vladimir",
];

/// Founding members seeded before the first round, with their stakes.
pub const FOUNDERS: [(&str, i64); 4] = [
    ("Alexei", 200),
    ("Maria", 150),
    ("Dmitri", 300),
    ("Sergei", 250),
];

/// Random first name suffixed with the registry position the newcomer will take.
pub fn generate(decisions: &mut dyn Decisions, registered: usize) -> String {
    let first = FIRST_NAMES[decisions.pick(FIRST_NAMES.len())];
    format!("{first}{}", registered + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decisions::ScriptedDecisions;

    #[test]
    fn suffix_follows_registry_size() {
        let mut decisions = ScriptedDecisions::never().with_picks([2, 9]);
        assert_eq!(generate(&mut decisions, 6), "Olga7");
        assert_eq!(generate(&mut decisions, 0), "Vladimir1");
    }
}
