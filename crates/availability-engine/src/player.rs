//! The availability rules of a single player.

use std::collections::HashSet;

use crate::instant::TimeInstant;
use crate::rule::AvailabilityRule;
use crate::tier::Tier;

/// A deduplicated set of rules for one player.
#[derive(Debug, Clone, Default)]
pub struct PlayerAvailability {
    rules: HashSet<AvailabilityRule>,
}

impl PlayerAvailability {
    pub fn new() -> Self {
        PlayerAvailability::default()
    }

    /// Add rules; structurally identical rules are stored once.
    pub fn add<I>(&mut self, rules: I)
    where
        I: IntoIterator<Item = AvailabilityRule>,
    {
        self.rules.extend(rules);
    }

    pub fn rules(&self) -> impl Iterator<Item = &AvailabilityRule> {
        self.rules.iter()
    }

    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// The highest tier among all rules covering `ts`, or `No` if none do.
    pub fn available_at(&self, ts: &TimeInstant) -> Tier {
        self.rules
            .iter()
            .filter(|rule| rule.matches(ts))
            .map(AvailabilityRule::tier)
            .max()
            .unwrap_or(Tier::No)
    }
}

impl FromIterator<AvailabilityRule> for PlayerAvailability {
    fn from_iter<I: IntoIterator<Item = AvailabilityRule>>(iter: I) -> Self {
        let mut player = PlayerAvailability::new();
        player.add(iter);
        player
    }
}
