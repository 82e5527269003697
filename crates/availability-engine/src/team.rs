//! Team-level quorum over the players of one team.
//!
//! Two policies are offered:
//!
//! - **strict** ([`TeamAvailability::available_at`]): a player counts toward
//!   every tier up to their own ("at least Maybe" includes the Yes players),
//!   and the team gets the best tier whose count reaches the quorum.
//! - **lenient** ([`TeamAvailability::any_available_at`]): players are tallied
//!   by their own tier only, and the team is reported whenever anyone at all
//!   might turn up.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::instant::TimeInstant;
use crate::player::PlayerAvailability;
use crate::rule::AvailabilityRule;
use crate::tier::Tier;

/// Player name standing in for `players_required` interchangeable extra players.
pub const WILDCARD_PLAYER: &str = "*";

/// Resolved team status: a player count paired with the tier it was counted at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TeamStatus {
    pub players: u32,
    pub tier: Tier,
}

impl TeamStatus {
    pub const UNAVAILABLE: TeamStatus = TeamStatus {
        players: 0,
        tier: Tier::No,
    };

    pub fn new(players: u32, tier: Tier) -> Self {
        TeamStatus { players, tier }
    }
}

/// The players of one team, keyed by name.
#[derive(Debug, Clone, Default)]
pub struct TeamAvailability {
    players: BTreeMap<String, PlayerAvailability>,
}

impl TeamAvailability {
    pub fn new() -> Self {
        TeamAvailability::default()
    }

    /// Add rules to `player`, creating the player on first use.
    pub fn add<I>(&mut self, player: &str, rules: I)
    where
        I: IntoIterator<Item = AvailabilityRule>,
    {
        self.players.entry(player.to_string()).or_default().add(rules);
    }

    pub fn players(&self) -> impl Iterator<Item = (&str, &PlayerAvailability)> {
        self.players.iter().map(|(name, player)| (name.as_str(), player))
    }

    pub fn player(&self, name: &str) -> Option<&PlayerAvailability> {
        self.players.get(name)
    }

    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    /// Strict quorum: the highest tier with at least `players_required`
    /// players at that tier or better, or [`TeamStatus::UNAVAILABLE`].
    pub fn available_at(&self, ts: &TimeInstant, players_required: u32) -> TeamStatus {
        let mut counts = [0u32; 3];
        for (name, player) in &self.players {
            let tier = player.available_at(ts);
            let weight = weight(name, players_required);
            // Everyone counts toward every tier up to their own. Counts
            // saturate since the wildcard weight is the quorum itself.
            for level in Tier::ALL.iter().filter(|level| **level <= tier) {
                let count = &mut counts[level.index()];
                *count = count.saturating_add(weight);
            }
        }

        let mut result = TeamStatus::UNAVAILABLE;
        for level in Tier::ALL {
            let count = counts[level.index()];
            if count >= players_required {
                result = TeamStatus::new(count, level);
            }
        }
        result
    }

    /// Lenient quorum used for the player-detail report.
    ///
    /// The count is everyone at `Maybe` or `Yes`. The tier is `Yes` when the
    /// `Yes` players alone make quorum or nobody is merely `Maybe`, otherwise
    /// `Maybe`. With nobody available the result is [`TeamStatus::UNAVAILABLE`].
    pub fn any_available_at(&self, ts: &TimeInstant, players_required: u32) -> TeamStatus {
        let mut counts = [0u32; 3];
        for (name, player) in &self.players {
            let tier = player.available_at(ts);
            let count = &mut counts[tier.index()];
            *count = count.saturating_add(weight(name, players_required));
        }

        let yes = counts[Tier::Yes.index()];
        let maybe = counts[Tier::Maybe.index()];
        let total = yes.saturating_add(maybe);

        if total == 0 {
            TeamStatus::UNAVAILABLE
        } else if yes >= players_required || maybe == 0 {
            TeamStatus::new(total, Tier::Yes)
        } else {
            TeamStatus::new(total, Tier::Maybe)
        }
    }
}

fn weight(name: &str, players_required: u32) -> u32 {
    if name == WILDCARD_PLAYER {
        players_required
    } else {
        1
    }
}
