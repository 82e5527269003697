//! The league: every team, plus a flattened directory of players across teams.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::LazyLock;

use chrono::Weekday;
use chrono_tz::Tz;
use regex::Regex;

use crate::instant::TimeInstant;
use crate::player::PlayerAvailability;
use crate::rule::{AvailabilityRule, DateBounds, WallTime};
use crate::team::{TeamAvailability, TeamStatus};
use crate::tier::Tier;

static USERNAME_SUFFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<name>.+) (?P<username>\(@[^ ]+\))$").expect("valid username regex")
});

/// One validated input record: a window on one or more weekdays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleRecord {
    pub team: String,
    pub player: String,
    pub timezone: Tz,
    pub weekdays: Vec<Weekday>,
    pub from: WallTime,
    pub to: WallTime,
    pub tier: Tier,
    pub dates: DateBounds,
}

impl RuleRecord {
    /// The rules this record expands to, one (or two, if overnight) per weekday.
    pub fn rules(&self) -> impl Iterator<Item = AvailabilityRule> + '_ {
        self.weekdays.iter().flat_map(move |weekday| {
            AvailabilityRule::weekly(
                self.timezone,
                *weekday,
                self.from,
                self.to,
                self.tier,
                self.dates,
            )
        })
    }
}

/// All teams in the league.
#[derive(Debug, Clone, Default)]
pub struct LeagueAvailability {
    teams: BTreeMap<String, TeamAvailability>,
    /// `"<team> / <player>"` -> (team, player) keys into `teams`.
    directory: BTreeMap<String, (String, String)>,
}

impl LeagueAvailability {
    pub fn new() -> Self {
        LeagueAvailability::default()
    }

    /// Add a validated record to its team and player. The team name must not
    /// contain [`DISPLAY_SEPARATOR`]; [`load_league`](crate::load_league)
    /// rejects such rows.
    pub fn insert(&mut self, record: &RuleRecord) {
        self.add_rules(&record.team, &record.player, record.rules());
    }

    /// Add already-built rules to `player` of `team`.
    pub fn add_rules<I>(&mut self, team: &str, player: &str, rules: I)
    where
        I: IntoIterator<Item = AvailabilityRule>,
    {
        self.teams
            .entry(team.to_string())
            .or_default()
            .add(player, rules);
        self.directory.insert(
            display_name(team, player),
            (team.to_string(), player.to_string()),
        );
    }

    pub fn teams(&self) -> impl Iterator<Item = (&str, &TeamAvailability)> {
        self.teams.iter().map(|(name, team)| (name.as_str(), team))
    }

    pub fn team(&self, name: &str) -> Option<&TeamAvailability> {
        self.teams.get(name)
    }

    pub fn team_names(&self) -> impl Iterator<Item = &str> {
        self.teams.keys().map(String::as_str)
    }

    /// Display names of every player, sorted.
    pub fn player_names(&self) -> impl Iterator<Item = &str> {
        self.directory.keys().map(String::as_str)
    }

    /// Look a player up by display name.
    pub fn player(&self, display_name: &str) -> Option<&PlayerAvailability> {
        let (team, player) = self.directory.get(display_name)?;
        self.teams.get(team)?.player(player)
    }

    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }

    pub fn rule_count(&self) -> usize {
        self.teams
            .values()
            .flat_map(|team| team.players())
            .map(|(_, player)| player.rule_count())
            .sum()
    }

    /// Strict status of every team above `No`.
    pub fn teams_available_at(
        &self,
        ts: &TimeInstant,
        players_required: u32,
    ) -> BTreeMap<String, TeamStatus> {
        self.collect_teams(|team| team.available_at(ts, players_required))
    }

    /// Lenient status of every team above `No`.
    pub fn teams_any_available_at(
        &self,
        ts: &TimeInstant,
        players_required: u32,
    ) -> BTreeMap<String, TeamStatus> {
        self.collect_teams(|team| team.any_available_at(ts, players_required))
    }

    /// Every player, by display name, whose own tier is above `No`.
    pub fn players_available_at(&self, ts: &TimeInstant) -> BTreeSet<(String, Tier)> {
        self.directory
            .keys()
            .filter_map(|name| {
                let tier = self.player(name)?.available_at(ts);
                tier.is_available().then(|| (name.clone(), tier))
            })
            .collect()
    }

    fn collect_teams<F>(&self, status: F) -> BTreeMap<String, TeamStatus>
    where
        F: Fn(&TeamAvailability) -> TeamStatus,
    {
        self.teams
            .iter()
            .filter_map(|(name, team)| {
                let result = status(team);
                result.tier.is_available().then(|| (name.clone(), result))
            })
            .collect()
    }
}

/// Joins team and player in a display name. Team names must not contain it,
/// or a team column could coincide with a player column in detail reports.
pub const DISPLAY_SEPARATOR: &str = " / ";

/// `"<team> / <player>"`, with a trailing ` (@handle)` removed from the player.
pub fn display_name(team: &str, player: &str) -> String {
    let player = USERNAME_SUFFIX
        .captures(player)
        .and_then(|caps| caps.name("name"))
        .map_or(player, |m| m.as_str());
    format!("{team}{DISPLAY_SEPARATOR}{player}")
}
